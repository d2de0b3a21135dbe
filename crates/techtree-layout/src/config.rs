/// Row slots taken by a tech node in its column
pub const NODE_SPAN: usize = 2;

/// Row slots taken by a placeholder in its column
pub const LINE_SPAN: usize = 1;

/// Minimum gain in family distance for the optimization pass to move or swap
/// a node. Anything lower lets two equally good rows trade places forever.
pub const WOBBLE_THRESHOLD: f64 = 0.25;

/// Tuning of the placement optimization
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Minimum improvement required to move or swap a node
    pub wobble_threshold: f64,

    /// Maximum number of full optimization sweeps
    pub max_wobble_sweeps: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            wobble_threshold: WOBBLE_THRESHOLD,
            max_wobble_sweeps: 1000,
        }
    }
}
