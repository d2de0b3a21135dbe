use thiserror::Error;

/// Errors that can occur while building or laying out a tech graph
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// No node with this name was added to the graph
    #[error("no node named {0:?} in the layout")]
    UnknownNode(String),

    /// The catalog cannot resolve this tech
    #[error("tech {0:?} is not known to the catalog")]
    UnknownTech(String),

    /// A node with this name was already added
    #[error("node {0:?} was already added")]
    DuplicateNode(String),

    /// Node sizes must be finite and strictly positive
    #[error("node {name:?} has an invalid size {width}x{height}")]
    InvalidSize {
        name: String,
        width: f32,
        height: f32,
    },

    /// Column width and row height must be finite and strictly positive
    #[error("invalid layout pitch: column width {column_width}, row height {row_height}")]
    InvalidParameters { column_width: f32, row_height: f32 },

    /// The prerequisite graph contains a cycle at the given node
    #[error("prerequisite graph contains a cycle at node {0:?}")]
    GraphHasCycle(String),

    /// An edge does not go strictly forward in depth, so no placeholder
    /// chain can be built for it
    #[error(
        "edge {parent:?} -> {child:?} does not go forward in depth ({parent_depth} -> {child_depth})"
    )]
    InvalidChain {
        parent: String,
        child: String,
        parent_depth: usize,
        child_depth: usize,
    },
}

pub type Result<T, E = LayoutError> = std::result::Result<T, E>;
