use std::collections::HashMap;

/// Content lookup consulted when a tech is added to the layout
///
/// The category is only used to break ties: it orders nodes inside a column
/// and decides which child becomes a node's primary child. Returning `None`
/// means the tech is unknown and cannot be laid out.
pub trait TechCatalog {
    /// Category of the given tech, if it exists
    fn category(&self, tech: &str) -> Option<String>;
}

// Blanket implementation for closures
impl<F> TechCatalog for F
where
    F: Fn(&str) -> Option<String>,
{
    fn category(&self, tech: &str) -> Option<String> {
        self(tech)
    }
}

// Implementation for a plain name -> category map
impl TechCatalog for HashMap<String, String> {
    fn category(&self, tech: &str) -> Option<String> {
        self.get(tech).cloned()
    }
}
