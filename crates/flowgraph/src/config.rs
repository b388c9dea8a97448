/// Orientation and weight mode of a [`Graph`](crate::Graph).
///
/// Both flags are fixed when the graph is created and never change afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GraphConfig {
    /// Whether every edge is one logical, bidirectional connection.
    pub undirected: bool,
    /// Whether edges carry no value.
    pub unweighted: bool,
}

impl GraphConfig {
    /// Directed graph whose edges carry a weight.
    pub const fn directed_weighted() -> Self {
        Self {
            undirected: false,
            unweighted: false,
        }
    }

    /// Undirected graph whose edges carry a weight.
    pub const fn undirected_weighted() -> Self {
        Self {
            undirected: true,
            unweighted: false,
        }
    }

    /// Returns whether edges must carry a value.
    pub const fn is_weighted(&self) -> bool {
        !self.unweighted
    }
}
