use super::edges::Edge;
use crate::config::{LINE_SPAN, NODE_SPAN};
use crate::{Point, Vec2};

/// Stable handle of a node inside a layout graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the graph's arena
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Tech { name: String, category: String },
    Placeholder,
}

/// A vertex of the layout: either a tech or a placeholder standing in for one
/// column of a long prerequisite edge
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) depth: Option<usize>,
    pub(crate) row: Option<usize>,
    pub(crate) size: Vec2,
    pub(crate) weight: usize,
    pub(crate) position: Point,
    pub(crate) parents: Vec<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) primary_child: Option<NodeId>,
    pub(crate) out_edges: Vec<Edge>,
}

impl Node {
    pub(crate) fn tech(name: String, category: String, size: Vec2) -> Self {
        Self {
            kind: NodeKind::Tech { name, category },
            depth: None,
            row: None,
            size,
            weight: NODE_SPAN,
            position: Point::default(),
            parents: Vec::new(),
            children: Vec::new(),
            primary_child: None,
            out_edges: Vec::new(),
        }
    }

    pub(crate) fn placeholder(depth: usize) -> Self {
        Self {
            kind: NodeKind::Placeholder,
            depth: Some(depth),
            row: None,
            size: Vec2::zero(),
            weight: LINE_SPAN,
            position: Point::default(),
            parents: Vec::new(),
            children: Vec::new(),
            primary_child: None,
            out_edges: Vec::new(),
        }
    }

    /// Tech name, `None` for placeholders
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Tech { name, .. } => Some(name.as_str()),
            NodeKind::Placeholder => None,
        }
    }

    /// Tech category, `None` for placeholders
    pub fn category(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Tech { category, .. } => Some(category.as_str()),
            NodeKind::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, NodeKind::Placeholder)
    }

    /// Column index, `None` until a layout ran
    pub fn depth(&self) -> Option<usize> {
        self.depth
    }

    /// First row slot taken in the column, `None` until placed
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Number of row slots taken in the column
    pub fn weight(&self) -> usize {
        self.weight
    }

    /// Top-left corner in pixels
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The child used to break ties when this node has several
    pub fn primary_child(&self) -> Option<NodeId> {
        self.primary_child
    }

    /// Polylines to every child tech, filled by the last layout stage
    pub fn out_edges(&self) -> &[Edge] {
        &self.out_edges
    }

    /// Middle of the right border, where outgoing edges start
    pub(crate) fn right_anchor(&self) -> Point {
        Point::new(
            self.position.x + self.size.x,
            self.position.y + self.size.y / 2.0,
        )
    }

    /// Middle of the left border, where incoming edges end
    pub(crate) fn left_anchor(&self) -> Point {
        Point::new(self.position.x, self.position.y + self.size.y / 2.0)
    }

    /// Whether `candidate` should replace `current` as this node's primary
    /// child
    ///
    /// Children sharing this node's category win, then the smaller name.
    /// Placeholders never displace an existing choice.
    pub(crate) fn prefers_as_primary(&self, candidate: &Node, current: &Node) -> bool {
        let (Some(candidate_name), Some(current_name)) = (candidate.name(), current.name()) else {
            return !candidate.is_placeholder();
        };

        let candidate_matches = candidate.category() == self.category();
        let current_matches = current.category() == self.category();

        if candidate_matches != current_matches {
            candidate_matches
        } else {
            candidate_name < current_name
        }
    }
}

/// The tech a node leads to: itself for techs, the end of the chain for
/// placeholders
///
/// Placeholders have a single child, which is also their primary child, so
/// following primary children walks the chain. A broken chain stops at its
/// last placeholder.
pub(crate) fn resolve_terminal<'a>(nodes: &'a [Node], node: &'a Node) -> &'a Node {
    let mut current = node;
    while current.is_placeholder() {
        match current.primary_child {
            Some(next) => current = &nodes[next.index()],
            None => break,
        }
    }
    current
}
