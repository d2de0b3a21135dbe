use super::node::{Node, NodeId};
use crate::{LayoutError, Point, Result};
use tracing::{debug, error};

/// Polyline from one tech to one of its children
///
/// Both ends are techs, never placeholders: the path runs through any
/// placeholder chain in between.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    from: String,
    to: String,
    points: Vec<Point>,
}

impl Edge {
    /// Name of the prerequisite tech
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Name of the dependent tech
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Points from the right border of `from` to the left border of `to`
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Turn depths and rows into pixel positions
pub(crate) fn assign_positions(nodes: &mut [Node], column_width: f32, internal_row_height: f32) {
    for node in nodes.iter_mut() {
        let (Some(depth), Some(row)) = (node.depth, node.row) else {
            continue;
        };
        node.position = Point::new(
            (depth as f32 - 0.5) * column_width,
            row as f32 * internal_row_height,
        );
    }
}

/// Build the out-edges of every tech, walking placeholder chains
pub(crate) fn build_out_edges(nodes: &mut [Node], x_margin: f32) -> Result<usize> {
    let mut built = 0;

    for index in 0..nodes.len() {
        if nodes[index].is_placeholder() {
            continue;
        }

        let arena: &[Node] = nodes;
        let edges = arena[index]
            .children
            .iter()
            .map(|&child| route(arena, NodeId(index), child, x_margin))
            .collect::<Result<Vec<_>>>()?;

        built += edges.len();
        nodes[index].out_edges = edges;
    }

    debug!("Built {built} edges");
    Ok(built)
}

fn route(nodes: &[Node], from: NodeId, child: NodeId, x_margin: f32) -> Result<Edge> {
    let source = &nodes[from.index()];
    let start = source.right_anchor();
    let mut points = vec![start, start.shifted_x(x_margin)];

    let mut current = child;
    while nodes[current.index()].is_placeholder() {
        let placeholder = &nodes[current.index()];
        let y = placeholder.y() + placeholder.height() / 2.0;
        points.push(Point::new(placeholder.x() - 2.0 * x_margin, y));
        points.push(Point::new(
            placeholder.x() + placeholder.width() + x_margin,
            y,
        ));

        current = match placeholder.primary_child {
            Some(next) => next,
            None => return Err(dangling_chain(nodes, from, placeholder)),
        };
    }

    let target = &nodes[current.index()];
    let end = target.left_anchor();
    // Leave room for the arrow head before touching the border
    points.push(end.shifted_x(-2.0 * x_margin));
    points.push(end);

    Ok(Edge {
        from: source.name().unwrap_or_default().to_string(),
        to: target.name().unwrap_or_default().to_string(),
        points,
    })
}

fn dangling_chain(nodes: &[Node], from: NodeId, placeholder: &Node) -> LayoutError {
    let parent = nodes[from.index()].name().unwrap_or_default().to_string();
    let depth = placeholder.depth.unwrap_or(0);
    error!("Placeholder chain leaving {parent:?} stops at depth {depth}");

    // The chain is cut, so no tech is known at its end
    LayoutError::InvalidChain {
        parent,
        child: String::new(),
        parent_depth: depth,
        child_depth: depth,
    }
}
