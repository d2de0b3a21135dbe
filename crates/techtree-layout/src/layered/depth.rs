use super::node::{resolve_terminal, Node, NodeId};
use crate::{LayoutError, Result};
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, error};

/// Assign every node its depth: 0 for roots, otherwise one more than its
/// deepest parent
///
/// Returns the number of columns the nodes span.
pub(crate) fn assign_depths(nodes: &mut [Node]) -> Result<usize> {
    let mut graph = DiGraphMap::<NodeId, ()>::new();
    for index in 0..nodes.len() {
        graph.add_node(NodeId(index));
    }
    for (index, node) in nodes.iter().enumerate() {
        for &child in &node.children {
            graph.add_edge(NodeId(index), child, ());
        }
    }

    let topo_order = toposort(&graph, None).map_err(|cycle| {
        let name = node_name(nodes, cycle.node_id());
        error!("Prerequisite cycle through {name:?}");
        LayoutError::GraphHasCycle(name)
    })?;

    for node in nodes.iter_mut() {
        if node.parents.is_empty() {
            node.depth = Some(0);
        }
    }

    // Parents come first in topological order, so every node has its final
    // depth by the time it pushes it down to its children
    let mut columns = 0;
    for id in topo_order {
        let depth = nodes[id.index()].depth.unwrap_or(0);
        columns = columns.max(depth + 1);

        for child_index in 0..nodes[id.index()].children.len() {
            let child = nodes[id.index()].children[child_index];
            let child_depth = &mut nodes[child.index()].depth;
            *child_depth = Some(child_depth.map_or(depth + 1, |d| d.max(depth + 1)));
        }
    }

    debug!("Assigned depths to {} nodes over {columns} columns", nodes.len());
    Ok(columns)
}

/// Replace every edge spanning more than one column by a chain of
/// placeholders, one per skipped column
///
/// Returns the number of placeholders created.
pub(crate) fn insert_placeholders(nodes: &mut Vec<Node>) -> Result<usize> {
    let techs = nodes.len();
    let mut created = 0;

    for parent_index in 0..techs {
        let parent = NodeId(parent_index);
        let children = nodes[parent_index].children.clone();

        for child in children {
            let parent_depth = nodes[parent_index].depth.unwrap_or(0);
            let child_depth = nodes[child.index()].depth.unwrap_or(0);

            if child_depth <= parent_depth {
                let parent_name = node_name(nodes, parent);
                let child_name = node_name(nodes, child);
                error!(
                    "Cannot route {parent_name:?} -> {child_name:?} from depth {parent_depth} to {child_depth}"
                );
                return Err(LayoutError::InvalidChain {
                    parent: parent_name,
                    child: child_name,
                    parent_depth,
                    child_depth,
                });
            }
            if child_depth == parent_depth + 1 {
                continue;
            }

            created += insert_chain(nodes, parent, child, parent_depth, child_depth);
        }
    }

    debug!("Inserted {created} placeholders");
    Ok(created)
}

/// Build the chain for one edge, then splice it between both ends
fn insert_chain(
    nodes: &mut Vec<Node>,
    parent: NodeId,
    child: NodeId,
    parent_depth: usize,
    child_depth: usize,
) -> usize {
    let first = NodeId(nodes.len());
    let length = child_depth - parent_depth - 1;

    for offset in 0..length {
        let id = NodeId(first.index() + offset);
        let mut placeholder = Node::placeholder(parent_depth + 1 + offset);

        let previous = if offset == 0 { parent } else { NodeId(id.index() - 1) };
        let next = if offset + 1 == length { child } else { NodeId(id.index() + 1) };
        placeholder.parents.push(previous);
        placeholder.children.push(next);
        placeholder.primary_child = Some(next);

        nodes.push(placeholder);
    }
    let last = NodeId(first.index() + length - 1);

    let parent_node = &mut nodes[parent.index()];
    for slot in parent_node.children.iter_mut().filter(|slot| **slot == child) {
        *slot = first;
    }
    if parent_node.primary_child == Some(child) {
        parent_node.primary_child = Some(first);
    }

    for slot in nodes[child.index()]
        .parents
        .iter_mut()
        .filter(|slot| **slot == parent)
    {
        *slot = last;
    }

    length
}

fn node_name(nodes: &[Node], id: NodeId) -> String {
    resolve_terminal(nodes, &nodes[id.index()])
        .name()
        .unwrap_or_default()
        .to_string()
}
