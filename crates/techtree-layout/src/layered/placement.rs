use super::column::{Column, Direction};
use super::node::{resolve_terminal, Node, NodeId};
use crate::LayoutConfig;
use std::cmp::Ordering;
use tracing::{debug, trace, warn};

/// Place every node in its column, densest column first
///
/// Each node aims for the average row of its already placed parents and
/// children, or row 1 when none is placed yet. When several nodes of a column
/// aim for the same row, those that are the primary child of a placed parent
/// claim it first.
pub(crate) fn initial_placement(nodes: &mut [Node], columns: &mut [Column]) {
    let buckets = depth_buckets(nodes, columns.len());

    for depth in column_order(&buckets) {
        // Family always sits in other columns, so targets hold for the whole bucket
        let targets: Vec<(NodeId, usize, bool)> = buckets[depth]
            .iter()
            .map(|&id| {
                let ideal = average_family_row(nodes, id).map_or(1, round_row);
                (id, ideal, is_primary_of_placed_parent(nodes, id))
            })
            .collect();

        let mut placed = vec![false; targets.len()];
        for current in 0..targets.len() {
            if placed[current] {
                continue;
            }

            let (_, ideal, primary) = targets[current];
            if !primary {
                for later in current + 1..targets.len() {
                    let (_, other_ideal, other_primary) = targets[later];
                    if !placed[later] && other_primary && other_ideal == ideal {
                        place_at(nodes, &mut columns[depth], depth, targets[later].0, ideal);
                        placed[later] = true;
                    }
                }
            }

            place_at(nodes, &mut columns[depth], depth, targets[current].0, ideal);
            placed[current] = true;
        }
    }
}

fn place_at(nodes: &mut [Node], column: &mut Column, depth: usize, id: NodeId, ideal: usize) {
    let row = column.place_closest_free_index(ideal, id, nodes);
    trace!("Placed node {} at {depth}:{row}", id.index());
}

fn is_primary_of_placed_parent(nodes: &[Node], id: NodeId) -> bool {
    nodes[id.index()].parents.iter().any(|parent| {
        let parent = &nodes[parent.index()];
        parent.row.is_some() && parent.primary_child == Some(id)
    })
}

/// Nudge nodes towards their family until a full sweep moves nothing
///
/// Returns the number of sweeps run.
pub(crate) fn wobble(nodes: &mut [Node], columns: &mut [Column], config: &LayoutConfig) -> usize {
    for sweep in 1..=config.max_wobble_sweeps {
        let mut changed = false;

        for index in (0..nodes.len()).rev() {
            if wobble_node(nodes, columns, NodeId(index), config.wobble_threshold) {
                changed = true;
            }
        }

        if !changed {
            debug!("Placement settled after {sweep} sweeps");
            return sweep;
        }
    }

    warn!(
        "Placement did not settle after {} sweeps, keeping the current rows",
        config.max_wobble_sweeps
    );
    config.max_wobble_sweeps
}

/// Try to move a node closer to its family, or to swap it with its
/// neighbour in the direction of its family
fn wobble_node(nodes: &mut [Node], columns: &mut [Column], id: NodeId, threshold: f64) -> bool {
    let node = &nodes[id.index()];
    let (Some(depth), Some(row)) = (node.depth, node.row) else {
        return false;
    };
    let weight = node.weight;
    let column = &mut columns[depth];

    let offset = family_offset(nodes, id, row);
    if offset == 0.0 {
        return false;
    }

    let target = column.closest_free_index(round_row(row as f64 + offset), id, weight);
    let improvement = offset.abs() - family_offset(nodes, id, target).abs();
    if improvement > threshold {
        trace!("Moving node {} from {depth}:{row} to {depth}:{target}", id.index());
        return column.move_to(target, id, nodes);
    }

    let direction = if offset > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    };
    let Some(other) = column.seek(id, row, direction) else {
        return false;
    };
    let Some(other_row) = nodes[other.index()].row else {
        return false;
    };
    if nodes[other.index()].weight != weight {
        return false;
    }

    let before = offset.abs() + family_offset(nodes, other, other_row).abs();
    let after = family_offset(nodes, id, other_row).abs() + family_offset(nodes, other, row).abs();
    if before - after > threshold {
        trace!(
            "Swapping nodes {} and {} in column {depth}",
            id.index(),
            other.index()
        );
        return column.swap(id, other, nodes);
    }

    false
}

/// Signed mean of `family row - row` over the placed parents and children,
/// 0 when none is placed
///
/// Positive values mean the family sits lower in the column.
pub(crate) fn family_offset(nodes: &[Node], id: NodeId, row: usize) -> f64 {
    let (sum, count) = family_rows(nodes, id).fold((0.0_f64, 0_usize), |(sum, count), other| {
        (sum + other as f64 - row as f64, count + 1)
    });

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn average_family_row(nodes: &[Node], id: NodeId) -> Option<f64> {
    let (sum, count) = family_rows(nodes, id).fold((0.0_f64, 0_usize), |(sum, count), row| {
        (sum + row as f64, count + 1)
    });

    (count > 0).then(|| sum / count as f64)
}

fn family_rows<'a>(nodes: &'a [Node], id: NodeId) -> impl Iterator<Item = usize> + 'a {
    let node = &nodes[id.index()];
    node.parents
        .iter()
        .chain(&node.children)
        .filter_map(move |family| nodes[family.index()].row)
}

/// Round half up, never below the first usable row
fn round_row(value: f64) -> usize {
    (value + 0.5).floor().max(1.0) as usize
}

/// Nodes grouped by depth, each group ordered by category then name
///
/// Placeholders borrow the category and name of the tech their chain of
/// primary children leads to, and come after a tech with the same key. The sort is stable, so remaining ties keep creation
/// order.
fn depth_buckets(nodes: &[Node], columns: usize) -> Vec<Vec<NodeId>> {
    let mut buckets = vec![Vec::new(); columns];
    for (index, node) in nodes.iter().enumerate() {
        if let Some(depth) = node.depth {
            buckets[depth].push(NodeId(index));
        }
    }

    for bucket in &mut buckets {
        bucket.sort_by(|&a, &b| compare_nodes(nodes, a, b));
    }
    buckets
}

fn compare_nodes(nodes: &[Node], a: NodeId, b: NodeId) -> Ordering {
    let key = move |id: NodeId| {
        let node = &nodes[id.index()];
        let tech = resolve_terminal(nodes, node);
        (
            node.depth,
            tech.category().unwrap_or_default(),
            tech.name().unwrap_or_default(),
            node.is_placeholder(),
        )
    };
    key(a).cmp(&key(b))
}

/// Densest column first, then alternating outwards: +1, -1, +2, -2...
fn column_order(buckets: &[Vec<NodeId>]) -> Vec<usize> {
    let Some(start) = buckets
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, usize)>, (depth, bucket)| match best {
            Some((_, len)) if len >= bucket.len() => best,
            _ => Some((depth, bucket.len())),
        })
        .map(|(depth, _)| depth)
    else {
        return Vec::new();
    };

    let mut order = vec![start];
    for step in 1..buckets.len() {
        if start + step < buckets.len() {
            order.push(start + step);
        }
        if let Some(depth) = start.checked_sub(step) {
            order.push(depth);
        }
    }
    order
}
