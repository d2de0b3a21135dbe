use super::node::Node;

/// Count the number of edge crossings in the current layout
///
/// Runs on the expanded graph, where every edge links two adjacent columns:
/// two hops leaving the same column cross when their rows are in opposite
/// order on both sides. Hops sharing an end never cross.
pub(crate) fn count_crossings(nodes: &[Node], columns: usize) -> usize {
    let mut hops: Vec<Vec<(usize, usize)>> = vec![Vec::new(); columns];

    for node in nodes {
        let (Some(depth), Some(row)) = (node.depth, node.row) else {
            continue;
        };
        for child in &node.children {
            if let Some(child_row) = nodes[child.index()].row {
                hops[depth].push((row, child_row));
            }
        }
    }

    let mut crossings = 0;
    for layer in &hops {
        for (index, &(from1, to1)) in layer.iter().enumerate() {
            for &(from2, to2) in layer.iter().skip(index + 1) {
                if (from1 < from2 && to1 > to2) || (from1 > from2 && to1 < to2) {
                    crossings += 1;
                }
            }
        }
    }

    crossings
}
