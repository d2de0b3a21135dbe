use super::node::{Node, NodeId};

/// Vertical scan direction inside a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Towards row 0
    Up,
    /// Towards higher rows
    Down,
}

/// Row slot table of one depth
///
/// Row 0 is never handed out. The table grows on demand whenever a row is
/// probed past its end.
#[derive(Debug, Clone, Default)]
pub(crate) struct Column {
    slots: Vec<Option<NodeId>>,
}

impl Column {
    /// Whether `weight` slots starting at `row` are empty or already taken by
    /// `node`. Grows the table to cover the probed range.
    pub(crate) fn fits(&mut self, row: usize, node: NodeId, weight: usize) -> bool {
        if row == 0 {
            return false;
        }

        let end = row + weight;
        if self.slots.len() < end {
            self.slots.resize(end, None);
        }

        self.slots[row..end]
            .iter()
            .all(|slot| slot.map_or(true, |other| other == node))
    }

    /// Nearest row to `ideal` where `node` fits, probing `ideal - step` then
    /// `ideal + step` for growing steps
    pub(crate) fn closest_free_index(&mut self, ideal: usize, node: NodeId, weight: usize) -> usize {
        let mut step = 0;
        loop {
            if let Some(above) = ideal.checked_sub(step) {
                if self.fits(above, node, weight) {
                    return above;
                }
            }
            if self.fits(ideal + step, node, weight) {
                return ideal + step;
            }
            step += 1;
        }
    }

    /// Occupy the slots at `row` and record the row on the node
    pub(crate) fn place(&mut self, row: usize, id: NodeId, nodes: &mut [Node]) -> bool {
        let weight = nodes[id.index()].weight;
        if !self.fits(row, id, weight) {
            return false;
        }

        self.slots[row..row + weight].fill(Some(id));
        nodes[id.index()].row = Some(row);
        true
    }

    pub(crate) fn place_closest_free_index(
        &mut self,
        ideal: usize,
        id: NodeId,
        nodes: &mut [Node],
    ) -> usize {
        let row = self.closest_free_index(ideal, id, nodes[id.index()].weight);
        let placed = self.place(row, id, nodes);
        debug_assert!(placed, "closest free index must fit");
        row
    }

    /// Vacate the node's slots and place it at `to`
    pub(crate) fn move_to(&mut self, to: usize, id: NodeId, nodes: &mut [Node]) -> bool {
        let weight = nodes[id.index()].weight;
        if !self.fits(to, id, weight) {
            return false;
        }

        if let Some(from) = nodes[id.index()].row {
            self.vacate(from, id, weight);
        }
        self.place(to, id, nodes)
    }

    /// First node other than `from` met when scanning from `row` in the
    /// given direction
    pub(crate) fn seek(&self, from: NodeId, row: usize, direction: Direction) -> Option<NodeId> {
        let mut index = row;
        loop {
            index = match direction {
                Direction::Up => index.checked_sub(1)?,
                Direction::Down => index + 1,
            };

            match *self.slots.get(index)? {
                Some(other) if other != from => return Some(other),
                _ => {}
            }
        }
    }

    /// Exchange the rows of two placed nodes of equal weight
    pub(crate) fn swap(&mut self, a: NodeId, b: NodeId, nodes: &mut [Node]) -> bool {
        let (weight, other_weight) = (nodes[a.index()].weight, nodes[b.index()].weight);
        if weight != other_weight {
            return false;
        }
        let (Some(row_a), Some(row_b)) = (nodes[a.index()].row, nodes[b.index()].row) else {
            return false;
        };

        self.vacate(row_a, a, weight);
        self.vacate(row_b, b, weight);
        self.slots[row_b..row_b + weight].fill(Some(a));
        self.slots[row_a..row_a + weight].fill(Some(b));
        nodes[a.index()].row = Some(row_b);
        nodes[b.index()].row = Some(row_a);
        true
    }

    /// Highest occupied row plus one
    pub(crate) fn size(&self) -> usize {
        self.slots
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |last| last + 1)
    }

    /// Node occupying the given row, if any
    pub(crate) fn occupant(&self, row: usize) -> Option<NodeId> {
        self.slots.get(row).copied().flatten()
    }

    fn vacate(&mut self, row: usize, id: NodeId, weight: usize) {
        let end = (row + weight).min(self.slots.len());
        for slot in &mut self.slots[row.min(end)..end] {
            if *slot == Some(id) {
                *slot = None;
            }
        }
    }
}
