//! One generation of the double-buffered update.
//!
//! The snapshot holds generation N and is never written during the pass.
//! Every live cell receives its fresh neighbour count and its generation
//! N+1 state, computed only from the snapshot.

use super::rules::RuleTable;
use super::{Algorithm, Cell, Grid};
use rayon::prelude::*;

/// What a single pass observed across the whole grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// At least one cell had a live neighbour in the snapshot
    pub any_live_neighbour: bool,
    /// Cells whose alive flag differs from the snapshot
    pub changed_cells: usize,
    /// Live cells after the pass
    pub population: usize,
}

impl PassStats {
    fn record(cell: Cell, was_alive: bool) -> Self {
        Self {
            any_live_neighbour: cell.neighbours > 0,
            changed_cells: usize::from(cell.alive != was_alive),
            population: usize::from(cell.alive),
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            any_live_neighbour: self.any_live_neighbour || other.any_live_neighbour,
            changed_cells: self.changed_cells + other.changed_cells,
            population: self.population + other.population,
        }
    }
}

#[inline]
fn next_cell(snapshot: &Grid, table: &RuleTable, idx: usize) -> (Cell, bool) {
    let (x, y, z) = snapshot.coords_of(idx);
    let was_alive = snapshot.cells()[idx].alive;
    let neighbours = snapshot.count_live_neighbours(x, y, z);
    let cell = Cell {
        alive: table.next_alive(was_alive, neighbours),
        neighbours,
    };
    (cell, was_alive)
}

/// Write generation N+1 into `live`, reading generation N from `snapshot`.
pub fn evolve_into(
    snapshot: &Grid,
    live: &mut Grid,
    table: &RuleTable,
    algorithm: Algorithm,
) -> PassStats {
    debug_assert_eq!(snapshot.dimensions(), live.dimensions());

    match algorithm {
        Algorithm::Serial => live
            .cells_mut()
            .iter_mut()
            .enumerate()
            .map(|(idx, slot)| {
                let (cell, was_alive) = next_cell(snapshot, table, idx);
                *slot = cell;
                PassStats::record(cell, was_alive)
            })
            .fold(PassStats::default(), PassStats::merge),
        Algorithm::Parallel => live
            .cells_mut()
            .par_iter_mut()
            .enumerate()
            .map(|(idx, slot)| {
                let (cell, was_alive) = next_cell(snapshot, table, idx);
                *slot = cell;
                PassStats::record(cell, was_alive)
            })
            .reduce(PassStats::default, PassStats::merge),
    }
}
