/// Cell is the fundamental unit of the 3D automaton.
/// It carries its alive flag plus the neighbour count observed in the
/// previous generation's snapshot.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Cell {
    pub alive: bool,
    pub neighbours: u8,
}

/// Largest possible Moore neighbourhood in three dimensions (3x3x3 minus centre).
pub const MAX_NEIGHBOURS: u8 = 26;

impl Cell {
    /// A dead cell with no recorded neighbours
    pub const DEAD: Cell = Cell { alive: false, neighbours: 0 };

    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        self.alive
    }
}
