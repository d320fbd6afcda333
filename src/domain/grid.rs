use super::error::{AutomatonError, Result};
use super::Cell;
use rand::Rng;

/// Grid stores a dense 3D block of cells in one flat buffer.
/// Index layout is `x + y * width + z * width * height`; edges are hard
/// (no toroidal wrapping).
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    depth: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells dead
    pub fn new(width: usize, height: usize, depth: usize) -> Result<Self> {
        for (axis, value) in [("width", width), ("height", height), ("depth", depth)] {
            if value == 0 {
                return Err(AutomatonError::InvalidDimension { axis, value });
            }
        }
        let len = width
            .checked_mul(height)
            .and_then(|plane| plane.checked_mul(depth))
            .ok_or(AutomatonError::VolumeOverflow { width, height, depth })?;

        Ok(Self {
            width,
            height,
            depth,
            cells: vec![Cell::DEAD; len],
        })
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert 3D coordinates to the flat index
    #[inline]
    pub const fn index_of(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.width + z * self.width * self.height
    }

    /// Convert a flat index back to 3D coordinates
    #[inline]
    pub const fn coords_of(&self, idx: usize) -> (usize, usize, usize) {
        let plane = self.width * self.height;
        (idx % self.width, (idx / self.width) % self.height, idx / plane)
    }

    #[inline]
    pub const fn in_bounds(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.width && y < self.height && z < self.depth
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<Cell> {
        self.in_bounds(x, y, z)
            .then(|| self.cells[self.index_of(x, y, z)])
    }

    /// Set the alive flag at position; out-of-bounds writes are ignored
    pub fn set_alive(&mut self, x: usize, y: usize, z: usize, alive: bool) {
        if self.in_bounds(x, y, z) {
            let idx = self.index_of(x, y, z);
            self.cells[idx].alive = alive;
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Overwrite this grid with another of identical shape
    pub fn copy_from(&mut self, other: &Grid) {
        debug_assert_eq!(self.dimensions(), other.dimensions());
        self.cells.copy_from_slice(&other.cells);
    }

    /// Count live cells in the 3x3x3 block around (x, y, z), excluding the
    /// centre. Neighbours outside the grid are skipped.
    pub fn count_live_neighbours(&self, x: usize, y: usize, z: usize) -> u8 {
        let mut count = 0u8;

        for dz in -1isize..=1 {
            let Some(nz) = z.checked_add_signed(dz).filter(|&nz| nz < self.depth) else {
                continue;
            };
            for dy in -1isize..=1 {
                let Some(ny) = y.checked_add_signed(dy).filter(|&ny| ny < self.height) else {
                    continue;
                };
                for dx in -1isize..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    let Some(nx) = x.checked_add_signed(dx).filter(|&nx| nx < self.width) else {
                        continue;
                    };
                    if self.cells[self.index_of(nx, ny, nz)].is_alive() {
                        count += 1;
                    }
                }
            }
        }

        count
    }

    /// Count total alive cells
    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Kill every cell; neighbour counts are left as they were
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| cell.alive = false);
    }

    /// Draw each cell independently: alive iff a uniform draw in [0, 100)
    /// lands below `probability_percent`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, probability_percent: f64) {
        self.cells.iter_mut().for_each(|cell| {
            cell.alive = rng.random_range(0.0..100.0) < probability_percent;
        });
    }

    /// Iterate over all cells with their positions, in storage order
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &cell)| {
                let (x, y, z) = self.coords_of(idx);
                (x, y, z, cell)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn filled(width: usize, height: usize, depth: usize) -> Grid {
        let mut grid = Grid::new(width, height, depth).unwrap();
        grid.cells_mut().iter_mut().for_each(|c| c.alive = true);
        grid
    }

    #[test]
    fn test_new_grid_is_dead() {
        let grid = Grid::new(4, 3, 2).unwrap();
        assert_eq!(grid.dimensions(), (4, 3, 2));
        assert_eq!(grid.len(), 24);
        assert!(grid.cells().iter().all(|&c| c == Cell::DEAD));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            Grid::new(0, 3, 3),
            Err(AutomatonError::InvalidDimension { axis: "width", value: 0 })
        ));
        assert!(matches!(
            Grid::new(3, 0, 3),
            Err(AutomatonError::InvalidDimension { axis: "height", .. })
        ));
        assert!(matches!(
            Grid::new(3, 3, 0),
            Err(AutomatonError::InvalidDimension { axis: "depth", .. })
        ));
    }

    #[test]
    fn test_volume_overflow_rejected() {
        assert!(matches!(
            Grid::new(usize::MAX, 2, 1),
            Err(AutomatonError::VolumeOverflow { .. })
        ));
    }

    #[test]
    fn test_index_round_trip() {
        let grid = Grid::new(4, 4, 4).unwrap();
        assert_eq!(grid.index_of(0, 0, 0), 0);
        assert_eq!(grid.index_of(1, 0, 0), 1);
        assert_eq!(grid.index_of(0, 1, 0), 4);
        assert_eq!(grid.index_of(0, 0, 1), 16);
        assert_eq!(grid.index_of(3, 3, 3), 63);
        assert_eq!(grid.coords_of(grid.index_of(2, 1, 3)), (2, 1, 3));
    }

    #[test]
    fn test_get_set_bounds() {
        let mut grid = Grid::new(4, 4, 4).unwrap();
        grid.set_alive(1, 2, 3, true);
        assert_eq!(grid.get(1, 2, 3).map(Cell::is_alive), Some(true));
        assert_eq!(grid.get(4, 0, 0), None);
        assert_eq!(grid.get(0, 4, 0), None);
        assert_eq!(grid.get(0, 0, 4), None);

        // Should not panic
        grid.set_alive(10, 10, 10, true);
        assert_eq!(grid.count_alive(), 1);
    }

    #[test]
    fn test_count_neighbours_cross() {
        let mut grid = Grid::new(8, 8, 8).unwrap();
        grid.set_alive(4, 4, 4, true);
        grid.set_alive(3, 4, 4, true);
        grid.set_alive(5, 4, 4, true);
        grid.set_alive(4, 3, 4, true);
        grid.set_alive(4, 5, 4, true);

        // Centre itself is not counted
        assert_eq!(grid.count_live_neighbours(4, 4, 4), 4);
        // Arm sees centre plus the two orthogonal arms
        assert_eq!(grid.count_live_neighbours(3, 4, 4), 3);
        // Directly above the centre sees all five
        assert_eq!(grid.count_live_neighbours(4, 4, 5), 5);
        assert_eq!(grid.count_live_neighbours(0, 0, 0), 0);
    }

    #[test]
    fn test_count_neighbours_full_grid_boundaries() {
        let grid = filled(3, 3, 3);
        // Corner, edge, face, centre
        assert_eq!(grid.count_live_neighbours(0, 0, 0), 7);
        assert_eq!(grid.count_live_neighbours(1, 0, 0), 11);
        assert_eq!(grid.count_live_neighbours(1, 1, 0), 17);
        assert_eq!(grid.count_live_neighbours(1, 1, 1), 26);
    }

    #[test]
    fn test_count_neighbours_no_wraparound() {
        let mut grid = Grid::new(5, 5, 5).unwrap();
        grid.set_alive(4, 4, 4, true);
        assert_eq!(grid.count_live_neighbours(0, 0, 0), 0);
        assert_eq!(grid.count_live_neighbours(3, 3, 3), 1);
    }

    #[test]
    fn test_clear_keeps_neighbours() {
        let mut grid = filled(2, 2, 2);
        grid.cells_mut()[0].neighbours = 7;
        grid.clear();
        assert_eq!(grid.count_alive(), 0);
        assert_eq!(grid.cells()[0].neighbours, 7);
    }

    #[test]
    fn test_randomize_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(6, 6, 6).unwrap();

        grid.randomize(&mut rng, 100.0);
        assert_eq!(grid.count_alive(), grid.len());

        grid.randomize(&mut rng, 0.0);
        assert_eq!(grid.count_alive(), 0);
    }

    #[test]
    fn test_iter_cells_positions() {
        let mut grid = Grid::new(2, 3, 4).unwrap();
        grid.set_alive(1, 2, 3, true);
        let alive: Vec<_> = grid
            .iter_cells()
            .filter(|(_, _, _, c)| c.alive)
            .map(|(x, y, z, _)| (x, y, z))
            .collect();
        assert_eq!(alive, vec![(1, 2, 3)]);
        assert_eq!(grid.iter_cells().count(), 24);
    }
}
