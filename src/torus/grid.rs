//! Row-major toroidal cell grid.

use super::error::LifeError;

pub const DEAD: u8 = 0;
pub const ALIVE: u8 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// One byte per cell, `cells[row * cols + col]`.
    cells: Vec<u8>,
}

/// Allocate a zeroed cell buffer, surfacing overflow and OOM as errors.
pub(crate) fn alloc_cells(rows: usize, cols: usize) -> Result<Vec<u8>, LifeError> {
    if rows == 0 || cols == 0 {
        return Err(LifeError::EmptyGrid { rows, cols });
    }
    let len = rows
        .checked_mul(cols)
        .ok_or(LifeError::Allocation { rows, cols })?;
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(len)
        .map_err(|_| LifeError::Allocation { rows, cols })?;
    cells.resize(len, DEAD);
    Ok(cells)
}

impl Grid {
    /// An all-dead grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self, LifeError> {
        let cells = alloc_cells(rows, cols)?;
        Ok(Self { rows, cols, cells })
    }

    /// Build from a row-major list of cell states.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<bool>) -> Result<Self, LifeError> {
        let mut grid = Self::new(rows, cols)?;
        if cells.len() != grid.cells.len() {
            return Err(LifeError::CellCountMismatch {
                expected: grid.cells.len(),
                actual: cells.len(),
            });
        }
        for (dst, alive) in grid.cells.iter_mut().zip(cells) {
            *dst = alive as u8;
        }
        Ok(grid)
    }

    /// Parse a plaintext picture: one line per row, `.` dead, `O`/`*`/`#` alive.
    /// Short lines are padded with dead cells; blank lines are skipped.
    pub fn from_pattern(pattern: &str) -> Result<Self, LifeError> {
        let lines: Vec<&str> = pattern
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let rows = lines.len();
        let cols = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(rows, cols)?;
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '.' => {}
                    'O' | '*' | '#' => grid.set(row, col, true),
                    other => {
                        return Err(LifeError::BadPattern(format!(
                            "unexpected {other:?} at row {row}, col {col}"
                        )));
                    }
                }
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed grid; dimensions are validated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    /// Panics if `(row, col)` is out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.rows && col < self.cols, "({row},{col}) out of range");
        self.cells[self.index(row, col)] != DEAD
    }

    /// Read with toroidal wraparound on both axes.
    #[inline]
    pub fn get_wrapped(&self, row: i64, col: i64) -> bool {
        let r = row.rem_euclid(self.rows as i64) as usize;
        let c = col.rem_euclid(self.cols as i64) as usize;
        self.cells[self.index(r, c)] != DEAD
    }

    /// Panics if `(row, col)` is out of range.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        assert!(row < self.rows && col < self.cols, "({row},{col}) out of range");
        let idx = self.index(row, col);
        self.cells[idx] = alive as u8;
    }

    pub fn set_cells_alive<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        for (row, col) in cells {
            self.set(row, col, true);
        }
    }

    pub fn population(&self) -> u64 {
        self.cells.iter().map(|&c| c as u64).sum()
    }

    pub fn has_live(&self) -> bool {
        self.cells.iter().any(|&c| c != DEAD)
    }

    /// Visit live cells in row-major order.
    pub fn for_each_live<F: FnMut(usize, usize)>(&self, mut f: F) {
        for (row, line) in self.cells.chunks_exact(self.cols).enumerate() {
            for (col, &cell) in line.iter().enumerate() {
                if cell != DEAD {
                    f(row, col);
                }
            }
        }
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Render as a plaintext picture using `.` and `O`.
    pub fn to_pattern(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            for &cell in self.row(row) {
                out.push(if cell != DEAD { 'O' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use crate::torus::error::LifeError;

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            Grid::new(0, 4),
            Err(LifeError::EmptyGrid { rows: 0, cols: 4 })
        ));
        assert!(matches!(
            Grid::new(4, 0),
            Err(LifeError::EmptyGrid { rows: 4, cols: 0 })
        ));
    }

    #[test]
    fn overflowing_dimensions_report_allocation_failure() {
        assert!(matches!(
            Grid::new(usize::MAX, 2),
            Err(LifeError::Allocation { .. })
        ));
    }

    #[test]
    fn from_cells_checks_length() {
        assert!(matches!(
            Grid::from_cells(2, 2, vec![true; 3]),
            Err(LifeError::CellCountMismatch {
                expected: 4,
                actual: 3
            })
        ));
        let grid = Grid::from_cells(2, 2, vec![true, false, false, true]).unwrap();
        assert!(grid.get(0, 0));
        assert!(!grid.get(0, 1));
        assert!(grid.get(1, 1));
    }

    #[test]
    fn wrapped_reads_reach_opposite_edges() {
        let mut grid = Grid::new(3, 4).unwrap();
        grid.set(2, 3, true);
        assert!(grid.get_wrapped(-1, -1));
        assert!(grid.get_wrapped(5, 7));
        assert!(!grid.get_wrapped(0, 0));
    }

    #[test]
    fn pattern_round_trip_and_population() {
        let grid = Grid::from_pattern(
            "
            .O..
            ..O.
            OOO.
            ",
        )
        .unwrap();
        assert_eq!((grid.rows(), grid.cols()), (3, 4));
        assert_eq!(grid.population(), 5);
        assert_eq!(grid.to_pattern(), ".O..\n..O.\nOOO.\n");

        let mut live = Vec::new();
        grid.for_each_live(|r, c| live.push((r, c)));
        assert_eq!(live, vec![(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
    }

    #[test]
    fn pattern_rejects_unknown_glyphs() {
        assert!(matches!(
            Grid::from_pattern("..x"),
            Err(LifeError::BadPattern(_))
        ));
        assert!(matches!(
            Grid::from_pattern("\n\n"),
            Err(LifeError::EmptyGrid { .. })
        ));
    }
}
