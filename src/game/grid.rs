use super::error::GameError;
use super::state::Cell;

/// Fixed-size board, measured both in pixels and in cells.
///
/// Columns and rows are the floor of the pixel size divided by the cell size,
/// so a partial cell at the right or bottom edge is never playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width_px: u32,
    pub height_px: u32,
    pub cell_size: u32,
    pub cols: i32,
    pub rows: i32,
}

impl Grid {
    pub fn from_pixels(width_px: u32, height_px: u32, cell_size: u32) -> Result<Self, GameError> {
        if cell_size == 0 {
            return Err(GameError::ZeroCellSize);
        }

        let empty = || GameError::EmptyBoard {
            width: width_px,
            height: height_px,
            cell_size,
        };
        let cols = i32::try_from(width_px / cell_size).map_err(|_| empty())?;
        let rows = i32::try_from(height_px / cell_size).map_err(|_| empty())?;
        if cols == 0 || rows == 0 {
            return Err(empty());
        }

        Ok(Self {
            width_px,
            height_px,
            cell_size,
            cols,
            rows,
        })
    }

    /// Check if a cell is within the grid bounds
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.cols && cell.y >= 0 && cell.y < self.rows
    }

    /// Total number of cells on the board
    pub fn area(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Every cell of the board, column by column
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cols).flat_map(move |x| (0..self.rows).map(move |y| Cell::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_floor() {
        let grid = Grid::from_pixels(400, 330, 16).unwrap();
        assert_eq!(grid.cols, 25);
        assert_eq!(grid.rows, 20);
        assert_eq!(grid.area(), 500);
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::from_pixels(320, 320, 16).unwrap();

        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(19, 19)));
        assert!(!grid.contains(Cell::new(-1, 0)));
        assert!(!grid.contains(Cell::new(20, 0)));
        assert!(!grid.contains(Cell::new(0, 20)));
    }

    #[test]
    fn test_rejects_degenerate_boards() {
        assert!(matches!(
            Grid::from_pixels(100, 100, 0),
            Err(GameError::ZeroCellSize)
        ));
        assert!(matches!(
            Grid::from_pixels(10, 100, 16),
            Err(GameError::EmptyBoard { .. })
        ));
    }

    #[test]
    fn test_cells_cover_board() {
        let grid = Grid::from_pixels(48, 32, 16).unwrap();
        let cells: Vec<Cell> = grid.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[1], Cell::new(0, 1));
        assert_eq!(cells[5], Cell::new(2, 1));
    }
}
