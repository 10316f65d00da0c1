//! Decoded board snapshot

use serde::Serialize;
use std::fmt;

use crate::cell::{Cell, CellKind};
use crate::geometry::{Geometry, Point, Rect};

/// One decoded snapshot of the minefield
///
/// Rows run top to bottom, columns left to right. A board is never refreshed in
/// place; decode again to observe newer game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    rows: Vec<Vec<Cell>>,
    geometry: Geometry,
}

impl Board {
    /// Build a board from classified `(kind, address)` pairs in row-major order
    pub fn from_raw(raw_rows: Vec<Vec<(CellKind, usize)>>, geometry: Geometry) -> Self {
        let rows = raw_rows
            .into_iter()
            .enumerate()
            .map(|(row, line)| {
                line.into_iter()
                    .enumerate()
                    .map(|(col, (kind, address))| Cell {
                        row,
                        col,
                        position: geometry.cell_origin(row, col),
                        size: geometry.cell_size,
                        kind,
                        address,
                    })
                    .collect()
            })
            .collect();

        Self { rows, geometry }
    }

    pub fn empty(geometry: Geometry) -> Self {
        Self {
            rows: Vec::new(),
            geometry,
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|line| line.get(col))
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells().filter(|c| c.kind == kind).count()
    }

    /// Pixel area covered by the grid, relative to the window
    pub fn bounds(&self) -> Rect {
        self.geometry.bounds(self.height(), self.width())
    }

    /// Whether a window-relative point falls strictly inside the grid
    pub fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.rows {
            let text: String = line.iter().map(|c| c.kind.symbol()).collect();
            writeln!(f, "{}", text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_board() -> Board {
        let raw = vec![
            vec![(CellKind::Empty, 0x101), (CellKind::Bomb, 0x102)],
            vec![(CellKind::Unknown, 0x121), (CellKind::Empty, 0x122)],
            vec![(CellKind::Empty, 0x141), (CellKind::Empty, 0x142)],
        ];
        Board::from_raw(raw, Geometry::default())
    }

    #[test]
    fn test_dimensions_and_positions() {
        let board = small_board();
        assert_eq!(board.width(), 2);
        assert_eq!(board.height(), 3);

        let cell = board.cell(1, 1).unwrap();
        assert_eq!(cell.position, Point::new(31, 119));
        assert_eq!(cell.address, 0x122);
        assert_eq!(cell.size, 16);
        assert!(board.cell(3, 0).is_none());
    }

    #[test]
    fn test_cells_row_major() {
        let board = small_board();
        let order: Vec<(usize, usize)> = board.cells().map(|c| (c.row, c.col)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
        assert_eq!(board.count(CellKind::Empty), 4);
        assert_eq!(board.count(CellKind::Bomb), 1);
        assert_eq!(board.count(CellKind::Unknown), 1);
    }

    #[test]
    fn test_bounds_and_contains() {
        let board = small_board();
        assert_eq!(board.bounds(), Rect::new(Point::new(15, 103), 32, 48));
        assert!(board.contains(Point::new(20, 110)));
        assert!(!board.contains(Point::new(47, 110)));
        assert!(!board.contains(Point::new(15, 110)));
    }

    #[test]
    fn test_empty_board() {
        let board = Board::empty(Geometry::default());
        assert!(board.is_empty());
        assert_eq!(board.cells().count(), 0);
        assert!(!board.contains(Point::new(16, 104)));
        assert_eq!(board.to_string(), "");
    }

    #[test]
    fn test_display() {
        assert_eq!(small_board().to_string(), ".*\n?.\n..\n");
    }
}
