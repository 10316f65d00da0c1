//! Screen geometry shared by the overlay and the input side
//!
//! Every pixel position of a cell comes from [`Geometry::cell_origin`], so the
//! marker the overlay paints and the point autoplay clicks can never drift.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Pack as a mouse-message lParam: `(y << 16) | x`
    pub fn to_lparam(self) -> isize {
        let x = (self.x as u32) & 0xFFFF;
        let y = (self.y as u32) & 0xFFFF;
        ((y << 16) | x) as isize
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle, `origin` is the top-left corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(origin: Point, width: i32, height: i32) -> Self {
        Self {
            origin,
            size: Size::new(width, height),
        }
    }

    pub fn left(&self) -> i32 {
        self.origin.x
    }

    pub fn top(&self) -> i32 {
        self.origin.y
    }

    pub fn right(&self) -> i32 {
        self.origin.x.saturating_add(self.size.width)
    }

    pub fn bottom(&self) -> i32 {
        self.origin.y.saturating_add(self.size.height)
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: i32) -> Rect {
        let shrink = margin.saturating_mul(2);
        Rect::new(
            self.origin + Point::new(margin, margin),
            self.size.width.saturating_sub(shrink).max(0),
            self.size.height.saturating_sub(shrink).max(0),
        )
    }

    /// Strict containment, points on an edge are outside
    pub fn contains(&self, point: Point) -> bool {
        is_inside_board(self.origin, self.size, point)
    }
}

/// Whether `point` lies strictly inside the area starting at `origin`
pub fn is_inside_board(origin: Point, extent: Size, point: Point) -> bool {
    point.x > origin.x
        && point.x < origin.x.saturating_add(extent.width)
        && point.y > origin.y
        && point.y < origin.y.saturating_add(extent.height)
}

/// Where the grid sits inside the game window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// Top-left of cell (0, 0) relative to the window rectangle
    pub origin: Point,
    /// Edge length of one cell in pixels
    pub cell_size: i32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            origin: Point::new(15, 103),
            cell_size: 16,
        }
    }
}

impl Geometry {
    /// Top-left pixel of cell `(row, col)`
    pub fn cell_origin(&self, row: usize, col: usize) -> Point {
        self.origin + Point::new(self.span(col), self.span(row))
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(self.cell_origin(row, col), self.cell_size, self.cell_size)
    }

    /// Pixel extent of a `rows` x `cols` grid
    pub fn bounds(&self, rows: usize, cols: usize) -> Rect {
        Rect::new(self.origin, self.span(cols), self.span(rows))
    }

    /// Pixels covered by `cells` cells, saturating on absurd settings
    fn span(&self, cells: usize) -> i32 {
        i32::try_from(cells)
            .unwrap_or(i32::MAX)
            .saturating_mul(self.cell_size)
    }
}
