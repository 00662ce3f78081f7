//! Pixel <-> intersection mapping
//!
//! All coordinates are canvas-local pixels; the caller subtracts the
//! canvas origin before asking which intersection was hit.

use crate::board::Pos;

/// Nearest intersection to a pixel, possibly off the board
#[inline]
pub fn pixel_to_grid(x: f32, y: f32, padding: f32, cell_size: f32) -> (i64, i64) {
    let col = ((x - padding) / cell_size).round() as i64;
    let row = ((y - padding) / cell_size).round() as i64;
    (row, col)
}

#[inline]
pub fn grid_to_pixel(row: usize, col: usize, padding: f32, cell_size: f32) -> (f32, f32) {
    (padding + col as f32 * cell_size, padding + row as f32 * cell_size)
}

/// True iff (x, y) lies within half a cell of the intersection
#[inline]
pub fn is_within_hit_radius(x: f32, y: f32, row: usize, col: usize, padding: f32, cell_size: f32) -> bool {
    let (px, py) = grid_to_pixel(row, col, padding, cell_size);
    let (dx, dy) = (x - px, y - py);
    (dx * dx + dy * dy).sqrt() <= cell_size / 2.0
}

/// Board layout of one session, fixed from start to game over
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    pub canvas_size: f32,
    pub padding: f32,
    pub cell_size: f32,
    pub board_size: usize,
}

impl BoardGeometry {
    /// `board_size` must be at least 2
    pub fn new(canvas_size: f32, padding: f32, board_size: usize) -> Self {
        debug_assert!(board_size >= 2);
        Self {
            canvas_size,
            padding,
            cell_size: (canvas_size - 2.0 * padding) / (board_size as f32 - 1.0),
            board_size,
        }
    }

    #[inline]
    pub fn to_pixel(&self, pos: Pos) -> (f32, f32) {
        grid_to_pixel(pos.row, pos.col, self.padding, self.cell_size)
    }

    /// Intersection a click lands on, if it is on the board and close enough
    pub fn resolve_click(&self, x: f32, y: f32) -> Option<Pos> {
        let (row, col) = pixel_to_grid(x, y, self.padding, self.cell_size);
        let size = self.board_size as i64;
        if row < 0 || row >= size || col < 0 || col >= size {
            return None;
        }

        let (row, col) = (row as usize, col as usize);
        is_within_hit_radius(x, y, row, col, self.padding, self.cell_size).then(|| Pos::new(row, col))
    }
}
