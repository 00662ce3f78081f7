//! Board rendering for the Go client

use egui::{Color32, Pos2, Stroke, Vec2};
use tracing::warn;

use crate::board::{BoardSnapshot, Pos, Stone};

use super::canvas::Canvas;
use super::coords::BoardGeometry;
use super::theme::*;

/// Draws board snapshots onto the board canvas it owns
pub struct BoardRenderer {
    canvas: Canvas,
    geometry: BoardGeometry,
}

impl BoardRenderer {
    pub fn new(geometry: BoardGeometry) -> Self {
        Self {
            canvas: Canvas::new(geometry.canvas_size, geometry.canvas_size),
            geometry,
        }
    }

    /// Adopt a new session's layout. The canvas is blank until the next render.
    pub fn set_geometry(&mut self, geometry: BoardGeometry) {
        self.geometry = geometry;
        self.canvas.resize(geometry.canvas_size, geometry.canvas_size);
        self.canvas.clear();
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Redraw everything from scratch: background, grid, points, stones
    pub fn render(&mut self, snapshot: &BoardSnapshot, last_move: Option<Pos>) {
        if snapshot.size() != self.geometry.board_size {
            warn!(
                snapshot = snapshot.size(),
                session = self.geometry.board_size,
                "snapshot size does not match the session board"
            );
        }

        self.canvas.clear();
        self.canvas.fill(BOARD_BG);

        self.draw_grid();
        self.draw_star_points();

        for (pos, stone) in snapshot.stones() {
            if pos.is_on_board(self.geometry.board_size) {
                self.draw_stone(pos, stone);
                if last_move == Some(pos) {
                    self.draw_last_move_marker(pos);
                }
            }
        }
    }

    fn point(&self, pos: Pos) -> Pos2 {
        let (x, y) = self.geometry.to_pixel(pos);
        Pos2::new(x, y)
    }

    /// One horizontal and one vertical line per row/column
    fn draw_grid(&mut self) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let BoardGeometry {
            canvas_size,
            padding,
            cell_size,
            board_size,
        } = self.geometry;
        let far = canvas_size - padding;

        for i in 0..board_size {
            let offset = padding + i as f32 * cell_size;
            self.canvas.line(Pos2::new(padding, offset), Pos2::new(far, offset), stroke);
            self.canvas.line(Pos2::new(offset, padding), Pos2::new(offset, far), stroke);
        }
    }

    /// Hoshi on standard sizes plus the centre dot on odd sizes
    fn draw_star_points(&mut self) {
        let board_size = self.geometry.board_size;

        for &(row, col) in star_points(board_size) {
            let center = self.point(Pos::new(row, col));
            self.canvas.circle(center, STAR_POINT_RADIUS, STAR_POINT);
        }

        if board_size % 2 == 1 {
            let mid = board_size / 2;
            let center = self.point(Pos::new(mid, mid));
            self.canvas.circle(center, STAR_POINT_RADIUS, STAR_POINT);
        }
    }

    /// Drop shadow, then rings that shrink and drift toward the upper-left
    /// light source while brightening, approximating a radial gradient.
    fn draw_stone(&mut self, pos: Pos, stone: Stone) {
        let (edge, highlight) = match stone {
            Stone::Black => (BLACK_STONE_EDGE, BLACK_STONE_HIGHLIGHT),
            Stone::White => (WHITE_STONE_EDGE, WHITE_STONE_HIGHLIGHT),
            Stone::Empty => return,
        };

        let center = self.point(pos);
        let radius = self.geometry.cell_size * STONE_RADIUS_RATIO;

        self.canvas
            .circle(center + Vec2::splat(SHADOW_OFFSET), radius, stone_shadow());

        let light = Vec2::splat(-radius / 3.0);
        let inner = radius / 10.0;
        for step in 0..SHADE_STEPS {
            let t = step as f32 / (SHADE_STEPS - 1) as f32;
            self.canvas.circle(
                center + light * t,
                radius - (radius - inner) * t,
                mix(edge, highlight, t),
            );
        }
    }

    fn draw_last_move_marker(&mut self, pos: Pos) {
        let center = self.point(pos);
        let radius = self.geometry.cell_size * STONE_RADIUS_RATIO * LAST_MOVE_MARKER_RATIO;
        self.canvas.circle(center, radius, LAST_MOVE_MARKER);
    }
}

fn mix(a: Color32, b: Color32, t: f32) -> Color32 {
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::canvas::Mark;

    fn renderer(board_size: usize) -> BoardRenderer {
        BoardRenderer::new(BoardGeometry::new(600.0, 30.0, board_size))
    }

    fn count_lines(canvas: &Canvas) -> usize {
        canvas.marks().iter().filter(|m| matches!(m, Mark::Line { .. })).count()
    }

    fn circles_with(canvas: &Canvas, color: Color32) -> Vec<(Pos2, f32)> {
        canvas
            .marks()
            .iter()
            .filter_map(|m| match m {
                Mark::Circle { center, radius, color: c, .. } if *c == color => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    fn board_with(size: usize, stones: &[(usize, usize, u8)]) -> BoardSnapshot {
        let mut codes = vec![0u8; size * size];
        for &(row, col, code) in stones {
            codes[row * size + col] = code;
        }
        BoardSnapshot::from_codes(size, &codes).unwrap()
    }

    #[test]
    fn test_background_then_grid() {
        let mut view = renderer(9);
        view.render(&BoardSnapshot::empty(9), None);

        let marks = view.canvas().marks();
        assert_eq!(marks[0], Mark::Fill { color: BOARD_BG });
        assert_eq!(count_lines(view.canvas()), 18);

        let first = &marks[1];
        assert_eq!(
            *first,
            Mark::Line {
                from: Pos2::new(30.0, 30.0),
                to: Pos2::new(570.0, 30.0),
                stroke: Stroke::new(GRID_LINE_WIDTH, GRID_LINE),
            }
        );
    }

    #[test]
    fn test_centre_dot_only_on_odd_boards() {
        let mut odd = renderer(7);
        odd.render(&BoardSnapshot::empty(7), None);
        let dots = circles_with(odd.canvas(), STAR_POINT);
        assert_eq!(dots, vec![(Pos2::new(300.0, 300.0), STAR_POINT_RADIUS)]);

        let mut even = renderer(8);
        even.render(&BoardSnapshot::empty(8), None);
        assert!(circles_with(even.canvas(), STAR_POINT).is_empty());
    }

    #[test]
    fn test_nine_by_nine_star_points() {
        let mut view = renderer(9);
        view.render(&BoardSnapshot::empty(9), None);
        assert_eq!(circles_with(view.canvas(), STAR_POINT).len(), 5);
    }

    #[test]
    fn test_stones_shaded_with_shadow() {
        let mut view = renderer(9);
        view.render(&board_with(9, &[(1, 1, 1), (4, 4, 2)]), None);

        let shadows = circles_with(view.canvas(), stone_shadow());
        assert_eq!(shadows.len(), 2);
        let radius = view.geometry().cell_size * STONE_RADIUS_RATIO;
        let (x, y) = view.geometry().to_pixel(Pos::new(1, 1));
        assert_eq!(shadows[0], (Pos2::new(x + SHADOW_OFFSET, y + SHADOW_OFFSET), radius));

        // Outermost ring is the edge color at full radius, innermost the highlight
        assert_eq!(circles_with(view.canvas(), BLACK_STONE_EDGE)[0], (Pos2::new(x, y), radius));
        let highlight = circles_with(view.canvas(), BLACK_STONE_HIGHLIGHT);
        assert_eq!(highlight.len(), 1);
        assert!(highlight[0].0.x < x && highlight[0].0.y < y);
        assert_eq!(circles_with(view.canvas(), WHITE_STONE_HIGHLIGHT).len(), 1);
    }

    #[test]
    fn test_last_move_marker() {
        let mut view = renderer(9);
        view.render(&board_with(9, &[(2, 3, 2)]), Some(Pos::new(2, 3)));

        let markers = circles_with(view.canvas(), LAST_MOVE_MARKER);
        assert_eq!(markers.len(), 1);
        let (x, y) = view.geometry().to_pixel(Pos::new(2, 3));
        assert_eq!(markers[0].0, Pos2::new(x, y));
        let stone_radius = view.geometry().cell_size * STONE_RADIUS_RATIO;
        assert!((markers[0].1 - stone_radius * 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_marker_skipped_on_empty_cell() {
        let mut view = renderer(9);
        view.render(&BoardSnapshot::empty(9), Some(Pos::new(0, 0)));
        assert!(circles_with(view.canvas(), LAST_MOVE_MARKER).is_empty());
    }

    #[test]
    fn test_render_is_idempotent() {
        let board = board_with(9, &[(0, 0, 1), (8, 8, 2), (3, 5, 1)]);
        let mut view = renderer(9);

        view.render(&board, Some(Pos::new(3, 5)));
        let first = view.canvas().clone();
        view.render(&board, Some(Pos::new(3, 5)));
        assert_eq!(view.canvas(), &first);
    }

    #[test]
    fn test_full_redraw_drops_captured_stones() {
        let mut view = renderer(9);
        view.render(&board_with(9, &[(0, 0, 1), (0, 1, 2)]), None);
        view.render(&board_with(9, &[(0, 0, 1)]), None);

        assert_eq!(circles_with(view.canvas(), stone_shadow()).len(), 1);
        assert!(circles_with(view.canvas(), WHITE_STONE_EDGE).is_empty());
    }

    #[test]
    fn test_new_geometry_blanks_canvas() {
        let mut view = renderer(9);
        view.render(&BoardSnapshot::empty(9), None);
        view.set_geometry(BoardGeometry::new(400.0, 30.0, 13));
        assert!(view.canvas().is_blank());
        assert_eq!(view.canvas().size(), Vec2::splat(400.0));
    }
}
