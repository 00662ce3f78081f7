//! Theme constants for the Go client

use egui::Color32;

// Board colors - warm wood tones
pub const BOARD_BG: Color32 = Color32::from_rgb(220, 179, 92);
pub const GRID_LINE: Color32 = Color32::from_rgb(0, 0, 0);
pub const STAR_POINT: Color32 = Color32::from_rgb(20, 15, 10);

// Stone gradients (edge -> highlight)
pub const BLACK_STONE_EDGE: Color32 = Color32::from_rgb(0, 0, 0);
pub const BLACK_STONE_HIGHLIGHT: Color32 = Color32::from_rgb(85, 85, 85);
pub const WHITE_STONE_EDGE: Color32 = Color32::from_rgb(221, 221, 221);
pub const WHITE_STONE_HIGHLIGHT: Color32 = Color32::from_rgb(255, 255, 255);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);

pub fn stone_shadow() -> Color32 {
    Color32::from_rgba_unmultiplied(0, 0, 0, 110)
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const BOARD_AREA_BG: Color32 = Color32::from_rgb(40, 42, 46);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Status colors
pub const STATUS_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const STATUS_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const STATUS_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Outcome overlay
pub const OVERLAY_WIN_BG: Color32 = Color32::from_rgb(45, 80, 55);
pub const OVERLAY_LOSE_BG: Color32 = Color32::from_rgb(90, 40, 40);

// Sizes
pub const STONE_RADIUS_RATIO: f32 = 0.45;
pub const LAST_MOVE_MARKER_RATIO: f32 = 0.3;
pub const STAR_POINT_RADIUS: f32 = 3.5;
pub const GRID_LINE_WIDTH: f32 = 1.0;
pub const SHADOW_OFFSET: f32 = 2.0;
/// Concentric rings used to approximate the radial stone gradient
pub const SHADE_STEPS: usize = 8;
/// Room left around the board inside the central panel
pub const BOARD_AREA_MARGIN: f32 = 40.0;

/// Hoshi for the standard board sizes, excluding the centre point
pub fn star_points(board_size: usize) -> &'static [(usize, usize)] {
    match board_size {
        9 => &[(2, 2), (2, 6), (6, 2), (6, 6)],
        13 => &[(3, 3), (3, 9), (9, 3), (9, 9)],
        19 => &[
            (3, 3), (3, 9), (3, 15),
            (9, 3), (9, 15),
            (15, 3), (15, 9), (15, 15),
        ],
        _ => &[],
    }
}
