//! Retained drawing surfaces
//!
//! A [`Canvas`] is a display list in canvas-local pixels. Each component owns
//! exactly one canvas and redraws it on its own schedule; the app copies the
//! marks into an egui painter every frame.

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Shape, Stroke, Vec2};

/// Marks fainter than this are dropped by [`Canvas::fade`]
const FADE_CUTOFF: u8 = 4;

/// How a mark combines with what is already on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    Normal,
    Additive,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// Whole-surface fill
    Fill { color: Color32 },
    Line { from: Pos2, to: Pos2, stroke: Stroke },
    Circle {
        center: Pos2,
        radius: f32,
        color: Color32,
        blend: Blend,
    },
}

impl Mark {
    fn alpha(&self) -> u8 {
        match self {
            Mark::Fill { color } | Mark::Circle { color, .. } => color.a(),
            Mark::Line { stroke, .. } => stroke.color.a(),
        }
    }

    fn scale_opacity(&mut self, factor: f32) {
        match self {
            Mark::Fill { color } | Mark::Circle { color, .. } => *color = color.gamma_multiply(factor),
            Mark::Line { stroke, .. } => stroke.color = stroke.color.gamma_multiply(factor),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    size: Vec2,
    marks: Vec<Mark>,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            marks: Vec::new(),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Change the surface size; existing marks are kept
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn fill(&mut self, color: Color32) {
        self.marks.push(Mark::Fill { color });
    }

    pub fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.marks.push(Mark::Line { from, to, stroke });
    }

    pub fn circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.circle_blended(center, radius, color, Blend::Normal);
    }

    pub fn circle_blended(&mut self, center: Pos2, radius: f32, color: Color32, blend: Blend) {
        self.marks.push(Mark::Circle {
            center,
            radius,
            color,
            blend,
        });
    }

    /// Erase a fraction of everything drawn so far, like compositing a
    /// translucent fill with "destination-out". Old marks fade over
    /// successive calls instead of vanishing at once.
    pub fn fade(&mut self, amount: f32) {
        let keep = (1.0 - amount).clamp(0.0, 1.0);
        for mark in &mut self.marks {
            mark.scale_opacity(keep);
        }
        self.marks.retain(|mark| mark.alpha() >= FADE_CUTOFF);
    }

    /// egui shapes for the marks, with the canvas placed at `origin`
    pub fn to_shapes(&self, origin: Pos2) -> Vec<Shape> {
        let offset = origin.to_vec2();
        self.marks
            .iter()
            .map(|mark| match *mark {
                Mark::Fill { color } => {
                    Shape::rect_filled(Rect::from_min_size(origin, self.size), CornerRadius::ZERO, color)
                }
                Mark::Line { from, to, stroke } => Shape::line_segment([from + offset, to + offset], stroke),
                Mark::Circle {
                    center,
                    radius,
                    color,
                    blend,
                } => {
                    let color = match blend {
                        Blend::Normal => color,
                        Blend::Additive => color.additive(),
                    };
                    Shape::circle_filled(center + offset, radius, color)
                }
            })
            .collect()
    }

    pub fn paint(&self, painter: &Painter, origin: Pos2) {
        painter.extend(self.to_shapes(origin));
    }
}
