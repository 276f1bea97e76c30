use crate::unit::Dp;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.,
        g: 0.,
        b: 0.,
        a: 1.,
    };

    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Color {
        Color { r, g, b, a }
    }

    /// Returns this color with a different alpha.
    pub fn with_alpha(self, a: f64) -> Color {
        Color { a, ..self }
    }
}

/// A border drawn along the outline of a reveal area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderStroke {
    pub width: Dp,
    pub color: Color,
}

impl BorderStroke {
    pub fn new(width: Dp, color: Color) -> BorderStroke {
        BorderStroke { width, color }
    }
}
