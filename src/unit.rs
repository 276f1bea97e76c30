//! Density-independent units and layout context.

use cgmath::Vector2;

/// A density-independent length.
///
/// One `Dp` is one pixel at a [`Density`] of 1.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Dp(pub f64);

impl Dp {
    pub const ZERO: Dp = Dp(0.);

    /// Converts to pixels.
    pub fn to_px(self, density: Density) -> f64 {
        self.0 * density.scale
    }
}

/// A two-dimensional offset in `Dp`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DpOffset {
    pub x: Dp,
    pub y: Dp,
}

impl DpOffset {
    pub const ZERO: DpOffset = DpOffset {
        x: Dp::ZERO,
        y: Dp::ZERO,
    };

    pub fn new(x: Dp, y: Dp) -> DpOffset {
        DpOffset { x, y }
    }

    /// Converts to a pixel vector.
    pub fn to_px(self, density: Density) -> Vector2<f64> {
        Vector2::new(self.x.to_px(density), self.y.to_px(density))
    }
}

/// Pixels per `Dp`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density {
    pub scale: f64,
}

impl Density {
    pub fn new(scale: f64) -> Density {
        Density { scale }
    }
}

impl Default for Density {
    fn default() -> Self {
        Density { scale: 1. }
    }
}

/// Writing direction of the surrounding layout.
///
/// Horizontal "start" and "end" resolve to left and right under `Ltr` and
/// the other way around under `Rtl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dp_scales_with_density() {
        assert_eq!(Dp(8.).to_px(Density::new(2.5)), 20.);
        assert_eq!(
            DpOffset::new(Dp(1.), Dp(-2.)).to_px(Density::new(3.)),
            Vector2::new(3., -6.)
        );
    }
}
