use crate::unit::{Dp, LayoutDirection};

/// Padding around a revealable, in `Dp`.
///
/// Horizontal sides are stored as start and end and resolve to left and right
/// according to the layout direction. Negative values shrink the reveal area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaddingValues {
    pub start: Dp,
    pub top: Dp,
    pub end: Dp,
    pub bottom: Dp,
}

impl PaddingValues {
    pub fn new(start: Dp, top: Dp, end: Dp, bottom: Dp) -> PaddingValues {
        PaddingValues {
            start,
            top,
            end,
            bottom,
        }
    }

    /// The same padding on all four sides.
    pub fn all(value: Dp) -> PaddingValues {
        PaddingValues::new(value, value, value, value)
    }

    pub fn left(&self, direction: LayoutDirection) -> Dp {
        match direction {
            LayoutDirection::Ltr => self.start,
            LayoutDirection::Rtl => self.end,
        }
    }

    pub fn right(&self, direction: LayoutDirection) -> Dp {
        match direction {
            LayoutDirection::Ltr => self.end,
            LayoutDirection::Rtl => self.start,
        }
    }
}
