//! Placement of overlay content relative to a reveal area.
//!
//! Overlay content (labels, arrows) is positioned in two steps. An *arrangement* picks the
//! layout area on one side of the reveal area: [`HorizontalArrangement`] places content to its
//! start or end, [`VerticalArrangement`] above or below it. An *alignment* then positions the
//! content along the cross axis of that layout area.
//!
//! All coordinates are pixels in the overlay's space, with `x` growing to the right regardless
//! of layout direction. Horizontal arrangements and horizontal alignments mirror under
//! [`LayoutDirection::Rtl`]; vertical ones do not.
//!
//! Layout areas may be empty, e.g. when the reveal area touches an edge of the available
//! space. Content is then measured against a zero extent and overflows.

use crate::rect::{IntRect, IntSize};
use crate::unit::LayoutDirection;
use cgmath::Point2;

/// Places overlay content to the start or end of the reveal area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalArrangement {
    Start,
    End,
}

impl HorizontalArrangement {
    /// Returns the layout area for content next to `revealable` within `space`.
    ///
    /// With `confine_height` the area spans the reveal area's vertical extent, otherwise the
    /// whole height of `space`.
    pub fn arrange(
        self,
        revealable: IntRect,
        space: IntSize,
        confine_height: bool,
        direction: LayoutDirection,
    ) -> IntRect {
        let (top, bottom) = if confine_height {
            (revealable.top, revealable.bottom)
        } else {
            (0, space.height)
        };
        let before = (0, revealable.left);
        let after = (revealable.right, space.width);
        let (left, right) = match (self, direction) {
            (HorizontalArrangement::Start, LayoutDirection::Ltr) => before,
            (HorizontalArrangement::Start, LayoutDirection::Rtl) => after,
            (HorizontalArrangement::End, LayoutDirection::Ltr) => after,
            (HorizontalArrangement::End, LayoutDirection::Rtl) => before,
        };
        IntRect::new(left, top, right, bottom)
    }

    /// Returns the offset of content of width `size` from the start edge of the available
    /// space, given the `layout` area width and total `space` width.
    ///
    /// Start content is pinned against the reveal area at the far end of its layout area; end
    /// content begins right after the reveal area.
    pub fn align(self, size: i32, layout: i32, space: i32) -> i32 {
        match self {
            HorizontalArrangement::Start => layout - size,
            HorizontalArrangement::End => space - layout,
        }
    }
}

/// Places overlay content above or below the reveal area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalArrangement {
    Top,
    Bottom,
}

impl VerticalArrangement {
    /// Returns the layout area for content above or below `revealable` within `space`.
    ///
    /// With `confine_width` the area spans the reveal area's horizontal extent, otherwise the
    /// whole width of `space`.
    pub fn arrange(self, revealable: IntRect, space: IntSize, confine_width: bool) -> IntRect {
        let (left, right) = if confine_width {
            (revealable.left, revealable.right)
        } else {
            (0, space.width)
        };
        match self {
            VerticalArrangement::Top => IntRect::new(left, 0, right, revealable.top),
            VerticalArrangement::Bottom => {
                IntRect::new(left, revealable.bottom, right, space.height)
            }
        }
    }

    /// Returns the `y` offset of content of height `size`, given the `layout` area height and
    /// total `space` height.
    pub fn align(self, size: i32, layout: i32, space: i32) -> i32 {
        match self {
            VerticalArrangement::Top => layout - size,
            VerticalArrangement::Bottom => space - layout,
        }
    }
}

/// Rounds half up, like pixel snapping in most UI toolkits.
fn round(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Vertical alignment of content within a layout area, as a bias from -1 (top) to 1 (bottom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalAlignment {
    pub bias: f64,
}

impl VerticalAlignment {
    pub const TOP: VerticalAlignment = VerticalAlignment { bias: -1. };
    pub const CENTER: VerticalAlignment = VerticalAlignment { bias: 0. };
    pub const BOTTOM: VerticalAlignment = VerticalAlignment { bias: 1. };

    /// Returns the offset of content of height `size` within `space`.
    pub fn align(self, size: i32, space: i32) -> i32 {
        let center = (space - size) as f64 / 2.;
        round(center * (1. + self.bias))
    }
}

/// Horizontal alignment of content within a layout area, as a bias from -1 (start) to 1 (end).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalAlignment {
    pub bias: f64,
}

impl HorizontalAlignment {
    pub const START: HorizontalAlignment = HorizontalAlignment { bias: -1. };
    pub const CENTER: HorizontalAlignment = HorizontalAlignment { bias: 0. };
    pub const END: HorizontalAlignment = HorizontalAlignment { bias: 1. };

    /// Returns the offset of content of width `size` from the left edge of `space`.
    pub fn align(self, size: i32, space: i32, direction: LayoutDirection) -> i32 {
        let center = (space - size) as f64 / 2.;
        let bias = match direction {
            LayoutDirection::Ltr => self.bias,
            LayoutDirection::Rtl => -self.bias,
        };
        round(center * (1. + bias))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Rule {
    Horizontal(HorizontalArrangement, VerticalAlignment),
    Vertical(VerticalArrangement, HorizontalAlignment),
}

/// A resolved layout area for one piece of overlay content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    area: IntRect,
    space: IntSize,
    direction: LayoutDirection,
    rule: Rule,
}

impl Placement {
    /// The layout area the content is confined to.
    pub fn area(&self) -> IntRect {
        self.area
    }

    /// Maximum size to measure the content with.
    ///
    /// Only the arranged axis is limited by the layout area; the cross axis may use the whole
    /// available space.
    pub fn max_size(&self) -> IntSize {
        match self.rule {
            Rule::Horizontal(..) => IntSize::new(self.area.width().max(0), self.space.height),
            Rule::Vertical(..) => IntSize::new(self.space.width, self.area.height().max(0)),
        }
    }

    /// Places content of the measured `size` and returns its bounds.
    pub fn place(&self, size: IntSize) -> IntRect {
        let origin = match self.rule {
            Rule::Horizontal(arrangement, alignment) => {
                let layout = self.area.width();
                let offset = arrangement.align(size.width, layout, self.space.width);
                // the arrangement offset counts from the start edge
                let x = match self.direction {
                    LayoutDirection::Ltr => offset,
                    LayoutDirection::Rtl => self.space.width - offset - size.width,
                };
                let y = self.area.top + alignment.align(size.height, self.area.height());
                Point2::new(x, y)
            }
            Rule::Vertical(arrangement, alignment) => {
                let x = self.area.left
                    + alignment.align(size.width, self.area.width(), self.direction);
                let y = arrangement.align(size.height, self.area.height(), self.space.height);
                Point2::new(x, y)
            }
        };
        IntRect::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }
}

/// Positions overlay content relative to one reveal area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayScope {
    revealable: IntRect,
    space: IntSize,
    direction: LayoutDirection,
}

impl OverlayScope {
    pub fn new(revealable: IntRect, space: IntSize, direction: LayoutDirection) -> OverlayScope {
        OverlayScope {
            revealable,
            space,
            direction,
        }
    }

    /// The pixel-snapped reveal area.
    pub fn revealable_area(&self) -> IntRect {
        self.revealable
    }

    pub fn space(&self) -> IntSize {
        self.space
    }

    /// Places content to the start or end of the reveal area, aligned vertically.
    pub fn horizontal(
        &self,
        arrangement: HorizontalArrangement,
        alignment: VerticalAlignment,
        confine_height: bool,
    ) -> Placement {
        Placement {
            area: arrangement.arrange(self.revealable, self.space, confine_height, self.direction),
            space: self.space,
            direction: self.direction,
            rule: Rule::Horizontal(arrangement, alignment),
        }
    }

    /// Places content above or below the reveal area, aligned horizontally.
    pub fn vertical(
        &self,
        arrangement: VerticalArrangement,
        alignment: HorizontalAlignment,
        confine_width: bool,
    ) -> Placement {
        Placement {
            area: arrangement.arrange(self.revealable, self.space, confine_width),
            space: self.space,
            direction: self.direction,
            rule: Rule::Vertical(arrangement, alignment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPACE: IntSize = IntSize {
        width: 400,
        height: 800,
    };

    fn revealable() -> IntRect {
        IntRect::new(100, 200, 300, 260)
    }

    #[test]
    fn start_spans_to_near_edge() {
        let area = HorizontalArrangement::Start.arrange(revealable(), SPACE, true, LayoutDirection::Ltr);
        assert_eq!(area, IntRect::new(0, 200, 100, 260));
        let area = HorizontalArrangement::Start.arrange(revealable(), SPACE, false, LayoutDirection::Ltr);
        assert_eq!(area, IntRect::new(0, 0, 100, 800));
    }

    #[test]
    fn bottom_spans_to_space_edge() {
        let area = VerticalArrangement::Bottom.arrange(revealable(), SPACE, true);
        assert_eq!(area, IntRect::new(100, 260, 300, 800));
        let area = VerticalArrangement::Top.arrange(revealable(), SPACE, false);
        assert_eq!(area, IntRect::new(0, 0, 400, 200));
    }

    #[test]
    fn cross_axis_alignment() {
        assert_eq!(VerticalAlignment::CENTER.align(20, 60), 20);
        assert_eq!(VerticalAlignment::TOP.align(20, 60), 0);
        assert_eq!(VerticalAlignment::BOTTOM.align(20, 60), 40);
        assert_eq!(HorizontalAlignment::START.align(20, 60, LayoutDirection::Ltr), 0);
        assert_eq!(HorizontalAlignment::START.align(20, 60, LayoutDirection::Rtl), 40);
        assert_eq!(VerticalAlignment::CENTER.align(21, 60), 20);
    }

    #[test]
    fn start_content_is_pinned_against_revealable() {
        let scope = OverlayScope::new(revealable(), SPACE, LayoutDirection::Ltr);
        let placement = scope.horizontal(HorizontalArrangement::Start, VerticalAlignment::CENTER, true);
        assert_eq!(placement.max_size(), IntSize::new(100, 800));
        assert_eq!(placement.place(IntSize::new(40, 20)), IntRect::new(60, 220, 100, 240));
    }

    #[test]
    fn end_content_follows_revealable() {
        let scope = OverlayScope::new(revealable(), SPACE, LayoutDirection::Ltr);
        let placement = scope.horizontal(HorizontalArrangement::End, VerticalAlignment::TOP, true);
        assert_eq!(placement.place(IntSize::new(40, 20)), IntRect::new(300, 200, 340, 220));
    }

    #[test]
    fn rtl_start_content_sits_right_of_revealable() {
        let scope = OverlayScope::new(revealable(), SPACE, LayoutDirection::Rtl);
        let placement = scope.horizontal(HorizontalArrangement::Start, VerticalAlignment::CENTER, true);
        assert_eq!(placement.area(), IntRect::new(300, 200, 400, 260));
        assert_eq!(placement.place(IntSize::new(40, 20)), IntRect::new(300, 220, 340, 240));

        let placement = scope.horizontal(HorizontalArrangement::End, VerticalAlignment::CENTER, true);
        assert_eq!(placement.place(IntSize::new(40, 20)), IntRect::new(60, 220, 100, 240));
    }

    #[test]
    fn vertical_placement() {
        let scope = OverlayScope::new(revealable(), SPACE, LayoutDirection::Ltr);
        let top = scope.vertical(VerticalArrangement::Top, HorizontalAlignment::CENTER, true);
        assert_eq!(top.max_size(), IntSize::new(400, 200));
        assert_eq!(top.place(IntSize::new(100, 50)), IntRect::new(150, 150, 250, 200));

        let bottom = scope.vertical(VerticalArrangement::Bottom, HorizontalAlignment::START, true);
        assert_eq!(bottom.place(IntSize::new(100, 50)), IntRect::new(100, 260, 200, 310));

        let scope = OverlayScope::new(revealable(), SPACE, LayoutDirection::Rtl);
        let bottom = scope.vertical(VerticalArrangement::Bottom, HorizontalAlignment::START, true);
        assert_eq!(bottom.place(IntSize::new(100, 50)), IntRect::new(200, 260, 300, 310));
    }

    #[test]
    fn revealable_at_edge_leaves_empty_area() {
        let scope = OverlayScope::new(IntRect::new(0, 0, 100, 50), SPACE, LayoutDirection::Ltr);
        let top = scope.vertical(VerticalArrangement::Top, HorizontalAlignment::CENTER, true);
        assert_eq!(top.area().height(), 0);
        assert_eq!(top.max_size(), IntSize::new(400, 0));
        // content overflows upwards instead of failing
        assert_eq!(top.place(IntSize::new(20, 10)), IntRect::new(40, -10, 60, 0));

        let start = scope.horizontal(HorizontalArrangement::Start, VerticalAlignment::CENTER, true);
        assert_eq!(start.max_size().width, 0);
    }
}
