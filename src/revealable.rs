//! Revealable elements and their reveal areas.

use crate::color::BorderStroke;
use crate::events::ClickListener;
use crate::padding::PaddingValues;
use crate::rect::{IntRect, Rect};
use crate::shape::{Outline, RevealShape};
use crate::unit::{Density, DpOffset, LayoutDirection};
use cgmath::{EuclideanSpace, Point2, Vector2};

/// Click policy of a revealable.
///
/// A revealable without a click policy has its clicks handled by the overlay's global
/// revealable click callback.
#[derive(Debug, Clone)]
pub enum OnClick<K> {
    /// Clicks inside the reveal area are handled by this listener.
    Listener(ClickListener<K>),

    /// Clicks inside the reveal area are not intercepted and reach the content below.
    Passthrough,
}

/// Position and size of a laid-out element, in pixels, relative to the root container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealableLayout {
    pub offset: Point2<f64>,
    pub size: Vector2<f64>,
}

impl RevealableLayout {
    pub fn new(offset: Point2<f64>, size: Vector2<f64>) -> RevealableLayout {
        RevealableLayout { offset, size }
    }
}

/// Registration parameters shared by all keys of an element.
#[derive(Debug, Clone)]
pub struct RevealableOptions<K> {
    /// Shape of the reveal area. Defaults to a rounded rectangle with 4 dp corners.
    pub shape: RevealShape,

    /// Padding around the element. Defaults to 8 dp on all sides.
    pub padding: PaddingValues,

    pub border_stroke: Option<BorderStroke>,

    pub on_click: Option<OnClick<K>>,
}

impl<K> Default for RevealableOptions<K> {
    fn default() -> Self {
        RevealableOptions {
            shape: RevealShape::default(),
            padding: PaddingValues::all(crate::unit::Dp(8.)),
            border_stroke: None,
            on_click: None,
        }
    }
}

/// A registered element.
///
/// Identity is the key: registries index revealables by key, so re-registering an element on
/// every layout pass replaces its geometry without creating a new entry.
#[derive(Debug, Clone)]
pub struct Revealable<K> {
    pub key: K,
    pub shape: RevealShape,
    pub padding: PaddingValues,
    pub border_stroke: Option<BorderStroke>,
    pub layout: RevealableLayout,
    pub on_click: Option<OnClick<K>>,
}

impl<K: Clone> Revealable<K> {
    pub fn new(key: K, options: RevealableOptions<K>, layout: RevealableLayout) -> Revealable<K> {
        Revealable {
            key,
            shape: options.shape,
            padding: options.padding,
            border_stroke: options.border_stroke,
            layout,
            on_click: options.on_click,
        }
    }

    /// Returns the reveal area in pixels, including padding.
    ///
    /// `additional_offset` translates the area into the overlay's coordinate space when it is
    /// not the content's. Circles yield the square that bounds a circle around the padded
    /// rectangle's center, with a radius of half its longest side.
    pub fn compute_area(
        &self,
        density: Density,
        direction: LayoutDirection,
        additional_offset: DpOffset,
    ) -> Rect {
        let offset = self.layout.offset + additional_offset.to_px(density);
        let size = self.layout.size;
        let rect = Rect::from_ltrb(
            offset.x - self.padding.left(direction).to_px(density),
            offset.y - self.padding.top.to_px(density),
            offset.x + size.x + self.padding.right(direction).to_px(density),
            offset.y + size.y + self.padding.bottom.to_px(density),
        );

        if self.shape.is_circle() {
            Rect::from_center_radius(rect.center(), rect.max_dimension() / 2.)
        } else {
            rect
        }
    }

    /// Resolves this revealable into an immutable snapshot with a concrete area.
    pub fn resolve(
        &self,
        density: Density,
        direction: LayoutDirection,
        additional_offset: DpOffset,
    ) -> ActualRevealable<K> {
        ActualRevealable {
            key: self.key.clone(),
            shape: self.shape.clone(),
            padding: self.padding,
            border_stroke: self.border_stroke,
            area: self.compute_area(density, direction, additional_offset),
            on_click: self.on_click.clone(),
        }
    }
}

/// A revealable with its reveal area resolved to screen space.
#[derive(Debug, Clone)]
pub struct ActualRevealable<K> {
    pub key: K,
    pub shape: RevealShape,
    pub padding: PaddingValues,
    pub border_stroke: Option<BorderStroke>,
    /// Reveal area in pixels, including padding.
    pub area: Rect,
    pub on_click: Option<OnClick<K>>,
}

impl<K> ActualRevealable<K> {
    /// Returns the clip outline of the reveal area in overlay coordinates.
    pub fn outline(&self, density: Density, direction: LayoutDirection) -> Outline {
        self.shape
            .clip(self.area.size, density, direction)
            .translate(self.area.origin.to_vec())
    }

    /// Returns the pixel-snapped reveal area.
    pub fn int_area(&self) -> IntRect {
        self.area.to_int_rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Dp;

    fn revealable(shape: RevealShape, padding: PaddingValues) -> Revealable<u32> {
        let options = RevealableOptions {
            shape,
            padding,
            ..RevealableOptions::default()
        };
        Revealable::new(
            1,
            options,
            RevealableLayout::new(Point2::new(10., 20.), Vector2::new(100., 50.)),
        )
    }

    #[test]
    fn area_includes_padding() {
        let area = revealable(RevealShape::Rect, PaddingValues::all(Dp(8.))).compute_area(
            Density::default(),
            LayoutDirection::Ltr,
            DpOffset::ZERO,
        );
        assert_eq!(area, Rect::from_ltrb(2., 12., 118., 78.));
    }

    #[test]
    fn area_respects_density_and_offset() {
        let area = revealable(RevealShape::Rect, PaddingValues::all(Dp(4.))).compute_area(
            Density::new(2.),
            LayoutDirection::Ltr,
            DpOffset::new(Dp(5.), Dp(-5.)),
        );
        assert_eq!(area, Rect::from_ltrb(12., 2., 128., 68.));
    }

    #[test]
    fn start_padding_flips_under_rtl() {
        let padding = PaddingValues::new(Dp(10.), Dp(0.), Dp(2.), Dp(0.));
        let revealable = revealable(RevealShape::Rect, padding);

        let ltr = revealable.compute_area(Density::default(), LayoutDirection::Ltr, DpOffset::ZERO);
        assert_eq!(ltr, Rect::from_ltrb(0., 20., 112., 70.));

        let rtl = revealable.compute_area(Density::default(), LayoutDirection::Rtl, DpOffset::ZERO);
        assert_eq!(rtl, Rect::from_ltrb(8., 20., 120., 70.));
    }

    #[test]
    fn circle_encloses_padded_rect() {
        let area = revealable(RevealShape::Circle, PaddingValues::all(Dp(0.))).compute_area(
            Density::default(),
            LayoutDirection::Ltr,
            DpOffset::ZERO,
        );
        assert_eq!(area, Rect::from_ltrb(10., -5., 110., 95.));
    }

    #[test]
    fn outline_is_translated_to_area() {
        let actual = revealable(RevealShape::Circle, PaddingValues::all(Dp(0.))).resolve(
            Density::default(),
            LayoutDirection::Ltr,
            DpOffset::ZERO,
        );
        assert_eq!(
            actual.outline(Density::default(), LayoutDirection::Ltr),
            Outline::Oval(Rect::from_ltrb(10., -5., 110., 95.))
        );
        assert_eq!(actual.int_area(), IntRect::new(10, -5, 110, 95));
    }
}
