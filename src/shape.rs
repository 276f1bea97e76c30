//! Reveal area shapes.

use crate::rect::Rect;
use crate::unit::{Density, Dp, LayoutDirection};
use cgmath::{Point2, Vector2};
use core::fmt;
use std::sync::Arc;

/// A resolved clip outline, ready to be handed to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    Rect(Rect),
    /// An ellipse inscribed in the rectangle.
    Oval(Rect),
    RoundRect {
        rect: Rect,
        corner_radius: f64,
    },
    /// A closed polygon.
    Polygon(Vec<Point2<f64>>),
}

impl Outline {
    /// Returns the outline moved by `offset`.
    pub fn translate(self, offset: Vector2<f64>) -> Outline {
        match self {
            Outline::Rect(rect) => Outline::Rect(rect + offset),
            Outline::Oval(rect) => Outline::Oval(rect + offset),
            Outline::RoundRect {
                rect,
                corner_radius,
            } => Outline::RoundRect {
                rect: rect + offset,
                corner_radius,
            },
            Outline::Polygon(points) => {
                Outline::Polygon(points.into_iter().map(|p| p + offset).collect())
            }
        }
    }

    /// Returns the bounding box.
    pub fn bounds(&self) -> Rect {
        match self {
            Outline::Rect(rect) | Outline::Oval(rect) | Outline::RoundRect { rect, .. } => *rect,
            Outline::Polygon(points) => {
                let mut iter = points.iter();
                let first = match iter.next() {
                    Some(first) => *first,
                    None => return Rect::zero(),
                };
                let (min, max) = iter.fold((first, first), |(min, max), p| {
                    (
                        Point2::new(min.x.min(p.x), min.y.min(p.y)),
                        Point2::new(max.x.max(p.x), max.y.max(p.y)),
                    )
                });
                Rect::from_ltrb(min.x, min.y, max.x, max.y)
            }
        }
    }
}

/// Signature of a custom clip function.
///
/// Receives the size of the reveal area and returns an outline in the area's local coordinate
/// space, with the origin at the area's top left corner.
pub type ClipFn = dyn Fn(Vector2<f64>, Density, LayoutDirection) -> Outline + Send + Sync;

/// Shape of the reveal area.
#[derive(Clone)]
pub enum RevealShape {
    Rect,

    /// A circle that encloses the padded element bounds.
    ///
    /// The reveal area of a circle is always square; see
    /// [`Revealable::compute_area`](crate::Revealable::compute_area).
    Circle,

    /// A rectangle with rounded corners of the given radius.
    RoundRect(Dp),

    Custom(Arc<ClipFn>),
}

impl RevealShape {
    /// Creates a custom shape.
    pub fn custom<F>(clip: F) -> RevealShape
    where
        F: Fn(Vector2<f64>, Density, LayoutDirection) -> Outline + Send + Sync + 'static,
    {
        RevealShape::Custom(Arc::new(clip))
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, RevealShape::Circle)
    }

    /// Returns the outline of an area with the given size in local coordinates.
    pub fn clip(&self, size: Vector2<f64>, density: Density, direction: LayoutDirection) -> Outline {
        let rect = Rect::new(Point2::new(0., 0.), size);
        match self {
            RevealShape::Rect => Outline::Rect(rect),
            RevealShape::Circle => Outline::Oval(rect),
            RevealShape::RoundRect(corner) => Outline::RoundRect {
                rect,
                corner_radius: corner.to_px(density),
            },
            RevealShape::Custom(clip) => clip(size, density, direction),
        }
    }
}

impl Default for RevealShape {
    fn default() -> Self {
        RevealShape::RoundRect(Dp(4.))
    }
}

impl fmt::Debug for RevealShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RevealShape::Rect => write!(f, "Rect"),
            RevealShape::Circle => write!(f, "Circle"),
            RevealShape::RoundRect(corner) => write!(f, "RoundRect({:?})", corner),
            RevealShape::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl PartialEq for RevealShape {
    fn eq(&self, other: &RevealShape) -> bool {
        match (self, other) {
            (RevealShape::Rect, RevealShape::Rect) => true,
            (RevealShape::Circle, RevealShape::Circle) => true,
            (RevealShape::RoundRect(a), RevealShape::RoundRect(b)) => a == b,
            (RevealShape::Custom(a), RevealShape::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
