//! Rectangles.

use cgmath::{Point2, Vector2, Zero};
use core::ops;

/// A rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Rectangle origin.
    pub origin: Point2<f64>,

    /// Rectangle size.
    pub size: Vector2<f64>,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(origin: Point2<f64>, size: Vector2<f64>) -> Rect {
        Rect { origin, size }
    }

    /// Returns a zero-sized rectangle at the origin.
    pub fn zero() -> Rect {
        Rect {
            origin: Point2::new(0., 0.),
            size: Vector2::zero(),
        }
    }

    /// Creates a rectangle from its four edges.
    pub fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Rect {
        Rect {
            origin: Point2::new(left, top),
            size: Vector2::new(right - left, bottom - top),
        }
    }

    /// Returns the square that bounds a circle with the given center and radius.
    pub fn from_center_radius(center: Point2<f64>, radius: f64) -> Rect {
        Rect::from_ltrb(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    pub fn left(&self) -> f64 {
        self.origin.x
    }

    pub fn top(&self) -> f64 {
        self.origin.y
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.size.x
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.y
    }

    pub fn width(&self) -> f64 {
        self.size.x
    }

    pub fn height(&self) -> f64 {
        self.size.y
    }

    /// Returns the larger of width and height.
    pub fn max_dimension(&self) -> f64 {
        self.size.x.abs().max(self.size.y.abs())
    }

    /// Returns the center point.
    pub fn center(&self) -> Point2<f64> {
        self.origin + self.size / 2.
    }

    /// Returns true if the point is inside the rectangle.
    ///
    /// Left and top edges are inclusive, right and bottom edges are exclusive.
    pub fn contains(&self, point: Point2<f64>) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x < self.origin.x + self.size.x
            && point.y < self.origin.y + self.size.y
    }

    /// Snaps the rectangle to whole pixels by truncating each edge toward zero.
    pub fn to_int_rect(&self) -> IntRect {
        IntRect {
            left: self.left() as i32,
            top: self.top() as i32,
            right: self.right() as i32,
            bottom: self.bottom() as i32,
        }
    }
}

impl ops::Add<Vector2<f64>> for Rect {
    type Output = Rect;
    fn add(self, offset: Vector2<f64>) -> Rect {
        Rect {
            origin: self.origin + offset,
            size: self.size,
        }
    }
}

/// A pixel-snapped rectangle, stored as edges.
///
/// Edges are not normalized: `right < left` yields a negative width, which
/// consumers clamp where a size is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl IntRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> IntRect {
        IntRect {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Returns the size with negative extents clamped to zero.
    pub fn size(&self) -> IntSize {
        IntSize::new(self.width().max(0), self.height().max(0))
    }
}

/// A size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntSize {
    pub width: i32,
    pub height: i32,
}

impl IntSize {
    pub fn new(width: i32, height: i32) -> IntSize {
        IntSize { width, height }
    }
}
