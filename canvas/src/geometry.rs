//! Floor-local geometry: points, sizes, and the bounds clamp.
//!
//! Every committed object position goes through [`clamp`] so the object's full
//! extent stays inside its floor. The clamp is total: an object larger than
//! the container is pinned to the origin rather than producing a negative
//! coordinate.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// A point in floor-local coordinates (origin at the floor's top-left corner).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate this point by a delta.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Width and height of an object or container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Half extents, used to center an object under a point.
    #[must_use]
    pub fn half(self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Clamp a proposed top-left corner so a `width` x `height` rectangle stays
/// inside a `container_width` x `container_height` container.
///
/// Computed as `max(0, min(proposed, container - size))` per axis.
#[must_use]
pub fn clamp(
    proposed_x: f64,
    proposed_y: f64,
    width: f64,
    height: f64,
    container_width: f64,
    container_height: f64,
) -> (f64, f64) {
    (clamp_axis(proposed_x, width, container_width), clamp_axis(proposed_y, height, container_height))
}

/// [`clamp`] expressed over [`Point`] and [`Size`].
#[must_use]
pub fn clamp_point(proposed: Point, size: Size, container: Size) -> Point {
    let (x, y) = clamp(proposed.x, proposed.y, size.width, size.height, container.width, container.height);
    Point { x, y }
}

/// Whether the rectangle at `origin` with `size` lies fully inside `container`.
#[must_use]
pub fn is_within(origin: Point, size: Size, container: Size) -> bool {
    origin.x >= 0.0
        && origin.y >= 0.0
        && origin.x + size.width <= container.width
        && origin.y + size.height <= container.height
}

fn clamp_axis(proposed: f64, extent: f64, container: f64) -> f64 {
    proposed.min(container - extent).max(0.0)
}
