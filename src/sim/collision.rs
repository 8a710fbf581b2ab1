//! Collision tests for the ball against axis-aligned rectangles

use glam::DVec2;

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    pub fn square(x: f64, y: f64, size: f64) -> Self {
        Self::new(x, y, size, size)
    }

    #[inline]
    pub fn max(&self) -> DVec2 {
        self.min + self.size
    }

    /// Point of the rectangle closest to `p`
    #[inline]
    pub fn closest_point(&self, p: DVec2) -> DVec2 {
        p.min(self.max()).max(self.min)
    }
}

/// Check whether a circle touches or overlaps a rectangle
///
/// Uses the closest point on the rectangle to the circle center, so corners
/// are handled exactly. Touching (distance == radius) counts as a hit.
#[inline]
pub fn circle_rect_collision(center: DVec2, radius: f64, rect: &Rect) -> bool {
    let d = center - rect.closest_point(center);
    d.length_squared() <= radius * radius
}
