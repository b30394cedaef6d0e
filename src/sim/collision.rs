//! Overlap tests
//!
//! Every gameplay entity is a circle; walls and doors are rectangles tested
//! against the avatar's centre point.

use glam::Vec2;

use super::entities::Rect;

/// Circles overlap when their centres are closer than the sum of radii
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Whether a point lies inside any of the rectangles
pub fn point_in_any(point: Vec2, rects: impl IntoIterator<Item = Rect>) -> bool {
    rects.into_iter().any(|r| r.contains_point(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_touching_do_not_overlap() {
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.9, 0.0), 5.0));
    }

    #[test]
    fn test_circles_overlap_diagonal() {
        // distance 5
        assert!(circles_overlap(Vec2::ZERO, 3.0, Vec2::new(3.0, 4.0), 2.5));
        assert!(!circles_overlap(Vec2::ZERO, 3.0, Vec2::new(3.0, 4.0), 2.0));
    }

    #[test]
    fn test_point_in_any() {
        let rects = [Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(50.0, 50.0, 10.0, 10.0)];
        assert!(point_in_any(Vec2::new(55.0, 55.0), rects));
        assert!(!point_in_any(Vec2::new(30.0, 30.0), rects));
    }
}
