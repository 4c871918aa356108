//! Collision primitives
//!
//! Stateless box/circle/point tests. Entities derive a `Rect` from their
//! current position on demand; nothing here stores geometry.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box of the given size centered on `center`
    #[inline]
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(
            center.x - size.x / 2.0,
            center.y - size.y / 2.0,
            size.x,
            size.y,
        )
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Circle for radius-based hit tests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// Overlap on both axes. Touching edges do not count.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Center distance strictly less than the sum of radii
#[inline]
pub fn circles_intersect(a: &Circle, b: &Circle) -> bool {
    a.center.distance(b.center) < a.radius + b.radius
}

/// Inclusive containment on all four edges
#[inline]
pub fn point_in_box(point: Vec2, rect: &Rect) -> bool {
    point.x >= rect.x && point.x <= rect.right() && point.y >= rect.y && point.y <= rect.bottom()
}

/// Broad-phase test for fast movers.
///
/// Inflates `b` by `|velocity|` on each axis before the overlap check, so a
/// mover that would skip past `b` within one step still registers. The engine
/// uses plain `intersects`; this is available for callers that need it.
pub fn swept_intersects(a: &Rect, b: &Rect, velocity: Vec2) -> bool {
    let v = velocity.abs();
    let expanded = Rect::new(
        b.x - v.x,
        b.y - v.y,
        b.width + v.x * 2.0,
        b.height + v.y * 2.0,
    );
    intersects(a, &expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_boxes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(intersects(&a, &b));
        assert!(intersects(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!intersects(&a, &right));
        assert!(!intersects(&a, &below));
    }

    #[test]
    fn test_overlap_needs_both_axes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 20.0, 10.0, 10.0);
        assert!(!intersects(&a, &b));
    }

    #[test]
    fn test_centered_box() {
        let r = Rect::centered(Vec2::new(100.0, 50.0), Vec2::new(20.0, 10.0));
        assert_eq!(r, Rect::new(90.0, 45.0, 20.0, 10.0));
        assert_eq!(r.center(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_circles() {
        let a = Circle {
            center: Vec2::ZERO,
            radius: 5.0,
        };
        let near = Circle {
            center: Vec2::new(9.0, 0.0),
            radius: 5.0,
        };
        let touching = Circle {
            center: Vec2::new(10.0, 0.0),
            radius: 5.0,
        };
        assert!(circles_intersect(&a, &near));
        assert!(!circles_intersect(&a, &touching));
    }

    #[test]
    fn test_point_in_box_is_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(point_in_box(Vec2::new(0.0, 0.0), &r));
        assert!(point_in_box(Vec2::new(10.0, 10.0), &r));
        assert!(point_in_box(Vec2::new(5.0, 5.0), &r));
        assert!(!point_in_box(Vec2::new(10.1, 5.0), &r));
    }

    #[test]
    fn test_swept_catches_tunneling() {
        // Bullet sits just past the target after a 20px step
        let bullet = Rect::new(0.0, -18.0, 6.0, 15.0);
        let target = Rect::new(0.0, 0.0, 25.0, 25.0);
        assert!(!intersects(&bullet, &target));
        assert!(swept_intersects(&bullet, &target, Vec2::new(0.0, -20.0)));
    }

    proptest! {
        #[test]
        fn prop_intersects_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 0.1f32..100.0, ah in 0.1f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 0.1f32..100.0, bh in 0.1f32..100.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }

        #[test]
        fn prop_swept_is_conservative(
            ax in -200.0f32..200.0, ay in -200.0f32..200.0,
            bx in -200.0f32..200.0, by in -200.0f32..200.0,
            vx in -30.0f32..30.0, vy in -30.0f32..30.0,
        ) {
            let a = Rect::new(ax, ay, 6.0, 15.0);
            let b = Rect::new(bx, by, 25.0, 25.0);
            if intersects(&a, &b) {
                prop_assert!(swept_intersects(&a, &b, Vec2::new(vx, vy)));
            }
        }
    }
}
