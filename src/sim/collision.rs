//! Circle overlap and canvas bounds tests

use super::entity::Circle;

/// Gap between two circles' edges (negative when overlapping)
#[inline]
pub fn edge_gap(a: &Circle, b: &Circle) -> f32 {
    a.pos.distance(b.pos) - a.radius - b.radius
}

/// Whether two circles touch or overlap (boundary inclusive)
#[inline]
pub fn circles_touch(a: &Circle, b: &Circle) -> bool {
    edge_gap(a, b) <= 0.0
}

/// Whether any part of the circle has crossed a canvas edge
pub fn crosses_canvas_edge(c: &Circle, width: f32, height: f32) -> bool {
    c.pos.x - c.radius < 0.0
        || c.pos.x + c.radius > width
        || c.pos.y - c.radius < 0.0
        || c.pos.y + c.radius > height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Color;
    use glam::Vec2;
    use proptest::prelude::*;

    fn circle(x: f32, y: f32, r: f32) -> Circle {
        Circle::new(Vec2::new(x, y), r, Color::WHITE)
    }

    #[test]
    fn test_overlapping_circles_touch() {
        let projectile = circle(100.0, 100.0, 5.0);
        let enemy = circle(103.0, 100.0, 3.0);
        assert_eq!(edge_gap(&projectile, &enemy), -5.0);
        assert!(circles_touch(&projectile, &enemy));
    }

    #[test]
    fn test_exact_contact_counts() {
        assert!(circles_touch(&circle(0.0, 0.0, 5.0), &circle(8.0, 0.0, 3.0)));
        assert!(!circles_touch(&circle(0.0, 0.0, 5.0), &circle(8.5, 0.0, 3.0)));
    }

    #[test]
    fn test_canvas_edges() {
        assert!(!crosses_canvas_edge(&circle(400.0, 300.0, 5.0), 800.0, 600.0));
        assert!(!crosses_canvas_edge(&circle(5.0, 5.0, 5.0), 800.0, 600.0));
        assert!(crosses_canvas_edge(&circle(4.0, 300.0, 5.0), 800.0, 600.0));
        assert!(crosses_canvas_edge(&circle(796.0, 300.0, 5.0), 800.0, 600.0));
        assert!(crosses_canvas_edge(&circle(400.0, 4.0, 5.0), 800.0, 600.0));
        assert!(crosses_canvas_edge(&circle(400.0, 596.0, 5.0), 800.0, 600.0));
    }

    proptest! {
        #[test]
        fn prop_touch_matches_radius_sum(
            dx in -50i32..50, dy in -50i32..50, ra in 1i32..20, rb in 1i32..20,
        ) {
            // Integer inputs keep the distance comparison exact
            let a = circle(0.0, 0.0, ra as f32);
            let b = circle(dx as f32, dy as f32, rb as f32);
            let d2 = dx * dx + dy * dy;
            let sum = ra + rb;
            prop_assert_eq!(circles_touch(&a, &b), d2 <= sum * sum);
        }
    }
}
