//! Segment and triangle intersection tests
//!
//! The segment/segment test is the workhorse of wall avoidance: it is the
//! standard parametric form where the two segments `a→b` and `c→d` intersect
//! iff both parameters fall strictly inside `(0, 1)`. Touching endpoints and
//! collinear overlaps deliberately do NOT count as intersections.

use crate::foundation::math::{SteeringVector, Vec2};

/// Result of a segment/segment intersection test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit<V> {
    /// Distance from the first segment's start to the intersection point
    pub distance: f32,
    /// The intersection point
    pub point: V,
}

/// Intersect segment `a→b` with segment `c→d`.
///
/// Returns `None` for parallel segments and for any contact that is not a
/// strict crossing (`0 < r < 1` and `0 < s < 1`).
pub fn segment_intersection<V: SteeringVector>(a: V, b: V, c: V, d: V) -> Option<SegmentHit<V>> {
    let r_top = (d - c).planar_cross(&(a - c));
    let r_bot = (b - a).planar_cross(&(d - c));
    let s_top = (b - a).planar_cross(&(a - c));
    let s_bot = r_bot;

    if r_bot == 0.0 || s_bot == 0.0 {
        // parallel segments
        return None;
    }

    let r = r_top / r_bot;
    let s = s_top / s_bot;

    if r > 0.0 && r < 1.0 && s > 0.0 && s < 1.0 {
        Some(SegmentHit {
            distance: (b - a).magnitude() * r,
            point: a + (b - a) * r,
        })
    } else {
        None
    }
}

/// Test whether point `p` lies inside the triangle spanned by `tri`.
pub fn point_in_triangle(tri: &[Vec2; 3], p: Vec2) -> bool {
    let e0 = p - tri[0];
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];

    let (u, v);
    if e1.x == 0.0 {
        if e2.x == 0.0 {
            return false;
        }
        u = e0.x / e2.x;
        if !(0.0..=1.0).contains(&u) {
            return false;
        }
        if e1.y == 0.0 {
            return false;
        }
        v = (e0.y - e2.y * u) / e1.y;
        if v < 0.0 {
            return false;
        }
    } else {
        let d = e2.y * e1.x - e2.x * e1.y;
        if d == 0.0 {
            return false;
        }
        u = (e0.y * e1.x - e0.x * e1.y) / d;
        if !(0.0..=1.0).contains(&u) {
            return false;
        }
        v = (e0.x - e2.x * u) / e1.x;
        if v < 0.0 {
            return false;
        }
        if u + v > 1.0 {
            return false;
        }
    }
    true
}

/// Test whether two triangles overlap (any vertex of one inside the other).
pub fn triangles_overlap(a: &[Vec2; 3], b: &[Vec2; 3]) -> bool {
    b.iter().any(|&p| point_in_triangle(a, p)) || a.iter().any(|&p| point_in_triangle(b, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_crossing_segments_intersect() {
        let hit = segment_intersection(
            Vec2::new(0.0, -1.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
        )
        .expect("segments cross");
        assert_relative_eq!(hit.point.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(hit.point.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(hit.distance, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_parallel_segments_do_not_intersect() {
        assert!(segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn test_touching_endpoints_do_not_count() {
        // the second segment starts exactly on the first; s == 0 is excluded
        assert!(segment_intersection(
            Vec2::new(0.0, -1.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn test_disjoint_segments_do_not_intersect() {
        assert!(segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(6.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn test_point_in_triangle() {
        let tri = [Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0)];
        assert!(point_in_triangle(&tri, Vec2::new(1.0, 1.0)));
        assert!(!point_in_triangle(&tri, Vec2::new(3.0, 3.0)));
    }

    #[test]
    fn test_triangles_overlap() {
        let a = [Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0)];
        let b = [Vec2::new(1.0, 1.0), Vec2::new(5.0, 1.0), Vec2::new(1.0, 5.0)];
        let c = [
            Vec2::new(10.0, 10.0),
            Vec2::new(11.0, 10.0),
            Vec2::new(10.0, 11.0),
        ];
        assert!(triangles_overlap(&a, &b));
        assert!(!triangles_overlap(&a, &c));
    }
}
