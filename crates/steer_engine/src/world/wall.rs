//! Boundary wall segments

use crate::foundation::math::SteeringVector;
use crate::geometry::{direction, GeometryError};

/// A wall segment agents steer away from.
///
/// The normal is computed once at construction as the start→end direction
/// rotated 90° in the steering plane. Mutating the endpoints afterwards
/// does NOT refresh the normal; callers that move a wall must also call
/// [`Wall::set_normal`] if they care about avoidance pushing the right way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall<V> {
    start: V,
    end: V,
    normal: V,
}

impl<V: SteeringVector> Wall<V> {
    /// Create a new wall from its endpoints.
    ///
    /// Fails with [`GeometryError::DegenerateDirection`] when the endpoints
    /// coincide, since no normal exists for a zero-length segment.
    pub fn new(start: V, end: V) -> Result<Self, GeometryError> {
        let normal = direction(end - start)?.perp();
        Ok(Self { start, end, normal })
    }

    /// Start position of the wall
    pub fn start(&self) -> V {
        self.start
    }

    /// End position of the wall
    pub fn end(&self) -> V {
        self.end
    }

    /// Unit vector perpendicular to the wall, fixed at construction
    pub fn normal(&self) -> V {
        self.normal
    }

    /// Move the start point. The stored normal is left untouched.
    pub fn set_start(&mut self, start: V) {
        self.start = start;
    }

    /// Move the end point. The stored normal is left untouched.
    pub fn set_end(&mut self, end: V) {
        self.end = end;
    }

    /// Override the wall normal
    pub fn set_normal(&mut self, normal: V) {
        self.normal = normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use approx::assert_relative_eq;

    #[test]
    fn test_normal_is_ninety_degrees_from_span() {
        let wall = Wall::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)).unwrap();
        assert_relative_eq!(wall.normal().x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(wall.normal().y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_length_wall_is_rejected() {
        let p = Vec2::new(3.0, 3.0);
        assert_eq!(Wall::new(p, p), Err(GeometryError::DegenerateDirection));
    }

    #[test]
    fn test_moving_endpoints_keeps_stale_normal() {
        let mut wall = Wall::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)).unwrap();
        let before = wall.normal();
        wall.set_end(Vec2::new(0.0, 10.0));
        assert_eq!(wall.normal(), before);
    }
}
