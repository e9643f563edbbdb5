//! Geometric primitives and queries for steering and collision detection
//!
//! Everything here is pure computation over positions: segment intersection,
//! point/triangle containment and the assorted overlap tests the simulation
//! layer builds on.

pub mod intersection;
pub mod overlap;

pub use intersection::{point_in_triangle, segment_intersection, triangles_overlap, SegmentHit};
pub use overlap::{
    circles_overlap, clamp_to_bounds, is_near_target, masks_overlap, nearest_boundary_side,
    outside_bounds, rects_overlap, PixelRect, Side,
};

use crate::foundation::math::SteeringVector;
use thiserror::Error;

/// Degenerate geometric input
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// A direction was required but the vector has (near-)zero length
    #[error("zero-length vector where a direction is required")]
    DegenerateDirection,

    /// An average was required but the set is empty
    #[error("average of an empty set")]
    EmptyAverage,
}

/// Normalized copy of `v`, or [`GeometryError::DegenerateDirection`] when
/// `v` is too short to carry a direction.
pub fn direction<V: SteeringVector>(v: V) -> Result<V, GeometryError> {
    v.try_direction().ok_or(GeometryError::DegenerateDirection)
}

/// Arithmetic mean of `points`, or [`GeometryError::EmptyAverage`] when
/// the slice is empty.
pub fn centroid<V: SteeringVector>(points: &[V]) -> Result<V, GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::EmptyAverage);
    }
    let mut sum = V::zeros();
    for point in points {
        sum += *point;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = points.len() as f32;
    Ok(sum / count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;

    #[test]
    fn test_direction_of_zero_vector_is_an_error() {
        assert_eq!(
            direction(Vec2::zeros()),
            Err(GeometryError::DegenerateDirection)
        );
    }

    #[test]
    fn test_centroid_of_empty_set_is_an_error() {
        assert_eq!(centroid::<Vec2>(&[]), Err(GeometryError::EmptyAverage));
    }

    #[test]
    fn test_centroid_averages_positions() {
        let c = centroid(&[Vec2::new(10.0, 0.0), Vec2::new(14.0, 2.0)]).unwrap();
        assert_eq!(c, Vec2::new(12.0, 1.0));
    }
}
