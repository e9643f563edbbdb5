//! Static obstacles

/// A static circular (2D) or spherical (3D) obstacle.
///
/// Obstacles never move; the radius comes from the attached visual bounds
/// and is supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle<V> {
    /// Center position in world space
    pub position: V,
    /// Bounding radius
    pub radius: f32,
}

impl<V> Obstacle<V> {
    /// Create a new obstacle
    pub fn new(position: V, radius: f32) -> Self {
        Self { position, radius }
    }
}
