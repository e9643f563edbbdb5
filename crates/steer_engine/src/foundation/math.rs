//! Math utilities and types
//!
//! Provides the fundamental vector types for 2D and 3D steering, plus the
//! [`SteeringVector`] abstraction that lets the behaviour pipeline run over
//! either space with one implementation.

use rand::Rng;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

pub use nalgebra::{Rotation2, Rotation3, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;

    /// Below this length a vector is treated as directionless
    pub const EPSILON_LENGTH: f32 = 1e-6;
}

/// Vector operations the steering pipeline needs, implemented for both
/// [`Vec2`] and [`Vec3`].
///
/// The two spaces differ in a few places beyond arithmetic:
/// - planar rotation happens about +Z in 2D (screen space) and about +Y in
///   3D (ground plane), used for feeler rays and wall normals;
/// - wall and obstacle avoidance only run in 2D ([`Self::PLANAR_AVOIDANCE`]);
/// - in 3D the wander behaviour takes part in the per-tick neighbour
///   refresh ([`Self::WANDER_REFRESHES_NEIGHBOURS`]).
pub trait SteeringVector:
    Copy
    + PartialEq
    + std::fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<f32, Output = Self>
    + Div<f32, Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign<f32>
    + DivAssign<f32>
    + Send
    + Sync
    + 'static
{
    /// Whether the wall/obstacle avoidance behaviours run in this space
    const PLANAR_AVOIDANCE: bool;

    /// Whether an enabled wander behaviour triggers the neighbour refresh
    const WANDER_REFRESHES_NEIGHBOURS: bool;

    /// The zero vector
    fn zeros() -> Self;

    /// Dot product
    fn dot(&self, other: &Self) -> f32;

    /// Squared length
    fn magnitude_squared(&self) -> f32;

    /// Length
    fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Normalized copy, or `None` when the vector is too short to carry a
    /// direction
    fn try_direction(&self) -> Option<Self>;

    /// Rotation in the steering plane (about +Z in 2D, about +Y in 3D)
    fn rotated(&self, radians: f32) -> Self;

    /// 2D cross product taken in the steering plane; used by the
    /// segment/segment intersection test
    fn planar_cross(&self, other: &Self) -> f32;

    /// Uniform random vector with each planar component in
    /// `[-magnitude, magnitude]`
    fn jitter<R: Rng>(rng: &mut R, magnitude: f32) -> Self;

    /// Perpendicular of this vector in the steering plane (90° rotation)
    fn perp(&self) -> Self {
        self.rotated(std::f32::consts::FRAC_PI_2)
    }
}

impl SteeringVector for Vec2 {
    const PLANAR_AVOIDANCE: bool = true;
    const WANDER_REFRESHES_NEIGHBOURS: bool = false;

    fn zeros() -> Self {
        Vector2::zeros()
    }

    fn dot(&self, other: &Self) -> f32 {
        Vector2::dot(self, other)
    }

    fn magnitude_squared(&self) -> f32 {
        self.norm_squared()
    }

    fn try_direction(&self) -> Option<Self> {
        self.try_normalize(constants::EPSILON_LENGTH)
    }

    fn rotated(&self, radians: f32) -> Self {
        Rotation2::new(radians) * self
    }

    fn planar_cross(&self, other: &Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    fn jitter<R: Rng>(rng: &mut R, magnitude: f32) -> Self {
        Vector2::new(
            rng.gen_range(-1.0..=1.0f32) * magnitude,
            rng.gen_range(-1.0..=1.0f32) * magnitude,
        )
    }
}

impl SteeringVector for Vec3 {
    const PLANAR_AVOIDANCE: bool = false;
    const WANDER_REFRESHES_NEIGHBOURS: bool = true;

    fn zeros() -> Self {
        Vector3::zeros()
    }

    fn dot(&self, other: &Self) -> f32 {
        Vector3::dot(self, other)
    }

    fn magnitude_squared(&self) -> f32 {
        self.norm_squared()
    }

    fn try_direction(&self) -> Option<Self> {
        self.try_normalize(constants::EPSILON_LENGTH)
    }

    fn rotated(&self, radians: f32) -> Self {
        Rotation3::from_axis_angle(&Vector3::y_axis(), radians) * self
    }

    fn planar_cross(&self, other: &Self) -> f32 {
        self.x * other.z - self.z * other.x
    }

    fn jitter<R: Rng>(rng: &mut R, magnitude: f32) -> Self {
        Vector3::new(
            rng.gen_range(-1.0..=1.0f32) * magnitude,
            rng.gen_range(-1.0..=1.0f32) * magnitude,
            rng.gen_range(-1.0..=1.0f32) * magnitude,
        )
    }
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec2};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Wrap an angle into `[-PI, PI]`
    pub fn wrap_angle(mut radians: f32) -> f32 {
        while radians < -constants::PI {
            radians += constants::TAU;
        }
        while radians > constants::PI {
            radians -= constants::TAU;
        }
        radians
    }

    /// Rotate a 2D point about the origin
    pub fn rotate_point(point: Vec2, radians: f32) -> Vec2 {
        super::Rotation2::new(radians) * point
    }

    /// Rotate a 2D point about `origin`
    pub fn rotate_around(point: Vec2, origin: Vec2, radians: f32) -> Vec2 {
        (super::Rotation2::new(radians) * point) + origin
    }

    /// Turn the current facing angle toward `face_this`, limited by
    /// `turn_speed` radians per call. Returns the new facing angle.
    pub fn turn_to_face(position: Vec2, face_this: Vec2, current_angle: f32, turn_speed: f32) -> f32 {
        let desired = (face_this.y - position.y).atan2(face_this.x - position.x);
        let difference = wrap_angle(desired - current_angle).clamp(-turn_speed, turn_speed);
        wrap_angle(current_angle + difference)
    }
}
