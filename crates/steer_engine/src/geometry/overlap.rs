//! Overlap tests and world-bounds checks
//!
//! Circle, axis-aligned rectangle and pixel-mask overlap, plus the helpers a
//! caller uses to keep agents inside a rectangular play area.

use crate::foundation::math::Vec2;

/// Which boundary of the play area is closest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The `x == 0` boundary
    Left,
    /// The `x == width` boundary
    Right,
    /// The `y == 0` boundary
    Up,
    /// The `y == height` boundary
    Down,
}

/// Test whether two circles overlap (strict: touching circles do not).
pub fn circles_overlap(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> bool {
    let radius_sum = radius_a + radius_b;
    (center_a - center_b).norm_squared() < radius_sum * radius_sum
}

/// Test whether two axis-aligned rectangles overlap. `min` is the top-left
/// corner, `size` the width/height extents.
pub fn rects_overlap(min_a: Vec2, size_a: Vec2, min_b: Vec2, size_b: Vec2) -> bool {
    let top = min_a.y.max(min_b.y);
    let bottom = (min_a.y + size_a.y).min(min_b.y + size_b.y);
    let left = min_a.x.max(min_b.x);
    let right = (min_a.x + size_a.x).min(min_b.x + size_b.x);
    top < bottom && left < right
}

/// Integer screen-space rectangle for pixel-mask overlap tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl PixelRect {
    /// Create a new rectangle
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn right(&self) -> i32 {
        self.x + self.width
    }

    fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Pixel-precise overlap test between two opacity masks.
///
/// Each mask is row-major `width * height`, `true` where the sprite is
/// opaque. Two sprites overlap when any pixel inside the rectangle
/// intersection is opaque in both masks.
pub fn masks_overlap(rect_a: PixelRect, mask_a: &[bool], rect_b: PixelRect, mask_b: &[bool]) -> bool {
    let top = rect_a.y.max(rect_b.y);
    let bottom = rect_a.bottom().min(rect_b.bottom());
    let left = rect_a.x.max(rect_b.x);
    let right = rect_a.right().min(rect_b.right());

    for y in top..bottom {
        for x in left..right {
            let a = mask_a[((x - rect_a.x) + (y - rect_a.y) * rect_a.width) as usize];
            let b = mask_b[((x - rect_b.x) + (y - rect_b.y) * rect_b.width) as usize];
            if a && b {
                return true;
            }
        }
    }
    false
}

/// Test whether `position` lies outside the `[0, width] x [0, height]` play
/// area.
pub fn outside_bounds(position: Vec2, width: f32, height: f32) -> bool {
    position.x < 0.0 || position.x > width || position.y < 0.0 || position.y > height
}

/// Classify which boundary `position` is within `distance` of, if any.
///
/// When the position is near two boundaries at once (a corner) the check
/// order is left, right, up, down.
pub fn nearest_boundary_side(
    position: Vec2,
    width: f32,
    height: f32,
    distance: f32,
) -> Option<Side> {
    if position.x < distance {
        Some(Side::Left)
    } else if position.x > width - distance {
        Some(Side::Right)
    } else if position.y < distance {
        Some(Side::Up)
    } else if position.y > height - distance {
        Some(Side::Down)
    } else {
        None
    }
}

/// Clamp a center position so a body with the given half extents stays
/// inside the `[0, width] x [0, height]` play area.
pub fn clamp_to_bounds(position: Vec2, half_extents: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        position.x.clamp(half_extents.x, width - half_extents.x),
        position.y.clamp(half_extents.y, height - half_extents.y),
    )
}

/// Test whether two positions are within `range` of each other (strict).
pub fn is_near_target(target: Vec2, position: Vec2, range: f32) -> bool {
    (target - position).norm() < range
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_overlap_is_strict() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert!(circles_overlap(a, 6.0, b, 6.0));
        assert!(!circles_overlap(a, 5.0, b, 5.0)); // touching
        assert!(!circles_overlap(a, 2.0, b, 2.0));
    }

    #[test]
    fn test_rect_overlap() {
        let size = Vec2::new(4.0, 4.0);
        assert!(rects_overlap(Vec2::new(0.0, 0.0), size, Vec2::new(2.0, 2.0), size));
        assert!(!rects_overlap(Vec2::new(0.0, 0.0), size, Vec2::new(5.0, 0.0), size));
    }

    #[test]
    fn test_mask_overlap_ignores_transparent_pixels() {
        // two 2x2 sprites, each opaque in one diagonal corner
        let a = PixelRect::new(0, 0, 2, 2);
        let b = PixelRect::new(1, 1, 2, 2);
        let mask_solid = vec![true; 4];
        let mask_hollow = vec![false, false, false, true];

        assert!(masks_overlap(a, &mask_solid, b, &mask_solid));
        // only b's bottom-right pixel is opaque and it lies outside a
        assert!(!masks_overlap(a, &mask_solid, b, &mask_hollow));
    }

    #[test]
    fn test_boundary_side_classification() {
        assert_eq!(
            nearest_boundary_side(Vec2::new(2.0, 50.0), 100.0, 100.0, 5.0),
            Some(Side::Left)
        );
        assert_eq!(
            nearest_boundary_side(Vec2::new(50.0, 98.0), 100.0, 100.0, 5.0),
            Some(Side::Down)
        );
        assert_eq!(
            nearest_boundary_side(Vec2::new(50.0, 50.0), 100.0, 100.0, 5.0),
            None
        );
    }

    #[test]
    fn test_clamp_to_bounds() {
        let clamped = clamp_to_bounds(Vec2::new(-3.0, 120.0), Vec2::new(8.0, 8.0), 100.0, 100.0);
        assert_eq!(clamped, Vec2::new(8.0, 92.0));
    }

    #[test]
    fn test_is_near_target() {
        assert!(is_near_target(Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0), 2.0));
        assert!(!is_near_target(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 2.0));
    }
}
