//! Landmark geometry: point lookup, distances, and joint angles
//!
//! All operations fail soft. Missing landmarks resolve to the frame origin
//! and degenerate angle inputs resolve to 0 degrees, so a partially
//! occluded body never aborts the scoring pass.

use super::landmarks::LandmarkFrame;

/// A point in pixel space
pub type Point = (f32, f32);

/// Look up a landmark and scale it to pixel coordinates.
/// Out-of-range indices resolve to (0, 0).
pub fn point_at(frame: &LandmarkFrame, index: usize) -> Point {
    match frame.landmarks.get(index) {
        Some(lm) => (lm.x * frame.width as f32, lm.y * frame.height as f32),
        None => (0.0, 0.0),
    }
}

/// Euclidean distance between two pixel-space points
pub fn distance(p1: Point, p2: Point) -> f32 {
    ((p1.0 - p2.0).powi(2) + (p1.1 - p2.1).powi(2)).sqrt()
}

/// Midpoint of two pixel-space points
pub fn midpoint(p1: Point, p2: Point) -> Point {
    ((p1.0 + p2.0) / 2.0, (p1.1 + p2.1) / 2.0)
}

/// Interior angle at vertex `p1` formed by the rays to `p0` and `p2`,
/// via the law of cosines. Degrees, truncated to an integer.
///
/// A zero-length segment makes the angle undefined; that case yields 0
/// rather than an error.
pub fn angle_at(p0: Point, p1: Point, p2: Point) -> i32 {
    let a = (p1.0 - p0.0).powi(2) + (p1.1 - p0.1).powi(2);
    let b = (p1.0 - p2.0).powi(2) + (p1.1 - p2.1).powi(2);
    let c = (p2.0 - p0.0).powi(2) + (p2.1 - p0.1).powi(2);

    let denom = (4.0 * a * b).sqrt();
    if denom <= f32::EPSILON {
        return 0;
    }

    let cos_angle = ((a + b - c) / denom).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::landmarks::Landmark;

    fn frame_with(landmarks: Vec<Landmark>) -> LandmarkFrame {
        LandmarkFrame {
            width: 640,
            height: 480,
            landmarks,
        }
    }

    #[test]
    fn test_point_at_scales_to_pixels() {
        let frame = frame_with(vec![Landmark {
            x: 0.5,
            y: 0.25,
            visibility: 1.0,
        }]);
        assert_eq!(point_at(&frame, 0), (320.0, 120.0));
    }

    #[test]
    fn test_point_at_out_of_range_is_origin() {
        let frame = frame_with(vec![]);
        assert_eq!(point_at(&frame, 11), (0.0, 0.0));
    }

    #[test]
    fn test_distance_three_four_five() {
        assert!((distance((0.0, 0.0), (3.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_angle_straight_line() {
        // Collinear points form a 180 degree angle at the middle point
        let angle = angle_at((0.0, 0.0), (50.0, 0.0), (100.0, 0.0));
        assert_eq!(angle, 180);
    }

    #[test]
    fn test_angle_right_angle() {
        let angle = angle_at((0.0, 0.0), (50.0, 0.0), (50.0, 50.0));
        assert_eq!(angle, 90);
    }

    #[test]
    fn test_angle_degenerate_segment_is_zero() {
        // p0 coincides with the vertex: no ray, no angle
        assert_eq!(angle_at((50.0, 0.0), (50.0, 0.0), (100.0, 0.0)), 0);
        assert_eq!(angle_at((0.0, 0.0), (0.0, 0.0), (0.0, 0.0)), 0);
    }
}
