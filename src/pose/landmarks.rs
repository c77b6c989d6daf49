//! Landmark frame model shared with the external pose detector
//!
//! The detector delivers 33 body keypoints per frame with coordinates
//! normalized to [0,1] relative to the frame size. An empty landmark list
//! is the "no pose detected" signal, not an error.

use serde::{Deserialize, Serialize};

/// Number of keypoints in a full landmark set
pub const LANDMARK_COUNT: usize = 33;

// Anatomical indices (fixed detector convention)
pub const NOSE: usize = 0;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

/// A single keypoint with normalized coordinates
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, 0-1 normalized
    pub x: f32,
    /// Vertical position, 0-1 normalized
    pub y: f32,
    /// Detector confidence for this point (carried, not interpreted)
    #[serde(default)]
    pub visibility: f32,
}

/// One frame's worth of detector output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LandmarkFrame {
    /// Source frame width in pixels
    pub width: u32,
    /// Source frame height in pixels
    pub height: u32,
    /// Detected keypoints; empty when no pose was found in the frame
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
}

impl LandmarkFrame {
    /// Whether the detector found a pose in this frame
    pub fn has_pose(&self) -> bool {
        !self.landmarks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frame_has_no_pose() {
        let frame = LandmarkFrame {
            width: 640,
            height: 480,
            landmarks: vec![],
        };
        assert!(!frame.has_pose());
    }

    #[test]
    fn test_frame_deserializes_without_landmarks_field() {
        let frame: LandmarkFrame = serde_json::from_str(r#"{"width":640,"height":480}"#).unwrap();
        assert_eq!(frame.width, 640);
        assert!(!frame.has_pose());
    }

    #[test]
    fn test_frame_deserializes_landmarks() {
        let frame: LandmarkFrame = serde_json::from_str(
            r#"{"width":1280,"height":720,"landmarks":[{"x":0.5,"y":0.25,"visibility":0.9}]}"#,
        )
        .unwrap();
        assert!(frame.has_pose());
        assert!((frame.landmarks[0].x - 0.5).abs() < f32::EPSILON);
    }
}
