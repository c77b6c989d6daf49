//! Pose Scoring: landmark geometry and per-pose accuracy formulas
//!
//! # Components
//! - `landmarks.rs`: Landmark frame model and anatomical index constants
//! - `geometry.rs`: Point lookup, distance, and joint-angle computation
//! - `config.rs`: Per-level weight and tolerance tables
//! - `scorer.rs`: Per-level accuracy formulas (0-100 with sub-scores)

pub mod config;
pub mod geometry;
pub mod landmarks;
pub mod scorer;

pub use config::PoseConfig;
pub use landmarks::{Landmark, LandmarkFrame};
pub use scorer::PoseScore;

/// The five poses, ordered by progression level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PoseLevel {
    Mountain = 1,
    Tree = 2,
    Warrior = 3,
    Child = 4,
    Lotus = 5,
}

impl PoseLevel {
    /// All levels in progression order
    pub const ALL: [PoseLevel; 5] = [
        PoseLevel::Mountain,
        PoseLevel::Tree,
        PoseLevel::Warrior,
        PoseLevel::Child,
        PoseLevel::Lotus,
    ];

    /// Level number shown to the user (1-5)
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Parse a user-facing level number; out-of-range values are rejected
    pub fn from_number(n: u8) -> Option<PoseLevel> {
        match n {
            1 => Some(PoseLevel::Mountain),
            2 => Some(PoseLevel::Tree),
            3 => Some(PoseLevel::Warrior),
            4 => Some(PoseLevel::Child),
            5 => Some(PoseLevel::Lotus),
            _ => None,
        }
    }

    /// The level after this one; completing Lotus wraps back to Mountain
    pub fn next(&self) -> PoseLevel {
        match self {
            PoseLevel::Mountain => PoseLevel::Tree,
            PoseLevel::Tree => PoseLevel::Warrior,
            PoseLevel::Warrior => PoseLevel::Child,
            PoseLevel::Child => PoseLevel::Lotus,
            PoseLevel::Lotus => PoseLevel::Mountain,
        }
    }

    pub fn is_last(&self) -> bool {
        matches!(self, PoseLevel::Lotus)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PoseLevel::Mountain => "MOUNTAIN POSE (Tadasana)",
            PoseLevel::Tree => "TREE POSE (Vrikshasana)",
            PoseLevel::Warrior => "WARRIOR POSE (Virabhadrasana)",
            PoseLevel::Child => "CHILD'S POSE (Balasana)",
            PoseLevel::Lotus => "LOTUS POSE (Padmasana)",
        }
    }

    /// How long the pose must be held continuously to complete the level
    pub fn hold_secs(&self) -> f32 {
        match self {
            PoseLevel::Mountain => 2.0,
            PoseLevel::Tree => 3.0,
            PoseLevel::Warrior => 2.5,
            PoseLevel::Child => 2.0,
            PoseLevel::Lotus => 3.0,
        }
    }
}
