//! Per-level weight and tolerance tables
//!
//! Every scoring formula pulls its point weights and geometric tolerances
//! from here instead of hard-coding them, so the calibration stays
//! externally adjustable. Weights sum to 100 points per level. Tolerances
//! expressed as `*_factor` are fractions of the torso distance.

use super::PoseLevel;
use serde::Deserialize;
use std::error::Error;
use std::fs;

/// Mountain Pose: feet together, relaxed shoulders, straight arms
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MountainWeights {
    pub feet: f32,
    pub shoulders: f32,
    /// Per arm; two arms are scored
    pub arm: f32,
    /// Target elbow angle for a straight arm, degrees
    pub straight_arm_deg: f32,
    /// Allowed elbow-angle deviation before an arm scores zero, degrees
    pub arm_tolerance_deg: f32,
    /// Ankle gap divisor, fraction of torso distance
    pub feet_gap_factor: f32,
    /// Shoulder gap divisor, fraction of torso distance
    pub shoulder_gap_factor: f32,
}

impl Default for MountainWeights {
    fn default() -> Self {
        MountainWeights {
            feet: 50.0,
            shoulders: 20.0,
            arm: 15.0,
            straight_arm_deg: 170.0,
            arm_tolerance_deg: 40.0,
            feet_gap_factor: 0.6,
            shoulder_gap_factor: 0.9,
        }
    }
}

/// Tree Pose: one leg raised, weight balanced on the other
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TreeWeights {
    pub leg: f32,
    pub balance: f32,
    pub standing: f32,
    /// How far above the hip an ankle must sit to count as raised,
    /// fraction of torso distance
    pub raise_factor: f32,
    /// Hip-to-ankle asymmetry divisor, fraction of torso distance
    pub balance_gap_factor: f32,
    /// Target hip-to-ankle distance of the raised leg, fraction of torso
    pub standing_target_factor: f32,
}

impl Default for TreeWeights {
    fn default() -> Self {
        TreeWeights {
            leg: 40.0,
            balance: 30.0,
            standing: 30.0,
            raise_factor: 0.35,
            balance_gap_factor: 0.6,
            standing_target_factor: 0.75,
        }
    }
}

/// Warrior Pose: deep front-knee bend, arms raised, wide stance
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WarriorWeights {
    pub leg_bend: f32,
    pub arms: f32,
    pub stance: f32,
    /// Target angle of the bent knee, degrees
    pub bent_knee_deg: f32,
    /// How far above the shoulder a wrist must sit to count as raised,
    /// fraction of torso distance
    pub arm_raise_factor: f32,
    /// Maximum knee-angle difference for a full stance score, degrees
    pub stance_spread_deg: f32,
    /// Stance points awarded when the spread limit is exceeded
    pub stance_floor: f32,
}

impl Default for WarriorWeights {
    fn default() -> Self {
        WarriorWeights {
            leg_bend: 40.0,
            arms: 30.0,
            stance: 30.0,
            bent_knee_deg: 90.0,
            arm_raise_factor: 0.4,
            stance_spread_deg: 50.0,
            stance_floor: 10.0,
        }
    }
}

/// Child's Pose: forward fold with bent knees
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ChildWeights {
    pub fold: f32,
    pub knee: f32,
    /// How far below the hip a knee must sit to count as bent,
    /// fraction of torso distance
    pub bend_factor: f32,
    /// Vertical offset divisor for the fold and knee penalties,
    /// fraction of torso distance
    pub fold_gap_factor: f32,
}

impl Default for ChildWeights {
    fn default() -> Self {
        ChildWeights {
            fold: 50.0,
            knee: 50.0,
            bend_factor: 0.2,
            fold_gap_factor: 0.6,
        }
    }
}

/// Lotus Pose: upright seated spine, knees below hips
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LotusWeights {
    pub upright: f32,
    pub spine: f32,
    pub legs: f32,
    /// Leg points awarded when the knees are not below hip level
    pub legs_floor: f32,
    /// Vertical deviation divisor, fraction of torso distance
    pub gap_factor: f32,
}

impl Default for LotusWeights {
    fn default() -> Self {
        LotusWeights {
            upright: 50.0,
            spine: 30.0,
            legs: 20.0,
            legs_floor: 5.0,
            gap_factor: 0.6,
        }
    }
}

/// The full per-level configuration table, immutable after startup
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PoseConfig {
    pub mountain: MountainWeights,
    pub tree: TreeWeights,
    pub warrior: WarriorWeights,
    pub child: ChildWeights,
    pub lotus: LotusWeights,
}

impl PoseConfig {
    /// Load the table from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load from a file if present, otherwise fall back to the built-in
    /// calibration. A malformed file is reported and ignored.
    pub fn load_or_default(path: &str) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("⚠ Could not load pose weights from {}: {} (using defaults)", path, e);
                PoseConfig::default()
            }
        }
    }

    /// Sum of the maximum point contributions for one level
    pub fn total_weight(&self, level: PoseLevel) -> f32 {
        match level {
            PoseLevel::Mountain => {
                self.mountain.feet + self.mountain.shoulders + 2.0 * self.mountain.arm
            }
            PoseLevel::Tree => self.tree.leg + self.tree.balance + self.tree.standing,
            PoseLevel::Warrior => self.warrior.leg_bend + self.warrior.arms + self.warrior.stance,
            PoseLevel::Child => self.child.fold + self.child.knee,
            PoseLevel::Lotus => self.lotus.upright + self.lotus.spine + self.lotus.legs,
        }
    }
}
