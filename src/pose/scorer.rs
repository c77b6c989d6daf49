//! Per-pose accuracy formulas
//!
//! Converts one frame's landmark geometry into a 0-100 accuracy value for
//! the active level. Each formula sums 2-4 weighted sub-scores, every
//! sub-score clamped to >= 0 and the total clamped to [0, 100]. All
//! thresholds are normalized by the torso distance so the score tracks the
//! pose, not the camera distance.

use super::config::PoseConfig;
use super::geometry::{angle_at, distance, midpoint, point_at};
use super::landmarks::{
    LandmarkFrame, LEFT_ANKLE, LEFT_ELBOW, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, NOSE,
    RIGHT_ANKLE, RIGHT_ELBOW, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use super::PoseLevel;

/// Smoothed accuracy at or above this counts as a correct pose
pub const ACCURACY_THRESHOLD: f32 = 55.0;

/// Minimum believable torso distance; anything below means the torso is
/// degenerate or occluded and a frame-derived fallback scale is used
const TORSO_EPSILON: f32 = 1.0;

/// One frame's scoring result for the active level
#[derive(Clone, Debug)]
pub struct PoseScore {
    /// Total accuracy, clamped to [0, 100]
    pub accuracy: f32,
    /// Raw per-frame correctness. Callers gate on the smoothed value from
    /// the session state machine, not on this.
    pub is_correct: bool,
    /// Named sub-score breakdown for debug output
    pub sub_scores: Vec<(&'static str, f32)>,
}

impl PoseScore {
    fn none() -> Self {
        PoseScore {
            accuracy: 0.0,
            is_correct: false,
            sub_scores: Vec::new(),
        }
    }

    fn from_parts(sub_scores: Vec<(&'static str, f32)>) -> Self {
        let total: f32 = sub_scores.iter().map(|(_, v)| v).sum();
        let accuracy = total.clamp(0.0, 100.0);
        PoseScore {
            accuracy,
            is_correct: accuracy >= ACCURACY_THRESHOLD,
            sub_scores,
        }
    }
}

/// Score one frame against the active level's formula.
/// A frame with no landmarks scores exactly (false, 0.0).
pub fn score(level: PoseLevel, frame: &LandmarkFrame, config: &PoseConfig) -> PoseScore {
    if !frame.has_pose() {
        return PoseScore::none();
    }

    let torso = torso_distance(frame);

    match level {
        PoseLevel::Mountain => score_mountain(frame, torso, config),
        PoseLevel::Tree => score_tree(frame, torso, config),
        PoseLevel::Warrior => score_warrior(frame, torso, config),
        PoseLevel::Child => score_child(frame, torso, config),
        PoseLevel::Lotus => score_lotus(frame, torso, config),
    }
}

/// Shoulder-midpoint to hip-midpoint distance, the normalization scale for
/// every geometric threshold. Falls back to a quarter of the larger frame
/// dimension when the torso is degenerate.
fn torso_distance(frame: &LandmarkFrame) -> f32 {
    let mid_shoulder = midpoint(
        point_at(frame, LEFT_SHOULDER),
        point_at(frame, RIGHT_SHOULDER),
    );
    let mid_hip = midpoint(point_at(frame, LEFT_HIP), point_at(frame, RIGHT_HIP));
    let torso = distance(mid_shoulder, mid_hip);

    if torso < TORSO_EPSILON {
        frame.width.max(frame.height) as f32 / 4.0
    } else {
        torso
    }
}

/// Linear penalty: full `weight` at deviation 0, zero at `deviation >= scale`
fn graded(weight: f32, deviation: f32, scale: f32) -> f32 {
    (weight * (1.0 - deviation / scale)).max(0.0)
}

fn score_mountain(frame: &LandmarkFrame, torso: f32, config: &PoseConfig) -> PoseScore {
    let w = &config.mountain;

    let left_shoulder = point_at(frame, LEFT_SHOULDER);
    let right_shoulder = point_at(frame, RIGHT_SHOULDER);
    let left_ankle = point_at(frame, LEFT_ANKLE);
    let right_ankle = point_at(frame, RIGHT_ANKLE);

    let ankle_gap = (left_ankle.0 - right_ankle.0).abs();
    let shoulder_gap = (left_shoulder.0 - right_shoulder.0).abs();

    let left_arm_angle = angle_at(
        point_at(frame, LEFT_WRIST),
        point_at(frame, LEFT_ELBOW),
        left_shoulder,
    );
    let right_arm_angle = angle_at(
        point_at(frame, RIGHT_WRIST),
        point_at(frame, RIGHT_ELBOW),
        right_shoulder,
    );

    let feet = graded(w.feet, ankle_gap, torso * w.feet_gap_factor);
    let shoulders = graded(w.shoulders, shoulder_gap, torso * w.shoulder_gap_factor);
    let left_arm = graded(
        w.arm,
        (left_arm_angle as f32 - w.straight_arm_deg).abs(),
        w.arm_tolerance_deg,
    );
    let right_arm = graded(
        w.arm,
        (right_arm_angle as f32 - w.straight_arm_deg).abs(),
        w.arm_tolerance_deg,
    );

    PoseScore::from_parts(vec![
        ("feet", feet),
        ("shoulders", shoulders),
        ("left_arm", left_arm),
        ("right_arm", right_arm),
    ])
}

fn score_tree(frame: &LandmarkFrame, torso: f32, config: &PoseConfig) -> PoseScore {
    let w = &config.tree;

    let left_hip = point_at(frame, LEFT_HIP);
    let right_hip = point_at(frame, RIGHT_HIP);
    let left_ankle = point_at(frame, LEFT_ANKLE);
    let right_ankle = point_at(frame, RIGHT_ANKLE);

    let hip_ankle_left = distance(left_hip, left_ankle);
    let hip_ankle_right = distance(right_hip, right_ankle);

    let raise_limit = torso * w.raise_factor;
    let left_raised = left_ankle.1 < left_hip.1 - raise_limit;
    let right_raised = right_ankle.1 < right_hip.1 - raise_limit;

    // The raised leg's hip-to-ankle distance drives the standing score;
    // with both feet down the worse of the two is judged instead.
    let (leg, raised_reach) = if left_raised {
        (w.leg, hip_ankle_left)
    } else if right_raised {
        (w.leg, hip_ankle_right)
    } else {
        (0.0, hip_ankle_left.max(hip_ankle_right))
    };

    let balance = graded(
        w.balance,
        (hip_ankle_left - hip_ankle_right).abs(),
        torso * w.balance_gap_factor,
    );
    let standing_target = torso * w.standing_target_factor;
    let standing = graded(
        w.standing,
        (raised_reach - standing_target).abs(),
        standing_target,
    );

    PoseScore::from_parts(vec![
        ("leg", leg),
        ("balance", balance),
        ("standing", standing),
    ])
}

fn score_warrior(frame: &LandmarkFrame, torso: f32, config: &PoseConfig) -> PoseScore {
    let w = &config.warrior;

    let left_shoulder = point_at(frame, LEFT_SHOULDER);
    let right_shoulder = point_at(frame, RIGHT_SHOULDER);
    let left_wrist = point_at(frame, LEFT_WRIST);
    let right_wrist = point_at(frame, RIGHT_WRIST);

    let left_knee_angle = angle_at(
        point_at(frame, LEFT_HIP),
        point_at(frame, LEFT_KNEE),
        point_at(frame, LEFT_ANKLE),
    );
    let right_knee_angle = angle_at(
        point_at(frame, RIGHT_HIP),
        point_at(frame, RIGHT_KNEE),
        point_at(frame, RIGHT_ANKLE),
    );

    let raise_limit = torso * w.arm_raise_factor;
    let left_arm_raised = left_wrist.1 < left_shoulder.1 - raise_limit;
    let right_arm_raised = right_wrist.1 < right_shoulder.1 - raise_limit;

    let bent_knee = left_knee_angle.min(right_knee_angle) as f32;
    let leg_bend = graded(
        w.leg_bend,
        (bent_knee - w.bent_knee_deg).abs(),
        w.bent_knee_deg,
    );
    let arms = if left_arm_raised || right_arm_raised {
        w.arms
    } else {
        0.0
    };
    let spread = (left_knee_angle - right_knee_angle).abs() as f32;
    let stance = if spread < w.stance_spread_deg {
        w.stance
    } else {
        w.stance_floor
    };

    PoseScore::from_parts(vec![
        ("leg_bend", leg_bend),
        ("arms", arms),
        ("stance", stance),
    ])
}

fn score_child(frame: &LandmarkFrame, torso: f32, config: &PoseConfig) -> PoseScore {
    let w = &config.child;

    let nose = point_at(frame, NOSE);
    let left_hip = point_at(frame, LEFT_HIP);
    let right_hip = point_at(frame, RIGHT_HIP);
    let left_knee = point_at(frame, LEFT_KNEE);
    let right_knee = point_at(frame, RIGHT_KNEE);

    let hip_center_y = (left_hip.1 + right_hip.1) / 2.0;
    let bend_limit = torso * w.bend_factor;
    let knees_bent =
        left_knee.1 > left_hip.1 + bend_limit && right_knee.1 > right_hip.1 + bend_limit;

    let gap = torso * w.fold_gap_factor;
    // Only a nose held above the hips is penalized; folding past them is fine
    let fold = graded(w.fold, (hip_center_y - nose.1).max(0.0), gap);
    let knee = if knees_bent {
        w.knee
    } else {
        graded(w.knee, (left_knee.1 - left_hip.1).abs(), gap)
    };

    PoseScore::from_parts(vec![("fold", fold), ("knee", knee)])
}

fn score_lotus(frame: &LandmarkFrame, torso: f32, config: &PoseConfig) -> PoseScore {
    let w = &config.lotus;

    let nose = point_at(frame, NOSE);
    let left_hip = point_at(frame, LEFT_HIP);
    let right_hip = point_at(frame, RIGHT_HIP);
    let left_shoulder = point_at(frame, LEFT_SHOULDER);
    let right_shoulder = point_at(frame, RIGHT_SHOULDER);
    let left_knee = point_at(frame, LEFT_KNEE);
    let right_knee = point_at(frame, RIGHT_KNEE);

    let hip_center_y = (left_hip.1 + right_hip.1) / 2.0;
    let shoulder_y = (left_shoulder.1 + right_shoulder.1) / 2.0;

    let gap = torso * w.gap_factor;
    let upright = graded(w.upright, (nose.1 - hip_center_y).abs(), gap);
    let spine = graded(w.spine, (shoulder_y - nose.1).abs(), gap);
    let legs = if left_knee.1 > left_hip.1 && right_knee.1 > right_hip.1 {
        w.legs
    } else {
        w.legs_floor
    };

    PoseScore::from_parts(vec![("upright", upright), ("spine", spine), ("legs", legs)])
}
