//! Feedback events and the spoken/visual text tables
//!
//! The state machine emits `FeedbackEvent`s; the main loop forwards their
//! spoken lines to the speech channel and reflects them on screen.
//! Incorrect-pose feedback is rate limited to once every two seconds while
//! the user stays incorrect, but fires immediately on the moment a held
//! pose is lost.

use crate::pose::PoseLevel;
use std::time::{Duration, Instant};

/// Minimum gap between repeated incorrect-pose announcements
pub const INCORRECT_FEEDBACK_INTERVAL: Duration = Duration::from_secs(2);

/// One feedback occurrence produced by a frame transition or user command
#[derive(Clone, Debug, PartialEq)]
pub enum FeedbackEvent {
    /// The smoothed accuracy crossed the threshold; the hold timer started
    PoseAchieved,
    /// The pose is not being held; carries the level for its hint
    Incorrect(PoseLevel),
    /// A level's hold completed (not the final level)
    LevelComplete { completed: PoseLevel },
    /// The final level completed; the progression restarts from level 1
    AllLevelsComplete,
    /// A new level became active (after completion, reset, or jump)
    LevelStarted(PoseLevel),
    /// The session was manually reset to level 1
    Reset,
}

impl FeedbackEvent {
    /// The lines to hand to the speech channel, in speaking order
    pub fn spoken_lines(&self) -> Vec<String> {
        match self {
            FeedbackEvent::PoseAchieved => vec!["Good job. Hold the pose.".to_string()],
            FeedbackEvent::Incorrect(level) => vec![spoken_hint(*level).to_string()],
            FeedbackEvent::LevelComplete { completed } => vec![format!(
                "Congratulations! Level {} complete. Moving to level {}.",
                completed.number(),
                completed.number() + 1
            )],
            FeedbackEvent::AllLevelsComplete => vec![
                "Amazing! You've completed all levels. Well done!".to_string(),
                "Congratulations! You have completed all levels. Restarting from Level 1."
                    .to_string(),
            ],
            FeedbackEvent::LevelStarted(level) => vec![
                announcement(*level).to_string(),
                voice_instruction(*level).to_string(),
            ],
            FeedbackEvent::Reset => vec![
                "Reset to Level 1. Mountain Pose. Stand straight with your feet together \
                 and arms at your sides."
                    .to_string(),
            ],
        }
    }
}

/// Short instruction shown in the on-screen overlay
pub fn screen_instruction(level: PoseLevel) -> &'static str {
    match level {
        PoseLevel::Mountain => "Stand straight with arms at sides, feet together",
        PoseLevel::Tree => "Balance on one leg, place foot on opposite thigh",
        PoseLevel::Warrior => "Bend one knee deeply, extend arms overhead",
        PoseLevel::Child => "Kneel and fold forward, arms extended",
        PoseLevel::Lotus => "Sit cross-legged with straight spine, hands on knees",
    }
}

/// Corrective hint spoken while the pose is judged incorrect
pub fn spoken_hint(level: PoseLevel) -> &'static str {
    match level {
        PoseLevel::Mountain => {
            "Stand tall. Keep feet together, relax your shoulders, and raise arms \
             slightly if needed."
        }
        PoseLevel::Tree => {
            "Shift weight to one leg and bring the other foot to the inner thigh. \
             Use hands for balance."
        }
        PoseLevel::Warrior => {
            "Bend the front knee and keep the back leg straight. Reach your arms up \
             to increase stability."
        }
        PoseLevel::Child => {
            "Kneel and fold forward, rest your forehead toward the mat and breathe deeply."
        }
        PoseLevel::Lotus => {
            "Sit upright with a straight spine. Cross legs comfortably and rest hands \
             on knees."
        }
    }
}

/// Spoken announcement when a level becomes active
pub fn announcement(level: PoseLevel) -> &'static str {
    match level {
        PoseLevel::Mountain => "Starting Mountain Pose",
        PoseLevel::Tree => "Starting Tree Pose",
        PoseLevel::Warrior => "Starting Warrior Pose",
        PoseLevel::Child => "Starting Child's Pose",
        PoseLevel::Lotus => "Starting Lotus Pose",
    }
}

/// Spoken setup instruction following the announcement
pub fn voice_instruction(level: PoseLevel) -> &'static str {
    match level {
        PoseLevel::Mountain => "Stand tall with feet together and arms at your sides.",
        PoseLevel::Tree => "Balance on one leg and place the other foot on the inner thigh.",
        PoseLevel::Warrior => "Lunge forward with front knee bent and extend your arms.",
        PoseLevel::Child => "Kneel and fold forward, resting your forehead towards the mat.",
        PoseLevel::Lotus => "Sit cross-legged with a straight spine and rest your hands on your knees.",
    }
}

/// Rate limiter for incorrect-pose feedback.
///
/// Fires immediately on the correct-to-incorrect edge, then at most once
/// per `INCORRECT_FEEDBACK_INTERVAL` while the user stays incorrect.
#[derive(Clone, Debug, Default)]
pub struct IncorrectFeedbackLimiter {
    last_fired: Option<Instant>,
}

impl IncorrectFeedbackLimiter {
    pub fn new() -> Self {
        IncorrectFeedbackLimiter { last_fired: None }
    }

    /// Whether an incorrect event should be emitted for this frame.
    /// `was_correct` marks the transition edge out of a held pose.
    pub fn should_fire(&mut self, was_correct: bool, now: Instant) -> bool {
        let fire = was_correct
            || match self.last_fired {
                None => true,
                Some(last) => now.duration_since(last) > INCORRECT_FEEDBACK_INTERVAL,
            };
        if fire {
            self.last_fired = Some(now);
        }
        fire
    }

    /// Called on correct frames so the next incorrect frame fires at once
    pub fn mark_correct(&mut self) {
        self.last_fired = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_first_incorrect_frame_fires() {
        let mut limiter = IncorrectFeedbackLimiter::new();
        assert!(limiter.should_fire(false, Instant::now()));
    }

    #[test]
    fn test_repeat_within_interval_is_suppressed() {
        let mut limiter = IncorrectFeedbackLimiter::new();
        let t0 = Instant::now();
        assert!(limiter.should_fire(false, t0));
        assert!(!limiter.should_fire(false, t0 + Duration::from_millis(500)));
        assert!(!limiter.should_fire(false, t0 + Duration::from_millis(1900)));
        assert!(limiter.should_fire(false, t0 + Duration::from_millis(2100)));
    }

    #[test]
    fn test_losing_a_held_pose_fires_immediately() {
        let mut limiter = IncorrectFeedbackLimiter::new();
        let t0 = Instant::now();
        assert!(limiter.should_fire(false, t0));
        // Still inside the interval, but the pose was just lost
        assert!(limiter.should_fire(true, t0 + Duration::from_millis(100)));
    }

    #[test]
    fn test_correct_frames_rearm_the_limiter() {
        let mut limiter = IncorrectFeedbackLimiter::new();
        let t0 = Instant::now();
        assert!(limiter.should_fire(false, t0));
        limiter.mark_correct();
        assert!(limiter.should_fire(false, t0 + Duration::from_millis(100)));
    }

    #[test]
    fn test_event_texts_cover_all_levels() {
        for level in PoseLevel::ALL {
            assert!(!spoken_hint(level).is_empty());
            assert!(!screen_instruction(level).is_empty());
            assert!(announcement(level).starts_with("Starting"));
            assert!(!voice_instruction(level).is_empty());
        }
    }

    #[test]
    fn test_level_complete_lines_name_both_levels() {
        let lines = FeedbackEvent::LevelComplete {
            completed: PoseLevel::Tree,
        }
        .spoken_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Level 2 complete"));
        assert!(lines[0].contains("level 3"));
    }
}
