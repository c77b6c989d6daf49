//! Session state and the per-frame transition function
//!
//! Maintains:
//! - Current level and hold-timer state
//! - Per-level smoothing histories
//! - Incorrect-feedback rate limiting
//!
//! One `advance` call per captured frame drives the whole progression:
//! smoothing, thresholding, hold timing, level completion and the 5-to-1
//! wrap. Manual reset/jump commands bypass the hold timer entirely.

use super::feedback::{FeedbackEvent, IncorrectFeedbackLimiter};
use super::history::AccuracyHistory;
use crate::pose::scorer::ACCURACY_THRESHOLD;
use crate::pose::PoseLevel;
use std::time::{Duration, Instant};

/// Calibration multiplier applied to the raw accuracy before smoothing
pub const SENSITIVITY: f32 = 1.08;

/// What one frame transition produced, for display and speech
#[derive(Clone, Debug)]
pub struct FrameOutcome {
    /// Accuracy straight from the scorer
    pub raw: f32,
    /// Raw accuracy after the sensitivity multiplier, clamped to 100
    pub adjusted: f32,
    /// Mean over the level's smoothing window; the gating value
    pub smoothed: f32,
    /// Whether the smoothed accuracy clears the threshold
    pub is_correct: bool,
    /// Time the pose has been held so far, when holding
    pub hold_elapsed: Option<Duration>,
    /// Feedback produced by this transition, in order
    pub events: Vec<FeedbackEvent>,
}

/// Complete session state, mutated once per frame
#[derive(Clone, Debug)]
pub struct SessionState {
    level: PoseLevel,
    pose_correct: bool,
    level_complete: bool,
    hold_started: Option<Instant>,
    history: AccuracyHistory,
    limiter: IncorrectFeedbackLimiter,
}

impl SessionState {
    pub fn new(start_level: PoseLevel) -> Self {
        SessionState {
            level: start_level,
            pose_correct: false,
            level_complete: false,
            hold_started: None,
            history: AccuracyHistory::new(),
            limiter: IncorrectFeedbackLimiter::new(),
        }
    }

    pub fn level(&self) -> PoseLevel {
        self.level
    }

    pub fn is_holding(&self) -> bool {
        self.pose_correct
    }

    /// Run one frame through the progression state machine.
    ///
    /// `raw_accuracy` is the scorer output for the current level (0 when no
    /// pose was detected); `now` is the frame timestamp.
    pub fn advance(&mut self, raw_accuracy: f32, now: Instant) -> FrameOutcome {
        let adjusted = (raw_accuracy * SENSITIVITY).min(100.0);
        self.history.push(self.level, adjusted);
        let smoothed = self.history.smoothed(self.level);
        let is_correct = smoothed >= ACCURACY_THRESHOLD;

        let mut events = Vec::new();
        let mut hold_elapsed = None;

        if is_correct {
            if !self.pose_correct {
                self.pose_correct = true;
                self.hold_started = Some(now);
                events.push(FeedbackEvent::PoseAchieved);
            }
            self.limiter.mark_correct();

            if let Some(started) = self.hold_started {
                let elapsed = now.duration_since(started);
                hold_elapsed = Some(elapsed);
                let required = Duration::from_secs_f32(self.level.hold_secs());
                if elapsed >= required && !self.level_complete {
                    self.complete_level(&mut events);
                    hold_elapsed = None;
                }
            }
        } else {
            let was_holding = self.pose_correct;
            self.pose_correct = false;
            self.level_complete = false;
            self.hold_started = None;
            if self.limiter.should_fire(was_holding, now) {
                events.push(FeedbackEvent::Incorrect(self.level));
            }
        }

        FrameOutcome {
            raw: raw_accuracy,
            adjusted,
            smoothed,
            is_correct,
            hold_elapsed,
            events,
        }
    }

    /// Fire the level completion exactly once for the current hold, then
    /// move on (wrapping after the final level) with cleared flags.
    fn complete_level(&mut self, events: &mut Vec<FeedbackEvent>) {
        let completed = self.level;
        if completed.is_last() {
            events.push(FeedbackEvent::AllLevelsComplete);
        } else {
            events.push(FeedbackEvent::LevelComplete { completed });
        }

        self.level = completed.next();
        self.pose_correct = false;
        self.level_complete = false;
        self.hold_started = None;
        events.push(FeedbackEvent::LevelStarted(self.level));
    }

    /// Manual reset back to level 1, clearing hold state. The smoothing
    /// histories keep their samples.
    pub fn reset(&mut self) -> Vec<FeedbackEvent> {
        self.level = PoseLevel::Mountain;
        self.clear_hold();
        vec![FeedbackEvent::Reset]
    }

    /// Manual jump to a level by number. Values outside 1-5 are ignored
    /// and leave the state untouched.
    pub fn jump_to(&mut self, number: u8) -> Option<Vec<FeedbackEvent>> {
        let target = PoseLevel::from_number(number)?;
        self.level = target;
        self.clear_hold();
        Some(vec![FeedbackEvent::LevelStarted(target)])
    }

    fn clear_hold(&mut self) {
        self.pose_correct = false;
        self.level_complete = false;
        self.hold_started = None;
        self.limiter.mark_correct();
    }
}
