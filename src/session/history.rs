//! Per-level accuracy smoothing buffers
//!
//! Each level keeps its own fixed-capacity FIFO of recent adjusted
//! accuracy samples. The smoothed value is the plain arithmetic mean of
//! whatever the buffer currently holds. Buffers are never cleared on a
//! level switch; a revisited level resumes from its previous samples.

use crate::pose::PoseLevel;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// Number of frames averaged into the smoothed accuracy
pub const SMOOTHING_WINDOW: usize = 4;

/// Rolling accuracy histories, keyed by level
#[derive(Clone, Debug, Default)]
pub struct AccuracyHistory {
    buffers: FxHashMap<PoseLevel, VecDeque<f32>>,
}

impl AccuracyHistory {
    pub fn new() -> Self {
        AccuracyHistory {
            buffers: FxHashMap::default(),
        }
    }

    /// Append a sample to one level's buffer, evicting the oldest once the
    /// window is full
    pub fn push(&mut self, level: PoseLevel, sample: f32) {
        let buffer = self
            .buffers
            .entry(level)
            .or_insert_with(|| VecDeque::with_capacity(SMOOTHING_WINDOW));
        if buffer.len() == SMOOTHING_WINDOW {
            buffer.pop_front();
        }
        buffer.push_back(sample);
    }

    /// Mean of the level's buffered samples; 0.0 while the buffer is empty
    pub fn smoothed(&self, level: PoseLevel) -> f32 {
        match self.buffers.get(&level) {
            Some(buffer) if !buffer.is_empty() => {
                buffer.iter().sum::<f32>() / buffer.len() as f32
            }
            _ => 0.0,
        }
    }

    /// Number of samples currently buffered for a level
    pub fn len(&self, level: PoseLevel) -> usize {
        self.buffers.get(&level).map_or(0, VecDeque::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_smooths_to_zero() {
        let history = AccuracyHistory::new();
        assert_eq!(history.smoothed(PoseLevel::Mountain), 0.0);
        assert_eq!(history.len(PoseLevel::Mountain), 0);
    }

    #[test]
    fn test_full_window_mean_and_eviction() {
        let mut history = AccuracyHistory::new();
        for _ in 0..4 {
            history.push(PoseLevel::Child, 80.0);
        }
        assert_eq!(history.smoothed(PoseLevel::Child), 80.0);

        // A fifth sample evicts the oldest 80
        history.push(PoseLevel::Child, 0.0);
        assert_eq!(history.len(PoseLevel::Child), 4);
        assert_eq!(history.smoothed(PoseLevel::Child), 60.0);
    }

    #[test]
    fn test_partial_window_uses_actual_length() {
        let mut history = AccuracyHistory::new();
        history.push(PoseLevel::Tree, 90.0);
        history.push(PoseLevel::Tree, 30.0);
        assert_eq!(history.smoothed(PoseLevel::Tree), 60.0);
    }

    #[test]
    fn test_levels_keep_independent_buffers() {
        let mut history = AccuracyHistory::new();
        history.push(PoseLevel::Mountain, 100.0);
        history.push(PoseLevel::Tree, 20.0);
        assert_eq!(history.smoothed(PoseLevel::Mountain), 100.0);
        assert_eq!(history.smoothed(PoseLevel::Tree), 20.0);
    }

    #[test]
    fn test_buffer_survives_level_switch() {
        // Scoring another level in between must not disturb the first
        // level's samples
        let mut history = AccuracyHistory::new();
        history.push(PoseLevel::Mountain, 70.0);
        for _ in 0..10 {
            history.push(PoseLevel::Tree, 10.0);
        }
        assert_eq!(history.smoothed(PoseLevel::Mountain), 70.0);
        assert_eq!(history.len(PoseLevel::Mountain), 1);
    }
}
