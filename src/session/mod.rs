//! Session Management: progression state, smoothing, and feedback
//!
//! # Components
//! - `state.rs`: SessionState and the per-frame transition function
//! - `history.rs`: Per-level rolling accuracy buffers
//! - `feedback.rs`: Feedback events, spoken texts, and rate limiting

pub mod feedback;
pub mod history;
pub mod state;

pub use feedback::FeedbackEvent;
pub use state::{FrameOutcome, SessionState};
