//! CLI Interface: User input and terminal rendering
//!
//! # Components
//! - `input.rs`: Key capture and session commands using crossterm
//! - `display.rs`: Terminal overlay rendering

pub mod display;
pub mod input;
