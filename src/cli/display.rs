//! Terminal display and UI rendering
//!
//! Features:
//! - Per-frame overlay: level banner, live accuracy, hold progress
//! - Color-coded correct/incorrect state
//! - Instructional text per pose
//! - Optional per-frame metric breakdown in debug mode

use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};
use std::time::Duration;

use crate::pose::{PoseLevel, PoseScore};
use crate::session::feedback::screen_instruction;
use crate::session::FrameOutcome;

/// Width used when wrapping instruction text
const INSTRUCTION_WRAP: usize = 40;

/// Terminal display manager
pub struct Display;

impl Display {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Display)
    }

    /// Clear screen
    pub fn clear(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Level number and pose name banner
    pub fn show_banner(&self, level: PoseLevel) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!("LEVEL {}", level.number())),
            ResetColor,
            Print("  "),
            SetForegroundColor(Color::Cyan),
            Print(level.name()),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Smoothed accuracy and the correct/incorrect state line (the border
    /// color of the video overlay, rendered as text here)
    pub fn show_status(&self, outcome: &FrameOutcome) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();

        let accuracy_color = if outcome.smoothed >= 90.0 {
            Color::Green
        } else if outcome.is_correct {
            Color::Yellow
        } else {
            Color::Red
        };

        execute!(
            stdout,
            cursor::MoveTo(0, 2),
            Print("Accuracy: "),
            SetForegroundColor(accuracy_color),
            Print(format!("{:.0}%", outcome.smoothed)),
            ResetColor,
            Print("  |  "),
        )?;

        if outcome.is_correct {
            execute!(
                stdout,
                SetForegroundColor(Color::Green),
                Print("CORRECT"),
                ResetColor,
            )?;
        } else {
            execute!(
                stdout,
                SetForegroundColor(Color::Red),
                Print("Adjust your pose"),
                ResetColor,
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Hold countdown and progress while the pose is being held
    pub fn show_hold(
        &self,
        level: PoseLevel,
        hold_elapsed: Option<Duration>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(stdout, cursor::MoveTo(0, 3))?;

        if let Some(elapsed) = hold_elapsed {
            let required = level.hold_secs();
            let remaining = (required - elapsed.as_secs_f32()).max(0.0);
            let progress = ((elapsed.as_secs_f32() / required) * 100.0).min(100.0);
            if remaining > 0.0 {
                execute!(
                    stdout,
                    SetForegroundColor(Color::Green),
                    Print(format!("Hold: {:.1}s  ({:.0}%)", remaining, progress)),
                    ResetColor,
                )?;
            } else {
                execute!(
                    stdout,
                    SetForegroundColor(Color::Green),
                    Print("Perfect! Hold this pose!"),
                    ResetColor,
                )?;
            }
        } else {
            execute!(stdout, terminal::Clear(ClearType::CurrentLine))?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Wrapped pose instruction and the hold-time requirement
    pub fn show_instruction(&self, level: PoseLevel) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        let lines = wrap_text(screen_instruction(level), INSTRUCTION_WRAP);
        for (i, line) in lines.iter().enumerate() {
            execute!(
                stdout,
                cursor::MoveTo(0, 5 + i as u16),
                SetForegroundColor(Color::White),
                Print(line),
                ResetColor,
            )?;
        }
        execute!(
            stdout,
            cursor::MoveTo(0, 5 + lines.len() as u16 + 1),
            SetForegroundColor(Color::Magenta),
            Print(format!("Hold for {}s", level.hold_secs())),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Raw/adjusted/smoothed triple and the sub-score breakdown
    pub fn show_debug(
        &self,
        score: &PoseScore,
        outcome: &FrameOutcome,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 9),
            SetForegroundColor(Color::DarkGrey),
            Print(format!(
                "raw: {:.1}%  adjusted: {:.1}%  smoothed: {:.1}%",
                outcome.raw, outcome.adjusted, outcome.smoothed
            )),
            cursor::MoveTo(0, 10),
        )?;
        for (name, value) in &score.sub_scores {
            execute!(stdout, Print(format!("{}: {:.2}  ", name, value)))?;
        }
        execute!(stdout, ResetColor)?;
        stdout.flush()?;
        Ok(())
    }

    /// FPS readout and the key help line
    pub fn show_footer(&self, fps: f64) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 12),
            SetForegroundColor(Color::Blue),
            Print(format!("FPS: {:.1}", fps)),
            ResetColor,
            cursor::MoveTo(0, 13),
            SetForegroundColor(Color::DarkGrey),
            Print("Keys: 1-5 jump level  |  r reset  |  d debug  |  q quit"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Reset terminal state and cleanup
    pub fn shutdown(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = stdout();
        execute!(stdout, cursor::MoveTo(0, 15), cursor::Show)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Best effort cleanup
        let _ = self.shutdown();
    }
}

/// Greedy word wrap for instruction text
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_keeps_short_lines_whole() {
        assert_eq!(wrap_text("stand tall", 40), vec!["stand tall"]);
    }

    #[test]
    fn test_wrap_text_breaks_at_word_boundaries() {
        let lines = wrap_text("kneel and fold forward with arms extended ahead", 20);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.len() <= 20, "line too long: {:?}", line);
        }
        assert_eq!(
            lines.join(" "),
            "kneel and fold forward with arms extended ahead"
        );
    }

    #[test]
    fn test_wrap_text_empty_input() {
        assert!(wrap_text("", 10).is_empty());
    }
}
