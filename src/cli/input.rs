//! Keystroke input handling using crossterm
//!
//! Features:
//! - Non-blocking key capture so the frame loop never stalls
//! - Discrete session commands (quit, reset, debug, level jump)
//! - Ctrl+C graceful exit

use crossterm::event::{self, KeyCode, KeyEvent, KeyModifiers};
use std::io::Result as IoResult;
use std::time::Duration;

/// A discrete session command with immediate effect
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Reset progression to level 1
    Reset,
    /// Toggle verbose per-frame metric logging
    ToggleDebug,
    /// Jump directly to a level by number; validation happens in the
    /// session state, which ignores out-of-range values
    Jump(u8),
}

/// Handles user input from terminal
pub struct InputHandler {
    /// Timeout for poll operations
    poll_timeout: Duration,
}

impl InputHandler {
    /// Create new input handler with a short poll timeout so input checks
    /// do not hold up frame processing
    pub fn new() -> Self {
        InputHandler {
            poll_timeout: Duration::from_millis(10),
        }
    }

    /// Enable raw mode for terminal input
    pub fn enable_raw_mode() -> IoResult<()> {
        crossterm::terminal::enable_raw_mode()
    }

    /// Disable raw mode and restore terminal
    pub fn disable_raw_mode() -> IoResult<()> {
        crossterm::terminal::disable_raw_mode()
    }

    /// Poll for the next command, returning None when no relevant key is
    /// pressed within the timeout
    pub fn poll_command(&self) -> Result<Option<Command>, Box<dyn std::error::Error>> {
        if !event::poll(self.poll_timeout)? {
            return Ok(None);
        }
        match event::read()? {
            event::Event::Key(key_event) => Ok(Self::classify(&key_event)),
            _ => Ok(None),
        }
    }

    /// Map a key event to a command, if it is one
    fn classify(key: &KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char(c) if key.modifiers.is_empty() => match c {
                'q' => Some(Command::Quit),
                'r' => Some(Command::Reset),
                'd' => Some(Command::ToggleDebug),
                '1'..='5' => c.to_digit(10).map(|n| Command::Jump(n as u8)),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::empty())
    }

    #[test]
    fn test_classify_session_commands() {
        assert_eq!(InputHandler::classify(&key('q')), Some(Command::Quit));
        assert_eq!(InputHandler::classify(&key('r')), Some(Command::Reset));
        assert_eq!(InputHandler::classify(&key('d')), Some(Command::ToggleDebug));
        assert_eq!(InputHandler::classify(&key('x')), None);
    }

    #[test]
    fn test_classify_level_digits() {
        assert_eq!(InputHandler::classify(&key('1')), Some(Command::Jump(1)));
        assert_eq!(InputHandler::classify(&key('5')), Some(Command::Jump(5)));
        assert_eq!(InputHandler::classify(&key('6')), None);
        assert_eq!(InputHandler::classify(&key('0')), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(InputHandler::classify(&event), Some(Command::Quit));
        // Plain 'c' is not a command
        assert_eq!(InputHandler::classify(&key('c')), None);
    }
}
