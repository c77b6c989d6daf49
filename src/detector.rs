//! Frame source: the boundary to the external pose detector
//!
//! The detector collaborator streams one JSON object per line, each a
//! `LandmarkFrame` (frame dimensions plus the landmark list). An empty or
//! missing landmark array is the valid "no pose detected" signal.
//! Malformed lines are reported and skipped; end of input ends the
//! session cleanly.

use crate::pose::LandmarkFrame;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Streams landmark frames from a file or stdin
pub struct FrameSource {
    reader: Box<dyn BufRead>,
    line_no: usize,
}

impl FrameSource {
    /// Open a landmark stream; "-" reads from stdin
    pub fn open(path: &str) -> Result<Self, Box<dyn Error>> {
        if path == "-" {
            return Ok(Self::from_reader(Box::new(BufReader::new(io::stdin()))));
        }
        if !Path::new(path).exists() {
            return Err(format!("Landmark stream not found: {}", path).into());
        }
        let file = File::open(path)?;
        Ok(Self::from_reader(Box::new(BufReader::new(file))))
    }

    pub fn from_reader(reader: Box<dyn BufRead>) -> Self {
        FrameSource { reader, line_no: 0 }
    }

    /// Read the next frame. Returns None at end of input. Lines that fail
    /// to parse are skipped with a warning.
    pub fn next_frame(&mut self) -> Result<Option<LandmarkFrame>, Box<dyn Error>> {
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<LandmarkFrame>(trimmed) {
                Ok(frame) => return Ok(Some(frame)),
                Err(e) => {
                    eprintln!("⚠ Skipping malformed frame on line {}: {}", self.line_no, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source_from(input: &str) -> FrameSource {
        FrameSource::from_reader(Box::new(Cursor::new(input.to_string())))
    }

    #[test]
    fn test_reads_frames_in_order() {
        let mut source = source_from(
            "{\"width\":640,\"height\":480,\"landmarks\":[{\"x\":0.1,\"y\":0.2}]}\n\
             {\"width\":640,\"height\":480}\n",
        );
        let first = source.next_frame().unwrap().unwrap();
        assert!(first.has_pose());
        let second = source.next_frame().unwrap().unwrap();
        assert!(!second.has_pose());
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let mut source = source_from(
            "not json at all\n\
             {\"width\":320,\"height\":240}\n",
        );
        let frame = source.next_frame().unwrap().unwrap();
        assert_eq!(frame.width, 320);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let mut source = source_from("\n\n{\"width\":640,\"height\":480}\n\n");
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(FrameSource::open("does/not/exist.jsonl").is_err());
    }
}
