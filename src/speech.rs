//! Speech side-channel: non-blocking spoken feedback
//!
//! The frame loop enqueues plain text; one dedicated worker thread drains
//! the queue sequentially and speaks each message to completion before the
//! next. Messages are never dropped or deduplicated; if the worker falls
//! behind they queue up. Shutdown enqueues a Stop sentinel and joins the
//! worker with a bounded timeout; a missed join is non-fatal.
//!
//! Actual text-to-speech playback is an OS concern. The worker shells out
//! to the first available TTS command; when none is found at startup it
//! degrades to plain text output.

use crossbeam_channel::{unbounded, Sender};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How long shutdown waits for the worker to finish speaking
const JOIN_TIMEOUT: Duration = Duration::from_secs(1);

/// TTS commands probed in order; each takes the text as its argument
const TTS_CANDIDATES: [&str; 3] = ["espeak", "say", "spd-say"];

/// Messages sent to the speech worker
enum SpeechCmd {
    Say(String),
    Stop,
}

/// The spoken-output backend resolved once at startup
struct TtsEngine {
    command: Option<&'static str>,
}

impl TtsEngine {
    /// Find a working TTS command, or fall back to text-only output
    fn probe() -> Self {
        for candidate in TTS_CANDIDATES {
            let available = Command::new(candidate)
                .arg("")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .is_ok();
            if available {
                return TtsEngine {
                    command: Some(candidate),
                };
            }
        }
        TtsEngine { command: None }
    }

    fn text_only() -> Self {
        TtsEngine { command: None }
    }

    /// Speak one message synchronously; playback failures degrade to text
    fn speak(&self, text: &str) {
        match self.command {
            Some(cmd) => {
                let spoken = Command::new(cmd)
                    .arg(text)
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status();
                if spoken.is_err() {
                    println!("[speak] {}", text);
                }
            }
            None => println!("[speak] {}", text),
        }
    }
}

/// Producer handle owned by the main loop
pub struct SpeechChannel {
    tx: Sender<SpeechCmd>,
    worker: Option<JoinHandle<()>>,
}

impl SpeechChannel {
    /// Probe for a TTS backend and start the worker thread
    pub fn start() -> Self {
        let engine = TtsEngine::probe();
        if engine.command.is_none() {
            eprintln!("⚠ No speech engine found; spoken feedback will be printed");
        }
        Self::start_with_engine(engine)
    }

    /// Start a worker that prints instead of speaking
    pub fn start_text_only() -> Self {
        Self::start_with_engine(TtsEngine::text_only())
    }

    fn start_with_engine(engine: TtsEngine) -> Self {
        let (tx, rx) = unbounded();
        let worker = thread::spawn(move || {
            for cmd in rx {
                match cmd {
                    SpeechCmd::Say(text) => engine.speak(&text),
                    SpeechCmd::Stop => break,
                }
            }
        });
        SpeechChannel {
            tx,
            worker: Some(worker),
        }
    }

    /// Enqueue one message. Never blocks the caller; a closed channel
    /// degrades to text output.
    pub fn say(&self, text: impl Into<String>) {
        let text = text.into();
        if self.tx.send(SpeechCmd::Say(text.clone())).is_err() {
            println!("[speak] {}", text);
        }
    }

    /// Stop the worker after it drains everything already enqueued. Waits
    /// up to `JOIN_TIMEOUT`; a worker stuck in playback is abandoned.
    pub fn shutdown(mut self) {
        let _ = self.tx.send(SpeechCmd::Stop);
        if let Some(worker) = self.worker.take() {
            let deadline = Instant::now() + JOIN_TIMEOUT;
            while !worker.is_finished() && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(10));
            }
            if worker.is_finished() {
                let _ = worker.join();
            } else {
                eprintln!("⚠ Speech worker did not stop in time");
            }
        }
    }
}
