//! Yoga Pose Progression Trainer
//!
//! Frame-driven, single-threaded trainer: an external pose detector streams
//! landmark frames, each frame is scored against the active pose, and a
//! progression state machine advances through the five levels as each pose
//! is held. Spoken feedback goes through a dedicated worker thread so the
//! frame loop never blocks.

mod cli;
mod detector;
mod pose;
mod session;
mod speech;

use clap::Parser;
use cli::display::Display;
use cli::input::{Command, InputHandler};
use detector::FrameSource;
use pose::{scorer, PoseConfig, PoseLevel};
use session::{FeedbackEvent, SessionState};
use speech::SpeechChannel;
use std::error::Error;
use std::time::Instant;

const WELCOME: &str = "Welcome to the Yoga Progression System. Let's start with Mountain Pose. \
                       Stand straight with your feet together and arms at your sides.";

#[derive(Parser, Debug)]
#[command(name = "Asana Trainer")]
#[command(about = "Yoga pose progression trainer with live accuracy scoring")]
struct Args {
    /// Landmark stream from the pose detector, one JSON frame per line
    /// ("-" for stdin)
    #[arg(short = 'i', long, default_value = "-")]
    landmarks: String,

    /// Path to the pose weight configuration (JSON)
    #[arg(short, long, default_value = "data/pose_weights.json")]
    weights: String,

    /// Starting level (1-5)
    #[arg(short, long, default_value = "1")]
    level: u8,

    /// Enable verbose per-frame metric logging
    #[arg(short, long)]
    debug: bool,
}

fn print_banner() {
    println!("=== 🧘 YOGA PROGRESSION SYSTEM 🧘 ===");
    println!("Complete each pose correctly to advance to the next level!");
    println!("\nLevels:");
    for level in PoseLevel::ALL {
        println!("{}. {}", level.number(), level.name());
    }
    println!("\nKeys: 1-5 jump level, 'r' reset, 'd' debug, 'q' quit\n");
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    print_banner();

    let start_level = match PoseLevel::from_number(args.level) {
        Some(level) => level,
        None => {
            eprintln!("⚠ Level {} is out of range, starting at 1", args.level);
            PoseLevel::Mountain
        }
    };

    let config = PoseConfig::load_or_default(&args.weights);

    let speech = SpeechChannel::start();
    if start_level == PoseLevel::Mountain {
        speech.say(WELCOME);
    } else {
        for line in FeedbackEvent::LevelStarted(start_level).spoken_lines() {
            speech.say(line);
        }
    }

    let mut source = FrameSource::open(&args.landmarks)?;

    let display = Display::new()?;
    display.clear()?;
    InputHandler::enable_raw_mode()?;
    let input = InputHandler::new();

    let mut state = SessionState::new(start_level);
    let mut debug = args.debug;
    let mut frames = 0u64;
    let mut levels_completed = 0u32;
    let session_start = Instant::now();
    let mut last_frame = Instant::now();

    'session: loop {
        // Commands take effect before the next frame is scored
        if let Some(command) = input.poll_command()? {
            match command {
                Command::Quit => break 'session,
                Command::Reset => {
                    for event in state.reset() {
                        for line in event.spoken_lines() {
                            speech.say(line);
                        }
                    }
                }
                Command::ToggleDebug => {
                    debug = !debug;
                    speech.say(format!(
                        "Debug metrics {}",
                        if debug { "enabled" } else { "disabled" }
                    ));
                }
                Command::Jump(n) => {
                    // Out-of-range numbers leave the session untouched
                    if let Some(events) = state.jump_to(n) {
                        for event in events {
                            for line in event.spoken_lines() {
                                speech.say(line);
                            }
                        }
                    }
                }
            }
        }

        let Some(frame) = source.next_frame()? else {
            break 'session;
        };
        frames += 1;

        let now = Instant::now();
        let score = scorer::score(state.level(), &frame, &config);
        let outcome = state.advance(score.accuracy, now);

        for event in &outcome.events {
            if matches!(
                event,
                FeedbackEvent::LevelComplete { .. } | FeedbackEvent::AllLevelsComplete
            ) {
                levels_completed += 1;
            }
            for line in event.spoken_lines() {
                speech.say(line);
            }
        }

        let fps = 1.0 / now.duration_since(last_frame).as_secs_f64().max(1e-6);
        last_frame = now;

        display.clear()?;
        display.show_banner(state.level())?;
        display.show_status(&outcome)?;
        display.show_hold(state.level(), outcome.hold_elapsed)?;
        display.show_instruction(state.level())?;
        if debug {
            display.show_debug(&score, &outcome)?;
        }
        display.show_footer(fps)?;
    }

    // Cleanup
    InputHandler::disable_raw_mode()?;
    display.shutdown()?;
    speech.shutdown();

    println!("\n🧘 Session complete!");
    println!(
        "📊 {} frames | {} levels completed | {:.1}s | finished at level {}",
        frames,
        levels_completed,
        session_start.elapsed().as_secs_f64(),
        state.level().number()
    );

    Ok(())
}
