//! Interactive terminal session for the `run` subcommand.
//!
//! Key presses arrive line by line from a dedicated stdin thread, are turned
//! into session commands, and every snapshot change is rendered by
//! [`Display`]. Ctrl-C and `q` both end the session cleanly.

use std::io::BufRead;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::engine::{IntervalEngine, Notifier, NullNotifier, TokioTicker};
use crate::session::{Command, Session};
use crate::sound::SoundNotifier;
use crate::types::Snapshot;

use super::commands::RunArgs;
use super::display::Display;

// ============================================================================
// KeyCommand
// ============================================================================

/// A line typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    StartWork,
    ShortRest,
    LongRest,
    TogglePause,
    Status,
    Help,
    Quit,
}

impl KeyCommand {
    /// Parses a typed line. Returns `None` for anything unrecognized.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "w" | "work" => Some(Self::StartWork),
            "r" | "rest" => Some(Self::ShortRest),
            "l" | "long" => Some(Self::LongRest),
            "p" | "pause" => Some(Self::TogglePause),
            "s" | "status" => Some(Self::Status),
            "h" | "?" | "help" => Some(Self::Help),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }

    /// Returns the session command for keys that drive the timer.
    pub fn as_command(&self) -> Option<Command> {
        match self {
            Self::StartWork => Some(Command::StartWork),
            Self::ShortRest => Some(Command::StartRest { is_long: false }),
            Self::LongRest => Some(Command::StartRest { is_long: true }),
            Self::TogglePause => Some(Command::TogglePause),
            Self::Status | Self::Help | Self::Quit => None,
        }
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Runs an interactive session until the user quits and returns the final
/// snapshot.
///
/// # Errors
///
/// Returns an error if the engine cannot be built, output cannot be written,
/// or the session task fails.
pub async fn run(settings: Settings, args: &RunArgs) -> Result<Snapshot> {
    let notifier: Arc<dyn Notifier> = if settings.sound.enabled {
        Arc::new(SoundNotifier::spawn(settings.cues()))
    } else {
        Arc::new(NullNotifier)
    };

    let engine = IntervalEngine::new(settings.interval, notifier)
        .context("タイマーを初期化できませんでした")?;
    let (session, handle) = Session::new(engine, TokioTicker);
    let session_task = tokio::spawn(session.run());

    info!(config = ?settings.interval, "Interactive session starting");

    if !args.json {
        Display::show_key_help();
    }
    if args.auto_start {
        handle.start_work()?;
    }

    let render = |snapshot: &Snapshot| {
        if args.json {
            Display::show_json(snapshot)
        } else {
            Display::show_status_line(snapshot)
        }
    };

    let mut snapshots = handle.subscribe();
    let initial = *snapshots.borrow_and_update();
    render(&initial)?;

    let mut keys = spawn_key_reader();
    let mut keys_open = true;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = *snapshots.borrow_and_update();
                render(&snapshot)?;
            }
            line = keys.recv(), if keys_open => {
                let Some(line) = line else {
                    debug!("stdin closed, waiting for Ctrl-C");
                    keys_open = false;
                    continue;
                };
                match KeyCommand::parse(&line) {
                    Some(KeyCommand::Quit) => break,
                    Some(KeyCommand::Status) => Display::show_summary(&handle.snapshot()),
                    Some(KeyCommand::Help) => Display::show_key_help(),
                    Some(key) => {
                        if let Some(command) = key.as_command() {
                            handle.send(command)?;
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => Display::show_key_help(),
                }
            }
            _ = &mut ctrl_c => {
                debug!("Ctrl-C received");
                break;
            }
        }
    }

    // The loop may already have ended on its own.
    let _ = handle.shutdown();
    let snapshot = session_task
        .await
        .context("タイマーセッションが異常終了しました")?;

    if !args.json {
        Display::show_summary(&snapshot);
    }
    Ok(snapshot)
}

/// Reads stdin lines on a plain thread; a blocking read there cannot hold up
/// runtime shutdown.
fn spawn_key_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    let spawned = std::thread::Builder::new()
        .name("pomodoro-keys".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        break;
                    }
                }
            }
        });

    if let Err(e) = spawned {
        warn!("Failed to start key reader: {}", e);
    }
    rx
}

// ============================================================================
// Tests
// ============================================================================
