//! Display utilities for the interval timer CLI.
//!
//! This module renders snapshots for the terminal:
//! - A one-line status that is redrawn in place every second
//! - JSON lines for scripting
//! - Key help, configuration and error messages

use std::io::{self, Write};

use crate::config::Settings;
use crate::format::{format_hms, format_ms};
use crate::types::{Phase, Snapshot};

/// ANSI sequence that clears the current line.
const CLEAR_LINE: &str = "\x1b[2K";

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Returns the label shown for a phase.
    pub fn phase_label(phase: Phase) -> &'static str {
        match phase {
            Phase::Idle => "待機中",
            Phase::Working => "作業中",
            Phase::ShortResting => "休憩中",
            Phase::LongResting => "長い休憩中",
        }
    }

    /// Builds the status line for a snapshot.
    pub fn status_line(snapshot: &Snapshot) -> String {
        let mut state = Self::phase_label(snapshot.phase).to_string();
        if snapshot.is_paused() {
            state.push_str("（一時停止）");
        }

        format!(
            "{} {} | サイクル: {} | 作業時間: {} | ポモドーロ: {}",
            state,
            format_ms(snapshot.remaining_seconds),
            snapshot.completed_cycles,
            format_hms(snapshot.total_seconds_worked),
            snapshot.completed_work_intervals,
        )
    }

    /// Redraws the status line in place.
    pub fn show_status_line(snapshot: &Snapshot) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "\r{}{}", CLEAR_LINE, Self::status_line(snapshot))?;
        stdout.flush()
    }

    /// Prints a snapshot as one JSON line.
    pub fn show_json(snapshot: &Snapshot) -> io::Result<()> {
        let json = serde_json::to_string(snapshot).map_err(io::Error::other)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", json)?;
        stdout.flush()
    }

    /// Prints a multi-line summary, used for `s` and at exit.
    pub fn show_summary(snapshot: &Snapshot) {
        println!();
        println!("ポモドーロタイマー ステータス");
        println!("─────────────────────────────");
        println!("状態: {}", Self::phase_label(snapshot.phase));
        if snapshot.phase != Phase::Idle {
            println!("残り時間: {}", format_ms(snapshot.remaining_seconds));
        }
        println!("完了したサイクル: {}", snapshot.completed_cycles);
        println!("合計作業時間: {}", format_hms(snapshot.total_seconds_worked));
        println!("完了したポモドーロ: {}", snapshot.completed_work_intervals);
    }

    /// Prints the key bindings.
    pub fn show_key_help() {
        println!("操作: [w] 作業開始  [r] 休憩  [l] 長い休憩  [p] 一時停止/再開  [s] ステータス  [q] 終了");
    }

    /// Prints the effective configuration as pretty JSON.
    pub fn show_settings(settings: &Settings) -> io::Result<()> {
        let json = serde_json::to_string_pretty(settings).map_err(io::Error::other)?;
        println!("{}", json);
        Ok(())
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================
