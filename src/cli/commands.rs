//! Command definitions for the interval timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

// ============================================================================
// CLI Structure
// ============================================================================

/// Work/rest interval timer
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-interval",
    version,
    about = "作業と休憩を交互に繰り返すポモドーロタイマー",
    long_about = "ターミナル上で動作するポモドーロタイマー。\n\
                  作業・短い休憩・長い休憩を自動で切り替え、\n\
                  完了したサイクル数と合計作業時間を表示します。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive timer session in this terminal
    Run(RunArgs),

    /// Print the effective configuration as JSON
    Config(TimerArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Timer Arguments
// ============================================================================

/// Durations, cycle length and settings file shared by every subcommand
/// that builds a configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct TimerArgs {
    /// Work duration (minutes, or seconds with --seconds)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub work: Option<u32>,

    /// Short rest duration (minutes, or seconds with --seconds)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub short_rest: Option<u32>,

    /// Long rest duration (minutes, or seconds with --seconds)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub long_rest: Option<u32>,

    /// Work intervals per cycle; the last one is followed by a long rest
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub cycles: Option<u32>,

    /// Interpret durations as seconds instead of minutes
    #[arg(long)]
    pub seconds: bool,

    /// Disable phase sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Settings file (defaults to <config dir>/pomodoro-interval/config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl TimerArgs {
    /// Converts the flags into configuration overrides in seconds.
    ///
    /// # Errors
    ///
    /// Returns a message if a minute value does not fit in seconds.
    pub fn overrides(&self) -> Result<Overrides, String> {
        let scale = if self.seconds { 1 } else { 60 };
        let to_seconds = |value: Option<u32>| -> Result<Option<u32>, String> {
            value
                .map(|v| {
                    v.checked_mul(scale)
                        .ok_or_else(|| format!("時間の指定が大きすぎます: {}", v))
                })
                .transpose()
        };

        Ok(Overrides {
            work_seconds: to_seconds(self.work)?,
            short_rest_seconds: to_seconds(self.short_rest)?,
            long_rest_seconds: to_seconds(self.long_rest)?,
            cycles_before_long_rest: self.cycles,
            sound: if self.no_sound { Some(false) } else { None },
        })
    }
}

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub timer: TimerArgs,

    /// Start the first work interval immediately
    #[arg(short, long)]
    pub auto_start: bool,

    /// Print each snapshot as a JSON line instead of a status line
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Tests
// ============================================================================
