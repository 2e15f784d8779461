//! CLI module for the interval timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic
//! - `interactive`: The terminal session behind `run`

pub mod commands;
pub mod display;
pub mod interactive;

pub use commands::{Cli, Commands, RunArgs, TimerArgs};
pub use display::Display;
pub use interactive::KeyCommand;
