//! Pomodoro Interval Timer CLI
//!
//! Alternates focused work with rests:
//! - 25 minutes of work
//! - 5 minutes of short rest
//! - 15 minutes of long rest after every 4th work interval

use anyhow::Result;
use clap::{CommandFactory, Parser};

use pomodoro_interval::cli::{interactive, Cli, Commands, Display, TimerArgs};
use pomodoro_interval::config::Settings;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so they never interleave with the status line or JSON
/// output on stdout.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => {
            let settings = load_settings(&args.timer)?;
            interactive::run(settings, &args).await?;
        }
        Some(Commands::Config(args)) => {
            let settings = load_settings(&args)?;
            Display::show_settings(&settings)?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Resolves defaults, the settings file and the command-line flags.
fn load_settings(args: &TimerArgs) -> Result<Settings> {
    let overrides = args.overrides().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(args.config.as_deref(), &overrides)?;
    tracing::debug!(?settings, "Settings resolved");
    Ok(settings)
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
