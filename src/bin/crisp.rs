//! Command-line tool for managing Crisp live-chat conversations.
//!
//! # Usage
//!
//! ```bash
//! crisp list [--status pending|resolved|all] [--limit 20]
//! crisp read <session_id>
//! crisp reply <session_id> "message"
//! crisp resolve <session_id>
//! crisp reopen <session_id>
//! crisp search "query"
//! crisp info <session_id>
//! ```
//!
//! `CRISP_IDENTIFIER`, `CRISP_KEY` and `CRISP_WEBSITE_ID` must be set.
//! Diagnostics go to stderr and are controlled by `CRISP_LOG` (default `warn`).

use tracing_subscriber::EnvFilter;

use crisp_cli::commands::{CrispCommand, help_text, parse_command};
use crisp_cli::config::{CrispConfig, LOG_VAR};
use crisp_cli::handlers::run;
use crisp_cli::render::ConsoleRenderer;
use crisp_cli::utils::time::local_offset;
use crisp_cli::website::Website;
use crisp_cli::{Crisp, Error, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Must run before anything can spawn a thread.
    let offset = local_offset();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut renderer = ConsoleRenderer::stdout(offset);
    if let Err(e) = execute(&args, &mut renderer).await {
        match e {
            Error::Usage { usage } => eprintln!("{usage}"),
            other => eprintln!("Error: {other}"),
        }
        std::process::exit(1);
    }
}

/// Loads configuration, parses `args`, and runs the command.
///
/// Configuration is checked first so a missing variable is reported even for
/// a malformed command line.
async fn execute(args: &[String], renderer: &mut ConsoleRenderer<std::io::Stdout>) -> Result<()> {
    let config = CrispConfig::from_env()?;
    let command = parse_command(args)?;
    if command == CrispCommand::Help {
        renderer.text(&help_text())?;
        return Ok(());
    }

    let client = Crisp::new(&config)?;
    let website = Website::new(&client, config.website_id());
    run(&command, &website, renderer).await
}
