//! Voyage CLI - An offline-capable, passphrase-protected trip itinerary viewer
//!
//! This is the command-line interface for Voyage. It unlocks the published
//! trip envelope and renders the countdown and itinerary in the terminal.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{forget, home, init, itinerary, misc, seal, unlock};
use crate::constants::env;
use crate::errors::CliError;
use crate::ui::print_error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli).await {
        let ui_ctx = ctx.ui_context(false, None);
        match e.downcast_ref::<CliError>() {
            Some(cli_err) => {
                print_error(&ui_ctx, cli_err.message(), cli_err.hint());
                std::process::exit(cli_err.exit_code());
            }
            None => {
                print_error(&ui_ctx, &format!("{:#}", e), None);
                std::process::exit(1);
            }
        }
    }
}

/// Diagnostics go to stderr, filtered by VOYAGE_LOG (default: warn).
fn init_tracing() {
    let filter = EnvFilter::try_from_env(env::LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(ctx: &AppContext<'_>, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Unlock(args)) => unlock::handle_unlock(ctx, args).await?,
        Some(Commands::Home(args)) => home::handle_home(ctx, args).await?,
        Some(Commands::Itinerary(args)) => itinerary::handle_itinerary(ctx, args).await?,
        Some(Commands::Forget(args)) => forget::handle_forget(ctx, args)?,
        Some(Commands::Seal(args)) => seal::handle_seal(ctx, args)?,
        Some(Commands::Init(args)) => init::handle_init(ctx, args)?,
        Some(Commands::Completions { shell }) => misc::handle_completions(*shell)?,
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }
    Ok(())
}
