mod cli;
mod commands;
mod config;
mod context;
mod output;
mod timing;

use anyhow::{Context as _, Result};
use clap::Parser as _;
use rgw_business::BusinessConfig;

use crate::cli::{Cli, Commands, UsersCommand};
use crate::commands::{generate_completions, run_delete, run_list};
use crate::config::Config;
use crate::context::build_state_ctx;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    timing::init_tracing(cli.verbose, cli.timing);

    let command = match cli.command {
        Commands::Users(command) => command,
        Commands::Completions { shell } => {
            generate_completions(shell);
            return Ok(());
        }
    };

    let base = BusinessConfig::from_env().context("Invalid RGW_CONSOLE_* environment")?;
    let business_config = Config::load()?.resolve(&cli.gateway, base);
    tracing::debug!(url = business_config.api_url(), "Using dashboard");
    let ctx = build_state_ctx(business_config);

    match command {
        UsersCommand::List => run_list(ctx).await,
        UsersCommand::Delete { uids, yes } => run_delete(ctx, &uids, yes).await,
    }
}
