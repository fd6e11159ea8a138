use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(name = "rgwadmin")]
#[command(about = "Administer object-gateway users through the dashboard API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub gateway: GatewayArgs,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Connection overrides; anything left out comes from the config file.
#[derive(Debug, Default, Args)]
pub struct GatewayArgs {
    /// Dashboard base URL, e.g. https://ceph-mgr:8443
    #[arg(long, global = true, env = "RGW_CONSOLE_URL")]
    pub url: Option<String>,

    /// Bearer token for the dashboard API
    #[arg(long, global = true, env = "RGW_CONSOLE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage gateway users
    #[command(subcommand)]
    Users(UsersCommand),
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users with their quota usage
    List,
    /// Delete one or more users
    Delete {
        /// User identifiers
        #[arg(required = true, num_args = 1..)]
        uids: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
