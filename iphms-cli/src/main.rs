//! Main entry point for the IPHMS command-line client.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use dotenv::dotenv;
use shared::config::ClientConfig;

mod commands;
mod storage;
mod tracer;

use commands::{
    Context, auth::AuthCommand, config::ConfigFormat, users::UsersCommand, vitals::VitalsCommand,
};

/// IPHMS CLI
#[derive(Parser, Debug)]
#[command(name = "iphms")]
#[command(about = "Command-line client for the IPHMS vitals API", long_about = None)]
pub struct Cli {
    /// Base URL of the vitals API (overrides config file and IPHMS_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Path to a configuration file (.toml or .json)
    #[arg(long, short, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the IPHMS CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in, register, sign out, or show the signed-in user
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// Browse and record vitals readings
    Vitals {
        #[command(subcommand)]
        command: VitalsCommand,
    },
    /// Generate a configuration file in the current directory
    Config {
        /// Format of the configuration file to generate
        #[arg(long, short, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
    /// Generate shell completion scripts for the CLI
    Completion {
        /// The shell to generate the completion script for
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Completion { shell } => {
            commands::completion::generate_completion(shell);
            return Ok(());
        }
        Commands::Config { format } => return commands::config::generate_config(format),
        _ => {}
    }

    let config = ClientConfig::load_config(cli.config.as_deref(), cli.api_url.as_deref())?;
    let level = tracer::initialize_tracing(&config.logging);
    tracing::debug!(%level, api_base_url = %config.api_base_url, "starting iphms");
    let context = Context::new(config);

    match cli.command {
        Commands::Auth { command } => commands::auth::run(&context, command).await,
        Commands::Users { command } => commands::users::run(&context, command).await,
        Commands::Vitals { command } => commands::vitals::run(&context, command).await,
        Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
    }
}
