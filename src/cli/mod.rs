pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::database::PgStore;

#[derive(Parser)]
#[command(name = "lmanager")]
#[command(about = "LManager CLI - administration for the layout manager API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Mint an API token for a user")]
    Token(commands::token::TokenArgs),

    #[command(about = "User management")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Color palette management")]
    Color {
        #[command(subcommand)]
        cmd: commands::color::ColorCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Connect to the configured database; data commands need DATABASE_URL
pub(crate) async fn connect(config: &AppConfig) -> anyhow::Result<PgStore> {
    PgStore::connect(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = AppConfig::from_env();

    match cli.command {
        Commands::Token(args) => commands::token::handle(args, &config, output_format),
        Commands::User { cmd } => commands::user::handle(cmd, &config, output_format).await,
        Commands::Color { cmd } => commands::color::handle(cmd, &config, output_format).await,
    }
}
