pub mod client;
pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "shows")]
#[command(about = "Show Tracker CLI - log the concerts you went to")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Server URL (overrides SHOWS_SERVER_URL and the saved server)")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List shows for a year (defaults to the current year)")]
    List {
        #[arg(long, short, help = "Calendar year")]
        year: Option<i32>,
    },

    #[command(about = "Record a show")]
    Add {
        #[arg(help = "Show date (YYYY-MM-DD)")]
        date: String,
        #[arg(help = "Venue")]
        venue: String,
        #[arg(help = "Band")]
        band: String,
    },

    #[command(about = "Delete a show by id")]
    Delete {
        #[arg(help = "Show id")]
        id: String,
    },

    #[command(about = "Manage the saved write token")]
    Token {
        #[command(subcommand)]
        cmd: commands::token::TokenCommands,
    },

    #[command(about = "Manage the saved server URL")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let server = cli.server;

    match cli.command {
        Commands::List { year } => commands::shows::list(server.as_deref(), year, output_format).await,
        Commands::Add { date, venue, band } => {
            commands::shows::add(server.as_deref(), &date, &venue, &band, output_format).await
        }
        Commands::Delete { id } => commands::shows::delete(server.as_deref(), &id, output_format).await,
        Commands::Token { cmd } => commands::token::handle(cmd, output_format),
        Commands::Server { cmd } => commands::server::handle(cmd, output_format),
    }
}
