use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{load_config, save_config, DEFAULT_SERVER_URL};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Save the server URL")]
    Set {
        #[arg(help = "Server URL, e.g. http://localhost:3000")]
        url: String,
    },

    #[command(about = "Show the server URL that will be used")]
    Show,
}

pub fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut config = load_config()?;

    match cmd {
        ServerCommands::Set { url } => {
            let parsed = url::Url::parse(url.trim()).map_err(|e| anyhow::anyhow!("Invalid server URL '{}': {}", url, e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                anyhow::bail!("Server URL must use http or https: {}", parsed);
            }
            config.server_url = Some(parsed.to_string());
            save_config(&config)?;
            output_success(&output_format, &format!("Server set to {}", parsed), None)
        }
        ServerCommands::Show => {
            let url = config.resolve_server_url(None);
            let source = if url == DEFAULT_SERVER_URL && config.server_url.is_none() {
                " (default)"
            } else {
                ""
            };
            output_success(
                &output_format,
                &format!("Server: {}{}", url, source),
                Some(json!({ "server_url": url })),
            )
        }
    }
}
