use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{load_config, save_config};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Save the write token used for add and delete")]
    Set {
        #[arg(help = "Write token (APP_WRITE_TOKEN on the server)")]
        token: String,
    },

    #[command(about = "Show whether a token is saved")]
    Show,

    #[command(about = "Forget the saved token")]
    Clear,
}

pub fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut config = load_config()?;

    match cmd {
        TokenCommands::Set { token } => {
            let token = token.trim().to_string();
            if token.is_empty() {
                anyhow::bail!("Token must not be empty");
            }
            config.token = Some(token);
            save_config(&config)?;
            output_success(&output_format, "Token saved", None)
        }
        TokenCommands::Show => {
            let masked = config.token.as_deref().map(mask);
            let message = match &masked {
                Some(m) => format!("Token saved: {}", m),
                None => "No token saved".to_string(),
            };
            output_success(&output_format, &message, Some(json!({ "token": masked })))
        }
        TokenCommands::Clear => {
            config.token = None;
            save_config(&config)?;
            output_success(&output_format, "Token cleared", None)
        }
    }
}

/// Keep only the last few characters visible
fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}
