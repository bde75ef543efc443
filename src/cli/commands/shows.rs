use chrono::{Datelike, Local};
use serde_json::json;

use crate::cli::client::ShowsClient;
use crate::cli::config::load_config;
use crate::cli::utils::{output_shows, output_success, year_of};
use crate::cli::OutputFormat;

fn client(server: Option<&str>) -> anyhow::Result<ShowsClient> {
    let config = load_config()?;
    let url = config.resolve_server_url(server);
    ShowsClient::new(&url, config.token)
}

pub async fn list(server: Option<&str>, year: Option<i32>, output_format: OutputFormat) -> anyhow::Result<()> {
    let year = year.unwrap_or_else(|| Local::now().year());
    let shows = client(server)?.list(year).await?;
    output_shows(&output_format, year, &shows)
}

pub async fn add(
    server: Option<&str>,
    date: &str,
    venue: &str,
    band: &str,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let (date, venue, band) = (date.trim(), venue.trim(), band.trim());
    if date.is_empty() || venue.is_empty() || band.is_empty() {
        anyhow::bail!("Something is missing (date / venue / band)");
    }
    let Some(year) = year_of(date) else {
        anyhow::bail!("Date must look like YYYY-MM-DD: {}", date);
    };

    client(server)?.create(date, venue, band).await?;

    output_success(
        &output_format,
        &format!("Added {} at {} on {} (see `shows list --year {}`)", band, venue, date, year),
        Some(json!({ "year": year })),
    )
}

pub async fn delete(server: Option<&str>, id: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    client(server)?.delete(id).await?;
    output_success(&output_format, &format!("Deleted show {}", id), None)
}
