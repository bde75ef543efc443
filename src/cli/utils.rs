use chrono::{Datelike, NaiveDate};
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::models::Show;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({ "ok": true, "message": message });

            if let (Some(Value::Object(extra)), Some(target)) = (data, response.as_object_mut()) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "error": message }))?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Print one year's shows
pub fn output_shows(output_format: &OutputFormat, year: i32, shows: &[Show]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "data": shows }))?);
        }
        OutputFormat::Text => {
            if shows.is_empty() {
                println!("No shows in {}", year);
                return Ok(());
            }

            let venue_width = shows.iter().map(|s| s.venue.chars().count()).max().unwrap_or(0);
            let band_width = shows.iter().map(|s| s.band.chars().count()).max().unwrap_or(0);

            for show in shows {
                println!(
                    "{}  {:<venue_width$}  {:<band_width$}  {}",
                    format_short_date(&show.show_date.format("%Y-%m-%d").to_string()),
                    show.venue,
                    show.band,
                    show.id,
                );
            }
            println!();
            println!("Total {}: {}", year, shows.len());
        }
    }
    Ok(())
}

/// Year of a `YYYY-MM-DD` date string
pub fn year_of(date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok().map(|d| d.year())
}

/// `YYYY-MM-DD` to `DD-MM`; anything that does not split into three parts is returned unchanged
pub fn format_short_date(date: &str) -> String {
    let mut parts = date.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day)) if !year.is_empty() && !month.is_empty() && !day.is_empty() => {
            format!("{}-{}", day, month)
        }
        _ => date.to_string(),
    }
}
