//! Request preconditions for the show endpoints.
//!
//! Parsing (JSON body, query string) happens in the handlers; everything here
//! works on already-extracted optional values so the checks stay independent
//! of how the request arrived.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::database::models::NewShow;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing fields")]
    MissingFields,

    #[error("Invalid show_date: {0}")]
    InvalidShowDate(String),

    #[error("Missing id")]
    MissingId,

    #[error("Invalid year: {0}")]
    InvalidYear(String),
}

/// Earliest year a PostgreSQL `date` can hold (4713 BC, astronomical numbering)
pub const MIN_STORED_YEAR: i32 = -4712;

/// Latest year a PostgreSQL `date` can hold
pub const MAX_STORED_YEAR: i32 = 5_874_897;

/// Inclusive date range covering one calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl YearRange {
    /// `None` when no stored show can fall in the year: outside the range the
    /// store's date column accepts, or outside chrono's calendar
    pub fn for_year(year: i32) -> Option<Self> {
        if !(MIN_STORED_YEAR..=MAX_STORED_YEAR).contains(&year) {
            return None;
        }
        Some(Self {
            from: NaiveDate::from_ymd_opt(year, 1, 1)?,
            to: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Resolve the `year` query parameter. Absent or empty means the current year.
pub fn resolve_year(raw: Option<&str>, today: NaiveDate) -> Result<i32, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(today.year()),
        Some(value) => value
            .parse::<i32>()
            .map_err(|_| ValidationError::InvalidYear(value.to_string())),
    }
}

/// Trim-and-check a create request into an insertable show
pub fn validate_new_show(
    show_date: Option<&str>,
    venue: Option<&str>,
    band: Option<&str>,
) -> Result<NewShow, ValidationError> {
    let show_date = show_date.map(str::trim).filter(|s| !s.is_empty());
    let venue = venue.map(str::trim).filter(|s| !s.is_empty());
    let band = band.map(str::trim).filter(|s| !s.is_empty());

    let (Some(show_date), Some(venue), Some(band)) = (show_date, venue, band) else {
        return Err(ValidationError::MissingFields);
    };

    let show_date = NaiveDate::parse_from_str(show_date, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidShowDate(show_date.to_string()))?;

    Ok(NewShow {
        show_date,
        venue: venue.to_string(),
        band: band.to_string(),
    })
}

pub fn validate_id(id: Option<&str>) -> Result<&str, ValidationError> {
    match id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ValidationError::MissingId),
    }
}
