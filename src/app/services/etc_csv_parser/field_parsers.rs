//! Field parsing utilities for ETC usage rows
//!
//! This module provides helper functions for reading cells from CSV rows and
//! converting amount, vehicle class and date text with the tolerance the
//! historical exports require.

use crate::constants::{PIVOT_YEAR, TWO_DIGIT_YEAR_LIMIT};
use crate::{Error, Result};
use chrono::{Days, NaiveDate};
use csv::StringRecord;
use tracing::debug;

/// Get a cell by index, or the empty string when the row is shorter
pub fn get_field_safe(row: &StringRecord, index: usize) -> &str {
    row.get(index).unwrap_or("")
}

/// Parse an amount that may carry comma thousands separators and a sign
///
/// `"1,234"` → 1234, `"-7,430"` → -7430. Empty text, decimals and partial
/// numbers are rejected.
pub fn parse_amount(text: &str) -> Result<i64> {
    let cleaned = text.replace(',', "");
    cleaned
        .parse::<i64>()
        .map_err(|e| Error::numeric_format(text, e))
}

/// Parse an optional monetary cell, falling back to 0
pub fn parse_amount_or_zero(text: &str) -> i64 {
    if text.is_empty() {
        return 0;
    }

    match parse_amount(text) {
        Ok(amount) => amount,
        Err(e) => {
            debug!("Treating unparsable amount as 0: {}", e);
            0
        }
    }
}

/// Parse a vehicle class cell, returning 0 when absent or not an integer
pub fn parse_vehicle_class(text: &str) -> i64 {
    if text.is_empty() {
        return 0;
    }

    text.parse::<i64>().unwrap_or_else(|e| {
        debug!("Treating unparsable vehicle class '{}' as 0: {}", text, e);
        0
    })
}

/// Expand a two-digit year around the pivot; other years pass through
pub fn expand_year(year: i64) -> i64 {
    if year < TWO_DIGIT_YEAR_LIMIT as i64 {
        if year < PIVOT_YEAR as i64 {
            year + 2000
        } else {
            year + 1900
        }
    } else {
        year
    }
}

/// Parse a `Y/M/D` date such as `25/09/01` or `2025/09/01`
///
/// Month and day are not range checked: out-of-range values roll over with
/// calendar arithmetic, so `25/13/01` is 2026-01-01 and `25/03/00` is
/// 2025-02-28.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != 3 {
        return Err(Error::date_format(
            text,
            format!("expected 3 '/'-separated components, found {}", parts.len()),
        ));
    }

    let component = |name: &str, value: &str| -> Result<i64> {
        value.parse::<i64>().map_err(|e| {
            Error::date_format(text, format!("{} '{}' is not numeric: {}", name, value, e))
        })
    };

    let year = expand_year(component("year", parts[0])?);
    let month = component("month", parts[1])?;
    let day = component("day", parts[2])?;

    calendar_date(year, month, day)
        .ok_or_else(|| Error::date_format(text, "date is outside the supported calendar range"))
}

/// Build a date from possibly out-of-range components, normalizing overflow
fn calendar_date(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let months = year.checked_mul(12)?.checked_add(month.checked_sub(1)?)?;
    let normalized_year = i32::try_from(months.div_euclid(12)).ok()?;
    let normalized_month = u32::try_from(months.rem_euclid(12) + 1).ok()?;
    let first_of_month = NaiveDate::from_ymd_opt(normalized_year, normalized_month, 1)?;

    let offset = day.checked_sub(1)?;
    if offset >= 0 {
        first_of_month.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        first_of_month.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}
