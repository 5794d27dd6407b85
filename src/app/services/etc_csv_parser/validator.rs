//! Per-record structural validation

use super::field_parsers::parse_date;
use crate::app::models::UsageRecord;
use crate::constants::fields;
use crate::{Error, Result};

/// Check the minimal admissibility rules for a usage record
///
/// The card identifier must be present. Entry and exit dates may be empty,
/// but when present they must parse.
pub fn validate_record(record: &UsageRecord) -> Result<()> {
    if record.card_identifier.is_empty() {
        return Err(Error::missing_field(fields::CARD_IDENTIFIER));
    }

    validate_optional_date(&record.entry_date, fields::ENTRY_DATE)?;
    validate_optional_date(&record.exit_date, fields::EXIT_DATE)?;

    Ok(())
}

fn validate_optional_date(text: &str, field: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }

    parse_date(text)
        .map(|_| ())
        .map_err(|e| Error::invalid_date(field, e))
}
