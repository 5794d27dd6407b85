//! Conversion of normalized usage records to the storage shape

use chrono::NaiveDate;

use crate::app::models::{SimplifiedRecord, UsageRecord};
use crate::app::services::etc_csv_parser::field_parsers::parse_date;
use crate::{Error, Result};

/// Convert a normalized record into the simplified storage shape
///
/// The date is the exit date, falling back to the entry date when the exit
/// date is empty or malformed. The amount is the charged fee, or the base fee
/// when the charged fee is zero, with the sign dropped.
pub fn convert(record: &UsageRecord) -> Result<SimplifiedRecord> {
    let resolved_date = resolve_date(record)?;

    Ok(SimplifiedRecord {
        resolved_date,
        entry_location: record.entry_location.clone(),
        exit_location: record.exit_location.clone(),
        route_info: record.route_info.clone(),
        vehicle_label: vehicle_label(record.vehicle_class),
        card_identifier: record.card_identifier.clone(),
        amount: resolve_amount(record),
    })
}

/// Pick the usage date: exit date first, entry date second
pub fn resolve_date(record: &UsageRecord) -> Result<NaiveDate> {
    parse_date(&record.exit_date)
        .or_else(|_| parse_date(&record.entry_date))
        .map_err(|_| Error::unresolvable_date(&record.exit_date, &record.entry_date))
}

/// Charged fee, or base fee when nothing was charged; never negative
pub fn resolve_amount(record: &UsageRecord) -> u64 {
    let amount = if record.toll_amount == 0 {
        record.base_amount
    } else {
        record.toll_amount
    };
    amount.unsigned_abs()
}

pub fn vehicle_label(vehicle_class: i64) -> String {
    format!("Class {}", vehicle_class)
}
