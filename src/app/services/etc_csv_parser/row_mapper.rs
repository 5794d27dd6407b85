//! Row mapping strategies
//!
//! Exports either declare their columns in a header row or follow the fixed
//! legacy column order. One strategy is chosen per batch from the first row.

use csv::StringRecord;

use super::field_parsers::{get_field_safe, parse_amount_or_zero, parse_vehicle_class};
use super::header::HeaderMap;
use crate::app::models::{RowRejection, UsageRecord};
use crate::constants::{header_names, positional};

/// Maps one data row to a normalized usage record
pub trait RowMapper: Send + Sync {
    /// Map a row, or reject it when it cannot be mapped at all
    fn map_row(&self, row: &StringRecord) -> std::result::Result<UsageRecord, RowRejection>;

    /// Short name for logging
    fn name(&self) -> &'static str;
}

/// Pick the mapping strategy for a batch from its first row
///
/// Returns the mapper and whether the first row was consumed as a header.
pub fn select_mapper(first_row: &StringRecord) -> (Box<dyn RowMapper>, bool) {
    match HeaderMap::detect(first_row) {
        Some(headers) => (Box::new(HeaderRowMapper::new(headers)), true),
        None => (Box::new(PositionalRowMapper), false),
    }
}

/// Looks fields up by header name, tolerating alternate spellings
#[derive(Debug, Clone)]
pub struct HeaderRowMapper {
    headers: HeaderMap,
}

impl HeaderRowMapper {
    pub fn new(headers: HeaderMap) -> Self {
        Self { headers }
    }
}

impl RowMapper for HeaderRowMapper {
    fn map_row(&self, row: &StringRecord) -> std::result::Result<UsageRecord, RowRejection> {
        let field = |candidates: &[&str]| self.headers.lookup(row, candidates).to_string();
        let amount = |candidates: &[&str]| parse_amount_or_zero(self.headers.lookup(row, candidates));

        let mut record = UsageRecord {
            entry_date: field(header_names::ENTRY_DATE),
            entry_time: field(header_names::ENTRY_TIME),
            exit_date: field(header_names::EXIT_DATE),
            exit_time: field(header_names::EXIT_TIME),
            entry_location: field(header_names::ENTRY_LOCATION),
            exit_location: field(header_names::EXIT_LOCATION),
            route_info: field(header_names::ROUTE),
            toll_amount: amount(header_names::TOLL_AMOUNT),
            base_amount: amount(header_names::BASE_AMOUNT),
            discount_amount: amount(header_names::DISCOUNT_AMOUNT),
            mileage: amount(header_names::MILEAGE),
            vehicle_class: parse_vehicle_class(
                self.headers.lookup(row, header_names::VEHICLE_CLASS),
            ),
            vehicle_number: field(header_names::VEHICLE_NUMBER),
            card_identifier: field(header_names::CARD_IDENTIFIER),
            notes: field(header_names::NOTES),
        };

        let post_payment = amount(header_names::POST_PAYMENT_AMOUNT);
        if post_payment != 0 {
            record.toll_amount = post_payment;
        }

        Ok(record)
    }

    fn name(&self) -> &'static str {
        "header"
    }
}

/// Reads fields from the fixed legacy column positions
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalRowMapper;

impl RowMapper for PositionalRowMapper {
    fn map_row(&self, row: &StringRecord) -> std::result::Result<UsageRecord, RowRejection> {
        if row.len() < positional::MIN_FIELDS {
            return Err(RowRejection::TooFewFields {
                found: row.len(),
                required: positional::MIN_FIELDS,
            });
        }

        let field = |index: usize| get_field_safe(row, index).to_string();
        let amount = |index: usize| parse_amount_or_zero(get_field_safe(row, index));

        Ok(UsageRecord {
            entry_date: field(positional::ENTRY_DATE),
            entry_time: field(positional::ENTRY_TIME),
            exit_date: field(positional::EXIT_DATE),
            exit_time: field(positional::EXIT_TIME),
            entry_location: field(positional::ENTRY_LOCATION),
            exit_location: field(positional::EXIT_LOCATION),
            route_info: field(positional::ROUTE),
            toll_amount: amount(positional::TOLL_AMOUNT),
            base_amount: amount(positional::BASE_AMOUNT),
            discount_amount: amount(positional::DISCOUNT_AMOUNT),
            mileage: amount(positional::MILEAGE),
            vehicle_class: parse_vehicle_class(get_field_safe(row, positional::VEHICLE_CLASS)),
            vehicle_number: field(positional::VEHICLE_NUMBER),
            card_identifier: field(positional::CARD_IDENTIFIER),
            notes: field(positional::NOTES),
        })
    }

    fn name(&self) -> &'static str {
        "positional"
    }
}
