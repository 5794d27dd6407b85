//! Tests for record conversion

use super::*;
use crate::app::services::record_processor::conversion::{
    convert, resolve_amount, resolve_date, vehicle_label,
};
use chrono::NaiveDate;

#[test]
fn test_convert_uses_exit_date_and_toll() {
    let record = UsageRecord {
        entry_date: "25/08/31".to_string(),
        exit_date: "25/09/01".to_string(),
        ..create_test_record("********12345678")
    };

    let simplified = convert(&record).unwrap();

    assert_eq!(
        simplified.resolved_date,
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    );
    assert_eq!(simplified.amount, 1200);
    assert_eq!(simplified.vehicle_label, "Class 2");
    assert_eq!(simplified.entry_location, "東京");
    assert_eq!(simplified.exit_location, "横浜");
    assert_eq!(simplified.route_info, "首都高");
    assert_eq!(simplified.card_identifier, "********12345678");
}

#[test]
fn test_invalid_exit_date_falls_back_to_entry() {
    let record = UsageRecord {
        entry_date: "25/08/31".to_string(),
        exit_date: "invalid".to_string(),
        ..create_test_record("card")
    };

    assert_eq!(
        resolve_date(&record).unwrap(),
        NaiveDate::from_ymd_opt(2025, 8, 31).unwrap()
    );
}

#[test]
fn test_empty_exit_date_falls_back_to_entry() {
    let record = UsageRecord {
        exit_date: String::new(),
        ..create_test_record("card")
    };

    assert!(convert(&record).is_ok());
}

#[test]
fn test_both_dates_invalid_fails() {
    let record = UsageRecord {
        entry_date: "bad".to_string(),
        exit_date: "25/09".to_string(),
        ..create_test_record("card")
    };

    let error = convert(&record).unwrap_err();
    assert!(matches!(error, Error::UnresolvableDate { .. }));
    assert!(error.to_string().contains("25/09"));
}

#[test]
fn test_negative_amount_is_sign_flipped() {
    let record = UsageRecord {
        toll_amount: -850,
        ..create_test_record("card")
    };

    assert_eq!(resolve_amount(&record), 850);
}

#[test]
fn test_zero_toll_uses_base_amount() {
    let record = UsageRecord {
        toll_amount: 0,
        base_amount: 1500,
        ..create_test_record("card")
    };
    assert_eq!(resolve_amount(&record), 1500);

    let negative_base = UsageRecord {
        toll_amount: 0,
        base_amount: -400,
        ..create_test_record("card")
    };
    assert_eq!(resolve_amount(&negative_base), 400);
}

#[test]
fn test_vehicle_label() {
    assert_eq!(vehicle_label(0), "Class 0");
    assert_eq!(vehicle_label(5), "Class 5");
}
