//! Tests for header detection and row mapping

use super::*;
use crate::app::models::RowRejection;
use crate::app::services::etc_csv_parser::header::HeaderMap;
use crate::app::services::etc_csv_parser::row_mapper::{
    HeaderRowMapper, PositionalRowMapper, RowMapper, select_mapper,
};
use crate::constants::header_names;
use csv::StringRecord;

fn row(text: &str) -> StringRecord {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    reader.records().next().unwrap().unwrap()
}

#[test]
fn test_header_detection_by_keyword() {
    assert!(HeaderMap::is_header_row(&row(TEST_HEADER)));
    assert!(HeaderMap::is_header_row(&row("日付,通行料金")));
    assert!(HeaderMap::is_header_row(&row("ETCカード番号")));
    assert!(!HeaderMap::is_header_row(&row(TEST_POSITIONAL_ROW)));
    assert!(!HeaderMap::is_header_row(&row(TEST_HEADER_ROW)));
}

#[test]
fn test_header_map_indices() {
    let headers = HeaderMap::detect(&row(TEST_HEADER)).unwrap();

    assert_eq!(headers.len(), 13);
    assert_eq!(headers.get_index("利用年月日（自）"), Some(0));
    assert_eq!(headers.get_index("ＥＴＣカード番号"), Some(11));
    assert!(headers.has_column("備考"));
    assert!(!headers.has_column("経路情報"));
    assert_eq!(headers.resolve(header_names::TOLL_AMOUNT), Some("通行料金"));
    assert_eq!(headers.resolve(header_names::ROUTE), None);
}

#[test]
fn test_detect_returns_none_for_data_row() {
    assert!(HeaderMap::detect(&row(TEST_POSITIONAL_ROW)).is_none());
}

#[test]
fn test_header_names_are_trimmed_and_bom_stripped() {
    let headers = HeaderMap::from_row(&row("\u{feff}利用年月日（入）, 車種 ,カード番号"));

    assert_eq!(headers.get_index("利用年月日（入）"), Some(0));
    assert_eq!(headers.get_index("車種"), Some(1));
    assert_eq!(headers.get_index("カード番号"), Some(2));
}

#[test]
fn test_repeated_header_keeps_last_column() {
    let headers = HeaderMap::from_row(&row("料金,備考,料金"));
    assert_eq!(headers.get_index("料金"), Some(2));
}

#[test]
fn test_lookup_skips_candidates_beyond_row() {
    let headers = HeaderMap::from_row(&row("料金,備考,メモ,通行料金"));
    let short = row("100,note");

    // 通行料金 resolves to column 3, which this row does not have
    assert_eq!(headers.lookup(&short, header_names::TOLL_AMOUNT), "100");
    assert_eq!(headers.lookup(&short, header_names::NOTES), "note");
    assert_eq!(headers.lookup(&short, header_names::VEHICLE_CLASS), "");
}

#[test]
fn test_header_mapper_maps_all_fields() {
    let mapper = HeaderRowMapper::new(HeaderMap::from_row(&row(TEST_HEADER)));
    let record = mapper.map_row(&row(TEST_HEADER_ROW)).unwrap();

    assert_eq!(record.entry_date, "25/09/01");
    assert_eq!(record.entry_time, "08:00");
    assert_eq!(record.exit_date, "25/09/01");
    assert_eq!(record.exit_time, "09:00");
    assert_eq!(record.entry_location, "東京");
    assert_eq!(record.exit_location, "横浜");
    assert_eq!(record.route_info, "");
    assert_eq!(record.base_amount, 1500);
    assert_eq!(record.discount_amount, -300);
    assert_eq!(record.toll_amount, 1200);
    assert_eq!(record.vehicle_class, 2);
    assert_eq!(record.vehicle_number, "品川300あ1234");
    assert_eq!(record.card_identifier, "********12345678");
    assert_eq!(record.notes, "");
}

#[test]
fn test_header_mapper_newer_spellings() {
    let header = "利用年月日(入),時刻(入),利用年月日(出),時刻(出),利用IC(入),利用IC(出),経路情報,ETC料金,ETCカード番号";
    let mapper = HeaderRowMapper::new(HeaderMap::from_row(&row(header)));
    let record = mapper
        .map_row(&row("2025/10/05,07:30,2025/10/05,08:10,川口,浦和,首都高,650,****5555"))
        .unwrap();

    assert_eq!(record.entry_date, "2025/10/05");
    assert_eq!(record.exit_time, "08:10");
    assert_eq!(record.entry_location, "川口");
    assert_eq!(record.route_info, "首都高");
    assert_eq!(record.toll_amount, 650);
    assert_eq!(record.card_identifier, "****5555");
}

#[test]
fn test_post_payment_overrides_toll() {
    let header = format!("{},後納料金", TEST_HEADER);
    let mapper = HeaderRowMapper::new(HeaderMap::from_row(&row(&header)));

    let with_post_payment = mapper
        .map_row(&row(&format!("{},980", TEST_HEADER_ROW)))
        .unwrap();
    assert_eq!(with_post_payment.toll_amount, 980);

    let zero_post_payment = mapper
        .map_row(&row(&format!("{},0", TEST_HEADER_ROW)))
        .unwrap();
    assert_eq!(zero_post_payment.toll_amount, 1200);
}

#[test]
fn test_header_mapper_non_numeric_vehicle_class() {
    let mapper = HeaderRowMapper::new(HeaderMap::from_row(&row(TEST_HEADER)));
    let data = TEST_HEADER_ROW.replace(",2,品川", ",普通,品川");
    let record = mapper.map_row(&row(&data)).unwrap();

    assert_eq!(record.vehicle_class, 0);
    assert_eq!(record.toll_amount, 1200);
}

#[test]
fn test_header_mapper_bad_amount_becomes_zero() {
    let mapper = HeaderRowMapper::new(HeaderMap::from_row(&row(TEST_HEADER)));
    let data = TEST_HEADER_ROW.replace(r#""1,200""#, "N/A");
    let record = mapper.map_row(&row(&data)).unwrap();

    assert_eq!(record.toll_amount, 0);
    assert_eq!(record.base_amount, 1500);
}

#[test]
fn test_positional_mapper_maps_fixed_offsets() {
    let record = PositionalRowMapper.map_row(&row(TEST_POSITIONAL_ROW)).unwrap();

    assert_eq!(record.entry_date, "25/09/02");
    assert_eq!(record.entry_time, "10:15");
    assert_eq!(record.exit_date, "25/09/02");
    assert_eq!(record.exit_time, "11:05");
    assert_eq!(record.entry_location, "大阪");
    assert_eq!(record.exit_location, "京都");
    assert_eq!(record.route_info, "名神高速");
    assert_eq!(record.toll_amount, 980);
    assert_eq!(record.base_amount, 1200);
    assert_eq!(record.discount_amount, -220);
    assert_eq!(record.mileage, 12);
    assert_eq!(record.vehicle_class, 1);
    assert_eq!(record.vehicle_number, "なにわ500さ5678");
    assert_eq!(record.card_identifier, "********87654321");
    assert_eq!(record.notes, "出張");
}

#[test]
fn test_positional_mapper_thirteen_cells_is_enough() {
    let thirteen = "25/09/02,10:15,25/09/02,11:05,大阪,京都,名神高速,980,1200,-220,12,1,なにわ500さ5678";
    let record = PositionalRowMapper.map_row(&row(thirteen)).unwrap();

    assert_eq!(record.vehicle_number, "なにわ500さ5678");
    assert_eq!(record.card_identifier, "");
    assert_eq!(record.notes, "");
}

#[test]
fn test_positional_mapper_ignores_extra_cells() {
    let record = PositionalRowMapper
        .map_row(&row(&format!("{},extra,more", TEST_POSITIONAL_ROW)))
        .unwrap();
    assert_eq!(record.notes, "出張");
}

#[test]
fn test_positional_mapper_rejects_short_rows() {
    let rejection = PositionalRowMapper
        .map_row(&row("25/09/02,10:15,25/09/02"))
        .unwrap_err();

    assert!(matches!(
        rejection,
        RowRejection::TooFewFields {
            found: 3,
            required: 13
        }
    ));
}

#[test]
fn test_positional_mapper_non_numeric_vehicle_class() {
    let data = TEST_POSITIONAL_ROW.replace(",12,1,", ",12,abc,");
    let record = PositionalRowMapper.map_row(&row(&data)).unwrap();
    assert_eq!(record.vehicle_class, 0);
}

#[test]
fn test_select_mapper() {
    let (mapper, has_header) = select_mapper(&row(TEST_HEADER));
    assert!(has_header);
    assert_eq!(mapper.name(), "header");

    let (mapper, has_header) = select_mapper(&row(TEST_POSITIONAL_ROW));
    assert!(!has_header);
    assert_eq!(mapper.name(), "positional");
}
