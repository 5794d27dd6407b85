//! Test utilities and fixtures for ETC CSV parser testing
//!
//! This module provides sample exports in both the header and positional
//! layouts, plus helpers for building temporary files.

use std::io::Write;
use tempfile::NamedTempFile;

mod header_tests;

/// Header row of the older （自）/（至） export layout
pub const TEST_HEADER: &str = "利用年月日（自）,時分（自）,利用年月日（至）,時分（至）,利用ＩＣ（自）,利用ＩＣ（至）,割引前料金,ＥＴＣ割引額,通行料金,車種,車両番号,ＥＴＣカード番号,備考";

/// A data row matching [`TEST_HEADER`]
pub const TEST_HEADER_ROW: &str =
    r#"25/09/01,08:00,25/09/01,09:00,東京,横浜,"1,500",-300,"1,200",2,品川300あ1234,********12345678,"#;

/// A 15-cell row in the fixed legacy layout
pub const TEST_POSITIONAL_ROW: &str =
    "25/09/02,10:15,25/09/02,11:05,大阪,京都,名神高速,980,1200,-220,12,1,なにわ500さ5678,********87654321,出張";

/// Build a CSV document from a header line and data lines
pub fn build_csv(header: Option<&str>, rows: &[&str]) -> String {
    let mut lines: Vec<&str> = Vec::with_capacity(rows.len() + 1);
    if let Some(header) = header {
        lines.push(header);
    }
    lines.extend_from_slice(rows);
    let mut csv = lines.join("\n");
    csv.push('\n');
    csv
}

/// Sample export with the test header and `rows` copies of its data row
pub fn create_header_csv(rows: usize) -> String {
    build_csv(Some(TEST_HEADER), &vec![TEST_HEADER_ROW; rows])
}

/// Encode UTF-8 text as Shift_JIS bytes
pub fn to_shift_jis(text: &str) -> Vec<u8> {
    let (bytes, _, had_errors) = encoding_rs::SHIFT_JIS.encode(text);
    assert!(!had_errors, "fixture text must be representable in Shift_JIS");
    bytes.into_owned()
}

/// Helper to create a temporary file with given bytes
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}
