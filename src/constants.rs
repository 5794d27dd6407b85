//! Application constants for the ETC data processor
//!
//! This module contains the header keyword set, the historical header
//! spellings for every logical column, the positional column layout and
//! the default values used throughout the processor.

// =============================================================================
// Service Identity
// =============================================================================

/// Service name reported by health checks
pub const SERVICE_NAME: &str = "etc_data_processor";

/// Service version reported by health checks
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Encoding
// =============================================================================

/// Encoding label of exported ETC usage files
pub const DEFAULT_INPUT_ENCODING: &str = "shift_jis";

/// UTF-8 byte order mark, stripped from decoded text
pub const UTF8_BOM: char = '\u{feff}';

// =============================================================================
// Header Detection
// =============================================================================

/// Substrings whose presence in any first-row cell marks the row as a header
///
/// Covers the date, time, interchange, fee and card columns of every known
/// export layout.
pub const HEADER_KEYWORDS: &[&str] = &["利用年月日", "時刻", "利用IC", "料金", "カード番号"];

/// Candidate header spellings per logical column, probed in order
///
/// Older exports use （自）/（至） suffixes, newer ones （入）/（出）; some
/// tools emit half-width parentheses.
pub mod header_names {
    pub const ENTRY_DATE: &[&str] = &["利用年月日（入）", "利用年月日(入)", "利用年月日（自）", "入口日付"];
    pub const ENTRY_TIME: &[&str] = &["時刻（入）", "時刻(入)", "時分（自）", "入口時刻"];
    pub const EXIT_DATE: &[&str] = &["利用年月日（出）", "利用年月日(出)", "利用年月日（至）", "出口日付"];
    pub const EXIT_TIME: &[&str] = &["時刻（出）", "時刻(出)", "時分（至）", "出口時刻"];
    pub const ENTRY_LOCATION: &[&str] = &["利用IC（入）", "利用IC(入)", "利用ＩＣ（自）", "入口IC", "入口"];
    pub const EXIT_LOCATION: &[&str] = &["利用IC（出）", "利用IC(出)", "利用ＩＣ（至）", "出口IC", "出口"];
    pub const ROUTE: &[&str] = &["経路情報", "路線", "経路"];

    /// Fee before discount
    pub const BASE_AMOUNT: &[&str] = &["割引前料金", "通行料金", "通常料金"];

    /// Discount, usually negative
    pub const DISCOUNT_AMOUNT: &[&str] = &["ＥＴＣ割引額", "ETC割引額", "割引額"];

    /// Fee actually charged
    pub const TOLL_AMOUNT: &[&str] = &["通行料金", "ETC料金", "料金"];

    /// Deferred-payment fee; overrides the charged fee when non-zero
    pub const POST_PAYMENT_AMOUNT: &[&str] = &["後納料金", "後払料金"];

    pub const MILEAGE: &[&str] = &["マイレージ", "マイレージポイント"];

    pub const VEHICLE_CLASS: &[&str] = &["車種", "車両区分", "車種区分"];
    pub const VEHICLE_NUMBER: &[&str] = &["車両番号", "ナンバー", "車番"];
    pub const CARD_IDENTIFIER: &[&str] = &["ＥＴＣカード番号", "ETCカード番号", "カード番号", "カード"];
    pub const NOTES: &[&str] = &["備考", "メモ", "注記"];
}

// =============================================================================
// Positional Layout
// =============================================================================

/// Column indices of header-less exports
pub mod positional {
    pub const ENTRY_DATE: usize = 0;
    pub const ENTRY_TIME: usize = 1;
    pub const EXIT_DATE: usize = 2;
    pub const EXIT_TIME: usize = 3;
    pub const ENTRY_LOCATION: usize = 4;
    pub const EXIT_LOCATION: usize = 5;
    pub const ROUTE: usize = 6;
    pub const TOLL_AMOUNT: usize = 7;
    pub const BASE_AMOUNT: usize = 8;
    pub const DISCOUNT_AMOUNT: usize = 9;
    pub const MILEAGE: usize = 10;
    pub const VEHICLE_CLASS: usize = 11;
    pub const VEHICLE_NUMBER: usize = 12;
    pub const CARD_IDENTIFIER: usize = 13;
    pub const NOTES: usize = 14;

    /// Rows with fewer cells are dropped in positional mode
    pub const MIN_FIELDS: usize = 13;
}

// =============================================================================
// Dates
// =============================================================================

/// Two-digit years below this map to 20xx, the rest to 19xx
pub const PIVOT_YEAR: i32 = 50;

/// Years below this are treated as two-digit years
pub const TWO_DIGIT_YEAR_LIMIT: i32 = 100;

// =============================================================================
// Record Field Names
// =============================================================================

/// Field names used in diagnostics and validation reports
pub mod fields {
    pub const CARD_IDENTIFIER: &str = "card_number";
    pub const ENTRY_DATE: &str = "entry_date";
    pub const EXIT_DATE: &str = "exit_date";
    pub const CSV: &str = "csv";
    pub const ROW: &str = "row";
}

// =============================================================================
// Processing Defaults
// =============================================================================

/// Default upper bound on parsed rows per batch (0 = unlimited)
pub const DEFAULT_MAX_BATCH_SIZE: usize = 10_000;

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default JSON-lines output file for the CLI store
pub const DEFAULT_OUTPUT_PATH: &str = "etc_records.jsonl";

/// Configuration directory name under the user config dir
pub const CONFIG_DIR_NAME: &str = "etc-data-processor";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Batches at least this large get a progress bar in the CLI
pub const PROGRESS_BAR_THRESHOLD: usize = 1_000;
