//! Tests for the data processor service


use crate::app::services::data_processor::DataProcessorService;
use crate::app::services::record_processor::MemoryStore;
use std::sync::Arc;

pub const HEADER: &str = "利用年月日（自）,時分（自）,利用年月日（至）,時分（至）,利用ＩＣ（自）,利用ＩＣ（至）,割引前料金,ＥＴＣ割引額,通行料金,車種,車両番号,ＥＴＣカード番号,備考";

/// A header row data line for the given card and charged fee
pub fn data_row(card: &str, fee: i64) -> String {
    format!(
        "25/09/01,08:00,25/09/01,09:00,東京,横浜,1500,-300,{},2,品川300あ1234,{},",
        fee, card
    )
}

/// A complete export with one line per (card, fee) pair
pub fn create_csv(rows: &[(&str, i64)]) -> String {
    let mut csv = String::from(HEADER);
    for (card, fee) in rows {
        csv.push('\n');
        csv.push_str(&data_row(card, *fee));
    }
    csv.push('\n');
    csv
}

pub fn memory_service() -> (Arc<MemoryStore>, DataProcessorService) {
    let store = Arc::new(MemoryStore::new());
    let service = DataProcessorService::new(store.clone());
    (store, service)
}
