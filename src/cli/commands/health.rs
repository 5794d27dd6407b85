//! Health command implementation

use std::sync::Arc;

use crate::app::services::data_processor::DataProcessorService;
use crate::app::services::record_processor::MemoryStore;

/// Print the service health status as JSON
pub async fn run_health() -> anyhow::Result<()> {
    let service = DataProcessorService::new(Arc::new(MemoryStore::new()));
    println!("{}", serde_json::to_string_pretty(&service.health_check())?);
    Ok(())
}
