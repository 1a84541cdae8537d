pub mod advisory;
pub mod data_sync;
pub mod field_status;
pub mod prompts;

pub use advisory::{AdvisoryCatalog, AdvisoryEngine};
pub use data_sync::{DataSyncService, FieldSummary};
pub use prompts::CropAdvisoryRequest;
