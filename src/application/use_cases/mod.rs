/// Use cases module containing application business logic orchestration
mod compare_tools;
mod load_report;
mod publish_report;
mod record_cbom;

pub use compare_tools::CompareToolsUseCase;
pub use load_report::LoadReportUseCase;
pub use publish_report::{PublishReportUseCase, SUMMARY_FILE_NAME};
pub use record_cbom::RecordCbomUseCase;
