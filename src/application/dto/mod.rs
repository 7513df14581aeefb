/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod analysis_request;
mod comparison_response;
mod publish;
mod table_style;

pub use analysis_request::AnalysisRequest;
pub use comparison_response::ComparisonResponse;
pub use publish::{PublishRequest, PublishResponse, RunDirectory};
pub use table_style::TableStyle;
