/// Filesystem adapters for file I/O operations
mod cbom_directory;
mod cbom_store;
mod file_writer;
mod report_directory;

pub use cbom_directory::{CbomDirectoryReader, METRICS_FILE_NAME};
pub use cbom_store::FileSystemCbomStore;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use report_directory::ReportDirectory;
