use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts driving a benchmark to distinguish between
/// an empty analysis and a genuine failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the report was generated
    Success = 0,
    /// Nothing to report: no CBOM files were found for any tool
    NoData = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (file I/O error, invalid report, network setup error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::NoData => write!(f, "No Data (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for CBOM benchmarking.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// keeping a hint for the user in every message.
#[derive(Debug, Error)]
pub enum CbomBenchError {
    #[error("CBOM directory not found: {path}\n\n💡 Hint: Run a benchmark first or point --cbom-dir at the directory holding one subdirectory per tool")]
    CbomDirectoryNotFound { path: PathBuf },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Report not found: {path}\n\n💡 Hint: Use the `list` command to see the available reports")]
    ReportNotFound { path: PathBuf },

    #[error("Failed to parse report: {path}\nDetails: {details}\n\n💡 Hint: Only CSV files written by `analyze --save` can be loaded")]
    ReportParseError { path: PathBuf, details: String },

    #[error("Invalid repository URL: {url}\n\n💡 Hint: Use https://github.com/<owner>/<repo> or git@github.com:<owner>/<repo>.git")]
    InvalidRepositoryUrl { url: String },

    /// Validation error for domain values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
