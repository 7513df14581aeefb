use crate::shared::Result;

/// MetricsReader port for loading recorded run metrics
pub trait MetricsReader {
    /// Reads the raw metrics document (`durations.json`)
    ///
    /// # Returns
    /// `None` when no metrics have been recorded yet
    ///
    /// # Errors
    /// Returns an error if the document exists but cannot be read
    fn read_metrics(&self) -> Result<Option<String>>;
}
