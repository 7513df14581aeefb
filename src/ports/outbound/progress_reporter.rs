/// ProgressReporter port for reporting progress during a benchmark analysis
///
/// Progress goes to the user (typically stderr) so that tables written to
/// stdout stay machine-readable.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress through a batch of files or lookups
    ///
    /// # Arguments
    /// * `current` - Items processed so far
    /// * `total` - Total expected items
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
