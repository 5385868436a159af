/// Trait for reporting analysis progress.
///
/// The CLI implements this with indicatif bars; library callers that want
/// silence use [`SilentReporter`]. All methods have default no-op
/// implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_extract_start(&self, _total_documents: usize) {}
    fn on_extract_progress(&self, _documents_done: usize, _total_documents: usize) {}
    fn on_extract_complete(&self, _failed_documents: usize, _duration_secs: f64) {}
    fn on_score_start(&self, _total_pairs: usize) {}
    fn on_score_complete(&self, _total_pairs: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
