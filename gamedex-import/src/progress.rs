//! Progress reporting for bulk imports.

/// Callback invoked as seed records are inserted.
pub trait ImportProgress {
    fn on_record(&self, done: usize, total: usize);
}

/// Logs a progress line every 100 records.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_record(&self, done: usize, total: usize) {
        if done % 100 == 0 {
            log::info!("imported {done}/{total} games...");
        }
    }
}

/// No-op progress reporter.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_record(&self, _done: usize, _total: usize) {}
}
