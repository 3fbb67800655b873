/// Scan progress reporting — lightweight messages sent from the scan
/// thread to the consumer via a crossbeam channel.

use std::time::Duration;

/// Progress updates sent from the scan thread.
///
/// The record data itself lives in the shared live collection; these
/// messages carry only counters and status flags.
#[derive(Debug)]
pub enum ScanProgress {
    /// Periodic update with running totals.
    Update {
        files_found: u64,
        errors_found: u64,
        total_size: u64,
        current_path: String,
    },
    /// A non-fatal error (e.g. permission denied on one directory).
    /// The same failure is also captured as an Error-outcome record.
    Error { path: String, message: String },
    /// Scanning completed. The records are in the shared collection.
    Complete {
        duration: Duration,
        error_count: u64,
    },
    /// Scan was cancelled by the caller.
    Cancelled,
}
