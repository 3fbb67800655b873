/// Scanner module — orchestrates filesystem scanning.
///
/// A scan runs on a background thread: a `jwalk` traversal enumerates
/// entries, record building fans out across rayon, and finished batches
/// are appended to a **shared record collection** the consumer can read
/// while the scan is running.
pub mod progress;
mod walk;

use crate::classify::{ContentSniffer, InferSniffer};
use crate::model::FileRecord;
use progress::ScanProgress;

use crossbeam_channel::Receiver;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use thiserror::Error;
use tracing::info;

/// A shared, concurrently-readable record collection.
///
/// The scan thread holds a write lock briefly when appending batches of
/// records. Consumers take a read lock to inspect progress so far.
pub type LiveRecords = Arc<RwLock<Vec<FileRecord>>>;

/// Maximum number of progress messages that may queue up in the channel.
///
/// A consumer that stops draining applies back-pressure: the scanner
/// stalls on `send` rather than consuming unbounded heap.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// Scan-level failures the library surface can produce.
///
/// Per-file failures are data (`RecordOutcome::Error`), never an `Err`.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan progress channel disconnected before completion")]
    ChannelDisconnected,
}

/// Walker configuration for one scan.
#[derive(Clone)]
pub struct ScanOptions {
    /// Follow symlinks during traversal.
    pub follow_links: bool,
    /// Visit hidden files and directories.
    pub include_hidden: bool,
    /// Content-sniffing capability handed to the classifier.
    pub sniffer: Arc<dyn ContentSniffer>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            follow_links: false,
            include_hidden: true,
            sniffer: Arc::new(InferSniffer),
        }
    }
}

/// Handle to a running or completed scan. Allows cancellation and
/// receiving progress updates.
pub struct ScanHandle {
    /// Receiver for progress updates from the scan thread.
    pub progress_rx: Receiver<ScanProgress>,
    /// Shared collection that is populated incrementally during scanning.
    pub live_records: LiveRecords,
    /// Flag to request cancellation.
    cancel_flag: Arc<AtomicBool>,
    /// Join handle for the scan thread.
    _thread: Option<thread::JoinHandle<()>>,
}

impl ScanHandle {
    /// Request the scan to stop as soon as possible.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }
}

/// Start a new scan on a background thread.
///
/// Returns a `ScanHandle` for receiving progress, accessing the live
/// record collection, and requesting cancellation.
pub fn start_scan(root_path: PathBuf, options: ScanOptions) -> ScanHandle {
    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let cancel_clone = cancel_flag.clone();

    let live_records: LiveRecords = Arc::new(RwLock::new(Vec::new()));
    let records_clone = live_records.clone();

    let thread = thread::Builder::new()
        .name("fsaudit-scanner".into())
        .spawn(move || {
            info!("Starting scan of {}", root_path.display());
            walk::walk_records(
                root_path,
                &options,
                &progress_tx,
                &cancel_clone,
                &records_clone,
            );
        })
        .expect("failed to spawn scanner thread");

    ScanHandle {
        progress_rx,
        live_records,
        cancel_flag,
        _thread: Some(thread),
    }
}

/// Run a scan to completion and return the assembled records.
///
/// Blocks the calling thread until the scan finishes. Per-file failures
/// are inside the returned records, not an `Err` — the only library-level
/// failure is the scan thread dying before it reports completion.
pub fn scan_directory(
    root_path: impl Into<PathBuf>,
    options: ScanOptions,
) -> Result<Vec<FileRecord>, ScanError> {
    let handle = start_scan(root_path.into(), options);
    loop {
        match handle.progress_rx.recv() {
            Ok(ScanProgress::Complete { .. } | ScanProgress::Cancelled) => break,
            Ok(_) => continue,
            Err(_) => return Err(ScanError::ChannelDisconnected),
        }
    }
    let records = std::mem::take(&mut *handle.live_records.write());
    Ok(records)
}
