/// Parallel directory walker — enumerates entries with `jwalk` and builds
/// records in rayon-parallel batches.
///
/// # Lock-contention mitigation
///
/// Appending one record per write lock would cost one lock cycle per
/// file. Instead, file paths accumulate in a local batch; the batch is
/// probed in parallel (stat + classify are the expensive syscalls, and
/// record building for distinct paths has no data dependency) and the
/// finished records are appended to the shared collection under a
/// **single write lock per batch**.
use crate::model::FileRecord;
use crate::probe::probe_file;
use crate::scanner::progress::ScanProgress;
use crate::scanner::{LiveRecords, ScanOptions};
use crossbeam_channel::Sender;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, warn};

/// Number of paths probed per batch.
///
/// Larger batches reduce lock pressure and amortise rayon dispatch;
/// smaller batches keep the live view fresher. The write lock is held
/// only for the append, never for the probes.
const PROBE_BATCH: usize = 1_024;

/// Cancellation is polled every this many walked entries.
const CANCEL_CHECK_INTERVAL: u64 = 1_000;

/// Progress updates are sent roughly every this many walked entries.
const UPDATE_INTERVAL: u64 = 5_000;

/// Running counters for one walk.
#[derive(Default)]
struct WalkTotals {
    files: u64,
    errors: u64,
    bytes: u64,
}

/// Probe everything in `batch` in parallel and append the records under
/// one write lock. Leaves `batch` empty.
fn flush_batch(
    batch: &mut Vec<PathBuf>,
    options: &ScanOptions,
    live_records: &LiveRecords,
    totals: &mut WalkTotals,
) {
    if batch.is_empty() {
        return;
    }
    let paths = std::mem::take(batch);
    let sniffer = options.sniffer.as_ref();

    let records: Vec<FileRecord> = paths
        .into_par_iter()
        .map(|path| probe_file(&path, sniffer))
        .collect();

    for record in &records {
        match record.metadata() {
            Some(meta) => {
                totals.files += 1;
                totals.bytes += meta.size;
            }
            None => totals.errors += 1,
        }
    }

    live_records.write().extend(records);
}

/// Walk a directory tree and populate `live_records`.
///
/// Every regular file reachable under the root yields exactly one record.
/// Walk-level failures (unreadable directories) become Error-outcome
/// records like any per-file probe failure, so no failure is silently
/// dropped. Directories themselves produce no record.
pub(crate) fn walk_records(
    root_path: PathBuf,
    options: &ScanOptions,
    progress_tx: &Sender<ScanProgress>,
    cancel_flag: &AtomicBool,
    live_records: &LiveRecords,
) {
    let start = Instant::now();
    let mut totals = WalkTotals::default();
    let mut batch: Vec<PathBuf> = Vec::with_capacity(PROBE_BATCH);
    let mut walked: u64 = 0;

    let walker = jwalk::WalkDir::new(&root_path)
        .skip_hidden(!options.include_hidden)
        .follow_links(options.follow_links)
        .parallelism(jwalk::Parallelism::RayonNewPool(num_cpus::get()));

    for entry_result in walker {
        walked += 1;
        if walked.is_multiple_of(CANCEL_CHECK_INTERVAL) && cancel_flag.load(Ordering::Relaxed) {
            flush_batch(&mut batch, options, live_records, &mut totals);
            let _ = progress_tx.send(ScanProgress::Cancelled);
            return;
        }

        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                // jwalk errors are typically access-denied on directories.
                let err_path = err
                    .path()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| root_path.clone());
                let message = err.to_string();
                warn!("walk error at {}: {message}", err_path.display());

                totals.errors += 1;
                live_records
                    .write()
                    .push(FileRecord::failed(&err_path, message.clone()));
                let _ = progress_tx.send(ScanProgress::Error {
                    path: err_path.display().to_string(),
                    message,
                });
                continue;
            }
        };

        // Only regular files produce records; directories are traversal
        // structure and symlinks follow the walker's policy.
        if !entry.file_type().is_file() {
            continue;
        }

        batch.push(entry.path());
        if batch.len() >= PROBE_BATCH {
            flush_batch(&mut batch, options, live_records, &mut totals);
        }

        if walked.is_multiple_of(UPDATE_INTERVAL) {
            // Flush first so live counters include this stretch of files.
            flush_batch(&mut batch, options, live_records, &mut totals);
            let _ = progress_tx.send(ScanProgress::Update {
                files_found: totals.files,
                errors_found: totals.errors,
                total_size: totals.bytes,
                current_path: entry.path().display().to_string(),
            });
        }
    }

    flush_batch(&mut batch, options, live_records, &mut totals);

    let duration = start.elapsed();
    debug!(
        "Scan walk complete: {} files, {} errors in {duration:?}",
        totals.files, totals.errors
    );

    let _ = progress_tx.send(ScanProgress::Complete {
        duration,
        error_count: totals.errors,
    });
}
