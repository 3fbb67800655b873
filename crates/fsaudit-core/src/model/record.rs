/// Per-file records — the unit of data every other component consumes.
///
/// A scan produces a flat `Vec<FileRecord>`, one record per visited path.
/// Success and failure are a tagged sum, not optional fields, so a record
/// can never carry both metadata and an error.
use crate::classify::Category;
use chrono::{DateTime, Local};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata captured by one successful probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Logical size in bytes.
    pub size: u64,

    /// Raw POSIX mode bits, verbatim from the probe.
    ///
    /// Kept alongside any display rendering because risk evaluation
    /// needs the original bit-set, not a formatted string.
    pub mode: u32,

    /// Last-modified timestamp, when the platform reports one.
    pub modified: Option<DateTime<Local>>,

    /// Lowercased final extension without the dot. `None` when the file
    /// name has no extension.
    pub extension: Option<CompactString>,

    /// Content category. Always present on a successful probe.
    pub category: Category,
}

/// Outcome of probing one path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RecordOutcome {
    /// The probe succeeded and the file was classified.
    Metadata(FileMetadata),
    /// The probe failed; the cause is captured as data and the scan
    /// continued.
    Error { message: String },
}

/// One record per filesystem entry attempted.
///
/// Immutable after construction; the aggregator and risk evaluator hold
/// only borrowed read access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique key within one scan.
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: RecordOutcome,
}

impl FileRecord {
    /// Build a successful record.
    pub fn with_metadata(path: impl Into<PathBuf>, metadata: FileMetadata) -> Self {
        Self {
            path: path.into(),
            outcome: RecordOutcome::Metadata(metadata),
        }
    }

    /// Build a failed record carrying the probe's cause.
    pub fn failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            outcome: RecordOutcome::Error {
                message: message.into(),
            },
        }
    }

    /// The metadata, if the probe succeeded.
    pub fn metadata(&self) -> Option<&FileMetadata> {
        match &self.outcome {
            RecordOutcome::Metadata(meta) => Some(meta),
            RecordOutcome::Error { .. } => None,
        }
    }

    /// The failure cause, if the probe failed.
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            RecordOutcome::Metadata(_) => None,
            RecordOutcome::Error { message } => Some(message),
        }
    }

    /// `true` for Error-outcome records.
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, RecordOutcome::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metadata() -> FileMetadata {
        FileMetadata {
            size: 42,
            mode: 0o644,
            modified: None,
            extension: Some(CompactString::new("txt")),
            category: Category::Text,
        }
    }

    #[test]
    fn metadata_record_exposes_metadata_only() {
        let record = FileRecord::with_metadata("/tmp/a.txt", sample_metadata());
        assert!(record.metadata().is_some());
        assert!(record.error().is_none());
        assert!(!record.is_error());
    }

    #[test]
    fn error_record_exposes_error_only() {
        let record = FileRecord::failed("/tmp/gone", "No such file or directory");
        assert!(record.metadata().is_none());
        assert_eq!(record.error(), Some("No such file or directory"));
        assert!(record.is_error());
    }

    #[test]
    fn mode_survives_verbatim() {
        let mut meta = sample_metadata();
        meta.mode = 0o104_755;
        let record = FileRecord::with_metadata("/usr/bin/tool", meta);
        assert_eq!(record.metadata().unwrap().mode, 0o104_755);
    }
}
