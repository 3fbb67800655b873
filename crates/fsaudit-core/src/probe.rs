/// Record builder — exactly one metadata probe per path.
use crate::classify::{classify, ContentSniffer};
use crate::model::{FileMetadata, FileRecord};
use chrono::{DateTime, Local};
use compact_str::CompactString;
use std::fs;
use std::path::Path;

/// Probe one path and build its record.
///
/// Performs a single `symlink_metadata` call. Probe failure (missing
/// file, permission denied, race against deletion, broken link) is
/// captured as the record's `Error` outcome — failure is data, not
/// control flow — so one bad path never halts a scan. Failures are not
/// retried; transient races surface as a one-shot failure for that entry.
pub fn probe_file(path: &Path, sniffer: &dyn ContentSniffer) -> FileRecord {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) => return FileRecord::failed(path, err.to_string()),
    };

    let extension = path.extension().and_then(|e| e.to_str()).map(|e| {
        let mut ext = CompactString::new(e);
        ext.make_ascii_lowercase();
        ext
    });

    FileRecord::with_metadata(
        path,
        FileMetadata {
            size: meta.len(),
            mode: entry_mode(&meta),
            modified: meta.modified().ok().map(DateTime::<Local>::from),
            extension,
            category: classify(path, sniffer),
        },
    )
}

/// Raw mode bits for the entry.
///
/// The permission model is POSIX-only: non-Unix builds compile but
/// report mode 0, which triggers no risk rule.
#[cfg(unix)]
fn entry_mode(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    meta.mode()
}

#[cfg(not(unix))]
fn entry_mode(_meta: &fs::Metadata) -> u32 {
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Category, NoopSniffer};
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn probe_captures_size_extension_and_category() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.txt");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(b"hello world").unwrap();

        let record = probe_file(&path, &NoopSniffer);
        let meta = record.metadata().expect("probe should succeed");
        assert_eq!(meta.size, 11);
        assert_eq!(meta.extension.as_deref(), Some("txt"));
        assert_eq!(meta.category, Category::Text);
        assert!(meta.modified.is_some());
    }

    /// Extensions are stored lowercased so lookups and display agree.
    #[test]
    fn probe_lowercases_extension() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("REPORT.MD");
        fs::write(&path, "# heading").unwrap();

        let record = probe_file(&path, &NoopSniffer);
        let meta = record.metadata().unwrap();
        assert_eq!(meta.extension.as_deref(), Some("md"));
        assert_eq!(meta.category, Category::Text);
    }

    #[test]
    fn probe_missing_path_yields_error_record() {
        let record = probe_file(Path::new("/nonexistent/dir/gone.txt"), &NoopSniffer);
        assert!(record.is_error());
        assert!(!record.error().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn probe_captures_raw_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("open.sh");
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o777)).unwrap();

        let record = probe_file(&path, &NoopSniffer);
        let meta = record.metadata().unwrap();
        assert_eq!(meta.mode & 0o777, 0o777);
    }

    #[test]
    fn probe_extensionless_file_is_unknown() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("noext");
        fs::write(&path, "data").unwrap();

        let record = probe_file(&path, &NoopSniffer);
        let meta = record.metadata().unwrap();
        assert_eq!(meta.extension, None);
        assert_eq!(meta.category, Category::Unknown);
    }
}
