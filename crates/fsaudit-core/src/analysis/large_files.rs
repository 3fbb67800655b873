/// Large-file detection over a completed record collection.
use crate::model::FileRecord;

/// Default size threshold in megabytes.
pub const DEFAULT_THRESHOLD_MB: u64 = 100;

/// Records whose size strictly exceeds `threshold_mb` megabytes.
///
/// Strict inequality: a file of exactly `threshold_mb` MB is excluded.
/// Error-outcome records never qualify. Results keep encounter order;
/// a report wanting a stable order must sort explicitly.
pub fn find_large(records: &[FileRecord], threshold_mb: u64) -> Vec<&FileRecord> {
    let threshold_bytes = threshold_mb * 1024 * 1024;
    records
        .iter()
        .filter(|r| r.metadata().is_some_and(|m| m.size > threshold_bytes))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Category;
    use crate::model::FileMetadata;

    const MB: u64 = 1024 * 1024;

    fn file(path: &str, size: u64) -> FileRecord {
        FileRecord::with_metadata(
            path,
            FileMetadata {
                size,
                mode: 0o644,
                modified: None,
                extension: None,
                category: Category::Unknown,
            },
        )
    }

    /// Exactly-at-threshold files are excluded; one byte over qualifies.
    #[test]
    fn threshold_is_strict() {
        let records = vec![
            file("exact", 100 * MB),
            file("over", 100 * MB + 1),
            file("under", 100 * MB - 1),
        ];

        let large = find_large(&records, 100);
        assert_eq!(large.len(), 1);
        assert_eq!(large[0].path, std::path::PathBuf::from("over"));
    }

    #[test]
    fn error_records_never_qualify() {
        let records = vec![
            FileRecord::failed("ghost.bin", "No such file or directory"),
            file("big.bin", 150 * MB),
        ];

        let large = find_large(&records, 100);
        assert_eq!(large.len(), 1);
        assert_eq!(large[0].path, std::path::PathBuf::from("big.bin"));
    }

    /// Results preserve the order records were encountered in.
    #[test]
    fn encounter_order_is_preserved() {
        let records = vec![
            file("second.iso", 300 * MB),
            file("small.txt", MB),
            file("first.img", 200 * MB),
        ];

        let large = find_large(&records, 100);
        let paths: Vec<_> = large.iter().map(|r| r.path.to_str().unwrap()).collect();
        assert_eq!(paths, ["second.iso", "first.img"]);
    }

    #[test]
    fn zero_threshold_keeps_all_nonempty_files() {
        let records = vec![file("a", 1), file("b", 0)];
        let large = find_large(&records, 0);
        assert_eq!(large.len(), 1);
    }

    #[test]
    fn default_threshold_is_100_mb() {
        assert_eq!(DEFAULT_THRESHOLD_MB, 100);
    }
}
