/// Content-sniffing capability — the optional second phase of
/// classification.
///
/// Sniffing is injectable so that a deployment can run without it (or a
/// test can substitute its own): the walker holds a `&dyn ContentSniffer`
/// and never knows which implementation is behind it.
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes read from the head of a file for magic-number detection.
/// Every signature `infer` recognises sits well within this prefix.
const SNIFF_PREFIX_LEN: usize = 8192;

/// A source of MIME-type guesses for file content.
pub trait ContentSniffer: Send + Sync {
    /// Best-effort MIME type (e.g. `image/png`) for the file's content.
    ///
    /// Returns `None` when the type cannot be determined or the file
    /// cannot be read. Implementations swallow their own I/O errors —
    /// classification must never fail a scan.
    fn sniff(&self, path: &Path) -> Option<String>;
}

/// Magic-number sniffer backed by the `infer` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct InferSniffer;

impl ContentSniffer for InferSniffer {
    fn sniff(&self, path: &Path) -> Option<String> {
        let mut head = [0u8; SNIFF_PREFIX_LEN];
        let mut file = File::open(path).ok()?;

        // A single read may return short; fill until EOF or full buffer.
        let mut filled = 0;
        loop {
            match file.read(&mut head[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(_) => return None,
            }
        }

        infer::get(&head[..filled]).map(|kind| kind.mime_type().to_string())
    }
}

/// Sniffer that never identifies anything.
///
/// Selected when content inspection is disabled; every file degrades to
/// extension-only classification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSniffer;

impl ContentSniffer for NoopSniffer {
    fn sniff(&self, _path: &Path) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn infer_sniffer_identifies_png_magic() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pic");
        let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0u8; 32]);
        fs::write(&path, bytes).unwrap();

        assert_eq!(InferSniffer.sniff(&path), Some("image/png".to_string()));
    }

    #[test]
    fn infer_sniffer_returns_none_for_plain_bytes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("plain");
        fs::write(&path, "no magic here").unwrap();

        assert_eq!(InferSniffer.sniff(&path), None);
    }

    /// A missing file is a swallowed error, not a panic or an Err.
    #[test]
    fn infer_sniffer_swallows_open_failure() {
        assert_eq!(InferSniffer.sniff(Path::new("/nonexistent/file")), None);
    }

    #[test]
    fn infer_sniffer_handles_empty_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty");
        fs::write(&path, b"").unwrap();

        assert_eq!(InferSniffer.sniff(&path), None);
    }

    #[test]
    fn noop_sniffer_always_declines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pic.png");
        fs::write(&path, [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]).unwrap();

        assert_eq!(NoopSniffer.sniff(&path), None);
    }
}
