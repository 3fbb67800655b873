/// File classification — extension table first, content sniffing second.
///
/// Maps every file to exactly one [`Category`]. Phase 1 consults a fixed
/// extension table and never touches file content. Phase 2 (only when the
/// extension lookup misses) asks the configured [`ContentSniffer`] for a
/// MIME type and maps it through a secondary table. Files that survive both
/// phases are `Other` (unrecognised extension) or `Unknown` (no extension).
pub mod sniff;

pub use sniff::{ContentSniffer, InferSniffer, NoopSniffer};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Broad content categories for grouping and per-category totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Text,
    Image,
    Video,
    Audio,
    Archive,
    Executable,
    /// The file has an extension, but not one the table recognises.
    Other,
    /// The file has no extension at all.
    Unknown,
}

impl Category {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Archive => "Archive",
            Self::Executable => "Executable",
            Self::Other => "Other",
            Self::Unknown => "Unknown",
        }
    }
}

/// Look up an extension in the static category table.
///
/// Zero-heap-allocation hot path: extensions are lowercased into a
/// fixed-size stack buffer (`[u8; 16]`) rather than allocating a `String`.
/// Extensions longer than 16 bytes cannot be in the table.
pub fn category_for_extension(ext: &str) -> Option<Category> {
    let bytes = ext.as_bytes();
    if bytes.len() > 16 {
        return None;
    }

    let mut lower = [0u8; 16];
    for (dest, &src) in lower.iter_mut().zip(bytes.iter()) {
        *dest = src.to_ascii_lowercase();
    }
    let lower_str = match std::str::from_utf8(&lower[..bytes.len()]) {
        Ok(s) => s,
        Err(_) => return None,
    };

    match lower_str {
        // Text
        "txt" | "md" | "csv" | "log" | "json" | "xml" | "yaml" | "yml" | "ini" | "conf" => {
            Some(Category::Text)
        }
        // Image
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" | "webp" => Some(Category::Image),
        // Video
        "mp4" | "avi" | "mov" | "mkv" | "flv" | "wmv" => Some(Category::Video),
        // Audio
        "mp3" | "wav" | "aac" | "flac" | "ogg" => Some(Category::Audio),
        // Archive
        "zip" | "tar" | "gz" | "bz2" | "xz" | "rar" | "7z" => Some(Category::Archive),
        // Executable
        "exe" | "bin" | "sh" | "bat" | "msi" | "run" | "app" | "out" => {
            Some(Category::Executable)
        }
        _ => None,
    }
}

/// Map a sniffed MIME type to a category.
///
/// Exact `application/*` subtypes (archives, executables, structured text)
/// are matched first, then the type's primary component.
fn category_for_mime(mime: &str) -> Option<Category> {
    match mime {
        "application/zip"
        | "application/x-tar"
        | "application/gzip"
        | "application/x-bzip2"
        | "application/x-xz"
        | "application/vnd.rar"
        | "application/x-7z-compressed" => return Some(Category::Archive),
        "application/x-executable"
        | "application/x-mach-binary"
        | "application/vnd.microsoft.portable-executable" => {
            return Some(Category::Executable)
        }
        "application/json" | "application/xml" => return Some(Category::Text),
        _ => {}
    }

    match mime.split('/').next().unwrap_or("") {
        "text" => Some(Category::Text),
        "image" => Some(Category::Image),
        "video" => Some(Category::Video),
        "audio" => Some(Category::Audio),
        _ => None,
    }
}

/// Classify a file into exactly one category.
///
/// Total and deterministic for a given path and sniffer: the extension
/// phase never fails, and sniffer errors surface as `None` (the sniffer
/// swallows its own I/O failures), so classification can never fail a scan.
pub fn classify(path: &Path, sniffer: &dyn ContentSniffer) -> Category {
    let ext = path.extension().and_then(|e| e.to_str());

    if let Some(ext) = ext {
        if let Some(cat) = category_for_extension(ext) {
            return cat;
        }
    }

    if let Some(mime) = sniffer.sniff(path) {
        if let Some(cat) = category_for_mime(&mime) {
            return cat;
        }
    }

    if ext.is_some() {
        Category::Other
    } else {
        Category::Unknown
    }
}
