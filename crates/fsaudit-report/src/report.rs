/// Text report rendering — the per-file table and the summary sections.
///
/// Everything here consumes the record collection read-only; units are
/// converted and paths truncated at this boundary only.
use fsaudit_core::analysis::{assess, find_large, size_by_category, RiskFinding};
use fsaudit_core::model::size::{format_count, format_mb, format_size};
use fsaudit_core::model::FileRecord;
use std::io::{self, Write};

/// Maximum rendered path width in the per-file table.
const PATH_WIDTH: usize = 50;

/// Which sections the text report includes.
pub struct ReportOptions {
    pub threshold_mb: u64,
    pub show_permissions: bool,
    pub permissions_only: bool,
    pub quiet: bool,
}

/// Render the full text report.
pub fn write_text_report(
    w: &mut impl Write,
    records: &[FileRecord],
    opts: &ReportOptions,
) -> io::Result<()> {
    if opts.permissions_only {
        let findings = assess(records);
        writeln!(
            w,
            "Found {} files with unusual permissions",
            format_count(findings.len() as u64)
        )?;
        write_permission_findings(w, &findings)?;
        return Ok(());
    }

    writeln!(w, "Found {} files", format_count(records.len() as u64))?;
    if !opts.quiet {
        write_file_table(w, records)?;
    }

    write_category_totals(w, records)?;
    write_large_files(w, records, opts.threshold_mb)?;
    write_errors(w, records)?;

    if opts.show_permissions {
        let findings = assess(records);
        writeln!(w)?;
        writeln!(w, "Files with unusual permissions ({}):", findings.len())?;
        write_permission_findings(w, &findings)?;
    }

    Ok(())
}

/// Per-file table, sorted by path for a stable display order.
///
/// The record collection itself has no ordering guarantee (batched
/// parallel assembly), so the sort happens here, at the display boundary.
fn write_file_table(w: &mut impl Write, records: &[FileRecord]) -> io::Result<()> {
    let mut rows: Vec<&FileRecord> = records.iter().collect();
    rows.sort_by(|a, b| a.path.cmp(&b.path));

    writeln!(
        w,
        "{:<width$}  {:>10}  {:<11}  {:<16}  {}",
        "Path",
        "Size",
        "Permissions",
        "Modified",
        "Category",
        width = PATH_WIDTH
    )?;

    for record in rows {
        let path = truncate_path(&record.path.display().to_string(), PATH_WIDTH);
        match record.metadata() {
            Some(meta) => {
                let size_col = format_size(meta.size);
                let perm_col = mode_string(meta.mode);
                let mod_col = meta
                    .modified
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                let cat_col = meta.category.label();
                writeln!(
                    w,
                    "{path:<width$}  {size_col:>10}  {perm_col:<11}  {mod_col:<16}  {cat_col}",
                    width = PATH_WIDTH
                )?;
            }
            None => {
                let cause = record.error().unwrap_or("unknown cause");
                writeln!(
                    w,
                    "{path:<width$}  {:>10}  {:<11}  {:<16}  error: {cause}",
                    "-",
                    "-",
                    "-",
                    width = PATH_WIDTH
                )?;
            }
        }
    }

    Ok(())
}

/// Per-category totals, largest first, always in MB.
fn write_category_totals(w: &mut impl Write, records: &[FileRecord]) -> io::Result<()> {
    let totals = size_by_category(records);
    let mut entries: Vec<_> = totals.into_iter().collect();
    // Largest category first; the label breaks ties so output is stable.
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.label().cmp(b.0.label())));

    writeln!(w)?;
    writeln!(w, "Total size by file category:")?;
    for (category, bytes) in entries {
        writeln!(w, "{}: {} MB", category.label(), format_mb(bytes))?;
    }
    Ok(())
}

fn write_large_files(
    w: &mut impl Write,
    records: &[FileRecord],
    threshold_mb: u64,
) -> io::Result<()> {
    let large = find_large(records, threshold_mb);
    writeln!(w)?;
    writeln!(w, "Files larger than {threshold_mb} MB ({}):", large.len())?;
    for record in large {
        if let Some(meta) = record.metadata() {
            writeln!(w, "- {} ({} MB)", record.path.display(), format_mb(meta.size))?;
        }
    }
    Ok(())
}

/// Every probe failure is listed with its cause; the section is omitted
/// entirely when the scan was clean.
fn write_errors(w: &mut impl Write, records: &[FileRecord]) -> io::Result<()> {
    let errors: Vec<&FileRecord> = records.iter().filter(|r| r.is_error()).collect();
    if errors.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    writeln!(w, "Errors encountered ({} files):", errors.len())?;
    for record in errors {
        writeln!(
            w,
            "- {}: {}",
            record.path.display(),
            record.error().unwrap_or("unknown cause")
        )?;
    }
    Ok(())
}

fn write_permission_findings(
    w: &mut impl Write,
    findings: &[RiskFinding<'_>],
) -> io::Result<()> {
    for finding in findings {
        let mode = finding
            .record
            .metadata()
            .map(|m| mode_string(m.mode))
            .unwrap_or_else(|| "-".repeat(10));
        let labels: Vec<&str> = finding.tags.iter().map(|t| t.label()).collect();
        writeln!(
            w,
            "- {} ({}): {}",
            finding.record.path.display(),
            mode,
            labels.join(", ")
        )?;
    }
    Ok(())
}

/// Symbolic `ls -l` style rendering of a raw mode.
///
/// Ten characters: type, then rwx triplets for owner/group/other with
/// the conventional s/S, t/T substitutions for setuid, setgid, and the
/// sticky bit.
pub fn mode_string(mode: u32) -> String {
    const S_IFMT: u32 = 0o170_000;
    let type_char = match mode & S_IFMT {
        0o140_000 => 's', // socket
        0o120_000 => 'l', // symlink
        0o060_000 => 'b', // block device
        0o040_000 => 'd', // directory
        0o020_000 => 'c', // character device
        0o010_000 => 'p', // fifo
        _ => '-',         // regular file, or bare permission bits
    };

    let mut s = String::with_capacity(10);
    s.push(type_char);

    s.push(if mode & 0o400 != 0 { 'r' } else { '-' });
    s.push(if mode & 0o200 != 0 { 'w' } else { '-' });
    s.push(match (mode & 0o100 != 0, mode & 0o4000 != 0) {
        (true, true) => 's',
        (false, true) => 'S',
        (true, false) => 'x',
        (false, false) => '-',
    });

    s.push(if mode & 0o040 != 0 { 'r' } else { '-' });
    s.push(if mode & 0o020 != 0 { 'w' } else { '-' });
    s.push(match (mode & 0o010 != 0, mode & 0o2000 != 0) {
        (true, true) => 's',
        (false, true) => 'S',
        (true, false) => 'x',
        (false, false) => '-',
    });

    s.push(if mode & 0o004 != 0 { 'r' } else { '-' });
    s.push(if mode & 0o002 != 0 { 'w' } else { '-' });
    s.push(match (mode & 0o001 != 0, mode & 0o1000 != 0) {
        (true, true) => 't',
        (false, true) => 'T',
        (true, false) => 'x',
        (false, false) => '-',
    });

    s
}

/// Shorten a path for table display, keeping the tail (the informative
/// end) and prefixing `...`.
pub fn truncate_path(text: &str, max_len: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let tail: String = chars[chars.len() - keep..].iter().collect();
    format!("...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── mode_string ──────────────────────────────────────────────────────

    #[test]
    fn mode_string_plain_file() {
        assert_eq!(mode_string(0o644), "-rw-r--r--");
        assert_eq!(mode_string(0o755), "-rwxr-xr-x");
        assert_eq!(mode_string(0o777), "-rwxrwxrwx");
    }

    #[test]
    fn mode_string_with_type_bits() {
        assert_eq!(mode_string(0o100_644), "-rw-r--r--");
        assert_eq!(mode_string(0o040_755), "drwxr-xr-x");
        assert_eq!(mode_string(0o120_777), "lrwxrwxrwx");
    }

    #[test]
    fn mode_string_special_bits() {
        assert_eq!(mode_string(0o4755), "-rwsr-xr-x");
        assert_eq!(mode_string(0o4644), "-rwSr--r--");
        assert_eq!(mode_string(0o2755), "-rwxr-sr-x");
        assert_eq!(mode_string(0o1777), "-rwxrwxrwt");
        assert_eq!(mode_string(0o1666), "-rw-rw-rwT");
    }

    // ── truncate_path ────────────────────────────────────────────────────

    #[test]
    fn short_paths_pass_through() {
        assert_eq!(truncate_path("/tmp/a.txt", 50), "/tmp/a.txt");
    }

    #[test]
    fn long_paths_keep_the_tail() {
        let path = "/very/long/directory/chain/that/exceeds/the/width/file.txt";
        let shown = truncate_path(path, 20);
        assert_eq!(shown.chars().count(), 20);
        assert!(shown.starts_with("..."));
        assert!(shown.ends_with("file.txt"));
    }

    #[test]
    fn truncation_is_character_safe() {
        // Multi-byte characters must not be split mid-codepoint.
        let path = "/данные/файлы/отчёт.txt";
        let shown = truncate_path(path, 10);
        assert_eq!(shown.chars().count(), 10);
        assert!(shown.starts_with("..."));
    }
}
