/// Machine-readable output modes — JSON and CSV to stdout.
///
/// Nothing is persisted: both writers stream to the handle they are
/// given, and the derived sections (totals, large files, risk findings)
/// are recomputed from the records on the way out.
use anyhow::Context;
use fsaudit_core::analysis::{assess, find_large, size_by_category};
use fsaudit_core::model::FileRecord;
use std::collections::BTreeMap;
use std::io::Write;

/// Serialise the record collection plus derived sections as one JSON
/// document.
pub fn write_json(
    w: &mut impl Write,
    records: &[FileRecord],
    threshold_mb: u64,
) -> anyhow::Result<()> {
    // BTreeMap keys give deterministic section order in the output.
    let totals: BTreeMap<&str, u64> = size_by_category(records)
        .into_iter()
        .map(|(category, bytes)| (category.label(), bytes))
        .collect();

    let large: Vec<&FileRecord> = find_large(records, threshold_mb);

    let risky: Vec<serde_json::Value> = assess(records)
        .iter()
        .map(|finding| {
            serde_json::json!({
                "path": finding.record.path,
                "tags": finding.tags.iter().map(|t| t.label()).collect::<Vec<_>>(),
            })
        })
        .collect();

    let doc = serde_json::json!({
        "threshold_mb": threshold_mb,
        "records": records,
        "totals_bytes": totals,
        "large_files": large,
        "risky_files": risky,
    });

    serde_json::to_writer_pretty(&mut *w, &doc).context("JSON serialisation failed")?;
    writeln!(w)?;
    Ok(())
}

/// One CSV row per record; error records carry the cause in the last
/// column and leave the metadata columns empty.
pub fn write_csv(w: &mut impl Write, records: &[FileRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record([
        "path",
        "status",
        "size_bytes",
        "mode_octal",
        "modified",
        "extension",
        "category",
        "error",
    ])?;

    for record in records {
        let path = record.path.display().to_string();
        match record.metadata() {
            Some(meta) => {
                let size = meta.size.to_string();
                let mode = format!("{:o}", meta.mode);
                let modified = meta
                    .modified
                    .map(|t| t.format("%Y-%m-%dT%H:%M:%S").to_string())
                    .unwrap_or_default();
                wtr.write_record([
                    path.as_str(),
                    "ok",
                    size.as_str(),
                    mode.as_str(),
                    modified.as_str(),
                    meta.extension.as_deref().unwrap_or(""),
                    meta.category.label(),
                    "",
                ])?;
            }
            None => {
                wtr.write_record([
                    path.as_str(),
                    "error",
                    "",
                    "",
                    "",
                    "",
                    "",
                    record.error().unwrap_or(""),
                ])?;
            }
        }
    }

    wtr.flush().context("CSV flush failed")?;
    Ok(())
}
