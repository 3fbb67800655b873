/// Permission risk evaluation over POSIX mode bits.
///
/// Four independent rules, each mapping a bit pattern to a [`RiskTag`].
/// Evaluation is pure — no I/O, no re-probe — and reads the mode captured
/// in the record at probe time.
use crate::model::FileRecord;
use serde::Serialize;

// POSIX permission bit masks (stat.h), spelled out locally so each rule
// reads against the octal it tests.
const S_ISUID: u32 = 0o4000;
const S_ISGID: u32 = 0o2000;
const S_IXUSR: u32 = 0o0100;
const S_IWGRP: u32 = 0o0020;
const S_IXGRP: u32 = 0o0010;
const S_IWOTH: u32 = 0o0002;
const S_IXOTH: u32 = 0o0001;

/// One reason a file's permissions are considered risky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskTag {
    WorldWritable,
    ExecWritableByGroupOrOthers,
    SetuidSet,
    SetgidSet,
}

impl RiskTag {
    /// Stable report label.
    pub fn label(self) -> &'static str {
        match self {
            Self::WorldWritable => "World-writable",
            Self::ExecWritableByGroupOrOthers => "Executable and writable by group/others",
            Self::SetuidSet => "Setuid bit set",
            Self::SetgidSet => "Setgid bit set",
        }
    }
}

/// Evaluate the risk rules against a raw mode.
///
/// Pure and total. The rules are independent — one mode may trigger
/// several — and the output order is canonical: `WorldWritable`,
/// `ExecWritableByGroupOrOthers`, `SetuidSet`, `SetgidSet`. An empty vec
/// means "no risk — do not report this file".
pub fn evaluate(mode: u32) -> Vec<RiskTag> {
    let mut tags = Vec::new();

    if mode & S_IWOTH != 0 {
        tags.push(RiskTag::WorldWritable);
    }

    let exec_any = mode & (S_IXUSR | S_IXGRP | S_IXOTH) != 0;
    let write_group_others = mode & (S_IWGRP | S_IWOTH) != 0;
    if exec_any && write_group_others {
        tags.push(RiskTag::ExecWritableByGroupOrOthers);
    }

    if mode & S_ISUID != 0 {
        tags.push(RiskTag::SetuidSet);
    }
    if mode & S_ISGID != 0 {
        tags.push(RiskTag::SetgidSet);
    }

    tags
}

/// A record with at least one triggered risk rule.
#[derive(Debug, Serialize)]
pub struct RiskFinding<'a> {
    /// The offending record (Metadata outcome, by construction).
    pub record: &'a FileRecord,
    /// Triggered rules, canonical order.
    pub tags: Vec<RiskTag>,
}

/// Evaluate every successfully probed record's stored mode.
///
/// Error-outcome records contribute nothing; records without risks are
/// omitted rather than reported with an empty tag list.
pub fn assess(records: &[FileRecord]) -> Vec<RiskFinding<'_>> {
    records
        .iter()
        .filter_map(|record| {
            let meta = record.metadata()?;
            let tags = evaluate(meta.mode);
            if tags.is_empty() {
                None
            } else {
                Some(RiskFinding { record, tags })
            }
        })
        .collect()
}
