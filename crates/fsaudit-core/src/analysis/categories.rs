/// Size-by-category totals over a completed record collection.
use crate::classify::Category;
use crate::model::FileRecord;
use std::collections::HashMap;

/// Accumulated byte size per observed category.
///
/// Keys appear only for categories actually seen; order is irrelevant
/// (the reporter sorts for display).
pub type CategoryTotals = HashMap<Category, u64>;

/// Sum sizes per category over successfully probed records.
///
/// Pure, total, and order-independent: any partition of the record set
/// sums to the same totals. Error-outcome records are excluded, not
/// zero-filled — a category observed only through failed probes never
/// gets a key.
pub fn size_by_category(records: &[FileRecord]) -> CategoryTotals {
    // There are exactly 8 categories — pre-size to avoid rehashing.
    let mut totals = CategoryTotals::with_capacity(8);
    for record in records {
        if let Some(meta) = record.metadata() {
            *totals.entry(meta.category).or_insert(0) += meta.size;
        }
    }
    totals
}
