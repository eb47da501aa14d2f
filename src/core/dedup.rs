//! Ordering and high-water-mark filtering of archive rows.

use crate::models::Row;

/// Sort rows newest-first. The sort is stable: rows that are not after each
/// other keep their input order.
pub fn sort_newest_first(rows: &mut [Row]) {
    rows.sort_by(|a, b| b.order_key().cmp(&a.order_key()));
}

/// Rows strictly newer than `pivot`, newest-first.
///
/// An empty pivot means nothing has been archived yet, so every row is kept.
pub fn select_newer_rows(mut rows: Vec<Row>, pivot: &Row) -> Vec<Row> {
    sort_newest_first(&mut rows);

    if pivot.is_empty() {
        return rows;
    }

    // Sorted newest-first, so the newer rows form a prefix.
    let newer = rows.partition_point(|row| row.is_after(pivot));
    rows.truncate(newer);
    rows
}
