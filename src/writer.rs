//! Translation of staged entries into targeted cell writes.
//!
//! Save and reset both produce one flat batch of `<Sheet>!<Col><Row>`
//! updates; the store applies the whole batch and rewrites the file once.

use crate::resolve::{InventoryColumns, RowMap};
use crate::session::AreaStaging;
use crate::sheet::{CellRef, CellUpdate, CellValue};
use tracing::warn;

/// Outcome counters for a save batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveStats {
    /// Staged entries that resolved to a destination row
    pub written: usize,
    /// Staged entries with no matching product row, dropped
    pub skipped: usize,
    /// Total cell updates in the batch
    pub cells: usize,
}

/// Build the batch for saving an area's staged entries.
///
/// Per entry that resolves through the row map: one update per target
/// column (closed, open, open-bottles where the sheet has the column,
/// date). Entries missing from the row map are skipped and counted; the
/// caller reports them. One extra update writes the area comment to its
/// fixed cell.
pub fn build_save_batch(
    sheet: &str,
    columns: &InventoryColumns,
    rows: &RowMap,
    staging: &AreaStaging,
    date_text: &str,
    comment_cell: (u32, u32),
) -> (Vec<CellUpdate>, SaveStats) {
    let mut updates = Vec::new();
    let mut stats = SaveStats::default();

    for entry in &staging.entries {
        let Some(row) = rows.get(&entry.key()) else {
            warn!(
                sheet,
                product = entry.product.as_str(),
                "staged product has no row in the destination sheet, dropping write"
            );
            stats.skipped += 1;
            continue;
        };

        updates.push(CellUpdate::new(
            CellRef::new(sheet, columns.closed, row),
            entry.closed,
        ));
        updates.push(CellUpdate::new(
            CellRef::new(sheet, columns.open, row),
            entry.open,
        ));
        if let (Some(col), Some(bottles)) = (columns.open_bottles, entry.open_bottles) {
            updates.push(CellUpdate::new(CellRef::new(sheet, col, row), bottles));
        }
        updates.push(CellUpdate::new(
            CellRef::new(sheet, columns.date, row),
            date_text,
        ));
        stats.written += 1;
    }

    let (comment_col, comment_row) = comment_cell;
    updates.push(CellUpdate::new(
        CellRef::new(sheet, comment_col, comment_row),
        staging.comment.as_str(),
    ));

    stats.cells = updates.len();
    (updates, stats)
}

/// Build the batch that resets an area sheet.
///
/// Every row the locator knows gets its quantity cells zeroed (closed,
/// open, open-bottles and value where the columns exist) and its date cell
/// cleared; the comment cell is cleared too. The caller clears the
/// session staging for the area.
pub fn build_reset_batch(
    sheet: &str,
    columns: &InventoryColumns,
    rows: &RowMap,
    comment_cell: (u32, u32),
) -> Vec<CellUpdate> {
    let mut updates = Vec::new();

    for row in rows.row_indices() {
        updates.push(CellUpdate::new(CellRef::new(sheet, columns.closed, row), 0.0));
        updates.push(CellUpdate::new(CellRef::new(sheet, columns.open, row), 0.0));
        if let Some(col) = columns.open_bottles {
            updates.push(CellUpdate::new(CellRef::new(sheet, col, row), 0.0));
        }
        if let Some(col) = columns.value {
            updates.push(CellUpdate::new(CellRef::new(sheet, col, row), 0.0));
        }
        updates.push(CellUpdate::new(
            CellRef::new(sheet, columns.date, row),
            CellValue::Empty,
        ));
    }

    let (comment_col, comment_row) = comment_cell;
    updates.push(CellUpdate::new(
        CellRef::new(sheet, comment_col, comment_row),
        CellValue::Empty,
    ));

    updates
}
