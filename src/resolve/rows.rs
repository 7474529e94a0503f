//! Row location: normalized product name → 1-based row index.

use crate::normalize::normalize_key;
use crate::sheet::Worksheet;
use std::collections::HashMap;
use tracing::warn;

/// Product rows of one destination sheet, keyed by normalized name.
///
/// Only rows at or after the data-start offset count; blank cells are
/// skipped. When two rows normalize to the same name the later row wins
/// and the collision is logged; the workbook is hand-maintained and has
/// carried harmless duplicates before, so this stays a warning rather
/// than an error.
#[derive(Debug, Clone, Default)]
pub struct RowMap {
    rows: HashMap<String, u32>,
}

impl RowMap {
    /// Scan the product column from `data_start_row` to the end of the
    /// used region.
    pub fn read(worksheet: &Worksheet, product_col: u32, data_start_row: u32) -> Self {
        let mut rows: HashMap<String, u32> = HashMap::new();
        for (idx, cell) in worksheet.column_values(product_col).iter().enumerate() {
            let row = idx as u32 + 1;
            if row < data_start_row {
                continue;
            }
            let key = normalize_key(&cell.as_text());
            if key.is_empty() {
                continue;
            }
            if let Some(previous) = rows.insert(key.clone(), row) {
                warn!(
                    sheet = worksheet.name(),
                    product = key.as_str(),
                    kept_row = row,
                    displaced_row = previous,
                    "duplicate product name in sheet, keeping the later row"
                );
            }
        }
        Self { rows }
    }

    /// Row index for an already-normalized product key
    pub fn get(&self, key: &str) -> Option<u32> {
        self.rows.get(key).copied()
    }

    /// Number of distinct products located
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All located row indices, ascending (reset iterates these)
    pub fn row_indices(&self) -> Vec<u32> {
        let mut indices: Vec<u32> = self.rows.values().copied().collect();
        indices.sort_unstable();
        indices
    }
}
