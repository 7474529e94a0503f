//! Workbook access: typed cells, A1 addressing, and the batched store.
//!
//! The store reads a whole .xlsx into memory, takes batches of targeted
//! cell updates, and rewrites the file in a single pass.

mod cell;
mod store;

pub use cell::{
    column_letter_to_number, column_number_to_letter, format_number, parse_cell, CellRef,
    CellUpdate, CellValue,
};
pub use store::{WorkbookStore, Worksheet};
