//! Workbook-backed datastore.
//!
//! The whole document is loaded up front and held as in-memory grids, one
//! per worksheet. Writes are targeted cell updates collected into a batch;
//! `save` rewrites the file in one pass, so a batch lands all-or-nothing.

use crate::error::{StocktakeError, StocktakeResult};
use crate::sheet::cell::{CellUpdate, CellValue};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::{Path, PathBuf};

/// One worksheet as an absolute 1-based grid of cells
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    /// grid[0] is sheet row 1; rows may have ragged widths
    grid: Vec<Vec<CellValue>>,
}

impl Worksheet {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows in the used region (1-based upper bound)
    pub fn row_count(&self) -> u32 {
        self.grid.len() as u32
    }

    /// Cell at 1-based (row, col); out-of-range reads are empty
    pub fn cell(&self, row: u32, col: u32) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        if row == 0 || col == 0 {
            return EMPTY;
        }
        self.grid
            .get(row as usize - 1)
            .and_then(|r| r.get(col as usize - 1))
            .unwrap_or(EMPTY)
    }

    /// All values of a 1-based row, in column order
    pub fn row_values(&self, row: u32) -> Vec<CellValue> {
        if row == 0 {
            return Vec::new();
        }
        self.grid
            .get(row as usize - 1)
            .cloned()
            .unwrap_or_default()
    }

    /// All values of a 1-based column, one entry per row of the used region
    pub fn column_values(&self, col: u32) -> Vec<CellValue> {
        if col == 0 {
            return Vec::new();
        }
        self.grid
            .iter()
            .map(|row| row.get(col as usize - 1).cloned().unwrap_or_default())
            .collect()
    }

    /// Set a 1-based (row, col) cell, growing the grid as needed
    fn set_cell(&mut self, row: u32, col: u32, value: CellValue) {
        let (row, col) = (row as usize - 1, col as usize - 1);
        if self.grid.len() <= row {
            self.grid.resize(row + 1, Vec::new());
        }
        let grid_row = &mut self.grid[row];
        if grid_row.len() <= col {
            grid_row.resize(col + 1, CellValue::Empty);
        }
        grid_row[col] = value;
    }
}

/// An .xlsx document open for batched reads and writes
#[derive(Debug)]
pub struct WorkbookStore {
    path: PathBuf,
    sheets: Vec<Worksheet>,
}

impl WorkbookStore {
    /// Load every worksheet of an .xlsx file into memory
    pub fn open<P: AsRef<Path>>(path: P) -> StocktakeResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut workbook: Xlsx<_> = open_workbook(&path).map_err(|e| {
            StocktakeError::Workbook(format!("failed to open {}: {}", path.display(), e))
        })?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names().to_vec() {
            let range = workbook.worksheet_range(&name).map_err(|e| {
                StocktakeError::Workbook(format!("failed to read sheet '{}': {}", name, e))
            })?;

            // The used range may not start at A1; pad so the grid stays
            // absolute and header-row offsets mean what the sheet shows.
            let (start_row, start_col) = range.start().unwrap_or((0, 0));
            let mut grid: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];
            for row in range.rows() {
                let mut grid_row: Vec<CellValue> = vec![CellValue::Empty; start_col as usize];
                grid_row.extend(row.iter().map(convert_cell));
                grid.push(grid_row);
            }

            sheets.push(Worksheet { name, grid });
        }

        Ok(Self { path, sheets })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of all worksheets, in workbook order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Look up a worksheet by name, case-insensitively
    pub fn sheet(&self, name: &str) -> StocktakeResult<&Worksheet> {
        self.sheets
            .iter()
            .find(|s| sheet_name_matches(&s.name, name))
            .ok_or_else(|| StocktakeError::SheetNotFound(name.to_string()))
    }

    fn sheet_mut(&mut self, name: &str) -> StocktakeResult<&mut Worksheet> {
        self.sheets
            .iter_mut()
            .find(|s| sheet_name_matches(&s.name, name))
            .ok_or_else(|| StocktakeError::SheetNotFound(name.to_string()))
    }

    /// Apply a batch of cell updates to the in-memory grids.
    ///
    /// Nothing reaches disk until [`WorkbookStore::save`] runs; an error on
    /// any update (unknown sheet) leaves the file untouched.
    pub fn apply(&mut self, updates: &[CellUpdate]) -> StocktakeResult<()> {
        for update in updates {
            let sheet = self.sheet_mut(&update.cell.sheet)?;
            sheet.set_cell(update.cell.row, update.cell.col, update.value.clone());
        }
        Ok(())
    }

    /// Rewrite the backing file with the current in-memory state
    pub fn save(&self) -> StocktakeResult<()> {
        self.save_as(&self.path)
    }

    /// Write the current in-memory state to another path
    pub fn save_as<P: AsRef<Path>>(&self, path: P) -> StocktakeResult<()> {
        let mut workbook = rust_xlsxwriter::Workbook::new();

        for sheet in &self.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(&sheet.name)
                .map_err(|e| StocktakeError::Workbook(e.to_string()))?;

            for (r, row) in sheet.grid.iter().enumerate() {
                for (c, value) in row.iter().enumerate() {
                    let (r, c) = (r as u32, c as u16);
                    match value {
                        CellValue::Empty => {}
                        CellValue::Number(n) => {
                            worksheet
                                .write_number(r, c, *n)
                                .map_err(|e| StocktakeError::Workbook(e.to_string()))?;
                        }
                        CellValue::Text(s) => {
                            worksheet
                                .write_string(r, c, s)
                                .map_err(|e| StocktakeError::Workbook(e.to_string()))?;
                        }
                        CellValue::Bool(b) => {
                            worksheet
                                .write_boolean(r, c, *b)
                                .map_err(|e| StocktakeError::Workbook(e.to_string()))?;
                        }
                    }
                }
            }
        }

        workbook
            .save(path.as_ref())
            .map_err(|e| StocktakeError::Workbook(e.to_string()))
    }
}

fn sheet_name_matches(actual: &str, wanted: &str) -> bool {
    actual.trim().eq_ignore_ascii_case(wanted.trim())
}

fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}
