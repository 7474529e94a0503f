//! Resolution of a volatile sheet layout into typed column and row indices.
//!
//! Destination sheets move columns around and respell headers; product rows
//! get inserted and reordered. Everything downstream of this module works
//! with resolved 1-based indices only.

mod headers;
mod rows;

pub use headers::{CatalogColumns, FieldSpec, HeaderMap, InventoryColumns};
pub use rows::RowMap;

use crate::config::StoreConfig;
use crate::error::StocktakeResult;
use crate::sheet::WorkbookStore;
use crate::types::Area;

/// One destination sheet, fully resolved: its name, typed column layout
/// and product row map. Built fresh per operation; nothing is cached
/// across loads.
#[derive(Debug, Clone)]
pub struct SheetContext {
    pub sheet: String,
    pub columns: InventoryColumns,
    pub rows: RowMap,
}

impl SheetContext {
    pub fn resolve(
        store: &WorkbookStore,
        config: &StoreConfig,
        area: Area,
    ) -> StocktakeResult<Self> {
        let sheet_name = config.sheet_for(area);
        let worksheet = store.sheet(sheet_name)?;
        let headers = HeaderMap::read(worksheet, config.inventory_header_row);
        let columns = InventoryColumns::resolve(&headers)?;
        let rows = RowMap::read(worksheet, columns.product, config.inventory_data_row());
        Ok(Self {
            sheet: worksheet.name().to_string(),
            columns,
            rows,
        })
    }
}
