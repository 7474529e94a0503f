//! Workbook layout configuration.
//!
//! Sheet names, header-row offsets and the fixed comment cell follow the
//! house workbook convention by default; a YAML file overrides them when a
//! workbook predates the convention (older copies keep their headers on a
//! different row).

use crate::error::{StocktakeError, StocktakeResult};
use crate::sheet::parse_cell;
use crate::types::Area;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Destination sheet name per operating area
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AreaSheets {
    pub kitchen: String,
    pub supplies: String,
    pub bar: String,
}

impl Default for AreaSheets {
    fn default() -> Self {
        Self {
            kitchen: "INVENTARIO_COCINA".to_string(),
            supplies: "INVENTARIO_SUMINISTROS".to_string(),
            bar: "INVENTARIO_BARRA".to_string(),
        }
    }
}

/// Workbook layout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Name of the read-only product catalog sheet
    pub catalog_sheet: String,
    /// 1-based header row of the catalog sheet; data starts one row after
    pub catalog_header_row: u32,
    /// 1-based header row of the inventory sheets (3 or 4 depending on the
    /// workbook vintage); data starts one row after
    pub inventory_header_row: u32,
    pub sheets: AreaSheets,
    /// Fixed cell holding the free-text per-area comment
    pub comment_cell: String,
    /// chrono format string for the inventory date cells
    pub date_format: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            catalog_sheet: "BD_productos".to_string(),
            catalog_header_row: 1,
            inventory_header_row: 3,
            sheets: AreaSheets::default(),
            comment_cell: "C3".to_string(),
            date_format: "%d-%m-%Y".to_string(),
        }
    }
}

impl StoreConfig {
    /// Load a config file, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> StocktakeResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path).map_err(|e| {
            StocktakeError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: StoreConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> StocktakeResult<()> {
        if self.catalog_header_row == 0 || self.inventory_header_row == 0 {
            return Err(StocktakeError::Config(
                "header rows are 1-based and cannot be 0".to_string(),
            ));
        }
        parse_cell(&self.comment_cell).map_err(|_| {
            StocktakeError::Config(format!("invalid comment cell '{}'", self.comment_cell))
        })?;
        // chrono surfaces bad specifiers at render time; catch them here
        let bad_format = chrono::format::StrftimeItems::new(&self.date_format)
            .any(|item| matches!(item, chrono::format::Item::Error));
        if bad_format {
            return Err(StocktakeError::Config(format!(
                "invalid date format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Destination sheet name for an area
    pub fn sheet_for(&self, area: Area) -> &str {
        match area {
            Area::Kitchen => &self.sheets.kitchen,
            Area::Supplies => &self.sheets.supplies,
            Area::Bar => &self.sheets.bar,
        }
    }

    /// First data row of the inventory sheets
    pub fn inventory_data_row(&self) -> u32 {
        self.inventory_header_row + 1
    }

    /// First data row of the catalog sheet
    pub fn catalog_data_row(&self) -> u32 {
        self.catalog_header_row + 1
    }

    /// The comment cell as 1-based (column, row)
    pub fn comment_cell(&self) -> StocktakeResult<(u32, u32)> {
        parse_cell(&self.comment_cell)
    }
}
