//! Header resolution: declarative alias tables over a normalized header row.
//!
//! Each semantic field carries an ordered alias list, canonical spelling
//! first, then the spellings older copies of the workbook have used.
//! Resolution tries exact normalized matches down the list, then falls back
//! to a substring scan. Mandatory fields that stay unresolved abort the
//! operation with an error naming the sheet, the field, and every alias
//! tried.

use crate::error::{StocktakeError, StocktakeResult};
use crate::normalize::normalize_key;
use crate::sheet::Worksheet;
use std::collections::HashMap;

/// A semantic field and the header spellings that may carry it
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Field name used in error messages and the `check` report
    pub field: &'static str,
    /// Normalized spellings, canonical first, historical variants after
    pub aliases: &'static [&'static str],
}

impl FieldSpec {
    pub const fn new(field: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { field, aliases }
    }
}

// Destination (inventory) sheet fields
pub const PRODUCT: FieldSpec = FieldSpec::new(
    "product",
    &["PRODUCTO GENERICO", "PRODUCTO", "NOMBRE PRODUCTO", "PRODUCT"],
);
pub const CLOSED: FieldSpec =
    FieldSpec::new("closed quantity", &["CANTIDAD CERRADO", "CERRADO", "CLOSED"]);
pub const OPEN: FieldSpec = FieldSpec::new(
    "open quantity",
    &[
        "CANTIDAD ABIERTO (PESO)",
        "CANTIDAD ABIERTO",
        "ABIERTO",
        "OPEN",
    ],
);
pub const OPEN_BOTTLES: FieldSpec = FieldSpec::new(
    "open bottles",
    &["BOTELLAS ABIERTAS", "BOTELLA ABIERTA", "OPEN BOTTLES"],
);
pub const VALUE: FieldSpec = FieldSpec::new(
    "inventory value",
    &["VALOR INVENTARIO", "VALOR", "INVENTORY VALUE"],
);
pub const DATE: FieldSpec = FieldSpec::new("date", &["FECHA", "DATE"]);

// Catalog sheet fields
pub const CAT_AREA: FieldSpec = FieldSpec::new("area", &["AREA"]);
pub const CAT_CATEGORY: FieldSpec = FieldSpec::new("category", &["CATEGORIA", "CATEGORY"]);
pub const CAT_SUB_FAMILY: FieldSpec = FieldSpec::new(
    "sub-family",
    &["SUB FAMILIA", "SUBFAMILIA", "SUB-FAMILIA", "SUB FAMILY"],
);
pub const CAT_RECIPE_UNIT: FieldSpec =
    FieldSpec::new("recipe unit", &["UNIDAD RECETA", "RECIPE UNIT"]);
pub const CAT_UOM_QTY: FieldSpec = FieldSpec::new(
    "unit-of-measure quantity",
    &["CANTIDAD DE UNIDAD DE MEDIDA", "UNIDAD DE MEDIDA"],
);
pub const CAT_UNIT_PRICE: FieldSpec =
    FieldSpec::new("unit price", &["PRECIO NETO", "PRECIO", "UNIT PRICE"]);
pub const CAT_UNIT_COST: FieldSpec =
    FieldSpec::new("unit cost", &["COSTO X UNIDAD", "COSTO", "UNIT COST"]);

/// Normalized header text → 1-based column index for one sheet
#[derive(Debug, Clone)]
pub struct HeaderMap {
    sheet: String,
    columns: HashMap<String, u32>,
}

impl HeaderMap {
    /// Read the given 1-based header row of a worksheet.
    ///
    /// Blank headers are skipped. If two headers normalize to the same key
    /// the later column wins, mirroring row-map semantics.
    pub fn read(worksheet: &Worksheet, header_row: u32) -> Self {
        let mut columns = HashMap::new();
        for (idx, cell) in worksheet.row_values(header_row).iter().enumerate() {
            let key = normalize_key(&cell.as_text());
            if !key.is_empty() {
                columns.insert(key, idx as u32 + 1);
            }
        }
        Self {
            sheet: worksheet.name().to_string(),
            columns,
        }
    }

    /// Sheet this map was read from
    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    /// Number of named columns found in the header row
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Exact lookup by normalized header text
    pub fn get(&self, key: &str) -> Option<u32> {
        self.columns.get(&normalize_key(key)).copied()
    }

    /// Resolve a field: exact alias pass first, substring scan after.
    ///
    /// The substring scan picks the lowest-numbered matching column so
    /// resolution stays deterministic.
    pub fn resolve(&self, spec: FieldSpec) -> Option<u32> {
        for alias in spec.aliases {
            if let Some(col) = self.columns.get(*alias) {
                return Some(*col);
            }
        }
        for alias in spec.aliases {
            let found = self
                .columns
                .iter()
                .filter(|(key, _)| key.contains(alias))
                .map(|(_, col)| *col)
                .min();
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// Resolve a mandatory field or fail naming the aliases tried
    pub fn require(&self, spec: FieldSpec) -> StocktakeResult<u32> {
        self.resolve(spec).ok_or_else(|| StocktakeError::MissingColumn {
            field: spec.field,
            sheet: self.sheet.clone(),
            tried: spec.aliases.join(", "),
        })
    }
}

/// Resolved column layout of one destination inventory sheet
#[derive(Debug, Clone)]
pub struct InventoryColumns {
    pub product: u32,
    pub closed: u32,
    pub open: u32,
    pub open_bottles: Option<u32>,
    pub value: Option<u32>,
    pub date: u32,
}

impl InventoryColumns {
    /// Resolve all inventory fields against a header map.
    ///
    /// Product, closed, open and date are mandatory; the open-bottles and
    /// value columns are optional (not every sheet carries them).
    pub fn resolve(headers: &HeaderMap) -> StocktakeResult<Self> {
        Ok(Self {
            product: headers.require(PRODUCT)?,
            closed: headers.require(CLOSED)?,
            open: headers.require(OPEN)?,
            open_bottles: headers.resolve(OPEN_BOTTLES),
            value: headers.resolve(VALUE),
            date: headers.require(DATE)?,
        })
    }
}

/// Resolved column layout of the product catalog sheet
#[derive(Debug, Clone)]
pub struct CatalogColumns {
    pub area: u32,
    pub category: u32,
    pub sub_family: u32,
    pub product: u32,
    pub recipe_unit: Option<u32>,
    pub uom_quantity: Option<u32>,
    pub unit_price: Option<u32>,
    pub unit_cost: Option<u32>,
}

impl CatalogColumns {
    pub fn resolve(headers: &HeaderMap) -> StocktakeResult<Self> {
        Ok(Self {
            area: headers.require(CAT_AREA)?,
            category: headers.require(CAT_CATEGORY)?,
            sub_family: headers.require(CAT_SUB_FAMILY)?,
            product: headers.require(PRODUCT)?,
            recipe_unit: headers.resolve(CAT_RECIPE_UNIT),
            uom_quantity: headers.resolve(CAT_UOM_QTY),
            unit_price: headers.resolve(CAT_UNIT_PRICE),
            unit_cost: headers.resolve(CAT_UNIT_COST),
        })
    }
}
