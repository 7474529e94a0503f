//! The editable entry buffer and quantity input validation.

use crate::catalog::{Catalog, CatalogFilter};
use crate::types::{Area, StagedEntry};

/// Result of validating one quantity field.
///
/// Distinguishing empty from unparsable is deliberate: empty means "leave
/// at zero", unparsable goes back to the caller instead of silently
/// becoming zero.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityInput {
    /// Nothing typed; the field stays at zero
    Empty,
    /// A usable non-negative quantity
    Valid(f64),
    /// Not a number, or negative; carries the raw text for the message
    Invalid(String),
}

impl QuantityInput {
    /// The value to store, treating empty as zero
    pub fn value_or_zero(&self) -> Option<f64> {
        match self {
            QuantityInput::Empty => Some(0.0),
            QuantityInput::Valid(n) => Some(*n),
            QuantityInput::Invalid(_) => None,
        }
    }
}

/// Parse a quantity typed by staff. Accepts comma or dot decimal
/// separators; when both appear the comma is a thousands separator.
pub fn parse_quantity(raw: &str) -> QuantityInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return QuantityInput::Empty;
    }
    let cleaned = if trimmed.contains('.') {
        trimmed.replace(',', "")
    } else {
        trimmed.replace(',', ".")
    };
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => QuantityInput::Valid(n),
        _ => QuantityInput::Invalid(raw.trim().to_string()),
    }
}

/// One editable row of the entry form
#[derive(Debug, Clone)]
pub struct EntryRow {
    /// Read-only display columns, copied from the catalog
    pub product: String,
    pub recipe_unit: String,
    pub uom_quantity: f64,
    /// Editable quantities, zero-initialized
    pub closed: f64,
    pub open: f64,
    /// Present only for areas that track open bottles
    pub open_bottles: Option<f64>,
}

impl EntryRow {
    /// True when any quantity was edited away from zero
    pub fn touched(&self) -> bool {
        self.closed != 0.0 || self.open != 0.0 || self.open_bottles.unwrap_or(0.0) != 0.0
    }
}

/// The editable rows for the current product selection
#[derive(Debug, Clone)]
pub struct EntryBuffer {
    area: Area,
    rows: Vec<EntryRow>,
}

impl EntryBuffer {
    /// One row per catalog product passing the filter, quantities at zero.
    /// The filter's area is forced to the buffer's area.
    pub fn build(catalog: &Catalog, area: Area, filter: &CatalogFilter) -> Self {
        let filter = CatalogFilter {
            area: Some(area),
            ..filter.clone()
        };
        let rows = catalog
            .filter(&filter)
            .into_iter()
            .map(|product| EntryRow {
                product: product.name.clone(),
                recipe_unit: product.recipe_unit.clone(),
                uom_quantity: product.uom_quantity,
                closed: 0.0,
                open: 0.0,
                open_bottles: area.tracks_open_bottles().then_some(0.0),
            })
            .collect();
        Self { area, rows }
    }

    pub fn area(&self) -> Area {
        self.area
    }

    pub fn rows(&self) -> &[EntryRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [EntryRow] {
        &mut self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows edited away from zero, as staged entries ready to merge.
    /// Derived values are recomputed by the staging merge, not here.
    pub fn staged_entries(&self) -> Vec<StagedEntry> {
        self.rows
            .iter()
            .filter(|row| row.touched())
            .map(|row| StagedEntry::new(row.product.clone(), row.closed, row.open, row.open_bottles))
            .collect()
    }
}
