//! Product catalog: the read-only source of truth for products, units and
//! prices.
//!
//! Loaded once per process from the catalog sheet and cached in the session
//! context; the workbook is the only source, nothing here writes back.

use crate::config::StoreConfig;
use crate::error::{StocktakeError, StocktakeResult};
use crate::normalize::normalize_key;
use crate::resolve::{CatalogColumns, HeaderMap};
use crate::sheet::{CellValue, WorkbookStore, Worksheet};
use crate::types::{Area, Product};
use std::collections::HashMap;
use tracing::debug;

/// Optional product filters; every field defaults to "all"
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub area: Option<Area>,
    pub category: Option<String>,
    pub sub_family: Option<String>,
    pub product: Option<String>,
}

impl CatalogFilter {
    fn matches(&self, product: &Product) -> bool {
        if let Some(area) = self.area {
            if product.area != Some(area) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if normalize_key(&product.category) != normalize_key(category) {
                return false;
            }
        }
        if let Some(sub_family) = &self.sub_family {
            if normalize_key(&product.sub_family) != normalize_key(sub_family) {
                return false;
            }
        }
        if let Some(name) = &self.product {
            if product.key() != normalize_key(name) {
                return false;
            }
        }
        true
    }
}

/// The loaded catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    /// Normalized name → index into `products`; last row wins on duplicates
    by_key: HashMap<String, usize>,
}

impl Catalog {
    /// Read the catalog sheet of an open workbook
    pub fn load(store: &WorkbookStore, config: &StoreConfig) -> StocktakeResult<Self> {
        let worksheet = store.sheet(&config.catalog_sheet)?;
        let headers = HeaderMap::read(worksheet, config.catalog_header_row);
        let columns = CatalogColumns::resolve(&headers)?;

        let mut products = Vec::new();
        for row in config.catalog_data_row()..=worksheet.row_count() {
            let name = worksheet.cell(row, columns.product).as_text();
            if name.trim().is_empty() {
                continue;
            }
            let area_label = worksheet.cell(row, columns.area).as_text().trim().to_string();
            products.push(Product {
                area: Area::from_label(&area_label),
                area_label,
                category: worksheet.cell(row, columns.category).as_text().trim().to_string(),
                sub_family: worksheet
                    .cell(row, columns.sub_family)
                    .as_text()
                    .trim()
                    .to_string(),
                name: name.trim().to_string(),
                recipe_unit: text_or_default(worksheet, row, columns.recipe_unit),
                uom_quantity: lenient_number(worksheet, row, columns.uom_quantity),
                unit_price: lenient_number(worksheet, row, columns.unit_price),
                unit_cost: lenient_number(worksheet, row, columns.unit_cost),
            });
        }

        if products.is_empty() {
            return Err(StocktakeError::Catalog(format!(
                "sheet '{}' has no product rows",
                config.catalog_sheet
            )));
        }

        let by_key = products
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.key(), idx))
            .collect();

        Ok(Self { products, by_key })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products passing a filter, in catalog order
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Look up a product by normalized name
    pub fn lookup(&self, key: &str) -> Option<&Product> {
        self.by_key.get(key).map(|idx| &self.products[*idx])
    }

    /// Unit price and cost for a normalized name; absent products price at
    /// zero so a staged entry never fails the value recompute
    pub fn price_and_cost(&self, key: &str) -> (f64, f64) {
        self.lookup(key)
            .map(|p| (p.unit_price, p.unit_cost))
            .unwrap_or((0.0, 0.0))
    }

    /// Distinct categories of an area, sorted
    pub fn categories(&self, area: Area) -> Vec<String> {
        let filter = CatalogFilter {
            area: Some(area),
            ..Default::default()
        };
        distinct(self.filter(&filter).iter().map(|p| p.category.clone()))
    }

    /// Distinct sub-families of an area/category, sorted
    pub fn sub_families(&self, area: Area, category: &str) -> Vec<String> {
        let filter = CatalogFilter {
            area: Some(area),
            category: Some(category.to_string()),
            ..Default::default()
        };
        distinct(self.filter(&filter).iter().map(|p| p.sub_family.clone()))
    }

    /// Distinct product names passing a filter, sorted
    pub fn product_names(&self, filter: &CatalogFilter) -> Vec<String> {
        distinct(self.filter(filter).iter().map(|p| p.name.clone()))
    }
}

fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut values: Vec<String> = values.filter(|v| !v.is_empty()).collect();
    values.sort();
    values.dedup();
    values
}

fn text_or_default(worksheet: &Worksheet, row: u32, col: Option<u32>) -> String {
    col.map(|c| worksheet.cell(row, c).as_text().trim().to_string())
        .unwrap_or_default()
}

/// Catalog numerics tolerate blank cells, stray spaces and thousands
/// separators; anything else coerces to zero with a debug trace. A single
/// bad price cell must not block inventory entry.
fn lenient_number(worksheet: &Worksheet, row: u32, col: Option<u32>) -> f64 {
    let Some(col) = col else { return 0.0 };
    let cell = worksheet.cell(row, col);
    match cell {
        CellValue::Number(n) => *n,
        CellValue::Empty => 0.0,
        other => {
            let cleaned: String = other
                .as_text()
                .chars()
                .filter(|c| *c != ' ' && *c != ',')
                .collect();
            cleaned.parse().unwrap_or_else(|_| {
                debug!(row, col, raw = %other.as_text(), "unparsable catalog number, using 0");
                0.0
            })
        }
    }
}
