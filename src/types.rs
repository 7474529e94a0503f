use crate::normalize::normalize_key;
use serde::{Deserialize, Serialize};
use std::fmt;

//==============================================================================
// Operating areas
//==============================================================================

/// The three operating areas, each with its own destination sheet
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Kitchen,
    Supplies,
    Bar,
}

impl Area {
    pub const ALL: [Area; 3] = [Area::Kitchen, Area::Supplies, Area::Bar];

    /// Display label, also the token `reset --confirm` must repeat
    pub fn label(&self) -> &'static str {
        match self {
            Area::Kitchen => "KITCHEN",
            Area::Supplies => "SUPPLIES",
            Area::Bar => "BAR",
        }
    }

    /// Labels the catalog's area column may use for this area
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Area::Kitchen => &["KITCHEN", "COCINA"],
            Area::Supplies => &["SUPPLIES", "CONSUMIBLE", "SUMINISTROS"],
            Area::Bar => &["BAR", "BARRA"],
        }
    }

    /// Map a raw catalog area label onto an area, if it names one.
    ///
    /// Labels outside the known set (the catalog also tracks expense rows)
    /// map to `None` and stay out of the entry flows.
    pub fn from_label(raw: &str) -> Option<Area> {
        let key = normalize_key(raw);
        Area::ALL
            .into_iter()
            .find(|area| area.aliases().contains(&key.as_str()))
    }

    /// Only the bar tracks partially used bottles as a separate count
    pub fn tracks_open_bottles(&self) -> bool {
        matches!(self, Area::Bar)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//==============================================================================
// Catalog rows
//==============================================================================

/// One product row of the read-only catalog sheet
#[derive(Debug, Clone)]
pub struct Product {
    /// Operating area, when the raw label names one
    pub area: Option<Area>,
    /// Raw area label as the catalog spells it
    pub area_label: String,
    pub category: String,
    pub sub_family: String,
    /// Generic product name; unique per area by convention
    pub name: String,
    pub recipe_unit: String,
    pub uom_quantity: f64,
    pub unit_price: f64,
    pub unit_cost: f64,
}

impl Product {
    /// Normalized lookup key for this product's name
    pub fn key(&self) -> String {
        normalize_key(&self.name)
    }
}

//==============================================================================
// Staged inventory entries
//==============================================================================

/// A pending inventory entry for one product in one area
#[derive(Debug, Clone, PartialEq)]
pub struct StagedEntry {
    pub product: String,
    /// Count of sealed units
    pub closed: f64,
    /// Measured remaining quantity of partially used product
    pub open: f64,
    /// Partially used bottle count; bar only
    pub open_bottles: Option<f64>,
    /// Derived: unit_price x closed + unit_cost x open
    pub value: f64,
}

impl StagedEntry {
    pub fn new(product: impl Into<String>, closed: f64, open: f64, open_bottles: Option<f64>) -> Self {
        Self {
            product: product.into(),
            closed,
            open,
            open_bottles,
            value: 0.0,
        }
    }

    /// Normalized lookup key for this entry's product name
    pub fn key(&self) -> String {
        normalize_key(&self.product)
    }

    /// True when every quantity field is zero
    pub fn is_zero(&self) -> bool {
        self.closed == 0.0 && self.open == 0.0 && self.open_bottles.unwrap_or(0.0) == 0.0
    }
}
