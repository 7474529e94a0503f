//! Stocktake - daily restaurant inventory entry over Excel workbooks
//!
//! This library reads a product catalog and per-area destination sheets
//! from an .xlsx workbook, resolves their hand-maintained layouts into
//! typed column and row indices, stages quantity entries per operating
//! area, and writes them back as one batch of targeted cell updates.
//!
//! # Features
//!
//! - Header resolution tolerant of accents, case and historical spellings
//! - Product row location with normalized-name matching
//! - Per-area staging with derived inventory values (price × closed +
//!   cost × open)
//! - Batched cell writes and an area-wide reset, both all-or-nothing
//!
//! # Example
//!
//! ```no_run
//! use stocktake::catalog::{Catalog, CatalogFilter};
//! use stocktake::config::StoreConfig;
//! use stocktake::sheet::WorkbookStore;
//! use stocktake::types::Area;
//!
//! let config = StoreConfig::default();
//! let store = WorkbookStore::open("inventario.xlsx")?;
//! let catalog = Catalog::load(&store, &config)?;
//!
//! let bar = catalog.filter(&CatalogFilter {
//!     area: Some(Area::Bar),
//!     ..Default::default()
//! });
//! println!("Bar products: {}", bar.len());
//! # Ok::<(), stocktake::error::StocktakeError>(())
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod normalize;
pub mod resolve;
pub mod session;
pub mod sheet;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{StocktakeError, StocktakeResult};
pub use types::{Area, Product, StagedEntry};
