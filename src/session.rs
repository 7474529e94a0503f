//! Request-scoped session state: the per-area staging accumulators.
//!
//! Staging survives form refreshes for the lifetime of the session and is
//! cleared by a successful save or an area reset. Nothing here persists
//! across processes.

use crate::catalog::Catalog;
use crate::types::{Area, StagedEntry};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Pending entries and comment for one area
#[derive(Debug, Clone, Default)]
pub struct AreaStaging {
    pub entries: Vec<StagedEntry>,
    pub comment: String,
}

impl AreaStaging {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the derived inventory values of all staged entries
    pub fn total_value(&self) -> f64 {
        self.entries.iter().map(|e| e.value).sum()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.comment.clear();
    }
}

/// One entry session: the inventory date plus staging for every area
#[derive(Debug, Clone)]
pub struct Session {
    pub date: NaiveDate,
    /// Indexed in `Area::ALL` order
    staging: [AreaStaging; 3],
}

fn slot(area: Area) -> usize {
    match area {
        Area::Kitchen => 0,
        Area::Supplies => 1,
        Area::Bar => 2,
    }
}

impl Session {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            staging: Default::default(),
        }
    }

    pub fn staging(&self, area: Area) -> &AreaStaging {
        &self.staging[slot(area)]
    }

    fn staging_mut(&mut self, area: Area) -> &mut AreaStaging {
        &mut self.staging[slot(area)]
    }

    /// Merge edited rows into an area's staging.
    ///
    /// Existing staged entries whose product matches an incoming one are
    /// replaced outright, so each product stages at most once per area and
    /// re-merging the same selection is idempotent. Every staged entry's
    /// derived value is then recomputed from the catalog.
    ///
    /// Returns the number of staged entries after the merge.
    pub fn merge(&mut self, area: Area, incoming: Vec<StagedEntry>, catalog: &Catalog) -> usize {
        let staged = self.staging_mut(area);

        let incoming_keys: HashSet<String> = incoming.iter().map(|e| e.key()).collect();
        staged.entries.retain(|e| !incoming_keys.contains(&e.key()));
        staged.entries.extend(incoming);

        for entry in &mut staged.entries {
            let (price, cost) = catalog.price_and_cost(&entry.key());
            entry.value = price * entry.closed + cost * entry.open;
        }

        staged.entries.len()
    }

    /// Replace the free-text comment for an area
    pub fn set_comment(&mut self, area: Area, comment: impl Into<String>) {
        self.staging_mut(area).comment = comment.into();
    }

    /// Drop all staged entries and the comment for an area (after a save
    /// or a reset)
    pub fn clear_area(&mut self, area: Area) {
        self.staging_mut(area).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::sheet::WorkbookStore;

    fn fixture_catalog() -> Catalog {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.xlsx");
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let ws = workbook.add_worksheet();
        ws.set_name("BD_productos").unwrap();
        let headers = [
            "ÁREA",
            "CATEGORIA",
            "SUB FAMILIA",
            "PRODUCTO GENÉRICO",
            "PRECIO NETO",
            "COSTO X UNIDAD",
        ];
        for (idx, header) in headers.iter().enumerate() {
            ws.write_string(0, idx as u16, *header).unwrap();
        }
        let rows = [
            ["BARRA", "LICOR", "GIN", "GIN BOMBAY", "10", "4"],
            ["BARRA", "LICOR", "RON", "RON BLANCO", "8", "3"],
        ];
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                ws.write_string(r as u32 + 1, c as u16, *value).unwrap();
            }
        }
        workbook.save(&path).unwrap();
        let store = WorkbookStore::open(&path).unwrap();
        Catalog::load(&store, &StoreConfig::default()).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 31).unwrap()
    }

    #[test]
    fn test_merge_is_idempotent() {
        let catalog = fixture_catalog();
        let mut session = Session::new(date());

        let entry = StagedEntry::new("GIN BOMBAY", 2.0, 0.0, None);
        session.merge(Area::Bar, vec![entry.clone()], &catalog);
        session.merge(Area::Bar, vec![entry], &catalog);

        assert_eq!(session.staging(Area::Bar).entries.len(), 1);
    }

    #[test]
    fn test_merge_replaces_matching_products_and_keeps_others() {
        let catalog = fixture_catalog();
        let mut session = Session::new(date());

        session.merge(
            Area::Bar,
            vec![
                StagedEntry::new("GIN BOMBAY", 2.0, 0.0, None),
                StagedEntry::new("RON BLANCO", 1.0, 0.0, None),
            ],
            &catalog,
        );
        // Re-stage GIN with different quantities; RON must survive
        session.merge(
            Area::Bar,
            vec![StagedEntry::new("gin bombay", 5.0, 1.0, None)],
            &catalog,
        );

        let staged = &session.staging(Area::Bar).entries;
        assert_eq!(staged.len(), 2);
        let gin = staged.iter().find(|e| e.key() == "GIN BOMBAY").unwrap();
        assert_eq!(gin.closed, 5.0);
        assert_eq!(gin.open, 1.0);
    }

    #[test]
    fn test_merge_recomputes_derived_value() {
        let catalog = fixture_catalog();
        let mut session = Session::new(date());

        // closed=2, price=10, open=0 → value 20, regardless of cost
        session.merge(
            Area::Bar,
            vec![StagedEntry::new("GIN BOMBAY", 2.0, 0.0, None)],
            &catalog,
        );
        assert_eq!(session.staging(Area::Bar).entries[0].value, 20.0);

        // open side priced by cost: 2×10 + 0.5×4 = 22
        session.merge(
            Area::Bar,
            vec![StagedEntry::new("GIN BOMBAY", 2.0, 0.5, None)],
            &catalog,
        );
        assert_eq!(session.staging(Area::Bar).entries[0].value, 22.0);
    }

    #[test]
    fn test_unknown_product_values_at_zero() {
        let catalog = fixture_catalog();
        let mut session = Session::new(date());
        session.merge(
            Area::Bar,
            vec![StagedEntry::new("MEZCAL ARTESANAL", 3.0, 0.0, None)],
            &catalog,
        );
        assert_eq!(session.staging(Area::Bar).entries[0].value, 0.0);
    }

    #[test]
    fn test_staging_is_per_area() {
        let catalog = fixture_catalog();
        let mut session = Session::new(date());
        session.merge(
            Area::Bar,
            vec![StagedEntry::new("GIN BOMBAY", 1.0, 0.0, None)],
            &catalog,
        );
        assert!(session.staging(Area::Kitchen).is_empty());
        assert!(!session.staging(Area::Bar).is_empty());
    }

    #[test]
    fn test_clear_area_drops_entries_and_comment() {
        let catalog = fixture_catalog();
        let mut session = Session::new(date());
        session.merge(
            Area::Bar,
            vec![StagedEntry::new("GIN BOMBAY", 1.0, 0.0, None)],
            &catalog,
        );
        session.set_comment(Area::Bar, "conteo de cierre");

        session.clear_area(Area::Bar);
        assert!(session.staging(Area::Bar).is_empty());
        assert!(session.staging(Area::Bar).comment.is_empty());
    }

    #[test]
    fn test_total_value_sums_entries() {
        let catalog = fixture_catalog();
        let mut session = Session::new(date());
        session.merge(
            Area::Bar,
            vec![
                StagedEntry::new("GIN BOMBAY", 2.0, 0.0, None),
                StagedEntry::new("RON BLANCO", 1.0, 0.0, None),
            ],
            &catalog,
        );
        assert_eq!(session.staging(Area::Bar).total_value(), 28.0);
    }
}
