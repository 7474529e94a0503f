//! CLI integration tests against the compiled binary.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use stocktake::sheet::{CellValue, WorkbookStore};
use tempfile::TempDir;

fn fixture() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inventario.xlsx");
    common::write_fixture_workbook(&path);
    (dir, path)
}

fn stocktake() -> Command {
    Command::cargo_bin("stocktake").unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// CHECK
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_check_resolves_the_fixture_workbook() {
    let (_dir, path) = fixture();
    stocktake()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("All sheets resolve"))
        .stdout(predicate::str::contains("INVENTARIO_BARRA"));
}

#[test]
fn test_check_fails_on_missing_mandatory_column() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xlsx");
    common::write_broken_workbook(&path);

    stocktake()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("no date column"));
}

#[test]
fn test_check_single_area() {
    let (_dir, path) = fixture();
    stocktake()
        .args(["check", path.to_str().unwrap(), "--area", "supplies"])
        .assert()
        .success()
        .stdout(predicate::str::contains("INVENTARIO_SUMINISTROS"))
        .stdout(predicate::str::contains("INVENTARIO_BARRA").not());
}

// ═══════════════════════════════════════════════════════════════════════════
// CATALOG
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_catalog_lists_products() {
    let (_dir, path) = fixture();
    stocktake()
        .args(["catalog", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("GIN BOMBAY"))
        .stdout(predicate::str::contains("LOMO DE RES"));
}

#[test]
fn test_catalog_area_filter() {
    let (_dir, path) = fixture();
    stocktake()
        .args(["catalog", path.to_str().unwrap(), "--area", "kitchen"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LOMO DE RES"))
        .stdout(predicate::str::contains("GIN BOMBAY").not());
}

#[test]
fn test_catalog_unmatched_filters_report_no_products() {
    let (_dir, path) = fixture();
    stocktake()
        .args([
            "catalog",
            path.to_str().unwrap(),
            "--area",
            "bar",
            "--category",
            "PROTEINA",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No products match"));
}

// ═══════════════════════════════════════════════════════════════════════════
// SAVE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_save_writes_the_staged_cells() {
    let (_dir, path) = fixture();
    stocktake()
        .args([
            "save",
            path.to_str().unwrap(),
            "--area",
            "bar",
            "--date",
            "31-10-2025",
            "--set",
            "GIN BOMBAY=4,0.3,1",
            "--comment",
            "conteo de cierre",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved: 1 rows updated"));

    let store = WorkbookStore::open(&path).unwrap();
    let bar = store.sheet(common::BAR).unwrap();
    assert_eq!(bar.cell(4, 2), &CellValue::Number(4.0));
    assert_eq!(bar.cell(4, 3), &CellValue::Number(0.3));
    assert_eq!(bar.cell(4, 4), &CellValue::Number(1.0));
    assert_eq!(bar.cell(4, 6), &CellValue::Text("31-10-2025".to_string()));
    assert_eq!(
        bar.cell(3, 3),
        &CellValue::Text("conteo de cierre".to_string())
    );
}

#[test]
fn test_save_accepts_spellings_matching_after_normalization() {
    let (_dir, path) = fixture();
    stocktake()
        .args([
            "save",
            path.to_str().unwrap(),
            "--area",
            "kitchen",
            "--set",
            "lomo de res=2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved: 1 rows updated"));

    let store = WorkbookStore::open(&path).unwrap();
    assert_eq!(
        store.sheet(common::KITCHEN).unwrap().cell(4, 2),
        &CellValue::Number(2.0)
    );
}

#[test]
fn test_save_unknown_product_fails() {
    let (_dir, path) = fixture();
    stocktake()
        .args([
            "save",
            path.to_str().unwrap(),
            "--area",
            "bar",
            "--set",
            "MEZCAL ARTESANAL=2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UnknownProduct"));
}

#[test]
fn test_save_product_of_another_area_fails() {
    let (_dir, path) = fixture();
    // LOMO DE RES belongs to the kitchen, not the bar
    stocktake()
        .args([
            "save",
            path.to_str().unwrap(),
            "--area",
            "bar",
            "--set",
            "LOMO DE RES=2",
        ])
        .assert()
        .failure();
}

#[test]
fn test_save_invalid_quantity_fails_loudly() {
    let (_dir, path) = fixture();
    stocktake()
        .args([
            "save",
            path.to_str().unwrap(),
            "--area",
            "bar",
            "--set",
            "GIN BOMBAY=dos",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidQuantity"));
}

#[test]
fn test_save_all_zero_quantities_fail() {
    let (_dir, path) = fixture();
    stocktake()
        .args([
            "save",
            path.to_str().unwrap(),
            "--area",
            "bar",
            "--set",
            "GIN BOMBAY=0,0",
        ])
        .assert()
        .failure();
}

#[test]
fn test_save_bottles_outside_the_bar_fail() {
    let (_dir, path) = fixture();
    stocktake()
        .args([
            "save",
            path.to_str().unwrap(),
            "--area",
            "kitchen",
            "--set",
            "LOMO DE RES=2,0,1",
        ])
        .assert()
        .failure();
}

#[test]
fn test_save_skips_products_without_a_destination_row() {
    let (_dir, path) = fixture();
    stocktake()
        .args([
            "save",
            path.to_str().unwrap(),
            "--area",
            "kitchen",
            "--set",
            "ACEITE DE OLIVA=5",
            "--set",
            "ARROZ=3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 skipped"));
}

// ═══════════════════════════════════════════════════════════════════════════
// RESET
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_reset_requires_confirmation_off_terminal() {
    let (_dir, path) = fixture();
    stocktake()
        .args(["reset", path.to_str().unwrap(), "--area", "bar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ResetNotConfirmed"));
}

#[test]
fn test_reset_rejects_a_wrong_confirmation_token() {
    let (_dir, path) = fixture();
    stocktake()
        .args([
            "reset",
            path.to_str().unwrap(),
            "--area",
            "bar",
            "--confirm",
            "KITCHEN",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ResetNotConfirmed"));
}

#[test]
fn test_reset_clears_the_area_sheet() {
    let (_dir, path) = fixture();

    // Record quantities first
    stocktake()
        .args([
            "save",
            path.to_str().unwrap(),
            "--area",
            "bar",
            "--date",
            "31-10-2025",
            "--set",
            "GIN BOMBAY=4,0.3,1",
            "--comment",
            "antes del reset",
        ])
        .assert()
        .success();

    stocktake()
        .args([
            "reset",
            path.to_str().unwrap(),
            "--area",
            "bar",
            "--confirm",
            "bar",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 product rows cleared"));

    let store = WorkbookStore::open(&path).unwrap();
    let bar = store.sheet(common::BAR).unwrap();
    for row in [4, 5] {
        for col in [2, 3, 4, 5] {
            assert_eq!(bar.cell(row, col), &CellValue::Number(0.0));
        }
        assert_eq!(bar.cell(row, 6), &CellValue::Empty);
    }
    assert_eq!(bar.cell(3, 3), &CellValue::Empty);
}
