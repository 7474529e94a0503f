//! Shared workbook fixture for the integration suites.
#![allow(dead_code)]

use std::path::Path;

pub const CATALOG: &str = "BD_productos";
pub const KITCHEN: &str = "INVENTARIO_COCINA";
pub const SUPPLIES: &str = "INVENTARIO_SUMINISTROS";
pub const BAR: &str = "INVENTARIO_BARRA";

/// Write a workbook shaped like the production document: a catalog sheet
/// with headers on row 1 and three destination sheets with a banner, a
/// comment cell at C3, headers on row 3 and product rows from row 4.
///
/// The supplies sheet deliberately uses the older header spellings, and
/// the kitchen catalog carries one product ("ACEITE DE OLIVA") with no
/// row in the destination sheet.
pub fn write_fixture_workbook(path: &Path) {
    let mut workbook = rust_xlsxwriter::Workbook::new();

    // Catalog
    let ws = workbook.add_worksheet();
    ws.set_name(CATALOG).unwrap();
    let headers = [
        "ÁREA",
        "CATEGORIA",
        "SUB FAMILIA",
        "PRODUCTO GENÉRICO",
        "UNIDAD RECETA",
        "CANTIDAD DE UNIDAD DE MEDIDA",
        "PRECIO NETO",
        "COSTO X UNIDAD",
    ];
    for (idx, header) in headers.iter().enumerate() {
        ws.write_string(0, idx as u16, *header).unwrap();
    }
    let products: &[(&str, &str, &str, &str, &str, f64, f64, f64)] = &[
        ("COCINA", "PROTEINA", "RES", "LOMO DE RES", "KG", 1.0, 10.0, 8.0),
        ("COCINA", "PROTEINA", "CERDO", "COSTILLA DE CERDO", "KG", 1.0, 6.0, 5.0),
        ("COCINA", "ABARROTES", "GRANOS", "ARROZ", "KG", 1.0, 2.0, 1.5),
        ("COCINA", "ABARROTES", "ACEITES", "ACEITE DE OLIVA", "LT", 1.0, 12.0, 9.0),
        ("CONSUMIBLE", "LIMPIEZA", "QUIMICOS", "CLORO", "LT", 1.0, 3.0, 2.0),
        ("BARRA", "LICOR", "GIN", "GIN BOMBAY", "BOTELLA", 750.0, 20.0, 15.0),
        ("BARRA", "LICOR", "RON", "RON BLANCO", "BOTELLA", 750.0, 8.0, 3.0),
        ("GASTO", "SERVICIOS", "LUZ", "ELECTRICIDAD", "", 0.0, 0.0, 0.0),
    ];
    for (r, p) in products.iter().enumerate() {
        let row = r as u32 + 1;
        ws.write_string(row, 0, p.0).unwrap();
        ws.write_string(row, 1, p.1).unwrap();
        ws.write_string(row, 2, p.2).unwrap();
        ws.write_string(row, 3, p.3).unwrap();
        ws.write_string(row, 4, p.4).unwrap();
        ws.write_number(row, 5, p.5).unwrap();
        ws.write_number(row, 6, p.6).unwrap();
        ws.write_number(row, 7, p.7).unwrap();
    }

    // Kitchen: current header vintage
    let ws = workbook.add_worksheet();
    ws.set_name(KITCHEN).unwrap();
    ws.write_string(0, 0, "INVENTARIO COCINA").unwrap();
    let headers = [
        "PRODUCTO GENÉRICO",
        "CANTIDAD CERRADO",
        "CANTIDAD ABIERTO (PESO)",
        "VALOR INVENTARIO",
        "FECHA",
    ];
    for (idx, header) in headers.iter().enumerate() {
        ws.write_string(2, idx as u16, *header).unwrap();
    }
    for (r, product) in ["LOMO DE RES", "COSTILLA DE CERDO", "ARROZ"].iter().enumerate() {
        ws.write_string(r as u32 + 3, 0, *product).unwrap();
    }

    // Supplies: older header spellings, no value column
    let ws = workbook.add_worksheet();
    ws.set_name(SUPPLIES).unwrap();
    ws.write_string(0, 0, "INVENTARIO SUMINISTROS").unwrap();
    for (idx, header) in ["PRODUCTO", "CERRADO", "ABIERTO", "FECHA"].iter().enumerate() {
        ws.write_string(2, idx as u16, *header).unwrap();
    }
    ws.write_string(3, 0, "CLORO").unwrap();

    // Bar: tracks open bottles
    let ws = workbook.add_worksheet();
    ws.set_name(BAR).unwrap();
    ws.write_string(0, 0, "INVENTARIO BARRA").unwrap();
    let headers = [
        "PRODUCTO GENÉRICO",
        "CANTIDAD CERRADO",
        "CANTIDAD ABIERTO (PESO)",
        "BOTELLAS ABIERTAS",
        "VALOR INVENTARIO",
        "FECHA",
    ];
    for (idx, header) in headers.iter().enumerate() {
        ws.write_string(2, idx as u16, *header).unwrap();
    }
    for (r, product) in ["GIN BOMBAY", "RON BLANCO"].iter().enumerate() {
        ws.write_string(r as u32 + 3, 0, *product).unwrap();
    }

    workbook.save(path).unwrap();
}

/// Same document but with the kitchen sheet missing its date column;
/// header resolution must fail on it.
pub fn write_broken_workbook(path: &Path) {
    let mut workbook = rust_xlsxwriter::Workbook::new();

    let ws = workbook.add_worksheet();
    ws.set_name(CATALOG).unwrap();
    for (idx, header) in ["ÁREA", "CATEGORIA", "SUB FAMILIA", "PRODUCTO GENÉRICO"]
        .iter()
        .enumerate()
    {
        ws.write_string(0, idx as u16, *header).unwrap();
    }
    ws.write_string(1, 0, "COCINA").unwrap();
    ws.write_string(1, 1, "PROTEINA").unwrap();
    ws.write_string(1, 2, "RES").unwrap();
    ws.write_string(1, 3, "LOMO DE RES").unwrap();

    for name in [KITCHEN, SUPPLIES, BAR] {
        let ws = workbook.add_worksheet();
        ws.set_name(name).unwrap();
        ws.write_string(0, 0, "banner").unwrap();
        let headers = if name == KITCHEN {
            // No FECHA column
            ["PRODUCTO GENÉRICO", "CANTIDAD CERRADO", "CANTIDAD ABIERTO (PESO)"].as_slice()
        } else {
            ["PRODUCTO", "CERRADO", "ABIERTO", "FECHA"].as_slice()
        };
        for (idx, header) in headers.iter().enumerate() {
            ws.write_string(2, idx as u16, *header).unwrap();
        }
        ws.write_string(3, 0, "LOMO DE RES").unwrap();
    }

    workbook.save(path).unwrap();
}
