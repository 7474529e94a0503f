//! CLI command handlers: catalog, check, enter, save, reset.

use crate::catalog::{Catalog, CatalogFilter};
use crate::config::StoreConfig;
use crate::entry::{parse_quantity, EntryBuffer, QuantityInput};
use crate::error::{StocktakeError, StocktakeResult};
use crate::normalize::normalize_key;
use crate::resolve::SheetContext;
use crate::session::{AreaStaging, Session};
use crate::sheet::{column_number_to_letter, format_number, WorkbookStore};
use crate::types::{Area, StagedEntry};
use crate::writer::{build_reset_batch, build_save_batch, SaveStats};
use chrono::{Local, NaiveDate};
use colored::Colorize;
use std::io::IsTerminal;
use std::path::PathBuf;

use super::prompt;

/// Execute the catalog command: print the filtered product catalog
pub fn catalog(
    workbook: PathBuf,
    config_path: Option<PathBuf>,
    area: Option<Area>,
    category: Option<String>,
    sub_family: Option<String>,
    product: Option<String>,
) -> StocktakeResult<()> {
    let config = StoreConfig::load(config_path.as_deref())?;
    let store = WorkbookStore::open(&workbook)?;
    let catalog = Catalog::load(&store, &config)?;

    println!("{}", "📦 Stocktake - Product catalog".bold().green());
    println!("   File: {}\n", workbook.display());

    let filter = CatalogFilter {
        area,
        category,
        sub_family,
        product,
    };
    let products = catalog.filter(&filter);
    if products.is_empty() {
        println!("{}", "No products match the given filters".yellow());
        return Ok(());
    }

    println!(
        "{:<12} {:<14} {:<14} {:<30} {:<10} {:>8} {:>8} {:>8}",
        "AREA", "CATEGORY", "SUB-FAMILY", "PRODUCT", "UNIT", "UOM", "PRICE", "COST"
    );
    println!("{}", "─".repeat(110));
    for p in &products {
        println!(
            "{:<12} {:<14} {:<14} {:<30} {:<10} {:>8} {:>8} {:>8}",
            p.area_label,
            p.category,
            p.sub_family,
            p.name,
            p.recipe_unit,
            format_number(p.uom_quantity),
            format_number(p.unit_price),
            format_number(p.unit_cost),
        );
    }
    println!("\n{} products", products.len());
    Ok(())
}

/// Execute the check command: resolve headers and rows for every
/// destination sheet and report the layout
pub fn check(
    workbook: PathBuf,
    config_path: Option<PathBuf>,
    area: Option<Area>,
) -> StocktakeResult<()> {
    let config = StoreConfig::load(config_path.as_deref())?;

    println!("{}", "📋 Stocktake - Workbook check".bold().green());
    println!("   File: {}\n", workbook.display());

    let store = WorkbookStore::open(&workbook)?;
    let mut failures = 0;

    match Catalog::load(&store, &config) {
        Ok(catalog) => println!(
            "{} catalog '{}': {} products",
            "✅".green(),
            config.catalog_sheet,
            catalog.products().len()
        ),
        Err(e) => {
            println!("{} catalog '{}': {}", "❌".red(), config.catalog_sheet, e);
            failures += 1;
        }
    }

    let areas: Vec<Area> = match area {
        Some(a) => vec![a],
        None => Area::ALL.to_vec(),
    };
    for area in areas {
        match SheetContext::resolve(&store, &config, area) {
            Ok(context) => {
                let col = |c: u32| column_number_to_letter(c);
                let opt = |c: Option<u32>| {
                    c.map(column_number_to_letter).unwrap_or_else(|| "-".to_string())
                };
                println!("{} {} → {}", "✅".green(), area, context.sheet);
                println!(
                    "      product {}, closed {}, open {}, bottles {}, value {}, date {}; {} product rows",
                    col(context.columns.product),
                    col(context.columns.closed),
                    col(context.columns.open),
                    opt(context.columns.open_bottles),
                    opt(context.columns.value),
                    col(context.columns.date),
                    context.rows.len(),
                );
            }
            Err(e) => {
                println!("{} {}: {}", "❌".red(), area, e);
                failures += 1;
            }
        }
    }

    println!();
    if failures > 0 {
        Err(StocktakeError::Validation(format!(
            "{} sheet(s) failed to resolve",
            failures
        )))
    } else {
        println!("{}", "✅ All sheets resolve".bold().green());
        Ok(())
    }
}

/// Execute the save command: stage quantities from --set specs and write
/// them in one batch
pub fn save(
    workbook: PathBuf,
    config_path: Option<PathBuf>,
    area: Area,
    date: Option<String>,
    sets: Vec<String>,
    comment: Option<String>,
) -> StocktakeResult<()> {
    let config = StoreConfig::load(config_path.as_deref())?;
    let mut store = WorkbookStore::open(&workbook)?;
    let catalog = Catalog::load(&store, &config)?;
    let date = resolve_date(date.as_deref(), &config)?;
    let mut session = Session::new(date);

    let mut entries = Vec::new();
    for spec in &sets {
        let parsed = parse_set_spec(spec)?;
        if parsed.open_bottles.is_some() && !area.tracks_open_bottles() {
            return Err(StocktakeError::Validation(format!(
                "open-bottle counts only apply to the bar area, not {}",
                area
            )));
        }
        let product = catalog
            .lookup(&normalize_key(&parsed.product))
            .filter(|p| p.area == Some(area))
            .ok_or_else(|| StocktakeError::UnknownProduct(parsed.product.clone()))?;
        let entry = StagedEntry::new(
            product.name.clone(),
            parsed.closed,
            parsed.open,
            parsed.open_bottles,
        );
        if entry.is_zero() {
            return Err(StocktakeError::Validation(format!(
                "'{}' has no non-zero quantity; reset clears an area, save records counts",
                parsed.product
            )));
        }
        entries.push(entry);
    }

    session.merge(area, entries, &catalog);
    if let Some(text) = comment {
        session.set_comment(area, text);
    }

    println!("{}", "💾 Stocktake - Saving inventory".bold().green());
    println!("   File: {}", workbook.display());
    println!("   Area: {}  Date: {}\n", area, date.format(&config.date_format));
    print_preview(session.staging(area));
    println!();

    let stats = commit_save(&mut store, &config, area, &mut session)?;
    print_save_summary(&stats, config.sheet_for(area));
    Ok(())
}

/// Execute the reset command: zero an area's quantity cells and clear its
/// dates and comment. Destructive and area-wide, so it takes a two-step
/// confirmation: the request plus either --confirm naming the area or the
/// interactive prompt sequence.
pub fn reset(
    workbook: PathBuf,
    config_path: Option<PathBuf>,
    area: Area,
    confirm: Option<String>,
) -> StocktakeResult<()> {
    let config = StoreConfig::load(config_path.as_deref())?;

    let confirmed = match confirm {
        Some(token) => {
            if normalize_key(&token) == area.label() {
                true
            } else {
                return Err(StocktakeError::ResetNotConfirmed(format!(
                    "--confirm '{}' does not name the {} area",
                    token, area
                )));
            }
        }
        None if std::io::stdin().is_terminal() => prompt_reset_confirmation(area)?,
        None => {
            return Err(StocktakeError::ResetNotConfirmed(format!(
                "pass --confirm {} to reset non-interactively",
                area.label()
            )));
        }
    };
    if !confirmed {
        println!("{}", "Reset cancelled".yellow());
        return Ok(());
    }

    let mut store = WorkbookStore::open(&workbook)?;
    let cleared = commit_reset(&mut store, &config, area)?;
    println!(
        "{} Reset: {} product rows cleared in {}",
        "✅".green(),
        cleared,
        config.sheet_for(area)
    );
    Ok(())
}

/// Execute the enter command: the interactive entry form
pub fn enter(
    workbook: PathBuf,
    config_path: Option<PathBuf>,
    area: Area,
    date: Option<String>,
    category: Option<String>,
    sub_family: Option<String>,
    product: Option<String>,
) -> StocktakeResult<()> {
    let config = StoreConfig::load(config_path.as_deref())?;
    let mut store = WorkbookStore::open(&workbook)?;
    let catalog = Catalog::load(&store, &config)?;
    let date = resolve_date(date.as_deref(), &config)?;
    let mut session = Session::new(date);
    let mut filter = CatalogFilter {
        area: Some(area),
        category,
        sub_family,
        product,
    };

    println!("{}", "📦 Stocktake - Daily inventory entry".bold().green());
    println!("   File: {}", workbook.display());
    println!("   Area: {}  Date: {}\n", area, date.format(&config.date_format));

    let menu: Vec<String> = [
        "Edit quantities",
        "Change filters",
        "Preview staged entries",
        "Set area comment",
        "Save to workbook",
        "Reset area",
        "Quit",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    loop {
        let staged = session.staging(area).entries.len();
        let action = prompt::select(&format!("{} entries staged; action", staged), &menu)?;
        match action {
            0 => edit_quantities(&catalog, area, &filter, &mut session)?,
            1 => filter = prompt_filters(&catalog, area)?,
            2 => print_preview(session.staging(area)),
            3 => {
                let text = prompt::input_text("Area comment")?;
                session.set_comment(area, text);
            }
            4 => match commit_save(&mut store, &config, area, &mut session) {
                Ok(stats) => print_save_summary(&stats, config.sheet_for(area)),
                Err(StocktakeError::Validation(msg)) => {
                    println!("   {} {}", "✗".red(), msg);
                }
                Err(e) => return Err(e),
            },
            5 => {
                if prompt_reset_confirmation(area)? {
                    let cleared = commit_reset(&mut store, &config, area)?;
                    session.clear_area(area);
                    println!(
                        "   {} {} product rows cleared in {}",
                        "✅".green(),
                        cleared,
                        config.sheet_for(area)
                    );
                } else {
                    println!("   {}", "reset cancelled".yellow());
                }
            }
            _ => {
                if !session.staging(area).is_empty()
                    && !prompt::confirm("Discard staged entries and quit?")?
                {
                    continue;
                }
                break;
            }
        }
        println!();
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────
// Shared pieces
// ─────────────────────────────────────────────────────────────────────────

/// Write an area's staged entries as one batch and clear the staging
fn commit_save(
    store: &mut WorkbookStore,
    config: &StoreConfig,
    area: Area,
    session: &mut Session,
) -> StocktakeResult<SaveStats> {
    if session.staging(area).is_empty() {
        return Err(StocktakeError::Validation(format!(
            "no staged entries for {}",
            area
        )));
    }

    let context = SheetContext::resolve(store, config, area)?;
    let date_text = session.date.format(&config.date_format).to_string();
    let (updates, stats) = build_save_batch(
        &context.sheet,
        &context.columns,
        &context.rows,
        session.staging(area),
        &date_text,
        config.comment_cell()?,
    );
    store.apply(&updates)?;
    store.save()?;
    session.clear_area(area);
    Ok(stats)
}

/// Zero out an area sheet and clear its comment cell
fn commit_reset(
    store: &mut WorkbookStore,
    config: &StoreConfig,
    area: Area,
) -> StocktakeResult<usize> {
    let context = SheetContext::resolve(store, config, area)?;
    let updates = build_reset_batch(
        &context.sheet,
        &context.columns,
        &context.rows,
        config.comment_cell()?,
    );
    store.apply(&updates)?;
    store.save()?;
    Ok(context.rows.len())
}

fn print_save_summary(stats: &SaveStats, sheet: &str) {
    let skipped = if stats.skipped > 0 {
        format!(", {} skipped (no matching row)", stats.skipped)
            .yellow()
            .to_string()
    } else {
        String::new()
    };
    println!(
        "{} Saved: {} rows updated{} ({} cells) → {}",
        "✅".green(),
        stats.written,
        skipped,
        stats.cells,
        sheet
    );
}

fn print_preview(staging: &AreaStaging) {
    if staging.is_empty() {
        println!("   {}", "nothing staged yet".yellow());
        return;
    }
    println!(
        "   {:<30} {:>8} {:>8} {:>8} {:>10}",
        "PRODUCT", "CLOSED", "OPEN", "BOTTLES", "VALUE"
    );
    println!("   {}", "─".repeat(68));
    for entry in &staging.entries {
        println!(
            "   {:<30} {:>8} {:>8} {:>8} {:>10}",
            entry.product,
            format_number(entry.closed),
            format_number(entry.open),
            entry
                .open_bottles
                .map(format_number)
                .unwrap_or_else(|| "-".to_string()),
            format_number(entry.value),
        );
    }
    println!("   {}", "─".repeat(68));
    println!(
        "   {:<30} {:>37}",
        "TOTAL",
        format_number(staging.total_value())
    );
    if !staging.comment.is_empty() {
        println!("   Comment: {}", staging.comment);
    }
}

/// Prompt every row of the (filtered) buffer and merge into staging
fn edit_quantities(
    catalog: &Catalog,
    area: Area,
    filter: &CatalogFilter,
    session: &mut Session,
) -> StocktakeResult<()> {
    let mut buffer = EntryBuffer::build(catalog, area, filter);
    if buffer.is_empty() {
        println!("   {} no products match the current filters", "✗".red());
        return Ok(());
    }
    println!(
        "   {} products; empty input leaves a quantity at zero",
        buffer.rows().len()
    );
    for row in buffer.rows_mut() {
        let unit = if row.recipe_unit.is_empty() {
            String::new()
        } else {
            format!(" ({} {})", format_number(row.uom_quantity), row.recipe_unit)
        };
        println!("   {}{}", row.product.bold(), unit.dimmed());
        row.closed = prompt::quantity("     closed units")?;
        row.open = prompt::quantity("     open (weighed)")?;
        if row.open_bottles.is_some() {
            row.open_bottles = Some(prompt::quantity("     open bottles")?);
        }
    }
    let staged = session.merge(area, buffer.staged_entries(), catalog);
    println!("   {} {} entries staged for {}", "✅".green(), staged, area);
    Ok(())
}

/// Category → sub-family → product selection, every level optional
fn prompt_filters(catalog: &Catalog, area: Area) -> StocktakeResult<CatalogFilter> {
    let mut filter = CatalogFilter {
        area: Some(area),
        ..Default::default()
    };

    let categories = with_all(catalog.categories(area));
    let pick = prompt::select("Category", &categories)?;
    if pick > 0 {
        filter.category = Some(categories[pick].clone());
    }

    if let Some(category) = filter.category.clone() {
        let sub_families = with_all(catalog.sub_families(area, &category));
        let pick = prompt::select("Sub-family", &sub_families)?;
        if pick > 0 {
            filter.sub_family = Some(sub_families[pick].clone());
        }
    }

    let names = with_all(catalog.product_names(&filter));
    let pick = prompt::select("Product", &names)?;
    if pick > 0 {
        filter.product = Some(names[pick].clone());
    }

    Ok(filter)
}

fn with_all(items: Vec<String>) -> Vec<String> {
    let mut options = vec!["ALL".to_string()];
    options.extend(items);
    options
}

/// The interactive half of the two-step reset confirmation: a yes/no
/// gate, then the area name typed back
fn prompt_reset_confirmation(area: Area) -> StocktakeResult<bool> {
    println!(
        "{}",
        format!(
            "⚠️  Reset wipes every quantity and date in the {} sheet.",
            area
        )
        .yellow()
        .bold()
    );
    if !prompt::confirm("Continue?")? {
        return Ok(false);
    }
    let typed = prompt::input_text(&format!("Type {} to confirm", area.label()))?;
    Ok(normalize_key(&typed) == area.label())
}

/// One `--set PRODUCT=CLOSED[,OPEN[,BOTTLES]]` spec, parsed.
/// Quantities here use dot decimals; the comma separates fields.
#[derive(Debug, Clone, PartialEq)]
struct SetSpec {
    product: String,
    closed: f64,
    open: f64,
    open_bottles: Option<f64>,
}

fn parse_set_spec(raw: &str) -> StocktakeResult<SetSpec> {
    let invalid = || {
        StocktakeError::Validation(format!(
            "invalid --set '{}' (expected PRODUCT=CLOSED[,OPEN[,BOTTLES]])",
            raw
        ))
    };

    let (product, quantities) = raw.split_once('=').ok_or_else(invalid)?;
    let product = product.trim();
    if product.is_empty() {
        return Err(invalid());
    }

    let parts: Vec<&str> = quantities.split(',').collect();
    if parts.len() > 3 {
        return Err(invalid());
    }

    let quantity = |idx: usize| -> StocktakeResult<f64> {
        let Some(part) = parts.get(idx) else {
            return Ok(0.0);
        };
        match parse_quantity(part) {
            QuantityInput::Empty => Ok(0.0),
            QuantityInput::Valid(n) => Ok(n),
            QuantityInput::Invalid(input) => Err(StocktakeError::InvalidQuantity {
                product: product.to_string(),
                input,
            }),
        }
    };

    Ok(SetSpec {
        product: product.to_string(),
        closed: quantity(0)?,
        open: quantity(1)?,
        open_bottles: if parts.len() >= 3 {
            Some(quantity(2)?)
        } else {
            None
        },
    })
}

/// Parse a date argument with the configured format, ISO as fallback;
/// no argument means today
fn resolve_date(raw: Option<&str>, config: &StoreConfig) -> StocktakeResult<NaiveDate> {
    let Some(raw) = raw else {
        return Ok(Local::now().date_naive());
    };
    NaiveDate::parse_from_str(raw, &config.date_format)
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .map_err(|_| {
            StocktakeError::Validation(format!(
                "invalid date '{}' (expected {} or %Y-%m-%d)",
                raw, config.date_format
            ))
        })
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
