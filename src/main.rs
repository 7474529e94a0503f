use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stocktake::cli;
use stocktake::error::StocktakeResult;
use stocktake::types::Area;

#[derive(Parser)]
#[command(name = "stocktake")]
#[command(about = "Daily restaurant inventory entry over Excel workbooks")]
#[command(long_about = "Stocktake - Daily inventory entry for restaurant operations

Reads the product catalog sheet of an .xlsx workbook, lets staff record
closed/open quantities per operating area (kitchen, supplies, bar), and
writes them back as one batch of targeted cell updates.

COMMANDS:
  enter    - Interactive entry form (filters, staged preview, save/reset)
  save     - Non-interactive save from --set specs
  catalog  - Print the filtered product catalog
  check    - Resolve every sheet's columns and product rows
  reset    - Zero an area's quantities and clear its dates (confirmed)

EXAMPLES:
  stocktake enter inventario.xlsx --area bar
  stocktake save inventario.xlsx --area kitchen --set \"LOMO DE RES=2,0.5\"
  stocktake check inventario.xlsx
  stocktake reset inventario.xlsx --area bar --confirm BAR

Docs: https://github.com/royalbit/stocktake")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Interactive entry form for one operating area.

Loads the catalog once, then loops: narrow the product selection by
category/sub-family/product, type closed and open quantities per product
(bar areas also track open bottles), preview the staged entries with
their derived inventory values, and save everything as a single batch.

Edits stage per product: re-entering a product replaces its staged
quantities, so each product is written at most once per save. Staging
lives in the session only; quitting discards it (after a prompt).

EXAMPLES:
  stocktake enter inventario.xlsx --area bar
  stocktake enter inventario.xlsx --area kitchen --category PROTEINA")]
    /// Interactive entry form for one area
    Enter {
        /// Path to the inventory workbook (.xlsx)
        workbook: PathBuf,

        /// Operating area to record
        #[arg(short, long, value_enum)]
        area: Area,

        /// Inventory date (configured format or YYYY-MM-DD; default today)
        #[arg(short, long)]
        date: Option<String>,

        /// Start with a category filter
        #[arg(long)]
        category: Option<String>,

        /// Start with a sub-family filter
        #[arg(long)]
        sub_family: Option<String>,

        /// Start with a product filter
        #[arg(long)]
        product: Option<String>,

        /// Layout config file (YAML)
        #[arg(short, long, env = "STOCKTAKE_CONFIG")]
        config: Option<PathBuf>,
    },

    #[command(long_about = "Save quantities without the interactive form.

Each --set stages one product: PRODUCT=CLOSED[,OPEN[,BOTTLES]].
Quantities use dot decimals here (the comma separates fields); the
bottles field only applies to the bar area. Every staged product must
exist in the catalog for the chosen area; products missing from the
destination sheet are skipped and reported.

EXAMPLES:
  stocktake save inv.xlsx --area kitchen --set \"LOMO DE RES=2,0.5\"
  stocktake save inv.xlsx --area bar --set \"GIN BOMBAY=4,0.3,1\" \\
      --set \"RON BLANCO=2\" --comment \"conteo de cierre\"")]
    /// Save staged quantities from --set specs
    Save {
        /// Path to the inventory workbook (.xlsx)
        workbook: PathBuf,

        /// Operating area to record
        #[arg(short, long, value_enum)]
        area: Area,

        /// Inventory date (configured format or YYYY-MM-DD; default today)
        #[arg(short, long)]
        date: Option<String>,

        /// Stage one product: PRODUCT=CLOSED[,OPEN[,BOTTLES]] (repeatable)
        #[arg(long = "set", required = true)]
        sets: Vec<String>,

        /// Free-text comment written to the area's comment cell
        #[arg(long)]
        comment: Option<String>,

        /// Layout config file (YAML)
        #[arg(short, long, env = "STOCKTAKE_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print the filtered product catalog
    Catalog {
        /// Path to the inventory workbook (.xlsx)
        workbook: PathBuf,

        /// Only products of this area
        #[arg(short, long, value_enum)]
        area: Option<Area>,

        /// Only products of this category
        #[arg(long)]
        category: Option<String>,

        /// Only products of this sub-family
        #[arg(long)]
        sub_family: Option<String>,

        /// Only this product
        #[arg(long)]
        product: Option<String>,

        /// Layout config file (YAML)
        #[arg(short, long, env = "STOCKTAKE_CONFIG")]
        config: Option<PathBuf>,
    },

    #[command(long_about = "Resolve the workbook layout without writing.

Reads the catalog and every destination sheet, resolves the semantic
columns (product, closed, open, bottles, value, date) through their
known header spellings, and counts product rows. Exits non-zero if any
mandatory column cannot be resolved; run this after someone reshuffles
a sheet, before trusting a save.")]
    /// Resolve sheet columns and product rows
    Check {
        /// Path to the inventory workbook (.xlsx)
        workbook: PathBuf,

        /// Check a single area instead of all three
        #[arg(short, long, value_enum)]
        area: Option<Area>,

        /// Layout config file (YAML)
        #[arg(short, long, env = "STOCKTAKE_CONFIG")]
        config: Option<PathBuf>,
    },

    #[command(long_about = "Zero an area's counters for a fresh count.

For every product row of the area sheet: closed, open, open-bottle and
value cells go to zero and the date cell is cleared; the comment cell is
cleared too. This is irreversible and area-wide, so it is gated twice:
the command itself, plus --confirm naming the area (or the interactive
confirmation sequence on a terminal).

EXAMPLES:
  stocktake reset inv.xlsx --area bar --confirm BAR
  stocktake reset inv.xlsx --area kitchen      # prompts interactively")]
    /// Zero an area's quantities and clear its dates
    Reset {
        /// Path to the inventory workbook (.xlsx)
        workbook: PathBuf,

        /// Operating area to reset
        #[arg(short, long, value_enum)]
        area: Area,

        /// Confirm by naming the area (KITCHEN, SUPPLIES or BAR)
        #[arg(long)]
        confirm: Option<String>,

        /// Layout config file (YAML)
        #[arg(short, long, env = "STOCKTAKE_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn main() -> StocktakeResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stocktake=warn".into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Enter {
            workbook,
            area,
            date,
            category,
            sub_family,
            product,
            config,
        } => cli::enter(workbook, config, area, date, category, sub_family, product),

        Commands::Save {
            workbook,
            area,
            date,
            sets,
            comment,
            config,
        } => cli::save(workbook, config, area, date, sets, comment),

        Commands::Catalog {
            workbook,
            area,
            category,
            sub_family,
            product,
            config,
        } => cli::catalog(workbook, config, area, category, sub_family, product),

        Commands::Check {
            workbook,
            area,
            config,
        } => cli::check(workbook, config, area),

        Commands::Reset {
            workbook,
            area,
            confirm,
            config,
        } => cli::reset(workbook, config, area, confirm),
    }
}
