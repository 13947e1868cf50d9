//! # hwcat CLI
//!
//! The `hwcat` binary is the command-line interface to the hardware
//! component catalog. It lists and inspects components, searches across
//! components and reviews, and builds side-by-side comparisons.
//!
//! ## Usage
//!
//! ```bash
//! hwcat --config ./hwcat.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `hwcat list [kind]` | List components, optionally filtered and sorted |
//! | `hwcat show <kind> <id>` | Show one component with its full spec sheet |
//! | `hwcat manufacturers` | List distinct manufacturer names |
//! | `hwcat search "<query>"` | Search components and reviews |
//! | `hwcat suggest` | Print search suggestions |
//! | `hwcat compare <kind:id> <kind:id> [kind:id]` | Compare 2-3 same-kind components |
//! | `hwcat stats` | Catalog record counts |
//!
//! ## Examples
//!
//! ```bash
//! # Cheapest processors between 5000 and 10000 CZK
//! hwcat list processor --price-range 5000-10000 --sort price_asc
//!
//! # One component with its spec sheet
//! hwcat show graphics_card 4
//!
//! # Search everything, priciest hits first
//! hwcat search "ryzen" --sort price_desc
//!
//! # Side-by-side comparison
//! hwcat compare processor:12 processor:15 processor:17
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use hwcat::catalog::Catalog;
use hwcat::compare::ComparisonTable;
use hwcat::config;
use hwcat::models::{ComponentKind, SpecValue};
use hwcat::normalize;
use hwcat::pipeline::FilterSort;
use hwcat::search::{SearchScope, SearchSort};
use hwcat::selection::{ComparisonSelection, SelectionKey};
use hwcat::store::JsonStore;

/// hwcat — a hardware component catalog with search and comparison.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file naming the JSON catalog to load.
#[derive(Parser)]
#[command(
    name = "hwcat",
    about = "hwcat — a hardware component catalog with search and comparison",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./hwcat.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// List components.
    ///
    /// Without a kind, lists the whole catalog. Filters combine as a
    /// conjunction; a price range never matches components with an
    /// unknown price.
    List {
        /// Component kind: `processor`, `graphics_card`, `ram`, `storage`,
        /// `motherboard`, `power_supply` (or `cpu`, `gpu`, `psu`).
        kind: Option<String>,

        /// Case-insensitive manufacturer substring filter.
        #[arg(long)]
        brand: Option<String>,

        /// Price range: `0-2000`, `2000-5000`, `5000-10000`, `10000-20000`, `20000+`.
        #[arg(long)]
        price_range: Option<String>,

        /// Sort order: `name`, `price_asc`, `price_desc`, `rating`.
        #[arg(long, default_value = "name")]
        sort: String,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show one component with its full spec sheet and similar components.
    Show {
        /// Component kind.
        kind: String,

        /// Component id (unique within its kind).
        id: i64,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List distinct manufacturer names across the whole catalog.
    Manufacturers,

    /// Search components and reviews.
    ///
    /// An empty query returns nothing. A sub-scan that fails against
    /// storage is skipped; the rest of the search still answers.
    Search {
        /// The search query string.
        query: String,

        /// Search scope: `all`, `components`, or `reviews`.
        #[arg(long, default_value = "all")]
        scope: String,

        /// Restrict the component scan to one kind.
        #[arg(long)]
        kind: Option<String>,

        /// Sort order: `relevance`, `price_asc`, `price_desc`, `date`, `rating`.
        #[arg(long, default_value = "relevance")]
        sort: String,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print search suggestions sampled from the catalog.
    Suggest {
        /// Maximum number of suggestions (defaults to the configured limit).
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Compare 2-3 components of one kind side by side.
    ///
    /// Selections are `kind:id` pairs, e.g. `processor:12`. Rows with a
    /// declared ordering mark their best values with `*`.
    Compare {
        /// Components to compare, as `kind:id`.
        #[arg(num_args = 2..=3, required = true)]
        selections: Vec<String>,

        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Catalog record counts per kind.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    let store = Arc::new(JsonStore::load(&cfg.catalog.path)?);
    let catalog = Catalog::new(store.clone(), store);

    match cli.command {
        Commands::List {
            kind,
            brand,
            price_range,
            sort,
            json,
        } => {
            let kind = kind.as_deref().map(str::parse::<ComponentKind>).transpose()?;
            let opts = FilterSort {
                manufacturer: brand,
                price_bucket: price_range.as_deref().map(str::parse).transpose()?,
                sort: sort.parse()?,
            };
            let components = catalog.list_components(kind, &opts).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&components)?);
            } else if components.is_empty() {
                println!("No components found.");
            } else {
                for c in &components {
                    println!(
                        "[{}] {} #{} — {} | {} | {} | rating {}/5 ({} reviews)",
                        c.type_display,
                        c.name,
                        c.id,
                        c.manufacturer,
                        c.description,
                        fmt_price(c.price),
                        c.rating,
                        c.reviews_count,
                    );
                }
                println!("{} component(s)", components.len());
            }
        }

        Commands::Show { kind, id, json } => {
            let kind: ComponentKind = kind.parse()?;
            let (component, specs) = catalog.get_component(kind, id).await?;
            let similar = catalog.similar_components(kind, id, 4).await?;

            if json {
                let out = serde_json::json!({
                    "component": component,
                    "specs": specs,
                    "similar": similar,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{} ({})", component.name, component.type_display);
                println!("  Manufacturer: {}", component.manufacturer);
                println!("  Price:        {}", fmt_price(component.price));
                println!(
                    "  Rating:       {}/5 ({} reviews)",
                    component.rating, component.reviews_count
                );
                println!("  Summary:      {}", component.description);
                println!();
                println!("Specifications:");
                for entry in &specs {
                    println!("  {:<16} {}", format!("{}:", entry.label), entry.value);
                }
                if !similar.is_empty() {
                    println!();
                    println!("Similar components:");
                    for c in &similar {
                        println!("  {} — {}", c.name, fmt_price(c.price));
                    }
                }
            }
        }

        Commands::Manufacturers => {
            for name in catalog.list_manufacturers().await? {
                println!("{}", name);
            }
        }

        Commands::Search {
            query,
            scope,
            kind,
            sort,
            json,
        } => {
            let scope: SearchScope = scope.parse()?;
            let kind = kind.as_deref().map(str::parse::<ComponentKind>).transpose()?;
            let sort: SearchSort = sort.parse()?;
            let results = catalog.search(&query, scope, kind, sort).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else if results.is_empty() {
                println!("No results for '{}'.", query);
            } else {
                for r in &results {
                    let price = match r.price {
                        Some(p) => format!(" | {}", fmt_price(p)),
                        None => String::new(),
                    };
                    println!(
                        "[{}] {} — {}{} ({})",
                        r.type_label, r.title, r.description, price, r.url
                    );
                }
                println!("{} result(s)", results.len());
            }
        }

        Commands::Suggest { limit } => {
            let limit = limit.unwrap_or(cfg.search.suggestion_limit);
            for suggestion in catalog.suggestions(limit).await {
                println!("{}", suggestion);
            }
        }

        Commands::Compare { selections, json } => {
            let mut selection = ComparisonSelection::new();
            for spec in &selections {
                let key: SelectionKey = spec.parse()?;
                catalog.selection_add(&mut selection, key).await?;
            }
            let table = catalog.compare(&selection).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                print_comparison(&table);
            }
        }

        Commands::Stats => {
            let stats = catalog.stats().await?;
            for (kind, count) in &stats.per_kind {
                println!("{:<16} {}", format!("{}:", kind), count);
            }
            println!("{:<16} {}", "components:", stats.total_components);
            println!("{:<16} {}", "reviews:", stats.total_reviews);
        }
    }

    Ok(())
}

fn fmt_price(price: f64) -> String {
    normalize::format_value(&SpecValue::Price(price), Some("CZK"))
}

fn print_comparison(table: &ComparisonTable) {
    println!("Comparing: {}", table.columns.join(" vs "));
    for row in &table.rows {
        let cells: Vec<String> = row
            .formatted_values()
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                if row.best_indices.contains(&i) {
                    format!("{} *", value)
                } else {
                    value
                }
            })
            .collect();
        println!("  {:<18} {}", format!("{}:", row.label), cells.join(" | "));
    }
}
