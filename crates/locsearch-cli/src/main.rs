//! locsearch — Command-line interface for locsearch-core
//!
//! Inspect and query the bundled countries/states/cities dataset from
//! your terminal: dataset statistics, country/state listings, plain
//! substring city lookups, the ranked search the platform's search box
//! uses, and map-ready suggestions.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ locsearch stats
//!
//! - List all countries (optionally restricted at load time)
//!   $ locsearch countries
//!   $ locsearch --filter=RO,DE countries
//!
//! - Show details for a country by code (ISO2 or ISO3, case-insensitive)
//!   $ locsearch country ro
//!   $ locsearch country deu
//!
//! - Ranked search, the same ranking the search box shows
//!   $ locsearch search "buz"
//!
//! - Coordinate-bearing suggestions and the map focus of the top hit
//!   $ locsearch suggest "buz"
//!
//! - Compile a binary cache for fast subsequent loads
//!   $ locsearch compile locations.bin
//!   $ locsearch --input locations.bin stats
//!
//! Set `RUST_LOG=debug` for load/search tracing.
mod args;

use std::time::Instant;

use crate::args::{CliArgs, Commands};
use clap::Parser;
use locsearch_core::suggest::DEBOUNCE_DELAY;
use locsearch_core::{GeoDataset, LocationKind, MapView, SearchSession};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    // Determine input file (default: dataset bundled with locsearch-core)
    let input_path = args.input.unwrap_or_else(|| {
        let dir = GeoDataset::default_data_dir();
        let filename = GeoDataset::default_dataset_filename();
        dir.join(filename).to_string_lossy().to_string()
    });
    // Parse filter if provided
    let iso_filter: Option<Vec<&str>> = args.filter.as_ref().map(|s| {
        s.split(',')
            .map(|x| x.trim())
            .filter(|x| !x.is_empty())
            .collect()
    });

    let db = GeoDataset::load_from_path(&input_path, iso_filter.as_deref())?;

    match args.command {
        Commands::Stats => {
            let stats = db.stats();
            println!("Dataset statistics:");
            println!("  Countries: {}", stats.countries);
            println!("  States/Regions: {}", stats.states);
            println!("  Cities: {}", stats.cities);
        }

        Commands::Countries => {
            for c in db.countries() {
                println!("{} ({})", c.name, c.iso2);
            }
        }

        Commands::Country { code } => match db.find_country_by_code(&code) {
            Some(c) => {
                println!("Country: {}", c.name);
                println!("ISO2: {}", c.iso2);
                println!("ISO3: {}", c.iso3.as_deref().unwrap_or("-"));
                println!("Region: {}", c.region.as_deref().unwrap_or("-"));
                println!("Subregion: {}", c.subregion.as_deref().unwrap_or("-"));
                println!("States: {}", c.states.len());
            }
            None => {
                eprintln!("No country found for: {code}");
            }
        },

        Commands::States { iso2 } => match db.find_country_by_iso2(&iso2) {
            Some(c) => {
                println!("States in {}:", c.name);
                for s in &c.states {
                    println!("- {} ({})", s.name, s.code.as_deref().unwrap_or("-"));
                }
            }
            None => eprintln!("Country {iso2} not found"),
        },

        Commands::Cities { query } => {
            let matches = db.find_cities_by_substring(&query);
            if matches.is_empty() {
                println!("No cities found matching: {query}");
            } else {
                for (city, state, country) in matches {
                    println!("{} — {}, {}", city.name, state.name, country.name);
                }
            }
        }

        Commands::Search { query, limit } => {
            let results = db.search(&query, limit);
            if results.is_empty() {
                println!("No locations found");
            } else {
                for entry in results {
                    match &entry.parent {
                        Some(parent) => {
                            println!("{} [{}] — {}", entry.name, entry.kind.label(), parent)
                        }
                        None => println!("{} [{}]", entry.name, entry.kind.label()),
                    }
                }
            }
        }

        Commands::Suggest { query } => {
            // Drive a real debounced session with an explicit clock, the
            // same path the search box takes.
            let t0 = Instant::now();
            let mut session = SearchSession::suggestions(&db);
            session.set_query(&query, t0);
            session.poll(t0 + DEBOUNCE_DELAY);

            if let Some(err) = session.error() {
                eprintln!("search error: {err}");
            } else if !session.has_results() {
                println!("No locations found");
            } else {
                // Sectioned like the search box dropdown: one heading
                // per kind, rank order preserved inside each group.
                for kind in [LocationKind::Country, LocationKind::State, LocationKind::City] {
                    let mut group = session.results_of_kind(kind).peekable();
                    if group.peek().is_none() {
                        continue;
                    }
                    println!("{}:", kind.label());
                    for entry in group {
                        let (lat, lon) = entry.coordinates().unwrap_or_default();
                        println!("  {} @ {lat:.4},{lon:.4}", entry.name);
                    }
                }

                let mut map = MapView::default();
                if let Some(top) = session.results().first() {
                    map.focus(top);
                    let viewport = map.viewport();
                    println!(
                        "Map focus: center {:.4},{:.4} zoom {}",
                        viewport.center.0, viewport.center.1, viewport.zoom
                    );
                    if let Some(marker) = map.marker() {
                        println!("Marker: {} — {}", marker.title, marker.description);
                    }
                }
            }
        }

        Commands::Compile { output } => {
            let bytes = db.to_bytes()?;
            std::fs::write(&output, &bytes)?;
            let stats = db.stats();
            println!(
                "Wrote {} ({} countries, {} cities, {} bytes)",
                output,
                stats.countries,
                stats.cities,
                bytes.len()
            );
        }
    }

    Ok(())
}
