use std::error::Error;
use std::path::Path;

use clap::Parser;

use geoquest::analysis::catalog_analysis::CatalogAnalysis;
use geoquest::config::constants::{DEFAULT_COLLECTION_RADIUS_M, DEFAULT_REWARD_COINS};
use geoquest::data::{builtin, catalog_loader};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, help = "Catalog file (.json or .csv); defaults to the built-in landmarks")]
    catalog: Option<String>,

    #[arg(short, long, default_value_t = DEFAULT_COLLECTION_RADIUS_M)]
    radius: f64,

    #[arg(short, long, default_value = "catalog_analysis.txt")]
    output_file: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let catalog = match args.catalog.as_deref() {
        Some(path) if path.ends_with(".csv") => {
            catalog_loader::load_catalog_csv(path, DEFAULT_REWARD_COINS)?
        }
        Some(path) => catalog_loader::load_catalog_json(path, DEFAULT_REWARD_COINS)?,
        None => builtin::landmark_catalog(),
    };

    println!("Starting catalog analysis...");
    println!("POIs: {}, collection radius: {}m", catalog.len(), args.radius);

    let analysis = CatalogAnalysis::analyze(&catalog, args.radius);

    // Print summary to console
    analysis.print_summary();

    // Save detailed results to file
    println!("\nSaving detailed results to {}...", args.output_file);
    analysis.save_to_file(Path::new(&args.output_file))?;

    println!("Analysis complete!");

    Ok(())
}
