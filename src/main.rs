use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use sustainamine_lca::{
    estimate, render_summary, write_report, AssessmentInput, EmissionFactors, EnergySource,
    EolOption, Metal, ProductionRoute, StoragePractice,
};

/// Illustrative LCA estimator for aluminium and copper.
#[derive(Debug, Parser)]
#[command(name = "sustainamine-lca", version)]
struct Cli {
    /// Metal under assessment.
    #[arg(long, value_enum)]
    metal: Metal,

    /// Production route.
    #[arg(long, value_enum, default_value = "virgin")]
    route: ProductionRoute,

    /// Recycled content in percent (0-100).
    #[arg(long, default_value_t = 30)]
    recycled_pct: u8,

    /// Nearest energy source.
    #[arg(long, value_enum, default_value = "coal-grid")]
    energy: EnergySource,

    /// Transport distance in km (0-5000).
    #[arg(long, default_value_t = 200.0)]
    transport_km: f64,

    /// Transported quantity in tonnes of metal (1-10000).
    #[arg(long, default_value_t = 1.0)]
    transport_tonnes: f64,

    /// End-of-life option.
    #[arg(long, value_enum, default_value = "landfill")]
    eol: EolOption,

    /// Storage / residue handling practice.
    #[arg(long, value_enum, default_value = "authorized")]
    storage: StoragePractice,

    /// Optional JSON file overriding the default emission factors.
    #[arg(long, value_name = "PATH")]
    factors: Option<PathBuf>,

    /// Export a summary report to this file after rendering.
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();

    let factors = match &cli.factors {
        Some(path) => EmissionFactors::from_json_file(path)
            .with_context(|| format!("loading factors from {}", path.display()))?,
        None => EmissionFactors::default(),
    };

    let input = AssessmentInput {
        metal: cli.metal,
        production_route: cli.route,
        recycled_pct: cli.recycled_pct,
        energy_source: cli.energy,
        transport_km: cli.transport_km,
        transport_tonnes: cli.transport_tonnes,
        eol_option: cli.eol,
        storage_practice: cli.storage,
    };
    input.validate().context("invalid input")?;

    info!(
        metal = input.metal.label(),
        route = input.production_route.label(),
        "running LCA estimate"
    );
    let result = estimate(&factors, &input);
    print!("{}", render_summary(&input, &result));

    if let Some(path) = &cli.export {
        // Results are already on screen; an export failure must not
        // suppress them, only report its own error.
        if let Err(e) = write_report(path, &input, &result) {
            error!("report export failed: {e}");
            return Err(e.into());
        }
        info!(path = %path.display(), "report written");
    }

    Ok(())
}
