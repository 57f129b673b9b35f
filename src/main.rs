use analytics::{RpdEngine, YearlyRpdReport};
use anyhow::Context;
use chrono::Datelike;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use core_types::RevenueTable;
use projector::Projector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Horizon projection application.
fn main() {
    // Route library tracing through the standard env-filtered subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    let result = match cli.command {
        Commands::Project(args) => handle_project(args),
        Commands::Curve(args) => handle_curve(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Cohort revenue projection: decay-curve fitting, daily revenue tables, yearly RPD.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full projection and print yearly RPD results.
    Project(ProjectArgs),

    /// Print the fitted decay parameters and a sampled curve per year.
    Curve(CurveArgs),
}

#[derive(Parser)]
struct ProjectArgs {
    /// Path to the scenario configuration file.
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Emit the yearly RPD report as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Write the revenue detail table to this path as CSV.
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Parser)]
struct CurveArgs {
    /// Path to the scenario configuration file.
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Largest day offset to sample the curves at.
    #[arg(long, default_value_t = 365)]
    max_day: u32,

    /// Number of evenly spaced sample points per curve.
    #[arg(long, default_value_t = 50)]
    points: usize,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Handles the full fit -> project -> aggregate pipeline.
fn handle_project(args: ProjectArgs) -> anyhow::Result<()> {
    let config = configuration::load_config_from(&args.config)?;
    let projection = &config.projection;
    let yearly_retention = config.yearly_retention();

    let table = Projector::with_base_revenue(projection.base_revenue).project(
        projection.daily_active_users,
        projection.start_date,
        projection.end_date,
        &yearly_retention,
    )?;

    let report = RpdEngine::new().calculate(
        &table,
        projection.start_date.year(),
        projection.end_date.year(),
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_rpd_table(&report));
    }

    if let Some(path) = args.export {
        std::fs::write(&path, detail_csv(&table))
            .with_context(|| format!("writing detail table to {}", path.display()))?;
        println!("Detail table written to {}", path.display());
    }

    Ok(())
}

/// Handles fitting and sampling the per-year decay curves, without running
/// the projection.
fn handle_curve(args: CurveArgs) -> anyhow::Result<()> {
    let config = configuration::load_config_from(&args.config)?;

    for (year, triple) in config.yearly_retention() {
        let params = fitter::fit_decay_parameters(&triple.observations())
            .with_context(|| format!("fitting decay parameters for year {year}"))?;
        println!("{year}: a = {:.6}, b = {:.6}", params.a, params.b);

        let mut table = Table::new();
        table.set_header(vec!["Day", "Retention"]);
        for (day, retention) in
            fitter::sample_curve(&params, f64::from(args.max_day), args.points)
        {
            table.add_row(vec![format!("{day:.0}"), format!("{:.2}%", retention * 100.0)]);
        }
        println!("{table}");
    }

    Ok(())
}

// ==============================================================================
// Rendering
// ==============================================================================

fn render_rpd_table(report: &YearlyRpdReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Year", "RPD", "Growth"]);
    for (year, result) in report.iter() {
        let growth = result
            .growth_pct
            .map_or_else(|| "-".to_string(), |pct| format!("{pct:.2}%"));
        table.add_row(vec![year.to_string(), format!("{:.2}", result.rpd), growth]);
    }
    table
}

/// Renders the revenue table in the exported spreadsheet layout: one row per
/// activation date, the cohort size, then one revenue column per day offset.
/// Absent cells stay empty.
fn detail_csv(table: &RevenueTable) -> String {
    let mut out = String::from("activation_date,activation_count");
    for offset in 0..table.width() {
        out.push_str(&format!(",day{offset}"));
    }
    out.push('\n');

    for row in &table.rows {
        out.push_str(&format!("{},{}", row.activation_date, row.activation_count));
        for cell in &row.revenue {
            match cell {
                Some(value) => out.push_str(&format!(",{value:.2}")),
                None => out.push(','),
            }
        }
        out.push('\n');
    }
    out
}
