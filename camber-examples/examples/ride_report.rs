//! # Ride Comfort Report
//!
//! Simulates every road profile in a table and writes the per-profile
//! comfort scores to `ride_report.csv`.
//!
//! To run this example against the bundled sample data:
//!
//! ```sh
//! cargo run --example ride_report
//! ```
//!
//! Or point it at your own profile table:
//!
//! ```sh
//! cargo run --example ride_report -- path/to/road_profiles.csv
//! ```

use anyhow::{Context, Result};
use camber_core::{QuarterCar, RideMetrics, SuspensionParams};
use camber_profiles::{ReportRow, RoadProfileTable, write_report_to_path};

/// Where the report lands.
const REPORT_PATH: &str = "ride_report.csv";

fn main() -> Result<()> {
    let table_path = std::env::args().nth(1).unwrap_or_else(|| {
        concat!(env!("CARGO_MANIFEST_DIR"), "/data/road_profiles.csv").to_owned()
    });

    let table = RoadProfileTable::from_path(&table_path)
        .with_context(|| format!("failed to load road profiles from {table_path}"))?;
    println!(
        "Loaded {} profiles of {} samples each from {table_path}",
        table.names().len(),
        table.sample_count(),
    );

    let params = SuspensionParams::default();
    let car = QuarterCar::new(params).context("invalid suspension parameters")?;

    let mut rows = Vec::new();
    for (name, road) in table.iter() {
        let response = car
            .simulate(road)
            .with_context(|| format!("simulation of {name} failed"))?;
        let metrics = RideMetrics::from_response(&response, params.timestep)
            .with_context(|| format!("metrics for {name} failed"))?;

        println!("{name} | comfort_score = {:.4}", metrics.comfort_score);
        rows.push(ReportRow::new(name, &metrics));
    }

    write_report_to_path(REPORT_PATH, &rows)
        .with_context(|| format!("failed to write {REPORT_PATH}"))?;
    println!("{REPORT_PATH} written");

    Ok(())
}
