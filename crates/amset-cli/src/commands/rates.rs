use super::load_band_data;
use crate::cli::RatesArgs;
use crate::config::builder::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use amset::core::io::rates::RateCsv;
use amset::core::models::rate_table::RateTable;
use amset::engine::error::EngineError;
use amset::engine::progress::ProgressReporter;
use amset::workflows;
use tracing::info;

pub fn run(args: RatesArgs) -> Result<()> {
    let app_config = build_config(&args)?;
    let band_data = load_band_data(&app_config.band_data_path)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Calculating elastic scattering rates...");
    info!("Invoking the core rates workflow...");

    let table = workflows::rates::run(&band_data, &app_config.core_config, &reporter)?;

    info!(
        "Workflow finished with {} state(s) for mechanism(s) {}.",
        table.len(),
        table.mechanisms.join(", ")
    );

    RateCsv::write_to_path(&table, &band_data, &app_config.output_path).map_err(|e| {
        EngineError::Output {
            path: app_config.output_path.display().to_string(),
            source: e,
        }
    })?;

    println!("{}", summarize(&table));
    println!(
        "✓ Rates for {} state(s) written to: {}",
        table.len(),
        app_config.output_path.display()
    );
    Ok(())
}

/// Range of each mechanism's rate over all states, dopings and temperatures.
fn summarize(table: &RateTable) -> String {
    let mut lines = vec![format!("{:<10} {:>12} {:>12}", "Mechanism", "min (s⁻¹)", "max (s⁻¹)")];
    for (i, name) in table.mechanisms.iter().enumerate() {
        let (min, max) = table
            .states
            .iter()
            .flat_map(|s| s.by_mechanism[i].iter().copied())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
                (lo.min(r), hi.max(r))
            });
        lines.push(format!("{:<10} {:>12.3e} {:>12.3e}", name, min, max));
    }
    lines.join("\n")
}
