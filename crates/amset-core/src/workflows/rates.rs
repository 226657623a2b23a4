use crate::core::models::band_data::BandData;
use crate::core::models::rate_table::RateTable;
use crate::engine::config::{MechanismSelection, RateConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::rates::calculate_rates;
use crate::scattering::{ScatteringType, build_mechanisms};
use tracing::{info, instrument};

#[instrument(skip_all, name = "rates_workflow")]
pub fn run(
    band_data: &BandData,
    config: &RateConfig,
    reporter: &ProgressReporter,
) -> Result<RateTable, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    band_data.validate()?;

    let types = config.mechanisms.resolve(&config.materials);
    if types.is_empty() {
        let reason = match config.mechanisms {
            MechanismSelection::Auto => missing_properties_summary(config),
            MechanismSelection::Explicit(_) => "explicit mechanism list is empty".to_string(),
        };
        return Err(EngineError::NoMechanisms { reason });
    }
    info!(
        mechanisms = ?types.iter().map(|t| t.name()).collect::<Vec<_>>(),
        "Selected scattering mechanisms."
    );

    let mechanisms = build_mechanisms(&types, &config.materials, band_data)?;
    for mechanism in &mechanisms {
        reporter.report(Progress::MechanismReady {
            name: mechanism.name(),
        });
    }
    reporter.report(Progress::PhaseFinish);

    calculate_rates(band_data, &mechanisms, config.gaussian_width, reporter)
}

fn missing_properties_summary(config: &RateConfig) -> String {
    let missing: Vec<String> = ScatteringType::ALL
        .into_iter()
        .map(|t| {
            let absent: Vec<&str> = t
                .required_properties()
                .iter()
                .copied()
                .filter(|p| !config.materials.has(p))
                .collect();
            format!("{} needs {}", t.name(), absent.join(", "))
        })
        .collect();
    format!(
        "no mechanism has all of its material properties set ({})",
        missing.join("; ")
    )
}
