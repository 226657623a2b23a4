use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::band_data::BandData;
use crate::core::models::rate_table::{RateTable, StateRates};
use crate::core::models::spin::Spin;
use crate::core::stats::gaussian_delta;
use crate::scattering::ElasticScattering;
use nalgebra::DMatrix;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Momentum transfers below this (bohr⁻²) are treated as the same k-point.
const Q_SQ_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy)]
struct WorkUnit {
    spin: Spin,
    kpoint: usize,
}

/// Integrates the elastic scattering rate of every (spin, band, k-point)
/// over all final states of the same spin channel.
///
/// For an initial state (b, k) and mechanism m:
///
/// τ⁻¹[n,t] = P_m(b)[n,t] · Σ_{k′} F_m(|q|²)[n,t,k′] · W(k′)
///
/// where q is the Cartesian distance between k and the nearest image of k′,
/// and W(k′) = (1/N_k) Σ_{b′} δ_σ(E_{b′k′} − E_{bk}) with δ_σ a Gaussian of
/// width σ. Final states with |q|² = 0 are excluded.
#[instrument(skip_all, name = "elastic_rates_task")]
pub fn calculate_rates(
    band_data: &BandData,
    mechanisms: &[Box<dyn ElasticScattering>],
    gaussian_width: f64,
    reporter: &ProgressReporter,
) -> Result<RateTable, EngineError> {
    band_data.validate()?;
    if mechanisms.is_empty() {
        return Err(EngineError::NoMechanisms {
            reason: "no mechanisms were passed to the rate integrator".to_string(),
        });
    }

    let names: Vec<&'static str> = mechanisms.iter().map(|m| m.name()).collect();
    info!(
        mechanisms = ?names,
        nkpoints = band_data.nkpoints(),
        gaussian_width,
        "Calculating elastic scattering rates."
    );
    reporter.report(Progress::PhaseStart {
        name: "Elastic Rates",
    });

    let prefactors = precompute_prefactors(band_data, mechanisms);

    let work_list: Vec<WorkUnit> = band_data
        .spins()
        .flat_map(|spin| (0..band_data.nkpoints()).map(move |kpoint| WorkUnit { spin, kpoint }))
        .collect();

    reporter.report(Progress::TaskStart {
        total_steps: work_list.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = work_list.iter();

    #[cfg(feature = "parallel")]
    let iterator = work_list.par_iter();

    let results: Vec<Vec<StateRates>> = iterator
        .map(|unit| {
            let rates = rates_for_kpoint(unit, band_data, mechanisms, &prefactors, gaussian_width);
            reporter.report(Progress::TaskIncrement);
            rates
        })
        .collect();

    reporter.report(Progress::TaskFinish);

    let mut table = RateTable::new(names);
    table.states = results.into_iter().flatten().collect();
    table.sort();

    info!(states = table.len(), "Elastic rate calculation finished.");
    reporter.report(Progress::PhaseFinish);
    Ok(table)
}

/// Prefactors indexed by spin, then mechanism, then band.
fn precompute_prefactors(
    band_data: &BandData,
    mechanisms: &[Box<dyn ElasticScattering>],
) -> Vec<(Spin, Vec<Vec<DMatrix<f64>>>)> {
    band_data
        .spins()
        .map(|spin| {
            let per_mechanism = mechanisms
                .iter()
                .map(|m| {
                    (0..band_data.nbands(spin))
                        .map(|band| m.prefactor(spin, band))
                        .collect()
                })
                .collect();
            debug!(%spin, nbands = band_data.nbands(spin), "Prefactors ready.");
            (spin, per_mechanism)
        })
        .collect()
}

fn rates_for_kpoint(
    unit: &WorkUnit,
    band_data: &BandData,
    mechanisms: &[Box<dyn ElasticScattering>],
    prefactors: &[(Spin, Vec<Vec<DMatrix<f64>>>)],
    gaussian_width: f64,
) -> Vec<StateRates> {
    let Some(bands) = band_data.bands.get(&unit.spin) else {
        return Vec::new();
    };
    let Some((_, spin_prefactors)) = prefactors.iter().find(|(s, _)| *s == unit.spin) else {
        return Vec::new();
    };

    let k = band_data.kpoints[unit.kpoint];
    let norm_q_sq: Vec<f64> = band_data
        .kpoints
        .iter()
        .map(|k_prime| band_data.structure.cartesian_q_sq(&(k_prime - k)))
        .collect();
    let factors: Vec<_> = mechanisms.iter().map(|m| m.factor(&norm_q_sq)).collect();

    let nk = band_data.nkpoints() as f64;
    let (ndops, ntemps) = (band_data.ndops(), band_data.ntemps());

    (0..bands.nbands())
        .map(|band| {
            let energy = bands.energies[(band, unit.kpoint)];
            let weights: Vec<f64> = norm_q_sq
                .iter()
                .enumerate()
                .map(|(k_prime, &q_sq)| {
                    if q_sq < Q_SQ_EPSILON {
                        return 0.0;
                    }
                    bands
                        .energies
                        .column(k_prime)
                        .iter()
                        .map(|&e| gaussian_delta(e - energy, gaussian_width))
                        .sum::<f64>()
                        / nk
                })
                .collect();

            let by_mechanism = factors
                .iter()
                .zip(spin_prefactors)
                .map(|(factor, band_prefactors)| {
                    let prefactor = &band_prefactors[band];
                    DMatrix::from_fn(ndops, ntemps, |n, t| {
                        let integral: f64 = factor
                            .q_slice(n, t)
                            .iter()
                            .zip(&weights)
                            .filter(|&(_, &w)| w != 0.0)
                            .map(|(f, w)| f * w)
                            .sum();
                        prefactor[(n, t)] * integral
                    })
                })
                .collect();

            StateRates {
                spin: unit.spin,
                band,
                kpoint: unit.kpoint,
                by_mechanism,
            }
        })
        .collect()
}
