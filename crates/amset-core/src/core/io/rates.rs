use crate::core::constants::per_bohr3_to_per_cm3;
use crate::core::models::band_data::BandData;
use crate::core::models::rate_table::RateTable;
use crate::core::models::spin::Spin;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

const TOTAL_LABEL: &str = "total";

#[derive(Debug, Serialize)]
struct RateRecord<'a> {
    mechanism: &'a str,
    spin: Spin,
    band: usize,
    kpoint: usize,
    doping_cm3: f64,
    temperature: f64,
    rate: f64,
}

/// Writer for scattering rate tables in long CSV form.
///
/// One row per (mechanism, spin, band, k-point, doping, temperature), with an
/// extra `total` mechanism holding the sum over all mechanisms.
pub struct RateCsv;

impl RateCsv {
    pub fn write_to<W: Write>(
        table: &RateTable,
        data: &BandData,
        writer: W,
    ) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for state in &table.states {
            let total = state.total();
            let labelled = table
                .mechanisms
                .iter()
                .copied()
                .zip(state.by_mechanism.iter())
                .chain(total.as_ref().map(|t| (TOTAL_LABEL, t)));

            for (mechanism, rates) in labelled {
                for (n, &doping) in data.doping.iter().enumerate() {
                    for (t, &temperature) in data.temperatures.iter().enumerate() {
                        csv_writer.serialize(RateRecord {
                            mechanism,
                            spin: state.spin,
                            band: state.band,
                            kpoint: state.kpoint,
                            doping_cm3: per_bohr3_to_per_cm3(doping),
                            temperature,
                            rate: rates[(n, t)],
                        })?;
                    }
                }
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_to_path(table: &RateTable, data: &BandData, path: &Path) -> Result<(), csv::Error> {
        let file = std::fs::File::create(path)?;
        Self::write_to(table, data, std::io::BufWriter::new(file))
    }
}
