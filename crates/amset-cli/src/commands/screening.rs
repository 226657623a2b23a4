use super::load_band_data;
use crate::cli::ScreeningArgs;
use crate::config::builder::build_materials;
use crate::error::Result;
use amset::core::constants::BOHR_TO_ANGSTROM;
use amset::workflows;
use amset::workflows::screening::ScreeningEntry;

pub fn run(args: ScreeningArgs) -> Result<()> {
    let materials = build_materials(
        args.config.as_deref(),
        args.materials.as_deref(),
        &args.set_values,
    )?;
    let band_data = load_band_data(&args.band_data)?;

    let entries = workflows::screening::run(&band_data, &materials)?;
    println!("{}", format_table(&entries));
    Ok(())
}

fn format_table(entries: &[ScreeningEntry]) -> String {
    let mut lines = vec![format!(
        "{:>12} {:>8} {:>12} {:>12}",
        "n (cm⁻³)", "T (K)", "β² (Å⁻²)", "Nᵢᵢ (cm⁻³)"
    )];
    lines.extend(entries.iter().map(|e| {
        format!(
            "{:>12.2e} {:>8.1} {:>12.3e} {:>12.3e}",
            e.doping_cm3,
            e.temperature,
            e.inverse_screening_length_sq / BOHR_TO_ANGSTROM.powi(2),
            e.impurity_concentration_cm3,
        )
    }));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_header_and_one_row_per_entry() {
        let entries = vec![
            ScreeningEntry {
                doping_cm3: 1e18,
                temperature: 300.0,
                inverse_screening_length_sq: 1e-3,
                impurity_concentration_cm3: 1e18,
            },
            ScreeningEntry {
                doping_cm3: -1e19,
                temperature: 600.0,
                inverse_screening_length_sq: 2e-3,
                impurity_concentration_cm3: 1e19,
            },
        ];
        let table = format_table(&entries);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("β²"));
        assert!(lines[1].contains("1.00e18") && lines[1].contains("300.0"));
        assert!(lines[2].contains("-1.00e19") && lines[2].contains("600.0"));
    }
}
