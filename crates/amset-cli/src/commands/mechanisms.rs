use crate::cli::MechanismsArgs;
use crate::config::builder::build_materials;
use crate::error::Result;
use amset::core::materials::MaterialProperties;
use amset::scattering::ScatteringType;

pub fn run(args: MechanismsArgs) -> Result<()> {
    let materials = build_materials(
        args.config.as_deref(),
        args.materials.as_deref(),
        &args.set_values,
    )?;
    println!("{}", format_listing(&materials));
    Ok(())
}

fn format_listing(materials: &MaterialProperties) -> String {
    let mut lines = vec![format!("{:<6} {:<10} {}", "Name", "Available", "Missing properties")];
    for t in ScatteringType::ALL {
        let missing: Vec<&str> = t
            .required_properties()
            .iter()
            .copied()
            .filter(|p| !materials.has(p))
            .collect();
        let available = if missing.is_empty() { "yes" } else { "no" };
        let missing = if missing.is_empty() {
            "-".to_string()
        } else {
            missing.join(", ")
        };
        lines.push(format!("{:<6} {:<10} {}", t.name(), available, missing));
    }

    let auto: Vec<&str> = ScatteringType::auto(materials)
        .into_iter()
        .map(ScatteringType::name)
        .collect();
    lines.push(String::new());
    lines.push(if auto.is_empty() {
        "'auto' selects no mechanisms with the current material properties.".to_string()
    } else {
        format!("'auto' selects: {}", auto.join(", "))
    });
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_marks_missing_properties() {
        let materials = MaterialProperties {
            static_dielectric: Some(10.0),
            piezoelectric_coefficient: Some(0.1),
            ..Default::default()
        };
        let listing = format_listing(&materials);
        let lines: Vec<&str> = listing.lines().collect();

        assert!(lines[1].starts_with("ADP") && lines[1].contains("no"));
        assert!(lines[1].contains("deformation_potential, elastic_constant"));
        assert!(lines[2].starts_with("IMP") && lines[2].contains("acceptor_charge, donor_charge"));
        assert!(lines[3].starts_with("PIE") && lines[3].contains("yes"));
        assert_eq!(*lines.last().unwrap(), "'auto' selects: PIE");
    }

    #[test]
    fn listing_without_properties_selects_nothing() {
        let listing = format_listing(&MaterialProperties::default());
        assert!(listing.ends_with("'auto' selects no mechanisms with the current material properties."));
    }
}
