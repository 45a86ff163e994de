use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::Utc;
use thiserror::Error;

use crate::estimator::LcaEstimate;
use crate::input::{AssessmentInput, Metal};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot write report file: {0}")]
    Io(#[from] std::io::Error),
}

/// Metal-dependent by-product line shared by the terminal summary and the
/// exported report.
fn byproduct_line(input: &AssessmentInput, result: &LcaEstimate) -> String {
    match input.metal {
        Metal::Aluminium => format!(
            "Red mud estimate: {:.2} t for {} t of aluminium (literature estimate ~1.5 t red mud / t Al).",
            result.red_mud_t, input.transport_tonnes
        ),
        Metal::Copper => format!(
            "Estimated SO2 generation: {:.1} kg for {} t of copper smelted.",
            result.so2_kg_total, input.transport_tonnes
        ),
    }
}

/// Terminal rendering of one estimate: headline metrics, per-tonne
/// breakdown, by-product line, flags, recommendations.
pub fn render_summary(input: &AssessmentInput, result: &LcaEstimate) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Estimated results (illustrative)");
    let _ = writeln!(out, "--------------------------------");
    let _ = writeln!(out, "CO2 per kg of metal:          {:.2} kg CO2e/kg", result.co2_per_kg);
    let _ = writeln!(
        out,
        "CO2 per tonne incl transport: {:.0} kg CO2e/t",
        result.total_co2_per_tonne
    );
    let _ = writeln!(out, "Circularity score:            {:.1} / 100", result.circularity_score);
    let _ = writeln!(
        out,
        "Estimated recycling cost:     {:.2} USD (for {} t)",
        result.recycle_cost_usd, input.transport_tonnes
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Breakdown (per tonne basis)");
    for row in result.breakdown() {
        let _ = writeln!(out, "  {:<24} {:>12.1} kg CO2e/t", row.stage, row.kgco2_per_tonne);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", byproduct_line(input, result));
    let _ = writeln!(out, "Energy assumption: {}", result.energy_assumption);
    let _ = writeln!(out);

    if !result.flags.is_empty() {
        let _ = writeln!(out, "Compliance flags");
        for flag in &result.flags {
            let _ = writeln!(
                out,
                "  [{}] {}: {}",
                flag.severity.label(),
                flag.category.label(),
                flag.message
            );
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Recommendations");
    for rec in &result.recommendations {
        let _ = writeln!(out, "  - {rec}");
    }

    out
}

/// Fixed-layout report document: title, timestamp, input echo, headline
/// outputs, by-product line, flags, recommendations.
fn render_report(input: &AssessmentInput, result: &LcaEstimate) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "SustainaMine - LCA Summary (Illustrative)");
    let _ = writeln!(out, "Generated: {}", Utc::now().format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(out);

    let _ = writeln!(out, "Inputs:");
    let _ = writeln!(out, "  Metal: {}", input.metal.label());
    let _ = writeln!(out, "  Route: {}", input.production_route.label());
    let _ = writeln!(out, "  Recycled content: {}%", input.recycled_pct);
    let _ = writeln!(out, "  Energy: {}", input.energy_source.label());
    let _ = writeln!(
        out,
        "  Transport: {} km x {} t",
        input.transport_km, input.transport_tonnes
    );
    let _ = writeln!(out, "  End-of-life: {}", input.eol_option.label());
    let _ = writeln!(out, "  Storage: {}", input.storage_practice.label());
    let _ = writeln!(out);

    let _ = writeln!(out, "Estimated outputs (illustrative):");
    let _ = writeln!(out, "  CO2 per kg: {:.2} kg CO2e/kg", result.co2_per_kg);
    let _ = writeln!(
        out,
        "  CO2 per tonne incl transport: {:.0} kg CO2e/t",
        result.total_co2_per_tonne
    );
    let _ = writeln!(out, "  Circularity score: {:.1}/100", result.circularity_score);
    let _ = writeln!(out, "  Recycling cost: {:.2} USD", result.recycle_cost_usd);
    let _ = writeln!(out, "  {}", byproduct_line(input, result));
    let _ = writeln!(out);

    if !result.flags.is_empty() {
        let _ = writeln!(out, "Compliance flags:");
        for flag in &result.flags {
            let _ = writeln!(
                out,
                "  [{}] {}: {}",
                flag.severity.label(),
                flag.category.label(),
                flag.message
            );
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Recommendations:");
    for rec in &result.recommendations {
        let _ = writeln!(out, "  - {rec}");
    }

    out
}

/// Serialize one estimate to a report file. A failure here is scoped to the
/// export action; it never touches already-rendered results.
pub fn write_report(
    path: &Path,
    input: &AssessmentInput,
    result: &LcaEstimate,
) -> Result<(), ReportError> {
    fs::write(path, render_report(input, result))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::estimate;
    use crate::factors::EmissionFactors;
    use crate::input::{EnergySource, EolOption, ProductionRoute, StoragePractice};

    fn sample(metal: Metal) -> AssessmentInput {
        AssessmentInput {
            metal,
            production_route: ProductionRoute::Mixed,
            recycled_pct: 30,
            energy_source: EnergySource::CoalGrid,
            transport_km: 200.0,
            transport_tonnes: 1.0,
            eol_option: EolOption::Recycling,
            storage_practice: StoragePractice::Authorized,
        }
    }

    #[test]
    fn summary_carries_headline_numbers_and_byproduct() {
        let factors = EmissionFactors::default();
        let input = sample(Metal::Aluminium);
        let result = estimate(&factors, &input);
        let summary = render_summary(&input, &result);

        assert!(summary.contains("14.88 kg CO2e/kg"));
        assert!(summary.contains("14890 kg CO2e/t"));
        assert!(summary.contains("Red mud estimate: 1.50 t"));
        assert!(summary.contains("Red mud handling"));
        assert!(!summary.contains("SO2 generation"));
    }

    #[test]
    fn copper_summary_shows_so2_not_red_mud() {
        let factors = EmissionFactors::default();
        let input = sample(Metal::Copper);
        let result = estimate(&factors, &input);
        let summary = render_summary(&input, &result);

        assert!(summary.contains("Estimated SO2 generation: 25.0 kg"));
        assert!(!summary.contains("Red mud estimate"));
    }

    #[test]
    fn report_file_echoes_inputs_and_outputs() {
        let factors = EmissionFactors::default();
        let input = sample(Metal::Aluminium);
        let result = estimate(&factors, &input);

        let path = std::env::temp_dir().join("sustainamine_report_test.txt");
        write_report(&path, &input, &result).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        assert!(written.starts_with("SustainaMine - LCA Summary (Illustrative)"));
        assert!(written.contains("Metal: Aluminium"));
        assert!(written.contains("Route: Mixed"));
        assert!(written.contains("Transport: 200 km x 1 t"));
        assert!(written.contains("CO2 per kg: 14.88 kg CO2e/kg"));
        assert!(written.contains("Red mud estimate"));
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let factors = EmissionFactors::default();
        let input = sample(Metal::Copper);
        let result = estimate(&factors, &input);
        let err = write_report(Path::new("/nonexistent/dir/report.txt"), &input, &result)
            .unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}
