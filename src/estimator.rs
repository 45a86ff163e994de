use serde::Serialize;

use crate::factors::EmissionFactors;
use crate::input::{AssessmentInput, EolOption, Metal, ProductionRoute, StoragePractice};

// ---- Result types ---------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Warning,
    Advisory,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Warning => "WARNING",
            Severity::Advisory => "ADVISORY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlagCategory {
    StoragePractice,
    RedMudHandling,
    AirEmissions,
    Circularity,
}

impl FlagCategory {
    pub fn label(self) -> &'static str {
        match self {
            FlagCategory::StoragePractice => "Storage practice",
            FlagCategory::RedMudHandling => "Red mud handling",
            FlagCategory::AirEmissions => "Air emissions",
            FlagCategory::Circularity => "Circularity",
        }
    }
}

/// One compliance condition that matched for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComplianceFlag {
    pub category: FlagCategory,
    pub severity: Severity,
    pub message: &'static str,
}

/// Per-tonne breakdown row for the results table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub stage: &'static str,
    pub kgco2_per_tonne: f64,
}

/// Output bundle of one estimate. Derived synchronously from the input and
/// the factors table; nothing here persists across invocations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LcaEstimate {
    /// kg CO2e per kg of metal, after the grid multiplier.
    pub co2_per_kg: f64,
    /// Transport contribution in kg CO2e per tonne of metal.
    pub transport_co2_per_tonne: f64,
    /// kg CO2e per tonne including transport.
    pub total_co2_per_tonne: f64,
    /// Composite 0-100 score for recycled input and end-of-life handling.
    pub circularity_score: f64,
    /// Tonnes of red mud (aluminium only; zero for copper).
    pub red_mud_t: f64,
    /// kg of SO2 (copper only; zero for aluminium).
    pub so2_kg_total: f64,
    /// USD to recycle the transported quantity.
    pub recycle_cost_usd: f64,
    /// Note on the assumed grid emission factor.
    pub energy_assumption: &'static str,
    /// Matched compliance conditions, in fixed evaluation order.
    pub flags: Vec<ComplianceFlag>,
    /// Ordered guidance strings.
    pub recommendations: Vec<&'static str>,
}

impl LcaEstimate {
    /// Three-row per-tonne table: production, transport, total.
    pub fn breakdown(&self) -> [BreakdownRow; 3] {
        [
            BreakdownRow {
                stage: "Production + smelting",
                kgco2_per_tonne: self.co2_per_kg * 1000.0,
            },
            BreakdownRow {
                stage: "Transport",
                kgco2_per_tonne: self.transport_co2_per_tonne,
            },
            BreakdownRow {
                stage: "Total",
                kgco2_per_tonne: self.total_co2_per_tonne,
            },
        ]
    }
}

// ---- Estimator ------------------------------------------------------------

/// Compute the full estimate for one validated input record. Pure and
/// deterministic: same factors and input always yield the same bundle.
pub fn estimate(factors: &EmissionFactors, input: &AssessmentInput) -> LcaEstimate {
    let virgin = factors.virgin_kgco2_per_kg(input.metal);
    let recycled = factors.recycled_kgco2_per_kg(input.metal);
    let baseline = match input.production_route {
        ProductionRoute::Virgin => virgin,
        ProductionRoute::Recycled => recycled,
        ProductionRoute::Mixed => {
            let p = f64::from(input.recycled_pct);
            virgin * (100.0 - p) / 100.0 + recycled * p / 100.0
        }
    };
    let co2_per_kg = baseline * input.energy_source.grid_multiplier();

    // Per-tonne figure: the transported quantity cancels out, so this term
    // depends on distance only. Intentional, matches the published formula.
    let transport_co2_per_tonne = factors.transport_kgco2_per_tkm * input.transport_km;
    let total_co2_per_tonne = co2_per_kg * 1000.0 + transport_co2_per_tonne;

    // Exactly one by-product is nonzero, selected by metal.
    let (red_mud_t, so2_kg_total) = match input.metal {
        Metal::Aluminium => (
            factors.red_mud_t_per_t_aluminium * input.transport_tonnes,
            0.0,
        ),
        Metal::Copper => (0.0, factors.so2_kg_per_t_copper * input.transport_tonnes),
    };

    let eol_bonus = match input.eol_option {
        EolOption::Landfill => 0.0,
        EolOption::Recycling => 30.0,
        EolOption::Reuse => 40.0,
    };
    let circularity_score = (f64::from(input.recycled_pct) * 0.5 + eol_bonus).min(100.0);

    let recycle_cost_usd = factors.recycle_cost_usd_per_t(input.metal) * input.transport_tonnes;

    let flags = compliance_flags(input, red_mud_t, so2_kg_total, circularity_score);
    let recommendations = recommendations(input.metal);

    LcaEstimate {
        co2_per_kg,
        transport_co2_per_tonne,
        total_co2_per_tonne,
        circularity_score,
        red_mud_t,
        so2_kg_total,
        recycle_cost_usd,
        energy_assumption: input.energy_source.assumption_note(),
        flags,
        recommendations,
    }
}

/// Threshold checks, evaluated independently, emitted in fixed order.
fn compliance_flags(
    input: &AssessmentInput,
    red_mud_t: f64,
    so2_kg_total: f64,
    circularity_score: f64,
) -> Vec<ComplianceFlag> {
    let mut flags = Vec::new();

    if input.storage_practice != StoragePractice::Authorized {
        flags.push(ComplianceFlag {
            category: FlagCategory::StoragePractice,
            severity: Severity::Warning,
            message: "Not authorized/temporary storage; requires review under the Hazardous & Other Wastes Rules (2016).",
        });
    }
    if input.metal == Metal::Aluminium && red_mud_t > 0.0 {
        flags.push(ComplianceFlag {
            category: FlagCategory::RedMudHandling,
            severity: Severity::Advisory,
            message: "Red mud generation flagged; follow CPCB guidelines for handling and management of red mud.",
        });
    }
    if input.metal == Metal::Copper && so2_kg_total > 0.0 {
        flags.push(ComplianceFlag {
            category: FlagCategory::AirEmissions,
            severity: Severity::Advisory,
            message: "SO2 emissions estimated; recommend gas capture and conversion to sulfuric acid, and air emission controls.",
        });
    }
    if circularity_score < 40.0 {
        flags.push(ComplianceFlag {
            category: FlagCategory::Circularity,
            severity: Severity::Warning,
            message: "Low circularity score; consider increasing recycled input or recycling infrastructure.",
        });
    }

    flags
}

/// Fixed guidance list; the SO2 capture entry is inserted for copper only,
/// after the red mud entry and before the closing entry.
fn recommendations(metal: Metal) -> Vec<&'static str> {
    let mut recs = vec![
        "Increase recycled feedstock where feasible; reduces primary extraction and supports National Mineral Policy objectives.",
        "Invest in red mud neutralization and valorization (cement substitution, pigments, rare earth recovery); follow CPCB technical guidelines.",
    ];
    if metal == Metal::Copper {
        recs.push(
            "Install SO2 capture with a contact process to produce sulfuric acid for local fertilizer and chemical plants.",
        );
    }
    recs.push(
        "Engage with the local SPCB/CPCB for authorization and safe handling steps.",
    );
    recs
}
