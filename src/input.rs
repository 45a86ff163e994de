use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---- Closed input sets ----------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Metal {
    Aluminium,
    Copper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ProductionRoute {
    /// Virgin / raw feedstock only.
    Virgin,
    /// Fully recycled feedstock.
    Recycled,
    /// Blend of virgin and recycled, weighted by recycled content.
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum EnergySource {
    CoalGrid,
    MixedGrid,
    RenewableHeavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum EolOption {
    Landfill,
    Recycling,
    Reuse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum StoragePractice {
    /// Proper authorized storage.
    Authorized,
    /// Temporary open storage.
    TemporaryOpen,
    /// Untreated disposal.
    Untreated,
}

impl Metal {
    pub fn label(self) -> &'static str {
        match self {
            Metal::Aluminium => "Aluminium",
            Metal::Copper => "Copper",
        }
    }
}

impl ProductionRoute {
    pub fn label(self) -> &'static str {
        match self {
            ProductionRoute::Virgin => "Virgin/Raw",
            ProductionRoute::Recycled => "Recycled",
            ProductionRoute::Mixed => "Mixed",
        }
    }
}

impl EnergySource {
    pub fn label(self) -> &'static str {
        match self {
            EnergySource::CoalGrid => "Coal-based grid",
            EnergySource::MixedGrid => "Mixed grid",
            EnergySource::RenewableHeavy => "Renewable-heavy",
        }
    }

    /// Grid emission multiplier applied to the baseline CO2 factor.
    pub fn grid_multiplier(self) -> f64 {
        match self {
            EnergySource::CoalGrid => 1.2,
            EnergySource::MixedGrid => 1.0,
            EnergySource::RenewableHeavy => 0.8,
        }
    }

    /// Provenance note for the assumed grid factor.
    pub fn assumption_note(self) -> &'static str {
        match self {
            EnergySource::CoalGrid => "Assumed national average coal-heavy grid factor (illustrative).",
            EnergySource::MixedGrid => "Assumed mixed grid emissions factor (illustrative).",
            EnergySource::RenewableHeavy => "Assumed renewable-heavy grid factor (illustrative).",
        }
    }
}

impl EolOption {
    pub fn label(self) -> &'static str {
        match self {
            EolOption::Landfill => "Landfill",
            EolOption::Recycling => "Recycling",
            EolOption::Reuse => "Reuse",
        }
    }
}

impl StoragePractice {
    pub fn label(self) -> &'static str {
        match self {
            StoragePractice::Authorized => "Proper authorized storage",
            StoragePractice::TemporaryOpen => "Temporary open storage",
            StoragePractice::Untreated => "Untreated disposal",
        }
    }
}

// ---- Assessment record ----------------------------------------------------

/// One fully-populated estimate request. Immutable once built; collected
/// per invocation and discarded after rendering/export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentInput {
    pub metal: Metal,
    pub production_route: ProductionRoute,
    /// Recycled content in percent, 0 to 100.
    pub recycled_pct: u8,
    pub energy_source: EnergySource,
    /// Transport distance in km, 0 to 5000.
    pub transport_km: f64,
    /// Transported quantity in tonnes of metal, 1 to 10000.
    pub transport_tonnes: f64,
    pub eol_option: EolOption,
    pub storage_practice: StoragePractice,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("{field} = {value} outside allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), InputError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl AssessmentInput {
    /// Range enforcement at the collector boundary. The estimator assumes
    /// a validated record and has no failure path of its own.
    pub fn validate(&self) -> Result<(), InputError> {
        check_range("recycled_pct", f64::from(self.recycled_pct), 0.0, 100.0)?;
        check_range("transport_km", self.transport_km, 0.0, 5000.0)?;
        check_range("transport_tonnes", self.transport_tonnes, 1.0, 10000.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> AssessmentInput {
        AssessmentInput {
            metal: Metal::Aluminium,
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
    fn accepts_in_range_record() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn accepts_domain_edges() {
        let mut input = valid_input();
        input.recycled_pct = 100;
        input.transport_km = 5000.0;
        input.transport_tonnes = 10000.0;
        assert!(input.validate().is_ok());

        input.recycled_pct = 0;
        input.transport_km = 0.0;
        input.transport_tonnes = 1.0;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn rejects_recycled_pct_above_100() {
        let mut input = valid_input();
        input.recycled_pct = 101;
        assert!(matches!(
            input.validate(),
            Err(InputError::OutOfRange {
                field: "recycled_pct",
                ..
            })
        ));
    }

    #[test]
    fn rejects_transport_km_outside_domain() {
        let mut input = valid_input();
        input.transport_km = 5000.1;
        assert!(input.validate().is_err());
        input.transport_km = -1.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn rejects_transport_tonnes_outside_domain() {
        let mut input = valid_input();
        input.transport_tonnes = 0.5;
        assert!(input.validate().is_err());
        input.transport_tonnes = 10000.5;
        assert!(input.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_numeric_fields() {
        let mut input = valid_input();
        input.transport_km = f64::NAN;
        assert!(input.validate().is_err());
    }

    #[test]
    fn grid_multipliers() {
        assert_eq!(EnergySource::CoalGrid.grid_multiplier(), 1.2);
        assert_eq!(EnergySource::MixedGrid.grid_multiplier(), 1.0);
        assert_eq!(EnergySource::RenewableHeavy.grid_multiplier(), 0.8);
    }
}
