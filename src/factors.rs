use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::Metal;

/// Lifecycle coefficient table. These are illustrative defaults for a
/// demonstration run; real deployments should load site-validated factors
/// from a JSON override file.
///
/// The table is plain configuration data: build it once, pass it by
/// reference into [`crate::estimate`], never mutate it mid-run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionFactors {
    /// kg CO2e per kg of virgin aluminium (stage-summed).
    pub aluminium_virgin_kgco2_per_kg: f64,
    /// kg CO2e per kg of recycled aluminium.
    pub aluminium_recycled_kgco2_per_kg: f64,
    /// kg CO2e per kg of virgin copper.
    pub copper_virgin_kgco2_per_kg: f64,
    /// kg CO2e per kg of recycled copper.
    pub copper_recycled_kgco2_per_kg: f64,
    /// Tonnes of red mud generated per tonne of aluminium.
    pub red_mud_t_per_t_aluminium: f64,
    /// kg of SO2 generated per tonne of copper smelted.
    pub so2_kg_per_t_copper: f64,
    /// kg CO2e per tonne-km of transport.
    pub transport_kgco2_per_tkm: f64,
    /// USD per tonne to recycle aluminium.
    pub recycle_cost_usd_per_t_aluminium: f64,
    /// USD per tonne to recycle copper.
    pub recycle_cost_usd_per_t_copper: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        EmissionFactors {
            aluminium_virgin_kgco2_per_kg: 16.0,
            aluminium_recycled_kgco2_per_kg: 4.0,
            copper_virgin_kgco2_per_kg: 8.0,
            copper_recycled_kgco2_per_kg: 2.0,
            red_mud_t_per_t_aluminium: 1.5,
            so2_kg_per_t_copper: 25.0,
            transport_kgco2_per_tkm: 0.05,
            recycle_cost_usd_per_t_aluminium: 200.0,
            recycle_cost_usd_per_t_copper: 300.0,
        }
    }
}

/// Errors while loading a factors override file.
#[derive(Debug, Error)]
pub enum FactorsError {
    #[error("cannot read factors file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed factors file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl EmissionFactors {
    /// Load factors from a JSON file. Fields absent from the file keep
    /// their default values.
    pub fn from_json_file(path: &Path) -> Result<Self, FactorsError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn virgin_kgco2_per_kg(&self, metal: Metal) -> f64 {
        match metal {
            Metal::Aluminium => self.aluminium_virgin_kgco2_per_kg,
            Metal::Copper => self.copper_virgin_kgco2_per_kg,
        }
    }

    pub fn recycled_kgco2_per_kg(&self, metal: Metal) -> f64 {
        match metal {
            Metal::Aluminium => self.aluminium_recycled_kgco2_per_kg,
            Metal::Copper => self.copper_recycled_kgco2_per_kg,
        }
    }

    pub fn recycle_cost_usd_per_t(&self, metal: Metal) -> f64 {
        match metal {
            Metal::Aluminium => self.recycle_cost_usd_per_t_aluminium,
            Metal::Copper => self.recycle_cost_usd_per_t_copper,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keyed_by_metal() {
        let f = EmissionFactors::default();
        assert_eq!(f.virgin_kgco2_per_kg(Metal::Aluminium), 16.0);
        assert_eq!(f.recycled_kgco2_per_kg(Metal::Aluminium), 4.0);
        assert_eq!(f.virgin_kgco2_per_kg(Metal::Copper), 8.0);
        assert_eq!(f.recycled_kgco2_per_kg(Metal::Copper), 2.0);
        assert_eq!(f.recycle_cost_usd_per_t(Metal::Copper), 300.0);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let partial: EmissionFactors =
            serde_json::from_str(r#"{ "transport_kgco2_per_tkm": 0.08 }"#).unwrap();
        assert_eq!(partial.transport_kgco2_per_tkm, 0.08);
        assert_eq!(partial.aluminium_virgin_kgco2_per_kg, 16.0);
    }

    #[test]
    fn json_round_trip() {
        let f = EmissionFactors::default();
        let json = serde_json::to_string(&f).unwrap();
        let back: EmissionFactors = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }

    #[test]
    fn from_json_file_reads_overrides() {
        let path = std::env::temp_dir().join("sustainamine_factors_test.json");
        fs::write(&path, r#"{ "so2_kg_per_t_copper": 30.0 }"#).unwrap();
        let f = EmissionFactors::from_json_file(&path).unwrap();
        assert_eq!(f.so2_kg_per_t_copper, 30.0);
        assert_eq!(f.red_mud_t_per_t_aluminium, 1.5);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EmissionFactors::from_json_file(Path::new("/nonexistent/factors.json"))
            .unwrap_err();
        assert!(matches!(err, FactorsError::Io(_)));
    }
}
