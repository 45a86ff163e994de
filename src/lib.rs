#![forbid(unsafe_code)]

//! Illustrative life-cycle assessment (LCA) estimator for aluminium and
//! copper: CO2e per kg and per tonne, by-product quantities, a circularity
//! score, compliance flags, and recommendations. Default coefficients are
//! demonstration values, not validated emission factors.

pub mod estimator;
pub mod factors;
pub mod input;
pub mod report;

pub use estimator::{estimate, BreakdownRow, ComplianceFlag, FlagCategory, LcaEstimate, Severity};
pub use factors::{EmissionFactors, FactorsError};
pub use input::{
    AssessmentInput, EnergySource, EolOption, InputError, Metal, ProductionRoute, StoragePractice,
};
pub use report::{render_summary, write_report, ReportError};
