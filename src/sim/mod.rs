//! Time-stepped dispatch simulation: policy, driver, and multi-run analyses.

/// Autonomy comparison across irradiance scenarios.
pub mod autonomy;
/// Simulation clock for timestep management.
pub mod clock;
pub mod engine;
pub mod kpi;
/// Rule-based PV / battery / diesel dispatch.
pub mod policy;
/// Annualized PV and battery sizing sweep.
pub mod sweep;
pub mod types;

pub use engine::{RunParams, RunState, Simulation, SimulationReport};
pub use kpi::KpiReport;
pub use policy::{DispatchPolicy, PolicyParams, SocTier};
