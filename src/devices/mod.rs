//! Device models for the microgrid: load, PV, storage, gensets, and fuel.

/// Battery energy storage model.
pub mod battery;
/// Diesel fuel reserve.
pub mod diesel_tank;
pub mod genset;
/// Site load profile.
pub mod load;
/// PV generation profile.
pub mod solar;
pub mod types;

// Re-export the main types for convenience
pub use battery::Battery;
pub use diesel_tank::{DieselTank, FuelBurn};
pub use genset::{Commitment, GensetFleet};
pub use load::LoadModel;
pub use solar::{IrradianceTable, SolarProfileGenerator};
pub use types::ProfileSource;
