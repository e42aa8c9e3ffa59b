//! BDD step definitions for radar telemetry service

pub mod acquisition_steps;
pub mod change_steps;
pub mod display_steps;
pub mod statistics_steps;
