//! EnergyDash library: application logic behind the `energydash` binary.

pub mod app;
pub mod config;
pub mod errors;
