//! Workspace-level integration tests for EnergyDash.
