//! Top-level command orchestration.
pub mod bootstrap;
