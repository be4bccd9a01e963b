//! Embassy task definitions

pub mod telemetry_rx;
pub mod telemetry_tx;
