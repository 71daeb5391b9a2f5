// Application layer: experiment orchestration

pub mod experiment;

pub use experiment::{BatchOutcome, ExperimentHarness, HarnessConfig, InstanceFailure};
