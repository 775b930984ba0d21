pub mod assessment;
pub mod metrics;
