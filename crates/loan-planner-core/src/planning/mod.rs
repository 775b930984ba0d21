pub mod comparison;
pub mod generator;
pub mod ranking;
