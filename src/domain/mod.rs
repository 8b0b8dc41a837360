// Domain layer - Chart schemas, defaults and errors
pub mod chart;
pub mod defaults;
pub mod error;
