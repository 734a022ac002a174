pub mod bound;
pub mod cli;
pub mod error;
pub mod level_cost;
pub mod params;
pub mod ratios;
pub mod report;
pub mod throughput;

pub use bound::Bound;
pub use error::{ModelError, Result};
pub use level_cost::{compute_level_costs, LevelCostReport, LevelRow, Tier};
pub use params::{EngineShapeParameters, ModelConfig, ThroughputQueryParams};
pub use ratios::{compute_ratios, AmplificationRatios, AmplificationSample};
pub use throughput::{bounds_for, estimate_bounds, BoundResult, Constraint};
