pub mod energy;
pub mod evaluator;
pub mod metrics;

pub use energy::PhenotypeEstimates;
pub use metrics::{error_sum, evaluate_population};
