pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod functions;
pub mod reporting;
pub mod types;

pub use config::{AppConfig, CgpConfig, ConfigManager, EvolutionConfig};
pub use engines::evaluation::{error_sum, evaluate_population, PhenotypeEstimates};
pub use engines::generation::{
    mutate, mutate_with, random_chromosome, rng_from, Chromosome, EvalState, GeneKind,
};
pub use error::{CgpError, Result};
pub use functions::{FunctionRegistry, GateFunction, GateParameters};
pub use types::{Gene, PinClass, PinSpace, PinValue};
