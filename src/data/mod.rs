pub mod dataset;

pub use dataset::{load_gate_parameters, Dataset, DatasetEntry};
