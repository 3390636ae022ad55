use super::traits::ConfigSection;
use crate::error::CgpError;
use serde::{Deserialize, Serialize};

/// Parameters for the stochastic operators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Fraction of the genotype eligible for change in one mutation.
    pub mutation_rate: f64,
    /// Fixed RNG seed for reproducible runs; random entropy when absent.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.15,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Upper bound on genes changed by one mutation of a genotype of the
    /// given length. At least one gene always changes.
    pub fn max_gene_mutations(&self, genotype_len: usize) -> usize {
        ((genotype_len as f64 * self.mutation_rate).floor() as usize).max(1)
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), CgpError> {
        if self.mutation_rate < 0.0 || self.mutation_rate > 1.0 {
            return Err(CgpError::Configuration(
                "Mutation rate must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}
