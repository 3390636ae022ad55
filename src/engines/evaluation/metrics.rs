//! Error metric between a circuit and a dataset's expected outputs.

use crate::data::Dataset;
use crate::engines::generation::chromosome::Chromosome;
use crate::error::Result;
use rayon::prelude::*;

/// Sum of absolute differences between the chromosome's outputs and the
/// dataset's expected outputs, over every entry.
pub fn error_sum(chromosome: &mut Chromosome, dataset: &Dataset) -> Result<u64> {
    let mut total = 0u64;
    for entry in dataset.entries() {
        let outputs = chromosome.evaluate_with(&entry.input)?;
        for (&actual, &expected) in outputs.iter().zip(&entry.expected) {
            total += (actual as i64 - expected as i64).unsigned_abs();
        }
    }
    Ok(total)
}

/// Score a population slice against a dataset, one chromosome per task.
///
/// Chromosomes own disjoint buffers, so they evaluate in parallel with no
/// shared mutable state; the registry and dataset are read-only.
pub fn evaluate_population(
    population: &mut [Chromosome],
    dataset: &Dataset,
) -> Result<Vec<u64>> {
    population
        .par_iter_mut()
        .map(|chromosome| error_sum(chromosome, dataset))
        .collect()
}
