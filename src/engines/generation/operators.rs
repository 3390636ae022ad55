//! Stochastic genotype operators: random construction and mutation.
//!
//! Every operator takes its randomness source explicitly so runs are
//! reproducible from a seed.

use crate::config::{CgpConfig, EvolutionConfig};
use crate::engines::generation::chromosome::{Chromosome, GeneKind};
use crate::error::Result;
use crate::functions::FunctionRegistry;
use crate::types::{Gene, PinSpace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// RNG for a run: fixed seed when configured, entropy otherwise.
pub fn rng_from(config: &EvolutionConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Sample a legal source pin for a gate in `col`: uniform over the primary
/// inputs plus the look-back window's gate pins.
fn sample_source_pin<R: Rng>(space: &PinSpace, col: usize, look_back: usize, rng: &mut R) -> Gene {
    let window = space.source_window(col, look_back);
    let choices = space.input_count() + window.len();
    let pick = rng.gen_range(0..choices);
    if pick < space.input_count() {
        pick as Gene
    } else {
        (window.start + pick - space.input_count()) as Gene
    }
}

/// Build a uniformly random genotype within the configuration's bounds.
pub fn random_chromosome<R: Rng>(
    config: &CgpConfig,
    registry: &Arc<FunctionRegistry>,
    rng: &mut R,
) -> Result<Chromosome> {
    let space = config.pin_space();
    let mut genes = Vec::with_capacity(config.genotype_len());

    for gate in 0..space.gate_count() {
        let col = space.column_of_gate(gate);
        for _ in 0..config.function_input_arity {
            genes.push(sample_source_pin(&space, col, config.look_back, rng));
        }
        genes.push(rng.gen_range(0..config.function_count) as Gene);
    }
    for _ in 0..config.output_count {
        genes.push(rng.gen_range(0..space.len()) as Gene);
    }

    Chromosome::from_genes(config.clone(), Arc::clone(registry), genes)
}

/// Mutate up to `max_genes` genes of `parent` into a new, independently
/// owned chromosome. The parent is never touched.
///
/// Each selected gene resamples uniformly from its full legal range:
/// input wires from the look-back-valid pins of their column, function
/// selectors from the whole function table (re-selecting the current
/// value is allowed and still consumes the mutation budget), output
/// selectors from the whole pin namespace. Both dirty flags are set on
/// the child regardless of which genes changed.
pub fn mutate<R: Rng>(parent: &Chromosome, max_genes: usize, rng: &mut R) -> Chromosome {
    let mut child = parent.clone();
    let space = child.pin_space();
    let config = child.config().clone();

    let budget = rng.gen_range(1..=max_genes.max(1));
    for _ in 0..budget {
        let index = rng.gen_range(0..child.genes.len());
        child.genes[index] = match child.gene_kind(index) {
            GeneKind::InputWire { col } => sample_source_pin(&space, col, config.look_back, rng),
            GeneKind::FunctionSelector => rng.gen_range(0..config.function_count) as Gene,
            GeneKind::OutputSelector => rng.gen_range(0..space.len()) as Gene,
        };
    }

    child.invalidate();
    child
}

/// Mutate with the budget the evolution configuration derives from the
/// genotype length and mutation rate.
pub fn mutate_with<R: Rng>(
    parent: &Chromosome,
    evolution: &EvolutionConfig,
    rng: &mut R,
) -> Chromosome {
    let max_genes = evolution.max_gene_mutations(parent.genes().len());
    mutate(parent, max_genes, rng)
}
