pub mod chromosome;
pub mod operators;
pub mod serializer;

pub use chromosome::{Chromosome, EvalState, GeneKind};
pub use operators::{mutate, mutate_with, random_chromosome, rng_from};
pub use serializer::OUTPUT_SECTION_SEPARATOR;
