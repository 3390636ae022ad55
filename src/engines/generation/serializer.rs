//! Canonical single-line text form of a genotype.
//!
//! Gate genes in column-major order, space separated, then a `|`
//! separator, then the output selectors. The field order and delimiter
//! are an external contract shared with visualization tooling; the
//! transient pin and energy buffers are never part of it.

use crate::config::CgpConfig;
use crate::engines::generation::chromosome::Chromosome;
use crate::error::{CgpError, Result};
use crate::functions::FunctionRegistry;
use crate::types::Gene;
use std::fmt;
use std::sync::Arc;

pub const OUTPUT_SECTION_SEPARATOR: &str = "|";

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blocks = self.config().blocks_gene_count();
        for &gene in &self.genes()[..blocks] {
            write!(f, "{} ", gene)?;
        }
        write!(f, "{}", OUTPUT_SECTION_SEPARATOR)?;
        for &gene in self.output_selection() {
            write!(f, " {}", gene)?;
        }
        Ok(())
    }
}

impl Chromosome {
    /// Parse the canonical text form against a configuration.
    ///
    /// Tokens may be separated by whitespace or commas. The gene count
    /// must match the configuration exactly and the separator must sit
    /// between the gate section and the output section; gene values are
    /// then range-checked like any other externally supplied genotype.
    pub fn parse(
        text: &str,
        config: &CgpConfig,
        registry: Arc<FunctionRegistry>,
    ) -> Result<Chromosome> {
        let mut genes: Vec<Gene> = Vec::with_capacity(config.genotype_len());
        let mut separator_at: Option<usize> = None;

        for token in text
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            if token == OUTPUT_SECTION_SEPARATOR {
                if separator_at.is_some() {
                    return Err(CgpError::GenotypeParse(
                        "Duplicate output-section separator".to_string(),
                    ));
                }
                separator_at = Some(genes.len());
                continue;
            }
            let gene = token.parse::<Gene>().map_err(|_| {
                CgpError::GenotypeParse(format!("Token '{}' is not a gene value", token))
            })?;
            genes.push(gene);
        }

        let expected = config.genotype_len();
        if genes.len() != expected {
            return Err(CgpError::GenotypeFormat {
                expected,
                actual: genes.len(),
            });
        }

        match separator_at {
            Some(at) if at == config.blocks_gene_count() => {}
            Some(at) => {
                return Err(CgpError::GenotypeParse(format!(
                    "Output separator after {} genes, expected after {}",
                    at,
                    config.blocks_gene_count()
                )))
            }
            None => {
                return Err(CgpError::GenotypeParse(
                    "Missing output-section separator".to_string(),
                ))
            }
        }

        Chromosome::from_genes(config.clone(), registry, genes)
    }
}
