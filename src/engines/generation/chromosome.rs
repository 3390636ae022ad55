use crate::config::CgpConfig;
use crate::engines::evaluation::energy::PhenotypeEstimates;
use crate::error::{CgpError, Result};
use crate::functions::FunctionRegistry;
use crate::types::{Gene, PinSpace, PinValue, PIN_UNSET};
use std::sync::Arc;

/// Lazy-recomputation state of one chromosome.
///
/// Input replacement or mutation invalidates; the forward pass clears the
/// evaluation half, the reachability pass clears the energy half. The
/// cached pin map, energy estimate, and node count are only trusted while
/// the corresponding half is clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalState {
    Clean,
    NeedsEvaluation,
    NeedsEnergy,
    NeedsBoth,
}

impl EvalState {
    pub fn needs_evaluation(self) -> bool {
        matches!(self, EvalState::NeedsEvaluation | EvalState::NeedsBoth)
    }

    pub fn needs_energy(self) -> bool {
        matches!(self, EvalState::NeedsEnergy | EvalState::NeedsBoth)
    }

    pub fn invalidate_evaluation(&mut self) {
        *self = match *self {
            EvalState::Clean | EvalState::NeedsEvaluation => EvalState::NeedsEvaluation,
            EvalState::NeedsEnergy | EvalState::NeedsBoth => EvalState::NeedsBoth,
        };
    }

    pub fn invalidate_all(&mut self) {
        *self = EvalState::NeedsBoth;
    }

    pub fn clear_evaluation(&mut self) {
        *self = match *self {
            EvalState::NeedsEvaluation | EvalState::Clean => EvalState::Clean,
            EvalState::NeedsBoth | EvalState::NeedsEnergy => EvalState::NeedsEnergy,
        };
    }

    pub fn clear_energy(&mut self) {
        *self = match *self {
            EvalState::NeedsEnergy | EvalState::Clean => EvalState::Clean,
            EvalState::NeedsBoth | EvalState::NeedsEvaluation => EvalState::NeedsEvaluation,
        };
    }
}

/// Which role a genotype position plays, derived purely from its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneKind {
    /// An input-wire reference of a gate in the given column.
    InputWire { col: usize },
    /// A gate's function selector.
    FunctionSelector,
    /// One entry of the output selection.
    OutputSelector,
}

/// A CGP individual: the genotype plus its privately owned evaluation
/// buffers.
///
/// The gene array holds `rows * cols * (arity + 1)` gate genes in
/// column-major gate order followed by `output_count` output selectors.
/// Every buffer is owned by this instance alone; cloning deep-copies them,
/// so distinct chromosomes never alias mutable state. The configuration
/// and function registry are shared read-only.
#[derive(Debug)]
pub struct Chromosome {
    pub(crate) config: CgpConfig,
    pub(crate) registry: Arc<FunctionRegistry>,
    pub(crate) genes: Vec<Gene>,
    pub(crate) pin_map: Vec<PinValue>,
    pub(crate) energy_map: Vec<f64>,
    pub(crate) visit_map: Vec<bool>,
    pub(crate) input: Vec<PinValue>,
    pub(crate) output_buffer: Vec<PinValue>,
    pub(crate) state: EvalState,
    pub(crate) estimates: PhenotypeEstimates,
}

impl Clone for Chromosome {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            registry: Arc::clone(&self.registry),
            genes: self.genes.clone(),
            pin_map: self.pin_map.clone(),
            energy_map: self.energy_map.clone(),
            visit_map: self.visit_map.clone(),
            input: self.input.clone(),
            output_buffer: self.output_buffer.clone(),
            state: self.state,
            estimates: self.estimates,
        }
    }
}

impl Chromosome {
    /// Build a chromosome from a complete gene array, validating every
    /// gene against the configuration. This is the single entry point for
    /// deserialized or externally supplied genotypes: a malformed array is
    /// rejected whole, never partially constructed or repaired.
    pub fn from_genes(
        config: CgpConfig,
        registry: Arc<FunctionRegistry>,
        genes: Vec<Gene>,
    ) -> Result<Self> {
        use crate::config::traits::ConfigSection;
        config.validate()?;
        if registry.len() < config.function_count {
            return Err(CgpError::Configuration(format!(
                "Configuration selects {} functions but the registry holds {}",
                config.function_count,
                registry.len()
            )));
        }
        for selector in 0..config.function_count {
            let function = registry.function(selector).expect("length checked");
            if function.arity() > config.function_input_arity {
                return Err(CgpError::Configuration(format!(
                    "Function '{}' reads {} inputs but gates carry {}",
                    function.alias(),
                    function.arity(),
                    config.function_input_arity
                )));
            }
        }

        let expected = config.genotype_len();
        if genes.len() != expected {
            return Err(CgpError::GenotypeFormat {
                expected,
                actual: genes.len(),
            });
        }

        validate_genes(&config, &genes)?;
        Ok(Self::new_unchecked(config, registry, genes))
    }

    /// Internal constructor for gene arrays already known to be in range
    /// (random construction and mutation sample within legal ranges by
    /// construction).
    pub(crate) fn new_unchecked(
        config: CgpConfig,
        registry: Arc<FunctionRegistry>,
        genes: Vec<Gene>,
    ) -> Self {
        let pin_map_size = config.pin_map_size();
        let gate_count = config.row_count * config.col_count;
        let output_count = config.output_count;
        Self {
            config,
            registry,
            genes,
            pin_map: vec![PIN_UNSET; pin_map_size],
            energy_map: vec![0.0; gate_count],
            visit_map: vec![false; gate_count],
            input: Vec::new(),
            output_buffer: vec![PIN_UNSET; output_count],
            state: EvalState::NeedsBoth,
            estimates: PhenotypeEstimates::default(),
        }
    }

    pub fn config(&self) -> &CgpConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<FunctionRegistry> {
        &self.registry
    }

    pub fn pin_space(&self) -> PinSpace {
        self.config.pin_space()
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn state(&self) -> EvalState {
        self.state
    }

    /// The output-selector section of the genotype.
    pub fn output_selection(&self) -> &[Gene] {
        &self.genes[self.config.blocks_gene_count()..]
    }

    /// Input-wire genes of the gate at a grid position.
    pub fn block_inputs(&self, row: usize, col: usize) -> &[Gene] {
        let offset = self.block_gene_offset(self.pin_space().gate_index(row, col));
        &self.genes[offset..offset + self.config.function_input_arity]
    }

    /// Function-selector gene of the gate at a grid position.
    pub fn block_function(&self, row: usize, col: usize) -> Gene {
        let offset = self.block_gene_offset(self.pin_space().gate_index(row, col));
        self.genes[offset + self.config.function_input_arity]
    }

    /// Offset of a gate's first gene within the genotype.
    pub(crate) fn block_gene_offset(&self, gate: usize) -> usize {
        gate * self.config.block_gene_len()
    }

    /// Classify a genotype position by index range alone.
    pub fn gene_kind(&self, index: usize) -> GeneKind {
        debug_assert!(index < self.genes.len());
        let blocks = self.config.blocks_gene_count();
        if index >= blocks {
            return GeneKind::OutputSelector;
        }
        let block_len = self.config.block_gene_len();
        if index % block_len == self.config.function_input_arity {
            GeneKind::FunctionSelector
        } else {
            let gate = index / block_len;
            GeneKind::InputWire {
                col: self.pin_space().column_of_gate(gate),
            }
        }
    }

    /// Mark every cached result stale. Mutation uses this as its
    /// always-safe invalidation policy.
    pub(crate) fn invalidate(&mut self) {
        self.state.invalidate_all();
    }
}

/// Check every gene of a complete array against the look-back rule, the
/// function table size, and the pin namespace.
fn validate_genes(config: &CgpConfig, genes: &[Gene]) -> Result<()> {
    let space = config.pin_space();
    let arity = config.function_input_arity;
    let block_len = config.block_gene_len();

    for gate in 0..space.gate_count() {
        let col = space.column_of_gate(gate);
        let offset = gate * block_len;
        for (slot, &gene) in genes[offset..offset + arity].iter().enumerate() {
            if !space.is_valid_source(gene, col, config.look_back) {
                return Err(CgpError::CorruptGenotype(format!(
                    "Gate {} input {} references pin {} outside its look-back range",
                    gate, slot, gene
                )));
            }
        }
        let selector = genes[offset + arity];
        if selector as usize >= config.function_count {
            return Err(CgpError::CorruptGenotype(format!(
                "Gate {} selects function {} of {}",
                gate, selector, config.function_count
            )));
        }
    }

    for (i, &gene) in genes[config.blocks_gene_count()..].iter().enumerate() {
        if !space.contains(gene) {
            return Err(CgpError::CorruptGenotype(format!(
                "Output selector {} references pin {} outside the namespace",
                i, gene
            )));
        }
    }
    Ok(())
}
