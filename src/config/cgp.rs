use super::traits::ConfigSection;
use crate::error::CgpError;
use crate::types::PinSpace;
use serde::{Deserialize, Serialize};

/// Sizing parameters for the CGP grid and pin namespace.
///
/// Every other component treats this as read-only: the chromosome layout,
/// the legal source ranges, and the serialized genotype length are all
/// derived from these fields and fixed for the lifetime of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CgpConfig {
    /// Rows in the gate grid.
    pub row_count: usize,
    /// Columns in the gate grid.
    pub col_count: usize,
    /// Input wires per gate.
    pub function_input_arity: usize,
    /// Output pins per gate.
    pub function_output_arity: usize,
    /// Primary inputs of the circuit.
    pub input_count: usize,
    /// Selected outputs of the circuit.
    pub output_count: usize,
    /// How many preceding columns a gate may source from.
    pub look_back: usize,
    /// Number of selectable gate functions.
    pub function_count: usize,
}

impl Default for CgpConfig {
    fn default() -> Self {
        Self {
            row_count: 5,
            col_count: 5,
            function_input_arity: 2,
            function_output_arity: 1,
            input_count: 2,
            output_count: 1,
            look_back: 1,
            function_count: 16,
        }
    }
}

impl CgpConfig {
    /// Genes per gate: input wires plus the function selector.
    pub fn block_gene_len(&self) -> usize {
        self.function_input_arity + 1
    }

    /// Genes spent on the gate grid.
    pub fn blocks_gene_count(&self) -> usize {
        self.row_count * self.col_count * self.block_gene_len()
    }

    /// Total genotype length: grid genes plus output selectors.
    pub fn genotype_len(&self) -> usize {
        self.blocks_gene_count() + self.output_count
    }

    /// Slots in the pin map: primary inputs plus every gate output pin.
    pub fn pin_map_size(&self) -> usize {
        self.pin_space().len()
    }

    pub fn pin_space(&self) -> PinSpace {
        PinSpace::new(
            self.input_count,
            self.row_count,
            self.col_count,
            self.function_output_arity,
        )
    }
}

impl ConfigSection for CgpConfig {
    fn section_name() -> &'static str {
        "cgp"
    }

    fn validate(&self) -> Result<(), CgpError> {
        if self.row_count == 0 || self.col_count == 0 {
            return Err(CgpError::Configuration(
                "Grid dimensions must be at least 1x1".to_string(),
            ));
        }
        if self.function_input_arity == 0 {
            return Err(CgpError::Configuration(
                "Function input arity must be at least 1".to_string(),
            ));
        }
        if self.function_output_arity == 0 {
            return Err(CgpError::Configuration(
                "Function output arity must be at least 1".to_string(),
            ));
        }
        if self.input_count == 0 {
            return Err(CgpError::Configuration(
                "Input count must be at least 1".to_string(),
            ));
        }
        if self.output_count == 0 {
            return Err(CgpError::Configuration(
                "Output count must be at least 1".to_string(),
            ));
        }
        if self.look_back == 0 {
            return Err(CgpError::Configuration(
                "Look-back must be at least 1".to_string(),
            ));
        }
        if self.look_back > self.col_count {
            return Err(CgpError::Configuration(format!(
                "Look-back {} exceeds column count {}",
                self.look_back, self.col_count
            )));
        }
        if self.function_count == 0 {
            return Err(CgpError::Configuration(
                "Function count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
