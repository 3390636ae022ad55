//! Forward-pass decoding of a chromosome into output values.

use crate::engines::generation::chromosome::Chromosome;
use crate::error::{CgpError, Result};
use crate::types::{PinValue, PIN_UNSET};

impl Chromosome {
    /// Replace the circuit's primary input vector.
    ///
    /// Setting an identical vector keeps the cached pin map valid; any
    /// change marks the chromosome for re-evaluation.
    pub fn set_input(&mut self, input: &[PinValue]) -> Result<()> {
        if input.len() != self.config.input_count {
            return Err(CgpError::Evaluation(format!(
                "Input vector has {} values, circuit has {} inputs",
                input.len(),
                self.config.input_count
            )));
        }
        if self.input.as_slice() != input {
            self.input.clear();
            self.input.extend_from_slice(input);
            self.state.invalidate_evaluation();
        }
        Ok(())
    }

    /// Run the forward pass over the grid, column-major, reusing the
    /// cached pin map when nothing changed since the last evaluation.
    pub fn evaluate(&mut self) -> Result<()> {
        if self.input.len() != self.config.input_count {
            return Err(CgpError::Evaluation(
                "Cannot evaluate before an input vector is set".to_string(),
            ));
        }
        if !self.state.needs_evaluation() {
            log::debug!("evaluate: pin map reused");
            return Ok(());
        }

        let space = self.pin_space();
        let arity = self.config.function_input_arity;

        self.pin_map.fill(PIN_UNSET);
        self.pin_map[..self.input.len()].copy_from_slice(&self.input);

        let mut gathered = vec![0 as PinValue; arity];
        for col in 0..self.config.col_count {
            for row in 0..self.config.row_count {
                let gate = space.gate_index(row, col);
                let offset = self.block_gene_offset(gate);

                for (slot, &wire) in self.genes[offset..offset + arity].iter().enumerate() {
                    let value = self.pin_map[wire as usize];
                    debug_assert_ne!(value, PIN_UNSET, "read of unwritten pin {}", wire);
                    gathered[slot] = value;
                }

                let selector = self.genes[offset + arity] as usize;
                let function = self.registry.function(selector).ok_or_else(|| {
                    CgpError::CorruptGenotype(format!(
                        "Gate {} selects unregistered function {}",
                        gate, selector
                    ))
                })?;
                let value = function.apply(&gathered);

                // Single-valued functions broadcast across the gate's slots.
                for slot in 0..self.config.function_output_arity {
                    self.pin_map[space.gate_output_pin(gate, slot) as usize] = value;
                }
            }
        }

        for (i, &pin) in self.genes[self.config.blocks_gene_count()..].iter().enumerate() {
            self.output_buffer[i] = self.pin_map[pin as usize];
        }

        self.state.clear_evaluation();
        Ok(())
    }

    /// Output vector of the latest forward pass, in output-selection order.
    pub fn outputs(&self) -> Result<&[PinValue]> {
        if self.state.needs_evaluation() {
            return Err(CgpError::Evaluation(
                "Outputs requested before evaluation".to_string(),
            ));
        }
        Ok(&self.output_buffer)
    }

    /// Convenience: set an input vector, evaluate, and return the outputs.
    pub fn evaluate_with(&mut self, input: &[PinValue]) -> Result<&[PinValue]> {
        self.set_input(input)?;
        self.evaluate()?;
        self.outputs()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::CgpConfig;
    use crate::engines::generation::chromosome::{Chromosome, EvalState};
    use crate::functions::FunctionRegistry;
    use std::sync::Arc;

    fn single_gate(selector: u32) -> Chromosome {
        let config = CgpConfig {
            row_count: 1,
            col_count: 1,
            function_input_arity: 2,
            function_output_arity: 1,
            input_count: 2,
            output_count: 1,
            look_back: 1,
            function_count: 16,
        };
        // One gate fed by both primary inputs; output reads the gate pin.
        Chromosome::from_genes(config, Arc::new(FunctionRegistry::new()), vec![0, 1, selector, 2])
            .unwrap()
    }

    #[test]
    fn test_xor_example() {
        let registry = FunctionRegistry::new();
        let xor = registry.selector_by_alias("xor").unwrap() as u32;
        let mut chromosome = single_gate(xor);
        assert_eq!(chromosome.evaluate_with(&[1, 0]).unwrap(), &[1]);
    }

    #[test]
    fn test_outputs_before_evaluate_rejected() {
        let chromosome = single_gate(2);
        assert!(chromosome.outputs().is_err());
    }

    #[test]
    fn test_unchanged_input_reuses_pin_map() {
        let mut chromosome = single_gate(2);
        chromosome.evaluate_with(&[1, 1]).unwrap();
        assert_eq!(chromosome.state(), EvalState::NeedsEnergy);

        // Same vector again: still evaluated, no invalidation.
        chromosome.set_input(&[1, 1]).unwrap();
        assert_eq!(chromosome.state(), EvalState::NeedsEnergy);

        // A different vector marks the pass stale.
        chromosome.set_input(&[0, 1]).unwrap();
        assert!(chromosome.state().needs_evaluation());
    }

    #[test]
    fn test_wrong_input_length_rejected() {
        let mut chromosome = single_gate(2);
        assert!(chromosome.set_input(&[1]).is_err());
    }

    #[test]
    fn test_output_on_primary_input_passthrough() {
        let config = CgpConfig {
            row_count: 1,
            col_count: 1,
            function_input_arity: 2,
            function_output_arity: 1,
            input_count: 2,
            output_count: 1,
            look_back: 1,
            function_count: 16,
        };
        // Output selector points straight at primary input 1.
        let mut chromosome =
            Chromosome::from_genes(config, Arc::new(FunctionRegistry::new()), vec![0, 1, 2, 1])
                .unwrap();
        assert_eq!(chromosome.evaluate_with(&[7, 9]).unwrap(), &[9]);
    }
}
