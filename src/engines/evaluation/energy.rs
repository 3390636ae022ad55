//! Structure-only phenotype statistics: active gates, energy, area,
//! depth, and delay.

use crate::engines::generation::chromosome::Chromosome;
use crate::types::PinClass;

/// Cost estimates for the active (output-reachable) part of a genotype.
///
/// Independent of any input vector; valid while the chromosome's energy
/// flag is clear.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhenotypeEstimates {
    /// Sum of per-function energy cost over active gates.
    pub energy: f64,
    /// Sum of per-function area over active gates.
    pub area: f64,
    /// Largest per-function delay sum along any active path.
    pub delay: f64,
    /// Longest active gate chain from any primary input or source pin.
    pub depth: usize,
    /// Number of active gates.
    pub node_count: usize,
}

impl Chromosome {
    /// Compute (or return the memoized) phenotype estimates.
    ///
    /// Backward reachability from the selected output pins marks each
    /// active gate exactly once; the visit map collapses diamond-shaped
    /// fan-in. Depth and delay then run forward over the active set,
    /// which column-major order already visits in topological order.
    pub fn estimate(&mut self) -> PhenotypeEstimates {
        if !self.state.needs_energy() {
            log::debug!("estimate: memoized result reused");
            return self.estimates;
        }

        let space = self.pin_space();
        let arity = self.config.function_input_arity;

        self.visit_map.fill(false);
        self.energy_map.fill(0.0);

        let mut energy = 0.0;
        let mut area = 0.0;
        let mut node_count = 0usize;

        let mut stack: Vec<usize> = self
            .output_selection()
            .iter()
            .filter_map(|&pin| match space.classify(pin) {
                Some(PinClass::GateOutput { gate, .. }) => Some(gate),
                _ => None,
            })
            .collect();

        while let Some(gate) = stack.pop() {
            if self.visit_map[gate] {
                continue;
            }
            self.visit_map[gate] = true;

            let offset = self.block_gene_offset(gate);
            let selector = self.genes[offset + arity] as usize;
            // Selector range is guaranteed by construction.
            let parameters = self
                .registry
                .parameters(selector)
                .expect("validated selector");

            self.energy_map[gate] = parameters.energy;
            energy += parameters.energy;
            area += parameters.area;
            node_count += 1;

            for &wire in &self.genes[offset..offset + arity] {
                if let Some(PinClass::GateOutput { gate: source, .. }) = space.classify(wire) {
                    if !self.visit_map[source] {
                        stack.push(source);
                    }
                }
            }
        }

        // Longest-path pass over the active set. Gates only source strictly
        // earlier columns, so ascending gate order is topological.
        let mut depth_of = vec![0usize; space.gate_count()];
        let mut delay_of = vec![0.0f64; space.gate_count()];
        for gate in 0..space.gate_count() {
            if !self.visit_map[gate] {
                continue;
            }
            let offset = self.block_gene_offset(gate);
            let selector = self.genes[offset + arity] as usize;
            let parameters = self
                .registry
                .parameters(selector)
                .expect("validated selector");

            let mut max_depth = 0usize;
            let mut max_delay = 0.0f64;
            for &wire in &self.genes[offset..offset + arity] {
                if let Some(PinClass::GateOutput { gate: source, .. }) = space.classify(wire) {
                    max_depth = max_depth.max(depth_of[source]);
                    max_delay = max_delay.max(delay_of[source]);
                }
            }
            depth_of[gate] = max_depth + 1;
            delay_of[gate] = max_delay + parameters.delay;
        }

        let mut depth = 0usize;
        let mut delay = 0.0f64;
        for &pin in self.output_selection() {
            if let Some(PinClass::GateOutput { gate, .. }) = space.classify(pin) {
                depth = depth.max(depth_of[gate]);
                delay = delay.max(delay_of[gate]);
            }
        }

        self.estimates = PhenotypeEstimates {
            energy,
            area,
            delay,
            depth,
            node_count,
        };
        self.state.clear_energy();
        self.estimates
    }

    /// Estimated energy of the active circuit.
    pub fn estimated_energy(&mut self) -> f64 {
        self.estimate().energy
    }

    /// Estimated area of the active circuit.
    pub fn estimated_area(&mut self) -> f64 {
        self.estimate().area
    }

    /// Estimated critical-path delay of the active circuit.
    pub fn estimated_delay(&mut self) -> f64 {
        self.estimate().delay
    }

    /// Number of gates reachable from the selected outputs.
    pub fn node_count(&mut self) -> usize {
        self.estimate().node_count
    }

    /// Longest gate chain feeding any selected output.
    pub fn phenotype_depth(&mut self) -> usize {
        self.estimate().depth
    }
}

#[cfg(test)]
mod tests {
    use crate::config::CgpConfig;
    use crate::engines::generation::chromosome::{Chromosome, EvalState};
    use crate::functions::FunctionRegistry;
    use std::sync::Arc;

    fn config_1x2() -> CgpConfig {
        CgpConfig {
            row_count: 1,
            col_count: 2,
            function_input_arity: 2,
            function_output_arity: 1,
            input_count: 2,
            output_count: 1,
            look_back: 1,
            function_count: 16,
        }
    }

    fn registry() -> Arc<FunctionRegistry> {
        Arc::new(FunctionRegistry::new())
    }

    #[test]
    fn test_and_not_chain_costs() {
        let registry = registry();
        let and = registry.selector_by_alias("and").unwrap();
        let not = registry.selector_by_alias("not").unwrap();

        // Gate 0 = and(in0, in1), gate 1 = not(gate 0), output on gate 1.
        let genes = vec![0, 1, and as u32, 2, 2, not as u32, 3];
        let mut chromosome = Chromosome::from_genes(config_1x2(), Arc::clone(&registry), genes).unwrap();

        let expected = registry.parameters(and).unwrap().energy
            + registry.parameters(not).unwrap().energy;
        assert_eq!(chromosome.node_count(), 2);
        assert_eq!(chromosome.estimated_energy(), expected);
        assert_eq!(chromosome.phenotype_depth(), 2);

        let expected_delay = registry.parameters(and).unwrap().delay
            + registry.parameters(not).unwrap().delay;
        assert!((chromosome.estimated_delay() - expected_delay).abs() < 1e-12);
    }

    #[test]
    fn test_output_on_primary_input_costs_nothing() {
        let genes = vec![0, 1, 2, 2, 2, 1, 0];
        let mut chromosome = Chromosome::from_genes(config_1x2(), registry(), genes).unwrap();
        assert_eq!(chromosome.node_count(), 0);
        assert_eq!(chromosome.estimated_energy(), 0.0);
        assert_eq!(chromosome.phenotype_depth(), 0);
    }

    #[test]
    fn test_diamond_fan_in_counted_once() {
        let config = CgpConfig {
            row_count: 2,
            col_count: 2,
            function_input_arity: 2,
            function_output_arity: 1,
            input_count: 2,
            output_count: 1,
            look_back: 1,
            function_count: 16,
        };
        let registry = registry();
        let and = registry.selector_by_alias("and").unwrap() as u32;
        let or = registry.selector_by_alias("or").unwrap() as u32;
        // Pins: 0,1 inputs; 2,3 column-0 gates; 4,5 column-1 gates.
        // Both column-1 gates read pin 2 (gate 0) on both wires; the output
        // reads pin 4, so only gates 0 and 2 are active.
        let genes = vec![
            0, 1, and, // gate 0
            1, 0, or, // gate 1 (inactive)
            2, 2, or, // gate 2
            2, 2, and, // gate 3 (inactive)
            4,
        ];
        let mut chromosome = Chromosome::from_genes(config, registry, genes).unwrap();
        assert_eq!(chromosome.node_count(), 2);
    }

    #[test]
    fn test_memoized_until_invalidated() {
        let genes = vec![0, 1, 2, 2, 2, 1, 3];
        let mut chromosome = Chromosome::from_genes(config_1x2(), registry(), genes).unwrap();

        let first = chromosome.estimate();
        assert_eq!(chromosome.state(), EvalState::NeedsEvaluation);

        // Second query returns the cached value without a traversal; the
        // state machine no longer reports the energy half dirty.
        let second = chromosome.estimate();
        assert_eq!(first, second);
        assert!(!chromosome.state().needs_energy());
    }
}
