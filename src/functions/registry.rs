use super::primitives::{
    And, Double, Half, Identity, Max, Min, Nand, Negate, Nor, Not, Or, SatAdd, SatSub, Xnor, Xor,
    Zero,
};
use super::traits::{GateFunction, GateParameters};
use crate::error::{CgpError, Result};
use std::sync::Arc;

/// One selectable entry in the function table.
#[derive(Clone)]
pub struct GateEntry {
    pub function: Arc<dyn GateFunction>,
    pub parameters: GateParameters,
}

/// Index-addressed table of gate functions and their cost parameters.
///
/// Function-selector genes index straight into this table, so the order of
/// registration is part of the genotype encoding and must stay stable for
/// the lifetime of a run.
pub struct FunctionRegistry {
    entries: Vec<GateEntry>,
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl FunctionRegistry {
    pub fn new() -> Self {
        let entries: Vec<(Arc<dyn GateFunction>, GateParameters)> = vec![
            (Arc::new(Identity), GateParameters::new(0.0, 0.0, 0.0)),
            (Arc::new(Not), GateParameters::new(0.5, 1.0, 0.3)),
            (Arc::new(And), GateParameters::new(1.0, 2.0, 0.5)),
            (Arc::new(Or), GateParameters::new(1.0, 2.0, 0.5)),
            (Arc::new(Xor), GateParameters::new(1.8, 3.0, 0.8)),
            (Arc::new(Nand), GateParameters::new(0.9, 1.5, 0.4)),
            (Arc::new(Nor), GateParameters::new(0.9, 1.5, 0.4)),
            (Arc::new(Xnor), GateParameters::new(1.8, 3.0, 0.8)),
            (Arc::new(SatAdd), GateParameters::new(8.0, 12.0, 2.0)),
            (Arc::new(SatSub), GateParameters::new(8.5, 12.0, 2.1)),
            (Arc::new(Negate), GateParameters::new(4.0, 6.0, 1.2)),
            (Arc::new(Min), GateParameters::new(6.0, 9.0, 1.6)),
            (Arc::new(Max), GateParameters::new(6.0, 9.0, 1.6)),
            (Arc::new(Half), GateParameters::new(0.1, 0.2, 0.1)),
            (Arc::new(Double), GateParameters::new(0.2, 0.4, 0.1)),
            (Arc::new(Zero), GateParameters::new(0.0, 0.0, 0.0)),
        ];

        Self {
            entries: entries
                .into_iter()
                .map(|(function, parameters)| GateEntry {
                    function,
                    parameters,
                })
                .collect(),
        }
    }

    /// Replace the whole cost table, e.g. with values loaded from a gate
    /// parameter file. The table must cover every registered function.
    pub fn with_parameters(mut self, parameters: Vec<GateParameters>) -> Result<Self> {
        if parameters.len() != self.entries.len() {
            return Err(CgpError::Configuration(format!(
                "Gate parameter table has {} entries, registry has {} functions",
                parameters.len(),
                self.entries.len()
            )));
        }
        for (entry, parameters) in self.entries.iter_mut().zip(parameters) {
            entry.parameters = parameters;
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, selector: usize) -> Option<&GateEntry> {
        self.entries.get(selector)
    }

    pub fn function(&self, selector: usize) -> Option<&Arc<dyn GateFunction>> {
        self.entries.get(selector).map(|e| &e.function)
    }

    pub fn parameters(&self, selector: usize) -> Option<GateParameters> {
        self.entries.get(selector).map(|e| e.parameters)
    }

    pub fn selector_by_alias(&self, alias: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.function.alias() == alias)
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
