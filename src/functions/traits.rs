use crate::types::PinValue;
use serde::{Deserialize, Serialize};

/// Physical cost estimates for one gate function.
///
/// Energy and area accumulate over every active gate; delay accumulates
/// along the longest active path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateParameters {
    pub energy: f64,
    pub area: f64,
    pub delay: f64,
}

impl GateParameters {
    pub fn new(energy: f64, area: f64, delay: f64) -> Self {
        Self {
            energy,
            area,
            delay,
        }
    }
}

/// One primitive gate operation.
///
/// Application is a pure function of the gathered input values; gates
/// cannot fail and hold no state, which is what makes evaluation
/// deterministic and repeatable.
pub trait GateFunction: Send + Sync {
    /// Short name used in reports and parameter files.
    fn alias(&self) -> &'static str;

    /// How many of the gate's wired inputs the operation actually reads.
    /// Gates always carry the configured arity of input genes; a unary
    /// operation simply ignores the rest.
    fn arity(&self) -> usize;

    /// Apply the operation to the gathered input values. `inputs` holds
    /// the configured arity of values; only the first `arity()` matter.
    fn apply(&self, inputs: &[PinValue]) -> PinValue;
}
