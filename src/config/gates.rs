use super::traits::ConfigSection;
use crate::error::CgpError;
use crate::functions::GateParameters;
use serde::{Deserialize, Serialize};

/// Optional replacement for the registry's built-in gate cost table.
///
/// When present, the table must cover every registered function; the
/// length check happens in `FunctionRegistry::with_parameters`, but basic
/// sanity (non-negative costs) is rejected here at configuration time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatesConfig {
    pub parameters: Option<Vec<GateParameters>>,
}

impl ConfigSection for GatesConfig {
    fn section_name() -> &'static str {
        "gates"
    }

    fn validate(&self) -> Result<(), CgpError> {
        if let Some(parameters) = &self.parameters {
            for (i, p) in parameters.iter().enumerate() {
                if p.energy < 0.0 || p.area < 0.0 || p.delay < 0.0 {
                    return Err(CgpError::Configuration(format!(
                        "Gate parameter entry {} has a negative cost",
                        i
                    )));
                }
            }
        }
        Ok(())
    }
}
