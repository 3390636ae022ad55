use crate::error::{CgpError, Result};
use crate::functions::GateParameters;
use crate::types::PinValue;
use std::io::BufRead;
use std::path::Path;

/// One training pair: a primary-input vector and the expected outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetEntry {
    pub input: Vec<PinValue>,
    pub expected: Vec<PinValue>,
}

/// In-memory training data for circuit evaluation.
///
/// The text form alternates one input line and one expected-output line
/// per entry; values are whitespace or comma delimited, blank lines and
/// `#` comments are skipped. Vector lengths are validated against the
/// configured input/output counts at load time.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    entries: Vec<DatasetEntry>,
}

impl Dataset {
    pub fn from_reader<R: BufRead>(
        reader: R,
        input_count: usize,
        output_count: usize,
    ) -> Result<Self> {
        let mut entries = Vec::new();
        let mut pending_input: Option<Vec<PinValue>> = None;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let values = parse_value_line(trimmed, line_no + 1)?;
            match pending_input.take() {
                None => {
                    if values.len() != input_count {
                        return Err(CgpError::DataLoading(format!(
                            "Line {}: input vector has {} values, expected {}",
                            line_no + 1,
                            values.len(),
                            input_count
                        )));
                    }
                    pending_input = Some(values);
                }
                Some(input) => {
                    if values.len() != output_count {
                        return Err(CgpError::DataLoading(format!(
                            "Line {}: output vector has {} values, expected {}",
                            line_no + 1,
                            values.len(),
                            output_count
                        )));
                    }
                    entries.push(DatasetEntry {
                        input,
                        expected: values,
                    });
                }
            }
        }

        if pending_input.is_some() {
            return Err(CgpError::DataLoading(
                "Dangling input vector without an expected-output line".to_string(),
            ));
        }
        if entries.is_empty() {
            log::warn!("dataset loaded with zero entries");
        }
        Ok(Self { entries })
    }

    pub fn load<P: AsRef<Path>>(
        path: P,
        input_count: usize,
        output_count: usize,
    ) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref()).map_err(|e| {
            CgpError::DataLoading(format!("Failed to open {}: {}", path.as_ref().display(), e))
        })?;
        Self::from_reader(std::io::BufReader::new(file), input_count, output_count)
    }

    pub fn entries(&self) -> &[DatasetEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_value_line(line: &str, line_no: usize) -> Result<Vec<PinValue>> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|token| {
            token.parse::<PinValue>().map_err(|_| {
                CgpError::DataLoading(format!("Line {}: '{}' is not a value", line_no, token))
            })
        })
        .collect()
}

/// Load a gate parameter table: one `energy area delay` triple per line,
/// same order as the function registry.
pub fn load_gate_parameters<R: BufRead>(reader: R) -> Result<Vec<GateParameters>> {
    let mut parameters = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields: Vec<f64> = trimmed
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| {
                    CgpError::DataLoading(format!(
                        "Line {}: '{}' is not a gate cost",
                        line_no + 1,
                        token
                    ))
                })
            })
            .collect::<Result<_>>()?;
        if fields.len() != 3 {
            return Err(CgpError::DataLoading(format!(
                "Line {}: expected 'energy area delay', got {} fields",
                line_no + 1,
                fields.len()
            )));
        }
        parameters.push(GateParameters::new(fields[0], fields[1], fields[2]));
    }
    Ok(parameters)
}
