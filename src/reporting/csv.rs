use crate::engines::generation::chromosome::Chromosome;
use crate::error::{CgpError, Result};
use chrono::Local;

/// Fixed point scale for the quantized energy/delay columns.
pub const QUANT_SCALE: f64 = 1000.0;

/// Quantize a raw estimate for the integer report columns.
pub fn quantize(value: f64) -> u64 {
    (value * QUANT_SCALE).round() as u64
}

/// Timestamp string used by the report rows.
pub fn timestamp_now() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// One line of the tabular evolution report.
///
/// The core supplies every value; callers decide where the lines go. The
/// chromosome column is the canonical genotype text form and is kept
/// last so it can carry its own spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub run: usize,
    pub generation: usize,
    pub error: u64,
    pub quantized_energy: u64,
    pub energy: f64,
    pub area: f64,
    pub quantized_delay: u64,
    pub delay: f64,
    pub depth: usize,
    pub gate_count: usize,
    pub timestamp: String,
    pub chromosome: String,
}

impl CsvRow {
    pub const HEADER: &'static str = "run,generation,error,quantized_energy,energy,area,\
quantized_delay,delay,depth,gate_count,timestamp,chromosome";

    /// Assemble a row from a chromosome's current statistics.
    pub fn from_chromosome(
        run: usize,
        generation: usize,
        error: u64,
        timestamp: String,
        chromosome: &mut Chromosome,
    ) -> Self {
        let estimates = chromosome.estimate();
        Self {
            run,
            generation,
            error,
            quantized_energy: quantize(estimates.energy),
            energy: estimates.energy,
            area: estimates.area,
            quantized_delay: quantize(estimates.delay),
            delay: estimates.delay,
            depth: estimates.depth,
            gate_count: estimates.node_count,
            timestamp,
            chromosome: chromosome.to_string(),
        }
    }

    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            self.run,
            self.generation,
            self.error,
            self.quantized_energy,
            self.energy,
            self.area,
            self.quantized_delay,
            self.delay,
            self.depth,
            self.gate_count,
            self.timestamp,
            self.chromosome
        )
    }

    /// Parse a previously written report line back into a typed row.
    pub fn parse_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.splitn(12, ',').collect();
        if fields.len() != 12 {
            return Err(CgpError::ReportParse(format!(
                "Expected 12 report fields, got {}",
                fields.len()
            )));
        }

        fn num<T: std::str::FromStr>(field: &str, name: &str) -> Result<T> {
            field.trim().parse::<T>().map_err(|_| {
                CgpError::ReportParse(format!("Field '{}' is not numeric: '{}'", name, field))
            })
        }

        Ok(Self {
            run: num(fields[0], "run")?,
            generation: num(fields[1], "generation")?,
            error: num(fields[2], "error")?,
            quantized_energy: num(fields[3], "quantized_energy")?,
            energy: num(fields[4], "energy")?,
            area: num(fields[5], "area")?,
            quantized_delay: num(fields[6], "quantized_delay")?,
            delay: num(fields[7], "delay")?,
            depth: num(fields[8], "depth")?,
            gate_count: num(fields[9], "gate_count")?,
            timestamp: fields[10].to_string(),
            chromosome: fields[11].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> CsvRow {
        CsvRow {
            run: 1,
            generation: 42,
            error: 7,
            quantized_energy: 2800,
            energy: 2.8,
            area: 5.0,
            quantized_delay: 1300,
            delay: 1.3,
            depth: 2,
            gate_count: 2,
            timestamp: "2026-08-07 12:00:00".to_string(),
            chromosome: "0 1 2 2 2 1 | 3".to_string(),
        }
    }

    #[test]
    fn test_line_round_trip() {
        let original = row();
        let reparsed = CsvRow::parse_line(&original.to_line()).unwrap();
        assert_eq!(original, reparsed);
    }

    #[test]
    fn test_header_matches_field_count() {
        assert_eq!(CsvRow::HEADER.split(',').count(), 12);
    }

    #[test]
    fn test_truncated_line_rejected() {
        assert!(CsvRow::parse_line("1,2,3").is_err());
    }

    #[test]
    fn test_quantize_rounds() {
        assert_eq!(quantize(2.8004), 2800);
        assert_eq!(quantize(0.0), 0);
    }
}
