pub mod csv;

pub use csv::{quantize, timestamp_now, CsvRow, QUANT_SCALE};
