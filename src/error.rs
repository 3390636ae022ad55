use thiserror::Error;

#[derive(Error, Debug)]
pub enum CgpError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Genotype format error: expected {expected} genes, got {actual}")]
    GenotypeFormat { expected: usize, actual: usize },

    #[error("Genotype parse error: {0}")]
    GenotypeParse(String),

    #[error("Corrupt genotype: {0}")]
    CorruptGenotype(String),

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("Report parse error: {0}")]
    ReportParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CgpError>;
