use anyhow::{bail, Context};
use cgpevo::config::ConfigManager;
use cgpevo::data::Dataset;
use cgpevo::engines::evaluation::error_sum;
use cgpevo::engines::generation::Chromosome;
use cgpevo::functions::FunctionRegistry;
use cgpevo::reporting::{timestamp_now, CsvRow};
use std::sync::Arc;

/// Re-evaluate a stored genotype against a dataset and print its report row.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        bail!("usage: {} <config.toml> <dataset> <genotype-file>", args[0]);
    }

    let manager = ConfigManager::new();
    manager
        .load_from_file(&args[1])
        .with_context(|| format!("loading {}", args[1]))?;
    let config = manager.get();

    let registry = match config.gates.parameters.clone() {
        Some(parameters) => FunctionRegistry::new().with_parameters(parameters)?,
        None => FunctionRegistry::new(),
    };
    let registry = Arc::new(registry);

    let dataset = Dataset::load(&args[2], config.cgp.input_count, config.cgp.output_count)
        .with_context(|| format!("loading {}", args[2]))?;

    let text = std::fs::read_to_string(&args[3]).with_context(|| format!("reading {}", args[3]))?;
    let mut chromosome = Chromosome::parse(text.trim(), &config.cgp, registry)?;

    let error = error_sum(&mut chromosome, &dataset)?;
    let row = CsvRow::from_chromosome(0, 0, error, timestamp_now(), &mut chromosome);

    println!("{}", CsvRow::HEADER);
    println!("{}", row.to_line());
    Ok(())
}
