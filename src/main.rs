mod cli;
mod data;
mod output;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let options = cli.load_options();

    let record = data::loader::load_file(&cli.file, &options)
        .with_context(|| format!("extracting expression data from {}", cli.file.display()))?;

    let (rows, cols) = record.shape();
    log::info!(
        "Extracted {} gene ids, {} sample ids, {rows} x {cols} matrix",
        record.gene_ids().len(),
        record.person_ids().len()
    );

    output::emit(&record, cli.output.as_deref(), cli.pretty)
}
