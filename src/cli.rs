use std::path::PathBuf;

use clap::Parser;

use crate::data::loader::LoadOptions;
use crate::data::model::MatrixLayout;

#[derive(Parser, Debug)]
#[command(name = "grex-extract")]
#[command(about = "Dump gene ids, sample ids and predicted expression from an HDF5 file as JSON", long_about = None)]
#[command(version)]
pub struct Cli {
    /// HDF5 file to read
    pub file: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON document
    #[arg(long)]
    pub pretty: bool,

    /// Matrix orientation to emit
    #[arg(long, value_enum, default_value = "as-stored")]
    pub layout: MatrixLayout,

    /// Name of the gene id dataset
    #[arg(long, default_value = "genes")]
    pub genes_dataset: String,

    /// Name of the sample id dataset
    #[arg(long, default_value = "samples")]
    pub samples_dataset: String,

    /// Name of the expression matrix dataset
    #[arg(long, default_value = "pred_expr")]
    pub matrix_dataset: String,
}

impl Cli {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            genes_dataset: self.genes_dataset.clone(),
            samples_dataset: self.samples_dataset.clone(),
            matrix_dataset: self.matrix_dataset.clone(),
            layout: self.layout,
        }
    }
}
