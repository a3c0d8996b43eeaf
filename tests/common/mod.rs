use std::path::{Path, PathBuf};

use hdf5::types::FixedAscii;
use ndarray::{Array1, Array2};

fn byte_strings(ids: &[&str]) -> Array1<FixedAscii<16>> {
    ids.iter()
        .map(|id| FixedAscii::<16>::from_ascii(id).unwrap())
        .collect()
}

/// Write a GREx file into `dir`. `matrix` is skipped when `None`.
pub fn write_grex(dir: &Path, genes: &[&str], samples: &[&str], matrix: Option<&Array2<f64>>) -> PathBuf {
    let path = dir.join("grex.h5");
    let file = hdf5::File::create(&path).unwrap();
    file.new_dataset_builder()
        .with_data(&byte_strings(genes))
        .create("genes")
        .unwrap();
    file.new_dataset_builder()
        .with_data(&byte_strings(samples))
        .create("samples")
        .unwrap();
    if let Some(matrix) = matrix {
        file.new_dataset_builder()
            .with_data(matrix)
            .create("pred_expr")
            .unwrap();
    }
    path
}
