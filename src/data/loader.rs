use std::path::Path;

use hdf5::types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Dataset, File};
use ndarray::Array2;

use super::error::ExtractError;
use super::model::{ExpressionRecord, IdentifierEncoding, MatrixLayout};

/// Widest fixed-length identifier element accepted, in bytes.
pub const MAX_FIXED_WIDTH: usize = 1024;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Dataset names and matrix orientation used by [`load_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub genes_dataset: String,
    pub samples_dataset: String,
    pub matrix_dataset: String,
    pub layout: MatrixLayout,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            genes_dataset: "genes".to_string(),
            samples_dataset: "samples".to_string(),
            matrix_dataset: "pred_expr".to_string(),
            layout: MatrixLayout::AsStored,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read gene ids, sample ids and the expression matrix from an HDF5 file.
///
/// The file is opened read-only and closed when this function returns,
/// whether it succeeds or not. Every dataset is read in full.
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<ExpressionRecord, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|source| ExtractError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Opened {}", path.display());

    let gene_ids = read_identifiers(&file, &options.genes_dataset)?;
    let person_ids = read_identifiers(&file, &options.samples_dataset)?;
    let matrix = read_matrix(&file, &options.matrix_dataset)?;

    let rows = orient(
        matrix,
        gene_ids.len(),
        person_ids.len(),
        options.layout,
        &options.matrix_dataset,
    )?;

    Ok(ExpressionRecord::new(gene_ids, person_ids, rows))
}

// ---------------------------------------------------------------------------
// Identifier datasets
// ---------------------------------------------------------------------------

fn open_dataset(file: &File, name: &str) -> Result<Dataset, ExtractError> {
    if !file.link_exists(name) {
        return Err(ExtractError::MissingDataset {
            name: name.to_string(),
        });
    }
    file.dataset(name).map_err(hdf5_err(name))
}

fn read_identifiers(file: &File, name: &str) -> Result<Vec<String>, ExtractError> {
    let ds = open_dataset(file, name)?;
    if ds.ndim() != 1 {
        return Err(ExtractError::shape(
            name,
            format!("expected a 1-D array, found shape {:?}", ds.shape()),
        ));
    }

    let encoding = resolve_encoding(&ds, name)?;
    log::debug!("Dataset '{name}': {} ids stored as {encoding}", ds.size());

    match encoding {
        IdentifierEncoding::FixedBytes { width, utf8 } => read_fixed_width(&ds, name, width, utf8),
        IdentifierEncoding::VarLenAscii => {
            let raw = ds.read_raw::<VarLenAscii>().map_err(hdf5_err(name))?;
            decode_all(name, raw.iter().map(|s| s.as_bytes()))
        }
        IdentifierEncoding::VarLenUtf8 => {
            let raw = ds.read_raw::<VarLenUnicode>().map_err(hdf5_err(name))?;
            decode_all(name, raw.iter().map(|s| s.as_bytes()))
        }
    }
}

/// Classify the declared element type of an identifier dataset.
fn resolve_encoding(ds: &Dataset, name: &str) -> Result<IdentifierEncoding, ExtractError> {
    let descriptor = ds
        .dtype()
        .and_then(|dtype| dtype.to_descriptor())
        .map_err(hdf5_err(name))?;

    match descriptor {
        TypeDescriptor::FixedAscii(width) => Ok(IdentifierEncoding::FixedBytes { width, utf8: false }),
        TypeDescriptor::FixedUnicode(width) => Ok(IdentifierEncoding::FixedBytes { width, utf8: true }),
        TypeDescriptor::VarLenAscii => Ok(IdentifierEncoding::VarLenAscii),
        TypeDescriptor::VarLenUnicode => Ok(IdentifierEncoding::VarLenUtf8),
        other => Err(ExtractError::UnsupportedIdentifierType {
            dataset: name.to_string(),
            descriptor: format!("{other:?}"),
        }),
    }
}

/// Fixed-length strings are read into the smallest buffer width that holds
/// the stored width; HDF5 pads the shorter stored elements with nulls.
fn read_fixed_width(
    ds: &Dataset,
    name: &str,
    width: usize,
    utf8: bool,
) -> Result<Vec<String>, ExtractError> {
    match width {
        0..=16 => read_fixed::<16>(ds, name, utf8),
        17..=64 => read_fixed::<64>(ds, name, utf8),
        65..=256 => read_fixed::<256>(ds, name, utf8),
        257..=MAX_FIXED_WIDTH => read_fixed::<MAX_FIXED_WIDTH>(ds, name, utf8),
        _ => Err(ExtractError::UnsupportedIdentifierType {
            dataset: name.to_string(),
            descriptor: format!(
                "{} (wider than {MAX_FIXED_WIDTH} bytes)",
                IdentifierEncoding::FixedBytes { width, utf8 }
            ),
        }),
    }
}

fn read_fixed<const N: usize>(
    ds: &Dataset,
    name: &str,
    utf8: bool,
) -> Result<Vec<String>, ExtractError> {
    if utf8 {
        let raw = ds.read_raw::<FixedUnicode<N>>().map_err(hdf5_err(name))?;
        decode_all(name, raw.iter().map(|s| s.as_bytes()))
    } else {
        let raw = ds.read_raw::<FixedAscii<N>>().map_err(hdf5_err(name))?;
        decode_all(name, raw.iter().map(|s| s.as_bytes()))
    }
}

/// Decode every element as UTF-8, keeping order. Fails on the first
/// invalid element.
fn decode_all<'a>(
    dataset: &str,
    elements: impl Iterator<Item = &'a [u8]>,
) -> Result<Vec<String>, ExtractError> {
    elements
        .enumerate()
        .map(|(index, bytes)| {
            std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|source| ExtractError::Encoding {
                    dataset: dataset.to_string(),
                    index,
                    source,
                })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Expression matrix
// ---------------------------------------------------------------------------

fn read_matrix(file: &File, name: &str) -> Result<Array2<f64>, ExtractError> {
    let ds = open_dataset(file, name)?;
    if ds.ndim() != 2 {
        return Err(ExtractError::shape(
            name,
            format!("expected a 2-D matrix, found shape {:?}", ds.shape()),
        ));
    }
    let matrix = ds.read_2d::<f64>().map_err(hdf5_err(name))?;
    log::info!(
        "Dataset '{name}': {} x {} matrix",
        matrix.nrows(),
        matrix.ncols()
    );
    Ok(matrix)
}

/// Apply the layout policy and split the matrix into rows.
fn orient(
    matrix: Array2<f64>,
    genes: usize,
    samples: usize,
    layout: MatrixLayout,
    name: &str,
) -> Result<Vec<Vec<f64>>, ExtractError> {
    let stored = matrix.dim();
    let matrix = match layout {
        MatrixLayout::AsStored => {
            if stored != (genes, samples) {
                log::warn!(
                    "Dataset '{name}' has shape {stored:?} but there are {genes} genes and \
                     {samples} samples; emitting as stored"
                );
            }
            matrix
        }
        MatrixLayout::GenesBySamples => {
            if stored == (genes, samples) {
                matrix
            } else if stored == (samples, genes) {
                log::info!("Transposing '{name}' from samples x genes");
                matrix.reversed_axes()
            } else {
                return Err(ExtractError::shape(
                    name,
                    format!(
                        "shape {stored:?} matches neither ({genes}, {samples}) nor \
                         ({samples}, {genes})"
                    ),
                ));
            }
        }
    };

    Ok(matrix.rows().into_iter().map(|row| row.to_vec()).collect())
}

fn hdf5_err(dataset: &str) -> impl FnOnce(hdf5::Error) -> ExtractError + '_ {
    move |source| ExtractError::Hdf5 {
        dataset: dataset.to_string(),
        source,
    }
}
