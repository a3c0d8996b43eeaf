use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// ExpressionRecord – the extracted contents of one GREx file
// ---------------------------------------------------------------------------

/// Gene ids, sample ids and the predicted expression matrix read from a
/// single file. Built once by the loader and only read afterwards.
///
/// Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionRecord {
    gene_ids: Vec<String>,
    person_ids: Vec<String>,
    expression_matrix: Vec<Vec<f64>>,
}

impl ExpressionRecord {
    pub(crate) fn new(
        gene_ids: Vec<String>,
        person_ids: Vec<String>,
        expression_matrix: Vec<Vec<f64>>,
    ) -> Self {
        ExpressionRecord {
            gene_ids,
            person_ids,
            expression_matrix,
        }
    }

    /// Gene identifiers, one per matrix row.
    pub fn gene_ids(&self) -> &[String] {
        &self.gene_ids
    }

    /// Sample (person) identifiers, one per matrix column.
    pub fn person_ids(&self) -> &[String] {
        &self.person_ids
    }

    /// Expression values as rows.
    pub fn expression_matrix(&self) -> &[Vec<f64>] {
        &self.expression_matrix
    }

    /// `(rows, columns)` of the matrix; columns is 0 when there are no rows.
    pub fn shape(&self) -> (usize, usize) {
        let matrix = self.expression_matrix();
        (matrix.len(), matrix.first().map_or(0, |r| r.len()))
    }
}

// ---------------------------------------------------------------------------
// IdentifierEncoding – declared element type of an id dataset
// ---------------------------------------------------------------------------

/// How the elements of an identifier dataset are stored on disk.
/// Resolved from the dataset's HDF5 datatype before any value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierEncoding {
    /// Fixed-length string of `width` bytes, null padded.
    /// `utf8` reflects the declared character set; the bytes are decoded
    /// as UTF-8 either way.
    FixedBytes { width: usize, utf8: bool },
    VarLenAscii,
    VarLenUtf8,
}

impl fmt::Display for IdentifierEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierEncoding::FixedBytes { width, utf8: false } => {
                write!(f, "fixed ascii[{width}]")
            }
            IdentifierEncoding::FixedBytes { width, utf8: true } => {
                write!(f, "fixed utf-8[{width}]")
            }
            IdentifierEncoding::VarLenAscii => write!(f, "varlen ascii"),
            IdentifierEncoding::VarLenUtf8 => write!(f, "varlen utf-8"),
        }
    }
}

// ---------------------------------------------------------------------------
// MatrixLayout – orientation policy for the expression matrix
// ---------------------------------------------------------------------------

/// Which orientation to emit the matrix in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MatrixLayout {
    /// Emit rows exactly as stored; only warn when the shape does not
    /// line up with (genes, samples).
    #[default]
    AsStored,
    /// Rows are genes. A matrix stored as (samples, genes) is transposed.
    GenesBySamples,
}
