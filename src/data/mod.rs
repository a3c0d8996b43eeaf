/// Data layer: record types, errors, and the HDF5 extractor.
///
/// Architecture:
/// ```text
///  file.h5  (genes, samples, pred_expr)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  open read-only → resolve id encodings → read matrix
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ ExpressionRecord │  gene_ids, person_ids, expression_matrix
///   └──────────────────┘
///        │
///        ▼
///     output (JSON)
/// ```

pub mod error;
pub mod loader;
pub mod model;
