//! XdmfError: Unified error type for the heavy-data reader.
//!
//! Every fallible step of the reader returns this error internally. The tree
//! walker converts it into an empty result at node boundaries, so callers of
//! [`crate::io::xdmf::HeavyDataReader::read_data`] only ever see `None` or an
//! empty composite slot.

use thiserror::Error;

use crate::data::array::NumberType;

/// Unified error type for heavy-data operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum XdmfError {
    /// The grid descriptor cannot be read.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    /// The topology type has no output cell kind.
    #[error("unknown topology type `{0}`")]
    UnknownTopology(String),
    /// A mixed connectivity stream contained an unknown cell code.
    #[error("unknown cell code {code} at stream offset {offset}")]
    UnknownCellCode { code: i64, offset: usize },
    /// A mixed connectivity stream ended before all cells were read.
    #[error("mixed connectivity ended after {decoded} of {expected} cells")]
    TruncatedMixedStream { decoded: usize, expected: usize },
    /// A variable-size cell in a mixed stream declared a negative size.
    #[error("invalid cell size {size} at stream offset {offset}")]
    InvalidCellSize { size: i64, offset: usize },
    /// The geometry kind cannot be handled by the requesting assembler.
    #[error("geometry type {geometry} is not supported by the {assembler} reader")]
    UnsupportedGeometry {
        geometry: String,
        assembler: &'static str,
    },
    /// The rank of a heavy array does not fit the grid.
    #[error("array `{array}` has rank {rank}, grid dimensionality is {dimensionality}")]
    RankMismatch {
        array: String,
        rank: usize,
        dimensionality: usize,
    },
    /// A fixed-type connectivity array is shorter than required.
    #[error("connectivity holds {actual} entries, {expected} are required")]
    ShortConnectivity { expected: usize, actual: usize },
    /// The heavy-array reader failed.
    #[error("heavy data read of `{array}` failed: {reason}")]
    HeavyRead { array: String, reason: String },
    /// The heavy-array reader has no array under this reference.
    #[error("no heavy array named `{0}`")]
    MissingArray(String),
    /// A hyperslab selection leaves the array bounds.
    #[error("selection on `{array}` is out of bounds in dimension {dimension}")]
    SelectionOutOfBounds { array: String, dimension: usize },
    /// A decoded array length is not a multiple of its component count.
    #[error("array `{array}` holds {len} values, not a multiple of {components} components")]
    ComponentMismatch {
        array: String,
        len: usize,
        components: usize,
    },
    /// A numeric type cannot be used where it was found.
    #[error("array `{array}` has number type {number_type:?}, expected {expected}")]
    NumberTypeMismatch {
        array: String,
        number_type: NumberType,
        expected: &'static str,
    },
    /// A face or edge set is missing one of its parallel id arrays.
    #[error("set `{set}` is missing its {which} array")]
    MissingSetArray { set: String, which: &'static str },
}
