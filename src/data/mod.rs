//! Numeric payloads of the output meshes: typed arrays, points and field buckets.

pub mod array;
pub mod field;
pub mod points;
