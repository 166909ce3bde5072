//! Cell kinds and connectivity storage of the output meshes.

pub mod cell_array;
pub mod cell_type;
