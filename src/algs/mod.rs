//! Mesh algorithms used by set extraction.

pub mod point_merge;
pub mod submesh;

pub use point_merge::PointMerger;
pub use submesh::{SubmeshMaps, extract_cells};
