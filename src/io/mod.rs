//! Xdmf input.
//!
//! The reader is split along the light/heavy boundary of the format:
//! - [`light`] holds the parsed grid descriptions,
//! - [`heavy`] resolves the bulk arrays they reference,
//! - [`xdmf`] assembles meshes from both.

pub mod heavy;
pub mod light;
pub mod xdmf;

pub use heavy::{ArrayRef, HeavyArray, HeavyArrayReader, InMemoryArrayStore, Selection};
pub use light::{Domain, GridDescriptor, GridKind};
pub use xdmf::{HeavyDataReader, ReadOptions, Selections};
