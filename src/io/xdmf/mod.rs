//! Heavy-data reader.
//!
//! [`HeavyDataReader`] turns grid descriptors into meshes. It walks the grid
//! tree ([`walker`]), routes every uniform grid to one of four assemblers
//! (unstructured, image, rectilinear, curvilinear), decodes attributes with
//! optional hyperslab restriction, then applies ghost sets and extracts named
//! sets.
//!
//! # Failure model
//! Internally every step returns [`Result`]. At node boundaries the error is
//! logged and the node's output becomes `None` (or an empty composite slot);
//! siblings are still read. A failing attribute is dropped without discarding
//! its mesh.
//!
//! # Partitioning
//! Several processes may read the same domain with different
//! [`ReadOptions::piece`] values. Leaves of spatial collections are dealt out
//! round-robin; the results over all pieces are disjoint and complete.

pub mod attribute;
pub mod ghost;
pub mod metadata;
pub mod options;
pub mod points;
pub mod sets;
pub mod structured;
pub mod unstructured;
mod walker;

pub use attribute::expand_tensor6;
pub use ghost::{GHOST_ARRAY_NAME, apply_ghost_levels};
pub use metadata::{DomainMetadata, collect_metadata};
pub use options::{ArraySelection, ReadOptions, Selections};
pub use structured::StructuredExtents;
pub use unstructured::{MixedCells, decode_fixed, decode_mixed};

use crate::io::heavy::HeavyArrayReader;
use crate::io::light::{Domain, GridDescriptor};
use crate::mesh::MeshOutput;

/// Reads meshes from light-data descriptors and a heavy-array source.
pub struct HeavyDataReader<'a> {
    arrays: &'a dyn HeavyArrayReader,
    options: ReadOptions,
    selections: Selections,
}

impl<'a> HeavyDataReader<'a> {
    pub fn new(arrays: &'a dyn HeavyArrayReader) -> Self {
        Self {
            arrays,
            options: ReadOptions::default(),
            selections: Selections::default(),
        }
    }

    pub fn with_options(mut self, options: ReadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_selections(mut self, selections: Selections) -> Self {
        self.selections = selections;
        self
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ReadOptions {
        &mut self.options
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn selections_mut(&mut self) -> &mut Selections {
        &mut self.selections
    }

    pub(crate) fn arrays(&self) -> &dyn HeavyArrayReader {
        self.arrays
    }

    /// Read a whole domain.
    ///
    /// A single top-level grid is returned as is; several are returned in a
    /// composite, partitioned like a spatial collection.
    pub fn read_data(&self, domain: &Domain) -> Option<MeshOutput> {
        self.read_domain(domain)
    }

    /// Names and time steps of `domain`, walking at most
    /// [`ReadOptions::max_collectable_grids`] grids in full.
    pub fn metadata(&self, domain: &Domain) -> DomainMetadata {
        collect_metadata(domain, self.options.max_collectable_grids)
    }

    /// Read one grid descriptor. `None` is reported as an invalid grid.
    pub fn read_grid(&self, grid: Option<&GridDescriptor>) -> Option<MeshOutput> {
        self.dispatch(grid)
    }
}
