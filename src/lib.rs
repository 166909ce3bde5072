#![cfg_attr(docsrs, feature(doc_cfg))]
//! # xdmf-heavy
//!
//! xdmf-heavy is the heavy-data half of an Xdmf reader. Given the parsed
//! light-data description of a domain (grid trees, topologies, geometries,
//! attributes, sets and time values) and a source of the bulk arrays those
//! descriptions reference, it builds fully populated in-memory meshes.
//!
//! ## Features
//! - Uniform grids become unstructured, image, rectilinear or curvilinear
//!   datasets; spatial collections, temporal collections and trees become
//!   composites with named, possibly empty, slots
//! - Mixed-topology connectivity streams decoded into per-cell kinds
//! - Structured sub-extent and stride reads through hyperslab selections
//! - Node, cell and grid attributes, with symmetric tensors expanded to 3x3
//! - Ghost markers and node/cell/face/edge set extraction
//! - Round-robin partitioning of collection leaves across pieces
//!
//! ## Usage
//! ```
//! use xdmf_heavy::prelude::*;
//!
//! let mut store = InMemoryArrayStore::new();
//! store.insert_flat("xyz", ArrayData::F32(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]));
//! store.insert_flat("conn", ArrayData::I32(vec![0, 1, 2]));
//! let grid = GridDescriptor::uniform(
//!     "tri",
//!     TopologyDescriptor::unstructured(TopologyType::Triangle, 1, "conn"),
//!     GeometryDescriptor::xyz("xyz"),
//! );
//! let reader = HeavyDataReader::new(&store);
//! let mesh = reader.read_data(&Domain::new(vec![grid])).unwrap();
//! assert_eq!(mesh.as_dataset().unwrap().number_of_cells(), 1);
//! ```
//!
//! ## Logging
//! Diagnostics go through the [`log`] facade: skipped attributes and sets are
//! reported at `warn`, grids that fail to assemble at `error`, partitioning
//! and selection decisions at `debug`.

pub mod algs;
pub mod data;
pub mod io;
pub mod mesh;
pub mod mesh_error;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::data::array::{ArrayData, DataArray, NumberType};
    pub use crate::data::field::{ActiveRole, FieldData};
    pub use crate::data::points::Points;
    pub use crate::io::heavy::{
        ArrayInfo, ArrayRef, HeavyArray, HeavyArrayReader, InMemoryArrayStore, Selection,
    };
    pub use crate::io::light::{
        AttributeDescriptor, AttributeType, Center, CollectionKind, Domain, GeometryDescriptor,
        GeometryKind, GridDescriptor, GridKind, SetDescriptor, SetKind, TimeSpec,
        TopologyDescriptor, TopologyType,
    };
    pub use crate::io::xdmf::{
        ArraySelection, DomainMetadata, HeavyDataReader, ReadOptions, Selections,
    };
    pub use crate::mesh::{
        Block, Composite, DataSet, ImageData, MeshOutput, PolyData, RectilinearGrid,
        StructuredGrid, UnstructuredMesh,
    };
    pub use crate::mesh_error::XdmfError;
    pub use crate::topology::cell_array::CellArray;
    pub use crate::topology::cell_type::CellType;
}
