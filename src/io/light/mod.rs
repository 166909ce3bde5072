//! Light-data model: the parsed, in-memory description of grids.
//!
//! A [`Domain`] owns a forest of [`GridDescriptor`]s. Uniform grids carry a
//! topology, a geometry, attributes and sets; collections and trees carry
//! only children. Bulk values are referenced through [`ArrayRef`] tags and
//! resolved by a [`crate::io::heavy::HeavyArrayReader`].

pub mod attribute;
pub mod geometry;
pub mod set;
pub mod time;
pub mod topology;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use attribute::{AttributeDescriptor, AttributeType, Center};
pub use geometry::{GeometryDescriptor, GeometryKind};
pub use set::{SetDescriptor, SetKind};
pub use time::TimeSpec;
pub use topology::{StructuredKind, TopologyClass, TopologyDescriptor, TopologyType};

use crate::io::heavy::ArrayRef;
use crate::mesh_error::XdmfError;

/// Kind of a grid node.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum GridKind {
    Uniform,
    SpatialCollection,
    TemporalCollection,
    Tree,
    Subset,
}

/// Collection kind as written in light data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CollectionKind {
    Spatial,
    Temporal,
    Unset,
}

impl GridKind {
    /// Kind of a `Collection` grid; an unset collection kind is spatial.
    pub fn collection(kind: CollectionKind) -> GridKind {
        match kind {
            CollectionKind::Temporal => GridKind::TemporalCollection,
            CollectionKind::Spatial | CollectionKind::Unset => GridKind::SpatialCollection,
        }
    }

    /// `true` for kinds that hold a single dataset.
    pub fn is_uniform(self) -> bool {
        matches!(self, GridKind::Uniform | GridKind::Subset)
    }
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GridKind::Uniform => "Uniform",
            GridKind::SpatialCollection => "Collection(Spatial)",
            GridKind::TemporalCollection => "Collection(Temporal)",
            GridKind::Tree => "Tree",
            GridKind::Subset => "Subset",
        })
    }
}

impl FromStr for GridKind {
    type Err = XdmfError;

    /// Parses a `GridType`; plain `Collection` is spatial.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(GridKind::Uniform),
            "collection" | "spatial" => Ok(GridKind::SpatialCollection),
            "temporal" => Ok(GridKind::TemporalCollection),
            "tree" => Ok(GridKind::Tree),
            "subset" => Ok(GridKind::Subset),
            _ => Err(XdmfError::InvalidGrid(s.to_string())),
        }
    }
}

/// One node of the grid tree.
///
/// `kind == None` marks a grid whose kind could not be determined; reading
/// it fails.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridDescriptor {
    pub name: Option<String>,
    pub kind: Option<GridKind>,
    pub topology: Option<TopologyDescriptor>,
    pub geometry: Option<GeometryDescriptor>,
    pub attributes: Vec<AttributeDescriptor>,
    pub sets: Vec<SetDescriptor>,
    pub time: TimeSpec,
    pub children: Vec<GridDescriptor>,
}

impl GridDescriptor {
    pub fn uniform(
        name: impl Into<String>,
        topology: TopologyDescriptor,
        geometry: GeometryDescriptor,
    ) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(GridKind::Uniform),
            topology: Some(topology),
            geometry: Some(geometry),
            ..Self::default()
        }
    }

    pub fn collection(
        name: impl Into<String>,
        kind: CollectionKind,
        children: Vec<GridDescriptor>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(GridKind::collection(kind)),
            children,
            ..Self::default()
        }
    }

    pub fn tree(name: impl Into<String>, children: Vec<GridDescriptor>) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(GridKind::Tree),
            children,
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, attribute: AttributeDescriptor) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_set(mut self, set: SetDescriptor) -> Self {
        self.sets.push(set);
        self
    }

    pub fn with_time(mut self, time: TimeSpec) -> Self {
        self.time = time;
        self
    }

    /// Name, or the empty string for an unnamed grid.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// `true` when this grid holds a single dataset.
    pub fn is_leaf(&self) -> bool {
        self.kind.is_some_and(GridKind::is_uniform)
    }

    /// `true` for a leaf whose topology has explicit connectivity.
    pub fn is_unstructured(&self) -> bool {
        self.is_leaf()
            && self
                .topology
                .as_ref()
                .is_some_and(|t| t.class() == TopologyClass::Unstructured)
    }

    /// `true` when this grid or a descendant defines a non-ghost set.
    pub fn has_sets(&self) -> bool {
        self.sets.iter().any(|s| !s.is_ghost()) || self.children.iter().any(Self::has_sets)
    }

    /// Heavy arrays read when this grid is assembled.
    pub fn array_refs(&self) -> Vec<&ArrayRef> {
        let mut refs: Vec<&ArrayRef> = Vec::new();
        if let Some(c) = self.topology.as_ref().and_then(|t| t.connectivity.as_ref()) {
            refs.push(c);
        }
        if let Some(g) = &self.geometry {
            refs.extend(g.array_refs());
        }
        refs.extend(self.attributes.iter().map(|a| &a.values));
        for set in &self.sets {
            refs.extend(set.array_refs());
        }
        refs
    }
}

/// Top-level container of grids.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Domain {
    grids: Vec<GridDescriptor>,
}

impl Domain {
    /// Take ownership of `grids`, naming unnamed ones `Grid_<n>`.
    ///
    /// `n` counts every grid of the forest in pre-order, named or not.
    pub fn new(mut grids: Vec<GridDescriptor>) -> Self {
        let mut counter = 0usize;
        for grid in &mut grids {
            assign_names(grid, &mut counter);
        }
        Self { grids }
    }

    pub fn grids(&self) -> &[GridDescriptor] {
        &self.grids
    }

    pub fn grid(&self, index: usize) -> Option<&GridDescriptor> {
        self.grids.get(index)
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// `true` when any grid defines a non-ghost set.
    pub fn has_sets(&self) -> bool {
        self.grids.iter().any(GridDescriptor::has_sets)
    }

    /// `true` when the domain holds exactly one grid and it is an
    /// unstructured leaf.
    pub fn is_single_unstructured(&self) -> bool {
        self.grids.len() == 1 && self.grids[0].is_unstructured()
    }
}

fn assign_names(grid: &mut GridDescriptor, counter: &mut usize) {
    if grid.name.as_deref().is_none_or(str::is_empty) {
        grid.name = Some(format!("Grid_{counter}"));
    }
    *counter += 1;
    for child in &mut grid.children {
        assign_names(child, counter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: Option<&str>) -> GridDescriptor {
        let mut g = GridDescriptor::uniform(
            "",
            TopologyDescriptor::unstructured(TopologyType::Triangle, 1, "c"),
            GeometryDescriptor::xyz("p"),
        );
        g.name = name.map(str::to_string);
        g
    }

    #[test]
    fn unnamed_grids_get_preorder_names() {
        let mut tree = GridDescriptor::tree("", vec![leaf(None), leaf(Some("keep"))]);
        tree.name = None;
        let domain = Domain::new(vec![tree, leaf(None)]);
        let root = domain.grid(0).unwrap();
        assert_eq!(root.name(), "Grid_0");
        assert_eq!(root.children[0].name(), "Grid_1");
        assert_eq!(root.children[1].name(), "keep");
        assert_eq!(domain.grid(1).unwrap().name(), "Grid_3");
    }

    #[test]
    fn ghost_sets_do_not_count_as_sets() {
        let g = leaf(Some("a")).with_set(SetDescriptor::ghost("g", SetKind::Node, 1, "ids"));
        assert!(!g.has_sets());
        let g = g.with_set(SetDescriptor::new("s", SetKind::Cell, "ids"));
        assert!(g.has_sets());
    }

    #[test]
    fn single_unstructured_domain() {
        assert!(Domain::new(vec![leaf(Some("a"))]).is_single_unstructured());
        assert!(!Domain::new(vec![leaf(Some("a")), leaf(Some("b"))]).is_single_unstructured());
        let image = GridDescriptor::uniform(
            "i",
            TopologyDescriptor::structured(TopologyType::CoRectMesh3D, vec![2, 2, 2]),
            GeometryDescriptor::origin_spacing(vec![0.0; 3], vec![1.0; 3]),
        );
        assert!(!Domain::new(vec![image]).is_single_unstructured());
    }

    #[test]
    fn collection_kind_defaults_to_spatial() {
        assert_eq!(GridKind::collection(CollectionKind::Unset), GridKind::SpatialCollection);
        assert_eq!("Collection".parse::<GridKind>().unwrap(), GridKind::SpatialCollection);
        assert!("Blob".parse::<GridKind>().is_err());
    }
}
