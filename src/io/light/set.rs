//! Set descriptors: named subsets and ghost markings.

use serde::{Deserialize, Serialize};

use crate::io::heavy::ArrayRef;
use crate::io::light::attribute::AttributeDescriptor;

/// What the ids of a set index.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum SetKind {
    Node,
    Cell,
    Face,
    Edge,
}

/// A subset of a grid's points, cells, faces or edges.
///
/// A nonzero `ghost` turns the set into a ghost marking: its ids receive
/// ghost level `ghost` instead of being extracted.
///
/// Face sets pair `cell_ids[i]` with face `ids[i]` of that cell. Edge sets
/// take edge `ids[i]` of face `face_ids[i]` of cell `cell_ids[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct SetDescriptor {
    pub name: String,
    pub kind: SetKind,
    pub ghost: i32,
    pub ids: ArrayRef,
    pub cell_ids: Option<ArrayRef>,
    pub face_ids: Option<ArrayRef>,
    pub attributes: Vec<AttributeDescriptor>,
}

impl SetDescriptor {
    pub fn new(name: impl Into<String>, kind: SetKind, ids: impl Into<ArrayRef>) -> Self {
        Self {
            name: name.into(),
            kind,
            ghost: 0,
            ids: ids.into(),
            cell_ids: None,
            face_ids: None,
            attributes: Vec::new(),
        }
    }

    /// Ghost marking of level `level` over `ids`.
    pub fn ghost(
        name: impl Into<String>,
        kind: SetKind,
        level: i32,
        ids: impl Into<ArrayRef>,
    ) -> Self {
        Self {
            ghost: level,
            ..Self::new(name, kind, ids)
        }
    }

    pub fn faces(
        name: impl Into<String>,
        cell_ids: impl Into<ArrayRef>,
        face_ids: impl Into<ArrayRef>,
    ) -> Self {
        Self {
            cell_ids: Some(cell_ids.into()),
            ..Self::new(name, SetKind::Face, face_ids)
        }
    }

    pub fn edges(
        name: impl Into<String>,
        cell_ids: impl Into<ArrayRef>,
        face_ids: impl Into<ArrayRef>,
        edge_ids: impl Into<ArrayRef>,
    ) -> Self {
        Self {
            cell_ids: Some(cell_ids.into()),
            face_ids: Some(face_ids.into()),
            ..Self::new(name, SetKind::Edge, edge_ids)
        }
    }

    pub fn with_attribute(mut self, attribute: AttributeDescriptor) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn is_ghost(&self) -> bool {
        self.ghost != 0
    }

    /// Heavy arrays this set refers to, attributes included.
    pub fn array_refs(&self) -> impl Iterator<Item = &ArrayRef> {
        std::iter::once(&self.ids)
            .chain(self.cell_ids.iter())
            .chain(self.face_ids.iter())
            .chain(self.attributes.iter().map(|a| &a.values))
    }
}
