//! Geometry descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::io::heavy::ArrayRef;

/// How point coordinates are given.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum GeometryKind {
    NoGeometry,
    /// Interleaved `(x, y, z)` triples.
    Xyz,
    /// Interleaved `(x, y)` pairs.
    Xy,
    /// One array per coordinate, one value per point.
    XYZSeparate,
    /// One coordinate vector per axis; points are their tensor product.
    VxVyVz,
    VxVy,
    /// Origin and per-axis spacing.
    OriginDxDyDz,
    OriginDxDy,
}

impl GeometryKind {
    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::NoGeometry => "NONE",
            GeometryKind::Xyz => "XYZ",
            GeometryKind::Xy => "XY",
            GeometryKind::XYZSeparate => "X_Y_Z",
            GeometryKind::VxVyVz => "VXVYVZ",
            GeometryKind::VxVy => "VXVY",
            GeometryKind::OriginDxDyDz => "ORIGIN_DXDYDZ",
            GeometryKind::OriginDxDy => "ORIGIN_DXDY",
        }
    }

    pub fn is_origin_spacing(self) -> bool {
        matches!(self, GeometryKind::OriginDxDyDz | GeometryKind::OriginDxDy)
    }

    pub fn is_vectors(self) -> bool {
        matches!(self, GeometryKind::VxVyVz | GeometryKind::VxVy)
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Geometry of one uniform grid.
///
/// `origin` and `spacing` are stored in light-data axis order (slowest axis
/// first), like the topology shape.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryDescriptor {
    pub kind: GeometryKind,
    /// Interleaved point array (`Xyz`, `Xy`).
    pub points: Option<ArrayRef>,
    /// Per-axis arrays in `x, y, z` order (`XYZSeparate`, `VxVyVz`, `VxVy`).
    pub vectors: Vec<ArrayRef>,
    pub origin: Vec<f64>,
    pub spacing: Vec<f64>,
}

impl GeometryDescriptor {
    fn empty(kind: GeometryKind) -> Self {
        Self {
            kind,
            points: None,
            vectors: Vec::new(),
            origin: Vec::new(),
            spacing: Vec::new(),
        }
    }

    pub fn xyz(points: impl Into<ArrayRef>) -> Self {
        Self {
            points: Some(points.into()),
            ..Self::empty(GeometryKind::Xyz)
        }
    }

    pub fn xy(points: impl Into<ArrayRef>) -> Self {
        Self {
            points: Some(points.into()),
            ..Self::empty(GeometryKind::Xy)
        }
    }

    pub fn separate(x: impl Into<ArrayRef>, y: impl Into<ArrayRef>, z: impl Into<ArrayRef>) -> Self {
        Self {
            vectors: vec![x.into(), y.into(), z.into()],
            ..Self::empty(GeometryKind::XYZSeparate)
        }
    }

    pub fn vectors(vx: impl Into<ArrayRef>, vy: impl Into<ArrayRef>, vz: impl Into<ArrayRef>) -> Self {
        Self {
            vectors: vec![vx.into(), vy.into(), vz.into()],
            ..Self::empty(GeometryKind::VxVyVz)
        }
    }

    pub fn vectors_2d(vx: impl Into<ArrayRef>, vy: impl Into<ArrayRef>) -> Self {
        Self {
            vectors: vec![vx.into(), vy.into()],
            ..Self::empty(GeometryKind::VxVy)
        }
    }

    /// Origin and spacing, slowest axis first; two entries make a 2D grid.
    pub fn origin_spacing(origin: Vec<f64>, spacing: Vec<f64>) -> Self {
        let kind = if origin.len() == 2 {
            GeometryKind::OriginDxDy
        } else {
            GeometryKind::OriginDxDyDz
        };
        Self {
            origin,
            spacing,
            ..Self::empty(kind)
        }
    }

    /// Vector for axis `axis` (`0` = x).
    pub fn vector(&self, axis: usize) -> Option<&ArrayRef> {
        self.vectors.get(axis)
    }

    /// Origin reordered to output `x, y, z`; missing axes are `0`.
    pub fn output_origin(&self) -> [f64; 3] {
        reorder(&self.origin, 0.0)
    }

    /// Spacing reordered to output `x, y, z`; missing axes are `1`.
    pub fn output_spacing(&self) -> [f64; 3] {
        reorder(&self.spacing, 1.0)
    }

    /// Heavy arrays this geometry refers to.
    pub fn array_refs(&self) -> impl Iterator<Item = &ArrayRef> {
        self.points.iter().chain(self.vectors.iter())
    }
}

/// Output axis `i` takes light entry `len - 1 - i`.
fn reorder(light: &[f64], missing: f64) -> [f64; 3] {
    let mut out = [missing; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        if i < light.len() {
            *slot = light[light.len() - 1 - i];
        }
    }
    out
}
