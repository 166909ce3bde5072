//! Topology descriptors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::io::heavy::ArrayRef;
use crate::mesh_error::XdmfError;
use crate::topology::cell_type::CellType;

/// Topology types of the light-data model.
///
/// The numeric codes are the ones written into mixed connectivity streams.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum TopologyType {
    NoTopology,
    PolyVertex,
    PolyLine,
    Polygon,
    Triangle,
    Quadrilateral,
    Tetrahedron,
    Pyramid,
    Wedge,
    Hexahedron,
    Edge3,
    Quadrilateral9,
    Triangle6,
    Quadrilateral8,
    Tetrahedron10,
    Pyramid13,
    Wedge15,
    Wedge18,
    Hexahedron20,
    Hexahedron24,
    Hexahedron27,
    Mixed,
    SMesh2D,
    RectMesh2D,
    CoRectMesh2D,
    SMesh3D,
    RectMesh3D,
    CoRectMesh3D,
}

/// Whether connectivity is implicit in a lattice or explicit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TopologyClass {
    Structured,
    Unstructured,
}

/// Which structured assembler a lattice topology is read with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StructuredKind {
    /// Explicit points on a lattice (`SMesh`).
    Curvilinear,
    /// Per-axis coordinate vectors (`RectMesh`).
    Rectilinear,
    /// Origin and uniform spacing (`CoRectMesh`).
    Image,
}

impl TopologyType {
    /// Stream code of this type.
    pub fn code(self) -> i64 {
        match self {
            TopologyType::NoTopology => 0x0,
            TopologyType::PolyVertex => 0x1,
            TopologyType::PolyLine => 0x2,
            TopologyType::Polygon => 0x3,
            TopologyType::Triangle => 0x4,
            TopologyType::Quadrilateral => 0x5,
            TopologyType::Tetrahedron => 0x6,
            TopologyType::Pyramid => 0x7,
            TopologyType::Wedge => 0x8,
            TopologyType::Hexahedron => 0x9,
            TopologyType::Edge3 => 0x22,
            TopologyType::Quadrilateral9 => 0x23,
            TopologyType::Triangle6 => 0x24,
            TopologyType::Quadrilateral8 => 0x25,
            TopologyType::Tetrahedron10 => 0x26,
            TopologyType::Pyramid13 => 0x27,
            TopologyType::Wedge15 => 0x28,
            TopologyType::Wedge18 => 0x29,
            TopologyType::Hexahedron20 => 0x30,
            TopologyType::Hexahedron24 => 0x31,
            TopologyType::Hexahedron27 => 0x32,
            TopologyType::Mixed => 0x70,
            TopologyType::SMesh2D => 0x100,
            TopologyType::RectMesh2D => 0x101,
            TopologyType::CoRectMesh2D => 0x102,
            TopologyType::SMesh3D => 0x1000,
            TopologyType::RectMesh3D => 0x1001,
            TopologyType::CoRectMesh3D => 0x1002,
        }
    }

    /// Cell type listed under stream code `code` in a mixed stream.
    ///
    /// Only element types can appear; lattice and mixed codes yield `None`.
    pub fn from_cell_code(code: i64) -> Option<TopologyType> {
        Some(match code {
            0x1 => TopologyType::PolyVertex,
            0x2 => TopologyType::PolyLine,
            0x3 => TopologyType::Polygon,
            0x4 => TopologyType::Triangle,
            0x5 => TopologyType::Quadrilateral,
            0x6 => TopologyType::Tetrahedron,
            0x7 => TopologyType::Pyramid,
            0x8 => TopologyType::Wedge,
            0x9 => TopologyType::Hexahedron,
            0x22 => TopologyType::Edge3,
            0x23 => TopologyType::Quadrilateral9,
            0x24 => TopologyType::Triangle6,
            0x25 => TopologyType::Quadrilateral8,
            0x26 => TopologyType::Tetrahedron10,
            0x27 => TopologyType::Pyramid13,
            0x28 => TopologyType::Wedge15,
            0x29 => TopologyType::Wedge18,
            0x30 => TopologyType::Hexahedron20,
            0x31 => TopologyType::Hexahedron24,
            0x32 => TopologyType::Hexahedron27,
            _ => return None,
        })
    }

    /// Output cell kind of an element type.
    pub fn cell_type(self) -> Option<CellType> {
        Some(match self {
            TopologyType::PolyVertex => CellType::PolyVertex,
            TopologyType::PolyLine => CellType::PolyLine,
            TopologyType::Polygon => CellType::Polygon,
            TopologyType::Triangle => CellType::Triangle,
            TopologyType::Quadrilateral => CellType::Quad,
            TopologyType::Tetrahedron => CellType::Tetra,
            TopologyType::Pyramid => CellType::Pyramid,
            TopologyType::Wedge => CellType::Wedge,
            TopologyType::Hexahedron => CellType::Hexahedron,
            TopologyType::Edge3 => CellType::QuadraticEdge,
            TopologyType::Quadrilateral9 => CellType::BiquadraticQuad,
            TopologyType::Triangle6 => CellType::QuadraticTriangle,
            TopologyType::Quadrilateral8 => CellType::QuadraticQuad,
            TopologyType::Tetrahedron10 => CellType::QuadraticTetra,
            TopologyType::Pyramid13 => CellType::QuadraticPyramid,
            TopologyType::Wedge15 => CellType::QuadraticWedge,
            TopologyType::Wedge18 => CellType::BiquadraticQuadraticWedge,
            TopologyType::Hexahedron20 => CellType::QuadraticHexahedron,
            TopologyType::Hexahedron24 => CellType::BiquadraticQuadraticHexahedron,
            TopologyType::Hexahedron27 => CellType::TriquadraticHexahedron,
            _ => return None,
        })
    }

    pub fn class(self) -> TopologyClass {
        match self.structured_kind() {
            Some(_) => TopologyClass::Structured,
            None => TopologyClass::Unstructured,
        }
    }

    pub fn structured_kind(self) -> Option<StructuredKind> {
        match self {
            TopologyType::SMesh2D | TopologyType::SMesh3D => Some(StructuredKind::Curvilinear),
            TopologyType::RectMesh2D | TopologyType::RectMesh3D => {
                Some(StructuredKind::Rectilinear)
            }
            TopologyType::CoRectMesh2D | TopologyType::CoRectMesh3D => Some(StructuredKind::Image),
            _ => None,
        }
    }

    /// Light-data name, as it appears in a `TopologyType` attribute.
    pub fn name(self) -> &'static str {
        match self {
            TopologyType::NoTopology => "NoTopology",
            TopologyType::PolyVertex => "Polyvertex",
            TopologyType::PolyLine => "Polyline",
            TopologyType::Polygon => "Polygon",
            TopologyType::Triangle => "Triangle",
            TopologyType::Quadrilateral => "Quadrilateral",
            TopologyType::Tetrahedron => "Tetrahedron",
            TopologyType::Pyramid => "Pyramid",
            TopologyType::Wedge => "Wedge",
            TopologyType::Hexahedron => "Hexahedron",
            TopologyType::Edge3 => "Edge_3",
            TopologyType::Quadrilateral9 => "Quadrilateral_9",
            TopologyType::Triangle6 => "Triangle_6",
            TopologyType::Quadrilateral8 => "Quadrilateral_8",
            TopologyType::Tetrahedron10 => "Tetrahedron_10",
            TopologyType::Pyramid13 => "Pyramid_13",
            TopologyType::Wedge15 => "Wedge_15",
            TopologyType::Wedge18 => "Wedge_18",
            TopologyType::Hexahedron20 => "Hexahedron_20",
            TopologyType::Hexahedron24 => "Hexahedron_24",
            TopologyType::Hexahedron27 => "Hexahedron_27",
            TopologyType::Mixed => "Mixed",
            TopologyType::SMesh2D => "2DSMesh",
            TopologyType::RectMesh2D => "2DRectMesh",
            TopologyType::CoRectMesh2D => "2DCoRectMesh",
            TopologyType::SMesh3D => "3DSMesh",
            TopologyType::RectMesh3D => "3DRectMesh",
            TopologyType::CoRectMesh3D => "3DCoRectMesh",
        }
    }
}

impl fmt::Display for TopologyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TopologyType {
    type Err = XdmfError;

    /// Case-insensitive; accepts the `Edge_3`/`Edge3` spellings alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| *c != '_').collect();
        ALL_TOPOLOGY_TYPES
            .iter()
            .copied()
            .find(|t| {
                let name: String = t.name().chars().filter(|c| *c != '_').collect();
                name.eq_ignore_ascii_case(&wanted)
            })
            .ok_or_else(|| XdmfError::UnknownTopology(s.to_string()))
    }
}

const ALL_TOPOLOGY_TYPES: [TopologyType; 28] = [
    TopologyType::NoTopology,
    TopologyType::PolyVertex,
    TopologyType::PolyLine,
    TopologyType::Polygon,
    TopologyType::Triangle,
    TopologyType::Quadrilateral,
    TopologyType::Tetrahedron,
    TopologyType::Pyramid,
    TopologyType::Wedge,
    TopologyType::Hexahedron,
    TopologyType::Edge3,
    TopologyType::Quadrilateral9,
    TopologyType::Triangle6,
    TopologyType::Quadrilateral8,
    TopologyType::Tetrahedron10,
    TopologyType::Pyramid13,
    TopologyType::Wedge15,
    TopologyType::Wedge18,
    TopologyType::Hexahedron20,
    TopologyType::Hexahedron24,
    TopologyType::Hexahedron27,
    TopologyType::Mixed,
    TopologyType::SMesh2D,
    TopologyType::RectMesh2D,
    TopologyType::CoRectMesh2D,
    TopologyType::SMesh3D,
    TopologyType::RectMesh3D,
    TopologyType::CoRectMesh3D,
];

/// Topology of one uniform grid.
#[derive(Clone, Debug, PartialEq)]
pub struct TopologyDescriptor {
    pub topology_type: TopologyType,
    /// Declared points per cell; `0` means variable (mixed streams).
    pub nodes_per_element: usize,
    pub number_of_elements: usize,
    /// Lattice point counts, slowest axis first (`z, y, x`).
    pub shape: Vec<usize>,
    pub connectivity: Option<ArrayRef>,
}

impl TopologyDescriptor {
    /// Explicit-connectivity topology.
    ///
    /// Nodes per element default to the cell kind's point count.
    pub fn unstructured(
        topology_type: TopologyType,
        number_of_elements: usize,
        connectivity: impl Into<ArrayRef>,
    ) -> Self {
        let nodes_per_element = topology_type
            .cell_type()
            .and_then(CellType::point_count)
            .unwrap_or(0);
        Self {
            topology_type,
            nodes_per_element,
            number_of_elements,
            shape: vec![number_of_elements],
            connectivity: Some(connectivity.into()),
        }
    }

    /// Lattice topology with `shape` points, slowest axis first.
    pub fn structured(topology_type: TopologyType, shape: Vec<usize>) -> Self {
        let cells = shape.iter().map(|&n| n.saturating_sub(1).max(1)).product();
        Self {
            topology_type,
            nodes_per_element: 0,
            number_of_elements: cells,
            shape,
            connectivity: None,
        }
    }

    pub fn with_nodes_per_element(mut self, nodes_per_element: usize) -> Self {
        self.nodes_per_element = nodes_per_element;
        self
    }

    pub fn class(&self) -> TopologyClass {
        self.topology_type.class()
    }

    /// Number of lattice axes.
    pub fn dimensionality(&self) -> usize {
        self.shape.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_resolve_to_cell_kinds() {
        for code in [0x1, 0x2, 0x3, 0x4, 0x5, 0x6, 0x7, 0x8, 0x9] {
            let t = TopologyType::from_cell_code(code).unwrap();
            assert_eq!(t.code(), code);
            assert!(t.cell_type().is_some());
        }
        for code in 0x22..=0x32 {
            if let Some(t) = TopologyType::from_cell_code(code) {
                assert_eq!(t.code(), code);
            }
        }
        assert_eq!(
            TopologyType::from_cell_code(0x30).and_then(TopologyType::cell_type),
            Some(CellType::QuadraticHexahedron)
        );
        assert!(TopologyType::from_cell_code(0x70).is_none());
        assert!(TopologyType::from_cell_code(0x1002).is_none());
    }

    #[test]
    fn names_parse_back() {
        for t in ALL_TOPOLOGY_TYPES {
            assert_eq!(t.name().parse::<TopologyType>().unwrap(), t);
        }
        assert_eq!("hexahedron".parse::<TopologyType>().unwrap(), TopologyType::Hexahedron);
        assert!("Octahedron".parse::<TopologyType>().is_err());
    }

    #[test]
    fn lattice_types_are_structured() {
        assert_eq!(TopologyType::CoRectMesh3D.class(), TopologyClass::Structured);
        assert_eq!(TopologyType::SMesh2D.structured_kind(), Some(StructuredKind::Curvilinear));
        assert_eq!(TopologyType::Mixed.class(), TopologyClass::Unstructured);
    }

    #[test]
    fn default_nodes_per_element() {
        let t = TopologyDescriptor::unstructured(TopologyType::Wedge, 3, "c");
        assert_eq!(t.nodes_per_element, 6);
        let m = TopologyDescriptor::unstructured(TopologyType::Mixed, 3, "c");
        assert_eq!(m.nodes_per_element, 0);
    }
}
