//! Cell kinds of the output meshes.
//!
//! Numbering and local point ordering follow the VTK conventions, so the
//! face and edge tables below index directly into a cell's point list.

/// Output cell kinds.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CellType {
    /// 0D vertex.
    Vertex,
    /// Any number of unconnected vertices.
    PolyVertex,
    /// 1D segment.
    Line,
    /// Chain of segments.
    PolyLine,
    Triangle,
    /// 2D polygon with any number of vertices.
    Polygon,
    Quad,
    Tetra,
    Hexahedron,
    Wedge,
    Pyramid,
    QuadraticEdge,
    QuadraticTriangle,
    QuadraticQuad,
    BiquadraticQuad,
    QuadraticTetra,
    QuadraticPyramid,
    QuadraticWedge,
    BiquadraticQuadraticWedge,
    QuadraticHexahedron,
    BiquadraticQuadraticHexahedron,
    TriquadraticHexahedron,
}

impl Default for CellType {
    fn default() -> Self {
        CellType::Vertex
    }
}

const TETRA_FACES: [&[usize]; 4] = [&[0, 1, 3], &[1, 2, 3], &[2, 0, 3], &[0, 2, 1]];
const HEXAHEDRON_FACES: [&[usize]; 6] = [
    &[0, 4, 7, 3],
    &[1, 2, 6, 5],
    &[0, 1, 5, 4],
    &[3, 7, 6, 2],
    &[0, 3, 2, 1],
    &[4, 5, 6, 7],
];
const WEDGE_FACES: [&[usize]; 5] = [
    &[0, 1, 2],
    &[3, 5, 4],
    &[0, 3, 4, 1],
    &[1, 4, 5, 2],
    &[2, 5, 3, 0],
];
const PYRAMID_FACES: [&[usize]; 5] = [
    &[0, 3, 2, 1],
    &[0, 1, 4],
    &[1, 2, 4],
    &[2, 3, 4],
    &[3, 0, 4],
];

const TETRA_EDGES: [[usize; 2]; 6] = [[0, 1], [1, 2], [2, 0], [0, 3], [1, 3], [2, 3]];
const HEXAHEDRON_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [3, 2],
    [0, 3],
    [4, 5],
    [5, 6],
    [7, 6],
    [4, 7],
    [0, 4],
    [1, 5],
    [3, 7],
    [2, 6],
];
const WEDGE_EDGES: [[usize; 2]; 9] = [
    [0, 1],
    [1, 2],
    [2, 0],
    [3, 4],
    [4, 5],
    [5, 3],
    [0, 3],
    [1, 4],
    [2, 5],
];
const PYRAMID_EDGES: [[usize; 2]; 8] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [0, 4],
    [1, 4],
    [2, 4],
    [3, 4],
];

impl CellType {
    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> u8 {
        match self {
            CellType::Vertex | CellType::PolyVertex => 0,
            CellType::Line | CellType::PolyLine | CellType::QuadraticEdge => 1,
            CellType::Triangle
            | CellType::Polygon
            | CellType::Quad
            | CellType::QuadraticTriangle
            | CellType::QuadraticQuad
            | CellType::BiquadraticQuad => 2,
            _ => 3,
        }
    }

    /// VTK cell type id.
    pub fn vtk_id(self) -> u8 {
        match self {
            CellType::Vertex => 1,
            CellType::PolyVertex => 2,
            CellType::Line => 3,
            CellType::PolyLine => 4,
            CellType::Triangle => 5,
            CellType::Polygon => 7,
            CellType::Quad => 9,
            CellType::Tetra => 10,
            CellType::Hexahedron => 12,
            CellType::Wedge => 13,
            CellType::Pyramid => 14,
            CellType::QuadraticEdge => 21,
            CellType::QuadraticTriangle => 22,
            CellType::QuadraticQuad => 23,
            CellType::QuadraticTetra => 24,
            CellType::QuadraticHexahedron => 25,
            CellType::QuadraticWedge => 26,
            CellType::QuadraticPyramid => 27,
            CellType::BiquadraticQuad => 28,
            CellType::TriquadraticHexahedron => 29,
            CellType::BiquadraticQuadraticWedge => 32,
            CellType::BiquadraticQuadraticHexahedron => 33,
        }
    }

    /// Fixed number of points, or `None` for the variable-size kinds
    /// (poly-vertex, poly-line, polygon).
    pub fn point_count(self) -> Option<usize> {
        match self {
            CellType::PolyVertex | CellType::PolyLine | CellType::Polygon => None,
            CellType::Vertex => Some(1),
            CellType::Line => Some(2),
            CellType::Triangle | CellType::QuadraticEdge => Some(3),
            CellType::Quad | CellType::Tetra => Some(4),
            CellType::Pyramid => Some(5),
            CellType::Wedge | CellType::QuadraticTriangle => Some(6),
            CellType::Hexahedron | CellType::QuadraticQuad => Some(8),
            CellType::BiquadraticQuad => Some(9),
            CellType::QuadraticTetra => Some(10),
            CellType::QuadraticPyramid => Some(13),
            CellType::QuadraticWedge => Some(15),
            CellType::BiquadraticQuadraticWedge => Some(18),
            CellType::QuadraticHexahedron => Some(20),
            CellType::BiquadraticQuadraticHexahedron => Some(24),
            CellType::TriquadraticHexahedron => Some(27),
        }
    }

    pub fn is_variable_size(self) -> bool {
        self.point_count().is_none()
    }

    /// Number of 2D faces bounding a linear 3D cell.
    pub fn number_of_faces(self) -> usize {
        self.faces().map_or(0, |f| f.len())
    }

    fn faces(self) -> Option<&'static [&'static [usize]]> {
        match self {
            CellType::Tetra => Some(&TETRA_FACES),
            CellType::Hexahedron => Some(&HEXAHEDRON_FACES),
            CellType::Wedge => Some(&WEDGE_FACES),
            CellType::Pyramid => Some(&PYRAMID_FACES),
            _ => None,
        }
    }

    /// Local point indices of face `face`, or `None` when the cell has no
    /// such face (2D, 1D and 0D cells have none).
    pub fn face(self, face: usize) -> Option<&'static [usize]> {
        self.faces().and_then(|f| f.get(face).copied())
    }

    /// Local point indices of edge `edge` of a linear cell.
    ///
    /// Polygons (and the fixed 2D kinds) close their boundary: edge `k` joins
    /// point `k` to point `k + 1 mod n`.
    pub fn edge(self, edge: usize, point_count: usize) -> Option<[usize; 2]> {
        let table: &[[usize; 2]] = match self {
            CellType::Tetra => &TETRA_EDGES,
            CellType::Hexahedron => &HEXAHEDRON_EDGES,
            CellType::Wedge => &WEDGE_EDGES,
            CellType::Pyramid => &PYRAMID_EDGES,
            CellType::Line => &[[0, 1]],
            CellType::Triangle | CellType::Quad | CellType::Polygon => {
                return (point_count >= 2 && edge < point_count)
                    .then(|| [edge, (edge + 1) % point_count]);
            }
            _ => return None,
        };
        table.get(edge).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_kinds_have_no_point_count() {
        assert!(CellType::Polygon.is_variable_size());
        assert!(CellType::PolyLine.is_variable_size());
        assert!(CellType::PolyVertex.is_variable_size());
        assert_eq!(CellType::Triangle.point_count(), Some(3));
        assert_eq!(CellType::QuadraticEdge.point_count(), Some(3));
        assert_eq!(CellType::Hexahedron.point_count(), Some(8));
    }

    #[test]
    fn hexahedron_faces_are_quads_covering_all_points() {
        let mut seen = [0usize; 8];
        for f in 0..CellType::Hexahedron.number_of_faces() {
            let face = CellType::Hexahedron.face(f).unwrap();
            assert_eq!(face.len(), 4);
            for &p in face {
                seen[p] += 1;
            }
        }
        // every corner touches three faces
        assert!(seen.iter().all(|&n| n == 3));
        assert!(CellType::Hexahedron.face(6).is_none());
        assert!(CellType::Quad.face(0).is_none());
    }

    #[test]
    fn polygon_edges_wrap() {
        assert_eq!(CellType::Polygon.edge(4, 5), Some([4, 0]));
        assert_eq!(CellType::Quad.edge(4, 4), None);
    }
}
