//! Unstructured assembly: connectivity decoding for fixed-type and mixed
//! topologies.
//!
//! A mixed stream is self-describing. Each cell starts with its type code;
//! fixed-size kinds are followed by their points, while poly-vertex,
//! poly-line and polygon cells are followed by a point count and then that
//! many points:
//!
//! ```text
//! 0x6 p0 p1 p2 p3      tetrahedron
//! 0x3 5 p0 p1 p2 p3 p4 pentagon
//! ```

use crate::io::light::{GridDescriptor, TopologyDescriptor, TopologyType};
use crate::io::xdmf::HeavyDataReader;
use crate::mesh::UnstructuredMesh;
use crate::mesh_error::XdmfError;
use crate::topology::cell_array::CellArray;
use crate::topology::cell_type::CellType;

/// Cells decoded from a mixed stream.
#[derive(Clone, Debug, PartialEq)]
pub struct MixedCells {
    pub cell_types: Vec<CellType>,
    pub cells: CellArray,
    /// Stream entries read, codes and counts included.
    pub consumed: usize,
}

/// Decode `number_of_cells` cells from a mixed connectivity stream.
///
/// Any unknown code aborts the whole decode; a corrupted stream cannot be
/// resynchronized.
pub fn decode_mixed(stream: &[i64], number_of_cells: usize) -> Result<MixedCells, XdmfError> {
    // every cell takes at least one stream entry
    let reserve = number_of_cells.min(stream.len());
    let mut cell_types = Vec::with_capacity(reserve);
    let mut cells = CellArray::with_capacity(reserve, stream.len());
    let mut pos = 0usize;
    while cell_types.len() < number_of_cells {
        let truncated = XdmfError::TruncatedMixedStream {
            decoded: cell_types.len(),
            expected: number_of_cells,
        };
        let code = *stream.get(pos).ok_or_else(|| truncated.clone())?;
        let kind = TopologyType::from_cell_code(code)
            .and_then(TopologyType::cell_type)
            .ok_or(XdmfError::UnknownCellCode { code, offset: pos })?;
        pos += 1;
        let count = match kind.point_count() {
            Some(count) => count,
            None => {
                let size = *stream.get(pos).ok_or_else(|| truncated.clone())?;
                let count = usize::try_from(size)
                    .map_err(|_| XdmfError::InvalidCellSize { size, offset: pos })?;
                pos += 1;
                count
            }
        };
        let end = pos.checked_add(count).ok_or_else(|| truncated.clone())?;
        let points = stream.get(pos..end).ok_or(truncated)?;
        cells.push_cell(points);
        cell_types.push(kind);
        pos += count;
    }
    cells.shrink_to_fit();
    Ok(MixedCells {
        cell_types,
        cells,
        consumed: pos,
    })
}

/// Split a flat stream into `number_of_cells` cells of `nodes_per_element`
/// points each. Entries past the last cell are dropped.
pub fn decode_fixed(
    mut stream: Vec<i64>,
    number_of_cells: usize,
    nodes_per_element: usize,
) -> Result<CellArray, XdmfError> {
    let expected = number_of_cells
        .checked_mul(nodes_per_element)
        .ok_or(XdmfError::ShortConnectivity {
            expected: usize::MAX,
            actual: stream.len(),
        })?;
    if nodes_per_element == 0 || stream.len() < expected {
        return Err(XdmfError::ShortConnectivity {
            expected: expected.max(number_of_cells),
            actual: stream.len(),
        });
    }
    stream.truncate(expected);
    Ok(CellArray::from_fixed(stream, nodes_per_element))
}

impl HeavyDataReader<'_> {
    pub(crate) fn read_unstructured(
        &self,
        grid: &GridDescriptor,
        topology: &TopologyDescriptor,
    ) -> Result<UnstructuredMesh, XdmfError> {
        let connectivity = topology.connectivity.as_ref().ok_or_else(|| {
            XdmfError::MissingArray(format!("connectivity of grid `{}`", grid.name()))
        })?;
        let number_of_cells = topology.number_of_elements;
        let (cell_types, cells) = if topology.topology_type == TopologyType::Mixed {
            let heavy = self.arrays().read_all(connectivity)?;
            let stream = heavy.data.to_i64_vec(connectivity.as_str())?;
            let decoded = decode_mixed(&stream, number_of_cells)?;
            log::trace!(
                "mixed connectivity `{connectivity}`: {} of {} entries used",
                decoded.consumed,
                stream.len()
            );
            (decoded.cell_types, decoded.cells)
        } else {
            let kind = topology
                .topology_type
                .cell_type()
                .ok_or_else(|| XdmfError::UnknownTopology(topology.topology_type.to_string()))?;
            let heavy = self.arrays().read_all(connectivity)?;
            let nodes_per_element = if heavy.rank() >= 2 {
                heavy.shape[1]
            } else {
                topology.nodes_per_element
            };
            let stream = heavy.data.to_i64_vec(connectivity.as_str())?;
            let cells = decode_fixed(stream, number_of_cells, nodes_per_element)?;
            (vec![kind; number_of_cells], cells)
        };

        let geometry = grid.geometry.as_ref().ok_or_else(|| XdmfError::UnsupportedGeometry {
            geometry: "NONE".to_string(),
            assembler: "unstructured",
        })?;
        let mut mesh = UnstructuredMesh {
            points: self.read_points(geometry, None)?,
            cell_types,
            cells,
            ..UnstructuredMesh::default()
        };
        self.read_attributes(&mut mesh, &grid.attributes, topology.dimensionality(), None);
        Ok(mesh)
    }
}
