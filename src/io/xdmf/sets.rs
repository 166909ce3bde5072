//! Set extraction.
//!
//! Every non-ghost set of a grid becomes one named composite slot next to
//! the grid's own dataset. A set disabled in the selections keeps its named
//! slot, left empty.
//!
//! - Node sets: a poly-vertex mesh of the listed points, copied by value.
//! - Cell sets: an unstructured mesh of the listed cells.
//! - Face sets: a polygonal mesh of the listed cell faces.
//! - Edge sets: line cells for the listed face edges.

use crate::algs::point_merge::PointMerger;
use crate::algs::submesh::extract_cells;
use crate::data::array::DataArray;
use crate::data::points::Points;
use crate::io::heavy::ArrayRef;
use crate::io::light::{Center, SetDescriptor, SetKind};
use crate::io::xdmf::HeavyDataReader;
use crate::io::xdmf::attribute::add_to_bucket;
use crate::mesh::{Block, DataSet, MeshOutput, PolyData, UnstructuredMesh};
use crate::mesh_error::XdmfError;
use crate::topology::cell_type::CellType;
use crate::topology::cell_array::CellArray;

impl HeavyDataReader<'_> {
    /// One block per non-ghost set, in declaration order.
    pub(crate) fn read_sets(&self, dataset: &dyn DataSet, sets: &[SetDescriptor]) -> Vec<Block> {
        let mut blocks = Vec::new();
        for set in sets.iter().filter(|s| !s.is_ghost()) {
            let mut block = Block {
                name: Some(set.name.clone()),
                data: None,
            };
            if !self.selections().sets.is_enabled(&set.name) {
                log::debug!("set `{}` is disabled", set.name);
                blocks.push(block);
                continue;
            }
            match self.extract_set(dataset, set) {
                Ok(output) => block.data = Some(output),
                Err(err) => log::warn!("skipping set `{}`: {err}", set.name),
            }
            blocks.push(block);
        }
        blocks
    }

    fn extract_set(
        &self,
        dataset: &dyn DataSet,
        set: &SetDescriptor,
    ) -> Result<MeshOutput, XdmfError> {
        let ids = self.read_ids(&set.ids)?;
        match set.kind {
            SetKind::Node => {
                let mut mesh = node_set(dataset, &set.name, &ids);
                self.read_set_attributes(&mut mesh, set, Center::Node);
                Ok(MeshOutput::Unstructured(mesh))
            }
            SetKind::Cell => {
                let (mut mesh, _, skipped) = extract_cells(dataset, &ids);
                if skipped > 0 {
                    log::warn!("cell set `{}`: {skipped} ids name no cell", set.name);
                }
                self.read_set_attributes(&mut mesh, set, Center::Cell);
                Ok(MeshOutput::Unstructured(mesh))
            }
            SetKind::Face => {
                let cells = self.read_parallel(set, set.cell_ids.as_ref(), "cell id", ids.len())?;
                let mut poly = face_set(dataset, &set.name, &cells, &ids);
                self.read_set_attributes(&mut poly, set, Center::Face);
                Ok(MeshOutput::Poly(poly))
            }
            SetKind::Edge => {
                let cells = self.read_parallel(set, set.cell_ids.as_ref(), "cell id", ids.len())?;
                let faces = self.read_parallel(set, set.face_ids.as_ref(), "face id", ids.len())?;
                let mut poly = edge_set(dataset, &set.name, &cells, &faces, &ids);
                self.read_set_attributes(&mut poly, set, Center::Edge);
                Ok(MeshOutput::Poly(poly))
            }
        }
    }

    fn read_ids(&self, array: &ArrayRef) -> Result<Vec<i64>, XdmfError> {
        self.arrays()
            .read_all(array)?
            .data
            .to_i64_vec(array.as_str())
    }

    /// A companion id array of a face or edge set, the same length as `ids`.
    fn read_parallel(
        &self,
        set: &SetDescriptor,
        array: Option<&ArrayRef>,
        which: &'static str,
        len: usize,
    ) -> Result<Vec<i64>, XdmfError> {
        let array = array.ok_or_else(|| XdmfError::MissingSetArray {
            set: set.name.clone(),
            which,
        })?;
        let values = self.read_ids(array)?;
        if values.len() != len {
            return Err(XdmfError::HeavyRead {
                array: array.to_string(),
                reason: format!("holds {} ids, the set lists {len}", values.len()),
            });
        }
        Ok(values)
    }

    /// Attach the set's attributes centered on `center`. Point-centered
    /// values go to point data, everything else to cell data.
    ///
    /// Arrays are attached even when their tuple count differs from the
    /// extracted points or cells, which happens when face or edge pairs were
    /// skipped; the mismatch is logged.
    fn read_set_attributes(&self, dataset: &mut dyn DataSet, set: &SetDescriptor, center: Center) {
        for attribute in set.attributes.iter().filter(|a| a.center == center) {
            match self.read_attribute(attribute, 1, None) {
                Ok(array) => {
                    if let Some((tuples, expected)) = tuple_mismatch(dataset, center, &array) {
                        log::warn!(
                            "set `{}`: attribute `{}` has {tuples} tuples for {expected} {}",
                            set.name,
                            attribute.name,
                            if center == Center::Node { "points" } else { "cells" }
                        );
                    }
                    let bucket = if center == Center::Node {
                        dataset.point_data_mut()
                    } else {
                        dataset.cell_data_mut()
                    };
                    add_to_bucket(bucket, attribute, array);
                }
                Err(err) => log::warn!(
                    "set `{}`: skipping attribute `{}`: {err}",
                    set.name,
                    attribute.name
                ),
            }
        }
    }
}

/// Tuple count of `array` and the point or cell count it should match,
/// when they differ.
pub(crate) fn tuple_mismatch(
    dataset: &dyn DataSet,
    center: Center,
    array: &DataArray,
) -> Option<(usize, usize)> {
    let expected = if center == Center::Node {
        dataset.number_of_points()
    } else {
        dataset.number_of_cells()
    };
    let tuples = array.number_of_tuples();
    (tuples != expected).then_some((tuples, expected))
}

/// Points at `ids`, joined by a single poly-vertex cell.
///
/// Out-of-range ids leave their point at the origin.
pub fn node_set(dataset: &dyn DataSet, name: &str, ids: &[i64]) -> UnstructuredMesh {
    let mut points = Points::zeros(dataset.point_precision(), ids.len());
    let count = dataset.number_of_points();
    for (dst, &id) in ids.iter().enumerate() {
        match usize::try_from(id).ok().filter(|&i| i < count) {
            Some(src) => dataset.copy_point_into(&mut points, dst, src),
            None => log::warn!("node set `{name}`: point id {id} out of range 0..{count}"),
        }
    }
    let mut mesh = UnstructuredMesh::new();
    mesh.points = points;
    let vertex: Vec<i64> = (0..ids.len() as i64).collect();
    mesh.push_cell(CellType::PolyVertex, &vertex);
    mesh
}

/// Global point ids of face `face` of cell `cell`.
fn cell_face(dataset: &dyn DataSet, cell: i64, face: i64) -> Option<Vec<i64>> {
    let (kind, points) = dataset.cell(usize::try_from(cell).ok()?)?;
    let local = kind.face(usize::try_from(face).ok()?)?;
    local.iter().map(|&l| points.get(l).copied()).collect()
}

fn merged(dataset: &dyn DataSet, merger: &mut PointMerger, global: &[i64]) -> Option<Vec<i64>> {
    global
        .iter()
        .map(|&g| {
            let p = dataset.point(usize::try_from(g).ok()?)?;
            Some(merger.insert(p) as i64)
        })
        .collect()
}

fn merger_for(dataset: &dyn DataSet) -> PointMerger {
    let bounds = dataset.bounds().unwrap_or([0.0; 6]);
    PointMerger::for_bounds(bounds, dataset.point_precision())
}

/// Polygons for the faces `(cells[i], faces[i])`.
pub fn face_set(dataset: &dyn DataSet, name: &str, cells: &[i64], faces: &[i64]) -> PolyData {
    let mut merger = merger_for(dataset);
    let mut polys = CellArray::with_capacity(faces.len(), faces.len() * 4);
    for (&cell, &face) in cells.iter().zip(faces) {
        let Some(ids) = cell_face(dataset, cell, face).and_then(|g| merged(dataset, &mut merger, &g))
        else {
            log::warn!("face set `{name}`: cell {cell} has no face {face}");
            continue;
        };
        polys.push_cell(&ids);
    }
    let mut poly = PolyData::new(merger.into_points());
    poly.polys = polys;
    poly
}

/// Lines for edge `edges[i]` of face `faces[i]` of cell `cells[i]`.
pub fn edge_set(
    dataset: &dyn DataSet,
    name: &str,
    cells: &[i64],
    faces: &[i64],
    edges: &[i64],
) -> PolyData {
    let mut merger = merger_for(dataset);
    let mut lines = CellArray::with_capacity(edges.len(), edges.len() * 2);
    for ((&cell, &face), &edge) in cells.iter().zip(faces).zip(edges) {
        let segment = cell_face(dataset, cell, face).and_then(|face_points| {
            let [a, b] = CellType::Polygon.edge(usize::try_from(edge).ok()?, face_points.len())?;
            merged(dataset, &mut merger, &[face_points[a], face_points[b]])
        });
        let Some(ids) = segment else {
            log::warn!("edge set `{name}`: cell {cell} face {face} has no edge {edge}");
            continue;
        };
        lines.push_cell(&ids);
    }
    let mut poly = PolyData::new(merger.into_points());
    poly.lines = lines;
    poly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::ImageData;

    fn two_hexes() -> ImageData {
        ImageData::new([0, 2, 0, 1, 0, 1], [0.0; 3], [1.0; 3])
    }

    #[test]
    fn node_set_copies_points() {
        let image = two_hexes();
        let mesh = node_set(&image, "n", &[0, 5, 11]);
        assert_eq!(mesh.number_of_points(), 3);
        assert_eq!(mesh.point(1), image.point(5));
        assert_eq!(mesh.cell(0).unwrap(), (CellType::PolyVertex, vec![0, 1, 2]));
    }

    #[test]
    fn out_of_range_node_stays_at_origin() {
        let image = ImageData::new([0, 1, 0, 1, 0, 1], [5.0; 3], [1.0; 3]);
        let mesh = node_set(&image, "n", &[1, 42]);
        assert_eq!(mesh.point(1), Some([0.0, 0.0, 0.0]));
    }

    #[test]
    fn skipped_face_pairs_are_reported_as_mismatch() {
        use crate::data::array::ArrayData;
        let image = two_hexes();
        // cell 9 does not exist, so only one polygon is emitted
        let poly = face_set(&image, "f", &[0, 9], &[1, 0]);
        assert_eq!(poly.number_of_cells(), 1);
        let two = DataArray::new("a", 1, ArrayData::F64(vec![1.0, 2.0])).unwrap();
        assert_eq!(tuple_mismatch(&poly, Center::Face, &two), Some((2, 1)));
        let one = DataArray::new("a", 1, ArrayData::F64(vec![1.0])).unwrap();
        assert_eq!(tuple_mismatch(&poly, Center::Face, &one), None);
        assert_eq!(tuple_mismatch(&poly, Center::Node, &one), Some((1, 4)));
    }

    #[test]
    fn shared_face_points_merge() {
        let image = two_hexes();
        // face 1 of cell 0 is the face shared with cell 0's +x neighbour,
        // face 0 of cell 1 is the same face from the other side
        let poly = face_set(&image, "f", &[0, 1], &[1, 0]);
        assert_eq!(poly.polys.num_cells(), 2);
        assert_eq!(poly.number_of_points(), 4);
    }

    #[test]
    fn edges_follow_face_boundary() {
        let image = two_hexes();
        let poly = edge_set(&image, "e", &[0, 0], &[4, 4], &[0, 3]);
        assert_eq!(poly.lines.num_cells(), 2);
        // face 4 of a hexahedron is 0-3-2-1; edge 0 joins 0-3, edge 3 joins 1-0
        assert_eq!(poly.number_of_points(), 3);
    }

    #[test]
    fn bad_face_is_skipped() {
        let image = two_hexes();
        let poly = face_set(&image, "f", &[0, 7], &[9, 0]);
        assert_eq!(poly.polys.num_cells(), 0);
    }
}
