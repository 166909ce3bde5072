//! Index-based cell extraction.

use hashbrown::HashMap;

use crate::data::array::{ArrayData, DataArray};
use crate::data::points::Points;
use crate::mesh::{DataSet, UnstructuredMesh};

/// Cell-data array recording each extracted cell's parent index.
pub const ORIGINAL_CELL_IDS: &str = "vtkOriginalCellIds";
/// Point-data array recording each extracted point's parent index.
pub const ORIGINAL_POINT_IDS: &str = "vtkOriginalPointIds";

/// Bidirectional mapping between parent and submesh indices.
#[derive(Debug, Clone, Default)]
pub struct SubmeshMaps {
    pub parent_to_sub: HashMap<usize, usize>,
    pub sub_to_parent: Vec<usize>,
    /// Parent index of every extracted cell.
    pub cells: Vec<usize>,
}

/// Copy the cells at `cell_ids` out of `parent`.
///
/// Points are renumbered in order of first use and copied by value. Point
/// and cell data follow their points and cells; the original indices are
/// recorded in [`ORIGINAL_POINT_IDS`] and [`ORIGINAL_CELL_IDS`]. Ids that do
/// not name a cell are skipped and counted in the returned `usize`.
pub fn extract_cells(
    parent: &dyn DataSet,
    cell_ids: &[i64],
) -> (UnstructuredMesh, SubmeshMaps, usize) {
    let mut maps = SubmeshMaps::default();
    let mut out = UnstructuredMesh::new();
    let mut skipped = 0usize;
    for &id in cell_ids {
        let cell = usize::try_from(id)
            .ok()
            .and_then(|c| parent.cell(c).map(|cell| (c, cell)));
        let Some((c, (kind, points))) = cell else {
            skipped += 1;
            continue;
        };
        maps.cells.push(c);
        let local: Vec<i64> = points
            .iter()
            .map(|&p| {
                let p = p as usize;
                let next = maps.sub_to_parent.len();
                let sub = *maps.parent_to_sub.entry(p).or_insert(next);
                if sub == next {
                    maps.sub_to_parent.push(p);
                }
                sub as i64
            })
            .collect();
        out.push_cell(kind, &local);
    }

    let mut points = Points::zeros(parent.point_precision(), maps.sub_to_parent.len());
    for (sub, &p) in maps.sub_to_parent.iter().enumerate() {
        parent.copy_point_into(&mut points, sub, p);
    }
    out.points = points;

    out.point_data = parent.point_data().gather_tuples(&maps.sub_to_parent);
    out.cell_data = parent.cell_data().gather_tuples(&maps.cells);
    out.point_data.add_array(index_array(ORIGINAL_POINT_IDS, &maps.sub_to_parent));
    out.cell_data.add_array(index_array(ORIGINAL_CELL_IDS, &maps.cells));
    (out, maps, skipped)
}

fn index_array(name: &str, ids: &[usize]) -> DataArray {
    DataArray {
        name: name.to_string(),
        components: 1,
        data: ArrayData::I64(ids.iter().map(|&i| i as i64).collect()),
    }
}
