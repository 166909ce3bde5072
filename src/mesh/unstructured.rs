//! Indexed mesh of explicitly typed cells.

use crate::data::field::FieldData;
use crate::data::points::Points;
use crate::mesh::{DataSet, field_access};
use crate::topology::cell_array::CellArray;
use crate::topology::cell_type::CellType;

/// Points plus per-cell kind and connectivity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnstructuredMesh {
    pub points: Points,
    pub cell_types: Vec<CellType>,
    pub cells: CellArray,
    pub point_data: FieldData,
    pub cell_data: FieldData,
    pub field_data: FieldData,
}

impl UnstructuredMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mesh whose cells all share `cell_type`.
    pub fn homogeneous(cell_type: CellType, cells: CellArray) -> Self {
        Self {
            cell_types: vec![cell_type; cells.num_cells()],
            cells,
            ..Self::default()
        }
    }

    pub fn push_cell(&mut self, cell_type: CellType, points: &[i64]) {
        self.cell_types.push(cell_type);
        self.cells.push_cell(points);
    }
}

impl DataSet for UnstructuredMesh {
    fn number_of_points(&self) -> usize {
        self.points.len()
    }

    fn number_of_cells(&self) -> usize {
        self.cell_types.len()
    }

    fn point(&self, index: usize) -> Option<[f64; 3]> {
        self.points.get(index)
    }

    fn cell(&self, index: usize) -> Option<(CellType, Vec<i64>)> {
        let kind = *self.cell_types.get(index)?;
        Some((kind, self.cells.cell(index)?.to_vec()))
    }

    fn points(&self) -> Option<&Points> {
        Some(&self.points)
    }

    field_access!();
}
