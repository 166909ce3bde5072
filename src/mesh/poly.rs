//! Polygonal surface mesh.

use crate::data::field::FieldData;
use crate::data::points::Points;
use crate::mesh::{DataSet, field_access};
use crate::topology::cell_array::CellArray;
use crate::topology::cell_type::CellType;

/// Points with line and polygon cells.
///
/// Cells are numbered lines first, then polygons.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolyData {
    pub points: Points,
    pub lines: CellArray,
    pub polys: CellArray,
    pub point_data: FieldData,
    pub cell_data: FieldData,
    pub field_data: FieldData,
}

impl PolyData {
    pub fn new(points: Points) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }
}

impl DataSet for PolyData {
    fn number_of_points(&self) -> usize {
        self.points.len()
    }

    fn number_of_cells(&self) -> usize {
        self.lines.num_cells() + self.polys.num_cells()
    }

    fn point(&self, index: usize) -> Option<[f64; 3]> {
        self.points.get(index)
    }

    fn cell(&self, index: usize) -> Option<(CellType, Vec<i64>)> {
        let lines = self.lines.num_cells();
        if index < lines {
            let ids = self.lines.cell(index)?;
            let kind = if ids.len() == 2 { CellType::Line } else { CellType::PolyLine };
            return Some((kind, ids.to_vec()));
        }
        let ids = self.polys.cell(index - lines)?;
        let kind = match ids.len() {
            3 => CellType::Triangle,
            4 => CellType::Quad,
            _ => CellType::Polygon,
        };
        Some((kind, ids.to_vec()))
    }

    fn points(&self) -> Option<&Points> {
        Some(&self.points)
    }

    field_access!();
}
