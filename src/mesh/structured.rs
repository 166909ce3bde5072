//! Structured datasets: image, rectilinear and curvilinear grids.
//!
//! All three describe a point lattice over an [`Extent`]. Points are numbered
//! x-fastest within the extent; cells are hexahedra, quads or lines over the
//! non-degenerate axes, numbered the same way.

use crate::data::field::FieldData;
use crate::data::points::Points;
use crate::mesh::{DataSet, field_access};
use crate::topology::cell_type::CellType;

/// `[xmin, xmax, ymin, ymax, zmin, zmax]` point index bounds.
pub type Extent = [i32; 6];

/// Extent describing no points.
pub const EMPTY_EXTENT: Extent = [0, -1, 0, -1, 0, -1];

/// `true` when `max >= min` on every axis.
pub fn extent_is_valid(extent: &Extent) -> bool {
    (0..3).all(|axis| extent[2 * axis + 1] >= extent[2 * axis])
}

/// Point counts per axis; zero on an inverted axis.
pub fn extent_dims(extent: &Extent) -> [usize; 3] {
    let mut dims = [0usize; 3];
    for (axis, d) in dims.iter_mut().enumerate() {
        let span = extent[2 * axis + 1] - extent[2 * axis] + 1;
        *d = span.max(0) as usize;
    }
    dims
}

/// Unit offsets of a cell's corners over the non-degenerate axes, in VTK
/// local point order.
const LINE_CORNERS: [[usize; 1]; 2] = [[0], [1]];
const QUAD_CORNERS: [[usize; 2]; 4] = [[0, 0], [1, 0], [1, 1], [0, 1]];
const HEXAHEDRON_CORNERS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Point and cell numbering over an extent.
#[derive(Clone, Copy, Debug)]
struct Lattice {
    dims: [usize; 3],
}

impl Lattice {
    fn new(extent: &Extent) -> Self {
        Self {
            dims: extent_dims(extent),
        }
    }

    fn number_of_points(&self) -> usize {
        self.dims.iter().product()
    }

    fn cell_axes(&self) -> Vec<usize> {
        (0..3).filter(|&a| self.dims[a] > 1).collect()
    }

    fn cell_dims(&self) -> [usize; 3] {
        let mut c = [1usize; 3];
        for axis in 0..3 {
            if self.dims[axis] > 1 {
                c[axis] = self.dims[axis] - 1;
            }
        }
        c
    }

    fn number_of_cells(&self) -> usize {
        if self.number_of_points() == 0 {
            return 0;
        }
        self.cell_dims().iter().product()
    }

    fn ijk(&self, index: usize) -> [usize; 3] {
        let (nx, ny) = (self.dims[0].max(1), self.dims[1].max(1));
        [index % nx, (index / nx) % ny, index / (nx * ny)]
    }

    fn point_id(&self, ijk: [usize; 3]) -> i64 {
        (ijk[0] + ijk[1] * self.dims[0] + ijk[2] * self.dims[0] * self.dims[1]) as i64
    }

    fn cell(&self, index: usize) -> Option<(CellType, Vec<i64>)> {
        if index >= self.number_of_cells() {
            return None;
        }
        let cd = self.cell_dims();
        let base = [index % cd[0], (index / cd[0]) % cd[1], index / (cd[0] * cd[1])];
        let axes = self.cell_axes();
        let corner = |offsets: &[usize]| {
            let mut ijk = base;
            for (&axis, &o) in axes.iter().zip(offsets) {
                ijk[axis] += o;
            }
            self.point_id(ijk)
        };
        Some(match axes.len() {
            0 => (CellType::Vertex, vec![self.point_id(base)]),
            1 => (CellType::Line, LINE_CORNERS.iter().map(|c| corner(&c[..])).collect()),
            2 => (CellType::Quad, QUAD_CORNERS.iter().map(|c| corner(&c[..])).collect()),
            _ => (
                CellType::Hexahedron,
                HEXAHEDRON_CORNERS.iter().map(|c| corner(&c[..])).collect(),
            ),
        })
    }
}

/// Axis-aligned grid with uniform spacing.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageData {
    pub extent: Extent,
    pub origin: [f64; 3],
    pub spacing: [f64; 3],
    pub point_data: FieldData,
    pub cell_data: FieldData,
    pub field_data: FieldData,
}

impl ImageData {
    pub fn new(extent: Extent, origin: [f64; 3], spacing: [f64; 3]) -> Self {
        Self {
            extent,
            origin,
            spacing,
            point_data: FieldData::default(),
            cell_data: FieldData::default(),
            field_data: FieldData::default(),
        }
    }

    pub fn dimensions(&self) -> [usize; 3] {
        extent_dims(&self.extent)
    }
}

impl DataSet for ImageData {
    fn number_of_points(&self) -> usize {
        Lattice::new(&self.extent).number_of_points()
    }

    fn number_of_cells(&self) -> usize {
        Lattice::new(&self.extent).number_of_cells()
    }

    fn point(&self, index: usize) -> Option<[f64; 3]> {
        let lattice = Lattice::new(&self.extent);
        if index >= lattice.number_of_points() {
            return None;
        }
        let ijk = lattice.ijk(index);
        let mut p = [0.0; 3];
        for axis in 0..3 {
            let i = self.extent[2 * axis] as f64 + ijk[axis] as f64;
            p[axis] = self.origin[axis] + self.spacing[axis] * i;
        }
        Some(p)
    }

    fn cell(&self, index: usize) -> Option<(CellType, Vec<i64>)> {
        Lattice::new(&self.extent).cell(index)
    }

    field_access!();
}

/// Axis-aligned grid with per-axis coordinate arrays.
#[derive(Clone, Debug, PartialEq)]
pub struct RectilinearGrid {
    pub extent: Extent,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub point_data: FieldData,
    pub cell_data: FieldData,
    pub field_data: FieldData,
}

impl RectilinearGrid {
    pub fn new(extent: Extent, x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Self {
        Self {
            extent,
            x,
            y,
            z,
            point_data: FieldData::default(),
            cell_data: FieldData::default(),
            field_data: FieldData::default(),
        }
    }

    pub fn dimensions(&self) -> [usize; 3] {
        extent_dims(&self.extent)
    }
}

impl DataSet for RectilinearGrid {
    fn number_of_points(&self) -> usize {
        Lattice::new(&self.extent).number_of_points()
    }

    fn number_of_cells(&self) -> usize {
        Lattice::new(&self.extent).number_of_cells()
    }

    fn point(&self, index: usize) -> Option<[f64; 3]> {
        let lattice = Lattice::new(&self.extent);
        if index >= lattice.number_of_points() {
            return None;
        }
        let [i, j, k] = lattice.ijk(index);
        Some([*self.x.get(i)?, *self.y.get(j)?, *self.z.get(k)?])
    }

    fn cell(&self, index: usize) -> Option<(CellType, Vec<i64>)> {
        Lattice::new(&self.extent).cell(index)
    }

    field_access!();
}

/// Curvilinear grid: lattice topology with explicit points.
#[derive(Clone, Debug, PartialEq)]
pub struct StructuredGrid {
    pub extent: Extent,
    pub points: Points,
    pub point_data: FieldData,
    pub cell_data: FieldData,
    pub field_data: FieldData,
}

impl StructuredGrid {
    pub fn new(extent: Extent, points: Points) -> Self {
        Self {
            extent,
            points,
            point_data: FieldData::default(),
            cell_data: FieldData::default(),
            field_data: FieldData::default(),
        }
    }

    pub fn dimensions(&self) -> [usize; 3] {
        extent_dims(&self.extent)
    }
}

impl DataSet for StructuredGrid {
    fn number_of_points(&self) -> usize {
        self.points.len()
    }

    fn number_of_cells(&self) -> usize {
        Lattice::new(&self.extent).number_of_cells()
    }

    fn point(&self, index: usize) -> Option<[f64; 3]> {
        self.points.get(index)
    }

    fn cell(&self, index: usize) -> Option<(CellType, Vec<i64>)> {
        Lattice::new(&self.extent).cell(index)
    }

    fn points(&self) -> Option<&Points> {
        Some(&self.points)
    }

    field_access!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_cells_are_hexahedra() {
        let image = ImageData::new([0, 2, 0, 1, 0, 1], [0.0; 3], [1.0; 3]);
        assert_eq!(image.number_of_points(), 12);
        assert_eq!(image.number_of_cells(), 2);
        let (kind, ids) = image.cell(1).unwrap();
        assert_eq!(kind, CellType::Hexahedron);
        assert_eq!(ids, vec![1, 2, 5, 4, 7, 8, 11, 10]);
    }

    #[test]
    fn flat_extent_has_quads() {
        let image = ImageData::new([0, 2, 0, 2, 0, 0], [1.0, 0.0, 0.0], [0.5; 3]);
        assert_eq!(image.number_of_cells(), 4);
        assert_eq!(image.cell(3).unwrap(), (CellType::Quad, vec![4, 5, 8, 7]));
        assert_eq!(image.point(4), Some([1.5, 0.5, 0.0]));
    }

    #[test]
    fn rectilinear_points_use_axis_arrays() {
        let grid = RectilinearGrid::new(
            [0, 1, 0, 1, 0, 0],
            vec![0.0, 10.0],
            vec![0.0, 5.0],
            vec![2.0],
        );
        assert_eq!(grid.point(3), Some([10.0, 5.0, 2.0]));
        assert_eq!(grid.point(4), None);
    }

    #[test]
    fn extent_validity() {
        assert!(!extent_is_valid(&EMPTY_EXTENT));
        assert!(extent_is_valid(&[0, 0, 0, 0, 0, 0]));
        assert_eq!(extent_dims(&EMPTY_EXTENT), [0, 0, 0]);
    }
}
