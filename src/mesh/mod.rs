//! Mesh Output model.
//!
//! A uniform grid decodes into one of the concrete datasets; collections and
//! trees decode into a [`Composite`] of outputs. [`DataSet`] gives the ghost
//! builder and the set extractor uniform point/cell access over all of them.

pub mod composite;
pub mod poly;
pub mod structured;
pub mod unstructured;

pub use composite::{Block, Composite};
pub use poly::PolyData;
pub use structured::{Extent, ImageData, RectilinearGrid, StructuredGrid};
pub use unstructured::UnstructuredMesh;

use crate::data::array::NumberType;
use crate::data::field::FieldData;
use crate::data::points::Points;
use crate::topology::cell_type::CellType;

/// Point/cell access shared by every concrete dataset.
pub trait DataSet {
    fn number_of_points(&self) -> usize;

    fn number_of_cells(&self) -> usize;

    fn point(&self, index: usize) -> Option<[f64; 3]>;

    /// Kind and point ids of cell `index`.
    fn cell(&self, index: usize) -> Option<(CellType, Vec<i64>)>;

    /// Explicit point storage, when the dataset has one.
    fn points(&self) -> Option<&Points> {
        None
    }

    /// Precision new point buffers derived from this dataset should use.
    fn point_precision(&self) -> NumberType {
        self.points()
            .map_or(NumberType::Float64, |p| p.number_type())
    }

    fn point_data(&self) -> &FieldData;
    fn point_data_mut(&mut self) -> &mut FieldData;
    fn cell_data(&self) -> &FieldData;
    fn cell_data_mut(&mut self) -> &mut FieldData;
    fn field_data(&self) -> &FieldData;
    fn field_data_mut(&mut self) -> &mut FieldData;

    /// Copy point `src` of this dataset into slot `dst` of `out`.
    fn copy_point_into(&self, out: &mut Points, dst: usize, src: usize) {
        match self.points() {
            Some(points) => out.copy_from(dst, points, src),
            None => {
                if let Some(p) = self.point(src) {
                    out.set(dst, p);
                }
            }
        }
    }

    /// Axis-aligned bounds `[xmin, xmax, ymin, ymax, zmin, zmax]`.
    fn bounds(&self) -> Option<[f64; 6]> {
        if let Some(points) = self.points() {
            return points.bounds();
        }
        let mut b: Option<[f64; 6]> = None;
        for i in 0..self.number_of_points() {
            let Some(p) = self.point(i) else { continue };
            let bb = b.get_or_insert([p[0], p[0], p[1], p[1], p[2], p[2]]);
            for axis in 0..3 {
                bb[2 * axis] = bb[2 * axis].min(p[axis]);
                bb[2 * axis + 1] = bb[2 * axis + 1].max(p[axis]);
            }
        }
        b
    }
}

/// Implements the field-bucket accessors of [`DataSet`] for a struct with
/// `point_data`, `cell_data` and `field_data` fields.
macro_rules! field_access {
    () => {
        fn point_data(&self) -> &$crate::data::field::FieldData {
            &self.point_data
        }
        fn point_data_mut(&mut self) -> &mut $crate::data::field::FieldData {
            &mut self.point_data
        }
        fn cell_data(&self) -> &$crate::data::field::FieldData {
            &self.cell_data
        }
        fn cell_data_mut(&mut self) -> &mut $crate::data::field::FieldData {
            &mut self.cell_data
        }
        fn field_data(&self) -> &$crate::data::field::FieldData {
            &self.field_data
        }
        fn field_data_mut(&mut self) -> &mut $crate::data::field::FieldData {
            &mut self.field_data
        }
    };
}
pub(crate) use field_access;

/// Result of reading one grid descriptor.
#[derive(Clone, Debug, PartialEq)]
pub enum MeshOutput {
    Unstructured(UnstructuredMesh),
    Poly(PolyData),
    Image(ImageData),
    Rectilinear(RectilinearGrid),
    Structured(StructuredGrid),
    Composite(Composite),
}

impl MeshOutput {
    pub fn as_dataset(&self) -> Option<&dyn DataSet> {
        match self {
            MeshOutput::Unstructured(m) => Some(m as &dyn DataSet),
            MeshOutput::Poly(m) => Some(m as &dyn DataSet),
            MeshOutput::Image(m) => Some(m as &dyn DataSet),
            MeshOutput::Rectilinear(m) => Some(m as &dyn DataSet),
            MeshOutput::Structured(m) => Some(m as &dyn DataSet),
            MeshOutput::Composite(_) => None,
        }
    }

    pub fn as_dataset_mut(&mut self) -> Option<&mut dyn DataSet> {
        match self {
            MeshOutput::Unstructured(m) => Some(m as &mut dyn DataSet),
            MeshOutput::Poly(m) => Some(m as &mut dyn DataSet),
            MeshOutput::Image(m) => Some(m as &mut dyn DataSet),
            MeshOutput::Rectilinear(m) => Some(m as &mut dyn DataSet),
            MeshOutput::Structured(m) => Some(m as &mut dyn DataSet),
            MeshOutput::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            MeshOutput::Composite(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_unstructured(&self) -> Option<&UnstructuredMesh> {
        match self {
            MeshOutput::Unstructured(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_poly(&self) -> Option<&PolyData> {
        match self {
            MeshOutput::Poly(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageData> {
        match self {
            MeshOutput::Image(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_rectilinear(&self) -> Option<&RectilinearGrid> {
        match self {
            MeshOutput::Rectilinear(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_structured(&self) -> Option<&StructuredGrid> {
        match self {
            MeshOutput::Structured(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, MeshOutput::Composite(_))
    }
}
