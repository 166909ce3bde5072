//! Point reader.
//!
//! Explicit geometries (`XYZ`, `XY`, `X_Y_Z`) keep the precision of their
//! source arrays. With a structured extent the whole point array is read and
//! the points inside the requested sub-extent, on the stride, are copied out
//! x-fastest. Vector geometries (`VxVyVz`, `VxVy`) produce the tensor product
//! of the per-axis coordinate slices.

use crate::data::array::NumberType;
use crate::data::points::Points;
use crate::io::heavy::ArrayRef;
use crate::io::light::{GeometryDescriptor, GeometryKind};
use crate::io::xdmf::HeavyDataReader;
use crate::io::xdmf::structured::StructuredExtents;
use crate::mesh::structured::extent_dims;
use crate::mesh_error::XdmfError;

/// Copy the points of `all` that fall inside the update extent of `extents`
/// and on its stride. `all` is numbered over the whole extent; lattice
/// positions outside it, or past the end of `all`, stay at the origin.
pub fn sub_extent_points(all: &Points, extents: &StructuredExtents) -> Points {
    let whole = extents.whole;
    let update = extents.update;
    let stride = extents.stride.map(|s| s.max(1) as usize);
    let dims = extent_dims(&whole);
    let axis_range = |axis: usize| (update[2 * axis]..=update[2 * axis + 1]).step_by(stride[axis]);
    let count: usize = (0..3).map(|axis| axis_range(axis).count()).product();
    let mut out = Points::zeros(all.number_type(), count);
    let mut next = 0usize;
    for z in axis_range(2) {
        for y in axis_range(1) {
            for x in axis_range(0) {
                let index = lattice_index([x, y, z], &whole, &dims);
                if let Some(src) = index.filter(|&src| src < all.len()) {
                    out.copy_from(next, all, src);
                }
                next += 1;
            }
        }
    }
    out
}

/// x-fastest index of lattice position `ijk` within `whole`.
fn lattice_index(ijk: [i32; 3], whole: &[i32; 6], dims: &[usize; 3]) -> Option<usize> {
    let mut index = 0usize;
    let mut pitch = 1usize;
    for axis in 0..3 {
        let offset = usize::try_from(ijk[axis] - whole[2 * axis]).ok()?;
        if offset >= dims[axis] {
            return None;
        }
        index += offset * pitch;
        pitch *= dims[axis];
    }
    Some(index)
}

impl HeavyDataReader<'_> {
    /// Points of `geometry`, restricted to `extents` when given.
    pub(crate) fn read_points(
        &self,
        geometry: &GeometryDescriptor,
        extents: Option<&StructuredExtents>,
    ) -> Result<Points, XdmfError> {
        match geometry.kind {
            GeometryKind::Xyz | GeometryKind::Xy | GeometryKind::XYZSeparate => {
                let all = self.read_explicit_points(geometry)?;
                let Some(extents) = extents else {
                    return Ok(all);
                };
                let needed: usize = extent_dims(&extents.whole).iter().product();
                if all.len() < needed {
                    return Err(XdmfError::HeavyRead {
                        array: geometry_name(geometry),
                        reason: format!(
                            "holds {} points, the whole extent needs {needed}",
                            all.len()
                        ),
                    });
                }
                Ok(sub_extent_points(&all, extents))
            }
            GeometryKind::VxVyVz | GeometryKind::VxVy => {
                self.read_vector_points(geometry, extents)
            }
            other => Err(XdmfError::UnsupportedGeometry {
                geometry: other.to_string(),
                assembler: "point",
            }),
        }
    }

    fn read_explicit_points(&self, geometry: &GeometryDescriptor) -> Result<Points, XdmfError> {
        match geometry.kind {
            GeometryKind::Xyz => {
                let array = required(geometry.points.as_ref(), "XYZ points")?;
                let data = self.arrays().read_all(array)?.data;
                check_width(array, data.len(), 3)?;
                Ok(Points::from_array(data))
            }
            GeometryKind::Xy => {
                let array = required(geometry.points.as_ref(), "XY points")?;
                let data = self.arrays().read_all(array)?.data;
                check_width(array, data.len(), 2)?;
                let count = data.len() / 2;
                let mut points = Points::with_capacity(point_precision(data.number_type()), count);
                for p in 0..count {
                    let x = data.get_f64(2 * p).unwrap_or_default();
                    let y = data.get_f64(2 * p + 1).unwrap_or_default();
                    points.push([x, y, 0.0]);
                }
                Ok(points)
            }
            _ => {
                let mut columns = Vec::with_capacity(3);
                for axis in 0..3 {
                    let array = required(geometry.vector(axis), "X_Y_Z coordinate")?;
                    columns.push((array, self.arrays().read_all(array)?.data));
                }
                let count = columns[0].1.len();
                for (array, data) in &columns {
                    if data.len() != count {
                        return Err(XdmfError::ComponentMismatch {
                            array: array.to_string(),
                            len: data.len(),
                            components: count,
                        });
                    }
                }
                let mut points =
                    Points::with_capacity(point_precision(columns[0].1.number_type()), count);
                for p in 0..count {
                    let [x, y, z] = [0, 1, 2].map(|c| columns[c].1.get_f64(p).unwrap_or_default());
                    points.push([x, y, z]);
                }
                Ok(points)
            }
        }
    }

    fn read_vector_points(
        &self,
        geometry: &GeometryDescriptor,
        extents: Option<&StructuredExtents>,
    ) -> Result<Points, XdmfError> {
        let axes = if geometry.kind == GeometryKind::VxVy { 2 } else { 3 };
        let precision = match geometry.vector(0) {
            Some(vx) => point_precision(self.arrays().describe(vx)?.number_type),
            None => NumberType::Float64,
        };
        let mut coords: Vec<Vec<f64>> = Vec::with_capacity(3);
        for axis in 0..3 {
            if axis >= axes {
                coords.push(vec![0.0]);
                continue;
            }
            let values = match extents {
                Some(e) => self.read_coordinate_slice(
                    geometry.vector(axis),
                    e.update[2 * axis],
                    e.stride[axis],
                    e.scaled_dims[axis],
                )?,
                None => {
                    let vector = required(geometry.vector(axis), "coordinate vector")?;
                    self.arrays().read_all(vector)?.data.to_f64_vec()
                }
            };
            coords.push(values);
        }
        let count = coords.iter().map(Vec::len).product();
        let mut points = Points::with_capacity(precision, count);
        for &z in &coords[2] {
            for &y in &coords[1] {
                for &x in &coords[0] {
                    points.push([x, y, z]);
                }
            }
        }
        Ok(points)
    }
}

/// 32-bit sources stay 32-bit; everything else is stored as 64-bit.
fn point_precision(number_type: NumberType) -> NumberType {
    if number_type == NumberType::Float32 {
        NumberType::Float32
    } else {
        NumberType::Float64
    }
}

fn required<'g>(array: Option<&'g ArrayRef>, what: &str) -> Result<&'g ArrayRef, XdmfError> {
    array.ok_or_else(|| XdmfError::MissingArray(what.to_string()))
}

fn check_width(array: &ArrayRef, len: usize, width: usize) -> Result<(), XdmfError> {
    if len % width != 0 {
        return Err(XdmfError::ComponentMismatch {
            array: array.to_string(),
            len,
            components: width,
        });
    }
    Ok(())
}

fn geometry_name(geometry: &GeometryDescriptor) -> String {
    geometry
        .array_refs()
        .next()
        .map_or_else(|| geometry.kind.to_string(), ToString::to_string)
}
