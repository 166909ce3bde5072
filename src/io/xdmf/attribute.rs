//! Attribute decoding.
//!
//! An attribute is read whole unless a structured extent restricts it; then
//! a hyperslab over the spatial axes (slowest first, `z, y, x`) selects the
//! strided sub-block, plus the full trailing component axis when the heavy
//! array has one. Node-centered counts are one larger than cell-centered
//! counts on every axis.

use crate::data::array::{ArrayData, DataArray};
use crate::data::field::FieldData;
use crate::io::heavy::{ArrayInfo, Selection};
use crate::io::light::{AttributeDescriptor, AttributeType, Center};
use crate::io::xdmf::HeavyDataReader;
use crate::io::xdmf::structured::StructuredExtents;
use crate::mesh::DataSet;
use crate::mesh_error::XdmfError;

/// Source component feeding each of the nine full-tensor components.
const TENSOR6_TO_TENSOR: [usize; 9] = [0, 1, 2, 1, 3, 4, 2, 4, 5];

/// Expand symmetric `xx, xy, xz, yy, yz, zz` tuples to full 3x3 tensors.
pub fn expand_tensor6(name: &str, data: &ArrayData) -> Result<ArrayData, XdmfError> {
    if data.len() % 6 != 0 {
        return Err(XdmfError::ComponentMismatch {
            array: name.to_string(),
            len: data.len(),
            components: 6,
        });
    }
    let indices: Vec<usize> = (0..data.len() / 6)
        .flat_map(|t| TENSOR6_TO_TENSOR.iter().map(move |&c| 6 * t + c))
        .collect();
    Ok(data.gather(&indices))
}

/// Hyperslab restricting an attribute array to `extents`.
///
/// `dimensionality` is the number of lattice axes of the grid. Arrays of
/// lower rank can only be read when the extent covers the whole grid at
/// unit stride.
pub fn attribute_selection(
    array: &str,
    center: Center,
    info: &ArrayInfo,
    dimensionality: usize,
    extents: &StructuredExtents,
) -> Result<Selection, XdmfError> {
    let rank = info.rank();
    let dim = dimensionality.min(3);
    let mismatch = || XdmfError::RankMismatch {
        array: array.to_string(),
        rank,
        dimensionality,
    };
    if rank > dim + 1 {
        return Err(mismatch());
    }
    if rank < dim || dim == 0 {
        return if extents.is_whole() {
            Ok(Selection::All)
        } else {
            Err(mismatch())
        };
    }
    let update = extents.update;
    let stride = extents.stride;
    let node_extra = usize::from(center == Center::Node);
    // output axis order is x, y, z; the hyperslab runs z, y, x
    let mut start: Vec<usize> = Vec::with_capacity(rank);
    let mut step: Vec<usize> = Vec::with_capacity(rank);
    let mut count: Vec<usize> = Vec::with_capacity(rank);
    for axis in (0..dim).rev() {
        start.push(update[2 * axis].max(0) as usize);
        step.push(stride[axis].max(1) as usize);
        count.push(extents.scaled_dims[axis].saturating_sub(1) + node_extra);
    }
    if rank == dim + 1 {
        start.push(0);
        step.push(1);
        count.push(info.shape[dim]);
    }
    Ok(Selection::Hyperslab {
        start,
        stride: step,
        count,
    })
}

/// Add `array` to `bucket`, marking it active when the descriptor asks.
pub(crate) fn add_to_bucket(bucket: &mut FieldData, attribute: &AttributeDescriptor, array: DataArray) {
    if attribute.active {
        if let Some(role) = attribute.attribute_type.active_role() {
            bucket.set_active(role, array.name.clone());
        }
    }
    bucket.add_array(array);
}

impl HeavyDataReader<'_> {
    /// Decode one attribute, restricted to `extents` unless it is
    /// grid-centered.
    pub(crate) fn read_attribute(
        &self,
        attribute: &AttributeDescriptor,
        dimensionality: usize,
        extents: Option<&StructuredExtents>,
    ) -> Result<DataArray, XdmfError> {
        let selection = match extents {
            Some(extents) if attribute.center != Center::Grid => {
                let info = self.arrays().describe(&attribute.values)?;
                attribute_selection(
                    &attribute.name,
                    attribute.center,
                    &info,
                    dimensionality,
                    extents,
                )?
            }
            _ => Selection::All,
        };
        let heavy = self.arrays().read(&attribute.values, &selection)?;
        let mut components = attribute.components();
        let mut data = heavy.data;
        if attribute.attribute_type == AttributeType::Tensor6 {
            data = expand_tensor6(&attribute.name, &data)?;
            components = 9;
        }
        DataArray::new(attribute.name.clone(), components, data)
    }

    /// Decode and attach the grid's attributes by centering.
    ///
    /// Node and cell arrays disabled in the selections are not read.
    /// Failures drop the attribute only.
    pub(crate) fn read_attributes(
        &self,
        dataset: &mut dyn DataSet,
        attributes: &[AttributeDescriptor],
        dimensionality: usize,
        extents: Option<&StructuredExtents>,
    ) {
        for attribute in attributes {
            let enabled = match attribute.center {
                Center::Node => self.selections().point_arrays.is_enabled(&attribute.name),
                Center::Cell => self.selections().cell_arrays.is_enabled(&attribute.name),
                Center::Grid => true,
                Center::Face | Center::Edge => {
                    log::warn!(
                        "attribute `{}`: {:?}-centered attributes are only read on sets",
                        attribute.name,
                        attribute.center
                    );
                    continue;
                }
            };
            if !enabled {
                log::debug!("attribute `{}` is disabled", attribute.name);
                continue;
            }
            let array = match self.read_attribute(attribute, dimensionality, extents) {
                Ok(array) => array,
                Err(err) => {
                    log::warn!("skipping attribute `{}`: {err}", attribute.name);
                    continue;
                }
            };
            let bucket = match attribute.center {
                Center::Node => dataset.point_data_mut(),
                Center::Cell => dataset.cell_data_mut(),
                _ => dataset.field_data_mut(),
            };
            add_to_bucket(bucket, attribute, array);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::array::NumberType;

    fn extents(update: [i32; 6], stride: [i32; 3]) -> StructuredExtents {
        StructuredExtents::compute(&[5, 5, 5], Some(update), stride)
    }

    fn info(shape: Vec<usize>) -> ArrayInfo {
        ArrayInfo {
            number_type: NumberType::Float64,
            shape,
        }
    }

    #[test]
    fn tensor6_expands_symmetrically() {
        let data = ArrayData::I32(vec![1, 2, 3, 4, 5, 6]);
        let full = expand_tensor6("t", &data).unwrap();
        assert_eq!(full, ArrayData::I32(vec![1, 2, 3, 2, 4, 5, 3, 5, 6]));
    }

    #[test]
    fn node_selection_counts_points() {
        let e = extents([0, 2, 1, 3, 0, 4], [1, 1, 1]);
        let sel = attribute_selection("a", Center::Node, &info(vec![5, 5, 5]), 3, &e).unwrap();
        assert_eq!(
            sel,
            Selection::Hyperslab {
                start: vec![0, 1, 0],
                stride: vec![1, 1, 1],
                count: vec![5, 3, 3],
            }
        );
        let cell = attribute_selection("a", Center::Cell, &info(vec![4, 4, 4]), 3, &e).unwrap();
        assert_eq!(cell.output_shape(&[4, 4, 4]), vec![4, 2, 2]);
    }

    #[test]
    fn trailing_components_are_read_whole() {
        let e = extents([0, 4, 0, 4, 0, 4], [2, 2, 2]);
        let sel = attribute_selection("v", Center::Node, &info(vec![5, 5, 5, 3]), 3, &e).unwrap();
        assert_eq!(
            sel,
            Selection::Hyperslab {
                start: vec![0, 0, 0, 0],
                stride: vec![2, 2, 2, 1],
                count: vec![3, 3, 3, 3],
            }
        );
    }

    #[test]
    fn excess_rank_fails() {
        let e = extents([0, 4, 0, 4, 0, 4], [1, 1, 1]);
        let err = attribute_selection("x", Center::Node, &info(vec![5, 5, 5, 3, 1]), 3, &e);
        assert!(matches!(err, Err(XdmfError::RankMismatch { rank: 5, .. })));
    }

    #[test]
    fn flat_arrays_need_the_whole_extent() {
        let whole = StructuredExtents::compute(&[5, 5, 5], None, [1, 1, 1]);
        let flat = info(vec![125]);
        assert_eq!(
            attribute_selection("f", Center::Node, &flat, 3, &whole).unwrap(),
            Selection::All
        );
        let sub = extents([0, 2, 0, 2, 0, 2], [1, 1, 1]);
        assert!(attribute_selection("f", Center::Node, &flat, 3, &sub).is_err());
    }
}
