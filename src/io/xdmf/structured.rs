//! Structured assembly: image, rectilinear and curvilinear grids.
//!
//! Extents are derived from the topology shape, which lists point counts
//! slowest axis first, so light-data axis 0 is output z. A stride `s` maps
//! every bound `b` to `b / s` in the output extent.

use crate::io::heavy::{ArrayRef, Selection};
use crate::io::light::{GeometryKind, GridDescriptor, TopologyDescriptor};
use crate::io::xdmf::HeavyDataReader;
use crate::mesh::structured::{Extent, extent_dims, extent_is_valid};
use crate::mesh::{ImageData, RectilinearGrid, StructuredGrid};
use crate::mesh_error::XdmfError;

/// Whole, requested and scaled extents of one structured read.
#[derive(Clone, Debug, PartialEq)]
pub struct StructuredExtents {
    pub whole: Extent,
    /// Requested sub-extent, in unscaled point indices.
    pub update: Extent,
    /// `update` divided by the stride.
    pub scaled: Extent,
    pub scaled_dims: [usize; 3],
    pub stride: [i32; 3],
}

impl StructuredExtents {
    /// Extents for a lattice of `shape` points (slowest axis first).
    ///
    /// `requested` is used only when valid on every axis, and is clipped to
    /// the lattice. A request that misses the lattice on some axis reads the
    /// whole extent.
    pub fn compute(shape: &[usize], requested: Option<Extent>, stride: [i32; 3]) -> Self {
        let stride = stride.map(|s| s.max(1));
        let mut whole = [0i32; 6];
        for axis in 0..3 {
            let points = if axis < shape.len() {
                shape[shape.len() - 1 - axis]
            } else {
                1
            };
            whole[2 * axis + 1] = points as i32 - 1;
        }
        let update = requested
            .filter(extent_is_valid)
            .map_or(whole, |r| clip_extent(r, &whole));
        let mut scaled = [0i32; 6];
        for (i, bound) in scaled.iter_mut().enumerate() {
            *bound = update[i] / stride[i / 2];
        }
        Self {
            whole,
            update,
            scaled,
            scaled_dims: extent_dims(&scaled),
            stride,
        }
    }

    /// `true` when the read covers the whole lattice at unit stride.
    pub fn is_whole(&self) -> bool {
        self.update == self.whole && self.stride == [1, 1, 1]
    }
}

/// Intersect `requested` with `whole`, or fall back to `whole` when they
/// do not overlap.
fn clip_extent(requested: Extent, whole: &Extent) -> Extent {
    let mut clipped = requested;
    for axis in 0..3 {
        clipped[2 * axis] = requested[2 * axis].max(whole[2 * axis]);
        clipped[2 * axis + 1] = requested[2 * axis + 1].min(whole[2 * axis + 1]);
    }
    if !extent_is_valid(&clipped) {
        log::warn!(
            "requested extent {requested:?} lies outside {whole:?}; reading the whole extent"
        );
        return *whole;
    }
    if clipped != requested {
        log::warn!("requested extent {requested:?} clipped to {clipped:?}");
    }
    clipped
}

impl HeavyDataReader<'_> {
    pub(crate) fn structured_extents(&self, topology: &TopologyDescriptor) -> StructuredExtents {
        StructuredExtents::compute(
            &topology.shape,
            self.options().requested_extent(),
            self.options().effective_stride(),
        )
    }

    pub(crate) fn read_image(
        &self,
        grid: &GridDescriptor,
        topology: &TopologyDescriptor,
    ) -> Result<ImageData, XdmfError> {
        let geometry = grid
            .geometry
            .as_ref()
            .filter(|g| g.kind.is_origin_spacing())
            .ok_or_else(|| unsupported(grid, "image"))?;
        let extents = self.structured_extents(topology);
        let mut spacing = geometry.output_spacing();
        for (s, &stride) in spacing.iter_mut().zip(&extents.stride) {
            *s *= stride as f64;
        }
        let mut image = ImageData::new(extents.scaled, geometry.output_origin(), spacing);
        self.read_attributes(
            &mut image,
            &grid.attributes,
            topology.dimensionality(),
            Some(&extents),
        );
        Ok(image)
    }

    pub(crate) fn read_rectilinear(
        &self,
        grid: &GridDescriptor,
        topology: &TopologyDescriptor,
    ) -> Result<RectilinearGrid, XdmfError> {
        let geometry = grid
            .geometry
            .as_ref()
            .ok_or_else(|| unsupported(grid, "rectilinear"))?;
        let extents = self.structured_extents(topology);
        let dims = extents.scaled_dims;
        let update = extents.update;
        let stride = extents.stride;
        let [x, y, z] = match geometry.kind {
            GeometryKind::OriginDxDyDz | GeometryKind::OriginDxDy => {
                let origin = geometry.output_origin();
                let spacing = geometry.output_spacing();
                [0, 1, 2].map(|axis| {
                    let step = spacing[axis] * stride[axis] as f64;
                    let first = extents.scaled[2 * axis] as f64;
                    (0..dims[axis])
                        .map(|k| origin[axis] + step * (first + k as f64))
                        .collect::<Vec<f64>>()
                })
            }
            GeometryKind::VxVyVz => [
                self.read_coordinate_slice(geometry.vector(0), update[0], stride[0], dims[0])?,
                self.read_coordinate_slice(geometry.vector(1), update[2], stride[1], dims[1])?,
                self.read_coordinate_slice(geometry.vector(2), update[4], stride[2], dims[2])?,
            ],
            // The 2D vector form fills x from Vy and z from Vx, leaving y at
            // zero. Existing readers depend on this axis order.
            GeometryKind::VxVy => [
                self.read_coordinate_slice(geometry.vector(1), update[0], stride[0], dims[0])?,
                vec![0.0; dims[1]],
                self.read_coordinate_slice(geometry.vector(0), update[4], stride[2], dims[2])?,
            ],
            _ => return Err(unsupported(grid, "rectilinear")),
        };
        let mut rectilinear = RectilinearGrid::new(extents.scaled, x, y, z);
        self.read_attributes(
            &mut rectilinear,
            &grid.attributes,
            topology.dimensionality(),
            Some(&extents),
        );
        Ok(rectilinear)
    }

    pub(crate) fn read_structured(
        &self,
        grid: &GridDescriptor,
        topology: &TopologyDescriptor,
    ) -> Result<StructuredGrid, XdmfError> {
        let geometry = grid
            .geometry
            .as_ref()
            .filter(|g| {
                matches!(
                    g.kind,
                    GeometryKind::Xyz | GeometryKind::Xy | GeometryKind::XYZSeparate
                )
            })
            .ok_or_else(|| unsupported(grid, "structured"))?;
        let extents = self.structured_extents(topology);
        let points = self.read_points(geometry, Some(&extents))?;
        let mut structured = StructuredGrid::new(extents.scaled, points);
        self.read_attributes(
            &mut structured,
            &grid.attributes,
            topology.dimensionality(),
            Some(&extents),
        );
        Ok(structured)
    }

    /// `count` values of a coordinate vector from `start`, every `stride`.
    pub(crate) fn read_coordinate_slice(
        &self,
        vector: Option<&ArrayRef>,
        start: i32,
        stride: i32,
        count: usize,
    ) -> Result<Vec<f64>, XdmfError> {
        let vector =
            vector.ok_or_else(|| XdmfError::MissingArray("coordinate vector".to_string()))?;
        let selection = Selection::Hyperslab {
            start: vec![start.max(0) as usize],
            stride: vec![stride.max(1) as usize],
            count: vec![count],
        };
        Ok(self.arrays().read(vector, &selection)?.data.to_f64_vec())
    }
}

fn unsupported(grid: &GridDescriptor, assembler: &'static str) -> XdmfError {
    let geometry = grid
        .geometry
        .as_ref()
        .map_or(GeometryKind::NoGeometry, |g| g.kind);
    XdmfError::UnsupportedGeometry {
        geometry: geometry.to_string(),
        assembler,
    }
}
