//! Grid-tree walk: dispatch on grid kind, temporal resolution, composite
//! assembly and the domain entry point.

use crate::io::light::{Domain, GridDescriptor, GridKind, StructuredKind};
use crate::io::xdmf::HeavyDataReader;
use crate::mesh::{Composite, DataSet, MeshOutput, UnstructuredMesh};
use crate::mesh_error::XdmfError;

/// Name of the composite slot holding a grid's own dataset when the grid
/// also has sets.
pub(crate) const DATA_BLOCK_NAME: &str = "Data";

/// `true` when leaf number `leaf_index` belongs to `piece`.
pub(crate) fn owns_leaf(leaf_index: usize, piece: usize, number_of_pieces: usize) -> bool {
    number_of_pieces <= 1 || leaf_index % number_of_pieces == piece
}

impl HeavyDataReader<'_> {
    pub(crate) fn read_domain(&self, domain: &Domain) -> Option<MeshOutput> {
        let opts = self.options();
        if opts.is_partitioned()
            && opts.piece != 0
            && domain.is_single_unstructured()
            && !domain.has_sets()
        {
            log::debug!(
                "piece {} of {}: unstructured domain is read by piece 0 only",
                opts.piece,
                opts.number_of_pieces
            );
            return Some(MeshOutput::Unstructured(UnstructuredMesh::new()));
        }
        match domain.grids() {
            [] => {
                log::warn!("domain has no grids");
                Some(MeshOutput::Composite(Composite::new()))
            }
            [single] => self.dispatch(Some(single)),
            grids => Some(MeshOutput::Composite(self.read_children(grids, true))),
        }
    }

    pub(crate) fn dispatch(&self, grid: Option<&GridDescriptor>) -> Option<MeshOutput> {
        let Some(grid) = grid else {
            log::error!("invalid grid: no descriptor");
            return None;
        };
        match grid.kind {
            None => {
                log::error!("invalid grid `{}`: grid kind is unset", grid.name());
                None
            }
            Some(GridKind::TemporalCollection) => self.read_temporal(grid),
            Some(GridKind::SpatialCollection) => Some(MeshOutput::Composite(
                self.read_children(&grid.children, true),
            )),
            Some(GridKind::Tree) => Some(MeshOutput::Composite(
                self.read_children(&grid.children, false),
            )),
            Some(GridKind::Uniform) | Some(GridKind::Subset) => self.read_uniform(grid),
        }
    }

    /// Children valid at the configured time, read in order.
    ///
    /// When no timed child matches, untimed children are taken instead.
    fn read_temporal(&self, grid: &GridDescriptor) -> Option<MeshOutput> {
        let (t, eps) = (self.options().time, self.options().time_epsilon);
        let mut active: Vec<&GridDescriptor> = grid
            .children
            .iter()
            .filter(|c| c.time.is_valid(t, eps))
            .collect();
        if active.is_empty() {
            active = grid.children.iter().filter(|c| c.time.is_unset()).collect();
        }
        log::debug!(
            "temporal collection `{}`: {} of {} children active at t = {t}",
            grid.name(),
            active.len(),
            grid.children.len()
        );
        let mut outputs: Vec<(String, MeshOutput)> = active
            .into_iter()
            .filter_map(|c| self.dispatch(Some(c)).map(|o| (c.name().to_string(), o)))
            .collect();
        match outputs.len() {
            0 => None,
            1 => outputs.pop().map(|(_, o)| o),
            _ => {
                let mut composite = Composite::new();
                for (name, output) in outputs {
                    composite.push(Some(name), Some(output));
                }
                Some(MeshOutput::Composite(composite))
            }
        }
    }

    /// One slot per child. With `distribute` and several pieces, leaves are
    /// dealt out round-robin; every leaf advances the counter whether or not
    /// it is read.
    fn read_children(&self, children: &[GridDescriptor], distribute: bool) -> Composite {
        let opts = self.options();
        let distribute = distribute && opts.is_partitioned();
        let mut composite = Composite::with_blocks(children.len());
        let mut leaf_counter = 0usize;
        for (slot, child) in children.iter().enumerate() {
            composite.set_name(slot, child.name());
            if child.is_leaf() {
                let leaf = leaf_counter;
                leaf_counter += 1;
                if distribute && !owns_leaf(leaf, opts.piece, opts.number_of_pieces) {
                    continue;
                }
                if !self.selections().grids.is_enabled(child.name()) {
                    log::debug!("grid `{}` is disabled", child.name());
                    continue;
                }
            }
            if let Some(output) = self.dispatch(Some(child)) {
                composite.set(slot, output);
            }
        }
        composite
    }

    fn read_uniform(&self, grid: &GridDescriptor) -> Option<MeshOutput> {
        let result = self.assemble(grid);
        for array in grid.array_refs() {
            self.arrays().release(array);
        }
        match result {
            Ok(output) => Some(output),
            Err(err) => {
                log::error!("failed to read grid `{}`: {err}", grid.name());
                None
            }
        }
    }

    fn assemble(&self, grid: &GridDescriptor) -> Result<MeshOutput, XdmfError> {
        let topology = grid
            .topology
            .as_ref()
            .ok_or_else(|| XdmfError::InvalidGrid(format!("`{}` has no topology", grid.name())))?;
        let output = match topology.topology_type.structured_kind() {
            None => self.finish(
                grid,
                self.read_unstructured(grid, topology)?,
                MeshOutput::Unstructured,
            ),
            Some(StructuredKind::Image) => {
                self.finish(grid, self.read_image(grid, topology)?, MeshOutput::Image)
            }
            Some(StructuredKind::Rectilinear) => self.finish(
                grid,
                self.read_rectilinear(grid, topology)?,
                MeshOutput::Rectilinear,
            ),
            Some(StructuredKind::Curvilinear) => self.finish(
                grid,
                self.read_structured(grid, topology)?,
                MeshOutput::Structured,
            ),
        };
        Ok(output)
    }

    /// Apply ghost sets, extract named sets, and wrap the dataset together
    /// with its sets when there are any.
    fn finish<D: DataSet>(
        &self,
        grid: &GridDescriptor,
        mut dataset: D,
        wrap: impl FnOnce(D) -> MeshOutput,
    ) -> MeshOutput {
        self.read_ghost_sets(&mut dataset, &grid.sets);
        let sets = self.read_sets(&dataset, &grid.sets);
        let base = wrap(dataset);
        if sets.is_empty() {
            return base;
        }
        let mut composite = Composite::new();
        composite.push(Some(DATA_BLOCK_NAME.to_string()), Some(base));
        for block in sets {
            composite.push(block.name, block.data);
        }
        MeshOutput::Composite(composite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_covers_every_leaf_once() {
        for pieces in 1..6 {
            for leaf in 0..20 {
                let owners = (0..pieces).filter(|&p| owns_leaf(leaf, p, pieces)).count();
                assert_eq!(owners, 1);
            }
        }
    }
}
