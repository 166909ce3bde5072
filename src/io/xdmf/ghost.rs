//! Ghost markers.
//!
//! A set with a nonzero ghost flag marks its points or cells as ghosts of
//! that level in a byte array on the matching field bucket.

use crate::data::array::{ArrayData, DataArray};
use crate::data::field::FieldData;
use crate::io::light::{SetDescriptor, SetKind};
use crate::io::xdmf::HeavyDataReader;
use crate::mesh::DataSet;

/// Name of the per-point / per-cell ghost level array.
pub const GHOST_ARRAY_NAME: &str = "vtkGhostLevels";

/// Set `ghost[id] = level` for every id in `0..count`, creating a zeroed
/// ghost array on `bucket` first if it is missing or mis-sized.
///
/// Returns the number of ids that were out of range and skipped.
pub fn apply_ghost_levels(bucket: &mut FieldData, count: usize, ids: &[i64], level: u8) -> usize {
    let usable = bucket.get(GHOST_ARRAY_NAME).is_some_and(|a| {
        a.components == 1 && a.number_of_tuples() == count && matches!(a.data, ArrayData::U8(_))
    });
    if !usable {
        bucket.add_array(DataArray {
            name: GHOST_ARRAY_NAME.to_string(),
            components: 1,
            data: ArrayData::U8(vec![0; count]),
        });
    }
    let Some(ArrayData::U8(ghosts)) = bucket.get_mut(GHOST_ARRAY_NAME).map(|a| &mut a.data) else {
        return ids.len();
    };
    let mut skipped = 0;
    for &id in ids {
        match usize::try_from(id).ok().filter(|&i| i < count) {
            Some(i) => ghosts[i] = level,
            None => skipped += 1,
        }
    }
    skipped
}

impl HeavyDataReader<'_> {
    /// Apply every ghost set of a grid to `dataset`.
    pub(crate) fn read_ghost_sets(&self, dataset: &mut dyn DataSet, sets: &[SetDescriptor]) {
        let mut found = false;
        for set in sets.iter().filter(|s| s.is_ghost()) {
            found = true;
            let count = match set.kind {
                SetKind::Node => dataset.number_of_points(),
                SetKind::Cell => dataset.number_of_cells(),
                SetKind::Face | SetKind::Edge => {
                    log::warn!(
                        "ghost set `{}`: {:?} ghost sets are not supported",
                        set.name,
                        set.kind
                    );
                    continue;
                }
            };
            let ids = match self
                .arrays()
                .read_all(&set.ids)
                .and_then(|h| h.data.to_i64_vec(set.ids.as_str()))
            {
                Ok(ids) => ids,
                Err(err) => {
                    log::warn!("skipping ghost set `{}`: {err}", set.name);
                    continue;
                }
            };
            let level = u8::try_from(set.ghost.clamp(0, i32::from(u8::MAX))).unwrap_or(u8::MAX);
            let bucket = match set.kind {
                SetKind::Node => dataset.point_data_mut(),
                _ => dataset.cell_data_mut(),
            };
            let skipped = apply_ghost_levels(bucket, count, &ids, level);
            if skipped > 0 {
                log::warn!(
                    "ghost set `{}`: {skipped} ids outside 0..{count} skipped",
                    set.name
                );
            }
        }
        if !found && self.options().ghost_levels > 0 {
            log::debug!(
                "{} ghost levels requested but the grid defines no ghost sets",
                self.options().ghost_levels
            );
        }
    }
}
