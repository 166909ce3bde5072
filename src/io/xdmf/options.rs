//! Reader configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::mesh::structured::{EMPTY_EXTENT, Extent, extent_is_valid};

/// Default half-width of the temporal matching window.
pub const DEFAULT_TIME_EPSILON: f64 = 1e-7;

/// Grids visited before metadata collection switches to coarse mode.
pub const MAX_COLLECTABLE_GRIDS: usize = 1000;

/// Partitioning, extent and time parameters of a read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Index of the piece this process reads.
    pub piece: usize,
    pub number_of_pieces: usize,
    pub ghost_levels: usize,
    /// Requested structured sub-extent; ignored unless valid on every axis.
    pub update_extent: Extent,
    pub stride: [i32; 3],
    /// Instant matched against temporal collections.
    pub time: f64,
    pub time_epsilon: f64,
    pub max_collectable_grids: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            piece: 0,
            number_of_pieces: 1,
            ghost_levels: 0,
            update_extent: EMPTY_EXTENT,
            stride: [1, 1, 1],
            time: 0.0,
            time_epsilon: DEFAULT_TIME_EPSILON,
            max_collectable_grids: MAX_COLLECTABLE_GRIDS,
        }
    }
}

impl ReadOptions {
    pub fn with_piece(mut self, piece: usize, number_of_pieces: usize) -> Self {
        self.piece = piece;
        self.number_of_pieces = number_of_pieces;
        self
    }

    pub fn with_update_extent(mut self, extent: Extent) -> Self {
        self.update_extent = extent;
        self
    }

    pub fn with_stride(mut self, stride: [i32; 3]) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// `true` when more than one piece shares the read.
    pub fn is_partitioned(&self) -> bool {
        self.number_of_pieces > 1
    }

    /// The update extent, if it is valid.
    pub fn requested_extent(&self) -> Option<Extent> {
        extent_is_valid(&self.update_extent).then_some(self.update_extent)
    }

    /// Stride with every component at least `1`.
    pub fn effective_stride(&self) -> [i32; 3] {
        self.stride.map(|s| s.max(1))
    }
}

/// Name-keyed enable flags; names never set are enabled.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArraySelection(BTreeMap<String, bool>);

impl ArraySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(true)
    }

    pub fn set(&mut self, name: impl Into<String>, enabled: bool) {
        self.0.insert(name.into(), enabled);
    }

    pub fn enable(&mut self, name: impl Into<String>) {
        self.set(name, true);
    }

    pub fn disable(&mut self, name: impl Into<String>) {
        self.set(name, false);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// The four selections a read consults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selections {
    pub point_arrays: ArraySelection,
    pub cell_arrays: ArraySelection,
    pub grids: ArraySelection,
    pub sets: ArraySelection,
}
