//! Offsets + connectivity cell storage.

/// Cells stored as one flat connectivity buffer and per-cell end offsets.
///
/// Cell `i` spans `connectivity[offsets[i]..offsets[i + 1]]`; `offsets`
/// always starts with `0` and holds `num_cells() + 1` entries.
#[derive(Clone, Debug, PartialEq)]
pub struct CellArray {
    offsets: Vec<usize>,
    connectivity: Vec<i64>,
}

impl Default for CellArray {
    fn default() -> Self {
        Self {
            offsets: vec![0],
            connectivity: Vec::new(),
        }
    }
}

impl CellArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Room for `cells` cells with `entries` point ids in total.
    pub fn with_capacity(cells: usize, entries: usize) -> Self {
        let mut offsets = Vec::with_capacity(cells + 1);
        offsets.push(0);
        Self {
            offsets,
            connectivity: Vec::with_capacity(entries),
        }
    }

    /// Cells of a fixed size read from a flat stream in `width`-sized chunks.
    pub fn from_fixed(stream: Vec<i64>, width: usize) -> Self {
        let cells = if width == 0 { 0 } else { stream.len() / width };
        let offsets = (0..=cells).map(|c| c * width).collect();
        let mut connectivity = stream;
        connectivity.truncate(cells * width);
        Self {
            offsets,
            connectivity,
        }
    }

    pub fn push_cell(&mut self, points: &[i64]) {
        self.connectivity.extend_from_slice(points);
        self.offsets.push(self.connectivity.len());
    }

    pub fn num_cells(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.num_cells() == 0
    }

    pub fn cell(&self, index: usize) -> Option<&[i64]> {
        let start = *self.offsets.get(index)?;
        let end = *self.offsets.get(index + 1)?;
        Some(&self.connectivity[start..end])
    }

    pub fn iter(&self) -> impl Iterator<Item = &[i64]> {
        self.offsets
            .windows(2)
            .map(|w| &self.connectivity[w[0]..w[1]])
    }

    pub fn connectivity(&self) -> &[i64] {
        &self.connectivity
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Length of the legacy `[n, p0, .., pn-1, ...]` layout of these cells.
    pub fn legacy_len(&self) -> usize {
        self.num_cells() + self.connectivity.len()
    }

    /// Drop spare capacity once all cells are in.
    pub fn shrink_to_fit(&mut self) {
        self.offsets.shrink_to_fit();
        self.connectivity.shrink_to_fit();
    }
}
