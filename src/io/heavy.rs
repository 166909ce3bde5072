//! Heavy-array access.
//!
//! Light data refers to bulk arrays through opaque [`ArrayRef`] tags. A
//! [`HeavyArrayReader`] resolves a tag, optionally restricted by a hyperslab
//! [`Selection`], into a typed [`HeavyArray`]. The on-disk codec lives behind
//! this trait; [`InMemoryArrayStore`] is the in-process implementation.

use std::cell::RefCell;
use std::fmt;

use hashbrown::HashMap;

use crate::data::array::{ArrayData, NumberType};
use crate::mesh_error::XdmfError;

/// Opaque reference to a heavy array (for HDF5 data, `file.h5:/group/dataset`).
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct ArrayRef(String);

impl ArrayRef {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArrayRef {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Which elements of an array to read.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    /// The whole array.
    All,
    /// A regular strided sub-region; one entry per dimension.
    ///
    /// - `start[d]`: first element index
    /// - `stride[d]`: step between selected elements
    /// - `count[d]`: number of selected elements
    Hyperslab {
        start: Vec<usize>,
        stride: Vec<usize>,
        count: Vec<usize>,
    },
}

impl Selection {
    /// Number of selected elements for an array of the given shape.
    pub fn num_elements(&self, shape: &[usize]) -> usize {
        match self {
            Selection::All => shape.iter().product(),
            Selection::Hyperslab { count, .. } => count.iter().product(),
        }
    }

    /// Shape of the selected region.
    pub fn output_shape(&self, shape: &[usize]) -> Vec<usize> {
        match self {
            Selection::All => shape.to_vec(),
            Selection::Hyperslab { count, .. } => count.clone(),
        }
    }

    /// Row-major flat indices of the selected elements in an array of
    /// `shape`, in output order.
    pub fn flat_indices(&self, array: &str, shape: &[usize]) -> Result<Vec<usize>, XdmfError> {
        let (start, stride, count) = match self {
            Selection::All => return Ok((0..shape.iter().product()).collect()),
            Selection::Hyperslab {
                start,
                stride,
                count,
            } => (start, stride, count),
        };
        let rank = shape.len();
        if start.len() != rank || stride.len() != rank || count.len() != rank {
            return Err(XdmfError::RankMismatch {
                array: array.to_string(),
                rank,
                dimensionality: start.len(),
            });
        }
        for d in 0..rank {
            if count[d] == 0 {
                continue;
            }
            let last = (count[d] - 1)
                .checked_mul(stride[d].max(1))
                .and_then(|span| span.checked_add(start[d]));
            if last.is_none_or(|last| last >= shape[d]) {
                return Err(XdmfError::SelectionOutOfBounds {
                    array: array.to_string(),
                    dimension: d,
                });
            }
        }
        let total: usize = count.iter().product();
        let mut out = Vec::with_capacity(total);
        if total == 0 {
            return Ok(out);
        }
        let mut pitch = vec![1usize; rank];
        for d in (0..rank.saturating_sub(1)).rev() {
            pitch[d] = pitch[d + 1] * shape[d + 1];
        }
        let mut counter = vec![0usize; rank];
        loop {
            let flat = (0..rank)
                .map(|d| (start[d] + counter[d] * stride[d].max(1)) * pitch[d])
                .sum();
            out.push(flat);
            // odometer, last dimension fastest
            let mut d = rank;
            loop {
                if d == 0 {
                    return Ok(out);
                }
                d -= 1;
                counter[d] += 1;
                if counter[d] < count[d] {
                    break;
                }
                counter[d] = 0;
            }
        }
    }
}

/// Element type and shape of a heavy array.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayInfo {
    pub number_type: NumberType,
    pub shape: Vec<usize>,
}

impl ArrayInfo {
    pub fn rank(&self) -> usize {
        self.shape.len()
    }
}

/// A materialized heavy array.
#[derive(Clone, Debug, PartialEq)]
pub struct HeavyArray {
    pub shape: Vec<usize>,
    pub data: ArrayData,
}

impl HeavyArray {
    /// Wrap `data` with `shape`; the element counts must agree.
    pub fn new(shape: Vec<usize>, data: ArrayData) -> Result<Self, XdmfError> {
        let expected = shape.iter().try_fold(1usize, |n, &d| n.checked_mul(d));
        if expected != Some(data.len()) {
            return Err(XdmfError::HeavyRead {
                array: String::new(),
                reason: format!(
                    "shape {shape:?} does not fit a buffer of {} values",
                    data.len()
                ),
            });
        }
        Ok(Self { shape, data })
    }

    /// A rank-1 array.
    pub fn flat(data: ArrayData) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn info(&self) -> ArrayInfo {
        ArrayInfo {
            number_type: self.data.number_type(),
            shape: self.shape.clone(),
        }
    }
}

/// Source of heavy arrays.
pub trait HeavyArrayReader {
    /// Element type and shape without reading the payload.
    fn describe(&self, array: &ArrayRef) -> Result<ArrayInfo, XdmfError>;

    /// Read the selected part of `array`.
    fn read(&self, array: &ArrayRef, selection: &Selection) -> Result<HeavyArray, XdmfError>;

    /// Drop any buffered payload of `array`.
    fn release(&self, _array: &ArrayRef) {}

    /// Read the whole array.
    fn read_all(&self, array: &ArrayRef) -> Result<HeavyArray, XdmfError> {
        self.read(array, &Selection::All)
    }
}

/// Heavy arrays held in memory, keyed by reference.
///
/// The last selection read from each array is kept materialized until the
/// array is released. Every read and release is logged so callers can
/// inspect which selections were issued.
#[derive(Debug, Default)]
pub struct InMemoryArrayStore {
    arrays: HashMap<ArrayRef, HeavyArray>,
    cache: RefCell<HashMap<ArrayRef, (Selection, HeavyArray)>>,
    reads: RefCell<Vec<(ArrayRef, Selection)>>,
    released: RefCell<Vec<ArrayRef>>,
}

impl InMemoryArrayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `array` under `tag`, replacing any previous entry.
    pub fn insert(&mut self, tag: impl Into<ArrayRef>, array: HeavyArray) -> ArrayRef {
        let tag = tag.into();
        self.cache.get_mut().remove(&tag);
        self.arrays.insert(tag.clone(), array);
        tag
    }

    /// Store a rank-1 array.
    pub fn insert_flat(&mut self, tag: impl Into<ArrayRef>, data: ArrayData) -> ArrayRef {
        self.insert(tag, HeavyArray::flat(data))
    }

    /// Store an array with an explicit shape.
    pub fn insert_shaped(
        &mut self,
        tag: impl Into<ArrayRef>,
        shape: Vec<usize>,
        data: ArrayData,
    ) -> Result<ArrayRef, XdmfError> {
        let tag = tag.into();
        let array = HeavyArray::new(shape, data).map_err(|err| match err {
            XdmfError::HeavyRead { reason, .. } => XdmfError::HeavyRead {
                array: tag.to_string(),
                reason,
            },
            other => other,
        })?;
        Ok(self.insert(tag, array))
    }

    pub fn contains(&self, tag: &ArrayRef) -> bool {
        self.arrays.contains_key(tag)
    }

    /// `true` while a read of `tag` is materialized and not yet released.
    pub fn is_cached(&self, tag: &ArrayRef) -> bool {
        self.cache.borrow().contains_key(tag)
    }

    /// Reads issued so far, oldest first.
    pub fn read_log(&self) -> Vec<(ArrayRef, Selection)> {
        self.reads.borrow().clone()
    }

    /// Releases issued so far, oldest first.
    pub fn release_log(&self) -> Vec<ArrayRef> {
        self.released.borrow().clone()
    }

    pub fn clear_logs(&self) {
        self.reads.borrow_mut().clear();
        self.released.borrow_mut().clear();
    }
}

impl HeavyArrayReader for InMemoryArrayStore {
    fn describe(&self, array: &ArrayRef) -> Result<ArrayInfo, XdmfError> {
        self.arrays
            .get(array)
            .map(HeavyArray::info)
            .ok_or_else(|| XdmfError::MissingArray(array.to_string()))
    }

    fn read(&self, array: &ArrayRef, selection: &Selection) -> Result<HeavyArray, XdmfError> {
        let stored = self
            .arrays
            .get(array)
            .ok_or_else(|| XdmfError::MissingArray(array.to_string()))?;
        self.reads
            .borrow_mut()
            .push((array.clone(), selection.clone()));
        if let Some((cached, values)) = self.cache.borrow().get(array) {
            if cached == selection {
                log::trace!("reading `{array}` with {selection:?} from cache");
                return Ok(values.clone());
            }
        }
        log::trace!("reading `{array}` with {selection:?}");
        let values = match selection {
            Selection::All => stored.clone(),
            Selection::Hyperslab { .. } => {
                let indices = selection.flat_indices(array.as_str(), &stored.shape)?;
                HeavyArray {
                    shape: selection.output_shape(&stored.shape),
                    data: stored.data.gather(&indices),
                }
            }
        };
        self.cache
            .borrow_mut()
            .insert(array.clone(), (selection.clone(), values.clone()));
        Ok(values)
    }

    fn release(&self, array: &ArrayRef) {
        self.cache.borrow_mut().remove(array);
        self.released.borrow_mut().push(array.clone());
    }
}
