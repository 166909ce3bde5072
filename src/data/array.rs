//! Typed numeric buffers.
//!
//! Heavy arrays keep the element type declared by their source. [`ArrayData`]
//! is the sum of the supported element types; [`DataArray`] adds a name and a
//! tuple width so it can be attached to a field bucket.

use num_traits::{NumCast, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::mesh_error::XdmfError;

/// Element type of a heavy array.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum NumberType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
}

impl NumberType {
    /// Size of one element in bytes.
    pub fn size(self) -> usize {
        match self {
            NumberType::Int8 | NumberType::UInt8 => 1,
            NumberType::Int16 | NumberType::UInt16 => 2,
            NumberType::Int32 | NumberType::UInt32 | NumberType::Float32 => 4,
            NumberType::Int64 | NumberType::UInt64 | NumberType::Float64 => 8,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, NumberType::Float32 | NumberType::Float64)
    }
}

/// A flat buffer in one of the supported element types.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayData {
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Apply `$body` to the inner vector of every variant.
macro_rules! dispatch {
    ($value:expr, $v:ident => $body:expr) => {
        match $value {
            ArrayData::I8($v) => $body,
            ArrayData::I16($v) => $body,
            ArrayData::I32($v) => $body,
            ArrayData::I64($v) => $body,
            ArrayData::U8($v) => $body,
            ArrayData::U16($v) => $body,
            ArrayData::U32($v) => $body,
            ArrayData::U64($v) => $body,
            ArrayData::F32($v) => $body,
            ArrayData::F64($v) => $body,
        }
    };
}

/// Like `dispatch!`, but re-wraps the produced vector in the same variant.
macro_rules! map_same {
    ($value:expr, $v:ident => $body:expr) => {
        match $value {
            ArrayData::I8($v) => ArrayData::I8($body),
            ArrayData::I16($v) => ArrayData::I16($body),
            ArrayData::I32($v) => ArrayData::I32($body),
            ArrayData::I64($v) => ArrayData::I64($body),
            ArrayData::U8($v) => ArrayData::U8($body),
            ArrayData::U16($v) => ArrayData::U16($body),
            ArrayData::U32($v) => ArrayData::U32($body),
            ArrayData::U64($v) => ArrayData::U64($body),
            ArrayData::F32($v) => ArrayData::F32($body),
            ArrayData::F64($v) => ArrayData::F64($body),
        }
    };
}

fn gather<T: Copy>(values: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| values[i]).collect()
}

fn cast_all<T: ToPrimitive + Copy, U: NumCast>(values: &[T]) -> Option<Vec<U>> {
    values.iter().map(|&v| U::from(v)).collect()
}

impl ArrayData {
    /// Zero-filled buffer of `len` elements.
    pub fn zeros(number_type: NumberType, len: usize) -> Self {
        match number_type {
            NumberType::Int8 => ArrayData::I8(vec![0; len]),
            NumberType::Int16 => ArrayData::I16(vec![0; len]),
            NumberType::Int32 => ArrayData::I32(vec![0; len]),
            NumberType::Int64 => ArrayData::I64(vec![0; len]),
            NumberType::UInt8 => ArrayData::U8(vec![0; len]),
            NumberType::UInt16 => ArrayData::U16(vec![0; len]),
            NumberType::UInt32 => ArrayData::U32(vec![0; len]),
            NumberType::UInt64 => ArrayData::U64(vec![0; len]),
            NumberType::Float32 => ArrayData::F32(vec![0.0; len]),
            NumberType::Float64 => ArrayData::F64(vec![0.0; len]),
        }
    }

    pub fn number_type(&self) -> NumberType {
        match self {
            ArrayData::I8(_) => NumberType::Int8,
            ArrayData::I16(_) => NumberType::Int16,
            ArrayData::I32(_) => NumberType::Int32,
            ArrayData::I64(_) => NumberType::Int64,
            ArrayData::U8(_) => NumberType::UInt8,
            ArrayData::U16(_) => NumberType::UInt16,
            ArrayData::U32(_) => NumberType::UInt32,
            ArrayData::U64(_) => NumberType::UInt64,
            ArrayData::F32(_) => NumberType::Float32,
            ArrayData::F64(_) => NumberType::Float64,
        }
    }

    pub fn len(&self) -> usize {
        dispatch!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `index` widened to `f64`.
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        dispatch!(self, v => v.get(index).and_then(|x| x.to_f64()))
    }

    /// Value at `index` as `i64`, if it is integral and in range.
    pub fn get_i64(&self, index: usize) -> Option<i64> {
        dispatch!(self, v => v.get(index).and_then(|x| x.to_i64()))
    }

    /// All values converted to `i64`.
    ///
    /// Fails when a value has no exact `i64` representation.
    pub fn to_i64_vec(&self, name: &str) -> Result<Vec<i64>, XdmfError> {
        let mismatch = || XdmfError::NumberTypeMismatch {
            array: name.to_string(),
            number_type: self.number_type(),
            expected: "integer ids",
        };
        match self {
            ArrayData::I64(v) => Ok(v.clone()),
            ArrayData::F32(_) | ArrayData::F64(_) => Err(mismatch()),
            other => dispatch!(other, v => cast_all::<_, i64>(v)).ok_or_else(mismatch),
        }
    }

    /// All values widened to `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        dispatch!(self, v => v.iter().map(|x| x.to_f64().unwrap_or(f64::NAN)).collect())
    }

    /// New buffer of the same type holding `self[indices[k]]` at position `k`.
    ///
    /// Every index must be in bounds.
    pub fn gather(&self, indices: &[usize]) -> ArrayData {
        map_same!(self, v => gather(v, indices))
    }

    /// Keep the first `len` values.
    pub fn truncate(&mut self, len: usize) {
        dispatch!(self, v => v.truncate(len))
    }
}

/// A named array of `components`-wide tuples.
#[derive(Clone, Debug, PartialEq)]
pub struct DataArray {
    pub name: String,
    pub components: usize,
    pub data: ArrayData,
}

impl DataArray {
    /// Wrap `data` as `components`-wide tuples.
    ///
    /// Fails when the buffer length is not a multiple of `components`.
    pub fn new(
        name: impl Into<String>,
        components: usize,
        data: ArrayData,
    ) -> Result<Self, XdmfError> {
        let name = name.into();
        let components = components.max(1);
        if data.len() % components != 0 {
            return Err(XdmfError::ComponentMismatch {
                array: name,
                len: data.len(),
                components,
            });
        }
        Ok(Self {
            name,
            components,
            data,
        })
    }

    pub fn number_of_tuples(&self) -> usize {
        self.data.len() / self.components
    }

    pub fn number_type(&self) -> NumberType {
        self.data.number_type()
    }

    /// Tuple `index` widened to `f64`.
    pub fn tuple_f64(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.number_of_tuples() {
            return None;
        }
        let start = index * self.components;
        (start..start + self.components)
            .map(|i| self.data.get_f64(i))
            .collect()
    }

    /// New array holding the selected tuples, in selection order.
    ///
    /// `None` when a tuple index is out of range.
    pub fn gather_tuples(&self, tuples: &[usize]) -> Option<DataArray> {
        let n = self.number_of_tuples();
        if tuples.iter().any(|&t| t >= n) {
            return None;
        }
        let indices: Vec<usize> = tuples
            .iter()
            .flat_map(|&t| (t * self.components)..(t + 1) * self.components)
            .collect();
        Some(DataArray {
            name: self.name.clone(),
            components: self.components,
            data: self.data.gather(&indices),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_conversion_rejects_floats() {
        let floats = ArrayData::F32(vec![1.0, 2.0]);
        assert!(floats.to_i64_vec("ids").is_err());
        let ints = ArrayData::U16(vec![3, 4]);
        assert_eq!(ints.to_i64_vec("ids").unwrap(), vec![3, 4]);
    }

    #[test]
    fn gather_keeps_element_type() {
        let data = ArrayData::I32(vec![10, 11, 12, 13]);
        assert_eq!(data.gather(&[3, 1]), ArrayData::I32(vec![13, 11]));
    }

    #[test]
    fn tuples_are_gathered_whole() {
        let arr = DataArray::new("v", 2, ArrayData::F64(vec![0., 1., 2., 3., 4., 5.])).unwrap();
        let picked = arr.gather_tuples(&[2, 0]).unwrap();
        assert_eq!(picked.data, ArrayData::F64(vec![4., 5., 0., 1.]));
        assert_eq!(picked.number_of_tuples(), 2);
        assert!(arr.gather_tuples(&[3]).is_none());
    }

    #[test]
    fn component_mismatch_is_reported() {
        let err = DataArray::new("t", 3, ArrayData::F64(vec![0.0; 4])).unwrap_err();
        assert!(matches!(err, XdmfError::ComponentMismatch { len: 4, .. }));
    }
}
