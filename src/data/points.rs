//! Point coordinate storage.

use crate::data::array::{ArrayData, NumberType};

/// Flat `(x, y, z)` triples stored in the precision the geometry declared.
#[derive(Clone, Debug, PartialEq)]
pub enum Points {
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl Default for Points {
    fn default() -> Self {
        Points::F64(Vec::new())
    }
}

impl Points {
    /// `count` points at the origin.
    ///
    /// Any non-float `number_type` is stored as 64-bit.
    pub fn zeros(number_type: NumberType, count: usize) -> Self {
        match number_type {
            NumberType::Float32 => Points::F32(vec![0.0; count * 3]),
            _ => Points::F64(vec![0.0; count * 3]),
        }
    }

    /// Empty storage with room for `count` points.
    pub fn with_capacity(number_type: NumberType, count: usize) -> Self {
        match number_type {
            NumberType::Float32 => Points::F32(Vec::with_capacity(count * 3)),
            _ => Points::F64(Vec::with_capacity(count * 3)),
        }
    }

    /// Interpret a flat float buffer as triples.
    ///
    /// Integer buffers are widened to 64-bit.
    pub fn from_array(data: ArrayData) -> Self {
        match data {
            ArrayData::F32(v) => Points::F32(v),
            ArrayData::F64(v) => Points::F64(v),
            other => Points::F64(other.to_f64_vec()),
        }
    }

    pub fn number_type(&self) -> NumberType {
        match self {
            Points::F32(_) => NumberType::Float32,
            Points::F64(_) => NumberType::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Points::F32(v) => v.len() / 3,
            Points::F64(v) => v.len() / 3,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<[f64; 3]> {
        if index >= self.len() {
            return None;
        }
        let i = index * 3;
        Some(match self {
            Points::F32(v) => [v[i] as f64, v[i + 1] as f64, v[i + 2] as f64],
            Points::F64(v) => [v[i], v[i + 1], v[i + 2]],
        })
    }

    /// Overwrite point `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, p: [f64; 3]) {
        if index >= self.len() {
            return;
        }
        let i = index * 3;
        match self {
            Points::F32(v) => {
                v[i] = p[0] as f32;
                v[i + 1] = p[1] as f32;
                v[i + 2] = p[2] as f32;
            }
            Points::F64(v) => v[i..i + 3].copy_from_slice(&p),
        }
    }

    pub fn push(&mut self, p: [f64; 3]) {
        match self {
            Points::F32(v) => v.extend(p.iter().map(|&c| c as f32)),
            Points::F64(v) => v.extend_from_slice(&p),
        }
    }

    /// Copy point `src_index` of `src` into slot `index`, keeping the exact
    /// stored value when both sides share a precision.
    pub fn copy_from(&mut self, index: usize, src: &Points, src_index: usize) {
        if index >= self.len() || src_index >= src.len() {
            return;
        }
        let (i, j) = (index * 3, src_index * 3);
        match (self, src) {
            (Points::F32(dst), Points::F32(s)) => dst[i..i + 3].copy_from_slice(&s[j..j + 3]),
            (Points::F64(dst), Points::F64(s)) => dst[i..i + 3].copy_from_slice(&s[j..j + 3]),
            (dst, s) => {
                if let Some(p) = s.get(src_index) {
                    dst.set(index, p);
                }
            }
        }
    }

    /// Axis-aligned bounds `[xmin, xmax, ymin, ymax, zmin, zmax]`.
    pub fn bounds(&self) -> Option<[f64; 6]> {
        let mut iter = (0..self.len()).filter_map(|i| self.get(i));
        let first = iter.next()?;
        let mut b = [first[0], first[0], first[1], first[1], first[2], first[2]];
        for p in iter {
            for axis in 0..3 {
                b[2 * axis] = b[2 * axis].min(p[axis]);
                b[2 * axis + 1] = b[2 * axis + 1].max(p[axis]);
            }
        }
        Some(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_survives_copy() {
        let src = Points::F32(vec![0.1, 0.2, 0.3]);
        let mut dst = Points::zeros(NumberType::Float32, 2);
        dst.copy_from(1, &src, 0);
        assert_eq!(dst, Points::F32(vec![0.0, 0.0, 0.0, 0.1, 0.2, 0.3]));
    }

    #[test]
    fn bounds_cover_all_points() {
        let pts = Points::F64(vec![0.0, 1.0, 2.0, -1.0, 5.0, 0.5]);
        assert_eq!(pts.bounds(), Some([-1.0, 0.0, 1.0, 5.0, 0.5, 2.0]));
        assert_eq!(Points::default().bounds(), None);
    }
}
