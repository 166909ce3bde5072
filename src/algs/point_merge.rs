//! Tolerance-based point merging.
//!
//! Points are hashed into cubic bins of edge `tolerance`; a lookup scans the
//! 27 bins around the query so every stored point within `tolerance` is
//! found.

use hashbrown::HashMap;

use crate::data::array::NumberType;
use crate::data::points::Points;

/// Relative tolerance applied to a bounding box diagonal.
pub const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Incrementally built point set without near-duplicates.
#[derive(Debug)]
pub struct PointMerger {
    origin: [f64; 3],
    tolerance: f64,
    bins: HashMap<[i64; 3], Vec<usize>>,
    points: Points,
}

impl PointMerger {
    /// Merger for points inside `bounds`, with a tolerance scaled to the
    /// bounds diagonal.
    pub fn for_bounds(bounds: [f64; 6], precision: NumberType) -> Self {
        let diagonal = (0..3)
            .map(|a| (bounds[2 * a + 1] - bounds[2 * a]).powi(2))
            .sum::<f64>()
            .sqrt();
        let tolerance = (diagonal * RELATIVE_TOLERANCE).max(f64::MIN_POSITIVE);
        Self::new([bounds[0], bounds[2], bounds[4]], tolerance, precision)
    }

    pub fn new(origin: [f64; 3], tolerance: f64, precision: NumberType) -> Self {
        Self {
            origin,
            tolerance,
            bins: HashMap::new(),
            points: Points::with_capacity(precision, 0),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn bin(&self, p: [f64; 3]) -> [i64; 3] {
        [0, 1, 2].map(|a| ((p[a] - self.origin[a]) / self.tolerance).floor() as i64)
    }

    /// Index of a stored point within tolerance of `p`, inserting `p` when
    /// there is none.
    pub fn insert(&mut self, p: [f64; 3]) -> usize {
        let key = self.bin(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let near = [key[0] + dx, key[1] + dy, key[2] + dz];
                    let Some(candidates) = self.bins.get(&near) else {
                        continue;
                    };
                    for &id in candidates {
                        let Some(q) = self.points.get(id) else { continue };
                        let d2: f64 = (0..3).map(|a| (p[a] - q[a]).powi(2)).sum();
                        if d2 <= self.tolerance * self.tolerance {
                            return id;
                        }
                    }
                }
            }
        }
        let id = self.points.len();
        self.points.push(p);
        self.bins.entry(key).or_default().push(id);
        id
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Points {
        self.points
    }
}
