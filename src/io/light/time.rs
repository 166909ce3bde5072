//! Time specifications of grids.

use serde::{Deserialize, Serialize};

/// When a grid is valid.
///
/// Every kind reduces to a closed interval; a query time `t` matches when it
/// lies inside the interval widened by an epsilon on both sides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum TimeSpec {
    /// No time given.
    #[default]
    Unset,
    Single(f64),
    /// Explicit instants; valid over their min..max span.
    List(Vec<f64>),
    /// `count` instants `start + k * stride`.
    HyperSlab { start: f64, stride: f64, count: usize },
    Range { min: f64, max: f64 },
}

impl TimeSpec {
    pub fn is_unset(&self) -> bool {
        matches!(self, TimeSpec::Unset)
    }

    /// Closed validity interval, or `None` when unset or empty.
    pub fn interval(&self) -> Option<(f64, f64)> {
        match self {
            TimeSpec::Unset => None,
            TimeSpec::Single(t) => Some((*t, *t)),
            TimeSpec::List(values) => {
                let min = values.iter().copied().reduce(f64::min)?;
                let max = values.iter().copied().reduce(f64::max)?;
                Some((min, max))
            }
            TimeSpec::HyperSlab {
                start,
                stride,
                count,
            } => {
                if *count == 0 {
                    return None;
                }
                let last = start + stride * (*count as f64 - 1.0);
                Some((start.min(last), start.max(last)))
            }
            TimeSpec::Range { min, max } => Some((min.min(*max), min.max(*max))),
        }
    }

    /// `true` when `t` lies within the validity interval, widened by
    /// `epsilon` on both sides.
    pub fn is_valid(&self, t: f64, epsilon: f64) -> bool {
        self.interval()
            .is_some_and(|(lo, hi)| lo - epsilon <= t && t <= hi + epsilon)
    }

    /// Instants this specification names, in declaration order.
    pub fn time_steps(&self) -> Vec<f64> {
        match self {
            TimeSpec::Unset => Vec::new(),
            TimeSpec::Single(t) => vec![*t],
            TimeSpec::List(values) => values.clone(),
            TimeSpec::HyperSlab {
                start,
                stride,
                count,
            } => (0..*count).map(|k| start + stride * k as f64).collect(),
            TimeSpec::Range { min, max } => vec![*min, *max],
        }
    }
}
