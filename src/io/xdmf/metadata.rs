//! Domain metadata collection.
//!
//! Gathers the names a caller needs to build its selections (grids,
//! point/cell arrays, sets) and the time steps of a domain without reading
//! any heavy data. Once more than `limit` grids have been visited the walk
//! restarts in coarse mode, which only looks at the top-level grids and the
//! first leaf below each collection.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::io::light::{Center, Domain, GridDescriptor};

/// Names and time steps of a domain.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainMetadata {
    /// Leaf grid names, first occurrence order.
    pub grids: Vec<String>,
    pub point_arrays: Vec<String>,
    pub cell_arrays: Vec<String>,
    /// Non-ghost set names.
    pub sets: Vec<String>,
    /// Sorted, without duplicates.
    pub time_steps: Vec<f64>,
    /// `true` when the grid limit was hit and only a coarse walk was made.
    pub coarse: bool,
}

#[derive(Debug)]
struct LimitExceeded;

#[derive(Default)]
struct Gathered {
    grids: Vec<String>,
    point_arrays: Vec<String>,
    cell_arrays: Vec<String>,
    sets: Vec<String>,
    time_steps: Vec<f64>,
}

impl Gathered {
    fn record(&mut self, grid: &GridDescriptor) {
        self.time_steps.extend(grid.time.time_steps());
        if !grid.is_leaf() {
            return;
        }
        self.grids.push(grid.name().to_string());
        for attribute in &grid.attributes {
            match attribute.center {
                Center::Node => self.point_arrays.push(attribute.name.clone()),
                Center::Cell => self.cell_arrays.push(attribute.name.clone()),
                _ => {}
            }
        }
        self.sets.extend(
            grid.sets
                .iter()
                .filter(|s| !s.is_ghost())
                .map(|s| s.name.clone()),
        );
    }

    fn finish(self, coarse: bool) -> DomainMetadata {
        DomainMetadata {
            grids: self.grids.into_iter().unique().collect(),
            point_arrays: self.point_arrays.into_iter().unique().collect(),
            cell_arrays: self.cell_arrays.into_iter().unique().collect(),
            sets: self.sets.into_iter().unique().collect(),
            time_steps: self
                .time_steps
                .into_iter()
                .sorted_by(f64::total_cmp)
                .dedup()
                .collect(),
            coarse,
        }
    }
}

fn visit_full(
    grid: &GridDescriptor,
    visited: &mut usize,
    limit: usize,
    out: &mut Gathered,
) -> Result<(), LimitExceeded> {
    *visited += 1;
    if *visited > limit {
        return Err(LimitExceeded);
    }
    out.record(grid);
    for child in &grid.children {
        visit_full(child, visited, limit, out)?;
    }
    Ok(())
}

fn visit_coarse(grid: &GridDescriptor, out: &mut Gathered) {
    out.record(grid);
    let mut node = grid;
    while let Some(first) = node.children.first() {
        out.record(first);
        node = first;
    }
}

/// Collect the metadata of `domain`, visiting at most `limit` grids before
/// falling back to a coarse walk.
pub fn collect_metadata(domain: &Domain, limit: usize) -> DomainMetadata {
    let mut visited = 0usize;
    let mut full = Gathered::default();
    let walked = domain
        .grids()
        .iter()
        .try_for_each(|grid| visit_full(grid, &mut visited, limit, &mut full));
    if walked.is_ok() {
        return full.finish(false);
    }
    log::info!("domain has more than {limit} grids; collecting coarse metadata");
    let mut coarse = Gathered::default();
    for grid in domain.grids() {
        visit_coarse(grid, &mut coarse);
    }
    coarse.finish(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::light::{
        AttributeDescriptor, CollectionKind, GeometryDescriptor, SetDescriptor, SetKind, TimeSpec,
        TopologyDescriptor, TopologyType,
    };

    fn leaf(name: &str, t: f64) -> GridDescriptor {
        GridDescriptor::uniform(
            name,
            TopologyDescriptor::unstructured(TopologyType::Triangle, 1, "conn"),
            GeometryDescriptor::xyz("xyz"),
        )
        .with_attribute(AttributeDescriptor::scalar("p", Center::Node, "p"))
        .with_attribute(AttributeDescriptor::scalar("rho", Center::Cell, "rho"))
        .with_set(SetDescriptor::new("inlet", SetKind::Node, "inlet"))
        .with_set(SetDescriptor::ghost("halo", SetKind::Cell, 1, "halo"))
        .with_time(TimeSpec::Single(t))
    }

    fn series(steps: usize) -> Domain {
        let children = (0..steps).map(|i| leaf(&format!("g{i}"), (i % 3) as f64)).collect();
        Domain::new(vec![GridDescriptor::collection(
            "series",
            CollectionKind::Temporal,
            children,
        )])
    }

    #[test]
    fn names_and_times_are_deduplicated() {
        let meta = collect_metadata(&series(5), 100);
        assert!(!meta.coarse);
        assert_eq!(meta.grids.len(), 5);
        assert_eq!(meta.point_arrays, vec!["p".to_string()]);
        assert_eq!(meta.cell_arrays, vec!["rho".to_string()]);
        assert_eq!(meta.sets, vec!["inlet".to_string()]);
        assert_eq!(meta.time_steps, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn limit_switches_to_coarse_walk() {
        let meta = collect_metadata(&series(5), 3);
        assert!(meta.coarse);
        assert_eq!(meta.grids, vec!["g0".to_string()]);
        assert_eq!(meta.time_steps, vec![0.0]);
    }
}
