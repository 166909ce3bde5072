mod util;
use util::*;

use proptest::prelude::*;
use xdmf_heavy::prelude::*;

fn spatial(leaves: usize) -> GridDescriptor {
    let children = (0..leaves).map(|i| hex_pair_grid(&format!("leaf{i}"))).collect();
    GridDescriptor::collection("blocks", CollectionKind::Spatial, children)
}

fn read_piece(store: &InMemoryArrayStore, grid: &GridDescriptor, piece: usize, pieces: usize) -> Composite {
    let out = HeavyDataReader::new(store)
        .with_options(ReadOptions::default().with_piece(piece, pieces))
        .read_grid(Some(grid))
        .expect("collections always produce a composite");
    match out {
        MeshOutput::Composite(c) => c,
        other => panic!("expected a composite, got {other:?}"),
    }
}

#[test]
fn spatial_collection_keeps_child_names_and_order() {
    let store = hex_pair_store();
    let composite = read_piece(&store, &spatial(3), 0, 1);
    assert_eq!(slot_names(&composite), vec!["leaf0", "leaf1", "leaf2"]);
    assert_eq!(composite.filled(), 3);
}

#[test]
fn leaves_are_dealt_round_robin() {
    let store = hex_pair_store();
    let composite = read_piece(&store, &spatial(5), 1, 2);
    assert_eq!(composite.len(), 5);
    assert_eq!(filled_names(&composite), vec!["leaf1", "leaf3"]);
}

#[test]
fn nested_collections_are_visited_by_every_piece() {
    let store = hex_pair_store();
    let grid = GridDescriptor::collection(
        "outer",
        CollectionKind::Spatial,
        vec![hex_pair_grid("a"), spatial(2), hex_pair_grid("b")],
    );
    let composite = read_piece(&store, &grid, 1, 2);
    // "a" is leaf 0 and "b" leaf 1 of the outer collection
    assert_eq!(filled_names(&composite), vec!["blocks", "b"]);
    let inner = composite.get(1).and_then(MeshOutput::as_composite).unwrap();
    assert_eq!(filled_names(inner), vec!["leaf1"]);
}

#[test]
fn trees_are_not_partitioned() {
    let store = hex_pair_store();
    let grid = GridDescriptor::tree("tree", vec![hex_pair_grid("a"), hex_pair_grid("b")]);
    let composite = read_piece(&store, &grid, 1, 2);
    assert_eq!(composite.filled(), 2);
}

#[test]
fn disabled_grids_leave_named_holes() {
    let store = hex_pair_store();
    let mut selections = Selections::default();
    selections.grids.disable("leaf1");
    let out = HeavyDataReader::new(&store)
        .with_selections(selections)
        .read_grid(Some(&spatial(3)))
        .unwrap();
    let composite = out.as_composite().unwrap();
    assert_eq!(slot_names(composite), vec!["leaf0", "leaf1", "leaf2"]);
    assert_eq!(filled_names(composite), vec!["leaf0", "leaf2"]);
}

#[test]
fn failed_child_leaves_a_hole() {
    let store = hex_pair_store();
    let broken = GridDescriptor {
        name: Some("broken".into()),
        kind: Some(GridKind::Uniform),
        ..GridDescriptor::default()
    };
    let grid = GridDescriptor::collection(
        "blocks",
        CollectionKind::Spatial,
        vec![hex_pair_grid("ok"), broken],
    );
    let composite = read_piece(&store, &grid, 0, 1);
    assert_eq!(composite.len(), 2);
    assert!(composite.get(1).is_none());
}

#[test]
fn subset_grids_read_like_uniform_ones() {
    let store = hex_pair_store();
    let mut grid = hex_pair_grid("subset");
    grid.kind = Some(GridKind::Subset);
    let out = reader(&store).read_grid(Some(&grid)).unwrap();
    assert_eq!(out.as_unstructured().unwrap().number_of_cells(), 2);
}

#[test]
fn missing_or_untyped_grids_are_invalid() {
    let store = hex_pair_store();
    assert!(reader(&store).read_grid(None).is_none());
    let mut grid = hex_pair_grid("untyped");
    grid.kind = None;
    assert!(reader(&store).read_grid(Some(&grid)).is_none());
}

#[test]
fn empty_domain_yields_empty_composite() {
    let store = InMemoryArrayStore::new();
    let out = reader(&store).read_data(&Domain::new(Vec::new())).unwrap();
    assert!(out.as_composite().unwrap().is_empty());
}

#[test]
fn several_top_level_grids_are_partitioned() {
    let store = hex_pair_store();
    let domain = Domain::new(vec![hex_pair_grid("a"), hex_pair_grid("b"), hex_pair_grid("c")]);
    let out = HeavyDataReader::new(&store)
        .with_options(ReadOptions::default().with_piece(0, 2))
        .read_data(&domain)
        .unwrap();
    assert_eq!(filled_names(out.as_composite().unwrap()), vec!["a", "c"]);
}

#[test]
fn single_unstructured_grid_belongs_to_piece_zero() {
    let store = hex_pair_store();
    let domain = Domain::new(vec![hex_pair_grid("only")]);
    let options = ReadOptions::default().with_piece(1, 3);
    let out = HeavyDataReader::new(&store)
        .with_options(options.clone())
        .read_data(&domain)
        .unwrap();
    assert_eq!(out.as_unstructured().unwrap().number_of_cells(), 0);
    assert!(store.read_log().is_empty());

    let first = HeavyDataReader::new(&store)
        .with_options(options.with_piece(0, 3))
        .read_data(&domain)
        .unwrap();
    assert_eq!(first.as_unstructured().unwrap().number_of_cells(), 2);
}

#[test]
fn single_grid_with_sets_is_read_by_every_piece() {
    let mut store = hex_pair_store();
    store.insert_flat("inlet", ArrayData::I32(vec![0, 1]));
    let grid = hex_pair_grid("only").with_set(SetDescriptor::new("inlet", SetKind::Node, "inlet"));
    let out = HeavyDataReader::new(&store)
        .with_options(ReadOptions::default().with_piece(1, 2))
        .read_data(&Domain::new(vec![grid]))
        .unwrap();
    assert!(out.as_composite().unwrap().get_by_name("Data").is_some());
}

fn timed(name: &str, time: TimeSpec) -> GridDescriptor {
    hex_pair_grid(name).with_time(time)
}

fn series() -> GridDescriptor {
    GridDescriptor::collection(
        "series",
        CollectionKind::Temporal,
        vec![
            timed("t0", TimeSpec::Single(0.0)),
            timed("t1a", TimeSpec::Single(1.0)),
            timed("t1b", TimeSpec::Single(1.0)),
            timed("late", TimeSpec::List(vec![3.0, 2.0])),
        ],
    )
}

fn read_at(store: &InMemoryArrayStore, grid: &GridDescriptor, t: f64) -> Option<MeshOutput> {
    HeavyDataReader::new(store)
        .with_options(ReadOptions::default().with_time(t))
        .read_grid(Some(grid))
}

#[test]
fn single_matching_step_is_returned_unwrapped() {
    let store = hex_pair_store();
    let out = read_at(&store, &series(), 2.5).unwrap();
    assert!(out.as_unstructured().is_some());
    let edge = read_at(&store, &series(), 1e-8).unwrap();
    assert!(edge.as_unstructured().is_some());
}

#[test]
fn coincident_steps_become_a_composite() {
    let store = hex_pair_store();
    let out = read_at(&store, &series(), 1.0).unwrap();
    assert_eq!(slot_names(out.as_composite().unwrap()), vec!["t1a", "t1b"]);
}

#[test]
fn untimed_children_cover_unmatched_times() {
    let store = hex_pair_store();
    assert!(read_at(&store, &series(), 7.0).is_none());

    let grid = GridDescriptor::collection(
        "series",
        CollectionKind::Temporal,
        vec![timed("t0", TimeSpec::Single(0.0)), hex_pair_grid("always")],
    );
    let out = read_at(&store, &grid, 7.0).unwrap();
    assert!(out.as_unstructured().is_some());
}

#[test]
fn range_and_hyperslab_times_match_inside() {
    let store = hex_pair_store();
    let grid = GridDescriptor::collection(
        "series",
        CollectionKind::Temporal,
        vec![
            timed("range", TimeSpec::Range { min: 0.0, max: 1.0 }),
            timed(
                "slab",
                TimeSpec::HyperSlab {
                    start: 5.0,
                    stride: 1.0,
                    count: 3,
                },
            ),
        ],
    );
    assert!(read_at(&store, &grid, 0.5).unwrap().as_unstructured().is_some());
    assert!(read_at(&store, &grid, 6.5).unwrap().as_unstructured().is_some());
    assert!(read_at(&store, &grid, 3.0).is_none());
}

proptest! {
    #[test]
    fn pieces_cover_every_leaf_exactly_once(leaves in 1usize..12, pieces in 1usize..6) {
        let store = hex_pair_store();
        let grid = spatial(leaves);
        let mut owners = vec![0usize; leaves];
        for piece in 0..pieces {
            let composite = read_piece(&store, &grid, piece, pieces);
            prop_assert_eq!(composite.len(), leaves);
            for (slot, owner) in owners.iter_mut().enumerate() {
                if composite.get(slot).is_some() {
                    *owner += 1;
                }
            }
        }
        prop_assert!(owners.iter().all(|&n| n == 1));
    }
}
