use proptest::prelude::*;
use xdmf_heavy::io::xdmf::attribute::attribute_selection;
use xdmf_heavy::io::xdmf::{StructuredExtents, decode_fixed, decode_mixed, expand_tensor6};
use xdmf_heavy::prelude::*;

/// Row-major flat index of every element a hyperslab selects, in output order.
fn expected_gather(shape: &[usize], start: &[usize], stride: &[usize], count: &[usize]) -> Vec<i64> {
    let total: usize = count.iter().product();
    (0..total)
        .map(|n| {
            let (mut rest, mut flat, mut pitch) = (n, 0usize, 1usize);
            for d in (0..shape.len()).rev() {
                let i = rest % count[d];
                rest /= count[d];
                flat += (start[d] + i * stride[d]) * pitch;
                pitch *= shape[d];
            }
            flat as i64
        })
        .collect()
}

/// One lattice axis: point count `n`, stride `s`, and a stride-aligned
/// update range `[a * s, (a + k) * s]` inside `0..n`.
fn aligned_axis() -> impl Strategy<Value = (usize, usize, usize, usize)> {
    (2usize..7, 1usize..4).prop_flat_map(|(n, s)| {
        let blocks = (n - 1) / s;
        (Just(n), Just(s), 0..=blocks)
            .prop_flat_map(move |(n, s, a)| (Just(n), Just(s), Just(a), 0..=(blocks - a)))
    })
}

/// A cell of a mixed stream: its encoding and the points it lists.
fn mixed_cell() -> impl Strategy<Value = (Vec<i64>, CellType, Vec<i64>)> {
    prop_oneof![
        prop::collection::vec(0i64..100, 3).prop_map(|p| {
            let mut enc = vec![TopologyType::Triangle.code()];
            enc.extend(&p);
            (enc, CellType::Triangle, p)
        }),
        prop::collection::vec(0i64..100, 8).prop_map(|p| {
            let mut enc = vec![TopologyType::Hexahedron.code()];
            enc.extend(&p);
            (enc, CellType::Hexahedron, p)
        }),
        prop::collection::vec(0i64..100, 1..9).prop_map(|p| {
            let mut enc = vec![TopologyType::Polygon.code(), p.len() as i64];
            enc.extend(&p);
            (enc, CellType::Polygon, p)
        }),
    ]
}

proptest! {
    #[test]
    fn tensor6_expansion_is_symmetric(
        values in (0usize..8).prop_flat_map(|t| prop::collection::vec(-1e6f64..1e6, t * 6)),
    ) {
        let expanded = expand_tensor6("s", &ArrayData::F64(values.clone())).unwrap();
        prop_assert_eq!(expanded.len(), values.len() / 6 * 9);
        let full = expanded.to_f64_vec();
        for (t, tensor) in full.chunks(9).enumerate() {
            for r in 0..3 {
                for c in 0..3 {
                    prop_assert_eq!(tensor[3 * r + c], tensor[3 * c + r]);
                }
            }
            prop_assert_eq!(tensor[0], values[6 * t]);
            prop_assert_eq!(tensor[8], values[6 * t + 5]);
        }
    }

    #[test]
    fn fixed_decode_splits_evenly(cells in 0usize..20, npe in 1usize..9, extra in 0usize..5) {
        let stream: Vec<i64> = (0..(cells * npe + extra) as i64).collect();
        let decoded = decode_fixed(stream.clone(), cells, npe).unwrap();
        prop_assert_eq!(decoded.num_cells(), cells);
        prop_assert_eq!(decoded.connectivity(), &stream[..cells * npe]);
        for cell in decoded.iter() {
            prop_assert_eq!(cell.len(), npe);
        }
    }

    #[test]
    fn short_fixed_stream_is_rejected(cells in 1usize..20, npe in 1usize..9) {
        let stream: Vec<i64> = vec![0; cells * npe - 1];
        prop_assert!(decode_fixed(stream, cells, npe).is_err());
    }

    #[test]
    fn mixed_decode_recovers_every_cell(cells in prop::collection::vec(mixed_cell(), 0..12), tail in prop::collection::vec(0i64..10, 0..4)) {
        let mut stream: Vec<i64> = cells.iter().flat_map(|(enc, _, _)| enc.clone()).collect();
        let used = stream.len();
        stream.extend(&tail);
        let mixed = decode_mixed(&stream, cells.len()).unwrap();
        prop_assert_eq!(mixed.consumed, used);
        prop_assert_eq!(mixed.cell_types.len(), cells.len());
        for (i, (_, kind, points)) in cells.iter().enumerate() {
            prop_assert_eq!(mixed.cell_types[i], *kind);
            prop_assert_eq!(mixed.cells.cell(i).unwrap(), points.as_slice());
        }
    }

    #[test]
    fn truncating_a_mixed_stream_fails(cells in prop::collection::vec(mixed_cell(), 1..6), cut in 1usize..4) {
        let stream: Vec<i64> = cells.iter().flat_map(|(enc, _, _)| enc.clone()).collect();
        let keep = stream.len().saturating_sub(cut);
        prop_assert!(decode_mixed(&stream[..keep], cells.len()).is_err());
    }

    #[test]
    fn hyperslab_reads_match_manual_indexing(
        shape in prop::collection::vec(1usize..6, 1..4),
        seed in prop::collection::vec((0usize..6, 1usize..3, 0usize..4), 3),
    ) {
        let rank = shape.len();
        let mut start = Vec::with_capacity(rank);
        let mut stride = Vec::with_capacity(rank);
        let mut count = Vec::with_capacity(rank);
        for d in 0..rank {
            let (s, st, c) = seed[d];
            let s = s % shape[d];
            let room = (shape[d] - 1 - s) / st + 1;
            start.push(s);
            stride.push(st);
            count.push(c.min(room));
        }
        let n: usize = shape.iter().product();
        let mut store = InMemoryArrayStore::new();
        let tag = store
            .insert_shaped("a", shape.clone(), ArrayData::I64((0..n as i64).collect()))
            .unwrap();
        let selection = Selection::Hyperslab { start: start.clone(), stride: stride.clone(), count: count.clone() };
        let read = store.read(&tag, &selection).unwrap();
        prop_assert_eq!(&read.shape, &count);
        prop_assert_eq!(read.len(), count.iter().product::<usize>());
        let gathered: Vec<i64> = (0..read.len()).filter_map(|i| read.data.get_i64(i)).collect();
        prop_assert_eq!(gathered, expected_gather(&shape, &start, &stride, &count));
    }

    #[test]
    fn node_counts_exceed_cell_counts_by_one(axes in prop::collection::vec(aligned_axis(), 3)) {
        // axes are x, y, z; light-data shapes run z, y, x
        let points: Vec<usize> = axes.iter().rev().map(|a| a.0).collect();
        let mut update = [0i32; 6];
        let mut stride = [1i32; 3];
        for (axis, &(_, s, a, k)) in axes.iter().enumerate() {
            update[2 * axis] = (a * s) as i32;
            update[2 * axis + 1] = ((a + k) * s) as i32;
            stride[axis] = s as i32;
        }
        let extents = StructuredExtents::compute(&points, Some(update), stride);
        prop_assert_eq!(extents.update, update);

        let cells: Vec<usize> = points.iter().map(|n| n - 1).collect();
        for (center, shape) in [(Center::Node, points.clone()), (Center::Cell, cells)] {
            let n: usize = shape.iter().product();
            let mut store = InMemoryArrayStore::new();
            let tag = store
                .insert_shaped("a", shape.clone(), ArrayData::I64((0..n as i64).collect()))
                .unwrap();
            let info = store.describe(&tag).unwrap();
            let selection = attribute_selection("a", center, &info, 3, &extents).unwrap();
            let Selection::Hyperslab { start, stride: step, count } = selection.clone() else {
                panic!("sub-extents read through a hyperslab");
            };
            for (d, &(_, s, a, k)) in axes.iter().rev().enumerate() {
                let node_extra = usize::from(center == Center::Node);
                prop_assert_eq!(count[d], k + node_extra);
                prop_assert_eq!(start[d], a * s);
                prop_assert_eq!(step[d], s);
            }
            let read = store.read(&tag, &selection).unwrap();
            let gathered: Vec<i64> = (0..read.len()).filter_map(|i| read.data.get_i64(i)).collect();
            prop_assert_eq!(gathered, expected_gather(&shape, &start, &step, &count));
        }
    }
}
