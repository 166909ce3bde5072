#![allow(dead_code)]
use xdmf_heavy::prelude::*;

/// Lattice of `nx * ny * nz` points at integer coordinates, x fastest.
pub fn lattice_xyz(nx: usize, ny: usize, nz: usize) -> Vec<f32> {
    let mut xyz = Vec::with_capacity(nx * ny * nz * 3);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                xyz.extend([i as f32, j as f32, k as f32]);
            }
        }
    }
    xyz
}

/// Two unit hexahedra side by side along x over a 3 x 2 x 2 lattice.
pub const HEX_PAIR: [i32; 16] = [0, 1, 4, 3, 6, 7, 10, 9, 1, 2, 5, 4, 7, 8, 11, 10];

/// Store holding the hex pair: `xyz`, `hex` (shape 2 x 8), node scalar `p`
/// (point index as value) and cell scalar `rho`.
pub fn hex_pair_store() -> InMemoryArrayStore {
    let mut store = InMemoryArrayStore::new();
    store.insert_flat("xyz", ArrayData::F32(lattice_xyz(3, 2, 2)));
    store
        .insert_shaped("hex", vec![2, 8], ArrayData::I32(HEX_PAIR.to_vec()))
        .unwrap();
    store.insert_flat("p", ArrayData::F64((0..12).map(f64::from).collect()));
    store.insert_flat("rho", ArrayData::F32(vec![1.5, 2.5]));
    store
}

pub fn hex_pair_grid(name: &str) -> GridDescriptor {
    GridDescriptor::uniform(
        name,
        TopologyDescriptor::unstructured(TopologyType::Hexahedron, 2, "hex"),
        GeometryDescriptor::xyz("xyz"),
    )
    .with_attribute(AttributeDescriptor::scalar("p", Center::Node, "p").with_active(true))
    .with_attribute(AttributeDescriptor::scalar("rho", Center::Cell, "rho"))
}

/// `CoRectMesh` grid of `shape` points (slowest axis first) at unit spacing.
pub fn image_grid(name: &str, shape: Vec<usize>) -> GridDescriptor {
    let axes = shape.len();
    GridDescriptor::uniform(
        name,
        TopologyDescriptor::structured(
            if axes == 2 {
                TopologyType::CoRectMesh2D
            } else {
                TopologyType::CoRectMesh3D
            },
            shape,
        ),
        GeometryDescriptor::origin_spacing(vec![0.0; axes], vec![1.0; axes]),
    )
}

pub fn reader(store: &InMemoryArrayStore) -> HeavyDataReader<'_> {
    HeavyDataReader::new(store)
}

pub fn values(array: &DataArray) -> Vec<f64> {
    array.data.to_f64_vec()
}

pub fn ghost_levels(bucket: &FieldData) -> Vec<u8> {
    match &bucket.get(xdmf_heavy::io::xdmf::GHOST_ARRAY_NAME).unwrap().data {
        ArrayData::U8(v) => v.clone(),
        other => panic!("ghost levels stored as {other:?}"),
    }
}

/// Names of every slot of `composite`, holes included.
pub fn slot_names(composite: &Composite) -> Vec<String> {
    composite
        .iter()
        .map(|b| b.name.clone().unwrap_or_default())
        .collect()
}

/// Names of the filled slots of `composite`.
pub fn filled_names(composite: &Composite) -> Vec<String> {
    composite
        .iter()
        .filter(|b| b.data.is_some())
        .map(|b| b.name.clone().unwrap_or_default())
        .collect()
}
