use terranav_geom::Vec3;
use terranav_nav::{ChunkBuilder, NavConfig, NavError, NavMeshGenerator, NavMeshIndex, NodeId};
use terranav_terrain::{Heightfield, TerrainGenParams, TerrainSource, generate_heightfield};

const THRESHOLD_DEG: f32 = 35.0;

fn flat(width: usize) -> Heightfield {
    Heightfield::flat(width, 1.0, THRESHOLD_DEG.to_radians()).expect("flat terrain")
}

fn quad_ids(width: usize) -> impl Iterator<Item = NodeId> {
    (0..width - 1).flat_map(move |z| (0..width - 1).map(move |x| x + z * width))
}

fn assignment(index: &NavMeshIndex, width: usize) -> Vec<(NodeId, Option<NodeId>)> {
    quad_ids(width).map(|id| (id, index.region_id_for(id))).collect()
}

#[test]
fn flat_two_by_two_single_region() {
    let hf = flat(3);
    let index = ChunkBuilder::new(&hf, NavConfig::default()).build();
    assert_eq!(index.region_count(), 1);
    let region = index.region(0).expect("seed region");
    assert_eq!(region.node_ids().collect::<Vec<_>>(), vec![0, 1, 3, 4]);
    assert!(region.is_walkable());
}

#[test]
fn steep_quad_never_joins_a_walkable_region() {
    let hf = flat(3).with_quad_normal(1, 0, Vec3::new(1.0, 0.1, 0.0));
    let index = ChunkBuilder::new(&hf, NavConfig::default()).build();
    for id in quad_ids(3) {
        let owners = index.regions().filter(|r| r.contains(id)).count();
        assert_eq!(owners, 1, "quad {} owned {} times", id, owners);
    }
    let owner = index.region_for(1).expect("quad 1 owned");
    assert_eq!(owner.len(), 1);
    assert!(!owner.is_walkable());
    for region in index.regions().filter(|r| r.len() > 1) {
        assert!(!region.contains(1));
    }
}

#[test]
fn flat_four_by_four_covers_terrain() {
    let hf = flat(5);
    let padding = 0.75;
    let index = ChunkBuilder::new(&hf, NavConfig { bounds_padding: padding }).build();
    assert_eq!(index.region_count(), 1);
    let region = index.region(0).expect("seed region");
    assert_eq!(region.len(), 16);
    assert_eq!((region.width(), region.height()), (4, 4));
    let b = region.bounds();
    assert_eq!(b.min, Vec3::new(0.0, -padding, 0.0));
    assert_eq!(b.max, Vec3::new(4.0, padding, 4.0));
}

#[test]
fn identical_input_identical_output() {
    let params = TerrainGenParams {
        size: 33,
        height_amplitude: 20.0,
        height_frequency: 0.08,
        ..TerrainGenParams::default()
    };
    let hf = generate_heightfield(&params).expect("terrain");
    let a = ChunkBuilder::new(&hf, NavConfig::default()).build();
    let b = ChunkBuilder::new(&hf, NavConfig::default()).build();
    assert_eq!(assignment(&a, 33), assignment(&b, 33));
    let bounds_a: Vec<_> = a.regions().map(|r| (r.id(), r.bounds())).collect();
    let bounds_b: Vec<_> = b.regions().map(|r| (r.id(), r.bounds())).collect();
    assert_eq!(bounds_a, bounds_b);
    assert!(a.region_count() > 1, "expected a hilly grid to split");
}

#[test]
fn noise_terrain_bounds_hold_every_corner() {
    let params = TerrainGenParams {
        size: 41,
        height_amplitude: 15.0,
        height_frequency: 0.05,
        ..TerrainGenParams::default()
    };
    let hf = generate_heightfield(&params).expect("terrain");
    let index = ChunkBuilder::new(&hf, NavConfig::default()).build();
    assert_eq!(index.node_count(), 40 * 40);
    for region in index.regions() {
        let b = region.bounds();
        for node in region.nodes() {
            for corner in node.corners() {
                let p = hf.vertex_position(corner);
                assert!(b.contains_point(p), "region {} misses {:?}", region.id(), p);
            }
        }
    }
}

#[test]
fn generate_twice_is_a_no_op() {
    let hf = flat(5);
    let mut generator = NavMeshGenerator::new(NavConfig::default());
    assert!(!generator.is_generated());
    let first = assignment(generator.generate(Some(&hf)).expect("first run"), 5);
    assert!(generator.is_generated());

    // A different terrain on the second call is ignored entirely
    let other = flat(5).with_quad_normal(0, 0, Vec3::new(1.0, 0.0, 0.0));
    let second = assignment(generator.generate(Some(&other)).expect("second run"), 5);
    assert_eq!(first, second);
    // Even without terrain, an existing index is returned
    assert!(generator.generate(None).is_ok());
}

#[test]
fn missing_terrain_is_fatal() {
    let mut generator = NavMeshGenerator::default();
    assert_eq!(generator.generate(None).unwrap_err(), NavError::MissingTerrain);
    assert!(generator.index().is_none());
}

struct Pending;

impl TerrainSource for Pending {
    fn grid_width(&self) -> usize {
        0
    }
    fn vertex_position(&self, _: usize) -> Vec3 {
        Vec3::ZERO
    }
    fn quad_normal(&self, _: usize, _: usize) -> Vec3 {
        Vec3::UP
    }
    fn slope_threshold(&self) -> f32 {
        1.0
    }
    fn is_ready(&self) -> bool {
        false
    }
}

#[test]
fn unready_terrain_is_fatal_then_recoverable() {
    let mut generator = NavMeshGenerator::default();
    let err = generator.generate(Some(&Pending)).unwrap_err();
    assert_eq!(err, NavError::TerrainNotReady { grid_width: 0 });
    assert!(err.to_string().contains("not initialized"));

    let hf = flat(3);
    let index = generator.generate(Some(&hf)).expect("ready terrain");
    assert_eq!(index.node_count(), 4);
}
