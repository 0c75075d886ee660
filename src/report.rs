use hashbrown::HashMap;
use terranav_nav::{NavMeshIndex, NodeId};

const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub fn summary(index: &NavMeshIndex) -> String {
    let stats = index.stats();
    let coverage = if stats.nodes == 0 {
        0.0
    } else {
        stats.walkable_nodes as f32 * 100.0 / stats.nodes as f32
    };
    let q = index.grid_width().saturating_sub(1);
    format!(
        "grid {}x{} quads\nregions: {} ({} blocked)\nwalkable: {}/{} quads ({:.1}%)\nlargest region: {} quads\nbuild time: {:?}",
        q,
        q,
        stats.regions,
        stats.blocked_regions,
        stats.walkable_nodes,
        stats.nodes,
        coverage,
        stats.largest_region,
        stats.elapsed
    )
}

/// One row of text per grid row. Walkable regions cycle through letters and
/// digits in seed order; blocked quads print as `#`.
pub fn ascii_map(index: &NavMeshIndex) -> String {
    let q = index.grid_width().saturating_sub(1);
    let mut glyph_of: HashMap<NodeId, char> = HashMap::new();
    let mut next = 0usize;
    for region in index.regions() {
        let glyph = if region.is_walkable() {
            let g = GLYPHS[next % GLYPHS.len()] as char;
            next += 1;
            g
        } else {
            '#'
        };
        glyph_of.insert(region.id(), glyph);
    }

    let mut out = String::with_capacity(q * (q + 1));
    for z in 0..q {
        for x in 0..q {
            let glyph = index
                .region_at(x, z)
                .and_then(|r| glyph_of.get(&r.id()).copied())
                .unwrap_or('?');
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use terranav_geom::Vec3;
    use terranav_nav::{ChunkBuilder, NavConfig};
    use terranav_terrain::Heightfield;

    #[test]
    fn map_marks_blocked_quads() {
        let hf = Heightfield::flat(3, 1.0, 0.5)
            .unwrap()
            .with_quad_normal(1, 0, Vec3::new(1.0, 0.0, 0.0));
        let index = ChunkBuilder::new(&hf, NavConfig::default()).build();
        assert_eq!(ascii_map(&index), "A#\nAB\n");
    }

    #[test]
    fn summary_reports_counts() {
        let hf = Heightfield::flat(5, 1.0, 0.5).unwrap();
        let index = ChunkBuilder::new(&hf, NavConfig::default()).build();
        let text = summary(&index);
        assert!(text.contains("grid 4x4 quads"));
        assert!(text.contains("regions: 1 (0 blocked)"));
        assert!(text.contains("walkable: 16/16 quads (100.0%)"));
    }
}
