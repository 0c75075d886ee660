use rayon::prelude::*;
use terranav_geom::Vec3;

use crate::source::TerrainSource;

/// Owned `W x W` vertex grid with one normal per quad.
#[derive(Clone, Debug)]
pub struct Heightfield {
    width: usize,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    slope_threshold: f32,
}

#[derive(Debug, PartialEq)]
pub enum TerrainError {
    GridTooSmall(usize),
    SampleCountMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },
}

impl Heightfield {
    /// Lays heights out on a regular grid (`x * cell_size, h, z * cell_size`)
    /// and derives quad normals from the two triangles of each quad.
    pub fn from_heights(
        width: usize,
        cell_size: f32,
        heights: &[f32],
        slope_threshold: f32,
    ) -> Result<Self, TerrainError> {
        check_width(width)?;
        check_len("heights", width * width, heights.len())?;
        let positions: Vec<Vec3> = heights
            .iter()
            .enumerate()
            .map(|(i, &h)| {
                let x = (i % width) as f32;
                let z = (i / width) as f32;
                Vec3::new(x * cell_size, h, z * cell_size)
            })
            .collect();
        let normals = compute_quad_normals(width, &positions);
        Ok(Self {
            width,
            positions,
            normals,
            slope_threshold,
        })
    }

    /// Explicit samples. `normals` is row-major over `(W-1) x (W-1)` quads.
    pub fn from_parts(
        width: usize,
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        slope_threshold: f32,
    ) -> Result<Self, TerrainError> {
        check_width(width)?;
        check_len("positions", width * width, positions.len())?;
        let q = width - 1;
        check_len("normals", q * q, normals.len())?;
        Ok(Self {
            width,
            positions,
            normals,
            slope_threshold,
        })
    }

    pub fn flat(width: usize, cell_size: f32, slope_threshold: f32) -> Result<Self, TerrainError> {
        Self::from_heights(width, cell_size, &vec![0.0; width * width], slope_threshold)
    }

    /// Replaces one quad's normal; out-of-range coordinates are ignored.
    pub fn with_quad_normal(mut self, x: usize, z: usize, normal: Vec3) -> Self {
        let q = self.width - 1;
        if x < q && z < q {
            self.normals[x + z * q] = normal;
        }
        self
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn height_range(&self) -> (f32, f32) {
        self.positions
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            })
    }
}

impl TerrainSource for Heightfield {
    #[inline]
    fn grid_width(&self) -> usize {
        self.width
    }

    #[inline]
    fn vertex_position(&self, vertex_id: usize) -> Vec3 {
        self.positions[vertex_id]
    }

    #[inline]
    fn quad_normal(&self, x: usize, z: usize) -> Vec3 {
        self.normals[x + z * (self.width - 1)]
    }

    #[inline]
    fn slope_threshold(&self) -> f32 {
        self.slope_threshold
    }
}

fn check_width(width: usize) -> Result<(), TerrainError> {
    if width < 2 {
        return Err(TerrainError::GridTooSmall(width));
    }
    Ok(())
}

fn check_len(what: &'static str, expected: usize, got: usize) -> Result<(), TerrainError> {
    if expected != got {
        return Err(TerrainError::SampleCountMismatch {
            what,
            expected,
            got,
        });
    }
    Ok(())
}

// Quads are split tl-bl-tr / tr-bl-br; the face normal is the normalized sum
// of both triangle normals.
fn compute_quad_normals(width: usize, positions: &[Vec3]) -> Vec<Vec3> {
    let q = width - 1;
    (0..q * q)
        .into_par_iter()
        .map(|i| {
            let (x, z) = (i % q, i / q);
            let tl = positions[x + z * width];
            let tr = positions[x + 1 + z * width];
            let bl = positions[x + (z + 1) * width];
            let br = positions[x + 1 + (z + 1) * width];
            let n0 = (bl - tl).cross(tr - tl);
            let n1 = (tr - br).cross(bl - br);
            (n0 + n1).normalized()
        })
        .collect()
}

impl std::fmt::Display for TerrainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerrainError::GridTooSmall(w) => {
                write!(f, "terrain grid needs at least 2 vertices per side, got {}", w)
            }
            TerrainError::SampleCountMismatch {
                what,
                expected,
                got,
            } => write!(f, "expected {} {}, got {}", expected, what, got),
        }
    }
}

impl std::error::Error for TerrainError {}
