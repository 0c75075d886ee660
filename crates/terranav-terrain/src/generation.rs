use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::config::{TerrainGenParams, TerrainMode};
use crate::heightfield::{Heightfield, TerrainError};

/// Builds a deterministic heightfield from `params`: same params, same grid.
pub fn generate_heightfield(params: &TerrainGenParams) -> Result<Heightfield, TerrainError> {
    let w = params.size;
    if params.mode == TerrainMode::Flat {
        log::debug!("flat terrain {}x{}", w, w);
        return Heightfield::flat(w, params.cell_size, params.slope_threshold);
    }

    let mut noise = FastNoiseLite::with_seed(params.seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(params.height_frequency));

    let mut heights = Vec::with_capacity(w * w);
    for z in 0..w {
        for x in 0..w {
            // Summed octaves, normalized back into [-1, 1]
            let (mut sum, mut amp, mut freq, mut norm) = (0.0f32, 1.0f32, 1.0f32, 0.0f32);
            for _ in 0..params.height_octaves {
                let sx = x as f32 * params.cell_size * freq;
                let sz = z as f32 * params.cell_size * freq;
                sum += noise.get_noise_2d(sx, sz) * amp;
                norm += amp;
                amp *= 0.5;
                freq *= 2.0;
            }
            heights.push(sum / norm * params.height_amplitude);
        }
    }
    log::debug!(
        "noise terrain {}x{} seed={} freq={} amp={}",
        w,
        w,
        params.seed,
        params.height_frequency,
        params.height_amplitude
    );
    Heightfield::from_heights(w, params.cell_size, &heights, params.slope_threshold)
}
