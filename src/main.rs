mod config;
mod report;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use terranav_nav::{BoundsOverlay, NavMeshGenerator};
use terranav_terrain::{TerrainGenParams, TerrainMode, generate_heightfield};

#[derive(Parser, Debug)]
#[command(name = "terranav")]
#[command(about = "Partition a terrain heightfield into walkable navigation chunks")]
struct Args {
    /// TOML config with optional [terrain] and [nav] tables
    #[arg(short, long, default_value = "terranav.toml")]
    config: PathBuf,

    /// Vertices per side (overrides config)
    #[arg(short = 'W', long)]
    size: Option<usize>,

    #[arg(short, long)]
    seed: Option<i32>,

    /// Walkable slope limit in degrees (overrides config)
    #[arg(long)]
    slope: Option<f32>,

    /// Generate perfectly flat terrain
    #[arg(long)]
    flat: bool,

    /// Print an ASCII map of the regions
    #[arg(long)]
    map: bool,

    /// List every region's bounding volume
    #[arg(long)]
    bounds: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = config::load_or_default(&args.config)?;
    if let Some(size) = args.size {
        cfg.terrain.size = size;
    }
    if let Some(seed) = args.seed {
        cfg.terrain.seed = seed;
    }
    if let Some(slope) = args.slope {
        cfg.terrain.slope_threshold_deg = slope;
    }
    if args.flat {
        cfg.terrain.mode = TerrainMode::Flat;
    }

    let params = TerrainGenParams::from_config(&cfg.terrain);
    let terrain = generate_heightfield(&params)?;
    let mut generator = NavMeshGenerator::new(cfg.nav.clone());
    let index = generator.generate(Some(&terrain))?;

    println!("{}", report::summary(index));
    if args.map {
        print!("{}", report::ascii_map(index));
    }
    if args.bounds {
        let mut overlay = BoundsOverlay::new(true);
        overlay.begin_frame();
        for b in overlay.visible_boxes(index, |_| true) {
            println!(
                "region {:>6} {} min=({:.2}, {:.2}, {:.2}) max=({:.2}, {:.2}, {:.2})",
                b.region,
                if b.walkable { "walk " } else { "block" },
                b.bounds.min.x,
                b.bounds.min.y,
                b.bounds.min.z,
                b.bounds.max.x,
                b.bounds.max.y,
                b.bounds.max.z
            );
        }
    }
    Ok(())
}
