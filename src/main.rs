// src/main.rs

use clap::Parser;
use log::info;

use terracarve::error::TerrainError;
use terracarve::export::save_terrain;
use terracarve::render::TerrainVisualizer;
use terracarve::terrain::{MeshBuilder, NoiseGenerator, Terrain};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Terrain width in world units (X axis)
    #[arg(long, default_value_t = 100.0)]
    width: f32,

    /// Terrain length in world units (Z axis)
    #[arg(long, default_value_t = 100.0)]
    length: f32,

    /// Grid cells per world unit
    #[arg(long, default_value_t = 1.0)]
    resolution: f32,

    /// Maximum terrain height in world units
    #[arg(long, default_value_t = 10.0)]
    height_scale: f32,

    /// Seed for the procedural fill
    #[arg(short, long, default_value_t = 42)]
    seed: u32,

    /// Start from a flat field instead of a noise fill
    #[arg(long)]
    flat: bool,

    /// Carve a demonstration ramp and platform into the field
    #[arg(long)]
    demo: bool,

    /// Output path for the JSON snapshot
    #[arg(short, long, default_value = "target/terrain.json")]
    output: String,

    /// Also write a colored top-down preview PNG here
    #[arg(long)]
    preview: Option<String>,

    /// Also write a 16-bit grayscale heightmap PNG here
    #[arg(long)]
    heightmap: Option<String>,

    /// Draw the mesh wireframe over the preview
    #[arg(long)]
    wireframe: bool,

    /// Pixels per grid sample when rendering images
    #[arg(long, default_value_t = 4)]
    scale: u32,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), TerrainError> {
    let mut terrain = Terrain::new(args.width, args.length, args.resolution, args.height_scale)?;

    if !args.flat {
        info!("seeding {}x{} field from seed {}", args.width, args.length, args.seed);
        NoiseGenerator::new(args.seed).fill(&mut terrain.field);
    }

    if args.demo {
        carve_demo(&mut terrain);
    }

    save_terrain(&args.output, &terrain)?;

    if args.preview.is_some() || args.heightmap.is_some() {
        let visualizer = TerrainVisualizer::new();
        if let Some(path) = &args.preview {
            if args.wireframe {
                let mesh = MeshBuilder::new().build(&terrain.field);
                visualizer.save_wireframe_image(&terrain.field, &mesh, args.scale, path)?;
            } else {
                visualizer.save_color_image(&terrain.field, args.scale, path)?;
            }
        }
        if let Some(path) = &args.heightmap {
            visualizer.save_heightmap_image(&terrain.field, path)?;
        }
    }

    info!("done");
    Ok(())
}

/// A small scripted edit pass exercising every sculpting operation: a hill,
/// a smoothed crater, a flattened pad, and a ramp up to a platform.
fn carve_demo(terrain: &mut Terrain) {
    let reach = terrain.field.width().min(terrain.field.length()) / 4.0;
    let peak = terrain.field.height_scale();

    for _ in 0..20 {
        terrain.field.raise(-reach, -reach, reach, 0.8);
        terrain.field.lower(reach, reach, reach / 2.0, 0.6);
    }
    terrain.field.smooth(reach, reach, reach, 0.5);
    terrain.field.flatten(0.0, 0.0, reach / 2.0);

    terrain.add_platform(reach, -reach, reach, reach, peak * 0.6);
    terrain.add_ramp(0.0, -reach, reach, -reach, reach / 2.0, 0.0, peak * 0.6);
    info!("carved demo terrain: {} structures", terrain.structures().len());
}
