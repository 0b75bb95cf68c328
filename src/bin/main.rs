//! ALICE-Voxel CLI
//!
//! Builds the procedural terrain scene and renders one frame to a PPM
//! image.
//!
//! Author: Moroya Sakamoto

use alice_voxel::prelude::*;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "alice-voxel")]
#[command(author = "Moroya Sakamoto")]
#[command(version = alice_voxel::VERSION)]
#[command(about = "ALICE-Voxel: sparse voxel octree renderer", long_about = None)]
struct Cli {
    /// Output PPM file
    #[arg(short, long, default_value = "frame.ppm")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value = "960")]
    width: usize,

    /// Image height in pixels
    #[arg(long, default_value = "540")]
    height: usize,

    /// Octree depth (the voxel grid spans 2^depth cells per axis)
    #[arg(short, long, default_value = "7", value_parser = clap::value_parser!(u32).range(1..=12))]
    depth: u32,

    /// Camera projection
    #[arg(long, value_enum, default_value_t = ProjectionArg::Perspective)]
    projection: ProjectionArg,

    /// Shading integrator
    #[arg(long, value_enum, default_value_t = IntegratorArg::Direct)]
    integrator: IntegratorArg,

    /// Subpixel sampling
    #[arg(long, value_enum, default_value_t = SubsamplerArg::None)]
    subsampler: SubsamplerArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProjectionArg {
    Perspective,
    Fisheye,
}

impl From<ProjectionArg> for Projection {
    fn from(arg: ProjectionArg) -> Self {
        match arg {
            ProjectionArg::Perspective => Projection::Perspective,
            ProjectionArg::Fisheye => Projection::Fisheye,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum IntegratorArg {
    Flat,
    Depth,
    Direct,
    Occlusion,
}

impl From<IntegratorArg> for Integrator {
    fn from(arg: IntegratorArg) -> Self {
        match arg {
            IntegratorArg::Flat => Integrator::Flat,
            IntegratorArg::Depth => Integrator::Depth,
            IntegratorArg::Direct => Integrator::Direct,
            IntegratorArg::Occlusion => Integrator::Occlusion,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SubsamplerArg {
    None,
    Aa2,
    Aa4,
    Aa8,
}

impl From<SubsamplerArg> for Subsampler {
    fn from(arg: SubsamplerArg) -> Self {
        match arg {
            SubsamplerArg::None => Subsampler::None,
            SubsamplerArg::Aa2 => Subsampler::Aa2,
            SubsamplerArg::Aa4 => Subsampler::Aa4,
            SubsamplerArg::Aa8 => Subsampler::Aa8,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(message) = run(&cli) {
        eprintln!("error: {}", message);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    println!(
        "Generating terrain ({} cells per axis)...",
        1u32 << cli.depth
    );
    let start = Instant::now();
    let terrain = TerrainSource::new(cli.depth);
    println!("  done in {:.2?}", start.elapsed());

    println!("Building octree (depth {})...", cli.depth);
    let start = Instant::now();
    let config = BuildConfig {
        depth: cli.depth,
        ..BuildConfig::default()
    };
    let octree = VoxelOctree::build(&terrain, &config).map_err(|e| e.to_string())?;
    println!(
        "  done in {:.2?}: {} nodes, {:.1} MiB",
        start.elapsed(),
        octree.node_count(),
        octree.memory_bytes() as f64 / (1024.0 * 1024.0),
    );

    println!("Rendering {}x{}...", cli.width, cli.height);
    let start = Instant::now();
    let observer = Observer::default();
    let mut frame = Frame::new(cli.width, cli.height);
    render(
        &octree,
        &observer,
        cli.projection.into(),
        cli.integrator.into(),
        cli.subsampler.into(),
        &mut frame,
    );
    println!("  done in {:.2?}", start.elapsed());

    save_ppm(&frame, &cli.output).map_err(|e| e.to_string())?;
    println!("Saved {}", cli.output.display());
    Ok(())
}
