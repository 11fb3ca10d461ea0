//! Terragen CLI - Procedural terrain generator.
//!
//! Generate heightmap terrain with fractal noise, hydraulic erosion,
//! climate fields, and biome classification.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use terragen::climate::ClimateConfig;
use terragen::config::SimulationConfig;
use terragen::erosion::ErosionConfig;
use terragen::export::{
    BiomeMapOptions, NormalMapOptions, PngExportOptions, export_biome_map_png,
    export_heightmap_png, export_normal_map_png, export_scalar_png,
};
use terragen::noise::NoiseConfig;
use terragen::pipeline::TerrainBuilder;
use tracing_subscriber::EnvFilter;

/// Deterministic procedural terrain generator.
#[derive(Parser)]
#[command(name = "terragen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new terrain and export it.
    Generate {
        /// Grid width in cells (50-200).
        #[arg(long, default_value = "100")]
        width: u32,

        /// Grid depth in cells (50-200).
        #[arg(long, default_value = "100")]
        depth: u32,

        /// Random seed for reproducible generation.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Noise scale: periods of base noise across the grid (0.1-30).
        #[arg(long, default_value = "5.0")]
        scale: f32,

        /// Number of noise octaves (1-20).
        #[arg(long, default_value = "6")]
        octaves: u8,

        /// Amplitude decay per octave (0.1-2.0).
        #[arg(long, default_value = "0.5")]
        persistence: f32,

        /// Frequency multiplier per octave (0.1-5.0).
        #[arg(long, default_value = "2.0")]
        lacunarity: f32,

        /// Skip hydraulic erosion (faster, smoother terrain).
        #[arg(long)]
        skip_erosion: bool,

        /// Number of erosion droplets, snapped to steps of 10000.
        #[arg(long, default_value = "50000")]
        iterations: u32,

        /// Initial droplet velocity (0.0-3.0).
        #[arg(long, default_value = "1.0")]
        velocity: f32,

        /// Disable the biome overlay on exports.
        #[arg(long)]
        skip_biomes: bool,

        /// Temperature bias (0.0-1.0).
        #[arg(long, default_value = "0.8")]
        temperature_bias: f32,

        /// Moisture bias (0.0-1.0).
        #[arg(long, default_value = "0.6")]
        moisture_bias: f32,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "terrain")]
        name: String,

        /// Export an RGB normal map.
        #[arg(long)]
        normal_map: bool,

        /// Export an RGB biome preview map.
        #[arg(long)]
        biome_map: bool,

        /// Export grayscale temperature and moisture maps.
        #[arg(long)]
        climate_maps: bool,
    },

    /// Display memory and file size estimates for a grid configuration.
    Info {
        /// Grid width in cells.
        #[arg(long, default_value = "100")]
        width: u32,

        /// Grid depth in cells.
        #[arg(long, default_value = "100")]
        depth: u32,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            width,
            depth,
            seed,
            scale,
            octaves,
            persistence,
            lacunarity,
            skip_erosion,
            iterations,
            velocity,
            skip_biomes,
            temperature_bias,
            moisture_bias,
            output,
            name,
            normal_map,
            biome_map,
            climate_maps,
        } => {
            run_generate(
                width,
                depth,
                seed,
                scale,
                octaves,
                persistence,
                lacunarity,
                skip_erosion,
                iterations,
                velocity,
                skip_biomes,
                temperature_bias,
                moisture_bias,
                output,
                name,
                normal_map,
                biome_map,
                climate_maps,
            );
        }
        Commands::Info { width, depth } => {
            run_info(width, depth);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_generate(
    width: u32,
    depth: u32,
    seed: Option<u64>,
    scale: f32,
    octaves: u8,
    persistence: f32,
    lacunarity: f32,
    skip_erosion: bool,
    iterations: u32,
    velocity: f32,
    skip_biomes: bool,
    temperature_bias: f32,
    moisture_bias: f32,
    output: PathBuf,
    name: String,
    normal_map: bool,
    biome_map: bool,
    climate_maps: bool,
) {
    // Generate seed if not provided
    let seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos() as u64
    });

    let config = SimulationConfig {
        width,
        depth,
        noise: NoiseConfig {
            scale,
            octaves,
            persistence,
            lacunarity,
            seed,
        },
        erosion: ErosionConfig {
            enabled: !skip_erosion,
            iterations,
            initial_velocity: velocity,
            seed,
        },
        climate: ClimateConfig {
            biome_overlay: !skip_biomes,
            temperature_bias,
            moisture_bias,
        },
    };

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!("Terragen - Procedural Terrain Generator");
    println!("=======================================");
    println!("Grid: {}x{} cells", width, depth);
    println!("Seed: {}", seed);
    println!("Output: {}", output.display());

    if !skip_erosion {
        println!(
            "Erosion enabled: {} droplets at velocity {}",
            config.erosion.snapped_iterations(),
            velocity
        );
    } else {
        println!("Erosion: SKIPPED");
    }

    let start = Instant::now();

    println!("\nRunning generation pipeline...");
    let mut builder = TerrainBuilder::new();
    let snapshot = builder
        .rebuild_with_callbacks(
            &config,
            |stage, i, total| {
                println!("  [{}/{}] Starting: {}", i + 1, total, stage);
            },
            |stage, i, total| {
                println!("  [{}/{}] Completed: {}", i + 1, total, stage);
            },
        )
        .unwrap_or_else(|e| {
            eprintln!("Error during generation: {}", e);
            std::process::exit(1);
        });

    let gen_time = start.elapsed();
    println!("Generation completed in {:.2?}", gen_time);

    // Get height range for export
    let (min_h, max_h) = snapshot.heights.height_range();
    println!("Height range: [{:.4}, {:.4}]", min_h, max_h);
    if config.erosion.enabled {
        println!(
            "Erosion moved {:.3} units (eroded {:.3}, deposited {:.3}) in {:.2?}",
            snapshot.erosion.total_eroded + snapshot.erosion.total_deposited,
            snapshot.erosion.total_eroded,
            snapshot.erosion.total_deposited,
            snapshot.erosion.duration
        );
    }

    // Export
    println!("\nExporting maps...");
    let export_start = Instant::now();

    std::fs::create_dir_all(&output).unwrap_or_else(|e| {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    });

    let options = PngExportOptions {
        min_height: min_h,
        max_height: max_h,
        ..Default::default()
    };
    let height_path = output.join(format!("{}_height.png", name));
    export_heightmap_png(&snapshot.heights, &height_path, &options).unwrap_or_else(|e| {
        eprintln!("Error exporting heightmap: {}", e);
        std::process::exit(1);
    });
    println!("  Exported heightmap: {}", height_path.display());

    if normal_map {
        let path = output.join(format!("{}_normal.png", name));
        export_normal_map_png(&snapshot.normals, &path, &NormalMapOptions::default())
            .unwrap_or_else(|e| {
                eprintln!("Error exporting normal map: {}", e);
                std::process::exit(1);
            });
        println!("  Exported normal map: {}", path.display());
    }

    if biome_map {
        if config.climate.biome_overlay {
            let path = output.join(format!("{}_biomes.png", name));
            export_biome_map_png(&snapshot.biomes, &path, &BiomeMapOptions::default())
                .unwrap_or_else(|e| {
                    eprintln!("Error exporting biome map: {}", e);
                    std::process::exit(1);
                });
            println!("  Exported biome map: {}", path.display());
        } else {
            println!("  Biome map requested but overlay disabled; skipping");
        }
    }

    if climate_maps {
        let climate = &snapshot.climate;
        let temp_path = output.join(format!("{}_temperature.png", name));
        export_scalar_png(
            climate.width(),
            climate.depth(),
            climate.temperature_values(),
            &temp_path,
            0.0,
            1.0,
            image::codecs::png::CompressionType::Default,
            image::codecs::png::FilterType::Adaptive,
        )
        .unwrap_or_else(|e| {
            eprintln!("Error exporting temperature map: {}", e);
            std::process::exit(1);
        });

        let moist_path = output.join(format!("{}_moisture.png", name));
        export_scalar_png(
            climate.width(),
            climate.depth(),
            climate.moisture_values(),
            &moist_path,
            0.0,
            1.0,
            image::codecs::png::CompressionType::Default,
            image::codecs::png::FilterType::Adaptive,
        )
        .unwrap_or_else(|e| {
            eprintln!("Error exporting moisture map: {}", e);
            std::process::exit(1);
        });
        println!(
            "  Exported climate maps: {}_temperature.png, {}_moisture.png",
            name, name
        );
    }

    let export_time = export_start.elapsed();
    let total_time = start.elapsed();

    println!("Export completed in {:.2?}", export_time);
    println!("\nTotal time: {:.2?}", total_time);
    println!("Done!");
}

fn run_info(width: u32, depth: u32) {
    let cells = (width as u64) * (depth as u64);

    let bytes_heights = cells * 4; // f32
    let bytes_normals = cells * 12; // Vec3
    let bytes_climate = cells * 8; // temperature + moisture f32
    let bytes_biomes = cells; // one byte per cell
    let bytes_height_png = cells * 2; // 16-bit grayscale
    let bytes_normal_png = cells * 3; // RGB8
    let bytes_climate_png = cells * 4; // two 16-bit maps

    println!("Terragen - Terrain Configuration Info");
    println!("=====================================");
    println!();
    println!("Grid: {}x{} cells", width, depth);
    println!("Total cells: {:>12}", cells);
    println!();
    println!("Memory usage (in-memory):");
    println!(
        "  Heights:   {:>12} bytes ({:.2} MB)",
        bytes_heights,
        bytes_heights as f64 / 1024.0 / 1024.0
    );
    println!(
        "  Normals:   {:>12} bytes ({:.2} MB)",
        bytes_normals,
        bytes_normals as f64 / 1024.0 / 1024.0
    );
    println!(
        "  Climate:   {:>12} bytes ({:.2} MB)",
        bytes_climate,
        bytes_climate as f64 / 1024.0 / 1024.0
    );
    println!(
        "  Biomes:    {:>12} bytes ({:.2} MB)",
        bytes_biomes,
        bytes_biomes as f64 / 1024.0 / 1024.0
    );
    let total_memory = bytes_heights + bytes_normals + bytes_climate + bytes_biomes;
    println!(
        "  Total:     {:>12} bytes ({:.2} MB)",
        total_memory,
        total_memory as f64 / 1024.0 / 1024.0
    );
    println!();
    println!("Export sizes (uncompressed estimates):");
    println!(
        "  Heightmap PNG (16-bit): {:>12} bytes",
        bytes_height_png
    );
    println!(
        "  Normal map PNG (RGB8):  {:>12} bytes",
        bytes_normal_png
    );
    println!(
        "  Climate PNGs (16-bit):  {:>12} bytes",
        bytes_climate_png
    );
}
