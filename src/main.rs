mod pixel_classifier;
mod world_generator;
mod world_renderer;
mod world_writer;

use std::env;
use std::path::Path;
use std::process;
use std::time::SystemTime;

use world_generator::{GenerationSettings, WorldGenerator, WorldMap};
use world_renderer::WorldRenderer;

struct CliOptions {
    image_path: Option<String>,
    seed: Option<u64>,
    preview: bool,
    settings: GenerationSettings,
}

fn parse_args() -> CliOptions {
    let args: Vec<String> = env::args().collect();
    let mut options = CliOptions {
        image_path: None,
        seed: None,
        preview: false,
        settings: GenerationSettings::default(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                if i + 1 < args.len() {
                    if let Ok(value) = args[i + 1].parse::<u64>() {
                        options.seed = Some(value);
                        i += 1;
                    }
                }
            }
            "--flags" => {
                if i + 1 < args.len() {
                    if let Ok(value) = args[i + 1].parse::<usize>() {
                        options.settings.flag_count = value;
                        i += 1;
                    }
                }
            }
            "--separation" => {
                if i + 1 < args.len() {
                    if let Ok(value) = args[i + 1].parse::<f64>() {
                        options.settings.min_site_separation = value.max(0.0);
                        i += 1;
                    }
                }
            }
            "--preview" => {
                options.preview = true;
            }
            "--help" => {
                println!("World Descriptor Generator");
                println!("\nUsage: worldgen-cli <path/to/map.png> [OPTIONS]");
                println!("\nOptions:");
                println!("  --seed <N>         Seed the generator (default: current time)");
                println!("  --flags <N>        Number of neutral flag sites to place (default: 6)");
                println!("  --separation <D>   Minimum distance between sites (default: 220)");
                println!("  --preview          Also write a <map>.preview.png render");
                println!("  --help             Show this help message");
                println!("\nExample:");
                println!("  worldgen-cli assets/maps/sample_map.png --seed 42 --preview");
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                options.image_path = Some(arg.to_string());
            }
            _ => {}
        }
        i += 1;
    }

    options
}

fn summarize(world: &WorldMap, requested_flags: usize) -> String {
    let flags = world.flags_placed();
    let bases = world.sites.len() - flags;
    let mut summary = format!(
        "  - {} trees\n  - {} mountain clusters\n  - {} water circles\n  - {} sites ({} bases + {} flags)",
        world.trees.len(),
        world.mountains.len(),
        world.water_circles.len(),
        world.sites.len(),
        bases,
        flags
    );
    if flags < requested_flags {
        summary.push_str(&format!(
            "\n  ! placed {} of {} requested flags (map too crowded for the rest)",
            flags, requested_flags
        ));
    }
    summary
}

fn main() {
    let options = parse_args();

    let image_path = match options.image_path {
        Some(path) => path,
        None => {
            eprintln!("Usage: worldgen-cli <path/to/map.png> [OPTIONS]");
            eprintln!("Try --help for more information.");
            process::exit(1);
        }
    };

    let img = match image::open(&image_path) {
        Ok(img) => img.to_rgba8(),
        Err(e) => {
            eprintln!("Error loading map image '{}': {}", image_path, e);
            process::exit(1);
        }
    };

    let seed = options.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    println!(
        "Generating world from \x1b[1m{}\x1b[0m ({}x{}, seed {})",
        image_path,
        img.width(),
        img.height(),
        seed
    );

    let mut generator = WorldGenerator::new_with_settings(seed, options.settings);
    let world = generator.generate(&img);

    let out_path = match world_writer::write_world_file(&world, Path::new(&image_path)) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error writing world descriptor: {}", e);
            process::exit(1);
        }
    };

    println!("\x1b[1m✓ Generated {}\x1b[0m", out_path.display());
    println!("{}", summarize(&world, options.settings.flag_count));

    if options.preview {
        let preview_path = Path::new(&image_path).with_extension("preview.png");
        let preview = WorldRenderer::render_to_image(&world);
        match preview.save(&preview_path) {
            Ok(_) => println!("Preview saved as: {}", preview_path.display()),
            Err(e) => {
                eprintln!("Error saving preview: {}", e);
                process::exit(1);
            }
        }
    }
}
