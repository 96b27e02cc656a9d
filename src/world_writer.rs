use crate::world_generator::WorldMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The descriptor is emitted as a JS module so the game runtime can import
/// it directly, next to the source image with the extension swapped:
/// `assets/maps/foo.png` -> `assets/maps/foo.world.js`.
pub fn output_path_for(image_path: &Path) -> PathBuf {
    image_path.with_extension("world.js")
}

/// Renders the descriptor as an importable module. Pure text assembly over
/// already-generated state, so rendering the same world twice is
/// byte-identical.
pub fn render_module(world: &WorldMap, source_name: &str) -> String {
    format!(
        "// Generated world data from {}\nexport const generatedWorld = {};\n",
        source_name,
        serde_json::to_string(world).expect("world descriptor serializes")
    )
}

/// Writes the descriptor module. The content goes to a temp file in the
/// same directory first and is renamed into place, so a failed write never
/// leaves a truncated descriptor behind.
pub fn write_world_file(world: &WorldMap, image_path: &Path) -> io::Result<PathBuf> {
    let out_path = output_path_for(image_path);
    let source_name = image_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| image_path.display().to_string());

    let module = render_module(world, &source_name);

    let tmp_path = out_path.with_extension("js.tmp");
    fs::write(&tmp_path, module)?;
    fs::rename(&tmp_path, &out_path)?;

    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_generator::WorldGenerator;
    use image::RgbaImage;

    #[test]
    fn test_output_path_swaps_extension() {
        assert_eq!(
            output_path_for(Path::new("assets/maps/sample_map.png")),
            PathBuf::from("assets/maps/sample_map.world.js")
        );
        assert_eq!(
            output_path_for(Path::new("map.PNG")),
            PathBuf::from("map.world.js")
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let world = WorldGenerator::new(99).generate(&RgbaImage::new(600, 600));
        let first = render_module(&world, "sample_map.png");
        let second = render_module(&world, "sample_map.png");
        assert_eq!(first, second);
    }

    #[test]
    fn test_module_shape() {
        let world = WorldGenerator::new(4).generate(&RgbaImage::new(600, 600));
        let module = render_module(&world, "sample_map.png");

        assert!(module.starts_with("// Generated world data from sample_map.png\n"));
        assert!(module.contains("export const generatedWorld = {"));
        assert!(module.ends_with("};\n"));
    }

    #[test]
    fn test_wire_field_names() {
        use image::Rgba;

        let mut img = RgbaImage::new(800, 800);
        img.put_pixel(20, 20, Rgba([0, 0, 0, 255]));
        img.put_pixel(30, 30, Rgba([0, 0, 255, 255]));
        img.put_pixel(40, 40, Rgba([128, 128, 128, 255]));

        let world = WorldGenerator::new(17).generate(&img);
        let json = serde_json::to_string(&world).unwrap();

        for field in [
            "\"mapWidth\"",
            "\"mapHeight\"",
            "\"trees\"",
            "\"mountains\"",
            "\"mountainCircles\"",
            "\"waterCircles\"",
            "\"sites\"",
            "\"peaks\"",
            "\"guardRespawns\"",
            "\"spawnActive\"",
            "\"underAttack\"",
            "\"_justCaptured\"",
            "\"_prevOwner\"",
            "\"gateSide\"",
            "\"maxHp\"",
            "\"lastDamaged\"",
            "\"cornerR\"",
            "\"repairCooldown\"",
            "\"gateOpen\"",
        ] {
            assert!(json.contains(field), "missing wire field {}", field);
        }

        // Base owners use the runtime's camelCase spelling
        assert!(json.contains("\"owner\":\"player\""));
        assert!(json.contains("\"owner\":\"teamA\""));
        // Flags serialize a literal null owner and no wall key
        let flags_json: Vec<String> = world
            .sites
            .iter()
            .filter(|s| !s.is_base())
            .map(|s| serde_json::to_string(s).unwrap())
            .collect();
        for flag in &flags_json {
            assert!(flag.contains("\"owner\":null"));
            assert!(!flag.contains("\"wall\""));
        }
    }

    #[test]
    fn test_write_creates_loadable_file() {
        let world = WorldGenerator::new(21).generate(&RgbaImage::new(500, 500));

        let dir = std::env::temp_dir().join("worldgen_writer_test");
        fs::create_dir_all(&dir).unwrap();
        let image_path = dir.join("map.png");

        let out_path = write_world_file(&world, &image_path).unwrap();
        assert_eq!(out_path, dir.join("map.world.js"));

        let written = fs::read_to_string(&out_path).unwrap();
        assert!(written.contains("export const generatedWorld"));
        // No temp file left behind
        assert!(!dir.join("map.world.js.tmp").exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
