use crate::world_generator::{Owner, Site, WorldMap};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut};

const GROUND_COLOR: Rgb<u8> = Rgb([120, 180, 90]);
const WATER_COLOR: Rgb<u8> = Rgb([20, 70, 160]);
const MOUNTAIN_COLOR: Rgb<u8> = Rgb([140, 130, 120]);
const TREE_COLOR: Rgb<u8> = Rgb([50, 120, 50]);
const WALL_COLOR: Rgb<u8> = Rgb([90, 80, 70]);
const GATE_COLOR: Rgb<u8> = Rgb([240, 220, 120]);
const NEUTRAL_COLOR: Rgb<u8> = Rgb([200, 200, 200]);

pub struct WorldRenderer;

impl WorldRenderer {
    /// Draws the generated descriptor onto a flat ground-colored canvas so
    /// the output can be sanity-checked without loading the game. Not part
    /// of the descriptor contract - purely a debugging aid.
    pub fn render_to_image(world: &WorldMap) -> RgbImage {
        let mut img = RgbImage::from_pixel(
            world.map_width.max(1),
            world.map_height.max(1),
            GROUND_COLOR,
        );

        for water in &world.water_circles {
            draw_filled_circle_mut(&mut img, (water.x as i32, water.y as i32), water.r as i32, WATER_COLOR);
        }
        for peak in &world.mountain_circles {
            draw_filled_circle_mut(&mut img, (peak.x as i32, peak.y as i32), peak.r as i32, MOUNTAIN_COLOR);
        }
        for tree in &world.trees {
            draw_filled_circle_mut(&mut img, (tree.x as i32, tree.y as i32), tree.r as i32, TREE_COLOR);
        }

        for site in &world.sites {
            Self::draw_site(&mut img, site);
        }

        img
    }

    fn draw_site(img: &mut RgbImage, site: &Site) {
        let center = (site.x as i32, site.y as i32);
        let color = Self::owner_color(site.owner);

        // Capture radius ring plus a solid center dot
        draw_hollow_circle_mut(img, center, site.r as i32, color);
        draw_filled_circle_mut(img, center, 4, color);

        if let Some(wall) = &site.wall {
            draw_hollow_circle_mut(img, center, wall.r as i32, WALL_COLOR);
            draw_hollow_circle_mut(img, center, (wall.r - wall.thickness) as i32, WALL_COLOR);

            // Mark the gate side: 0 = north, then clockwise
            let (dx, dy): (f32, f32) = match wall.gate_side {
                0 => (0.0, -1.0),
                1 => (1.0, 0.0),
                2 => (0.0, 1.0),
                _ => (-1.0, 0.0),
            };
            let inner = (wall.r - wall.thickness) as f32;
            let outer = wall.r as f32;
            draw_line_segment_mut(
                img,
                (site.x as f32 + dx * inner, site.y as f32 + dy * inner),
                (site.x as f32 + dx * outer, site.y as f32 + dy * outer),
                GATE_COLOR,
            );
        }
    }

    fn owner_color(owner: Option<Owner>) -> Rgb<u8> {
        match owner {
            Some(Owner::Player) => Rgb([240, 240, 240]),
            Some(Owner::TeamA) => Rgb([220, 60, 60]),
            Some(Owner::TeamB) => Rgb([230, 200, 60]),
            Some(Owner::TeamC) => Rgb([60, 90, 220]),
            None => NEUTRAL_COLOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_generator::WorldGenerator;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_preview_matches_map_dimensions() {
        let world = WorldGenerator::new(1).generate(&RgbaImage::new(640, 480));
        let img = WorldRenderer::render_to_image(&world);
        assert_eq!(img.dimensions(), (640, 480));
    }

    #[test]
    fn test_water_is_painted() {
        let mut map = RgbaImage::new(400, 400);
        map.put_pixel(200, 200, Rgba([0, 0, 255, 255]));

        let world = WorldGenerator::new(6).generate(&map);
        let img = WorldRenderer::render_to_image(&world);

        assert_eq!(*img.get_pixel(200, 200), WATER_COLOR);
    }

    #[test]
    fn test_empty_ground_stays_ground_colored() {
        let world = WorldGenerator::new(2).generate(&RgbaImage::new(2000, 2000));
        let img = WorldRenderer::render_to_image(&world);
        // Top-center of a big map: bases sit at the corners and flag
        // candidates are inset by the 120px margin, so nothing the
        // renderer draws can reach this pixel regardless of seed.
        assert_eq!(*img.get_pixel(1000, 3), GROUND_COLOR);
    }
}
