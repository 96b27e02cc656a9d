use crate::pixel_classifier::{classify_pixel, PixelLabel};
use image::RgbaImage;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

// Structural constants the game runtime expects; not exposed as settings.
const TREE_RADIUS: f64 = 10.0;
const WALL_RADIUS_PAD: f64 = 28.0;
const WALL_CORNER_RADIUS: f64 = 10.0;
const WALL_REPAIR_COOLDOWN: f64 = 5.0;
const WALL_SIDE_COUNT: usize = 4;
const PEAKS_PER_MOUNTAIN: usize = 2;

/// Shared shape for trees, mountain peaks and water: a circle in map units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MountainCluster {
    pub x: f64,
    pub y: f64,
    pub peaks: Vec<Circle>,
}

/// Site ownership as the runtime spells it on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Owner {
    Player,
    TeamA,
    TeamB,
    TeamC,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallSide {
    pub hp: i32,
    pub max_hp: i32,
    pub destroyed: bool,
    pub last_damaged: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub r: f64,
    pub thickness: f64,
    pub gate_side: u8,
    pub sides: Vec<WallSide>,
    pub corner_r: f64,
    pub repair_cooldown: f64,
    pub gate_open: bool,
}

/// A capturable point of interest: one of the four corner bases, or a
/// neutral flag. The underscore-prefixed wire names are runtime-internal
/// transition flags the descriptor must pre-seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub owner: Option<Owner>,
    pub prog: f64,
    pub guard_respawns: Vec<f64>,
    pub spawn_active: bool,
    pub under_attack: bool,
    #[serde(rename = "_justCaptured")]
    pub just_captured: bool,
    #[serde(rename = "_prevOwner")]
    pub prev_owner: Option<Owner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall: Option<Wall>,
}

impl Site {
    pub fn is_base(&self) -> bool {
        self.id.ends_with("_base")
    }
}

/// The world descriptor consumed by the game runtime. Field names and
/// nesting are a wire contract.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldMap {
    pub map_width: u32,
    pub map_height: u32,
    pub trees: Vec<Circle>,
    pub mountains: Vec<MountainCluster>,
    pub mountain_circles: Vec<Circle>,
    pub water_circles: Vec<Circle>,
    pub sites: Vec<Site>,
}

impl WorldMap {
    pub fn flags_placed(&self) -> usize {
        self.sites.iter().filter(|s| !s.is_base()).count()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GenerationSettings {
    pub flag_count: usize,
    pub min_site_separation: f64,
    pub max_placement_attempts: u32,
    pub base_radius: f64,
    pub flag_radius: f64,
    pub wall_thickness: f64,
    pub wall_side_hp: i32,
    pub corner_pad_max: f64,
    pub placement_margin: f64,
    pub mountain_jitter: f64,
    pub peak_radius_min: f64,
    pub peak_radius_max: f64,
    pub water_radius_min: f64,
    pub water_radius_max: f64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        GenerationSettings {
            flag_count: 6,
            min_site_separation: 220.0,
            max_placement_attempts: 120,
            base_radius: 92.0,
            flag_radius: 74.0,
            wall_thickness: 14.0,
            wall_side_hp: 100,
            corner_pad_max: 140.0,
            placement_margin: 120.0,
            mountain_jitter: 20.0,
            peak_radius_min: 20.0,
            peak_radius_max: 40.0,
            water_radius_min: 12.0,
            water_radius_max: 32.0,
        }
    }
}

pub struct WorldGenerator {
    rng: ChaCha8Rng,
    settings: GenerationSettings,
}

impl WorldGenerator {
    pub fn new(seed: u64) -> Self {
        Self::new_with_settings(seed, GenerationSettings::default())
    }

    pub fn new_with_settings(seed: u64, settings: GenerationSettings) -> Self {
        WorldGenerator {
            rng: ChaCha8Rng::seed_from_u64(seed),
            settings,
        }
    }

    /// Runs the full pipeline on one map image: classify pixels into
    /// features, place the corner bases and neutral flags, then attach
    /// fortification and bookkeeping state.
    pub fn generate(&mut self, img: &RgbaImage) -> WorldMap {
        let (width, height) = img.dimensions();

        let mut trees = Vec::new();
        let mut mountains = Vec::new();
        let mut mountain_circles = Vec::new();
        let mut water_circles = Vec::new();

        // Scan every pixel in raster order. Each qualifying pixel becomes
        // its own feature record - adjacent same-color pixels are NOT
        // merged, so solid painted regions come out dense on purpose (the
        // runtime relies on that density for rendering and collision).
        for y in 0..height {
            for x in 0..width {
                let [r, g, b, a] = img.get_pixel(x, y).0;
                match classify_pixel(r, g, b, a) {
                    PixelLabel::Mountain => {
                        let cluster = self.make_mountain(x as f64, y as f64);
                        mountain_circles.extend_from_slice(&cluster.peaks);
                        mountains.push(cluster);
                    }
                    PixelLabel::Water => {
                        let r = self
                            .rng
                            .gen_range(self.settings.water_radius_min..self.settings.water_radius_max);
                        water_circles.push(Circle {
                            x: x as f64,
                            y: y as f64,
                            r,
                        });
                    }
                    PixelLabel::Tree => {
                        trees.push(Circle {
                            x: x as f64,
                            y: y as f64,
                            r: TREE_RADIUS,
                        });
                    }
                    PixelLabel::Background => {}
                }
            }
        }

        let mut sites = self.place_bases(width, height);
        self.place_flags(width, height, &mut sites);
        self.add_fortifications(&mut sites);

        WorldMap {
            map_width: width,
            map_height: height,
            trees,
            mountains,
            mountain_circles,
            water_circles,
            sites,
        }
    }

    fn make_mountain(&mut self, x: f64, y: f64) -> MountainCluster {
        let jitter = self.settings.mountain_jitter;
        let mut peaks = Vec::with_capacity(PEAKS_PER_MOUNTAIN);
        for _ in 0..PEAKS_PER_MOUNTAIN {
            peaks.push(Circle {
                x: x + self.rng.gen_range(-jitter..jitter),
                y: y + self.rng.gen_range(-jitter..jitter),
                r: self
                    .rng
                    .gen_range(self.settings.peak_radius_min..self.settings.peak_radius_max),
            });
        }
        MountainCluster { x, y, peaks }
    }

    /// The four bases are a pure function of the image dimensions: one per
    /// corner, inset by the corner pad, pre-owned by their team.
    fn place_bases(&self, width: u32, height: u32) -> Vec<Site> {
        let w = width as f64;
        let h = height as f64;
        let pad = self.settings.corner_pad_max.min(w.min(h) / 4.0);

        vec![
            self.make_base("player_base", "Player Base", pad, h - pad, Owner::Player),
            self.make_base("team_a_base", "Red Base", pad, pad, Owner::TeamA),
            self.make_base("team_b_base", "Yellow Base", w - pad, pad, Owner::TeamB),
            self.make_base("team_c_base", "Blue Base", w - pad, h - pad, Owner::TeamC),
        ]
    }

    fn make_base(&self, id: &str, name: &str, x: f64, y: f64, owner: Owner) -> Site {
        Site {
            id: id.to_string(),
            name: name.to_string(),
            x,
            y,
            r: self.settings.base_radius,
            owner: Some(owner),
            prog: 1.0,
            guard_respawns: Vec::new(),
            spawn_active: false,
            under_attack: false,
            just_captured: false,
            prev_owner: None,
            wall: None,
        }
    }

    /// Rejection sampling: pick random interior positions until one clears
    /// the minimum separation to every already-placed site, up to the
    /// attempt budget. A flag that cannot be placed is dropped - fewer
    /// flags than requested is acceptable on small or crowded maps.
    fn place_flags(&mut self, width: u32, height: u32, sites: &mut Vec<Site>) {
        let margin = self.settings.placement_margin;
        // On maps smaller than twice the margin the interior collapses to
        // a point; the span must not go negative.
        let span_x = (width as f64 - 2.0 * margin).max(0.0);
        let span_y = (height as f64 - 2.0 * margin).max(0.0);

        for i in 0..self.settings.flag_count {
            let mut placed = None;
            for _ in 0..self.settings.max_placement_attempts {
                let x = margin + self.rng.gen::<f64>() * span_x;
                let y = margin + self.rng.gen::<f64>() * span_y;
                let clear = sites
                    .iter()
                    .all(|s| (s.x - x).hypot(s.y - y) >= self.settings.min_site_separation);
                if clear {
                    placed = Some((x, y));
                    break;
                }
            }

            if let Some((x, y)) = placed {
                sites.push(Site {
                    id: format!("site_{}", i),
                    name: format!("Flag {}", i + 1),
                    x,
                    y,
                    r: self.settings.flag_radius,
                    owner: None,
                    prog: 0.0,
                    guard_respawns: Vec::new(),
                    spawn_active: false,
                    under_attack: false,
                    just_captured: false,
                    prev_owner: None,
                    wall: None,
                });
            }
        }
    }

    /// Seeds every site's runtime bookkeeping and builds the wall record
    /// for base sites: four full-health sides and one randomly chosen gate
    /// side, gate closed.
    fn add_fortifications(&mut self, sites: &mut [Site]) {
        for site in sites.iter_mut() {
            site.prev_owner = site.owner;

            if site.is_base() {
                let sides = (0..WALL_SIDE_COUNT)
                    .map(|_| WallSide {
                        hp: self.settings.wall_side_hp,
                        max_hp: self.settings.wall_side_hp,
                        destroyed: false,
                        last_damaged: -9999.0,
                    })
                    .collect();

                site.wall = Some(Wall {
                    r: site.r + WALL_RADIUS_PAD,
                    thickness: self.settings.wall_thickness,
                    gate_side: self.rng.gen_range(0..WALL_SIDE_COUNT as u8),
                    sides,
                    corner_r: WALL_CORNER_RADIUS,
                    repair_cooldown: WALL_REPAIR_COOLDOWN,
                    gate_open: false,
                });
            }
        }
    }
}
