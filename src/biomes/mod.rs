//! Biome classification from depth and averaged rainfall.
//!
//! Classification is a threshold table on depth, refined by averaged rain for
//! plains and forests. Dry forest turns into rocky hills inside a jittered
//! interior region; that jitter is random on purpose, so `gen_biome` is the
//! one non-deterministic generation step. Use `gen_biome_with_rng` with a
//! seeded generator for reproducible maps.

mod config;

pub use config::BiomeConfig;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::climate::Climate;
use crate::terrain::Terrain;

/// Surface classification of a cell. `id()` is stable and used for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Biome {
    #[default]
    Water = 0,
    SandyBeach = 1,
    GravelBeach = 2,
    StonyCliff = 3,
    WetPlains = 4,
    DryPlains = 5,
    RockyHills = 6,
    TemperateForest = 7,
    BorealForest = 8,
    MountainTundra = 9,
    MountainPeak = 10,
}

impl Biome {
    pub const ALL: [Biome; 11] = [
        Biome::Water,
        Biome::SandyBeach,
        Biome::GravelBeach,
        Biome::StonyCliff,
        Biome::WetPlains,
        Biome::DryPlains,
        Biome::RockyHills,
        Biome::TemperateForest,
        Biome::BorealForest,
        Biome::MountainTundra,
        Biome::MountainPeak,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Biome::Water => "Water",
            Biome::SandyBeach => "Sandy Beach",
            Biome::GravelBeach => "Gravel Beach",
            Biome::StonyCliff => "Stony Cliff",
            Biome::WetPlains => "Wet Plains",
            Biome::DryPlains => "Dry Plains",
            Biome::RockyHills => "Rocky Hills",
            Biome::TemperateForest => "Temperate Forest",
            Biome::BorealForest => "Boreal Forest",
            Biome::MountainTundra => "Mountain Tundra",
            Biome::MountainPeak => "Mountain Peak",
        }
    }

    /// RGB map color for this biome.
    pub fn preview_rgb(self) -> [u8; 3] {
        match self {
            Biome::Water => [0x2d, 0x56, 0x85],
            Biome::SandyBeach => [0xea, 0xdf, 0x9e],
            Biome::GravelBeach => [0xcc, 0xcc, 0xcc],
            Biome::StonyCliff => [0xa7, 0xa5, 0x9b],
            Biome::WetPlains => [0x9e, 0xc1, 0x6d],
            Biome::DryPlains => [0xbc, 0xc1, 0x6d],
            Biome::RockyHills => [0xaa, 0xaa, 0xaa],
            Biome::TemperateForest => [0x3d, 0xab, 0x50],
            Biome::BorealForest => [0x30, 0x7a, 0x3c],
            Biome::MountainTundra => [0x77, 0x77, 0x77],
            Biome::MountainPeak => [0xee, 0xee, 0xee],
        }
    }
}

/// True when the jittered cell `(i, j)` lies strictly inside the rocky-hills
/// region. Each of the four bound comparisons draws its own offset.
fn in_rocky_region<R: Rng>(i: usize, j: usize, cfg: &BiomeConfig, rng: &mut R) -> bool {
    let jitter = cfg.rocky_hills_jitter;
    let mut jittered = |c: usize| -> i64 {
        let offset = if jitter > 0 { rng.random_range(-jitter..jitter) } else { 0 };
        c as i64 + offset
    };
    jittered(i) > cfg.rocky_hills_min
        && jittered(i) < cfg.rocky_hills_max
        && jittered(j) > cfg.rocky_hills_min
        && jittered(j) < cfg.rocky_hills_max
}

/// Classifies one cell.
///
/// `rng` is consulted only for dry forest cells.
pub fn classify<R: Rng>(
    depth: f32,
    avg_rain: f32,
    i: usize,
    j: usize,
    cfg: &BiomeConfig,
    rng: &mut R,
) -> Biome {
    if depth <= cfg.water {
        Biome::Water
    } else if depth <= cfg.sandy_beach {
        Biome::SandyBeach
    } else if depth < cfg.gravel_beach {
        Biome::GravelBeach
    } else if depth <= cfg.stony_cliff {
        Biome::StonyCliff
    } else if depth <= cfg.plains {
        if avg_rain >= cfg.wet_plains_rain {
            Biome::WetPlains
        } else {
            Biome::DryPlains
        }
    } else if depth <= cfg.forest {
        if avg_rain < cfg.rocky_hills_rain && in_rocky_region(i, j, cfg, rng) {
            Biome::RockyHills
        } else if depth <= cfg.temperate_forest {
            Biome::TemperateForest
        } else {
            Biome::BorealForest
        }
    } else if depth <= cfg.mountain_tundra {
        Biome::MountainTundra
    } else {
        Biome::MountainPeak
    }
}

impl Terrain {
    /// Classifies every cell from its depth and the averaged rain of `climate`,
    /// using the thread-local generator for the rocky-hills jitter.
    pub fn gen_biome(&mut self, climate: &Climate) {
        self.gen_biome_with_rng(climate, &mut rand::rng());
    }

    /// Like [`Terrain::gen_biome`] with an explicit jitter source.
    pub fn gen_biome_with_rng<R: Rng>(&mut self, climate: &Climate, rng: &mut R) {
        let n = self.grid_size();
        let cfg = &self.biome_config;
        let rain = &climate.avg_rain_map;
        for cell in 0..n * n {
            let (i, j) = (cell / n, cell % n);
            self.biome_map[cell] = classify(self.depth_map[cell], rain[cell], i, j, cfg, rng);
        }
    }

    /// Number of cells of each biome, indexed by [`Biome::id`].
    pub fn biome_histogram(&self) -> [usize; 11] {
        let mut counts = [0usize; 11];
        for biome in self.biome_map.iter() {
            counts[biome.id() as usize] += 1;
        }
        counts
    }
}
