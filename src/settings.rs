//! Game settings and tuning
//!
//! Loaded from a JSON file by the driver. Every field has a default, so a
//! partial file only overrides what it names.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::generator::RockGenerator;
use crate::sim::SimResult;

/// Ship handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    /// Hull scale (the model is 2 units long)
    pub size: f32,
    /// Thrust speed in world units per second
    pub speed: f32,
    /// Turn rate in revolutions per second
    pub rotation_rps: f32,
    /// Seconds between shots
    pub fire_cooldown: f32,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            size: SHIP_SIZE,
            speed: SHIP_SPEED,
            rotation_rps: SHIP_ROTATION_RPS,
            fire_cooldown: SHIP_FIRE_COOLDOWN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f32,
    /// Seconds before a shot expires
    pub life_time: f32,
    /// Per-axis world scale of the unit square, applied after rotation,
    /// so `size[0]` always spans world x whatever the heading
    pub size: [f32; 2],
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            life_time: PROJECTILE_LIFE_TIME,
            size: PROJECTILE_SIZE,
        }
    }
}

/// Initial rock field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RockTuning {
    pub initial_count: usize,
    pub vertex_count: usize,
    /// Initial sizes are uniform in `[min_size, max_size]`
    pub min_size: f32,
    pub max_size: f32,
    /// Each velocity component is uniform in `[-max_speed, max_speed]`
    pub max_speed: f32,
}

impl Default for RockTuning {
    fn default() -> Self {
        Self {
            initial_count: INITIAL_ROCKS,
            vertex_count: ROCK_VERTICES,
            min_size: 1.0 / 14.0,
            max_size: 3.0 / 14.0,
            max_speed: ROCK_MAX_SPEED,
        }
    }
}

/// How a rock breaks when shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitPolicy {
    /// Rocks with fewer vertices than this leave nothing behind
    pub vanish_below: usize,
    /// Rocks with at least this many vertices break in two
    pub two_at: usize,
    /// Vertices a child has fewer than its parent
    pub vertex_loss: usize,
    pub one_child_scale: f32,
    pub two_child_scale: f32,
    /// Children smaller than this are dropped
    pub min_size: f32,
    /// Each child velocity component is uniform in `[-split_speed, split_speed]`
    pub split_speed: f32,
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            vanish_below: 5,
            two_at: 8,
            vertex_loss: 3,
            one_child_scale: 0.75,
            two_child_scale: 0.6,
            min_size: 0.01,
            split_speed: 0.25,
        }
    }
}

impl SplitPolicy {
    /// Children produced by a rock with `vertex_count` vertices
    pub fn child_count(&self, vertex_count: usize) -> usize {
        if vertex_count < self.vanish_below {
            0
        } else if vertex_count < self.two_at {
            1
        } else {
            2
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ship: ShipTuning,
    pub projectile: ProjectileTuning,
    pub rocks: RockTuning,
    pub split: SplitPolicy,
    pub generator: RockGenerator,

    /// Seconds of invincibility after spawn
    pub grace_period: f32,
    /// Also test bodies against wrapped copies across the field edges
    pub seam_collisions: bool,
    /// Emit bounding box outlines with the frame
    pub draw_bounds: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ship: ShipTuning::default(),
            projectile: ProjectileTuning::default(),
            rocks: RockTuning::default(),
            split: SplitPolicy::default(),
            generator: RockGenerator::default(),

            grace_period: GRACE_PERIOD,
            seam_collisions: true,
            draw_bounds: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> SimResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> SimResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Clamp every tunable into its valid domain
    pub fn sanitized(mut self) -> Self {
        let ship = &mut self.ship;
        ship.size = ship.size.max(0.0);
        ship.speed = ship.speed.max(0.0);
        ship.rotation_rps = ship.rotation_rps.max(0.0);
        ship.fire_cooldown = ship.fire_cooldown.max(0.0);

        let projectile = &mut self.projectile;
        projectile.speed = projectile.speed.max(0.0);
        projectile.life_time = projectile.life_time.max(0.0);
        projectile.size = projectile.size.map(|s| s.max(0.0));

        let rocks = &mut self.rocks;
        rocks.vertex_count = rocks.vertex_count.max(MIN_ROCK_VERTICES);
        rocks.min_size = rocks.min_size.max(0.0);
        rocks.max_size = rocks.max_size.max(rocks.min_size);
        rocks.max_speed = rocks.max_speed.max(0.0);

        let split = &mut self.split;
        split.two_at = split.two_at.max(split.vanish_below);
        split.one_child_scale = split.one_child_scale.max(0.0);
        split.two_child_scale = split.two_child_scale.max(0.0);
        split.min_size = split.min_size.max(0.0);
        split.split_speed = split.split_speed.max(0.0);

        self.generator = self.generator.sanitized();
        self.grace_period = self.grace_period.max(0.0);
        self
    }
}
