//! Game state and core simulation types
//!
//! Entities own plain geometry only: a transform, a velocity, a model-space
//! outline and a cached local box. Anything GPU-side is rebuilt from these by
//! the renderer each frame.

use std::f32::consts::TAU;

use glam::{Mat2, Vec2};
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::generator::RockGenerator;
use super::polygon::Polygon;
use super::rng::VecGen;
use super::tick::TickInput;
use super::transform::Transform;
use crate::consts::MIN_ROCK_VERTICES;
use crate::settings::{ProjectileTuning, RockTuning, Settings, ShipTuning, SplitPolicy};
use crate::wrap_around;

/// Shared capabilities of everything that moves and collides
pub trait Body {
    fn transform(&self) -> &Transform;

    /// Model-space outline
    fn polygon(&self) -> &Polygon;

    /// Cached symmetric box around the rotated, scaled outline
    fn local_bounds(&self) -> Aabb;

    /// World-space box for the current tick
    fn bounding_box(&self) -> Aabb {
        self.local_bounds().translate(self.transform().position)
    }

    /// World-space outline for the current tick
    fn polygon_srt(&self) -> Vec<Vec2> {
        self.transform().apply_polygon(self.polygon())
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub transform: Transform,
    /// Velocity applied on the last move (zero when not thrusting)
    pub velocity: Vec2,
    /// Unit heading
    pub direction: Vec2,
    /// Seconds until the weapon can fire again
    pub weapon_cooldown: f32,
    polygon: Polygon,
    local_bounds: Aabb,
}

impl Ship {
    /// Ship at the origin heading along +x
    pub fn new(tuning: &ShipTuning) -> Self {
        let mut transform = Transform::uniform(Vec2::ZERO, tuning.size.max(0.0));
        transform.face(Vec2::X);
        let polygon = Polygon::ship();
        let local_bounds = transform.local_bounds(&polygon);
        Self {
            transform,
            velocity: Vec2::ZERO,
            direction: Vec2::X,
            weapon_cooldown: 0.0,
            polygon,
            local_bounds,
        }
    }

    /// Turn, thrust and wrap according to this tick's input
    pub fn move_by(&mut self, dt: f32, input: &TickInput, tuning: &ShipTuning) {
        let turn = match (input.turn_left, input.turn_right) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        if turn != 0.0 {
            let angle = TAU * tuning.rotation_rps * dt * turn;
            // Renormalize against drift; rotation never shrinks it to zero
            self.direction = (Mat2::from_angle(angle) * self.direction).normalize_or(Vec2::X);
            self.transform.face(self.direction);
            self.local_bounds = self.transform.local_bounds(&self.polygon);
        }

        let thrust = match (input.thrust_forward, input.thrust_back) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        self.velocity = self.direction * tuning.speed * thrust;
        self.transform.position += self.velocity * dt;
        self.transform.position =
            wrap_around(self.transform.position, self.local_bounds.half_extents());
    }

    /// Fire if requested and the weapon is ready, then run down the cooldown.
    ///
    /// The projectile leaves from the ship's nose along its heading.
    pub fn shoot(
        &mut self,
        dt: f32,
        fire: bool,
        tuning: &ShipTuning,
        projectile: &ProjectileTuning,
    ) -> Option<Projectile> {
        let mut shot = None;

        if fire && self.weapon_cooldown <= 0.0 {
            self.weapon_cooldown = tuning.fire_cooldown;
            let nose = self.transform.apply(Vec2::X);
            shot = Some(Projectile::new(
                nose,
                self.direction * projectile.speed,
                Vec2::from(projectile.size),
                projectile.life_time,
            ));
        }

        if self.weapon_cooldown > 0.0 {
            self.weapon_cooldown -= dt;
        }

        shot
    }
}

impl Body for Ship {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    fn local_bounds(&self) -> Aabb {
        self.local_bounds
    }
}

/// Outcome of splitting a rock
#[derive(Debug, Clone)]
pub enum Split {
    None,
    One(Rock),
    Two(Rock, Rock),
}

impl Split {
    pub fn count(&self) -> usize {
        match self {
            Split::None => 0,
            Split::One(_) => 1,
            Split::Two(_, _) => 2,
        }
    }

    pub fn into_rocks(self) -> Vec<Rock> {
        match self {
            Split::None => Vec::new(),
            Split::One(a) => vec![a],
            Split::Two(a, b) => vec![a, b],
        }
    }
}

/// A drifting rock. Rocks never rotate, so their box is computed once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rock {
    pub id: u32,
    pub transform: Transform,
    pub velocity: Vec2,
    size: f32,
    polygon: Polygon,
    local_bounds: Aabb,
}

impl Rock {
    /// Generate a rock (size clamped to >= 0, vertex count to >= 4)
    pub fn new(
        id: u32,
        rng: &mut VecGen,
        size: f32,
        vertex_count: usize,
        position: Vec2,
        velocity: Vec2,
        generator: &RockGenerator,
    ) -> Self {
        let size = size.max(0.0);
        let polygon = generator.generate(rng, vertex_count.max(MIN_ROCK_VERTICES));
        let transform = Transform::uniform(position, size);
        let local_bounds = transform.local_bounds(&polygon);
        Self {
            id,
            transform,
            velocity,
            size,
            polygon,
            local_bounds,
        }
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.polygon.len()
    }

    pub fn move_by(&mut self, dt: f32) {
        self.transform.position += self.velocity * dt;
        self.transform.position =
            wrap_around(self.transform.position, self.local_bounds.half_extents());
    }

    /// Break this rock into 0, 1 or 2 smaller ones.
    ///
    /// Children spawn where the parent was, with fewer vertices, a smaller
    /// size and a fresh random drift. Their ids are left at 0 for the caller
    /// to assign.
    pub fn split(&self, rng: &mut VecGen, policy: &SplitPolicy, generator: &RockGenerator) -> Split {
        let n = self.vertex_count();
        let count = policy.child_count(n);
        let scale = if count == 1 {
            policy.one_child_scale
        } else {
            policy.two_child_scale
        };
        let child_size = self.size * scale;

        if count == 0 || child_size < policy.min_size {
            return Split::None;
        }

        let child_vertices = n.saturating_sub(policy.vertex_loss).max(MIN_ROCK_VERTICES);
        let first = self.child(rng, child_size, child_vertices, policy.split_speed, generator);
        if count == 1 {
            return Split::One(first);
        }
        let second = self.child(rng, child_size, child_vertices, policy.split_speed, generator);
        Split::Two(first, second)
    }

    fn child(
        &self,
        rng: &mut VecGen,
        size: f32,
        vertex_count: usize,
        speed: f32,
        generator: &RockGenerator,
    ) -> Rock {
        let velocity = rng.get() * speed;
        Rock::new(
            0,
            rng,
            size,
            vertex_count,
            self.transform.position,
            velocity,
            generator,
        )
    }
}

impl Body for Rock {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    fn local_bounds(&self) -> Aabb {
        self.local_bounds
    }
}

/// A shot fired by the ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub transform: Transform,
    pub velocity: Vec2,
    /// Seconds left to live; dead at or below zero
    pub time_left: f32,
    polygon: Polygon,
    local_bounds: Aabb,
}

impl Projectile {
    /// Projectile oriented along its velocity (size and life clamped to >= 0)
    pub fn new(position: Vec2, velocity: Vec2, size: Vec2, life_time: f32) -> Self {
        let mut transform = Transform::new(position, size);
        transform.face(velocity);
        let polygon = Polygon::projectile();
        let local_bounds = transform.local_bounds(&polygon);
        Self {
            transform,
            velocity,
            time_left: life_time.max(0.0),
            polygon,
            local_bounds,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.time_left <= 0.0
    }

    /// Force the projectile dead (idempotent)
    #[inline]
    pub fn kill(&mut self) {
        self.time_left = -1.0;
    }

    pub fn move_by(&mut self, dt: f32) {
        self.transform.position += self.velocity * dt;
        self.transform.position =
            wrap_around(self.transform.position, self.local_bounds.half_extents());
        self.time_left -= dt;
    }
}

impl Body for Projectile {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    fn local_bounds(&self) -> Aabb {
        self.local_bounds
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Ship hit a rock
    GameOver,
    /// Every rock destroyed
    Cleared,
}

/// Something that happened during a tick, for the driver to react to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The ship fired a projectile
    Fired,
    /// A projectile broke a rock; `children` are the ids of its fragments
    RockSplit { rock_id: u32, children: Vec<u32> },
    /// The ship ran into a rock
    ShipDestroyed { rock_id: u32 },
    /// The last rock was destroyed
    FieldCleared,
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: VecGen,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Invincibility left (seconds); the ship is safe while this is >= 0
    pub grace_left: f32,
    pub ship: Ship,
    /// Live rocks in insertion order; this order decides which rock a
    /// projectile consumes when several overlap it
    pub rocks: Vec<Rock>,
    pub projectiles: Vec<Projectile>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with the configured initial rock field
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let mut state = Self::empty(seed, settings);
        state.spawn_initial_rocks(&settings.rocks, &settings.generator);
        log::info!(
            "Game initialized with seed {} ({} rocks)",
            seed,
            state.rocks.len()
        );
        state
    }

    /// A game with a ship and no rocks
    pub fn empty(seed: u64, settings: &Settings) -> Self {
        Self {
            seed,
            rng: VecGen::new(seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
            grace_left: settings.grace_period,
            ship: Ship::new(&settings.ship),
            rocks: Vec::new(),
            projectiles: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// True while the post-spawn grace period lasts
    pub fn is_invincible(&self) -> bool {
        self.grace_left >= 0.0
    }

    /// Generate a rock and add it to the end of the live list
    pub fn spawn_rock(
        &mut self,
        size: f32,
        vertex_count: usize,
        position: Vec2,
        velocity: Vec2,
        generator: &RockGenerator,
    ) -> u32 {
        let id = self.next_entity_id();
        let rock = Rock::new(
            id,
            &mut self.rng,
            size,
            vertex_count,
            position,
            velocity,
            generator,
        );
        self.rocks.push(rock);
        id
    }

    fn spawn_initial_rocks(&mut self, tuning: &RockTuning, generator: &RockGenerator) {
        for _ in 0..tuning.initial_count {
            let t = (self.rng.get().x + 1.0) * 0.5;
            let size = tuning.min_size + t * (tuning.max_size - tuning.min_size);
            let position = self.rng.get();
            let velocity = self.rng.get() * tuning.max_speed;
            self.spawn_rock(size, tuning.vertex_count, position, velocity, generator);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn test_new_game_spawns_rocks() {
        let s = settings();
        let state = GameState::new(12345, &s);
        assert_eq!(state.rocks.len(), s.rocks.initial_count);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.is_invincible());
        for rock in &state.rocks {
            assert_eq!(rock.vertex_count(), s.rocks.vertex_count);
            assert!(rock.size() >= s.rocks.min_size - 1e-6);
            assert!(rock.size() <= s.rocks.max_size + 1e-6);
        }
        // Ids are unique and increasing in insertion order
        for pair in state.rocks.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let s = settings();
        let a = GameState::new(777, &s);
        let b = GameState::new(777, &s);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_ship_turns_and_keeps_unit_heading() {
        let s = settings();
        let mut ship = Ship::new(&s.ship);
        let left = TickInput {
            turn_left: true,
            ..Default::default()
        };
        for _ in 0..100 {
            ship.move_by(0.015, &left, &s.ship);
        }
        assert!((ship.direction.length() - 1.0).abs() < 1e-5);
        // Turning left is counter-clockwise: heading starts rotating toward +y
        let mut fresh = Ship::new(&s.ship);
        fresh.move_by(0.015, &left, &s.ship);
        assert!(fresh.direction.y > 0.0);
    }

    #[test]
    fn test_ship_opposite_keys_cancel() {
        let s = settings();
        let mut ship = Ship::new(&s.ship);
        let both = TickInput {
            turn_left: true,
            turn_right: true,
            thrust_forward: true,
            thrust_back: true,
            ..Default::default()
        };
        ship.move_by(0.1, &both, &s.ship);
        assert_eq!(ship.direction, Vec2::X);
        assert_eq!(ship.transform.position, Vec2::ZERO);
    }

    #[test]
    fn test_ship_thrust_moves_along_heading() {
        let s = settings();
        let mut ship = Ship::new(&s.ship);
        let forward = TickInput {
            thrust_forward: true,
            ..Default::default()
        };
        ship.move_by(0.1, &forward, &s.ship);
        assert!((ship.transform.position.x - s.ship.speed * 0.1).abs() < 1e-6);
        assert_eq!(ship.velocity, Vec2::X * s.ship.speed);

        let back = TickInput {
            thrust_back: true,
            ..Default::default()
        };
        ship.move_by(0.1, &back, &s.ship);
        assert!(ship.transform.position.x.abs() < 1e-6);
    }

    #[test]
    fn test_ship_box_follows_rotation() {
        let s = settings();
        let mut ship = Ship::new(&s.ship);
        let left = TickInput {
            turn_left: true,
            ..Default::default()
        };
        // A quarter turn: the long axis now lies along y
        let quarter = 0.25 / s.ship.rotation_rps;
        ship.move_by(quarter, &left, &s.ship);
        let half = ship.local_bounds().half_extents();
        assert!(half.y > half.x);
        let exact = Aabb::from_points(&ship.polygon_srt()).unwrap();
        let slack = Aabb::from_center_half_extents(
            ship.bounding_box().center(),
            ship.bounding_box().half_extents() + 1e-5,
        );
        assert!(slack.contains(&exact));
    }

    #[test]
    fn test_shoot_respects_cooldown() {
        let s = settings();
        let mut ship = Ship::new(&s.ship);
        let dt = 0.015;

        let first = ship.shoot(dt, true, &s.ship, &s.projectile);
        assert!(first.is_some());
        assert!(ship.shoot(dt, true, &s.ship, &s.projectile).is_none());

        // No fire intent, nothing fired, cooldown still runs down
        let mut ticks = 0;
        while ship.weapon_cooldown > 0.0 {
            assert!(ship.shoot(dt, false, &s.ship, &s.projectile).is_none());
            ticks += 1;
        }
        assert!(ticks > 0);
        assert!(ship.shoot(dt, true, &s.ship, &s.projectile).is_some());
    }

    #[test]
    fn test_shot_leaves_nose_along_heading() {
        let s = settings();
        let mut ship = Ship::new(&s.ship);
        let p = ship.shoot(0.015, true, &s.ship, &s.projectile).unwrap();
        assert!((p.transform.position - Vec2::new(s.ship.size, 0.0)).length() < 1e-6);
        assert!((p.velocity - Vec2::X * s.projectile.speed).length() < 1e-6);
        assert!(!p.is_dead());
    }

    #[test]
    fn test_projectile_life_and_kill() {
        let mut p = Projectile::new(Vec2::ZERO, Vec2::X, Vec2::splat(0.01), 0.05);
        assert!(!p.is_dead());
        p.move_by(0.03);
        assert!(!p.is_dead());
        p.move_by(0.03);
        assert!(p.is_dead());

        let mut q = Projectile::new(Vec2::ZERO, Vec2::X, Vec2::splat(0.01), 1.0);
        q.kill();
        assert!(q.is_dead());
        q.kill();
        assert!(q.is_dead());
        assert_eq!(q.time_left, -1.0);
    }

    #[test]
    fn test_projectile_clamps_inputs() {
        let p = Projectile::new(Vec2::ZERO, Vec2::ZERO, Vec2::new(-1.0, 0.1), -3.0);
        assert_eq!(p.transform.scale, Vec2::new(0.0, 0.1));
        assert!(p.is_dead());
        // Zero velocity leaves it unrotated
        assert_eq!(p.transform.rotation, Mat2::IDENTITY);
    }

    #[test]
    fn test_projectile_wraps() {
        let mut p = Projectile::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 0.0), Vec2::splat(0.01), 5.0);
        p.move_by(0.1);
        // Reappears just inside the opposite edge
        assert!(p.transform.position.x < -0.9);
        assert_eq!(p.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_rock_clamps_inputs() {
        let mut rng = VecGen::new(1);
        let rock = Rock::new(
            1,
            &mut rng,
            -0.5,
            2,
            Vec2::ZERO,
            Vec2::ZERO,
            &RockGenerator::default(),
        );
        assert_eq!(rock.size(), 0.0);
        assert_eq!(rock.vertex_count(), 4);
    }

    #[test]
    fn test_rock_box_covers_outline() {
        let mut rng = VecGen::new(2);
        let rock = Rock::new(
            1,
            &mut rng,
            0.2,
            10,
            Vec2::new(0.3, -0.4),
            Vec2::ZERO,
            &RockGenerator::default(),
        );
        let bb = rock.bounding_box();
        assert!(bb.half_extents().x <= 0.2 + 1e-6);
        for v in rock.polygon_srt() {
            assert!(v.x >= bb.min.x - 1e-6 && v.x <= bb.max.x + 1e-6);
            assert!(v.y >= bb.min.y - 1e-6 && v.y <= bb.max.y + 1e-6);
        }
    }

    fn rock_with_vertices(n: usize) -> Rock {
        let mut rng = VecGen::new(n as u64);
        Rock::new(
            1,
            &mut rng,
            0.2,
            n,
            Vec2::new(0.1, 0.1),
            Vec2::ZERO,
            &RockGenerator::default(),
        )
    }

    #[test]
    fn test_split_thresholds() {
        let policy = SplitPolicy::default();
        let generator = RockGenerator::default();
        let mut rng = VecGen::new(99);
        for (n, expected) in [(4, 0), (5, 1), (7, 1), (8, 2), (10, 2), (16, 2)] {
            let split = rock_with_vertices(n).split(&mut rng, &policy, &generator);
            assert_eq!(split.count(), expected, "vertex count {n}");
        }
    }

    #[test]
    fn test_split_children() {
        let policy = SplitPolicy::default();
        let generator = RockGenerator::default();
        let mut rng = VecGen::new(4);
        let parent = rock_with_vertices(10);
        let children = parent.split(&mut rng, &policy, &generator).into_rocks();
        assert_eq!(children.len(), 2);
        for child in &children {
            assert_eq!(child.vertex_count(), 7);
            assert!((child.size() - 0.2 * policy.two_child_scale).abs() < 1e-6);
            assert_eq!(child.transform.position, parent.transform.position);
            assert!(child.velocity.length() <= policy.split_speed * std::f32::consts::SQRT_2 + 1e-6);
            assert_eq!(child.id, 0);
        }

        let single = rock_with_vertices(6).split(&mut rng, &policy, &generator);
        match single {
            Split::One(child) => {
                assert_eq!(child.vertex_count(), 4);
                assert!((child.size() - 0.2 * policy.one_child_scale).abs() < 1e-6);
            }
            other => panic!("expected one child, got {}", other.count()),
        }
    }

    #[test]
    fn test_split_too_small_vanishes() {
        let policy = SplitPolicy {
            min_size: 0.5,
            ..SplitPolicy::default()
        };
        let mut rng = VecGen::new(4);
        let split = rock_with_vertices(10).split(&mut rng, &policy, &RockGenerator::default());
        assert_eq!(split.count(), 0);
    }

    #[test]
    fn test_split_deterministic() {
        let policy = SplitPolicy::default();
        let generator = RockGenerator::default();
        let parent = rock_with_vertices(9);
        let a = parent.split(&mut VecGen::new(5), &policy, &generator).into_rocks();
        let b = parent.split(&mut VecGen::new(5), &policy, &generator).into_rocks();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.polygon().vertices(), y.polygon().vertices());
            assert_eq!(x.velocity, y.velocity);
        }
    }
}
