//! Arcade physics for the arena.
//!
//! Bodies are axis-aligned boxes centred on their [`ArenaPosition`]. Each
//! frame every enabled [`Body`] falls under gravity, moves by its velocity,
//! is pushed out of any [`StaticBody`] it sank into and, if asked to, is
//! kept inside the arena bounds. Velocities bounce by the body's bounce
//! factor on every contact.

use bevy::prelude::*;

use super::{ARENA_SIZE, ArenaPosition, GameplaySystems};
use crate::screens::Screen;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<PhysicsWorld>();
    app.register_type::<PhysicsWorld>();
    app.register_type::<Body>();
    app.register_type::<StaticBody>();

    app.add_systems(OnEnter(Screen::Gameplay), reset_physics);

    app.add_systems(
        Update,
        step_bodies
            .in_set(GameplaySystems::Physics)
            .run_if(physics_running),
    );
}

/// Downward acceleration applied to every body, in pixels per second squared.
const WORLD_GRAVITY: f32 = 200.0;

/// Longest frame the integrator will take in one go.
const MAX_STEP_SECS: f32 = 1.0 / 30.0;

/// Rebounds slower than this settle to rest.
const MIN_REBOUND_SPEED: f32 = 15.0;

/// Global physics settings and the pause switch.
#[derive(Resource, Debug, Clone, Reflect)]
#[reflect(Resource)]
pub struct PhysicsWorld {
    pub gravity: f32,
    /// Area that bodies with `collide_world_bounds` stay inside.
    pub bounds: Rect,
    paused: bool,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self {
            gravity: WORLD_GRAVITY,
            bounds: Rect::from_corners(Vec2::ZERO, ARENA_SIZE),
            paused: false,
        }
    }
}

impl PhysicsWorld {
    /// Freeze all bodies. There is no way back short of leaving gameplay.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn is_running(&self) -> bool {
        !self.paused
    }
}

/// Run condition: the physics world is not paused.
pub fn physics_running(world: Res<PhysicsWorld>) -> bool {
    world.is_running()
}

/// A dynamic body.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Body {
    pub velocity: Vec2,
    pub size: Vec2,
    /// Fraction of velocity kept when bouncing off something, per axis.
    pub bounce: Vec2,
    /// Extra gravity on top of the world's.
    pub gravity: f32,
    pub collide_world_bounds: bool,
    /// Disabled bodies neither move nor touch anything.
    pub enabled: bool,
    /// Resting on top of a static body after the last step.
    pub touching_down: bool,
}

impl Body {
    pub fn new(size: Vec2) -> Self {
        Self {
            velocity: Vec2::ZERO,
            size,
            bounce: Vec2::ZERO,
            gravity: 0.0,
            collide_world_bounds: false,
            enabled: true,
            touching_down: false,
        }
    }

    pub fn with_bounce(mut self, bounce: Vec2) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_world_bounds(mut self) -> Self {
        self.collide_world_bounds = true;
        self
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Re-enable the body at rest.
    pub fn enable(&mut self) {
        self.enabled = true;
        self.velocity = Vec2::ZERO;
        self.touching_down = false;
    }
}

/// Immovable collision geometry.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct StaticBody {
    pub size: Vec2,
}

/// Whether two boxes centred at `a` and `b` intersect. Touching edges don't count.
pub fn overlaps(a: Vec2, a_size: Vec2, b: Vec2, b_size: Vec2) -> bool {
    !Rect::from_center_size(a, a_size)
        .intersect(Rect::from_center_size(b, b_size))
        .is_empty()
}

fn rebound(speed: f32, bounce: f32) -> f32 {
    let rebound = -speed * bounce;
    if rebound.abs() < MIN_REBOUND_SPEED {
        0.0
    } else {
        rebound
    }
}

/// Advance one body by `dt` seconds.
pub fn step(body: &mut Body, position: &mut Vec2, solids: &[Rect], world: &PhysicsWorld, dt: f32) {
    body.touching_down = false;
    body.velocity.y += (world.gravity + body.gravity) * dt;
    *position += body.velocity * dt;

    for solid in solids {
        let overlap = Rect::from_center_size(*position, body.size).intersect(*solid);
        if overlap.is_empty() {
            continue;
        }

        let depth = overlap.size();
        let centre = solid.center();
        if depth.x < depth.y {
            if position.x < centre.x {
                position.x -= depth.x;
                if body.velocity.x > 0.0 {
                    body.velocity.x = rebound(body.velocity.x, body.bounce.x);
                }
            } else {
                position.x += depth.x;
                if body.velocity.x < 0.0 {
                    body.velocity.x = rebound(body.velocity.x, body.bounce.x);
                }
            }
        } else if position.y < centre.y {
            // Landed on top.
            position.y -= depth.y;
            if body.velocity.y > 0.0 {
                body.velocity.y = rebound(body.velocity.y, body.bounce.y);
            }
            body.touching_down = true;
        } else {
            position.y += depth.y;
            if body.velocity.y < 0.0 {
                body.velocity.y = rebound(body.velocity.y, body.bounce.y);
            }
        }
    }

    if body.collide_world_bounds {
        confine(body, position, world.bounds);
    }
}

fn confine(body: &mut Body, position: &mut Vec2, bounds: Rect) {
    let half = body.size / 2.0;
    let min = bounds.min + half;
    let max = bounds.max - half;

    if position.x < min.x {
        position.x = min.x;
        if body.velocity.x < 0.0 {
            body.velocity.x = rebound(body.velocity.x, body.bounce.x);
        }
    } else if position.x > max.x {
        position.x = max.x;
        if body.velocity.x > 0.0 {
            body.velocity.x = rebound(body.velocity.x, body.bounce.x);
        }
    }

    if position.y < min.y {
        position.y = min.y;
        if body.velocity.y < 0.0 {
            body.velocity.y = rebound(body.velocity.y, body.bounce.y);
        }
    } else if position.y > max.y {
        position.y = max.y;
        if body.velocity.y > 0.0 {
            body.velocity.y = rebound(body.velocity.y, body.bounce.y);
        }
    }
}

fn reset_physics(mut world: ResMut<PhysicsWorld>) {
    *world = PhysicsWorld::default();
}

fn step_bodies(
    time: Res<Time>,
    world: Res<PhysicsWorld>,
    solid_query: Query<(&ArenaPosition, &StaticBody)>,
    mut body_query: Query<(&mut ArenaPosition, &mut Body), Without<StaticBody>>,
) {
    let dt = time.delta_secs().min(MAX_STEP_SECS);
    let solids: Vec<Rect> = solid_query
        .iter()
        .map(|(position, solid)| Rect::from_center_size(position.0, solid.size))
        .collect();

    for (mut position, mut body) in &mut body_query {
        if !body.enabled {
            continue;
        }
        step(&mut body, &mut position.0, &solids, &world, dt);
    }
}
