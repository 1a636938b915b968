//! Bombs - the hazards.
//!
//! A bomb drops in on the half of the arena away from the player whenever a
//! wave of stars is cleared, and again on a fixed timer. Bombs bounce
//! forever and are never removed.

use std::ops::Range;
use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use super::{
    ARENA_SIZE, ArenaPosition, GameAssets, GameplaySystems, arena_to_world, physics::Body,
    player::Player,
};
use crate::{AppSystems, screens::Screen, settings::GameSettings};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Bomb>();
    app.add_message::<SpawnBomb>();
    app.init_resource::<BombTimer>();

    app.add_systems(OnEnter(Screen::Gameplay), reset_bomb_timer);

    // The timer keeps running after game over.
    app.add_systems(
        Update,
        tick_bomb_timer
            .in_set(AppSystems::TickTimers)
            .run_if(in_state(Screen::Gameplay)),
    );
    app.add_systems(
        Update,
        spawn_bombs
            .in_set(GameplaySystems::Effects)
            .run_if(resource_exists::<GameAssets>),
    );
}

/// Arena y bombs are dropped from.
const BOMB_SPAWN_Y: f32 = 16.0;

/// Size of a bomb's body.
const BOMB_SIZE: Vec2 = Vec2::new(14.0, 14.0);

/// Largest horizontal launch speed either way.
const BOMB_MAX_SPEED_X: f32 = 200.0;

/// Downward launch speed.
const BOMB_FALL_SPEED: f32 = 20.0;

const DEFAULT_BOMB_INTERVAL_SECS: u64 = 5;

/// Marker component for bombs.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Bomb;

/// Why a bomb is being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BombCause {
    WaveCleared,
    Timer,
}

/// Message requesting one new bomb.
#[derive(Message, Debug, Clone, Copy)]
pub struct SpawnBomb {
    pub cause: BombCause,
}

/// Recurring timer for bombs that drop regardless of stars.
#[derive(Resource, Debug)]
pub struct BombTimer(pub Timer);

impl Default for BombTimer {
    fn default() -> Self {
        Self::new(bomb_interval(&GameSettings::default()))
    }
}

impl BombTimer {
    fn new(interval: Duration) -> Self {
        Self(Timer::new(interval, TimerMode::Repeating))
    }
}

/// Where and how fast a new bomb starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BombLaunch {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl BombLaunch {
    /// Roll a launch on the side of the arena away from the player.
    pub fn roll(player_x: f32, rng: &mut impl Rng) -> Self {
        Self {
            position: Vec2::new(rng.random_range(spawn_x_range(player_x)), BOMB_SPAWN_Y),
            velocity: Vec2::new(
                rng.random_range(-BOMB_MAX_SPEED_X..=BOMB_MAX_SPEED_X),
                BOMB_FALL_SPEED,
            ),
        }
    }
}

/// Horizontal range a bomb may appear in: the half without the player.
pub fn spawn_x_range(player_x: f32) -> Range<f32> {
    let middle = ARENA_SIZE.x / 2.0;
    if player_x < middle {
        middle..ARENA_SIZE.x
    } else {
        0.0..middle
    }
}

/// The configured bomb interval, or the default one if it isn't a valid duration.
fn bomb_interval(settings: &GameSettings) -> Duration {
    match Duration::try_from_secs_f32(settings.bomb_interval_secs) {
        Ok(interval) => interval,
        Err(e) => {
            warn!(
                "Invalid bomb interval {}: {}, using the default",
                settings.bomb_interval_secs, e
            );
            Duration::from_secs(DEFAULT_BOMB_INTERVAL_SECS)
        }
    }
}

fn reset_bomb_timer(mut timer: ResMut<BombTimer>, settings: Res<GameSettings>) {
    *timer = BombTimer::new(bomb_interval(&settings));
    info!("Bombs drop every {:?}", timer.0.duration());
}

fn tick_bomb_timer(
    time: Res<Time>,
    mut timer: ResMut<BombTimer>,
    mut bomb_events: MessageWriter<SpawnBomb>,
) {
    timer.0.tick(time.delta());
    for _ in 0..timer.0.times_finished_this_tick() {
        bomb_events.write(SpawnBomb {
            cause: BombCause::Timer,
        });
    }
}

fn spawn_bombs(
    mut commands: Commands,
    mut bomb_events: MessageReader<SpawnBomb>,
    game_assets: Res<GameAssets>,
    player: Single<&ArenaPosition, With<Player>>,
) {
    let mut rng = rand::rng();
    for event in bomb_events.read() {
        let launch = BombLaunch::roll(player.x, &mut rng);
        commands.spawn((
            Name::new("Bomb"),
            Bomb,
            ArenaPosition(launch.position),
            Body::new(BOMB_SIZE)
                .with_bounce(Vec2::ONE)
                .with_velocity(launch.velocity)
                .with_world_bounds(),
            Sprite::from_image(game_assets.bomb.clone()),
            Transform::from_translation(arena_to_world(launch.position).extend(2.0)),
            DespawnOnExit(Screen::Gameplay),
        ));

        info!(
            "Bomb dropped ({:?}) at {:?} with velocity {:?}",
            event.cause, launch.position, launch.velocity
        );
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::{message::Messages, system::RunSystemOnce};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::game::{physics::PhysicsWorld, state::GameSession};

    fn game_assets() -> GameAssets {
        GameAssets {
            sky: Handle::default(),
            platform: Handle::default(),
            star: Handle::default(),
            bomb: Handle::default(),
            dude: Handle::default(),
            dude_layout: Handle::default(),
        }
    }

    fn bombs(world: &mut World) -> Vec<(Vec2, Body)> {
        world
            .query_filtered::<(&ArenaPosition, &Body), With<Bomb>>()
            .iter(world)
            .map(|(position, body)| (position.0, body.clone()))
            .collect()
    }

    #[test]
    fn test_bomb_side_opposes_player() {
        assert_eq!(spawn_x_range(100.0), 400.0..800.0);
        assert_eq!(spawn_x_range(399.9), 400.0..800.0);
        assert_eq!(spawn_x_range(400.0), 0.0..400.0);
        assert_eq!(spawn_x_range(700.0), 0.0..400.0);
    }

    #[test]
    fn test_launch_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for player_x in [0.0, 150.0, 399.0, 400.0, 650.0, 800.0] {
            let range = spawn_x_range(player_x);
            for _ in 0..200 {
                let launch = BombLaunch::roll(player_x, &mut rng);
                assert!(range.contains(&launch.position.x));
                assert_eq!(launch.position.y, BOMB_SPAWN_Y);
                assert!(launch.velocity.x.abs() <= BOMB_MAX_SPEED_X);
                assert_eq!(launch.velocity.y, BOMB_FALL_SPEED);
            }
        }
    }

    #[test]
    fn test_timer_requests_a_bomb_every_interval() {
        let mut timer = BombTimer::new(Duration::from_secs(5));
        timer.0.tick(Duration::from_millis(4999));
        assert_eq!(timer.0.times_finished_this_tick(), 0);
        timer.0.tick(Duration::from_millis(10_000));
        assert_eq!(timer.0.times_finished_this_tick(), 2);
    }

    #[test]
    fn test_invalid_interval_falls_back_to_default() {
        let settings = |secs| GameSettings {
            bomb_interval_secs: secs,
            ..default()
        };
        assert_eq!(bomb_interval(&settings(2.5)), Duration::from_millis(2500));
        assert_eq!(bomb_interval(&settings(f32::INFINITY)), Duration::from_secs(5));
        assert_eq!(bomb_interval(&settings(f32::NAN)), Duration::from_secs(5));
        assert_eq!(bomb_interval(&settings(-1.0)), Duration::from_secs(5));
    }

    #[test]
    fn test_timer_keeps_firing_after_game_over() {
        let mut world = World::new();
        world.insert_resource(GameSession {
            score: 30,
            game_over: true,
        });
        let mut physics = PhysicsWorld::default();
        physics.pause();
        world.insert_resource(physics);
        world.insert_resource(BombTimer::new(Duration::from_secs(5)));
        world.init_resource::<Messages<SpawnBomb>>();

        let mut time = Time::<()>::default();
        time.advance_by(Duration::from_secs(5));
        world.insert_resource(time);

        world.run_system_once(tick_bomb_timer).unwrap();

        let causes = world
            .run_system_once(|mut requests: MessageReader<SpawnBomb>| {
                requests.read().map(|request| request.cause).collect::<Vec<_>>()
            })
            .unwrap();
        assert_eq!(causes, vec![BombCause::Timer]);
    }

    #[test]
    fn test_spawn_request_adds_exactly_one_bomb() {
        let mut world = World::new();
        world.insert_resource(game_assets());
        world.init_resource::<Messages<SpawnBomb>>();
        world.spawn((Player, ArenaPosition(Vec2::new(100.0, 450.0))));
        world
            .resource_mut::<Messages<SpawnBomb>>()
            .write(SpawnBomb {
                cause: BombCause::WaveCleared,
            });

        world.run_system_once(spawn_bombs).unwrap();

        let spawned = bombs(&mut world);
        assert_eq!(spawned.len(), 1);
        let (position, body) = &spawned[0];
        assert!((400.0..800.0).contains(&position.x));
        assert_eq!(position.y, BOMB_SPAWN_Y);
        assert_eq!(body.bounce, Vec2::ONE);
        assert!(body.collide_world_bounds);
        assert!(body.enabled);

        // Bombs are never removed, so a second request adds a second one.
        {
            let mut requests = world.resource_mut::<Messages<SpawnBomb>>();
            requests.update();
            requests.update();
        }
        world
            .resource_mut::<Messages<SpawnBomb>>()
            .write(SpawnBomb {
                cause: BombCause::Timer,
            });
        world.run_system_once(spawn_bombs).unwrap();
        assert_eq!(bombs(&mut world).len(), 2);
    }
}
