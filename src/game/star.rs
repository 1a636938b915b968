//! Stars - the collectibles.
//!
//! Twelve stars drop in along the top of the arena. Touching one hides it
//! and scores points. Once the last one is gone they all drop in again and
//! a bomb is released.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use super::{
    ArenaPosition, GameAssets, GameplaySystems, Sfx, arena_to_world,
    bomb::{BombCause, SpawnBomb},
    load_game_assets,
    physics::{Body, overlaps, physics_running},
    player::Player,
    state::GameSession,
};
use crate::{audio::sound_effect, screens::Screen, tween::Tween};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Star>();
    app.add_message::<StarCollected>();

    app.add_systems(
        OnEnter(Screen::Gameplay),
        spawn_stars.after(load_game_assets),
    );

    app.add_systems(
        Update,
        collect_stars
            .in_set(GameplaySystems::Contacts)
            .run_if(physics_running),
    );
    app.add_systems(
        Update,
        celebrate_collection.in_set(GameplaySystems::Effects),
    );
}

/// Number of stars in a wave.
pub const STAR_COUNT: usize = 12;

/// Size of a star's body.
const STAR_SIZE: Vec2 = Vec2::new(24.0, 22.0);

/// X of the first star and the gap between neighbours.
const STAR_START_X: f32 = 12.0;
const STAR_STEP_X: f32 = 70.0;

/// Player scale at the peak of the pickup pulse.
const PULSE_PEAK: f32 = 1.2;
const PULSE_HALF: Duration = Duration::from_millis(200);

/// Marker component for stars.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Star;

/// Message sent when the player picks up a star.
#[derive(Message, Debug, Clone)]
pub struct StarCollected {
    pub star: Entity,
    pub score: u32,
}

/// X position of the star with the given index.
pub fn star_x(index: usize) -> f32 {
    STAR_START_X + STAR_STEP_X * index as f32
}

/// Vertical bounce of a star, randomized per star.
pub fn random_star_bounce(rng: &mut impl Rng) -> f32 {
    rng.random_range(0.4..0.8)
}

fn spawn_stars(mut commands: Commands, game_assets: Res<GameAssets>) {
    let mut rng = rand::rng();
    for index in 0..STAR_COUNT {
        let position = Vec2::new(star_x(index), 0.0);
        commands.spawn((
            Name::new("Star"),
            Star,
            ArenaPosition(position),
            Body::new(STAR_SIZE).with_bounce(Vec2::new(0.0, random_star_bounce(&mut rng))),
            Sprite::from_image(game_assets.star.clone()),
            Transform::from_translation(arena_to_world(position).extend(1.0)),
            Visibility::Inherited,
            DespawnOnExit(Screen::Gameplay),
        ));
    }

    info!("Spawned {} stars", STAR_COUNT);
}

/// Pick up every active star the player overlaps, and start a new wave
/// when none are left.
fn collect_stars(
    mut session: ResMut<GameSession>,
    player: Single<(&ArenaPosition, &Body), With<Player>>,
    mut star_query: Query<
        (Entity, &mut ArenaPosition, &mut Body, &mut Visibility),
        (With<Star>, Without<Player>),
    >,
    mut collected_events: MessageWriter<StarCollected>,
    mut bomb_events: MessageWriter<SpawnBomb>,
) {
    let (player_position, player_body) = player.into_inner();

    let mut collected_any = false;
    for (entity, position, mut body, mut visibility) in &mut star_query {
        if !body.enabled || !overlaps(player_position.0, player_body.size, position.0, body.size) {
            continue;
        }

        body.disable();
        *visibility = Visibility::Hidden;
        let score = session.collect_star();
        collected_events.write(StarCollected { star: entity, score });
        collected_any = true;

        info!("Star collected, score: {}", score);
    }

    if !collected_any || star_query.iter().any(|(_, _, body, _)| body.enabled) {
        return;
    }

    for (_, mut position, mut body, mut visibility) in &mut star_query {
        position.y = 0.0;
        body.enable();
        *visibility = Visibility::Inherited;
    }
    info!("All stars collected! Dropping a new wave");

    bomb_events.write(SpawnBomb {
        cause: BombCause::WaveCleared,
    });
}

/// Sound and a quick grow pulse on the player for every pickup.
fn celebrate_collection(
    mut commands: Commands,
    mut collected_events: MessageReader<StarCollected>,
    sfx: Res<Sfx>,
    player: Single<Entity, With<Player>>,
) {
    for event in collected_events.read() {
        debug!("Celebrating pickup of {:?} at score {}", event.star, event.score);
        commands.spawn(sound_effect(sfx.blaster.clone()));
        commands
            .entity(*player)
            .insert(Tween::pulse(PULSE_PEAK, PULSE_HALF));
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::{message::Messages, system::RunSystemOnce};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::game::player::PLAYER_SIZE;

    const PLAYER_AT: Vec2 = Vec2::new(300.0, 500.0);

    fn world_with_stars(active: &[bool; STAR_COUNT]) -> World {
        let mut world = World::new();
        world.init_resource::<GameSession>();
        world.init_resource::<Messages<StarCollected>>();
        world.init_resource::<Messages<SpawnBomb>>();

        world.spawn((Player, ArenaPosition(PLAYER_AT), Body::new(PLAYER_SIZE)));

        for (index, &enabled) in active.iter().enumerate() {
            // The first star sits on the player, the rest far away.
            let position = if index == 0 {
                PLAYER_AT
            } else {
                Vec2::new(star_x(index), 100.0)
            };
            let mut body = Body::new(STAR_SIZE);
            body.enabled = enabled;
            body.velocity = Vec2::new(0.0, 50.0);
            world.spawn((Star, ArenaPosition(position), body, Visibility::Inherited));
        }

        world
    }

    fn active_stars(world: &mut World) -> usize {
        world
            .query_filtered::<&Body, With<Star>>()
            .iter(world)
            .filter(|body| body.enabled)
            .count()
    }

    #[test]
    fn test_star_positions_step_along_the_top() {
        assert_eq!(star_x(0), 12.0);
        assert_eq!(star_x(1), 82.0);
        assert_eq!(star_x(STAR_COUNT - 1), 782.0);
    }

    #[test]
    fn test_star_bounce_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let bounce = random_star_bounce(&mut rng);
            assert!((0.4..0.8).contains(&bounce));
        }
    }

    #[test]
    fn test_collecting_a_star_scores_and_hides_it() {
        let mut active = [false; STAR_COUNT];
        active[0] = true;
        active[1] = true;
        let mut world = world_with_stars(&active);

        world.run_system_once(collect_stars).unwrap();

        assert_eq!(world.resource::<GameSession>().score, 10);
        assert_eq!(world.resource::<Messages<StarCollected>>().len(), 1);
        assert_eq!(world.resource::<Messages<SpawnBomb>>().len(), 0);
        assert_eq!(active_stars(&mut world), 1);

        let hidden: Vec<Entity> = world
            .query_filtered::<(Entity, &Visibility), With<Star>>()
            .iter(&world)
            .filter(|(_, visibility)| **visibility == Visibility::Hidden)
            .map(|(entity, _)| entity)
            .collect();
        assert_eq!(hidden.len(), 1);

        let collected = world
            .run_system_once(|mut events: MessageReader<StarCollected>| {
                events.read().map(|event| (event.star, event.score)).collect::<Vec<_>>()
            })
            .unwrap();
        assert_eq!(collected, vec![(hidden[0], 10)]);
    }

    #[test]
    fn test_last_star_starts_new_wave_with_one_bomb() {
        let mut active = [false; STAR_COUNT];
        active[0] = true;
        let mut world = world_with_stars(&active);

        world.run_system_once(collect_stars).unwrap();

        assert_eq!(world.resource::<GameSession>().score, 10);
        assert_eq!(active_stars(&mut world), STAR_COUNT);
        assert_eq!(world.resource::<Messages<SpawnBomb>>().len(), 1);

        let mut stars = world.query_filtered::<(&ArenaPosition, &Body, &Visibility), With<Star>>();
        for (position, body, visibility) in stars.iter(&world) {
            assert_eq!(position.y, 0.0);
            assert_eq!(body.velocity, Vec2::ZERO);
            assert_eq!(*visibility, Visibility::Inherited);
        }
    }

    #[test]
    fn test_inactive_star_is_ignored() {
        let active = [false; STAR_COUNT];
        let mut world = world_with_stars(&active);

        world.run_system_once(collect_stars).unwrap();

        assert_eq!(world.resource::<GameSession>().score, 0);
        assert_eq!(world.resource::<Messages<SpawnBomb>>().len(), 0);
        assert_eq!(active_stars(&mut world), 0);
    }
}
