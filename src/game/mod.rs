//! The main game module for the star catcher.
//!
//! This module contains all the gameplay logic including:
//! - Arena coordinates and the mapping onto the Bevy world
//! - Arcade physics (gravity, platforms, world bounds)
//! - Player movement and animation
//! - Star collection and waves
//! - Bomb spawning
//! - Score and game over

mod assets;
mod bomb;
mod camera;
mod debug;
mod physics;
mod platform;
mod player;
mod star;
mod state;

use bevy::prelude::*;

pub use assets::{GameAssets, Sfx, load_game_assets};

use crate::{AppSystems, audio::music, screens::Screen, settings::GameSettings};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<ArenaPosition>();

    app.configure_sets(
        Update,
        (
            GameplaySystems::Input,
            GameplaySystems::Physics,
            GameplaySystems::Contacts,
            GameplaySystems::Effects,
            GameplaySystems::Sync,
        )
            .chain()
            .in_set(AppSystems::Update)
            .run_if(in_state(Screen::Gameplay)),
    );

    app.add_plugins((
        assets::plugin,
        physics::plugin,
        platform::plugin,
        player::plugin,
        star::plugin,
        bomb::plugin,
        state::plugin,
        camera::plugin,
        debug::plugin,
    ));

    app.add_systems(
        Update,
        sync_arena_transforms.in_set(GameplaySystems::Sync),
    );
}

/// Size of the playable arena in pixels.
pub const ARENA_SIZE: Vec2 = Vec2::new(800.0, 600.0);

/// Ordering of the per-frame gameplay work.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySystems {
    /// Read the keyboard and set velocities.
    Input,
    /// Step the arcade physics.
    Physics,
    /// Overlap and collision reactions.
    Contacts,
    /// Sounds, tweens, labels and other consequences.
    Effects,
    /// Copy arena positions into transforms.
    Sync,
}

/// Position in arena space: origin at the top-left corner, y grows downward.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect, Deref, DerefMut)]
#[reflect(Component)]
pub struct ArenaPosition(pub Vec2);

/// Convert an arena position into Bevy world space (origin at the arena centre, y up).
pub fn arena_to_world(position: Vec2) -> Vec2 {
    Vec2::new(
        position.x - ARENA_SIZE.x / 2.0,
        ARENA_SIZE.y / 2.0 - position.y,
    )
}

fn sync_arena_transforms(
    mut query: Query<(&ArenaPosition, &mut Transform), Changed<ArenaPosition>>,
) {
    for (position, mut transform) in &mut query {
        let world = arena_to_world(position.0);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }
}

/// System to spawn the game level when entering gameplay.
/// Called from `screens/gameplay.rs` on `OnEnter(Screen::Gameplay)`.
pub fn spawn_game(
    mut commands: Commands,
    game_assets: Res<GameAssets>,
    sfx: Res<Sfx>,
    settings: Res<GameSettings>,
) {
    commands.spawn((
        Name::new("Sky"),
        Sprite {
            image: game_assets.sky.clone(),
            custom_size: Some(ARENA_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, -10.0),
        DespawnOnExit(Screen::Gameplay),
    ));

    commands.spawn((
        Name::new("Background Music"),
        music(sfx.background.clone(), settings.music_volume),
        DespawnOnExit(Screen::Gameplay),
    ));

    info!("Game spawned - catch the stars!");
}
