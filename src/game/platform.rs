//! Static platforms the player, stars and bombs rest on.

use bevy::prelude::*;

use super::{
    ArenaPosition, GameAssets, arena_to_world, load_game_assets, physics::StaticBody,
};
use crate::screens::Screen;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(Screen::Gameplay),
        spawn_platforms.after(load_game_assets),
    );
}

/// Size of the platform image.
const PLATFORM_SIZE: Vec2 = Vec2::new(400.0, 32.0);

/// Centre and scale of every platform in arena space. The first one is the ground.
const PLATFORMS: [(Vec2, f32); 4] = [
    (Vec2::new(400.0, 568.0), 2.0),
    (Vec2::new(600.0, 400.0), 1.0),
    (Vec2::new(50.0, 250.0), 1.0),
    (Vec2::new(750.0, 220.0), 1.0),
];

fn spawn_platforms(mut commands: Commands, game_assets: Res<GameAssets>) {
    for (position, scale) in PLATFORMS {
        let size = PLATFORM_SIZE * scale;
        commands.spawn((
            Name::new("Platform"),
            ArenaPosition(position),
            StaticBody { size },
            Sprite {
                image: game_assets.platform.clone(),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(arena_to_world(position).extend(0.0)),
            DespawnOnExit(Screen::Gameplay),
        ));
    }

    info!("Spawned {} platforms", PLATFORMS.len());
}
