//! The boot screen: an animated grid of tiles that plays before the game.
//!
//! Every tile grows from nothing while spinning half a turn, each column a
//! little later than the one before. Once twice the animation time has
//! passed the game and HUD are launched and the grid is torn down.

use std::time::Duration;

use bevy::{math::curve::EaseFunction, prelude::*};

use crate::{AppSystems, game::arena_to_world, screens::Screen, tween::Tween};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(Screen::Boot),
        (load_boot_assets, spawn_loading_grid).chain(),
    );
    app.add_systems(
        Update,
        finish_boot
            .in_set(AppSystems::Update)
            .run_if(in_state(Screen::Boot)),
    );
    app.add_systems(OnExit(Screen::Boot), cleanup_boot);
}

/// Edge length of a tile in pixels.
const TILE_SIZE: f32 = 50.0;
const TILES_WIDE: usize = 14;
const TILES_TALL: usize = 10;
pub const TILE_COUNT: usize = TILES_WIDE * TILES_TALL;

/// Top-left corner of the grid in arena space; the grid is centred.
const GRID_ORIGIN: Vec2 = Vec2::new(
    (800.0 - TILES_WIDE as f32 * TILE_SIZE) / 2.0,
    (600.0 - TILES_TALL as f32 * TILE_SIZE) / 2.0,
);

/// How long each tile takes to grow in.
const TILE_ANIMATION: Duration = Duration::from_millis(2000);

/// Extra delay per column.
const COLUMN_DELAY: Duration = Duration::from_millis(50);

/// The game launches once this much time has passed.
const LAUNCH_AFTER: Duration = Duration::from_millis(2 * 2000);

#[derive(Resource)]
struct BootAssets {
    block: Handle<Image>,
}

/// Tracks time spent on the boot screen and whether the game was launched.
#[derive(Resource, Debug, Default)]
pub struct BootProgress {
    elapsed: Duration,
    loaded: bool,
}

impl BootProgress {
    /// Advance the clock. Returns `true` exactly once, on the first call
    /// that takes the elapsed time past the launch threshold.
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.elapsed += delta;
        if self.loaded || self.elapsed <= LAUNCH_AFTER {
            return false;
        }
        self.loaded = true;
        true
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Centre of the tile with the given index in arena space, filling rows left to right.
pub fn tile_center(index: usize) -> Vec2 {
    let column = (index % TILES_WIDE) as f32;
    let row = (index / TILES_WIDE) as f32;
    GRID_ORIGIN + Vec2::new(column, row) * TILE_SIZE + Vec2::splat(TILE_SIZE / 2.0)
}

/// Start delay of the tile with the given index.
pub fn tile_delay(index: usize) -> Duration {
    COLUMN_DELAY * (index % TILES_WIDE) as u32
}

fn load_boot_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(BootAssets {
        block: asset_server.load("images/block.png"),
    });
    commands.insert_resource(BootProgress::default());
}

fn spawn_loading_grid(mut commands: Commands, boot_assets: Res<BootAssets>) {
    for index in 0..TILE_COUNT {
        let position = arena_to_world(tile_center(index));
        commands.spawn((
            Name::new("Loading Tile"),
            Sprite {
                image: boot_assets.block.clone(),
                custom_size: Some(Vec2::splat(TILE_SIZE)),
                ..default()
            },
            Transform::from_translation(position.extend(0.0)).with_scale(Vec3::new(0.0, 0.0, 1.0)),
            Tween::scale_rotate(
                (0.0, 1.0),
                (0.0, 180.0),
                TILE_ANIMATION,
                tile_delay(index),
                EaseFunction::CubicOut,
            ),
            DespawnOnExit(Screen::Boot),
        ));
    }

    info!("Loading grid spawned with {} tiles", TILE_COUNT);
}

fn finish_boot(
    time: Res<Time>,
    mut progress: ResMut<BootProgress>,
    boot_assets: Res<BootAssets>,
    asset_server: Res<AssetServer>,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    if !progress.advance(time.delta()) {
        return;
    }

    if !asset_server.is_loaded_with_dependencies(&boot_assets.block) {
        warn!("Loading grid finished before its texture was ready");
    }

    info!(
        "Boot finished after {:?}, launching game and HUD",
        progress.elapsed()
    );
    next_screen.set(Screen::Gameplay);
}

fn cleanup_boot(mut commands: Commands) {
    commands.remove_resource::<BootAssets>();
    commands.remove_resource::<BootProgress>();
}
