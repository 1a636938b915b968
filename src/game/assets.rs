//! Image and audio handles used by the game scene.

use bevy::prelude::*;

use crate::screens::Screen;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Screen::Gameplay), load_game_assets);
}

/// Number of frames in the player's sprite sheet.
const DUDE_FRAMES: u32 = 9;
/// Size of one frame of the player's sprite sheet.
pub const DUDE_FRAME_SIZE: UVec2 = UVec2::new(32, 48);

/// Holds game image handles.
#[derive(Resource)]
pub struct GameAssets {
    pub sky: Handle<Image>,
    pub platform: Handle<Image>,
    pub star: Handle<Image>,
    pub bomb: Handle<Image>,
    pub dude: Handle<Image>,
    pub dude_layout: Handle<TextureAtlasLayout>,
}

/// The game's sound effects and music.
#[derive(Resource)]
pub struct Sfx {
    pub blaster: Handle<AudioSource>,
    pub explode: Handle<AudioSource>,
    pub background: Handle<AudioSource>,
}

/// Load game assets - must run before any systems that use [`GameAssets`] or [`Sfx`].
pub fn load_game_assets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    let dude_layout = layouts.add(TextureAtlasLayout::from_grid(
        DUDE_FRAME_SIZE,
        DUDE_FRAMES,
        1,
        None,
        None,
    ));

    commands.insert_resource(GameAssets {
        sky: asset_server.load("images/sky.png"),
        platform: asset_server.load("images/platform.png"),
        star: asset_server.load("images/star.png"),
        bomb: asset_server.load("images/bomb.png"),
        dude: asset_server.load("images/dude.png"),
        dude_layout,
    });

    commands.insert_resource(Sfx {
        blaster: asset_server.load("audio/sound_effects/blaster.ogg"),
        explode: asset_server.load("audio/sound_effects/explosion.ogg"),
        background: asset_server.load("audio/music/background.ogg"),
    });
}
