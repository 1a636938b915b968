//! The screen state for the main gameplay.

use bevy::prelude::*;

use crate::{
    game::{load_game_assets, spawn_game},
    screens::Screen,
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(Screen::Gameplay),
        spawn_game.after(load_game_assets),
    );
}
