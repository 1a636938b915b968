//! The HUD drawn over the game: a pause button in screen space.
//!
//! The button is wired up but pausing is not implemented yet; clicking it
//! only logs.

use bevy::prelude::*;

use crate::{screens::Screen, theme::widget};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Screen::Gameplay), spawn_hud);
}

/// Two bars, the usual pause glyph.
const PAUSE_LABEL: &str = "II";

fn spawn_hud(mut commands: Commands) {
    let on_pause = commands.register_system(pause_clicked);

    commands.spawn((
        widget::overlay_root("HUD"),
        GlobalZIndex(2),
        DespawnOnExit(Screen::Gameplay),
        children![widget::text_button(PAUSE_LABEL, 32.0, on_pause)],
    ));

    info!("HUD spawned");
}

fn pause_clicked() {
    // TODO: freeze physics and the bomb timer once a pause menu exists.
    info!("Pause button clicked");
}
