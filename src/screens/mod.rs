//! The game's main screen states and transitions between them.

mod boot;
mod gameplay;

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.init_state::<Screen>();

    app.add_plugins((boot::plugin, gameplay::plugin));
}

/// The game's main screen states.
#[derive(States, Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Screen {
    /// Animated loading grid.
    #[default]
    Boot,
    /// The game scene with the HUD on top.
    Gameplay,
}
