//! Debug visualization for the arcade physics.
//!
//! Toggle with the 'D' key during gameplay.
//! Shows:
//! - Platform boxes
//! - Body boxes, dimmed while disabled
//! - The player's ground contact

use bevy::{color::palettes::css, input::common_conditions::input_just_pressed, prelude::*};

use super::{
    ArenaPosition, arena_to_world,
    physics::{Body, StaticBody},
    player::Player,
};
use crate::screens::Screen;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<DebugBodiesVisible>();

    // Toggle debug with 'D' key
    app.add_systems(
        Update,
        toggle_debug
            .run_if(in_state(Screen::Gameplay).and(input_just_pressed(KeyCode::KeyD))),
    );

    // Draw bodies when visible
    app.add_systems(
        Update,
        draw_bodies.run_if(in_state(Screen::Gameplay).and(debug_visible)),
    );
}

/// Resource to track if debug visualization is visible.
#[derive(Resource, Default)]
pub struct DebugBodiesVisible(pub bool);

fn debug_visible(debug: Res<DebugBodiesVisible>) -> bool {
    debug.0
}

fn toggle_debug(mut debug: ResMut<DebugBodiesVisible>) {
    debug.0 = !debug.0;
    let state = if debug.0 { "ON" } else { "OFF" };
    info!("Debug bodies: {}", state);
}

/// Draw the physics boxes using Bevy's Gizmos.
fn draw_bodies(
    mut gizmos: Gizmos,
    solid_query: Query<(&ArenaPosition, &StaticBody)>,
    body_query: Query<(&ArenaPosition, &Body, Has<Player>)>,
) {
    for (position, solid) in &solid_query {
        gizmos.rect_2d(
            Isometry2d::from_translation(arena_to_world(position.0)),
            solid.size,
            css::GOLD.with_alpha(0.6),
        );
    }

    for (position, body, is_player) in &body_query {
        let color = if !body.enabled {
            css::WHITE.with_alpha(0.15)
        } else if is_player && body.touching_down {
            css::LIMEGREEN.with_alpha(0.8)
        } else {
            css::INDIAN_RED.with_alpha(0.6)
        };

        gizmos.rect_2d(
            Isometry2d::from_translation(arena_to_world(position.0)),
            body.size,
            color,
        );
    }
}
