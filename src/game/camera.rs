//! Camera follow with a deadzone, kept inside the arena.

use bevy::prelude::*;

use super::{ARENA_SIZE, ArenaPosition, GameplaySystems, arena_to_world, player::Player};
use crate::{screens::Screen, settings::GameSettings};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<CameraFocus>();

    app.add_systems(OnEnter(Screen::Gameplay), reset_camera_focus);
    app.add_systems(
        Update,
        follow_player.in_set(GameplaySystems::Sync),
    );
}

/// Arena point the camera is centred on.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraFocus(pub Vec2);

impl Default for CameraFocus {
    fn default() -> Self {
        Self(ARENA_SIZE / 2.0)
    }
}

/// Move `focus` just enough to keep `target` inside the deadzone, then clamp
/// so a view of `view_size` never shows anything outside `bounds`.
pub fn follow(focus: Vec2, target: Vec2, deadzone: Vec2, view_size: Vec2, bounds: Rect) -> Vec2 {
    let half_deadzone = deadzone / 2.0;
    let mut focus = focus;
    for axis in 0..2 {
        if target[axis] > focus[axis] + half_deadzone[axis] {
            focus[axis] = target[axis] - half_deadzone[axis];
        } else if target[axis] < focus[axis] - half_deadzone[axis] {
            focus[axis] = target[axis] + half_deadzone[axis];
        }

        let min = bounds.min[axis] + view_size[axis] / 2.0;
        let max = bounds.max[axis] - view_size[axis] / 2.0;
        focus[axis] = if min > max {
            bounds.center()[axis]
        } else {
            focus[axis].clamp(min, max)
        };
    }
    focus
}

fn reset_camera_focus(
    mut focus: ResMut<CameraFocus>,
    mut camera: Single<&mut Transform, With<Camera2d>>,
) {
    *focus = CameraFocus::default();
    let world = arena_to_world(focus.0);
    camera.translation.x = world.x;
    camera.translation.y = world.y;
}

fn follow_player(
    settings: Res<GameSettings>,
    mut focus: ResMut<CameraFocus>,
    player: Single<&ArenaPosition, With<Player>>,
    mut camera: Single<&mut Transform, (With<Camera2d>, Without<Player>)>,
) {
    let view_size = ARENA_SIZE / settings.camera_zoom;
    let bounds = Rect::from_corners(Vec2::ZERO, ARENA_SIZE);
    let next = follow(focus.0, player.0, settings.deadzone(), view_size, bounds);
    if next == focus.0 {
        return;
    }

    focus.0 = next;
    let world = arena_to_world(next);
    camera.translation.x = world.x;
    camera.translation.y = world.y;
}
