//! The main camera and the letterboxed viewport it renders into.
//!
//! The arena always keeps its 800:600 aspect ratio. Whatever the window
//! shape, the camera renders into the largest centred rectangle of that
//! ratio and the rest of the window shows the clear color.

use bevy::{
    camera::{ScalingMode, Viewport},
    prelude::*,
    window::PrimaryWindow,
};

use crate::{game::ARENA_SIZE, settings::GameSettings};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera);
    app.add_systems(
        Update,
        (
            fit_viewport,
            apply_camera_zoom.run_if(resource_changed::<GameSettings>),
        ),
    );
}

/// Width over height of the arena.
const ASPECT_RATIO: f32 = ARENA_SIZE.x / ARENA_SIZE.y;

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("Camera"),
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::Fixed {
                width: ARENA_SIZE.x,
                height: ARENA_SIZE.y,
            },
            ..OrthographicProjection::default_2d()
        }),
    ));
}

/// Compute the letterboxed viewport for a window of the given physical size.
///
/// Returns the viewport's top-left position and its size.
pub fn letterbox(window: UVec2) -> (UVec2, UVec2) {
    let window_ratio = window.x as f32 / window.y as f32;
    let size = if window_ratio < ASPECT_RATIO {
        UVec2::new(window.x, (window.x as f32 / ASPECT_RATIO).round() as u32)
    } else {
        UVec2::new((window.y as f32 * ASPECT_RATIO).round() as u32, window.y)
    }
    .clamp(UVec2::ONE, window);

    ((window - size) / 2, size)
}

/// Keep the camera viewport letterboxed inside the primary window.
fn fit_viewport(
    window: Single<&Window, With<PrimaryWindow>>,
    mut camera: Single<&mut Camera, With<Camera2d>>,
) {
    let window_size = window.physical_size();
    if window_size.x == 0 || window_size.y == 0 {
        return;
    }

    let (position, size) = letterbox(window_size);
    let unchanged = camera.viewport.as_ref().is_some_and(|viewport| {
        viewport.physical_position == position && viewport.physical_size == size
    });
    if unchanged {
        return;
    }

    debug!(
        "Letterboxing {}x{} window to {}x{} at {:?}",
        window_size.x, window_size.y, size.x, size.y, position
    );
    camera.viewport = Some(Viewport {
        physical_position: position,
        physical_size: size,
        ..default()
    });
}

fn apply_camera_zoom(
    settings: Res<GameSettings>,
    mut projection: Single<&mut Projection, With<Camera2d>>,
) {
    if let Projection::Orthographic(orthographic) = &mut **projection {
        orthographic.scale = 1.0 / settings.camera_zoom;
        info!("Camera zoom set to {}", settings.camera_zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_aspect_fills_window() {
        let (position, size) = letterbox(UVec2::new(800, 600));
        assert_eq!(position, UVec2::ZERO);
        assert_eq!(size, UVec2::new(800, 600));
    }

    #[test]
    fn test_wide_window_gets_side_bars() {
        let (position, size) = letterbox(UVec2::new(1920, 1080));
        assert_eq!(size, UVec2::new(1440, 1080));
        assert_eq!(position, UVec2::new(240, 0));
    }

    #[test]
    fn test_tall_window_gets_top_and_bottom_bars() {
        let (position, size) = letterbox(UVec2::new(600, 1000));
        assert_eq!(size, UVec2::new(600, 450));
        assert_eq!(position, UVec2::new(0, 275));
    }
}
