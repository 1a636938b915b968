//! Helper functions for creating common widgets.

use bevy::{ecs::system::SystemId, prelude::*};

use super::{interaction::TextButton, palette::BUTTON_REST_TEXT};

/// Size of a text button's clickable area in logical pixels.
pub const BUTTON_HIT_AREA: Vec2 = Vec2::new(100.0, 50.0);

/// A full-screen overlay that lays its children out from the top-right corner.
pub fn overlay_root(name: impl Into<String>) -> impl Bundle {
    (
        Name::new(name.into()),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::End,
            align_items: AlignItems::Start,
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        // Don't block picking events for other UI roots.
        Pickable::IGNORE,
    )
}

/// A text label pinned at an absolute screen position.
pub fn label(
    text: impl Into<String>,
    font_size: f32,
    color: Color,
    left: f32,
    top: f32,
) -> impl Bundle {
    (
        Text(text.into()),
        TextFont::from_font_size(font_size),
        TextColor(color),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(left),
            top: Val::Px(top),
            ..default()
        },
        Pickable::IGNORE,
    )
}

/// A text button that runs `on_click` when the pointer is released over it.
///
/// The clickable area is a fixed [`BUTTON_HIT_AREA`] centred on the label's
/// anchor; the label itself hangs down and to the right of that anchor.
/// Register the callback with [`Commands::register_system`] first.
pub fn text_button(text: impl Into<String>, font_size: f32, on_click: SystemId) -> impl Bundle {
    (
        Name::new("Text Button"),
        Button,
        TextButton::new(on_click),
        Node {
            width: Val::Px(BUTTON_HIT_AREA.x),
            height: Val::Px(BUTTON_HIT_AREA.y),
            ..default()
        },
        children![(
            Name::new("Text Button Label"),
            Text(text.into()),
            TextFont::from_font_size(font_size),
            TextColor(BUTTON_REST_TEXT),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(50.0),
                top: Val::Percent(50.0),
                ..default()
            },
            Pickable::IGNORE,
        )],
    )
}
