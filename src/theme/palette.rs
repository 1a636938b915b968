use bevy::prelude::*;

/// Black text for labels drawn over the sky
pub const LABEL_TEXT: Color = Color::srgb(0.0, 0.0, 0.0);

/// #0f0
pub const BUTTON_REST_TEXT: Color = Color::srgb(0.0, 1.0, 0.0);
/// #ff0
pub const BUTTON_HOVER_TEXT: Color = Color::srgb(1.0, 1.0, 0.0);
/// #0ff
pub const BUTTON_ACTIVE_TEXT: Color = Color::srgb(0.0, 1.0, 1.0);

/// Fade target when the player is hit
pub const GAME_OVER_FADE: Color = Color::srgb(1.0, 0.0, 0.0);
