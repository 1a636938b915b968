//! Player-tunable settings.
//!
//! Settings are read once at startup from a JSON file in the user's config
//! directory. A missing or broken file falls back to the defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::game::ARENA_SIZE;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<GameSettings>();
    app.register_type::<GameSettings>();

    app.add_systems(Startup, load_settings);
}

const MIN_CAMERA_ZOOM: f32 = 0.25;
const MAX_CAMERA_ZOOM: f32 = 8.0;
const MIN_BOMB_INTERVAL_SECS: f32 = 0.1;
/// One bomb an hour. Keeps the interval convertible to a `Duration`.
const MAX_BOMB_INTERVAL_SECS: f32 = 3600.0;

/// Resource holding the settings for this session.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(default)]
pub struct GameSettings {
    /// Linear volume of the background music.
    pub music_volume: f32,
    /// Camera zoom factor; 1.0 shows the whole arena.
    pub camera_zoom: f32,
    /// Size of the camera follow deadzone in arena pixels.
    pub camera_deadzone: [f32; 2],
    /// Seconds between timed bomb drops.
    pub bomb_interval_secs: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            music_volume: 0.2,
            camera_zoom: 1.0,
            camera_deadzone: [150.0, 100.0],
            bomb_interval_secs: 5.0,
        }
    }
}

impl GameSettings {
    /// Parse settings from JSON, clamping anything out of range.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        let settings: Self = serde_json::from_str(contents)?;
        Ok(settings.clamped())
    }

    fn clamped(mut self) -> Self {
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.camera_zoom = self.camera_zoom.clamp(MIN_CAMERA_ZOOM, MAX_CAMERA_ZOOM);
        self.camera_deadzone = Vec2::from_array(self.camera_deadzone)
            .clamp(Vec2::ZERO, ARENA_SIZE)
            .to_array();
        self.bomb_interval_secs = self
            .bomb_interval_secs
            .clamp(MIN_BOMB_INTERVAL_SECS, MAX_BOMB_INTERVAL_SECS);
        self
    }

    pub fn deadzone(&self) -> Vec2 {
        Vec2::from_array(self.camera_deadzone)
    }

    /// Get the file path for the settings file.
    fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("star_catcher").join("settings.json"))
    }

    /// Load settings from disk.
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            warn!("Could not determine config directory for settings");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}", e);
                Self::default()
            }
        }
    }
}

/// Load settings on startup.
fn load_settings(mut settings: ResMut<GameSettings>) {
    *settings = GameSettings::load();
}
