use bevy::{audio::Volume, prelude::*};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Music>();
    app.register_type::<SoundEffect>();
}

/// An organizational marker component that should be added to a spawned [`AudioPlayer`]
/// if it's in the general "music" category (e.g. global background music, soundtrack).
#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct Music;

/// A looping music bundle played at a fixed linear volume.
pub fn music(handle: Handle<AudioSource>, volume: f32) -> impl Bundle {
    (
        AudioPlayer(handle),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(volume)),
        Music,
    )
}

/// An organizational marker component that should be added to a spawned [`AudioPlayer`]
/// if it's in the general "sound effect" category (e.g. footsteps, the sound of a magic spell,
/// a door opening).
#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct SoundEffect;

/// A sound effect audio instance, despawned once playback ends.
pub fn sound_effect(handle: Handle<AudioSource>) -> impl Bundle {
    (AudioPlayer(handle), PlaybackSettings::DESPAWN, SoundEffect)
}
