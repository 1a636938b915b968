//! Time-based scale and rotation animation.
//!
//! A [`Tween`] interpolates an entity's uniform scale (and optionally its
//! rotation) between two values after an optional delay, then removes
//! itself once the final value has been written.

use std::time::Duration;

use bevy::{
    math::{
        FloatExt,
        curve::{Curve, EaseFunction},
    },
    prelude::*,
};

use crate::AppSystems;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Update, advance_tweens.in_set(AppSystems::Update));
}

/// A running scale/rotation animation.
#[derive(Component, Debug, Clone)]
pub struct Tween {
    /// Time to wait before the animation starts moving.
    pub delay: Duration,
    /// Length of one leg of the animation.
    pub duration: Duration,
    /// Uniform scale at the start and end of a leg.
    pub scale: (f32, f32),
    /// Clockwise angle in degrees at the start and end of a leg.
    pub angle: Option<(f32, f32)>,
    pub ease: EaseFunction,
    /// Play the leg forward and then back to the start.
    pub yoyo: bool,
    elapsed: Duration,
}

/// Interpolated values at the current point of a [`Tween`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample {
    pub scale: f32,
    pub angle: Option<f32>,
}

impl Tween {
    /// Grow/shrink and spin in one leg.
    pub fn scale_rotate(
        scale: (f32, f32),
        angle: (f32, f32),
        duration: Duration,
        delay: Duration,
        ease: EaseFunction,
    ) -> Self {
        Self {
            delay,
            duration,
            scale,
            angle: Some(angle),
            ease,
            yoyo: false,
            elapsed: Duration::ZERO,
        }
    }

    /// Scale up to `peak` and back to 1.0, each half lasting `half`.
    pub fn pulse(peak: f32, half: Duration) -> Self {
        Self {
            delay: Duration::ZERO,
            duration: half,
            scale: (1.0, peak),
            angle: None,
            ease: EaseFunction::Linear,
            yoyo: true,
            elapsed: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed += delta;
    }

    fn total(&self) -> Duration {
        let legs = if self.yoyo { 2 } else { 1 };
        self.delay + self.duration * legs
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total()
    }

    /// Linear progress through the animation in `0.0..=1.0`, folded back on
    /// the return leg of a yoyo.
    fn progress(&self) -> f32 {
        let active = self.elapsed.saturating_sub(self.delay);
        if self.duration.is_zero() {
            return if self.yoyo || active.is_zero() { 0.0 } else { 1.0 };
        }

        let leg = self.duration.as_secs_f32();
        let t = active.as_secs_f32() / leg;
        if self.yoyo && t > 1.0 {
            (2.0 - t).clamp(0.0, 1.0)
        } else {
            t.clamp(0.0, 1.0)
        }
    }

    pub fn sample(&self) -> TweenSample {
        let t = self.ease.sample_clamped(self.progress());
        TweenSample {
            scale: self.scale.0.lerp(self.scale.1, t),
            angle: self.angle.map(|(from, to)| from.lerp(to, t)),
        }
    }
}

fn advance_tweens(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Tween, &mut Transform)>,
) {
    for (entity, mut tween, mut transform) in &mut query {
        tween.advance(time.delta());

        let sample = tween.sample();
        transform.scale = Vec3::new(sample.scale, sample.scale, 1.0);
        if let Some(angle) = sample.angle {
            // Arena angles run clockwise, Bevy's run counter-clockwise.
            transform.rotation = Quat::from_rotation_z(-angle.to_radians());
        }

        if tween.is_finished() {
            commands.entity(entity).remove::<Tween>();
        }
    }
}
