//! The player: keyboard movement, jumping and sprite-sheet animation.
//!
//! Left/right arrows walk, the up arrow jumps. Holding up in mid-air keeps
//! applying a weaker upward kick every frame, so the jump is not a strict
//! single jump.

use std::ops::RangeInclusive;

use bevy::prelude::*;

use super::{
    ArenaPosition, GameAssets, GameplaySystems, arena_to_world, load_game_assets,
    physics::Body,
};
use crate::screens::Screen;

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Player>();
    app.register_type::<PlayerAnimation>();

    app.add_systems(
        OnEnter(Screen::Gameplay),
        spawn_player.after(load_game_assets),
    );

    // Input is still read after game over; only physics stops.
    app.add_systems(
        Update,
        record_player_input.in_set(GameplaySystems::Input),
    );
    app.add_systems(
        Update,
        animate_player.in_set(GameplaySystems::Effects),
    );
}

/// Where the player starts, in arena space.
const PLAYER_SPAWN: Vec2 = Vec2::new(100.0, 450.0);

/// Size of the player's body.
pub const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 48.0);

/// Player gravity on top of the world's.
const PLAYER_GRAVITY: f32 = 300.0;

const PLAYER_BOUNCE: f32 = 0.2;

/// Horizontal walking speed in pixels per second.
pub const WALK_SPEED: f32 = 160.0;

/// Upward kick when jumping off the ground.
pub const JUMP_VELOCITY: f32 = -330.0;

/// Upward kick while the jump key is held in mid-air.
pub const AIR_JUMP_VELOCITY: f32 = -165.0;

/// Marker component for the player entity.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Player;

/// The player's animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum PlayerAnim {
    Left,
    /// Facing the camera; the idle pose.
    #[default]
    Turn,
    Right,
}

impl PlayerAnim {
    fn frames(self) -> RangeInclusive<usize> {
        match self {
            PlayerAnim::Left => 0..=3,
            PlayerAnim::Turn => 4..=4,
            PlayerAnim::Right => 5..=8,
        }
    }

    fn frame_rate(self) -> f32 {
        match self {
            PlayerAnim::Turn => 20.0,
            PlayerAnim::Left | PlayerAnim::Right => 10.0,
        }
    }
}

/// Sprite-sheet playback state for the player.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PlayerAnimation {
    pub(super) current: PlayerAnim,
    frame: usize,
    timer: Timer,
}

impl Default for PlayerAnimation {
    fn default() -> Self {
        Self::new(PlayerAnim::default())
    }
}

impl PlayerAnimation {
    fn new(anim: PlayerAnim) -> Self {
        Self {
            current: anim,
            frame: *anim.frames().start(),
            timer: Timer::from_seconds(1.0 / anim.frame_rate(), TimerMode::Repeating),
        }
    }

    /// Switch to `anim`. Playing the animation that is already running does nothing.
    pub fn play(&mut self, anim: PlayerAnim) {
        if self.current != anim {
            *self = Self::new(anim);
        }
    }

    /// Advance the animation, looping over its frames. Returns the frame to show.
    fn tick(&mut self, delta: std::time::Duration) -> usize {
        self.timer.tick(delta);
        let frames = self.current.frames();
        for _ in 0..self.timer.times_finished_this_tick() {
            self.frame = if self.frame >= *frames.end() {
                *frames.start()
            } else {
                self.frame + 1
            };
        }
        self.frame
    }
}

/// Directional keys held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl MoveInput {
    fn from_keys(keys: &ButtonInput<KeyCode>) -> Self {
        Self {
            left: keys.pressed(KeyCode::ArrowLeft),
            right: keys.pressed(KeyCode::ArrowRight),
            jump: keys.pressed(KeyCode::ArrowUp),
        }
    }
}

/// Horizontal velocity and animation for the held keys. Left wins over right.
pub fn walk(input: MoveInput) -> (f32, PlayerAnim) {
    if input.left {
        (-WALK_SPEED, PlayerAnim::Left)
    } else if input.right {
        (WALK_SPEED, PlayerAnim::Right)
    } else {
        (0.0, PlayerAnim::Turn)
    }
}

/// Vertical velocity for a jump, full strength only from the ground.
pub fn jump_velocity(touching_down: bool) -> f32 {
    if touching_down {
        JUMP_VELOCITY
    } else {
        AIR_JUMP_VELOCITY
    }
}

fn spawn_player(mut commands: Commands, game_assets: Res<GameAssets>) {
    let animation = PlayerAnimation::default();
    commands.spawn((
        Name::new("Player"),
        Player,
        ArenaPosition(PLAYER_SPAWN),
        Body::new(PLAYER_SIZE)
            .with_bounce(Vec2::splat(PLAYER_BOUNCE))
            .with_gravity(PLAYER_GRAVITY)
            .with_world_bounds(),
        Sprite::from_atlas_image(
            game_assets.dude.clone(),
            TextureAtlas {
                layout: game_assets.dude_layout.clone(),
                index: animation.frame,
            },
        ),
        animation,
        Transform::from_translation(arena_to_world(PLAYER_SPAWN).extend(3.0)),
        DespawnOnExit(Screen::Gameplay),
    ));

    info!("Spawned player at {:?}", PLAYER_SPAWN);
}

fn record_player_input(
    keys: Res<ButtonInput<KeyCode>>,
    player: Single<(&mut Body, &mut PlayerAnimation), With<Player>>,
) {
    let (mut body, mut animation) = player.into_inner();
    let input = MoveInput::from_keys(&keys);

    let (velocity_x, anim) = walk(input);
    body.velocity.x = velocity_x;
    animation.play(anim);

    if input.jump {
        body.velocity.y = jump_velocity(body.touching_down);
    }
}

fn animate_player(
    time: Res<Time>,
    player: Single<(&mut PlayerAnimation, &mut Sprite), With<Player>>,
) {
    let (mut animation, mut sprite) = player.into_inner();
    let frame = animation.tick(time.delta());
    if let Some(atlas) = sprite.texture_atlas.as_mut()
        && atlas.index != frame
    {
        atlas.index = frame;
    }
}
