//! Game state management - score, the score label and game over.
//!
//! Lose: the player touches a bomb. The world freezes and the camera fades
//! to red. There is no way back from game over.

use std::time::Duration;

use bevy::prelude::*;

use super::{
    ArenaPosition, GameplaySystems, Sfx,
    bomb::Bomb,
    load_game_assets,
    physics::{Body, PhysicsWorld, overlaps, physics_running},
    player::{Player, PlayerAnim, PlayerAnimation},
};
use crate::{
    audio::sound_effect,
    screens::Screen,
    theme::{
        palette::{GAME_OVER_FADE, LABEL_TEXT},
        widget,
    },
};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<GameSession>();
    app.register_type::<GameSession>();

    app.add_systems(OnEnter(Screen::Gameplay), reset_session);
    app.add_systems(
        OnEnter(Screen::Gameplay),
        spawn_score_label.after(load_game_assets),
    );

    app.add_systems(
        Update,
        hit_bomb
            .in_set(GameplaySystems::Contacts)
            .run_if(physics_running),
    );
    app.add_systems(
        Update,
        (
            update_score_label.run_if(resource_changed::<GameSession>),
            fade_camera,
        )
            .in_set(GameplaySystems::Effects),
    );
}

/// Points awarded per star collected.
pub const POINTS_PER_STAR: u32 = 10;

/// How long the game-over fade takes.
const GAME_OVER_FADE_DURATION: Duration = Duration::from_millis(6000);

/// Tint applied to the player when hit.
const PLAYER_HIT_TINT: Color = Color::srgb(1.0, 0.0, 0.0);

/// Resource tracking the current run.
#[derive(Resource, Debug, Default, Reflect)]
#[reflect(Resource)]
pub struct GameSession {
    pub score: u32,
    pub game_over: bool,
}

impl GameSession {
    pub fn reset(&mut self) {
        self.score = 0;
        self.game_over = false;
    }

    /// Award the points for one star. Returns the new score.
    pub fn collect_star(&mut self) -> u32 {
        self.score += POINTS_PER_STAR;
        self.score
    }

    /// Text shown on the score label.
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }
}

/// Marker for the score label.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ScoreLabel;

/// Full-screen overlay fading in after the player is hit.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct CameraFade {
    timer: Timer,
    color: Color,
}

impl CameraFade {
    fn new(duration: Duration, color: Color) -> Self {
        Self {
            timer: Timer::new(duration, TimerMode::Once),
            color,
        }
    }

    fn alpha(&self) -> f32 {
        self.timer.fraction()
    }
}

/// Reset the session when starting a new game.
fn reset_session(mut session: ResMut<GameSession>) {
    session.reset();
    info!("Session reset");
}

fn spawn_score_label(mut commands: Commands, session: Res<GameSession>) {
    commands.spawn((
        widget::label(session.score_text(), 32.0, LABEL_TEXT, 16.0, 16.0),
        Name::new("Score Label"),
        ScoreLabel,
        DespawnOnExit(Screen::Gameplay),
    ));
}

fn update_score_label(session: Res<GameSession>, mut label: Single<&mut Text, With<ScoreLabel>>) {
    label.0 = session.score_text();
}

/// Touching a bomb ends the game.
fn hit_bomb(
    mut commands: Commands,
    mut session: ResMut<GameSession>,
    mut physics: ResMut<PhysicsWorld>,
    sfx: Res<Sfx>,
    player: Single<(&ArenaPosition, &Body, &mut Sprite, &mut PlayerAnimation), With<Player>>,
    bomb_query: Query<(&ArenaPosition, &Body), (With<Bomb>, Without<Player>)>,
) {
    let (position, body, mut sprite, mut animation) = player.into_inner();
    let hit = bomb_query.iter().any(|(bomb_position, bomb)| {
        bomb.enabled && overlaps(position.0, body.size, bomb_position.0, bomb.size)
    });
    if !hit {
        return;
    }

    physics.pause();
    commands.spawn(sound_effect(sfx.explode.clone()));
    sprite.color = PLAYER_HIT_TINT;
    animation.play(PlayerAnim::Turn);
    session.game_over = true;

    commands.spawn((
        Name::new("Game Over Fade"),
        CameraFade::new(GAME_OVER_FADE_DURATION, GAME_OVER_FADE),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(GAME_OVER_FADE.with_alpha(0.0)),
        GlobalZIndex(1),
        Pickable::IGNORE,
        DespawnOnExit(Screen::Gameplay),
    ));

    info!("GAME OVER! Player hit a bomb. Final score: {}", session.score);
}

fn fade_camera(time: Res<Time>, mut fade_query: Query<(&mut CameraFade, &mut BackgroundColor)>) {
    for (mut fade, mut background) in &mut fade_query {
        if fade.timer.is_finished() {
            continue;
        }
        fade.timer.tick(time.delta());
        background.0 = fade.color.with_alpha(fade.alpha());
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::{audio::SoundEffect, game::player::PLAYER_SIZE};

    const PLAYER_AT: Vec2 = Vec2::new(300.0, 500.0);

    fn world_with_bomb_at(bomb_at: Vec2) -> World {
        let mut world = World::new();
        world.init_resource::<GameSession>();
        world.init_resource::<PhysicsWorld>();
        world.insert_resource(Sfx {
            blaster: Handle::default(),
            explode: Handle::default(),
            background: Handle::default(),
        });

        let mut animation = PlayerAnimation::default();
        animation.play(PlayerAnim::Left);
        world.spawn((
            Player,
            ArenaPosition(PLAYER_AT),
            Body::new(PLAYER_SIZE),
            Sprite::default(),
            animation,
        ));
        world.spawn((Bomb, ArenaPosition(bomb_at), Body::new(Vec2::splat(14.0))));

        world
    }

    fn count<T: Component>(world: &mut World) -> usize {
        world.query_filtered::<(), With<T>>().iter(world).count()
    }

    fn player_look(world: &mut World) -> (Color, PlayerAnim) {
        let mut player = world.query_filtered::<(&Sprite, &PlayerAnimation), With<Player>>();
        let (sprite, animation) = player.single(world).unwrap();
        (sprite.color, animation.current)
    }

    #[test]
    fn test_bomb_hit_ends_the_game() {
        let mut world = world_with_bomb_at(PLAYER_AT + Vec2::new(10.0, 10.0));

        world.run_system_once(hit_bomb).unwrap();

        assert!(!world.resource::<PhysicsWorld>().is_running());
        assert!(world.resource::<GameSession>().game_over);
        assert_eq!(player_look(&mut world), (PLAYER_HIT_TINT, PlayerAnim::Turn));
        assert_eq!(count::<CameraFade>(&mut world), 1);
        assert_eq!(count::<SoundEffect>(&mut world), 1);
    }

    #[test]
    fn test_distant_bomb_changes_nothing() {
        let mut world = world_with_bomb_at(Vec2::new(700.0, 100.0));

        world.run_system_once(hit_bomb).unwrap();

        assert!(world.resource::<PhysicsWorld>().is_running());
        assert!(!world.resource::<GameSession>().game_over);
        assert_eq!(player_look(&mut world), (Color::WHITE, PlayerAnim::Left));
        assert_eq!(count::<CameraFade>(&mut world), 0);
        assert_eq!(count::<SoundEffect>(&mut world), 0);
    }

    #[test]
    fn test_each_star_is_worth_ten() {
        let mut session = GameSession::default();
        assert_eq!(session.score_text(), "Score: 0");

        for collected in 1..=5 {
            let score = session.collect_star();
            assert_eq!(score, collected * 10);
            assert_eq!(session.score_text(), format!("Score: {}", collected * 10));
        }
    }

    #[test]
    fn test_reset_clears_game_over() {
        let mut session = GameSession {
            score: 120,
            game_over: true,
        };
        session.reset();
        assert_eq!(session.score, 0);
        assert!(!session.game_over);
    }

    #[test]
    fn test_fade_reaches_full_opacity() {
        let mut fade = CameraFade::new(GAME_OVER_FADE_DURATION, GAME_OVER_FADE);
        assert_eq!(fade.alpha(), 0.0);
        fade.timer.tick(Duration::from_millis(3000));
        assert!((fade.alpha() - 0.5).abs() < 1e-4);
        fade.timer.tick(Duration::from_millis(3000));
        assert_eq!(fade.alpha(), 1.0);
    }
}
