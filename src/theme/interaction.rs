//! Pointer state handling for text buttons.
//!
//! [`TextButton`] is a plain state machine with one handler per pointer
//! event. The host system below feeds it Bevy's [`Interaction`] changes,
//! recolors the label children and runs the button's callback on release.

use bevy::{ecs::system::SystemId, prelude::*};

use super::palette::{BUTTON_ACTIVE_TEXT, BUTTON_HOVER_TEXT, BUTTON_REST_TEXT};
use crate::AppSystems;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        drive_text_buttons.in_set(AppSystems::RecordInput),
    );
}

/// Visual state of a [`TextButton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Rest,
    Hover,
    Active,
}

impl ButtonState {
    pub fn text_color(self) -> Color {
        match self {
            ButtonState::Rest => BUTTON_REST_TEXT,
            ButtonState::Hover => BUTTON_HOVER_TEXT,
            ButtonState::Active => BUTTON_ACTIVE_TEXT,
        }
    }
}

/// A clickable text label that runs `on_click` when released.
#[derive(Component, Debug, Clone)]
pub struct TextButton {
    state: ButtonState,
    on_click: SystemId,
}

impl TextButton {
    pub fn new(on_click: SystemId) -> Self {
        Self {
            state: ButtonState::Rest,
            on_click,
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn pointer_over(&mut self) {
        self.state = ButtonState::Hover;
    }

    pub fn pointer_out(&mut self) {
        self.state = ButtonState::Rest;
    }

    pub fn pointer_down(&mut self) {
        self.state = ButtonState::Active;
    }

    /// Release over the button. Returns the callback to run.
    pub fn pointer_up(&mut self) -> SystemId {
        self.state = ButtonState::Hover;
        self.on_click
    }

    /// Translate an [`Interaction`] change into the matching handler.
    ///
    /// Going from pressed back to hovered is a release over the button and
    /// yields the click callback.
    pub fn apply(&mut self, interaction: Interaction) -> Option<SystemId> {
        match (self.state, interaction) {
            (ButtonState::Active, Interaction::Hovered) => Some(self.pointer_up()),
            (_, Interaction::Pressed) => {
                self.pointer_down();
                None
            }
            (_, Interaction::Hovered) => {
                self.pointer_over();
                None
            }
            (_, Interaction::None) => {
                self.pointer_out();
                None
            }
        }
    }
}

fn drive_text_buttons(
    mut commands: Commands,
    mut button_query: Query<(&Interaction, &mut TextButton, &Children), Changed<Interaction>>,
    mut label_query: Query<&mut TextColor>,
) {
    for (interaction, mut button, children) in &mut button_query {
        let clicked = button.apply(*interaction);

        let mut labels = label_query.iter_many_mut(children);
        while let Some(mut text_color) = labels.fetch_next() {
            text_color.0 = button.state().text_color();
        }

        if let Some(on_click) = clicked {
            commands.run_system(on_click);
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;

    #[derive(Resource, Default)]
    struct Clicks(u32);

    fn count_click(mut clicks: ResMut<Clicks>) {
        clicks.0 += 1;
    }

    fn button(world: &mut World) -> TextButton {
        let on_click = world.register_system(count_click);
        TextButton::new(on_click)
    }

    #[test]
    fn test_states_follow_pointer() {
        let mut world = World::new();
        let mut button = button(&mut world);
        assert_eq!(button.state(), ButtonState::Rest);

        assert_eq!(button.apply(Interaction::Hovered), None);
        assert_eq!(button.state(), ButtonState::Hover);

        assert_eq!(button.apply(Interaction::Pressed), None);
        assert_eq!(button.state(), ButtonState::Active);

        assert!(button.apply(Interaction::Hovered).is_some());
        assert_eq!(button.state(), ButtonState::Hover);

        assert_eq!(button.apply(Interaction::None), None);
        assert_eq!(button.state(), ButtonState::Rest);
    }

    #[test]
    fn test_release_outside_does_not_click() {
        let mut world = World::new();
        let mut button = button(&mut world);
        button.pointer_down();
        assert_eq!(button.apply(Interaction::None), None);
        assert_eq!(button.state(), ButtonState::Rest);
    }

    #[test]
    fn test_colors_are_distinct() {
        let colors = [
            ButtonState::Rest.text_color(),
            ButtonState::Hover.text_color(),
            ButtonState::Active.text_color(),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn test_release_runs_callback() {
        let mut world = World::new();
        world.init_resource::<Clicks>();
        let mut text_button = button(&mut world);
        text_button.pointer_down();
        world.spawn((
            Interaction::Hovered,
            text_button,
            children![TextColor(BUTTON_REST_TEXT)],
        ));

        world.run_system_once(drive_text_buttons).unwrap();

        assert_eq!(world.resource::<Clicks>().0, 1);
        let label_colors: Vec<Color> = world
            .query::<&TextColor>()
            .iter(&world)
            .map(|text_color| text_color.0)
            .collect();
        assert_eq!(label_colors, vec![BUTTON_HOVER_TEXT]);
    }
}
