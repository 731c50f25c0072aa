use bevy::prelude::*;

use crate::showcase::panel::ShowcasePanel;
use crate::showcase::selection::{SelectionCommand, SelectionEvent, SelectionSource};

const PANEL_BACKGROUND: Color = Color::srgba(0.10, 0.11, 0.13, 0.85);
const BUTTON_IDLE: Color = Color::srgb(0.22, 0.24, 0.28);
const BUTTON_HOVERED: Color = Color::srgb(0.26, 0.28, 0.32);
const BUTTON_PRESSED: Color = Color::srgb(0.18, 0.20, 0.24);
const LABEL_COLOUR: Color = Color::srgb(0.65, 0.67, 0.72);
const FAILURE_COLOUR: Color = Color::srgb(0.95, 0.35, 0.30);

#[derive(Component)]
pub struct ShowcasePanelRoot;

/// Text node bound to one field of [`ShowcasePanel`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelField {
    Name,
    Price,
    TopSpeed,
    Power,
    Gearbox,
    Status,
}

impl PanelField {
    fn read(self, panel: &ShowcasePanel) -> String {
        match self {
            Self::Name => panel.name.clone(),
            Self::Price => panel.price.clone(),
            Self::TopSpeed => panel.top_speed.clone(),
            Self::Power => panel.power.clone(),
            Self::Gearbox => panel.gearbox.clone(),
            Self::Status => panel.status.message(),
        }
    }
}

#[derive(Component)]
pub struct LogoImage;

#[derive(Component, Debug, Clone, Copy)]
pub struct NavigationButton(pub SelectionCommand);

// Spawns the specs panel on the left with logo, name, specs and nav buttons
pub fn spawn_showcase_ui(mut commands: Commands) {
    commands
        .spawn((
            ShowcasePanelRoot,
            Name::new("ShowcasePanel"),
            BackgroundColor(PANEL_BACKGROUND),
            Node {
                width: Val::Px(280.0),
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                top: Val::Px(16.0),
                padding: UiRect::all(Val::Px(16.0)),
                row_gap: Val::Px(8.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Stretch,
                ..default()
            },
        ))
        .with_children(|panel| {
            panel.spawn((
                LogoImage,
                Name::new("Logo"),
                ImageNode::default(),
                Node {
                    width: Val::Px(64.0),
                    height: Val::Px(64.0),
                    align_self: AlignSelf::Center,
                    ..default()
                },
            ));

            panel.spawn((
                PanelField::Name,
                Name::new("CarName"),
                Text::new(""),
                TextFont { font_size: 26.0, ..default() },
                TextColor(Color::WHITE),
            ));

            for (label, field) in [
                ("Price", PanelField::Price),
                ("Top speed", PanelField::TopSpeed),
                ("Power", PanelField::Power),
                ("Gearbox", PanelField::Gearbox),
            ] {
                spawn_spec_row(panel, label, field);
            }

            panel.spawn((
                PanelField::Status,
                Name::new("Status"),
                Text::new(""),
                TextFont { font_size: 14.0, ..default() },
                TextColor(LABEL_COLOUR),
            ));

            panel
                .spawn(Node {
                    width: Val::Percent(100.0),
                    column_gap: Val::Px(8.0),
                    display: Display::Flex,
                    justify_content: JustifyContent::SpaceBetween,
                    ..default()
                })
                .with_children(|row| {
                    spawn_navigation_button(row, "< Prev", SelectionCommand::Previous);
                    spawn_navigation_button(row, "Next >", SelectionCommand::Next);
                });
        });
}

fn spawn_spec_row(parent: &mut ChildSpawnerCommands, label: &str, field: PanelField) {
    parent
        .spawn(Node {
            width: Val::Percent(100.0),
            display: Display::Flex,
            justify_content: JustifyContent::SpaceBetween,
            ..default()
        })
        .with_children(|row| {
            row.spawn((
                Text::new(label),
                TextFont { font_size: 15.0, ..default() },
                TextColor(LABEL_COLOUR),
            ));
            row.spawn((
                field,
                Text::new(""),
                TextFont { font_size: 15.0, ..default() },
                TextColor(Color::WHITE),
            ));
        });
}

fn spawn_navigation_button(parent: &mut ChildSpawnerCommands, label: &str, command: SelectionCommand) {
    parent
        .spawn((
            NavigationButton(command),
            Button,
            Name::new(format!("{command:?}Button")),
            BackgroundColor(BUTTON_IDLE),
            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
            Node {
                flex_grow: 1.0,
                height: Val::Px(36.0),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont { font_size: 16.0, ..default() },
                TextColor(Color::WHITE),
            ));
        });
}

pub fn handle_navigation_buttons(
    mut buttons: Query<(&Interaction, &NavigationButton, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
    mut selections: EventWriter<SelectionEvent>,
) {
    for (interaction, button, mut bg) in &mut buttons {
        match *interaction {
            Interaction::Pressed => {
                selections.write(SelectionEvent { command: button.0, source: SelectionSource::Button });
                *bg = BackgroundColor(BUTTON_PRESSED);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVERED),
            Interaction::None => *bg = BackgroundColor(BUTTON_IDLE),
        }
    }
}

// Arrow keys navigate, R retries the current car
pub fn handle_navigation_keys(keys: Res<ButtonInput<KeyCode>>, mut selections: EventWriter<SelectionEvent>) {
    let bindings = [
        (KeyCode::ArrowRight, SelectionCommand::Next),
        (KeyCode::ArrowLeft, SelectionCommand::Previous),
        (KeyCode::KeyR, SelectionCommand::Retry),
    ];
    for (key, command) in bindings {
        if keys.just_pressed(key) {
            selections.write(SelectionEvent { command, source: SelectionSource::Keyboard });
        }
    }
}

pub fn sync_native_panel(
    panel: Res<ShowcasePanel>,
    asset_server: Res<AssetServer>,
    mut fields: Query<(&PanelField, &mut Text, &mut TextColor)>,
    mut logos: Query<&mut ImageNode, With<LogoImage>>,
    mut shown_logo: Local<String>,
) {
    if !panel.is_changed() { return; }

    for (field, mut text, mut colour) in &mut fields {
        *text = Text::new(field.read(&panel));
        if *field == PanelField::Status {
            colour.0 = if panel.status.is_failure() { FAILURE_COLOUR } else { LABEL_COLOUR };
        }
    }

    if *shown_logo != panel.logo_path && !panel.logo_path.is_empty() {
        if let Ok(mut logo) = logos.single_mut() {
            logo.image = asset_server.load(panel.logo_path.clone());
            shown_logo.clone_from(&panel.logo_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::catalog::shipped_catalog;
    use crate::showcase::panel::PanelStatus;

    #[test]
    fn fields_read_from_the_panel_resource() {
        let catalog = shipped_catalog();
        let mut panel = ShowcasePanel::default();
        panel.show_entry(1, &catalog.cars[1]);
        panel.status = PanelStatus::Ready;

        assert_eq!(PanelField::Name.read(&panel), "REVUELTO");
        assert_eq!(PanelField::TopSpeed.read(&panel), "447 km/h");
        assert_eq!(PanelField::Gearbox.read(&panel), "7-Speed DCT");
        assert_eq!(PanelField::Status.read(&panel), "");
    }

    #[test]
    fn arrow_keys_become_selection_events() {
        let mut app = App::new();
        app.add_event::<SelectionEvent>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_systems(Update, handle_navigation_keys);

        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::ArrowLeft);
        app.update();

        let commands: Vec<SelectionCommand> = app
            .world_mut()
            .resource_mut::<Events<SelectionEvent>>()
            .drain()
            .map(|event| event.command)
            .collect();
        assert_eq!(commands, [SelectionCommand::Previous]);
    }
}
