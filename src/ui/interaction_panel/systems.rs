// src/ui/interaction_panel/systems.rs
//
// Systems for spawning and refreshing the interaction UI.

use bevy::prelude::*;

use crate::{
    interaction::{
        catalog::ActionKind,
        menu::{ActionItem, DIALOGUE_BOX_HEIGHT, DIALOGUE_BOX_MARGIN},
        session::SessionState,
    },
    localization::LocalizationTable,
    npc::manager::NpcManager,
    player::{
        components::Player,
        reputation::{Reputation, ReputationLedger},
    },
    world::components::MainCamera,
};

use super::components::{
    ActionSlot, ActionSlotLabel, DialogueBox, DialogueText, InteractionHint,
    InteractionPanelSettings, ReputationFill, ReputationLabel,
};

// Visual constants
const BOX_COLOR: Color = Color::srgba(0.08, 0.08, 0.1, 0.9);
const BOX_BORDER: Color = Color::srgb(0.35, 0.35, 0.4);
const HINT_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);
const TEXT_COLOR: Color = Color::WHITE;
const NAME_COLOR: Color = Color::srgb(1.0, 0.9, 0.4); // Yellow/gold
const CAPTION_COLOR: Color = Color::srgb(0.6, 0.6, 0.65);
const SLOT_COLOR: Color = Color::srgba(0.18, 0.18, 0.22, 0.95);
const SLOT_HOVER_COLOR: Color = Color::srgba(0.3, 0.3, 0.38, 0.95);
const SLOT_DISABLED_COLOR: Color = Color::srgba(0.12, 0.12, 0.12, 0.8);
const GAUGE_BACKGROUND: Color = Color::srgba(0.1, 0.1, 0.1, 0.8);
const MORE_INDICATOR: &str = "▼";
const HINT_KEY: &str = "interact-hint";

/// Spawns every interaction UI node once; the update systems only toggle and restyle them.
pub fn spawn_interaction_ui(
    mut commands: Commands,
    mut settings: ResMut<InteractionPanelSettings>,
    table: Res<LocalizationTable>,
) {
    if let Some(text) = table.get(HINT_KEY) {
        settings.hint_text = text.to_string();
    }

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            padding: UiRect::all(Val::Px(5.0)),
            display: Display::None,
            ..default()
        },
        Text::new(settings.hint_text.clone()),
        TextFont {
            font_size: settings.hint_font_size,
            ..default()
        },
        TextColor(TEXT_COLOR),
        BackgroundColor(HINT_BACKGROUND),
        InteractionHint,
        Name::new("Interaction hint"),
    ));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(DIALOGUE_BOX_MARGIN),
                right: Val::Px(DIALOGUE_BOX_MARGIN),
                bottom: Val::Px(DIALOGUE_BOX_MARGIN),
                height: Val::Px(DIALOGUE_BOX_HEIGHT),
                padding: UiRect::all(Val::Px(settings.padding)),
                border: UiRect::all(Val::Px(settings.border_width)),
                flex_direction: FlexDirection::Column,
                display: Display::None,
                ..default()
            },
            BackgroundColor(BOX_COLOR),
            BorderColor::from(BOX_BORDER),
            DialogueBox,
            Name::new("Dialogue box"),
        ))
        .with_children(|parent| {
            // Header row (speaker + portrait caption)
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    justify_content: JustifyContent::SpaceBetween,
                    margin: UiRect::bottom(Val::Px(8.0)),
                    ..default()
                })
                .with_children(|header| {
                    header.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: settings.name_font_size,
                            ..default()
                        },
                        TextColor(NAME_COLOR),
                        DialogueText::Speaker,
                    ));
                    header.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: settings.text_font_size * 0.8,
                            ..default()
                        },
                        TextColor(CAPTION_COLOR),
                        DialogueText::Portrait,
                    ));
                });

            parent.spawn((
                Node {
                    flex_grow: 1.0,
                    ..default()
                },
                Text::new(""),
                TextFont {
                    font_size: settings.text_font_size,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                DialogueText::Body,
            ));

            parent.spawn((
                Node {
                    align_self: AlignSelf::FlexEnd,
                    ..default()
                },
                Text::new(MORE_INDICATOR),
                TextFont {
                    font_size: settings.text_font_size,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                DialogueText::MoreIndicator,
            ));
        });

    let slot_count = settings.menu_slots.max(ActionKind::MENU_KINDS.len());
    for index in 0..slot_count {
        commands
            .spawn((
                Node {
                    position_type: PositionType::Absolute,
                    border: UiRect::all(Val::Px(1.0)),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    display: Display::None,
                    ..default()
                },
                BackgroundColor(SLOT_COLOR),
                BorderColor::from(BOX_BORDER),
                ZIndex(10),
                ActionSlot { index },
                Name::new(format!("Action slot {index}")),
            ))
            .with_children(|slot| {
                slot.spawn((
                    Text::new(""),
                    TextFont {
                        font_size: settings.text_font_size,
                        ..default()
                    },
                    TextColor(TEXT_COLOR),
                    ActionSlotLabel { index },
                ));
            });
    }

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                left: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            Name::new("Reputation HUD"),
        ))
        .with_children(|hud| {
            hud.spawn((
                Text::new(""),
                TextFont {
                    font_size: settings.hint_font_size,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                ReputationLabel,
            ));
            hud.spawn((
                Node {
                    width: Val::Px(settings.gauge_width),
                    height: Val::Px(settings.gauge_height),
                    ..default()
                },
                BackgroundColor(GAUGE_BACKGROUND),
            ))
            .with_children(|gauge| {
                gauge.spawn((
                    Node {
                        width: Val::Percent(0.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(Color::NONE),
                    ReputationFill,
                ));
            });
        });
}

/// Projects the hint above the closest NPC and applies the hint fade.
pub fn update_interaction_hint(
    manager: Res<NpcManager>,
    settings: Res<InteractionPanelSettings>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut hints: Query<(&mut Node, &mut TextColor, &mut BackgroundColor), With<InteractionHint>>,
) {
    let Ok((mut node, mut color, mut background)) = hints.single_mut() else {
        return;
    };

    let alpha = f32::from(manager.hint_alpha()) / 255.0;
    let anchor = manager.closest().map(|closest| closest.npc.position);
    let screen = anchor.and_then(|position| {
        let (camera, camera_transform) = cameras.single().ok()?;
        let world = (position + Vec2::Y * settings.hint_offset).extend(0.0);
        camera.world_to_viewport(camera_transform, world).ok()
    });

    match screen {
        Some(screen) if alpha > 0.0 => {
            node.display = Display::Flex;
            node.left = Val::Px(screen.x);
            node.top = Val::Px(screen.y);
            color.0 = TEXT_COLOR.with_alpha(alpha);
            background.0 = HINT_BACKGROUND.with_alpha(HINT_BACKGROUND.alpha() * alpha);
        }
        _ => node.display = Display::None,
    }
}

/// Fills the dialogue box from the session view and fades it with the dialogue alpha.
pub fn update_dialogue_box(
    manager: Res<NpcManager>,
    mut boxes: Query<(&mut Node, &mut BackgroundColor), With<DialogueBox>>,
    mut texts: Query<(&DialogueText, &mut Text, &mut TextColor)>,
) {
    let Ok((mut node, mut background)) = boxes.single_mut() else {
        return;
    };

    let session = manager.session();
    let opacity = f32::from(session.dialogue_alpha()) / 255.0;
    let showing = matches!(
        session.state(),
        SessionState::Dialogue | SessionState::ActionMenu
    );
    if !showing || opacity <= 0.0 {
        node.display = Display::None;
        return;
    }
    node.display = Display::Flex;
    background.0 = BOX_COLOR.with_alpha(BOX_COLOR.alpha() * opacity);

    let view = session.dialogue_view();
    let speaker = view
        .as_ref()
        .map(|view| view.speaker)
        .or_else(|| session.active_npc_name())
        .unwrap_or_default();

    for (role, mut text, mut color) in texts.iter_mut() {
        let (content, base) = match role {
            DialogueText::Speaker => (speaker.to_string(), NAME_COLOR),
            DialogueText::Body => (
                view.as_ref()
                    .map(|view| view.visible_text.to_string())
                    .unwrap_or_default(),
                TEXT_COLOR,
            ),
            DialogueText::Portrait => (
                view.as_ref()
                    .and_then(|view| view.portrait)
                    .map(|portrait| portrait.as_str().to_string())
                    .unwrap_or_default(),
                CAPTION_COLOR,
            ),
            DialogueText::MoreIndicator => {
                let visible = view.as_ref().is_some_and(|view| view.more_indicator);
                let content = if visible { MORE_INDICATOR } else { "" };
                (content.to_string(), TEXT_COLOR)
            }
        };
        if text.0 != content {
            text.0 = content;
        }
        color.0 = base.with_alpha(opacity);
    }
}

fn slot_background(item: &ActionItem) -> Color {
    if !item.enabled {
        SLOT_DISABLED_COLOR
    } else if item.hovered {
        SLOT_HOVER_COLOR
    } else {
        SLOT_COLOR
    }
}

/// Places each slot over the screen region of its menu item.
pub fn update_action_slots(
    manager: Res<NpcManager>,
    mut slots: Query<(&ActionSlot, &mut Node, &mut BackgroundColor)>,
    mut labels: Query<(&ActionSlotLabel, &mut Text, &mut TextColor)>,
) {
    let items = manager
        .action_menu()
        .map(|menu| menu.items())
        .unwrap_or_default();

    for (slot, mut node, mut background) in slots.iter_mut() {
        let Some((item, region)) = items
            .get(slot.index)
            .and_then(|item| item.region.map(|region| (item, region)))
        else {
            node.display = Display::None;
            continue;
        };

        node.display = Display::Flex;
        node.left = Val::Px(region.min.x);
        node.top = Val::Px(region.min.y);
        node.width = Val::Px(region.width());
        node.height = Val::Px(region.height());
        background.0 = slot_background(item);
    }

    for (label, mut text, mut color) in labels.iter_mut() {
        let Some(item) = items.get(label.index) else {
            continue;
        };
        if text.0 != item.kind.label() {
            text.0 = item.kind.label().to_string();
        }
        color.0 = if item.enabled {
            item.kind.color()
        } else {
            CAPTION_COLOR
        };
    }
}

/// Mirrors the player's reputation into the gauge and its label.
pub fn update_reputation_hud(
    players: Query<&Reputation, (With<Player>, Changed<Reputation>)>,
    mut fills: Query<(&mut Node, &mut BackgroundColor), With<ReputationFill>>,
    mut labels: Query<&mut Text, With<ReputationLabel>>,
) {
    let Ok(reputation) = players.single() else {
        return;
    };

    for (mut node, mut background) in fills.iter_mut() {
        node.width = Val::Percent(reputation.fraction() * 100.0);
        background.0 = reputation.gauge_color();
    }
    for mut text in labels.iter_mut() {
        text.0 = format!(
            "Reputation {} ({})",
            reputation.value(),
            reputation.standing()
        );
    }
}
