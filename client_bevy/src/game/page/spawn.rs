use bevy::prelude::*;

use crate::constants::{
    color_from_hex, section_top, Colors, NAVBAR_HEIGHT, SECTIONS, SECTION_HEIGHT,
};

use super::types::{
    FadeFill, FadeSection, FadeText, PageMotion, PageNavbar, BODY_ALPHA, BODY_FONT_SIZE,
    BRAND_FONT_SIZE, NAVBAR_ALPHA, SECTION_BORDER_ALPHA, SECTION_FILL_ALPHA, TITLE_FONT_SIZE,
};

pub(super) fn spawn_page(mut commands: Commands, mut motion: ResMut<PageMotion>) {
    let title_font = TextFont::from_font_size(TITLE_FONT_SIZE);
    let body_font = TextFont::from_font_size(BODY_FONT_SIZE);

    let fill = color_from_hex(Colors::SECTION_BG).with_alpha(SECTION_FILL_ALPHA);
    let border = color_from_hex(Colors::SECTION_BORDER).with_alpha(SECTION_BORDER_ALPHA);
    let title = color_from_hex(Colors::TITLE);
    let body = color_from_hex(Colors::BODY);

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            overflow: Overflow::clip(),
            ..default()
        })
        .with_children(|page| {
            for (index, (heading, text)) in SECTIONS.iter().enumerate() {
                let top = section_top(index);
                let id = motion.reveal.add_section(top);

                page.spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Percent(10.0),
                        width: Val::Percent(80.0),
                        height: Val::Px(SECTION_HEIGHT),
                        top: Val::Px(top),
                        padding: UiRect::all(Val::Px(32.0)),
                        border: UiRect::all(Val::Px(1.0)),
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(16.0),
                        ..default()
                    },
                    BackgroundColor(fill.with_alpha(0.0)),
                    BorderColor::all(border.with_alpha(0.0)),
                    BorderRadius::all(Val::Px(12.0)),
                    FadeSection { id, top },
                    FadeFill { id, fill, border },
                ))
                .with_children(|section| {
                    section.spawn((
                        Text::new(*heading),
                        title_font.clone(),
                        TextColor(title.with_alpha(0.0)),
                        FadeText {
                            id,
                            color: title,
                            base_alpha: 1.0,
                        },
                    ));
                    section.spawn((
                        Text::new(*text),
                        body_font.clone(),
                        TextColor(body.with_alpha(0.0)),
                        FadeText {
                            id,
                            color: body,
                            base_alpha: BODY_ALPHA,
                        },
                    ));
                });
            }
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Px(NAVBAR_HEIGHT),
                padding: UiRect::horizontal(Val::Px(24.0)),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
            BackgroundColor(color_from_hex(Colors::NAVBAR_BG).with_alpha(NAVBAR_ALPHA)),
            GlobalZIndex(10),
            PageNavbar,
        ))
        .with_children(|nav| {
            nav.spawn((
                Text::new("starfield"),
                TextFont::from_font_size(BRAND_FONT_SIZE),
                TextColor(color_from_hex(Colors::NAVBAR_TEXT)),
            ));
            nav.spawn((
                Text::new(format!("{} sections", SECTIONS.len())),
                TextFont::from_font_size(BODY_FONT_SIZE),
                TextColor(color_from_hex(Colors::NAVBAR_TEXT).with_alpha(BODY_ALPHA)),
            ));
        });
}
