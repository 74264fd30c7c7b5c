use bevy::prelude::*;

use crate::game::scroll::{PageScroll, ScrollMoved};

use super::types::{FadeFill, FadeSection, FadeText, PageMotion, PageNavbar};

pub(super) fn navbar_scroll_system(
    mut moved: MessageReader<ScrollMoved>,
    mut motion: ResMut<PageMotion>,
) {
    for event in moved.read() {
        motion.navbar.on_scroll(event.offset);
    }
}

/// Re-evaluated every frame so sections already in view at load, or
/// brought into view by a resize, reveal without a scroll.
pub(super) fn reveal_check_system(page: Res<PageScroll>, mut motion: ResMut<PageMotion>) {
    for id in motion.reveal.on_scroll(page.offset, page.viewport_height) {
        debug!("Revealing section {}", id.0);
    }
}

pub(super) fn advance_page_tweens(time: Res<Time>, mut motion: ResMut<PageMotion>) {
    let dt = time.delta_secs();
    motion.reveal.advance(dt);
    motion.navbar.advance(dt);
}

pub(super) fn apply_navbar_style(
    motion: Res<PageMotion>,
    mut q_navbar: Query<&mut Node, With<PageNavbar>>,
) {
    let top = Val::Px(motion.navbar.offset_y());
    for mut node in &mut q_navbar {
        if node.top != top {
            node.top = top;
        }
    }
}

pub(super) fn apply_section_style(
    page: Res<PageScroll>,
    motion: Res<PageMotion>,
    mut q_sections: Query<(&FadeSection, &mut Node)>,
    mut q_fills: Query<(&FadeFill, &mut BackgroundColor, &mut BorderColor)>,
    mut q_texts: Query<(&FadeText, &mut TextColor)>,
) {
    for (section, mut node) in &mut q_sections {
        let Some(style) = motion.reveal.style(section.id) else {
            continue;
        };
        let top = Val::Px(section.top - page.offset + style.offset_y);
        if node.top != top {
            node.top = top;
        }
    }

    for (fade, mut background, mut border) in &mut q_fills {
        let Some(style) = motion.reveal.style(fade.id) else {
            continue;
        };
        background.0 = fade.fill.with_alpha(fade.fill.alpha() * style.opacity);
        *border = BorderColor::all(fade.border.with_alpha(fade.border.alpha() * style.opacity));
    }

    for (fade, mut color) in &mut q_texts {
        let Some(style) = motion.reveal.style(fade.id) else {
            continue;
        };
        color.0 = fade.color.with_alpha(fade.base_alpha * style.opacity);
    }
}
