use bevy::prelude::*;
use starfield_core::navbar::NavbarAutoHide;
use starfield_core::reveal::{SectionId, SectionReveal};

pub(super) const NAVBAR_ALPHA: f32 = 0.85;
pub(super) const SECTION_FILL_ALPHA: f32 = 0.55;
pub(super) const SECTION_BORDER_ALPHA: f32 = 0.35;
pub(super) const BODY_ALPHA: f32 = 0.9;

pub(super) const TITLE_FONT_SIZE: f32 = 32.0;
pub(super) const BODY_FONT_SIZE: f32 = 18.0;
pub(super) const BRAND_FONT_SIZE: f32 = 20.0;

/// Scroll-driven tweens for the page: section fade-ins and navbar slide.
#[derive(Resource, Default)]
pub(crate) struct PageMotion {
    pub(crate) reveal: SectionReveal,
    pub(crate) navbar: NavbarAutoHide,
}

#[derive(Component)]
pub(super) struct PageNavbar;

/// A section panel laid out at `top` in page coordinates.
#[derive(Component)]
pub(super) struct FadeSection {
    pub(super) id: SectionId,
    pub(super) top: f32,
}

/// Panel fill and border that fade with their section.
#[derive(Component)]
pub(super) struct FadeFill {
    pub(super) id: SectionId,
    pub(super) fill: Color,
    pub(super) border: Color,
}

/// Text that fades with its section, up to `base_alpha`.
#[derive(Component)]
pub(super) struct FadeText {
    pub(super) id: SectionId,
    pub(super) color: Color,
    pub(super) base_alpha: f32,
}
