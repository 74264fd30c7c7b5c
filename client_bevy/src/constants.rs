/// Config light intensities are unitless; scale them into Bevy's photometric units.
pub const AMBIENT_BRIGHTNESS_PER_UNIT: f32 = 200.0;
pub const POINT_LUMENS_PER_UNIT: f32 = 100_000.0;

pub const NAVBAR_HEIGHT: f32 = 64.0;
pub const FIRST_SECTION_TOP: f32 = 140.0;
pub const SECTION_HEIGHT: f32 = 380.0;
pub const SECTION_GAP: f32 = 160.0;
pub const PAGE_BOTTOM_PADDING: f32 = 240.0;

/// Pixels scrolled per wheel "line" and per arrow key press.
pub const SCROLL_LINE_PX: f32 = 40.0;
/// Fraction of the viewport scrolled by PageUp/PageDown.
pub const SCROLL_PAGE_FRACTION: f32 = 0.9;

/// Check the star buffer for lateral drift this often (frames).
pub const DRIFT_CHECK_INTERVAL: u64 = 600;

pub const SECTIONS: [(&str, &str); 5] = [
    (
        "Hello, traveller",
        "Scroll to fly through the field. The faster you scroll, the faster the stars rush past.",
    ),
    (
        "About",
        "A small page with a big sky: every star is recycled to the far plane once it passes the camera.",
    ),
    (
        "Work",
        "Near stars move faster than far ones, so depth reads even without perspective cues.",
    ),
    (
        "Notes",
        "Sections fade in once, the first time they cross the lower part of the screen.",
    ),
    (
        "Contact",
        "The navigation bar tucks away while you scroll down and slides back when you scroll up.",
    ),
];

#[derive(Clone, Copy)]
pub struct Colors;

impl Colors {
    pub const STAR: u32 = 0xffffff;
    pub const NAVBAR_BG: u32 = 0x0b0b1e;
    pub const NAVBAR_TEXT: u32 = 0xe8e8ff;
    pub const SECTION_BG: u32 = 0x101030;
    pub const SECTION_BORDER: u32 = 0x4da6ff;
    pub const TITLE: u32 = 0xffffff;
    pub const BODY: u32 = 0xb8b8d8;
}

pub fn color_from_hex(rgb: u32) -> bevy::prelude::Color {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    bevy::prelude::Color::srgb(r, g, b)
}

/// Layout top of section `index` in page coordinates.
pub fn section_top(index: usize) -> f32 {
    FIRST_SECTION_TOP + index as f32 * (SECTION_HEIGHT + SECTION_GAP)
}

/// Total scrollable content height for `count` sections.
pub fn content_height(count: usize) -> f32 {
    if count == 0 {
        return FIRST_SECTION_TOP + PAGE_BOTTOM_PADDING;
    }
    section_top(count - 1) + SECTION_HEIGHT + PAGE_BOTTOM_PADDING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_hex_parses_correctly() {
        let c = color_from_hex(0xFF8040);
        if let bevy::prelude::Color::Srgba(srgba) = c {
            assert!((srgba.red - 1.0).abs() < 1e-3);
            assert!((srgba.green - 0.502).abs() < 1e-2);
            assert!((srgba.blue - 0.251).abs() < 1e-2);
        } else {
            panic!("Expected Srgba color variant");
        }
    }

    #[test]
    fn sections_are_evenly_spaced() {
        assert_eq!(section_top(0), FIRST_SECTION_TOP);
        assert_eq!(section_top(2) - section_top(1), SECTION_HEIGHT + SECTION_GAP);
    }

    #[test]
    fn content_height_covers_last_section() {
        let height = content_height(SECTIONS.len());
        assert!(height > section_top(SECTIONS.len() - 1) + SECTION_HEIGHT);
        assert_eq!(content_height(0), FIRST_SECTION_TOP + PAGE_BOTTOM_PADDING);
    }
}
