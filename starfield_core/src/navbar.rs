use crate::tween::{Ease, Tween};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavbarConfig {
    /// Below this scroll offset the navbar always shows
    pub threshold: f32,
    pub hidden_y: f32,
    pub duration: f32,
    pub ease: Ease,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            hidden_y: -120.0,
            duration: 0.6,
            ease: Ease::Power3Out,
        }
    }
}

/// Slides the navbar out while scrolling down and back in otherwise.
#[derive(Debug, Clone)]
pub struct NavbarAutoHide {
    config: NavbarConfig,
    last_scroll: f32,
    tween: Tween,
}

impl NavbarAutoHide {
    pub fn new(config: NavbarConfig, initial_scroll: f32) -> Self {
        Self {
            config,
            last_scroll: initial_scroll,
            tween: Tween::new(0.0, 0.0, 0.0, config.ease),
        }
    }

    /// Retarget on every scroll event, even when the target is unchanged.
    pub fn on_scroll(&mut self, current: f32) {
        let hide = current > self.last_scroll && current > self.config.threshold;
        let target = if hide { self.config.hidden_y } else { 0.0 };
        self.tween.retarget(target, self.config.duration);
        self.last_scroll = current;
    }

    pub fn advance(&mut self, dt: f32) {
        self.tween.advance(dt);
    }

    pub fn offset_y(&self) -> f32 {
        self.tween.value()
    }

    pub fn target_y(&self) -> f32 {
        self.tween.to
    }

    pub fn last_scroll(&self) -> f32 {
        self.last_scroll
    }
}

impl Default for NavbarAutoHide {
    fn default() -> Self {
        Self::new(NavbarConfig::default(), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(nav: &mut NavbarAutoHide) {
        for _ in 0..60 {
            nav.advance(1.0 / 60.0);
        }
    }

    #[test]
    fn scroll_down_past_threshold_hides() {
        let mut nav = NavbarAutoHide::new(NavbarConfig::default(), 50.0);
        nav.on_scroll(200.0);
        assert_eq!(nav.target_y(), -120.0);
        settle(&mut nav);
        assert!((nav.offset_y() + 120.0).abs() < 1e-3);
    }

    #[test]
    fn scroll_up_shows_again() {
        let mut nav = NavbarAutoHide::new(NavbarConfig::default(), 50.0);
        nav.on_scroll(200.0);
        settle(&mut nav);
        nav.on_scroll(150.0);
        assert_eq!(nav.target_y(), 0.0);
        settle(&mut nav);
        assert!(nav.offset_y().abs() < 1e-3);
    }

    #[test]
    fn scroll_down_above_threshold_keeps_visible() {
        let mut nav = NavbarAutoHide::default();
        nav.on_scroll(80.0);
        assert_eq!(nav.target_y(), 0.0);
        assert_eq!(nav.last_scroll(), 80.0);
    }

    #[test]
    fn same_offset_shows() {
        let mut nav = NavbarAutoHide::new(NavbarConfig::default(), 300.0);
        nav.on_scroll(300.0);
        assert_eq!(nav.target_y(), 0.0);
    }

    #[test]
    fn reversal_mid_tween_starts_from_current_offset() {
        let mut nav = NavbarAutoHide::new(NavbarConfig::default(), 120.0);
        nav.on_scroll(400.0);
        nav.advance(0.3);
        let partway = nav.offset_y();
        assert!(partway < 0.0 && partway > -120.0);

        nav.on_scroll(390.0);
        assert!((nav.offset_y() - partway).abs() < 1e-4);
        settle(&mut nav);
        assert!(nav.offset_y().abs() < 1e-3);
    }
}
