use crate::tween::{Ease, Tween};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealConfig {
    /// Trigger line as a fraction of the viewport height from its top
    pub start_fraction: f32,
    /// Initial downward offset in px
    pub offset_y: f32,
    pub duration: f32,
    pub ease: Ease,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            start_fraction: 0.85,
            offset_y: 20.0,
            duration: 1.0,
            ease: Ease::Power3Out,
        }
    }
}

/// Current visual state of a fade section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionStyle {
    pub opacity: f32,
    pub offset_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(pub usize);

#[derive(Debug, Clone)]
struct Section {
    top: f32,
    opacity: Tween,
    offset: Tween,
    triggered: bool,
}

/// Fade-in-on-enter for page sections. Each section plays once, the first
/// time its top crosses the trigger line; it never hides again.
#[derive(Debug, Clone, Default)]
pub struct SectionReveal {
    config: RevealConfig,
    sections: Vec<Section>,
}

impl SectionReveal {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            sections: Vec::new(),
        }
    }

    /// Register a section by its layout top (page coordinates, px). It
    /// starts hidden and offset.
    pub fn add_section(&mut self, top: f32) -> SectionId {
        self.sections.push(Section {
            top,
            opacity: Tween::settled(0.0),
            offset: Tween::settled(self.config.offset_y),
            triggered: false,
        });
        SectionId(self.sections.len() - 1)
    }

    /// Layout moved (e.g. after a resize). Already revealed sections are
    /// unaffected.
    pub fn set_section_top(&mut self, id: SectionId, top: f32) {
        if let Some(section) = self.sections.get_mut(id.0) {
            section.top = top;
        }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Check every pending section against the trigger line and start the
    /// ones that crossed it. Returns the sections triggered by this call.
    pub fn on_scroll(&mut self, scroll: f32, viewport_height: f32) -> Vec<SectionId> {
        let line = scroll + viewport_height * self.config.start_fraction;
        let mut started = Vec::new();

        for (i, section) in self.sections.iter_mut().enumerate() {
            if section.triggered || section.top > line {
                continue;
            }
            section.triggered = true;
            section.opacity = Tween::new(0.0, 1.0, self.config.duration, self.config.ease);
            section.offset = Tween::new(
                self.config.offset_y,
                0.0,
                self.config.duration,
                self.config.ease,
            );
            started.push(SectionId(i));
        }

        started
    }

    pub fn advance(&mut self, dt: f32) {
        for section in self.sections.iter_mut().filter(|s| s.triggered) {
            section.opacity.advance(dt);
            section.offset.advance(dt);
        }
    }

    pub fn is_triggered(&self, id: SectionId) -> bool {
        self.sections.get(id.0).is_some_and(|s| s.triggered)
    }

    pub fn style(&self, id: SectionId) -> Option<SectionStyle> {
        self.sections.get(id.0).map(|s| SectionStyle {
            opacity: s.opacity.value(),
            offset_y: s.offset.value(),
        })
    }

    /// True while any triggered section is still animating.
    pub fn is_animating(&self) -> bool {
        self.sections
            .iter()
            .any(|s| s.triggered && !s.opacity.is_finished())
    }
}
