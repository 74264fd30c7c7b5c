use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::WindowResized;
use starfield_core::ScrollSensor;

use crate::constants::{content_height, SCROLL_LINE_PX, SCROLL_PAGE_FRACTION, SECTIONS};

use super::core::SceneState;
use super::starfield::StarMotion;
use super::{StartupSet, UpdateSet};

pub struct ScrollPlugin;

/// Scroll state of the page laid over the starfield.
#[derive(Resource, Debug, Clone, PartialEq)]
pub(crate) struct PageScroll {
    pub(crate) offset: f32,
    pub(crate) viewport_height: f32,
    pub(crate) content_height: f32,
}

impl PageScroll {
    pub(crate) fn new(viewport_height: f32, content_height: f32) -> Self {
        Self {
            offset: 0.0,
            viewport_height,
            content_height,
        }
    }

    pub(crate) fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Move by `delta` px within the scrollable range. Returns true if the
    /// offset changed.
    pub(crate) fn scroll_by(&mut self, delta: f32) -> bool {
        self.scroll_to(self.offset + delta)
    }

    pub(crate) fn scroll_to(&mut self, target: f32) -> bool {
        let next = target.clamp(0.0, self.max_offset());
        if next == self.offset {
            return false;
        }
        self.offset = next;
        true
    }

    /// Apply a new viewport height, re-clamping the offset.
    pub(crate) fn set_viewport_height(&mut self, height: f32) -> bool {
        self.viewport_height = height.max(0.0);
        self.scroll_to(self.offset)
    }
}

/// One observed change of the page scroll offset.
#[derive(Message, Clone, Copy, Debug)]
pub(crate) struct ScrollMoved {
    pub(crate) offset: f32,
}

#[derive(Resource, Default)]
pub(crate) struct ScrollVelocity(pub(crate) ScrollSensor);

impl Plugin for ScrollPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ScrollMoved>()
            .init_resource::<ScrollVelocity>()
            .add_systems(Startup, init_page_scroll.in_set(StartupSet::Spawn))
            .add_systems(
                Update,
                (scroll_input_system, scroll_viewport_system)
                    .in_set(UpdateSet::Input)
                    .run_if(resource_exists::<PageScroll>),
            )
            .add_systems(
                Update,
                scroll_velocity_system
                    .in_set(UpdateSet::Scroll)
                    .run_if(resource_exists::<StarMotion>),
            );
    }
}

fn init_page_scroll(mut commands: Commands, scene: Option<Res<SceneState>>) {
    let Some(scene) = scene else {
        return;
    };
    commands.insert_resource(PageScroll::new(
        scene.0.renderer.height,
        content_height(SECTIONS.len()),
    ));
}

fn scroll_input_system(
    mut wheel: MessageReader<MouseWheel>,
    keys: Res<ButtonInput<KeyCode>>,
    touches: Res<Touches>,
    mut page: ResMut<PageScroll>,
    mut moved: MessageWriter<ScrollMoved>,
) {
    let mut delta = 0.0;

    for event in wheel.read() {
        delta -= match event.unit {
            MouseScrollUnit::Line => event.y * SCROLL_LINE_PX,
            MouseScrollUnit::Pixel => event.y,
        };
    }

    for touch in touches.iter() {
        delta -= touch.delta().y;
    }

    let page_step = page.viewport_height * SCROLL_PAGE_FRACTION;
    if keys.just_pressed(KeyCode::ArrowDown) {
        delta += SCROLL_LINE_PX;
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        delta -= SCROLL_LINE_PX;
    }
    if keys.just_pressed(KeyCode::PageDown) || keys.just_pressed(KeyCode::Space) {
        delta += page_step;
    }
    if keys.just_pressed(KeyCode::PageUp) {
        delta -= page_step;
    }

    let changed = if keys.just_pressed(KeyCode::Home) {
        page.scroll_to(0.0)
    } else if keys.just_pressed(KeyCode::End) {
        let end = page.max_offset();
        page.scroll_to(end)
    } else if delta != 0.0 {
        page.scroll_by(delta)
    } else {
        false
    };

    if changed {
        moved.write(ScrollMoved {
            offset: page.offset,
        });
    }
}

fn scroll_viewport_system(
    mut resized: MessageReader<WindowResized>,
    mut page: ResMut<PageScroll>,
    mut moved: MessageWriter<ScrollMoved>,
) {
    for event in resized.read() {
        if event.height.is_finite() && page.set_viewport_height(event.height) {
            moved.write(ScrollMoved {
                offset: page.offset,
            });
        }
    }
}

/// Samples the sensor once per frame with the frame's final offset. Input
/// and resize can both move the page in one frame; sampling each would read
/// the second move as happening over zero time.
fn scroll_velocity_system(
    mut moved: MessageReader<ScrollMoved>,
    time: Res<Time>,
    mut sensor: ResMut<ScrollVelocity>,
    mut motion: ResMut<StarMotion>,
) {
    let Some(last) = moved.read().last() else {
        return;
    };
    sensor
        .0
        .on_scroll(last.offset, time.elapsed_secs_f64(), motion.0.boost_mut());
}
