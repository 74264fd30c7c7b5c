mod spawn;
mod systems;
mod types;

use bevy::prelude::*;

use super::scroll::PageScroll;
use super::{StartupSet, UpdateSet};

pub(crate) use types::PageMotion;

pub struct PagePlugin;

impl Plugin for PagePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PageMotion>()
            .add_systems(Startup, spawn::spawn_page.in_set(StartupSet::Spawn))
            .add_systems(
                Update,
                (systems::navbar_scroll_system, systems::reveal_check_system)
                    .in_set(UpdateSet::Scroll)
                    .run_if(resource_exists::<PageScroll>),
            )
            .add_systems(
                Update,
                (
                    systems::advance_page_tweens,
                    systems::apply_navbar_style,
                    systems::apply_section_style,
                )
                    .chain()
                    .in_set(UpdateSet::Visuals)
                    .run_if(resource_exists::<PageScroll>),
            );
    }
}
