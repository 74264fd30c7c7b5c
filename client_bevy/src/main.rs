mod constants;
mod game;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use game::{CorePlugin, PagePlugin, ScrollPlugin, StarfieldPlugin};

const CONFIG_ENV: &str = "STARFIELD_CONFIG";
const CONFIG_QUERY_PARAM: &str = "starfield";

fn main() {
    let config_override = config_override_from_env_or_location();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Starfield".to_string(),
                resolution: WindowResolution::new(1280, 800),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                transparent: true,
                canvas: Some("#webgl".to_string()),
                fit_canvas_to_parent: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(CorePlugin { config_override })
        .add_plugins(StarfieldPlugin)
        .add_plugins(ScrollPlugin)
        .add_plugins(PagePlugin)
        .run();
}

#[cfg(not(target_arch = "wasm32"))]
fn config_override_from_env_or_location() -> Option<String> {
    std::env::var(CONFIG_ENV).ok().filter(|s| !s.trim().is_empty())
}

#[cfg(target_arch = "wasm32")]
fn config_override_from_env_or_location() -> Option<String> {
    let window = web_sys::window()?;
    let href = window.location().href().ok()?;
    config_from_query(&href)
}

/// Pull the JSON config override out of a page URL's query string.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn config_from_query(href: &str) -> Option<String> {
    let url = url::Url::parse(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == CONFIG_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.trim().is_empty())
}
