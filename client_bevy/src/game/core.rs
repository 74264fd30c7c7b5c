use bevy::asset::RenderAssetUsages;
use bevy::camera::RenderTarget;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages};
use bevy::ui::IsDefaultUiCamera;
use bevy::window::{PrimaryWindow, WindowResized};
use starfield_core::scene::RendererSettings;
use starfield_core::{SceneBootstrap, StarfieldConfig, Viewport};

use crate::constants::{color_from_hex, AMBIENT_BRIGHTNESS_PER_UNIT, POINT_LUMENS_PER_UNIT};

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum StartupSet {
    Scene,
    Spawn,
}

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum UpdateSet {
    Input,
    Scroll,
    Motion,
    Visuals,
}

pub struct CorePlugin {
    /// Raw JSON override for [`StarfieldConfig`], if the host supplied one.
    pub config_override: Option<String>,
}

#[derive(Resource, Clone)]
pub(crate) struct StarfieldSettings(pub(crate) StarfieldConfig);

#[derive(Resource)]
pub(crate) struct SceneState(pub(crate) SceneBootstrap);

/// Offscreen image the star camera renders into. Sized in physical pixels
/// at the capped pixel ratio, then stretched over the window.
#[derive(Resource)]
pub(crate) struct SceneTarget(pub(crate) Handle<Image>);

#[derive(Component)]
pub(crate) struct MainCamera;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let config = resolve_config(self.config_override.as_deref());

        app.insert_resource(StarfieldSettings(config))
            .insert_resource(ClearColor(Color::NONE))
            .configure_sets(Startup, (StartupSet::Scene, StartupSet::Spawn).chain())
            .configure_sets(
                Update,
                (
                    UpdateSet::Input,
                    UpdateSet::Scroll,
                    UpdateSet::Motion,
                    UpdateSet::Visuals,
                )
                    .chain(),
            )
            .add_systems(Startup, setup_scene.in_set(StartupSet::Scene))
            .add_systems(
                Update,
                handle_window_resized
                    .in_set(UpdateSet::Input)
                    .run_if(resource_exists::<SceneState>.and(resource_exists::<SceneTarget>)),
            );
    }
}

fn resolve_config(config_override: Option<&str>) -> StarfieldConfig {
    let Some(json) = config_override else {
        return StarfieldConfig::default();
    };

    match StarfieldConfig::from_json(json) {
        Ok(config) => {
            info!("Using starfield config override");
            config
        }
        Err(e) => {
            warn!("Ignoring invalid starfield config override: {}", e);
            StarfieldConfig::default()
        }
    }
}

fn setup_scene(
    mut commands: Commands,
    settings: Res<StarfieldSettings>,
    mut images: ResMut<Assets<Image>>,
    q_window: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = q_window.single() else {
        return;
    };

    let scene = SceneBootstrap::new(&settings.0, host_viewport(window));

    let (physical_width, physical_height) = scene.renderer.physical_size();
    info!(
        "Starfield scene: {:?}, {}x{} @ {}x ({}x{} physical), antialias {}",
        scene.device,
        scene.renderer.width,
        scene.renderer.height,
        scene.renderer.pixel_ratio,
        physical_width,
        physical_height,
        scene.renderer.antialias
    );

    let msaa = if scene.renderer.antialias {
        Msaa::Sample4
    } else {
        Msaa::Off
    };

    let target = images.add(scene_target_image(&scene.renderer));

    commands.spawn((
        Camera3d::default(),
        Camera {
            target: RenderTarget::Image(target.clone().into()),
            clear_color: ClearColorConfig::Custom(Color::NONE),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: scene.camera.fov_degrees.to_radians(),
            aspect_ratio: scene.camera.aspect,
            near: scene.camera.near,
            far: scene.camera.far,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, scene.camera.z),
        Tonemapping::None,
        msaa,
        AmbientLight {
            color: color_from_hex(scene.ambient.color),
            brightness: scene.ambient.intensity * AMBIENT_BRIGHTNESS_PER_UNIT,
            ..default()
        },
        MainCamera,
    ));

    // The window itself keeps the host's scale factor; only the star image
    // is rendered at the capped ratio.
    commands.spawn((Camera2d, IsDefaultUiCamera));
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        ImageNode::new(target.clone()),
        GlobalZIndex(-1),
    ));

    let [lx, ly, lz] = scene.point_light.position;
    commands.spawn((
        PointLight {
            color: color_from_hex(scene.point_light.color),
            intensity: scene.point_light.intensity * POINT_LUMENS_PER_UNIT,
            range: scene.point_light.range,
            ..default()
        },
        Transform::from_xyz(lx, ly, lz),
    ));

    commands.insert_resource(SceneTarget(target));
    commands.insert_resource(SceneState(scene));
}

/// Render target extent for the current renderer size. Never zero, so a
/// minimized window still has a valid attachment.
fn scene_target_extent(renderer: &RendererSettings) -> Extent3d {
    let (width, height) = renderer.physical_size();
    Extent3d {
        width: width.max(1),
        height: height.max(1),
        depth_or_array_layers: 1,
    }
}

fn scene_target_image(renderer: &RendererSettings) -> Image {
    let mut image = Image::new_fill(
        scene_target_extent(renderer),
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Bgra8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    image.texture_descriptor.usage = TextureUsages::TEXTURE_BINDING
        | TextureUsages::COPY_DST
        | TextureUsages::RENDER_ATTACHMENT;
    image
}

/// `WindowResized` reports logical pixels, the same unit `host_viewport`
/// seeds the scene with.
fn handle_window_resized(
    mut resized: MessageReader<WindowResized>,
    mut scene: ResMut<SceneState>,
    target: Res<SceneTarget>,
    mut images: ResMut<Assets<Image>>,
    mut q_projection: Query<&mut Projection, With<MainCamera>>,
) {
    for event in resized.read() {
        if !event.width.is_finite() || !event.height.is_finite() {
            continue;
        }

        scene.0.resize(event.width, event.height);
        for mut projection in &mut q_projection {
            if let Projection::Perspective(perspective) = &mut *projection {
                perspective.aspect_ratio = scene.0.camera.aspect;
            }
        }
        if let Some(image) = images.get_mut(&target.0) {
            image.resize(scene_target_extent(&scene.0.renderer));
        }
    }
}

/// Logical viewport and device pixel ratio as the host reports them.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn host_viewport(window: &Window) -> Viewport {
    Viewport::new(
        window.width(),
        window.height(),
        window.resolution.base_scale_factor(),
    )
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn host_viewport(window: &Window) -> Viewport {
    let Some(host) = web_sys::window() else {
        return Viewport::new(
            window.width(),
            window.height(),
            window.resolution.base_scale_factor(),
        );
    };

    let width = host
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .map(|v| v as f32)
        .unwrap_or_else(|| window.width());
    let height = host
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .map(|v| v as f32)
        .unwrap_or_else(|| window.height());

    Viewport::new(width, height, host.device_pixel_ratio() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_app(viewport: Viewport) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_message::<WindowResized>();
        app.insert_resource(Assets::<Image>::default());

        let scene = SceneBootstrap::new(&StarfieldConfig::default(), viewport);
        let target = app
            .world_mut()
            .resource_mut::<Assets<Image>>()
            .add(scene_target_image(&scene.renderer));
        app.insert_resource(SceneTarget(target));
        app.insert_resource(SceneState(scene));

        app.add_systems(Update, handle_window_resized);
        app
    }

    fn resize_window(app: &mut App, width: f32, height: f32) {
        app.world_mut().write_message(WindowResized {
            window: Entity::PLACEHOLDER,
            width,
            height,
        });
    }

    fn target_size(app: &App) -> (u32, u32) {
        let handle = &app.world().resource::<SceneTarget>().0;
        let size = app
            .world()
            .resource::<Assets<Image>>()
            .get(handle)
            .unwrap()
            .texture_descriptor
            .size;
        (size.width, size.height)
    }

    #[test]
    fn one_resize_event_resizes_scene_once() {
        let mut app = make_test_app(Viewport::new(1280.0, 800.0, 1.0));
        let camera = app
            .world_mut()
            .spawn((
                MainCamera,
                Projection::Perspective(PerspectiveProjection::default()),
            ))
            .id();

        resize_window(&mut app, 1000.0, 500.0);
        app.update();
        app.update();

        let scene = &app.world().resource::<SceneState>().0;
        assert_eq!(scene.resize_count(), 1);
        assert_eq!(scene.renderer.width, 1000.0);
        assert_eq!(scene.renderer.height, 500.0);

        let Projection::Perspective(perspective) = app.world().get::<Projection>(camera).unwrap()
        else {
            panic!("Expected perspective projection");
        };
        assert_eq!(perspective.aspect_ratio, 2.0);
    }

    #[test]
    fn render_target_uses_capped_pixel_ratio() {
        // Desktop caps a 3x display at 2x.
        let mut app = make_test_app(Viewport::new(1280.0, 800.0, 3.0));
        assert_eq!(target_size(&app), (2560, 1600));

        resize_window(&mut app, 1000.0, 500.0);
        app.update();

        assert_eq!(target_size(&app), (2000, 1000));
        let scene = &app.world().resource::<SceneState>().0;
        assert_eq!(scene.renderer.pixel_ratio, 2.0);
    }

    #[test]
    fn zero_height_resize_keeps_aspect_and_valid_target() {
        let mut app = make_test_app(Viewport::new(1280.0, 800.0, 1.0));

        resize_window(&mut app, 1280.0, 0.0);
        app.update();

        let scene = &app.world().resource::<SceneState>().0;
        assert_eq!(scene.resize_count(), 1);
        assert_eq!(scene.camera.aspect, 1.6);
        assert_eq!(target_size(&app), (1280, 1));
    }
}
