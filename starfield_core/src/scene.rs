use crate::config::StarfieldConfig;
use crate::device::{clamp_pixel_ratio, DeviceClass};

/// Logical viewport as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub z: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererSettings {
    /// Transparent clear so the page behind shows through
    pub alpha: bool,
    pub antialias: bool,
    pub pixel_ratio: f32,
    pub width: f32,
    pub height: f32,
}

impl RendererSettings {
    /// Backing framebuffer size in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round().max(0.0) as u32,
            (self.height * self.pixel_ratio).round().max(0.0) as u32,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLightSettings {
    pub color: u32,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLightSettings {
    pub color: u32,
    pub intensity: f32,
    pub range: f32,
    pub position: [f32; 3],
}

/// Camera, renderer and lights for the starfield scene, plus the viewport
/// state they were derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneBootstrap {
    pub device: DeviceClass,
    pub camera: CameraSettings,
    pub renderer: RendererSettings,
    pub ambient: AmbientLightSettings,
    pub point_light: PointLightSettings,
    resize_count: u64,
}

impl SceneBootstrap {
    pub fn new(config: &StarfieldConfig, viewport: Viewport) -> Self {
        let device = DeviceClass::from_viewport_width(viewport.width, config);
        let profile = config.profile(device);

        Self {
            device,
            camera: CameraSettings {
                fov_degrees: config.camera_fov_degrees,
                aspect: aspect_or(viewport.width, viewport.height, 1.0),
                near: config.camera_near,
                far: config.camera_far,
                z: config.camera_z,
            },
            renderer: RendererSettings {
                alpha: true,
                antialias: profile.antialias,
                pixel_ratio: clamp_pixel_ratio(
                    viewport.device_pixel_ratio,
                    profile.pixel_ratio_cap,
                ),
                width: viewport.width,
                height: viewport.height,
            },
            ambient: AmbientLightSettings {
                color: 0xffffff,
                intensity: config.ambient_intensity,
            },
            point_light: PointLightSettings {
                color: 0xffffff,
                intensity: config.point_light_intensity,
                range: config.point_light_range,
                position: [0.0, 0.0, config.point_light_z],
            },
            resize_count: 0,
        }
    }

    /// Apply a host resize. The aspect tracks `width / height`; a zero
    /// height (minimized window) keeps the previous aspect.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.aspect = aspect_or(width, height, self.camera.aspect);
        self.renderer.width = width;
        self.renderer.height = height;
        self.resize_count += 1;
    }

    pub fn resize_count(&self) -> u64 {
        self.resize_count
    }
}

fn aspect_or(width: f32, height: f32, fallback: f32) -> f32 {
    let aspect = width / height;
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_bootstrap_uses_camera_defaults() {
        let config = StarfieldConfig::default();
        let scene = SceneBootstrap::new(&config, Viewport::new(1280.0, 720.0, 1.0));
        assert_eq!(scene.device, DeviceClass::Desktop);
        assert_eq!(scene.camera.fov_degrees, 70.0);
        assert_eq!(scene.camera.near, 0.1);
        assert_eq!(scene.camera.far, 2600.0);
        assert_eq!(scene.camera.z, 110.0);
        assert!((scene.camera.aspect - 1280.0 / 720.0).abs() < 1e-6);
        assert!(scene.renderer.alpha);
        assert!(scene.renderer.antialias);
    }

    #[test]
    fn mobile_bootstrap_disables_antialias_and_caps_ratio() {
        let config = StarfieldConfig::default();
        let scene = SceneBootstrap::new(&config, Viewport::new(390.0, 844.0, 3.0));
        assert_eq!(scene.device, DeviceClass::Mobile);
        assert!(!scene.renderer.antialias);
        assert_eq!(scene.renderer.pixel_ratio, 1.5);
        assert_eq!(scene.renderer.physical_size(), (585, 1266));
    }

    #[test]
    fn lights_match_config() {
        let config = StarfieldConfig::default();
        let scene = SceneBootstrap::new(&config, Viewport::new(1024.0, 768.0, 2.0));
        assert_eq!(scene.ambient.intensity, 0.35);
        assert_eq!(scene.point_light.intensity, 8.0);
        assert_eq!(scene.point_light.range, 2200.0);
        assert_eq!(scene.point_light.position, [0.0, 0.0, 220.0]);
    }

    #[test]
    fn resize_updates_aspect_and_size_once() {
        let config = StarfieldConfig::default();
        let mut scene = SceneBootstrap::new(&config, Viewport::new(1024.0, 768.0, 1.0));
        scene.resize(1600.0, 900.0);
        assert_eq!(scene.camera.aspect, 1600.0 / 900.0);
        assert_eq!((scene.renderer.width, scene.renderer.height), (1600.0, 900.0));
        assert_eq!(scene.resize_count(), 1);

        scene.resize(800.0, 800.0);
        assert_eq!(scene.camera.aspect, 1.0);
        assert_eq!(scene.resize_count(), 2);
    }

    #[test]
    fn zero_height_resize_keeps_previous_aspect() {
        let config = StarfieldConfig::default();
        let mut scene = SceneBootstrap::new(&config, Viewport::new(1000.0, 500.0, 1.0));
        scene.resize(0.0, 0.0);
        assert_eq!(scene.camera.aspect, 2.0);
        assert_eq!((scene.renderer.width, scene.renderer.height), (0.0, 0.0));
    }

    #[test]
    fn device_class_is_fixed_after_resize() {
        let config = StarfieldConfig::default();
        let mut scene = SceneBootstrap::new(&config, Viewport::new(1024.0, 768.0, 1.0));
        scene.resize(400.0, 800.0);
        assert_eq!(scene.device, DeviceClass::Desktop);
    }
}
