use crate::device::DeviceClass;

/// Per-device tuning. Low-power (narrow) viewports get fewer stars, slower
/// motion and a smaller framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../../web/generated/")]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
    pub star_count: usize,
    pub base_speed: f32,
    /// Upper clamp for the scroll boost
    pub boost_max: f32,
    pub pixel_ratio_cap: f32,
    pub antialias: bool,
}

impl DeviceProfile {
    pub const MOBILE: Self = Self {
        star_count: 1600,
        base_speed: 2.6,
        boost_max: 25.0,
        pixel_ratio_cap: 1.5,
        antialias: false,
    };

    pub const DESKTOP: Self = Self {
        star_count: 3000,
        base_speed: 3.2,
        boost_max: 40.0,
        pixel_ratio_cap: 2.0,
        antialias: true,
    };

    fn validate(&self, label: &str) -> Result<(), String> {
        if self.star_count == 0 {
            return Err(format!("{label}.star_count must be > 0"));
        }
        if !self.base_speed.is_finite() || self.base_speed < 0.0 {
            return Err(format!("{label}.base_speed must be finite and >= 0"));
        }
        if !self.boost_max.is_finite() || self.boost_max < 0.0 {
            return Err(format!("{label}.boost_max must be finite and >= 0"));
        }
        if !self.pixel_ratio_cap.is_finite() || self.pixel_ratio_cap <= 0.0 {
            return Err(format!("{label}.pixel_ratio_cap must be finite and > 0"));
        }
        Ok(())
    }
}

/// Starfield configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../../web/generated/")]
#[serde(rename_all = "camelCase", default)]
pub struct StarfieldConfig {
    /// Viewports strictly narrower than this are treated as mobile
    pub mobile_width_threshold: f32,
    pub mobile: DeviceProfile,
    pub desktop: DeviceProfile,

    pub field_width: f32,
    pub field_height: f32,
    pub max_depth: f32,

    pub camera_fov_degrees: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub camera_z: f32,
    /// Stars recycle once they pass this far beyond the camera
    pub recycle_margin: f32,

    pub velocity_gain: f32,
    pub depth_gain: f32,
    pub drift_x: f32,
    pub drift_y: f32,

    /// Multiplicative boost decay applied once per frame
    pub boost_decay: f32,
    /// Scroll velocity (px/s) is divided by this to get the boost
    pub boost_divisor: f32,

    pub point_size: f32,
    pub sprite_size: u32,

    pub ambient_intensity: f32,
    pub point_light_intensity: f32,
    pub point_light_range: f32,
    pub point_light_z: f32,

    pub rng_seed: u64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            mobile_width_threshold: 768.0,
            mobile: DeviceProfile::MOBILE,
            desktop: DeviceProfile::DESKTOP,
            field_width: 1200.0,
            field_height: 700.0,
            max_depth: 2500.0,
            camera_fov_degrees: 70.0,
            camera_near: 0.1,
            camera_far: 2600.0,
            camera_z: 110.0,
            recycle_margin: 220.0,
            velocity_gain: 1.2,
            depth_gain: 0.8,
            drift_x: 0.02,
            drift_y: 0.01,
            boost_decay: 0.9,
            boost_divisor: 65.0,
            point_size: 5.2,
            sprite_size: 256,
            ambient_intensity: 0.35,
            point_light_intensity: 8.0,
            point_light_range: 2200.0,
            point_light_z: 220.0,
            rng_seed: 7,
        }
    }
}

impl StarfieldConfig {
    pub fn profile(&self, device: DeviceClass) -> &DeviceProfile {
        match device {
            DeviceClass::Mobile => &self.mobile,
            DeviceClass::Desktop => &self.desktop,
        }
    }

    /// Upper bound of the z range; anything beyond is recycled.
    pub fn recycle_z(&self) -> f32 {
        self.camera_z + self.recycle_margin
    }

    /// World-space edge of a star quad. `point_size` is a screen size that
    /// shrinks as `(viewport_height / 2) / depth`, so the quad is scaled by
    /// `tan(fov / 2)` to project to the same number of pixels.
    pub fn star_quad_size(&self) -> f32 {
        self.point_size * (self.camera_fov_degrees.to_radians() * 0.5).tan()
    }

    /// Parse a JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(json).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.mobile.validate("mobile")?;
        self.desktop.validate("desktop")?;
        for (name, value) in [
            ("camera_z", self.camera_z),
            ("velocity_gain", self.velocity_gain),
            ("depth_gain", self.depth_gain),
            ("drift_x", self.drift_x),
            ("drift_y", self.drift_y),
            ("ambient_intensity", self.ambient_intensity),
            ("point_light_intensity", self.point_light_intensity),
            ("point_light_range", self.point_light_range),
            ("point_light_z", self.point_light_z),
        ] {
            if !value.is_finite() {
                return Err(format!("{name} must be finite"));
            }
        }
        if !self.mobile_width_threshold.is_finite() || self.mobile_width_threshold < 0.0 {
            return Err("mobile_width_threshold must be finite and >= 0".to_string());
        }
        if !self.field_width.is_finite() || self.field_width <= 0.0 {
            return Err("field_width must be finite and > 0".to_string());
        }
        if !self.field_height.is_finite() || self.field_height <= 0.0 {
            return Err("field_height must be finite and > 0".to_string());
        }
        if !self.max_depth.is_finite() || self.max_depth <= 0.0 {
            return Err("max_depth must be finite and > 0".to_string());
        }
        if !(self.camera_fov_degrees > 0.0 && self.camera_fov_degrees < 180.0) {
            return Err("camera_fov_degrees must be in (0, 180)".to_string());
        }
        if !self.camera_near.is_finite() || self.camera_near <= 0.0 {
            return Err("camera_near must be finite and > 0".to_string());
        }
        if !self.camera_far.is_finite() || self.camera_far <= self.camera_near {
            return Err("camera_far must be finite and > camera_near".to_string());
        }
        if !self.recycle_z().is_finite() || self.recycle_z() <= -self.max_depth {
            return Err("camera_z + recycle_margin must lie in front of -max_depth".to_string());
        }
        if !(0.0..=1.0).contains(&self.boost_decay) {
            return Err("boost_decay must be in [0, 1]".to_string());
        }
        if !self.boost_divisor.is_finite() || self.boost_divisor <= 0.0 {
            return Err("boost_divisor must be finite and > 0".to_string());
        }
        if !self.point_size.is_finite() || self.point_size <= 0.0 {
            return Err("point_size must be finite and > 0".to_string());
        }
        if self.sprite_size < 2 {
            return Err("sprite_size must be >= 2".to_string());
        }
        Ok(())
    }
}
