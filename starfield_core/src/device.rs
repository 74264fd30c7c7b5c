use crate::config::StarfieldConfig;

/// Coarse device classification, decided once from the viewport width at
/// startup. Mobile doubles as the "low-power" flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    pub fn from_viewport_width(width: f32, config: &StarfieldConfig) -> Self {
        if width < config.mobile_width_threshold {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn is_low_power(self) -> bool {
        self == DeviceClass::Mobile
    }
}

/// Clamp the host's device pixel ratio to the device cap. Non-finite or
/// non-positive ratios fall back to 1.
pub fn clamp_pixel_ratio(device_pixel_ratio: f32, cap: f32) -> f32 {
    if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
        return 1.0_f32.min(cap);
    }
    device_pixel_ratio.min(cap)
}
