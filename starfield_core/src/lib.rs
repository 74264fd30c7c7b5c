//! Starfield page core.
//!
//! Host-independent pieces of the animated starfield background: scene
//! settings, star generation, the per-frame motion loop, the scroll velocity
//! sensor and the scroll-driven page tweens. The Bevy client drives these
//! from its schedules; tests drive them directly.

pub mod config;
pub mod device;
pub mod field;
pub mod motion;
pub mod navbar;
pub mod reveal;
pub mod scene;
pub mod scroll;
pub mod sprite;
pub mod tween;

pub use config::{DeviceProfile, StarfieldConfig};
pub use device::DeviceClass;
pub use field::StarField;
pub use motion::{FixedFrameSource, FrameReport, FrameSource, MotionController};
pub use navbar::NavbarAutoHide;
pub use reveal::SectionReveal;
pub use scene::{SceneBootstrap, Viewport};
pub use scroll::{ScrollBoost, ScrollSensor, TrackedVelocity, VelocitySource};
pub use sprite::StarSprite;
