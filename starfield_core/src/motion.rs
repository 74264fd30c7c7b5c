use crate::config::StarfieldConfig;
use crate::device::DeviceClass;
use crate::field::StarField;
use crate::scroll::ScrollBoost;

/// Per-star motion constants, resolved from config and device class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub base_speed: f32,
    pub velocity_gain: f32,
    pub depth_gain: f32,
    pub drift_x: f32,
    pub drift_y: f32,
    pub boost_decay: f32,
    pub max_depth: f32,
    pub recycle_z: f32,
}

impl MotionParams {
    pub fn new(config: &StarfieldConfig, device: DeviceClass) -> Self {
        Self {
            base_speed: config.profile(device).base_speed,
            velocity_gain: config.velocity_gain,
            depth_gain: config.depth_gain,
            drift_x: config.drift_x,
            drift_y: config.drift_y,
            boost_decay: config.boost_decay,
            max_depth: config.max_depth,
            recycle_z: config.recycle_z(),
        }
    }

    /// z advance for one frame.
    pub fn speed(&self, boost: f32, depth: f32) -> f32 {
        self.base_speed + boost * depth * self.velocity_gain + depth * self.depth_gain
    }
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub boost: f32,
    pub recycled: usize,
    /// Positions changed and must be re-uploaded before rendering
    pub positions_dirty: bool,
}

/// Source of display-refresh ticks. Returns the elapsed seconds since the
/// previous frame, or `None` once the host stops driving frames.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<f64>;
}

/// A fixed number of equally spaced frames.
#[derive(Debug, Clone)]
pub struct FixedFrameSource {
    dt: f64,
    remaining: u64,
}

impl FixedFrameSource {
    pub fn new(frames: u64, dt: f64) -> Self {
        Self {
            dt,
            remaining: frames,
        }
    }
}

impl FrameSource for FixedFrameSource {
    fn next_frame(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.dt)
    }
}

/// Owns the star buffer and scroll boost; advances them once per frame.
#[derive(Debug, Clone)]
pub struct MotionController {
    field: StarField,
    boost: ScrollBoost,
    params: MotionParams,
    frame: u64,
    elapsed: f64,
}

impl MotionController {
    pub fn new(config: &StarfieldConfig, device: DeviceClass, field: StarField) -> Self {
        let params = MotionParams::new(config, device);
        let boost = ScrollBoost::new(config.boost_divisor, config.profile(device).boost_max);
        tracing::debug!(
            stars = field.len(),
            base_speed = params.base_speed,
            boost_max = boost.max(),
            "motion controller ready"
        );
        Self {
            field,
            boost,
            params,
            frame: 0,
            elapsed: 0.0,
        }
    }

    pub fn field(&self) -> &StarField {
        &self.field
    }

    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    pub fn boost(&self) -> &ScrollBoost {
        &self.boost
    }

    pub fn boost_mut(&mut self) -> &mut ScrollBoost {
        &mut self.boost
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advance one display frame. Star motion is per frame; `elapsed_secs`
    /// only feeds the frame clock.
    pub fn tick(&mut self, elapsed_secs: f64) -> FrameReport {
        self.boost.decay(self.params.boost_decay);
        let boost = self.boost.value();
        let params = self.params;
        let mut recycled = 0;

        for (p, depth) in self.field.stars_mut() {
            p[2] += params.speed(boost, depth);
            p[0] += params.drift_x * depth;
            p[1] += params.drift_y * depth;

            if p[2] > params.recycle_z {
                p[2] = -params.max_depth;
                recycled += 1;
            }
        }

        self.frame += 1;
        self.elapsed += elapsed_secs.max(0.0);
        if recycled > 0 {
            tracing::trace!(frame = self.frame, recycled, "recycled stars");
        }

        FrameReport {
            frame: self.frame,
            boost,
            recycled,
            positions_dirty: !self.field.is_empty(),
        }
    }

    /// Drive ticks from `source` until it is exhausted, rendering after each.
    pub fn run<S, R>(&mut self, source: &mut S, mut render: R) -> u64
    where
        S: FrameSource,
        R: FnMut(&StarField, &FrameReport),
    {
        let mut frames = 0;
        while let Some(dt) = source.next_frame() {
            let report = self.tick(dt);
            render(&self.field, &report);
            frames += 1;
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DT: f64 = 1.0 / 60.0;

    fn controller(device: DeviceClass, count: usize) -> MotionController {
        let config = StarfieldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let field = StarField::generate(&config, count, &mut rng);
        MotionController::new(&config, device, field)
    }

    #[test]
    fn idle_advance_is_base_plus_depth_gain() {
        let mut ctl = controller(DeviceClass::Desktop, 200);
        let before: Vec<[f32; 3]> = ctl.field().iter_positions().collect();
        let report = ctl.tick(DT);
        assert_eq!(report.boost, 0.0);

        for (i, [_, _, z]) in ctl.field().iter_positions().enumerate() {
            let d = ctl.field().depth_factors()[i];
            let expected = before[i][2] + 3.2 + d * 0.8;
            if expected > 330.0 {
                assert_eq!(z, -2500.0);
            } else {
                assert!((z - expected).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn mobile_uses_slower_base_speed() {
        let ctl = controller(DeviceClass::Mobile, 1);
        assert_eq!(ctl.params().base_speed, 2.6);
        assert!((ctl.params().speed(0.0, 0.5) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn boost_adds_depth_scaled_speed() {
        let ctl = controller(DeviceClass::Desktop, 1);
        let speed = ctl.params().speed(10.0, 0.5);
        assert!((speed - (3.2 + 10.0 * 0.5 * 1.2 + 0.5 * 0.8)).abs() < 1e-5);
    }

    #[test]
    fn boost_decays_each_frame() {
        let mut ctl = controller(DeviceClass::Desktop, 10);
        ctl.boost_mut().apply_velocity(1300.0);
        assert!((ctl.boost().value() - 20.0).abs() < 1e-5);

        let report = ctl.tick(DT);
        assert!((report.boost - 18.0).abs() < 1e-4);
        let report = ctl.tick(DT);
        assert!((report.boost - 16.2).abs() < 1e-4);
    }

    #[test]
    fn depth_factors_never_change() {
        let mut ctl = controller(DeviceClass::Desktop, 300);
        let depth = ctl.field().depth_factors().to_vec();
        ctl.boost_mut().apply_velocity(5000.0);
        for _ in 0..2000 {
            ctl.tick(DT);
        }
        assert_eq!(ctl.field().depth_factors(), depth.as_slice());
    }

    #[test]
    fn z_stays_in_range_and_count_is_constant() {
        let mut ctl = controller(DeviceClass::Mobile, 1600);
        let mut total_recycled = 0;
        for i in 0..3000 {
            if i % 50 == 0 {
                ctl.boost_mut().apply_velocity(4000.0);
            }
            total_recycled += ctl.tick(DT).recycled;
            for [_, _, z] in ctl.field().iter_positions() {
                assert!((-2500.0..=330.0).contains(&z));
            }
        }
        assert_eq!(ctl.field().len(), 1600);
        assert!(total_recycled > 0);
    }

    #[test]
    fn recycling_resets_only_z() {
        let mut ctl = controller(DeviceClass::Desktop, 400);
        loop {
            let before: Vec<[f32; 3]> = ctl.field().iter_positions().collect();
            let report = ctl.tick(DT);
            if report.recycled == 0 {
                continue;
            }
            for (i, [x, y, z]) in ctl.field().iter_positions().enumerate() {
                if z == -2500.0 && before[i][2] > 0.0 {
                    let d = ctl.field().depth_factors()[i];
                    assert!((x - (before[i][0] + 0.02 * d)).abs() < 1e-4);
                    assert!((y - (before[i][1] + 0.01 * d)).abs() < 1e-4);
                }
            }
            break;
        }
    }

    #[test]
    fn run_drives_fixed_frames() {
        let mut ctl = controller(DeviceClass::Desktop, 16);
        let mut source = FixedFrameSource::new(120, DT);
        let mut rendered = 0;
        let frames = ctl.run(&mut source, |field, report| {
            assert_eq!(field.len(), 16);
            assert!(report.positions_dirty);
            rendered += 1;
        });
        assert_eq!(frames, 120);
        assert_eq!(rendered, 120);
        assert_eq!(ctl.frame(), 120);
        assert!((ctl.elapsed() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn lateral_drift_accumulates_without_reset() {
        let mut ctl = controller(DeviceClass::Desktop, 50);
        let start: Vec<[f32; 3]> = ctl.field().iter_positions().collect();
        for _ in 0..1000 {
            ctl.tick(DT);
        }
        for (i, [x, y, _]) in ctl.field().iter_positions().enumerate() {
            let d = ctl.field().depth_factors()[i];
            assert!((x - (start[i][0] + 1000.0 * 0.02 * d)).abs() < 0.05);
            assert!((y - (start[i][1] + 1000.0 * 0.01 * d)).abs() < 0.05);
        }
    }
}
