/// Minimum time step used for velocity estimates (seconds).
const MIN_SAMPLE_DT: f64 = 0.001;

/// Decayed scroll-velocity magnitude that speeds up the stars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollBoost {
    value: f32,
    divisor: f32,
    max: f32,
}

impl ScrollBoost {
    pub fn new(divisor: f32, max: f32) -> Self {
        Self {
            value: 0.0,
            divisor,
            max,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Replace the boost with `|velocity| / divisor`, clamped to the max.
    pub fn apply_velocity(&mut self, velocity: f32) {
        let magnitude = velocity.abs();
        if !magnitude.is_finite() {
            self.value = self.max;
            return;
        }
        self.value = (magnitude / self.divisor).min(self.max);
    }

    pub fn decay(&mut self, factor: f32) {
        self.value *= factor;
    }
}

/// Host-provided scroll velocity estimate in px/s.
pub trait VelocitySource {
    /// Record a scroll offset observed at `now` (seconds) and return the
    /// velocity estimate at that point.
    fn sample(&mut self, offset: f32, now: f64) -> f32;
}

/// Velocity from consecutive samples: offset delta over time delta.
#[derive(Debug, Clone, Default)]
pub struct TrackedVelocity {
    last: Option<(f32, f64)>,
}

impl VelocitySource for TrackedVelocity {
    fn sample(&mut self, offset: f32, now: f64) -> f32 {
        let velocity = match self.last {
            Some((prev_offset, prev_time)) => {
                let dt = (now - prev_time).max(MIN_SAMPLE_DT);
                ((offset - prev_offset) as f64 / dt) as f32
            }
            None => 0.0,
        };
        self.last = Some((offset, now));
        velocity
    }
}

/// Observes the page scroll offset and turns velocity into boost.
#[derive(Debug, Clone)]
pub struct ScrollSensor<V = TrackedVelocity> {
    source: V,
    last_velocity: f32,
}

impl<V: VelocitySource> ScrollSensor<V> {
    pub fn new(source: V) -> Self {
        Self {
            source,
            last_velocity: 0.0,
        }
    }

    pub fn on_scroll(&mut self, offset: f32, now: f64, boost: &mut ScrollBoost) {
        self.last_velocity = self.source.sample(offset, now);
        boost.apply_velocity(self.last_velocity);
    }

    pub fn last_velocity(&self) -> f32 {
        self.last_velocity
    }
}

impl Default for ScrollSensor<TrackedVelocity> {
    fn default() -> Self {
        Self::new(TrackedVelocity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of velocities regardless of offset.
    struct Scripted(Vec<f32>);

    impl VelocitySource for Scripted {
        fn sample(&mut self, _offset: f32, _now: f64) -> f32 {
            if self.0.is_empty() {
                0.0
            } else {
                self.0.remove(0)
            }
        }
    }

    #[test]
    fn boost_is_velocity_over_divisor() {
        let mut boost = ScrollBoost::new(65.0, 40.0);
        boost.apply_velocity(-650.0);
        assert!((boost.value() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn boost_clamps_to_device_max() {
        let mut desktop = ScrollBoost::new(65.0, 40.0);
        let mut mobile = ScrollBoost::new(65.0, 25.0);
        desktop.apply_velocity(10_000.0);
        mobile.apply_velocity(10_000.0);
        assert_eq!(desktop.value(), 40.0);
        assert_eq!(mobile.value(), 25.0);
    }

    #[test]
    fn infinite_velocity_saturates() {
        let mut boost = ScrollBoost::new(65.0, 40.0);
        boost.apply_velocity(f32::INFINITY);
        assert_eq!(boost.value(), 40.0);
    }

    #[test]
    fn decay_never_increases() {
        let mut boost = ScrollBoost::new(65.0, 40.0);
        boost.apply_velocity(2000.0);
        let mut prev = boost.value();
        for _ in 0..200 {
            boost.decay(0.9);
            assert!(boost.value() <= prev);
            prev = boost.value();
        }
        assert!(prev < 1e-6);
    }

    #[test]
    fn tracked_velocity_first_sample_is_zero() {
        let mut source = TrackedVelocity::default();
        assert_eq!(source.sample(300.0, 1.0), 0.0);
    }

    #[test]
    fn tracked_velocity_uses_previous_sample() {
        let mut source = TrackedVelocity::default();
        source.sample(0.0, 0.0);
        assert!((source.sample(100.0, 0.5) - 200.0).abs() < 1e-3);
        assert!((source.sample(50.0, 1.0) + 100.0).abs() < 1e-3);
    }

    #[test]
    fn tracked_velocity_floors_time_step() {
        let mut source = TrackedVelocity::default();
        source.sample(0.0, 2.0);
        let v = source.sample(10.0, 2.0);
        assert!((v - 10_000.0).abs() < 1e-2);
    }

    #[test]
    fn sensor_writes_boost_from_injected_source() {
        let mut sensor = ScrollSensor::new(Scripted(vec![1300.0, -130.0]));
        let mut boost = ScrollBoost::new(65.0, 40.0);

        sensor.on_scroll(10.0, 0.1, &mut boost);
        assert!((boost.value() - 20.0).abs() < 1e-5);
        assert_eq!(sensor.last_velocity(), 1300.0);

        sensor.on_scroll(0.0, 0.2, &mut boost);
        assert!((boost.value() - 2.0).abs() < 1e-5);
    }
}
