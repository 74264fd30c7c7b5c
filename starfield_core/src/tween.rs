/// Easing curves for UI tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    /// Cubic ease-out: fast start, gentle settle.
    #[default]
    Power3Out,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power3Out => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
        }
    }
}

/// A single scalar animated from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub ease: Ease,
    elapsed: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration,
            ease,
            elapsed: 0.0,
        }
    }

    /// A finished tween resting at `value`.
    pub fn settled(value: f32) -> Self {
        Self::new(value, value, 0.0, Ease::Linear)
    }

    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration.max(0.0));
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }

    pub fn value(&self) -> f32 {
        let k = self.ease.apply(self.progress());
        self.from + (self.to - self.from) * k
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Restart toward `to` from wherever the tween currently is.
    pub fn retarget(&mut self, to: f32, duration: f32) {
        *self = Self::new(self.value(), to, duration, self.ease);
    }
}
