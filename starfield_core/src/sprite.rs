/// Alpha stops of the star glow: opaque core, soft halo, transparent rim.
const GLOW_STOPS: [(f32, f32); 3] = [(0.0, 1.0), (0.5, 0.45), (1.0, 0.0)];

/// Square RGBA8 sprite used for every star. White everywhere; only alpha
/// varies, so additive blending brightens where stars overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarSprite {
    pub size: u32,
    pub rgba: Vec<u8>,
}

impl StarSprite {
    /// Radial gradient centred in a `size` x `size` texture, reaching zero
    /// alpha at the inscribed circle.
    pub fn radial(size: u32) -> Self {
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        let center = size as f32 * 0.5;

        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 + 0.5 - center;
                let dy = y as f32 + 0.5 - center;
                let t = (dx * dx + dy * dy).sqrt() / center;
                let alpha = glow_alpha(t);
                rgba.extend_from_slice(&[255, 255, 255, (alpha * 255.0).round() as u8]);
            }
        }

        Self { size, rgba }
    }

    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.rgba[((y * self.size + x) * 4 + 3) as usize]
    }
}

/// Piecewise-linear alpha for normalized radius `t` (0 centre, 1 edge).
pub fn glow_alpha(t: f32) -> f32 {
    if t <= GLOW_STOPS[0].0 {
        return GLOW_STOPS[0].1;
    }
    for pair in GLOW_STOPS.windows(2) {
        let (t0, a0) = pair[0];
        let (t1, a1) = pair[1];
        if t <= t1 {
            let f = (t - t0) / (t1 - t0);
            return a0 + (a1 - a0) * f;
        }
    }
    GLOW_STOPS[GLOW_STOPS.len() - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glow_alpha_hits_stops() {
        assert_eq!(glow_alpha(0.0), 1.0);
        assert!((glow_alpha(0.5) - 0.45).abs() < 1e-6);
        assert_eq!(glow_alpha(1.0), 0.0);
        assert_eq!(glow_alpha(1.7), 0.0);
    }

    #[test]
    fn glow_alpha_is_monotonic() {
        let mut prev = glow_alpha(0.0);
        for i in 1..=100 {
            let a = glow_alpha(i as f32 / 100.0);
            assert!(a <= prev);
            prev = a;
        }
    }

    #[test]
    fn sprite_is_bright_center_transparent_corners() {
        let sprite = StarSprite::radial(64);
        assert_eq!(sprite.rgba.len(), 64 * 64 * 4);
        assert!(sprite.alpha_at(32, 32) > 240);
        assert_eq!(sprite.alpha_at(0, 0), 0);
        assert_eq!(sprite.alpha_at(63, 63), 0);
        assert!(sprite.rgba.chunks_exact(4).all(|px| px[..3] == [255, 255, 255]));
    }

    #[test]
    fn sprite_is_symmetric() {
        let sprite = StarSprite::radial(32);
        for y in 0..32 {
            for x in 0..32 {
                assert_eq!(sprite.alpha_at(x, y), sprite.alpha_at(31 - x, y));
                assert_eq!(sprite.alpha_at(x, y), sprite.alpha_at(x, 31 - y));
            }
        }
    }
}
