use rand::Rng;

use crate::config::StarfieldConfig;

/// Flat star buffer: `positions` holds `[x, y, z]` triples back to back and
/// `depth` holds one depth factor per star. Allocated once, never resized.
#[derive(Debug, Clone)]
pub struct StarField {
    positions: Vec<f32>,
    depth: Vec<f32>,
    half_width: f32,
    half_height: f32,
}

impl StarField {
    /// Scatter `count` stars uniformly over the field box, with
    /// `z` in `[-max_depth, 0]`.
    pub fn generate(config: &StarfieldConfig, count: usize, rng: &mut impl Rng) -> Self {
        let max_depth = config.max_depth;
        let mut positions = Vec::with_capacity(count * 3);
        let mut depth = Vec::with_capacity(count);

        for _ in 0..count {
            let z = -rng.gen::<f32>() * max_depth;
            positions.push((rng.gen::<f32>() - 0.5) * config.field_width);
            positions.push((rng.gen::<f32>() - 0.5) * config.field_height);
            positions.push(z);
            depth.push(depth_factor(z, max_depth));
        }

        Self {
            positions,
            depth,
            half_width: config.field_width * 0.5,
            half_height: config.field_height * 0.5,
        }
    }

    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn depth_factors(&self) -> &[f32] {
        &self.depth
    }

    pub fn position(&self, index: usize) -> [f32; 3] {
        let i = index * 3;
        [self.positions[i], self.positions[i + 1], self.positions[i + 2]]
    }

    /// Positions as `[x, y, z]` triples.
    pub fn iter_positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }

    /// Mutable positions zipped with the (read-only) depth factors.
    pub(crate) fn stars_mut(&mut self) -> impl Iterator<Item = (&mut [f32], f32)> + '_ {
        self.positions
            .chunks_exact_mut(3)
            .zip(self.depth.iter().copied())
    }

    /// Number of stars whose x/y have drifted outside the generation box.
    /// Recycling only resets z, so this grows slowly over long runtimes.
    pub fn lateral_overflow(&self) -> usize {
        self.positions
            .chunks_exact(3)
            .filter(|p| p[0].abs() > self.half_width || p[1].abs() > self.half_height)
            .count()
    }
}

/// `1 - |z| / max_depth`: 1 at the camera plane, 0 at the far plane.
pub fn depth_factor(z: f32, max_depth: f32) -> f32 {
    (1.0 - z.abs() / max_depth).clamp(0.0, 1.0)
}
