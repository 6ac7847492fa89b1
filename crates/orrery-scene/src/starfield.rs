//! Background starfield: a fixed point cloud sampled uniformly in a cube
//! centred on the origin.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic starfield for a given seed.
#[derive(Debug, Clone, Copy)]
pub struct StarfieldGenerator {
    seed: u64,
    star_count: u32,
    half_extent: f32,
}

impl StarfieldGenerator {
    pub fn new(seed: u64, star_count: u32, half_extent: f32) -> Self {
        Self {
            seed,
            star_count,
            half_extent,
        }
    }

    /// Star positions, each component uniform in `[-half_extent, half_extent)`.
    pub fn generate(&self) -> Vec<Vec3> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let side = self.half_extent * 2.0;
        (0..self.star_count)
            .map(|_| {
                Vec3::new(
                    (rng.random::<f32>() - 0.5) * side,
                    (rng.random::<f32>() - 0.5) * side,
                    (rng.random::<f32>() - 0.5) * side,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_bounds() {
        let stars = StarfieldGenerator::new(1, 10_000, 1000.0).generate();
        assert_eq!(stars.len(), 10_000);
        assert!(stars.iter().all(|s| s.abs().max_element() <= 1000.0));
    }

    #[test]
    fn test_same_seed_same_stars() {
        let a = StarfieldGenerator::new(99, 64, 10.0).generate();
        let b = StarfieldGenerator::new(99, 64, 10.0).generate();
        let c = StarfieldGenerator::new(100, 64, 10.0).generate();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_fills_the_whole_cube() {
        let stars = StarfieldGenerator::new(7, 5000, 1000.0).generate();
        // Every octant gets a share of a uniform sample.
        let mut octants = [0u32; 8];
        for s in &stars {
            let i = (s.x > 0.0) as usize | ((s.y > 0.0) as usize) << 1 | ((s.z > 0.0) as usize) << 2;
            octants[i] += 1;
        }
        assert!(octants.iter().all(|&n| n > 400), "{octants:?}");
    }
}
