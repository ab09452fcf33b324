//! Random point generation.
//!
//! Uniform `[0, 1)` features, the same distribution the kNN solver draws its
//! inputs from. Seeded generation is reproducible across runs.

use crate::data_format::PointSet;
use crate::types::Scalar;
use rand::distributions::{Distribution, Standard};
use rand::prelude::*;

/// Generator of random point sets.
pub struct RandomPointGenerator {
    rng: StdRng,
}

impl RandomPointGenerator {
    /// Create a new generator with a random seed.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a new generator with a specific seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw `num_points` points of `dimensionality` uniform `[0, 1)` features.
    pub fn point_set<T>(&mut self, num_points: usize, dimensionality: usize) -> PointSet<T>
    where
        T: Scalar,
        Standard: Distribution<T>,
    {
        let data: Vec<T> = (0..num_points * dimensionality)
            .map(|_| self.rng.gen())
            .collect();
        PointSet::from_rows_unchecked(data, num_points, dimensionality)
    }
}

impl Default for RandomPointGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw a random point set, seeded when `seed` is given.
pub fn random_point_set<T>(num_points: usize, dimensionality: usize, seed: Option<u64>) -> PointSet<T>
where
    T: Scalar,
    Standard: Distribution<T>,
{
    let mut generator = match seed {
        Some(s) => RandomPointGenerator::with_seed(s),
        None => RandomPointGenerator::new(),
    };
    generator.point_set(num_points, dimensionality)
}
