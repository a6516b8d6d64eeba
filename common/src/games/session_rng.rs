use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded generator owned by one game, so a seed reproduces a whole run.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    pub fn random_bool(&mut self) -> bool {
        self.rng.random()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SessionRng::new(99);
        let mut b = SessionRng::new(99);
        let left: Vec<u32> = (0..20).map(|_| a.random_range(0..1000)).collect();
        let right: Vec<u32> = (0..20).map(|_| b.random_range(0..1000)).collect();
        assert_eq!(left, right);
        assert_eq!(a.seed(), 99);
    }
}
