use rand::SeedableRng;
use rand::rngs::StdRng;

/// Injectable random source for question generation.
///
/// `Seeded` hands out a reproducible sequence of generators: each call to
/// [`RandomSource::rng`] uses the current seed and then bumps it, so repeated
/// generations differ from each other but replay identically across runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RandomSource {
    #[default]
    Entropy,
    Seeded(u64),
}

impl RandomSource {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(seed)
    }

    /// Returns a fresh generator for one generation pass.
    pub fn rng(&mut self) -> StdRng {
        match self {
            RandomSource::Entropy => StdRng::from_rng(&mut rand::rng()),
            RandomSource::Seeded(seed) => {
                let rng = StdRng::seed_from_u64(*seed);
                *seed = seed.wrapping_add(1);
                rng
            }
        }
    }
}
