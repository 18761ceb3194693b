use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::SeedableRng;
use rand::rngs::StdRng;

const RNG_SEED: u64 = 0x5EED_2026;

/// Sampling budget of a benchmark group, picked from the input length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimePreset {
    Small,
    Medium,
    Large,
}

impl RuntimePreset {
    const SMALL_MAX_LEN: usize = 16_384;
    const MEDIUM_MAX_LEN: usize = 262_144;

    pub fn for_len(len: usize) -> Self {
        if len <= Self::SMALL_MAX_LEN {
            Self::Small
        } else if len <= Self::MEDIUM_MAX_LEN {
            Self::Medium
        } else {
            Self::Large
        }
    }

    /// `(sample size, warm-up ms, measurement ms)`.
    fn budget(self) -> (usize, u64, u64) {
        match self {
            Self::Small => (15, 100, 200),
            Self::Medium => (15, 500, 1000),
            Self::Large => (10, 800, 1500),
        }
    }

    pub fn apply<M: Measurement>(self, group: &mut BenchmarkGroup<'_, M>) {
        let (samples, warm_up_ms, measure_ms) = self.budget();
        group.sample_size(samples);
        group.warm_up_time(Duration::from_millis(warm_up_ms));
        group.measurement_time(Duration::from_millis(measure_ms));
    }
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}
