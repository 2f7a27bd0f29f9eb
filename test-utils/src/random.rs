use std::{num::ParseIntError, ops::RangeBounds, str::FromStr};

pub use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaChaRng;
use rstest::fixture;

/// Replays a failed run when set to the seed it printed
const SEED_ENV_VAR: &str = "DATASET_TEST_SEED";

#[derive(Debug, Copy, Clone)]
pub struct Seed(pub u64);

impl Seed {
    #[must_use]
    pub fn from_entropy() -> Self {
        rand::rng().next_u64().into()
    }

    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn print_with_decoration(&self, test_name: &str) {
        println!("{test_name} seed: {}", self.0);
    }
}

impl FromStr for Seed {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<u64> for Seed {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Deterministic generator, reproducible from the printed [`Seed`]
#[derive(Debug, Clone)]
pub struct TestRng(ChaChaRng);

impl TestRng {
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        Self(ChaChaRng::seed_from_u64(seed.as_u64()))
    }
}

impl RngCore for TestRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest);
    }
}

fn range_to_random_size(rng: &mut impl Rng, size: impl RangeBounds<usize>) -> usize {
    let start = match size.start_bound() {
        std::ops::Bound::Included(&n) => n,
        std::ops::Bound::Excluded(&n) => n + 1,
        std::ops::Bound::Unbounded => 0,
    };
    let end = match size.end_bound() {
        std::ops::Bound::Included(&n) => n + 1,
        std::ops::Bound::Excluded(&n) => n,
        std::ops::Bound::Unbounded => usize::MAX,
    };
    rng.random_range(start..end)
}

pub fn gen_random_bytes(rng: &mut impl Rng, size: impl RangeBounds<usize>) -> Vec<u8> {
    let mut bytes = vec![0; range_to_random_size(rng, size)];
    rng.fill_bytes(&mut bytes);
    bytes
}

#[fixture]
pub fn random_seed() -> Seed {
    let seed = std::env::var(SEED_ENV_VAR).map_or_else(
        |_| Seed::from_entropy(),
        |s| s.parse().expect("seed must be a u64"),
    );
    seed.print_with_decoration("random");
    seed
}

#[fixture]
pub fn rng(random_seed: Seed) -> TestRng {
    TestRng::new(random_seed)
}

#[fixture]
pub fn random_bytes(mut rng: TestRng) -> Vec<u8> {
    gen_random_bytes(&mut rng, 100..1000)
}
