//! Seeded randomness for router-construction policies.
//!
//! Routing itself is deterministic.  The only random decision is made per
//! router instance: whether the stop-discouragement surcharge is on.  It is
//! drawn from a `SimRng` the caller owns, so a run replays from its seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded generator, owned by whoever builds routers.
pub struct SimRng {
    rng: SmallRng,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    #[inline]
    pub fn coin_flip(&mut self) -> bool {
        self.rng.r#gen()
    }
}
