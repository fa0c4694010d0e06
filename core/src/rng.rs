//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through StreamRng instances derived from the
//! single master seed of the run. Randomness here is cosmetic only
//! (member names, task display colors); scheduling and phase
//! advancement never consult it.
//!
//! Each stream gets its own RNG, seeded deterministically from
//! (master_seed XOR stream_index). Adding a new stream never changes
//! existing streams.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single cosmetic stream.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream RNG from the master seed and a stable stream
    /// index. The index must never change once assigned.
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }
}

/// All stream RNGs for a single run, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_stream(&self, slot: StreamSlot) -> StreamRng {
        StreamRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries, only append.
/// Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    MemberNames = 0,
    TaskColors  = 1,
    // Add new streams here, append only.
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MemberNames => "member_names",
            Self::TaskColors  => "task_colors",
        }
    }
}
