//! Claim pallet weight stubs.
//!
//! Placeholder values until the pallet is benchmarked.

use frame_support::weights::Weight;

pub trait WeightInfo {
    fn update_params() -> Weight;
    /// Clawback trigger check, paid every block.
    fn end_blocker_idle() -> Weight;
    /// Clawback over `a` airdrop accounts and `r` claim records.
    fn end_airdrop(a: u32, r: u32) -> Weight;
}

impl WeightInfo for () {
    fn update_params() -> Weight {
        Weight::from_parts(10_000, 0)
    }

    fn end_blocker_idle() -> Weight {
        Weight::from_parts(5_000, 0)
    }

    fn end_airdrop(a: u32, r: u32) -> Weight {
        Weight::from_parts(20_000, 0)
            .saturating_add(Weight::from_parts(15_000, 0).saturating_mul(a as u64))
            .saturating_add(Weight::from_parts(5_000, 0).saturating_mul(r as u64))
    }
}
