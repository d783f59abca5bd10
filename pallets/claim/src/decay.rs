//! Time decay of per-action claim shares.
//!
//! An allocation is split evenly across the claimable actions. Each share is
//! payable in full until `airdrop_start_time + duration_until_decay`, then
//! shrinks linearly to zero over `duration_of_decay`. The scaled value is
//! rounded half-up.

use crate::types::{Action, ClaimRecord, Params};
use frame_support::traits::Get;
use sp_runtime::{
    helpers_128bit::multiply_by_rational_with_rounding,
    traits::{AtLeast32BitUnsigned, Zero},
    Rounding, SaturatedConversion,
};

/// Share of `record` payable for `action` at `now`.
///
/// Completion flags are not consulted; callers decide whether the action is
/// still open.
pub fn claimable_amount_for_action<Balance, MaxDenomLen>(
    record: &ClaimRecord<Balance>,
    action: Action,
    params: &Params<MaxDenomLen>,
    now: u64,
) -> Balance
where
    Balance: AtLeast32BitUnsigned + Copy,
    MaxDenomLen: Get<u32>,
{
    claimable_and_remainder(record, action, params, now).0
}

/// Payable share and the part of it lost to decay so far.
pub fn claimable_and_remainder<Balance, MaxDenomLen>(
    record: &ClaimRecord<Balance>,
    action: Action,
    params: &Params<MaxDenomLen>,
    now: u64,
) -> (Balance, Balance)
where
    Balance: AtLeast32BitUnsigned + Copy,
    MaxDenomLen: Get<u32>,
{
    let zero = (Zero::zero(), Zero::zero());
    if !action.is_claimable() || record.initial_claimable_amount.is_zero() {
        return zero;
    }

    let elapsed = now.saturating_sub(params.airdrop_start_time);
    let window = params
        .duration_until_decay
        .saturating_add(params.duration_of_decay);
    if elapsed > window {
        return zero;
    }

    let per_action = record.amount_per_action();
    if elapsed <= params.duration_until_decay {
        return (per_action, Zero::zero());
    }

    // 0 < decay_time <= duration_of_decay, hence duration_of_decay > 0.
    let decay_time = elapsed - params.duration_until_decay;
    let remaining = params.duration_of_decay - decay_time;
    let claimable = multiply_by_rational_with_rounding(
        per_action.saturated_into::<u128>(),
        remaining as u128,
        params.duration_of_decay as u128,
        Rounding::NearestPrefUp,
    )
    .map(|amount| amount.saturated_into::<Balance>())
    .unwrap_or_else(Zero::zero);

    (claimable, per_action.saturating_sub(claimable))
}
