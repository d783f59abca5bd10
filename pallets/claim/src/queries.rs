//! Read-only views used by RPC and chain-spec export.

use crate::{
    decay,
    pallet::{ClaimParams, ClaimRecords, Config, Pallet},
    traits::BankKeeper,
    types::{Action, ClaimRecord, Params},
};
use alloc::vec::Vec;
use sp_runtime::traits::{Saturating, Zero};

impl<T: Config> Pallet<T> {
    /// Claim denom held in escrow for open claims, not counting the reserve
    /// that keeps the escrow account alive.
    pub fn total_unclaimed() -> T::Balance {
        let params = ClaimParams::<T>::get();
        T::Bank::balance(&Self::account_id(), &params.claim_denom)
            .saturating_sub(T::Bank::minimum_balance())
    }

    pub fn params() -> Params<T::MaxDenomLen> {
        ClaimParams::<T>::get()
    }

    pub fn claim_record(who: &T::AccountId) -> Option<ClaimRecord<T::Balance>> {
        ClaimRecords::<T>::get(who)
    }

    /// What `who` would receive for completing `action` right now.
    pub fn claimable_for_action(who: &T::AccountId, action: Action) -> T::Balance {
        let params = ClaimParams::<T>::get();
        let now = Self::now();
        if !params.is_claim_active(now) {
            return Zero::zero();
        }
        match ClaimRecords::<T>::get(who) {
            Some(record) if !record.has_claimed_action(action) => {
                decay::claimable_amount_for_action(&record, action, &params, now)
            }
            _ => Zero::zero(),
        }
    }

    /// Sum of `claimable_for_action` over every action.
    pub fn total_claimable(who: &T::AccountId) -> T::Balance {
        Action::ALL
            .iter()
            .fold(Zero::zero(), |total: T::Balance, action| {
                total.saturating_add(Self::claimable_for_action(who, *action))
            })
    }

    /// Every stored record, in storage order.
    pub fn claim_records() -> Vec<(T::AccountId, ClaimRecord<T::Balance>)> {
        ClaimRecords::<T>::iter().collect()
    }
}
