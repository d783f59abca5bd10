//! Claim engine.

use crate::{
    decay,
    pallet::{ClaimParams, ClaimRecords, Config, Error, Event, Pallet},
    traits::{BankKeeper, CommunityPool},
    types::{Action, ClaimRecord, Params},
    LOG_TARGET,
};
use frame_support::{ensure, pallet_prelude::DispatchError, storage::with_storage_layer};
use sp_runtime::traits::Zero;

impl<T: Config> Pallet<T> {
    /// Pays out `who`'s share for `action`.
    ///
    /// Returns zero without touching state when claims are disabled or not yet
    /// started, when `who` has no record, or when the action was already
    /// claimed or has fully decayed.
    pub fn claim_coins_for_action(
        who: &T::AccountId,
        action: Action,
    ) -> Result<T::Balance, DispatchError> {
        ensure!(action.is_claimable(), Error::<T>::InvalidAction);

        let params = ClaimParams::<T>::get();
        if !params.enable_claim || Self::now() < params.airdrop_start_time {
            return Ok(Zero::zero());
        }
        let Some(record) = ClaimRecords::<T>::get(who) else {
            return Ok(Zero::zero());
        };

        Self::claim_with_record(who, record, action, &params)
    }

    /// Claims `action` against `record` and stores the result under `who`,
    /// whether or not `record` was previously stored there.
    pub(crate) fn claim_with_record(
        who: &T::AccountId,
        mut record: ClaimRecord<T::Balance>,
        action: Action,
        params: &Params<T::MaxDenomLen>,
    ) -> Result<T::Balance, DispatchError> {
        ensure!(action.is_claimable(), Error::<T>::InvalidAction);

        let now = Self::now();
        if !params.enable_claim || now < params.airdrop_start_time {
            return Ok(Zero::zero());
        }
        if record.has_claimed_action(action) {
            return Ok(Zero::zero());
        }

        let (amount, remainder) = decay::claimable_and_remainder(&record, action, params, now);
        if amount.is_zero() {
            return Ok(Zero::zero());
        }

        with_storage_layer(|| -> Result<(), DispatchError> {
            Self::pay_out(who, amount, remainder, params)?;
            record.mark_claimed(action);
            Self::store_record(who, record);
            Ok(())
        })?;

        Self::deposit_event(Event::Claimed {
            who: who.clone(),
            amount,
            action,
        });
        log::debug!(
            target: LOG_TARGET,
            "claimed {:?} for {:?}: {:?} paid, {:?} decayed",
            action,
            who,
            amount,
            remainder,
        );

        Ok(amount)
    }

    /// Moves `amount` from escrow to `who` and the decayed `remainder` to the
    /// community pool.
    pub(crate) fn pay_out(
        who: &T::AccountId,
        amount: T::Balance,
        remainder: T::Balance,
        params: &Params<T::MaxDenomLen>,
    ) -> Result<(), DispatchError> {
        let escrow = Self::account_id();
        if !amount.is_zero() {
            T::Bank::transfer(&escrow, who, &params.claim_denom, amount)?;
        }
        if !remainder.is_zero() {
            T::CommunityPool::fund_community_pool(&escrow, &params.claim_denom, remainder)?;
        }
        Ok(())
    }

    /// Persists `record`, or drops it once every action is claimed.
    pub(crate) fn store_record(who: &T::AccountId, record: ClaimRecord<T::Balance>) {
        if record.has_claimed_all() {
            ClaimRecords::<T>::remove(who);
        } else {
            ClaimRecords::<T>::insert(who, record);
        }
    }
}
