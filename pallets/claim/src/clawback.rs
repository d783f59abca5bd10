//! End of airdrop clawback.

use crate::{
    pallet::{ClaimParams, ClaimRecords, Config, Event, Pallet},
    traits::{AccountKeeper, BankKeeper, CommunityPool},
    types::Params,
    weights::WeightInfo,
    LOG_TARGET,
};
use frame_support::{
    pallet_prelude::{DispatchError, Weight},
    storage::with_storage_layer,
    traits::Get,
};
use sp_runtime::{
    traits::{Saturating, Zero},
    SaturatedConversion,
};

impl<T: Config> Pallet<T> {
    /// Ends the airdrop once the whole decay window has passed and returns
    /// the weight used.
    ///
    /// Runs every block. Either every clawback step is applied or none is.
    pub fn end_blocker(now: u64) -> Result<Weight, DispatchError> {
        let idle = T::WeightInfo::end_blocker_idle().saturating_add(T::DbWeight::get().reads(1));
        let params = ClaimParams::<T>::get();
        if !params.enable_claim || !params.is_airdrop_over(now) {
            return Ok(idle);
        }
        let used = with_storage_layer(|| Self::end_airdrop(params))?;
        Ok(idle.saturating_add(used))
    }

    /// Sweeps escrow and dormant airdrop accounts into the community pool,
    /// drops every claim record and disables claims for good.
    pub(crate) fn end_airdrop(
        mut params: Params<T::MaxDenomLen>,
    ) -> Result<Weight, DispatchError> {
        let accounts = T::AirdropAccounts::get();
        let escrow_clawback = Self::clawback_escrowed_funds(&params)?;
        let accounts_clawback = Self::clawback_empty_accounts(&params, &accounts)?;

        let removal = ClaimRecords::<T>::clear(u32::MAX, None);
        if removal.maybe_cursor.is_some() {
            return Err(DispatchError::Other("claim records left after clawback"));
        }
        params.enable_claim = false;
        ClaimParams::<T>::put(params);

        Self::deposit_event(Event::AirdropEnded {
            escrow_clawback,
            accounts_clawback,
        });
        log::info!(
            target: LOG_TARGET,
            "airdrop ended: clawed back {:?} from escrow and {:?} from airdrop accounts, removed {} claim records",
            escrow_clawback,
            accounts_clawback,
            removal.unique,
        );
        Ok(T::WeightInfo::end_airdrop(
            accounts.len().saturated_into::<u32>(),
            removal.unique,
        ))
    }

    fn clawback_escrowed_funds(
        params: &Params<T::MaxDenomLen>,
    ) -> Result<T::Balance, DispatchError> {
        let escrow = Self::account_id();
        let balance = T::Bank::balance(&escrow, &params.claim_denom);
        if balance.is_zero() {
            return Ok(balance);
        }
        T::CommunityPool::fund_community_pool(&escrow, &params.claim_denom, balance)?;
        Ok(balance)
    }

    /// Accounts that never signed a transaction lose their claim denom
    /// balance. Empty ones are pruned.
    fn clawback_empty_accounts(
        params: &Params<T::MaxDenomLen>,
        accounts: &[T::AccountId],
    ) -> Result<T::Balance, DispatchError> {
        let mut total = T::Balance::zero();
        for who in accounts {
            if !T::Accounts::account_exists(who) || T::Accounts::sequence(who) != 0 {
                continue;
            }

            let balance = T::Bank::balance(who, &params.claim_denom);
            if balance.is_zero() {
                T::Accounts::remove_account(who);
                continue;
            }

            T::CommunityPool::fund_community_pool(who, &params.claim_denom, balance)?;
            total = total.saturating_add(balance);
        }
        Ok(total)
    }
}
