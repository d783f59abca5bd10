//! Collaborator implementations over the FRAME stack.

use crate::{
    pallet::{Config, Error},
    traits::{AccountKeeper, BankKeeper, CommunityPool},
    LOG_TARGET,
};
use core::marker::PhantomData;
use frame_support::{
    ensure,
    pallet_prelude::{DispatchError, DispatchResult},
    traits::{Currency, ExistenceRequirement, Get, Imbalance},
};
use sp_runtime::{traits::Zero, SaturatedConversion, TokenError};

// =========================================================
// Bank
// =========================================================

/// Single-denom bank over a `Currency`. Only `NativeDenom` has a balance;
/// anything else reads as zero and cannot be moved.
pub struct NativeBank<T, C, NativeDenom>(PhantomData<(T, C, NativeDenom)>);

impl<T, C, NativeDenom> BankKeeper<T::AccountId> for NativeBank<T, C, NativeDenom>
where
    T: Config,
    C: Currency<T::AccountId>,
    NativeDenom: Get<&'static [u8]>,
{
    type Balance = C::Balance;

    fn balance(who: &T::AccountId, denom: &[u8]) -> Self::Balance {
        if denom == NativeDenom::get() {
            C::free_balance(who)
        } else {
            Zero::zero()
        }
    }

    fn transfer(
        from: &T::AccountId,
        to: &T::AccountId,
        denom: &[u8],
        amount: Self::Balance,
    ) -> DispatchResult {
        ensure!(denom == NativeDenom::get(), Error::<T>::UnsupportedDenom);
        C::transfer(from, to, amount, ExistenceRequirement::AllowDeath)
    }

    fn minimum_balance() -> Self::Balance {
        C::minimum_balance()
    }

    fn mint(who: &T::AccountId, denom: &[u8], amount: Self::Balance) -> DispatchResult {
        ensure!(denom == NativeDenom::get(), Error::<T>::UnsupportedDenom);
        let minted = C::deposit_creating(who, amount);
        ensure!(
            minted.peek() == amount,
            DispatchError::Token(TokenError::BelowMinimum)
        );
        Ok(())
    }
}

// =========================================================
// Accounts
// =========================================================

/// Account metadata from `frame_system`.
pub struct SystemAccounts<T>(PhantomData<T>);

impl<T: frame_system::Config> AccountKeeper<T::AccountId> for SystemAccounts<T> {
    fn account_exists(who: &T::AccountId) -> bool {
        frame_system::Pallet::<T>::account_exists(who)
    }

    fn sequence(who: &T::AccountId) -> u64 {
        frame_system::Pallet::<T>::account_nonce(who).saturated_into::<u64>()
    }

    /// Drops the last provider reference, which reaps the account through
    /// `frame_system`. Accounts that still hold data or are referenced by
    /// another pallet are kept.
    fn remove_account(who: &T::AccountId) {
        let info = frame_system::Account::<T>::get(who);
        let referenced = info.consumers > 0 || info.sufficients > 0 || info.providers != 1;
        if referenced || info.data != T::AccountData::default() {
            log::debug!(target: LOG_TARGET, "keeping account {:?}", who);
            return;
        }
        if let Err(err) = frame_system::Pallet::<T>::dec_providers(who) {
            log::warn!(target: LOG_TARGET, "failed to prune {:?}: {:?}", who, err);
        }
    }
}

// =========================================================
// Community Pool
// =========================================================

/// Community pool kept as a plain account, funded by bank transfer.
pub struct PoolAccount<Bank, Pool>(PhantomData<(Bank, Pool)>);

impl<AccountId, Bank, Pool> CommunityPool<AccountId, Bank::Balance> for PoolAccount<Bank, Pool>
where
    Bank: BankKeeper<AccountId>,
    Pool: Get<AccountId>,
{
    fn fund_community_pool(from: &AccountId, denom: &[u8], amount: Bank::Balance) -> DispatchResult {
        Bank::transfer(from, &Pool::get(), denom, amount)
    }
}
