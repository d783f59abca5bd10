//! Governance, staking and EVM hook adapters.
//!
//! Hooks never fail their caller. A claim that errors is rolled back and
//! logged.

use crate::{
    pallet::{Config, Pallet},
    traits::{EvmHooks, GovHooks, StakingHooks},
    types::Action,
    LOG_TARGET,
};
use frame_support::{pallet_prelude::DispatchError, storage::with_storage_layer};
use sp_runtime::Perbill;

impl<T: Config> Pallet<T> {
    fn claim_from_hook(who: &T::AccountId, action: Action) {
        let result = with_storage_layer::<_, DispatchError, _>(|| {
            Self::claim_coins_for_action(who, action)
        });
        if let Err(err) = result {
            log::error!(
                target: LOG_TARGET,
                "failed to claim {:?} for {:?}: {:?}",
                action,
                who,
                err,
            );
        }
    }
}

impl<T: Config> GovHooks<T::AccountId> for Pallet<T> {
    fn after_proposal_submission(_proposal_id: u64) {}

    fn after_proposal_deposit(_proposal_id: u64, _depositor: &T::AccountId) {}

    fn after_proposal_vote(_proposal_id: u64, voter: &T::AccountId) {
        Self::claim_from_hook(voter, Action::Vote);
    }

    fn after_proposal_failed_min_deposit(_proposal_id: u64) {}

    fn after_proposal_voting_period_ended(_proposal_id: u64) {}
}

impl<T: Config, ValidatorId> StakingHooks<T::AccountId, ValidatorId> for Pallet<T> {
    fn after_validator_created(_validator: &ValidatorId) {}

    fn before_validator_modified(_validator: &ValidatorId) {}

    fn after_validator_removed(_consensus: &T::AccountId, _validator: &ValidatorId) {}

    fn after_validator_bonded(_consensus: &T::AccountId, _validator: &ValidatorId) {}

    fn after_validator_begin_unbonding(_consensus: &T::AccountId, _validator: &ValidatorId) {}

    fn before_delegation_created(_delegator: &T::AccountId, _validator: &ValidatorId) {}

    fn before_delegation_shares_modified(_delegator: &T::AccountId, _validator: &ValidatorId) {}

    fn before_delegation_removed(_delegator: &T::AccountId, _validator: &ValidatorId) {}

    fn after_delegation_modified(delegator: &T::AccountId, _validator: &ValidatorId) {
        Self::claim_from_hook(delegator, Action::Delegate);
    }

    fn before_validator_slashed(_validator: &ValidatorId, _fraction: Perbill) {}
}

impl<T: Config> EvmHooks<T::AccountId> for Pallet<T> {
    fn post_tx_processing(from: &T::AccountId, _to: Option<&T::AccountId>) {
        Self::claim_from_hook(from, Action::Evm);
    }
}
