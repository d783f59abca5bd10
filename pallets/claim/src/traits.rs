//! Interfaces to the collaborators the claim pallet drives, and the hook
//! surfaces it exposes to the rest of the runtime.

use frame_support::pallet_prelude::*;
use sp_runtime::Perbill;

// =========================================================
// Bank / Accounts / Community Pool
// =========================================================

/// Multi-denom balance keeper.
pub trait BankKeeper<AccountId> {
    type Balance;

    /// Spendable balance of `who` in `denom`.
    fn balance(who: &AccountId, denom: &[u8]) -> Self::Balance;

    fn transfer(
        from: &AccountId,
        to: &AccountId,
        denom: &[u8],
        amount: Self::Balance,
    ) -> DispatchResult;

    /// Smallest balance an account must keep to stay alive. Zero for banks
    /// without existential deposits.
    fn minimum_balance() -> Self::Balance;

    /// Creates `amount` of `denom` out of thin air. Only genesis uses this.
    fn mint(who: &AccountId, denom: &[u8], amount: Self::Balance) -> DispatchResult;
}

/// Account metadata the clawback inspects.
pub trait AccountKeeper<AccountId> {
    fn account_exists(who: &AccountId) -> bool;

    /// Number of transactions the account has signed.
    fn sequence(who: &AccountId) -> u64;

    fn remove_account(who: &AccountId);
}

/// Destination of everything clawed back.
pub trait CommunityPool<AccountId, Balance> {
    fn fund_community_pool(from: &AccountId, denom: &[u8], amount: Balance) -> DispatchResult;
}

/// Resolves the textual address carried in a transfer packet.
pub trait AddressMapping<AccountId> {
    fn into_account_id(address: &str) -> Option<AccountId>;
}

// =========================================================
// Hooks exposed by the claim pallet
// =========================================================

/// Governance lifecycle notifications.
pub trait GovHooks<AccountId> {
    fn after_proposal_submission(proposal_id: u64);
    fn after_proposal_deposit(proposal_id: u64, depositor: &AccountId);
    fn after_proposal_vote(proposal_id: u64, voter: &AccountId);
    fn after_proposal_failed_min_deposit(proposal_id: u64);
    fn after_proposal_voting_period_ended(proposal_id: u64);
}

/// Staking lifecycle notifications.
pub trait StakingHooks<AccountId, ValidatorId> {
    fn after_validator_created(validator: &ValidatorId);
    fn before_validator_modified(validator: &ValidatorId);
    fn after_validator_removed(consensus: &AccountId, validator: &ValidatorId);
    fn after_validator_bonded(consensus: &AccountId, validator: &ValidatorId);
    fn after_validator_begin_unbonding(consensus: &AccountId, validator: &ValidatorId);
    fn before_delegation_created(delegator: &AccountId, validator: &ValidatorId);
    fn before_delegation_shares_modified(delegator: &AccountId, validator: &ValidatorId);
    fn before_delegation_removed(delegator: &AccountId, validator: &ValidatorId);
    fn after_delegation_modified(delegator: &AccountId, validator: &ValidatorId);
    fn before_validator_slashed(validator: &ValidatorId, fraction: Perbill);
}

/// Called after every successfully executed EVM transaction.
pub trait EvmHooks<AccountId> {
    fn post_tx_processing(from: &AccountId, to: Option<&AccountId>);
}

/// Fungible transfer middleware callbacks.
pub trait TransferCallbacks {
    type Packet;
    type Acknowledgement;

    fn on_recv_packet(packet: &Self::Packet, ack: Self::Acknowledgement)
        -> Self::Acknowledgement;

    fn on_acknowledgement_packet(packet: &Self::Packet, acknowledgement: &[u8]) -> DispatchResult;
}
