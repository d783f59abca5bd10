//! # Claim Pallet
//!
//! Action-gated, time-decayed airdrop distribution.
//!
//! ## Overview
//!
//! Every airdrop recipient holds a [`ClaimRecord`]: an initial allocation split
//! evenly over four actions (governance vote, delegation, EVM transaction and
//! IBC transfer). Completing an action pays out that action's share from the
//! pallet escrow account. Shares are payable in full during a grace window and
//! decay linearly to zero afterwards.
//!
//! This pallet manages:
//! - Claim records and the airdrop parameters
//! - Hook adapters for governance, staking and EVM notifications
//! - IBC transfer callbacks that migrate or merge records across addresses
//! - The end-of-airdrop clawback of escrow and dormant account balances to the
//!   community pool
//!
//! ## Collaborators
//!
//! Balances, accounts, the community pool and address decoding are reached
//! through the narrow traits in [`traits`]. [`adapters`] provides
//! implementations over the FRAME stack.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod adapters;
mod claim;
mod clawback;
pub mod decay;
mod hooks;
pub mod ibc;
mod queries;
pub mod traits;
pub mod types;
pub mod weights;

pub use types::{Action, ClaimRecord, GenesisParams, Params};
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;

#[cfg(test)]
mod tests;

/// Log target of everything this pallet logs.
pub const LOG_TARGET: &str = "runtime::claim";

impl<T> From<types::ParamsError> for Error<T> {
    fn from(err: types::ParamsError) -> Self {
        match err {
            types::ParamsError::StartTimeUnset => Error::<T>::InvalidStartTime,
            types::ParamsError::NonPositiveDuration => Error::<T>::InvalidDuration,
            types::ParamsError::InvalidDenom => Error::<T>::InvalidDenom,
        }
    }
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;
    use crate::traits::{AccountKeeper, AddressMapping, BankKeeper, CommunityPool};
    use alloc::{collections::BTreeSet, vec::Vec};
    use frame_support::{
        pallet_prelude::*,
        traits::{BuildGenesisConfig, UnixTime},
        PalletId,
    };
    use frame_system::pallet_prelude::*;
    use sp_runtime::traits::{
        AccountIdConversion, AtLeast32BitUnsigned, MaybeSerializeDeserialize, SaturatedConversion,
        Saturating, Zero,
    };

    #[pallet::config]
    pub trait Config: frame_system::Config {
        /// The overarching runtime event type.
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Weight information for extrinsics in this pallet.
        type WeightInfo: WeightInfo;

        /// Amount type shared by claim records and the bank.
        type Balance: Parameter
            + Member
            + AtLeast32BitUnsigned
            + Default
            + Copy
            + MaybeSerializeDeserialize
            + MaxEncodedLen;

        /// Multi-denom bank holding the escrow.
        type Bank: BankKeeper<Self::AccountId, Balance = Self::Balance>;

        /// Account metadata used by the clawback.
        type Accounts: AccountKeeper<Self::AccountId>;

        /// Receiver of clawed back and decayed funds.
        type CommunityPool: CommunityPool<Self::AccountId, Self::Balance>;

        /// Decodes packet addresses into local accounts.
        type AddressMapping: AddressMapping<Self::AccountId>;

        /// Block time source.
        type UnixTime: UnixTime;

        /// Accounts created by the airdrop, swept at the end if never used.
        type AirdropAccounts: Get<Vec<Self::AccountId>>;

        /// Origin allowed to change the airdrop parameters.
        type UpdateOrigin: EnsureOrigin<Self::RuntimeOrigin>;

        /// Derives the escrow account.
        #[pallet::constant]
        type PalletId: Get<PalletId>;

        /// Maximum length of the claim denom.
        #[pallet::constant]
        type MaxDenomLen: Get<u32>;
    }

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    // ========== Storage ==========

    /// Claim record per airdrop recipient. Fully claimed records are removed.
    #[pallet::storage]
    pub type ClaimRecords<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, ClaimRecord<T::Balance>, OptionQuery>;

    /// Airdrop parameters.
    #[pallet::storage]
    pub type ClaimParams<T: Config> = StorageValue<_, Params<T::MaxDenomLen>, ValueQuery>;

    // ========== Genesis ==========

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Airdrop parameters. Without them the pallet stays disabled.
        pub params: Option<GenesisParams>,
        /// `(account, initial amount, completed flags)` per recipient.
        pub claim_records: Vec<(T::AccountId, T::Balance, Vec<bool>)>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            let Some(raw) = self.params.clone() else {
                assert!(
                    self.claim_records.is_empty(),
                    "claim records require airdrop params"
                );
                return;
            };
            let params: Params<T::MaxDenomLen> =
                raw.try_into().expect("claim denom exceeds MaxDenomLen");
            params.validate().expect("invalid airdrop params");

            let mut seen = BTreeSet::new();
            let mut escrow = T::Balance::zero();
            for (who, amount, flags) in &self.claim_records {
                assert!(seen.insert(who.clone()), "duplicate claim record");
                let record =
                    ClaimRecord::from_parts(*amount, flags).expect("invalid claim record");
                escrow = escrow.saturating_add(record.unclaimed_amount());
                if !record.has_claimed_all() {
                    ClaimRecords::<T>::insert(who, record);
                }
            }

            // One existential deposit on top keeps the escrow alive until
            // the clawback sweeps it.
            if !escrow.is_zero() {
                let funded = escrow.saturating_add(T::Bank::minimum_balance());
                T::Bank::mint(&Pallet::<T>::account_id(), &params.claim_denom, funded)
                    .expect("failed to fund claim escrow");
            }
            ClaimParams::<T>::put(params);
        }
    }

    // ========== Events ==========

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// A share was paid out for a completed action.
        Claimed {
            who: T::AccountId,
            amount: T::Balance,
            action: Action,
        },
        /// A claim record moved to a new owner over IBC.
        ClaimRecordMigrated { from: T::AccountId, to: T::AccountId },
        /// Two claim records were combined over IBC.
        ClaimRecordsMerged {
            sender: T::AccountId,
            recipient: T::AccountId,
            claimed: T::Balance,
            initial_claimable_amount: T::Balance,
        },
        /// The decay window elapsed and everything left was clawed back.
        AirdropEnded {
            escrow_clawback: T::Balance,
            accounts_clawback: T::Balance,
        },
        /// Airdrop parameters were replaced.
        ParamsUpdated,
    }

    // ========== Errors ==========

    #[pallet::error]
    pub enum Error<T> {
        /// The action cannot be claimed.
        InvalidAction,
        /// A decay duration is zero.
        InvalidDuration,
        /// The airdrop start time is unset.
        InvalidStartTime,
        /// The claim denom is malformed or too long.
        InvalidDenom,
        /// Transfer packet data could not be decoded.
        InvalidPacketData,
        /// Transfer acknowledgement could not be decoded.
        InvalidAcknowledgement,
        /// A packet address does not map to a local account.
        InvalidAddress,
        /// The sender of a record merge has already claimed actions.
        MergeNotSupported,
        /// The bank does not hold the requested denom.
        UnsupportedDenom,
    }

    // ========== Hooks ==========

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        /// Ends the airdrop once its window has passed. A failed clawback
        /// halts the chain.
        fn on_initialize(_n: BlockNumberFor<T>) -> Weight {
            match Self::end_blocker(Self::now()) {
                Ok(weight) => weight,
                Err(err) => {
                    log::error!(target: LOG_TARGET, "failed to end airdrop: {:?}", err);
                    panic!("claim end blocker failed: {:?}", err);
                }
            }
        }
    }

    // ========== Extrinsics ==========

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Replace the airdrop parameters.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::update_params())]
        pub fn update_params(origin: OriginFor<T>, params: Params<T::MaxDenomLen>) -> DispatchResult {
            T::UpdateOrigin::ensure_origin(origin)?;
            params.validate().map_err(Error::<T>::from)?;

            ClaimParams::<T>::put(params);
            Self::deposit_event(Event::ParamsUpdated);
            Ok(())
        }
    }

    impl<T: Config> Pallet<T> {
        /// Escrow account holding undistributed airdrop funds.
        pub fn account_id() -> T::AccountId {
            T::PalletId::get().into_account_truncating()
        }

        /// Current block time in unix milliseconds.
        pub fn now() -> u64 {
            T::UnixTime::now().as_millis().saturated_into::<u64>()
        }
    }
}
