//! Claim record, action and parameter types.

use alloc::vec::Vec;
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use frame_support::{
    pallet_prelude::*, CloneNoBound, EqNoBound, PartialEqNoBound, RuntimeDebugNoBound,
};
use serde::{Deserialize, Serialize};
use sp_runtime::traits::AtLeast32BitUnsigned;

// =========================================================
// Constants
// =========================================================

/// Number of actions a record can claim (everything except `Unspecified`).
pub const NUM_CLAIMABLE_ACTIONS: usize = 4;

/// One hour in milliseconds.
pub const HOUR_MS: u64 = 60 * 60 * 1000;

/// 30.4375 days, in milliseconds.
pub const DEFAULT_DURATION_UNTIL_DECAY: u64 = 2_629_800 * 1000;

/// Twice the grace window.
pub const DEFAULT_DURATION_OF_DECAY: u64 = 2 * DEFAULT_DURATION_UNTIL_DECAY;

// =========================================================
// Action
// =========================================================

/// Actions that unlock a share of an airdrop allocation.
#[derive(
    Clone,
    Copy,
    Encode,
    Decode,
    DecodeWithMemTracking,
    Eq,
    PartialEq,
    RuntimeDebug,
    TypeInfo,
    MaxEncodedLen,
)]
pub enum Action {
    #[codec(index = 0)]
    Unspecified,
    #[codec(index = 1)]
    Vote,
    #[codec(index = 2)]
    Delegate,
    #[codec(index = 3)]
    Evm,
    #[codec(index = 4)]
    IbcTransfer,
}

impl Action {
    /// Every claimable action, in slot order.
    pub const ALL: [Action; NUM_CLAIMABLE_ACTIONS] = [
        Action::Vote,
        Action::Delegate,
        Action::Evm,
        Action::IbcTransfer,
    ];

    /// Slot of this action in `ClaimRecord::actions_completed`.
    pub fn slot(self) -> Option<usize> {
        match self {
            Action::Unspecified => None,
            Action::Vote => Some(0),
            Action::Delegate => Some(1),
            Action::Evm => Some(2),
            Action::IbcTransfer => Some(3),
        }
    }

    pub fn is_claimable(self) -> bool {
        self.slot().is_some()
    }
}

impl TryFrom<u8> for Action {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Action::Unspecified),
            1 => Ok(Action::Vote),
            2 => Ok(Action::Delegate),
            3 => Ok(Action::Evm),
            4 => Ok(Action::IbcTransfer),
            _ => Err(()),
        }
    }
}

// =========================================================
// Claim Record
// =========================================================

/// Reasons a claim record is rejected.
#[derive(Clone, Copy, Eq, PartialEq, RuntimeDebug)]
pub enum RecordError {
    /// The record carries nothing to claim.
    ZeroAmount,
    /// The completion flags do not cover exactly one slot per action.
    ActionsLengthMismatch { expected: usize, got: usize },
}

/// Airdrop allocation of a single account.
#[derive(
    Clone, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen, Default,
)]
pub struct ClaimRecord<Balance> {
    /// Total allocation, split evenly across the claimable actions.
    pub initial_claimable_amount: Balance,
    /// Completion flag per action, indexed by `Action::slot`.
    pub actions_completed: [bool; NUM_CLAIMABLE_ACTIONS],
}

impl<Balance: AtLeast32BitUnsigned + Copy> ClaimRecord<Balance> {
    pub fn new(initial_claimable_amount: Balance) -> Self {
        Self {
            initial_claimable_amount,
            actions_completed: [false; NUM_CLAIMABLE_ACTIONS],
        }
    }

    /// Builds a record from externally supplied completion flags.
    pub fn from_parts(
        initial_claimable_amount: Balance,
        actions_completed: &[bool],
    ) -> Result<Self, RecordError> {
        let actions_completed: [bool; NUM_CLAIMABLE_ACTIONS] = actions_completed
            .try_into()
            .map_err(|_| RecordError::ActionsLengthMismatch {
                expected: NUM_CLAIMABLE_ACTIONS,
                got: actions_completed.len(),
            })?;
        let record = Self {
            initial_claimable_amount,
            actions_completed,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        if self.initial_claimable_amount.is_zero() {
            return Err(RecordError::ZeroAmount);
        }
        Ok(())
    }

    pub fn has_claimed_action(&self, action: Action) -> bool {
        action
            .slot()
            .map(|slot| self.actions_completed[slot])
            .unwrap_or(false)
    }

    pub fn has_claimed_any(&self) -> bool {
        self.actions_completed.iter().any(|done| *done)
    }

    pub fn has_claimed_all(&self) -> bool {
        self.actions_completed.iter().all(|done| *done)
    }

    pub fn mark_claimed(&mut self, action: Action) {
        if let Some(slot) = action.slot() {
            self.actions_completed[slot] = true;
        }
    }

    /// Undecayed share of a single action. The division floors, so up to
    /// `NUM_CLAIMABLE_ACTIONS - 1` base units of every allocation are never
    /// distributed.
    pub fn amount_per_action(&self) -> Balance {
        self.initial_claimable_amount / Balance::from(NUM_CLAIMABLE_ACTIONS as u32)
    }

    /// Fresh record owning both allocations. The total is rebuilt from the
    /// per-action shares, so each merged share is exactly the sum of the two
    /// shares escrow holds.
    pub fn merged(&self, other: &Self) -> Self {
        let per_action = self
            .amount_per_action()
            .saturating_add(other.amount_per_action());
        Self::new(per_action.saturating_mul(Balance::from(NUM_CLAIMABLE_ACTIONS as u32)))
    }

    /// Undecayed amount still owed for the actions not yet completed.
    pub fn unclaimed_amount(&self) -> Balance {
        let pending = self.actions_completed.iter().filter(|done| !**done).count() as u32;
        self.amount_per_action().saturating_mul(Balance::from(pending))
    }
}

// =========================================================
// Params
// =========================================================

/// Reasons a parameter set is rejected.
#[derive(Clone, Copy, Eq, PartialEq, RuntimeDebug)]
pub enum ParamsError {
    StartTimeUnset,
    NonPositiveDuration,
    InvalidDenom,
}

/// Airdrop configuration. Times and durations are unix milliseconds.
#[derive(
    CloneNoBound,
    PartialEqNoBound,
    EqNoBound,
    RuntimeDebugNoBound,
    Encode,
    Decode,
    DecodeWithMemTracking,
    TypeInfo,
    MaxEncodedLen,
)]
#[scale_info(skip_type_params(MaxDenomLen))]
pub struct Params<MaxDenomLen: Get<u32>> {
    /// Claims are processed only while this is set.
    pub enable_claim: bool,
    /// Instant the airdrop opens.
    pub airdrop_start_time: u64,
    /// Grace window with full claimability.
    pub duration_until_decay: u64,
    /// Linear decay window after the grace window.
    pub duration_of_decay: u64,
    /// Denomination being distributed.
    pub claim_denom: BoundedVec<u8, MaxDenomLen>,
}

impl<MaxDenomLen: Get<u32>> Default for Params<MaxDenomLen> {
    fn default() -> Self {
        Self {
            enable_claim: false,
            airdrop_start_time: 0,
            duration_until_decay: DEFAULT_DURATION_UNTIL_DECAY,
            duration_of_decay: DEFAULT_DURATION_OF_DECAY,
            claim_denom: BoundedVec::default(),
        }
    }
}

impl<MaxDenomLen: Get<u32>> Params<MaxDenomLen> {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.airdrop_start_time == 0 {
            return Err(ParamsError::StartTimeUnset);
        }
        if self.duration_until_decay == 0 || self.duration_of_decay == 0 {
            return Err(ParamsError::NonPositiveDuration);
        }
        if !is_valid_denom(&self.claim_denom) {
            return Err(ParamsError::InvalidDenom);
        }
        Ok(())
    }

    pub fn decay_start_time(&self) -> u64 {
        self.airdrop_start_time
            .saturating_add(self.duration_until_decay)
    }

    pub fn airdrop_end_time(&self) -> u64 {
        self.decay_start_time().saturating_add(self.duration_of_decay)
    }

    /// Enabled, started and not yet past the decay window.
    pub fn is_claim_active(&self, now: u64) -> bool {
        self.enable_claim && now >= self.airdrop_start_time && now <= self.airdrop_end_time()
    }

    /// The full decay window has elapsed since the start.
    pub fn is_airdrop_over(&self, now: u64) -> bool {
        let window = self
            .duration_until_decay
            .saturating_add(self.duration_of_decay);
        now.saturating_sub(self.airdrop_start_time) > window
    }
}

/// Cosmos SDK denom grammar: `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
pub fn is_valid_denom(denom: &[u8]) -> bool {
    if denom.len() < 3 || denom.len() > 128 {
        return false;
    }
    denom[0].is_ascii_alphabetic()
        && denom[1..]
            .iter()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, b'/' | b':' | b'.' | b'_' | b'-'))
}

/// Chain-spec form of `Params`.
#[derive(Clone, Eq, PartialEq, RuntimeDebug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenesisParams {
    pub enable_claim: bool,
    pub airdrop_start_time: u64,
    pub duration_until_decay: u64,
    pub duration_of_decay: u64,
    pub claim_denom: Vec<u8>,
}

impl<MaxDenomLen: Get<u32>> TryFrom<GenesisParams> for Params<MaxDenomLen> {
    type Error = ParamsError;

    fn try_from(params: GenesisParams) -> Result<Self, Self::Error> {
        let claim_denom = params
            .claim_denom
            .try_into()
            .map_err(|_| ParamsError::InvalidDenom)?;
        Ok(Self {
            enable_claim: params.enable_claim,
            airdrop_start_time: params.airdrop_start_time,
            duration_until_decay: params.duration_until_decay,
            duration_of_decay: params.duration_of_decay,
            claim_denom,
        })
    }
}
