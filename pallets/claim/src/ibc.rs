//! ICS-20 transfer callbacks.
//!
//! A successful inbound transfer claims the IBC action of the receiver and
//! moves or merges the sender's record into the receiver's. An acknowledged
//! outbound transfer claims the IBC action of the sender.

use crate::{
    decay,
    pallet::{ClaimParams, ClaimRecords, Config, Error, Event, Pallet},
    traits::{AddressMapping, TransferCallbacks},
    types::{Action, ClaimRecord, Params},
    LOG_TARGET,
};
use alloc::{string::String, vec::Vec};
use frame_support::{
    ensure,
    pallet_prelude::{DispatchError, DispatchResult},
    storage::with_storage_layer,
};
use serde::{Deserialize, Serialize};
use sp_runtime::{
    traits::{Saturating, Zero},
    RuntimeDebug,
};

// =========================================================
// Wire Types
// =========================================================

/// Result payload of a successful ICS-20 acknowledgement (base64 of `0x01`).
pub const SUCCESS_RESULT: &str = "AQ==";

/// ICS-20 fungible token packet payload.
#[derive(Clone, Eq, PartialEq, RuntimeDebug, Serialize, Deserialize)]
pub struct FungibleTokenPacketData {
    pub denom: String,
    /// Decimal string, may exceed 128 bits.
    pub amount: String,
    pub sender: String,
    pub receiver: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memo: String,
}

impl FungibleTokenPacketData {
    /// Parses the JSON payload and rejects empty addresses or a zero amount.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let data: Self = serde_json::from_slice(bytes).ok()?;
        let amount_ok = !data.amount.is_empty()
            && data.amount.bytes().all(|b| b.is_ascii_digit())
            && data.amount.bytes().any(|b| b != b'0');
        let valid = amount_ok && !data.sender.is_empty() && !data.receiver.is_empty();
        valid.then_some(data)
    }

    pub fn encode(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }
}

/// Channel packet as delivered to the transfer application.
#[derive(Clone, Eq, PartialEq, RuntimeDebug, Default)]
pub struct Packet {
    pub sequence: u64,
    pub source_port: Vec<u8>,
    pub source_channel: Vec<u8>,
    pub destination_port: Vec<u8>,
    pub destination_channel: Vec<u8>,
    pub data: Vec<u8>,
}

/// Channel acknowledgement, JSON encoded as `{"result": ..}` or `{"error": ..}`.
#[derive(Clone, Eq, PartialEq, RuntimeDebug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acknowledgement {
    Result(String),
    Error(String),
}

impl Acknowledgement {
    pub fn success() -> Self {
        Self::Result(SUCCESS_RESULT.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Result(_))
    }

    pub fn decode(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }

    pub fn encode(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }
}

// =========================================================
// Callbacks
// =========================================================

impl<T: Config> Pallet<T> {
    /// Inbound transfer. Returns `ack` untouched unless processing fails, in
    /// which case all writes are dropped and an error acknowledgement is
    /// returned instead.
    pub fn on_recv_packet(packet: &Packet, ack: Acknowledgement) -> Acknowledgement {
        let params = ClaimParams::<T>::get();
        if !params.is_claim_active(Self::now()) || !ack.is_success() {
            return ack;
        }

        match with_storage_layer(|| Self::handle_recv(packet, &params)) {
            Ok(()) => ack,
            Err(err) => {
                log::debug!(
                    target: LOG_TARGET,
                    "rejecting packet {} on {:?}: {:?}",
                    packet.sequence,
                    packet.destination_channel,
                    err,
                );
                let message: &'static str = err.into();
                Acknowledgement::error(message)
            }
        }
    }

    /// Outbound transfer acknowledged by the counterparty.
    pub fn on_acknowledgement_packet(packet: &Packet, acknowledgement: &[u8]) -> DispatchResult {
        let params = ClaimParams::<T>::get();
        if !params.is_claim_active(Self::now()) {
            return Ok(());
        }

        let ack = Acknowledgement::decode(acknowledgement).ok_or(Error::<T>::InvalidAcknowledgement)?;
        if !ack.is_success() {
            return Ok(());
        }

        let data =
            FungibleTokenPacketData::decode(&packet.data).ok_or(Error::<T>::InvalidPacketData)?;
        let sender = Self::lookup(&data.sender)?;
        let Some(record) = ClaimRecords::<T>::get(&sender) else {
            return Ok(());
        };

        Self::claim_with_record(&sender, record, Action::IbcTransfer, &params).map(|_| ())
    }

    fn handle_recv(packet: &Packet, params: &Params<T::MaxDenomLen>) -> DispatchResult {
        let data =
            FungibleTokenPacketData::decode(&packet.data).ok_or(Error::<T>::InvalidPacketData)?;
        let sender = Self::lookup(&data.sender)?;
        let recipient = Self::lookup(&data.receiver)?;

        let sender_record = ClaimRecords::<T>::get(&sender);
        if sender_record
            .as_ref()
            .is_some_and(|record| record.has_claimed_action(Action::IbcTransfer))
        {
            return Ok(());
        }
        let recipient_record = ClaimRecords::<T>::get(&recipient);

        match (sender_record, recipient_record) {
            (Some(from), Some(to)) if sender != recipient => {
                Self::merge_claim_records(&sender, &recipient, from, to, params)
            }
            (Some(record), None) => {
                ClaimRecords::<T>::remove(&sender);
                ClaimRecords::<T>::insert(&recipient, record.clone());
                Self::deposit_event(Event::ClaimRecordMigrated {
                    from: sender.clone(),
                    to: recipient.clone(),
                });
                log::debug!(
                    target: LOG_TARGET,
                    "migrated claim record from {:?} to {:?}",
                    sender,
                    recipient,
                );
                Self::claim_with_record(&recipient, record, Action::IbcTransfer, params).map(|_| ())
            }
            (_, Some(record)) => {
                Self::claim_with_record(&recipient, record, Action::IbcTransfer, params).map(|_| ())
            }
            (None, None) => Ok(()),
        }
    }

    /// Folds `sender_record` into `recipient_record`.
    ///
    /// Each merged per-action share is the sum of both shares. Actions the
    /// recipient already completed are paid out of the sender's share right
    /// away, and the IBC action is claimed for both shares. A sender with
    /// completed actions is rejected.
    pub(crate) fn merge_claim_records(
        sender: &T::AccountId,
        recipient: &T::AccountId,
        sender_record: ClaimRecord<T::Balance>,
        recipient_record: ClaimRecord<T::Balance>,
        params: &Params<T::MaxDenomLen>,
    ) -> DispatchResult {
        ensure!(!sender_record.has_claimed_any(), Error::<T>::MergeNotSupported);

        let now = Self::now();
        let mut merged = recipient_record.merged(&sender_record);
        let mut claimed = T::Balance::zero();
        let mut decayed = T::Balance::zero();

        let mut claim_share = |record: &ClaimRecord<T::Balance>, action: Action| {
            let (amount, remainder) = decay::claimable_and_remainder(record, action, params, now);
            claimed = claimed.saturating_add(amount);
            decayed = decayed.saturating_add(remainder);
        };
        for action in Action::ALL {
            if recipient_record.has_claimed_action(action) {
                claim_share(&sender_record, action);
            } else if action == Action::IbcTransfer {
                claim_share(&sender_record, action);
                claim_share(&recipient_record, action);
            } else {
                continue;
            }
            merged.mark_claimed(action);
        }

        Self::pay_out(recipient, claimed, decayed, params)?;
        ClaimRecords::<T>::remove(sender);
        Self::store_record(recipient, merged.clone());

        Self::deposit_event(Event::ClaimRecordsMerged {
            sender: sender.clone(),
            recipient: recipient.clone(),
            claimed,
            initial_claimable_amount: merged.initial_claimable_amount,
        });
        log::debug!(
            target: LOG_TARGET,
            "merged claim record of {:?} into {:?}: {:?} paid",
            sender,
            recipient,
            claimed,
        );
        Ok(())
    }

    fn lookup(address: &str) -> Result<T::AccountId, DispatchError> {
        T::AddressMapping::into_account_id(address).ok_or_else(|| Error::<T>::InvalidAddress.into())
    }
}

impl<T: Config> TransferCallbacks for Pallet<T> {
    type Packet = Packet;
    type Acknowledgement = Acknowledgement;

    fn on_recv_packet(packet: &Packet, ack: Acknowledgement) -> Acknowledgement {
        Pallet::<T>::on_recv_packet(packet, ack)
    }

    fn on_acknowledgement_packet(packet: &Packet, acknowledgement: &[u8]) -> DispatchResult {
        Pallet::<T>::on_acknowledgement_packet(packet, acknowledgement)
    }
}
