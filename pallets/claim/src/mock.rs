//! Mock runtime for claim pallet tests.

#![cfg(test)]

use crate as pallet_claim;
use crate::{
    adapters::{NativeBank, PoolAccount, SystemAccounts},
    ibc::{FungibleTokenPacketData, Packet},
    traits::AddressMapping,
    types::{ClaimRecord, GenesisParams, HOUR_MS},
};
use frame_support::{
    derive_impl, parameter_types,
    traits::{ConstU32, ConstU64},
    PalletId,
};
use sp_runtime::{traits::IdentityLookup, BuildStorage};
use std::cell::RefCell;

type Block = frame_system::mocking::MockBlock<Test>;

// =========================================================
// Mock Runtime
// =========================================================

frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        Balances: pallet_balances,
        Timestamp: pallet_timestamp,
        Claim: pallet_claim,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = Block;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
    type AccountData = pallet_balances::AccountData<u128>;
}

impl pallet_balances::Config for Test {
    type MaxLocks = ConstU32<50>;
    type MaxReserves = ();
    type ReserveIdentifier = [u8; 8];
    type Balance = u128;
    type RuntimeEvent = RuntimeEvent;
    type DustRemoval = ();
    type ExistentialDeposit = ExistentialDeposit;
    type AccountStore = System;
    type WeightInfo = ();
    type FreezeIdentifier = ();
    type MaxFreezes = ConstU32<0>;
    type RuntimeHoldReason = RuntimeHoldReason;
    type RuntimeFreezeReason = RuntimeFreezeReason;
    type DoneSlashHandler = ();
}

impl pallet_timestamp::Config for Test {
    type Moment = u64;
    type OnTimestampSet = ();
    type MinimumPeriod = ConstU64<1>;
    type WeightInfo = ();
}

// =========================================================
// Mock Collaborators
// =========================================================

thread_local! {
    static AIRDROP_ACCOUNTS: RefCell<Vec<u64>> = const { RefCell::new(Vec::new()) };
}

/// Replace the accounts swept by the clawback.
pub fn set_airdrop_accounts(accounts: Vec<u64>) {
    AIRDROP_ACCOUNTS.with(|a| *a.borrow_mut() = accounts);
}

/// Addresses look like `<hrp>1<account id>`, e.g. `cosmos12` for account 2.
pub struct NumericAddress;

impl AddressMapping<u64> for NumericAddress {
    fn into_account_id(address: &str) -> Option<u64> {
        let (hrp, id) = address.split_once('1')?;
        if hrp.is_empty() {
            return None;
        }
        id.parse().ok()
    }
}

parameter_types! {
    pub static ExistentialDeposit: u128 = 1;
    pub const ClaimPalletId: PalletId = PalletId(*b"py/claim");
    pub const NativeDenom: &'static [u8] = b"aclaim";
    pub const CommunityPoolAccount: u64 = COMMUNITY_POOL;
    pub AirdropAccounts: Vec<u64> = AIRDROP_ACCOUNTS.with(|a| a.borrow().clone());
}

pub type Bank = NativeBank<Test, Balances, NativeDenom>;

impl pallet_claim::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type WeightInfo = ();
    type Balance = u128;
    type Bank = Bank;
    type Accounts = SystemAccounts<Test>;
    type CommunityPool = PoolAccount<Bank, CommunityPoolAccount>;
    type AddressMapping = NumericAddress;
    type UnixTime = Timestamp;
    type AirdropAccounts = AirdropAccounts;
    type UpdateOrigin = frame_system::EnsureRoot<u64>;
    type PalletId = ClaimPalletId;
    type MaxDenomLen = ConstU32<128>;
}

// =========================================================
// Fixtures
// =========================================================

pub const ALICE: u64 = 1;
pub const BOB: u64 = 2;
pub const CHARLIE: u64 = 3;
pub const DAVE: u64 = 4;
pub const EVE: u64 = 5;
pub const COMMUNITY_POOL: u64 = 999;

pub const START: u64 = 1_700_000_000_000;
pub const UNTIL_DECAY: u64 = HOUR_MS;
pub const DECAY: u64 = 4 * HOUR_MS;
pub const DECAY_START: u64 = START + UNTIL_DECAY;
pub const END: u64 = DECAY_START + DECAY;

/// Escrow owed by the default genesis: 1_000 for ALICE and 500 for BOB. The
/// escrow account holds one existential deposit on top.
pub const GENESIS_ESCROW: u128 = 1_500;
pub const INITIAL_BALANCE: u128 = 100;

pub fn genesis_params() -> GenesisParams {
    GenesisParams {
        enable_claim: true,
        airdrop_start_time: START,
        duration_until_decay: UNTIL_DECAY,
        duration_of_decay: DECAY,
        claim_denom: b"aclaim".to_vec(),
    }
}

pub fn new_test_ext() -> sp_io::TestExternalities {
    ext_with_genesis(
        Some(genesis_params()),
        vec![(ALICE, 1_000, vec![false; 4]), (BOB, 500, vec![false; 4])],
    )
}

pub fn ext_with_genesis(
    params: Option<GenesisParams>,
    claim_records: Vec<(u64, u128, Vec<bool>)>,
) -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default()
        .build_storage()
        .unwrap();

    pallet_balances::GenesisConfig::<Test> {
        balances: vec![
            (ALICE, INITIAL_BALANCE),
            (BOB, INITIAL_BALANCE),
            (CHARLIE, INITIAL_BALANCE),
            (EVE, INITIAL_BALANCE),
        ],
        dev_accounts: Default::default(),
    }
    .assimilate_storage(&mut t)
    .unwrap();

    pallet_claim::GenesisConfig::<Test> {
        params,
        claim_records,
    }
    .assimilate_storage(&mut t)
    .unwrap();

    set_airdrop_accounts(Vec::new());

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| {
        System::set_block_number(1);
        set_now(START);
    });
    ext
}

// =========================================================
// Helpers
// =========================================================

pub fn set_now(millis: u64) {
    Timestamp::set_timestamp(millis);
}

pub fn escrow() -> u64 {
    Claim::account_id()
}

/// Existential deposit, also the reserve kept in escrow.
pub fn ed() -> u128 {
    ExistentialDeposit::get()
}

pub fn balance(who: u64) -> u128 {
    Balances::free_balance(who)
}

pub fn record(who: u64) -> Option<ClaimRecord<u128>> {
    pallet_claim::ClaimRecords::<Test>::get(who)
}

/// Inbound transfer packet between two textual addresses.
pub fn transfer_packet(sender: &str, receiver: &str) -> Packet {
    let data = FungibleTokenPacketData {
        denom: "transfer/channel-0/uatom".into(),
        amount: "1".into(),
        sender: sender.into(),
        receiver: receiver.into(),
        memo: String::new(),
    };
    Packet {
        sequence: 1,
        source_port: b"transfer".to_vec(),
        source_channel: b"channel-3".to_vec(),
        destination_port: b"transfer".to_vec(),
        destination_channel: b"channel-0".to_vec(),
        data: data.encode(),
    }
}
