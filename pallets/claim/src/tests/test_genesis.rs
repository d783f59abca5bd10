use crate::{
    mock::*,
    pallet::{ClaimParams, ClaimRecords, Error, Event},
    types::{Params, DEFAULT_DURATION_OF_DECAY, DEFAULT_DURATION_UNTIL_DECAY},
};
use frame_support::{assert_noop, assert_ok, assert_storage_noop, traits::ConstU32};
use sp_runtime::DispatchError;

// =========================================================
// Genesis
// =========================================================

#[test]
fn genesis_stores_records_and_funds_escrow() {
    new_test_ext().execute_with(|| {
        let params = ClaimParams::<Test>::get();
        assert!(params.enable_claim);
        assert_eq!(params.airdrop_start_time, START);
        assert_eq!(params.claim_denom.to_vec(), b"aclaim".to_vec());

        assert_eq!(record(ALICE).unwrap().initial_claimable_amount, 1_000);
        assert_eq!(record(BOB).unwrap().initial_claimable_amount, 500);
        assert_eq!(balance(escrow()), GENESIS_ESCROW + ed());
        assert_eq!(Claim::total_unclaimed(), GENESIS_ESCROW);
    });
}

#[test]
fn genesis_escrow_covers_only_unclaimed_actions() {
    ext_with_genesis(
        Some(genesis_params()),
        vec![
            (ALICE, 10_000, vec![true, false, true, true]),
            (BOB, 400, vec![false, false, true, false]),
            (CHARLIE, 100, vec![true; 4]),
        ],
    )
    .execute_with(|| {
        assert_eq!(Claim::total_unclaimed(), 2_500 + 300);
        assert_eq!(ClaimRecords::<Test>::iter().count(), 2);
        assert_eq!(record(CHARLIE), None);
    });
}

#[test]
fn empty_genesis_leaves_claims_disabled() {
    ext_with_genesis(None, vec![]).execute_with(|| {
        let params = ClaimParams::<Test>::get();
        assert!(!params.enable_claim);
        assert_eq!(params.duration_until_decay, DEFAULT_DURATION_UNTIL_DECAY);
        assert_eq!(params.duration_of_decay, DEFAULT_DURATION_OF_DECAY);
        assert_eq!(balance(escrow()), 0);

        // Far past any default window, still nothing to end.
        assert_storage_noop!(assert_ok!(Claim::end_blocker(u64::MAX)));
    });
}

#[test]
#[should_panic(expected = "invalid claim record")]
fn genesis_rejects_wrong_flag_count() {
    ext_with_genesis(Some(genesis_params()), vec![(ALICE, 100, vec![false; 3])]);
}

#[test]
#[should_panic(expected = "invalid claim record")]
fn genesis_rejects_zero_allocation() {
    ext_with_genesis(Some(genesis_params()), vec![(ALICE, 0, vec![false; 4])]);
}

#[test]
#[should_panic(expected = "duplicate claim record")]
fn genesis_rejects_duplicates() {
    ext_with_genesis(
        Some(genesis_params()),
        vec![(ALICE, 100, vec![false; 4]), (ALICE, 200, vec![false; 4])],
    );
}

#[test]
#[should_panic(expected = "claim records require airdrop params")]
fn genesis_rejects_records_without_params() {
    ext_with_genesis(None, vec![(ALICE, 100, vec![false; 4])]);
}

#[test]
#[should_panic(expected = "invalid airdrop params")]
fn genesis_rejects_invalid_params() {
    let mut params = genesis_params();
    params.duration_of_decay = 0;
    ext_with_genesis(Some(params), vec![]);
}

// =========================================================
// Params
// =========================================================

fn valid_params() -> Params<ConstU32<128>> {
    Params {
        enable_claim: true,
        airdrop_start_time: START,
        duration_until_decay: 2 * UNTIL_DECAY,
        duration_of_decay: DECAY,
        claim_denom: b"aclaim".to_vec().try_into().unwrap(),
    }
}

#[test]
fn root_updates_params() {
    new_test_ext().execute_with(|| {
        assert_ok!(Claim::update_params(RuntimeOrigin::root(), valid_params()));

        assert_eq!(ClaimParams::<Test>::get(), valid_params());
        System::assert_last_event(Event::ParamsUpdated.into());
    });
}

#[test]
fn update_params_requires_update_origin() {
    new_test_ext().execute_with(|| {
        assert_noop!(
            Claim::update_params(RuntimeOrigin::signed(ALICE), valid_params()),
            DispatchError::BadOrigin
        );
    });
}

#[test]
fn update_params_validates() {
    new_test_ext().execute_with(|| {
        let mut params = valid_params();
        params.duration_until_decay = 0;
        assert_noop!(
            Claim::update_params(RuntimeOrigin::root(), params),
            Error::<Test>::InvalidDuration
        );

        let mut params = valid_params();
        params.airdrop_start_time = 0;
        assert_noop!(
            Claim::update_params(RuntimeOrigin::root(), params),
            Error::<Test>::InvalidStartTime
        );

        let mut params = valid_params();
        params.claim_denom = b"a".to_vec().try_into().unwrap();
        assert_noop!(
            Claim::update_params(RuntimeOrigin::root(), params),
            Error::<Test>::InvalidDenom
        );
    });
}
