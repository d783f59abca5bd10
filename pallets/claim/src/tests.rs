//! Unit tests for the claim pallet.

mod test_genesis;
