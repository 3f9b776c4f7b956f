//! Property tests over the `Vault` lock/release transitions.
//!
//! These run the same state machine the handlers call, with `now` passed in
//! directly. The compiled programs are driven in `litesvm_vault.rs`.

use anchor_lang::prelude::Pubkey;
use commitment_vault::{Vault, VaultError, VaultStatus};
use proptest::prelude::*;

const GENESIS: i64 = 1_700_000_000;

fn lock_terms() -> impl Strategy<Value = (u32, u64)> {
    (1u32..=31_536_000, 1u64..=1_000_000_000)
}

fn locked(owner: Pubkey, duration: u32, amount: u64) -> Vault {
    let mut vault = Vault::default();
    vault.lock(owner, amount, duration, GENESIS, 255).unwrap();
    vault
}

proptest! {
    #[test]
    fn second_lock_is_rejected(
        (duration, amount) in lock_terms(),
        (duration2, amount2) in lock_terms(),
        later in 0i64..1_000_000,
    ) {
        let owner = Pubkey::new_unique();
        let mut vault = locked(owner, duration, amount);
        let before = vault.clone();

        let err = vault
            .lock(owner, amount2, duration2, GENESIS + later, 254)
            .unwrap_err();

        prop_assert!(matches!(err, VaultError::AlreadyInitialized));
        prop_assert_eq!(vault, before);
    }

    #[test]
    fn release_inside_lock_window_fails(
        (duration, amount) in lock_terms(),
        elapsed_fraction in 0.0f64..1.0,
    ) {
        let owner = Pubkey::new_unique();
        let mut vault = locked(owner, duration, amount);
        let elapsed = ((duration as f64) * elapsed_fraction) as i64;
        let now = GENESIS + elapsed.min(duration as i64 - 1);
        let before = vault.clone();

        let err = vault.release(&owner, now).unwrap_err();

        prop_assert!(matches!(err, VaultError::LockNotExpired));
        prop_assert_eq!(vault, before);
    }

    #[test]
    fn release_after_deadline_pays_out_once(
        (duration, amount) in lock_terms(),
        overshoot in 0i64..1_000_000,
    ) {
        let owner = Pubkey::new_unique();
        let mut vault = locked(owner, duration, amount);
        let now = GENESIS + duration as i64 + overshoot;

        prop_assert_eq!(vault.release(&owner, now).unwrap(), amount);
        prop_assert_eq!(vault.status(), VaultStatus::Withdrawn);
        prop_assert!(matches!(
            vault.release(&owner, now).unwrap_err(),
            VaultError::AlreadyWithdrawn
        ));
    }

    #[test]
    fn stranger_can_never_release(
        (duration, amount) in lock_terms(),
        elapsed in 0i64..100_000_000,
    ) {
        let mut vault = locked(Pubkey::new_unique(), duration, amount);
        let before = vault.clone();

        let err = vault.release(&Pubkey::new_unique(), GENESIS + elapsed).unwrap_err();

        prop_assert!(matches!(err, VaultError::NotOwner));
        prop_assert_eq!(vault, before);
    }

    #[test]
    fn zero_terms_leave_record_empty(
        (duration, amount) in lock_terms(),
        zero_amount in any::<bool>(),
    ) {
        let mut vault = Vault::default();
        let result = if zero_amount {
            vault.lock(Pubkey::new_unique(), 0, duration, GENESIS, 255)
        } else {
            vault.lock(Pubkey::new_unique(), amount, 0, GENESIS, 255)
        };

        match result {
            Err(VaultError::InvalidAmount) => prop_assert!(zero_amount),
            Err(VaultError::InvalidDuration) => prop_assert!(!zero_amount),
            other => prop_assert!(false, "unexpected result: {:?}", other),
        }
        prop_assert_eq!(vault, Vault::default());
    }
}
