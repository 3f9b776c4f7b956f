use anchor_lang::prelude::*;

use crate::error::VaultError;

/// Domain tag mixed into every vault address.
pub const VAULT_SEED: &[u8] = b"vault";

/// Per-owner time-locked deposit.
///
/// Lives at the PDA `[VAULT_SEED, owner]`. Terms are written once by
/// [`Vault::lock`] and never edited; [`Vault::release`] is the only other
/// mutation and it is terminal.
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Vault {
    /// Set by the first successful initialize. The account may already exist
    /// zeroed before that, so presence of data says nothing.
    pub initialized: bool,
    /// Only key allowed to withdraw.
    pub owner: Pubkey,
    /// Lamports in custody, excluding the rent deposit.
    pub locked_amount: u64,
    /// Unix timestamp at or after which withdrawal is allowed.
    pub unlock_timestamp: i64,
    /// Canonical bump of the vault PDA.
    pub bump: u8,
}

impl Vault {
    /// discriminator + bool + pubkey + u64 + i64 + u8
    pub const LEN: usize = 8 + 1 + 32 + 8 + 8 + 1;

    pub fn status(&self) -> VaultStatus {
        VaultStatus::of(self)
    }

    /// Writes the lock terms. Every check runs before any field is touched,
    /// so an error leaves the record exactly as it was.
    pub fn lock(
        &mut self,
        owner: Pubkey,
        amount: u64,
        duration_seconds: u32,
        now: i64,
        bump: u8,
    ) -> std::result::Result<(), VaultError> {
        if self.initialized {
            return Err(VaultError::AlreadyInitialized);
        }
        if amount == 0 {
            return Err(VaultError::InvalidAmount);
        }
        if duration_seconds == 0 {
            return Err(VaultError::InvalidDuration);
        }
        let unlock_timestamp = now
            .checked_add(i64::from(duration_seconds))
            .ok_or(VaultError::ArithmeticOverflow)?;

        self.initialized = true;
        self.owner = owner;
        self.locked_amount = amount;
        self.unlock_timestamp = unlock_timestamp;
        self.bump = bump;
        Ok(())
    }

    /// Empties custody for `caller` and returns the released amount.
    ///
    /// Ownership is checked before the deadline so that a stranger cannot
    /// learn when a vault opens.
    pub fn release(&mut self, caller: &Pubkey, now: i64) -> std::result::Result<u64, VaultError> {
        match self.status() {
            VaultStatus::Uninitialized => return Err(VaultError::NotInitialized),
            VaultStatus::Withdrawn => return Err(VaultError::AlreadyWithdrawn),
            VaultStatus::Locked => {}
        }
        if self.owner != *caller {
            return Err(VaultError::NotOwner);
        }
        if !self.is_unlocked(now) {
            return Err(VaultError::LockNotExpired);
        }

        let amount = self.locked_amount;
        self.locked_amount = 0;
        Ok(amount)
    }

    pub fn is_unlocked(&self, now: i64) -> bool {
        now >= self.unlock_timestamp
    }

    /// Zero once the lock window has closed.
    pub fn seconds_remaining(&self, now: i64) -> i64 {
        self.unlock_timestamp.saturating_sub(now).max(0)
    }
}

/// Lifecycle stage of a [`Vault`]. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultStatus {
    Uninitialized,
    Locked,
    Withdrawn,
}

impl VaultStatus {
    pub fn of(vault: &Vault) -> Self {
        match (vault.initialized, vault.locked_amount) {
            (false, _) => VaultStatus::Uninitialized,
            (true, 0) => VaultStatus::Withdrawn,
            (true, _) => VaultStatus::Locked,
        }
    }
}
