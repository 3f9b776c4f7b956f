use anchor_lang::prelude::*;

declare_id!("5UM8bTGSeUNMuxN62c9GghYauRyjpM6ujcZWmXdL4dsg");

pub mod error;
pub mod instructions;
pub mod state;

pub use error::*;
pub use instructions::*;
pub use state::*;

/// Address and canonical bump of `owner`'s vault.
///
/// Same derivation the account constraints use, exposed for clients that
/// need the address before sending `initialize_vault` or `withdraw`.
pub fn derive_vault_address(owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED, owner.as_ref()], &ID)
}

#[program]
pub mod commitment_vault {
    use super::*;

    /// Lock `amount` lamports from the signer for `duration_seconds`.
    ///
    /// Fails with `AlreadyInitialized` if the signer already has a vault,
    /// `InvalidAmount` / `InvalidDuration` on zero arguments, and
    /// `InsufficientFunds` if the signer cannot cover the deposit.
    pub fn initialize_vault(
        ctx: Context<InitializeVault>,
        duration_seconds: u32,
        amount: u64,
    ) -> Result<()> {
        instructions::initialize_vault(ctx, duration_seconds, amount)
    }

    /// Return the whole deposit to the owner and close the vault.
    ///
    /// Fails with `NotOwner` for any other signer and `LockNotExpired`
    /// while the Clock sysvar is before the unlock timestamp.
    pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let owner = Pubkey::new_unique();
        assert_eq!(derive_vault_address(&owner), derive_vault_address(&owner));
    }

    #[test]
    fn owners_get_distinct_vaults() {
        let (a, _) = derive_vault_address(&Pubkey::new_unique());
        let (b, _) = derive_vault_address(&Pubkey::new_unique());
        assert_ne!(a, b);
    }

    #[test]
    fn derived_address_is_a_canonical_pda() {
        let owner = Pubkey::new_unique();
        let (vault, bump) = derive_vault_address(&owner);

        let recreated =
            Pubkey::create_program_address(&[VAULT_SEED, owner.as_ref(), &[bump]], &ID).unwrap();
        assert_eq!(recreated, vault);
        assert_ne!(vault, owner);
    }

    #[test]
    fn domain_tag_separates_address_space() {
        let owner = Pubkey::new_unique();
        let (vault, _) = derive_vault_address(&owner);
        let (other, _) = Pubkey::find_program_address(&[b"escrow", owner.as_ref()], &ID);
        assert_ne!(vault, other);
    }
}
