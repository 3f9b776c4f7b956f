use anchor_lang::prelude::*;

use crate::state::{Vault, VAULT_SEED};

/// Releases the deposit once the unlock timestamp has passed.
///
/// Amount and deadline come from the stored record only. After the handler
/// returns, `close = owner` hands every lamport in the vault (deposit plus
/// rent) to the owner and deallocates the account, so the same address can
/// never pay out twice.
pub fn withdraw(ctx: Context<Withdraw>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let owner = ctx.accounts.owner.key();
    let vault = &mut ctx.accounts.vault;

    if !vault.is_unlocked(now) {
        msg!(
            "Vault still locked for {} more seconds",
            vault.seconds_remaining(now)
        );
    }
    let released = vault.release(&owner, now)?;

    msg!("Time lock passed. Released {} lamports to {}", released, owner);
    Ok(())
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// Seeds use the stored owner and bump, so a stranger passing someone
    /// else's vault gets `NotOwner` rather than a seeds mismatch.
    #[account(
        mut,
        seeds = [VAULT_SEED, vault.owner.as_ref()],
        bump = vault.bump,
        has_one = owner @ crate::error::VaultError::NotOwner,
        close = owner
    )]
    pub vault: Account<'info, Vault>,

    /// Must be the stored owner; receives the funds
    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}
