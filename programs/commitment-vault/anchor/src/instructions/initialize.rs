use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

use crate::error::VaultError;
use crate::state::{Vault, VAULT_SEED};

/// Creates the owner's vault and moves `amount` lamports into it.
///
/// The account is created here rather than with `init`, so the owner's
/// balance is checked against rent plus deposit before anything is
/// allocated, and an address that already holds stray lamports can still
/// be claimed.
pub fn initialize_vault(
    ctx: Context<InitializeVault>,
    duration_seconds: u32,
    amount: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let owner = ctx.accounts.owner.key();
    let bump = ctx.bumps.vault;
    let vault_info = ctx.accounts.vault.to_account_info();

    let program_owned = vault_info.owner == &crate::ID;
    let mut record = if program_owned {
        let data = vault_info.try_borrow_data()?;
        Vault::try_deserialize_unchecked(&mut &data[..])?
    } else {
        Vault::default()
    };
    record.lock(owner, amount, duration_seconds, now, bump)?;

    let rent = Rent::get()?.minimum_balance(Vault::LEN);
    let funding = Funding::plan(
        program_owned,
        vault_info.lamports(),
        rent,
        amount,
        ctx.accounts.owner.lamports(),
    )?;

    let seeds: &[&[u8]] = &[VAULT_SEED, owner.as_ref(), &[bump]];
    let signer = &[seeds];
    let system = ctx.accounts.system_program.to_account_info();
    let owner_info = ctx.accounts.owner.to_account_info();

    match funding {
        Funding::Create { lamports } => {
            let cpi_ctx = CpiContext::new_with_signer(
                system,
                CreateAccount {
                    from: owner_info,
                    to: vault_info.clone(),
                },
                signer,
            );
            system_program::create_account(cpi_ctx, lamports, Vault::LEN as u64, &crate::ID)?;
        }
        Funding::Claim { top_up } => {
            system_program::transfer(
                CpiContext::new(
                    system.clone(),
                    Transfer {
                        from: owner_info,
                        to: vault_info.clone(),
                    },
                ),
                top_up,
            )?;
            system_program::allocate(
                CpiContext::new_with_signer(
                    system.clone(),
                    Allocate {
                        account_to_allocate: vault_info.clone(),
                    },
                    signer,
                ),
                Vault::LEN as u64,
            )?;
            system_program::assign(
                CpiContext::new_with_signer(
                    system,
                    Assign {
                        account_to_assign: vault_info.clone(),
                    },
                    signer,
                ),
                &crate::ID,
            )?;
        }
        Funding::TopUp { top_up } => {
            system_program::transfer(
                CpiContext::new(
                    system,
                    Transfer {
                        from: owner_info,
                        to: vault_info.clone(),
                    },
                ),
                top_up,
            )?;
        }
    }

    let mut data = vault_info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    record.try_serialize(&mut writer)?;

    msg!("Vault initialized for owner: {}", owner);
    msg!(
        "Locked {} lamports until timestamp: {}",
        amount,
        record.unlock_timestamp
    );
    Ok(())
}

/// How the vault account receives its storage and the deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Funding {
    /// Nothing lives at the address yet.
    Create { lamports: u64 },
    /// System-owned with a stray balance: top up, allocate and assign.
    Claim { top_up: u64 },
    /// Already program-owned, zeroed storage.
    TopUp { top_up: u64 },
}

impl Funding {
    /// Lamports the owner must move so the vault ends up holding rent plus
    /// `amount`, or `InsufficientFunds` if the owner cannot cover it.
    pub fn plan(
        program_owned: bool,
        vault_lamports: u64,
        rent: u64,
        amount: u64,
        owner_lamports: u64,
    ) -> std::result::Result<Self, VaultError> {
        let due = amount
            .checked_add(rent.saturating_sub(vault_lamports))
            .ok_or(VaultError::ArithmeticOverflow)?;
        if owner_lamports < due {
            return Err(VaultError::InsufficientFunds);
        }

        Ok(if program_owned {
            Funding::TopUp { top_up: due }
        } else if vault_lamports == 0 {
            Funding::Create { lamports: due }
        } else {
            Funding::Claim { top_up: due }
        })
    }
}

#[derive(Accounts)]
pub struct InitializeVault<'info> {
    /// CHECK: address is pinned by the seeds; owner and contents are
    /// checked in the handler before anything is written
    #[account(
        mut,
        seeds = [VAULT_SEED, owner.key().as_ref()],
        bump
    )]
    pub vault: UncheckedAccount<'info>,

    /// Funds the deposit and the rent, and becomes the vault owner
    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}
