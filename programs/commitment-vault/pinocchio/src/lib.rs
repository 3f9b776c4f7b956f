#![cfg_attr(not(test), no_std)]

#[cfg(all(not(test), not(feature = "no-entrypoint")))]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}

use pinocchio::{
    cpi::{Seed, Signer},
    entrypoint,
    sysvars::{clock::Clock, rent::Rent, Sysvar},
    AccountView,
    Address,
    ProgramResult,
};
use pinocchio_log::log;
use pinocchio_system::instructions::{Allocate, Assign, CreateAccount, Transfer};
use solana_program_error::ProgramError;

pub mod error;
pub mod state;
use error::VaultError;
use state::VaultState;

const ID: Address = Address::new_from_array([
    0xC7, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11,
    0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11,
    0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11,
    0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x02,
]);

pub const VAULT_SEED: &[u8] = b"vault";

/// Vault address and canonical bump for `owner`.
pub fn derive_vault_address(owner: &Address) -> (Address, u8) {
    Address::find_program_address(&[VAULT_SEED, owner.as_ref()], &ID)
}

entrypoint!(process_instruction);

/// Instruction data:
/// - `[0][duration_seconds: u32 LE][amount: u64 LE]` initialize
/// - `[1]` withdraw
pub fn process_instruction(
    program_id: &Address,
    accounts: &[AccountView],
    instruction_data: &[u8],
) -> ProgramResult {
    if program_id != &ID {
        return Err(ProgramError::IncorrectProgramId);
    }

    match instruction_data.split_first() {
        Some((&0, args)) => {
            let duration: [u8; 4] = args
                .get(0..4)
                .and_then(|b| b.try_into().ok())
                .ok_or(ProgramError::InvalidInstructionData)?;
            let amount: [u8; 8] = args
                .get(4..12)
                .and_then(|b| b.try_into().ok())
                .ok_or(ProgramError::InvalidInstructionData)?;
            initialize(
                accounts,
                u32::from_le_bytes(duration),
                u64::from_le_bytes(amount),
            )
        }
        Some((&1, _)) => withdraw(accounts),
        _ => Err(ProgramError::InvalidInstructionData),
    }
}

/// Accounts expected:
/// 0. `[signer, writable]` Owner, funds deposit and rent
/// 1. `[writable]` Vault PDA `[b"vault", owner]`
/// 2. `[]` System program
fn initialize(accounts: &[AccountView], duration_seconds: u32, amount: u64) -> ProgramResult {
    let [owner_info, vault_info, _system_program] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    if !owner_info.is_signer() {
        return Err(ProgramError::MissingRequiredSignature);
    }

    let (expected_vault, bump) = derive_vault_address(owner_info.address());
    if vault_info.address() != &expected_vault {
        return Err(ProgramError::InvalidSeeds);
    }

    // Storage may already exist zeroed, so the flag decides, not existence.
    let allocated = vault_info.owned_by(&ID);
    if allocated && VaultState::is_initialized(&vault_info.try_borrow()?) {
        return Err(VaultError::AlreadyInitialized.into());
    }
    if amount == 0 {
        return Err(VaultError::InvalidAmount.into());
    }
    if duration_seconds == 0 {
        return Err(VaultError::InvalidDuration.into());
    }

    let now = Clock::get()?.unix_timestamp;
    let unlock_timestamp = now
        .checked_add(i64::from(duration_seconds))
        .ok_or(VaultError::ArithmeticOverflow)?;

    let rent = Rent::get()?.minimum_balance(VaultState::LEN);
    let required = amount
        .checked_add(rent.saturating_sub(vault_info.lamports()))
        .ok_or(VaultError::ArithmeticOverflow)?;
    if owner_info.lamports() < required {
        return Err(VaultError::InsufficientFunds.into());
    }

    let bump_seed = [bump];
    let seeds = [
        Seed::from(VAULT_SEED),
        Seed::from(owner_info.address().as_ref()),
        Seed::from(bump_seed.as_slice()),
    ];
    let signers = [Signer::from(&seeds)];

    if allocated {
        Transfer {
            from: owner_info,
            to: vault_info,
            lamports: required,
        }
        .invoke()?;
    } else if vault_info.lamports() == 0 {
        CreateAccount {
            from: owner_info,
            to: vault_info,
            lamports: required,
            space: VaultState::LEN as u64,
            owner: &ID,
        }
        .invoke_signed(&signers)?;
    } else {
        // System-owned with a stray balance: top up, allocate, assign.
        Transfer {
            from: owner_info,
            to: vault_info,
            lamports: required,
        }
        .invoke()?;
        Allocate {
            account: vault_info,
            space: VaultState::LEN as u64,
        }
        .invoke_signed(&signers)?;
        Assign {
            account: vault_info,
            owner: &ID,
        }
        .invoke_signed(&signers)?;
    }

    let state = VaultState {
        initialized: true,
        owner: *owner_info.address(),
        locked_amount: amount,
        unlock_timestamp,
        bump,
    };
    state.serialize(&mut vault_info.try_borrow_mut()?)?;

    log!("Locked {} lamports until timestamp: {}", amount, unlock_timestamp);
    Ok(())
}

/// Zeros the record, then drains every lamport (deposit plus rent) to the
/// owner so the runtime reclaims the account.
///
/// Accounts expected:
/// 0. `[signer, writable]` Owner
/// 1. `[writable]` Vault PDA
fn withdraw(accounts: &[AccountView]) -> ProgramResult {
    let [owner_info, vault_info] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    if !owner_info.is_signer() {
        return Err(ProgramError::MissingRequiredSignature);
    }

    if !vault_info.owned_by(&ID) {
        return Err(VaultError::NotInitialized.into());
    }

    let state = VaultState::deserialize(&vault_info.try_borrow()?)?;
    if !state.initialized {
        return Err(VaultError::NotInitialized.into());
    }
    if state.locked_amount == 0 {
        return Err(VaultError::AlreadyWithdrawn.into());
    }

    let expected_vault = Address::create_program_address(
        &[VAULT_SEED, state.owner.as_ref(), &[state.bump]],
        &ID,
    )
    .map_err(|_| ProgramError::InvalidSeeds)?;
    if vault_info.address() != &expected_vault {
        return Err(ProgramError::InvalidSeeds);
    }

    if owner_info.address() != &state.owner {
        return Err(VaultError::NotOwner.into());
    }

    let now = Clock::get()?.unix_timestamp;
    if now < state.unlock_timestamp {
        log!("Vault still locked until timestamp: {}", state.unlock_timestamp);
        return Err(VaultError::LockNotExpired.into());
    }

    vault_info.try_borrow_mut()?.fill(0);

    let vault_lamports = vault_info.lamports();
    let owner_lamports = owner_info
        .lamports()
        .checked_add(vault_lamports)
        .ok_or(VaultError::ArithmeticOverflow)?;
    vault_info.set_lamports(0);
    owner_info.set_lamports(owner_lamports);

    log!("Time lock passed. Released {} lamports", state.locked_amount);
    Ok(())
}
