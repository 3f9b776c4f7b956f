use solana_program_error::ProgramError;

/// Same codes as the Anchor build of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum VaultError {
    InvalidAmount = 6000,
    InvalidDuration = 6001,
    AlreadyInitialized = 6002,
    NotInitialized = 6003,
    AlreadyWithdrawn = 6004,
    NotOwner = 6005,
    LockNotExpired = 6006,
    InsufficientFunds = 6007,
    ArithmeticOverflow = 6008,
}

impl From<VaultError> for ProgramError {
    fn from(e: VaultError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
