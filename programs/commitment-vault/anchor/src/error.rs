use anchor_lang::prelude::*;

/// Every way a vault instruction can be rejected.
///
/// Anchor numbers these from 6000 in declaration order; the Pinocchio build
/// of the program reports the same codes, so keep the order stable.
#[error_code]
pub enum VaultError {
    #[msg("Deposit amount must be greater than zero")]
    InvalidAmount,
    #[msg("Lock duration must be greater than zero seconds")]
    InvalidDuration,
    #[msg("A vault already exists for this owner")]
    AlreadyInitialized,
    #[msg("No vault exists at this address")]
    NotInitialized,
    #[msg("The vault has already been withdrawn")]
    AlreadyWithdrawn,
    #[msg("You are not the owner of this vault")]
    NotOwner,
    #[msg("The vault is still locked. Patience is a virtue.")]
    LockNotExpired,
    #[msg("Owner balance is too low to fund the deposit")]
    InsufficientFunds,
    #[msg("Unlock timestamp overflowed")]
    ArithmeticOverflow,
}

/// Coarse grouping of [`VaultError`] used by callers deciding how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad instruction arguments.
    Validation,
    /// The record is not in the lifecycle stage the instruction needs.
    StateConflict,
    /// Signer is not the vault owner.
    Authorization,
    /// The lock window is still open.
    Temporal,
    /// The funding wallet cannot cover the deposit.
    Resource,
    Arithmetic,
}

impl VaultError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::InvalidAmount | VaultError::InvalidDuration => ErrorKind::Validation,
            VaultError::AlreadyInitialized
            | VaultError::NotInitialized
            | VaultError::AlreadyWithdrawn => ErrorKind::StateConflict,
            VaultError::NotOwner => ErrorKind::Authorization,
            VaultError::LockNotExpired => ErrorKind::Temporal,
            VaultError::InsufficientFunds => ErrorKind::Resource,
            VaultError::ArithmeticOverflow => ErrorKind::Arithmetic,
        }
    }

    /// The custom program error code this variant surfaces as on chain.
    pub fn code(&self) -> u32 {
        anchor_lang::error::ERROR_CODE_OFFSET + *self as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_start_at_anchor_offset() {
        assert_eq!(VaultError::InvalidAmount.code(), 6000);
        assert_eq!(VaultError::LockNotExpired.code(), 6006);
        assert_eq!(VaultError::ArithmeticOverflow.code(), 6008);
    }

    #[test]
    fn classifies_every_variant() {
        assert_eq!(VaultError::InvalidDuration.kind(), ErrorKind::Validation);
        assert_eq!(VaultError::AlreadyWithdrawn.kind(), ErrorKind::StateConflict);
        assert_eq!(VaultError::NotOwner.kind(), ErrorKind::Authorization);
        assert_eq!(VaultError::LockNotExpired.kind(), ErrorKind::Temporal);
        assert_eq!(VaultError::InsufficientFunds.kind(), ErrorKind::Resource);
    }

    #[test]
    fn lock_error_converts_to_anchor_error() {
        let err: anchor_lang::error::Error = VaultError::LockNotExpired.into();
        match err {
            anchor_lang::error::Error::AnchorError(e) => {
                assert_eq!(e.error_code_number, 6006);
                assert_eq!(e.error_name, "LockNotExpired");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
