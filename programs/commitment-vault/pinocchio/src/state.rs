use pinocchio::Address;
use solana_program_error::ProgramError;

/// Vault account layout
///
/// - Byte 0: initialized flag (0 = never created, 1 = initialized)
/// - Bytes 1-32: owner public key
/// - Bytes 33-40: locked amount (u64 LE)
/// - Bytes 41-48: unlock timestamp (i64 LE)
/// - Byte 49: canonical bump
pub struct VaultState {
    pub initialized: bool,
    pub owner: Address,
    pub locked_amount: u64,
    pub unlock_timestamp: i64,
    pub bump: u8,
}

impl VaultState {
    pub const LEN: usize = 1 + 32 + 8 + 8 + 1; // 50 bytes
    pub const INITIALIZED: u8 = 1;

    const OWNER: usize = 1;
    const AMOUNT: usize = 33;
    const UNLOCK: usize = 41;
    const BUMP: usize = 49;

    /// Reads only the flag; zeroed storage counts as uninitialized.
    pub fn is_initialized(data: &[u8]) -> bool {
        data.first() == Some(&Self::INITIALIZED)
    }

    pub fn serialize(&self, data: &mut [u8]) -> Result<(), ProgramError> {
        let data = data
            .get_mut(..Self::LEN)
            .ok_or(ProgramError::AccountDataTooSmall)?;
        data[0] = self.initialized as u8;
        data[Self::OWNER..Self::AMOUNT].copy_from_slice(self.owner.as_ref());
        data[Self::AMOUNT..Self::UNLOCK].copy_from_slice(&self.locked_amount.to_le_bytes());
        data[Self::UNLOCK..Self::BUMP].copy_from_slice(&self.unlock_timestamp.to_le_bytes());
        data[Self::BUMP] = self.bump;
        Ok(())
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, ProgramError> {
        let data = data.get(..Self::LEN).ok_or(ProgramError::AccountDataTooSmall)?;
        let owner: [u8; 32] = data[Self::OWNER..Self::AMOUNT]
            .try_into()
            .map_err(|_| ProgramError::InvalidAccountData)?;
        let locked_amount = data[Self::AMOUNT..Self::UNLOCK]
            .try_into()
            .map(u64::from_le_bytes)
            .map_err(|_| ProgramError::InvalidAccountData)?;
        let unlock_timestamp = data[Self::UNLOCK..Self::BUMP]
            .try_into()
            .map(i64::from_le_bytes)
            .map_err(|_| ProgramError::InvalidAccountData)?;

        Ok(VaultState {
            initialized: data[0] == Self::INITIALIZED,
            owner: Address::new_from_array(owner),
            locked_amount,
            unlock_timestamp,
            bump: data[Self::BUMP],
        })
    }
}
