use anchor_lang::prelude::*;

use crate::{
    constants::{
        CHECK_IN_RECORD_SIZE, RECORD_BUMP_OFFSET, RECORD_COUNT_OFFSET,
        RECORD_LAST_TIMESTAMP_OFFSET, RECORD_RESERVED_OFFSET, RECORD_USER_OFFSET,
    },
    errors::CheckInError,
    utils::is_new_window,
};

/// CheckInRecord state account - tracks check-ins for a single user.
/// Created on the user's first check-in and never closed.
#[account]
#[derive(InitSpace)]
pub struct CheckInRecord {
    // The user this record belongs to
    pub user: Pubkey,

    // Number of accepted check-ins
    pub count: u64,

    // Cluster timestamp of the last accepted check-in, 0 if none
    pub last_timestamp: u64,

    // The bump used to derive the PDA for this account
    // Stored so we don't need to recalculate it later
    pub bump: u8,

    // Expansion space for successor modules
    pub _reserved: [u8; 64],
}

/// Read-only view of a user's check-in record returned by the query instructions
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UserInfo {
    pub count: u64,
    pub last_timestamp: u64,
}

const _: () = {
    assert!(RECORD_USER_OFFSET == 0);
    assert!(RECORD_COUNT_OFFSET == RECORD_USER_OFFSET + 32);
    assert!(RECORD_LAST_TIMESTAMP_OFFSET == RECORD_COUNT_OFFSET + 8);
    assert!(RECORD_BUMP_OFFSET == RECORD_LAST_TIMESTAMP_OFFSET + 8);
    assert!(RECORD_RESERVED_OFFSET == RECORD_BUMP_OFFSET + 1);
    assert!(CheckInRecord::INIT_SPACE == CHECK_IN_RECORD_SIZE);
};

impl CheckInRecord {
    /// Bind a freshly created record to its user. No-op on a record that is already bound.
    pub fn bind(&mut self, user: Pubkey, bump: u8) {
        if self.user == Pubkey::default() {
            self.user = user;
            self.bump = bump;
        }
    }

    /// Record a check-in at `now`
    /// # Arguments
    /// * `now` - Current cluster timestamp
    /// * `time_unit` - Check-in window length in seconds
    /// # Returns
    /// * `Result<u64>` - The new check-in count
    pub fn record_check_in(&mut self, now: u64, time_unit: u64) -> Result<u64> {
        require!(
            is_new_window(self.count, self.last_timestamp, now, time_unit)?,
            CheckInError::AlreadyCheckedInThisBlock
        );

        let count = self
            .count
            .checked_add(1)
            .ok_or(CheckInError::MathOverflow)?;

        self.count = count;
        self.last_timestamp = now;
        Ok(count)
    }

    pub fn info(&self) -> UserInfo {
        UserInfo {
            count: self.count,
            last_timestamp: self.last_timestamp,
        }
    }
}

impl UserInfo {
    /// Decode the info stored in a CheckInRecord account's data.
    /// Empty data means the user never checked in and reads as the zero record.
    /// # Arguments
    /// * `data` - Raw account data, discriminator included
    /// * `user` - The user the record is expected to belong to
    pub fn from_account_data(data: &[u8], user: Pubkey) -> Result<UserInfo> {
        if data.is_empty() {
            return Ok(UserInfo::default());
        }

        let record = CheckInRecord::try_deserialize(&mut &data[..])
            .map_err(|_| error!(CheckInError::InvalidRecordAccount))?;
        require_keys_eq!(record.user, user, CheckInError::InvalidRecordAccount);

        Ok(record.info())
    }
}
