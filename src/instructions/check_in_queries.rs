use anchor_lang::prelude::*;

use crate::{constants::CHECK_IN_SEED, errors::CheckInError, state::UserInfo};

/// Read-only view of a user's `CheckInRecord`.
/// Works whether or not the ledger is paused, and for users who never checked in.
#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct UserInfoView<'info> {
    /// The `CheckInRecord` account for the user
    /// # PDA Seeds
    /// - `CHECK_IN_SEED`
    /// - User's address
    /// CHECK: The account does not exist until the user's first check-in.
    /// The address is verified by seeds and the data is decoded in `user_info`.
    #[account(
        seeds = [CHECK_IN_SEED, user.as_ref()],
        bump,
    )]
    pub check_in_record: UncheckedAccount<'info>,
}

impl<'info> UserInfoView<'info> {
    /// Load the user's check-in info, the zero record if none exists
    /// # Arguments
    /// * `user` - The user to look up
    /// # Returns
    /// * `Result<UserInfo>` - The user's check-in count and last check-in time
    pub fn user_info(&self, user: Pubkey) -> Result<UserInfo> {
        let record_info = self.check_in_record.to_account_info();
        if record_info.data_is_empty() {
            return Ok(UserInfo::default());
        }

        require_keys_eq!(
            *record_info.owner,
            crate::ID,
            CheckInError::InvalidRecordAccount
        );

        let data = record_info.try_borrow_data()?;
        let info = UserInfo::from_account_data(&data[..], user)?;
        Ok(info)
    }
}
