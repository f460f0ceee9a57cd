#![allow(unexpected_cfgs)]
#![allow(deprecated)]

use anchor_lang::prelude::*;
mod constants;
mod errors;
mod events;
mod instructions;
mod state;
mod utils;

use instructions::*;
use state::UserInfo;

#[cfg(feature = "devnet")]
declare_id!("8fKHkv5HjPJe3PobeTjBAHB7ucBRKrWtPUR84pSeiJjx");
#[cfg(feature = "testnet")]
declare_id!("2KdAxxLQvm1rHrL5oiwqaLAs7vNv6qzZ5aSPoKhmRqbX");
#[cfg(feature = "mainnet")]
declare_id!("FgvWnoqufaV519cGeh57kNKcVAdPcHmF5sERwx8yPQpb");
#[cfg(not(any(feature = "mainnet", feature = "devnet", feature = "testnet")))]
declare_id!("83W4oPJk4yTSwcpqZXKdVnnJs8chcGj9xthUz4xAJDQU");

#[program]
pub mod daily_checkin {
    use super::*;

    /// Initialize the ledger state
    ///
    /// Sets the owner and the check-in window length (one second if not set),
    /// and records this program as the active logic module.
    /// Signer must be the program upgrade authority
    pub fn initialize(
        ctx: Context<Initialize>,
        owner: Pubkey,
        time_unit: Option<u64>,
    ) -> Result<()> {
        ctx.accounts.initialize(owner, time_unit, &ctx.bumps)
    }

    /// Record a check-in for the signer
    ///
    /// A user may check in at most once per time unit. Fails while the ledger is paused.
    pub fn check_in(ctx: Context<CheckIn>) -> Result<()> {
        let event = ctx.accounts.check_in(&ctx.bumps)?;

        // Persist the updated record before the self-CPI carrying the event
        ctx.accounts.ledger.exit(&crate::ID)?;
        ctx.accounts.check_in_record.exit(&crate::ID)?;

        emit_cpi!(event);

        Ok(())
    }

    /// Get the number of check-ins recorded for a user
    pub fn get_check_in_count(ctx: Context<UserInfoView>, user: Pubkey) -> Result<u64> {
        Ok(ctx.accounts.user_info(user)?.count)
    }

    /// Get the timestamp of a user's last check-in, 0 if none
    pub fn get_last_check_in_time(ctx: Context<UserInfoView>, user: Pubkey) -> Result<u64> {
        Ok(ctx.accounts.user_info(user)?.last_timestamp)
    }

    /// Get a user's check-in count and last check-in time
    pub fn get_user_info(ctx: Context<UserInfoView>, user: Pubkey) -> Result<UserInfo> {
        ctx.accounts.user_info(user)
    }

    /// Pause check-ins
    /// Signer must be the ledger owner
    pub fn pause(ctx: Context<LedgerAdmin>) -> Result<()> {
        ctx.accounts.pause()
    }

    /// Resume check-ins
    /// Signer must be the ledger owner
    pub fn unpause(ctx: Context<LedgerAdmin>) -> Result<()> {
        ctx.accounts.unpause()
    }

    /// Authorize a new logic module for the ledger
    ///
    /// Ledger and check-in record layouts are append-only, so every existing
    /// field is read from the same offset by the new module.
    /// Signer must be the ledger owner
    pub fn authorize_upgrade(ctx: Context<LedgerAdmin>, new_module: Pubkey) -> Result<()> {
        ctx.accounts.authorize_upgrade(new_module)
    }

    /// Set the check-in window length in seconds
    /// Signer must be the ledger owner
    pub fn set_time_unit(ctx: Context<LedgerAdmin>, time_unit: u64) -> Result<()> {
        ctx.accounts.set_time_unit(time_unit)
    }

    /// Nominate a new ledger owner
    /// Signer must be the ledger owner
    pub fn transfer_ownership(ctx: Context<LedgerAdmin>, new_owner: Pubkey) -> Result<()> {
        ctx.accounts.transfer_ownership(new_owner)
    }

    /// Accept a pending ownership transfer
    /// Signer must be the nominated owner
    pub fn accept_ownership(ctx: Context<LedgerAdmin>) -> Result<()> {
        ctx.accounts.accept_ownership()
    }
}
