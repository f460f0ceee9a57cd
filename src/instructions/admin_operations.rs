use anchor_lang::prelude::*;

use crate::{
    constants::LEDGER_SEED,
    events::{PauseUpdated, TimeUnitUpdated},
    state::LedgerState,
};

/// Owner-gated operations on the `LedgerState` account.
/// The owner check is the first guard inside each `LedgerState` method.
#[derive(Accounts)]
pub struct LedgerAdmin<'info> {
    /// The account performing the operation, must be the ledger owner
    pub authority: Signer<'info>,

    /// The `LedgerState` account
    /// # PDA Seeds
    /// - `LEDGER_SEED`
    #[account(
        mut,
        seeds = [LEDGER_SEED],
        bump = ledger.bump,
    )]
    pub ledger: Box<Account<'info, LedgerState>>,
}

impl<'info> LedgerAdmin<'info> {
    /// Pause check-ins
    /// # Returns
    /// * `Result<()>` - Ok if check-ins are successfully paused, Err otherwise
    pub fn pause(&mut self) -> Result<()> {
        self.ledger.set_paused(self.authority.key(), true)?;

        msg!("Ledger paused by {}", self.authority.key());

        emit!(PauseUpdated {
            is_paused: true,
            pauser: self.authority.key(),
        });
        Ok(())
    }

    /// Resume check-ins
    /// # Returns
    /// * `Result<()>` - Ok if check-ins are successfully resumed, Err otherwise
    pub fn unpause(&mut self) -> Result<()> {
        self.ledger.set_paused(self.authority.key(), false)?;

        msg!("Ledger unpaused by {}", self.authority.key());

        emit!(PauseUpdated {
            is_paused: false,
            pauser: self.authority.key(),
        });
        Ok(())
    }

    /// Set the check-in window length
    /// # Arguments
    /// * `time_unit` - The new window length in seconds
    /// # Returns
    /// * `Result<()>` - Ok if the window is successfully updated, Err otherwise
    pub fn set_time_unit(&mut self, time_unit: u64) -> Result<()> {
        let old_time_unit = self
            .ledger
            .set_time_unit(self.authority.key(), time_unit)?;

        emit!(TimeUnitUpdated {
            old_time_unit,
            new_time_unit: time_unit,
        });
        Ok(())
    }
}
