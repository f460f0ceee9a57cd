use anchor_lang::prelude::*;

use crate::{
    constants::{DEFAULT_TIME_UNIT, LEDGER_SEED},
    errors::CheckInError,
    events::LedgerInitialized,
    state::LedgerState,
};

/// Initialize the `LedgerState` account
/// Requires the signer to be the program upgrade authority, so a stray caller
/// cannot claim ownership of a freshly deployed program.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Pays for account creation
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The account initializing the ledger, must be the program upgrade authority
    pub authority: Signer<'info>,

    /// The `LedgerState` account to be initialized
    /// # PDA Seeds
    /// - `LEDGER_SEED`
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + LedgerState::INIT_SPACE,
        seeds = [LEDGER_SEED],
        bump
    )]
    pub ledger: Box<Account<'info, LedgerState>>,

    /// The Daily Check-In program
    #[account(address = crate::ID)]
    pub program: Program<'info, crate::program::DailyCheckin>,

    /// The ProgramData account of the Daily Check-In program
    #[account(
        constraint =
            program_data.upgrade_authority_address == Some(authority.key()) @ CheckInError::NotUpgradeAuthority
    )]
    pub program_data: Account<'info, ProgramData>,

    /// The system program
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    /// Initialize the ledger with its owner and check-in window
    /// Validates that the signer is the program upgrade authority
    /// # Arguments
    /// * `owner` - The ledger owner
    /// * `time_unit` - Optional check-in window length in seconds, `DEFAULT_TIME_UNIT` if not set
    /// * `bumps` - The bumps used for PDA derivation
    /// # Returns
    /// * `Result<()>` - Ok if successful, Err otherwise
    pub fn initialize(
        &mut self,
        owner: Pubkey,
        time_unit: Option<u64>,
        bumps: &InitializeBumps,
    ) -> Result<()> {
        let time_unit = time_unit.unwrap_or(DEFAULT_TIME_UNIT);

        // Verify the program upgrade authority
        if let Some(program_data_address) = self.program.programdata_address()? {
            require_keys_eq!(
                program_data_address,
                self.program_data.key(),
                CheckInError::ProgramMismatch
            );
        } else {
            return Err(CheckInError::ProgramMismatch.into());
        }

        self.ledger
            .initialize(owner, time_unit, crate::ID, bumps.ledger)?;

        msg!("Ledger initialized, owner: {}", owner);

        emit!(LedgerInitialized {
            owner,
            time_unit,
            logic_module: crate::ID,
        });

        Ok(())
    }
}
