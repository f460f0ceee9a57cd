use anchor_lang::prelude::*;

use crate::{
    constants::{CHECK_IN_SEED, LEDGER_SEED},
    errors::CheckInError,
    events::CheckedIn,
    state::{CheckInRecord, LedgerState},
};

/// Record a check-in for the signing user
#[event_cpi]
#[derive(Accounts)]
pub struct CheckIn<'info> {
    /// The user checking in, pays for the record on first check-in
    #[account(mut)]
    pub user: Signer<'info>,

    /// The `LedgerState` account gating check-ins
    /// # PDA Seeds
    /// - `LEDGER_SEED`
    #[account(
        mut,
        seeds = [LEDGER_SEED],
        bump = ledger.bump,
    )]
    pub ledger: Box<Account<'info, LedgerState>>,

    /// The `CheckInRecord` account for the user, created on first check-in
    /// # PDA Seeds
    /// - `CHECK_IN_SEED`
    /// - User's address
    #[account(
        init_if_needed,
        payer = user,
        space = 8 + CheckInRecord::INIT_SPACE,
        seeds = [CHECK_IN_SEED, user.key().as_ref()],
        bump,
    )]
    pub check_in_record: Box<Account<'info, CheckInRecord>>,

    /// The system program
    pub system_program: Program<'info, System>,
}

impl<'info> CheckIn<'info> {
    /// Apply the check-in transition against the current cluster clock
    /// # Arguments
    /// * `bumps` - The bumps used for PDA derivation
    /// # Returns
    /// * `Result<CheckedIn>` - The audit event to emit once state is updated
    pub fn check_in(&mut self, bumps: &CheckInBumps) -> Result<CheckedIn> {
        let clock = Clock::get()?;

        apply_check_in(
            &mut self.ledger,
            &mut self.check_in_record,
            self.user.key(),
            bumps.check_in_record,
            &clock,
        )
    }
}

/// The check-in state transition.
/// Pause and reentrancy checks run before the record is touched and the lock is
/// released on every exit path. The caller emits the returned event afterwards.
/// # Arguments
/// * `ledger` - The ledger gating the check-in
/// * `record` - The user's check-in record, possibly freshly created
/// * `user` - The user checking in
/// * `record_bump` - The bump of the record PDA
/// * `clock` - The current cluster clock
/// # Returns
/// * `Result<CheckedIn>` - The audit event describing the accepted check-in
pub fn apply_check_in(
    ledger: &mut LedgerState,
    record: &mut CheckInRecord,
    user: Pubkey,
    record_bump: u8,
    clock: &Clock,
) -> Result<CheckedIn> {
    ledger.require_initialized()?;
    ledger.require_not_paused()?;
    ledger.enter()?;

    let result = advance_record(ledger.time_unit, record, user, record_bump, clock);
    ledger.leave();
    let count = result?;

    #[cfg(feature = "verbose")]
    msg!("Check-in #{} for {} at slot {}", count, user, clock.slot);

    Ok(CheckedIn {
        user,
        timestamp: record.last_timestamp,
        count,
        slot: clock.slot,
    })
}

fn advance_record(
    time_unit: u64,
    record: &mut CheckInRecord,
    user: Pubkey,
    record_bump: u8,
    clock: &Clock,
) -> Result<u64> {
    let now = u64::try_from(clock.unix_timestamp)
        .map_err(|_| error!(CheckInError::InvalidTimestamp))?;

    record.bind(user, record_bump);
    require_keys_eq!(record.user, user, CheckInError::InvalidRecordAccount);

    record.record_check_in(now, time_unit)
}
