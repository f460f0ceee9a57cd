use anchor_lang::prelude::*;

#[error_code]
pub enum CheckInError {
    #[msg("Ledger already initialized")]
    AlreadyInitialized,
    #[msg("Ledger not initialized")]
    NotInitialized,
    #[msg("Invalid owner")]
    InvalidOwner,
    #[msg("Signer is not the ledger owner")]
    NotOwner,
    #[msg("Signer is not the pending owner")]
    NotPendingOwner,
    #[msg("Signer is not the program upgrade authority")]
    NotUpgradeAuthority,
    #[msg("ProgramMismatch")]
    ProgramMismatch,
    #[msg("Already checked in during the current time unit")]
    AlreadyCheckedInThisBlock,
    #[msg("Ledger is paused")]
    ContractPaused,
    #[msg("Reentrant call")]
    Reentrant,
    #[msg("Invalid time unit")]
    InvalidTimeUnit,
    #[msg("Invalid logic module")]
    InvalidModule,
    #[msg("Invalid check-in record account")]
    InvalidRecordAccount,
    #[msg("Cluster clock returned a negative timestamp")]
    InvalidTimestamp,
    #[msg("Math Overflow")]
    MathOverflow,
}
