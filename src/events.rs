use anchor_lang::prelude::*;

/// Event emitted when the ledger is initialized
/// Fields:
/// - owner: The public key of the ledger owner
/// - time_unit: The check-in window length in seconds
/// - logic_module: The logic module active at initialization
#[event]
pub struct LedgerInitialized {
    pub owner: Pubkey,
    pub time_unit: u64,
    pub logic_module: Pubkey,
}

/// Audit event emitted for every accepted check-in
/// Fields:
/// - user: The public key of the user who checked in
/// - timestamp: The cluster timestamp of the check-in
/// - count: The user's check-in count after this check-in
/// - slot: The slot the check-in landed in
#[event]
#[derive(Debug, PartialEq, Eq)]
pub struct CheckedIn {
    pub user: Pubkey,
    pub timestamp: u64,
    pub count: u64,
    pub slot: u64,
}

/// Event emitted when the ledger is paused or unpaused
/// Fields:
/// - is_paused: Boolean indicating if the ledger is paused
/// - pauser: The address of the owner who performed the pause/unpause action
#[event]
pub struct PauseUpdated {
    pub is_paused: bool,
    pub pauser: Pubkey,
}

/// Event emitted when the owner authorizes a new logic module
/// Fields:
/// - previous_module: The logic module being replaced
/// - new_module: The logic module now active
/// - module_version: The version counter after the swap
/// - authority: The owner who authorized the upgrade
#[event]
pub struct UpgradeAuthorized {
    pub previous_module: Pubkey,
    pub new_module: Pubkey,
    pub module_version: u32,
    pub authority: Pubkey,
}

/// Event emitted when the check-in window is changed
/// Fields:
/// - old_time_unit: The previous window length in seconds
/// - new_time_unit: The new window length in seconds
#[event]
pub struct TimeUnitUpdated {
    pub old_time_unit: u64,
    pub new_time_unit: u64,
}

/// Event emitted when the owner nominates a new owner
#[event]
pub struct OwnershipTransferStarted {
    pub owner: Pubkey,
    pub pending_owner: Pubkey,
}

/// Event emitted when the pending owner accepts ownership
#[event]
pub struct OwnershipTransferred {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}
