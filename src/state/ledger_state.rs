use anchor_lang::prelude::*;

use crate::{
    constants::{
        INITIAL_MODULE_VERSION, LEDGER_BUMP_OFFSET, LEDGER_ENTERED_OFFSET,
        LEDGER_INITIALIZED_OFFSET, LEDGER_LOGIC_MODULE_OFFSET, LEDGER_MODULE_VERSION_OFFSET,
        LEDGER_OWNER_OFFSET, LEDGER_PAUSED_OFFSET, LEDGER_PENDING_OWNER_OFFSET,
        LEDGER_RESERVED_OFFSET, LEDGER_STATE_SIZE, LEDGER_TIME_UNIT_OFFSET, MAX_TIME_UNIT,
    },
    errors::CheckInError,
};

/// Ledger State account - singleton holding ownership, pause and upgrade state.
///
/// The layout is append-only. Field offsets are pinned in `constants.rs`; new fields
/// must be carved out of `_reserved` so existing fields never move when the logic
/// module is replaced.
#[account]
#[derive(InitSpace)]
pub struct LedgerState {
    // The owner allowed to pause, unpause and authorize upgrades
    pub owner: Pubkey,

    // Owner nominated by `transfer_ownership`, Pubkey::default() when none
    pub pending_owner: Pubkey,

    // Set once by `initialize`
    pub initialized: bool,

    // True if check-ins are paused
    pub paused: bool,

    // Reentrancy lock, held for the duration of a mutating call
    pub entered: bool,

    // Bump used to derive the PDA for this account
    // Stored so we don't need to recalculate it later
    pub bump: u8,

    // Length of the check-in window in seconds
    pub time_unit: u64,

    // The logic module currently authorized to operate on this ledger
    pub logic_module: Pubkey,

    // Incremented on every authorized upgrade
    pub module_version: u32,

    // Expansion space for successor modules, 40 slots of 32 bytes
    pub _reserved: [[u8; 32]; 40],
}

// Existing offsets must never move
const _: () = {
    assert!(LEDGER_OWNER_OFFSET == 0);
    assert!(LEDGER_PENDING_OWNER_OFFSET == LEDGER_OWNER_OFFSET + 32);
    assert!(LEDGER_INITIALIZED_OFFSET == LEDGER_PENDING_OWNER_OFFSET + 32);
    assert!(LEDGER_PAUSED_OFFSET == LEDGER_INITIALIZED_OFFSET + 1);
    assert!(LEDGER_ENTERED_OFFSET == LEDGER_PAUSED_OFFSET + 1);
    assert!(LEDGER_BUMP_OFFSET == LEDGER_ENTERED_OFFSET + 1);
    assert!(LEDGER_TIME_UNIT_OFFSET == LEDGER_BUMP_OFFSET + 1);
    assert!(LEDGER_LOGIC_MODULE_OFFSET == LEDGER_TIME_UNIT_OFFSET + 8);
    assert!(LEDGER_MODULE_VERSION_OFFSET == LEDGER_LOGIC_MODULE_OFFSET + 32);
    assert!(LEDGER_RESERVED_OFFSET == LEDGER_MODULE_VERSION_OFFSET + 4);
    assert!(LedgerState::INIT_SPACE == LEDGER_STATE_SIZE);
};

impl LedgerState {
    /// Initialize the ledger. Only succeeds against a fresh account.
    /// # Arguments
    /// * `owner` - The ledger owner, must not be the default key
    /// * `time_unit` - Check-in window length in seconds
    /// * `logic_module` - The logic module operating on the ledger
    /// * `bump` - The PDA bump of the ledger account
    pub fn initialize(
        &mut self,
        owner: Pubkey,
        time_unit: u64,
        logic_module: Pubkey,
        bump: u8,
    ) -> Result<()> {
        require!(!self.initialized, CheckInError::AlreadyInitialized);
        require_keys_neq!(owner, Pubkey::default(), CheckInError::InvalidOwner);
        Self::validate_time_unit(time_unit)?;

        self.owner = owner;
        self.pending_owner = Pubkey::default();
        self.initialized = true;
        self.paused = false;
        self.entered = false;
        self.bump = bump;
        self.time_unit = time_unit;
        self.logic_module = logic_module;
        self.module_version = INITIAL_MODULE_VERSION;

        Ok(())
    }

    pub fn validate_time_unit(time_unit: u64) -> Result<()> {
        if !(1..=MAX_TIME_UNIT).contains(&time_unit) {
            return err!(CheckInError::InvalidTimeUnit);
        }

        Ok(())
    }

    pub fn require_initialized(&self) -> Result<()> {
        require!(self.initialized, CheckInError::NotInitialized);
        Ok(())
    }

    pub fn require_owner(&self, caller: Pubkey) -> Result<()> {
        require_keys_eq!(caller, self.owner, CheckInError::NotOwner);
        Ok(())
    }

    pub fn require_not_paused(&self) -> Result<()> {
        require!(!self.paused, CheckInError::ContractPaused);
        Ok(())
    }

    /// Acquire the reentrancy lock
    pub fn enter(&mut self) -> Result<()> {
        require!(!self.entered, CheckInError::Reentrant);
        self.entered = true;
        Ok(())
    }

    /// Release the reentrancy lock. Must run on every exit path after `enter`.
    pub fn leave(&mut self) {
        self.entered = false;
    }

    pub fn set_paused(&mut self, caller: Pubkey, paused: bool) -> Result<()> {
        self.require_owner(caller)?;

        self.paused = paused;
        Ok(())
    }

    /// Change the check-in window length
    /// # Returns
    /// * `Result<u64>` - The previous window length
    pub fn set_time_unit(&mut self, caller: Pubkey, time_unit: u64) -> Result<u64> {
        self.require_owner(caller)?;
        Self::validate_time_unit(time_unit)?;

        let old_time_unit = self.time_unit;
        self.time_unit = time_unit;
        Ok(old_time_unit)
    }

    /// Swap the active logic module. Touches nothing but the module pointer and version.
    /// # Returns
    /// * `Result<Pubkey>` - The logic module that was replaced
    pub fn authorize_upgrade(&mut self, caller: Pubkey, new_module: Pubkey) -> Result<Pubkey> {
        self.require_owner(caller)?;
        require_keys_neq!(new_module, Pubkey::default(), CheckInError::InvalidModule);

        let next_version = self
            .module_version
            .checked_add(1)
            .ok_or(CheckInError::MathOverflow)?;

        let previous_module = self.logic_module;
        self.logic_module = new_module;
        self.module_version = next_version;
        Ok(previous_module)
    }

    pub fn begin_ownership_transfer(&mut self, caller: Pubkey, new_owner: Pubkey) -> Result<()> {
        self.require_owner(caller)?;
        require_keys_neq!(new_owner, Pubkey::default(), CheckInError::InvalidOwner);

        self.pending_owner = new_owner;
        Ok(())
    }

    /// Complete a two-step ownership transfer
    /// # Returns
    /// * `Result<Pubkey>` - The previous owner
    pub fn accept_ownership(&mut self, caller: Pubkey) -> Result<Pubkey> {
        require!(
            self.pending_owner != Pubkey::default() && caller == self.pending_owner,
            CheckInError::NotPendingOwner
        );

        let previous_owner = self.owner;
        self.owner = caller;
        self.pending_owner = Pubkey::default();
        Ok(previous_owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use anchor_lang::error::Error;

    fn fresh_state() -> LedgerState {
        LedgerState {
            owner: Pubkey::default(),
            pending_owner: Pubkey::default(),
            initialized: false,
            paused: false,
            entered: false,
            bump: 0,
            time_unit: 0,
            logic_module: Pubkey::default(),
            module_version: 0,
            _reserved: [[0u8; 32]; 40],
        }
    }

    fn initialized_state(owner: Pubkey) -> LedgerState {
        let mut state = fresh_state();
        state
            .initialize(owner, DEFAULT_TIME_UNIT, crate::ID, 254)
            .unwrap();
        state
    }

    fn serialize(state: &LedgerState) -> Vec<u8> {
        let mut data = Vec::new();
        state.serialize(&mut data).unwrap();
        data
    }

    #[test]
    fn test_initialize_sets_fields() {
        let owner = Pubkey::new_unique();
        let state = initialized_state(owner);

        assert_eq!(state.owner, owner);
        assert_eq!(state.pending_owner, Pubkey::default());
        assert!(state.initialized);
        assert!(!state.paused);
        assert!(!state.entered);
        assert_eq!(state.bump, 254);
        assert_eq!(state.time_unit, DEFAULT_TIME_UNIT);
        assert_eq!(state.logic_module, crate::ID);
        assert_eq!(state.module_version, INITIAL_MODULE_VERSION);
    }

    #[test]
    fn test_initialize_twice_fails() {
        let owner = Pubkey::new_unique();
        let mut state = initialized_state(owner);

        let attacker = Pubkey::new_unique();
        let result = state.initialize(attacker, DEFAULT_TIME_UNIT, crate::ID, 1);
        assert_eq!(result.unwrap_err(), Error::from(CheckInError::AlreadyInitialized));

        // Nothing moved
        assert_eq!(state.owner, owner);
        assert_eq!(state.bump, 254);
    }

    #[test]
    fn test_initialize_default_owner_fails() {
        let mut state = fresh_state();
        let result = state.initialize(Pubkey::default(), DEFAULT_TIME_UNIT, crate::ID, 1);
        assert_eq!(result.unwrap_err(), Error::from(CheckInError::InvalidOwner));
        assert!(!state.initialized);
    }

    #[test]
    fn test_initialize_invalid_time_unit_fails() {
        let mut state = fresh_state();
        let owner = Pubkey::new_unique();

        let result = state.initialize(owner, 0, crate::ID, 1);
        assert_eq!(result.unwrap_err(), Error::from(CheckInError::InvalidTimeUnit));

        let result = state.initialize(owner, MAX_TIME_UNIT + 1, crate::ID, 1);
        assert_eq!(result.unwrap_err(), Error::from(CheckInError::InvalidTimeUnit));
        assert!(!state.initialized);
    }

    #[test]
    fn test_require_initialized() {
        assert_eq!(
            fresh_state().require_initialized().unwrap_err(),
            Error::from(CheckInError::NotInitialized)
        );
        assert!(initialized_state(Pubkey::new_unique())
            .require_initialized()
            .is_ok());
    }

    #[test]
    fn test_pause_and_unpause_by_owner() {
        let owner = Pubkey::new_unique();
        let mut state = initialized_state(owner);

        state.set_paused(owner, true).unwrap();
        assert!(state.paused);
        assert_eq!(
            state.require_not_paused().unwrap_err(),
            Error::from(CheckInError::ContractPaused)
        );

        // Pausing twice leaves the flag set
        state.set_paused(owner, true).unwrap();
        assert!(state.paused);

        state.set_paused(owner, false).unwrap();
        assert!(!state.paused);
        assert!(state.require_not_paused().is_ok());
    }

    #[test]
    fn test_pause_by_non_owner_fails() {
        let owner = Pubkey::new_unique();
        let mut state = initialized_state(owner);
        let stranger = Pubkey::new_unique();

        assert_eq!(
            state.set_paused(stranger, true).unwrap_err(),
            Error::from(CheckInError::NotOwner)
        );
        assert!(!state.paused);

        state.set_paused(owner, true).unwrap();
        assert_eq!(
            state.set_paused(stranger, false).unwrap_err(),
            Error::from(CheckInError::NotOwner)
        );
        assert!(state.paused);
    }

    #[test]
    fn test_reentrancy_lock() {
        let mut state = initialized_state(Pubkey::new_unique());

        state.enter().unwrap();
        assert!(state.entered);
        assert_eq!(state.enter().unwrap_err(), Error::from(CheckInError::Reentrant));

        state.leave();
        assert!(!state.entered);
        assert!(state.enter().is_ok());
    }

    #[test]
    fn test_set_time_unit() {
        let owner = Pubkey::new_unique();
        let mut state = initialized_state(owner);

        let old = state.set_time_unit(owner, SECONDS_PER_DAY).unwrap();
        assert_eq!(old, DEFAULT_TIME_UNIT);
        assert_eq!(state.time_unit, SECONDS_PER_DAY);

        assert_eq!(
            state.set_time_unit(owner, 0).unwrap_err(),
            Error::from(CheckInError::InvalidTimeUnit)
        );
        assert_eq!(
            state
                .set_time_unit(Pubkey::new_unique(), 60)
                .unwrap_err(),
            Error::from(CheckInError::NotOwner)
        );
        assert_eq!(state.time_unit, SECONDS_PER_DAY);
    }

    #[test]
    fn test_authorize_upgrade_by_owner() {
        let owner = Pubkey::new_unique();
        let mut state = initialized_state(owner);
        let new_module = Pubkey::new_unique();

        let previous = state.authorize_upgrade(owner, new_module).unwrap();
        assert_eq!(previous, crate::ID);
        assert_eq!(state.logic_module, new_module);
        assert_eq!(state.module_version, INITIAL_MODULE_VERSION + 1);
    }

    #[test]
    fn test_authorize_upgrade_by_non_owner_fails() {
        let owner = Pubkey::new_unique();
        let mut state = initialized_state(owner);
        let before = serialize(&state);

        let result = state.authorize_upgrade(Pubkey::new_unique(), Pubkey::new_unique());
        assert_eq!(result.unwrap_err(), Error::from(CheckInError::NotOwner));
        assert_eq!(serialize(&state), before);
    }

    #[test]
    fn test_authorize_upgrade_default_module_fails() {
        let owner = Pubkey::new_unique();
        let mut state = initialized_state(owner);

        let result = state.authorize_upgrade(owner, Pubkey::default());
        assert_eq!(result.unwrap_err(), Error::from(CheckInError::InvalidModule));
        assert_eq!(state.logic_module, crate::ID);
    }

    #[test]
    fn test_authorize_upgrade_preserves_everything_else() {
        let owner = Pubkey::new_unique();
        let mut state = initialized_state(owner);
        state.set_paused(owner, true).unwrap();
        state.set_time_unit(owner, 3600).unwrap();

        state.authorize_upgrade(owner, Pubkey::new_unique()).unwrap();

        assert_eq!(state.owner, owner);
        assert!(state.paused);
        assert!(state.initialized);
        assert_eq!(state.time_unit, 3600);
        assert_eq!(state.bump, 254);
        assert_eq!(state._reserved, [[0u8; 32]; 40]);
    }

    #[test]
    fn test_two_step_ownership_transfer() {
        let owner = Pubkey::new_unique();
        let new_owner = Pubkey::new_unique();
        let mut state = initialized_state(owner);

        state.begin_ownership_transfer(owner, new_owner).unwrap();
        assert_eq!(state.pending_owner, new_owner);
        // Ownership does not move until accepted
        assert_eq!(state.owner, owner);

        let previous = state.accept_ownership(new_owner).unwrap();
        assert_eq!(previous, owner);
        assert_eq!(state.owner, new_owner);
        assert_eq!(state.pending_owner, Pubkey::default());

        // The old owner lost its privileges
        assert_eq!(
            state.set_paused(owner, true).unwrap_err(),
            Error::from(CheckInError::NotOwner)
        );
        assert!(state.set_paused(new_owner, true).is_ok());
    }

    #[test]
    fn test_ownership_transfer_guards() {
        let owner = Pubkey::new_unique();
        let mut state = initialized_state(owner);
        let stranger = Pubkey::new_unique();

        assert_eq!(
            state
                .begin_ownership_transfer(stranger, stranger)
                .unwrap_err(),
            Error::from(CheckInError::NotOwner)
        );
        assert_eq!(
            state
                .begin_ownership_transfer(owner, Pubkey::default())
                .unwrap_err(),
            Error::from(CheckInError::InvalidOwner)
        );

        // Nothing pending
        assert_eq!(
            state.accept_ownership(stranger).unwrap_err(),
            Error::from(CheckInError::NotPendingOwner)
        );
        assert_eq!(
            state.accept_ownership(Pubkey::default()).unwrap_err(),
            Error::from(CheckInError::NotPendingOwner)
        );

        state
            .begin_ownership_transfer(owner, Pubkey::new_unique())
            .unwrap();
        assert_eq!(
            state.accept_ownership(stranger).unwrap_err(),
            Error::from(CheckInError::NotPendingOwner)
        );
        assert_eq!(state.owner, owner);
    }

    #[test]
    fn test_ledger_state_size() {
        assert_eq!(LedgerState::INIT_SPACE, LEDGER_STATE_SIZE);
        assert_eq!(serialize(&fresh_state()).len(), LEDGER_STATE_SIZE);
        assert_eq!(LEDGER_RESERVED_SLOTS * SLOT_SIZE, 40 * 32);
    }

    #[test]
    fn test_ledger_state_field_offsets() {
        let owner = Pubkey::new_unique();
        let mut state = initialized_state(owner);
        let pending = Pubkey::new_unique();
        state.begin_ownership_transfer(owner, pending).unwrap();
        state.set_paused(owner, true).unwrap();
        state.set_time_unit(owner, 0x0102_0304).unwrap();
        let module = Pubkey::new_unique();
        state.authorize_upgrade(owner, module).unwrap();

        let data = serialize(&state);

        assert_eq!(
            &data[LEDGER_OWNER_OFFSET..LEDGER_OWNER_OFFSET + 32],
            owner.as_ref()
        );
        assert_eq!(
            &data[LEDGER_PENDING_OWNER_OFFSET..LEDGER_PENDING_OWNER_OFFSET + 32],
            pending.as_ref()
        );
        assert_eq!(data[LEDGER_INITIALIZED_OFFSET], 1);
        assert_eq!(data[LEDGER_PAUSED_OFFSET], 1);
        assert_eq!(data[LEDGER_ENTERED_OFFSET], 0);
        assert_eq!(data[LEDGER_BUMP_OFFSET], 254);
        assert_eq!(
            &data[LEDGER_TIME_UNIT_OFFSET..LEDGER_TIME_UNIT_OFFSET + 8],
            &0x0102_0304u64.to_le_bytes()
        );
        assert_eq!(
            &data[LEDGER_LOGIC_MODULE_OFFSET..LEDGER_LOGIC_MODULE_OFFSET + 32],
            module.as_ref()
        );
        assert_eq!(
            &data[LEDGER_MODULE_VERSION_OFFSET..LEDGER_MODULE_VERSION_OFFSET + 4],
            &(INITIAL_MODULE_VERSION + 1).to_le_bytes()
        );
        assert!(data[LEDGER_RESERVED_OFFSET..].iter().all(|b| *b == 0));
    }

    /// A successor layout that carves a global counter out of the first reserved slot
    #[derive(AnchorSerialize, AnchorDeserialize)]
    struct SuccessorLedgerState {
        owner: Pubkey,
        pending_owner: Pubkey,
        initialized: bool,
        paused: bool,
        entered: bool,
        bump: u8,
        time_unit: u64,
        logic_module: Pubkey,
        module_version: u32,
        total_check_ins: u64,
        _slot_padding: [u8; 24],
        _reserved: [[u8; 32]; 39],
    }

    #[test]
    fn test_successor_layout_reads_existing_state() {
        let owner = Pubkey::new_unique();
        let mut state = initialized_state(owner);
        state.set_paused(owner, true).unwrap();
        let module = Pubkey::new_unique();
        state.authorize_upgrade(owner, module).unwrap();

        let data = serialize(&state);
        let successor = SuccessorLedgerState::deserialize(&mut &data[..]).unwrap();

        assert_eq!(successor.owner, owner);
        assert_eq!(successor.pending_owner, Pubkey::default());
        assert!(successor.initialized);
        assert!(successor.paused);
        assert!(!successor.entered);
        assert_eq!(successor.bump, 254);
        assert_eq!(successor.time_unit, DEFAULT_TIME_UNIT);
        assert_eq!(successor.logic_module, module);
        assert_eq!(successor.module_version, INITIAL_MODULE_VERSION + 1);
        // New field starts zeroed
        assert_eq!(successor.total_check_ins, 0);

        // Writing through the successor layout leaves every original field in place
        let mut upgraded = successor;
        upgraded.total_check_ins = 7;
        let mut upgraded_data = Vec::new();
        upgraded.serialize(&mut upgraded_data).unwrap();
        assert_eq!(upgraded_data.len(), data.len());
        assert_eq!(
            &upgraded_data[..LEDGER_RESERVED_OFFSET],
            &data[..LEDGER_RESERVED_OFFSET]
        );

        let reread = LedgerState::deserialize(&mut &upgraded_data[..]).unwrap();
        assert_eq!(reread.owner, owner);
        assert!(reread.paused);
        assert_eq!(reread.logic_module, module);
    }
}
