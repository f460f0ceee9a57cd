use anchor_lang::prelude::*;

use super::LedgerAdmin;
use crate::events::UpgradeAuthorized;

impl<'info> LedgerAdmin<'info> {
    /// Authorize a new logic module for the ledger.
    /// Only the module pointer and version change; check-in records, ownership
    /// and the pause flag live in their own accounts and fields and are untouched.
    /// # Arguments
    /// * `new_module` - The logic module to activate
    /// # Returns
    /// * `Result<()>` - Ok if the upgrade is authorized, Err otherwise
    pub fn authorize_upgrade(&mut self, new_module: Pubkey) -> Result<()> {
        let previous_module = self
            .ledger
            .authorize_upgrade(self.authority.key(), new_module)?;

        msg!(
            "Logic module upgraded: {} -> {} (v{})",
            previous_module,
            new_module,
            self.ledger.module_version
        );

        emit!(UpgradeAuthorized {
            previous_module,
            new_module,
            module_version: self.ledger.module_version,
            authority: self.authority.key(),
        });
        Ok(())
    }
}
