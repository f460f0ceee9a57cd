use anchor_lang::prelude::*;

use super::LedgerAdmin;
use crate::events::{OwnershipTransferStarted, OwnershipTransferred};

impl<'info> LedgerAdmin<'info> {
    /// Nominate a new owner. Ownership moves once the nominee accepts.
    /// # Arguments
    /// * `new_owner` - The public key of the nominated owner
    pub fn transfer_ownership(&mut self, new_owner: Pubkey) -> Result<()> {
        self.ledger
            .begin_ownership_transfer(self.authority.key(), new_owner)?;

        emit!(OwnershipTransferStarted {
            owner: self.authority.key(),
            pending_owner: new_owner,
        });
        Ok(())
    }

    /// Accept a pending ownership transfer. The signer must be the nominee.
    pub fn accept_ownership(&mut self) -> Result<()> {
        let previous_owner = self.ledger.accept_ownership(self.authority.key())?;

        msg!(
            "Ownership transferred: {} -> {}",
            previous_owner,
            self.authority.key()
        );

        emit!(OwnershipTransferred {
            previous_owner,
            new_owner: self.authority.key(),
        });
        Ok(())
    }
}
