use anchor_lang::prelude::*;

use crate::errors::RandomTierNftError;
use crate::state::{Token, TokenLedger};

/// Sequential token issuance. Callers guarantee at most one `mint` per
/// resolved request.
pub trait MintLedger {
    /// Mints the next token id to `owner` and returns it.
    fn mint(
        &mut self,
        owner: Pubkey,
        request_id: u64,
        tier: u8,
        metadata_uri: &str,
    ) -> Result<u64>;
}

impl TokenLedger {
    /// Returns the current counter and advances it.
    pub fn next_token_id(&mut self) -> Result<u64> {
        let token_id = self.token_counter;
        self.token_counter = token_id
            .checked_add(1)
            .ok_or(RandomTierNftError::TokenCounterOverflow)?;
        Ok(token_id)
    }
}

/// Ledger backed by the `TokenLedger` PDA plus the `Token` PDA initialized
/// at the current counter value.
pub struct LedgerAccounts<'a> {
    ledger: &'a mut TokenLedger,
    token: &'a mut Token,
    token_bump: u8,
}

impl<'a> LedgerAccounts<'a> {
    pub fn new(ledger: &'a mut TokenLedger, token: &'a mut Token, token_bump: u8) -> Self {
        Self {
            ledger,
            token,
            token_bump,
        }
    }
}

impl MintLedger for LedgerAccounts<'_> {
    fn mint(
        &mut self,
        owner: Pubkey,
        request_id: u64,
        tier: u8,
        metadata_uri: &str,
    ) -> Result<u64> {
        let token_id = self.ledger.next_token_id()?;
        *self.token = Token {
            token_id,
            owner,
            tier,
            metadata_uri: metadata_uri.to_string(),
            request_id,
            bump: self.token_bump,
        };
        Ok(token_id)
    }
}
