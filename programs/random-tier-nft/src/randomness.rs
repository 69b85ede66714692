use anchor_lang::prelude::*;

use crate::errors::RandomTierNftError;
use crate::events::RandomnessRequested;
use crate::state::RandomnessCoordinator;

/// Outbound half of the randomness provider contract.
///
/// The provider assigns the request id. It later delivers
/// `(request_id, randomness)` at least once, eventually, or never, with no
/// ordering relative to other requests.
pub trait RandomnessPort {
    fn request_randomness(&mut self) -> Result<u64>;
}

impl RandomnessCoordinator {
    /// Returns the current counter and advances it.
    pub fn next_request_id(&mut self) -> Result<u64> {
        let request_id = self.request_counter;
        self.request_counter = request_id
            .checked_add(1)
            .ok_or(RandomTierNftError::RequestCounterOverflow)?;
        Ok(request_id)
    }

    /// Fulfillments are only accepted from the configured oracle key.
    pub fn check_oracle(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(
            *signer,
            self.authority,
            RandomTierNftError::UnauthorizedOracle
        );
        Ok(())
    }
}

/// Port backed by the on-chain coordinator account. Each request is
/// announced as a `RandomnessRequested` event for the oracle to pick up.
pub struct CoordinatorPort<'a> {
    coordinator: &'a mut RandomnessCoordinator,
}

impl<'a> CoordinatorPort<'a> {
    pub fn new(coordinator: &'a mut RandomnessCoordinator) -> Self {
        Self { coordinator }
    }
}

impl RandomnessPort for CoordinatorPort<'_> {
    fn request_randomness(&mut self) -> Result<u64> {
        let request_id = self.coordinator.next_request_id()?;
        let params = self.coordinator.params;

        msg!(
            "Random Tier NFT: randomness request {} sent to oracle {}",
            request_id,
            self.coordinator.authority
        );
        emit!(RandomnessRequested {
            request_id,
            key_hash: params.key_hash,
            request_confirmations: params.request_confirmations,
            callback_compute_limit: params.callback_compute_limit,
            num_words: 1,
        });

        Ok(request_id)
    }
}
