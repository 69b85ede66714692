//! Off-chain stand-ins for the account-backed components.

use std::collections::{BTreeMap, BTreeSet};

use anchor_lang::prelude::*;

use crate::events::{NftMinted, NftRequested, NotificationSink};
use crate::fee_gate::FeeGate;
use crate::ledger::MintLedger;
use crate::minting;
use crate::randomness::RandomnessPort;
use crate::registry::RequestRegistry;
use crate::state::{MintRequest, TierEntry, Token};
use crate::tiers::{RandomScalar, TierTable};

#[derive(Default)]
pub struct InMemoryRegistry {
    pub requests: BTreeMap<u64, MintRequest>,
}

impl RequestRegistry for InMemoryRegistry {
    fn create(
        &mut self,
        request_id: u64,
        requester: Pubkey,
        fee_paid: u64,
        requested_at: i64,
    ) -> Result<()> {
        let previous = self.requests.insert(
            request_id,
            MintRequest::open(request_id, requester, fee_paid, requested_at, 0),
        );
        assert!(previous.is_none(), "request id {request_id} reused");
        Ok(())
    }

    fn resolve(&mut self, request_id: u64) -> Result<Pubkey> {
        match self.requests.get_mut(&request_id) {
            Some(request) => request.fulfill(),
            None => err!(crate::errors::RandomTierNftError::UnknownRequest),
        }
    }
}

#[derive(Default)]
pub struct InMemoryLedger {
    pub token_counter: u64,
    pub tokens: Vec<Token>,
}

impl MintLedger for InMemoryLedger {
    fn mint(
        &mut self,
        owner: Pubkey,
        request_id: u64,
        tier: u8,
        metadata_uri: &str,
    ) -> Result<u64> {
        let token_id = self.token_counter;
        self.tokens.push(Token {
            token_id,
            owner,
            tier,
            metadata_uri: metadata_uri.to_string(),
            request_id,
            bump: 0,
        });
        self.token_counter += 1;
        Ok(token_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    Requested(NftRequested),
    Minted(NftMinted),
}

#[derive(Default)]
pub struct RecordingSink {
    pub notifications: Vec<Notification>,
}

impl NotificationSink for RecordingSink {
    fn requested(&mut self, event: NftRequested) {
        self.notifications.push(Notification::Requested(event));
    }

    fn minted(&mut self, event: NftMinted) {
        self.notifications.push(Notification::Minted(event));
    }
}

/// Deterministic provider: ids start at 1 and nothing is delivered until
/// the test says so.
pub struct MockCoordinator {
    pub next_request_id: u64,
    pub pending: BTreeSet<u64>,
}

impl Default for MockCoordinator {
    fn default() -> Self {
        Self {
            next_request_id: 1,
            pending: BTreeSet::new(),
        }
    }
}

impl RandomnessPort for MockCoordinator {
    fn request_randomness(&mut self) -> Result<u64> {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.pending.insert(request_id);
        Ok(request_id)
    }
}

/// All components wired together over the common/rare/legendary table.
pub struct Harness {
    pub fee_gate: FeeGate,
    pub tiers: Vec<TierEntry>,
    pub coordinator: MockCoordinator,
    pub registry: InMemoryRegistry,
    pub ledger: InMemoryLedger,
    pub sink: RecordingSink,
}

impl Harness {
    pub fn new(minimum_fee: u64) -> Self {
        let tiers = [(10, "ipfs://common"), (50, "ipfs://rare"), (100, "ipfs://legendary")]
            .into_iter()
            .map(|(threshold, uri)| TierEntry {
                threshold,
                metadata_uri: uri.to_string(),
            })
            .collect();

        Self {
            fee_gate: FeeGate::new(minimum_fee),
            tiers,
            coordinator: MockCoordinator::default(),
            registry: InMemoryRegistry::default(),
            ledger: InMemoryLedger::default(),
            sink: RecordingSink::default(),
        }
    }

    pub fn request(&mut self, requester: Pubkey, payment: u64) -> Result<u64> {
        minting::submit_mint_request(
            &self.fee_gate,
            &mut self.coordinator,
            &mut self.registry,
            &mut self.sink,
            requester,
            payment,
            1_700_000_000,
        )
    }

    /// Delivers `randomness` for `request_id`, whether or not the coordinator
    /// still has it pending, to model redelivery and spoofed callbacks.
    pub fn fulfill(&mut self, request_id: u64, randomness: RandomScalar) -> Result<u64> {
        self.coordinator.pending.remove(&request_id);
        let tiers = TierTable::new(&self.tiers)?;
        minting::on_fulfilled(
            &tiers,
            &mut self.registry,
            &mut self.ledger,
            &mut self.sink,
            request_id,
            &randomness,
        )
    }
}
