use anchor_lang::prelude::*;

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NftRequested {
    pub request_id: u64,
    pub requester: Pubkey,
    pub fee_paid: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NftMinted {
    pub token_id: u64,
    pub owner: Pubkey,
    pub tier: u8,
    pub metadata_uri: String,
    pub request_id: u64,
}

/// Outbound message to the randomness oracle. The oracle answers with
/// `fulfill_randomness(request_id, randomness)`.
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomnessRequested {
    pub request_id: u64,
    pub key_hash: [u8; 32],
    pub request_confirmations: u16,
    pub callback_compute_limit: u32,
    pub num_words: u32,
}

/// Observer hook for the two request lifecycle transitions.
pub trait NotificationSink {
    fn requested(&mut self, event: NftRequested);
    fn minted(&mut self, event: NftMinted);
}

/// Emits events into the transaction log, with a readable log line beside
/// each one.
pub struct ProgramLog;

impl NotificationSink for ProgramLog {
    fn requested(&mut self, event: NftRequested) {
        msg!(
            "Random Tier NFT: request {} accepted from {} ({} lamports)",
            event.request_id,
            event.requester,
            event.fee_paid
        );
        emit!(event);
    }

    fn minted(&mut self, event: NftMinted) {
        msg!(
            "Random Tier NFT: token {} minted to {} as tier {} ({})",
            event.token_id,
            event.owner,
            event.tier,
            event.metadata_uri
        );
        emit!(event);
    }
}
