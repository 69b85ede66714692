use anchor_lang::prelude::*;

pub const CONFIG_SEED: &[u8] = b"config";
pub const COORDINATOR_SEED: &[u8] = b"coordinator";
pub const LEDGER_SEED: &[u8] = b"ledger";
pub const TREASURY_SEED: &[u8] = b"treasury";
pub const MINT_REQUEST_SEED: &[u8] = b"mint_request";
pub const TOKEN_SEED: &[u8] = b"token";

/// Upper bound on tiers; must match the `max_len` on `Config::tiers`.
pub const MAX_TIERS: usize = 8;

/// Upper bound on URI bytes; must match every `max_len` on a metadata URI.
pub const MAX_METADATA_URI_LEN: usize = 200;

/// One rarity bucket. `threshold` is the exclusive upper bound of the
/// bucket in the reduced scalar range; the lower bound is the previous
/// entry's threshold (or 0 for the first entry).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct TierEntry {
    pub threshold: u64,

    /// Opaque locator, e.g. `ipfs://<cid>`
    #[max_len(200)]
    pub metadata_uri: String,
}

/// Parameters forwarded to the oracle with every randomness request.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct RandomnessParams {
    /// Oracle key/lane the request should be served from
    pub key_hash: [u8; 32],

    /// Slots the oracle waits before answering
    pub request_confirmations: u16,

    /// Compute budget the oracle should attach to the fulfillment transaction
    pub callback_compute_limit: u32,
}

/// Program-wide mint configuration, written once by `initialize`.
/// Seeds: [b"config"]
#[account]
#[derive(InitSpace)]
pub struct Config {
    /// Minimum payment in lamports accepted by `request_mint`
    pub minimum_fee: u64,

    /// Ordered tier table, validated by `TierTable::new`
    #[max_len(8)]
    pub tiers: Vec<TierEntry>,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Bump seed of the treasury PDA that receives mint fees
    pub treasury_bump: u8,
}

/// Request tracking owned by the randomness provider side of the program.
/// Seeds: [b"coordinator"]
#[account]
#[derive(InitSpace)]
pub struct RandomnessCoordinator {
    /// Oracle key that is allowed to deliver fulfillments
    pub authority: Pubkey,

    /// Next request id to hand out
    pub request_counter: u64,

    pub params: RandomnessParams,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

/// Token id allocation.
/// Seeds: [b"ledger"]
#[account]
#[derive(InitSpace)]
pub struct TokenLedger {
    /// Id of the next token to mint; equals the number of tokens minted
    pub token_counter: u64,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum RequestStatus {
    Pending,
    Fulfilled,
}

/// A caller's paid request, waiting for (or done with) its randomness.
/// Seeds: [b"mint_request", request_id.to_le_bytes()]
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct MintRequest {
    /// Identifier assigned by the randomness coordinator
    pub request_id: u64,

    /// The wallet that paid and will own the token
    pub requester: Pubkey,

    /// Lamports paid, may exceed the minimum fee
    pub fee_paid: u64,

    pub status: RequestStatus,

    /// Unix timestamp of the request
    pub requested_at: i64,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

/// A minted collectible.
/// Seeds: [b"token", request_id.to_le_bytes()]
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct Token {
    /// Sequential id in fulfillment order, starting at 0
    pub token_id: u64,

    pub owner: Pubkey,

    /// Index of the selected tier in `Config::tiers`
    pub tier: u8,

    /// Copied from the selected tier
    #[max_len(200)]
    pub metadata_uri: String,

    /// The request whose fulfillment produced this token
    pub request_id: u64,

    /// Bump seed for PDA derivation
    pub bump: u8,
}
