//! The two halves of a mint: the paid request, and the randomness
//! fulfillment that finishes it. Both are generic over the component traits
//! so the instruction handlers and the off-chain tests run the same code.

use anchor_lang::prelude::*;

use crate::events::{NftMinted, NftRequested, NotificationSink, ProgramLog};
use crate::fee_gate::FeeGate;
use crate::ledger::{LedgerAccounts, MintLedger};
use crate::randomness::RandomnessPort;
use crate::registry::{self, RequestAccount, RequestRegistry};
use crate::state::{Token, TokenLedger};
use crate::tiers::{RandomScalar, TierTable};

/// Admits a paid request, asks the provider for randomness and records the
/// request under the provider's id. Returns that id.
pub fn submit_mint_request<P, R, N>(
    fee_gate: &FeeGate,
    port: &mut P,
    registry: &mut R,
    sink: &mut N,
    requester: Pubkey,
    payment: u64,
    requested_at: i64,
) -> Result<u64>
where
    P: RandomnessPort,
    R: RequestRegistry,
    N: NotificationSink,
{
    fee_gate.accept(payment)?;

    let request_id = port.request_randomness()?;
    registry.create(request_id, requester, payment, requested_at)?;

    sink.requested(NftRequested {
        request_id,
        requester,
        fee_paid: payment,
    });
    Ok(request_id)
}

/// Handles a fulfillment from the provider: resolves the request, selects
/// the tier and mints. Unknown and repeated ids fail before anything is
/// minted. Returns the new token id.
pub fn on_fulfilled<R, L, N>(
    tiers: &TierTable,
    registry: &mut R,
    ledger: &mut L,
    sink: &mut N,
    request_id: u64,
    randomness: &RandomScalar,
) -> Result<u64>
where
    R: RequestRegistry,
    L: MintLedger,
    N: NotificationSink,
{
    let owner = registry.resolve(request_id)?;
    let (tier, entry) = tiers.select(randomness);
    let token_id = ledger.mint(owner, request_id, tier, &entry.metadata_uri)?;

    sink.minted(NftMinted {
        token_id,
        owner,
        tier,
        metadata_uri: entry.metadata_uri.clone(),
        request_id,
    });
    Ok(token_id)
}

/// `on_fulfilled` over real accounts. `request_info` is the `MintRequest`
/// PDA for `request_id`, empty if that id was never issued; `token` is the
/// `Token` PDA for the same id. The request is written back only after the
/// mint succeeded.
pub fn fulfill_request_account(
    tiers: &TierTable,
    request_info: &AccountInfo,
    ledger: &mut TokenLedger,
    token: &mut Token,
    token_bump: u8,
    request_id: u64,
    randomness: &RandomScalar,
) -> Result<u64> {
    let mut stored = registry::load_request(request_info)?;

    let token_id = on_fulfilled(
        tiers,
        &mut RequestAccount::loaded(stored.as_mut()),
        &mut LedgerAccounts::new(ledger, token, token_bump),
        &mut ProgramLog,
        request_id,
        randomness,
    )?;

    // on_fulfilled only succeeds for a stored request
    if let Some(request) = &stored {
        registry::store_request(request_info, request)?;
    }
    Ok(token_id)
}
