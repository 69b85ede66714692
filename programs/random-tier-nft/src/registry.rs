use anchor_lang::prelude::*;

use crate::errors::RandomTierNftError;
use crate::state::{MintRequest, RequestStatus};

/// Correlates randomness request ids with the wallets that paid for them.
///
/// Every id resolves at most once; that one-shot transition is what keeps a
/// redelivered fulfillment from minting a second token.
pub trait RequestRegistry {
    /// Records a pending request under an id issued by the randomness
    /// provider.
    fn create(
        &mut self,
        request_id: u64,
        requester: Pubkey,
        fee_paid: u64,
        requested_at: i64,
    ) -> Result<()>;

    /// Marks the request fulfilled and returns its requester.
    fn resolve(&mut self, request_id: u64) -> Result<Pubkey>;
}

impl MintRequest {
    pub fn open(
        request_id: u64,
        requester: Pubkey,
        fee_paid: u64,
        requested_at: i64,
        bump: u8,
    ) -> Self {
        Self {
            request_id,
            requester,
            fee_paid,
            status: RequestStatus::Pending,
            requested_at,
            bump,
        }
    }

    /// Pending -> Fulfilled.
    pub fn fulfill(&mut self) -> Result<Pubkey> {
        require!(
            self.status == RequestStatus::Pending,
            RandomTierNftError::AlreadyFulfilled
        );
        self.status = RequestStatus::Fulfilled;
        Ok(self.requester)
    }
}

/// Registry backed by the single `MintRequest` PDA a transaction touches.
///
/// `request_mint` hands in the freshly initialized account; the PDA seeds
/// already pin it to the id the coordinator is about to issue.
/// `fulfill_randomness` hands in whatever `load_request` found at the PDA
/// for the delivered id, which is `None` when that id was never issued.
pub struct RequestAccount<'a> {
    request: Option<&'a mut MintRequest>,
    bump: u8,
}

impl<'a> RequestAccount<'a> {
    pub fn new(request: &'a mut MintRequest, bump: u8) -> Self {
        Self {
            request: Some(request),
            bump,
        }
    }

    pub fn loaded(request: Option<&'a mut MintRequest>) -> Self {
        let bump = request.as_ref().map_or(0, |request| request.bump);
        Self { request, bump }
    }
}

impl RequestRegistry for RequestAccount<'_> {
    fn create(
        &mut self,
        request_id: u64,
        requester: Pubkey,
        fee_paid: u64,
        requested_at: i64,
    ) -> Result<()> {
        let request = self
            .request
            .as_deref_mut()
            .ok_or(ErrorCode::AccountNotInitialized)?;
        *request = MintRequest::open(request_id, requester, fee_paid, requested_at, self.bump);
        Ok(())
    }

    fn resolve(&mut self, request_id: u64) -> Result<Pubkey> {
        match self.request.as_deref_mut() {
            Some(request) if request.request_id == request_id => request.fulfill(),
            _ => err!(RandomTierNftError::UnknownRequest),
        }
    }
}

/// Reads the `MintRequest` stored in `info`, or `None` if the account was
/// never created.
pub fn load_request(info: &AccountInfo) -> Result<Option<MintRequest>> {
    if info.data_is_empty() {
        return Ok(None);
    }
    require_keys_eq!(*info.owner, crate::ID, ErrorCode::AccountOwnedByWrongProgram);

    let data = info.try_borrow_data()?;
    let mut bytes: &[u8] = &data;
    Ok(Some(MintRequest::try_deserialize(&mut bytes)?))
}

/// Writes `request` back into `info`, discriminator included.
pub fn store_request(info: &AccountInfo, request: &MintRequest) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut dst: &mut [u8] = &mut data;
    request.try_serialize(&mut dst)
}
