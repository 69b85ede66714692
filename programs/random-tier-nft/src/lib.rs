use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

pub mod errors;
pub mod events;
pub mod fee_gate;
pub mod ledger;
pub mod minting;
pub mod randomness;
pub mod registry;
pub mod state;
pub mod tiers;

#[cfg(test)]
mod testing;

use errors::RandomTierNftError;
use events::ProgramLog;
use fee_gate::FeeGate;
use randomness::CoordinatorPort;
use registry::RequestAccount;
use state::*;
use tiers::{RandomScalar, TierTable};

declare_id!("EXrwzFo9jLbnAm3fcsUzLmhU79aLZpMp4nGZV4vSnYjB");

#[program]
pub mod random_tier_nft {
    use super::*;

    /// Create the config, coordinator and ledger accounts. Runs once; the
    /// fee and tier table are fixed from then on.
    ///
    /// `tiers` are cumulative thresholds in ascending order, e.g.
    /// [(10, common), (50, rare), (100, legendary)] gives 10% / 40% / 50%.
    pub fn initialize(
        ctx: Context<Initialize>,
        minimum_fee: u64,
        tiers: Vec<TierEntry>,
        oracle: Pubkey,
        params: RandomnessParams,
    ) -> Result<()> {
        check_initializer(&ctx.accounts.program_data, &ctx.accounts.admin.key())?;
        let modulus = TierTable::new(&tiers)?.modulus();
        let tier_count = tiers.len();

        let config = &mut ctx.accounts.config;
        config.minimum_fee = minimum_fee;
        config.tiers = tiers;
        config.bump = ctx.bumps.config;
        config.treasury_bump = ctx.bumps.treasury;

        let coordinator = &mut ctx.accounts.coordinator;
        coordinator.authority = oracle;
        coordinator.request_counter = 0;
        coordinator.params = params;
        coordinator.bump = ctx.bumps.coordinator;

        let ledger = &mut ctx.accounts.ledger;
        ledger.token_counter = 0;
        ledger.bump = ctx.bumps.ledger;

        let rent_exempt_minimum = Rent::get()?.minimum_balance(0);
        let top_up = fee_gate::treasury_top_up(ctx.accounts.treasury.lamports(), rent_exempt_minimum);
        if top_up > 0 {
            system_program::transfer(
                CpiContext::new(
                    ctx.accounts.system_program.to_account_info(),
                    Transfer {
                        from: ctx.accounts.admin.to_account_info(),
                        to: ctx.accounts.treasury.to_account_info(),
                    },
                ),
                top_up,
            )?;
        }

        msg!(
            "Random Tier NFT: initialized by {} with fee {} lamports, {} tiers over modulus {}, oracle {}",
            ctx.accounts.admin.key(),
            minimum_fee,
            tier_count,
            modulus,
            oracle
        );

        Ok(())
    }

    /// Pay the mint fee and ask the oracle for randomness. The token is
    /// minted later, by `fulfill_randomness`.
    pub fn request_mint(ctx: Context<RequestMint>, payment: u64) -> Result<()> {
        let request_bump = ctx.bumps.mint_request;
        let accounts = &mut *ctx.accounts;
        let requester = accounts.requester.key();
        let requested_at = Clock::get()?.unix_timestamp;

        let fee_gate = FeeGate::new(accounts.config.minimum_fee);
        let mut port = CoordinatorPort::new(&mut accounts.coordinator);
        let mut registry = RequestAccount::new(&mut accounts.mint_request, request_bump);

        minting::submit_mint_request(
            &fee_gate,
            &mut port,
            &mut registry,
            &mut ProgramLog,
            requester,
            payment,
            requested_at,
        )?;

        system_program::transfer(
            CpiContext::new(
                accounts.system_program.to_account_info(),
                Transfer {
                    from: accounts.requester.to_account_info(),
                    to: accounts.treasury.to_account_info(),
                },
            ),
            payment,
        )
    }

    /// Oracle callback. Unknown and already fulfilled request ids are
    /// rejected, so redelivery never mints twice.
    pub fn fulfill_randomness(
        ctx: Context<FulfillRandomness>,
        request_id: u64,
        randomness: [u8; 32],
    ) -> Result<()> {
        let token_bump = ctx.bumps.token;
        let accounts = &mut *ctx.accounts;
        accounts.coordinator.check_oracle(&accounts.authority.key())?;
        let tiers = TierTable::new(&accounts.config.tiers)?;

        minting::fulfill_request_account(
            &tiers,
            &accounts.mint_request.to_account_info(),
            &mut accounts.ledger,
            &mut accounts.token,
            token_bump,
            request_id,
            &RandomScalar::new(randomness),
        )?;
        Ok(())
    }
}

/// Only the upgrade authority recorded in the program's ProgramData account
/// may run `initialize`. An immutable program has no authority left.
pub fn check_initializer(program_data: &ProgramData, signer: &Pubkey) -> Result<()> {
    require!(
        program_data.upgrade_authority_address == Some(*signer),
        RandomTierNftError::UnauthorizedInitializer
    );
    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [CONFIG_SEED],
        bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = admin,
        space = 8 + RandomnessCoordinator::INIT_SPACE,
        seeds = [COORDINATOR_SEED],
        bump,
    )]
    pub coordinator: Account<'info, RandomnessCoordinator>,

    #[account(
        init,
        payer = admin,
        space = 8 + TokenLedger::INIT_SPACE,
        seeds = [LEDGER_SEED],
        bump,
    )]
    pub ledger: Account<'info, TokenLedger>,

    #[account(mut, seeds = [TREASURY_SEED], bump)]
    pub treasury: SystemAccount<'info>,

    #[account(constraint = program.programdata_address()? == Some(program_data.key()))]
    pub program: Program<'info, program::RandomTierNft>,

    pub program_data: Account<'info, ProgramData>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct RequestMint<'info> {
    #[account(mut)]
    pub requester: Signer<'info>,

    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [COORDINATOR_SEED],
        bump = coordinator.bump,
    )]
    pub coordinator: Account<'info, RandomnessCoordinator>,

    // Keyed by the id the coordinator hands out next.
    #[account(
        init,
        payer = requester,
        space = 8 + MintRequest::INIT_SPACE,
        seeds = [MINT_REQUEST_SEED, coordinator.request_counter.to_le_bytes().as_ref()],
        bump,
    )]
    pub mint_request: Account<'info, MintRequest>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = config.treasury_bump,
    )]
    pub treasury: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(request_id: u64)]
pub struct FulfillRandomness<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(seeds = [COORDINATOR_SEED], bump = coordinator.bump)]
    pub coordinator: Account<'info, RandomnessCoordinator>,

    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [LEDGER_SEED],
        bump = ledger.bump,
    )]
    pub ledger: Account<'info, TokenLedger>,

    /// CHECK: left empty when `request_id` was never issued, so it cannot be
    /// typed as `Account`. `registry::load_request` checks the owner and the
    /// discriminator before reading it.
    #[account(
        mut,
        seeds = [MINT_REQUEST_SEED, request_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub mint_request: UncheckedAccount<'info>,

    // Keyed by request id so concurrent fulfillments never race for the
    // same slot; the token id itself comes from the ledger.
    #[account(
        init,
        payer = authority,
        space = 8 + Token::INIT_SPACE,
        seeds = [TOKEN_SEED, request_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub token: Account<'info, Token>,

    pub system_program: Program<'info, System>,
}
