use anchor_lang::prelude::*;

#[error_code]
pub enum RandomTierNftError {
    #[msg("Payment is below the minimum mint fee")]
    InsufficientFee,

    #[msg("No mint request exists for this request id")]
    UnknownRequest,

    #[msg("Mint request has already been fulfilled")]
    AlreadyFulfilled,

    #[msg("Tier table must contain at least one tier")]
    EmptyTierTable,

    #[msg("Tier table has more tiers than the config account can hold")]
    TooManyTiers,

    #[msg("Tier thresholds must be positive and strictly increasing")]
    NonIncreasingThresholds,

    #[msg("Tier metadata URI is too long")]
    MetadataUriTooLong,

    #[msg("Randomness request counter overflowed")]
    RequestCounterOverflow,

    #[msg("Token counter overflowed")]
    TokenCounterOverflow,

    #[msg("Signer is not the randomness oracle for this coordinator")]
    UnauthorizedOracle,

    #[msg("Only the program upgrade authority may initialize")]
    UnauthorizedInitializer,
}
