use anchor_lang::prelude::*;

use crate::errors::RandomTierNftError;

/// Admission check for mint requests. Overpayment is admitted as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeGate {
    minimum_fee: u64,
}

impl FeeGate {
    pub fn new(minimum_fee: u64) -> Self {
        Self { minimum_fee }
    }

    pub fn accept(&self, paid: u64) -> Result<()> {
        require!(
            paid >= self.minimum_fee,
            RandomTierNftError::InsufficientFee
        );
        Ok(())
    }
}

/// Lamports the treasury needs so that it is rent-exempt before the first
/// fee lands in it. A fee smaller than the rent-exempt minimum would
/// otherwise fail to create the account.
pub fn treasury_top_up(balance: u64, rent_exempt_minimum: u64) -> u64 {
    rent_exempt_minimum.saturating_sub(balance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

    #[test]
    fn admits_exact_and_excess_payment() {
        let gate = FeeGate::new(LAMPORTS_PER_SOL / 100);

        assert!(gate.accept(LAMPORTS_PER_SOL / 100).is_ok());
        assert!(gate.accept(LAMPORTS_PER_SOL).is_ok());
    }

    #[test]
    fn rejects_underpayment() {
        let gate = FeeGate::new(LAMPORTS_PER_SOL / 100);

        for paid in [0, LAMPORTS_PER_SOL / 1000, LAMPORTS_PER_SOL / 100 - 1] {
            assert_eq!(
                gate.accept(paid).unwrap_err(),
                RandomTierNftError::InsufficientFee.into()
            );
        }
    }

    #[test]
    fn zero_fee_admits_everything() {
        assert!(FeeGate::new(0).accept(0).is_ok());
    }

    #[test]
    fn treasury_is_topped_up_to_rent_exemption() {
        let rent = Rent::default();
        let minimum = rent.minimum_balance(0);

        assert_eq!(treasury_top_up(0, minimum), minimum);
        assert_eq!(treasury_top_up(minimum - 1, minimum), 1);
        assert_eq!(treasury_top_up(minimum, minimum), 0);
        assert_eq!(treasury_top_up(minimum + LAMPORTS_PER_SOL, minimum), 0);
    }

    #[test]
    fn small_fee_lands_in_rent_exempt_treasury() {
        let rent = Rent::default();
        let minimum = rent.minimum_balance(0);
        let fee = 1_000;
        assert!(fee < minimum);

        let gate = FeeGate::new(fee);
        assert!(gate.accept(fee).is_ok());

        // without the top-up the first fee would leave the treasury below
        // the rent-exempt minimum
        assert!(!rent.is_exempt(fee, 0));
        let funded = treasury_top_up(0, minimum);
        assert!(rent.is_exempt(funded + fee, 0));
    }
}
