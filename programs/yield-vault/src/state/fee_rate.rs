use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::error::YieldVaultError;

/// Exact fraction applied to a reward or sell amount.
/// Invariant: `denominator > 0 && numerator <= denominator`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct FeeRate {
    pub numerator: u64,
    pub denominator: u64,
}

impl Default for FeeRate {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FeeRate {
    pub const ZERO: FeeRate = FeeRate {
        numerator: 0,
        denominator: BPS_DENOMINATOR,
    };

    pub fn new(numerator: u64, denominator: u64) -> Result<Self> {
        require!(
            denominator > 0 && numerator <= denominator,
            YieldVaultError::InvalidFeeRate
        );
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Rate expressed in basis points of BPS_DENOMINATOR
    pub fn bps(bps: u64) -> Result<Self> {
        Self::new(bps, BPS_DENOMINATOR)
    }

    /// Re-check a rate received as instruction data
    pub fn validated(self) -> Result<Self> {
        Self::new(self.numerator, self.denominator)
    }

    /// floor(amount * numerator / denominator)
    pub fn fee_of(&self, amount: u64) -> Result<u64> {
        let fee = (amount as u128)
            .checked_mul(self.numerator as u128)
            .ok_or(YieldVaultError::MathOverflow)?
            .checked_div(self.denominator as u128)
            .ok_or(YieldVaultError::DivisionByZero)?;
        u64::try_from(fee).map_err(|_| error!(YieldVaultError::MathOverflow))
    }

    /// (fee, remainder) with fee + remainder == amount
    pub fn split(&self, amount: u64) -> Result<(u64, u64)> {
        let fee = self.fee_of(amount)?;
        Ok((fee, amount - fee))
    }

    /// Rate in basis points, rounded down (used for quote fee reporting)
    pub fn as_bps(&self) -> u16 {
        if self.denominator == 0 {
            return 0;
        }
        ((self.numerator as u128 * BPS_DENOMINATOR as u128) / self.denominator as u128) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_fractions() {
        assert!(FeeRate::new(1, 0).is_err());
        assert!(FeeRate::new(101, 100).is_err());
        assert!(FeeRate::new(100, 100).is_ok());
        assert!(FeeRate::new(0, 100).is_ok());
    }

    #[test]
    fn test_split_conserves_amount() {
        let rates = [
            FeeRate::new(30, 100).unwrap(),
            FeeRate::new(1, 3).unwrap(),
            FeeRate::bps(25).unwrap(),
            FeeRate::new(7, 7).unwrap(),
            FeeRate::ZERO,
        ];
        for rate in rates {
            for amount in [0u64, 1, 2, 99, 1_000_003, u64::MAX] {
                let (fee, rest) = rate.split(amount).unwrap();
                assert_eq!(fee + rest, amount);
                // feeDelta * d == amount * n within one unit of rounding
                let lhs = fee as u128 * rate.denominator as u128;
                let rhs = amount as u128 * rate.numerator as u128;
                assert!(rhs >= lhs && rhs - lhs < rate.denominator as u128);
            }
        }
    }

    #[test]
    fn test_thirty_percent_of_a_day_of_rewards() {
        let rate = FeeRate::new(30, 100).unwrap();
        let es_per_second = 1_157_407u64;
        let harvested = es_per_second * 86_400;

        let (fee, rest) = rate.split(harvested).unwrap();
        assert_eq!(fee, harvested * 30 / 100);
        assert_eq!(rest, harvested - fee);
    }

    #[test]
    fn test_as_bps() {
        assert_eq!(FeeRate::new(30, 100).unwrap().as_bps(), 3_000);
        assert_eq!(FeeRate::bps(25).unwrap().as_bps(), 25);
        assert_eq!(FeeRate::ZERO.as_bps(), 0);
    }
}
