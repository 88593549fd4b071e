use anchor_lang::prelude::*;

use crate::constants::RESERVES_PER_SHARE_PRECISION;
use crate::error::YieldVaultError;
use crate::state::{apply_slippage, ExitQuote, FeeRate, InvestQuote};

/// Vault whose share price tracks reserves that vest in linearly
/// PDA: ["repricing_vault", share_mint]
///
/// Reserves are split in two:
/// * `vested_reserves` back the share price right away
/// * `pending_reserves` were added at `last_vesting_checkpoint` and accrue
///   into the share price over `reserves_vesting_duration`
#[account]
#[derive(InitSpace)]
pub struct RepricingVault {
    pub governance: Pubkey,

    /// Token held as reserves (an investment token such as oGMX)
    pub reserve_mint: Pubkey,

    /// Share token minted by this vault (mint authority is the vault PDA)
    pub share_mint: Pubkey,

    /// Token account holding reserves, owned by the vault PDA
    pub reserve_vault: Pubkey,

    pub vested_reserves: u64,
    pub pending_reserves: u64,
    pub last_vesting_checkpoint: i64,
    pub reserves_vesting_duration: i64,

    /// Taken from harvested rewards before they become reserves
    pub performance_fee: FeeRate,

    pub bump: u8,
}

/// Point-in-time view of a vault's reserves
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReservesView {
    pub vested_reserves: u64,
    pub pending_reserves: u64,
    pub total_reserves: u64,
    pub reserves_per_share: u128,
}

impl RepricingVault {
    // =========================================================================
    // Vesting views
    // =========================================================================

    /// (accrued, outstanding) parts of the pending reserves at `now`
    pub fn unvested_reserves(&self, now: i64) -> Result<(u64, u64)> {
        let pending = self.pending_reserves;
        let elapsed = now.saturating_sub(self.last_vesting_checkpoint).max(0);

        if self.reserves_vesting_duration <= 0 || elapsed >= self.reserves_vesting_duration {
            return Ok((pending, 0));
        }

        let accrued = (pending as u128)
            .checked_mul(elapsed as u128)
            .ok_or(YieldVaultError::MathOverflow)?
            .checked_div(self.reserves_vesting_duration as u128)
            .ok_or(YieldVaultError::DivisionByZero)? as u64;

        Ok((accrued, pending - accrued))
    }

    pub fn vested_reserves_at(&self, now: i64) -> Result<u64> {
        let (accrued, _) = self.unvested_reserves(now)?;
        self.vested_reserves
            .checked_add(accrued)
            .ok_or(error!(YieldVaultError::MathOverflow))
    }

    pub fn pending_reserves_at(&self, now: i64) -> Result<u64> {
        Ok(self.unvested_reserves(now)?.1)
    }

    /// Reserves that back the share price
    pub fn total_reserves(&self, now: i64) -> Result<u64> {
        self.vested_reserves_at(now)
    }

    /// Every reserve token the vault owes, vested or not
    pub fn gross_reserves(&self) -> Result<u64> {
        self.vested_reserves
            .checked_add(self.pending_reserves)
            .ok_or(error!(YieldVaultError::MathOverflow))
    }

    /// Reserves per share scaled by 1e18; one reserve per share while empty
    pub fn reserves_per_share(&self, now: i64, total_supply: u64) -> Result<u128> {
        if total_supply == 0 {
            return Ok(RESERVES_PER_SHARE_PRECISION);
        }
        (self.total_reserves(now)? as u128)
            .checked_mul(RESERVES_PER_SHARE_PRECISION)
            .ok_or(YieldVaultError::MathOverflow)?
            .checked_div(total_supply as u128)
            .ok_or(error!(YieldVaultError::DivisionByZero))
    }

    pub fn reserves_view(&self, now: i64, total_supply: u64) -> Result<ReservesView> {
        Ok(ReservesView {
            vested_reserves: self.vested_reserves_at(now)?,
            pending_reserves: self.pending_reserves_at(now)?,
            total_reserves: self.total_reserves(now)?,
            reserves_per_share: self.reserves_per_share(now, total_supply)?,
        })
    }

    // =========================================================================
    // Conversions (rounded down, in the vault's favour)
    // =========================================================================

    pub fn shares_to_reserves(&self, now: i64, shares: u64, total_supply: u64) -> Result<u64> {
        let total = self.total_reserves(now)?;
        if total_supply == 0 || total == 0 {
            return Ok(shares);
        }
        Self::mul_div(shares, total, total_supply)
    }

    pub fn reserves_to_shares(&self, now: i64, reserves: u64, total_supply: u64) -> Result<u64> {
        let total = self.total_reserves(now)?;
        if total_supply == 0 || total == 0 {
            return Ok(reserves);
        }
        Self::mul_div(reserves, total_supply, total)
    }

    fn mul_div(value: u64, numerator: u64, denominator: u64) -> Result<u64> {
        let result = (value as u128)
            .checked_mul(numerator as u128)
            .ok_or(YieldVaultError::MathOverflow)?
            .checked_div(denominator as u128)
            .ok_or(YieldVaultError::DivisionByZero)?;
        u64::try_from(result).map_err(|_| error!(YieldVaultError::MathOverflow))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Move whatever has accrued into vested and restart the window for the
    /// outstanding remainder.
    pub fn checkpoint(&mut self, now: i64) -> Result<()> {
        let (accrued, outstanding) = self.unvested_reserves(now)?;
        self.vested_reserves = self
            .vested_reserves
            .checked_add(accrued)
            .ok_or(YieldVaultError::MathOverflow)?;
        self.pending_reserves = outstanding;
        self.last_vesting_checkpoint = now;
        Ok(())
    }

    /// Public checkpoint, only once a full vesting period has elapsed
    pub fn checkpoint_reserves(&mut self, now: i64) -> Result<()> {
        let elapsed = now.saturating_sub(self.last_vesting_checkpoint);
        if elapsed < self.reserves_vesting_duration {
            msg!(
                "CannotCheckpointReserves: elapsed={}, duration={}",
                elapsed,
                self.reserves_vesting_duration
            );
            return err!(YieldVaultError::CannotCheckpointReserves);
        }
        self.checkpoint(now)
    }

    pub fn add_pending_reserves(&mut self, amount: u64, now: i64) -> Result<()> {
        require!(amount > 0, YieldVaultError::ExpectedNonZero);
        self.checkpoint(now)?;
        self.pending_reserves = self
            .pending_reserves
            .checked_add(amount)
            .ok_or(YieldVaultError::MathOverflow)?;
        Ok(())
    }

    /// Returns the previous duration
    pub fn set_reserves_vesting_duration(&mut self, duration: i64, now: i64) -> Result<i64> {
        require!(duration >= 0, YieldVaultError::InvalidParam);
        self.checkpoint(now)?;
        let old = self.reserves_vesting_duration;
        self.reserves_vesting_duration = duration;
        Ok(old)
    }

    /// Shares issued for `reserves`, which become vested immediately.
    /// Shares are rounded down so reserves_per_share never drops.
    pub fn issue_shares(
        &mut self,
        reserves: u64,
        min_shares: u64,
        now: i64,
        total_supply: u64,
    ) -> Result<u64> {
        require!(reserves > 0, YieldVaultError::ExpectedNonZero);

        let shares = self.reserves_to_shares(now, reserves, total_supply)?;
        require!(shares >= min_shares, YieldVaultError::Slippage);
        require!(shares > 0, YieldVaultError::ExpectedNonZero);

        self.vested_reserves = self
            .vested_reserves
            .checked_add(reserves)
            .ok_or(YieldVaultError::MathOverflow)?;

        Ok(shares)
    }

    /// Reserves paid out for burning `shares` of a holder's `balance`
    pub fn redeem_shares(
        &mut self,
        shares: u64,
        min_reserves: u64,
        balance: u64,
        now: i64,
        total_supply: u64,
    ) -> Result<u64> {
        require!(shares > 0, YieldVaultError::ExpectedNonZero);
        require!(shares <= balance, YieldVaultError::InsufficientBalance);

        let reserves = self.shares_to_reserves(now, shares, total_supply)?;
        require!(reserves >= min_reserves, YieldVaultError::Slippage);

        // Accrued reserves are only spendable once checkpointed
        if reserves > self.vested_reserves {
            self.checkpoint(now)?;
        }
        self.vested_reserves = self
            .vested_reserves
            .checked_sub(reserves)
            .ok_or(YieldVaultError::InsufficientBalance)?;

        Ok(reserves)
    }

    /// The reserve token account must always cover everything owed
    pub fn require_backed(&self, reserve_balance: u64) -> Result<()> {
        require!(
            reserve_balance >= self.gross_reserves()?,
            YieldVaultError::InsufficientBalance
        );
        Ok(())
    }

    /// Reserve tokens held above what the vault owes
    pub fn recoverable_surplus(&self, reserve_balance: u64) -> Result<u64> {
        Ok(reserve_balance.saturating_sub(self.gross_reserves()?))
    }

    // =========================================================================
    // Quotes
    // =========================================================================

    /// Shares for `from_amount` reserve tokens
    pub fn invest_quote(
        &self,
        now: i64,
        total_supply: u64,
        from_token: Pubkey,
        from_amount: u64,
        max_slippage_bps: u16,
        deadline: i64,
    ) -> Result<InvestQuote> {
        require!(from_amount > 0, YieldVaultError::ExpectedNonZero);
        require_keys_eq!(from_token, self.reserve_mint, YieldVaultError::InvalidToken);

        let expected = self.reserves_to_shares(now, from_amount, total_supply)?;
        Ok(InvestQuote {
            from_token,
            from_amount,
            max_slippage_bps,
            deadline,
            expected_investment_amount: expected,
            min_investment_amount: apply_slippage(expected, max_slippage_bps)?,
            invest_fee_bps: vec![],
        })
    }

    /// Reserve tokens for `shares`
    pub fn exit_quote(
        &self,
        now: i64,
        total_supply: u64,
        shares: u64,
        to_token: Pubkey,
        max_slippage_bps: u16,
        deadline: i64,
    ) -> Result<ExitQuote> {
        require!(shares > 0, YieldVaultError::ExpectedNonZero);
        require_keys_eq!(to_token, self.reserve_mint, YieldVaultError::InvalidToken);

        let expected = self.shares_to_reserves(now, shares, total_supply)?;
        Ok(ExitQuote {
            investment_token_amount: shares,
            to_token,
            max_slippage_bps,
            deadline,
            expected_to_token_amount: expected,
            min_to_token_amount: apply_slippage(expected, max_slippage_bps)?,
            exit_fee_bps: vec![],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_RESERVES_VESTING_DURATION;

    const DURATION: i64 = DEFAULT_RESERVES_VESTING_DURATION;

    fn vault() -> RepricingVault {
        RepricingVault {
            governance: Pubkey::new_unique(),
            reserve_mint: Pubkey::new_unique(),
            share_mint: Pubkey::new_unique(),
            reserve_vault: Pubkey::new_unique(),
            vested_reserves: 0,
            pending_reserves: 0,
            last_vesting_checkpoint: 0,
            reserves_vesting_duration: DURATION,
            performance_fee: FeeRate::ZERO,
            bump: 255,
        }
    }

    #[test]
    fn test_half_vested_after_half_the_duration() {
        let mut v = vault();
        v.add_pending_reserves(1_000, 100).unwrap();

        let half = 100 + DURATION / 2;
        assert_eq!(v.vested_reserves_at(half).unwrap(), 500);
        assert_eq!(v.pending_reserves_at(half).unwrap(), 500);

        // The public checkpoint is time gated
        assert!(v.checkpoint_reserves(half).is_err());
        v.checkpoint_reserves(100 + DURATION).unwrap();
        assert_eq!(v.vested_reserves, 1_000);
        assert_eq!(v.pending_reserves, 0);
    }

    #[test]
    fn test_vested_plus_pending_equals_gross_at_every_observation() {
        let mut v = vault();
        v.issue_shares(10_000, 0, 0, 0).unwrap();
        v.add_pending_reserves(3_333, 50).unwrap();

        for now in [0, 50, 51, 1_000, DURATION / 3, DURATION, DURATION * 4] {
            let vested = v.vested_reserves_at(now).unwrap();
            let pending = v.pending_reserves_at(now).unwrap();
            assert_eq!(vested + pending, v.gross_reserves().unwrap());
        }
    }

    #[test]
    fn test_add_pending_reserves_carries_outstanding() {
        let mut v = vault();
        v.add_pending_reserves(1_000, 0).unwrap();

        let gross_before = v.gross_reserves().unwrap();
        v.add_pending_reserves(200, DURATION / 2).unwrap();

        assert_eq!(v.vested_reserves, 500);
        assert_eq!(v.pending_reserves, 700);
        assert_eq!(v.last_vesting_checkpoint, DURATION / 2);
        assert!(v.gross_reserves().unwrap() > gross_before);
        assert!(v.add_pending_reserves(0, DURATION).is_err());
    }

    #[test]
    fn test_zero_duration_vests_instantly() {
        let mut v = vault();
        v.reserves_vesting_duration = 0;
        v.add_pending_reserves(42, 10).unwrap();
        assert_eq!(v.vested_reserves_at(10).unwrap(), 42);
        assert_eq!(v.pending_reserves_at(10).unwrap(), 0);
    }

    #[test]
    fn test_reserves_per_share_is_monotonic_without_exits() {
        let mut v = vault();
        assert_eq!(v.reserves_per_share(0, 0).unwrap(), RESERVES_PER_SHARE_PRECISION);

        let mut supply = v.issue_shares(1_000_000, 0, 0, 0).unwrap();
        v.add_pending_reserves(100_000, 0).unwrap();

        let mut last = v.reserves_per_share(0, supply).unwrap();
        for step in 1..=10i64 {
            let now = step * DURATION / 8;
            // Awkward deposit sizes exercise the rounding
            supply += v.issue_shares(777_777 + step as u64, 0, now, supply).unwrap();
            let rps = v.reserves_per_share(now, supply).unwrap();
            assert!(rps >= last);
            last = rps;
        }
    }

    #[test]
    fn test_issue_and_redeem_slippage() {
        let mut v = vault();
        let supply = v.issue_shares(1_000, 0, 0, 0).unwrap();
        assert_eq!(supply, 1_000);

        v.add_pending_reserves(1_000, 0).unwrap();
        // Fully vested: 2 reserves per share, so 100 reserves buy 50 shares
        let now = DURATION;
        assert!(v.issue_shares(100, 51, now, supply).is_err());
        let shares = v.issue_shares(100, 50, now, supply).unwrap();
        assert_eq!(shares, 50);

        let supply = supply + shares;
        assert!(v.redeem_shares(10, 0, 5, now, supply).is_err());
        assert!(v.redeem_shares(50, 101, 50, now, supply).is_err());
        let out = v.redeem_shares(50, 100, 50, now, supply).unwrap();
        assert_eq!(out, 100);
        assert_eq!(v.vested_reserves, 1_000);
        assert_eq!(v.total_reserves(now).unwrap(), 2_000);
    }

    #[test]
    fn test_redeem_beyond_vested_checkpoints_accrued() {
        let mut v = vault();
        let supply = v.issue_shares(100, 0, 0, 0).unwrap();
        v.add_pending_reserves(1_000, 0).unwrap();

        let out = v.redeem_shares(100, 0, 100, DURATION, supply).unwrap();
        assert_eq!(out, 1_100);
        assert_eq!(v.vested_reserves, 0);
        assert_eq!(v.pending_reserves, 0);
    }

    #[test]
    fn test_surplus_above_gross_reserves() {
        let mut v = vault();
        v.issue_shares(100, 0, 0, 0).unwrap();
        v.add_pending_reserves(50, 0).unwrap();

        assert!(v.require_backed(149).is_err());
        v.require_backed(150).unwrap();
        assert_eq!(v.recoverable_surplus(175).unwrap(), 25);
        assert_eq!(v.recoverable_surplus(100).unwrap(), 0);
    }

    #[test]
    fn test_redeem_payout_must_leave_gross_reserves_backed() {
        let mut v = vault();
        let supply = v.issue_shares(1_000, 0, 0, 0).unwrap();
        v.add_pending_reserves(500, 0).unwrap();

        // Halfway through vesting each share is worth 1.25 reserves
        let now = DURATION / 2;
        let out = v.redeem_shares(100, 125, 100, now, supply).unwrap();
        assert_eq!(out, 125);
        assert_eq!(v.gross_reserves().unwrap(), 1_375);

        // Fully funded account stays backed after paying out
        v.require_backed(1_500 - out).unwrap();

        // Account short of what was owed before the redemption
        let err = v.require_backed(1_000 - out).unwrap_err();
        assert_eq!(err, error!(YieldVaultError::InsufficientBalance));
    }

    #[test]
    fn test_quotes_only_for_reserve_token() {
        let mut v = vault();
        let supply = v.issue_shares(100, 0, 0, 0).unwrap();
        v.add_pending_reserves(100, 0).unwrap();
        let reserve = v.reserve_mint;

        let invest = v.invest_quote(DURATION, supply, reserve, 100, 100, 0).unwrap();
        assert_eq!(invest.expected_investment_amount, 50);
        assert_eq!(invest.min_investment_amount, 49);

        let exit = v.exit_quote(DURATION, supply, 50, reserve, 100, 0).unwrap();
        assert_eq!(exit.expected_to_token_amount, 100);
        assert_eq!(exit.min_to_token_amount, 99);

        let err = v
            .invest_quote(DURATION, supply, Pubkey::new_unique(), 100, 100, 0)
            .unwrap_err();
        assert_eq!(err, error!(YieldVaultError::InvalidToken));
    }
}
