use anchor_lang::prelude::*;

use crate::constants::{REWARD_PRECISION, VESTING_DURATION};
use crate::error::StakingError;

/// Escrowed rewards being converted into the pool's staked token
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, InitSpace)]
pub struct VestingState {
    /// Escrowed tokens still vesting
    pub es_balance: u64,

    /// Escrowed tokens already converted (counts towards the vesting speed)
    pub cumulative_vested: u64,

    /// Vested tokens not yet claimed
    pub claimable: u64,

    pub last_vesting_time: i64,
}

impl VestingState {
    /// Release the linear share vested since the last update.
    /// Vesting speed is (balance + cumulative_vested) / VESTING_DURATION per second.
    pub fn update(&mut self, now: i64) -> Result<()> {
        if self.last_vesting_time == 0 || now <= self.last_vesting_time {
            self.last_vesting_time = self.last_vesting_time.max(now);
            return Ok(());
        }

        let elapsed = (now - self.last_vesting_time) as u128;
        let base = (self.es_balance as u128)
            .checked_add(self.cumulative_vested as u128)
            .ok_or(StakingError::MathOverflow)?;
        let released = base
            .checked_mul(elapsed)
            .ok_or(StakingError::MathOverflow)?
            .checked_div(VESTING_DURATION as u128)
            .ok_or(StakingError::DivisionByZero)?
            .min(self.es_balance as u128) as u64;

        self.es_balance -= released;
        self.cumulative_vested = self
            .cumulative_vested
            .checked_add(released)
            .ok_or(StakingError::MathOverflow)?;
        self.claimable = self
            .claimable
            .checked_add(released)
            .ok_or(StakingError::MathOverflow)?;
        self.last_vesting_time = now;

        Ok(())
    }

    pub fn deposit(&mut self, amount: u64, now: i64) -> Result<()> {
        self.update(now)?;
        self.es_balance = self
            .es_balance
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        self.last_vesting_time = now;
        Ok(())
    }

    /// Take everything vested so far
    pub fn take_claimable(&mut self, now: i64) -> Result<u64> {
        self.update(now)?;
        let amount = self.claimable;
        self.claimable = 0;
        Ok(amount)
    }
}

/// Per-owner staking position
/// PDA: ["position", staking_pool, owner]
#[account]
#[derive(InitSpace)]
pub struct StakePosition {
    /// The staking pool this position belongs to
    pub pool: Pubkey,

    /// Owner of this staking position (may be a program-derived address)
    pub owner: Pubkey,

    /// Units staked from the pool token or basket deposits
    pub staked_amount: u64,

    /// Escrowed reward tokens staked (Token pools only)
    pub staked_es_amount: u64,

    /// Accumulator values already settled into the owed amounts
    pub native_reward_debt: u128,
    pub es_reward_debt: u128,

    /// Settled but unclaimed rewards
    pub native_rewards_owed: u64,
    pub es_rewards_owed: u64,

    /// Timestamp of last basket deposit (drives the cooldown)
    pub last_stake_time: i64,

    pub vesting: VestingState,

    /// PDA bump seed
    pub bump: u8,
}

impl StakePosition {
    /// Units that earn rewards
    pub fn reward_weight(&self) -> u64 {
        self.staked_amount.saturating_add(self.staked_es_amount)
    }

    /// Calculate pending rewards for this position
    /// Formula: pending = owed + weight * (pool_reward_per_token - reward_debt) / PRECISION
    pub fn calculate_pending_rewards(
        &self,
        native_reward_per_token: u128,
        es_reward_per_token: u128,
    ) -> Result<(u64, u64)> {
        let native = Self::pending(
            self.reward_weight(),
            native_reward_per_token,
            self.native_reward_debt,
            self.native_rewards_owed,
        )?;
        let es = Self::pending(
            self.reward_weight(),
            es_reward_per_token,
            self.es_reward_debt,
            self.es_rewards_owed,
        )?;
        Ok((native, es))
    }

    fn pending(weight: u64, reward_per_token: u128, debt: u128, owed: u64) -> Result<u64> {
        let reward_diff = reward_per_token
            .checked_sub(debt)
            .ok_or(StakingError::MathUnderflow)?;

        let accrued = (weight as u128)
            .checked_mul(reward_diff)
            .ok_or(StakingError::MathOverflow)?
            .checked_div(REWARD_PRECISION)
            .ok_or(StakingError::DivisionByZero)?;

        let total = accrued
            .checked_add(owed as u128)
            .ok_or(StakingError::MathOverflow)?;

        u64::try_from(total).map_err(|_| error!(StakingError::MathOverflow))
    }

    /// Move accrued rewards into the owed balances.
    /// Called before the reward weight changes so new stake gets no retroactive rewards.
    pub fn settle_rewards(
        &mut self,
        native_reward_per_token: u128,
        es_reward_per_token: u128,
    ) -> Result<()> {
        let (native, es) =
            self.calculate_pending_rewards(native_reward_per_token, es_reward_per_token)?;
        self.native_rewards_owed = native;
        self.es_rewards_owed = es;
        self.native_reward_debt = native_reward_per_token;
        self.es_reward_debt = es_reward_per_token;
        Ok(())
    }

    /// Record a stake action
    pub fn record_stake(&mut self, amount: u64, escrowed: bool, cooldown_applies: bool, now: i64) -> Result<()> {
        if escrowed {
            self.staked_es_amount = self
                .staked_es_amount
                .checked_add(amount)
                .ok_or(StakingError::MathOverflow)?;
        } else {
            self.staked_amount = self
                .staked_amount
                .checked_add(amount)
                .ok_or(StakingError::MathOverflow)?;
        }

        if cooldown_applies {
            self.last_stake_time = now;
        }

        Ok(())
    }

    /// Record an unstake action
    pub fn record_unstake(&mut self, amount: u64) -> Result<()> {
        require!(
            self.staked_amount >= amount,
            StakingError::AmountExceedsStaked
        );

        self.staked_amount -= amount;
        Ok(())
    }

    /// Earliest time basket stake may leave this position
    pub fn cooldown_expiry(&self, cooldown_duration: i64) -> i64 {
        self.last_stake_time.saturating_add(cooldown_duration)
    }

    pub fn require_cooldown_passed(&self, cooldown_duration: i64, now: i64) -> Result<()> {
        require!(
            now >= self.cooldown_expiry(cooldown_duration),
            StakingError::CooldownNotPassed
        );
        Ok(())
    }

    /// Escrowed tokens must stay backed by staked escrowed tokens while vesting
    pub fn max_vesting_deposit(&self) -> u64 {
        self.staked_es_amount.saturating_sub(self.vesting.es_balance)
    }

    /// Record a claim action; returns (native, es) paid out
    pub fn record_claim(
        &mut self,
        native_reward_per_token: u128,
        es_reward_per_token: u128,
    ) -> Result<(u64, u64)> {
        self.settle_rewards(native_reward_per_token, es_reward_per_token)?;
        let claimed = (self.native_rewards_owed, self.es_rewards_owed);
        self.native_rewards_owed = 0;
        self.es_rewards_owed = 0;
        Ok(claimed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position() -> StakePosition {
        StakePosition {
            pool: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            staked_amount: 0,
            staked_es_amount: 0,
            native_reward_debt: 0,
            es_reward_debt: 0,
            native_rewards_owed: 0,
            es_rewards_owed: 0,
            last_stake_time: 0,
            vesting: VestingState::default(),
            bump: 254,
        }
    }

    #[test]
    fn test_new_stake_gets_no_retroactive_rewards() {
        let mut p = position();
        let rpt = 5 * REWARD_PRECISION;
        p.settle_rewards(rpt, rpt).unwrap();
        p.record_stake(100, false, false, 10).unwrap();

        assert_eq!(p.calculate_pending_rewards(rpt, rpt).unwrap(), (0, 0));
        assert_eq!(
            p.calculate_pending_rewards(rpt + REWARD_PRECISION, rpt).unwrap(),
            (100, 0)
        );
    }

    #[test]
    fn test_claim_resets_accrual() {
        let mut p = position();
        p.record_stake(10, false, false, 0).unwrap();
        p.record_stake(10, true, false, 0).unwrap();
        assert_eq!(p.reward_weight(), 20);

        let claimed = p.record_claim(3 * REWARD_PRECISION, REWARD_PRECISION).unwrap();
        assert_eq!(claimed, (60, 20));

        // Claiming twice at the same accumulator values pays nothing
        let again = p.record_claim(3 * REWARD_PRECISION, REWARD_PRECISION).unwrap();
        assert_eq!(again, (0, 0));
    }

    #[test]
    fn test_unstake_more_than_staked_fails() {
        let mut p = position();
        p.record_stake(50, false, false, 0).unwrap();
        assert!(p.record_unstake(51).is_err());
        p.record_unstake(50).unwrap();
        assert_eq!(p.staked_amount, 0);
    }

    #[test]
    fn test_cooldown_gate() {
        let mut p = position();
        p.record_stake(50, false, true, 1_000).unwrap();
        assert_eq!(p.cooldown_expiry(900), 1_900);
        assert!(p.require_cooldown_passed(900, 1_899).is_err());
        assert!(p.require_cooldown_passed(900, 1_900).is_ok());
    }

    #[test]
    fn test_vesting_releases_linearly_over_a_year() {
        let mut v = VestingState::default();
        v.deposit(365_000, 1).unwrap();

        let day = 24 * 60 * 60;
        v.update(1 + day).unwrap();
        assert_eq!(v.claimable, 1_000);
        assert_eq!(v.es_balance, 364_000);

        let taken = v.take_claimable(1 + day).unwrap();
        assert_eq!(taken, 1_000);
        assert_eq!(v.claimable, 0);

        // Never releases more than the remaining balance
        v.update(1 + 10 * VESTING_DURATION).unwrap();
        assert_eq!(v.es_balance, 0);
        assert_eq!(v.cumulative_vested, 365_000);
    }

    #[test]
    fn test_vesting_cap_follows_staked_escrow() {
        let mut p = position();
        p.record_stake(1_000, true, false, 0).unwrap();
        p.vesting.deposit(400, 1).unwrap();
        assert_eq!(p.max_vesting_deposit(), 600);
    }
}
