use anchor_lang::prelude::*;

use crate::constants::{BPS_DENOMINATOR, MAX_BASKET_TOKENS, PRICE_PRECISION, REWARD_PRECISION};
use crate::error::StakingError;
use crate::state::StakePosition;

/// How deposits into a pool are turned into staked units.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum PoolKind {
    /// Stake the pool's token (or its escrowed reward token) 1:1
    Token,
    /// Deposit any basket token; staked units are minted against pool value
    /// with a weight-dependent fee
    Basket,
}

/// One constituent of a basket pool
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, InitSpace)]
pub struct BasketToken {
    pub mint: Pubkey,

    /// Value of one base unit in pool units, scaled by PRICE_PRECISION
    pub price: u128,

    /// Relative target weight
    pub weight: u64,

    /// Token base units held by the pool
    pub pool_amount: u64,

    /// Pool-unit value credited for this token (drives the fee curve)
    pub usd_amount: u64,
}

/// Staking pool state
/// PDA: ["staking_pool", pool_id]
#[account]
#[derive(InitSpace)]
pub struct StakingPool {
    /// Admin who can pause/unpause and update settings
    pub admin: Pubkey,

    /// Caller-chosen identifier used in the PDA seeds
    pub pool_id: Pubkey,

    pub kind: PoolKind,

    /// Token staked 1:1 in Token pools (default key for basket pools)
    pub staked_mint: Pubkey,

    /// Escrowed reward token, minted on claim and stakeable in Token pools
    pub es_mint: Pubkey,

    /// Wrapped native reward token
    pub native_reward_mint: Pubkey,

    /// Vault holding native rewards to pay out
    /// PDA: ["reward_vault", staking_pool]
    pub reward_vault: Pubkey,

    /// Vault holding staked_mint tokens released by the vester
    /// PDA: ["vester_reserve", staking_pool]
    pub vester_reserve: Pubkey,

    /// Emission rates, shared pro-rata by all staked units
    pub native_per_second: u64,
    pub es_per_second: u64,

    /// Accumulated rewards per staked unit (scaled by REWARD_PRECISION)
    pub native_reward_per_token: u128,
    pub es_reward_per_token: u128,

    /// Last time the accumulators were brought forward
    pub last_update_time: i64,

    /// Total staked units (for basket pools, this is the pool token supply)
    pub total_staked: u64,

    /// Basket deposits must age this long before redeem/transfer
    pub cooldown_duration: i64,

    pub mint_burn_fee_bps: u16,
    pub tax_bps: u16,

    #[max_len(4)]
    pub basket: Vec<BasketToken>,

    /// Emergency pause flag
    pub is_paused: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl StakingPool {
    // =========================================================================
    // Reward accrual
    // =========================================================================

    /// Reward-per-token accumulators as they would stand at `now`
    pub fn reward_per_token_at(&self, now: i64) -> Result<(u128, u128)> {
        if self.total_staked == 0 || now <= self.last_update_time {
            return Ok((self.native_reward_per_token, self.es_reward_per_token));
        }

        let elapsed = (now - self.last_update_time) as u128;
        let native = Self::accrue(
            self.native_reward_per_token,
            self.native_per_second,
            elapsed,
            self.total_staked,
        )?;
        let es = Self::accrue(
            self.es_reward_per_token,
            self.es_per_second,
            elapsed,
            self.total_staked,
        )?;

        Ok((native, es))
    }

    fn accrue(current: u128, rate: u64, elapsed: u128, total_staked: u64) -> Result<u128> {
        let increase = (rate as u128)
            .checked_mul(elapsed)
            .ok_or(StakingError::MathOverflow)?
            .checked_mul(REWARD_PRECISION)
            .ok_or(StakingError::MathOverflow)?
            .checked_div(total_staked as u128)
            .ok_or(StakingError::DivisionByZero)?;

        current
            .checked_add(increase)
            .ok_or(error!(StakingError::MathOverflow))
    }

    /// Bring the accumulators forward to `now`.
    /// Must run before any change to total_staked or the emission rates.
    pub fn update_rewards(&mut self, now: i64) -> Result<()> {
        let (native, es) = self.reward_per_token_at(now)?;
        self.native_reward_per_token = native;
        self.es_reward_per_token = es;
        if now > self.last_update_time {
            self.last_update_time = now;
        }
        Ok(())
    }

    /// (native, es) a position could claim at `now`
    pub fn pending_rewards(&self, position: &StakePosition, now: i64) -> Result<(u64, u64)> {
        let (native_rpt, es_rpt) = self.reward_per_token_at(now)?;
        position.calculate_pending_rewards(native_rpt, es_rpt)
    }

    // =========================================================================
    // Basket valuation and fee curve
    // =========================================================================

    pub fn basket_index(&self, mint: &Pubkey) -> Result<usize> {
        self.basket
            .iter()
            .position(|t| t.mint == *mint)
            .ok_or(error!(StakingError::InvalidToken))
    }

    pub fn add_basket_token(&mut self, mint: Pubkey, price: u128, weight: u64) -> Result<()> {
        require!(self.kind == PoolKind::Basket, StakingError::UnsupportedPoolKind);
        require!(self.basket.len() < MAX_BASKET_TOKENS, StakingError::BasketFull);
        require!(self.basket_index(&mint).is_err(), StakingError::InvalidToken);
        require!(price > 0, StakingError::InvalidAmount);

        self.basket.push(BasketToken {
            mint,
            price,
            weight,
            pool_amount: 0,
            usd_amount: 0,
        });
        Ok(())
    }

    /// Total pool value in pool units
    pub fn aum(&self) -> Result<u128> {
        self.basket.iter().try_fold(0u128, |acc, t| {
            let value = Self::to_value(t.pool_amount as u128, t.price)?;
            acc.checked_add(value).ok_or(error!(StakingError::MathOverflow))
        })
    }

    fn to_value(amount: u128, price: u128) -> Result<u128> {
        amount
            .checked_mul(price)
            .ok_or(error!(StakingError::MathOverflow))?
            .checked_div(PRICE_PRECISION)
            .ok_or(error!(StakingError::DivisionByZero))
    }

    fn from_value(value: u128, price: u128) -> Result<u128> {
        value
            .checked_mul(PRICE_PRECISION)
            .ok_or(error!(StakingError::MathOverflow))?
            .checked_div(price)
            .ok_or(error!(StakingError::DivisionByZero))
    }

    fn total_usd_amount(&self) -> u128 {
        self.basket.iter().map(|t| t.usd_amount as u128).sum()
    }

    fn total_weight(&self) -> u128 {
        self.basket.iter().map(|t| t.weight as u128).sum()
    }

    /// Fee in bps for moving `usd_delta` of value into (`increment`) or out of
    /// the basket token at `index`. Moves towards the target weight earn a
    /// rebate on the base fee; moves away pay an extra tax.
    pub fn fee_bps(&self, index: usize, usd_delta: u128, increment: bool) -> Result<u16> {
        let base = self.mint_burn_fee_bps as u128;
        let tax = self.tax_bps as u128;
        let token = self.basket.get(index).ok_or(error!(StakingError::InvalidToken))?;

        let initial = token.usd_amount as u128;
        let next = if increment {
            initial.checked_add(usd_delta).ok_or(StakingError::MathOverflow)?
        } else {
            initial.saturating_sub(usd_delta)
        };

        let total_weight = self.total_weight();
        if total_weight == 0 {
            return Ok(base as u16);
        }
        let target = self
            .total_usd_amount()
            .checked_mul(token.weight as u128)
            .ok_or(StakingError::MathOverflow)?
            / total_weight;
        if target == 0 {
            return Ok(base as u16);
        }

        let initial_diff = initial.abs_diff(target);
        let next_diff = next.abs_diff(target);

        if next_diff < initial_diff {
            let rebate = tax
                .checked_mul(initial_diff)
                .ok_or(StakingError::MathOverflow)?
                / target;
            return Ok(base.saturating_sub(rebate) as u16);
        }

        let average_diff = ((initial_diff + next_diff) / 2).min(target);
        let extra = tax
            .checked_mul(average_diff)
            .ok_or(StakingError::MathOverflow)?
            / target;
        Ok((base + extra) as u16)
    }

    // =========================================================================
    // Quotes (read-only, used by integrators)
    // =========================================================================

    /// Staked units received for depositing `amount` of `mint`, and the fee in bps
    pub fn mint_quote(&self, mint: &Pubkey, amount: u64) -> Result<(u64, u16)> {
        match self.kind {
            PoolKind::Token => {
                require!(
                    *mint == self.staked_mint || *mint == self.es_mint,
                    StakingError::InvalidToken
                );
                Ok((amount, 0))
            }
            PoolKind::Basket => {
                let index = self.basket_index(mint)?;
                let price = self.basket[index].price;

                let usd = Self::to_value(amount as u128, price)?;
                let fee_bps = self.fee_bps(index, usd, true)?;
                let after_fee = Self::apply_fee(amount as u128, fee_bps)?;
                let usd_after_fee = Self::to_value(after_fee, price)?;

                let aum = self.aum()?;
                let out = if self.total_staked == 0 || aum == 0 {
                    usd_after_fee
                } else {
                    usd_after_fee
                        .checked_mul(self.total_staked as u128)
                        .ok_or(StakingError::MathOverflow)?
                        / aum
                };

                Ok((Self::to_u64(out)?, fee_bps))
            }
        }
    }

    /// Tokens of `mint` received for unstaking `amount` staked units, and the fee in bps
    pub fn redeem_quote(&self, mint: &Pubkey, amount: u64) -> Result<(u64, u16)> {
        match self.kind {
            PoolKind::Token => {
                require!(*mint == self.staked_mint, StakingError::InvalidToken);
                Ok((amount, 0))
            }
            PoolKind::Basket => {
                let (out, fee_bps, _) = self.redeem_amounts(mint, amount)?;
                Ok((out, fee_bps))
            }
        }
    }

    /// (token out, fee bps, value removed) for a basket redemption
    fn redeem_amounts(&self, mint: &Pubkey, amount: u64) -> Result<(u64, u16, u128)> {
        let index = self.basket_index(mint)?;
        require!(self.total_staked > 0, StakingError::DivisionByZero);

        let usd_out = (amount as u128)
            .checked_mul(self.aum()?)
            .ok_or(StakingError::MathOverflow)?
            / self.total_staked as u128;
        let token_out = Self::from_value(usd_out, self.basket[index].price)?;
        let fee_bps = self.fee_bps(index, usd_out, false)?;
        let out = Self::apply_fee(token_out, fee_bps)?;

        Ok((Self::to_u64(out)?, fee_bps, usd_out))
    }

    fn apply_fee(amount: u128, fee_bps: u16) -> Result<u128> {
        let keep = BPS_DENOMINATOR.saturating_sub(fee_bps as u128);
        amount
            .checked_mul(keep)
            .ok_or(error!(StakingError::MathOverflow))
            .map(|v| v / BPS_DENOMINATOR)
    }

    fn to_u64(value: u128) -> Result<u64> {
        u64::try_from(value).map_err(|_| error!(StakingError::MathOverflow))
    }

    // =========================================================================
    // Book-keeping for stake/unstake
    // =========================================================================

    /// Apply a deposit of `amount` of `mint`; returns the staked units issued.
    pub fn record_deposit(&mut self, mint: &Pubkey, amount: u64) -> Result<u64> {
        let (out, _) = self.mint_quote(mint, amount)?;

        if self.kind == PoolKind::Basket {
            let index = self.basket_index(mint)?;
            let (fee_bps, price) = {
                let usd = Self::to_value(amount as u128, self.basket[index].price)?;
                (self.fee_bps(index, usd, true)?, self.basket[index].price)
            };
            let usd_after_fee =
                Self::to_u64(Self::to_value(Self::apply_fee(amount as u128, fee_bps)?, price)?)?;

            let token = &mut self.basket[index];
            token.pool_amount = token
                .pool_amount
                .checked_add(amount)
                .ok_or(StakingError::MathOverflow)?;
            token.usd_amount = token
                .usd_amount
                .checked_add(usd_after_fee)
                .ok_or(StakingError::MathOverflow)?;
        }

        self.total_staked = self
            .total_staked
            .checked_add(out)
            .ok_or(StakingError::MathOverflow)?;

        Ok(out)
    }

    /// Apply a withdrawal of `amount` staked units as `mint`; returns tokens paid out.
    pub fn record_withdrawal(&mut self, mint: &Pubkey, amount: u64) -> Result<u64> {
        let out = match self.kind {
            PoolKind::Token => self.redeem_quote(mint, amount)?.0,
            PoolKind::Basket => {
                let (out, _, usd_out) = self.redeem_amounts(mint, amount)?;
                let index = self.basket_index(mint)?;
                let token = &mut self.basket[index];
                require!(token.pool_amount >= out, StakingError::InsufficientPoolAmount);
                token.pool_amount -= out;
                token.usd_amount = token
                    .usd_amount
                    .saturating_sub(Self::to_u64(usd_out)?);
                out
            }
        };

        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(StakingError::MathUnderflow)?;

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_COOLDOWN_DURATION, DEFAULT_MINT_BURN_FEE_BPS, DEFAULT_TAX_BPS};

    fn basket_pool() -> StakingPool {
        StakingPool {
            admin: Pubkey::new_unique(),
            pool_id: Pubkey::new_unique(),
            kind: PoolKind::Basket,
            staked_mint: Pubkey::default(),
            es_mint: Pubkey::new_unique(),
            native_reward_mint: Pubkey::new_unique(),
            reward_vault: Pubkey::new_unique(),
            vester_reserve: Pubkey::default(),
            native_per_second: 0,
            es_per_second: 0,
            native_reward_per_token: 0,
            es_reward_per_token: 0,
            last_update_time: 0,
            total_staked: 0,
            cooldown_duration: DEFAULT_COOLDOWN_DURATION,
            mint_burn_fee_bps: DEFAULT_MINT_BURN_FEE_BPS,
            tax_bps: DEFAULT_TAX_BPS,
            basket: vec![],
            is_paused: false,
            bump: 255,
        }
    }

    fn token_pool() -> StakingPool {
        StakingPool {
            kind: PoolKind::Token,
            staked_mint: Pubkey::new_unique(),
            ..basket_pool()
        }
    }

    #[test]
    fn test_first_basket_deposit_charges_base_fee() {
        let mut pool = basket_pool();
        let bnb = Pubkey::new_unique();
        // 1 BNB base unit is worth 300 pool units
        pool.add_basket_token(bnb, 300 * PRICE_PRECISION, 1).unwrap();

        // 100 BNB with 6 decimals
        let (out, fee_bps) = pool.mint_quote(&bnb, 100_000_000).unwrap();
        assert_eq!(fee_bps, 25);
        // 100 * 300 * (1 - 0.0025)
        assert_eq!(out, 29_925_000_000);
    }

    #[test]
    fn test_deposit_then_redeem_round_trips_less_fees() {
        let mut pool = basket_pool();
        let usdc = Pubkey::new_unique();
        pool.add_basket_token(usdc, PRICE_PRECISION, 1).unwrap();

        let minted = pool.record_deposit(&usdc, 1_000_000).unwrap();
        assert_eq!(minted, 997_500);
        assert_eq!(pool.total_staked, 997_500);

        let (quoted, _) = pool.redeem_quote(&usdc, minted).unwrap();
        let paid = pool.record_withdrawal(&usdc, minted).unwrap();
        assert_eq!(quoted, paid);
        assert!(paid < 1_000_000);
        assert_eq!(pool.total_staked, 0);
    }

    #[test]
    fn test_fee_curve_rebates_moves_towards_target() {
        let mut pool = basket_pool();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        pool.add_basket_token(a, PRICE_PRECISION, 1).unwrap();
        pool.add_basket_token(b, PRICE_PRECISION, 1).unwrap();

        // Heavily overweight token a
        pool.basket[0].usd_amount = 9_000;
        pool.basket[1].usd_amount = 1_000;

        let towards = pool.fee_bps(1, 1_000, true).unwrap();
        let away = pool.fee_bps(0, 1_000, true).unwrap();
        assert!(towards < DEFAULT_MINT_BURN_FEE_BPS);
        assert!(away > DEFAULT_MINT_BURN_FEE_BPS);
    }

    #[test]
    fn test_token_pool_quotes_one_to_one() {
        let pool = token_pool();
        assert_eq!(pool.mint_quote(&pool.staked_mint, 500).unwrap(), (500, 0));
        assert_eq!(pool.mint_quote(&pool.es_mint, 7).unwrap(), (7, 0));
        assert_eq!(pool.redeem_quote(&pool.staked_mint, 500).unwrap(), (500, 0));
        assert!(pool.mint_quote(&Pubkey::new_unique(), 1).is_err());
        // Escrowed tokens can be staked but never redeemed
        assert!(pool.redeem_quote(&pool.es_mint, 1).is_err());
    }

    #[test]
    fn test_rewards_accrue_pro_rata_per_second() {
        let mut pool = token_pool();
        pool.native_per_second = 10;
        pool.es_per_second = 20;
        pool.total_staked = 1_000;
        pool.last_update_time = 100;

        let (native, es) = pool.reward_per_token_at(200).unwrap();
        // 100 seconds * rate / total_staked
        assert_eq!(native, 1_000 * REWARD_PRECISION / 1_000);
        assert_eq!(es, 2_000 * REWARD_PRECISION / 1_000);

        pool.update_rewards(200).unwrap();
        assert_eq!(pool.last_update_time, 200);
        // Going backwards in time is a no-op
        pool.update_rewards(150).unwrap();
        assert_eq!(pool.last_update_time, 200);
        assert_eq!(pool.native_reward_per_token, native);
    }

    #[test]
    fn test_pending_rewards_projects_to_now() {
        let mut pool = token_pool();
        pool.native_per_second = 10;
        pool.es_per_second = 4;
        pool.total_staked = 100;
        pool.last_update_time = 0;

        let position = StakePosition {
            pool: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            staked_amount: 50,
            staked_es_amount: 0,
            native_reward_debt: 0,
            es_reward_debt: 0,
            native_rewards_owed: 3,
            es_rewards_owed: 0,
            last_stake_time: 0,
            vesting: Default::default(),
            bump: 255,
        };

        // Half the pool for 86_400 seconds, plus what was already owed
        let (native, es) = pool.pending_rewards(&position, 86_400).unwrap();
        assert_eq!(native, 432_000 + 3);
        assert_eq!(es, 172_800);
    }

    #[test]
    fn test_no_accrual_while_empty() {
        let mut pool = token_pool();
        pool.native_per_second = 10;
        pool.update_rewards(1_000).unwrap();
        assert_eq!(pool.native_reward_per_token, 0);
        assert_eq!(pool.last_update_time, 1_000);
    }
}
