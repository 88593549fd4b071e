use anchor_lang::prelude::*;
use staking_rewards::state::{StakePosition, StakingPool};

use crate::constants::EARN_ACCOUNT_SEED;
use crate::error::YieldVaultError;
use crate::state::{EarnAccount, EarnRewards};

/// Read-only view over one earn account position
#[derive(Accounts)]
pub struct EarnPositionView<'info> {
    #[account(
        seeds = [EARN_ACCOUNT_SEED, earn_account.seed_key.as_ref(), &earn_account.kind_seed()],
        bump = earn_account.bump
    )]
    pub earn_account: Account<'info, EarnAccount>,

    pub staking_pool: Account<'info, StakingPool>,

    #[account(
        constraint = position.owner == earn_account.key() @ YieldVaultError::AccountMismatch,
        constraint = position.pool == staking_pool.key() @ YieldVaultError::AccountMismatch
    )]
    pub position: Account<'info, StakePosition>,
}

pub fn handler_earn_harvestable_rewards(ctx: Context<EarnPositionView>) -> Result<EarnRewards> {
    let now = Clock::get()?.unix_timestamp;
    EarnAccount::harvestable_rewards(&ctx.accounts.staking_pool, &ctx.accounts.position, now)
}

pub fn handler_glp_investment_cooldown_expiry(ctx: Context<EarnPositionView>) -> Result<i64> {
    Ok(EarnAccount::cooldown_expiry(
        &ctx.accounts.staking_pool,
        &ctx.accounts.position,
    ))
}
