use anchor_lang::prelude::*;

use crate::constants::{MAX_FEE_BPS, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::state::StakingPool;

/// Every admin instruction operates on one pool, signed by its admin.
#[derive(Accounts)]
pub struct PoolAdmin<'info> {
    #[account(
        constraint = admin.key() == staking_pool.admin @ StakingError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.pool_id.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
}

// =============================================================================
// Pause & Admin
// =============================================================================

/// Stops staking, unstaking and position transfers. Claims stay open.
pub fn pause_pool(ctx: Context<PoolAdmin>, paused: bool) -> Result<()> {
    let staking_pool = &mut ctx.accounts.staking_pool;
    require!(staking_pool.is_paused != paused, StakingError::PauseStateUnchanged);
    staking_pool.is_paused = paused;

    msg!("Pool {}: paused={}", staking_pool.pool_id, paused);

    Ok(())
}

pub fn transfer_admin(ctx: Context<PoolAdmin>, new_admin: Pubkey) -> Result<()> {
    let staking_pool = &mut ctx.accounts.staking_pool;
    require!(
        new_admin != Pubkey::default() && new_admin != staking_pool.admin,
        StakingError::InvalidAuthority
    );

    let old_admin = std::mem::replace(&mut staking_pool.admin, new_admin);

    msg!("Pool {}: admin {} -> {}", staking_pool.pool_id, old_admin, new_admin);

    Ok(())
}

// =============================================================================
// Reward Rates
// =============================================================================

/// Rewards accrued so far are locked in at the old rates first.
pub fn set_reward_rates(
    ctx: Context<PoolAdmin>,
    native_per_second: u64,
    es_per_second: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let staking_pool = &mut ctx.accounts.staking_pool;

    staking_pool.update_rewards(now)?;
    staking_pool.native_per_second = native_per_second;
    staking_pool.es_per_second = es_per_second;

    msg!(
        "Reward rates set: native={}/s, es={}/s",
        native_per_second,
        es_per_second
    );

    Ok(())
}

// =============================================================================
// Basket Pricing & Fees
// =============================================================================

pub fn set_basket_token_price(ctx: Context<PoolAdmin>, mint: Pubkey, price: u128) -> Result<()> {
    require!(price > 0, StakingError::InvalidAmount);

    let staking_pool = &mut ctx.accounts.staking_pool;
    let index = staking_pool.basket_index(&mint)?;
    staking_pool.basket[index].price = price;

    msg!("Basket price updated: mint={}, price={}", mint, price);

    Ok(())
}

pub fn set_fees(ctx: Context<PoolAdmin>, mint_burn_fee_bps: u16, tax_bps: u16) -> Result<()> {
    require!(
        mint_burn_fee_bps <= MAX_FEE_BPS && tax_bps <= MAX_FEE_BPS,
        StakingError::InvalidFeeConfig
    );

    let staking_pool = &mut ctx.accounts.staking_pool;
    staking_pool.mint_burn_fee_bps = mint_burn_fee_bps;
    staking_pool.tax_bps = tax_bps;

    msg!("Fees updated: mint_burn={}bps, tax={}bps", mint_burn_fee_bps, tax_bps);

    Ok(())
}
