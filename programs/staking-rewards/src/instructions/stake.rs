use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POOL_VAULT_SEED, POSITION_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::state::{PoolKind, StakePosition, StakingPool};

/// Stake tokens into a pool
///
/// # Arguments
/// * `amount` - Tokens of `deposit_mint` to deposit
/// * `min_out` - Minimum staked units to receive
///
/// # Flow
/// 1. Transfer tokens from the owner into the pool vault
/// 2. Accrue pool rewards and settle the position
/// 3. Issue staked units (1:1 for Token pools, priced for Basket pools)
/// 4. Restart the cooldown for Basket pools
///
#[derive(Accounts)]
pub struct Stake<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.pool_id.as_ref()],
        bump = staking_pool.bump,
        constraint = !staking_pool.is_paused @ StakingError::PoolPaused
    )]
    pub staking_pool: Account<'info, StakingPool>,

    #[account(
        mut,
        seeds = [POSITION_SEED, staking_pool.key().as_ref(), owner.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == owner.key() @ StakingError::InvalidAuthority
    )]
    pub position: Account<'info, StakePosition>,

    pub deposit_mint: Account<'info, Mint>,

    #[account(
        mut,
        token::mint = deposit_mint,
        token::authority = owner
    )]
    pub owner_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [POOL_VAULT_SEED, staking_pool.key().as_ref(), deposit_mint.key().as_ref()],
        bump,
        token::mint = deposit_mint,
        token::authority = staking_pool
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_stake(ctx: Context<Stake>, amount: u64, min_out: u64) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.owner_token_account.to_account_info(),
                to: ctx.accounts.pool_vault.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        amount,
    )?;

    let now = Clock::get()?.unix_timestamp;
    let staking_pool = &mut ctx.accounts.staking_pool;
    let position = &mut ctx.accounts.position;
    let mint = ctx.accounts.deposit_mint.key();

    staking_pool.update_rewards(now)?;
    position.settle_rewards(
        staking_pool.native_reward_per_token,
        staking_pool.es_reward_per_token,
    )?;

    let out = staking_pool.record_deposit(&mint, amount)?;
    require!(out >= min_out, StakingError::InsufficientOutput);

    let escrowed = staking_pool.kind == PoolKind::Token && mint == staking_pool.es_mint;
    let cooldown_applies = staking_pool.kind == PoolKind::Basket;
    position.record_stake(out, escrowed, cooldown_applies, now)?;

    msg!(
        "Staked {} of {} for {} units. Position: {} (+{} escrowed), pool total: {}",
        amount,
        mint,
        out,
        position.staked_amount,
        position.staked_es_amount,
        staking_pool.total_staked
    );

    Ok(())
}
