use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POOL_VAULT_SEED, POSITION_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::state::{PoolKind, StakePosition, StakingPool};

/// Unstake units from a position and receive `receive_mint`
///
/// # Arguments
/// * `amount` - Staked units to remove
/// * `min_out` - Minimum tokens to receive
///
/// Basket positions can only unstake once the cooldown since their last
/// deposit has passed.
#[derive(Accounts)]
pub struct Unstake<'info> {
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

    pub receive_mint: Account<'info, Mint>,

    #[account(
        mut,
        seeds = [POOL_VAULT_SEED, staking_pool.key().as_ref(), receive_mint.key().as_ref()],
        bump,
        token::mint = receive_mint,
        token::authority = staking_pool
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    /// Any token account of `receive_mint`
    #[account(
        mut,
        token::mint = receive_mint
    )]
    pub receiver: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_unstake(ctx: Context<Unstake>, amount: u64, min_out: u64) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);

    let now = Clock::get()?.unix_timestamp;
    let staking_pool = &mut ctx.accounts.staking_pool;
    let position = &mut ctx.accounts.position;

    if staking_pool.kind == PoolKind::Basket {
        position.require_cooldown_passed(staking_pool.cooldown_duration, now)?;
    }

    staking_pool.update_rewards(now)?;
    position.settle_rewards(
        staking_pool.native_reward_per_token,
        staking_pool.es_reward_per_token,
    )?;

    position.record_unstake(amount)?;
    let out = staking_pool.record_withdrawal(&ctx.accounts.receive_mint.key(), amount)?;
    require!(out >= min_out, StakingError::InsufficientOutput);
    require!(
        ctx.accounts.pool_vault.amount >= out,
        StakingError::InsufficientPoolAmount
    );

    let pool_id = staking_pool.pool_id;
    let seeds = &[STAKING_POOL_SEED, pool_id.as_ref(), &[staking_pool.bump]];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.pool_vault.to_account_info(),
                to: ctx.accounts.receiver.to_account_info(),
                authority: staking_pool.to_account_info(),
            },
            signer_seeds,
        ),
        out,
    )?;

    msg!(
        "Unstaked {} units for {} of {}. Remaining: {}, pool total: {}",
        amount,
        out,
        ctx.accounts.receive_mint.key(),
        position.staked_amount,
        staking_pool.total_staked
    );

    Ok(())
}
