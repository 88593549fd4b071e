use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount, Transfer};

use crate::constants::{POSITION_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::state::{PoolKind, StakePosition, StakingPool};

// =============================================================================
// Deposit For Vesting
// =============================================================================

/// Burn escrowed tokens from the owner and start vesting them into the
/// pool's staked token. The deposit is capped by the position's staked
/// escrowed balance not already vesting.
#[derive(Accounts)]
pub struct DepositForVesting<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [STAKING_POOL_SEED, staking_pool.pool_id.as_ref()],
        bump = staking_pool.bump,
        constraint = staking_pool.kind == PoolKind::Token @ StakingError::UnsupportedPoolKind,
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

    #[account(
        mut,
        constraint = es_mint.key() == staking_pool.es_mint @ StakingError::InvalidRewardMint
    )]
    pub es_mint: Account<'info, Mint>,

    #[account(
        mut,
        token::mint = es_mint,
        token::authority = owner
    )]
    pub owner_es_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_deposit_for_vesting(ctx: Context<DepositForVesting>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);

    let now = Clock::get()?.unix_timestamp;
    let position = &mut ctx.accounts.position;

    position.vesting.update(now)?;
    require!(
        amount <= position.max_vesting_deposit(),
        StakingError::MaxVestableAmountExceeded
    );

    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Burn {
                mint: ctx.accounts.es_mint.to_account_info(),
                from: ctx.accounts.owner_es_account.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        amount,
    )?;

    position.vesting.deposit(amount, now)?;

    msg!(
        "Vesting deposit {}: vesting={}, claimable={}",
        amount,
        position.vesting.es_balance,
        position.vesting.claimable
    );

    Ok(())
}

// =============================================================================
// Claim Vested
// =============================================================================

#[derive(Accounts)]
pub struct ClaimVested<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [STAKING_POOL_SEED, staking_pool.pool_id.as_ref()],
        bump = staking_pool.bump,
        constraint = staking_pool.kind == PoolKind::Token @ StakingError::UnsupportedPoolKind
    )]
    pub staking_pool: Account<'info, StakingPool>,

    #[account(
        mut,
        seeds = [POSITION_SEED, staking_pool.key().as_ref(), owner.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == owner.key() @ StakingError::InvalidAuthority
    )]
    pub position: Account<'info, StakePosition>,

    #[account(
        mut,
        constraint = vester_reserve.key() == staking_pool.vester_reserve @ StakingError::InvalidRewardMint
    )]
    pub vester_reserve: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = staking_pool.staked_mint
    )]
    pub receiver: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_claim_vested(ctx: Context<ClaimVested>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let staking_pool = &ctx.accounts.staking_pool;
    let amount = ctx.accounts.position.vesting.take_claimable(now)?;

    if amount > 0 {
        require!(
            ctx.accounts.vester_reserve.amount >= amount,
            StakingError::InsufficientPoolAmount
        );

        let pool_id = staking_pool.pool_id;
        let seeds = &[STAKING_POOL_SEED, pool_id.as_ref(), &[staking_pool.bump]];
        let signer_seeds = &[&seeds[..]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.vester_reserve.to_account_info(),
                    to: ctx.accounts.receiver.to_account_info(),
                    authority: staking_pool.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )?;
    }

    msg!("Claimed {} vested tokens", amount);

    Ok(())
}
