use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount, Transfer};

use crate::constants::{ES_MINTER_SEED, POSITION_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::state::{StakePosition, StakingPool};

/// Claim accumulated rewards
///
/// # Flow
/// 1. Accrue pool rewards and settle the position
/// 2. Pay native rewards from the reward vault (signed by the pool)
/// 3. Mint escrowed rewards (signed by the es_minter PDA)
///
/// Claiming with nothing owed is a no-op rather than an error, so callers
/// can harvest on a schedule.
#[derive(Accounts)]
pub struct Claim<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.pool_id.as_ref()],
        bump = staking_pool.bump
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
        constraint = reward_vault.key() == staking_pool.reward_vault @ StakingError::InvalidRewardMint
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = es_mint.key() == staking_pool.es_mint @ StakingError::InvalidRewardMint
    )]
    pub es_mint: Account<'info, Mint>,

    /// CHECK: PDA holding mint authority over every escrowed reward mint
    #[account(seeds = [ES_MINTER_SEED], bump)]
    pub es_minter: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = staking_pool.native_reward_mint
    )]
    pub native_receiver: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = es_mint
    )]
    pub es_receiver: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_claim(ctx: Context<Claim>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let staking_pool = &mut ctx.accounts.staking_pool;
    let position = &mut ctx.accounts.position;

    staking_pool.update_rewards(now)?;
    let (native, es) = position.record_claim(
        staking_pool.native_reward_per_token,
        staking_pool.es_reward_per_token,
    )?;

    if native > 0 {
        require!(
            ctx.accounts.reward_vault.amount >= native,
            StakingError::InsufficientPoolAmount
        );

        let pool_id = staking_pool.pool_id;
        let seeds = &[STAKING_POOL_SEED, pool_id.as_ref(), &[staking_pool.bump]];
        let signer_seeds = &[&seeds[..]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.reward_vault.to_account_info(),
                    to: ctx.accounts.native_receiver.to_account_info(),
                    authority: staking_pool.to_account_info(),
                },
                signer_seeds,
            ),
            native,
        )?;
    }

    if es > 0 {
        let seeds = &[ES_MINTER_SEED, &[ctx.bumps.es_minter]];
        let signer_seeds = &[&seeds[..]];

        token::mint_to(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                MintTo {
                    mint: ctx.accounts.es_mint.to_account_info(),
                    to: ctx.accounts.es_receiver.to_account_info(),
                    authority: ctx.accounts.es_minter.to_account_info(),
                },
                signer_seeds,
            ),
            es,
        )?;
    }

    msg!("Claimed {} native and {} escrowed rewards", native, es);

    Ok(())
}
