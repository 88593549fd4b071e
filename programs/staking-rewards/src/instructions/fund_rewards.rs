use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::STAKING_POOL_SEED;
use crate::error::StakingError;
use crate::state::StakingPool;

/// Top up the native reward vault or the vester reserve.
///
/// Emission is rate based, so funding only has to stay ahead of what the
/// rates promise; it does not change reward_per_token.
#[derive(Accounts)]
pub struct FundRewards<'info> {
    #[account(
        constraint = admin.key() == staking_pool.admin @ StakingError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        seeds = [STAKING_POOL_SEED, staking_pool.pool_id.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    #[account(
        mut,
        constraint = source.owner == admin.key() @ StakingError::InvalidTokenAccountOwner
    )]
    pub source: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.key() == staking_pool.reward_vault
            || destination.key() == staking_pool.vester_reserve @ StakingError::InvalidRewardMint
    )]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.source.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: ctx.accounts.admin.to_account_info(),
            },
        ),
        amount,
    )?;

    msg!(
        "Funded {} into {}",
        amount,
        ctx.accounts.destination.key()
    );

    Ok(())
}
