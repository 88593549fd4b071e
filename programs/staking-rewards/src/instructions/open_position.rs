use anchor_lang::prelude::*;

use crate::constants::{POSITION_SEED, STAKING_POOL_SEED};
use crate::state::{StakePosition, StakingPool, VestingState};

/// Open a staking position. The owner may be a program-derived address
/// signing through CPI, so rent is paid by a separate payer.
#[derive(Accounts)]
pub struct OpenPosition<'info> {
    pub owner: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        seeds = [STAKING_POOL_SEED, staking_pool.pool_id.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    #[account(
        init,
        payer = payer,
        space = 8 + StakePosition::INIT_SPACE,
        seeds = [POSITION_SEED, staking_pool.key().as_ref(), owner.key().as_ref()],
        bump
    )]
    pub position: Account<'info, StakePosition>,

    pub system_program: Program<'info, System>,
}

pub fn handler_open_position(ctx: Context<OpenPosition>) -> Result<()> {
    let pool = &ctx.accounts.staking_pool;
    let position = &mut ctx.accounts.position;

    position.pool = pool.key();
    position.owner = ctx.accounts.owner.key();
    position.staked_amount = 0;
    position.staked_es_amount = 0;
    // Start from the current accumulators so nothing is owed retroactively
    position.native_reward_debt = pool.native_reward_per_token;
    position.es_reward_debt = pool.es_reward_per_token;
    position.native_rewards_owed = 0;
    position.es_rewards_owed = 0;
    position.last_stake_time = 0;
    position.vesting = VestingState::default();
    position.bump = ctx.bumps.position;

    msg!("Position opened: pool={}, owner={}", position.pool, position.owner);

    Ok(())
}
