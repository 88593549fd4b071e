use anchor_lang::prelude::*;

use crate::constants::{POSITION_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::state::{PoolKind, StakePosition, StakingPool};

/// Move staked units between two positions of the same pool without
/// touching the pool's token balances.
#[derive(Accounts)]
pub struct TransferStaked<'info> {
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
        bump = from_position.bump,
        constraint = from_position.owner == owner.key() @ StakingError::InvalidAuthority
    )]
    pub from_position: Account<'info, StakePosition>,

    #[account(
        mut,
        constraint = to_position.pool == staking_pool.key() @ StakingError::InvalidPosition,
        constraint = to_position.key() != from_position.key() @ StakingError::InvalidPosition
    )]
    pub to_position: Account<'info, StakePosition>,
}

pub fn handler_transfer_staked(ctx: Context<TransferStaked>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);

    let now = Clock::get()?.unix_timestamp;
    let staking_pool = &mut ctx.accounts.staking_pool;
    let from = &mut ctx.accounts.from_position;
    let to = &mut ctx.accounts.to_position;

    if staking_pool.kind == PoolKind::Basket {
        from.require_cooldown_passed(staking_pool.cooldown_duration, now)?;
    }

    staking_pool.update_rewards(now)?;
    let (native_rpt, es_rpt) = (
        staking_pool.native_reward_per_token,
        staking_pool.es_reward_per_token,
    );
    from.settle_rewards(native_rpt, es_rpt)?;
    to.settle_rewards(native_rpt, es_rpt)?;

    from.record_unstake(amount)?;
    // The receiver's own cooldown is left as is
    to.record_stake(amount, false, false, now)?;

    msg!(
        "Transferred {} staked units from {} to {}",
        amount,
        from.owner,
        to.owner
    );

    Ok(())
}
