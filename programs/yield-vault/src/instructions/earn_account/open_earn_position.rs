use anchor_lang::prelude::*;
use staking_rewards::program::StakingRewards;
use staking_rewards::state::StakingPool;

use crate::constants::{EARN_ACCOUNT_SEED, GOVERNANCE_SEED};
use crate::error::YieldVaultError;
use crate::state::{EarnAccount, Governance};

/// Open the earn account's position in an upstream pool (owner only)
#[derive(Accounts)]
pub struct OpenEarnPosition<'info> {
    #[account(
        mut,
        constraint = governance.is_owner(&owner.key()) @ YieldVaultError::InvalidAccess
    )]
    pub owner: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Account<'info, Governance>,

    #[account(
        seeds = [EARN_ACCOUNT_SEED, earn_account.seed_key.as_ref(), &earn_account.kind_seed()],
        bump = earn_account.bump
    )]
    pub earn_account: Account<'info, EarnAccount>,

    pub staking_pool: Account<'info, StakingPool>,

    /// CHECK: Created and validated by the staking program
    #[account(mut)]
    pub position: UncheckedAccount<'info>,

    pub staking_program: Program<'info, StakingRewards>,
    pub system_program: Program<'info, System>,
}

pub fn handler_open_earn_position(ctx: Context<OpenEarnPosition>) -> Result<()> {
    let earn_account = &ctx.accounts.earn_account;
    let seed_key = earn_account.seed_key;
    let kind_seed = earn_account.kind_seed();
    let bump = [earn_account.bump];
    let seeds: &[&[u8]] = &[EARN_ACCOUNT_SEED, seed_key.as_ref(), &kind_seed, &bump];
    let signer_seeds = &[seeds];

    staking_rewards::cpi::open_position(CpiContext::new_with_signer(
        ctx.accounts.staking_program.to_account_info(),
        staking_rewards::cpi::accounts::OpenPosition {
            owner: earn_account.to_account_info(),
            payer: ctx.accounts.owner.to_account_info(),
            staking_pool: ctx.accounts.staking_pool.to_account_info(),
            position: ctx.accounts.position.to_account_info(),
            system_program: ctx.accounts.system_program.to_account_info(),
        },
        signer_seeds,
    ))?;

    msg!(
        "Earn position opened: earn_account={}, pool={}",
        earn_account.key(),
        ctx.accounts.staking_pool.key()
    );

    Ok(())
}
