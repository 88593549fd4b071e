use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use staking_rewards::program::StakingRewards;
use staking_rewards::state::{StakePosition, StakingPool};

use crate::constants::{EARN_ACCOUNT_SEED, GOVERNANCE_SEED};
use crate::error::YieldVaultError;
use crate::state::{EarnAccount, Governance, Selector};

/// Unstake from the earn account's position, paying `receiver` in `receive_mint`
#[derive(Accounts)]
pub struct EarnUnstake<'info> {
    #[account(
        constraint = governance.is_allowed(
            &earn_account.key(),
            &operator.key(),
            Selector::EarnUnstake
        ) @ YieldVaultError::InvalidAccess
    )]
    pub operator: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Box<Account<'info, Governance>>,

    #[account(
        seeds = [EARN_ACCOUNT_SEED, earn_account.seed_key.as_ref(), &earn_account.kind_seed()],
        bump = earn_account.bump
    )]
    pub earn_account: Box<Account<'info, EarnAccount>>,

    #[account(mut)]
    pub staking_pool: Box<Account<'info, StakingPool>>,

    #[account(
        mut,
        constraint = position.owner == earn_account.key() @ YieldVaultError::AccountMismatch,
        constraint = position.pool == staking_pool.key() @ YieldVaultError::AccountMismatch
    )]
    pub position: Box<Account<'info, StakePosition>>,

    pub receive_mint: Box<Account<'info, Mint>>,

    /// CHECK: Validated by the staking program
    #[account(mut)]
    pub pool_vault: UncheckedAccount<'info>,

    #[account(mut, token::mint = receive_mint)]
    pub receiver: Box<Account<'info, TokenAccount>>,

    pub staking_program: Program<'info, StakingRewards>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_earn_unstake(ctx: Context<EarnUnstake>, amount: u64, min_out: u64) -> Result<()> {
    require!(amount > 0, YieldVaultError::ExpectedNonZero);

    let earn_account = &ctx.accounts.earn_account;
    let seed_key = earn_account.seed_key;
    let kind_seed = earn_account.kind_seed();
    let bump = [earn_account.bump];
    let seeds: &[&[u8]] = &[EARN_ACCOUNT_SEED, seed_key.as_ref(), &kind_seed, &bump];
    let signer_seeds = &[seeds];

    staking_rewards::cpi::unstake(
        CpiContext::new_with_signer(
            ctx.accounts.staking_program.to_account_info(),
            staking_rewards::cpi::accounts::Unstake {
                owner: earn_account.to_account_info(),
                staking_pool: ctx.accounts.staking_pool.to_account_info(),
                position: ctx.accounts.position.to_account_info(),
                receive_mint: ctx.accounts.receive_mint.to_account_info(),
                pool_vault: ctx.accounts.pool_vault.to_account_info(),
                receiver: ctx.accounts.receiver.to_account_info(),
                token_program: ctx.accounts.token_program.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        min_out,
    )?;

    msg!(
        "Earn unstake: earn_account={}, amount={}, receiver={}",
        earn_account.key(),
        amount,
        ctx.accounts.receiver.key()
    );

    Ok(())
}
