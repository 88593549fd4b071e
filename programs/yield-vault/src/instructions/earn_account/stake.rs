use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use staking_rewards::program::StakingRewards;
use staking_rewards::state::{PoolKind, StakePosition, StakingPool};

use crate::constants::{EARN_ACCOUNT_SEED, GOVERNANCE_SEED};
use crate::error::YieldVaultError;
use crate::state::{EarnAccount, Governance, Selector};

/// Stake tokens already held by the earn account into its upstream position
///
/// # Arguments
/// * `amount` - Tokens of `deposit_mint` to stake
/// * `min_out` - Minimum staked units, forwarded to the staking program
///
/// Basket stakes are rejected while the account's GLP investments are paused.
#[derive(Accounts)]
pub struct EarnStake<'info> {
    #[account(
        constraint = governance.is_allowed(
            &earn_account.key(),
            &operator.key(),
            Selector::EarnStake
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

    pub deposit_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        token::mint = deposit_mint,
        token::authority = earn_account
    )]
    pub earn_token_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: Validated by the staking program
    #[account(mut)]
    pub pool_vault: UncheckedAccount<'info>,

    pub staking_program: Program<'info, StakingRewards>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_earn_stake(ctx: Context<EarnStake>, amount: u64, min_out: u64) -> Result<()> {
    require!(amount > 0, YieldVaultError::ExpectedNonZero);
    require!(
        !(ctx.accounts.staking_pool.kind == PoolKind::Basket
            && ctx.accounts.earn_account.glp_investments_paused),
        YieldVaultError::GlpInvestmentsPaused
    );

    let earn_account = &ctx.accounts.earn_account;
    let seed_key = earn_account.seed_key;
    let kind_seed = earn_account.kind_seed();
    let bump = [earn_account.bump];
    let seeds: &[&[u8]] = &[EARN_ACCOUNT_SEED, seed_key.as_ref(), &kind_seed, &bump];
    let signer_seeds = &[seeds];

    staking_rewards::cpi::stake(
        CpiContext::new_with_signer(
            ctx.accounts.staking_program.to_account_info(),
            staking_rewards::cpi::accounts::Stake {
                owner: earn_account.to_account_info(),
                staking_pool: ctx.accounts.staking_pool.to_account_info(),
                position: ctx.accounts.position.to_account_info(),
                deposit_mint: ctx.accounts.deposit_mint.to_account_info(),
                owner_token_account: ctx.accounts.earn_token_account.to_account_info(),
                pool_vault: ctx.accounts.pool_vault.to_account_info(),
                token_program: ctx.accounts.token_program.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        min_out,
    )?;

    msg!(
        "Earn stake: earn_account={}, mint={}, amount={}",
        earn_account.key(),
        ctx.accounts.deposit_mint.key(),
        amount
    );

    Ok(())
}
