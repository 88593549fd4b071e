use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use staking_rewards::program::StakingRewards;
use staking_rewards::state::{PoolKind, StakePosition, StakingPool};

use crate::constants::{EARN_ACCOUNT_SEED, GOVERNANCE_SEED, MANAGER_SEED};
use crate::error::YieldVaultError;
use crate::events::EsRewardsRestaked;
use crate::state::{split_es_rewards, EarnAccount, Governance, Manager, Selector, VaultType};

/// Compound the earn account's escrowed rewards in the token pool
///
/// # Flow
/// 1. Claim vested staked tokens and restake them
/// 2. Split the es held by the earn account with `es_gmx_vesting_rate`
/// 3. Deposit the vesting part into the vester, restake the rest
#[derive(Accounts)]
pub struct RestakeEsRewards<'info> {
    #[account(
        constraint = governance.is_allowed(
            &earn_account.key(),
            &operator.key(),
            Selector::EarnHarvest
        ) @ YieldVaultError::InvalidAccess
    )]
    pub operator: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Box<Account<'info, Governance>>,

    #[account(
        seeds = [MANAGER_SEED, manager.investment_mint.as_ref()],
        bump = manager.bump
    )]
    pub manager: Box<Account<'info, Manager>>,

    #[account(
        seeds = [EARN_ACCOUNT_SEED, earn_account.seed_key.as_ref(), &earn_account.kind_seed()],
        bump = earn_account.bump,
        constraint = manager.is_earn_account(&earn_account.key()) @ YieldVaultError::AccountMismatch
    )]
    pub earn_account: Box<Account<'info, EarnAccount>>,

    #[account(
        mut,
        address = manager.staking_pool_for(VaultType::Gmx) @ YieldVaultError::AccountMismatch,
        constraint = token_pool.kind == PoolKind::Token @ YieldVaultError::InvalidParam
    )]
    pub token_pool: Box<Account<'info, StakingPool>>,

    #[account(
        mut,
        constraint = position.owner == earn_account.key() @ YieldVaultError::AccountMismatch,
        constraint = position.pool == token_pool.key() @ YieldVaultError::AccountMismatch
    )]
    pub position: Box<Account<'info, StakePosition>>,

    /// CHECK: Validated by the staking program
    #[account(mut)]
    pub vester_reserve: UncheckedAccount<'info>,

    #[account(address = token_pool.staked_mint @ YieldVaultError::AccountMismatch)]
    pub staked_mint: Box<Account<'info, Mint>>,

    #[account(mut, address = token_pool.es_mint @ YieldVaultError::AccountMismatch)]
    pub es_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        token::mint = staked_mint,
        token::authority = earn_account
    )]
    pub earn_staked_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = es_mint,
        token::authority = earn_account
    )]
    pub earn_es_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: Validated by the staking program
    #[account(mut)]
    pub staked_pool_vault: UncheckedAccount<'info>,

    /// CHECK: Validated by the staking program
    #[account(mut)]
    pub es_pool_vault: UncheckedAccount<'info>,

    pub staking_program: Program<'info, StakingRewards>,
    pub token_program: Program<'info, Token>,
}

impl<'info> RestakeEsRewards<'info> {
    fn stake(
        &self,
        mint: AccountInfo<'info>,
        from: AccountInfo<'info>,
        pool_vault: AccountInfo<'info>,
        amount: u64,
        signer: &[&[&[u8]]],
    ) -> Result<()> {
        staking_rewards::cpi::stake(
            CpiContext::new_with_signer(
                self.staking_program.to_account_info(),
                staking_rewards::cpi::accounts::Stake {
                    owner: self.earn_account.to_account_info(),
                    staking_pool: self.token_pool.to_account_info(),
                    position: self.position.to_account_info(),
                    deposit_mint: mint,
                    owner_token_account: from,
                    pool_vault,
                    token_program: self.token_program.to_account_info(),
                },
                signer,
            ),
            amount,
            // Token pools stake 1:1
            amount,
        )
    }
}

pub fn handler_restake_es_rewards(ctx: Context<RestakeEsRewards>) -> Result<()> {
    let seed_key = ctx.accounts.earn_account.seed_key;
    let kind_seed = ctx.accounts.earn_account.kind_seed();
    let bump = [ctx.accounts.earn_account.bump];
    let earn_seeds: &[&[u8]] = &[EARN_ACCOUNT_SEED, seed_key.as_ref(), &kind_seed, &bump];
    let earn_signer = &[earn_seeds];

    // =========================================================================
    // Vested tokens
    // =========================================================================

    let staked_before = ctx.accounts.earn_staked_account.amount;

    staking_rewards::cpi::claim_vested(CpiContext::new_with_signer(
        ctx.accounts.staking_program.to_account_info(),
        staking_rewards::cpi::accounts::ClaimVested {
            owner: ctx.accounts.earn_account.to_account_info(),
            staking_pool: ctx.accounts.token_pool.to_account_info(),
            position: ctx.accounts.position.to_account_info(),
            vester_reserve: ctx.accounts.vester_reserve.to_account_info(),
            receiver: ctx.accounts.earn_staked_account.to_account_info(),
            token_program: ctx.accounts.token_program.to_account_info(),
        },
        earn_signer,
    ))?;

    ctx.accounts.earn_staked_account.reload()?;
    let vested_restaked = ctx
        .accounts
        .earn_staked_account
        .amount
        .checked_sub(staked_before)
        .ok_or(YieldVaultError::MathUnderflow)?;

    if vested_restaked > 0 {
        ctx.accounts.stake(
            ctx.accounts.staked_mint.to_account_info(),
            ctx.accounts.earn_staked_account.to_account_info(),
            ctx.accounts.staked_pool_vault.to_account_info(),
            vested_restaked,
            earn_signer,
        )?;
    }

    // =========================================================================
    // Escrowed rewards
    // =========================================================================

    let es_held = ctx.accounts.earn_es_account.amount;
    ctx.accounts.position.reload()?;
    let (es_vested, es_restaked) = split_es_rewards(
        es_held,
        &ctx.accounts.manager.es_gmx_vesting_rate,
        ctx.accounts.position.max_vesting_deposit(),
    )?;

    if es_vested > 0 {
        staking_rewards::cpi::deposit_for_vesting(
            CpiContext::new_with_signer(
                ctx.accounts.staking_program.to_account_info(),
                staking_rewards::cpi::accounts::DepositForVesting {
                    owner: ctx.accounts.earn_account.to_account_info(),
                    staking_pool: ctx.accounts.token_pool.to_account_info(),
                    position: ctx.accounts.position.to_account_info(),
                    es_mint: ctx.accounts.es_mint.to_account_info(),
                    owner_es_account: ctx.accounts.earn_es_account.to_account_info(),
                    token_program: ctx.accounts.token_program.to_account_info(),
                },
                earn_signer,
            ),
            es_vested,
        )?;
    }

    if es_restaked > 0 {
        ctx.accounts.stake(
            ctx.accounts.es_mint.to_account_info(),
            ctx.accounts.earn_es_account.to_account_info(),
            ctx.accounts.es_pool_vault.to_account_info(),
            es_restaked,
            earn_signer,
        )?;
    }

    emit!(EsRewardsRestaked {
        manager: ctx.accounts.manager.key(),
        earn_account: ctx.accounts.earn_account.key(),
        vested_restaked,
        es_vested,
        es_restaked,
    });

    msg!(
        "Es rewards compounded: vested_restaked={}, es_vested={}, es_restaked={}",
        vested_restaked,
        es_vested,
        es_restaked
    );

    Ok(())
}
