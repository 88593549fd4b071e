use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;
use staking_rewards::state::StakingPool;

use crate::constants::REWARDS_AGGREGATOR_SEED;
use crate::error::YieldVaultError;
use crate::instructions::manager::{load_earn_positions, net_harvestable, projected_rates};
use crate::state::{EarnRewards, Manager, RepricingVault, RewardsAggregator};

#[derive(Accounts)]
pub struct AggregatorTokensView<'info> {
    #[account(
        seeds = [REWARDS_AGGREGATOR_SEED, aggregator.vault.as_ref()],
        bump = aggregator.bump
    )]
    pub aggregator: Account<'info, RewardsAggregator>,
}

/// [native, oGMX, oGLP]
pub fn handler_reward_tokens_list(ctx: Context<AggregatorTokensView>) -> Result<[Pubkey; 3]> {
    Ok(ctx.accounts.aggregator.reward_tokens_list())
}

/// Remaining accounts: the GMX manager's earn positions in `staking_pool`
/// followed by the GLP manager's
#[derive(Accounts)]
pub struct AggregatorRewardsView<'info> {
    #[account(
        seeds = [REWARDS_AGGREGATOR_SEED, aggregator.vault.as_ref()],
        bump = aggregator.bump
    )]
    pub aggregator: Box<Account<'info, RewardsAggregator>>,

    #[account(address = aggregator.vault @ YieldVaultError::AccountMismatch)]
    pub vault: Box<Account<'info, RepricingVault>>,

    #[account(address = aggregator.gmx_manager @ YieldVaultError::AccountMismatch)]
    pub gmx_manager: Box<Account<'info, Manager>>,

    #[account(address = aggregator.glp_manager @ YieldVaultError::AccountMismatch)]
    pub glp_manager: Box<Account<'info, Manager>>,

    #[account(
        address = gmx_manager.staking_pool_for(aggregator.vault_type) @ YieldVaultError::AccountMismatch,
        constraint = staking_pool.key() == glp_manager.staking_pool_for(aggregator.vault_type)
            @ YieldVaultError::AccountMismatch
    )]
    pub staking_pool: Box<Account<'info, StakingPool>>,

    #[account(
        token::mint = aggregator.native_mint,
        token::authority = aggregator
    )]
    pub native_account: Box<Account<'info, TokenAccount>>,

    #[account(
        token::mint = aggregator.o_gmx_mint,
        token::authority = aggregator
    )]
    pub o_gmx_account: Box<Account<'info, TokenAccount>>,

    #[account(
        token::mint = aggregator.o_glp_mint,
        token::authority = aggregator
    )]
    pub o_glp_account: Box<Account<'info, TokenAccount>>,
}

fn split_positions<'a, 'info>(
    accounts: &'a [AccountInfo<'info>],
    gmx_position_count: u8,
) -> Result<(&'a [AccountInfo<'info>], &'a [AccountInfo<'info>])> {
    let count = gmx_position_count as usize;
    require!(count <= accounts.len(), YieldVaultError::InvalidParam);
    Ok(accounts.split_at(count))
}

/// [native, oGMX, oGLP]: balances on hand plus what the managers' earn
/// positions would harvest now, oGMX net of the manager fees
pub fn handler_aggregator_harvestable_rewards(
    ctx: Context<AggregatorRewardsView>,
    gmx_position_count: u8,
) -> Result<[u64; 3]> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &ctx.accounts;
    let pool = &accounts.staking_pool;
    let (gmx_accounts, glp_accounts) = split_positions(ctx.remaining_accounts, gmx_position_count)?;

    let mut native = accounts.native_account.amount;
    let mut o_gmx = accounts.o_gmx_account.amount;

    for (manager, infos) in [
        (&accounts.gmx_manager, gmx_accounts),
        (&accounts.glp_manager, glp_accounts),
    ] {
        let positions = load_earn_positions(manager, &pool.key(), infos)?;
        let pending = net_harvestable(manager, pool, &positions, now)?;
        native = native
            .checked_add(pending.wrapped_native)
            .ok_or(YieldVaultError::MathOverflow)?;
        o_gmx = o_gmx
            .checked_add(pending.es_gmx)
            .ok_or(YieldVaultError::MathOverflow)?;
    }

    Ok([native, o_gmx, accounts.o_glp_account.amount])
}

/// Per-second (native, oGMX) flowing to this aggregator, optionally net of
/// the vault's performance fee
pub fn handler_aggregator_projected_reward_rates(
    ctx: Context<AggregatorRewardsView>,
    gmx_position_count: u8,
    subtract_perf_fees: bool,
) -> Result<EarnRewards> {
    let accounts = &ctx.accounts;
    let pool = &accounts.staking_pool;
    let performance_fee = &accounts.vault.performance_fee;
    let (gmx_accounts, glp_accounts) = split_positions(ctx.remaining_accounts, gmx_position_count)?;

    let mut rates = EarnRewards::default();
    for (manager, infos) in [
        (&accounts.gmx_manager, gmx_accounts),
        (&accounts.glp_manager, glp_accounts),
    ] {
        let positions = load_earn_positions(manager, &pool.key(), infos)?;
        let r = projected_rates(manager, pool, &positions, true)?;
        rates.wrapped_native = rates
            .wrapped_native
            .checked_add(r.wrapped_native)
            .ok_or(YieldVaultError::MathOverflow)?;
        rates.es_gmx = rates
            .es_gmx
            .checked_add(r.es_gmx)
            .ok_or(YieldVaultError::MathOverflow)?;
    }

    Ok(EarnRewards {
        wrapped_native: RewardsAggregator::net_of_performance_fee(
            rates.wrapped_native,
            performance_fee,
            subtract_perf_fees,
        )?,
        es_gmx: RewardsAggregator::net_of_performance_fee(
            rates.es_gmx,
            performance_fee,
            subtract_perf_fees,
        )?,
    })
}
