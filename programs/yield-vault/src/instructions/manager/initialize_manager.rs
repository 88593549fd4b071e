use anchor_lang::prelude::*;
use staking_rewards::state::{PoolKind, StakingPool};

use crate::constants::{GOVERNANCE_SEED, INVESTMENT_TOKEN_SEED, MANAGER_SEED};
use crate::error::YieldVaultError;
use crate::state::{
    accepted_tokens_for, AssetClass, AssetPolicy, FeeRate, Governance, InvestmentToken, Manager,
    PausedFlags,
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeManagerParams {
    pub asset_class: AssetClass,
    pub invests_to_secondary: bool,
    /// Upstream pools rewards are harvested from, indexed by VaultType
    pub staking_pools: [Pubkey; 2],
    /// InvestmentToken account of oGMX
    pub o_gmx_token: Pubkey,
    pub fee_collector: Pubkey,
    pub sell_fee_rate: FeeRate,
    pub o_gmx_rewards_fee_rate: FeeRate,
    pub es_gmx_vesting_rate: FeeRate,
}

/// Create the Manager for one investment token
///
/// The accepted token set is read from `upstream_pool` once and never
/// refreshed. Earn accounts and aggregators are wired up afterwards.
#[derive(Accounts)]
pub struct InitializeManager<'info> {
    #[account(
        mut,
        constraint = governance.is_owner(&owner.key()) @ YieldVaultError::InvalidAccess
    )]
    pub owner: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Box<Account<'info, Governance>>,

    #[account(
        seeds = [INVESTMENT_TOKEN_SEED, investment_token.mint.as_ref()],
        bump = investment_token.bump
    )]
    pub investment_token: Box<Account<'info, InvestmentToken>>,

    pub upstream_pool: Box<Account<'info, StakingPool>>,

    #[account(
        init,
        payer = owner,
        space = 8 + Manager::INIT_SPACE,
        seeds = [MANAGER_SEED, investment_token.mint.as_ref()],
        bump
    )]
    pub manager: Box<Account<'info, Manager>>,

    pub system_program: Program<'info, System>,
}

pub fn handler_initialize_manager(
    ctx: Context<InitializeManager>,
    params: InitializeManagerParams,
) -> Result<()> {
    let upstream_pool = &ctx.accounts.upstream_pool;

    let kind_matches = matches!(
        (params.asset_class, upstream_pool.kind),
        (AssetClass::Gmx, PoolKind::Token) | (AssetClass::Glp, PoolKind::Basket)
    );
    require!(kind_matches, YieldVaultError::InvalidParam);
    require!(
        params.staking_pools.iter().all(|p| *p != Pubkey::default())
            && params.o_gmx_token != Pubkey::default()
            && params.fee_collector != Pubkey::default(),
        YieldVaultError::InvalidAddress
    );

    let accepted_tokens = accepted_tokens_for(upstream_pool)?;

    let manager = &mut ctx.accounts.manager;
    manager.governance = ctx.accounts.governance.key();
    manager.investment_mint = ctx.accounts.investment_token.mint;
    manager.investment_token = ctx.accounts.investment_token.key();
    manager.policy = AssetPolicy {
        asset_class: params.asset_class,
        upstream_pool: upstream_pool.key(),
        accepted_tokens,
        invests_to_secondary: params.invests_to_secondary,
    };
    manager.staking_pools = params.staking_pools;
    manager.o_gmx_token = params.o_gmx_token;
    manager.primary_earn_account = Pubkey::default();
    manager.secondary_earn_account = Pubkey::default();
    manager.rewards_aggregators = [Pubkey::default(); 2];
    manager.fee_collector = params.fee_collector;
    manager.sell_fee_rate = params.sell_fee_rate.validated()?;
    manager.o_gmx_rewards_fee_rate = params.o_gmx_rewards_fee_rate.validated()?;
    manager.es_gmx_vesting_rate = params.es_gmx_vesting_rate.validated()?;
    manager.pausers = Vec::new();
    manager.paused = PausedFlags::default();
    manager.bump = ctx.bumps.manager;

    msg!(
        "Manager initialized: {} asset_class={:?}, accepted_tokens={}",
        manager.key(),
        params.asset_class,
        manager.policy.accepted_tokens.len()
    );

    Ok(())
}
