use anchor_lang::prelude::*;

use crate::constants::{GOVERNANCE_SEED, MANAGER_SEED};
use crate::error::YieldVaultError;
use crate::events::{
    EarnAccountsSet, FeeCollectorSet, FeeRateSet, PausedSet, PauserSet, RewardsAggregatorsSet,
};
use crate::state::{FeeRate, FeeRateKind, Governance, Manager, PausedFlags};

// =============================================================================
// Owner Setters
// =============================================================================

#[derive(Accounts)]
pub struct ManagerAdmin<'info> {
    #[account(
        constraint = governance.is_owner(&owner.key()) @ YieldVaultError::InvalidAccess
    )]
    pub owner: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Account<'info, Governance>,

    #[account(
        mut,
        seeds = [MANAGER_SEED, manager.investment_mint.as_ref()],
        bump = manager.bump
    )]
    pub manager: Account<'info, Manager>,
}

pub fn handler_set_pauser(ctx: Context<ManagerAdmin>, account: Pubkey, can_pause: bool) -> Result<()> {
    let manager = &mut ctx.accounts.manager;
    manager.set_pauser(account, can_pause)?;

    emit!(PauserSet {
        manager: manager.key(),
        account,
        can_pause,
    });

    Ok(())
}

/// Shared by the three fee rate setters
pub fn handler_set_fee_rate(
    ctx: Context<ManagerAdmin>,
    kind: FeeRateKind,
    rate: FeeRate,
) -> Result<()> {
    let new_rate = rate.validated()?;
    let manager = &mut ctx.accounts.manager;

    let slot = match kind {
        FeeRateKind::Sell => &mut manager.sell_fee_rate,
        FeeRateKind::OGmxRewards => &mut manager.o_gmx_rewards_fee_rate,
        FeeRateKind::EsGmxVesting => &mut manager.es_gmx_vesting_rate,
    };
    let old_rate = std::mem::replace(slot, new_rate);

    emit!(FeeRateSet {
        manager: manager.key(),
        kind,
        old_rate,
        new_rate,
    });

    msg!(
        "Fee rate {:?} set: {}/{} -> {}/{}",
        kind,
        old_rate.numerator,
        old_rate.denominator,
        new_rate.numerator,
        new_rate.denominator
    );

    Ok(())
}

pub fn handler_set_fee_collector(ctx: Context<ManagerAdmin>, fee_collector: Pubkey) -> Result<()> {
    require!(fee_collector != Pubkey::default(), YieldVaultError::InvalidAddress);

    let manager = &mut ctx.accounts.manager;
    let old_collector = std::mem::replace(&mut manager.fee_collector, fee_collector);

    emit!(FeeCollectorSet {
        manager: manager.key(),
        old_collector,
        new_collector: fee_collector,
    });

    Ok(())
}

/// `secondary` may be the default key when the manager invests directly
/// into the primary account
pub fn handler_set_earn_accounts(
    ctx: Context<ManagerAdmin>,
    primary: Pubkey,
    secondary: Pubkey,
) -> Result<()> {
    require!(primary != Pubkey::default(), YieldVaultError::InvalidAddress);
    require!(primary != secondary, YieldVaultError::InvalidParam);

    let manager = &mut ctx.accounts.manager;
    require!(
        !manager.policy.invests_to_secondary || secondary != Pubkey::default(),
        YieldVaultError::InvalidAddress
    );

    manager.primary_earn_account = primary;
    manager.secondary_earn_account = secondary;

    emit!(EarnAccountsSet {
        manager: manager.key(),
        primary_earn_account: primary,
        secondary_earn_account: secondary,
    });

    Ok(())
}

pub fn handler_set_rewards_aggregators(
    ctx: Context<ManagerAdmin>,
    gmx_aggregator: Pubkey,
    glp_aggregator: Pubkey,
) -> Result<()> {
    require!(
        gmx_aggregator != Pubkey::default() && glp_aggregator != Pubkey::default(),
        YieldVaultError::InvalidAddress
    );

    let manager = &mut ctx.accounts.manager;
    manager.rewards_aggregators = [gmx_aggregator, glp_aggregator];

    emit!(RewardsAggregatorsSet {
        manager: manager.key(),
        gmx_aggregator,
        glp_aggregator,
    });

    Ok(())
}

// =============================================================================
// Pausers
// =============================================================================

#[derive(Accounts)]
pub struct SetPaused<'info> {
    pub pauser: Signer<'info>,

    #[account(
        mut,
        seeds = [MANAGER_SEED, manager.investment_mint.as_ref()],
        bump = manager.bump
    )]
    pub manager: Account<'info, Manager>,
}

pub fn handler_set_paused(ctx: Context<SetPaused>, paused: PausedFlags) -> Result<()> {
    let manager = &mut ctx.accounts.manager;
    manager.set_paused(&ctx.accounts.pauser.key(), paused)?;

    emit!(PausedSet {
        manager: manager.key(),
        paused,
    });

    msg!("Manager {} paused flags: {:?}", manager.key(), paused);

    Ok(())
}
