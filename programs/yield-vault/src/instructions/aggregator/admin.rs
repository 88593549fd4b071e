use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{GOVERNANCE_SEED, REWARDS_AGGREGATOR_SEED};
use crate::error::YieldVaultError;
use crate::events::{ManagersSet, PerformanceFeeCollectorSet, TokenRecovered};
use crate::state::{Governance, RewardsAggregator, VaultType};

#[derive(Accounts)]
pub struct AggregatorAdmin<'info> {
    #[account(
        constraint = governance.is_owner(&owner.key()) @ YieldVaultError::InvalidAccess
    )]
    pub owner: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Account<'info, Governance>,

    #[account(
        mut,
        seeds = [REWARDS_AGGREGATOR_SEED, aggregator.vault.as_ref()],
        bump = aggregator.bump
    )]
    pub aggregator: Account<'info, RewardsAggregator>,
}

pub fn handler_set_managers(
    ctx: Context<AggregatorAdmin>,
    vault_type: VaultType,
    gmx_manager: Pubkey,
    glp_manager: Pubkey,
) -> Result<()> {
    let aggregator = &mut ctx.accounts.aggregator;
    aggregator.set_managers(vault_type, gmx_manager, glp_manager)?;

    emit!(ManagersSet {
        aggregator: aggregator.key(),
        gmx_manager,
        glp_manager,
    });

    Ok(())
}

pub fn handler_set_performance_fee_collector(
    ctx: Context<AggregatorAdmin>,
    collector: Pubkey,
) -> Result<()> {
    let aggregator = &mut ctx.accounts.aggregator;
    let old_collector = aggregator.set_performance_fee_collector(collector)?;

    emit!(PerformanceFeeCollectorSet {
        aggregator: aggregator.key(),
        old_collector,
        new_collector: collector,
    });

    Ok(())
}

// =============================================================================
// Recover Token
// =============================================================================

/// Reward tokens can never be swept
#[derive(Accounts)]
pub struct AggregatorRecoverToken<'info> {
    #[account(
        constraint = governance.is_owner(&owner.key()) @ YieldVaultError::InvalidAccess
    )]
    pub owner: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Account<'info, Governance>,

    #[account(
        seeds = [REWARDS_AGGREGATOR_SEED, aggregator.vault.as_ref()],
        bump = aggregator.bump
    )]
    pub aggregator: Account<'info, RewardsAggregator>,

    #[account(
        mut,
        token::authority = aggregator,
        constraint = !aggregator.is_reward_token(&source.mint) @ YieldVaultError::InvalidToken
    )]
    pub source: Account<'info, TokenAccount>,

    #[account(mut, token::mint = source.mint)]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_aggregator_recover_token(
    ctx: Context<AggregatorRecoverToken>,
    amount: u64,
) -> Result<()> {
    require!(amount > 0, YieldVaultError::ExpectedNonZero);

    let aggregator = &ctx.accounts.aggregator;
    let vault_key = aggregator.vault;
    let seeds: &[&[u8]] = &[REWARDS_AGGREGATOR_SEED, vault_key.as_ref(), &[aggregator.bump]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.source.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: aggregator.to_account_info(),
            },
            &[seeds],
        ),
        amount,
    )?;

    emit!(TokenRecovered {
        from: aggregator.key(),
        token: ctx.accounts.source.mint,
        to: ctx.accounts.destination.key(),
        amount,
    });

    Ok(())
}
