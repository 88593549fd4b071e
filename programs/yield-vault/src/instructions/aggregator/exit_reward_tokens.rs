use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::{GOVERNANCE_SEED, REWARDS_AGGREGATOR_SEED};
use crate::error::YieldVaultError;
use crate::events::Exited;
use crate::instructions::manager::*;
use crate::state::{ExitQuote, Governance, RewardsAggregator, Selector, VaultType};

/// Turn the GLP aggregator's oGMX into the staked token through the GMX
/// manager's exit flow, ready to be swapped in the next harvest
#[derive(Accounts)]
pub struct ExitRewardTokens<'info> {
    pub exit_flow: ManagerExit<'info>,

    #[account(
        constraint = governance.is_allowed(
            &aggregator.key(),
            &operator.key(),
            Selector::AggregatorHarvest
        ) @ YieldVaultError::InvalidAccess
    )]
    pub operator: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Box<Account<'info, Governance>>,

    #[account(
        seeds = [REWARDS_AGGREGATOR_SEED, aggregator.vault.as_ref()],
        bump = aggregator.bump,
        constraint = aggregator.vault_type == VaultType::Glp @ YieldVaultError::Unsupported,
        constraint = exit_flow.manager.key() == aggregator.gmx_manager @ YieldVaultError::AccountMismatch,
        constraint = exit_flow.receiver.owner == aggregator.key() @ YieldVaultError::AccountMismatch
    )]
    pub aggregator: Box<Account<'info, RewardsAggregator>>,

    #[account(
        mut,
        token::mint = aggregator.o_gmx_mint,
        token::authority = aggregator
    )]
    pub aggregator_o_gmx_account: Box<Account<'info, TokenAccount>>,
}

pub fn handler_exit_reward_tokens(ctx: Context<ExitRewardTokens>, quote: ExitQuote) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let aggregator = &ctx.accounts.aggregator;
    let vault_key = aggregator.vault;
    let seeds: &[&[u8]] = &[REWARDS_AGGREGATOR_SEED, vault_key.as_ref(), &[aggregator.bump]];

    let exit_flow = &mut ctx.accounts.exit_flow;
    let live = exit_flow.validate(&quote, now)?;
    let to_amount = exit_flow.settle(
        &live,
        ctx.accounts.aggregator_o_gmx_account.to_account_info(),
        aggregator.to_account_info(),
        &[seeds],
    )?;

    emit!(Exited {
        user: aggregator.key(),
        investment_amount: live.investment_token_amount,
        to_token: live.to_token,
        to_amount,
        receiver: exit_flow.receiver.key(),
        investment_mint: exit_flow.investment_mint.key(),
    });

    msg!(
        "Reward tokens exited: {} oGMX for {} of {}",
        live.investment_token_amount,
        to_amount,
        live.to_token
    );

    Ok(())
}
