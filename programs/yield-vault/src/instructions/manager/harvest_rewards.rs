use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount, Transfer};
use staking_rewards::program::StakingRewards;
use staking_rewards::state::{StakePosition, StakingPool};

use crate::constants::{EARN_ACCOUNT_SEED, GOVERNANCE_SEED, INVESTMENT_TOKEN_SEED, MANAGER_SEED};
use crate::error::YieldVaultError;
use crate::events::RewardsHarvested;
use crate::state::{EarnAccount, Governance, InvestmentToken, Manager, Selector, VaultType};

/// Harvest one earn account's rewards in the pool of `vault_type`
///
/// # Flow
/// 1. Claim native and es rewards from the upstream position
/// 2. Forward the native rewards to the vault type's aggregator
/// 3. Mint oGMX for the es claimed: the reward fee to the fee collector,
///    the rest to the aggregator
///
/// The claimed es stays on the earn account; `restake_es_rewards` vests and
/// restakes it.
#[derive(Accounts)]
#[instruction(vault_type: VaultType)]
pub struct ManagerHarvestRewards<'info> {
    #[account(
        constraint = governance.is_allowed(
            &manager.key(),
            &operator.key(),
            Selector::ManagerHarvest
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
        constraint = manager.is_earn_account(&earn_account.key()) @ YieldVaultError::AccountMismatch
    )]
    pub earn_account: Box<Account<'info, EarnAccount>>,

    #[account(
        mut,
        address = manager.staking_pool_for(vault_type) @ YieldVaultError::AccountMismatch
    )]
    pub staking_pool: Box<Account<'info, StakingPool>>,

    #[account(
        mut,
        constraint = position.owner == earn_account.key() @ YieldVaultError::AccountMismatch,
        constraint = position.pool == staking_pool.key() @ YieldVaultError::AccountMismatch
    )]
    pub position: Box<Account<'info, StakePosition>>,

    /// CHECK: Validated by the staking program
    #[account(mut)]
    pub reward_vault: UncheckedAccount<'info>,

    #[account(mut, address = staking_pool.es_mint @ YieldVaultError::AccountMismatch)]
    pub es_mint: Box<Account<'info, Mint>>,

    /// CHECK: Validated by the staking program
    pub es_minter: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = staking_pool.native_reward_mint,
        token::authority = earn_account
    )]
    pub earn_native_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = es_mint,
        token::authority = earn_account
    )]
    pub earn_es_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = staking_pool.native_reward_mint,
        constraint = aggregator_native_account.owner == manager.rewards_aggregator_for(vault_type)
            @ YieldVaultError::AccountMismatch
    )]
    pub aggregator_native_account: Box<Account<'info, TokenAccount>>,

    #[account(
        seeds = [INVESTMENT_TOKEN_SEED, o_gmx_mint.key().as_ref()],
        bump = o_gmx_token.bump,
        address = manager.o_gmx_token @ YieldVaultError::AccountMismatch
    )]
    pub o_gmx_token: Box<Account<'info, InvestmentToken>>,

    #[account(mut, address = o_gmx_token.mint @ YieldVaultError::AccountMismatch)]
    pub o_gmx_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        token::mint = o_gmx_mint,
        constraint = fee_collector_o_gmx_account.owner == manager.fee_collector
            @ YieldVaultError::AccountMismatch
    )]
    pub fee_collector_o_gmx_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = o_gmx_mint,
        constraint = aggregator_o_gmx_account.owner == manager.rewards_aggregator_for(vault_type)
            @ YieldVaultError::AccountMismatch
    )]
    pub aggregator_o_gmx_account: Box<Account<'info, TokenAccount>>,

    pub staking_program: Program<'info, StakingRewards>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_manager_harvest_rewards(
    ctx: Context<ManagerHarvestRewards>,
    vault_type: VaultType,
) -> Result<()> {
    require!(
        ctx.accounts.manager.rewards_aggregator_for(vault_type) != Pubkey::default(),
        YieldVaultError::InvalidAddress
    );

    let earn_account = &ctx.accounts.earn_account;
    let seed_key = earn_account.seed_key;
    let kind_seed = earn_account.kind_seed();
    let bump = [earn_account.bump];
    let earn_seeds: &[&[u8]] = &[EARN_ACCOUNT_SEED, seed_key.as_ref(), &kind_seed, &bump];
    let earn_signer = &[earn_seeds];

    // =========================================================================
    // Claim upstream
    // =========================================================================

    let native_before = ctx.accounts.earn_native_account.amount;
    let es_before = ctx.accounts.earn_es_account.amount;

    staking_rewards::cpi::claim(CpiContext::new_with_signer(
        ctx.accounts.staking_program.to_account_info(),
        staking_rewards::cpi::accounts::Claim {
            owner: earn_account.to_account_info(),
            staking_pool: ctx.accounts.staking_pool.to_account_info(),
            position: ctx.accounts.position.to_account_info(),
            reward_vault: ctx.accounts.reward_vault.to_account_info(),
            es_mint: ctx.accounts.es_mint.to_account_info(),
            es_minter: ctx.accounts.es_minter.to_account_info(),
            native_receiver: ctx.accounts.earn_native_account.to_account_info(),
            es_receiver: ctx.accounts.earn_es_account.to_account_info(),
            token_program: ctx.accounts.token_program.to_account_info(),
        },
        earn_signer,
    ))?;

    ctx.accounts.earn_native_account.reload()?;
    ctx.accounts.earn_es_account.reload()?;

    let wrapped_native = ctx
        .accounts
        .earn_native_account
        .amount
        .checked_sub(native_before)
        .ok_or(YieldVaultError::MathUnderflow)?;
    let es_claimed = ctx
        .accounts
        .earn_es_account
        .amount
        .checked_sub(es_before)
        .ok_or(YieldVaultError::MathUnderflow)?;

    // =========================================================================
    // Forward native to the aggregator
    // =========================================================================

    if wrapped_native > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.earn_native_account.to_account_info(),
                    to: ctx.accounts.aggregator_native_account.to_account_info(),
                    authority: earn_account.to_account_info(),
                },
                earn_signer,
            ),
            wrapped_native,
        )?;
    }

    // =========================================================================
    // Mint oGMX for the es claimed
    // =========================================================================

    let manager = &ctx.accounts.manager;
    let (o_gmx_fee, o_gmx_to_aggregator) = manager.o_gmx_rewards_fee_rate.split(es_claimed)?;

    if es_claimed > 0 {
        ctx.accounts.o_gmx_token.require_minter(&manager.key())?;

        let o_gmx_mint_key = ctx.accounts.o_gmx_mint.key();
        let token_seeds: &[&[u8]] = &[
            INVESTMENT_TOKEN_SEED,
            o_gmx_mint_key.as_ref(),
            &[ctx.accounts.o_gmx_token.bump],
        ];
        let token_signer = &[token_seeds];

        for (to, amount) in [
            (ctx.accounts.fee_collector_o_gmx_account.to_account_info(), o_gmx_fee),
            (ctx.accounts.aggregator_o_gmx_account.to_account_info(), o_gmx_to_aggregator),
        ] {
            if amount == 0 {
                continue;
            }
            token::mint_to(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    MintTo {
                        mint: ctx.accounts.o_gmx_mint.to_account_info(),
                        to,
                        authority: ctx.accounts.o_gmx_token.to_account_info(),
                    },
                    token_signer,
                ),
                amount,
            )?;
        }
    }

    emit!(RewardsHarvested {
        manager: manager.key(),
        earn_account: earn_account.key(),
        vault_type,
        wrapped_native,
        es_claimed,
        o_gmx_fee,
        o_gmx_to_aggregator,
    });

    msg!(
        "Harvested {:?}: native={}, es={}, oGMX fee={}, oGMX to aggregator={}",
        vault_type,
        wrapped_native,
        es_claimed,
        o_gmx_fee,
        o_gmx_to_aggregator
    );

    Ok(())
}
