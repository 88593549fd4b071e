use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{GOVERNANCE_SEED, REPRICING_VAULT_SEED, REWARDS_AGGREGATOR_SEED};
use crate::error::YieldVaultError;
use crate::state::{Governance, RepricingVault, RewardsAggregator, VaultType};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeAggregatorParams {
    pub vault_type: VaultType,
    pub gmx_manager: Pubkey,
    pub glp_manager: Pubkey,
    pub native_mint: Pubkey,
    pub o_gmx_mint: Pubkey,
    pub o_glp_mint: Pubkey,
    pub performance_fee_collector: Pubkey,
    pub dex_program: Pubkey,
}

#[derive(Accounts)]
pub struct InitializeAggregator<'info> {
    #[account(
        mut,
        constraint = governance.is_owner(&owner.key()) @ YieldVaultError::InvalidAccess
    )]
    pub owner: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Box<Account<'info, Governance>>,

    #[account(
        seeds = [REPRICING_VAULT_SEED, vault.share_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Box<Account<'info, RepricingVault>>,

    #[account(
        init,
        payer = owner,
        space = 8 + RewardsAggregator::INIT_SPACE,
        seeds = [REWARDS_AGGREGATOR_SEED, vault.key().as_ref()],
        bump
    )]
    pub aggregator: Box<Account<'info, RewardsAggregator>>,

    pub system_program: Program<'info, System>,
}

pub fn handler_initialize_aggregator(
    ctx: Context<InitializeAggregator>,
    params: InitializeAggregatorParams,
) -> Result<()> {
    require!(
        [
            params.gmx_manager,
            params.glp_manager,
            params.native_mint,
            params.o_gmx_mint,
            params.o_glp_mint,
            params.performance_fee_collector,
            params.dex_program,
        ]
        .iter()
        .all(|key| *key != Pubkey::default()),
        YieldVaultError::InvalidAddress
    );

    let aggregator = &mut ctx.accounts.aggregator;
    aggregator.governance = ctx.accounts.governance.key();
    aggregator.vault_type = params.vault_type;
    aggregator.vault = ctx.accounts.vault.key();
    aggregator.gmx_manager = params.gmx_manager;
    aggregator.glp_manager = params.glp_manager;
    aggregator.native_mint = params.native_mint;
    aggregator.o_gmx_mint = params.o_gmx_mint;
    aggregator.o_glp_mint = params.o_glp_mint;
    aggregator.performance_fee_collector = params.performance_fee_collector;
    aggregator.dex_program = params.dex_program;
    aggregator.bump = ctx.bumps.aggregator;

    // The vault must hold this aggregator's reserve token
    require_keys_eq!(
        ctx.accounts.vault.reserve_mint,
        aggregator.reserve_mint(),
        YieldVaultError::InvalidToken
    );

    msg!(
        "Rewards aggregator initialized: {} vault_type={:?}, vault={}",
        aggregator.key(),
        params.vault_type,
        aggregator.vault
    );

    Ok(())
}

// =============================================================================
// Aggregator Token Accounts
// =============================================================================

/// Create (if missing) the aggregator's associated token account for `mint`
#[derive(Accounts)]
pub struct InitAggregatorTokenAccount<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        seeds = [REWARDS_AGGREGATOR_SEED, aggregator.vault.as_ref()],
        bump = aggregator.bump
    )]
    pub aggregator: Account<'info, RewardsAggregator>,

    pub mint: Account<'info, Mint>,

    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = mint,
        associated_token::authority = aggregator
    )]
    pub token_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn handler_init_aggregator_token_account(ctx: Context<InitAggregatorTokenAccount>) -> Result<()> {
    msg!(
        "Aggregator token account ready: mint={}, account={}",
        ctx.accounts.mint.key(),
        ctx.accounts.token_account.key()
    );
    Ok(())
}
