use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{DEFAULT_RESERVES_VESTING_DURATION, GOVERNANCE_SEED, REPRICING_VAULT_SEED};
use crate::error::YieldVaultError;
use crate::state::{FeeRate, Governance, RepricingVault};

/// Create a repricing vault over `reserve_mint`
///
/// The share mint must already have the vault PDA as mint authority and no
/// supply. The reserve token account is the vault's associated token account.
#[derive(Accounts)]
pub struct InitializeVault<'info> {
    #[account(
        mut,
        constraint = governance.is_owner(&owner.key()) @ YieldVaultError::InvalidAccess
    )]
    pub owner: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Box<Account<'info, Governance>>,

    pub reserve_mint: Box<Account<'info, Mint>>,

    #[account(constraint = share_mint.supply == 0 @ YieldVaultError::InvalidParam)]
    pub share_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = owner,
        space = 8 + RepricingVault::INIT_SPACE,
        seeds = [REPRICING_VAULT_SEED, share_mint.key().as_ref()],
        bump
    )]
    pub vault: Box<Account<'info, RepricingVault>>,

    #[account(
        init,
        payer = owner,
        associated_token::mint = reserve_mint,
        associated_token::authority = vault
    )]
    pub reserve_vault: Box<Account<'info, TokenAccount>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn handler_initialize_vault(ctx: Context<InitializeVault>, performance_fee: FeeRate) -> Result<()> {
    require!(
        ctx.accounts.share_mint.mint_authority == COption::Some(ctx.accounts.vault.key()),
        YieldVaultError::InvalidAccess
    );
    require!(
        ctx.accounts.reserve_mint.key() != ctx.accounts.share_mint.key(),
        YieldVaultError::InvalidToken
    );

    let now = Clock::get()?.unix_timestamp;
    let vault = &mut ctx.accounts.vault;

    vault.governance = ctx.accounts.governance.key();
    vault.reserve_mint = ctx.accounts.reserve_mint.key();
    vault.share_mint = ctx.accounts.share_mint.key();
    vault.reserve_vault = ctx.accounts.reserve_vault.key();
    vault.vested_reserves = 0;
    vault.pending_reserves = 0;
    vault.last_vesting_checkpoint = now;
    vault.reserves_vesting_duration = DEFAULT_RESERVES_VESTING_DURATION;
    vault.performance_fee = performance_fee.validated()?;
    vault.bump = ctx.bumps.vault;

    msg!(
        "Repricing vault initialized: {} reserve={}, shares={}",
        vault.key(),
        vault.reserve_mint,
        vault.share_mint
    );

    Ok(())
}
