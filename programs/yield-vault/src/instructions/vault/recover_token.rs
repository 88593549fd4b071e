use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{GOVERNANCE_SEED, REPRICING_VAULT_SEED};
use crate::error::YieldVaultError;
use crate::events::TokenRecovered;
use crate::state::{Governance, RepricingVault};

/// Sweep a vault-owned token account (owner only). For the reserve token only
/// the surplus above vested plus pending reserves may leave.
#[derive(Accounts)]
pub struct VaultRecoverToken<'info> {
    #[account(
        constraint = governance.is_owner(&owner.key()) @ YieldVaultError::InvalidAccess
    )]
    pub owner: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Account<'info, Governance>,

    #[account(
        seeds = [REPRICING_VAULT_SEED, vault.share_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, RepricingVault>,

    #[account(mut, token::authority = vault)]
    pub source: Account<'info, TokenAccount>,

    #[account(mut, token::mint = source.mint)]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_vault_recover_token(ctx: Context<VaultRecoverToken>, amount: u64) -> Result<()> {
    require!(amount > 0, YieldVaultError::ExpectedNonZero);

    let vault = &ctx.accounts.vault;
    if ctx.accounts.source.mint == vault.reserve_mint {
        let surplus = vault.recoverable_surplus(ctx.accounts.source.amount)?;
        require!(amount <= surplus, YieldVaultError::InvalidAmount);
    }

    let share_mint_key = vault.share_mint;
    let seeds: &[&[u8]] = &[REPRICING_VAULT_SEED, share_mint_key.as_ref(), &[vault.bump]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.source.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: vault.to_account_info(),
            },
            &[seeds],
        ),
        amount,
    )?;

    emit!(TokenRecovered {
        from: vault.key(),
        token: ctx.accounts.source.mint,
        to: ctx.accounts.destination.key(),
        amount,
    });

    msg!("Recovered {} of {}", amount, ctx.accounts.source.mint);

    Ok(())
}
