use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{GOVERNANCE_SEED, MANAGER_SEED};
use crate::error::YieldVaultError;
use crate::events::TokenRecovered;
use crate::state::{Governance, Manager};

/// Sweep tokens sent to a manager-owned token account (owner only)
#[derive(Accounts)]
pub struct ManagerRecoverToken<'info> {
    #[account(
        constraint = governance.is_owner(&owner.key()) @ YieldVaultError::InvalidAccess
    )]
    pub owner: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Account<'info, Governance>,

    #[account(
        seeds = [MANAGER_SEED, manager.investment_mint.as_ref()],
        bump = manager.bump
    )]
    pub manager: Account<'info, Manager>,

    #[account(mut, token::authority = manager)]
    pub source: Account<'info, TokenAccount>,

    #[account(mut, token::mint = source.mint)]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_manager_recover_token(ctx: Context<ManagerRecoverToken>, amount: u64) -> Result<()> {
    require!(amount > 0, YieldVaultError::ExpectedNonZero);

    let manager = &ctx.accounts.manager;
    let investment_mint = manager.investment_mint;
    let seeds: &[&[u8]] = &[MANAGER_SEED, investment_mint.as_ref(), &[manager.bump]];

    // Insufficient funds surface as the token program's error
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.source.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: manager.to_account_info(),
            },
            &[seeds],
        ),
        amount,
    )?;

    emit!(TokenRecovered {
        from: manager.key(),
        token: ctx.accounts.source.mint,
        to: ctx.accounts.destination.key(),
        amount,
    });

    Ok(())
}
