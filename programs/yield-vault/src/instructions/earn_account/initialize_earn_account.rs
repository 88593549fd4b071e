use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{EARN_ACCOUNT_SEED, GOVERNANCE_SEED};
use crate::error::YieldVaultError;
use crate::state::{EarnAccount, EarnAccountKind, Governance};

// =============================================================================
// Initialize Earn Account
// =============================================================================

#[derive(Accounts)]
#[instruction(seed_key: Pubkey, kind: EarnAccountKind)]
pub struct InitializeEarnAccount<'info> {
    #[account(
        mut,
        constraint = governance.is_owner(&owner.key()) @ YieldVaultError::InvalidAccess
    )]
    pub owner: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Account<'info, Governance>,

    #[account(
        init,
        payer = owner,
        space = 8 + EarnAccount::INIT_SPACE,
        seeds = [EARN_ACCOUNT_SEED, seed_key.as_ref(), &[kind as u8]],
        bump
    )]
    pub earn_account: Account<'info, EarnAccount>,

    pub system_program: Program<'info, System>,
}

pub fn handler_initialize_earn_account(
    ctx: Context<InitializeEarnAccount>,
    seed_key: Pubkey,
    kind: EarnAccountKind,
) -> Result<()> {
    let earn_account = &mut ctx.accounts.earn_account;

    earn_account.governance = ctx.accounts.governance.key();
    earn_account.seed_key = seed_key;
    earn_account.kind = kind;
    earn_account.glp_investments_paused = false;
    earn_account.bump = ctx.bumps.earn_account;

    msg!(
        "Earn account initialized: {} kind={:?}",
        earn_account.key(),
        kind
    );

    Ok(())
}

// =============================================================================
// Earn Account Token Accounts
// =============================================================================

/// Create (if missing) the earn account's associated token account for `mint`.
/// Anyone may pay for it.
#[derive(Accounts)]
pub struct InitEarnTokenAccount<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        seeds = [EARN_ACCOUNT_SEED, earn_account.seed_key.as_ref(), &earn_account.kind_seed()],
        bump = earn_account.bump
    )]
    pub earn_account: Account<'info, EarnAccount>,

    pub mint: Account<'info, Mint>,

    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = mint,
        associated_token::authority = earn_account
    )]
    pub token_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn handler_init_earn_token_account(ctx: Context<InitEarnTokenAccount>) -> Result<()> {
    msg!(
        "Earn token account ready: owner={}, mint={}, account={}",
        ctx.accounts.earn_account.key(),
        ctx.accounts.mint.key(),
        ctx.accounts.token_account.key()
    );
    Ok(())
}
