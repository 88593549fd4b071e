use anchor_lang::prelude::*;

use crate::constants::{GOVERNANCE_SEED, INVESTMENT_TOKEN_SEED};
use crate::error::YieldVaultError;
use crate::events::{InvestmentManagerSet, MinterSet};
use crate::state::{Governance, InvestmentToken};

#[derive(Accounts)]
pub struct InvestmentTokenAdmin<'info> {
    #[account(
        constraint = governance.is_owner(&owner.key()) @ YieldVaultError::InvalidAccess
    )]
    pub owner: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Account<'info, Governance>,

    #[account(
        mut,
        seeds = [INVESTMENT_TOKEN_SEED, investment_token.mint.as_ref()],
        bump = investment_token.bump
    )]
    pub investment_token: Account<'info, InvestmentToken>,
}

pub fn handler_set_minter(
    ctx: Context<InvestmentTokenAdmin>,
    minter: Pubkey,
    can_mint: bool,
) -> Result<()> {
    let investment_token = &mut ctx.accounts.investment_token;
    investment_token.set_minter(minter, can_mint)?;

    emit!(MinterSet {
        investment_token: investment_token.key(),
        minter,
        can_mint,
    });

    msg!("Minter {} can_mint={}", minter, can_mint);

    Ok(())
}

pub fn handler_set_manager(ctx: Context<InvestmentTokenAdmin>, manager: Pubkey) -> Result<()> {
    let investment_token = &mut ctx.accounts.investment_token;
    let old_manager = investment_token.set_manager(manager)?;

    emit!(InvestmentManagerSet {
        investment_token: investment_token.key(),
        old_manager,
        new_manager: manager,
    });

    Ok(())
}

// =============================================================================
// Views & unsupported entry points
// =============================================================================

#[derive(Accounts)]
pub struct InvestmentTokenView<'info> {
    #[account(
        seeds = [INVESTMENT_TOKEN_SEED, investment_token.mint.as_ref()],
        bump = investment_token.bump
    )]
    pub investment_token: Account<'info, InvestmentToken>,
}

/// No protocol-level cap on investments
pub fn handler_max_invest(_ctx: Context<InvestmentTokenView>, _from_token: Pubkey) -> Result<u64> {
    Ok(u64::MAX)
}

pub fn handler_max_exit(_ctx: Context<InvestmentTokenView>, _to_token: Pubkey) -> Result<u64> {
    Ok(u64::MAX)
}

pub fn handler_invest_with_native(_ctx: Context<InvestmentTokenView>) -> Result<()> {
    err!(YieldVaultError::Unsupported)
}

pub fn handler_exit_to_native(_ctx: Context<InvestmentTokenView>) -> Result<()> {
    err!(YieldVaultError::Unsupported)
}
