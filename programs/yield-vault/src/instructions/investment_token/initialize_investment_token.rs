use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::Mint;

use crate::constants::{GOVERNANCE_SEED, INVESTMENT_TOKEN_SEED};
use crate::error::YieldVaultError;
use crate::state::{Governance, InvestmentToken};

/// Register an existing mint as an investment token. The mint authority must
/// already be the InvestmentToken PDA.
#[derive(Accounts)]
pub struct InitializeInvestmentToken<'info> {
    #[account(
        mut,
        constraint = governance.is_owner(&owner.key()) @ YieldVaultError::InvalidAccess
    )]
    pub owner: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Account<'info, Governance>,

    pub mint: Account<'info, Mint>,

    #[account(
        init,
        payer = owner,
        space = 8 + InvestmentToken::INIT_SPACE,
        seeds = [INVESTMENT_TOKEN_SEED, mint.key().as_ref()],
        bump
    )]
    pub investment_token: Account<'info, InvestmentToken>,

    pub system_program: Program<'info, System>,
}

pub fn handler_initialize_investment_token(ctx: Context<InitializeInvestmentToken>) -> Result<()> {
    require!(
        ctx.accounts.mint.mint_authority == COption::Some(ctx.accounts.investment_token.key()),
        YieldVaultError::InvalidAccess
    );

    let investment_token = &mut ctx.accounts.investment_token;
    investment_token.governance = ctx.accounts.governance.key();
    investment_token.mint = ctx.accounts.mint.key();
    investment_token.manager = Pubkey::default();
    investment_token.minters = Vec::new();
    investment_token.bump = ctx.bumps.investment_token;

    msg!(
        "Investment token initialized: {} mint={}",
        investment_token.key(),
        investment_token.mint
    );

    Ok(())
}
