use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::constants::REPRICING_VAULT_SEED;
use crate::error::YieldVaultError;
use crate::state::{ExitQuote, InvestQuote, RepricingVault, ReservesView};

#[derive(Accounts)]
pub struct VaultView<'info> {
    #[account(
        seeds = [REPRICING_VAULT_SEED, vault.share_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, RepricingVault>,

    #[account(address = vault.share_mint @ YieldVaultError::AccountMismatch)]
    pub share_mint: Account<'info, Mint>,
}

pub fn handler_vault_reserves(ctx: Context<VaultView>) -> Result<ReservesView> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts
        .vault
        .reserves_view(now, ctx.accounts.share_mint.supply)
}

pub fn handler_vault_invest_quote(
    ctx: Context<VaultView>,
    from_token: Pubkey,
    from_amount: u64,
    max_slippage_bps: u16,
    deadline: i64,
) -> Result<InvestQuote> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.vault.invest_quote(
        now,
        ctx.accounts.share_mint.supply,
        from_token,
        from_amount,
        max_slippage_bps,
        deadline,
    )
}

pub fn handler_vault_exit_quote(
    ctx: Context<VaultView>,
    shares: u64,
    to_token: Pubkey,
    max_slippage_bps: u16,
    deadline: i64,
) -> Result<ExitQuote> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.vault.exit_quote(
        now,
        ctx.accounts.share_mint.supply,
        shares,
        to_token,
        max_slippage_bps,
        deadline,
    )
}
