use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, MintTo, Token, TokenAccount, Transfer};

use crate::constants::REPRICING_VAULT_SEED;
use crate::error::YieldVaultError;
use crate::events::{VestedReservesAdded, VestedReservesRemoved};
use crate::state::RepricingVault;

// =============================================================================
// Issue
// =============================================================================

#[derive(Accounts)]
pub struct IssueShares<'info> {
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [REPRICING_VAULT_SEED, vault.share_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Box<Account<'info, RepricingVault>>,

    #[account(mut, address = vault.share_mint @ YieldVaultError::AccountMismatch)]
    pub share_mint: Box<Account<'info, Mint>>,

    #[account(mut, address = vault.reserve_vault @ YieldVaultError::AccountMismatch)]
    pub reserve_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = vault.reserve_mint,
        token::authority = user
    )]
    pub user_reserve_account: Box<Account<'info, TokenAccount>>,

    /// Receives the minted shares
    #[account(mut)]
    pub receiver: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

/// Deposit reserve tokens for shares at the current reserves-per-share
pub fn handler_issue_shares_from_reserves(
    ctx: Context<IssueShares>,
    reserves: u64,
    min_shares: u64,
) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.receiver.mint,
        ctx.accounts.share_mint.key(),
        YieldVaultError::InvalidToken
    );

    let now = Clock::get()?.unix_timestamp;
    let supply = ctx.accounts.share_mint.supply;
    let shares = ctx.accounts.vault.issue_shares(reserves, min_shares, now, supply)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_reserve_account.to_account_info(),
                to: ctx.accounts.reserve_vault.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        reserves,
    )?;

    let vault = &ctx.accounts.vault;
    let share_mint_key = vault.share_mint;
    let seeds: &[&[u8]] = &[REPRICING_VAULT_SEED, share_mint_key.as_ref(), &[vault.bump]];

    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.share_mint.to_account_info(),
                to: ctx.accounts.receiver.to_account_info(),
                authority: vault.to_account_info(),
            },
            &[seeds],
        ),
        shares,
    )?;

    emit!(VestedReservesAdded {
        vault: vault.key(),
        amount: reserves,
    });

    ctx.accounts.reserve_vault.reload()?;
    ctx.accounts.vault.require_backed(ctx.accounts.reserve_vault.amount)?;

    msg!("Issued {} shares for {} reserves", shares, reserves);

    Ok(())
}

// =============================================================================
// Redeem
// =============================================================================

#[derive(Accounts)]
pub struct RedeemShares<'info> {
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [REPRICING_VAULT_SEED, vault.share_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Box<Account<'info, RepricingVault>>,

    #[account(mut, address = vault.share_mint @ YieldVaultError::AccountMismatch)]
    pub share_mint: Box<Account<'info, Mint>>,

    #[account(mut, address = vault.reserve_vault @ YieldVaultError::AccountMismatch)]
    pub reserve_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = share_mint,
        token::authority = user
    )]
    pub user_share_account: Box<Account<'info, TokenAccount>>,

    /// Receives the redeemed reserves
    #[account(mut)]
    pub receiver: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

/// Burn shares for reserve tokens at the current reserves-per-share
pub fn handler_redeem_reserves_from_shares(
    ctx: Context<RedeemShares>,
    shares: u64,
    min_reserves: u64,
) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.receiver.mint,
        ctx.accounts.vault.reserve_mint,
        YieldVaultError::InvalidToken
    );

    let now = Clock::get()?.unix_timestamp;
    let supply = ctx.accounts.share_mint.supply;
    let balance = ctx.accounts.user_share_account.amount;
    let reserves = ctx
        .accounts
        .vault
        .redeem_shares(shares, min_reserves, balance, now, supply)?;

    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Burn {
                mint: ctx.accounts.share_mint.to_account_info(),
                from: ctx.accounts.user_share_account.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        shares,
    )?;

    let vault = &ctx.accounts.vault;
    let share_mint_key = vault.share_mint;
    let seeds: &[&[u8]] = &[REPRICING_VAULT_SEED, share_mint_key.as_ref(), &[vault.bump]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.reserve_vault.to_account_info(),
                to: ctx.accounts.receiver.to_account_info(),
                authority: vault.to_account_info(),
            },
            &[seeds],
        ),
        reserves,
    )?;

    emit!(VestedReservesRemoved {
        vault: vault.key(),
        amount: reserves,
    });

    ctx.accounts.reserve_vault.reload()?;
    ctx.accounts.vault.require_backed(ctx.accounts.reserve_vault.amount)?;

    msg!("Redeemed {} shares for {} reserves", shares, reserves);

    Ok(())
}
