use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::error::YieldVaultError;
use crate::events::Invested;
use crate::instructions::manager::*;
use crate::state::InvestQuote;

/// Invest a user's tokens and receive investment tokens
///
/// # Flow
/// 1. Check the quote against live state (deadline, pause, slippage)
/// 2. Move the user's tokens onto the target earn account
/// 3. Stake upstream with the quoted minimum and mint the staked delta
#[derive(Accounts)]
pub struct InvestWithToken<'info> {
    pub invest_flow: ManagerInvest<'info>,

    pub user: Signer<'info>,

    #[account(
        mut,
        constraint = user_token_account.owner == user.key() @ YieldVaultError::AccountMismatch,
        constraint = user_token_account.mint == invest_flow.from_mint.key() @ YieldVaultError::InvalidToken
    )]
    pub user_token_account: Box<Account<'info, TokenAccount>>,

    /// Receives the investment tokens
    #[account(
        mut,
        constraint = receiver.mint == invest_flow.investment_mint.key() @ YieldVaultError::InvalidToken
    )]
    pub receiver: Box<Account<'info, TokenAccount>>,
}

pub fn handler_invest_with_token(ctx: Context<InvestWithToken>, quote: InvestQuote) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let invest_flow = &mut ctx.accounts.invest_flow;

    require_keys_eq!(
        invest_flow.investment_token.manager,
        invest_flow.manager.key(),
        YieldVaultError::InvalidAccess
    );

    let live = invest_flow.validate(&quote, now)?;

    token::transfer(
        CpiContext::new(
            invest_flow.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_token_account.to_account_info(),
                to: invest_flow.earn_token_account.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        live.from_amount,
    )?;

    let investment_amount = invest_flow.stake_and_mint(&live, ctx.accounts.receiver.to_account_info())?;

    emit!(Invested {
        user: ctx.accounts.user.key(),
        from_amount: live.from_amount,
        from_token: live.from_token,
        investment_amount,
        investment_mint: invest_flow.investment_mint.key(),
    });

    msg!(
        "Invested {} of {} for {} investment tokens",
        live.from_amount,
        live.from_token,
        investment_amount
    );

    Ok(())
}
