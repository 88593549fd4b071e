use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::error::YieldVaultError;
use crate::events::Exited;
use crate::instructions::manager::*;
use crate::state::ExitQuote;

/// Exit investment tokens to an accepted token, paid to `exit_flow.receiver`
#[derive(Accounts)]
pub struct ExitToToken<'info> {
    pub exit_flow: ManagerExit<'info>,

    pub user: Signer<'info>,

    #[account(
        mut,
        constraint = user_investment_account.owner == user.key() @ YieldVaultError::AccountMismatch,
        constraint = user_investment_account.mint == exit_flow.investment_mint.key() @ YieldVaultError::InvalidToken
    )]
    pub user_investment_account: Box<Account<'info, TokenAccount>>,
}

pub fn handler_exit_to_token(ctx: Context<ExitToToken>, quote: ExitQuote) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let exit_flow = &mut ctx.accounts.exit_flow;

    require_keys_eq!(
        exit_flow.investment_token.manager,
        exit_flow.manager.key(),
        YieldVaultError::InvalidAccess
    );

    let live = exit_flow.validate(&quote, now)?;
    let to_amount = exit_flow.settle(
        &live,
        ctx.accounts.user_investment_account.to_account_info(),
        ctx.accounts.user.to_account_info(),
        &[],
    )?;

    emit!(Exited {
        user: ctx.accounts.user.key(),
        investment_amount: live.investment_token_amount,
        to_token: live.to_token,
        to_amount,
        receiver: exit_flow.receiver.key(),
        investment_mint: exit_flow.investment_mint.key(),
    });

    msg!(
        "Exited {} investment tokens for {} of {}",
        live.investment_token_amount,
        to_amount,
        live.to_token
    );

    Ok(())
}
