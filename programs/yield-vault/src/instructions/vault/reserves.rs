use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{GOVERNANCE_SEED, REPRICING_VAULT_SEED};
use crate::error::YieldVaultError;
use crate::events::{PendingReservesAdded, ReservesCheckpoint};
use crate::state::{Governance, RepricingVault, Selector};

/// Checkpoint, add `amount` to pending reserves and pull it into the reserve
/// token account. Shared with the rewards aggregator.
#[allow(clippy::too_many_arguments)]
pub(crate) fn pull_pending_reserves<'info>(
    vault: &mut Account<'info, RepricingVault>,
    reserve_vault: &mut Account<'info, TokenAccount>,
    from: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    token_program: AccountInfo<'info>,
    amount: u64,
    now: i64,
) -> Result<()> {
    vault.add_pending_reserves(amount, now)?;

    emit!(ReservesCheckpoint {
        vault: vault.key(),
        vested_reserves: vault.vested_reserves,
        pending_reserves: vault.pending_reserves - amount,
    });

    token::transfer(
        CpiContext::new_with_signer(
            token_program,
            Transfer {
                from,
                to: reserve_vault.to_account_info(),
                authority,
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(PendingReservesAdded {
        vault: vault.key(),
        amount,
    });

    reserve_vault.reload()?;
    vault.require_backed(reserve_vault.amount)
}

// =============================================================================
// Add Pending Reserves
// =============================================================================

#[derive(Accounts)]
pub struct AddPendingReserves<'info> {
    #[account(
        constraint = governance.is_allowed(
            &vault.key(),
            &operator.key(),
            Selector::VaultAddPendingReserves
        ) @ YieldVaultError::InvalidAccess
    )]
    pub operator: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Box<Account<'info, Governance>>,

    #[account(
        mut,
        seeds = [REPRICING_VAULT_SEED, vault.share_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Box<Account<'info, RepricingVault>>,

    #[account(mut, address = vault.reserve_vault @ YieldVaultError::AccountMismatch)]
    pub reserve_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = vault.reserve_mint,
        token::authority = operator
    )]
    pub operator_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_add_pending_reserves(ctx: Context<AddPendingReserves>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    pull_pending_reserves(
        &mut ctx.accounts.vault,
        &mut ctx.accounts.reserve_vault,
        ctx.accounts.operator_token_account.to_account_info(),
        ctx.accounts.operator.to_account_info(),
        &[],
        ctx.accounts.token_program.to_account_info(),
        amount,
        now,
    )?;

    msg!(
        "Pending reserves added: {} (vested={}, pending={})",
        amount,
        ctx.accounts.vault.vested_reserves,
        ctx.accounts.vault.pending_reserves
    );

    Ok(())
}

// =============================================================================
// Checkpoint Reserves
// =============================================================================

/// Permissionless; only succeeds once the full vesting duration has elapsed
#[derive(Accounts)]
pub struct CheckpointReserves<'info> {
    #[account(
        mut,
        seeds = [REPRICING_VAULT_SEED, vault.share_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, RepricingVault>,
}

pub fn handler_checkpoint_reserves(ctx: Context<CheckpointReserves>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault = &mut ctx.accounts.vault;
    vault.checkpoint_reserves(now)?;

    emit!(ReservesCheckpoint {
        vault: vault.key(),
        vested_reserves: vault.vested_reserves,
        pending_reserves: vault.pending_reserves,
    });

    Ok(())
}
