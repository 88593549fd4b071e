use anchor_lang::prelude::*;

use crate::constants::{GOVERNANCE_SEED, REPRICING_VAULT_SEED};
use crate::error::YieldVaultError;
use crate::events::{PerformanceFeeSet, ReservesVestingDurationSet};
use crate::state::{FeeRate, Governance, RepricingVault};

#[derive(Accounts)]
pub struct VaultAdmin<'info> {
    #[account(
        constraint = governance.is_owner(&owner.key()) @ YieldVaultError::InvalidAccess
    )]
    pub owner: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Account<'info, Governance>,

    #[account(
        mut,
        seeds = [REPRICING_VAULT_SEED, vault.share_mint.as_ref()],
        bump = vault.bump
    )]
    pub vault: Account<'info, RepricingVault>,
}

/// Checkpoints under the old duration before switching
pub fn handler_set_reserves_vesting_duration(ctx: Context<VaultAdmin>, duration: i64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault = &mut ctx.accounts.vault;
    let old_duration = vault.set_reserves_vesting_duration(duration, now)?;

    emit!(ReservesVestingDurationSet {
        vault: vault.key(),
        old_duration,
        new_duration: duration,
    });

    msg!("Reserves vesting duration: {} -> {}", old_duration, duration);

    Ok(())
}

pub fn handler_set_performance_fee(ctx: Context<VaultAdmin>, rate: FeeRate) -> Result<()> {
    let new_rate = rate.validated()?;
    let vault = &mut ctx.accounts.vault;
    let old_rate = std::mem::replace(&mut vault.performance_fee, new_rate);

    emit!(PerformanceFeeSet {
        vault: vault.key(),
        old_rate,
        new_rate,
    });

    Ok(())
}
