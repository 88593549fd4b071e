use anchor_lang::prelude::*;

use crate::constants::GOVERNANCE_SEED;
use crate::error::YieldVaultError;
use crate::events::ExplicitAccessSet;
use crate::state::{ExplicitAccess, Governance};

/// Grant or revoke selectors for `caller` on `target` (owner only)
#[derive(Accounts)]
pub struct SetExplicitAccess<'info> {
    #[account(
        constraint = governance.is_owner(&owner.key()) @ YieldVaultError::InvalidAccess
    )]
    pub owner: Signer<'info>,

    #[account(mut, seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Account<'info, Governance>,
}

pub fn handler_set_explicit_access(
    ctx: Context<SetExplicitAccess>,
    target: Pubkey,
    caller: Pubkey,
    access: Vec<ExplicitAccess>,
) -> Result<()> {
    require!(!access.is_empty(), YieldVaultError::ExpectedNonZero);

    ctx.accounts
        .governance
        .set_explicit_access(target, caller, &access)?;

    for item in &access {
        emit!(ExplicitAccessSet {
            target,
            caller,
            selector: item.selector,
            allowed: item.allowed,
        });
    }

    msg!(
        "Explicit access set: target={}, caller={}, items={}",
        target,
        caller,
        access.len()
    );

    Ok(())
}
