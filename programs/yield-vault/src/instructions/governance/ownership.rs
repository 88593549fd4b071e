use anchor_lang::prelude::*;

use crate::constants::GOVERNANCE_SEED;
use crate::error::YieldVaultError;
use crate::events::{NewOwnerAccepted, NewOwnerProposed};
use crate::state::Governance;

// =============================================================================
// Propose New Owner
// =============================================================================

#[derive(Accounts)]
pub struct ProposeNewOwner<'info> {
    #[account(
        constraint = governance.is_owner(&owner.key()) @ YieldVaultError::InvalidAccess
    )]
    pub owner: Signer<'info>,

    #[account(mut, seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Account<'info, Governance>,
}

pub fn handler_propose_new_owner(ctx: Context<ProposeNewOwner>, new_owner: Pubkey) -> Result<()> {
    let governance = &mut ctx.accounts.governance;
    let old_proposed_owner = governance.propose_new_owner(new_owner)?;

    emit!(NewOwnerProposed {
        owner: governance.owner,
        old_proposed_owner,
        new_proposed_owner: new_owner,
    });

    msg!("New owner proposed: {}", new_owner);

    Ok(())
}

// =============================================================================
// Accept Owner
// =============================================================================

#[derive(Accounts)]
pub struct AcceptOwner<'info> {
    pub proposed_owner: Signer<'info>,

    #[account(mut, seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Account<'info, Governance>,
}

pub fn handler_accept_owner(ctx: Context<AcceptOwner>) -> Result<()> {
    let new_owner = ctx.accounts.proposed_owner.key();
    let old_owner = ctx.accounts.governance.accept_owner(&new_owner)?;

    emit!(NewOwnerAccepted {
        old_owner,
        new_owner,
    });

    msg!("Ownership transferred from {} to {}", old_owner, new_owner);

    Ok(())
}
