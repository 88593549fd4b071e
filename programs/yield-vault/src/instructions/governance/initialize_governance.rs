use anchor_lang::prelude::*;

use crate::constants::GOVERNANCE_SEED;
use crate::state::Governance;

/// Create the Governance account. The payer becomes the first owner.
#[derive(Accounts)]
pub struct InitializeGovernance<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = 8 + Governance::INIT_SPACE,
        seeds = [GOVERNANCE_SEED],
        bump
    )]
    pub governance: Account<'info, Governance>,

    pub system_program: Program<'info, System>,
}

pub fn handler_initialize_governance(ctx: Context<InitializeGovernance>) -> Result<()> {
    let governance = &mut ctx.accounts.governance;

    governance.owner = ctx.accounts.owner.key();
    governance.proposed_owner = Pubkey::default();
    governance.entries = Vec::new();
    governance.bump = ctx.bumps.governance;

    msg!("Governance initialized: owner={}", governance.owner);

    Ok(())
}
