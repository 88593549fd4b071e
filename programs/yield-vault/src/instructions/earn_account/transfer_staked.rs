use anchor_lang::prelude::*;
use staking_rewards::program::StakingRewards;
use staking_rewards::state::{StakePosition, StakingPool};

use crate::constants::{EARN_ACCOUNT_SEED, GOVERNANCE_SEED};
use crate::error::YieldVaultError;
use crate::events::{SetGlpInvestmentsPaused, StakedPositionTransferred};
use crate::state::{EarnAccount, Governance, Selector, TransferOrPause};

/// Move staked units from this earn account's position to another earn
/// account's position in the same pool
#[derive(Accounts)]
pub struct TransferStakedPosition<'info> {
    pub operator: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Box<Account<'info, Governance>>,

    #[account(
        mut,
        seeds = [EARN_ACCOUNT_SEED, earn_account.seed_key.as_ref(), &earn_account.kind_seed()],
        bump = earn_account.bump
    )]
    pub earn_account: Box<Account<'info, EarnAccount>>,

    #[account(
        seeds = [
            EARN_ACCOUNT_SEED,
            destination_earn_account.seed_key.as_ref(),
            &destination_earn_account.kind_seed()
        ],
        bump = destination_earn_account.bump,
        constraint = destination_earn_account.key() != earn_account.key() @ YieldVaultError::InvalidAddress
    )]
    pub destination_earn_account: Box<Account<'info, EarnAccount>>,

    #[account(mut)]
    pub staking_pool: Box<Account<'info, StakingPool>>,

    #[account(
        mut,
        constraint = from_position.owner == earn_account.key() @ YieldVaultError::AccountMismatch,
        constraint = from_position.pool == staking_pool.key() @ YieldVaultError::AccountMismatch
    )]
    pub from_position: Box<Account<'info, StakePosition>>,

    #[account(
        mut,
        constraint = to_position.owner == destination_earn_account.key() @ YieldVaultError::AccountMismatch,
        constraint = to_position.pool == staking_pool.key() @ YieldVaultError::AccountMismatch
    )]
    pub to_position: Box<Account<'info, StakePosition>>,

    pub staking_program: Program<'info, StakingRewards>,
}

impl<'info> TransferStakedPosition<'info> {
    fn transfer(&self, amount: u64) -> Result<()> {
        let earn_account = &self.earn_account;
        let seed_key = earn_account.seed_key;
        let kind_seed = earn_account.kind_seed();
        let bump = [earn_account.bump];
        let seeds: &[&[u8]] = &[EARN_ACCOUNT_SEED, seed_key.as_ref(), &kind_seed, &bump];
        let signer_seeds = &[seeds];

        staking_rewards::cpi::transfer_staked(
            CpiContext::new_with_signer(
                self.staking_program.to_account_info(),
                staking_rewards::cpi::accounts::TransferStaked {
                    owner: earn_account.to_account_info(),
                    staking_pool: self.staking_pool.to_account_info(),
                    from_position: self.from_position.to_account_info(),
                    to_position: self.to_position.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )?;

        emit!(StakedPositionTransferred {
            earn_account: earn_account.key(),
            receiver: self.destination_earn_account.key(),
            amount,
        });

        Ok(())
    }
}

/// Cooldown failures surface as the staking program's own error
pub fn handler_transfer_staked_position(
    ctx: Context<TransferStakedPosition>,
    amount: u64,
) -> Result<()> {
    require!(amount > 0, YieldVaultError::ExpectedNonZero);
    ctx.accounts.governance.require_allowed(
        &ctx.accounts.earn_account.key(),
        &ctx.accounts.operator.key(),
        Selector::EarnTransferStaked,
    )?;

    ctx.accounts.transfer(amount)?;

    msg!(
        "Staked position transferred: from={}, to={}, amount={}",
        ctx.accounts.earn_account.key(),
        ctx.accounts.destination_earn_account.key(),
        amount
    );

    Ok(())
}

/// Transfer the stake if the upstream cooldown has passed, otherwise pause
/// GLP investments on this earn account and succeed without transferring.
///
/// The pause flag only emits on its edges, so a keeper can retry every block.
pub fn handler_transfer_staked_position_or_pause(
    ctx: Context<TransferStakedPosition>,
    amount: u64,
) -> Result<()> {
    require!(amount > 0, YieldVaultError::ExpectedNonZero);
    ctx.accounts.governance.require_allowed(
        &ctx.accounts.earn_account.key(),
        &ctx.accounts.operator.key(),
        Selector::EarnTransferStakedOrPause,
    )?;

    let now = Clock::get()?.unix_timestamp;
    let expiry = EarnAccount::cooldown_expiry(
        &ctx.accounts.staking_pool,
        &ctx.accounts.from_position,
    );
    let earn_account_key = ctx.accounts.earn_account.key();

    match ctx.accounts.earn_account.transfer_or_pause(expiry, now) {
        TransferOrPause::Paused { newly_paused } => {
            if newly_paused {
                emit!(SetGlpInvestmentsPaused {
                    earn_account: earn_account_key,
                    paused: true,
                });
            }
            msg!(
                "GLP investments paused on {} until {}",
                earn_account_key,
                expiry
            );
        }
        TransferOrPause::Transfer { newly_unpaused } => {
            if newly_unpaused {
                emit!(SetGlpInvestmentsPaused {
                    earn_account: earn_account_key,
                    paused: false,
                });
            }
            ctx.accounts.transfer(amount)?;
            msg!(
                "Staked position transferred: from={}, amount={}",
                earn_account_key,
                amount
            );
        }
    }

    Ok(())
}
