// =============================================================================
// Manager Invest / Exit Flows
// =============================================================================
// Shared by user entry points (investment token) and the rewards aggregator.
// Every flow re-derives its quote from live upstream state, then:
//
// Invest: tokens are already on the target earn account -> stake upstream
//         with the quoted minimum -> mint exactly the staked delta
// Exit:   sell fee to the fee collector -> burn the rest -> unstake from the
//         primary earn account with the quoted minimum -> measure receipt
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, MintTo, Token, TokenAccount, Transfer};
use staking_rewards::program::StakingRewards;
use staking_rewards::state::{StakePosition, StakingPool};

use crate::constants::{EARN_ACCOUNT_SEED, INVESTMENT_TOKEN_SEED, MANAGER_SEED};
use crate::error::YieldVaultError;
use crate::state::{EarnAccount, EarnAccountKind, ExitQuote, InvestQuote, InvestmentToken, Manager};

// =============================================================================
// Invest
// =============================================================================

#[derive(Accounts)]
pub struct ManagerInvest<'info> {
    #[account(
        seeds = [MANAGER_SEED, manager.investment_mint.as_ref()],
        bump = manager.bump
    )]
    pub manager: Box<Account<'info, Manager>>,

    #[account(
        seeds = [INVESTMENT_TOKEN_SEED, investment_mint.key().as_ref()],
        bump = investment_token.bump,
        address = manager.investment_token @ YieldVaultError::AccountMismatch
    )]
    pub investment_token: Box<Account<'info, InvestmentToken>>,

    #[account(mut, address = manager.investment_mint @ YieldVaultError::AccountMismatch)]
    pub investment_mint: Box<Account<'info, Mint>>,

    #[account(address = manager.invest_target() @ YieldVaultError::AccountMismatch)]
    pub earn_account: Box<Account<'info, EarnAccount>>,

    #[account(mut, address = manager.policy.upstream_pool @ YieldVaultError::AccountMismatch)]
    pub staking_pool: Box<Account<'info, StakingPool>>,

    #[account(
        mut,
        constraint = earn_position.owner == earn_account.key() @ YieldVaultError::AccountMismatch,
        constraint = earn_position.pool == staking_pool.key() @ YieldVaultError::AccountMismatch
    )]
    pub earn_position: Box<Account<'info, StakePosition>>,

    pub from_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        token::mint = from_mint,
        token::authority = earn_account
    )]
    pub earn_token_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: Validated by the staking program
    #[account(mut)]
    pub pool_vault: UncheckedAccount<'info>,

    pub staking_program: Program<'info, StakingRewards>,
    pub token_program: Program<'info, Token>,
}

impl<'info> ManagerInvest<'info> {
    /// Re-derive the quote against live pool state. The returned minimum is
    /// never below the one the caller signed.
    pub fn validate(&self, quote: &InvestQuote, now: i64) -> Result<InvestQuote> {
        let secondary_glp_paused = self.earn_account.kind == EarnAccountKind::Secondary
            && self.earn_account.glp_investments_paused;

        self.manager.revalidate_invest_quote(
            &self.staking_pool,
            quote,
            &self.from_mint.key(),
            secondary_glp_paused,
            now,
        )
    }

    /// Stake `live.from_amount` held by the earn account and mint the staked
    /// delta to `receiver`. Returns the amount minted.
    pub fn stake_and_mint(&mut self, live: &InvestQuote, receiver: AccountInfo<'info>) -> Result<u64> {
        let staked_before = self.earn_position.staked_amount;

        {
            let earn_account = &self.earn_account;
            let seed_key = earn_account.seed_key;
            let kind_seed = earn_account.kind_seed();
            let bump = [earn_account.bump];
            let seeds: &[&[u8]] = &[EARN_ACCOUNT_SEED, seed_key.as_ref(), &kind_seed, &bump];

            staking_rewards::cpi::stake(
                CpiContext::new_with_signer(
                    self.staking_program.to_account_info(),
                    staking_rewards::cpi::accounts::Stake {
                        owner: earn_account.to_account_info(),
                        staking_pool: self.staking_pool.to_account_info(),
                        position: self.earn_position.to_account_info(),
                        deposit_mint: self.from_mint.to_account_info(),
                        owner_token_account: self.earn_token_account.to_account_info(),
                        pool_vault: self.pool_vault.to_account_info(),
                        token_program: self.token_program.to_account_info(),
                    },
                    &[seeds],
                ),
                live.from_amount,
                live.min_investment_amount,
            )?;
        }

        self.earn_position.reload()?;
        let minted = self
            .earn_position
            .staked_amount
            .checked_sub(staked_before)
            .ok_or(YieldVaultError::MathUnderflow)?;
        require!(minted >= live.min_investment_amount, YieldVaultError::Slippage);

        self.investment_token.require_minter(&self.manager.key())?;

        let mint_key = self.investment_mint.key();
        let token_seeds: &[&[u8]] = &[
            INVESTMENT_TOKEN_SEED,
            mint_key.as_ref(),
            &[self.investment_token.bump],
        ];

        token::mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.investment_mint.to_account_info(),
                    to: receiver,
                    authority: self.investment_token.to_account_info(),
                },
                &[token_seeds],
            ),
            minted,
        )?;

        Ok(minted)
    }
}

// =============================================================================
// Exit
// =============================================================================

#[derive(Accounts)]
pub struct ManagerExit<'info> {
    #[account(
        seeds = [MANAGER_SEED, manager.investment_mint.as_ref()],
        bump = manager.bump
    )]
    pub manager: Box<Account<'info, Manager>>,

    #[account(
        seeds = [INVESTMENT_TOKEN_SEED, investment_mint.key().as_ref()],
        bump = investment_token.bump,
        address = manager.investment_token @ YieldVaultError::AccountMismatch
    )]
    pub investment_token: Box<Account<'info, InvestmentToken>>,

    #[account(mut, address = manager.investment_mint @ YieldVaultError::AccountMismatch)]
    pub investment_mint: Box<Account<'info, Mint>>,

    /// Exits always come out of the primary earn account
    #[account(address = manager.primary_earn_account @ YieldVaultError::AccountMismatch)]
    pub earn_account: Box<Account<'info, EarnAccount>>,

    #[account(mut, address = manager.policy.upstream_pool @ YieldVaultError::AccountMismatch)]
    pub staking_pool: Box<Account<'info, StakingPool>>,

    #[account(
        mut,
        constraint = earn_position.owner == earn_account.key() @ YieldVaultError::AccountMismatch,
        constraint = earn_position.pool == staking_pool.key() @ YieldVaultError::AccountMismatch
    )]
    pub earn_position: Box<Account<'info, StakePosition>>,

    pub to_mint: Box<Account<'info, Mint>>,

    /// CHECK: Validated by the staking program
    #[account(mut)]
    pub pool_vault: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = investment_mint,
        constraint = fee_collector_account.owner == manager.fee_collector @ YieldVaultError::AccountMismatch
    )]
    pub fee_collector_account: Box<Account<'info, TokenAccount>>,

    #[account(mut, token::mint = to_mint)]
    pub receiver: Box<Account<'info, TokenAccount>>,

    pub staking_program: Program<'info, StakingRewards>,
    pub token_program: Program<'info, Token>,
}

impl<'info> ManagerExit<'info> {
    pub fn validate(&self, quote: &ExitQuote, now: i64) -> Result<ExitQuote> {
        require!(
            self.receiver.owner != Pubkey::default(),
            YieldVaultError::InvalidAddress
        );

        self.manager
            .revalidate_exit_quote(&self.staking_pool, quote, &self.to_mint.key(), now)
    }

    /// Take the sell fee from `holder`, burn the remainder and unstake it to
    /// the receiver. `holder_seeds` is empty when the holder signs directly.
    /// Returns the amount the receiver got.
    pub fn settle(
        &mut self,
        live: &ExitQuote,
        holder: AccountInfo<'info>,
        holder_authority: AccountInfo<'info>,
        holder_seeds: &[&[&[u8]]],
    ) -> Result<u64> {
        let (fee, rest) = self.manager.sell_fee_rate.split(live.investment_token_amount)?;

        if fee > 0 {
            token::transfer(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    Transfer {
                        from: holder.clone(),
                        to: self.fee_collector_account.to_account_info(),
                        authority: holder_authority.clone(),
                    },
                    holder_seeds,
                ),
                fee,
            )?;
        }

        if rest == 0 {
            return Ok(0);
        }

        self.investment_token.require_minter(&self.manager.key())?;

        token::burn(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                Burn {
                    mint: self.investment_mint.to_account_info(),
                    from: holder,
                    authority: holder_authority,
                },
                holder_seeds,
            ),
            rest,
        )?;

        let received_before = self.receiver.amount;

        {
            let earn_account = &self.earn_account;
            let seed_key = earn_account.seed_key;
            let kind_seed = earn_account.kind_seed();
            let bump = [earn_account.bump];
            let seeds: &[&[u8]] = &[EARN_ACCOUNT_SEED, seed_key.as_ref(), &kind_seed, &bump];

            staking_rewards::cpi::unstake(
                CpiContext::new_with_signer(
                    self.staking_program.to_account_info(),
                    staking_rewards::cpi::accounts::Unstake {
                        owner: earn_account.to_account_info(),
                        staking_pool: self.staking_pool.to_account_info(),
                        position: self.earn_position.to_account_info(),
                        receive_mint: self.to_mint.to_account_info(),
                        pool_vault: self.pool_vault.to_account_info(),
                        receiver: self.receiver.to_account_info(),
                        token_program: self.token_program.to_account_info(),
                    },
                    &[seeds],
                ),
                rest,
                live.min_to_token_amount,
            )?;
        }

        self.receiver.reload()?;
        let received = self
            .receiver
            .amount
            .checked_sub(received_before)
            .ok_or(YieldVaultError::MathUnderflow)?;
        require!(received >= live.min_to_token_amount, YieldVaultError::Slippage);

        Ok(received)
    }
}
