// =============================================================================
// Aggregator Harvest
// =============================================================================
// One compounding cycle into the repricing vault:
//
// 1. Optional DEX swap of harvested rewards, signed by the aggregator PDA
//    (native -> GMX for the GMX vault, GMX -> native for the GLP vault)
// 2. Invest the bought token through the reserve manager
// 3. Release add_to_reserve_amount_pct of the reserve token balance:
//    performance fee to the collector, the rest as pending reserves
// 4. Whatever is not released carries over to the next cycle
//
// Manager harvests for each earn account run earlier in the same
// transaction so the rewards they forward are included here.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    instruction::{AccountMeta, Instruction},
    program::invoke_signed,
};
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::constants::{GOVERNANCE_SEED, REWARDS_AGGREGATOR_SEED};
use crate::error::YieldVaultError;
use crate::events::{PerformanceFeesCollected, ReservesCompounded};
use crate::instructions::manager::*;
use crate::instructions::vault::pull_pending_reserves;
use crate::state::{Governance, InvestQuote, RepricingVault, RewardsAggregator, Selector};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct HarvestParams {
    /// Opaque DEX instruction data; empty skips the swap
    pub swap_data: Vec<u8>,
    pub min_swap_out: u64,
    /// None skips the investment leg
    pub invest_quote: Option<InvestQuote>,
    /// Share of the available reserve tokens released this cycle, in bps
    pub add_to_reserve_amount_pct: u16,
}

#[derive(Accounts)]
pub struct AggregatorHarvestRewards<'info> {
    pub invest_flow: ManagerInvest<'info>,

    #[account(
        constraint = governance.is_allowed(
            &aggregator.key(),
            &operator.key(),
            Selector::AggregatorHarvest
        ) @ YieldVaultError::InvalidAccess
    )]
    pub operator: Signer<'info>,

    #[account(seeds = [GOVERNANCE_SEED], bump = governance.bump)]
    pub governance: Box<Account<'info, Governance>>,

    #[account(
        seeds = [REWARDS_AGGREGATOR_SEED, aggregator.vault.as_ref()],
        bump = aggregator.bump,
        constraint = invest_flow.manager.key() == aggregator.reserve_manager() @ YieldVaultError::AccountMismatch
    )]
    pub aggregator: Box<Account<'info, RewardsAggregator>>,

    #[account(mut, address = aggregator.vault @ YieldVaultError::AccountMismatch)]
    pub vault: Box<Account<'info, RepricingVault>>,

    #[account(mut, address = vault.reserve_vault @ YieldVaultError::AccountMismatch)]
    pub reserve_vault: Box<Account<'info, TokenAccount>>,

    /// Aggregator's account of the token bought by the swap and invested
    #[account(
        mut,
        token::mint = invest_flow.from_mint,
        token::authority = aggregator
    )]
    pub buy_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = vault.reserve_mint,
        token::authority = aggregator
    )]
    pub aggregator_reserve_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = vault.reserve_mint,
        constraint = performance_fee_account.owner == aggregator.performance_fee_collector
            @ YieldVaultError::AccountMismatch
    )]
    pub performance_fee_account: Box<Account<'info, TokenAccount>>,
}

pub fn handler_aggregator_harvest_rewards(
    ctx: Context<AggregatorHarvestRewards>,
    params: HarvestParams,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let vault_key = ctx.accounts.aggregator.vault;
    let aggregator_bump = [ctx.accounts.aggregator.bump];
    let aggregator_seeds: &[&[u8]] = &[REWARDS_AGGREGATOR_SEED, vault_key.as_ref(), &aggregator_bump];
    let aggregator_signer = &[aggregator_seeds];

    // =========================================================================
    // Swap
    // =========================================================================

    let mut swap_bought = 0u64;
    if !params.swap_data.is_empty() {
        require!(!ctx.remaining_accounts.is_empty(), YieldVaultError::InvalidParam);

        let balance_before = ctx.accounts.buy_account.amount;

        // The caller passes the accounts in the exact order the DEX expects
        let account_metas: Vec<AccountMeta> = ctx
            .remaining_accounts
            .iter()
            .map(|acc| {
                if acc.is_writable {
                    AccountMeta::new(*acc.key, acc.is_signer)
                } else {
                    AccountMeta::new_readonly(*acc.key, acc.is_signer)
                }
            })
            .collect();

        let swap_instruction = Instruction {
            program_id: ctx.accounts.aggregator.dex_program,
            accounts: account_metas,
            data: params.swap_data,
        };

        invoke_signed(&swap_instruction, ctx.remaining_accounts, aggregator_signer)?;

        ctx.accounts.buy_account.reload()?;
        swap_bought = ctx
            .accounts
            .buy_account
            .amount
            .checked_sub(balance_before)
            .ok_or(YieldVaultError::MathUnderflow)?;

        require!(swap_bought >= params.min_swap_out, YieldVaultError::Slippage);
        msg!("Swap bought {} (min {})", swap_bought, params.min_swap_out);
    }

    // =========================================================================
    // Invest into the reserve token
    // =========================================================================

    let mut invested = 0u64;
    if let Some(quote) = params.invest_quote {
        let live = ctx.accounts.invest_flow.validate(&quote, now)?;

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.invest_flow.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.buy_account.to_account_info(),
                    to: ctx.accounts.invest_flow.earn_token_account.to_account_info(),
                    authority: ctx.accounts.aggregator.to_account_info(),
                },
                aggregator_signer,
            ),
            live.from_amount,
        )?;

        invested = ctx
            .accounts
            .invest_flow
            .stake_and_mint(&live, ctx.accounts.aggregator_reserve_account.to_account_info())?;
    }

    // =========================================================================
    // Compound
    // =========================================================================

    ctx.accounts.aggregator_reserve_account.reload()?;
    let total_available = ctx.accounts.aggregator_reserve_account.amount;

    let split = RewardsAggregator::compound_split(
        total_available,
        params.add_to_reserve_amount_pct,
        &ctx.accounts.vault.performance_fee,
    )?;

    let token_program = ctx.accounts.invest_flow.token_program.to_account_info();

    if split.performance_fee > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                token_program.clone(),
                Transfer {
                    from: ctx.accounts.aggregator_reserve_account.to_account_info(),
                    to: ctx.accounts.performance_fee_account.to_account_info(),
                    authority: ctx.accounts.aggregator.to_account_info(),
                },
                aggregator_signer,
            ),
            split.performance_fee,
        )?;

        emit!(PerformanceFeesCollected {
            aggregator: ctx.accounts.aggregator.key(),
            token: ctx.accounts.vault.reserve_mint,
            amount: split.performance_fee,
        });
    }

    if split.reserves_added > 0 {
        pull_pending_reserves(
            &mut ctx.accounts.vault,
            &mut ctx.accounts.reserve_vault,
            ctx.accounts.aggregator_reserve_account.to_account_info(),
            ctx.accounts.aggregator.to_account_info(),
            aggregator_signer,
            token_program,
            split.reserves_added,
            now,
        )?;
    }

    emit!(ReservesCompounded {
        aggregator: ctx.accounts.aggregator.key(),
        vault_type: ctx.accounts.aggregator.vault_type,
        swap_bought,
        invested,
        total_available,
        performance_fee: split.performance_fee,
        reserves_added: split.reserves_added,
    });

    msg!(
        "Compounded: available={}, fee={}, added={}, carried={}",
        total_available,
        split.performance_fee,
        split.reserves_added,
        split.carried_over
    );

    Ok(())
}
