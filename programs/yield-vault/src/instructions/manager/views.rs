use anchor_lang::prelude::*;
use staking_rewards::state::{StakePosition, StakingPool};

use crate::constants::MANAGER_SEED;
use crate::error::YieldVaultError;
use crate::state::{
    EarnAccount, EarnRewards, ExitQuote, InvestQuote, Manager, PausedFlags, VaultType,
};

// =============================================================================
// Quotes
// =============================================================================

#[derive(Accounts)]
pub struct ManagerQuoteView<'info> {
    #[account(
        seeds = [MANAGER_SEED, manager.investment_mint.as_ref()],
        bump = manager.bump
    )]
    pub manager: Account<'info, Manager>,

    #[account(address = manager.policy.upstream_pool @ YieldVaultError::AccountMismatch)]
    pub staking_pool: Account<'info, StakingPool>,
}

pub fn handler_invest_quote(
    ctx: Context<ManagerQuoteView>,
    from_token: Pubkey,
    from_amount: u64,
    max_slippage_bps: u16,
    deadline: i64,
) -> Result<InvestQuote> {
    ctx.accounts.manager.invest_quote(
        &ctx.accounts.staking_pool,
        from_token,
        from_amount,
        max_slippage_bps,
        deadline,
    )
}

pub fn handler_exit_quote(
    ctx: Context<ManagerQuoteView>,
    investment_token_amount: u64,
    to_token: Pubkey,
    max_slippage_bps: u16,
    deadline: i64,
) -> Result<ExitQuote> {
    ctx.accounts.manager.exit_quote(
        &ctx.accounts.staking_pool,
        investment_token_amount,
        to_token,
        max_slippage_bps,
        deadline,
    )
}

// =============================================================================
// Pause State
// =============================================================================

#[derive(Accounts)]
pub struct ManagerPausedView<'info> {
    #[account(
        seeds = [MANAGER_SEED, manager.investment_mint.as_ref()],
        bump = manager.bump
    )]
    pub manager: Account<'info, Manager>,

    /// Required when the manager has a secondary earn account
    #[account(address = manager.secondary_earn_account @ YieldVaultError::AccountMismatch)]
    pub secondary_earn_account: Option<Account<'info, EarnAccount>>,
}

pub fn handler_paused(ctx: Context<ManagerPausedView>) -> Result<PausedFlags> {
    let manager = &ctx.accounts.manager;
    let secondary_glp_paused = match &ctx.accounts.secondary_earn_account {
        Some(account) => account.glp_investments_paused,
        None => {
            require!(
                manager.secondary_earn_account == Pubkey::default(),
                YieldVaultError::AccountMismatch
            );
            false
        }
    };
    Ok(manager.effective_paused(secondary_glp_paused))
}

// =============================================================================
// Rewards
// =============================================================================

/// Earn positions to sum are passed as remaining accounts
#[derive(Accounts)]
#[instruction(vault_type: VaultType)]
pub struct ManagerRewardsView<'info> {
    #[account(
        seeds = [MANAGER_SEED, manager.investment_mint.as_ref()],
        bump = manager.bump
    )]
    pub manager: Account<'info, Manager>,

    #[account(
        address = manager.staking_pool_for(vault_type) @ YieldVaultError::AccountMismatch
    )]
    pub staking_pool: Account<'info, StakingPool>,
}

/// Deserialize upstream positions owned by this manager's earn accounts in `pool`
pub(crate) fn load_earn_positions(
    manager: &Manager,
    pool: &Pubkey,
    accounts: &[AccountInfo],
) -> Result<Vec<StakePosition>> {
    let mut seen: Vec<Pubkey> = Vec::with_capacity(accounts.len());
    let mut positions = Vec::with_capacity(accounts.len());

    for info in accounts {
        require_keys_eq!(*info.owner, staking_rewards::ID, YieldVaultError::AccountMismatch);
        require!(!seen.contains(info.key), YieldVaultError::AccountMismatch);
        seen.push(*info.key);

        let data = info.try_borrow_data()?;
        let position = StakePosition::try_deserialize(&mut &data[..])?;
        require!(
            manager.is_earn_account(&position.owner) && position.pool == *pool,
            YieldVaultError::AccountMismatch
        );
        positions.push(position);
    }

    Ok(positions)
}

/// Sum pending rewards over positions, with es converted to oGMX net of the
/// manager's reward fee
pub(crate) fn net_harvestable(
    manager: &Manager,
    pool: &StakingPool,
    positions: &[StakePosition],
    now: i64,
) -> Result<EarnRewards> {
    let mut native = 0u64;
    let mut es = 0u64;
    for position in positions {
        let pending = EarnAccount::harvestable_rewards(pool, position, now)?;
        native = native
            .checked_add(pending.wrapped_native)
            .ok_or(YieldVaultError::MathOverflow)?;
        es = es
            .checked_add(pending.es_gmx)
            .ok_or(YieldVaultError::MathOverflow)?;
    }

    let (wrapped_native, o_gmx) = manager.net_harvestable(native, es)?;
    Ok(EarnRewards {
        wrapped_native,
        es_gmx: o_gmx,
    })
}

/// Per-second rates over positions, es optionally net of the reward fee
pub(crate) fn projected_rates(
    manager: &Manager,
    pool: &StakingPool,
    positions: &[StakePosition],
    subtract_fees: bool,
) -> Result<EarnRewards> {
    let mut rates = EarnRewards::default();
    for position in positions {
        let r = EarnAccount::reward_rates(pool, position)?;
        rates.wrapped_native = rates
            .wrapped_native
            .checked_add(r.wrapped_native)
            .ok_or(YieldVaultError::MathOverflow)?;
        rates.es_gmx = rates
            .es_gmx
            .checked_add(r.es_gmx)
            .ok_or(YieldVaultError::MathOverflow)?;
    }

    if subtract_fees {
        rates.es_gmx = manager.o_gmx_rewards_fee_rate.split(rates.es_gmx)?.1;
    }
    Ok(rates)
}

pub fn handler_manager_harvestable_rewards(
    ctx: Context<ManagerRewardsView>,
    _vault_type: VaultType,
) -> Result<EarnRewards> {
    let now = Clock::get()?.unix_timestamp;
    let manager = &ctx.accounts.manager;
    let pool = &ctx.accounts.staking_pool;

    let positions = load_earn_positions(manager, &pool.key(), ctx.remaining_accounts)?;
    net_harvestable(manager, pool, &positions, now)
}

pub fn handler_manager_projected_reward_rates(
    ctx: Context<ManagerRewardsView>,
    _vault_type: VaultType,
    subtract_fees: bool,
) -> Result<EarnRewards> {
    let manager = &ctx.accounts.manager;
    let pool = &ctx.accounts.staking_pool;

    let positions = load_earn_positions(manager, &pool.key(), ctx.remaining_accounts)?;
    projected_rates(manager, pool, &positions, subtract_fees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AssetClass, AssetPolicy, FeeRate};
    use staking_rewards::state::{PoolKind, VestingState};

    fn manager(earn: Pubkey) -> Manager {
        Manager {
            governance: Pubkey::new_unique(),
            investment_mint: Pubkey::new_unique(),
            investment_token: Pubkey::new_unique(),
            policy: AssetPolicy {
                asset_class: AssetClass::Gmx,
                upstream_pool: Pubkey::new_unique(),
                accepted_tokens: vec![Pubkey::new_unique()],
                invests_to_secondary: false,
            },
            staking_pools: [Pubkey::new_unique(), Pubkey::new_unique()],
            o_gmx_token: Pubkey::new_unique(),
            primary_earn_account: earn,
            secondary_earn_account: Pubkey::default(),
            rewards_aggregators: [Pubkey::new_unique(), Pubkey::new_unique()],
            fee_collector: Pubkey::new_unique(),
            sell_fee_rate: FeeRate::ZERO,
            o_gmx_rewards_fee_rate: FeeRate::bps(1_000).unwrap(),
            es_gmx_vesting_rate: FeeRate::ZERO,
            pausers: vec![],
            paused: PausedFlags::default(),
            bump: 255,
        }
    }

    fn pool() -> StakingPool {
        StakingPool {
            admin: Pubkey::new_unique(),
            pool_id: Pubkey::new_unique(),
            kind: PoolKind::Token,
            staked_mint: Pubkey::new_unique(),
            es_mint: Pubkey::new_unique(),
            native_reward_mint: Pubkey::new_unique(),
            reward_vault: Pubkey::new_unique(),
            vester_reserve: Pubkey::new_unique(),
            native_per_second: 100,
            es_per_second: 1_000,
            native_reward_per_token: 0,
            es_reward_per_token: 0,
            last_update_time: 0,
            total_staked: 10_000,
            cooldown_duration: 0,
            mint_burn_fee_bps: 0,
            tax_bps: 0,
            basket: vec![],
            is_paused: false,
            bump: 255,
        }
    }

    fn position(owner: Pubkey, staked: u64) -> StakePosition {
        StakePosition {
            pool: Pubkey::new_unique(),
            owner,
            staked_amount: staked,
            staked_es_amount: 0,
            native_reward_debt: 0,
            es_reward_debt: 0,
            native_rewards_owed: 0,
            es_rewards_owed: 0,
            last_stake_time: 0,
            vesting: VestingState::default(),
            bump: 255,
        }
    }

    #[test]
    fn test_harvestable_sums_positions_net_of_o_gmx_fee() {
        let earn = Pubkey::new_unique();
        let m = manager(earn);
        let p = pool();
        let positions = [position(earn, 2_500), position(earn, 2_500)];

        let pending = net_harvestable(&m, &p, &positions, 10).unwrap();
        // Half the pool for 10 seconds
        assert_eq!(pending.wrapped_native, 500);
        assert_eq!(pending.es_gmx, 4_500);
    }

    #[test]
    fn test_projected_rates_optionally_net() {
        let earn = Pubkey::new_unique();
        let m = manager(earn);
        let p = pool();
        let positions = [position(earn, 5_000)];

        let gross = projected_rates(&m, &p, &positions, false).unwrap();
        assert_eq!(gross.wrapped_native, 50);
        assert_eq!(gross.es_gmx, 500);

        let net = projected_rates(&m, &p, &positions, true).unwrap();
        assert_eq!(net.wrapped_native, 50);
        assert_eq!(net.es_gmx, 450);
    }
}
