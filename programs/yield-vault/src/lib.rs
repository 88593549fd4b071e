use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;
use state::{
    EarnAccountKind, EarnRewards, ExitQuote, ExplicitAccess, FeeRate, FeeRateKind, InvestQuote,
    PausedFlags, ReservesView, VaultType,
};

declare_id!("BZ7EocKQbLkFT5yuqKj7sK7oqGLv428S5kv2Tsbj5cy1");

#[program]
pub mod yield_vault {
    use super::*;

    // =========================================================================
    // Governance
    // =========================================================================

    /// Create the governance account with the signer as owner
    pub fn initialize_governance(ctx: Context<InitializeGovernance>) -> Result<()> {
        instructions::governance::handler_initialize_governance(ctx)
    }

    /// First step of an ownership transfer (owner only)
    pub fn propose_new_owner(ctx: Context<ProposeNewOwner>, new_owner: Pubkey) -> Result<()> {
        instructions::governance::handler_propose_new_owner(ctx, new_owner)
    }

    /// Second step, signed by the proposed owner
    pub fn accept_owner(ctx: Context<AcceptOwner>) -> Result<()> {
        instructions::governance::handler_accept_owner(ctx)
    }

    /// Grant or revoke selectors for `caller` on `target` (owner only)
    pub fn set_explicit_access(
        ctx: Context<SetExplicitAccess>,
        target: Pubkey,
        caller: Pubkey,
        access: Vec<ExplicitAccess>,
    ) -> Result<()> {
        instructions::governance::handler_set_explicit_access(ctx, target, caller, access)
    }

    // =========================================================================
    // Earn Accounts
    // =========================================================================

    pub fn initialize_earn_account(
        ctx: Context<InitializeEarnAccount>,
        seed_key: Pubkey,
        kind: EarnAccountKind,
    ) -> Result<()> {
        instructions::earn_account::handler_initialize_earn_account(ctx, seed_key, kind)
    }

    pub fn init_earn_token_account(ctx: Context<InitEarnTokenAccount>) -> Result<()> {
        instructions::earn_account::handler_init_earn_token_account(ctx)
    }

    /// Open the earn account's position in an upstream pool (owner only)
    pub fn open_earn_position(ctx: Context<OpenEarnPosition>) -> Result<()> {
        instructions::earn_account::handler_open_earn_position(ctx)
    }

    /// Stake tokens held by the earn account
    ///
    /// # Arguments
    /// * `amount` - Tokens to stake
    /// * `min_out` - Minimum staked units, enforced upstream
    ///
    pub fn earn_stake(ctx: Context<EarnStake>, amount: u64, min_out: u64) -> Result<()> {
        instructions::earn_account::handler_earn_stake(ctx, amount, min_out)
    }

    pub fn earn_unstake(ctx: Context<EarnUnstake>, amount: u64, min_out: u64) -> Result<()> {
        instructions::earn_account::handler_earn_unstake(ctx, amount, min_out)
    }

    pub fn transfer_staked_position(
        ctx: Context<TransferStakedPosition>,
        amount: u64,
    ) -> Result<()> {
        instructions::earn_account::handler_transfer_staked_position(ctx, amount)
    }

    /// Promote stake to the destination earn account, or pause GLP
    /// investments while the upstream cooldown is running
    pub fn transfer_staked_position_or_pause(
        ctx: Context<TransferStakedPosition>,
        amount: u64,
    ) -> Result<()> {
        instructions::earn_account::handler_transfer_staked_position_or_pause(ctx, amount)
    }

    /// Claim vested tokens and split escrowed rewards between vesting and restaking
    pub fn restake_es_rewards(ctx: Context<RestakeEsRewards>) -> Result<()> {
        instructions::manager::handler_restake_es_rewards(ctx)
    }

    pub fn earn_harvestable_rewards(ctx: Context<EarnPositionView>) -> Result<EarnRewards> {
        instructions::earn_account::handler_earn_harvestable_rewards(ctx)
    }

    pub fn glp_investment_cooldown_expiry(ctx: Context<EarnPositionView>) -> Result<i64> {
        instructions::earn_account::handler_glp_investment_cooldown_expiry(ctx)
    }

    // =========================================================================
    // Managers
    // =========================================================================

    pub fn initialize_manager(
        ctx: Context<InitializeManager>,
        params: InitializeManagerParams,
    ) -> Result<()> {
        instructions::manager::handler_initialize_manager(ctx, params)
    }

    pub fn set_pauser(ctx: Context<ManagerAdmin>, account: Pubkey, can_pause: bool) -> Result<()> {
        instructions::manager::handler_set_pauser(ctx, account, can_pause)
    }

    /// Replace the pause flags (pausers only)
    pub fn set_paused(ctx: Context<SetPaused>, paused: PausedFlags) -> Result<()> {
        instructions::manager::handler_set_paused(ctx, paused)
    }

    pub fn set_sell_fee_rate(ctx: Context<ManagerAdmin>, rate: FeeRate) -> Result<()> {
        instructions::manager::handler_set_fee_rate(ctx, FeeRateKind::Sell, rate)
    }

    pub fn set_o_gmx_rewards_fee_rate(ctx: Context<ManagerAdmin>, rate: FeeRate) -> Result<()> {
        instructions::manager::handler_set_fee_rate(ctx, FeeRateKind::OGmxRewards, rate)
    }

    pub fn set_es_gmx_vesting_rate(ctx: Context<ManagerAdmin>, rate: FeeRate) -> Result<()> {
        instructions::manager::handler_set_fee_rate(ctx, FeeRateKind::EsGmxVesting, rate)
    }

    pub fn set_fee_collector(ctx: Context<ManagerAdmin>, fee_collector: Pubkey) -> Result<()> {
        instructions::manager::handler_set_fee_collector(ctx, fee_collector)
    }

    pub fn set_earn_accounts(
        ctx: Context<ManagerAdmin>,
        primary: Pubkey,
        secondary: Pubkey,
    ) -> Result<()> {
        instructions::manager::handler_set_earn_accounts(ctx, primary, secondary)
    }

    pub fn set_rewards_aggregators(
        ctx: Context<ManagerAdmin>,
        gmx_aggregator: Pubkey,
        glp_aggregator: Pubkey,
    ) -> Result<()> {
        instructions::manager::handler_set_rewards_aggregators(ctx, gmx_aggregator, glp_aggregator)
    }

    pub fn manager_recover_token(ctx: Context<ManagerRecoverToken>, amount: u64) -> Result<()> {
        instructions::manager::handler_manager_recover_token(ctx, amount)
    }

    /// Claim one earn account's rewards and forward them to the aggregator
    pub fn manager_harvest_rewards(
        ctx: Context<ManagerHarvestRewards>,
        vault_type: VaultType,
    ) -> Result<()> {
        instructions::manager::handler_manager_harvest_rewards(ctx, vault_type)
    }

    pub fn get_invest_quote(
        ctx: Context<ManagerQuoteView>,
        from_token: Pubkey,
        from_amount: u64,
        max_slippage_bps: u16,
        deadline: i64,
    ) -> Result<InvestQuote> {
        instructions::manager::handler_invest_quote(
            ctx,
            from_token,
            from_amount,
            max_slippage_bps,
            deadline,
        )
    }

    pub fn get_exit_quote(
        ctx: Context<ManagerQuoteView>,
        investment_token_amount: u64,
        to_token: Pubkey,
        max_slippage_bps: u16,
        deadline: i64,
    ) -> Result<ExitQuote> {
        instructions::manager::handler_exit_quote(
            ctx,
            investment_token_amount,
            to_token,
            max_slippage_bps,
            deadline,
        )
    }

    pub fn paused(ctx: Context<ManagerPausedView>) -> Result<PausedFlags> {
        instructions::manager::handler_paused(ctx)
    }

    pub fn manager_harvestable_rewards(
        ctx: Context<ManagerRewardsView>,
        vault_type: VaultType,
    ) -> Result<EarnRewards> {
        instructions::manager::handler_manager_harvestable_rewards(ctx, vault_type)
    }

    pub fn manager_projected_reward_rates(
        ctx: Context<ManagerRewardsView>,
        vault_type: VaultType,
        subtract_fees: bool,
    ) -> Result<EarnRewards> {
        instructions::manager::handler_manager_projected_reward_rates(ctx, vault_type, subtract_fees)
    }

    // =========================================================================
    // Investment Tokens
    // =========================================================================

    pub fn initialize_investment_token(ctx: Context<InitializeInvestmentToken>) -> Result<()> {
        instructions::investment_token::handler_initialize_investment_token(ctx)
    }

    pub fn set_minter(
        ctx: Context<InvestmentTokenAdmin>,
        minter: Pubkey,
        can_mint: bool,
    ) -> Result<()> {
        instructions::investment_token::handler_set_minter(ctx, minter, can_mint)
    }

    pub fn set_manager(ctx: Context<InvestmentTokenAdmin>, manager: Pubkey) -> Result<()> {
        instructions::investment_token::handler_set_manager(ctx, manager)
    }

    /// Invest accepted tokens for investment tokens
    ///
    /// # Arguments
    /// * `quote` - From `get_invest_quote`; re-derived from live state before use
    ///
    pub fn invest_with_token(ctx: Context<InvestWithToken>, quote: InvestQuote) -> Result<()> {
        instructions::investment_token::handler_invest_with_token(ctx, quote)
    }

    /// Exit investment tokens to an accepted token
    ///
    /// # Arguments
    /// * `quote` - From `get_exit_quote`; re-derived from live state before use
    ///
    pub fn exit_to_token(ctx: Context<ExitToToken>, quote: ExitQuote) -> Result<()> {
        instructions::investment_token::handler_exit_to_token(ctx, quote)
    }

    pub fn invest_with_native(ctx: Context<InvestmentTokenView>) -> Result<()> {
        instructions::investment_token::handler_invest_with_native(ctx)
    }

    pub fn exit_to_native(ctx: Context<InvestmentTokenView>) -> Result<()> {
        instructions::investment_token::handler_exit_to_native(ctx)
    }

    pub fn max_invest(ctx: Context<InvestmentTokenView>, from_token: Pubkey) -> Result<u64> {
        instructions::investment_token::handler_max_invest(ctx, from_token)
    }

    pub fn max_exit(ctx: Context<InvestmentTokenView>, to_token: Pubkey) -> Result<u64> {
        instructions::investment_token::handler_max_exit(ctx, to_token)
    }

    // =========================================================================
    // Repricing Vaults
    // =========================================================================

    pub fn initialize_vault(ctx: Context<InitializeVault>, performance_fee: FeeRate) -> Result<()> {
        instructions::vault::handler_initialize_vault(ctx, performance_fee)
    }

    /// Add reserves that vest into the share price over the vesting duration
    pub fn add_pending_reserves(ctx: Context<AddPendingReserves>, amount: u64) -> Result<()> {
        instructions::vault::handler_add_pending_reserves(ctx, amount)
    }

    pub fn checkpoint_reserves(ctx: Context<CheckpointReserves>) -> Result<()> {
        instructions::vault::handler_checkpoint_reserves(ctx)
    }

    pub fn set_reserves_vesting_duration(ctx: Context<VaultAdmin>, duration: i64) -> Result<()> {
        instructions::vault::handler_set_reserves_vesting_duration(ctx, duration)
    }

    pub fn set_performance_fee(ctx: Context<VaultAdmin>, rate: FeeRate) -> Result<()> {
        instructions::vault::handler_set_performance_fee(ctx, rate)
    }

    pub fn issue_shares_from_reserves(
        ctx: Context<IssueShares>,
        reserves: u64,
        min_shares: u64,
    ) -> Result<()> {
        instructions::vault::handler_issue_shares_from_reserves(ctx, reserves, min_shares)
    }

    pub fn redeem_reserves_from_shares(
        ctx: Context<RedeemShares>,
        shares: u64,
        min_reserves: u64,
    ) -> Result<()> {
        instructions::vault::handler_redeem_reserves_from_shares(ctx, shares, min_reserves)
    }

    pub fn vault_recover_token(ctx: Context<VaultRecoverToken>, amount: u64) -> Result<()> {
        instructions::vault::handler_vault_recover_token(ctx, amount)
    }

    pub fn vault_reserves(ctx: Context<VaultView>) -> Result<ReservesView> {
        instructions::vault::handler_vault_reserves(ctx)
    }

    pub fn vault_invest_quote(
        ctx: Context<VaultView>,
        from_token: Pubkey,
        from_amount: u64,
        max_slippage_bps: u16,
        deadline: i64,
    ) -> Result<InvestQuote> {
        instructions::vault::handler_vault_invest_quote(
            ctx,
            from_token,
            from_amount,
            max_slippage_bps,
            deadline,
        )
    }

    pub fn vault_exit_quote(
        ctx: Context<VaultView>,
        shares: u64,
        to_token: Pubkey,
        max_slippage_bps: u16,
        deadline: i64,
    ) -> Result<ExitQuote> {
        instructions::vault::handler_vault_exit_quote(ctx, shares, to_token, max_slippage_bps, deadline)
    }

    // =========================================================================
    // Rewards Aggregators
    // =========================================================================

    pub fn initialize_aggregator(
        ctx: Context<InitializeAggregator>,
        params: InitializeAggregatorParams,
    ) -> Result<()> {
        instructions::aggregator::handler_initialize_aggregator(ctx, params)
    }

    pub fn init_aggregator_token_account(ctx: Context<InitAggregatorTokenAccount>) -> Result<()> {
        instructions::aggregator::handler_init_aggregator_token_account(ctx)
    }

    pub fn set_managers(
        ctx: Context<AggregatorAdmin>,
        vault_type: VaultType,
        gmx_manager: Pubkey,
        glp_manager: Pubkey,
    ) -> Result<()> {
        instructions::aggregator::handler_set_managers(ctx, vault_type, gmx_manager, glp_manager)
    }

    pub fn set_performance_fee_collector(
        ctx: Context<AggregatorAdmin>,
        collector: Pubkey,
    ) -> Result<()> {
        instructions::aggregator::handler_set_performance_fee_collector(ctx, collector)
    }

    pub fn aggregator_recover_token(
        ctx: Context<AggregatorRecoverToken>,
        amount: u64,
    ) -> Result<()> {
        instructions::aggregator::handler_aggregator_recover_token(ctx, amount)
    }

    pub fn reward_tokens_list(ctx: Context<AggregatorTokensView>) -> Result<[Pubkey; 3]> {
        instructions::aggregator::handler_reward_tokens_list(ctx)
    }

    /// # Arguments
    /// * `gmx_position_count` - Leading remaining accounts owned by the GMX
    ///   manager's earn accounts; the rest belong to the GLP manager
    ///
    pub fn aggregator_harvestable_rewards(
        ctx: Context<AggregatorRewardsView>,
        gmx_position_count: u8,
    ) -> Result<[u64; 3]> {
        instructions::aggregator::handler_aggregator_harvestable_rewards(ctx, gmx_position_count)
    }

    pub fn aggregator_projected_reward_rates(
        ctx: Context<AggregatorRewardsView>,
        gmx_position_count: u8,
        subtract_perf_fees: bool,
    ) -> Result<EarnRewards> {
        instructions::aggregator::handler_aggregator_projected_reward_rates(
            ctx,
            gmx_position_count,
            subtract_perf_fees,
        )
    }

    /// Convert the GLP aggregator's oGMX through the GMX manager's exit
    pub fn exit_reward_tokens(ctx: Context<ExitRewardTokens>, quote: ExitQuote) -> Result<()> {
        instructions::aggregator::handler_exit_reward_tokens(ctx, quote)
    }

    /// Swap, invest and compound harvested rewards into the vault
    pub fn aggregator_harvest_rewards(
        ctx: Context<AggregatorHarvestRewards>,
        params: HarvestParams,
    ) -> Result<()> {
        instructions::aggregator::handler_aggregator_harvest_rewards(ctx, params)
    }
}
