use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use instructions::*;
use state::PoolKind;

declare_id!("EKwa9hGB959AiZ4qCoSQu14G3yjdEpnDxt1vetCmH7Bq");

#[program]
pub mod staking_rewards {
    use super::*;

    // =========================================================================
    // Pool Setup
    // =========================================================================

    /// Initialize a new staking pool
    ///
    /// # Arguments
    /// * `pool_id` - Seed identifying the pool
    /// * `kind` - Token (single staked token plus escrow) or Basket (priced deposits)
    /// * `cooldown_duration` - Seconds a basket deposit stays locked
    ///
    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        pool_id: Pubkey,
        kind: PoolKind,
        cooldown_duration: i64,
    ) -> Result<()> {
        instructions::initialize::handler_initialize_pool(ctx, pool_id, kind, cooldown_duration)
    }

    /// Set the staked token of a Token pool and create its vester reserve
    pub fn initialize_vester(ctx: Context<InitializeVester>) -> Result<()> {
        instructions::initialize::handler_initialize_vester(ctx)
    }

    /// Create the vault for a deposit token (basket pools also price it)
    ///
    /// # Arguments
    /// * `price` - USD price scaled by PRICE_PRECISION (ignored for Token pools)
    /// * `weight` - Target weight in the basket (ignored for Token pools)
    ///
    pub fn add_pool_token(ctx: Context<AddPoolToken>, price: u128, weight: u64) -> Result<()> {
        instructions::initialize::handler_add_pool_token(ctx, price, weight)
    }

    /// Fund the reward vault or the vester reserve (admin only)
    pub fn fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
        instructions::fund_rewards::handler_fund_rewards(ctx, amount)
    }

    // =========================================================================
    // Positions
    // =========================================================================

    /// Open a position for `owner`
    pub fn open_position(ctx: Context<OpenPosition>) -> Result<()> {
        instructions::open_position::handler_open_position(ctx)
    }

    /// Stake tokens
    ///
    /// # Arguments
    /// * `amount` - Tokens to deposit
    /// * `min_out` - Minimum staked units to receive
    ///
    pub fn stake(ctx: Context<Stake>, amount: u64, min_out: u64) -> Result<()> {
        instructions::stake::handler_stake(ctx, amount, min_out)
    }

    /// Unstake units (basket positions wait out the cooldown)
    ///
    /// # Arguments
    /// * `amount` - Staked units to remove
    /// * `min_out` - Minimum tokens to receive
    ///
    pub fn unstake(ctx: Context<Unstake>, amount: u64, min_out: u64) -> Result<()> {
        instructions::unstake::handler_unstake(ctx, amount, min_out)
    }

    /// Move staked units to another position in the same pool
    pub fn transfer_staked(ctx: Context<TransferStaked>, amount: u64) -> Result<()> {
        instructions::transfer_staked::handler_transfer_staked(ctx, amount)
    }

    /// Claim native and escrowed rewards
    pub fn claim(ctx: Context<Claim>) -> Result<()> {
        instructions::claim::handler_claim(ctx)
    }

    /// Start vesting escrowed rewards into the staked token
    pub fn deposit_for_vesting(ctx: Context<DepositForVesting>, amount: u64) -> Result<()> {
        instructions::vesting::handler_deposit_for_vesting(ctx, amount)
    }

    /// Claim tokens vested so far
    pub fn claim_vested(ctx: Context<ClaimVested>) -> Result<()> {
        instructions::vesting::handler_claim_vested(ctx)
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// Pause or unpause the staking pool (admin only)
    pub fn pause_pool(ctx: Context<PoolAdmin>, paused: bool) -> Result<()> {
        instructions::admin::pause_pool(ctx, paused)
    }

    /// Transfer admin rights to a new address (admin only)
    pub fn transfer_admin(ctx: Context<PoolAdmin>, new_admin: Pubkey) -> Result<()> {
        instructions::admin::transfer_admin(ctx, new_admin)
    }

    /// Set per-second emission of native and escrowed rewards (admin only)
    pub fn set_reward_rates(
        ctx: Context<PoolAdmin>,
        native_per_second: u64,
        es_per_second: u64,
    ) -> Result<()> {
        instructions::admin::set_reward_rates(ctx, native_per_second, es_per_second)
    }

    /// Update a basket token's price (admin only)
    pub fn set_basket_token_price(
        ctx: Context<PoolAdmin>,
        mint: Pubkey,
        price: u128,
    ) -> Result<()> {
        instructions::admin::set_basket_token_price(ctx, mint, price)
    }

    /// Update basket fee parameters (admin only)
    pub fn set_fees(ctx: Context<PoolAdmin>, mint_burn_fee_bps: u16, tax_bps: u16) -> Result<()> {
        instructions::admin::set_fees(ctx, mint_burn_fee_bps, tax_bps)
    }
}
