use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{
    DEFAULT_MINT_BURN_FEE_BPS, DEFAULT_TAX_BPS, POOL_VAULT_SEED, REWARD_VAULT_SEED,
    STAKING_POOL_SEED, VESTER_RESERVE_SEED,
};
use crate::error::StakingError;
use crate::state::{PoolKind, StakingPool};

// =============================================================================
// Initialize Pool
// =============================================================================

/// Initialize a new staking pool
///
/// # Accounts
/// * `admin` - The admin who will control this pool (signer, payer)
/// * `staking_pool` - The staking pool PDA to create
/// * `es_mint` - Escrowed reward mint (mint authority must be the es_minter PDA)
/// * `native_reward_mint` - Wrapped native reward mint
/// * `reward_vault` - Vault that pays out native rewards
///
#[derive(Accounts)]
#[instruction(pool_id: Pubkey)]
pub struct InitializePool<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = 8 + StakingPool::INIT_SPACE,
        seeds = [STAKING_POOL_SEED, pool_id.as_ref()],
        bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    pub es_mint: Account<'info, Mint>,

    pub native_reward_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = admin,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = native_reward_mint,
        token::authority = staking_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize_pool(
    ctx: Context<InitializePool>,
    pool_id: Pubkey,
    kind: PoolKind,
    cooldown_duration: i64,
) -> Result<()> {
    require!(cooldown_duration >= 0, StakingError::InvalidAmount);

    let staking_pool = &mut ctx.accounts.staking_pool;

    staking_pool.admin = ctx.accounts.admin.key();
    staking_pool.pool_id = pool_id;
    staking_pool.kind = kind;
    staking_pool.staked_mint = Pubkey::default();
    staking_pool.es_mint = ctx.accounts.es_mint.key();
    staking_pool.native_reward_mint = ctx.accounts.native_reward_mint.key();
    staking_pool.reward_vault = ctx.accounts.reward_vault.key();
    staking_pool.vester_reserve = Pubkey::default();

    staking_pool.native_per_second = 0;
    staking_pool.es_per_second = 0;
    staking_pool.native_reward_per_token = 0;
    staking_pool.es_reward_per_token = 0;
    staking_pool.last_update_time = Clock::get()?.unix_timestamp;
    staking_pool.total_staked = 0;

    staking_pool.cooldown_duration = cooldown_duration;
    staking_pool.mint_burn_fee_bps = DEFAULT_MINT_BURN_FEE_BPS;
    staking_pool.tax_bps = DEFAULT_TAX_BPS;
    staking_pool.basket = Vec::new();

    staking_pool.is_paused = false;
    staking_pool.bump = ctx.bumps.staking_pool;

    msg!(
        "Staking pool initialized: id={}, kind={:?}, cooldown={}s",
        pool_id,
        kind,
        cooldown_duration
    );

    Ok(())
}

// =============================================================================
// Initialize Vester (Token pools)
// =============================================================================

/// Sets the pool's staked token and creates the reserve that pays out
/// vested escrow rewards in that token.
#[derive(Accounts)]
pub struct InitializeVester<'info> {
    #[account(
        mut,
        constraint = admin.key() == staking_pool.admin @ StakingError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.pool_id.as_ref()],
        bump = staking_pool.bump,
        constraint = staking_pool.kind == PoolKind::Token @ StakingError::UnsupportedPoolKind,
        constraint = staking_pool.vester_reserve == Pubkey::default() @ StakingError::InvalidAuthority
    )]
    pub staking_pool: Account<'info, StakingPool>,

    pub staked_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = admin,
        seeds = [VESTER_RESERVE_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = staked_mint,
        token::authority = staking_pool
    )]
    pub vester_reserve: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize_vester(ctx: Context<InitializeVester>) -> Result<()> {
    let staking_pool = &mut ctx.accounts.staking_pool;
    staking_pool.staked_mint = ctx.accounts.staked_mint.key();
    staking_pool.vester_reserve = ctx.accounts.vester_reserve.key();

    msg!(
        "Vester initialized: staked_mint={}, reserve={}",
        staking_pool.staked_mint,
        staking_pool.vester_reserve
    );

    Ok(())
}

// =============================================================================
// Add Pool Token
// =============================================================================

/// Create the vault holding deposits of one token.
/// Basket pools also register the token with its price and target weight.
#[derive(Accounts)]
pub struct AddPoolToken<'info> {
    #[account(
        mut,
        constraint = admin.key() == staking_pool.admin @ StakingError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.pool_id.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    pub token_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = admin,
        seeds = [POOL_VAULT_SEED, staking_pool.key().as_ref(), token_mint.key().as_ref()],
        bump,
        token::mint = token_mint,
        token::authority = staking_pool
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_add_pool_token(ctx: Context<AddPoolToken>, price: u128, weight: u64) -> Result<()> {
    let staking_pool = &mut ctx.accounts.staking_pool;
    let mint = ctx.accounts.token_mint.key();

    match staking_pool.kind {
        PoolKind::Token => {
            require!(
                mint == staking_pool.staked_mint || mint == staking_pool.es_mint,
                StakingError::InvalidToken
            );
        }
        PoolKind::Basket => staking_pool.add_basket_token(mint, price, weight)?,
    }

    msg!("Pool token added: mint={}, price={}, weight={}", mint, price, weight);

    Ok(())
}
