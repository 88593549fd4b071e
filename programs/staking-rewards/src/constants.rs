// =============================================================================
// Staking Rewards Constants
// =============================================================================

// PDA Seeds
pub const STAKING_POOL_SEED: &[u8] = b"staking_pool";
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
pub const VESTER_RESERVE_SEED: &[u8] = b"vester_reserve";
pub const POSITION_SEED: &[u8] = b"position";
pub const ES_MINTER_SEED: &[u8] = b"es_minter";

// Precision for reward calculations (18 decimals)
// Using u128 to handle large numbers without overflow
pub const REWARD_PRECISION: u128 = 1_000_000_000_000_000_000; // 10^18

// Basket token prices: value of one token base unit in pool units, scaled by 10^12
pub const PRICE_PRECISION: u128 = 1_000_000_000_000;

/// Total basis points (100%)
pub const BPS_DENOMINATOR: u128 = 10_000;

// =============================================================================
// Pool defaults
// =============================================================================

/// Minimum dwell time after a basket deposit before the position can be
/// redeemed or transferred (15 minutes)
pub const DEFAULT_COOLDOWN_DURATION: i64 = 15 * 60;

/// Escrowed rewards deposited for vesting release linearly over one year
pub const VESTING_DURATION: i64 = 365 * 24 * 60 * 60;

/// Base mint/redeem fee for basket pools (0.25%)
pub const DEFAULT_MINT_BURN_FEE_BPS: u16 = 25;

/// Extra fee charged for moving a basket token away from its target weight (0.5%)
pub const DEFAULT_TAX_BPS: u16 = 50;

// Safety limits
pub const MAX_BASKET_TOKENS: usize = 4;
pub const MAX_FEE_BPS: u16 = 500;
