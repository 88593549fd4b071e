// =============================================================================
// Yield Vault Constants
// =============================================================================
// Seeds, precisions and table capacities shared by every component of the
// yield vault program. Anything an owner can change at runtime lives in an
// account instead (fee rates, pausers, vesting duration).
// =============================================================================

// =============================================================================
// PDA SEEDS
// =============================================================================

/// Seed for the single Governance account
/// Full seed: ["governance"]
pub const GOVERNANCE_SEED: &[u8] = b"governance";

/// Seed for an EarnAccount PDA
/// Full seed: ["earn_account", seed_key, [kind]]
/// The PDA owns the upstream staking positions and the token accounts
/// used to stake into them.
pub const EARN_ACCOUNT_SEED: &[u8] = b"earn_account";

/// Seed for a Manager PDA
/// Full seed: ["manager", investment_mint]
pub const MANAGER_SEED: &[u8] = b"manager";

/// Seed for an InvestmentToken PDA (mint authority of the wrapper token)
/// Full seed: ["investment_token", mint]
pub const INVESTMENT_TOKEN_SEED: &[u8] = b"investment_token";

/// Seed for a RepricingVault PDA (mint authority of the share token)
/// Full seed: ["repricing_vault", share_mint]
pub const REPRICING_VAULT_SEED: &[u8] = b"repricing_vault";

/// Seed for a RewardsAggregator PDA
/// Full seed: ["rewards_aggregator", vault]
pub const REWARDS_AGGREGATOR_SEED: &[u8] = b"rewards_aggregator";

// =============================================================================
// PRECISION & BASIS POINTS
// =============================================================================

/// 100% in basis points
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Largest slippage a quote may request (100%)
pub const MAX_SLIPPAGE_BPS: u16 = 10_000;

/// Scale of reserves_per_share: 1e18 means one reserve token per share
pub const RESERVES_PER_SHARE_PRECISION: u128 = 1_000_000_000_000_000_000;

// =============================================================================
// TIMING
// =============================================================================

/// Default period over which newly added reserves vest (7 days)
pub const DEFAULT_RESERVES_VESTING_DURATION: i64 = 7 * 24 * 60 * 60;

// =============================================================================
// TABLE CAPACITIES
// =============================================================================

/// Explicit (target, caller) access entries held by Governance
pub const MAX_ACCESS_ENTRIES: usize = 32;

/// Tokens a Manager accepts for investment or exit
pub const MAX_ACCEPTED_TOKENS: usize = 6;

/// Accounts allowed to flip a Manager's pause flags
pub const MAX_PAUSERS: usize = 8;

/// Managers allowed to mint and burn one investment token
pub const MAX_MINTERS: usize = 4;
