use anchor_lang::prelude::*;

use crate::state::{FeeRate, FeeRateKind, PausedFlags, Selector, VaultType};

// =============================================================================
// Governance
// =============================================================================

#[event]
pub struct NewOwnerProposed {
    pub owner: Pubkey,
    pub old_proposed_owner: Pubkey,
    pub new_proposed_owner: Pubkey,
}

#[event]
pub struct NewOwnerAccepted {
    pub old_owner: Pubkey,
    pub new_owner: Pubkey,
}

#[event]
pub struct ExplicitAccessSet {
    pub target: Pubkey,
    pub caller: Pubkey,
    pub selector: Selector,
    pub allowed: bool,
}

// =============================================================================
// Investment Flows
// =============================================================================

#[event]
pub struct Invested {
    pub user: Pubkey,
    pub from_amount: u64,
    pub from_token: Pubkey,
    pub investment_amount: u64,
    pub investment_mint: Pubkey,
}

#[event]
pub struct Exited {
    pub user: Pubkey,
    pub investment_amount: u64,
    pub to_token: Pubkey,
    pub to_amount: u64,
    pub receiver: Pubkey,
    pub investment_mint: Pubkey,
}

// =============================================================================
// Repricing Vault
// =============================================================================

#[event]
pub struct PendingReservesAdded {
    pub vault: Pubkey,
    pub amount: u64,
}

#[event]
pub struct ReservesCheckpoint {
    pub vault: Pubkey,
    pub vested_reserves: u64,
    pub pending_reserves: u64,
}

#[event]
pub struct VestedReservesAdded {
    pub vault: Pubkey,
    pub amount: u64,
}

#[event]
pub struct VestedReservesRemoved {
    pub vault: Pubkey,
    pub amount: u64,
}

#[event]
pub struct ReservesVestingDurationSet {
    pub vault: Pubkey,
    pub old_duration: i64,
    pub new_duration: i64,
}

#[event]
pub struct PerformanceFeeSet {
    pub vault: Pubkey,
    pub old_rate: FeeRate,
    pub new_rate: FeeRate,
}

#[event]
pub struct TokenRecovered {
    /// Component whose token account was swept
    pub from: Pubkey,
    pub token: Pubkey,
    pub to: Pubkey,
    pub amount: u64,
}

// =============================================================================
// Earn Accounts & Harvesting
// =============================================================================

#[event]
pub struct SetGlpInvestmentsPaused {
    pub earn_account: Pubkey,
    pub paused: bool,
}

#[event]
pub struct StakedPositionTransferred {
    pub earn_account: Pubkey,
    pub receiver: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RewardsHarvested {
    pub manager: Pubkey,
    pub earn_account: Pubkey,
    pub vault_type: VaultType,
    pub wrapped_native: u64,
    pub es_claimed: u64,
    pub o_gmx_fee: u64,
    pub o_gmx_to_aggregator: u64,
}

#[event]
pub struct EsRewardsRestaked {
    pub manager: Pubkey,
    pub earn_account: Pubkey,
    pub vested_restaked: u64,
    pub es_vested: u64,
    pub es_restaked: u64,
}

// =============================================================================
// Manager & Investment Token Configuration
// =============================================================================

#[event]
pub struct PausedSet {
    pub manager: Pubkey,
    pub paused: PausedFlags,
}

#[event]
pub struct PauserSet {
    pub manager: Pubkey,
    pub account: Pubkey,
    pub can_pause: bool,
}

#[event]
pub struct FeeRateSet {
    pub manager: Pubkey,
    pub kind: FeeRateKind,
    pub old_rate: FeeRate,
    pub new_rate: FeeRate,
}

#[event]
pub struct FeeCollectorSet {
    pub manager: Pubkey,
    pub old_collector: Pubkey,
    pub new_collector: Pubkey,
}

#[event]
pub struct EarnAccountsSet {
    pub manager: Pubkey,
    pub primary_earn_account: Pubkey,
    pub secondary_earn_account: Pubkey,
}

#[event]
pub struct RewardsAggregatorsSet {
    pub manager: Pubkey,
    pub gmx_aggregator: Pubkey,
    pub glp_aggregator: Pubkey,
}

#[event]
pub struct MinterSet {
    pub investment_token: Pubkey,
    pub minter: Pubkey,
    pub can_mint: bool,
}

#[event]
pub struct InvestmentManagerSet {
    pub investment_token: Pubkey,
    pub old_manager: Pubkey,
    pub new_manager: Pubkey,
}

// =============================================================================
// Rewards Aggregator
// =============================================================================

#[event]
pub struct ManagersSet {
    pub aggregator: Pubkey,
    pub gmx_manager: Pubkey,
    pub glp_manager: Pubkey,
}

#[event]
pub struct PerformanceFeeCollectorSet {
    pub aggregator: Pubkey,
    pub old_collector: Pubkey,
    pub new_collector: Pubkey,
}

#[event]
pub struct PerformanceFeesCollected {
    pub aggregator: Pubkey,
    pub token: Pubkey,
    pub amount: u64,
}

/// One compounding cycle of an aggregator into its vault
#[event]
pub struct ReservesCompounded {
    pub aggregator: Pubkey,
    pub vault_type: VaultType,
    pub swap_bought: u64,
    pub invested: u64,
    pub total_available: u64,
    pub performance_fee: u64,
    pub reserves_added: u64,
}
