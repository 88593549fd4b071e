// =============================================================================
// Yield Vault Error Codes
// =============================================================================
// Input errors are raised before any state change or CPI. Policy errors come
// next. Failures returned by the staking program, the DEX or the token program
// are never translated and reach the caller as they were raised.
// =============================================================================

use anchor_lang::prelude::*;

#[error_code]
pub enum YieldVaultError {
    // =========================================================================
    // Input Errors (6000-6009)
    // =========================================================================

    /// An amount that must be positive was zero
    #[msg("Expected non-zero")]
    ExpectedNonZero,

    /// Token is not accepted by this manager, vault or aggregator
    #[msg("Invalid token")]
    InvalidToken,

    /// Address must not be the default key
    #[msg("Invalid address")]
    InvalidAddress,

    #[msg("Invalid amount")]
    InvalidAmount,

    /// Parameter out of range (slippage, percentage, vault type)
    #[msg("Invalid parameter")]
    InvalidParam,

    // =========================================================================
    // Policy Errors (6010-6019)
    // =========================================================================

    #[msg("Investments or exits are paused")]
    IsPaused,

    /// Caller is neither the owner nor explicitly allowed
    #[msg("Invalid access")]
    InvalidAccess,

    /// The secondary earn account could not promote its stake in time
    #[msg("GLP investments paused")]
    GlpInvestmentsPaused,

    #[msg("Quote deadline expired")]
    DeadlineExpired,

    /// The full vesting duration has not elapsed since the last checkpoint
    #[msg("Cannot checkpoint reserves yet")]
    CannotCheckpointReserves,

    #[msg("Unsupported operation")]
    Unsupported,

    // =========================================================================
    // Balance Errors (6020-6029)
    // =========================================================================

    /// Output below the caller's minimum
    #[msg("Slippage exceeded")]
    Slippage,

    #[msg("Insufficient balance")]
    InsufficientBalance,

    // =========================================================================
    // Math Errors (6030-6039)
    // =========================================================================

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,

    // =========================================================================
    // Configuration Errors (6040-6049)
    // =========================================================================

    #[msg("Fee rate numerator exceeds denominator or denominator is zero")]
    InvalidFeeRate,

    #[msg("Table is full")]
    TooManyEntries,

    /// Account does not match the one configured on the component
    #[msg("Account mismatch")]
    AccountMismatch,
}
