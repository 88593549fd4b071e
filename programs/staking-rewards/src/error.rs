use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    // Pool State Errors (6000-6009)
    #[msg("Staking pool is paused")]
    PoolPaused,

    #[msg("Operation not supported by this pool kind")]
    UnsupportedPoolKind,

    #[msg("Basket is full")]
    BasketFull,

    #[msg("Pool is already in the requested pause state")]
    PauseStateUnchanged,

    // Amount Errors (6010-6019)
    #[msg("Invalid amount: must be greater than zero")]
    InvalidAmount,

    #[msg("Amount exceeds staked balance")]
    AmountExceedsStaked,

    #[msg("Insufficient output amount")]
    InsufficientOutput,

    #[msg("Insufficient pool balance for redemption")]
    InsufficientPoolAmount,

    #[msg("Max vestable amount exceeded")]
    MaxVestableAmountExceeded,

    #[msg("Cooldown duration not yet passed")]
    CooldownNotPassed,

    // Authorization Errors (6020-6029)
    #[msg("Unauthorized: admin only")]
    Unauthorized,

    #[msg("Invalid authority")]
    InvalidAuthority,

    // Math Errors (6030-6039)
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,

    // Account Validation Errors (6040-6049)
    #[msg("Token is not accepted by this pool")]
    InvalidToken,

    #[msg("Invalid reward mint")]
    InvalidRewardMint,

    #[msg("Invalid token account owner")]
    InvalidTokenAccountOwner,

    #[msg("Position does not belong to this pool")]
    InvalidPosition,

    #[msg("Invalid fee configuration")]
    InvalidFeeConfig,
}
