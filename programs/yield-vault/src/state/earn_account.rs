use anchor_lang::prelude::*;
use staking_rewards::state::{StakePosition, StakingPool};

use crate::error::YieldVaultError;
use crate::state::FeeRate;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum EarnAccountKind {
    /// Freely tradable stake, the source of every exit
    Primary,
    /// Receives fresh basket deposits until they can be promoted
    Secondary,
}

/// Owner of staked positions in the upstream staking program
/// PDA: ["earn_account", seed_key, [kind]]
///
/// Staked balances and cooldowns are always read from the upstream
/// positions, never cached here.
#[account]
#[derive(InitSpace)]
pub struct EarnAccount {
    pub governance: Pubkey,

    /// Caller-chosen key used in the PDA seeds
    pub seed_key: Pubkey,

    pub kind: EarnAccountKind,

    /// Set when a promotion to the primary account hit the upstream cooldown
    pub glp_investments_paused: bool,

    pub bump: u8,
}

/// Rewards claimable from one upstream position
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EarnRewards {
    pub wrapped_native: u64,
    pub es_gmx: u64,
}

/// Outcome of a transfer-or-pause attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferOrPause {
    /// Still inside the cooldown; `newly_paused` is true on the false -> true edge
    Paused { newly_paused: bool },
    /// Cooldown passed; `newly_unpaused` is true on the true -> false edge
    Transfer { newly_unpaused: bool },
}

impl EarnAccount {
    pub fn kind_seed(&self) -> [u8; 1] {
        [self.kind as u8]
    }

    /// Earliest time the position's basket stake may move
    pub fn cooldown_expiry(pool: &StakingPool, position: &StakePosition) -> i64 {
        position.cooldown_expiry(pool.cooldown_duration)
    }

    /// Returns true if the flag changed
    pub fn set_glp_investments_paused(&mut self, paused: bool) -> bool {
        let changed = self.glp_investments_paused != paused;
        self.glp_investments_paused = paused;
        changed
    }

    /// Decide between pausing and transferring from the upstream cooldown,
    /// updating the pause flag accordingly.
    pub fn transfer_or_pause(&mut self, cooldown_expiry: i64, now: i64) -> TransferOrPause {
        if now < cooldown_expiry {
            TransferOrPause::Paused {
                newly_paused: self.set_glp_investments_paused(true),
            }
        } else {
            TransferOrPause::Transfer {
                newly_unpaused: self.set_glp_investments_paused(false),
            }
        }
    }

    pub fn harvestable_rewards(
        pool: &StakingPool,
        position: &StakePosition,
        now: i64,
    ) -> Result<EarnRewards> {
        let (wrapped_native, es_gmx) = pool.pending_rewards(position, now)?;
        Ok(EarnRewards {
            wrapped_native,
            es_gmx,
        })
    }

    /// Per-second (native, es) emission attributable to a position
    pub fn reward_rates(pool: &StakingPool, position: &StakePosition) -> Result<EarnRewards> {
        if pool.total_staked == 0 {
            return Ok(EarnRewards::default());
        }
        let share = |rate: u64| -> Result<u64> {
            let value = (rate as u128)
                .checked_mul(position.reward_weight() as u128)
                .ok_or(YieldVaultError::MathOverflow)?
                / pool.total_staked as u128;
            u64::try_from(value).map_err(|_| error!(YieldVaultError::MathOverflow))
        };
        Ok(EarnRewards {
            wrapped_native: share(pool.native_per_second)?,
            es_gmx: share(pool.es_per_second)?,
        })
    }
}

/// Split claimed es rewards into (to_vest, to_restake).
/// At most `es_claimed * vesting_rate` is vested, capped by what the
/// upstream vester will accept.
pub fn split_es_rewards(
    es_claimed: u64,
    vesting_rate: &FeeRate,
    max_vestable: u64,
) -> Result<(u64, u64)> {
    let to_vest = vesting_rate.fee_of(es_claimed)?.min(max_vestable);
    Ok((to_vest, es_claimed - to_vest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use staking_rewards::state::{PoolKind, VestingState};

    fn earn_account() -> EarnAccount {
        EarnAccount {
            governance: Pubkey::new_unique(),
            seed_key: Pubkey::new_unique(),
            kind: EarnAccountKind::Secondary,
            glp_investments_paused: false,
            bump: 255,
        }
    }

    fn basket_pool() -> StakingPool {
        StakingPool {
            admin: Pubkey::new_unique(),
            pool_id: Pubkey::new_unique(),
            kind: PoolKind::Basket,
            staked_mint: Pubkey::default(),
            es_mint: Pubkey::new_unique(),
            native_reward_mint: Pubkey::new_unique(),
            reward_vault: Pubkey::new_unique(),
            vester_reserve: Pubkey::default(),
            native_per_second: 1_000,
            es_per_second: 400,
            native_reward_per_token: 0,
            es_reward_per_token: 0,
            last_update_time: 0,
            total_staked: 4_000,
            cooldown_duration: 900,
            mint_burn_fee_bps: 25,
            tax_bps: 50,
            basket: vec![],
            is_paused: false,
            bump: 255,
        }
    }

    fn position(staked: u64, last_stake_time: i64) -> StakePosition {
        StakePosition {
            pool: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            staked_amount: staked,
            staked_es_amount: 0,
            native_reward_debt: 0,
            es_reward_debt: 0,
            native_rewards_owed: 0,
            es_rewards_owed: 0,
            last_stake_time,
            vesting: VestingState::default(),
            bump: 255,
        }
    }

    #[test]
    fn test_transfer_or_pause_emits_only_on_edges() {
        let mut account = earn_account();
        let pool = basket_pool();
        let expiry = EarnAccount::cooldown_expiry(&pool, &position(10, 1_000));
        assert_eq!(expiry, 1_900);

        assert_eq!(
            account.transfer_or_pause(expiry, 1_000),
            TransferOrPause::Paused { newly_paused: true }
        );
        assert!(account.glp_investments_paused);
        assert_eq!(
            account.transfer_or_pause(expiry, 1_899),
            TransferOrPause::Paused { newly_paused: false }
        );

        assert_eq!(
            account.transfer_or_pause(expiry, 1_900),
            TransferOrPause::Transfer { newly_unpaused: true }
        );
        assert!(!account.glp_investments_paused);
        assert_eq!(
            account.transfer_or_pause(expiry, 5_000),
            TransferOrPause::Transfer { newly_unpaused: false }
        );
    }

    #[test]
    fn test_es_split_conserves_and_respects_cap() {
        let half = FeeRate::bps(5_000).unwrap();
        assert_eq!(split_es_rewards(1_001, &half, u64::MAX).unwrap(), (500, 501));
        assert_eq!(split_es_rewards(1_000, &half, 120).unwrap(), (120, 880));
        assert_eq!(split_es_rewards(1_000, &FeeRate::ZERO, 1_000).unwrap(), (0, 1_000));

        for claimed in [0u64, 1, 7, 86_400, 123_456_789] {
            let (to_vest, to_restake) = split_es_rewards(claimed, &half, 1_000).unwrap();
            assert_eq!(to_vest + to_restake, claimed);
        }
    }

    #[test]
    fn test_harvestable_and_rates_follow_pool_share() {
        let pool = basket_pool();
        // A quarter of the pool
        let p = position(1_000, 0);

        let rates = EarnAccount::reward_rates(&pool, &p).unwrap();
        assert_eq!(rates.wrapped_native, 250);
        assert_eq!(rates.es_gmx, 100);

        let pending = EarnAccount::harvestable_rewards(&pool, &p, 86_400).unwrap();
        assert_eq!(pending.wrapped_native, 250 * 86_400);
        assert_eq!(pending.es_gmx, 100 * 86_400);
    }
}
