use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::error::YieldVaultError;
use crate::state::{FeeRate, VaultType};

/// Compounds harvested rewards into one repricing vault
/// PDA: ["rewards_aggregator", vault]
#[account]
#[derive(InitSpace)]
pub struct RewardsAggregator {
    pub governance: Pubkey,
    pub vault_type: VaultType,

    /// RepricingVault receiving the compounded reserves
    pub vault: Pubkey,

    pub gmx_manager: Pubkey,
    pub glp_manager: Pubkey,

    pub native_mint: Pubkey,
    pub o_gmx_mint: Pubkey,
    pub o_glp_mint: Pubkey,

    pub performance_fee_collector: Pubkey,

    /// DEX program trusted for reward swaps
    pub dex_program: Pubkey,

    pub bump: u8,
}

/// How one harvest cycle's available reserve tokens are divided
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompoundSplit {
    /// Portion released this cycle (fee included)
    pub to_reserves: u64,
    pub performance_fee: u64,
    pub reserves_added: u64,
    /// Left on the aggregator for the next cycle
    pub carried_over: u64,
}

impl RewardsAggregator {
    /// [native, oGMX, oGLP]
    pub fn reward_tokens_list(&self) -> [Pubkey; 3] {
        [self.native_mint, self.o_gmx_mint, self.o_glp_mint]
    }

    pub fn is_reward_token(&self, mint: &Pubkey) -> bool {
        self.reward_tokens_list().contains(mint)
    }

    /// Token the vault holds as reserves
    pub fn reserve_mint(&self) -> Pubkey {
        match self.vault_type {
            VaultType::Gmx => self.o_gmx_mint,
            VaultType::Glp => self.o_glp_mint,
        }
    }

    /// Manager whose investment token is the vault's reserve token
    pub fn reserve_manager(&self) -> Pubkey {
        match self.vault_type {
            VaultType::Gmx => self.gmx_manager,
            VaultType::Glp => self.glp_manager,
        }
    }

    pub fn set_managers(
        &mut self,
        vault_type: VaultType,
        gmx_manager: Pubkey,
        glp_manager: Pubkey,
    ) -> Result<()> {
        require!(vault_type == self.vault_type, YieldVaultError::InvalidParam);
        require!(
            gmx_manager != Pubkey::default() && glp_manager != Pubkey::default(),
            YieldVaultError::InvalidAddress
        );
        self.gmx_manager = gmx_manager;
        self.glp_manager = glp_manager;
        Ok(())
    }

    /// Returns the previous collector
    pub fn set_performance_fee_collector(&mut self, collector: Pubkey) -> Result<Pubkey> {
        require!(collector != Pubkey::default(), YieldVaultError::InvalidAddress);
        Ok(std::mem::replace(&mut self.performance_fee_collector, collector))
    }

    /// Release `add_to_reserve_amount_pct` (bps) of what is available,
    /// less the vault's performance fee. The rest stays for the next cycle.
    pub fn compound_split(
        total_available: u64,
        add_to_reserve_amount_pct: u16,
        performance_fee: &FeeRate,
    ) -> Result<CompoundSplit> {
        require!(
            add_to_reserve_amount_pct as u64 <= BPS_DENOMINATOR,
            YieldVaultError::InvalidParam
        );

        let to_reserves = FeeRate::bps(add_to_reserve_amount_pct as u64)?.fee_of(total_available)?;
        let (performance_fee, reserves_added) = performance_fee.split(to_reserves)?;

        Ok(CompoundSplit {
            to_reserves,
            performance_fee,
            reserves_added,
            carried_over: total_available - to_reserves,
        })
    }

    /// Per-second rates net of the performance fee when asked
    pub fn net_of_performance_fee(
        rate: u64,
        performance_fee: &FeeRate,
        subtract_fees: bool,
    ) -> Result<u64> {
        if !subtract_fees {
            return Ok(rate);
        }
        Ok(performance_fee.split(rate)?.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregator(vault_type: VaultType) -> RewardsAggregator {
        RewardsAggregator {
            governance: Pubkey::new_unique(),
            vault_type,
            vault: Pubkey::new_unique(),
            gmx_manager: Pubkey::new_unique(),
            glp_manager: Pubkey::new_unique(),
            native_mint: Pubkey::new_unique(),
            o_gmx_mint: Pubkey::new_unique(),
            o_glp_mint: Pubkey::new_unique(),
            performance_fee_collector: Pubkey::new_unique(),
            dex_program: Pubkey::new_unique(),
            bump: 255,
        }
    }

    #[test]
    fn test_compound_split_smooths_and_takes_fee() {
        let fee = FeeRate::bps(500).unwrap();
        let split = RewardsAggregator::compound_split(1_000_000, 1_000, &fee).unwrap();

        assert_eq!(split.to_reserves, 100_000);
        assert_eq!(split.performance_fee, 5_000);
        assert_eq!(split.reserves_added, 95_000);
        assert_eq!(split.carried_over, 900_000);
        assert_eq!(
            split.performance_fee + split.reserves_added + split.carried_over,
            1_000_000
        );
    }

    #[test]
    fn test_compound_pct_bounds() {
        let fee = FeeRate::ZERO;
        let all = RewardsAggregator::compound_split(777, 10_000, &fee).unwrap();
        assert_eq!(all.reserves_added, 777);
        assert_eq!(all.carried_over, 0);

        let none = RewardsAggregator::compound_split(777, 0, &fee).unwrap();
        assert_eq!(none.to_reserves, 0);

        let err = RewardsAggregator::compound_split(777, 10_001, &fee).unwrap_err();
        assert_eq!(err, error!(YieldVaultError::InvalidParam));
    }

    #[test]
    fn test_reward_tokens_and_managers() {
        let mut agg = aggregator(VaultType::Glp);
        assert!(agg.is_reward_token(&agg.o_gmx_mint));
        assert!(!agg.is_reward_token(&Pubkey::new_unique()));
        assert_eq!(agg.reserve_mint(), agg.o_glp_mint);

        let gmx = Pubkey::new_unique();
        let glp = Pubkey::new_unique();
        assert!(agg.set_managers(VaultType::Gmx, gmx, glp).is_err());
        agg.set_managers(VaultType::Glp, gmx, glp).unwrap();
        assert_eq!(agg.reserve_manager(), glp);
    }

    #[test]
    fn test_projected_rates_net_of_fee() {
        let fee = FeeRate::bps(1_000).unwrap();
        assert_eq!(RewardsAggregator::net_of_performance_fee(1_000, &fee, false).unwrap(), 1_000);
        assert_eq!(RewardsAggregator::net_of_performance_fee(1_000, &fee, true).unwrap(), 900);
    }
}
