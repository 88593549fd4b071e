use anchor_lang::prelude::*;
use staking_rewards::state::StakingPool;

use crate::constants::{BPS_DENOMINATOR, MAX_ACCEPTED_TOKENS, MAX_PAUSERS, MAX_SLIPPAGE_BPS};
use crate::error::YieldVaultError;
use crate::state::FeeRate;

// =============================================================================
// Policy types
// =============================================================================

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum AssetClass {
    /// Single staked token, invested 1:1
    Gmx,
    /// Basket deposit priced by the upstream fee curve
    Glp,
}

/// Which repricing vault a reward stream compounds into
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum VaultType {
    Gmx,
    Glp,
}

impl VaultType {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Manager configuration that differs between asset classes
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct AssetPolicy {
    pub asset_class: AssetClass,

    /// Upstream pool investments are staked into
    pub upstream_pool: Pubkey,

    /// Tokens accepted to invest or exit, fixed at initialisation
    #[max_len(6)]
    pub accepted_tokens: Vec<Pubkey>,

    /// Fresh deposits land in the secondary earn account
    pub invests_to_secondary: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct PausedFlags {
    pub glp_investments_paused: bool,
    pub gmx_investments_paused: bool,
    pub glp_exits_paused: bool,
    pub gmx_exits_paused: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeeRateKind {
    Sell,
    OGmxRewards,
    EsGmxVesting,
}

// =============================================================================
// Quotes
// =============================================================================

/// Advisory quote to invest `from_amount` of `from_token`.
/// Redeeming calls re-derive it from live state; only `from_token`,
/// `from_amount`, `max_slippage_bps` and `deadline` are taken as given.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InvestQuote {
    pub from_token: Pubkey,
    pub from_amount: u64,
    pub max_slippage_bps: u16,
    pub deadline: i64,
    pub expected_investment_amount: u64,
    pub min_investment_amount: u64,
    pub invest_fee_bps: Vec<u16>,
}

/// Advisory quote to exit `investment_token_amount` into `to_token`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExitQuote {
    pub investment_token_amount: u64,
    pub to_token: Pubkey,
    pub max_slippage_bps: u16,
    pub deadline: i64,
    pub expected_to_token_amount: u64,
    pub min_to_token_amount: u64,
    pub exit_fee_bps: Vec<u16>,
}

/// expected * (10000 - slippage) / 10000
pub fn apply_slippage(expected: u64, max_slippage_bps: u16) -> Result<u64> {
    require!(max_slippage_bps <= MAX_SLIPPAGE_BPS, YieldVaultError::InvalidParam);
    let min = (expected as u128)
        .checked_mul((BPS_DENOMINATOR - max_slippage_bps as u64) as u128)
        .ok_or(YieldVaultError::MathOverflow)?
        / BPS_DENOMINATOR as u128;
    Ok(min as u64)
}

/// A deadline of 0 means none
pub fn check_deadline(deadline: i64, now: i64) -> Result<()> {
    require!(deadline == 0 || now <= deadline, YieldVaultError::DeadlineExpired);
    Ok(())
}

// =============================================================================
// Manager account
// =============================================================================

/// One Manager per asset class, parameterised by its AssetPolicy
/// PDA: ["manager", investment_mint]
#[account]
#[derive(InitSpace)]
pub struct Manager {
    pub governance: Pubkey,

    /// Mint of the investment token this manager issues
    pub investment_mint: Pubkey,

    /// InvestmentToken account of that mint
    pub investment_token: Pubkey,

    pub policy: AssetPolicy,

    /// Upstream pools rewards are harvested from, indexed by VaultType
    pub staking_pools: [Pubkey; 2],

    /// InvestmentToken minted for harvested escrowed rewards (oGMX)
    pub o_gmx_token: Pubkey,

    pub primary_earn_account: Pubkey,

    /// Default key when absent
    pub secondary_earn_account: Pubkey,

    /// Reward destinations, indexed by VaultType
    pub rewards_aggregators: [Pubkey; 2],

    pub fee_collector: Pubkey,

    /// Taken in investment tokens on every exit
    pub sell_fee_rate: FeeRate,

    /// Share of oGMX minted for es rewards that goes to the fee collector
    pub o_gmx_rewards_fee_rate: FeeRate,

    /// Share of claimed es rewards deposited into the upstream vester
    pub es_gmx_vesting_rate: FeeRate,

    #[max_len(8)]
    pub pausers: Vec<Pubkey>,

    pub paused: PausedFlags,

    pub bump: u8,
}

impl Manager {
    pub fn is_accepted(&self, token: &Pubkey) -> bool {
        self.policy.accepted_tokens.contains(token)
    }

    /// Earn account fresh investments are staked through
    pub fn invest_target(&self) -> Pubkey {
        if self.policy.invests_to_secondary {
            self.secondary_earn_account
        } else {
            self.primary_earn_account
        }
    }

    pub fn is_earn_account(&self, account: &Pubkey) -> bool {
        *account != Pubkey::default()
            && (*account == self.primary_earn_account || *account == self.secondary_earn_account)
    }

    pub fn staking_pool_for(&self, vault_type: VaultType) -> Pubkey {
        self.staking_pools[vault_type.index()]
    }

    pub fn rewards_aggregator_for(&self, vault_type: VaultType) -> Pubkey {
        self.rewards_aggregators[vault_type.index()]
    }

    // =========================================================================
    // Quotes
    // =========================================================================

    pub fn invest_quote(
        &self,
        pool: &StakingPool,
        from_token: Pubkey,
        from_amount: u64,
        max_slippage_bps: u16,
        deadline: i64,
    ) -> Result<InvestQuote> {
        require!(from_amount > 0, YieldVaultError::ExpectedNonZero);
        require!(self.is_accepted(&from_token), YieldVaultError::InvalidToken);
        require!(max_slippage_bps <= MAX_SLIPPAGE_BPS, YieldVaultError::InvalidParam);

        let (expected, upstream_fee_bps) = pool.mint_quote(&from_token, from_amount)?;

        Ok(InvestQuote {
            from_token,
            from_amount,
            max_slippage_bps,
            deadline,
            expected_investment_amount: expected,
            min_investment_amount: apply_slippage(expected, max_slippage_bps)?,
            invest_fee_bps: vec![upstream_fee_bps],
        })
    }

    pub fn exit_quote(
        &self,
        pool: &StakingPool,
        investment_token_amount: u64,
        to_token: Pubkey,
        max_slippage_bps: u16,
        deadline: i64,
    ) -> Result<ExitQuote> {
        require!(investment_token_amount > 0, YieldVaultError::ExpectedNonZero);
        require!(self.is_accepted(&to_token), YieldVaultError::InvalidToken);
        require!(max_slippage_bps <= MAX_SLIPPAGE_BPS, YieldVaultError::InvalidParam);

        let (_, rest) = self.sell_fee_rate.split(investment_token_amount)?;
        let (expected, upstream_fee_bps) = if rest > 0 {
            pool.redeem_quote(&to_token, rest)?
        } else {
            (0, 0)
        };

        Ok(ExitQuote {
            investment_token_amount,
            to_token,
            max_slippage_bps,
            deadline,
            expected_to_token_amount: expected,
            min_to_token_amount: apply_slippage(expected, max_slippage_bps)?,
            exit_fee_bps: vec![self.sell_fee_rate.as_bps(), upstream_fee_bps],
        })
    }

    /// Re-derive an invest quote from live state when it is redeemed.
    ///
    /// Input errors come first, then pause and deadline. The caller's
    /// `min_investment_amount` is a floor the live quote must still meet,
    /// and the returned minimum is never below it.
    pub fn revalidate_invest_quote(
        &self,
        pool: &StakingPool,
        quote: &InvestQuote,
        from_mint: &Pubkey,
        secondary_glp_paused: bool,
        now: i64,
    ) -> Result<InvestQuote> {
        require_keys_eq!(quote.from_token, *from_mint, YieldVaultError::InvalidToken);
        let mut live = self.invest_quote(
            pool,
            quote.from_token,
            quote.from_amount,
            quote.max_slippage_bps,
            quote.deadline,
        )?;

        self.require_invest_not_paused(secondary_glp_paused)?;
        check_deadline(quote.deadline, now)?;

        require!(
            live.expected_investment_amount >= quote.min_investment_amount,
            YieldVaultError::Slippage
        );
        live.min_investment_amount = live.min_investment_amount.max(quote.min_investment_amount);
        Ok(live)
    }

    /// Exit counterpart of `revalidate_invest_quote`
    pub fn revalidate_exit_quote(
        &self,
        pool: &StakingPool,
        quote: &ExitQuote,
        to_mint: &Pubkey,
        now: i64,
    ) -> Result<ExitQuote> {
        require_keys_eq!(quote.to_token, *to_mint, YieldVaultError::InvalidToken);
        let mut live = self.exit_quote(
            pool,
            quote.investment_token_amount,
            quote.to_token,
            quote.max_slippage_bps,
            quote.deadline,
        )?;

        self.require_exit_not_paused()?;
        check_deadline(quote.deadline, now)?;

        require!(
            live.expected_to_token_amount >= quote.min_to_token_amount,
            YieldVaultError::Slippage
        );
        live.min_to_token_amount = live.min_to_token_amount.max(quote.min_to_token_amount);
        Ok(live)
    }

    // =========================================================================
    // Pause state
    // =========================================================================

    /// Stored flags with the secondary earn account's GLP pause folded in
    pub fn effective_paused(&self, secondary_glp_paused: bool) -> PausedFlags {
        PausedFlags {
            glp_investments_paused: self.paused.glp_investments_paused || secondary_glp_paused,
            ..self.paused
        }
    }

    pub fn require_invest_not_paused(&self, secondary_glp_paused: bool) -> Result<()> {
        let flags = self.effective_paused(secondary_glp_paused);
        let paused = match self.policy.asset_class {
            AssetClass::Gmx => flags.gmx_investments_paused,
            AssetClass::Glp => flags.glp_investments_paused,
        };
        require!(!paused, YieldVaultError::IsPaused);
        Ok(())
    }

    pub fn require_exit_not_paused(&self) -> Result<()> {
        let paused = match self.policy.asset_class {
            AssetClass::Gmx => self.paused.gmx_exits_paused,
            AssetClass::Glp => self.paused.glp_exits_paused,
        };
        require!(!paused, YieldVaultError::IsPaused);
        Ok(())
    }

    pub fn is_pauser(&self, account: &Pubkey) -> bool {
        self.pausers.contains(account)
    }

    pub fn set_pauser(&mut self, account: Pubkey, can_pause: bool) -> Result<()> {
        require!(account != Pubkey::default(), YieldVaultError::InvalidAddress);
        if can_pause {
            if !self.is_pauser(&account) {
                require!(self.pausers.len() < MAX_PAUSERS, YieldVaultError::TooManyEntries);
                self.pausers.push(account);
            }
        } else {
            self.pausers.retain(|p| *p != account);
        }
        Ok(())
    }

    pub fn set_paused(&mut self, caller: &Pubkey, flags: PausedFlags) -> Result<()> {
        require!(self.is_pauser(caller), YieldVaultError::InvalidAccess);
        self.paused = flags;
        Ok(())
    }

    // =========================================================================
    // Harvest views
    // =========================================================================

    /// (native, oGMX net of the manager fee) for claimable rewards
    pub fn net_harvestable(&self, wrapped_native: u64, es_gmx: u64) -> Result<(u64, u64)> {
        let (_, o_gmx) = self.o_gmx_rewards_fee_rate.split(es_gmx)?;
        Ok((wrapped_native, o_gmx))
    }
}

/// Accepted set for an upstream pool: the staked mint of a token pool, or
/// every basket constituent
pub fn accepted_tokens_for(pool: &StakingPool) -> Result<Vec<Pubkey>> {
    let tokens: Vec<Pubkey> = match pool.kind {
        staking_rewards::state::PoolKind::Token => vec![pool.staked_mint],
        staking_rewards::state::PoolKind::Basket => pool.basket.iter().map(|t| t.mint).collect(),
    };
    require!(
        !tokens.is_empty() && tokens.len() <= MAX_ACCEPTED_TOKENS,
        YieldVaultError::InvalidParam
    );
    require!(
        tokens.iter().all(|t| *t != Pubkey::default()),
        YieldVaultError::InvalidToken
    );
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use staking_rewards::constants::PRICE_PRECISION;
    use staking_rewards::state::PoolKind;

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
            native_per_second: 0,
            es_per_second: 0,
            native_reward_per_token: 0,
            es_reward_per_token: 0,
            last_update_time: 0,
            total_staked: 0,
            cooldown_duration: 900,
            mint_burn_fee_bps: 25,
            tax_bps: 50,
            basket: vec![],
            is_paused: false,
            bump: 255,
        }
    }

    fn manager(policy: AssetPolicy) -> Manager {
        Manager {
            governance: Pubkey::new_unique(),
            investment_mint: Pubkey::new_unique(),
            investment_token: Pubkey::new_unique(),
            policy,
            staking_pools: [Pubkey::new_unique(), Pubkey::new_unique()],
            o_gmx_token: Pubkey::new_unique(),
            primary_earn_account: Pubkey::new_unique(),
            secondary_earn_account: Pubkey::new_unique(),
            rewards_aggregators: [Pubkey::new_unique(), Pubkey::new_unique()],
            fee_collector: Pubkey::new_unique(),
            sell_fee_rate: FeeRate::ZERO,
            o_gmx_rewards_fee_rate: FeeRate::ZERO,
            es_gmx_vesting_rate: FeeRate::ZERO,
            pausers: vec![],
            paused: PausedFlags::default(),
            bump: 255,
        }
    }

    fn glp_setup() -> (Manager, StakingPool, Pubkey) {
        let bnb = Pubkey::new_unique();
        let mut pool = basket_pool();
        pool.add_basket_token(bnb, 300 * PRICE_PRECISION, 1).unwrap();

        let m = manager(AssetPolicy {
            asset_class: AssetClass::Glp,
            upstream_pool: Pubkey::new_unique(),
            accepted_tokens: accepted_tokens_for(&pool).unwrap(),
            invests_to_secondary: true,
        });
        (m, pool, bnb)
    }

    fn gmx_setup() -> (Manager, StakingPool) {
        let pool = StakingPool {
            kind: PoolKind::Token,
            staked_mint: Pubkey::new_unique(),
            ..basket_pool()
        };
        let m = manager(AssetPolicy {
            asset_class: AssetClass::Gmx,
            upstream_pool: Pubkey::new_unique(),
            accepted_tokens: accepted_tokens_for(&pool).unwrap(),
            invests_to_secondary: false,
        });
        (m, pool)
    }

    #[test]
    fn test_glp_buy_quote_matches_fee_curve() {
        let (m, pool, bnb) = glp_setup();

        // 100 BNB (6 decimals) at 300 with a 25 bps fee
        let quote = m.invest_quote(&pool, bnb, 100_000_000, 100, 0).unwrap();
        assert_eq!(quote.expected_investment_amount, 29_925_000_000);
        assert_eq!(quote.invest_fee_bps, vec![25]);
        assert_eq!(
            quote.min_investment_amount,
            apply_slippage(quote.expected_investment_amount, 100).unwrap()
        );
        assert_eq!(quote.min_investment_amount, 29_625_750_000);
    }

    #[test]
    fn test_quote_input_validation() {
        let (m, pool, bnb) = glp_setup();
        let err = m.invest_quote(&pool, bnb, 0, 0, 0).unwrap_err();
        assert_eq!(err, error!(YieldVaultError::ExpectedNonZero));
        let err = m.invest_quote(&pool, Pubkey::new_unique(), 1, 0, 0).unwrap_err();
        assert_eq!(err, error!(YieldVaultError::InvalidToken));
        let err = m.invest_quote(&pool, bnb, 1, 10_001, 0).unwrap_err();
        assert_eq!(err, error!(YieldVaultError::InvalidParam));
    }

    #[test]
    fn test_slippage_formula_is_exact() {
        for expected in [0u64, 1, 3, 9_999, 10_000, 123_456_789, u64::MAX] {
            for bps in [0u16, 1, 50, 3_333, 9_999, 10_000] {
                let min = apply_slippage(expected, bps).unwrap() as u128;
                assert_eq!(min, expected as u128 * (10_000 - bps as u128) / 10_000);
            }
        }
    }

    #[test]
    fn test_gmx_exit_quote_takes_sell_fee_first() {
        let (mut m, pool) = gmx_setup();
        m.sell_fee_rate = FeeRate::bps(100).unwrap();
        let gmx = pool.staked_mint;

        let quote = m.exit_quote(&pool, 10_000, gmx, 0, 0).unwrap();
        assert_eq!(quote.expected_to_token_amount, 9_900);
        assert_eq!(quote.exit_fee_bps, vec![100, 0]);

        // All of it taken as fee: nothing to unstake
        m.sell_fee_rate = FeeRate::new(1, 1).unwrap();
        let quote = m.exit_quote(&pool, 10_000, gmx, 0, 0).unwrap();
        assert_eq!(quote.expected_to_token_amount, 0);
    }

    #[test]
    fn test_gmx_invest_is_one_to_one_and_rejects_escrow() {
        let (m, pool) = gmx_setup();
        let quote = m.invest_quote(&pool, pool.staked_mint, 5_000, 0, 0).unwrap();
        assert_eq!(quote.expected_investment_amount, 5_000);
        assert_eq!(quote.min_investment_amount, 5_000);
        assert!(m.invest_quote(&pool, pool.es_mint, 5_000, 0, 0).is_err());
    }

    #[test]
    fn test_pause_gate() {
        let (mut m, _) = gmx_setup();
        let pauser = Pubkey::new_unique();

        let flags = PausedFlags {
            gmx_investments_paused: true,
            ..PausedFlags::default()
        };
        assert!(m.set_paused(&pauser, flags).is_err());

        m.set_pauser(pauser, true).unwrap();
        m.set_paused(&pauser, flags).unwrap();
        let err = m.require_invest_not_paused(false).unwrap_err();
        assert_eq!(err, error!(YieldVaultError::IsPaused));
        m.require_exit_not_paused().unwrap();
    }

    #[test]
    fn test_secondary_pause_folds_into_glp_flag() {
        let (m, _, _) = glp_setup();
        m.require_invest_not_paused(false).unwrap();
        assert!(m.effective_paused(true).glp_investments_paused);
        assert!(m.require_invest_not_paused(true).is_err());
    }

    #[test]
    fn test_deadline() {
        check_deadline(0, i64::MAX).unwrap();
        check_deadline(100, 100).unwrap();
        assert!(check_deadline(100, 101).is_err());
    }

    #[test]
    fn test_stale_invest_quote_fails_closed() {
        let (m, mut pool, bnb) = glp_setup();
        let quote = m.invest_quote(&pool, bnb, 100_000_000, 100, 0).unwrap();

        // Same price: the signed floor is carried through
        let live = m.revalidate_invest_quote(&pool, &quote, &bnb, false, 10).unwrap();
        assert_eq!(live.min_investment_amount, 29_625_750_000);

        // BNB drops to 240 before the transaction lands
        let index = pool.basket_index(&bnb).unwrap();
        pool.basket[index].price = 240 * PRICE_PRECISION;
        let repriced = m.invest_quote(&pool, bnb, 100_000_000, 100, 0).unwrap();
        assert!(repriced.min_investment_amount < quote.min_investment_amount);

        let err = m.revalidate_invest_quote(&pool, &quote, &bnb, false, 10).unwrap_err();
        assert_eq!(err, error!(YieldVaultError::Slippage));
    }

    #[test]
    fn test_live_min_never_below_signed_floor() {
        let (m, pool, bnb) = glp_setup();
        let mut quote = m.invest_quote(&pool, bnb, 100_000_000, 500, 0).unwrap();
        // Caller asks for tighter than their own slippage implies
        quote.min_investment_amount = quote.expected_investment_amount;

        let live = m.revalidate_invest_quote(&pool, &quote, &bnb, false, 10).unwrap();
        assert_eq!(live.min_investment_amount, quote.expected_investment_amount);
    }

    #[test]
    fn test_stale_exit_quote_fails_closed() {
        let (mut m, pool) = gmx_setup();
        let gmx = pool.staked_mint;
        let quote = m.exit_quote(&pool, 10_000, gmx, 0, 0).unwrap();
        assert_eq!(
            m.revalidate_exit_quote(&pool, &quote, &gmx, 10)
                .unwrap()
                .min_to_token_amount,
            10_000
        );

        // Sell fee raised between quoting and exiting
        m.sell_fee_rate = FeeRate::bps(1_000).unwrap();
        let err = m.revalidate_exit_quote(&pool, &quote, &gmx, 10).unwrap_err();
        assert_eq!(err, error!(YieldVaultError::Slippage));
    }

    #[test]
    fn test_redeemed_quote_checks_inputs_before_policy() {
        let (mut m, pool) = gmx_setup();
        let gmx = pool.staked_mint;
        let pauser = Pubkey::new_unique();
        m.set_pauser(pauser, true).unwrap();
        m.set_paused(
            &pauser,
            PausedFlags {
                gmx_investments_paused: true,
                gmx_exits_paused: true,
                ..PausedFlags::default()
            },
        )
        .unwrap();

        let mut quote = m.invest_quote(&pool, gmx, 5_000, 0, 100).unwrap();

        // Wrong mint, paused and expired: the token mismatch wins
        let err = m
            .revalidate_invest_quote(&pool, &quote, &Pubkey::new_unique(), false, 200)
            .unwrap_err();
        assert_eq!(err, error!(YieldVaultError::InvalidToken));

        quote.from_amount = 0;
        let err = m.revalidate_invest_quote(&pool, &quote, &gmx, false, 200).unwrap_err();
        assert_eq!(err, error!(YieldVaultError::ExpectedNonZero));

        quote.from_amount = 5_000;
        let err = m.revalidate_invest_quote(&pool, &quote, &gmx, false, 200).unwrap_err();
        assert_eq!(err, error!(YieldVaultError::IsPaused));

        let exit = m.exit_quote(&pool, 5_000, gmx, 0, 100).unwrap();
        let err = m.revalidate_exit_quote(&pool, &exit, &gmx, 200).unwrap_err();
        assert_eq!(err, error!(YieldVaultError::IsPaused));

        m.set_paused(&pauser, PausedFlags::default()).unwrap();
        let err = m.revalidate_exit_quote(&pool, &exit, &gmx, 200).unwrap_err();
        assert_eq!(err, error!(YieldVaultError::DeadlineExpired));
    }

    #[test]
    fn test_o_gmx_fee_split_over_a_day() {
        let (mut m, _) = gmx_setup();
        m.o_gmx_rewards_fee_rate = FeeRate::new(30, 100).unwrap();

        let es_per_second = 20_667u64;
        let es = es_per_second * 86_400;
        let (native, o_gmx) = m.net_harvestable(7, es).unwrap();
        assert_eq!(native, 7);
        assert_eq!(o_gmx, es - es * 30 / 100);
    }
}
