use anchor_lang::prelude::*;

use crate::constants::MAX_ACCESS_ENTRIES;
use crate::error::YieldVaultError;

/// Gated entry points that can be granted to a caller on a target account
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selector {
    EarnStake,
    EarnUnstake,
    EarnTransferStaked,
    EarnTransferStakedOrPause,
    EarnHarvest,
    ManagerHarvest,
    VaultAddPendingReserves,
    AggregatorHarvest,
}

impl Selector {
    fn bit(self) -> u32 {
        1u32 << (self as u8)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExplicitAccess {
    pub selector: Selector,
    pub allowed: bool,
}

/// Selectors `caller` may invoke on `target`, as a bit set
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct AccessEntry {
    pub target: Pubkey,
    pub caller: Pubkey,
    pub selectors: u32,
}

/// Single owner with two-step handoff, plus the explicit capability table
/// PDA: ["governance"]
#[account]
#[derive(InitSpace)]
pub struct Governance {
    pub owner: Pubkey,

    /// Set by propose_new_owner, cleared on accept
    pub proposed_owner: Pubkey,

    #[max_len(32)]
    pub entries: Vec<AccessEntry>,

    pub bump: u8,
}

impl Governance {
    pub fn is_owner(&self, caller: &Pubkey) -> bool {
        self.owner == *caller
    }

    pub fn require_owner(&self, caller: &Pubkey) -> Result<()> {
        require!(self.is_owner(caller), YieldVaultError::InvalidAccess);
        Ok(())
    }

    /// Returns the previously proposed owner
    pub fn propose_new_owner(&mut self, new_owner: Pubkey) -> Result<Pubkey> {
        require!(new_owner != Pubkey::default(), YieldVaultError::InvalidAddress);
        let old = self.proposed_owner;
        self.proposed_owner = new_owner;
        Ok(old)
    }

    /// Returns the previous owner
    pub fn accept_owner(&mut self, caller: &Pubkey) -> Result<Pubkey> {
        require!(
            self.proposed_owner != Pubkey::default() && self.proposed_owner == *caller,
            YieldVaultError::InvalidAccess
        );
        let old = self.owner;
        self.owner = *caller;
        self.proposed_owner = Pubkey::default();
        Ok(old)
    }

    pub fn set_explicit_access(
        &mut self,
        target: Pubkey,
        caller: Pubkey,
        access: &[ExplicitAccess],
    ) -> Result<()> {
        require!(
            target != Pubkey::default() && caller != Pubkey::default(),
            YieldVaultError::InvalidAddress
        );

        let index = match self
            .entries
            .iter()
            .position(|e| e.target == target && e.caller == caller)
        {
            Some(index) => index,
            None => {
                require!(
                    self.entries.len() < MAX_ACCESS_ENTRIES,
                    YieldVaultError::TooManyEntries
                );
                self.entries.push(AccessEntry {
                    target,
                    caller,
                    selectors: 0,
                });
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[index];
        for item in access {
            if item.allowed {
                entry.selectors |= item.selector.bit();
            } else {
                entry.selectors &= !item.selector.bit();
            }
        }

        if entry.selectors == 0 {
            self.entries.swap_remove(index);
        }

        Ok(())
    }

    /// The owner is implicitly allowed everywhere
    pub fn is_allowed(&self, target: &Pubkey, caller: &Pubkey, selector: Selector) -> bool {
        if self.is_owner(caller) {
            return true;
        }
        self.entries
            .iter()
            .any(|e| e.target == *target && e.caller == *caller && e.selectors & selector.bit() != 0)
    }

    pub fn require_allowed(&self, target: &Pubkey, caller: &Pubkey, selector: Selector) -> Result<()> {
        require!(
            self.is_allowed(target, caller, selector),
            YieldVaultError::InvalidAccess
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn governance() -> Governance {
        Governance {
            owner: Pubkey::new_unique(),
            proposed_owner: Pubkey::default(),
            entries: vec![],
            bump: 255,
        }
    }

    fn grant(selector: Selector) -> ExplicitAccess {
        ExplicitAccess {
            selector,
            allowed: true,
        }
    }

    fn revoke(selector: Selector) -> ExplicitAccess {
        ExplicitAccess {
            selector,
            allowed: false,
        }
    }

    #[test]
    fn test_two_step_ownership() {
        let mut gov = governance();
        let alan = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        assert!(gov.propose_new_owner(Pubkey::default()).is_err());
        assert!(gov.accept_owner(&alan).is_err());

        gov.propose_new_owner(alan).unwrap();
        assert!(gov.accept_owner(&bob).is_err());

        let old = gov.accept_owner(&alan).unwrap();
        assert_ne!(old, alan);
        assert_eq!(gov.owner, alan);
        assert_eq!(gov.proposed_owner, Pubkey::default());
        // A used proposal can't be accepted again
        assert!(gov.accept_owner(&alan).is_err());
    }

    #[test]
    fn test_selectors_are_per_target_and_caller() {
        let mut gov = governance();
        let earn_account = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let operator = Pubkey::new_unique();

        gov.set_explicit_access(
            earn_account,
            operator,
            &[grant(Selector::EarnStake), grant(Selector::EarnTransferStakedOrPause)],
        )
        .unwrap();

        assert!(gov.is_allowed(&earn_account, &operator, Selector::EarnStake));
        assert!(gov.is_allowed(&earn_account, &operator, Selector::EarnTransferStakedOrPause));
        assert!(!gov.is_allowed(&earn_account, &operator, Selector::EarnUnstake));
        assert!(!gov.is_allowed(&other, &operator, Selector::EarnStake));
        assert!(gov.require_allowed(&other, &operator, Selector::EarnStake).is_err());
    }

    #[test]
    fn test_empty_entries_are_pruned() {
        let mut gov = governance();
        let target = Pubkey::new_unique();
        let operator = Pubkey::new_unique();

        gov.set_explicit_access(target, operator, &[grant(Selector::ManagerHarvest)])
            .unwrap();
        assert_eq!(gov.entries.len(), 1);

        gov.set_explicit_access(target, operator, &[revoke(Selector::ManagerHarvest)])
            .unwrap();
        assert!(gov.entries.is_empty());

        // Revoking something never granted does not leave an entry behind
        gov.set_explicit_access(target, operator, &[revoke(Selector::AggregatorHarvest)])
            .unwrap();
        assert!(gov.entries.is_empty());
    }

    #[test]
    fn test_owner_is_implicitly_allowed() {
        let gov = governance();
        let owner = gov.owner;
        assert!(gov.is_allowed(&Pubkey::new_unique(), &owner, Selector::VaultAddPendingReserves));
    }

    #[test]
    fn test_table_capacity() {
        let mut gov = governance();
        let target = Pubkey::new_unique();
        for _ in 0..MAX_ACCESS_ENTRIES {
            gov.set_explicit_access(target, Pubkey::new_unique(), &[grant(Selector::EarnHarvest)])
                .unwrap();
        }
        assert!(gov
            .set_explicit_access(target, Pubkey::new_unique(), &[grant(Selector::EarnHarvest)])
            .is_err());
    }
}
