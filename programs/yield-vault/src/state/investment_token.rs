use anchor_lang::prelude::*;

use crate::constants::MAX_MINTERS;
use crate::error::YieldVaultError;

/// Wrapper investment token (oGMX, oGLP)
/// PDA: ["investment_token", mint]
///
/// The PDA is the mint authority. Supply is owned collectively by the
/// Managers listed in `minters`; `manager` is the one users invest through.
#[account]
#[derive(InitSpace)]
pub struct InvestmentToken {
    pub governance: Pubkey,
    pub mint: Pubkey,
    pub manager: Pubkey,

    #[max_len(4)]
    pub minters: Vec<Pubkey>,

    pub bump: u8,
}

impl InvestmentToken {
    pub fn is_minter(&self, account: &Pubkey) -> bool {
        self.minters.contains(account)
    }

    pub fn require_minter(&self, account: &Pubkey) -> Result<()> {
        require!(self.is_minter(account), YieldVaultError::InvalidAccess);
        Ok(())
    }

    pub fn set_minter(&mut self, minter: Pubkey, can_mint: bool) -> Result<()> {
        require!(minter != Pubkey::default(), YieldVaultError::InvalidAddress);

        if can_mint {
            if !self.is_minter(&minter) {
                require!(self.minters.len() < MAX_MINTERS, YieldVaultError::TooManyEntries);
                self.minters.push(minter);
            }
        } else {
            self.minters.retain(|m| *m != minter);
        }
        Ok(())
    }

    /// Returns the previous manager
    pub fn set_manager(&mut self, manager: Pubkey) -> Result<Pubkey> {
        require!(manager != Pubkey::default(), YieldVaultError::InvalidAddress);
        Ok(std::mem::replace(&mut self.manager, manager))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minters_are_a_set() {
        let mut token = InvestmentToken {
            governance: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            manager: Pubkey::default(),
            minters: vec![],
            bump: 255,
        };
        let gmx_manager = Pubkey::new_unique();
        let glp_manager = Pubkey::new_unique();

        token.set_minter(gmx_manager, true).unwrap();
        token.set_minter(gmx_manager, true).unwrap();
        token.set_minter(glp_manager, true).unwrap();
        assert_eq!(token.minters.len(), 2);
        token.require_minter(&glp_manager).unwrap();

        token.set_minter(glp_manager, false).unwrap();
        assert!(token.require_minter(&glp_manager).is_err());
        assert!(token.set_minter(Pubkey::default(), true).is_err());

        for _ in 0..3 {
            token.set_minter(Pubkey::new_unique(), true).unwrap();
        }
        assert!(token.set_minter(Pubkey::new_unique(), true).is_err());
    }
}
