//! In-memory implementations of the registry's collaborators.

use std::collections::{BTreeMap, HashMap};

use bitvm_bridge_primitives::{
    buf::Buf32,
    types::{BitcoinBlockHeight, EvmAddress},
};
use ethnum::U256;
use tracing::trace;

use crate::{
    collaborators::{SpvOracle, TokenLedger},
    errors::{LedgerError, OracleError},
};

/// An SPV oracle backed by a map of attested roots.
#[derive(Debug, Clone, Default)]
pub struct InMemorySpvOracle {
    /// height -> attested Merkle root
    roots: BTreeMap<BitcoinBlockHeight, Buf32>,
}

impl InMemorySpvOracle {
    /// Creates an oracle with no attested blocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attests `root` at `height`, replacing any previous attestation.
    pub fn insert(&mut self, height: BitcoinBlockHeight, root: Buf32) {
        trace!(%height, %root, "attesting block");
        self.roots.insert(height, root);
    }

    /// Returns the highest attested height.
    pub fn tip(&self) -> Option<BitcoinBlockHeight> {
        self.roots.keys().next_back().copied()
    }
}

impl SpvOracle for InMemorySpvOracle {
    fn block_hash(&self, height: BitcoinBlockHeight) -> Result<Buf32, OracleError> {
        self.roots
            .get(&height)
            .copied()
            .ok_or(OracleError::UnknownHeight(height))
    }
}

/// A token ledger backed by balance and allowance maps.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenLedger {
    /// account -> balance
    balances: HashMap<EvmAddress, U256>,

    /// (owner, spender) -> allowance
    allowances: HashMap<(EvmAddress, EvmAddress), U256>,

    /// sum of all balances
    total_supply: U256,
}

impl InMemoryTokenLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the balance of `account`.
    pub fn balance_of(&self, account: &EvmAddress) -> U256 {
        self.balances.get(account).copied().unwrap_or(U256::ZERO)
    }

    /// Returns the amount `spender` may move out of `owner`.
    pub fn allowance(&self, owner: &EvmAddress, spender: &EvmAddress) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    /// Returns the sum of all balances.
    pub const fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Lets `spender` move up to `amount` out of `owner`, replacing any previous allowance.
    pub fn approve(&mut self, owner: EvmAddress, spender: EvmAddress, amount: U256) {
        self.allowances.insert((owner, spender), amount);
    }

    fn debit(&mut self, account: EvmAddress, amount: U256) -> Result<(), LedgerError> {
        let available = self.balance_of(&account);
        let remaining =
            available
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientBalance {
                    account,
                    needed: amount,
                    available,
                })?;

        self.balances.insert(account, remaining);

        Ok(())
    }

    fn credit(&mut self, account: EvmAddress, amount: U256) -> Result<(), LedgerError> {
        let balance = self
            .balance_of(&account)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow(account))?;

        self.balances.insert(account, balance);

        Ok(())
    }

    fn move_tokens(
        &mut self,
        from: EvmAddress,
        to: EvmAddress,
        amount: U256,
    ) -> Result<(), LedgerError> {
        // balances never exceed the total supply, so the credit cannot fail after the debit
        self.debit(from, amount)?;
        self.credit(to, amount)?;

        trace!(%from, %to, %amount, "moved tokens");

        Ok(())
    }
}

impl TokenLedger for InMemoryTokenLedger {
    fn transfer(
        &mut self,
        from: EvmAddress,
        to: EvmAddress,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.move_tokens(from, to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: EvmAddress,
        owner: EvmAddress,
        to: EvmAddress,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let available = self.allowance(&owner, &spender);
        if available < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner,
                spender,
                needed: amount,
                available,
            });
        }

        self.move_tokens(owner, to, amount)?;
        self.allowances.insert((owner, spender), available - amount);

        Ok(())
    }

    fn mint(&mut self, to: EvmAddress, amount: U256) -> Result<(), LedgerError> {
        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow(to))?;

        self.credit(to, amount)?;
        self.total_supply = total_supply;

        trace!(%to, %amount, "minted tokens");

        Ok(())
    }
}
