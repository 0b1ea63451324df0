//! Thread-safe handle over a [`LedgerCore`].
//!
//! All mutations go through one write lock, which is the ledger's single
//! serialization point. Queries share a read lock and so never observe a
//! half-applied mutation.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::address::Address;
use crate::error::Result;
use crate::events::{EventLog, EventSink};
use crate::ledger::LedgerCore;

/// Cloneable, `Send + Sync` ledger handle.
#[derive(Debug)]
pub struct SharedLedger<S = EventLog> {
    inner: Arc<RwLock<LedgerCore<S>>>,
}

impl<S> Clone for SharedLedger<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: EventSink> From<LedgerCore<S>> for SharedLedger<S> {
    fn from(core: LedgerCore<S>) -> Self {
        Self::new(core)
    }
}

impl<S: EventSink> SharedLedger<S> {
    pub fn new(core: LedgerCore<S>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(core)),
        }
    }

    pub fn total_supply(&self) -> u128 {
        self.inner.read().total_supply()
    }

    pub fn owner(&self) -> Address {
        self.inner.read().owner()
    }

    pub fn balance_of(&self, account: &Address) -> u128 {
        self.inner.read().balance_of(account)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.inner.read().allowance(owner, spender)
    }

    pub fn transfer(&self, from: Address, to: Address, amount: u128) -> Result<()> {
        self.inner.write().transfer(from, to, amount)
    }

    pub fn approve(&self, owner: Address, spender: Address, amount: u128) -> Result<()> {
        self.inner.write().approve(owner, spender, amount)
    }

    pub fn increase_allowance(
        &self,
        owner: Address,
        spender: Address,
        added_value: u128,
    ) -> Result<u128> {
        self.inner
            .write()
            .increase_allowance(owner, spender, added_value)
    }

    pub fn decrease_allowance(
        &self,
        owner: Address,
        spender: Address,
        subtracted_value: u128,
    ) -> Result<u128> {
        self.inner
            .write()
            .decrease_allowance(owner, spender, subtracted_value)
    }

    pub fn transfer_from(
        &self,
        caller: Address,
        owner: Address,
        recipient: Address,
        amount: u128,
    ) -> Result<()> {
        self.inner
            .write()
            .transfer_from(caller, owner, recipient, amount)
    }

    pub fn check_invariants(&self) -> Result<()> {
        self.inner.read().check_invariants()
    }

    /// Run `f` with read access to the event sink.
    pub fn with_events<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(self.inner.read().sink())
    }

    /// Run `f` with exclusive access to the whole ledger.
    ///
    /// Several calls made inside `f` are observed by other handles as one
    /// step.
    pub fn with_core<R>(&self, f: impl FnOnce(&mut LedgerCore<S>) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut *guard)
    }
}

impl<S: EventSink + Clone> SharedLedger<S> {
    /// Copy of the current ledger state.
    pub fn snapshot(&self) -> LedgerCore<S> {
        self.inner.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    const SUPPLY: u128 = 1_000_000;

    #[test]
    fn test_handles_share_state() {
        let owner = Address::from_u128(1);
        let addr1 = Address::from_u128(2);
        let ledger = SharedLedger::new(LedgerCore::new(SUPPLY, owner).unwrap());
        let other = ledger.clone();

        other.transfer(owner, addr1, 10).unwrap();
        assert_eq!(ledger.balance_of(&addr1), 10);
        assert_eq!(ledger.with_events(EventLog::len), 1);
    }

    #[test]
    fn test_concurrent_transfers_preserve_supply() {
        let owner = Address::from_u128(1);
        let ledger = SharedLedger::new(LedgerCore::new(SUPPLY, owner).unwrap());

        let workers: Vec<_> = (0..8u128)
            .map(|i| {
                let ledger = ledger.clone();
                thread::spawn(move || {
                    let account = Address::from_u128(100 + i);
                    for _ in 0..250 {
                        ledger.transfer(owner, account, 1).unwrap();
                        ledger.check_invariants().unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(ledger.balance_of(&owner), SUPPLY - 8 * 250);
        for i in 0..8u128 {
            assert_eq!(ledger.balance_of(&Address::from_u128(100 + i)), 250);
        }
        ledger.check_invariants().unwrap();
        assert_eq!(ledger.with_events(EventLog::len), 8 * 250);
    }

    #[test]
    fn test_concurrent_spenders_never_overdraw_allowance() {
        let owner = Address::from_u128(1);
        let recipient = Address::from_u128(2);
        let ledger = SharedLedger::new(LedgerCore::new(SUPPLY, owner).unwrap());
        let spenders: Vec<Address> = (10..14u128).map(Address::from_u128).collect();
        for spender in &spenders {
            ledger.approve(owner, *spender, 100).unwrap();
        }

        let workers: Vec<_> = spenders
            .iter()
            .map(|spender| {
                let ledger = ledger.clone();
                let spender = *spender;
                thread::spawn(move || {
                    (0..150)
                        .filter(|_| ledger.transfer_from(spender, owner, recipient, 1).is_ok())
                        .count()
                })
            })
            .collect();
        let moved: usize = workers.into_iter().map(|w| w.join().unwrap()).sum();

        assert_eq!(moved, 400);
        assert_eq!(ledger.balance_of(&recipient), 400);
        for spender in &spenders {
            assert_eq!(ledger.allowance(&owner, spender), 0);
        }
    }

    #[test]
    fn test_with_core_groups_calls() {
        let owner = Address::from_u128(1);
        let addr1 = Address::from_u128(2);
        let ledger = SharedLedger::new(LedgerCore::new(SUPPLY, owner).unwrap());

        let result = ledger.with_core(|core| -> Result<u128> {
            core.transfer(owner, addr1, 5)?;
            core.approve(addr1, owner, 5)?;
            Ok(core.balance_of(&addr1))
        });
        assert_eq!(result.unwrap(), 5);
        assert_eq!(ledger.allowance(&addr1, &owner), 5);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let owner = Address::from_u128(1);
        let addr1 = Address::from_u128(2);
        let ledger = SharedLedger::from(LedgerCore::new(SUPPLY, owner).unwrap());

        let before = ledger.snapshot();
        ledger.transfer(owner, addr1, 1).unwrap();
        assert_eq!(before.balance_of(&owner), SUPPLY);
        assert_eq!(ledger.balance_of(&owner), SUPPLY - 1);
    }
}
