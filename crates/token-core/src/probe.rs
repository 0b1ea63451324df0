//! Balance-change probes for harnesses.

use crate::address::Address;
use crate::events::EventSink;
use crate::ledger::LedgerCore;

/// Balances of a fixed set of accounts, captured at one point in time.
///
/// Capture before a call, then ask for signed deltas afterwards:
///
/// ```
/// use token_core::{Address, BalanceProbe, LedgerCore};
///
/// let owner = Address::from_u128(1);
/// let addr1 = Address::from_u128(2);
/// let mut ledger = LedgerCore::new(100, owner).unwrap();
///
/// let probe = BalanceProbe::capture(&ledger, [owner, addr1]);
/// ledger.transfer(owner, addr1, 50).unwrap();
/// assert_eq!(probe.deltas(&ledger), vec![(owner, -50), (addr1, 50)]);
/// ```
#[derive(Debug, Clone)]
pub struct BalanceProbe {
    before: Vec<(Address, u128)>,
}

impl BalanceProbe {
    pub fn capture<S: EventSink>(
        ledger: &LedgerCore<S>,
        accounts: impl IntoIterator<Item = Address>,
    ) -> Self {
        let before = accounts
            .into_iter()
            .map(|account| (account, ledger.balance_of(&account)))
            .collect();
        Self { before }
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Address> + '_ {
        self.before.iter().map(|(account, _)| account)
    }

    /// Signed change of every captured account, in capture order.
    pub fn deltas<S: EventSink>(&self, ledger: &LedgerCore<S>) -> Vec<(Address, i128)> {
        self.before
            .iter()
            .map(|(account, before)| (*account, signed_delta(*before, ledger.balance_of(account))))
            .collect()
    }

    /// Signed change of `account`, or `None` if it was not captured.
    pub fn delta<S: EventSink>(&self, ledger: &LedgerCore<S>, account: &Address) -> Option<i128> {
        self.before
            .iter()
            .find(|(captured, _)| captured == account)
            .map(|(_, before)| signed_delta(*before, ledger.balance_of(account)))
    }
}

/// Saturates at the `i128` range; a single step can never move more than
/// the total supply, so only pathological supplies reach the bounds.
fn signed_delta(before: u128, after: u128) -> i128 {
    if after >= before {
        i128::try_from(after - before).unwrap_or(i128::MAX)
    } else {
        i128::try_from(before - after).map(|d| -d).unwrap_or(i128::MIN)
    }
}
