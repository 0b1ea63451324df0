//! The fungible-token ledger.
//!
//! [`LedgerCore`] owns every balance and allowance. Each mutating operation
//! validates first and writes second, so a rejected call leaves the tables
//! untouched and a successful one is observed as a single step.

use std::collections::HashMap;

use tracing::debug;

use crate::address::Address;
use crate::error::{AddressRole, LedgerError, Result};
use crate::events::{EventLog, EventSink, LedgerEvent};

/// Balance and allowance tables for a single fixed-supply token.
#[derive(Debug, Clone)]
pub struct LedgerCore<S = EventLog> {
    total_supply: u128,
    owner: Address,
    balances: HashMap<Address, u128>,
    allowances: HashMap<(Address, Address), u128>,
    sink: S,
}

impl LedgerCore<EventLog> {
    /// Deploy a ledger that records events into an in-memory [`EventLog`].
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidArgument` if `initial_holder` is the zero
    /// identifier.
    pub fn new(initial_supply: u128, initial_holder: Address) -> Result<Self> {
        Self::with_sink(initial_supply, initial_holder, EventLog::new())
    }

    /// Recorded events, in emission order.
    pub fn events(&self) -> &EventLog {
        &self.sink
    }
}

impl<S: EventSink> LedgerCore<S> {
    /// Deploy a ledger that records events into `sink`.
    ///
    /// The whole supply is credited to `initial_holder`, who also becomes the
    /// ledger's [`owner`](LedgerCore::owner). Construction emits no event.
    pub fn with_sink(initial_supply: u128, initial_holder: Address, sink: S) -> Result<Self> {
        if initial_holder.is_zero() {
            return Err(LedgerError::InvalidArgument(
                "initial holder cannot be the zero address".to_string(),
            ));
        }

        let mut balances = HashMap::new();
        if initial_supply > 0 {
            balances.insert(initial_holder, initial_supply);
        }

        debug!(
            total_supply = initial_supply,
            holder = %initial_holder,
            "ledger deployed"
        );

        Ok(Self {
            total_supply: initial_supply,
            owner: initial_holder,
            balances,
            allowances: HashMap::new(),
            sink,
        })
    }

    // --- Queries ---

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// The account that deployed the ledger and received the initial supply.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Current balance of `account`; zero for unknown accounts.
    pub fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Remaining amount `spender` may move out of `owner`'s balance.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    /// Accounts holding a non-zero balance, in no particular order.
    pub fn holders(&self) -> impl Iterator<Item = (&Address, u128)> + '_ {
        self.balances
            .iter()
            .filter(|(_, balance)| **balance > 0)
            .map(|(account, balance)| (account, *balance))
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    // --- Mutations ---

    /// Move `amount` from `from` to `to`.
    ///
    /// Self-transfers and zero-amount transfers are legal; both leave the
    /// balances unchanged and still emit `Transfer`.
    ///
    /// # Errors
    ///
    /// - `ZeroAddress` if either endpoint is the zero identifier
    /// - `InsufficientBalance` if `from` holds less than `amount`
    pub fn transfer(&mut self, from: Address, to: Address, amount: u128) -> Result<()> {
        self.check_transfer(&from, &to, amount)
            .map_err(|err| rejected("transfer", err))?;
        self.move_balance(from, to, amount)?;
        self.emit(LedgerEvent::transfer(from, to, amount));
        debug!(%from, %to, amount, "transfer applied");
        Ok(())
    }

    /// Set `spender`'s allowance over `owner`'s balance to exactly `amount`.
    ///
    /// An absolute set races with a spender acting on the previous value;
    /// [`increase_allowance`](Self::increase_allowance) and
    /// [`decrease_allowance`](Self::decrease_allowance) adjust atomically.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: u128) -> Result<()> {
        check_approval_parties(&owner, &spender).map_err(|err| rejected("approve", err))?;
        self.set_allowance(owner, spender, amount);
        debug!(%owner, %spender, amount, "approval set");
        Ok(())
    }

    /// Raise `spender`'s allowance by `added_value`.
    ///
    /// # Errors
    ///
    /// - `ZeroAddress` if `owner` or `spender` is the zero identifier
    /// - `InvalidArgument` if the new allowance would overflow
    pub fn increase_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        added_value: u128,
    ) -> Result<u128> {
        check_approval_parties(&owner, &spender)
            .map_err(|err| rejected("increase_allowance", err))?;
        let current = self.allowance(&owner, &spender);
        let updated = current.checked_add(added_value).ok_or_else(|| {
            rejected(
                "increase_allowance",
                LedgerError::InvalidArgument(format!(
                    "allowance overflow: {} + {}",
                    current, added_value
                )),
            )
        })?;
        self.set_allowance(owner, spender, updated);
        debug!(%owner, %spender, added_value, allowance = updated, "allowance increased");
        Ok(updated)
    }

    /// Lower `spender`'s allowance by `subtracted_value`.
    ///
    /// # Errors
    ///
    /// - `ZeroAddress` if `owner` or `spender` is the zero identifier
    /// - `InsufficientAllowance` if the current allowance is below
    ///   `subtracted_value`
    pub fn decrease_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        subtracted_value: u128,
    ) -> Result<u128> {
        check_approval_parties(&owner, &spender)
            .map_err(|err| rejected("decrease_allowance", err))?;
        let current = self.allowance(&owner, &spender);
        let updated = current.checked_sub(subtracted_value).ok_or_else(|| {
            rejected(
                "decrease_allowance",
                LedgerError::InsufficientAllowance {
                    owner,
                    spender,
                    allowance: current,
                    requested: subtracted_value,
                },
            )
        })?;
        self.set_allowance(owner, spender, updated);
        debug!(%owner, %spender, subtracted_value, allowance = updated, "allowance decreased");
        Ok(updated)
    }

    /// Move `amount` from `owner` to `recipient` on behalf of `caller`,
    /// spending `caller`'s allowance.
    ///
    /// Emits `Approval(owner, caller, remaining)` followed by
    /// `Transfer(owner, recipient, amount)`.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - `ZeroAddress` if `owner`, `recipient` or `caller` is the zero identifier
    /// - `InsufficientAllowance` if `caller` may move less than `amount`
    /// - `InsufficientBalance` if `owner` holds less than `amount`
    pub fn transfer_from(
        &mut self,
        caller: Address,
        owner: Address,
        recipient: Address,
        amount: u128,
    ) -> Result<()> {
        let remaining = self
            .check_transfer_from(&caller, &owner, &recipient, amount)
            .map_err(|err| rejected("transfer_from", err))?;

        self.move_balance(owner, recipient, amount)?;
        self.allowances.insert((owner, caller), remaining);
        self.emit(LedgerEvent::approval(owner, caller, remaining));
        self.emit(LedgerEvent::transfer(owner, recipient, amount));
        debug!(%caller, %owner, %recipient, amount, allowance = remaining, "delegated transfer applied");
        Ok(())
    }

    // --- Maintenance ---

    /// Verify the ledger's invariants.
    ///
    /// Checks:
    /// - The sum of all balances equals the total supply
    /// - The zero identifier holds no balance
    /// - The zero identifier is never an owner or spender of an allowance
    pub fn check_invariants(&self) -> Result<()> {
        let mut sum: u128 = 0;
        for (account, balance) in &self.balances {
            if account.is_zero() && *balance > 0 {
                return Err(LedgerError::Integrity(
                    "zero address holds a balance".to_string(),
                ));
            }
            sum = sum.checked_add(*balance).ok_or_else(|| {
                LedgerError::Integrity("sum of balances overflows".to_string())
            })?;
        }
        if sum != self.total_supply {
            return Err(LedgerError::Integrity(format!(
                "sum of balances {} does not match total supply {}",
                sum, self.total_supply
            )));
        }
        if self
            .allowances
            .keys()
            .any(|(owner, spender)| owner.is_zero() || spender.is_zero())
        {
            return Err(LedgerError::Integrity(
                "allowance recorded for the zero address".to_string(),
            ));
        }
        Ok(())
    }

    // --- Internals ---

    fn check_transfer(&self, from: &Address, to: &Address, amount: u128) -> Result<()> {
        if from.is_zero() {
            return Err(LedgerError::zero(AddressRole::Sender));
        }
        if to.is_zero() {
            return Err(LedgerError::zero(AddressRole::Recipient));
        }
        self.check_balance(from, amount)
    }

    /// Validates a delegated transfer and returns the allowance left after it.
    fn check_transfer_from(
        &self,
        caller: &Address,
        owner: &Address,
        recipient: &Address,
        amount: u128,
    ) -> Result<u128> {
        if owner.is_zero() {
            return Err(LedgerError::zero(AddressRole::Sender));
        }
        if recipient.is_zero() {
            return Err(LedgerError::zero(AddressRole::Recipient));
        }
        if caller.is_zero() {
            return Err(LedgerError::zero(AddressRole::Spender));
        }

        let allowance = self.allowance(owner, caller);
        let remaining =
            allowance
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientAllowance {
                    owner: *owner,
                    spender: *caller,
                    allowance,
                    requested: amount,
                })?;
        self.check_balance(owner, amount)?;
        Ok(remaining)
    }

    fn check_balance(&self, account: &Address, amount: u128) -> Result<()> {
        let balance = self.balance_of(account);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                account: *account,
                balance,
                requested: amount,
            });
        }
        Ok(())
    }

    /// Debit `from` and credit `to`. Both new balances are computed before
    /// either table entry is written.
    fn move_balance(&mut self, from: Address, to: Address, amount: u128) -> Result<()> {
        if from == to || amount == 0 {
            return Ok(());
        }
        let from_balance = self.balance_of(&from);
        let to_balance = self.balance_of(&to);
        let debited = from_balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                account: from,
                balance: from_balance,
                requested: amount,
            })?;
        let credited = to_balance.checked_add(amount).ok_or_else(|| {
            LedgerError::InvalidArgument(format!("balance overflow: {} + {}", to_balance, amount))
        })?;

        self.write_balance(from, debited);
        self.write_balance(to, credited);
        Ok(())
    }

    fn write_balance(&mut self, account: Address, balance: u128) {
        if balance == 0 {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, balance);
        }
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, amount: u128) {
        self.allowances.insert((owner, spender), amount);
        self.emit(LedgerEvent::approval(owner, spender, amount));
    }

    fn emit(&mut self, event: LedgerEvent) {
        self.sink.record(event);
    }
}

fn check_approval_parties(owner: &Address, spender: &Address) -> Result<()> {
    if owner.is_zero() {
        return Err(LedgerError::zero(AddressRole::Owner));
    }
    if spender.is_zero() {
        return Err(LedgerError::zero(AddressRole::Spender));
    }
    Ok(())
}

fn rejected(operation: &'static str, err: LedgerError) -> LedgerError {
    debug!(operation, kind = %err.kind(), "call rejected: {}", err);
    err
}
