use proptest::prelude::*;

use token_core::{Address, LedgerCore};

const ACCOUNTS: u128 = 5;

#[derive(Debug, Clone)]
enum Call {
    Transfer { from: u128, to: u128, amount: u128 },
    Approve { owner: u128, spender: u128, amount: u128 },
    Increase { owner: u128, spender: u128, amount: u128 },
    Decrease { owner: u128, spender: u128, amount: u128 },
    TransferFrom { caller: u128, owner: u128, to: u128, amount: u128 },
}

/// Index 0 is the zero address, so rejected calls are generated too.
fn account() -> impl Strategy<Value = u128> {
    0..=ACCOUNTS
}

fn amount() -> impl Strategy<Value = u128> {
    prop_oneof![0..=2_000u128, Just(u128::MAX)]
}

fn call() -> impl Strategy<Value = Call> {
    prop_oneof![
        (account(), account(), amount()).prop_map(|(from, to, amount)| Call::Transfer {
            from,
            to,
            amount
        }),
        (account(), account(), amount()).prop_map(|(owner, spender, amount)| Call::Approve {
            owner,
            spender,
            amount
        }),
        (account(), account(), amount()).prop_map(|(owner, spender, amount)| Call::Increase {
            owner,
            spender,
            amount
        }),
        (account(), account(), amount()).prop_map(|(owner, spender, amount)| Call::Decrease {
            owner,
            spender,
            amount
        }),
        (account(), account(), account(), amount()).prop_map(|(caller, owner, to, amount)| {
            Call::TransferFrom {
                caller,
                owner,
                to,
                amount,
            }
        }),
    ]
}

fn apply(ledger: &mut LedgerCore, call: &Call) -> bool {
    let a = Address::from_u128;
    match *call {
        Call::Transfer { from, to, amount } => ledger.transfer(a(from), a(to), amount).is_ok(),
        Call::Approve {
            owner,
            spender,
            amount,
        } => ledger.approve(a(owner), a(spender), amount).is_ok(),
        Call::Increase {
            owner,
            spender,
            amount,
        } => ledger
            .increase_allowance(a(owner), a(spender), amount)
            .is_ok(),
        Call::Decrease {
            owner,
            spender,
            amount,
        } => ledger
            .decrease_allowance(a(owner), a(spender), amount)
            .is_ok(),
        Call::TransferFrom {
            caller,
            owner,
            to,
            amount,
        } => ledger
            .transfer_from(a(caller), a(owner), a(to), amount)
            .is_ok(),
    }
}

fn all_balances(ledger: &LedgerCore) -> Vec<u128> {
    (0..=ACCOUNTS)
        .map(|i| ledger.balance_of(&Address::from_u128(i)))
        .collect()
}

fn all_allowances(ledger: &LedgerCore) -> Vec<u128> {
    let mut out = Vec::new();
    for owner in 0..=ACCOUNTS {
        for spender in 0..=ACCOUNTS {
            out.push(ledger.allowance(&Address::from_u128(owner), &Address::from_u128(spender)));
        }
    }
    out
}

proptest! {
    #[test]
    fn test_supply_is_conserved(
        supply in 0..=10_000u128,
        calls in proptest::collection::vec(call(), 0..64)
    ) {
        let mut ledger = LedgerCore::new(supply, Address::from_u128(1)).unwrap();
        for call in &calls {
            apply(&mut ledger, call);
            let sum: u128 = all_balances(&ledger).iter().sum();
            prop_assert_eq!(sum, ledger.total_supply());
            prop_assert!(ledger.check_invariants().is_ok());
        }
        prop_assert_eq!(ledger.total_supply(), supply);
    }

    #[test]
    fn test_rejected_calls_leave_state_untouched(
        calls in proptest::collection::vec(call(), 1..64)
    ) {
        let mut ledger = LedgerCore::new(5_000, Address::from_u128(1)).unwrap();
        for call in &calls {
            let balances = all_balances(&ledger);
            let allowances = all_allowances(&ledger);
            let events = ledger.events().len();
            if !apply(&mut ledger, call) {
                prop_assert_eq!(all_balances(&ledger), balances);
                prop_assert_eq!(all_allowances(&ledger), allowances);
                prop_assert_eq!(ledger.events().len(), events);
            }
        }
    }

    #[test]
    fn test_increase_then_decrease_restores_allowance(
        start in 0..=1_000_000u128,
        delta in 0..=1_000_000u128,
        owner in 1..=ACCOUNTS,
        spender in 1..=ACCOUNTS
    ) {
        let (owner, spender) = (Address::from_u128(owner), Address::from_u128(spender));
        let mut ledger = LedgerCore::new(1, owner).unwrap();
        ledger.approve(owner, spender, start).unwrap();

        ledger.increase_allowance(owner, spender, delta).unwrap();
        ledger.decrease_allowance(owner, spender, delta).unwrap();
        prop_assert_eq!(ledger.allowance(&owner, &spender), start);
    }

    #[test]
    fn test_reads_are_stable(account in 0..=ACCOUNTS) {
        let ledger = LedgerCore::new(777, Address::from_u128(1)).unwrap();
        let account = Address::from_u128(account);
        prop_assert_eq!(ledger.balance_of(&account), ledger.balance_of(&account));
    }
}
