//! JSON output for scenario reports.

use serde_json::{json, Value};
use token_core::LedgerEvent;

use crate::runner::{Report, StepReport};
use crate::scenario::Accounts;

/// Amounts that fit in a `u64` are JSON numbers; larger ones are decimal
/// strings so no consumer silently loses precision.
pub fn amount_json(amount: u128) -> Value {
    match u64::try_from(amount) {
        Ok(small) => Value::from(small),
        Err(_) => Value::from(amount.to_string()),
    }
}

/// Signed counterpart of [`amount_json`].
pub fn delta_json(delta: i128) -> Value {
    match i64::try_from(delta) {
        Ok(small) => Value::from(small),
        Err(_) => Value::from(delta.to_string()),
    }
}

/// An event with account labels next to the raw addresses.
pub fn event_json(event: &LedgerEvent, accounts: &Accounts) -> Value {
    match event {
        LedgerEvent::Transfer { from, to, amount } => json!({
            "kind": "transfer",
            "from": accounts.display(from),
            "to": accounts.display(to),
            "from_address": from,
            "to_address": to,
            "amount": amount_json(*amount),
        }),
        LedgerEvent::Approval {
            owner,
            spender,
            amount,
        } => json!({
            "kind": "approval",
            "owner": accounts.display(owner),
            "spender": accounts.display(spender),
            "owner_address": owner,
            "spender_address": spender,
            "amount": amount_json(*amount),
        }),
    }
}

fn step_json(step: &StepReport, accounts: &Accounts) -> Value {
    let error = step.error.as_ref().map(|err| {
        json!({
            "kind": err.kind(),
            "message": err.to_string(),
        })
    });
    let changes: serde_json::Map<String, Value> = step
        .changes
        .iter()
        .map(|(account, delta)| (accounts.display(account), delta_json(*delta)))
        .collect();
    json!({
        "index": step.index,
        "name": step.name,
        "op": step.op,
        "caller": accounts.display(&step.caller),
        "amount": amount_json(step.amount),
        "passed": step.passed(),
        "error": error,
        "events": step
            .events
            .iter()
            .map(|event| event_json(event, accounts))
            .collect::<Vec<_>>(),
        "balance_changes": changes,
        "failures": step.failures,
    })
}

/// Full report: per-step results plus the final ledger state.
pub fn report_json(report: &Report) -> Value {
    let accounts = &report.accounts;
    let balances: Vec<Value> = accounts
        .iter()
        .map(|(label, address)| {
            json!({
                "label": label,
                "address": address,
                "balance": amount_json(report.ledger.balance_of(&address)),
            })
        })
        .collect();

    json!({
        "scenario": report.scenario,
        "passed": report.is_success(),
        "summary": {
            "total": report.steps.len(),
            "passed": report.passed(),
            "failed": report.failed(),
        },
        "initial_supply": amount_json(report.initial_supply),
        "total_supply": amount_json(report.ledger.total_supply()),
        "events_recorded": report.ledger.events().len(),
        "steps": report
            .steps
            .iter()
            .map(|step| step_json(step, accounts))
            .collect::<Vec<_>>(),
        "accounts": balances,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::run_scenario;
    use crate::scenario::{parse_scenario, ScenarioFormat};

    #[test]
    fn test_amount_json_precision() {
        assert_eq!(amount_json(5), json!(5));
        assert_eq!(
            amount_json(u128::MAX),
            json!("340282366920938463463374607431768211455")
        );
        assert_eq!(delta_json(-5), json!(-5));
        assert_eq!(delta_json(i128::MIN), json!(i128::MIN.to_string()));
    }

    #[test]
    fn test_report_shape() {
        let scenario = parse_scenario(
            r#"
            [[step]]
            name = "pay"
            op = "transfer"
            to = "addr1"
            amount = 50

            [[step]]
            op = "transfer"
            caller = "addr1"
            to = "owner"
            amount = 51
            "#,
            ScenarioFormat::Toml,
        )
        .unwrap();
        let report = run_scenario(&scenario, 1000).unwrap();
        let value = report_json(&report);

        assert_eq!(value["passed"], false);
        assert_eq!(value["summary"]["failed"], 1);
        assert_eq!(value["total_supply"], 1000);
        assert_eq!(value["steps"][0]["name"], "pay");
        assert_eq!(value["steps"][0]["events"][0]["kind"], "transfer");
        assert_eq!(value["steps"][0]["events"][0]["to"], "addr1");
        assert_eq!(value["steps"][0]["balance_changes"]["owner"], -50);
        assert_eq!(value["steps"][1]["balance_changes"], json!({}));
        assert_eq!(value["steps"][1]["error"]["kind"], "insufficient_balance");
        assert_eq!(value["accounts"][0]["label"], "owner");
        assert_eq!(value["accounts"][0]["balance"], 950);
        assert_eq!(value["accounts"][1]["balance"], 50);
    }
}
