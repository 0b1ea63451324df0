//! Scenario execution.
//!
//! Every step runs against one [`LedgerCore`]. Around each call the runner
//! captures balances and the event cursor, then checks the step's
//! expectations plus the checks that apply to every step: ledger invariants
//! hold, and a rejected call leaves balances untouched and emits nothing.

use token_core::{
    Address, BalanceProbe, ErrorKind, EventLog, LedgerCore, LedgerError, LedgerEvent,
};

use crate::errors::CliError;
use crate::scenario::{Accounts, Amount, Call, EventExpect, Expect, Scenario, Step};

/// Result of one step.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// 1-based position in the scenario
    pub index: usize,
    pub name: String,
    pub op: &'static str,
    pub caller: Address,
    pub amount: u128,
    /// Error the ledger returned, if the call was rejected
    pub error: Option<LedgerError>,
    pub events: Vec<LedgerEvent>,
    /// Non-zero balance changes across the step
    pub changes: Vec<(Address, i128)>,
    /// Expectations that did not hold
    pub failures: Vec<String>,
}

impl StepReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(LedgerError::kind)
    }
}

/// Result of a whole scenario run.
#[derive(Debug, Clone)]
pub struct Report {
    pub scenario: String,
    pub initial_supply: u128,
    pub accounts: Accounts,
    pub steps: Vec<StepReport>,
    /// Final ledger state, including its event log
    pub ledger: LedgerCore<EventLog>,
}

impl Report {
    pub fn failed(&self) -> usize {
        self.steps.iter().filter(|step| !step.passed()).count()
    }

    pub fn passed(&self) -> usize {
        self.steps.len() - self.failed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Error to return from a command when any step failed.
    pub fn outcome(&self) -> anyhow::Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(CliError::ScenarioFailed {
                failed: self.failed(),
                total: self.steps.len(),
            }
            .into())
        }
    }
}

/// Deploy the scenario's ledger and run every step.
///
/// `default_supply` applies when `[deploy]` does not set one. Errors are
/// returned only for malformed scenarios; failed expectations are recorded
/// in the report.
pub fn run_scenario(scenario: &Scenario, default_supply: u128) -> anyhow::Result<Report> {
    let accounts = Accounts::from_scenario(scenario)?;
    let holder = accounts.address(scenario.holder_label())?;
    let initial_supply = scenario
        .deploy
        .initial_supply
        .map(Amount::get)
        .unwrap_or(default_supply);

    let mut ledger = LedgerCore::new(initial_supply, holder)
        .map_err(|e| CliError::invalid_input(format!("Deploy failed: {}", e)))?;
    let name = scenario.name.clone().unwrap_or_else(|| "scenario".to_string());
    tracing::info!(
        scenario = %name,
        initial_supply,
        accounts = accounts.iter().count(),
        steps = scenario.steps.len(),
        "deployed"
    );

    let mut steps = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.iter().enumerate() {
        let report = run_step(&mut ledger, &accounts, holder, index + 1, step)?;
        if report.passed() {
            tracing::debug!(step = report.index, op = report.op, "step passed");
        } else {
            tracing::warn!(
                step = report.index,
                op = report.op,
                failures = report.failures.len(),
                "step failed"
            );
        }
        steps.push(report);
    }

    Ok(Report {
        scenario: name,
        initial_supply,
        accounts,
        steps,
        ledger,
    })
}

fn run_step(
    ledger: &mut LedgerCore<EventLog>,
    accounts: &Accounts,
    holder: Address,
    index: usize,
    step: &Step,
) -> anyhow::Result<StepReport> {
    let caller = match &step.caller {
        Some(label) => accounts.address(label)?,
        None => holder,
    };

    let tracked = accounts.addresses();
    let probe = BalanceProbe::capture(ledger, tracked.iter().copied());
    let cursor = ledger.events().next_sequence();

    let result = execute(ledger, accounts, caller, &step.call)?;
    let events: Vec<LedgerEvent> = ledger
        .events()
        .since(cursor)
        .iter()
        .map(|record| record.event)
        .collect();

    let changes: Vec<(Address, i128)> = probe
        .deltas(ledger)
        .into_iter()
        .filter(|(_, delta)| *delta != 0)
        .collect();

    let mut failures = Vec::new();
    check_outcome(&result, &step.expect, &mut failures);
    if result.is_err() {
        check_untouched(accounts, &changes, &events, &mut failures);
    }
    check_expectations(ledger, accounts, &probe, &events, &step.expect, &mut failures)?;
    if let Err(err) = ledger.check_invariants() {
        failures.push(err.to_string());
    }

    Ok(StepReport {
        index,
        name: step
            .name
            .clone()
            .unwrap_or_else(|| format!("{} #{}", step.call.op(), index)),
        op: step.call.op(),
        caller,
        amount: step.call.amount(),
        error: result.err(),
        events,
        changes,
        failures,
    })
}

/// Make the call as `caller`. The outer error is for unknown labels; the
/// inner result is the ledger's answer.
fn execute(
    ledger: &mut LedgerCore<EventLog>,
    accounts: &Accounts,
    caller: Address,
    call: &Call,
) -> anyhow::Result<Result<(), LedgerError>> {
    let result = match call {
        Call::Transfer { to, amount } => ledger.transfer(caller, accounts.address(to)?, amount.get()),
        Call::Approve { spender, amount } => {
            ledger.approve(caller, accounts.address(spender)?, amount.get())
        }
        Call::IncreaseAllowance { spender, amount } => ledger
            .increase_allowance(caller, accounts.address(spender)?, amount.get())
            .map(|_| ()),
        Call::DecreaseAllowance { spender, amount } => ledger
            .decrease_allowance(caller, accounts.address(spender)?, amount.get())
            .map(|_| ()),
        Call::TransferFrom { owner, to, amount } => ledger.transfer_from(
            caller,
            accounts.address(owner)?,
            accounts.address(to)?,
            amount.get(),
        ),
    };
    Ok(result)
}

fn check_outcome(result: &Result<(), LedgerError>, expect: &Expect, failures: &mut Vec<String>) {
    let err = match result {
        Ok(()) => {
            if let Some(expected) = expect.error {
                failures.push(format!("expected {} error, but the call succeeded", expected));
            } else if expect.error_message.is_some() {
                failures.push("expected a rejection, but the call succeeded".to_string());
            }
            return;
        }
        Err(err) => err,
    };

    if !expect.expects_rejection() {
        failures.push(format!("unexpected error: {}", err));
        return;
    }
    if let Some(expected) = expect.error {
        if !expected.matches(err.kind()) {
            failures.push(format!("expected {} error, got {}: {}", expected, err.kind(), err));
        }
    }
    if let Some(prefix) = &expect.error_message {
        let message = err.to_string();
        if !message.starts_with(prefix.as_str()) {
            failures.push(format!(
                "error message: expected {:?}, got {:?}",
                prefix, message
            ));
        }
    }
}

/// A rejected call must not move balances or emit events.
fn check_untouched(
    accounts: &Accounts,
    changes: &[(Address, i128)],
    events: &[LedgerEvent],
    failures: &mut Vec<String>,
) {
    for (account, delta) in changes {
        failures.push(format!(
            "rejected call changed balance of {} by {}",
            accounts.display(account),
            delta
        ));
    }
    if !events.is_empty() {
        failures.push(format!("rejected call emitted {} event(s)", events.len()));
    }
}

fn check_expectations(
    ledger: &LedgerCore<EventLog>,
    accounts: &Accounts,
    probe: &BalanceProbe,
    events: &[LedgerEvent],
    expect: &Expect,
    failures: &mut Vec<String>,
) -> anyhow::Result<()> {
    for (label, expected) in &expect.balances {
        let actual = ledger.balance_of(&accounts.address(label)?);
        if actual != expected.get() {
            failures.push(format!(
                "balance of {}: expected {}, got {}",
                label, expected, actual
            ));
        }
    }

    for (label, expected) in &expect.balance_changes {
        let address = accounts.address(label)?;
        // The zero address never holds a balance, so it is not probed.
        let actual = probe.delta(ledger, &address).unwrap_or(0);
        if actual != expected.get() {
            failures.push(format!(
                "balance change of {}: expected {}, got {}",
                label, expected, actual
            ));
        }
    }

    for allowance in &expect.allowances {
        let actual = ledger.allowance(
            &accounts.address(&allowance.owner)?,
            &accounts.address(&allowance.spender)?,
        );
        if actual != allowance.amount.get() {
            failures.push(format!(
                "allowance {} -> {}: expected {}, got {}",
                allowance.owner, allowance.spender, allowance.amount, actual
            ));
        }
    }

    for name in &expect.emits {
        if !events.iter().any(|event| name.matches(event)) {
            failures.push(format!("no {} event was emitted", name.as_str()));
        }
    }

    if let Some(expected) = &expect.events {
        let expected = expected
            .iter()
            .map(|event| resolve_event(accounts, event))
            .collect::<anyhow::Result<Vec<_>>>()?;
        if expected != events {
            failures.push(format!(
                "events: expected [{}], got [{}]",
                describe_events(accounts, &expected),
                describe_events(accounts, events)
            ));
        }
    }

    Ok(())
}

fn resolve_event(accounts: &Accounts, event: &EventExpect) -> anyhow::Result<LedgerEvent> {
    Ok(match event {
        EventExpect::Transfer { from, to, amount } => LedgerEvent::transfer(
            accounts.address(from)?,
            accounts.address(to)?,
            amount.get(),
        ),
        EventExpect::Approval {
            owner,
            spender,
            amount,
        } => LedgerEvent::approval(
            accounts.address(owner)?,
            accounts.address(spender)?,
            amount.get(),
        ),
    })
}

/// `Transfer(owner, addr1, 50)` style rendering with labels.
pub fn describe_event(accounts: &Accounts, event: &LedgerEvent) -> String {
    match event {
        LedgerEvent::Transfer { from, to, amount } => format!(
            "{}({}, {}, {})",
            event.name(),
            accounts.display(from),
            accounts.display(to),
            amount
        ),
        LedgerEvent::Approval {
            owner,
            spender,
            amount,
        } => format!(
            "{}({}, {}, {})",
            event.name(),
            accounts.display(owner),
            accounts.display(spender),
            amount
        ),
    }
}

fn describe_events(accounts: &Accounts, events: &[LedgerEvent]) -> String {
    events
        .iter()
        .map(|event| describe_event(accounts, event))
        .collect::<Vec<_>>()
        .join(", ")
}
