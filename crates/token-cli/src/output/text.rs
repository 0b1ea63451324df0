//! Table and plain-text output for scenario reports.

use crate::runner::{describe_event, Report, StepReport};
use crate::scenario::Accounts;
use crate::ui::{
    self, format_amount, format_delta, short_address, truncate, Badge, Column, UiContext,
};

const STEP_COLUMNS: [Column; 6] = [
    Column::numeric("#"),
    Column::new("Step"),
    Column::new("Op"),
    Column::new("Caller"),
    Column::numeric("Amount"),
    Column::new("Result"),
];

const BALANCE_COLUMNS: [Column; 3] = [
    Column::new("Account"),
    Column::new("Address"),
    Column::numeric("Balance"),
];

/// Print a report in pretty or plain form. `decimals` only affects how
/// amounts are displayed.
pub fn print_report(ctx: &UiContext, report: &Report, decimals: u8) {
    if ctx.mode.is_pretty() {
        print_pretty(ctx, report, decimals);
    } else {
        print_plain(ctx, report, decimals);
    }
}

fn outcome(step: &StepReport) -> String {
    match step.error_kind() {
        Some(kind) => format!("rejected ({})", kind),
        None => format!("ok, {} event(s)", step.events.len()),
    }
}

fn print_pretty(ctx: &UiContext, report: &Report, decimals: u8) {
    let accounts = &report.accounts;
    ui::print(ctx, &ui::header(ctx, "run", Some(&report.scenario)));
    println!();

    let rows: Vec<Vec<String>> = report
        .steps
        .iter()
        .map(|step| {
            let kind = if step.passed() { Badge::Pass } else { Badge::Fail };
            vec![
                step.index.to_string(),
                truncate(&step.name, 32),
                step.op.to_string(),
                accounts.display(&step.caller),
                format_amount(step.amount, decimals),
                ui::badge(ctx, kind, &outcome(step)),
            ]
        })
        .collect();
    if !rows.is_empty() {
        ui::print(ctx, &ui::table(ctx, &STEP_COLUMNS, &rows));
    }

    for step in report.steps.iter().filter(|step| !step.passed()) {
        println!();
        ui::print(
            ctx,
            &ui::badge(ctx, Badge::Fail, &format!("{}. {}", step.index, step.name)),
        );
        for failure in &step.failures {
            ui::print(ctx, &format!("    {}", failure));
        }
        for event in &step.events {
            ui::print(
                ctx,
                &ui::kv(ctx, "    emitted", &describe_event(accounts, event)),
            );
        }
        if !step.changes.is_empty() {
            ui::print(
                ctx,
                &ui::kv(ctx, "    changed", &describe_changes(accounts, step, decimals)),
            );
        }
    }

    let balances: Vec<Vec<String>> = accounts
        .iter()
        .map(|(label, address)| {
            vec![
                label.to_string(),
                short_address(&address),
                format_amount(report.ledger.balance_of(&address), decimals),
            ]
        })
        .collect();
    println!();
    ui::print(ctx, &ui::table(ctx, &BALANCE_COLUMNS, &balances));
    println!();

    let (kind, title) = if !report.is_success() {
        (Badge::Fail, "Scenario failed")
    } else if report.steps.is_empty() {
        (Badge::Warn, "Scenario has no steps")
    } else {
        (Badge::Pass, "Scenario passed")
    };
    ui::print(ctx, &ui::receipt(ctx, kind, title, &summary(report, decimals)));
}

fn print_plain(ctx: &UiContext, report: &Report, decimals: u8) {
    let accounts = &report.accounts;
    ui::print(ctx, &ui::header(ctx, "run", None));
    ui::print(ctx, &ui::kv(ctx, "scenario", &report.scenario));

    for step in &report.steps {
        let status = if step.passed() { "pass" } else { "fail" };
        let error = step
            .error_kind()
            .map(|kind| kind.to_string())
            .unwrap_or_else(|| "none".to_string());
        ui::print(
            ctx,
            &format!(
                "step={} op={} caller={} amount={} error={} events={} changes={} status={}",
                step.index,
                step.op,
                accounts.display(&step.caller),
                format_amount(step.amount, decimals),
                error,
                step.events.len(),
                describe_changes(accounts, step, decimals),
                status
            ),
        );
        for failure in &step.failures {
            ui::print(ctx, &format!("failure step={} {}", step.index, failure));
        }
    }

    for (label, address) in accounts.iter() {
        ui::print(
            ctx,
            &format!(
                "balance account={} address={} amount={}",
                label,
                address,
                format_amount(report.ledger.balance_of(&address), decimals)
            ),
        );
    }

    let kind = if report.is_success() { Badge::Pass } else { Badge::Fail };
    ui::print(ctx, &ui::receipt(ctx, kind, "", &summary(report, decimals)));
}

/// `owner:-50,addr1:+50`, or `none`.
fn describe_changes(accounts: &Accounts, step: &StepReport, decimals: u8) -> String {
    if step.changes.is_empty() {
        return "none".to_string();
    }
    step.changes
        .iter()
        .map(|(account, delta)| {
            format!("{}:{}", accounts.display(account), format_delta(*delta, decimals))
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn summary(report: &Report, decimals: u8) -> Vec<(&'static str, String)> {
    vec![
        ("steps", report.steps.len().to_string()),
        ("passed", report.passed().to_string()),
        ("failed", report.failed().to_string()),
        ("events", report.ledger.events().len().to_string()),
        (
            "total supply",
            format_amount(report.ledger.total_supply(), decimals),
        ),
    ]
}
