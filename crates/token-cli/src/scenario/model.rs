//! Scenario data model.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::value::StrDeserializer;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer};
use token_core::{ErrorKind, LedgerEvent};

use super::amount::{Amount, Delta};
use crate::constants::DEFAULT_HOLDER_LABEL;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Display name; defaults to the file stem
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub deploy: Deploy,

    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Label of the deploying account.
    pub fn holder_label(&self) -> &str {
        self.deploy
            .holder
            .as_deref()
            .unwrap_or(DEFAULT_HOLDER_LABEL)
    }
}

/// Fixture: who deploys and with how much.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Deploy {
    /// Falls back to `[defaults] initial_supply` from the config
    #[serde(default)]
    pub initial_supply: Option<Amount>,

    /// Label of the deployer; defaults to `"owner"`
    #[serde(default)]
    pub holder: Option<String>,

    /// Labels to register up front, in order
    #[serde(default)]
    pub signers: Vec<String>,
}

/// One call and its expectations.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawStep")]
pub struct Step {
    pub name: Option<String>,

    /// Connected signer; defaults to the deployer
    pub caller: Option<String>,

    pub call: Call,

    pub expect: Expect,
}

/// A ledger operation, addressed by labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Transfer { to: String, amount: Amount },
    Approve { spender: String, amount: Amount },
    IncreaseAllowance { spender: String, amount: Amount },
    DecreaseAllowance { spender: String, amount: Amount },
    TransferFrom { owner: String, to: String, amount: Amount },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Op {
    Transfer,
    Approve,
    IncreaseAllowance,
    DecreaseAllowance,
    TransferFrom,
}

/// A step as written: the call parameters sit next to `op`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStep {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    caller: Option<String>,
    op: Op,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    spender: Option<String>,
    #[serde(default)]
    owner: Option<String>,
    amount: Amount,
    #[serde(default)]
    expect: Expect,
}

impl TryFrom<RawStep> for Step {
    type Error = String;

    fn try_from(raw: RawStep) -> Result<Self, Self::Error> {
        let RawStep {
            name,
            caller,
            op,
            to,
            spender,
            owner,
            amount,
            expect,
        } = raw;

        let call = match op {
            Op::Transfer => {
                unexpected("transfer", "spender", &spender)?;
                unexpected("transfer", "owner", &owner)?;
                Call::Transfer {
                    to: required("transfer", "to", to)?,
                    amount,
                }
            }
            Op::Approve | Op::IncreaseAllowance | Op::DecreaseAllowance => {
                let op_name = match op {
                    Op::Approve => "approve",
                    Op::IncreaseAllowance => "increase_allowance",
                    _ => "decrease_allowance",
                };
                unexpected(op_name, "to", &to)?;
                unexpected(op_name, "owner", &owner)?;
                let spender = required(op_name, "spender", spender)?;
                match op {
                    Op::Approve => Call::Approve { spender, amount },
                    Op::IncreaseAllowance => Call::IncreaseAllowance { spender, amount },
                    _ => Call::DecreaseAllowance { spender, amount },
                }
            }
            Op::TransferFrom => {
                unexpected("transfer_from", "spender", &spender)?;
                Call::TransferFrom {
                    owner: required("transfer_from", "owner", owner)?,
                    to: required("transfer_from", "to", to)?,
                    amount,
                }
            }
        };

        Ok(Step {
            name,
            caller,
            call,
            expect,
        })
    }
}

fn required(op: &str, field: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("`{}` requires `{}`", op, field))
}

fn unexpected(op: &str, field: &str, value: &Option<String>) -> Result<(), String> {
    match value {
        Some(_) => Err(format!("`{}` does not take `{}`", op, field)),
        None => Ok(()),
    }
}

impl Call {
    pub fn op(&self) -> &'static str {
        match self {
            Call::Transfer { .. } => "transfer",
            Call::Approve { .. } => "approve",
            Call::IncreaseAllowance { .. } => "increase_allowance",
            Call::DecreaseAllowance { .. } => "decrease_allowance",
            Call::TransferFrom { .. } => "transfer_from",
        }
    }

    /// Every label the call mentions, excluding the caller.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Call::Transfer { to, .. } => vec![to.as_str()],
            Call::Approve { spender, .. }
            | Call::IncreaseAllowance { spender, .. }
            | Call::DecreaseAllowance { spender, .. } => vec![spender.as_str()],
            Call::TransferFrom { owner, to, .. } => vec![owner.as_str(), to.as_str()],
        }
    }

    pub fn amount(&self) -> u128 {
        match self {
            Call::Transfer { amount, .. }
            | Call::Approve { amount, .. }
            | Call::IncreaseAllowance { amount, .. }
            | Call::DecreaseAllowance { amount, .. }
            | Call::TransferFrom { amount, .. } => amount.get(),
        }
    }
}

/// Assertions checked after a step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expect {
    /// The call must be rejected with this kind, or with any kind for
    /// `"any"`; absent (with no `error_message`) means it must succeed
    #[serde(default)]
    pub error: Option<ErrorExpect>,

    /// The rejection message must start with this text
    #[serde(default)]
    pub error_message: Option<String>,

    /// Absolute balances after the step
    #[serde(default)]
    pub balances: BTreeMap<String, Amount>,

    /// Signed balance changes across the step
    #[serde(default)]
    pub balance_changes: BTreeMap<String, Delta>,

    #[serde(default)]
    pub allowances: Vec<AllowanceExpect>,

    /// Exact events emitted by the step, in order
    #[serde(default)]
    pub events: Option<Vec<EventExpect>>,

    /// Event kinds that must appear among the step's events
    #[serde(default)]
    pub emits: Vec<EventName>,
}

impl Expect {
    pub fn expects_rejection(&self) -> bool {
        self.error.is_some() || self.error_message.is_some()
    }

    /// Labels the expectations mention, in a stable order.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        labels.extend(self.balances.keys().map(String::as_str));
        labels.extend(self.balance_changes.keys().map(String::as_str));
        for allowance in &self.allowances {
            labels.push(&allowance.owner);
            labels.push(&allowance.spender);
        }
        for event in self.events.iter().flatten() {
            labels.extend(event.labels());
        }
        labels
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllowanceExpect {
    pub owner: String,
    pub spender: String,
    pub amount: Amount,
}

/// Expected rejection: a specific kind, or any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorExpect {
    Any,
    Kind(ErrorKind),
}

impl ErrorExpect {
    pub fn matches(&self, kind: ErrorKind) -> bool {
        match self {
            ErrorExpect::Any => true,
            ErrorExpect::Kind(expected) => *expected == kind,
        }
    }
}

impl fmt::Display for ErrorExpect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorExpect::Any => f.write_str("any"),
            ErrorExpect::Kind(kind) => write!(f, "{}", kind),
        }
    }
}

impl<'de> Deserialize<'de> for ErrorExpect {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value == "any" {
            return Ok(ErrorExpect::Any);
        }
        let kind: StrDeserializer<'_, D::Error> = value.as_str().into_deserializer();
        ErrorKind::deserialize(kind).map(ErrorExpect::Kind)
    }
}

/// Event kind without its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    Transfer,
    Approval,
}

impl EventName {
    pub fn matches(&self, event: &LedgerEvent) -> bool {
        matches!(
            (self, event),
            (EventName::Transfer, LedgerEvent::Transfer { .. })
                | (EventName::Approval, LedgerEvent::Approval { .. })
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::Transfer => "transfer",
            EventName::Approval => "approval",
        }
    }
}

/// An expected event, addressed by labels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum EventExpect {
    Transfer {
        from: String,
        to: String,
        amount: Amount,
    },
    Approval {
        owner: String,
        spender: String,
        amount: Amount,
    },
}

impl EventExpect {
    pub fn labels(&self) -> [&str; 2] {
        match self {
            EventExpect::Transfer { from, to, .. } => [from.as_str(), to.as_str()],
            EventExpect::Approval { owner, spender, .. } => [owner.as_str(), spender.as_str()],
        }
    }
}
