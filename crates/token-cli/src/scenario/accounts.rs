//! Signer labels and the addresses behind them.

use std::collections::HashMap;

use token_core::Address;

use super::model::Scenario;
use crate::constants::ZERO_LABEL;
use crate::errors::CliError;

/// Label table for one scenario run.
///
/// Labels get deterministic addresses in first-seen order: the holder is
/// `from_u128(1)`, the next label `from_u128(2)`, and so on. The reserved
/// label `zero` is the zero address and is never part of the ordered list.
#[derive(Debug, Clone, Default)]
pub struct Accounts {
    ordered: Vec<(String, Address)>,
    by_label: HashMap<String, Address>,
}

impl Accounts {
    /// Register every label `scenario` mentions.
    pub fn from_scenario(scenario: &Scenario) -> anyhow::Result<Self> {
        let mut accounts = Self::default();

        let holder = scenario.holder_label();
        if holder == ZERO_LABEL {
            return Err(CliError::invalid_input("deploy.holder cannot be the zero address").into());
        }
        accounts.register(holder)?;
        for signer in &scenario.deploy.signers {
            accounts.register(signer)?;
        }

        for (index, step) in scenario.steps.iter().enumerate() {
            let labels = step
                .caller
                .iter()
                .map(String::as_str)
                .chain(step.call.labels())
                .chain(step.expect.labels());
            for label in labels {
                accounts.register(label).map_err(|e| {
                    CliError::invalid_input(format!("step {}: {}", index + 1, e))
                })?;
            }
        }

        Ok(accounts)
    }

    fn register(&mut self, label: &str) -> anyhow::Result<Address> {
        validate_label(label)?;
        if label == ZERO_LABEL {
            return Ok(Address::ZERO);
        }
        if let Some(address) = self.by_label.get(label) {
            return Ok(*address);
        }
        let address = Address::from_u128(self.ordered.len() as u128 + 1);
        self.ordered.push((label.to_string(), address));
        self.by_label.insert(label.to_string(), address);
        Ok(address)
    }

    /// Address of a registered label.
    pub fn address(&self, label: &str) -> anyhow::Result<Address> {
        if label == ZERO_LABEL {
            return Ok(Address::ZERO);
        }
        self.by_label
            .get(label)
            .copied()
            .ok_or_else(|| CliError::invalid_input(format!("unknown account label {:?}", label)).into())
    }

    /// Label for `address`, if it belongs to this run.
    pub fn label_of(&self, address: &Address) -> Option<&str> {
        if address.is_zero() {
            return Some(ZERO_LABEL);
        }
        self.ordered
            .iter()
            .find(|(_, candidate)| candidate == address)
            .map(|(label, _)| label.as_str())
    }

    /// Label for display; unknown addresses fall back to their full form.
    pub fn display(&self, address: &Address) -> String {
        self.label_of(address)
            .map(str::to_string)
            .unwrap_or_else(|| address.to_string())
    }

    /// Registered labels with their addresses, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Address)> + '_ {
        self.ordered
            .iter()
            .map(|(label, address)| (label.as_str(), *address))
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.ordered.iter().map(|(_, address)| *address).collect()
    }
}

fn validate_label(label: &str) -> anyhow::Result<()> {
    if label.is_empty() {
        return Err(CliError::invalid_input("account labels cannot be empty").into());
    }
    if !label
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(CliError::invalid_input(format!(
            "invalid account label {:?} (use letters, digits, '_' or '-')",
            label
        ))
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::parse_scenario;
    use crate::scenario::ScenarioFormat;

    fn scenario(text: &str) -> Scenario {
        parse_scenario(text, ScenarioFormat::Toml).unwrap()
    }

    #[test]
    fn test_labels_in_first_seen_order() {
        let accounts = Accounts::from_scenario(&scenario(
            r#"
            [deploy]
            signers = ["addr1"]

            [[step]]
            op = "transfer_from"
            caller = "addr2"
            owner = "owner"
            to = "addr3"
            amount = 1
            "#,
        ))
        .unwrap();

        let labels: Vec<&str> = accounts.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["owner", "addr1", "addr2", "addr3"]);
        assert_eq!(accounts.address("owner").unwrap(), Address::from_u128(1));
        assert_eq!(accounts.address("addr3").unwrap(), Address::from_u128(4));
    }

    #[test]
    fn test_zero_label_is_reserved() {
        let accounts = Accounts::from_scenario(&scenario(
            r#"
            [[step]]
            op = "transfer"
            to = "zero"
            amount = 1
            [step.expect]
            error = "zero_address"
            "#,
        ))
        .unwrap();

        assert_eq!(accounts.iter().count(), 1);
        assert_eq!(accounts.address("zero").unwrap(), Address::ZERO);
        assert_eq!(accounts.label_of(&Address::ZERO), Some("zero"));
    }

    #[test]
    fn test_zero_holder_rejected() {
        let err = Accounts::from_scenario(&scenario("[deploy]\nholder = \"zero\"\n")).unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }

    #[test]
    fn test_invalid_label_rejected() {
        let err = Accounts::from_scenario(&scenario(
            r#"
            [[step]]
            op = "transfer"
            to = "bad label"
            amount = 1
            "#,
        ))
        .unwrap_err();
        assert!(err.to_string().contains("step 1"));
    }

    #[test]
    fn test_unknown_address_displays_in_full() {
        let accounts = Accounts::from_scenario(&scenario("")).unwrap();
        let stranger = Address::from_u128(99);
        assert_eq!(accounts.display(&stranger), stranger.to_string());
        assert_eq!(accounts.display(&Address::from_u128(1)), "owner");
    }
}
