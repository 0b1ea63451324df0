//! Scenario files: a deployment plus scripted calls with expectations.
//!
//! A scenario is the harness counterpart of a fixture-based test suite. The
//! `[deploy]` table describes the fixture; every `[[step]]` is one call made
//! by a connected signer, followed by the assertions that must hold after it.

mod accounts;
mod amount;
mod load;
mod model;

pub use accounts::Accounts;
pub use amount::{Amount, Delta};
pub use load::{load_scenario, parse_scenario, ScenarioFormat};
pub use model::{
    AllowanceExpect, Call, Deploy, ErrorExpect, EventExpect, EventName, Expect, Scenario, Step,
};
