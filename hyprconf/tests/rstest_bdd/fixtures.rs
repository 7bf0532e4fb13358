//! Shared fixtures for the behavioural scenarios.

use hyprconf::{Config, ParseResult};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// State shared between the steps of one scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct ConfigContext {
    /// Configuration being declared, parsed and inspected.
    pub config: Slot<Config>,
    /// Outcome of the most recent parse.
    pub result: Slot<ParseResult>,
}

/// Creates an empty context for each scenario.
#[fixture]
pub fn config_context() -> ConfigContext {
    ConfigContext::default()
}
