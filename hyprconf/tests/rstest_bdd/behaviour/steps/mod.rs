//! Behavioural step modules registered with `rstest-bdd`.

pub mod parse_steps;
pub mod special_steps;

use anyhow::{Result, anyhow};
use hyprconf::Config;

use crate::fixtures::ConfigContext;

/// Runs `f` against the scenario's configuration, storing it back afterwards.
pub(crate) fn with_config<T>(
    context: &ConfigContext,
    f: impl FnOnce(&mut Config) -> Result<T>,
) -> Result<T> {
    let mut config = context
        .config
        .take()
        .ok_or_else(|| anyhow!("no configuration has been created"))?;
    let outcome = f(&mut config);
    context.config.set(config);
    outcome
}
