//! Steps covering special categories.
#![expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd hands placeholders to steps as owned strings"
)]

use anyhow::{Result, ensure};
use hyprconf::SpecialCategoryOptions;
use rstest_bdd_macros::{given, then};
use test_helpers::text::{list, unquote};

use super::with_config;
use crate::fixtures::ConfigContext;

fn declare(
    context: &ConfigContext,
    name: &str,
    entry: &str,
    options: SpecialCategoryOptions,
) -> Result<()> {
    with_config(context, |config| {
        let category = unquote(name);
        config.add_special_category(category, options)?;
        config.add_special_value(category, unquote(entry), 0.0)?;
        Ok(())
    })
}

#[given("a required special category {name} with a float value {entry}")]
fn required_category(config_context: &ConfigContext, name: String, entry: String) -> Result<()> {
    declare(config_context, &name, &entry, SpecialCategoryOptions::default())
}

#[given("an optional special category {name} with a float value {entry}")]
fn optional_category(config_context: &ConfigContext, name: String, entry: String) -> Result<()> {
    let options = SpecialCategoryOptions {
        ignore_missing: true,
        ..SpecialCategoryOptions::default()
    };
    declare(config_context, &name, &entry, options)
}

#[given("a static special category {name} with a float value {entry}")]
fn static_category(config_context: &ConfigContext, name: String, entry: String) -> Result<()> {
    declare(config_context, &name, &entry, SpecialCategoryOptions::unkeyed())
}

#[then("the special category {name} lists the keys {keys}")]
fn lists_keys(config_context: &ConfigContext, name: String, keys: String) -> Result<()> {
    with_config(config_context, |config| {
        let found = config.list_keys_for_special_category(unquote(&name));
        ensure!(found == list(&keys), "keys discovered: {found:?}");
        Ok(())
    })
}

#[then("the special value {entry} of {name} for key {key} reads {expected}")]
fn special_value_reads(
    config_context: &ConfigContext,
    entry: String,
    name: String,
    key: String,
    expected: String,
) -> Result<()> {
    with_config(config_context, |config| {
        let value = config
            .get_special(unquote(&name), unquote(&entry), Some(unquote(&key)))?
            .to_string();
        ensure!(value == unquote(&expected), "{entry} reads '{value}'");
        Ok(())
    })
}

#[then("the static value {entry} of {name} reads {expected}")]
fn static_value_reads(
    config_context: &ConfigContext,
    entry: String,
    name: String,
    expected: String,
) -> Result<()> {
    with_config(config_context, |config| {
        let value = config
            .get_special(unquote(&name), unquote(&entry), None)?
            .to_string();
        ensure!(value == unquote(&expected), "{entry} reads '{value}'");
        Ok(())
    })
}
