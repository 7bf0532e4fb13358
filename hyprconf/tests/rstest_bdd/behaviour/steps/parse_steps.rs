//! Steps declaring plain values, parsing text and checking the outcome.
#![expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd hands placeholders to steps as owned strings"
)]

use anyhow::{Result, anyhow, ensure};
use hyprconf::{Config, ConfigOptions};
use rstest_bdd_macros::{given, then, when};
use test_helpers::text::{config_text, unquote};

use super::with_config;
use crate::fixtures::ConfigContext;

fn create(context: &ConfigContext, text: &str, throw_all_errors: bool) -> Result<()> {
    ensure!(
        context.config.is_empty(),
        "configuration already initialised"
    );
    let options = ConfigOptions {
        path_is_stream: true,
        throw_all_errors,
        ..ConfigOptions::default()
    };
    context.config.set(Config::new(config_text(text), options));
    Ok(())
}

#[given("a configuration from {text}")]
fn configuration(config_context: &ConfigContext, text: String) -> Result<()> {
    create(config_context, &text, false)
}

#[given("a configuration collecting every error from {text}")]
fn collecting_configuration(config_context: &ConfigContext, text: String) -> Result<()> {
    create(config_context, &text, true)
}

#[given("an integer value {path} defaulting to {default:i64}")]
fn integer_value(config_context: &ConfigContext, path: String, default: i64) -> Result<()> {
    with_config(config_context, |config| {
        Ok(config.add_value(unquote(&path), default)?)
    })
}

#[given("a text value {path} defaulting to {default}")]
fn text_value(config_context: &ConfigContext, path: String, default: String) -> Result<()> {
    with_config(config_context, |config| {
        Ok(config.add_value(unquote(&path), unquote(&default))?)
    })
}

#[given("a vector value {path}")]
fn vector_value(config_context: &ConfigContext, path: String) -> Result<()> {
    with_config(config_context, |config| {
        Ok(config.add_value(unquote(&path), (0.0, 0.0))?)
    })
}

#[when("the configuration is parsed")]
fn parse(config_context: &ConfigContext) -> Result<()> {
    let result = with_config(config_context, |config| {
        config.commence();
        Ok(config.parse()?)
    })?;
    config_context.result.set(result);
    Ok(())
}

#[when("the line {line} is parsed dynamically")]
fn parse_dynamic(config_context: &ConfigContext, line: String) -> Result<()> {
    let result = with_config(config_context, |config| {
        Ok(config.parse_dynamic(unquote(&line))?)
    })?;
    config_context.result.set(result);
    Ok(())
}

#[then("the parse succeeds")]
fn parse_succeeds(config_context: &ConfigContext) -> Result<()> {
    let messages = config_context
        .result
        .with_ref(hyprconf::ParseResult::messages)
        .ok_or_else(|| anyhow!("no parse has run"))?;
    ensure!(messages.is_empty(), "unexpected errors: {messages:?}");
    Ok(())
}

#[then("the number of reported errors is {count:usize}")]
fn error_count(config_context: &ConfigContext, count: usize) -> Result<()> {
    let messages = config_context
        .result
        .with_ref(hyprconf::ParseResult::messages)
        .ok_or_else(|| anyhow!("no parse has run"))?;
    ensure!(messages.len() == count, "errors reported: {messages:?}");
    Ok(())
}

#[then("an error mentions {fragment}")]
fn error_mentions(config_context: &ConfigContext, fragment: String) -> Result<()> {
    let message = config_context
        .result
        .with_ref(hyprconf::ParseResult::error_message)
        .flatten()
        .ok_or_else(|| anyhow!("expected the parse to fail"))?;
    let wanted = unquote(&fragment);
    ensure!(
        message.contains(wanted),
        "'{message}' does not mention '{wanted}'"
    );
    Ok(())
}

#[then("the value {path} reads {expected}")]
fn value_reads(config_context: &ConfigContext, path: String, expected: String) -> Result<()> {
    with_config(config_context, |config| {
        let value = config.get(unquote(&path))?.to_string();
        ensure!(value == unquote(&expected), "{path} reads '{value}'");
        Ok(())
    })
}

#[then("the value {path} was set by the user")]
fn set_by_user(config_context: &ConfigContext, path: String) -> Result<()> {
    with_config(config_context, |config| {
        let (_, marked) = config.get_with_meta(unquote(&path))?;
        ensure!(marked, "{path} still holds its default");
        Ok(())
    })
}

#[then("the value {path} keeps its default")]
fn keeps_default(config_context: &ConfigContext, path: String) -> Result<()> {
    with_config(config_context, |config| {
        let (_, marked) = config.get_with_meta(unquote(&path))?;
        ensure!(!marked, "{path} was marked as set by the user");
        Ok(())
    })
}
