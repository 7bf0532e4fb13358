//! Classification of raw tokens and schema inference from source text.

use anyhow::{Result, ensure};
use hyprconf::value::{ConfigValue, Vec2};
use hyprconf::{classify_token, infer_schema};
use rstest::rstest;

#[rstest]
#[case("yes", ConfigValue::Int(1))]
#[case("off", ConfigValue::Int(0))]
#[case("rgb(000000)", ConfigValue::Int(0xFF00_0000))]
#[case("rgba(nonsense)", ConfigValue::Int(0))]
#[case("-12", ConfigValue::Int(-12))]
#[case("0x1F", ConfigValue::Int(31))]
#[case("2.5", ConfigValue::Float(2.5))]
#[case("1 -1.5", ConfigValue::Vec2(Vec2::new(1.0, -1.5)))]
#[case("$ACCENT", ConfigValue::Text("$ACCENT".into()))]
#[case("dwindle", ConfigValue::Text("dwindle".into()))]
fn classifies_tokens(#[case] raw: &str, #[case] expected: ConfigValue) {
    assert_eq!(classify_token(raw), expected);
}

#[rstest]
fn infers_paths_from_blocks_and_keys() -> Result<()> {
    let schema = infer_schema(concat!(
        "$GAPS = 5\n",
        "source = other.conf\n",
        "general {\n",
        "  gaps_in = 5\n",
        "  gaps_in = wide\n",
        "  snap {\n",
        "    enabled = true\n",
        "  }\n",
        "}\n",
        "device[mouse] {\n",
        "  sensitivity = 0.5\n",
        "}\n",
        "device[pad]:accel = 1 1\n",
        "not a line\n",
    ));
    let paths: Vec<&str> = schema.keys().map(String::as_str).collect();
    ensure!(
        paths
            == [
                "general:gaps_in",
                "general:snap:enabled",
                "device:sensitivity",
                "device:accel"
            ],
        "paths {paths:?}"
    );
    ensure!(
        schema.get("general:gaps_in") == Some(&ConfigValue::Int(5)),
        "first occurrence wins"
    );
    Ok(())
}

#[rstest]
fn variable_first_keeps_the_path_textual() -> Result<()> {
    let schema = infer_schema("$G = 1\nratio = $G\nratio = 2\n");
    ensure!(
        schema.get("ratio") == Some(&ConfigValue::Text("$G".into())),
        "schema {schema:?}"
    );
    Ok(())
}
