//! Unit tests for the built-in line engine.

use std::ops::ControlFlow;

use anyhow::{Context, Result, anyhow, ensure};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};

use super::{
    Assignment, EventSink, Line, LineEngine, SourceError, SourceLocation, SourceRef, TextEngine,
    lex_line, split_keyed_path, strip_comment,
};

#[derive(Debug, Default)]
struct Recorder {
    events: Vec<String>,
    assignments: Vec<Assignment>,
    errors: Vec<String>,
    stop_after_errors: Option<usize>,
}

impl EventSink for Recorder {
    fn on_assignment(&mut self, assignment: Assignment) -> ControlFlow<()> {
        self.events
            .push(format!("{} = {}", assignment.path, assignment.token.text));
        self.assignments.push(assignment);
        ControlFlow::Continue(())
    }

    fn on_category_enter(&mut self, path: &str, _location: &SourceLocation) -> ControlFlow<()> {
        self.events.push(format!("enter {path}"));
        ControlFlow::Continue(())
    }

    fn on_category_exit(&mut self, path: &str, _location: &SourceLocation) -> ControlFlow<()> {
        self.events.push(format!("exit {path}"));
        ControlFlow::Continue(())
    }

    fn on_special_key(
        &mut self,
        category: &str,
        key: &str,
        _location: &SourceLocation,
    ) -> ControlFlow<()> {
        self.events.push(format!("key {category}[{key}]"));
        ControlFlow::Continue(())
    }

    fn on_engine_error(&mut self, error: SourceError) -> ControlFlow<()> {
        self.errors.push(error.to_string());
        match self.stop_after_errors {
            Some(limit) if self.errors.len() >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}

#[fixture]
fn engine() -> LineEngine {
    LineEngine::new()
}

fn scan_text(engine: &mut LineEngine, text: &str) -> Result<Recorder> {
    let handle = engine
        .open(&SourceRef::Stream(text.to_owned()))
        .map_err(|err| anyhow!(err.to_string()))?;
    let mut recorder = Recorder::default();
    let _flow = engine.scan(handle, &mut recorder);
    Ok(recorder)
}

#[rstest]
#[case("a = 1 # trailing", "a = 1 ")]
#[case("color = ##fff", "color = #fff")]
#[case("# only a comment", "")]
fn strips_comments(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(strip_comment(raw), expected);
}

#[rstest]
#[case("", Line::Blank)]
#[case("}", Line::Close)]
#[case("general {", Line::Open { name: "general", key: None })]
#[case("device[my-mouse] {", Line::Open { name: "device", key: Some("my-mouse") })]
#[case("$GAPS = 5", Line::Variable { name: "GAPS", value: "5" })]
#[case("gaps_in = 5", Line::Assign { key: "gaps_in", value: "5" })]
#[case("exec = a = b", Line::Assign { key: "exec", value: "a = b" })]
fn classifies_lines(#[case] raw: &str, #[case] expected: Line<'static>) {
    assert_eq!(lex_line(raw), expected);
}

#[rstest]
#[case("dangling")]
#[case("= 5")]
#[case("device[] {")]
#[case("a = {")]
fn flags_invalid_lines(#[case] raw: &str) {
    assert!(matches!(lex_line(raw), Line::Invalid(_)), "{raw} should be invalid");
}

#[rstest]
#[case("general:border_size", Some(("general:border_size", None)))]
#[case("device[mouse]:sensitivity", Some(("device:sensitivity", Some("mouse"))))]
#[case("device[mouse:x", None)]
#[case("a::b", None)]
fn splits_keyed_paths(#[case] raw: &str, #[case] expected: Option<(&str, Option<&str>)>) {
    let owned = expected.map(|(path, key)| (path.to_owned(), key.map(str::to_owned)));
    assert_eq!(split_keyed_path(raw), owned);
}

#[rstest]
fn emits_nested_category_events(mut engine: LineEngine) -> Result<()> {
    let recorder = scan_text(
        &mut engine,
        "general {\n  border_size = 3\n  snap {\n    enabled = yes\n  }\n}\ntop = 1\n",
    )?;
    let expected = vec![
        "enter general",
        "general:border_size = 3",
        "enter general:snap",
        "general:snap:enabled = yes",
        "exit general:snap",
        "exit general",
        "top = 1",
    ];
    ensure!(recorder.events == expected, "unexpected events {:?}", recorder.events);
    ensure!(recorder.errors.is_empty(), "unexpected errors {:?}", recorder.errors);
    Ok(())
}

#[rstest]
fn emits_special_key_before_entering(mut engine: LineEngine) -> Result<()> {
    let recorder = scan_text(&mut engine, "device[mouse] {\n  sensitivity = 0.5\n}\n")?;
    ensure!(
        recorder.events.first().map(String::as_str) == Some("key device[mouse]"),
        "special key must be announced first: {:?}",
        recorder.events
    );
    let assignment = recorder
        .assignments
        .first()
        .context("assignment expected")?;
    ensure!(assignment.path == "device:sensitivity", "path {}", assignment.path);
    ensure!(assignment.key.as_deref() == Some("mouse"), "key {:?}", assignment.key);
    ensure!(assignment.location.line == 2, "line {}", assignment.location.line);
    Ok(())
}

#[rstest]
fn substitutes_longest_variable_first(mut engine: LineEngine) -> Result<()> {
    let recorder = scan_text(&mut engine, "$GAP = 1\n$GAP_IN = 7\nvalue = $GAP_IN $GAP\n")?;
    let assignment = recorder.assignments.first().context("assignment")?;
    ensure!(assignment.token.text == "7 1", "got {}", assignment.token.text);
    ensure!(engine.variable("GAP_IN") == Some("7"), "variable not kept");
    Ok(())
}

#[rstest]
fn attaches_colours(mut engine: LineEngine) -> Result<()> {
    let recorder = scan_text(&mut engine, "$ACCENT = rgba(33ccffee)\nborder = $ACCENT\n")?;
    let assignment = recorder.assignments.first().context("assignment")?;
    ensure!(assignment.token.text == "rgba(33ccffee)", "text must be kept");
    ensure!(
        assignment.token.color == Some(0xEE33_CCFF),
        "colour {:?}",
        assignment.token.color
    );
    Ok(())
}

#[rstest]
#[expect(
    clippy::panic_in_result_fn,
    reason = "assertions read more clearly for event sequences"
)]
fn reports_unterminated_and_stray_blocks(mut engine: LineEngine) -> Result<()> {
    let recorder = scan_text(&mut engine, "}\ncat {\n  a = 1\n")?;
    assert_eq!(recorder.errors.len(), 2);
    assert!(recorder.errors.iter().any(|e| e.contains("unexpected '}'")));
    assert!(recorder.errors.iter().any(|e| e.contains("missing '}'")));
    Ok(())
}

#[rstest]
#[expect(
    clippy::panic_in_result_fn,
    reason = "assertions read more clearly for event sequences"
)]
fn stops_when_the_sink_breaks(mut engine: LineEngine) -> Result<()> {
    let handle = engine
        .open(&SourceRef::Stream("bogus\nalso bogus\nx = 1\n".into()))
        .map_err(|err| anyhow!(err.to_string()))?;
    let mut recorder = Recorder {
        stop_after_errors: Some(1),
        ..Recorder::default()
    };
    let flow = engine.scan(handle, &mut recorder);
    assert_eq!(flow, ControlFlow::Break(()));
    assert_eq!(recorder.errors.len(), 1);
    assert!(recorder.assignments.is_empty());
    Ok(())
}

fn utf8_dir(dir: &tempfile::TempDir) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .map_err(|p| anyhow!("temporary directory is not UTF-8: {}", p.display()))
}

#[rstest]
#[expect(
    clippy::panic_in_result_fn,
    reason = "assertions read more clearly for event sequences"
)]
fn follows_includes_relative_to_root(mut engine: LineEngine) -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = utf8_dir(&dir)?;
    std::fs::write(root.join("colors.conf"), "accent = 5\n")?;
    std::fs::write(root.join("main.conf"), "source = colors.conf\nafter = 1\n")?;
    let handle = engine
        .open(&SourceRef::Path(root.join("main.conf")))
        .map_err(|err| anyhow!(err.to_string()))?;
    let mut recorder = Recorder::default();
    let _flow = engine.scan(handle, &mut recorder);
    assert_eq!(recorder.events, vec!["accent = 5", "after = 1"]);
    assert!(recorder.errors.is_empty(), "{:?}", recorder.errors);
    Ok(())
}

#[rstest]
#[expect(
    clippy::panic_in_result_fn,
    reason = "assertions read more clearly for event sequences"
)]
fn rejects_cyclic_includes(mut engine: LineEngine) -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = utf8_dir(&dir)?;
    std::fs::write(root.join("a.conf"), "source = b.conf\n")?;
    std::fs::write(root.join("b.conf"), "source = a.conf\n")?;
    engine.change_root_path(&root);
    let handle = engine
        .open(&SourceRef::Path(root.join("a.conf")))
        .map_err(|err| anyhow!(err.to_string()))?;
    let mut recorder = Recorder::default();
    let _flow = engine.scan(handle, &mut recorder);
    assert_eq!(recorder.errors.len(), 1);
    assert!(recorder.errors.iter().any(|e| e.contains("cyclic source=")));
    Ok(())
}

#[rstest]
#[expect(
    clippy::panic_in_result_fn,
    reason = "assertions read more clearly for event sequences"
)]
fn reports_missing_includes(mut engine: LineEngine) -> Result<()> {
    let recorder = scan_text(&mut engine, "source = /definitely/not/here.conf\n")?;
    assert_eq!(recorder.errors.len(), 1);
    assert!(recorder.errors.iter().any(|e| e.contains("could not be included")));
    Ok(())
}

#[rstest]
#[expect(clippy::expect_used, reason = "test panics are acceptable")]
fn distinguishes_missing_files(engine: LineEngine) {
    let err = engine
        .open(&SourceRef::Path(Utf8PathBuf::from("/definitely/not/here.conf")))
        .expect_err("missing file must fail");
    assert!(err.is_not_found());
}
