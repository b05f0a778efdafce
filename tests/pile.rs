use grok_rs::{CompileError, Pile, pattern::PatternError};
use std::path::PathBuf;

fn pattern_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("grok_rs_{}_{name}.grok", std::process::id()));
    std::fs::write(&path, contents).expect("pattern file should be written");
    path
}

#[test]
fn pile_when_several_patterns_compiled_then_first_match_wins() {
    let mut pile = Pile::new(None);
    pile.add_pattern("NUM", "[0-9]+")
        .expect("pattern should register");
    pile.add_pattern("ALPHA", "[a-z]+")
        .expect("pattern should register");

    pile.compile("^%{NUM:n}$")
        .expect("numeric pattern should compile");
    pile.compile("^%{ALPHA:word}$")
        .expect("alpha pattern should compile");
    pile.compile("^%{ALPHA:other}$")
        .expect("shadowed pattern should compile");

    let (compiled, matched) = pile
        .exec("hello")
        .expect("match should run")
        .expect("one pattern should match");
    assert_eq!(compiled.source(), "^%{ALPHA:word}$");
    assert_eq!(matched.named_str("word"), Some("hello"));

    let (compiled, _) = pile
        .exec("42")
        .expect("match should run")
        .expect("one pattern should match");
    assert_eq!(compiled.source(), "^%{NUM:n}$");

    assert!(pile.exec("!!").expect("match should run").is_none());
    assert_eq!(pile.len(), 3);
}

#[test]
fn pile_when_pattern_file_added_then_compile_sees_its_definitions() {
    let path = pattern_file("levels", "LEVEL (?:INFO|WARN|ERROR)\n");
    let mut pile = Pile::new(None);
    pile.add_patterns_from_file(&path);

    pile.compile("%{LEVEL:level}")
        .expect("file definitions should resolve");
    let (_, matched) = pile
        .exec("[WARN] disk almost full")
        .expect("match should run")
        .expect("level should match");
    assert_eq!(matched.named_str("level"), Some("WARN"));

    std::fs::remove_file(&path).expect("pattern file should be removed");
}

#[test]
fn pile_when_pattern_file_missing_then_compile_reports_io_error() {
    let mut pile = Pile::new(None);
    pile.add_patterns_from_file(std::env::temp_dir().join("grok_rs_pile_absent.grok"));

    let err = pile
        .compile("anything")
        .expect_err("missing file should fail");
    match err {
        CompileError::Pattern(PatternError::Io { .. }) => {}
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(pile.is_empty());
}

#[test]
fn pile_when_compile_fails_then_earlier_patterns_remain() {
    let mut pile = Pile::new(None);
    pile.compile("^ok$").expect("plain pattern should compile");

    assert!(pile.compile("%{MISSING}").is_err());
    assert_eq!(pile.iter().count(), 1);
    assert!(pile.exec("ok").expect("match should run").is_some());
}
