//! The resolve and check commands run against a manifest on disk.

use std::path::PathBuf;
use std::sync::Mutex;

use swatch::cli::check::{self, CheckArgs};
use swatch::cli::resolve::{self, ResolveArgs};
use swatch::output::Printer;
use swatch::SwatchError;

// Both commands apply the manifest's prefix matching switch process-wide
static FLAG: Mutex<()> = Mutex::new(());

const MANIFEST: &str = r##"
default_scheme: dark
colours:
  primary: "#FF0000"
  primary.lvl1: $primary
  secondary: "#0000FF"
schemes:
  dark:
    primary: "#880000"
  light: {}
expected:
  - primary
  - primary.lvl1.hover
"##;

fn manifest(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("swatch.yaml");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

fn resolve_args(expressions: &[&str], strict: bool) -> ResolveArgs {
    ResolveArgs {
        expressions: expressions.iter().map(|e| e.to_string()).collect(),
        scheme: None,
        json: false,
        strict,
    }
}

#[test]
fn resolve_tolerates_unknown_names() {
    let _flag = FLAG.lock().unwrap_or_else(|e| e.into_inner());
    let (_dir, path) = manifest(MANIFEST);

    let args = resolve_args(&["blend(primary, tertiary, 30%)", "tertiary"], false);
    assert!(resolve::run(args, Some(&path), &Printer::plain()).is_ok());
}

#[test]
fn resolve_prints_json() {
    let _flag = FLAG.lock().unwrap_or_else(|e| e.into_inner());
    let (_dir, path) = manifest(MANIFEST);

    let mut args = resolve_args(&["primary.lvl1", "tertiary"], false);
    args.json = true;
    args.scheme = Some("light".to_string());
    assert!(resolve::run(args, Some(&path), &Printer::plain()).is_ok());
}

#[test]
fn strict_resolve_fails_on_unknown_names() {
    let _flag = FLAG.lock().unwrap_or_else(|e| e.into_inner());
    let (_dir, path) = manifest(MANIFEST);

    let args = resolve_args(&["tertiary"], true);
    let err = resolve::run(args, Some(&path), &Printer::plain()).unwrap_err();
    assert!(matches!(err, SwatchError::Coverage { .. }));

    let args = resolve_args(&["primary.lvl1.hover"], true);
    assert!(resolve::run(args, Some(&path), &Printer::plain()).is_ok());
}

#[test]
fn resolve_rejects_bad_input() {
    let _flag = FLAG.lock().unwrap_or_else(|e| e.into_inner());
    let (_dir, path) = manifest(MANIFEST);

    let args = resolve_args(&["opacity(primary"], false);
    let err = resolve::run(args, Some(&path), &Printer::plain()).unwrap_err();
    assert!(matches!(err, SwatchError::Parse { .. }));

    let mut args = resolve_args(&["primary"], false);
    args.scheme = Some("dusk".to_string());
    let err = resolve::run(args, Some(&path), &Printer::plain()).unwrap_err();
    assert!(matches!(err, SwatchError::Config { .. }));
}

#[test]
fn check_passes_with_fallback_warnings() {
    let _flag = FLAG.lock().unwrap_or_else(|e| e.into_inner());
    let (_dir, path) = manifest(MANIFEST);

    assert!(check::run(CheckArgs { scheme: None }, Some(&path), &Printer::plain()).is_ok());
}

#[test]
fn check_fails_without_prefix_matching() {
    let _flag = FLAG.lock().unwrap_or_else(|e| e.into_inner());
    let (_dir, path) = manifest(&format!("prefix_matching: false\n{}", MANIFEST));

    let result = check::run(
        CheckArgs { scheme: Some("light".to_string()) },
        Some(&path),
        &Printer::plain(),
    );
    swatch::set_prefix_matching(true);

    assert!(matches!(result, Err(SwatchError::Coverage { .. })));
}

#[test]
fn missing_manifest_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("swatch.yaml");

    let err = check::run(CheckArgs { scheme: None }, Some(&path), &Printer::plain()).unwrap_err();
    assert!(matches!(err, SwatchError::Io { .. }));
}
