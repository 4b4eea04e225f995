//! Diagnostics reported while compiling, and how policy shapes them.

mod common;

use std::path::Path;

use common::{quiet_orchestrator, FakeCompiler};
use revue_compiler::CompileOptions;
use revue_config::{load_config_from_str, ModuleFormat};
use revue_diagnostics::{Category, CollectingReporter, RecordKind, Severity};

const BROKEN: &str = "<template>\n  <div></span></div>\n</template>\n";

#[test]
fn parser_error_is_logged_once_and_compile_continues() {
    let (orchestrator, reporter) = quiet_orchestrator(FakeCompiler::new("3.4.21"), ModuleFormat::Dynamic);
    let out = orchestrator.compile(BROKEN, Path::new("src/Broken.vue")).unwrap();
    assert!(out.code.contains("function render"));

    let records = reporter.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].kind, RecordKind::Header);
    assert_eq!(records[0].text, "[revue] parser errors in file: src/Broken.vue");
    assert_eq!(records[1].kind, RecordKind::Detail);
    assert_eq!(records[1].text, "[revue: parser error] Invalid end tag.");
    assert!(records
        .iter()
        .all(|r| r.severity == Severity::Error && r.category == Category::ParserError));
}

#[test]
fn clean_component_logs_nothing() {
    let (orchestrator, reporter) = quiet_orchestrator(FakeCompiler::new("3.4.21"), ModuleFormat::Dynamic);
    orchestrator
        .compile("<template><div></div></template>\n", Path::new("src/Ok.vue"))
        .unwrap();
    assert!(reporter.records().is_empty());
}

#[test]
fn configured_exclusions_silence_parser_errors() {
    let config = load_config_from_str(
        r#"
[parser.errors]
exclude = [{ regex = "end tag" }]
"#,
    )
    .unwrap();
    let options = CompileOptions::from_config(&config).unwrap();
    let reporter = std::sync::Arc::new(CollectingReporter::new());
    let orchestrator = revue_compiler::Orchestrator::new(FakeCompiler::new("3.4.21"), options)
        .unwrap()
        .with_reporter(reporter.clone());

    let out = orchestrator.compile(BROKEN, Path::new("src/Broken.vue")).unwrap();
    assert!(out.code.contains("function render"));
    assert!(reporter.records().is_empty());
}

#[test]
fn disabled_category_logs_nothing() {
    let config = load_config_from_str("no_log_parser_errors = true\n").unwrap();
    let options = CompileOptions::from_config(&config).unwrap();
    let reporter = std::sync::Arc::new(CollectingReporter::new());
    let orchestrator = revue_compiler::Orchestrator::new(FakeCompiler::new("2.7.16"), options)
        .unwrap()
        .with_reporter(reporter.clone());

    orchestrator.compile(BROKEN, Path::new("src/Broken.vue")).unwrap();
    assert!(reporter.records().is_empty());
}
