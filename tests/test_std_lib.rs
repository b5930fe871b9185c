//! Tests for the native functions installed by `Interpreter`.

extern crate ix;

use ix::runner::api::Interpreter;
use ix::runner::ds::error::ErrorKind;
use ix::runner::ds::value::{NumberType, Value};
use ix::runner::sink::BufferSink;
use ix::runner::std_lib::builtin_names;
use pretty_assertions::assert_eq;

fn run_lines(script: &str) -> Vec<String> {
    let mut sink = BufferSink::new();
    Interpreter::new().run_script(script, &mut sink).unwrap();
    sink.lines()
}

#[test]
fn test_builtin_table() {
    let mut names = builtin_names();
    names.sort();
    assert_eq!(names, vec!["len", "str", "time", "type_of"]);
}

#[test]
fn test_builtins_live_in_prelude() {
    let interpreter = Interpreter::new();
    assert!(interpreter.prelude().has_binding("len"));
    assert!(!interpreter.globals().has_binding("len"));
    assert!(interpreter.globals().get("len").is_ok());
}

#[test]
fn test_str_and_len() {
    assert_eq!(
        run_lines(r#"print str(12) + str(nil); print len("héllo"); print len(str(2.5));"#),
        vec!["12nil", "5", "3"]
    );
}

#[test]
fn test_type_of() {
    assert_eq!(
        run_lines(
            r#"
            print type_of(nil);
            print type_of(true);
            print type_of(1.5);
            print type_of("s");
            print type_of(type_of);
            print type_of(fn () {});
            "#
        ),
        vec!["nil", "boolean", "number", "string", "function", "function"]
    );
}

#[test]
fn test_time_is_positive_integer() {
    let mut sink = BufferSink::new();
    let result = Interpreter::new()
        .run_script("return time();", &mut sink)
        .unwrap();
    match result {
        Some(Value::Number(NumberType::Integer(ms))) => assert!(ms > 0),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_native_display_and_arity() {
    assert_eq!(run_lines("print len;"), vec!["<native fn len>"]);
    let mut sink = BufferSink::new();
    let err = Interpreter::new()
        .run_script("len();", &mut sink)
        .unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::ArityMismatch {
            expected: 1,
            found: 0
        }
    );
}

#[test]
fn test_len_rejects_non_strings() {
    let mut sink = BufferSink::new();
    let err = Interpreter::new()
        .run_script("len(3);", &mut sink)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeError(_)));
    assert_eq!(err.meta.map(|m| m.start_index), Some(0));
}

#[test]
fn test_builtins_can_be_shadowed() {
    assert_eq!(
        run_lines("fn len(x) { return 0; } print len(\"abc\");"),
        vec!["0"]
    );
}
