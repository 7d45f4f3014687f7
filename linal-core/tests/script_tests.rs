//! 集成测试 - 脚本解析、校验与执行

mod common;

use std::rc::Rc;

use common::{hooked_table, record, run, CallLog};
use linal_core::runtime::{ArgType, CallableTable, CollectingSink, Validator};
use linal_core::parse_script;

#[test]
fn test_round_trip_and_float_rejection() {
    let log: CallLog = Rc::default();
    let mut table = CallableTable::new();
    record(&mut table, &log, "cmd", &[ArgType::Str, ArgType::Int]);

    let (report, sink) = run(&table, "!cmd(\"a\", 3)\n!cmd(\"a\", 3.5)\n");

    assert_eq!(*log.borrow(), vec![r#"cmd("a", 3)"#]);
    assert_eq!(report.executed, 1);
    assert_eq!(
        sink.messages(),
        vec!["Command 'cmd' expects int as 2nd argument, but float was passed."]
    );
    assert!(sink.rendered[0].starts_with("test.lln:2:11: "));
}

#[test]
fn test_hooks_run_in_order_once() {
    let log: CallLog = Rc::default();
    let mut table = hooked_table(&log);
    record(&mut table, &log, "go", &[]);

    let (report, _) = run(&table, "!go()");

    assert_eq!(*log.borrow(), vec!["<pre>", "go()", "<post>"]);
    assert!(report.pre_ran && report.post_ran);
}

#[test]
fn test_empty_table_skips_hooks_and_diagnostics() {
    let log: CallLog = Rc::default();
    let table = hooked_table(&log);

    let (report, sink) = run(&table, "!nope() !also(1, 2)");

    assert!(log.borrow().is_empty());
    assert!(sink.is_empty());
    assert_eq!(report.executed, 0);
}

#[test]
fn test_unknown_command_against_non_matching_table() {
    let log: CallLog = Rc::default();
    let mut table = CallableTable::new();
    record(&mut table, &log, "real", &[]);

    let (report, sink) = run(&table, "!nope()");

    assert_eq!(sink.messages(), vec!["Command 'nope' doesn't exist."]);
    assert_eq!(report.executed, 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_prose_script_with_mixed_validity() {
    let log: CallLog = Rc::default();
    let mut table = hooked_table(&log);
    record(&mut table, &log, "move", &[ArgType::Float, ArgType::Float]);
    record(&mut table, &log, "say", &[ArgType::Str]);
    record(&mut table, &log, "wait", &[ArgType::Bool]);

    let source = "\
The knight !move(1, 2.5) slowly.
Then !say(\"hello\\tworld\") and !say().
Finally !wait(True) !wait(\"no\") !move(1 2)
!teleport(0, 0)
";
    let (report, sink) = run(&table, source);

    assert_eq!(
        *log.borrow(),
        vec![
            "<pre>",
            "move(1, 2.5)",
            "say(\"hello\\tworld\")",
            "wait(true)",
            "<post>"
        ]
    );
    assert_eq!(report.executed, 3);
    assert_eq!(report.rejected, 4);
    assert_eq!(
        sink.messages(),
        vec![
            "Command 'say' needs 1 arguments, only 0 were passed.",
            "Command 'wait' expects bool as 1st argument, but string was passed.",
            "Command 'move' is malformed.",
            "Command 'teleport' doesn't exist."
        ]
    );
}

#[test]
fn test_validator_twice_is_stable() {
    let log: CallLog = Rc::default();
    let mut table = CallableTable::new();
    record(&mut table, &log, "cmd", &[ArgType::Int, ArgType::Int]);
    let source = "!cmd(1) !cmd(1,2,3) !cmd(true, 2) !cmd(1.0, 2)";
    let mut invocations = parse_script(source, "test.lln");
    let validator = Validator::new(&table);

    let mut first = CollectingSink::new();
    validator.validate_all(&mut invocations, source, &mut first);
    let mut second = CollectingSink::new();
    validator.validate_all(&mut invocations, source, &mut second);

    assert_eq!(first.messages(), second.messages());
    assert_eq!(
        first.messages()[..2],
        [
            "Command 'cmd' needs 2 arguments, only 1 were passed.".to_string(),
            "Command 'cmd' needs 2 arguments, but 3 were passed.".to_string()
        ]
    );
    let survivors: Vec<bool> = invocations.iter().map(|i| i.is_resolved()).collect();
    assert_eq!(survivors, vec![false, false, true, false]);
}

#[test]
fn test_diagnostic_context_includes_previous_line() {
    let log: CallLog = Rc::default();
    let mut table = CallableTable::new();
    record(&mut table, &log, "x", &[]);

    let (_, sink) = run(&table, "line one\nline two\n  !y()\n");

    assert_eq!(
        sink.rendered[0],
        "test.lln:3:3: Command 'y' doesn't exist.\n   ... |\n   2 | line two\n   3 |   !y()\n         ^\n"
    );
}
