//! Dispatch and built-in command tests

use core::fmt::Write;
use std::cell::RefCell;
use std::rc::Rc;

use uart_wifi_terminal::console::commands::SETUP_WIFI_USAGE;
use uart_wifi_terminal::console::{
    dispatch, register_builtins, register_setup_wifi, DispatchOutcome, Registry, BUSY_STR,
    NOT_FOUND_STR,
};

mod common;
use common::{MockStation, TestOutput};

/// Registry with a command recording the argument it receives
fn recording_registry() -> (Registry, Rc<RefCell<Vec<Option<String>>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut registry = Registry::new(8);
    register_builtins(&mut registry).unwrap();
    registry
        .register_with("record", Rc::clone(&seen), |args, seen, _cx| {
            seen.borrow_mut().push(args.map(str::to_string));
        })
        .unwrap();
    (registry, seen)
}

#[test]
fn test_argument_is_everything_after_first_space() {
    let (mut registry, seen) = recording_registry();
    let mut out = TestOutput::new();

    let outcome = dispatch(b"record  a b\tc  ", &mut registry, &mut out);

    assert_eq!(outcome, DispatchOutcome::Executed);
    assert!(outcome.executed());
    assert_eq!(seen.borrow().as_slice(), [Some(" a b\tc  ".to_string())]);
}

#[test]
fn test_no_space_gives_absent_argument() {
    let (mut registry, seen) = recording_registry();
    let mut out = TestOutput::new();

    dispatch(b"record", &mut registry, &mut out);
    dispatch(b"record ", &mut registry, &mut out);

    assert_eq!(seen.borrow().as_slice(), [None, Some(String::new())]);
}

#[test]
fn test_empty_line_is_silent() {
    let (mut registry, seen) = recording_registry();
    let mut out = TestOutput::new();

    assert_eq!(dispatch(b"", &mut registry, &mut out), DispatchOutcome::Empty);
    assert_eq!(dispatch(b" record", &mut registry, &mut out), DispatchOutcome::Empty);

    assert!(out.text.is_empty());
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_unknown_command_single_notice() {
    let (mut registry, _) = recording_registry();
    let mut out = TestOutput::new();

    let outcome = dispatch(b"foo bar", &mut registry, &mut out);

    assert_eq!(outcome, DispatchOutcome::NotFound);
    assert!(!outcome.executed());
    assert_eq!(out.text, NOT_FOUND_STR);
}

#[test]
fn test_invalid_utf8_is_unknown() {
    let (mut registry, _) = recording_registry();
    let mut out = TestOutput::new();

    assert_eq!(dispatch(&[0xff, 0xfe], &mut registry, &mut out), DispatchOutcome::NotFound);
    assert_eq!(out.text, NOT_FOUND_STR);
}

#[test]
fn test_empty_name_with_invalid_utf8_argument_is_silent() {
    let (mut registry, seen) = recording_registry();
    let mut out = TestOutput::new();

    assert_eq!(dispatch(b" \xff", &mut registry, &mut out), DispatchOutcome::Empty);

    assert!(out.text.is_empty());
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_invalid_utf8_argument_still_runs_command() {
    let (mut registry, seen) = recording_registry();
    let mut out = TestOutput::new();

    assert_eq!(dispatch(b"help \xff", &mut registry, &mut out), DispatchOutcome::Executed);
    assert!(out.contains("List of commands:"));

    assert_eq!(dispatch(b"record a\xffb", &mut registry, &mut out), DispatchOutcome::Executed);
    assert_eq!(seen.borrow().as_slice(), [Some("a\u{fffd}b".to_string())]);
}

#[test]
fn test_handler_dispatching_itself_is_skipped() {
    let mut registry = Registry::new(4);
    registry
        .register_fn("again", |args, cx| {
            let _ = writeln!(cx.out, "run {:?}", args);
            let nested = dispatch(b"again x", cx.registry, cx.out);
            let _ = writeln!(cx.out, "{:?}", nested);
        })
        .unwrap();
    let mut out = TestOutput::new();

    let outcome = dispatch(b"again", &mut registry, &mut out);

    assert_eq!(outcome, DispatchOutcome::Executed);
    assert_eq!(out.text, format!("run None\n{}Busy\n", BUSY_STR));

    // The handler is released afterwards
    assert_eq!(dispatch(b"again", &mut registry, &mut out), DispatchOutcome::Executed);
}

#[test]
fn test_help_lists_each_name_once_in_order() {
    let (mut registry, _) = recording_registry();
    registry.register_fn("status", |_, _| {}).unwrap();
    let mut out = TestOutput::new();

    dispatch(b"help", &mut registry, &mut out);

    assert_eq!(
        out.text,
        "List of commands:\n    * help\n    * record\n    * status\n\n"
    );
}

#[test]
fn test_handler_registers_command_reentrantly() {
    let mut registry = Registry::new(4);
    register_builtins(&mut registry).unwrap();
    registry
        .register_fn("enable_debug", |_, cx| {
            let result = cx.registry.register_fn("debug", |_, cx| {
                let _ = cx.out.write_str("debug on\n");
            });
            let _ = writeln!(cx.out, "{:?}", result);
        })
        .unwrap();
    let mut out = TestOutput::new();

    assert_eq!(dispatch(b"debug", &mut registry, &mut out), DispatchOutcome::NotFound);
    assert_eq!(dispatch(b"enable_debug", &mut registry, &mut out), DispatchOutcome::Executed);
    assert_eq!(dispatch(b"debug", &mut registry, &mut out), DispatchOutcome::Executed);

    assert!(out.contains("Ok(())"));
    assert!(out.contains("debug on"));
}

#[test]
fn test_handler_sees_capacity_error_when_full() {
    let mut registry = Registry::new(1);
    registry
        .register_fn("grow", |_, cx| {
            if let Err(err) = cx.registry.register_fn("more", |_, _| {}) {
                let _ = writeln!(cx.out, "{}", err);
            }
        })
        .unwrap();
    let mut out = TestOutput::new();

    dispatch(b"grow", &mut registry, &mut out);

    assert_eq!(out.text, "E01: command table full (1 entries)\n");
}

#[test]
fn test_setup_wifi_forwards_credentials() {
    let station = MockStation::default();
    let mut registry = Registry::new(4);
    register_setup_wifi(&mut registry, station.clone()).unwrap();
    let mut out = TestOutput::new();

    dispatch(b"setup_wifi MySSID pass123", &mut registry, &mut out);

    assert_eq!(
        station.calls.borrow().as_slice(),
        [("MySSID".to_string(), "pass123".to_string())]
    );
    assert!(out.contains("connecting to MySSID"));
}

#[test]
fn test_setup_wifi_missing_password_prints_usage() {
    let station = MockStation::default();
    let mut registry = Registry::new(4);
    register_setup_wifi(&mut registry, station.clone()).unwrap();
    let mut out = TestOutput::new();

    dispatch(b"setup_wifi MySSID", &mut registry, &mut out);

    assert!(station.calls.borrow().is_empty());
    assert!(out.contains("No password found"));
    assert!(out.contains(SETUP_WIFI_USAGE));
}

#[test]
fn test_setup_wifi_without_args_prints_usage() {
    let station = MockStation::default();
    let mut registry = Registry::new(4);
    register_setup_wifi(&mut registry, station.clone()).unwrap();
    let mut out = TestOutput::new();

    dispatch(b"setup_wifi", &mut registry, &mut out);

    assert!(station.calls.borrow().is_empty());
    assert!(out.contains("No ssid found"));
    assert!(out.contains(SETUP_WIFI_USAGE));
}

#[test]
fn test_setup_wifi_reports_station_failure() {
    let station = MockStation { fail: true, ..MockStation::default() };
    let mut registry = Registry::new(4);
    register_setup_wifi(&mut registry, station.clone()).unwrap();
    let mut out = TestOutput::new();

    let outcome = dispatch(b"setup_wifi lab secret", &mut registry, &mut out);

    assert_eq!(outcome, DispatchOutcome::Executed);
    assert_eq!(station.calls.borrow().len(), 1);
    assert!(out.contains("reconfiguration failed"));
}
