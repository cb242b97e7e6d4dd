// tests/outcome_policy.rs

use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use query::engine::{FilterCore, RunStatus, SkipReason, Verdict};
use query::errors::describe_io_error;
use query::exec::ExitOutcome;
use query::types::DisplayPolicy;

#[test]
fn normal_exit_maps_to_its_code() {
    let outcome = ExitOutcome::from_status(ExitStatus::from_raw(3 << 8));
    assert_eq!(outcome, Some(ExitOutcome::NormalExit(3)));
    assert_eq!(outcome.unwrap().return_code(), 3);

    let ok = ExitOutcome::from_status(ExitStatus::from_raw(0)).unwrap();
    assert!(ok.is_success());
}

#[test]
fn signal_termination_maps_to_128_plus_signal() {
    // SIGKILL
    let killed = ExitOutcome::from_status(ExitStatus::from_raw(9)).unwrap();
    assert_eq!(killed, ExitOutcome::KilledBySignal(9));
    assert_eq!(killed.return_code(), 137);

    // SIGSEGV with the core-dump bit set.
    let dumped = ExitOutcome::from_status(ExitStatus::from_raw(0x80 | 11)).unwrap();
    assert_eq!(dumped, ExitOutcome::KilledBySignal(11));
    assert_eq!(dumped.return_code(), 139);
}

#[test]
fn stopped_and_continued_are_not_terminal() {
    // Stopped by SIGSTOP.
    assert_eq!(ExitOutcome::from_status(ExitStatus::from_raw((19 << 8) | 0x7f)), None);
    // Continued.
    assert_eq!(ExitOutcome::from_status(ExitStatus::from_raw(0xffff)), None);
}

#[test]
fn success_policy_emits_only_on_zero() {
    let policy = DisplayPolicy::OnSuccess;
    assert!(policy.should_emit(0));
    assert!(!policy.should_emit(1));
    assert!(!policy.should_emit(137));
}

#[test]
fn failure_policy_emits_on_anything_but_zero() {
    let policy = DisplayPolicy::OnFailure;
    assert!(!policy.should_emit(0));
    assert!(policy.should_emit(1));
    assert!(policy.should_emit(255));
    assert!(policy.should_emit(143));
}

#[test]
fn failing_commands_never_mark_the_run() {
    let mut core = FilterCore::new(DisplayPolicy::OnSuccess);

    assert_eq!(core.record_outcome(ExitOutcome::NormalExit(1)), Verdict::Suppress);
    assert_eq!(core.record_outcome(ExitOutcome::KilledBySignal(15)), Verdict::Suppress);
    assert_eq!(core.record_outcome(ExitOutcome::NormalExit(0)), Verdict::Emit);

    let state = core.state();
    assert_eq!(state.dispatched(), 3);
    assert_eq!(state.emitted(), 1);
    assert!(!state.had_non_fatal_error());
    assert_eq!(state.status(), RunStatus::Clean);
    assert_eq!(state.status().exit_code(), 0);
}

#[test]
fn inverted_policy_emits_killed_commands() {
    let mut core = FilterCore::new(DisplayPolicy::OnFailure);
    assert_eq!(core.record_outcome(ExitOutcome::KilledBySignal(9)), Verdict::Emit);
    assert_eq!(core.record_outcome(ExitOutcome::NormalExit(0)), Verdict::Suppress);
}

#[test]
fn a_skip_turns_the_final_status_into_two() {
    let mut core = FilterCore::new(DisplayPolicy::OnSuccess);
    core.record_outcome(ExitOutcome::NormalExit(0));
    core.record_skip();

    let state = core.state();
    assert_eq!(state.skipped(), 1);
    assert!(state.had_non_fatal_error());
    assert_eq!(state.status(), RunStatus::CompletedWithErrors);
    assert_eq!(state.status().exit_code(), 2);
}

#[test]
fn skip_reasons_render_like_strerror() {
    let missing = io::Error::from_raw_os_error(2);
    assert_eq!(describe_io_error(&missing), "No such file or directory");
    assert_eq!(SkipReason::Open(missing).to_string(), "No such file or directory");
    assert_eq!(SkipReason::Directory.to_string(), "Is a directory");

    let custom = io::Error::other("custom failure");
    assert_eq!(describe_io_error(&custom), "custom failure");
}
