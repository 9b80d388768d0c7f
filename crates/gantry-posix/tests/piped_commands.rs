//! Piped and synchronous shell command tests

#![cfg(unix)]

use gantry_posix::{close_piped, run_piped, run_sync, ExitStatus, PipeMode, ProcessError};
use std::io::{Read, Write};

#[test]
fn read_pipe_captures_command_output() {
    let mut stream = run_piped("echo hello", PipeMode::Read).unwrap();
    assert!(stream.is_open());
    assert_eq!(stream.mode(), PipeMode::Read);

    let mut captured = String::new();
    stream.read_to_string(&mut captured).unwrap();
    assert_eq!(captured, "hello\n");

    assert_eq!(close_piped(&mut stream).unwrap(), ExitStatus::Exited(0));
    assert!(!stream.is_open());
}

#[test]
fn close_reports_command_exit_status() {
    let mut stream = run_piped("exit 5", PipeMode::Read).unwrap();
    let mut rest = Vec::new();
    stream.read_to_end(&mut rest).unwrap();
    assert_eq!(close_piped(&mut stream).unwrap(), ExitStatus::Exited(5));
}

#[test]
fn double_close_is_rejected() {
    let mut stream = run_piped("true", PipeMode::Read).unwrap();
    let mut rest = Vec::new();
    stream.read_to_end(&mut rest).unwrap();
    close_piped(&mut stream).unwrap();
    assert_eq!(
        close_piped(&mut stream).unwrap_err(),
        ProcessError::StreamAlreadyClosed
    );
}

#[test]
fn read_after_close_fails() {
    let mut stream = run_piped("echo gone", PipeMode::Read).unwrap();
    let mut rest = Vec::new();
    stream.read_to_end(&mut rest).unwrap();
    close_piped(&mut stream).unwrap();

    let mut buf = [0u8; 8];
    let err = stream.read(&mut buf).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotConnected);
}

#[test]
fn write_pipe_feeds_shell_consumer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sink");
    let command = format!("cat > {}", path.display());

    let mut stream = run_piped(&command, PipeMode::Write).unwrap();
    stream.write_all(b"fed through stdin\n").unwrap();
    assert_eq!(close_piped(&mut stream).unwrap(), ExitStatus::Exited(0));

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "fed through stdin\n"
    );
}

#[test]
fn run_sync_reports_exit_code() {
    assert_eq!(run_sync("exit 7").unwrap(), ExitStatus::Exited(7));
    assert!(run_sync("true").unwrap().success());
    assert_eq!(run_sync("false").unwrap(), ExitStatus::Exited(1));
}

#[test]
fn run_sync_reports_signal_termination() {
    let status = run_sync("kill -TERM $$").unwrap();
    assert_eq!(status, ExitStatus::Signaled(libc::SIGTERM));
    assert_eq!(status.code(), None);
}
