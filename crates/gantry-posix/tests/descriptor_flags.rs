//! Descriptor-flag pass-through tests on real descriptors

#![cfg(unix)]

use gantry_posix::fd::{set_descriptor_flags, FD_CLOEXEC, F_GETFD, F_GETFL, F_SETFD};
use gantry_posix::ProcessError;
use std::os::unix::io::AsRawFd;

#[test]
fn close_on_exec_flag_roundtrips() {
    let file = tempfile::tempfile().unwrap();
    let fd = file.as_raw_fd();

    let flags = set_descriptor_flags(fd, F_GETFD, 0).unwrap();
    set_descriptor_flags(fd, F_SETFD, flags | FD_CLOEXEC).unwrap();
    let updated = set_descriptor_flags(fd, F_GETFD, 0).unwrap();
    assert_ne!(updated & FD_CLOEXEC, 0);

    set_descriptor_flags(fd, F_SETFD, updated & !FD_CLOEXEC).unwrap();
    let cleared = set_descriptor_flags(fd, F_GETFD, 0).unwrap();
    assert_eq!(cleared & FD_CLOEXEC, 0);
}

#[test]
fn status_flags_are_readable() {
    let file = tempfile::tempfile().unwrap();
    let flags = set_descriptor_flags(file.as_raw_fd(), F_GETFL, 0).unwrap();
    assert!(flags >= 0);
}

#[test]
fn os_error_code_is_unchanged() {
    let err = set_descriptor_flags(-1, F_GETFD, 0).unwrap_err();
    assert_eq!(
        err,
        ProcessError::DescriptorControlFailed { errno: libc::EBADF }
    );
    assert_eq!(err.errno(), Some(libc::EBADF));
}
