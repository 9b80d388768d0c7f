//! Descriptor-flag control

use crate::error::ProcessError;
use crate::last_errno;

pub use libc::{FD_CLOEXEC, F_GETFD, F_GETFL, F_SETFD, F_SETFL, O_NONBLOCK};

/// Thin pass-through to fcntl(2) in its three-argument form.
///
/// Returns the primitive's raw result on success; on failure the OS error
/// code is propagated unchanged in
/// [`ProcessError::DescriptorControlFailed`], never interpreted here.
pub fn set_descriptor_flags(fd: i32, command: i32, arg: i32) -> Result<i32, ProcessError> {
    // SAFETY: the OS validates the descriptor and command; an int argument
    // covers the flag-control commands this surface exists for
    let ret = unsafe { libc::fcntl(fd, command, arg) };
    if ret < 0 {
        return Err(ProcessError::DescriptorControlFailed { errno: last_errno() });
    }
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_descriptor_propagates_errno() {
        let err = set_descriptor_flags(-1, F_GETFD, 0).unwrap_err();
        assert_eq!(
            err,
            ProcessError::DescriptorControlFailed { errno: libc::EBADF }
        );
    }
}
