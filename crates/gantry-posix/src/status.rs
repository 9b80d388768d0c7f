//! Termination-status decoding

/// Termination status of an external command or child process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Normal exit with a code
    Exited(i32),
    /// Terminated by a signal
    Signaled(i32),
}

impl ExitStatus {
    /// Decode a raw wait status as returned by waitpid, system, or pclose.
    pub(crate) fn decode(raw: libc::c_int) -> Self {
        if libc::WIFEXITED(raw) {
            ExitStatus::Exited(libc::WEXITSTATUS(raw))
        } else if libc::WIFSIGNALED(raw) {
            ExitStatus::Signaled(libc::WTERMSIG(raw))
        } else {
            // Stopped/continued statuses are not produced by the blocking
            // calls in this crate.
            ExitStatus::Exited(-1)
        }
    }

    /// The exit code, for a normal exit
    pub fn code(self) -> Option<i32> {
        match self {
            ExitStatus::Exited(code) => Some(code),
            ExitStatus::Signaled(_) => None,
        }
    }

    /// The terminating signal, if there was one
    pub fn signal(self) -> Option<i32> {
        match self {
            ExitStatus::Exited(_) => None,
            ExitStatus::Signaled(sig) => Some(sig),
        }
    }

    /// True for a normal exit with code 0
    pub fn success(self) -> bool {
        self == ExitStatus::Exited(0)
    }
}
