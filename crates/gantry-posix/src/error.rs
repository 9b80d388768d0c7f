//! Process-launch error types

/// Process launcher error types.
///
/// Raw OS error codes are propagated unchanged in the `errno` fields;
/// [`os_error`](ProcessError::os_error) maps them back to `std::io::Error`
/// for message formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProcessError {
    /// fork, or the argument setup before it, failed
    #[error("spawn failed (errno {errno})")]
    SpawnFailed {
        /// Raw OS error code
        errno: i32,
    },

    /// exec could not start the replacement image
    #[error("exec failed (errno {errno})")]
    ExecFailed {
        /// Raw OS error code
        errno: i32,
    },

    /// The shell or command behind a piped stream could not start
    #[error("pipe open failed (errno {errno})")]
    PipeOpenFailed {
        /// Raw OS error code
        errno: i32,
    },

    /// Descriptor-control primitive failed; the OS error is unchanged
    #[error("descriptor control failed (errno {errno})")]
    DescriptorControlFailed {
        /// Raw OS error code
        errno: i32,
    },

    /// Waiting on a child or closing a piped stream failed
    #[error("wait failed (errno {errno})")]
    WaitFailed {
        /// Raw OS error code
        errno: i32,
    },

    /// The stream was already closed exactly once before
    #[error("command stream already closed")]
    StreamAlreadyClosed,

    /// An argument or command contained an interior NUL byte
    #[error("argument contains an interior NUL byte")]
    NulInArgument,
}

impl ProcessError {
    /// The raw OS error code, for variants that carry one
    pub fn errno(&self) -> Option<i32> {
        match *self {
            ProcessError::SpawnFailed { errno }
            | ProcessError::ExecFailed { errno }
            | ProcessError::PipeOpenFailed { errno }
            | ProcessError::DescriptorControlFailed { errno }
            | ProcessError::WaitFailed { errno } => Some(errno),
            ProcessError::StreamAlreadyClosed | ProcessError::NulInArgument => None,
        }
    }

    /// The OS error as `std::io::Error`, for variants that carry one
    pub fn os_error(&self) -> Option<std::io::Error> {
        self.errno().map(std::io::Error::from_raw_os_error)
    }
}
