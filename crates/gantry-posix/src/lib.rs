//! Gantry POSIX Process Launcher
//!
//! Process control for language bridges: exec-replace, fork-spawn with
//! caller-owned process handles, descriptor-flag control, piped shell
//! commands with explicit close, and synchronous shell execution.
//!
//! Argument vectors are passed to the OS verbatim — no shell interpretation
//! unless a command is explicitly routed through [`run_piped`] or
//! [`run_sync`]. Failures are returned to the immediate caller as
//! [`ProcessError`] results; nothing here raises a throw on its own, though
//! callers conventionally wrap these operations in the unwinding
//! discipline of `gantry-core`.

#![warn(missing_docs)]

pub mod env;
pub mod error;
pub mod fd;
pub mod pipe;
pub mod process;
pub mod status;

pub use error::ProcessError;
pub use fd::set_descriptor_flags;
pub use pipe::{close_piped, run_piped, run_sync, CommandStream, PipeMode};
pub use process::{exec_replace, spawn_child, ProcessHandle};
pub use status::ExitStatus;

pub(crate) fn last_errno() -> i32 {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}
