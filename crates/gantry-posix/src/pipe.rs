//! Piped shell commands over popen(3)
//!
//! `run_piped` starts a command through the shell and hands back a byte
//! stream on its stdout or stdin. The stream must be closed exactly once
//! with `close_piped`, which reports the command's termination status.
//! There is no auto-close on drop: a dropped unclosed stream leaks the
//! child and is reported as a diagnostic warning.

use crate::error::ProcessError;
use crate::last_errno;
use crate::status::ExitStatus;
use gantry_sdk::diag;
use std::ffi::{CStr, CString};
use std::io;
use std::ptr::NonNull;

/// Direction of a piped command stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeMode {
    /// Read from the command's standard output
    Read,
    /// Write to the command's standard input
    Write,
}

impl PipeMode {
    fn as_mode_cstr(self) -> &'static CStr {
        match self {
            PipeMode::Read => c"r",
            PipeMode::Write => c"w",
        }
    }
}

/// Byte stream bound to a spawned shell command.
///
/// Implements [`io::Read`] and [`io::Write`] per its [`PipeMode`]. The
/// thread that opened the stream owns it; the handle is deliberately not
/// shareable across threads.
#[derive(Debug)]
pub struct CommandStream {
    file: Option<NonNull<libc::FILE>>,
    mode: PipeMode,
    command: String,
}

impl CommandStream {
    /// The direction this stream was opened with
    pub fn mode(&self) -> PipeMode {
        self.mode
    }

    /// The shell command this stream is bound to
    pub fn command(&self) -> &str {
        &self.command
    }

    /// True until [`close_piped`] has been called
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn open_file(&self) -> io::Result<NonNull<libc::FILE>> {
        self.file.ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotConnected, "command stream already closed")
        })
    }
}

impl io::Read for CommandStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let file = self.open_file()?;
        if buf.is_empty() {
            return Ok(0);
        }
        // SAFETY: buf is valid for buf.len() bytes and file is open
        let n = unsafe { libc::fread(buf.as_mut_ptr().cast(), 1, buf.len(), file.as_ptr()) };
        if n == 0 {
            // SAFETY: file is open
            if unsafe { libc::ferror(file.as_ptr()) } != 0 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(n)
    }
}

impl io::Write for CommandStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let file = self.open_file()?;
        if buf.is_empty() {
            return Ok(0);
        }
        // SAFETY: buf is valid for buf.len() bytes and file is open
        let n = unsafe { libc::fwrite(buf.as_ptr().cast(), 1, buf.len(), file.as_ptr()) };
        if n < buf.len() {
            // SAFETY: file is open
            if unsafe { libc::ferror(file.as_ptr()) } != 0 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        let file = self.open_file()?;
        // SAFETY: file is open
        if unsafe { libc::fflush(file.as_ptr()) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl Drop for CommandStream {
    fn drop(&mut self) {
        if self.file.is_some() {
            diag::warn(&format!(
                "command stream for '{}' dropped without close_piped; exit status lost",
                self.command
            ));
        }
    }
}

/// Start `command` through the shell, returning a byte stream connected
/// per `mode`.
pub fn run_piped(command: &str, mode: PipeMode) -> Result<CommandStream, ProcessError> {
    let cmd = CString::new(command).map_err(|_| ProcessError::NulInArgument)?;
    // SAFETY: cmd and the static mode string are valid C strings
    let file = unsafe { libc::popen(cmd.as_ptr(), mode.as_mode_cstr().as_ptr()) };
    match NonNull::new(file) {
        Some(file) => Ok(CommandStream {
            file: Some(file),
            mode,
            command: command.to_string(),
        }),
        None => Err(ProcessError::PipeOpenFailed { errno: last_errno() }),
    }
}

/// Close a piped stream exactly once, reporting the command's termination
/// status.
///
/// A second close on the same stream is rejected with
/// [`ProcessError::StreamAlreadyClosed`]. Write-mode streams are flushed
/// so the consumer sees every buffered byte before its stdin closes.
pub fn close_piped(stream: &mut CommandStream) -> Result<ExitStatus, ProcessError> {
    let file = stream.file.take().ok_or(ProcessError::StreamAlreadyClosed)?;
    // SAFETY: file came from popen and has not been closed; pclose flushes,
    // closes, and reaps the command
    let raw = unsafe { libc::pclose(file.as_ptr()) };
    if raw < 0 {
        return Err(ProcessError::WaitFailed { errno: last_errno() });
    }
    Ok(ExitStatus::decode(raw))
}

/// Run `command` through the shell synchronously, blocking until it
/// completes, and decode its termination status.
pub fn run_sync(command: &str) -> Result<ExitStatus, ProcessError> {
    let cmd = CString::new(command).map_err(|_| ProcessError::NulInArgument)?;
    // SAFETY: cmd is a valid C string
    let raw = unsafe { libc::system(cmd.as_ptr()) };
    if raw < 0 {
        return Err(ProcessError::SpawnFailed { errno: last_errno() });
    }
    Ok(ExitStatus::decode(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nul_in_command_rejected() {
        assert_eq!(
            run_piped("echo\0hi", PipeMode::Read).unwrap_err(),
            ProcessError::NulInArgument
        );
        assert_eq!(run_sync("tr\0ue").unwrap_err(), ProcessError::NulInArgument);
    }

    #[test]
    fn test_mode_strings() {
        assert_eq!(PipeMode::Read.as_mode_cstr(), c"r");
        assert_eq!(PipeMode::Write.as_mode_cstr(), c"w");
    }
}
