//! Process creation — exec-replace and fork-spawn
//!
//! Both operations take the argument vector verbatim: element 0 is the
//! conventional program name (not necessarily the path), and no shell is
//! ever involved. The executable is resolved against `PATH` per execvp.

use crate::error::ProcessError;
use crate::last_errno;
use crate::status::ExitStatus;
use std::convert::Infallible;
use std::ffi::CString;

/// Identifier of a spawned child process.
///
/// Caller-owned: this layer does not track the child after returning the
/// handle. The owner is responsible for eventually reaping the child,
/// normally through [`wait`](ProcessHandle::wait), which consumes the
/// handle so a child can never be waited on twice.
#[derive(Debug)]
pub struct ProcessHandle {
    pid: libc::pid_t,
}

impl ProcessHandle {
    /// The operating-system process id
    pub fn pid(&self) -> i32 {
        self.pid
    }

    /// Block until the child terminates and decode its status
    pub fn wait(self) -> Result<ExitStatus, ProcessError> {
        let mut status: libc::c_int = 0;
        // SAFETY: waitpid writes through a valid status pointer
        let ret = unsafe { libc::waitpid(self.pid, &mut status, 0) };
        if ret < 0 {
            return Err(ProcessError::WaitFailed { errno: last_errno() });
        }
        Ok(ExitStatus::decode(status))
    }
}

fn cstring_argv(argv: &[&str]) -> Result<Vec<CString>, ProcessError> {
    argv.iter()
        .map(|arg| CString::new(*arg).map_err(|_| ProcessError::NulInArgument))
        .collect()
}

/// Null-terminated pointer vector over already-converted argument strings.
fn argv_ptrs(args: &[CString]) -> Vec<*const libc::c_char> {
    let mut ptrs: Vec<*const libc::c_char> = args.iter().map(|arg| arg.as_ptr()).collect();
    ptrs.push(std::ptr::null());
    ptrs
}

/// Replace the current process image with `executable` run on `argv`.
///
/// Never returns on success. On failure — file not found, not executable,
/// permission denied — the current process continues to exist and the
/// error carries the raw `errno`.
pub fn exec_replace(executable: &str, argv: &[&str]) -> Result<Infallible, ProcessError> {
    let exe = CString::new(executable).map_err(|_| ProcessError::NulInArgument)?;
    let args = cstring_argv(argv)?;
    let ptrs = argv_ptrs(&args);
    // SAFETY: exe and args outlive the call; ptrs is null-terminated
    unsafe { libc::execvp(exe.as_ptr(), ptrs.as_ptr()) };
    // execvp only returns on failure
    Err(ProcessError::ExecFailed { errno: last_errno() })
}

/// Fork a child and exec `executable`/`argv` in it, returning the child's
/// pid to the parent immediately without waiting.
///
/// When exec fails in the child there is no channel back to the parent;
/// the child exits with code 127, observable through
/// [`ProcessHandle::wait`].
pub fn spawn_child(executable: &str, argv: &[&str]) -> Result<ProcessHandle, ProcessError> {
    let exe = CString::new(executable).map_err(|_| ProcessError::NulInArgument)?;
    let args = cstring_argv(argv)?;
    let ptrs = argv_ptrs(&args);

    // SAFETY: the child branch calls only async-signal-safe functions
    // (execvp, _exit); all allocation happened before the fork
    let pid = unsafe { libc::fork() };
    if pid < 0 {
        return Err(ProcessError::SpawnFailed { errno: last_errno() });
    }
    if pid == 0 {
        // SAFETY: ptrs is null-terminated and valid in the child's copy
        // of the address space
        unsafe {
            libc::execvp(exe.as_ptr(), ptrs.as_ptr());
            libc::_exit(127);
        }
    }
    Ok(ProcessHandle { pid })
}
