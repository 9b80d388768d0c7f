//! Process-wide warning diagnostics
//!
//! Non-fatal faults in the launcher and unwinding layers are reported here
//! rather than through a logging facade. The disposition decides whether a
//! warning is ignored, written to stderr, or escalated to a panic.

use std::sync::atomic::{AtomicU8, Ordering};

/// What to do when a diagnostic warning is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarnDisposition {
    /// Drop warnings silently
    Ignore,
    /// Write warnings to stderr
    Warn,
    /// Write to stderr, then panic
    Fatal,
}

static DISPOSITION: AtomicU8 = AtomicU8::new(DISP_WARN);

const DISP_IGNORE: u8 = 0;
const DISP_WARN: u8 = 1;
const DISP_FATAL: u8 = 2;

/// Set the process-wide warning disposition
pub fn set_disposition(disposition: WarnDisposition) {
    let raw = match disposition {
        WarnDisposition::Ignore => DISP_IGNORE,
        WarnDisposition::Warn => DISP_WARN,
        WarnDisposition::Fatal => DISP_FATAL,
    };
    DISPOSITION.store(raw, Ordering::Relaxed);
}

/// Read the process-wide warning disposition
pub fn disposition() -> WarnDisposition {
    match DISPOSITION.load(Ordering::Relaxed) {
        DISP_IGNORE => WarnDisposition::Ignore,
        DISP_FATAL => WarnDisposition::Fatal,
        _ => WarnDisposition::Warn,
    }
}

/// Report a diagnostic warning per the current disposition
pub fn warn(msg: &str) {
    match disposition() {
        WarnDisposition::Ignore => {}
        WarnDisposition::Warn => eprintln!("gantry: {msg}"),
        WarnDisposition::Fatal => {
            eprintln!("gantry: {msg}");
            panic!("gantry: {msg}");
        }
    }
}

/// Report a diagnostic warning with the OS error for the current `errno`
pub fn warn_errno(msg: &str) {
    let err = std::io::Error::last_os_error();
    warn(&format!("{msg}: {err}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_roundtrip() {
        let prev = disposition();
        set_disposition(WarnDisposition::Ignore);
        assert_eq!(disposition(), WarnDisposition::Ignore);
        // Ignored warnings must not panic or print
        warn("suppressed");
        set_disposition(prev);
    }
}
