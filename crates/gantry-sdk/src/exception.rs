//! Exception payloads transferred from throw sites to handlers

use std::any::Any;
use std::fmt;

/// Opaque payload carried from a throw site to the catch handler that
/// intercepts it.
///
/// An exception object is a message plus an optional host-defined payload.
/// Ownership transfers to the handler, which either consumes it or
/// re-throws it to the next enclosing scope — never both.
pub struct ExceptionObject {
    message: String,
    payload: Option<Box<dyn Any + Send>>,
}

impl ExceptionObject {
    /// Create an exception carrying only a message
    pub fn new(message: impl Into<String>) -> Self {
        ExceptionObject {
            message: message.into(),
            payload: None,
        }
    }

    /// Create an exception carrying a message and an opaque payload
    pub fn with_payload(message: impl Into<String>, payload: impl Any + Send) -> Self {
        ExceptionObject {
            message: message.into(),
            payload: Some(Box::new(payload)),
        }
    }

    /// The exception message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Borrow the payload as a concrete type, if it is one
    pub fn payload_ref<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref().and_then(|p| p.downcast_ref::<T>())
    }

    /// Take ownership of the payload, if any
    pub fn into_payload(self) -> Option<Box<dyn Any + Send>> {
        self.payload
    }
}

impl fmt::Debug for ExceptionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionObject")
            .field("message", &self.message)
            .field("has_payload", &self.payload.is_some())
            .finish()
    }
}

impl fmt::Display for ExceptionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
