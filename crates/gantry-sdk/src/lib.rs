//! Gantry SDK - Contract types for language bridges
//!
//! This crate provides the minimal types and traits a language bridge
//! programs against: opaque type descriptors, the [`Introspect`] capability
//! an object-runtime adapter implements, the exception payload transferred
//! from throw sites to handlers, and the process-wide warning diagnostics.
//! It deliberately carries no machinery of its own so bridges and adapters
//! never depend on engine internals.

#![warn(missing_docs)]

pub mod descriptor;
pub mod diag;
pub mod exception;
pub mod introspect;

pub use descriptor::TypeDescriptor;
pub use exception::ExceptionObject;
pub use introspect::{Introspect, ReflectError, ReflectResult};
