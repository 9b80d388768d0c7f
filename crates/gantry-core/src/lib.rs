//! Gantry core — structured unwinding and type reflection
//!
//! This crate provides the two layers a bridge builds its control flow on:
//! - [`unwind`] — try/catch/throw emulation with per-thread catch-depth
//!   tracking, for host languages whose calling convention cannot express
//!   exceptions
//! - [`reflect`] — slot and symbol enumeration over an opaque object model,
//!   walking type hierarchies most-derived-first
//!
//! The unwinding engine transports throws on Rust panics, so it requires
//! unwinding panic semantics; building a consumer with `panic = "abort"`
//! turns every throw into a process abort.

#![warn(missing_docs)]

pub mod reflect;
pub mod unwind;

pub use reflect::{
    list_callable_symbols, list_instance_slots, slot_names, symbol_names, TypeTable,
};
pub use unwind::{
    catch_depth, is_throw_payload, register_handler, run_protected, throw, Caught, Protected,
    UnwindContext, UnwindError,
};
