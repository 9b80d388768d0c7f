//! Introspect trait — abstract object-model queries
//!
//! Defines the read-only interface an object-runtime adapter implements.
//! The reflection reader programs against this trait without assuming
//! anything about the host object model beyond ordered, named, inheritable
//! declarations.

use crate::descriptor::TypeDescriptor;

/// Result type for reflection queries
pub type ReflectResult<T> = Result<T, ReflectError>;

/// Reflection query error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReflectError {
    /// Descriptor does not resolve to a currently-loaded type
    #[error("invalid type descriptor {:#x}", .descriptor.as_raw())]
    InvalidType {
        /// The descriptor that failed to resolve
        descriptor: TypeDescriptor,
    },

    /// The underlying object model reported a fault of its own
    #[error("object model error: {0}")]
    ModelError(String),
}

/// Read-only object-model queries for the reflection reader.
///
/// An adapter over the host runtime implements this trait; the reader walks
/// ancestor chains through it and never caches, so every call re-queries
/// the live runtime. Declared names are reported in declaration order for
/// the queried type only — ancestor walking is the reader's job.
pub trait Introspect {
    /// Check that a descriptor resolves to a currently-loaded type
    fn resolve(&self, ty: TypeDescriptor) -> ReflectResult<()>;

    /// Storage-slot names declared by `ty` itself, in declaration order
    fn declared_slots(&self, ty: TypeDescriptor) -> ReflectResult<Vec<String>>;

    /// Callable-symbol names declared by `ty` itself, in declaration order
    fn declared_symbols(&self, ty: TypeDescriptor) -> ReflectResult<Vec<String>>;

    /// The immediate ancestor of `ty`, or `None` at the root of a hierarchy
    fn ancestor(&self, ty: TypeDescriptor) -> ReflectResult<Option<TypeDescriptor>>;
}
