//! Table-backed object model
//!
//! Stores type metadata registered directly by a bridge: type name,
//! ancestor link, and declared slot and symbol names in declaration order.
//! Implements [`Introspect`] so the reader can walk registered hierarchies
//! the same way it walks a live runtime adapter.

use gantry_sdk::{Introspect, ReflectError, ReflectResult, TypeDescriptor};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Declared metadata for a single registered type
#[derive(Debug, Clone, Default)]
struct TypeRecord {
    name: String,
    ancestor: Option<u64>,
    slots: Vec<String>,
    symbols: Vec<String>,
}

/// Registry of type metadata implementing [`Introspect`].
///
/// Descriptors are minted on registration and stay valid until the type is
/// unregistered. Queries take a read lock per call and never cache, so a
/// reader walking a hierarchy observes registrations and removals as they
/// happen.
pub struct TypeTable {
    types: RwLock<FxHashMap<u64, TypeRecord>>,
    next_id: AtomicU64,
}

impl TypeTable {
    /// Create an empty table
    pub fn new() -> Self {
        TypeTable {
            types: RwLock::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a type, optionally below an already-registered ancestor,
    /// and mint its descriptor.
    pub fn register(
        &self,
        name: &str,
        ancestor: Option<TypeDescriptor>,
    ) -> ReflectResult<TypeDescriptor> {
        let mut types = self.types.write();
        let ancestor = match ancestor {
            Some(ty) => {
                if !types.contains_key(&ty.as_raw()) {
                    return Err(ReflectError::InvalidType { descriptor: ty });
                }
                Some(ty.as_raw())
            }
            None => None,
        };
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        types.insert(
            id,
            TypeRecord {
                name: name.to_string(),
                ancestor,
                ..TypeRecord::default()
            },
        );
        Ok(TypeDescriptor::from_raw(id))
    }

    /// Remove a type; returns whether it was registered.
    ///
    /// Descendants keep their ancestor link, so walking them afterwards
    /// fails with `InvalidType` at the removed level.
    pub fn unregister(&self, ty: TypeDescriptor) -> bool {
        self.types.write().remove(&ty.as_raw()).is_some()
    }

    /// Append a storage-slot declaration to a registered type
    pub fn add_slot(&self, ty: TypeDescriptor, name: &str) -> ReflectResult<()> {
        self.with_record_mut(ty, |record| record.slots.push(name.to_string()))
    }

    /// Append a callable-symbol declaration to a registered type
    pub fn add_symbol(&self, ty: TypeDescriptor, name: &str) -> ReflectResult<()> {
        self.with_record_mut(ty, |record| record.symbols.push(name.to_string()))
    }

    /// Name the type was registered under
    pub fn name_of(&self, ty: TypeDescriptor) -> ReflectResult<String> {
        self.with_record(ty, |record| record.name.clone())
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    fn with_record<T>(
        &self,
        ty: TypeDescriptor,
        read: impl FnOnce(&TypeRecord) -> T,
    ) -> ReflectResult<T> {
        let types = self.types.read();
        types
            .get(&ty.as_raw())
            .map(read)
            .ok_or(ReflectError::InvalidType { descriptor: ty })
    }

    fn with_record_mut(
        &self,
        ty: TypeDescriptor,
        write: impl FnOnce(&mut TypeRecord),
    ) -> ReflectResult<()> {
        let mut types = self.types.write();
        types
            .get_mut(&ty.as_raw())
            .map(write)
            .ok_or(ReflectError::InvalidType { descriptor: ty })
    }
}

impl Introspect for TypeTable {
    fn resolve(&self, ty: TypeDescriptor) -> ReflectResult<()> {
        self.with_record(ty, |_| ())
    }

    fn declared_slots(&self, ty: TypeDescriptor) -> ReflectResult<Vec<String>> {
        self.with_record(ty, |record| record.slots.clone())
    }

    fn declared_symbols(&self, ty: TypeDescriptor) -> ReflectResult<Vec<String>> {
        self.with_record(ty, |record| record.symbols.clone())
    }

    fn ancestor(&self, ty: TypeDescriptor) -> ReflectResult<Option<TypeDescriptor>> {
        self.with_record(ty, |record| record.ancestor.map(TypeDescriptor::from_raw))
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}
