//! Reflection reader — slot and symbol enumeration over an object model
//!
//! Walks a type and its ancestors through the [`Introspect`] capability,
//! most-derived type first, appending declared names into a caller-supplied
//! accumulator. The accumulator form is the primitive: callers can merge
//! results from several queries across a hierarchy without re-querying
//! ancestors. [`slot_names`] and [`symbol_names`] produce the same
//! sequences lazily.
//!
//! Duplicate names across ancestor levels are preserved — the reader
//! reports declaration presence; resolving shadowing and overrides is the
//! caller's job. Nothing is cached; every call re-queries the live model.

pub mod table;

pub use table::TypeTable;

use gantry_sdk::{Introspect, ReflectError, ReflectResult, TypeDescriptor};

#[derive(Clone, Copy)]
enum NameKind {
    Slots,
    Symbols,
}

fn declared(
    model: &dyn Introspect,
    ty: TypeDescriptor,
    kind: NameKind,
) -> ReflectResult<Vec<String>> {
    match kind {
        NameKind::Slots => model.declared_slots(ty),
        NameKind::Symbols => model.declared_symbols(ty),
    }
}

fn collect(
    model: &dyn Introspect,
    ty: TypeDescriptor,
    kind: NameKind,
    acc: &mut Vec<String>,
) -> ReflectResult<()> {
    model.resolve(ty)?;
    let mut cursor = Some(ty);
    while let Some(current) = cursor {
        acc.extend(declared(model, current, kind)?);
        cursor = model.ancestor(current)?;
    }
    Ok(())
}

/// Append every storage-slot name declared by `ty` and its ancestors into
/// `acc`, most-derived type first.
///
/// The accumulator may be pre-populated; entries are appended, never
/// cleared, so calling twice with the same accumulator yields two full
/// copies. Fails with [`ReflectError::InvalidType`] when the descriptor
/// does not resolve; on a mid-walk failure the accumulator may hold a
/// partial prefix.
pub fn list_instance_slots(
    model: &dyn Introspect,
    ty: TypeDescriptor,
    acc: &mut Vec<String>,
) -> ReflectResult<()> {
    collect(model, ty, NameKind::Slots, acc)
}

/// Append every callable-symbol name exposed by `ty` and its ancestors into
/// `acc`, most-derived type first.
///
/// Same accumulation contract as [`list_instance_slots`]. Duplicate symbol
/// names across ancestor levels are preserved.
pub fn list_callable_symbols(
    model: &dyn Introspect,
    ty: TypeDescriptor,
    acc: &mut Vec<String>,
) -> ReflectResult<()> {
    collect(model, ty, NameKind::Symbols, acc)
}

/// Lazy walk over declared names, one ancestor level queried at a time.
pub struct NameIter<'m> {
    model: &'m dyn Introspect,
    kind: NameKind,
    cursor: Option<TypeDescriptor>,
    level: std::vec::IntoIter<String>,
    failed: bool,
}

impl Iterator for NameIter<'_> {
    type Item = ReflectResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(name) = self.level.next() {
                return Some(Ok(name));
            }
            let current = self.cursor?;
            match declared(self.model, current, self.kind) {
                Ok(names) => self.level = names.into_iter(),
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
            match self.model.ancestor(current) {
                Ok(next) => self.cursor = next,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

fn names(
    model: &dyn Introspect,
    ty: TypeDescriptor,
    kind: NameKind,
) -> ReflectResult<NameIter<'_>> {
    model.resolve(ty)?;
    Ok(NameIter {
        model,
        kind,
        cursor: Some(ty),
        level: Vec::new().into_iter(),
        failed: false,
    })
}

/// Iterate storage-slot names of `ty` and its ancestors on demand,
/// most-derived type first.
///
/// Resolution is checked eagerly; later model faults surface as `Err`
/// items, after which the iterator is exhausted.
pub fn slot_names<'m>(
    model: &'m dyn Introspect,
    ty: TypeDescriptor,
) -> ReflectResult<NameIter<'m>> {
    names(model, ty, NameKind::Slots)
}

/// Iterate callable-symbol names of `ty` and its ancestors on demand,
/// most-derived type first.
pub fn symbol_names<'m>(
    model: &'m dyn Introspect,
    ty: TypeDescriptor,
) -> ReflectResult<NameIter<'m>> {
    names(model, ty, NameKind::Symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed two-level model: Derived(slots: d0, d1; symbols: run, run)
    /// over Base(slots: b0; symbols: run).
    struct Fixture;

    const BASE: TypeDescriptor = TypeDescriptor::from_raw(1);
    const DERIVED: TypeDescriptor = TypeDescriptor::from_raw(2);

    impl Introspect for Fixture {
        fn resolve(&self, ty: TypeDescriptor) -> ReflectResult<()> {
            match ty.as_raw() {
                1 | 2 => Ok(()),
                _ => Err(ReflectError::InvalidType { descriptor: ty }),
            }
        }

        fn declared_slots(&self, ty: TypeDescriptor) -> ReflectResult<Vec<String>> {
            self.resolve(ty)?;
            Ok(match ty.as_raw() {
                2 => vec!["d0".into(), "d1".into()],
                _ => vec!["b0".into()],
            })
        }

        fn declared_symbols(&self, ty: TypeDescriptor) -> ReflectResult<Vec<String>> {
            self.resolve(ty)?;
            Ok(vec!["run".into()])
        }

        fn ancestor(&self, ty: TypeDescriptor) -> ReflectResult<Option<TypeDescriptor>> {
            self.resolve(ty)?;
            Ok(match ty.as_raw() {
                2 => Some(BASE),
                _ => None,
            })
        }
    }

    #[test]
    fn test_slots_most_derived_first() {
        let mut acc = Vec::new();
        list_instance_slots(&Fixture, DERIVED, &mut acc).unwrap();
        assert_eq!(acc, ["d0", "d1", "b0"]);
    }

    #[test]
    fn test_accumulator_is_additive() {
        let mut acc = vec!["seed".to_string()];
        list_instance_slots(&Fixture, BASE, &mut acc).unwrap();
        list_instance_slots(&Fixture, BASE, &mut acc).unwrap();
        assert_eq!(acc, ["seed", "b0", "b0"]);
    }

    #[test]
    fn test_duplicate_symbols_preserved() {
        let mut acc = Vec::new();
        list_callable_symbols(&Fixture, DERIVED, &mut acc).unwrap();
        assert_eq!(acc, ["run", "run"]);
    }

    #[test]
    fn test_invalid_descriptor_rejected() {
        let bogus = TypeDescriptor::from_raw(99);
        let mut acc = Vec::new();
        let err = list_instance_slots(&Fixture, bogus, &mut acc).unwrap_err();
        assert_eq!(err, ReflectError::InvalidType { descriptor: bogus });
        assert!(acc.is_empty());
    }

    #[test]
    fn test_lazy_iteration_matches_eager() {
        let lazy: Vec<String> = slot_names(&Fixture, DERIVED)
            .unwrap()
            .collect::<ReflectResult<_>>()
            .unwrap();
        let mut eager = Vec::new();
        list_instance_slots(&Fixture, DERIVED, &mut eager).unwrap();
        assert_eq!(lazy, eager);
    }
}
