//! Per-logical-type descriptors.

use core::any::{Any, TypeId};
use core::fmt;
use std::sync::{PoisonError, RwLock};

use hashbrown::HashMap;

use super::marker::ArrayKind;

/// A type-erased function implementation attached to a descriptor slot.
///
/// The concrete type behind the `Any` is the function kind's invoker
/// (a fn pointer); the dispatch layer downcasts it back.
pub(crate) type Slot = &'static (dyn Any + Send + Sync);

/// Descriptor of one logical type.
///
/// Exactly one descriptor exists per type key for the lifetime of the
/// process; the registry hands them out as `&'static` references, so a box
/// can identify its type with a single key comparison and carry the
/// reference at no cost.
pub struct TypeDescriptor {
    key: TypeId,
    name: &'static str,
    array: Option<ArrayKind>,
    slots: RwLock<HashMap<TypeId, Slot>>,
}

impl TypeDescriptor {
    pub(crate) fn new(key: TypeId, name: &'static str, array: Option<ArrayKind>) -> Self {
        TypeDescriptor {
            key,
            name,
            array,
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Stable identity key; equal keys mean the same logical type.
    pub fn key(&self) -> TypeId {
        self.key
    }

    /// Diagnostic name of the logical type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Element layout if this logical type is array-classified.
    pub fn array_kind(&self) -> Option<ArrayKind> {
        self.array
    }

    pub fn is_array(&self) -> bool {
        self.array.is_some()
    }

    pub(crate) fn slot(&self, kind: TypeId) -> Option<Slot> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .copied()
    }

    /// Installs `imp` for `kind`, replacing any previous entry.
    pub(crate) fn set_slot(&self, kind: TypeId, imp: Slot) {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind, imp);
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TypeDescriptor {}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("array", &self.array)
            .finish()
    }
}
