//! The process-wide descriptor registry and its lifecycle.
//!
//! The registry has a two-phase lifecycle: an open phase during which
//! [`bootstrap`] and embedding modules register function implementations,
//! and a frozen phase in which all tables are read-only. Descriptor creation
//! itself stays lazy in both phases; only function registration is gated.
//!
//! The intended call order of an embedding program is [`bootstrap`], then
//! its own registrations, then [`freeze`] before concurrent use begins.

use core::any::TypeId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Once, PoisonError, RwLock};

use hashbrown::HashMap;
#[cfg(debug_assertions)]
use hashbrown::HashSet;
use lazy_static::lazy_static;

use super::descriptor::{Slot, TypeDescriptor};
use super::marker::TypeMarker;
use crate::error::Error;

lazy_static! {
    static ref REGISTRY: Registry = Registry::new();
}

/// The process-wide registry instance.
pub fn global() -> &'static Registry {
    &REGISTRY
}

/// Owner of all type descriptors and the per-kind default functions.
pub struct Registry {
    descriptors: RwLock<HashMap<TypeId, &'static TypeDescriptor>>,
    defaults: RwLock<HashMap<TypeId, Slot>>,
    frozen: AtomicBool,
    /// Every function kind that was ever registered, specifically or as a
    /// default. Lets debug builds flag lookups of kinds that no bootstrap
    /// code knows about.
    #[cfg(debug_assertions)]
    registered_kinds: RwLock<HashSet<TypeId>>,
}

impl Registry {
    fn new() -> Self {
        Registry {
            descriptors: RwLock::new(HashMap::new()),
            defaults: RwLock::new(HashMap::new()),
            frozen: AtomicBool::new(false),
            #[cfg(debug_assertions)]
            registered_kinds: RwLock::new(HashSet::new()),
        }
    }

    /// Returns the descriptor for the logical type `M`, creating it on first
    /// use.
    ///
    /// All calls for the same marker return the same `&'static` instance.
    /// Concurrent first-time calls are resolved under the write lock, so
    /// exactly one descriptor is ever published per key.
    pub fn descriptor<M: TypeMarker>(&self) -> &'static TypeDescriptor {
        let key = M::key();
        if let Some(descr) = self
            .descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            debug_assert_eq!(descr.name(), M::name(), "type key registered twice");
            return descr;
        }

        let mut map = self
            .descriptors
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(descr) = map.get(&key) {
            // Another thread created it while we waited for the lock.
            debug_assert_eq!(descr.name(), M::name(), "type key registered twice");
            return descr;
        }
        let descr: &'static TypeDescriptor = Box::leak(Box::new(TypeDescriptor::new(
            key,
            M::name(),
            M::array_kind(),
        )));
        map.insert(key, descr);
        tracing::debug!(name = M::name(), "created type descriptor");
        descr
    }

    /// Number of descriptors created so far.
    pub fn descriptor_count(&self) -> usize {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    fn freeze(&self) {
        self.frozen.store(true, Ordering::Release);
        tracing::debug!("boxing registry frozen");
    }

    pub(crate) fn ensure_open(&self, function: &'static str) -> Result<(), Error> {
        if self.is_frozen() {
            return Err(Error::RegistryFrozen { function });
        }
        Ok(())
    }

    pub(crate) fn default_slot(&self, kind: TypeId) -> Option<Slot> {
        self.defaults
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .copied()
    }

    pub(crate) fn set_default_slot(&self, kind: TypeId, imp: Slot) {
        self.defaults
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind, imp);
    }

    #[cfg(debug_assertions)]
    pub(crate) fn note_kind(&self, kind: TypeId) {
        self.registered_kinds
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind);
    }

    #[cfg(debug_assertions)]
    pub(crate) fn kind_registered(&self, kind: TypeId) -> bool {
        self.registered_kinds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&kind)
    }
}

/// Installs the built-in function implementations.
///
/// Idempotent; safe to call from multiple entry points. Must run before the
/// built-in comparisons and predicates behave as documented; until then,
/// every function lookup resolves to its neutral result.
pub fn bootstrap() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        crate::functions::builtin::install().expect("registry frozen before bootstrap completed");
        tracing::debug!("boxing bootstrap complete");
    });
}

/// Ends the registration phase.
///
/// Runs [`bootstrap`] first if it has not run yet, then rejects all further
/// function registration. Descriptor creation stays available.
pub fn freeze() {
    bootstrap();
    global().freeze();
}
