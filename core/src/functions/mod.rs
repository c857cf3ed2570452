//! Pluggable per-type box functions.
//!
//! A *function kind* is a marker type implementing [`Function`]; its
//! implementations are plain fn pointers stored in two tables: a specific
//! table on each type descriptor and a process-wide default table keyed by
//! kind alone. Resolution is specific first, then default, then the kind's
//! neutral output. Generic code can therefore probe any box without risking a
//! panic, while [`Boxed::has_function`] lets callers tell "the type's
//! author supplied behavior" apart from "the generic fallback answered".

use core::any::{Any, TypeId};

use crate::error::Error;
use crate::types::registry;
use crate::values::{Boxable, Boxed};

pub mod builtin;

/// A function kind dispatched over boxed values.
///
/// Implementations are stateless fn pointers of type `Invoker`; the same
/// pointer may serve any number of logical types. `Output::default()` is
/// the kind's documented neutral result, returned when no implementation is
/// found at all.
pub trait Function: 'static {
    /// The fn-pointer type stored in dispatch tables.
    type Invoker: Copy + Send + Sync + 'static;

    /// Result type; its `Default` value is the neutral result.
    type Output: Default;

    /// Diagnostic name.
    fn name() -> &'static str {
        core::any::type_name::<Self>()
    }
}

fn leak_slot<F: Function>(invoker: F::Invoker) -> &'static (dyn Any + Send + Sync) {
    Box::leak(Box::new(invoker))
}

/// Registers `invoker` as the implementation of `F` for the logical type
/// that kind `K` resolves to, replacing any previous specific entry.
///
/// Registration is a bootstrap-phase operation; after
/// [`freeze`](crate::types::freeze) it fails with
/// [`Error::RegistryFrozen`].
pub fn register<F: Function, K: Boxable + ?Sized>(invoker: F::Invoker) -> Result<(), Error> {
    let reg = registry::global();
    reg.ensure_open(F::name())?;
    let descr = reg.descriptor::<K::Target>();
    descr.set_slot(TypeId::of::<F>(), leak_slot::<F>(invoker));
    #[cfg(debug_assertions)]
    reg.note_kind(TypeId::of::<F>());
    tracing::trace!(
        function = F::name(),
        for_type = descr.name(),
        "registered box function"
    );
    Ok(())
}

/// Registers `invoker` as the fallback implementation of `F`, used by every
/// logical type without a specific entry.
pub fn register_default<F: Function>(invoker: F::Invoker) -> Result<(), Error> {
    let reg = registry::global();
    reg.ensure_open(F::name())?;
    reg.set_default_slot(TypeId::of::<F>(), leak_slot::<F>(invoker));
    #[cfg(debug_assertions)]
    reg.note_kind(TypeId::of::<F>());
    tracing::trace!(function = F::name(), "registered default box function");
    Ok(())
}

impl<'a> Boxed<'a> {
    /// True iff a *specific* implementation of `F` exists for this box's
    /// logical type. A registered default alone does not count.
    pub fn has_function<F: Function>(&self) -> bool {
        self.descriptor()
            .is_some_and(|d| d.slot(TypeId::of::<F>()).is_some())
    }

    /// Resolves the implementation of `F`: specific entry first, then the
    /// kind's default. Unset boxes resolve nothing.
    pub fn function<F: Function>(&self) -> Option<F::Invoker> {
        let descr = self.descriptor()?;
        let slot = descr
            .slot(TypeId::of::<F>())
            .or_else(|| registry::global().default_slot(TypeId::of::<F>()));
        match slot {
            Some(slot) => slot.downcast_ref::<F::Invoker>().copied(),
            None => {
                #[cfg(debug_assertions)]
                if !registry::global().kind_registered(TypeId::of::<F>()) {
                    tracing::warn!(
                        function = F::name(),
                        "box function was never registered anywhere; check bootstrap order"
                    );
                }
                None
            }
        }
    }

    /// Resolves `F` and calls it through `call`, or returns the kind's
    /// neutral output when no implementation exists. Never panics on a
    /// missing implementation.
    pub fn invoke<F: Function>(&self, call: impl FnOnce(F::Invoker) -> F::Output) -> F::Output {
        match self.function::<F>() {
            Some(invoker) => call(invoker),
            None => F::Output::default(),
        }
    }
}
