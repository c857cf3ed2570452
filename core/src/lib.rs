//! Core engine of `valbox`: runtime value boxing without inheritance and
//! without per-value heap allocation.
//!
//! A [`Boxed`] value is four words: a reference to a process-wide type
//! descriptor, a fixed-width payload (inline scalar bits or a borrowed
//! address), and a length used by array-classified boxes. Boxing rules are
//! ordinary trait impls ([`values::Boxable`]), descriptors are created
//! lazily in a process-wide registry, and behavior is attached per logical
//! type through pluggable box functions ([`functions::Function`]) with
//! per-kind defaults.
//!
//! Call [`types::bootstrap`] once at startup to install the built-in
//! comparisons and predicates, register custom rules and functions, then
//! [`types::freeze`] before concurrent use.

pub mod error;
pub mod functions;
pub mod types;
pub mod values;

pub use error::Error;
pub use functions::Function;
pub use functions::builtin::{Equals, Hashcode, IsEmpty, IsLess, IsNull, IsTrue};
pub use types::{ArrayKind, TypeDescriptor, TypeMarker, bootstrap, freeze};
pub use values::{Boxable, Boxed, Boxes, LENGTH_UNKNOWN, Raw, Unboxable};
