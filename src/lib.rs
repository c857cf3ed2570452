//! valbox: a small, fixed-size, copyable container for values of any type.
//!
//! # Overview
//!
//! Boxing wraps a value into a four-word [`Boxed`] container that knows its
//! logical type, can recover the original value, and dispatches pluggable
//! per-type behavior, without inheritance and without per-value heap
//! allocation. Typical consumers are formatters, message assembly and
//! logging layers that need to carry heterogeneous argument lists.
//!
//! The mapping from source kinds to logical types is deliberately
//! many-to-one: every signed integer width boxes to one logical type, as do
//! the unsigned widths and both float widths. Consumers branch on a handful
//! of logical types instead of every width the sources use.
//!
//! # Quick start
//!
//! ```
//! use valbox::{Boxed, Boxes, bootstrap};
//!
//! // Install the built-in comparisons and predicates once at startup.
//! bootstrap();
//!
//! // Widths collapse onto logical types.
//! let answer = Boxed::new(&42i16);
//! assert!(answer.is_type::<i64>());
//! assert_eq!(answer.unbox::<i64>(), 42);
//! assert!(answer.equals(&Boxed::new(&42i64)));
//!
//! // Signed and unsigned are distinct logical types: equal magnitude is
//! // not equality. The order test still coerces across families.
//! let unsigned = Boxed::new(&42u64);
//! assert!(!unsigned.is_type::<i64>());
//! assert!(!unsigned.equals(&answer));
//! assert!(!unsigned.is_less(&answer) && !answer.is_less(&unsigned));
//!
//! // Strings and slices box as address/count views.
//! let greeting = Boxed::new("hello");
//! assert!(greeting.is_array_of::<u8>());
//! assert_eq!(greeting.unbox::<&str>(), "hello");
//!
//! // Heterogeneous argument lists.
//! let mut args = Boxes::new();
//! args.add(&1u8).add("two").add(&3.0f32);
//! assert_eq!(args.len(), 3);
//! ```
//!
//! # Custom types
//!
//! A custom type becomes boxable with one macro invocation; its values are
//! captured by reference and can opt into recovery:
//!
//! ```
//! use valbox::{Boxed, boxable_by_ref};
//!
//! struct Ticket {
//!     seat: u32,
//! }
//! boxable_by_ref!(Ticket, unboxable);
//!
//! let t = Ticket { seat: 12 };
//! let b = Boxed::new(&t);
//! assert!(b.is_type::<Ticket>());
//! assert_eq!(b.unbox::<&Ticket>().seat, 12);
//! ```
//!
//! Per-type behavior is attached during the bootstrap phase via
//! [`functions::register`] and [`functions::register_default`]; see
//! [`functions::Function`] for the dispatch contract.

pub use valbox_core::*;

pub use valbox_core::boxable_by_ref;
