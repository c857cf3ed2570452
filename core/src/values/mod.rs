//! Box values: the container, its payload, the boxing rules and box lists.

pub mod boxed;
pub mod list;
pub mod raw;
pub mod rules;

pub use boxed::Boxed;
pub use list::Boxes;
pub use raw::Raw;
pub use rules::{Boxable, LENGTH_UNKNOWN, Unboxable};
