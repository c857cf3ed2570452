//! Public error types.

/// Errors reported by the registration API.
///
/// Type mismatches during extraction are not errors but panics: silently
/// recovering a wrongly-typed payload would be a memory-safety hazard when
/// the payload is an address, so extraction fails loudly instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A function registration arrived after [`freeze`](crate::types::freeze)
    /// ended the registration phase.
    #[error("cannot register `{function}`: the boxing registry is frozen")]
    RegistryFrozen { function: &'static str },
}
