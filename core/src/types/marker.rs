//! Marker types naming the logical types that boxed values resolve to.
//!
//! Markers are zero-sized and never constructed; their [`TypeId`] is the
//! stable key under which the registry files the corresponding descriptor.
//! Several source kinds may share one marker (all signed integer widths
//! collapse onto [`SignedInt`], for example), so consumers only ever branch
//! on a small set of logical types.

use core::any::TypeId;
use core::marker::PhantomData;

/// Element layout of an array-classified logical type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrayKind {
    /// Identity of the element type.
    pub element: TypeId,
    /// Diagnostic name of the element type.
    pub element_name: &'static str,
    /// Size of one element in bytes.
    pub element_size: usize,
}

impl ArrayKind {
    fn of<E: 'static>() -> Self {
        ArrayKind {
            element: TypeId::of::<E>(),
            element_name: core::any::type_name::<E>(),
            element_size: core::mem::size_of::<E>(),
        }
    }
}

/// A logical type that boxed values resolve to.
pub trait TypeMarker: 'static {
    /// Stable identity key of this logical type.
    fn key() -> TypeId {
        TypeId::of::<Self>()
    }

    /// Diagnostic name.
    fn name() -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Element layout when this logical type is array-classified.
    fn array_kind() -> Option<ArrayKind> {
        None
    }
}

/// All signed integer widths collapse here; payload is widened to `i64`.
pub struct SignedInt;

/// All unsigned integer widths collapse here; payload is widened to `u64`.
pub struct UnsignedInt;

/// Both floating point widths collapse here; payload is widened to `f64`.
pub struct Float;

pub struct Bool;

pub struct Char;

/// UTF-8 string slices, array-classified over bytes.
///
/// Distinct from `ArrayOf<u8>` so that recovering `&str` can never observe
/// bytes that did not come from a string.
pub struct StrView;

/// NUL-terminated C strings, array-classified over bytes with a lazily
/// resolved length.
pub struct CStrView;

/// Contiguous runs of `E`, boxed as an address/count pair.
pub struct ArrayOf<E: 'static>(PhantomData<fn(E)>);

/// Borrowed single values of a custom type `T`.
pub struct Ref<T: 'static>(PhantomData<fn(T)>);

impl TypeMarker for SignedInt {
    fn name() -> &'static str {
        "SignedInt"
    }
}

impl TypeMarker for UnsignedInt {
    fn name() -> &'static str {
        "UnsignedInt"
    }
}

impl TypeMarker for Float {
    fn name() -> &'static str {
        "Float"
    }
}

impl TypeMarker for Bool {
    fn name() -> &'static str {
        "Bool"
    }
}

impl TypeMarker for Char {
    fn name() -> &'static str {
        "Char"
    }
}

impl TypeMarker for StrView {
    fn name() -> &'static str {
        "StrView"
    }

    fn array_kind() -> Option<ArrayKind> {
        Some(ArrayKind::of::<u8>())
    }
}

impl TypeMarker for CStrView {
    fn name() -> &'static str {
        "CStrView"
    }

    fn array_kind() -> Option<ArrayKind> {
        Some(ArrayKind::of::<u8>())
    }
}

impl<E: 'static> TypeMarker for ArrayOf<E> {
    fn array_kind() -> Option<ArrayKind> {
        Some(ArrayKind::of::<E>())
    }
}

impl<T: 'static> TypeMarker for Ref<T> {}
