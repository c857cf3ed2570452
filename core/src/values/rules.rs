//! Boxing rules: how each source kind maps into a box.
//!
//! One [`Boxable`] impl exists per source kind. The rule names the logical
//! target type and captures the payload (bit pattern for scalars, address
//! for everything else). The mapping is deliberately many-to-one: every
//! signed integer width resolves to the same target, as do the unsigned
//! widths and both float widths, so consuming code only branches on a few
//! logical types.
//!
//! Recovery is a separate trait, [`Unboxable`], implemented only where the
//! rule permits it. Recovering `i16` from a box is a compile error, since
//! the width was lost when the payload was widened.

use core::ffi::CStr;
use std::ffi::CString;

use crate::types::marker::{
    ArrayOf, Bool, CStrView, Char, Float, SignedInt, StrView, TypeMarker, UnsignedInt,
};

use super::raw::Raw;

/// Stored length of a self-delimited sequence whose element count is not
/// known at boxing time. Resolved lazily by scanning for the terminator.
pub const LENGTH_UNKNOWN: isize = -1;

/// A boxing rule for one source kind.
pub trait Boxable {
    /// Logical type this kind resolves to.
    type Target: TypeMarker;

    /// Captures the payload and stored length for a value of this kind.
    fn enbox(&self) -> (Raw, isize);
}

/// Recovery side of a boxing rule.
///
/// Implemented for the canonical widths (`i64`, `u64`, `f64`, `bool`,
/// `char`) and the borrowed views (`&str`, `&[E]`, `&CStr`); collapsed
/// widths have no impl and cannot be asked for.
pub trait Unboxable<'a>: Sized {
    /// The source kind whose rule produced the payload.
    type Source: Boxable + ?Sized;

    /// Decodes a payload produced by `Self::Source`'s rule.
    ///
    /// # Safety
    ///
    /// `raw` and `len` must come from a box whose descriptor was verified to
    /// be `Self::Source`'s target, and for address payloads the pointee must
    /// outlive `'a`. [`Boxed::unbox`](crate::values::Boxed::unbox) performs
    /// that verification.
    unsafe fn debox(raw: Raw, len: isize) -> Self;
}

// =============================================================================
// Scalar families
// =============================================================================

macro_rules! signed_rules {
    ($($ty:ty),*) => {$(
        impl Boxable for $ty {
            type Target = SignedInt;

            fn enbox(&self) -> (Raw, isize) {
                (Raw::Int(*self as i64), 0)
            }
        }
    )*};
}

macro_rules! unsigned_rules {
    ($($ty:ty),*) => {$(
        impl Boxable for $ty {
            type Target = UnsignedInt;

            fn enbox(&self) -> (Raw, isize) {
                (Raw::UInt(*self as u64), 0)
            }
        }
    )*};
}

macro_rules! float_rules {
    ($($ty:ty),*) => {$(
        impl Boxable for $ty {
            type Target = Float;

            fn enbox(&self) -> (Raw, isize) {
                (Raw::Float(*self as f64), 0)
            }
        }
    )*};
}

signed_rules!(i8, i16, i32, i64, isize);
unsigned_rules!(u8, u16, u32, u64, usize);
float_rules!(f32, f64);

impl Boxable for bool {
    type Target = Bool;

    fn enbox(&self) -> (Raw, isize) {
        (Raw::Bool(*self), 0)
    }
}

impl Boxable for char {
    type Target = Char;

    fn enbox(&self) -> (Raw, isize) {
        (Raw::Char(*self), 0)
    }
}

impl<'a> Unboxable<'a> for i64 {
    type Source = i64;

    unsafe fn debox(raw: Raw, _len: isize) -> Self {
        raw.as_int()
    }
}

impl<'a> Unboxable<'a> for u64 {
    type Source = u64;

    unsafe fn debox(raw: Raw, _len: isize) -> Self {
        raw.as_uint()
    }
}

impl<'a> Unboxable<'a> for f64 {
    type Source = f64;

    unsafe fn debox(raw: Raw, _len: isize) -> Self {
        raw.as_float()
    }
}

impl<'a> Unboxable<'a> for bool {
    type Source = bool;

    unsafe fn debox(raw: Raw, _len: isize) -> Self {
        raw.as_bool()
    }
}

impl<'a> Unboxable<'a> for char {
    type Source = char;

    unsafe fn debox(raw: Raw, _len: isize) -> Self {
        raw.as_char()
    }
}

// =============================================================================
// References collapse onto their pointee's rule
// =============================================================================

/// Boxing a reference resolves to the same logical type as boxing the value
/// itself, and nested references keep collapsing. This makes the value/
/// reference distinction invisible to consumers, on purpose.
impl<T: Boxable + ?Sized> Boxable for &T {
    type Target = T::Target;

    fn enbox(&self) -> (Raw, isize) {
        (**self).enbox()
    }
}

// =============================================================================
// Strings and byte sequences
// =============================================================================

impl Boxable for str {
    type Target = StrView;

    fn enbox(&self) -> (Raw, isize) {
        (Raw::Ptr(self.as_ptr().cast()), self.len() as isize)
    }
}

impl Boxable for String {
    type Target = StrView;

    fn enbox(&self) -> (Raw, isize) {
        self.as_str().enbox()
    }
}

impl<'a> Unboxable<'a> for &'a str {
    type Source = str;

    unsafe fn debox(raw: Raw, len: isize) -> Self {
        let ptr = raw.as_ptr();
        if ptr.is_null() || len <= 0 {
            return "";
        }
        // Only the `str` rule produces this target, so the bytes are UTF-8.
        unsafe {
            let bytes = core::slice::from_raw_parts(ptr.cast::<u8>(), len as usize);
            core::str::from_utf8_unchecked(bytes)
        }
    }
}

impl Boxable for CStr {
    type Target = CStrView;

    fn enbox(&self) -> (Raw, isize) {
        (Raw::Ptr(self.as_ptr().cast()), LENGTH_UNKNOWN)
    }
}

impl Boxable for CString {
    type Target = CStrView;

    fn enbox(&self) -> (Raw, isize) {
        self.as_c_str().enbox()
    }
}

impl<'a> Unboxable<'a> for &'a CStr {
    type Source = CStr;

    unsafe fn debox(raw: Raw, _len: isize) -> Self {
        unsafe { CStr::from_ptr(raw.as_ptr().cast()) }
    }
}

// =============================================================================
// Arrays
// =============================================================================

impl<E: 'static> Boxable for [E] {
    type Target = ArrayOf<E>;

    fn enbox(&self) -> (Raw, isize) {
        (Raw::Ptr(self.as_ptr().cast()), self.len() as isize)
    }
}

impl<E: 'static> Boxable for Vec<E> {
    type Target = ArrayOf<E>;

    fn enbox(&self) -> (Raw, isize) {
        self.as_slice().enbox()
    }
}

impl<E: 'static, const N: usize> Boxable for [E; N] {
    type Target = ArrayOf<E>;

    fn enbox(&self) -> (Raw, isize) {
        self.as_slice().enbox()
    }
}

/// Recovers the address/count view. There is deliberately no rule that
/// recovers an owning container; callers needing one write their own rule
/// for a wrapper type.
impl<'a, E: 'static> Unboxable<'a> for &'a [E] {
    type Source = [E];

    unsafe fn debox(raw: Raw, len: isize) -> Self {
        let ptr = raw.as_ptr();
        if ptr.is_null() || len <= 0 {
            return &[];
        }
        unsafe { core::slice::from_raw_parts(ptr.cast::<E>(), len as usize) }
    }
}

// =============================================================================
// Custom types
// =============================================================================

/// Declares the by-reference boxing rule for a custom type.
///
/// The value's address becomes the payload and the target is
/// [`Ref<T>`](crate::types::marker::Ref); through the reference rule, `&T`
/// and `&&T` resolve to the same target. The plain form keeps the value
/// locked inside the box; the `unboxable` form also allows recovering
/// `&T` with [`Boxed::unbox`](crate::values::Boxed::unbox).
///
/// ```
/// use valbox_core::boxable_by_ref;
/// use valbox_core::values::Boxed;
///
/// struct Widget {
///     id: u32,
/// }
/// boxable_by_ref!(Widget, unboxable);
///
/// let w = Widget { id: 7 };
/// let b = Boxed::new(&w);
/// assert!(b.is_type::<Widget>());
/// assert_eq!(b.unbox::<&Widget>().id, 7);
/// ```
#[macro_export]
macro_rules! boxable_by_ref {
    ($ty:ty) => {
        impl $crate::values::Boxable for $ty {
            type Target = $crate::types::marker::Ref<$ty>;

            fn enbox(&self) -> ($crate::values::Raw, isize) {
                ($crate::values::Raw::Ptr((self as *const $ty).cast()), 0)
            }
        }
    };
    ($ty:ty, unboxable) => {
        $crate::boxable_by_ref!($ty);

        impl<'a> $crate::values::Unboxable<'a> for &'a $ty {
            type Source = $ty;

            unsafe fn debox(raw: $crate::values::Raw, _len: isize) -> Self {
                unsafe { &*raw.as_ptr().cast::<$ty>() }
            }
        }
    };
}
