//! The box container: a fixed-size, copyable view of an arbitrary value.

use core::any::TypeId;
use core::fmt;
use core::marker::PhantomData;

use crate::types::descriptor::TypeDescriptor;
use crate::types::marker::{self, TypeMarker};
use crate::types::registry;

use super::raw::Raw;
use super::rules::{Boxable, Unboxable};

/// A boxed value: a descriptor reference, a fixed-width payload and a length.
///
/// Boxes are created by value on the stack, copied freely and destroyed
/// without side effects; they never own the data an address payload points
/// to. The borrow lifetime `'a` ties a box to whatever it was created from,
/// so a box can never outlive its pointee.
///
/// # Example
///
/// ```
/// use valbox_core::values::Boxed;
///
/// let b = Boxed::new(&42i16);
/// assert!(b.is_type::<i64>()); // widths collapse onto one logical type
/// assert_eq!(b.unbox::<i64>(), 42);
/// ```
#[derive(Clone, Copy)]
pub struct Boxed<'a> {
    descr: Option<&'static TypeDescriptor>,
    raw: Raw,
    len: isize,
    _borrow: PhantomData<&'a ()>,
}

impl<'a> Boxed<'a> {
    /// Boxes a value.
    ///
    /// The value's boxing rule selects the logical target type and captures
    /// the payload; the descriptor is created on first use of that target.
    /// No heap allocation takes place.
    pub fn new<T: Boxable + ?Sized>(value: &'a T) -> Self {
        let (raw, len) = value.enbox();
        Boxed {
            descr: Some(registry::global().descriptor::<T::Target>()),
            raw,
            len,
            _borrow: PhantomData,
        }
    }

    /// A box holding nothing; all queries are false and all function
    /// invocations yield their neutral results.
    pub fn unset() -> Self {
        Boxed {
            descr: None,
            raw: Raw::Int(0),
            len: 0,
            _borrow: PhantomData,
        }
    }

    /// A null box of the logical type `M`: an address payload holding the
    /// null address. Only meaningful for address-backed targets.
    pub fn null<M: TypeMarker>() -> Self {
        Boxed {
            descr: Some(registry::global().descriptor::<M>()),
            raw: Raw::Ptr(core::ptr::null()),
            len: 0,
            _borrow: PhantomData,
        }
    }

    /// True for the descriptor-less box produced by [`Boxed::unset`].
    pub fn is_unset(&self) -> bool {
        self.descr.is_none()
    }

    pub fn descriptor(&self) -> Option<&'static TypeDescriptor> {
        self.descr
    }

    /// Identity key of the logical type, if any.
    pub fn type_key(&self) -> Option<TypeId> {
        self.descr.map(|d| d.key())
    }

    /// Diagnostic name of the logical type.
    pub fn type_name(&self) -> &'static str {
        self.descr.map_or("<unset>", |d| d.name())
    }

    /// True iff this box's descriptor is the one boxing a value of kind `K`
    /// would select. A single key comparison.
    pub fn is_type<K: Boxable + ?Sized>(&self) -> bool {
        self.type_key() == Some(K::Target::key())
    }

    /// True iff the logical type is array-classified.
    ///
    /// Array classification is a separate axis from [`is_type`]: an array
    /// box and a scalar box over "the same" element type never agree.
    ///
    /// [`is_type`]: Boxed::is_type
    pub fn is_array(&self) -> bool {
        self.descr.is_some_and(|d| d.is_array())
    }

    /// True iff the box is array-classified over element type `E`.
    pub fn is_array_of<E: 'static>(&self) -> bool {
        self.descr
            .and_then(|d| d.array_kind())
            .is_some_and(|kind| kind.element == TypeId::of::<E>())
    }

    /// The stored length field: element count for array boxes, `0` for
    /// scalars, or [`LENGTH_UNKNOWN`](super::rules::LENGTH_UNKNOWN) for
    /// self-delimited sequences.
    pub fn stored_length(&self) -> isize {
        self.len
    }

    /// The element count, resolving the unknown-length sentinel by scanning
    /// for the terminator. Scalars report `0`.
    pub fn length(&self) -> usize {
        if self.len >= 0 {
            return self.len as usize;
        }
        self.resolve_terminated_length()
    }

    fn resolve_terminated_length(&self) -> usize {
        let Some(kind) = self.descr.and_then(|d| d.array_kind()) else {
            return 0;
        };
        let Raw::Ptr(ptr) = self.raw else {
            return 0;
        };
        if ptr.is_null() {
            return 0;
        }
        let size = kind.element_size.max(1);
        let bytes = ptr.cast::<u8>();
        let mut count = 0usize;
        // The rule that stored the sentinel guarantees an all-zero
        // terminator element exists past the data.
        unsafe {
            loop {
                let elem = core::slice::from_raw_parts(bytes.add(count * size), size);
                if elem.iter().all(|&b| b == 0) {
                    return count;
                }
                count += 1;
            }
        }
    }

    // =========================================================================
    // Numeric family probes
    // =========================================================================
    //
    // Cross-family comparison decodes "the other" box into its own family;
    // these probes and readers are that decoding surface.

    pub fn is_signed_integral(&self) -> bool {
        self.type_key() == Some(marker::SignedInt::key())
    }

    pub fn is_unsigned_integral(&self) -> bool {
        self.type_key() == Some(marker::UnsignedInt::key())
    }

    pub fn is_floating_point(&self) -> bool {
        self.type_key() == Some(marker::Float::key())
    }

    pub fn is_character(&self) -> bool {
        self.type_key() == Some(marker::Char::key())
    }

    /// Reads the widened signed payload. Panics unless
    /// [`is_signed_integral`](Boxed::is_signed_integral) holds.
    pub fn as_signed(&self) -> i64 {
        self.raw.as_int()
    }

    /// Reads the widened unsigned payload. Panics unless
    /// [`is_unsigned_integral`](Boxed::is_unsigned_integral) holds.
    pub fn as_unsigned(&self) -> u64 {
        self.raw.as_uint()
    }

    /// Reads the widened float payload. Panics unless
    /// [`is_floating_point`](Boxed::is_floating_point) holds.
    pub fn as_float(&self) -> f64 {
        self.raw.as_float()
    }

    /// Reads the character payload. Panics unless
    /// [`is_character`](Boxed::is_character) holds.
    pub fn as_character(&self) -> char {
        self.raw.as_char()
    }

    pub(crate) fn raw(&self) -> Raw {
        self.raw
    }

    // =========================================================================
    // Extraction
    // =========================================================================

    /// Recovers a value of kind `T`.
    ///
    /// Only kinds whose rule permits recovery implement [`Unboxable`];
    /// everything else is rejected at compile time. A descriptor mismatch
    /// panics: the payload may be an address, so a silent wrong-typed
    /// recovery is never an option.
    pub fn unbox<T: Unboxable<'a>>(&self) -> T {
        let expected = <T::Source as Boxable>::Target::key();
        match self.descr {
            Some(d) if d.key() == expected => unsafe { T::debox(self.raw, self.len) },
            Some(d) => panic!(
                "cannot unbox `{}` from a box of `{}`",
                core::any::type_name::<T>(),
                d.name(),
            ),
            None => panic!(
                "cannot unbox `{}` from an unset box",
                core::any::type_name::<T>(),
            ),
        }
    }

    /// The address/count pair of an array-classified box, as a slice.
    ///
    /// Panics if the box is not array-classified over `E`. The unknown
    /// length sentinel is resolved first.
    pub fn as_slice<E: 'static>(&self) -> &'a [E] {
        assert!(
            self.is_array_of::<E>(),
            "box of `{}` does not hold an array of `{}`",
            self.type_name(),
            core::any::type_name::<E>(),
        );
        let len = self.length();
        let ptr = self.raw.as_ptr();
        if ptr.is_null() || len == 0 {
            return &[];
        }
        unsafe { core::slice::from_raw_parts(ptr.cast::<E>(), len) }
    }

    /// Reads element `index` of an array-classified box.
    ///
    /// Panics on element-type mismatch or out-of-bounds index.
    pub fn unbox_element<E: 'static>(&self, index: usize) -> &'a E {
        let slice = self.as_slice::<E>();
        match slice.get(index) {
            Some(element) => element,
            None => panic!(
                "index {index} out of bounds for array box of length {}",
                slice.len(),
            ),
        }
    }
}

impl Default for Boxed<'_> {
    fn default() -> Self {
        Boxed::unset()
    }
}

impl<'a, T: Boxable + ?Sized> From<&'a T> for Boxed<'a> {
    fn from(value: &'a T) -> Self {
        Boxed::new(value)
    }
}

impl fmt::Debug for Boxed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Boxed")
            .field("type", &self.type_name())
            .field("raw", &self.raw)
            .field("len", &self.len)
            .finish()
    }
}

// Boxes stay four words: descriptor reference, two-word payload, length.
static_assertions::assert_eq_size!(Boxed<'static>, [usize; 4]);
static_assertions::assert_impl_all!(Boxed<'static>: Copy);
