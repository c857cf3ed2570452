//! Built-in box functions and their bootstrap registration.
//!
//! Each built-in kind ships a permissive default plus specializations for
//! the numeric families. The order specializations decode the *other*
//! operand into their own family, so signed/unsigned/float boxes order by
//! magnitude; equality stays within each family. Everything without a
//! numeric coercion falls back to the stable (but arbitrary) type-key
//! order of the default.

use core::cmp::Ordering;
use core::ffi::CStr;
use core::hash::{Hash, Hasher};
use std::hash::DefaultHasher;

use crate::error::Error;
use crate::values::Boxed;

use super::{Function, register, register_default};

// =============================================================================
// Function kinds
// =============================================================================

/// Equality test. Neutral result: `false` (no implementation means
/// "not equal", including for unset boxes).
pub struct Equals;

/// Strict-order test. Neutral result: `false`.
pub struct IsLess;

/// Null test. Neutral result: `false`; types without the concept of
/// nullness are never null.
pub struct IsNull;

/// Emptiness test. Neutral result: `false`.
pub struct IsEmpty;

/// Truth test. Neutral result: `false`.
pub struct IsTrue;

/// Content hash. Neutral result: `0`.
pub struct Hashcode;

impl Function for Equals {
    type Invoker = fn(&Boxed<'_>, &Boxed<'_>) -> bool;
    type Output = bool;

    fn name() -> &'static str {
        "Equals"
    }
}

impl Function for IsLess {
    type Invoker = fn(&Boxed<'_>, &Boxed<'_>) -> bool;
    type Output = bool;

    fn name() -> &'static str {
        "IsLess"
    }
}

impl Function for IsNull {
    type Invoker = fn(&Boxed<'_>) -> bool;
    type Output = bool;

    fn name() -> &'static str {
        "IsNull"
    }
}

impl Function for IsEmpty {
    type Invoker = fn(&Boxed<'_>) -> bool;
    type Output = bool;

    fn name() -> &'static str {
        "IsEmpty"
    }
}

impl Function for IsTrue {
    type Invoker = fn(&Boxed<'_>) -> bool;
    type Output = bool;

    fn name() -> &'static str {
        "IsTrue"
    }
}

impl Function for Hashcode {
    type Invoker = fn(&Boxed<'_>) -> u64;
    type Output = u64;

    fn name() -> &'static str {
        "Hashcode"
    }
}

// =============================================================================
// Defaults
// =============================================================================

fn array_bytes<'a>(b: &Boxed<'a>) -> Option<&'a [u8]> {
    let len = b.length();
    let element_size = b
        .descriptor()
        .and_then(|d| d.array_kind())
        .map_or(1, |kind| kind.element_size);
    let ptr = b.raw().as_ptr();
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { core::slice::from_raw_parts(ptr.cast::<u8>(), len * element_size) })
}

fn equals_default(lhs: &Boxed<'_>, rhs: &Boxed<'_>) -> bool {
    if lhs.type_key() != rhs.type_key() {
        return false;
    }
    if lhs.is_array() {
        if lhs.length() != rhs.length() {
            return false;
        }
        return match (array_bytes(lhs), array_bytes(rhs)) {
            (Some(a), Some(b)) => a.is_empty() || a == b,
            (None, None) => true,
            _ => false,
        };
    }
    lhs.raw().bit_eq(rhs.raw()) && lhs.stored_length() == rhs.stored_length()
}

fn is_less_default(lhs: &Boxed<'_>, rhs: &Boxed<'_>) -> bool {
    match (lhs.type_key(), rhs.type_key()) {
        (Some(a), Some(b)) if a == b => lhs.raw().bit_pattern() < rhs.raw().bit_pattern(),
        (a, b) => a < b,
    }
}

fn is_null_default(b: &Boxed<'_>) -> bool {
    b.raw().is_null_ptr()
}

fn is_empty_default(b: &Boxed<'_>) -> bool {
    b.is_array() && b.length() == 0
}

fn is_true_default(b: &Boxed<'_>) -> bool {
    if b.is_array() {
        return b.length() != 0;
    }
    b.raw().bit_pattern() != 0
}

/// Hashes the type key plus the payload bits, or the array bytes for
/// array-classified boxes. Like equality, the key takes part, so equal
/// magnitudes of different families hash apart.
fn hashcode_default(b: &Boxed<'_>) -> u64 {
    let mut hasher = DefaultHasher::new();
    b.type_key().hash(&mut hasher);
    if b.is_array() {
        b.length().hash(&mut hasher);
        if let Some(bytes) = array_bytes(b) {
            bytes.hash(&mut hasher);
        }
    } else {
        b.raw().bit_pattern().hash(&mut hasher);
    }
    hasher.finish()
}

// =============================================================================
// Numeric and character specializations
// =============================================================================

// Equality never crosses families: a signed and an unsigned box of equal
// magnitude stay unequal because their logical types differ. Coercion
// between the families belongs to the order test only.

fn equals_float(lhs: &Boxed<'_>, rhs: &Boxed<'_>) -> bool {
    if !rhs.is_floating_point() {
        return false;
    }
    let (a, b) = (lhs.as_float(), rhs.as_float());
    // Equal, or within twice the single-precision epsilon to absorb the
    // rounding introduced by the width-widening conversions.
    a == b || (a - b).abs() <= f64::from(2.0f32 * f32::EPSILON)
}

fn equals_signed(lhs: &Boxed<'_>, rhs: &Boxed<'_>) -> bool {
    rhs.is_signed_integral() && lhs.as_signed() == rhs.as_signed()
}

fn equals_unsigned(lhs: &Boxed<'_>, rhs: &Boxed<'_>) -> bool {
    rhs.is_unsigned_integral() && lhs.as_unsigned() == rhs.as_unsigned()
}

fn equals_char(lhs: &Boxed<'_>, rhs: &Boxed<'_>) -> bool {
    rhs.is_character() && lhs.as_character() == rhs.as_character()
}

fn is_less_signed(lhs: &Boxed<'_>, rhs: &Boxed<'_>) -> bool {
    let a = lhs.as_signed();
    if rhs.is_signed_integral() {
        return a < rhs.as_signed();
    }
    if rhs.is_unsigned_integral() {
        return a < rhs.as_unsigned() as i64;
    }
    if rhs.is_floating_point() {
        return (a as f64) < rhs.as_float();
    }
    lhs.type_key() < rhs.type_key()
}

fn is_less_unsigned(lhs: &Boxed<'_>, rhs: &Boxed<'_>) -> bool {
    let a = lhs.as_unsigned();
    if rhs.is_signed_integral() {
        return a < rhs.as_signed() as u64;
    }
    if rhs.is_unsigned_integral() {
        return a < rhs.as_unsigned();
    }
    if rhs.is_floating_point() {
        return (a as f64) < rhs.as_float();
    }
    lhs.type_key() < rhs.type_key()
}

fn is_less_float(lhs: &Boxed<'_>, rhs: &Boxed<'_>) -> bool {
    let a = lhs.as_float();
    if rhs.is_floating_point() {
        return a < rhs.as_float();
    }
    if rhs.is_signed_integral() {
        return a < rhs.as_signed() as f64;
    }
    if rhs.is_unsigned_integral() {
        return a < rhs.as_unsigned() as f64;
    }
    lhs.type_key() < rhs.type_key()
}

fn is_less_char(lhs: &Boxed<'_>, rhs: &Boxed<'_>) -> bool {
    if rhs.is_character() {
        return lhs.as_character() < rhs.as_character();
    }
    lhs.type_key() < rhs.type_key()
}

fn is_less_str(lhs: &Boxed<'_>, rhs: &Boxed<'_>) -> bool {
    if rhs.is_type::<str>() {
        return lhs.unbox::<&str>() < rhs.unbox::<&str>();
    }
    lhs.type_key() < rhs.type_key()
}

fn never_null(_: &Boxed<'_>) -> bool {
    false
}

/// Self-delimited sequences have no stored count to tell "absent" from
/// "present but empty", so a sequence that starts at its terminator is
/// treated as null too.
fn is_null_terminated(b: &Boxed<'_>) -> bool {
    b.raw().is_null_ptr() || b.length() == 0
}

// =============================================================================
// Bootstrap registration
// =============================================================================

/// Installs the defaults and the built-in specializations. Called by
/// [`bootstrap`](crate::types::bootstrap).
pub(crate) fn install() -> Result<(), Error> {
    register_default::<Equals>(equals_default)?;
    register_default::<IsLess>(is_less_default)?;
    register_default::<IsNull>(is_null_default)?;
    register_default::<IsEmpty>(is_empty_default)?;
    register_default::<IsTrue>(is_true_default)?;
    register_default::<Hashcode>(hashcode_default)?;

    register::<Equals, i64>(equals_signed)?;
    register::<Equals, u64>(equals_unsigned)?;
    register::<Equals, f64>(equals_float)?;
    register::<Equals, char>(equals_char)?;

    register::<IsLess, i64>(is_less_signed)?;
    register::<IsLess, u64>(is_less_unsigned)?;
    register::<IsLess, f64>(is_less_float)?;
    register::<IsLess, char>(is_less_char)?;
    register::<IsLess, str>(is_less_str)?;

    // Arithmetic types never carry the concept of nullness, whatever their
    // payload bits say.
    register::<IsNull, i64>(never_null)?;
    register::<IsNull, u64>(never_null)?;
    register::<IsNull, f64>(never_null)?;
    register::<IsNull, bool>(never_null)?;
    register::<IsNull, char>(never_null)?;
    register::<IsNull, CStr>(is_null_terminated)?;

    Ok(())
}

// =============================================================================
// Convenience surface on Boxed
// =============================================================================

/// All of these resolve through the function tables and therefore return
/// their neutral results until [`bootstrap`](crate::types::bootstrap) has
/// run.
impl<'a> Boxed<'a> {
    pub fn equals(&self, rhs: &Boxed<'_>) -> bool {
        self.invoke::<Equals>(|f| f(self, rhs))
    }

    pub fn is_less(&self, rhs: &Boxed<'_>) -> bool {
        self.invoke::<IsLess>(|f| f(self, rhs))
    }

    pub fn is_null(&self) -> bool {
        self.invoke::<IsNull>(|f| f(self))
    }

    pub fn is_empty(&self) -> bool {
        self.invoke::<IsEmpty>(|f| f(self))
    }

    pub fn is_true(&self) -> bool {
        self.invoke::<IsTrue>(|f| f(self))
    }

    pub fn hash_code(&self) -> u64 {
        self.invoke::<Hashcode>(|f| f(self))
    }
}

impl PartialEq for Boxed<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl PartialOrd for Boxed<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.equals(other) {
            Some(Ordering::Equal)
        } else if self.is_less(other) {
            Some(Ordering::Less)
        } else {
            Some(Ordering::Greater)
        }
    }
}

impl Hash for Boxed<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}
