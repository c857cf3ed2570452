//! The array path: address/count boxes, sentinels and byte-wise equality.

use core::ffi::CStr;
use std::ffi::CString;

use pretty_assertions::assert_eq;

use valbox_core::types::bootstrap;
use valbox_core::values::{Boxed, Boxes};

// =============================================================================
// Classification
// =============================================================================

#[test]
fn array_boxes_are_not_scalar_boxes() {
    let one = [1i64];
    let arr = Boxed::new(one.as_slice());
    let scalar = Boxed::new(&1i64);

    assert!(arr.is_array());
    assert!(arr.is_array_of::<i64>());
    assert!(!arr.is_type::<i64>());
    assert!(!scalar.is_array());
    assert_ne!(arr.type_key(), scalar.type_key());
}

#[test]
fn element_types_keep_arrays_apart() {
    let bytes = [1u8, 2];
    let words = [1u16, 2];
    let a = Boxed::new(bytes.as_slice());
    let b = Boxed::new(words.as_slice());
    assert!(a.is_array_of::<u8>());
    assert!(!a.is_array_of::<u16>());
    assert_ne!(a.type_key(), b.type_key());
}

#[test]
fn strings_are_byte_backed_but_keep_their_identity() {
    let text = Boxed::new("abc");
    let bytes = Boxed::new(b"abc".as_slice());

    assert!(text.is_array_of::<u8>());
    assert!(bytes.is_array_of::<u8>());
    assert_ne!(text.type_key(), bytes.type_key());
    assert_eq!(text.as_slice::<u8>(), b"abc");
}

// =============================================================================
// Element access
// =============================================================================

#[test]
fn elements_read_from_the_contiguous_run() {
    let primes = [2i32, 3, 5, 7];
    let b = Boxed::new(primes.as_slice());

    assert_eq!(b.length(), 4);
    assert_eq!(*b.unbox_element::<i32>(0), 2);
    assert_eq!(*b.unbox_element::<i32>(3), 7);
    assert_eq!(b.as_slice::<i32>(), &[2, 3, 5, 7]);
}

#[test]
fn fixed_size_arrays_box_like_slices() {
    let fixed = [9u8, 8, 7];
    let b = Boxed::new(&fixed);
    assert!(b.is_array_of::<u8>());
    assert_eq!(b.length(), 3);
    assert_eq!(b.unbox::<&[u8]>(), &[9, 8, 7]);
}

// =============================================================================
// Byte-wise equality
// =============================================================================

#[test]
fn equal_bytes_at_different_addresses_compare_equal() {
    bootstrap();
    let a = vec![10u32, 20, 30];
    let b = vec![10u32, 20, 30];
    assert!(Boxed::new(&a).equals(&Boxed::new(&b)));
}

#[test]
fn one_differing_byte_breaks_equality() {
    bootstrap();
    let a = [10u32, 20, 30];
    let b = [10u32, 20, 31];
    assert!(!Boxed::new(a.as_slice()).equals(&Boxed::new(b.as_slice())));
}

#[test]
fn differing_lengths_break_equality() {
    bootstrap();
    let a = [1u8, 2, 3];
    let b = [1u8, 2];
    assert!(!Boxed::new(a.as_slice()).equals(&Boxed::new(b.as_slice())));
}

#[test]
fn zero_length_arrays_compare_equal_wherever_they_point() {
    bootstrap();
    let a: [u64; 0] = [];
    let b = [99u64];
    assert!(Boxed::new(a.as_slice()).equals(&Boxed::new(&b[..0])));
}

#[test]
fn null_and_non_null_never_compare_equal() {
    bootstrap();
    let empty: [u8; 0] = [];
    let null = Boxed::null::<valbox_core::types::marker::ArrayOf<u8>>();
    let zero_len = Boxed::new(empty.as_slice());

    let null_copy = null;
    assert!(null.is_null());
    assert!(!zero_len.is_null());
    assert!(!null.equals(&zero_len));
    assert!(null.equals(&null_copy));
}

// =============================================================================
// Self-delimited sequences
// =============================================================================

#[test]
fn terminated_sequences_resolve_their_length_lazily() {
    bootstrap();
    let c = CString::new("lazy").unwrap();
    let b = Boxed::new(&c);

    assert_eq!(b.stored_length(), -1);
    assert!(!b.is_empty());
    assert_eq!(b.length(), 4);
    assert_eq!(b.as_slice::<u8>(), b"lazy");
}

#[test]
fn terminated_sequences_with_equal_content_compare_equal() {
    bootstrap();
    let a = CString::new("same").unwrap();
    let b = CString::new("same").unwrap();
    let c = CString::new("diff").unwrap();

    assert!(Boxed::new(&a).equals(&Boxed::new(&b)));
    assert!(!Boxed::new(&a).equals(&Boxed::new(&c)));
}

#[test]
fn terminated_sequences_starting_at_the_terminator_are_null() {
    bootstrap();
    let empty = CString::new("").unwrap();
    let b = Boxed::new(&empty);

    // Without a stored count there is nothing to distinguish "absent" from
    // "present but empty".
    assert_eq!(b.length(), 0);
    assert!(b.is_empty());
    assert!(b.is_null());
    assert!(!b.is_true());

    // Counted sequences keep the distinction.
    let s = Boxed::new("");
    assert!(s.is_empty());
    assert!(!s.is_null());
}

#[test]
fn c_strings_and_rust_strings_stay_distinct() {
    bootstrap();
    let c = CStr::from_bytes_with_nul(b"text\0").unwrap();
    let r = "text";
    assert_ne!(Boxed::new(c).type_key(), Boxed::new(r).type_key());
    assert!(!Boxed::new(c).equals(&Boxed::new(r)));
}

// =============================================================================
// Argument lists
// =============================================================================

#[test]
fn boxes_collect_heterogeneous_arguments() {
    bootstrap();
    let label = String::from("throughput");
    let series = [0.25f64, 0.5, 1.0];

    let mut args = Boxes::new();
    args.add(&label).add(&1024u64).add(series.as_slice());

    assert_eq!(args.len(), 3);
    assert_eq!(args[0].unbox::<&str>(), "throughput");
    assert_eq!(args[1].unbox::<u64>(), 1024);
    assert_eq!(args[2].as_slice::<f64>(), &[0.25, 0.5, 1.0]);

    let rendered: Vec<String> = args
        .iter()
        .map(|b| {
            if b.is_array_of::<u8>() {
                b.unbox::<&str>().to_string()
            } else if b.is_type::<u64>() {
                b.unbox::<u64>().to_string()
            } else {
                format!("{} values", b.length())
            }
        })
        .collect();
    assert_eq!(rendered, ["throughput", "1024", "3 values"]);
}
