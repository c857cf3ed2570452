//! Dispatch resolution: specific entries, defaults and neutral results.

use pretty_assertions::assert_eq;

use valbox_core::functions::{Function, register, register_default};
use valbox_core::types::bootstrap;
use valbox_core::values::{Boxed, Boxes};
use valbox_core::{Equals, IsLess};

/// Renders a box for human eyes; used by the message-assembly layers.
struct Describe;

impl Function for Describe {
    type Invoker = fn(&Boxed<'_>) -> String;
    type Output = String;

    fn name() -> &'static str {
        "Describe"
    }
}

/// A kind no test ever registers, anywhere.
struct Unregistered;

impl Function for Unregistered {
    type Invoker = fn(&Boxed<'_>) -> u64;
    type Output = u64;

    fn name() -> &'static str {
        "Unregistered"
    }
}

fn describe_bool(b: &Boxed<'_>) -> String {
    if b.is_true() { "yes" } else { "no" }.to_string()
}

fn describe_fallback(b: &Boxed<'_>) -> String {
    format!("[{}]", b.type_name())
}

// =============================================================================
// Resolution order
// =============================================================================

#[test]
fn default_answers_without_counting_as_present() {
    bootstrap();
    register_default::<Describe>(describe_fallback).unwrap();
    register::<Describe, bool>(describe_bool).unwrap();

    let flag = Boxed::new(&true);
    let num = Boxed::new(&5i64);

    // Specific entry: present and preferred.
    assert!(flag.has_function::<Describe>());
    assert_eq!(flag.invoke::<Describe>(|f| f(&flag)), "yes");

    // Default answers, but the type has no entry of its own.
    assert!(!num.has_function::<Describe>());
    assert_eq!(num.invoke::<Describe>(|f| f(&num)), "[SignedInt]");
}

#[test]
fn unregistered_kinds_yield_neutral_results() {
    bootstrap();
    let b = Boxed::new(&1i64);
    assert!(!b.has_function::<Unregistered>());
    assert_eq!(b.function::<Unregistered>(), None);
    assert_eq!(b.invoke::<Unregistered>(|f| f(&b)), 0);
}

fn describe_char(b: &Boxed<'_>) -> String {
    format!("char {}", b.as_character())
}

fn describe_glyph(b: &Boxed<'_>) -> String {
    format!("glyph {}", b.as_character())
}

#[test]
fn replacing_a_specific_entry_wins() {
    bootstrap();
    register::<Describe, char>(describe_char).unwrap();
    register::<Describe, char>(describe_glyph).unwrap();

    let c = Boxed::new(&'Q');
    assert_eq!(c.invoke::<Describe>(|f| f(&c)), "glyph Q");
}

// =============================================================================
// Built-in predicate behavior
// =============================================================================

#[test]
fn truth_and_emptiness_follow_payloads() {
    bootstrap();

    assert!(Boxed::new(&1i64).is_true());
    assert!(!Boxed::new(&0i64).is_true());
    assert!(Boxed::new(&true).is_true());
    assert!(!Boxed::new(&false).is_true());

    assert!(Boxed::new("text").is_true());
    assert!(!Boxed::new("").is_true());
    assert!(Boxed::new("").is_empty());
    assert!(!Boxed::new("x").is_empty());

    // Scalars are never empty.
    assert!(!Boxed::new(&0i64).is_empty());
}

#[test]
fn ordering_coerces_across_numeric_families() {
    bootstrap();

    let small_signed = Boxed::new(&-5i64);
    let unsigned = Boxed::new(&3u64);
    let float = Boxed::new(&3.5f64);

    assert!(small_signed.is_less(&unsigned));
    assert!(!unsigned.is_less(&small_signed));
    assert!(unsigned.is_less(&float));
    assert!(float.is_less(&Boxed::new(&4i64)));
}

#[test]
fn strings_order_lexicographically() {
    bootstrap();
    let apple = Boxed::new("apple");
    let banana = Boxed::new("banana");
    assert!(apple.is_less(&banana));
    assert!(!banana.is_less(&apple));
    assert!(apple.has_function::<IsLess>());
}

#[test]
fn cross_type_order_is_stable() {
    bootstrap();
    let values: Boxes = [
        Boxed::new(&true),
        Boxed::new(&'z'),
        Boxed::new("mid"),
        Boxed::new(&12u64),
    ]
    .into_iter()
    .collect();

    let mut sorted: Vec<Boxed> = values.iter().copied().collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mut again: Vec<Boxed> = values.iter().copied().collect();
    again.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let names: Vec<&str> = sorted.iter().map(|b| b.type_name()).collect();
    let names_again: Vec<&str> = again.iter().map(|b| b.type_name()).collect();
    assert_eq!(names, names_again);
}

// =============================================================================
// Operator bridging
// =============================================================================

#[test]
fn std_operators_delegate_to_the_functions() {
    bootstrap();
    let a = Boxed::new(&10i8);
    let b = Boxed::new(&10i64);
    let c = Boxed::new(&11i64);

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a < c);
    assert!(c > a);
}

#[test]
fn equal_boxes_hash_alike() {
    bootstrap();
    let a = Boxed::new(&123i16);
    let b = Boxed::new(&123i64);
    assert_eq!(a, b);
    assert_eq!(a.hash_code(), b.hash_code());

    let owned = String::from("hash me");
    let text_a = Boxed::new("hash me");
    let text_b = Boxed::new(&owned);
    assert_eq!(text_a, text_b);
    assert_eq!(text_a.hash_code(), text_b.hash_code());
}

#[test]
fn equality_ignores_where_equal_bytes_live() {
    bootstrap();
    let owned = String::from("shared");
    let a = Boxed::new(owned.as_str());
    let b = Boxed::new("shared");
    assert!(a.equals(&b));
    assert_eq!(Equals::name(), "Equals");
}
