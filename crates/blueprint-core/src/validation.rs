//! Helpers backing generated contract conditions
//!
//! Generated guards bind the checked element to `value` and call into this
//! module, so every helper takes its subject by reference and returns `bool`.

use once_cell::sync::OnceCell;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::ops::Rem;

// ============================================================================
// Size
// ============================================================================

/// Anything with a number of elements that size contracts can inspect.
///
/// Strings count characters, not bytes.
pub trait Countable {
    fn count(&self) -> usize;
}

impl Countable for str {
    fn count(&self) -> usize {
        self.chars().count()
    }
}

impl Countable for String {
    fn count(&self) -> usize {
        self.as_str().count()
    }
}

impl<T> Countable for [T] {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> Countable for [T; N] {
    fn count(&self) -> usize {
        N
    }
}

impl<T> Countable for Vec<T> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<T> Countable for VecDeque<T> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<T> Countable for LinkedList<T> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> Countable for HashMap<K, V, S> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<T, S> Countable for HashSet<T, S> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<K, V> Countable for BTreeMap<K, V> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<T> Countable for BTreeSet<T> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<T: Countable + ?Sized> Countable for &T {
    fn count(&self) -> usize {
        (**self).count()
    }
}

impl<T: Countable + ?Sized> Countable for Box<T> {
    fn count(&self) -> usize {
        (**self).count()
    }
}

// ============================================================================
// Numericals
// ============================================================================

/// Numbers that sign contracts can compare with zero.
pub trait Numerical: PartialOrd + Copy {
    fn zero() -> Self;
}

/// Whole numbers that parity contracts can divide.
pub trait Integral: Numerical + Rem<Output = Self> {
    fn two() -> Self;
}

macro_rules! impl_numerical {
    (integral: $($ty:ty),*) => {
        $(
            impl Numerical for $ty {
                fn zero() -> Self {
                    0
                }
            }

            impl Integral for $ty {
                fn two() -> Self {
                    2
                }
            }
        )*
    };
    (decimal: $($ty:ty),*) => {
        $(
            impl Numerical for $ty {
                fn zero() -> Self {
                    0.0
                }
            }
        )*
    };
}

impl_numerical!(integral: i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_numerical!(decimal: f32, f64);

pub fn is_positive<T: Numerical>(value: &T) -> bool {
    *value > T::zero()
}

pub fn is_non_negative<T: Numerical>(value: &T) -> bool {
    *value >= T::zero()
}

pub fn is_negative<T: Numerical>(value: &T) -> bool {
    *value < T::zero()
}

pub fn is_non_positive<T: Numerical>(value: &T) -> bool {
    *value <= T::zero()
}

pub fn is_even<T: Integral>(value: &T) -> bool {
    *value % T::two() == T::zero()
}

pub fn is_uneven<T: Integral>(value: &T) -> bool {
    !is_even(value)
}

/// A zero divisor is never satisfied.
pub fn is_multiple_of<T: Integral>(value: &T, divisor: T) -> bool {
    divisor != T::zero() && *value % divisor == T::zero()
}

// ============================================================================
// Elements
// ============================================================================

/// Whether the elements are ordered.
///
/// `strictly` forbids equal neighbours, `ascending` selects the direction.
/// Incomparable neighbours (such as NaN) count as unordered.
pub fn is_ordered<I>(items: I, strictly: bool, ascending: bool) -> bool
where
    I: IntoIterator,
    I::Item: PartialOrd,
{
    let mut iter = items.into_iter();
    let Some(mut last) = iter.next() else {
        return true;
    };
    for item in iter {
        let ordered = match item.partial_cmp(&last) {
            Some(Ordering::Greater) => ascending,
            Some(Ordering::Less) => !ascending,
            Some(Ordering::Equal) => !strictly,
            None => false,
        };
        if !ordered {
            return false;
        }
        last = item;
    }
    true
}

/// [`is_ordered`] over the present elements only; `None` is skipped.
pub fn is_ordered_present<'a, I, T>(items: I, strictly: bool, ascending: bool) -> bool
where
    I: IntoIterator<Item = &'a Option<T>>,
    T: PartialOrd + 'a,
{
    is_ordered(items.into_iter().flatten(), strictly, ascending)
}

/// Whether no two elements are equal.
pub fn has_unique_elements<I>(items: I) -> bool
where
    I: IntoIterator,
    I::Item: PartialEq,
{
    let items: Vec<I::Item> = items.into_iter().collect();
    items
        .iter()
        .enumerate()
        .all(|(index, item)| !items[index + 1..].contains(item))
}

/// Whether every element is `Some`.
pub fn has_no_empty_elements<'a, I, T>(items: I) -> bool
where
    I: IntoIterator<Item = &'a Option<T>>,
    T: 'a,
{
    items.into_iter().all(Option::is_some)
}

// ============================================================================
// Text
// ============================================================================

const RESERVED_WORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while",
];

/// Whether the text is a valid, non-reserved Rust identifier.
pub fn is_code_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_') {
        return false;
    }
    if text == "_" || RESERVED_WORDS.contains(&text) {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// A regular expression compiled on first use.
///
/// The whole text has to match. The generator rejects invalid expressions
/// at expansion time; should one slip through, nothing matches it.
pub struct Pattern {
    source: &'static str,
    compiled: OnceCell<Option<Regex>>,
}

impl Pattern {
    pub const fn new(source: &'static str) -> Self {
        Self {
            source,
            compiled: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.compiled
            .get_or_init(|| Regex::new(&format!("^(?:{})$", self.source)).ok())
            .as_ref()
            .is_some_and(|regex| regex.is_match(text))
    }
}
