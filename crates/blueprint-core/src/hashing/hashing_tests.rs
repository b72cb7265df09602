#![allow(non_snake_case)]

use super::*;

#[test]
fn RepresentingHash___no_fields___returns_seed() {
    assert_eq!(RepresentingHash::new().finish(), HASH_SEED);
}

#[test]
fn RepresentingHash___equal_fields___hash_equal() {
    let first = RepresentingHash::new().field("Ada").field(&36).finish();
    let second = RepresentingHash::new().field("Ada").field(&36).finish();

    assert_eq!(first, second);
}

#[test]
fn RepresentingHash___field_order___changes_result() {
    let forward = RepresentingHash::new().field(&1).field(&2).finish();
    let backward = RepresentingHash::new().field(&2).field(&1).finish();

    assert_ne!(forward, backward);
}

#[test]
fn RepresentingHash___single_field___applies_prime() {
    let mut hasher = DefaultHasher::new();
    7u32.hash(&mut hasher);
    let expected = HASH_SEED
        .wrapping_mul(HASH_PRIME)
        .wrapping_add(hasher.finish());

    let actual = RepresentingHash::new().field(&7u32).finish();

    assert_eq!(actual, expected);
}

#[test]
fn RepresentingHash___default___equals_new() {
    assert_eq!(RepresentingHash::default(), RepresentingHash::new());
}
