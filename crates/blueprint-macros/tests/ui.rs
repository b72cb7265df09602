//! Expansion checks compiled through trybuild.

#![allow(non_snake_case)]

#[test]
fn ui___pass___expansions_compile() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/pass/*.rs");
}
