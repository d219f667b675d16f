//! trybuild compile-time tests for component_macros

#[test]
fn trybuild_injectable() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/injectable_self.rs");
    t.pass("tests/trybuild/injectable_token.rs");
    t.pass("tests/trybuild/derive_token.rs");
}
