use component_macros::injectable;
use di_abstractions::TokenRegistryExt;
use infrastructure_common::Token;

#[derive(Debug, Default)]
#[injectable]
struct Settings {
    verbose: bool,
}

fn main() {
    assert!(Settings::key().name().ends_with("Settings"));
    assert!(di_impl::global_registry().is_type_registered::<Settings>());
    assert!(!Settings::default().verbose);
}
