use component_macros::injectable;
use di_abstractions::{providers, Resolver};
use infrastructure_common::token;

pub trait Greet: Send + Sync {
    fn greet(&self) -> &'static str;
}

token!(pub IGreeter => dyn Greet);

#[derive(Default)]
#[injectable(IGreeter)]
struct Greeter;

impl Greet for Greeter {
    fn greet(&self) -> &'static str {
        "hello"
    }
}

fn main() {
    let container = di_impl::Container::new();
    container.provide(providers![Greeter]).unwrap();
    assert_eq!(container.inject::<IGreeter>().unwrap().greet(), "hello");
}
