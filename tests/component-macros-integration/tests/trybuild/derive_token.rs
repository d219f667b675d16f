use component_macros::Token;
use infrastructure_common::Token as _;

pub trait Store: Send + Sync {}

#[derive(Token)]
#[token(service = dyn Store)]
struct IStore;

fn main() {
    assert!(IStore::key().name().ends_with("IStore"));
}
