use component_macros::service;

#[service]
#[derive(Debug, Default)]
pub struct Holder {
    #[autowired]
    name: String,
}

fn main() {}
