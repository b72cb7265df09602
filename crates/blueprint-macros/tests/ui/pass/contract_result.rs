use blueprint::{Builder, ContractViolation, Validate, Validated};

#[derive(Debug, Builder, Validate)]
struct Port {
    #[validate(greater_than = 0, less_than = 65536)]
    number: u32,
}

fn main() {
    let port: Result<Port, ContractViolation> = PortBuilder::with_number(8080).build();
    let port = port.unwrap();

    assert!(port.validate().is_ok());
}
