use blueprint::{Validate, Validated};
use std::sync::Arc;

#[derive(Debug, Validate)]
struct Shared {
    #[validate(check = **value > 0)]
    count: Box<i32>,
    #[validate(check = !value.is_empty())]
    label: Arc<String>,
}

fn main() {
    let shared = Shared {
        count: Box::new(3),
        label: Arc::new("cache".to_string()),
    };
    assert!(shared.validate().is_ok());

    let empty = Shared {
        count: Box::new(0),
        label: Arc::new(String::new()),
    };
    assert!(empty.validate().is_err());
}
