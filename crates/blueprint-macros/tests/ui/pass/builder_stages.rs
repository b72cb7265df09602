use blueprint::Builder;

#[derive(Debug, Builder)]
struct Request {
    method: String,
    path: String,
    #[builder(default = 30)]
    timeout: u32,
    body: Option<Vec<u8>>,
}

fn main() {
    let request = RequestBuilder::with_method("GET".to_string())
        .with_path("/".to_string())
        .with_timeout(5)
        .build();

    assert_eq!(request.timeout, 5);
    assert!(request.body.is_none());
}
