use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LedError::invalid_argument("x")
            .to_string()
            .contains("invalid argument:")
    );
    assert!(
        LedError::endpoint_unavailable("x")
            .to_string()
            .contains("endpoint unavailable:")
    );
    assert!(
        LedError::not_supported("x")
            .to_string()
            .contains("not supported:")
    );
    assert_eq!(
        LedError::Delivery {
            failed: 1,
            total: 2
        }
        .to_string(),
        "delivery failed for 1 of 2 device(s)"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LedError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn endpoint_classification() {
    assert!(LedError::endpoint_unavailable("x").is_endpoint());
    assert!(LedError::Delivery { failed: 1, total: 1 }.is_endpoint());
    assert!(!LedError::invalid_argument("x").is_endpoint());
}
