//! Tests for the provider fallback combinator.

use std::cell::RefCell;

use super::{ProviderError, first_success};

#[tokio::test]
async fn returns_first_success_and_stops() {
    let attempted = RefCell::new(Vec::new());

    let result = first_success(["a", "b", "c"], |provider| {
        attempted.borrow_mut().push(provider);
        let outcome = if provider == "a" {
            Err(ProviderError::MissingAddress)
        } else {
            Ok(provider.to_uppercase())
        };
        async move { outcome }
    })
    .await;

    assert_eq!(result.as_deref(), Some("B"));
    assert_eq!(*attempted.borrow(), vec!["a", "b"]);
}

#[tokio::test]
async fn returns_none_when_all_fail() {
    let result: Option<String> = first_success(["a", "b"], |_| async {
        Err(ProviderError::MissingAddress)
    })
    .await;

    assert!(result.is_none());
}

#[tokio::test]
async fn empty_provider_list_yields_none() {
    let result: Option<String> =
        first_success(std::iter::empty::<&str>(), |_| async { Ok("x".to_string()) }).await;

    assert!(result.is_none());
}
