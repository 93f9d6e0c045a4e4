//! Tests for `ReqwestClient`.
//!
//! These cover construction and the failure mapping. Successful exchanges
//! are exercised through the lookup tests with in-memory clients.

use super::*;

mod reqwest_client {
    use super::*;

    #[test]
    fn default_creates_same_as_new() {
        let client1 = ReqwestClient::new();
        let client2 = ReqwestClient::default();

        let _ = format!("{client1:?}");
        let _ = format!("{client2:?}");
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }

    #[tokio::test]
    async fn request_to_invalid_host_returns_error_or_proxy_response() {
        let client = ReqwestClient::new();
        let url = url::Url::parse("http://invalid.invalid.invalid/").unwrap();
        let req = HttpRequest::get_json(url, PROVIDER_TIMEOUT);

        let result = client.request(req).await;

        // Behind a proxy the failure may surface as a gateway error response.
        match result {
            Err(HttpError::Connection(_) | HttpError::Timeout) => {}
            Ok(resp) if !resp.is_ok() => {}
            other => panic!("Expected connection error or proxy error response, got {other:?}"),
        }
    }
}
