//! Tests for HTTP request/response types.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse, PROVIDER_TIMEOUT};

fn example_url() -> url::Url {
    url::Url::parse("https://example.com/api").unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn get_creates_request_without_headers_or_timeout() {
        let req = HttpRequest::get(example_url());

        assert_eq!(req.method, http::Method::GET);
        assert_eq!(req.url, example_url());
        assert!(req.headers.is_empty());
        assert!(req.timeout.is_none());
    }

    #[test]
    fn with_timeout_sets_timeout() {
        let req = HttpRequest::get(example_url()).with_timeout(Duration::from_secs(3));

        assert_eq!(req.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn with_header_appends_multiple_values_for_same_name() {
        let req = HttpRequest::get(example_url())
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("text/html"),
            )
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            );

        assert_eq!(req.headers.get_all(http::header::ACCEPT).iter().count(), 2);
    }

    #[test]
    fn get_json_sets_accept_header_and_timeout() {
        let req = HttpRequest::get_json(example_url(), PROVIDER_TIMEOUT);

        assert_eq!(req.method, http::Method::GET);
        assert_eq!(
            req.headers.get(http::header::ACCEPT).unwrap(),
            "application/json"
        );
        assert_eq!(req.timeout, Some(Duration::from_secs(10)));
    }
}

mod http_response {
    use super::*;

    #[test]
    fn ok_builds_200_response() {
        let resp = HttpResponse::ok(b"{}".to_vec());

        assert_eq!(resp.status, http::StatusCode::OK);
        assert!(resp.headers.is_empty());
        assert_eq!(resp.body, b"{}".to_vec());
    }

    #[test]
    fn is_ok_only_for_200() {
        assert!(HttpResponse::ok("").is_ok());

        let statuses = [
            http::StatusCode::CREATED,
            http::StatusCode::NO_CONTENT,
            http::StatusCode::TOO_MANY_REQUESTS,
            http::StatusCode::INTERNAL_SERVER_ERROR,
        ];
        for status in statuses {
            let resp = HttpResponse::new(status, http::HeaderMap::new(), vec![]);
            assert!(!resp.is_ok(), "Expected {status} to not be ok");
        }
    }
}

mod http_error {
    use super::*;
    use std::error::Error;

    #[test]
    fn connection_error_preserves_source() {
        let source = std::io::Error::other("network unavailable");
        let error = HttpError::Connection(Box::new(source));

        assert!(error.to_string().contains("Connection error"));
        assert!(
            error
                .source()
                .unwrap()
                .to_string()
                .contains("network unavailable")
        );
    }

    #[test]
    fn timeout_displays_message() {
        let error = HttpError::Timeout;
        assert_eq!(error.to_string(), "Request timed out");
        assert!(error.source().is_none());
    }

    #[test]
    fn invalid_url_displays_message() {
        let error = HttpError::InvalidUrl("missing scheme".to_string());

        assert!(error.to_string().contains("Invalid URL"));
        assert!(error.to_string().contains("missing scheme"));
    }
}

mod http_client_trait {
    use super::*;

    struct FailingClient;

    impl HttpClient for FailingClient {
        async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
            Err(HttpError::Timeout)
        }
    }

    #[tokio::test]
    async fn failing_client_returns_timeout_error() {
        let result = FailingClient
            .request(HttpRequest::get(example_url()))
            .await;

        assert!(matches!(result, Err(HttpError::Timeout)));
    }
}
