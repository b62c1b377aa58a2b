//! Transport integration tests
//!
//! Requests go over the wire to a wiremock server so the applied options
//! are observed the way the remote service sees them.

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::*;
    use external_clients::{ClientRegistryBuilder, HttpTransport};
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer, base_path: &str) -> external_clients::ClientProvider {
        let base_address = format!("{}{}", server.uri(), base_path);
        assert_ok!(
            ClientRegistryBuilder::new()
                .add_http_client::<HttpTransport, _, _>(
                    "Svc",
                    move |opts| {
                        opts.base_address = base_address.clone();
                        opts.default_headers.insert("A".to_string(), "B".to_string());
                    },
                    Arc::new,
                )
                .build()
        )
    }

    /// Test that default headers reach the server exactly once
    #[tokio::test]
    async fn test_default_header_sent_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("A", "B"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server, "");
        let svc = assert_ok!(provider.get::<HttpTransport>());

        let response = assert_ok!(assert_ok!(svc.get("/ping")).send().await);
        assert_eq!(response.status().as_u16(), 200);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].headers.get_all("a").iter().count(), 1);
    }

    /// Test that relative paths are joined onto the base address
    #[tokio::test]
    async fn test_relative_path_uses_base_address() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server, "/api/");
        let svc = assert_ok!(provider.get::<HttpTransport>());

        let response = assert_ok!(assert_ok!(svc.get("users")).send().await);
        assert_eq!(assert_ok!(response.text().await), "[]");
    }

    /// Test that the configured timeout aborts slow responses
    #[tokio::test]
    async fn test_timeout_applies_to_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(1500)))
            .mount(&server)
            .await;

        let base_address = server.uri();
        let provider = assert_ok!(
            ClientRegistryBuilder::new()
                .add_external_client::<ActionTestClient, _>(move |opts| {
                    opts.base_address = base_address.clone();
                    opts.timeout = Duration::from_millis(100);
                })
                .build()
        );

        let client = assert_ok!(provider.get::<ActionTestClient>());
        let err = assert_ok!(client.http.get("/slow")).send().await.unwrap_err();
        assert!(err.is_timeout());
    }

    /// Test that the crate user agent is sent unless a default header replaces it
    #[tokio::test]
    async fn test_user_agent_can_be_overridden() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "billing/2.0"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let base_address = server.uri();
        let provider = assert_ok!(
            ClientRegistryBuilder::new()
                .add_external_client::<DiffClient1, _>(move |opts| {
                    opts.base_address = base_address.clone();
                    opts.default_headers
                        .insert("User-Agent".to_string(), "billing/2.0".to_string());
                })
                .build()
        );

        let client = assert_ok!(provider.get::<DiffClient1>());
        let response = assert_ok!(assert_ok!(client.http.get("/")).send().await);
        assert_eq!(response.status().as_u16(), 204);
    }

    /// Test that each resolution hands out an independent transport
    #[tokio::test]
    async fn test_each_resolution_builds_fresh_transport() {
        let server = MockServer::start().await;
        let provider = provider_for(&server, "");

        let first = assert_ok!(provider.create_transport("Svc"));
        let second = assert_ok!(provider.create_transport("Svc"));

        assert!(!Arc::ptr_eq(
            &assert_ok!(provider.get::<HttpTransport>()),
            &assert_ok!(provider.get::<HttpTransport>())
        ));
        assert_eq!(first.base_address(), second.base_address());
        assert_eq!(first.default_headers(), second.default_headers());
    }
}
