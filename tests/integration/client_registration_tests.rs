//! Client registration integration tests
//!
//! Covers both registration styles, composition of repeated registrations,
//! independence of distinct clients and fan-out under one capability.

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::*;
    use external_clients::{
        ClientError, ClientRegistryBuilder, HttpTransport, ValidationMode,
        config::validation::fields,
    };
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    /// Test that an action-based registration configures the transport
    #[test]
    fn test_action_configuration_configures_transport() {
        let provider = assert_ok!(
            ClientRegistryBuilder::new()
                .add_external_client::<ActionTestClient, _>(|opts| {
                    opts.base_address = "http://example.com".to_string();
                    opts.timeout = Duration::from_secs(5);
                    opts.default_headers =
                        HashMap::from([("Test-Header".to_string(), "Value".to_string())]);
                })
                .build()
        );

        let client = assert_ok!(provider.get::<ActionTestClient>());
        assert_eq!(
            client.http.base_address().map(|u| u.as_str()),
            Some("http://example.com/")
        );
        assert_eq!(client.http.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(client.http.default_headers()["Test-Header"], "Value");
    }

    /// Test that a second registration only overrides the fields it writes
    #[test]
    fn test_multiple_registrations_last_configuration_overrides() {
        let provider = assert_ok!(
            ClientRegistryBuilder::new()
                .add_external_client::<MultiRegistrationClient, _>(|opts| {
                    opts.base_address = "http://first.com".to_string();
                    opts.timeout = Duration::from_secs(5);
                    opts.default_headers =
                        HashMap::from([("X-First".to_string(), "Value1".to_string())]);
                })
                .add_external_client::<MultiRegistrationClient, _>(|opts| {
                    opts.timeout = Duration::from_secs(7);
                    opts.default_headers =
                        HashMap::from([("X-Second".to_string(), "Value2".to_string())]);
                })
                .build()
        );

        let client = assert_ok!(provider.get::<MultiRegistrationClient>());
        assert_eq!(
            client.http.base_address().map(|u| u.as_str()),
            Some("http://first.com/")
        );
        assert_eq!(client.http.timeout(), Some(Duration::from_secs(7)));
        assert!(!client.http.default_headers().contains_key("X-First"));
        assert!(client.http.default_headers().contains_key("X-Second"));
        assert_eq!(
            provider.client_names::<MultiRegistrationClient>(),
            vec!["MultiRegistrationClient"]
        );
    }

    /// Test that distinct clients keep independent configurations
    #[test]
    fn test_different_clients_have_independent_configurations() {
        let provider = assert_ok!(
            ClientRegistryBuilder::new()
                .add_external_client::<DiffClient1, _>(|opts| {
                    opts.base_address = "http://client1.com".to_string();
                    opts.timeout = Duration::from_secs(5);
                })
                .add_external_client::<DiffClient2, _>(|opts| {
                    opts.base_address = "http://client2.com".to_string();
                    opts.timeout = Duration::from_secs(8);
                })
                .build()
        );

        let client1 = assert_ok!(provider.get::<DiffClient1>());
        let client2 = assert_ok!(provider.get::<DiffClient2>());

        assert_eq!(client1.http.base_address().unwrap().host_str(), Some("client1.com"));
        assert_eq!(client1.http.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(client2.http.base_address().unwrap().host_str(), Some("client2.com"));
        assert_eq!(client2.http.timeout(), Some(Duration::from_secs(8)));

        let options1 = assert_ok!(provider.options("DiffClient1"));
        let options2 = assert_ok!(provider.options("DiffClient2"));
        assert_ne!(options1, options2);
    }

    /// Test that every implementation of a shared capability resolves
    #[test]
    fn test_same_interface_different_implementations_resolves_all_clients() {
        let provider = assert_ok!(
            ClientRegistryBuilder::new()
                .add_http_client::<dyn CommonClient, _, _>(
                    "CommonClientA",
                    |opts| {
                        opts.base_address = "http://clientA.com".to_string();
                        opts.timeout = Duration::from_secs(5);
                    },
                    |http| Arc::new(CommonClientA(http)),
                )
                .add_http_client::<dyn CommonClient, _, _>(
                    "CommonClientB",
                    |opts| {
                        opts.base_address = "http://clientB.com".to_string();
                        opts.timeout = Duration::from_secs(8);
                    },
                    |http| Arc::new(CommonClientB(http)),
                )
                .build()
        );

        let clients = assert_ok!(provider.get_all::<dyn CommonClient>());
        assert_eq!(clients.len(), 2);

        let client_a = clients.iter().find(|c| c.kind() == "A").unwrap();
        let client_b = clients.iter().find(|c| c.kind() == "B").unwrap();

        assert_eq!(client_a.http().base_address().unwrap().host_str(), Some("clienta.com"));
        assert_eq!(client_a.http().timeout(), Some(Duration::from_secs(5)));
        assert_eq!(client_b.http().base_address().unwrap().host_str(), Some("clientb.com"));
        assert_eq!(client_b.http().timeout(), Some(Duration::from_secs(8)));
    }

    /// Test the end-to-end named client scenario
    #[test]
    fn test_named_client_end_to_end() {
        let provider = assert_ok!(
            ClientRegistryBuilder::new()
                .add_http_client::<HttpTransport, _, _>(
                    "Svc",
                    |opts| {
                        opts.base_address = "http://x.test".to_string();
                        opts.timeout = Duration::from_secs(5);
                        opts.default_headers = HashMap::from([("A".to_string(), "B".to_string())]);
                    },
                    Arc::new,
                )
                .build()
        );

        let transport = assert_ok!(provider.get_named::<HttpTransport>("Svc"));
        assert_eq!(transport.base_address().unwrap().as_str(), "http://x.test/");
        assert_eq!(transport.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(transport.default_headers().get_all("A").iter().count(), 1);
        assert_eq!(transport.default_headers()["A"], "B");
    }

    /// Test that startup validation names every misconfigured client
    #[test]
    fn test_startup_validation_lists_every_invalid_client() {
        let result = ClientRegistryBuilder::new()
            .add_external_client::<DiffClient1, _>(|opts| {
                opts.base_address = "invalid-url".to_string();
            })
            .add_external_client::<DiffClient2, _>(|opts| {
                opts.base_address = "http://client2.com".to_string();
                opts.timeout = Duration::from_millis(50);
            })
            .add_external_client::<ActionTestClient, _>(|opts| {
                opts.base_address = "http://fine.com".to_string();
            })
            .build();

        let err = result.unwrap_err();
        assert!(matches!(err, ClientError::Startup(_)));
        assert_eq!(err.failed_clients(), vec!["DiffClient1", "DiffClient2"]);

        let message = err.to_string();
        assert!(message.contains("base_address"));
        assert!(message.contains("timeout"));
    }

    /// Test that first-use validation reports only to the requesting caller
    #[test]
    fn test_first_use_validation_reports_to_caller() {
        let provider = assert_ok!(
            ClientRegistryBuilder::new()
                .validation_mode(ValidationMode::OnFirstUse)
                .add_external_client::<DiffClient1, _>(|opts| {
                    opts.base_address = "invalid-url".to_string();
                })
                .add_external_client::<DiffClient2, _>(|opts| {
                    opts.base_address = "http://client2.com".to_string();
                })
                .build()
        );

        assert!(provider.get::<DiffClient2>().is_ok());

        let err = provider.get::<DiffClient1>().err().unwrap();
        let validation = err.as_validation().unwrap();
        assert_eq!(validation.client(), Some("DiffClient1"));
        assert_eq!(validation.fields(), vec![fields::BASE_ADDRESS]);
    }

    /// Test that concurrent consumers share one provider
    #[test]
    fn test_concurrent_resolution() {
        let provider = Arc::new(assert_ok!(
            ClientRegistryBuilder::new()
                .add_external_client::<DiffClient1, _>(|opts| {
                    opts.base_address = "http://client1.com".to_string();
                })
                .build()
        ));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let provider = Arc::clone(&provider);
                std::thread::spawn(move || provider.get::<DiffClient1>().map(|c| c.http.timeout()))
            })
            .collect();

        for handle in handles {
            let timeout = handle.join().unwrap().unwrap();
            assert_eq!(timeout, Some(Duration::from_secs(10)));
        }
    }
}
