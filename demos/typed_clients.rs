//! Typed External Clients Example
//!
//! Registers one client configured in code and one bound to a configuration
//! file, then prints the options each client was built with.
//!
//! Run with:
//! ```bash
//! cp config/clients.yaml.example config/clients.yaml
//! RUST_LOG=debug cargo run --example typed_clients
//! ```
//!
//! Environment variables override the file, for example
//! `EXTERNAL_CLIENTS__PAYMENTS__TIMEOUT=00:00:02`.

use anyhow::Context;
use external_clients::utils::logging::{LogFormat, init_logging};
use external_clients::{
    ClientRegistryBuilder, ConfigurationLoader, ExternalClient, HttpTransport,
};
use std::sync::Arc;
use std::time::Duration;

/// Client for a weather API, configured entirely in code
struct WeatherClient {
    http: HttpTransport,
}

impl ExternalClient for WeatherClient {
    const NAME: &'static str = "WeatherClient";

    fn from_transport(http: HttpTransport) -> Self {
        Self { http }
    }
}

/// Client for a payments API, configured from `config/clients.yaml`
struct PaymentsClient {
    http: HttpTransport,
}

impl PaymentsClient {
    fn charges_url(&self) -> anyhow::Result<String> {
        Ok(self.http.url("charges")?.to_string())
    }
}

fn main() -> anyhow::Result<()> {
    init_logging("info,external_clients=debug", LogFormat::Text)?;

    println!("🚀 Typed External Clients Example");
    println!("=================================\n");

    let configuration = Arc::new(
        ConfigurationLoader::new()
            .add_optional_file("config/clients.yaml")
            .with_env_prefix("EXTERNAL_CLIENTS")
            .build()
            .context("loading client configuration")?,
    );

    let provider = ClientRegistryBuilder::new()
        .add_external_client::<WeatherClient, _>(|opts| {
            opts.base_address = "https://api.weather.example.com/v2/".to_string();
            opts.timeout = Duration::from_secs(3);
            opts.default_headers
                .insert("Accept".to_string(), "application/json".to_string());
        })
        .add_http_client_from_config("Payments", configuration, |http| {
            Arc::new(PaymentsClient { http })
        })
        .configure("Payments", |opts| {
            opts.default_headers
                .insert("X-Caller".to_string(), "typed-clients-demo".to_string());
        })
        .build();

    let provider = match provider {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("❌ Client registry failed validation:");
            eprintln!("   {}", e);
            for name in e.failed_clients() {
                eprintln!("   - {}", name);
            }
            eprintln!("\nCopy config/clients.yaml.example to config/clients.yaml and retry.");
            return Ok(());
        }
    };

    println!("✅ Client registry built\n");

    let weather = provider.get::<WeatherClient>()?;
    println!("🌦️  {}", WeatherClient::NAME);
    println!("   Base address: {:?}", weather.http.base_address().map(|u| u.as_str()));
    println!("   Timeout:      {:?}", weather.http.timeout());
    println!("   Forecast URL: {}", weather.http.url("forecast")?);
    println!();

    let payments = provider.get::<PaymentsClient>()?;
    let options = provider.options("Payments")?;
    println!("💳 Payments");
    println!("   Options:     {}", options.to_json()?);
    println!("   Charges URL: {}", payments.charges_url()?);
    for (name, value) in payments.http.default_headers() {
        println!("   Header:      {}: {:?}", name, value);
    }

    Ok(())
}
