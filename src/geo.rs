use crate::config::GeoConfig;
use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Sentinel label for any lookup that could not produce a real location.
pub const GEO_UNAVAILABLE: &str = "Geolocation unavailable";

/// Capability seam for IP geolocation.
///
/// Infallible by contract: implementations convert every transport, status,
/// or schema failure into a degraded label so a bad lookup can never abort
/// an analysis.
#[allow(async_fn_in_trait)]
pub trait GeoResolver {
    async fn resolve(&self, ip: &str) -> String;
}

/// Looks an IP up against an ipinfo.io-style JSON endpoint.
#[derive(Debug, Clone)]
pub struct IpinfoResolver {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    city: Option<String>,
    country: Option<String>,
    org: Option<String>,
}

impl GeoResponse {
    fn label(&self) -> String {
        format!(
            "{}, {} ({})",
            self.city.as_deref().unwrap_or("?"),
            self.country.as_deref().unwrap_or("?"),
            self.org.as_deref().unwrap_or("Unknown ISP")
        )
    }
}

impl IpinfoResolver {
    pub fn new(config: &GeoConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("header-forensics/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    async fn lookup(&self, ip: &str) -> Result<String> {
        let url = format!("{}/{}/json", self.endpoint, ip);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "geolocation service returned {}",
                response.status()
            ));
        }

        let body: GeoResponse = response.json().await?;
        Ok(body.label())
    }
}

impl GeoResolver for IpinfoResolver {
    async fn resolve(&self, ip: &str) -> String {
        match self.lookup(ip).await {
            Ok(label) => label,
            Err(e) => {
                log::debug!("Geolocation lookup failed for {ip}: {e}");
                GEO_UNAVAILABLE.to_string()
            }
        }
    }
}

/// Offline mode: answers the sentinel without touching the network.
#[derive(Debug, Clone, Default)]
pub struct DisabledResolver;

impl GeoResolver for DisabledResolver {
    async fn resolve(&self, _ip: &str) -> String {
        GEO_UNAVAILABLE.to_string()
    }
}
