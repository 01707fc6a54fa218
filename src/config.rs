use crate::risk::DEFAULT_RISK_KEYWORDS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Suspicious substrings, applied in order to the rendered report.
    #[serde(default = "default_risk_keywords")]
    pub risk_keywords: Vec<String>,
    #[serde(default)]
    pub geolocation: GeoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoConfig {
    #[serde(default = "default_geo_endpoint")]
    pub endpoint: String,
    /// Per-lookup timeout; one slow hop must not stall the whole report.
    #[serde(default = "default_geo_timeout")]
    pub timeout_seconds: u64,
}

fn default_risk_keywords() -> Vec<String> {
    DEFAULT_RISK_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_geo_endpoint() -> String {
    "https://ipinfo.io".to_string()
}

fn default_geo_timeout() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Config {
            risk_keywords: default_risk_keywords(),
            geolocation: GeoConfig::default(),
        }
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        GeoConfig {
            endpoint: default_geo_endpoint(),
            timeout_seconds: default_geo_timeout(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
