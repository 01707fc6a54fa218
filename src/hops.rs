use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One relay step in the delivery path, derived from one `Received` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hop {
    pub raw_line: String,
    pub source_ip: Option<String>,
    pub geo_label: Option<String>,
}

pub struct HopExtractor {
    received: Regex,
    ipv4: Regex,
}

impl HopExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            received: Regex::new(r"(?m)^Received:[ \t]*(.*)")?,
            // Four dot-separated groups of 1-3 digits. Octets are not range
            // checked; obfuscated addresses like 999.999.999.999 still match.
            ipv4: Regex::new(r"(\d{1,3}(?:\.\d{1,3}){3})")?,
        })
    }

    /// Extract every `Received` occurrence in document order.
    ///
    /// Hops are never deduplicated or re-sorted; top of the header block is
    /// the most recent relay. Each hop carries the first IPv4-looking
    /// substring on its line, if any. `geo_label` is left unset here and
    /// filled in by the orchestrator.
    pub fn extract(&self, raw: &str) -> Vec<Hop> {
        self.received
            .captures_iter(raw)
            .filter_map(|caps| caps.get(1))
            .map(|m| {
                let line = m.as_str().trim_end().to_string();
                let source_ip = self.find_ipv4(&line);
                Hop {
                    raw_line: line,
                    source_ip,
                    geo_label: None,
                }
            })
            .collect()
    }

    pub fn find_ipv4(&self, line: &str) -> Option<String> {
        self.ipv4
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}
