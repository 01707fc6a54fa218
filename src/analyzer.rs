//! Analysis Orchestrator
//!
//! Composes the field, hop, and authentication extractors into one structured
//! result and renders it as an annotated report. This is the engine's public
//! entry point; the presentation shell owns all I/O around it.

use crate::auth::{AuthExtractor, AuthResults};
use crate::config::Config;
use crate::extractor::{FieldExtractor, MessageFields};
use crate::geo::GeoResolver;
use crate::hops::{Hop, HopExtractor};
use crate::risk::RiskAnnotator;
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub fields: MessageFields,
    pub hops: Vec<Hop>,
    pub auth: AuthResults,
}

pub struct AnalysisEngine<R> {
    fields: FieldExtractor,
    hops: HopExtractor,
    auth: AuthExtractor,
    annotator: RiskAnnotator,
    resolver: R,
}

impl<R: GeoResolver> AnalysisEngine<R> {
    pub fn new(config: &Config, resolver: R) -> Result<Self> {
        Ok(Self {
            fields: FieldExtractor::new()?,
            hops: HopExtractor::new()?,
            auth: AuthExtractor::new()?,
            annotator: RiskAnnotator::new(&config.risk_keywords)?,
            resolver,
        })
    }

    /// Analyze a raw header block into a structured result.
    ///
    /// Geolocation is resolved per IP-bearing hop; hop order in the result is
    /// document order regardless of lookup behavior. Empty input is a valid
    /// zero-result analysis, not an error.
    pub async fn analyze(&self, raw: &str) -> AnalysisResult {
        let fields = self.fields.extract(raw);
        let auth = self.auth.extract(raw);

        let mut hops = self.hops.extract(raw);
        log::debug!("Extracted {} hop(s)", hops.len());
        for hop in &mut hops {
            if let Some(ip) = &hop.source_ip {
                hop.geo_label = Some(self.resolver.resolve(ip).await);
            }
        }

        AnalysisResult { fields, hops, auth }
    }

    /// Render a result as report text with risk annotations applied.
    ///
    /// The annotation pass runs over the fully rendered block, so keywords can
    /// match across field values, hop lines, and labels alike. Emphasis markup
    /// is the only HTML in the output; escaping is the caller's concern.
    pub fn render(&self, result: &AnalysisResult) -> String {
        let mut out = String::new();

        out.push_str(&format!("Date: {}\n", field_or_none(&result.fields.date)));
        out.push_str(&format!("From: {}\n", field_or_none(&result.fields.from)));
        out.push_str(&format!("To: {}\n", field_or_none(&result.fields.to)));
        out.push_str(&format!(
            "Subject: {}\n",
            field_or_none(&result.fields.subject)
        ));
        out.push_str(&format!(
            "Message-ID: {}\n",
            field_or_none(&result.fields.message_id)
        ));

        out.push_str("Received:\n");
        for hop in &result.hops {
            match &hop.geo_label {
                Some(label) => out.push_str(&format!("{} → 🌍 {}\n", hop.raw_line, label)),
                None => out.push_str(&format!("{}\n", hop.raw_line)),
            }
        }

        out.push_str(&format!("SPF: {}\n", result.auth.spf));
        out.push_str(&format!("DKIM: {}\n", result.auth.dkim));
        out.push_str(&format!("DMARC: {}\n", result.auth.dmarc));

        self.annotator.annotate(&out)
    }
}

/// Absent fields render as a literal `None` marker, distinct from a header
/// that was present with an empty value.
fn field_or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}
