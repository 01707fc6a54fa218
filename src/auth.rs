//! Authentication Result Parser
//!
//! Surfaces the SPF, DKIM, and DMARC verdicts that a receiving mail server
//! recorded in `Authentication-Results` headers. Verdicts are extracted only,
//! never computed.

use anyhow::Result;
use regex::Regex;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthVerdict {
    Pass,
    Fail,
    Neutral,
    SoftFail,
    None,
    NotFound,
    /// Token the receiving server recorded but we do not recognize
    /// (e.g. temperror, permerror), surfaced uppercased as-is.
    Other(String),
}

impl AuthVerdict {
    fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "pass" => AuthVerdict::Pass,
            "fail" => AuthVerdict::Fail,
            "neutral" => AuthVerdict::Neutral,
            "softfail" => AuthVerdict::SoftFail,
            "none" => AuthVerdict::None,
            _ => AuthVerdict::Other(token.to_ascii_uppercase()),
        }
    }
}

impl fmt::Display for AuthVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthVerdict::Pass => write!(f, "PASS"),
            AuthVerdict::Fail => write!(f, "FAIL"),
            AuthVerdict::Neutral => write!(f, "NEUTRAL"),
            AuthVerdict::SoftFail => write!(f, "SOFTFAIL"),
            AuthVerdict::None => write!(f, "NONE"),
            // The token pattern captures \w+ only, so a parsed value can
            // never collide with this two-word sentinel.
            AuthVerdict::NotFound => write!(f, "Not found"),
            AuthVerdict::Other(raw) => write!(f, "{raw}"),
        }
    }
}

impl Serialize for AuthVerdict {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthResults {
    pub spf: AuthVerdict,
    pub dkim: AuthVerdict,
    pub dmarc: AuthVerdict,
}

pub struct AuthExtractor {
    spf: Regex,
    dkim: Regex,
    dmarc: Regex,
}

impl AuthExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            spf: Self::mechanism_pattern("spf")?,
            dkim: Self::mechanism_pattern("dkim")?,
            dmarc: Self::mechanism_pattern("dmarc")?,
        })
    }

    fn mechanism_pattern(mechanism: &str) -> Result<Regex> {
        // Each mechanism is matched independently anywhere after the header
        // name on the line, so the three may appear in any order or not at
        // all.
        Ok(Regex::new(&format!(
            r"(?m)^Authentication-Results:.*\b{mechanism}=(\w+)"
        ))?)
    }

    /// Extract the SPF/DKIM/DMARC verdicts from a raw header block.
    ///
    /// Missing mechanisms yield [`AuthVerdict::NotFound`]; recognized tokens
    /// are case-normalized, unrecognized tokens surface uppercased.
    pub fn extract(&self, raw: &str) -> AuthResults {
        AuthResults {
            spf: self.verdict(&self.spf, raw),
            dkim: self.verdict(&self.dkim, raw),
            dmarc: self.verdict(&self.dmarc, raw),
        }
    }

    fn verdict(&self, pattern: &Regex, raw: &str) -> AuthVerdict {
        pattern
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .map(|m| AuthVerdict::from_token(m.as_str()))
            .unwrap_or(AuthVerdict::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_header() {
        let extractor = AuthExtractor::new().unwrap();
        let raw = "Authentication-Results: mx.example.com; spf=pass; dkim=fail; dmarc=none\n";

        let results = extractor.extract(raw);
        assert_eq!(results.spf, AuthVerdict::Pass);
        assert_eq!(results.dkim, AuthVerdict::Fail);
        assert_eq!(results.dmarc, AuthVerdict::None);
    }

    #[test]
    fn test_missing_header() {
        let extractor = AuthExtractor::new().unwrap();
        let results = extractor.extract("From: a@b.com\n");

        assert_eq!(results.spf, AuthVerdict::NotFound);
        assert_eq!(results.dkim, AuthVerdict::NotFound);
        assert_eq!(results.dmarc, AuthVerdict::NotFound);
        assert_eq!(results.spf.to_string(), "Not found");
    }

    #[test]
    fn test_token_order_does_not_matter() {
        let extractor = AuthExtractor::new().unwrap();
        let raw = "Authentication-Results: mx.example.com; dmarc=pass; spf=softfail\n";

        let results = extractor.extract(raw);
        assert_eq!(results.spf, AuthVerdict::SoftFail);
        assert_eq!(results.dkim, AuthVerdict::NotFound);
        assert_eq!(results.dmarc, AuthVerdict::Pass);
    }

    #[test]
    fn test_tokens_are_case_normalized() {
        let extractor = AuthExtractor::new().unwrap();
        let raw = "Authentication-Results: mx.example.com; spf=Pass; dkim=NEUTRAL\n";

        let results = extractor.extract(raw);
        assert_eq!(results.spf, AuthVerdict::Pass);
        assert_eq!(results.dkim, AuthVerdict::Neutral);
    }

    #[test]
    fn test_unrecognized_token_surfaces_uppercased() {
        let extractor = AuthExtractor::new().unwrap();
        let raw = "Authentication-Results: mx.example.com; dkim=temperror\n";

        let results = extractor.extract(raw);
        assert_eq!(results.dkim, AuthVerdict::Other("TEMPERROR".to_string()));
        assert_eq!(results.dkim.to_string(), "TEMPERROR");
    }

    #[test]
    fn test_verdicts_spread_across_headers() {
        let extractor = AuthExtractor::new().unwrap();
        let raw = "Authentication-Results: mx1.example.com; spf=pass\n\
                   Authentication-Results: mx2.example.com; dmarc=fail\n";

        let results = extractor.extract(raw);
        assert_eq!(results.spf, AuthVerdict::Pass);
        assert_eq!(results.dmarc, AuthVerdict::Fail);
    }

    #[test]
    fn test_serializes_as_display_string() {
        let verdict = AuthVerdict::SoftFail;
        assert_eq!(serde_json::to_string(&verdict).unwrap(), "\"SOFTFAIL\"");

        let missing = AuthVerdict::NotFound;
        assert_eq!(serde_json::to_string(&missing).unwrap(), "\"Not found\"");
    }
}
