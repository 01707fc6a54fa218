use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Singleton headers pulled out of the raw block, in render order.
pub const SINGLETON_HEADERS: [&str; 5] = ["Date", "From", "To", "Subject", "Message-ID"];

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageFields {
    pub date: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub subject: Option<String>,
    pub message_id: Option<String>,
}

pub struct FieldExtractor {
    patterns: Vec<Regex>,
}

impl FieldExtractor {
    pub fn new() -> Result<Self> {
        // Pre-compile one anchored pattern per singleton header. Header names
        // match case-sensitively at line start; the value is everything after
        // the colon up to end-of-line.
        let mut patterns = Vec::with_capacity(SINGLETON_HEADERS.len());
        for name in SINGLETON_HEADERS {
            let pattern = format!(r"(?m)^{}:[ \t]*(.*)", regex::escape(name));
            patterns.push(Regex::new(&pattern)?);
        }
        Ok(Self { patterns })
    }

    /// Extract all singleton fields from a raw header block.
    ///
    /// If a header repeats, only the first occurrence is used. An absent
    /// header yields `None`; a present but empty header yields `Some("")`,
    /// which downstream rendering keeps distinct from absence.
    pub fn extract(&self, raw: &str) -> MessageFields {
        MessageFields {
            date: self.first_value(raw, 0),
            from: self.first_value(raw, 1),
            to: self.first_value(raw, 2),
            subject: self.first_value(raw, 3),
            message_id: self.first_value(raw, 4),
        }
    }

    fn first_value(&self, raw: &str, index: usize) -> Option<String> {
        self.patterns[index]
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim_end().to_string())
    }
}
