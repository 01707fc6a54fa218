use anyhow::Result;
use regex::Regex;

/// Keyword list carried over from the default triage rules: country-code and
/// archive TLD fragments plus generic relay infrastructure terms.
pub const DEFAULT_RISK_KEYWORDS: [&str; 5] = [".ru", ".zip", "unknown", "smtp", "mail"];

/// Marks configured suspicious substrings in rendered report text for visual
/// emphasis. Matching is case-insensitive and literal; the matched text keeps
/// its original casing inside the marker.
pub struct RiskAnnotator {
    passes: Vec<Regex>,
}

impl RiskAnnotator {
    pub fn new(keywords: &[String]) -> Result<Self> {
        let mut passes = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            passes.push(Regex::new(&format!("(?i)({})", regex::escape(keyword)))?);
        }
        Ok(Self { passes })
    }

    /// Wrap every keyword occurrence in an emphasis marker.
    ///
    /// Passes run in configured order, each over the output of the previous
    /// one, so a later keyword can match text (including markup) introduced
    /// by an earlier pass.
    pub fn annotate(&self, text: &str) -> String {
        let mut out = text.to_string();
        for pass in &self.passes {
            out = pass
                .replace_all(&out, "<span class=\"risk\">$1</span>")
                .into_owned();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_annotator() -> RiskAnnotator {
        let keywords: Vec<String> = DEFAULT_RISK_KEYWORDS
            .iter()
            .map(|k| k.to_string())
            .collect();
        RiskAnnotator::new(&keywords).unwrap()
    }

    #[test]
    fn test_multiple_keywords_in_one_token() {
        let annotator = default_annotator();
        let out = annotator.annotate("smtp.example.ru");

        assert!(out.contains("<span class=\"risk\">smtp</span>"));
        assert!(out.contains("<span class=\"risk\">.ru</span>"));
    }

    #[test]
    fn test_original_casing_preserved() {
        let annotator = default_annotator();
        let out = annotator.annotate("SMTP relay at Mail.example.com");

        assert!(out.contains("<span class=\"risk\">SMTP</span>"));
        assert!(out.contains("<span class=\"risk\">Mail</span>"));
    }

    #[test]
    fn test_clean_text_unchanged() {
        let annotator = default_annotator();
        let clean = "Date: Mon, 1 Jan 2024\nSubject: greetings\n";
        assert_eq!(annotator.annotate(clean), clean);
    }

    #[test]
    fn test_empty_text_unchanged() {
        let annotator = default_annotator();
        assert_eq!(annotator.annotate(""), "");
    }

    #[test]
    fn test_idempotent_on_keyword_free_text() {
        let annotator = default_annotator();
        let once = annotator.annotate("nothing suspicious here");
        assert_eq!(annotator.annotate(&once), once);
    }

    #[test]
    fn test_later_pass_rewrites_earlier_markup() {
        // Pinning the compounding trade-off: the second keyword matches the
        // markup the first pass produced.
        let keywords = vec!["alert".to_string(), "span".to_string()];
        let annotator = RiskAnnotator::new(&keywords).unwrap();

        let out = annotator.annotate("alert");
        assert!(out.contains("<span class=\"risk\">span</span>"));
    }

    #[test]
    fn test_keywords_are_literal_not_regex() {
        let keywords = vec![".ru".to_string()];
        let annotator = RiskAnnotator::new(&keywords).unwrap();

        // The dot must not act as a wildcard.
        assert_eq!(annotator.annotate("guru"), "guru");
        assert!(annotator
            .annotate("mx.ru")
            .contains("<span class=\"risk\">.ru</span>"));
    }
}
