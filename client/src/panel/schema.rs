//! Web search schema handling
//!
//! The web-search agent accepts a free-form "schema" describing how results
//! should be structured. It comes either from the schema editor (first
//! query) or from a `[SCHEMA] {...}` marker inside a follow-up message.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sent on the first query when the user left the schema empty
pub const NO_SCHEMA_HINT: &str = "No schema provided, look for the required information";

/// Template offered by the "Suggest schema" helper
pub const SUGGESTED_SCHEMA: &str = "\
### Company_name: company name,
### Description: brief description of the company.
### History: Most important milestones, acquisitions, results from last years.
### Business: Understand what it does, possible entry barriers or competitive advantages. Who are its suppliers and customers.
### Market: Who it competes with and what are its market shares.
### People: Board of directors, management, and shareholders, who are they? How much does the management team earn and what are their incentives based on.
### Capital_allocation: Analysis of M&A, money allocated to dividends, share buybacks or issuance.
";

/// `[SCHEMA]` followed by everything from the first `{` to the last `}`
static SCHEMA_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[SCHEMA\]\s*(\{[\s\S]*\})").expect("schema marker pattern is valid")
});

/// Schema text edited on the web search panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSchema {
    /// Current editor contents
    pub text: String,
}

impl SearchSchema {
    /// Replace the editor contents with the built-in template
    pub fn apply_suggested(&mut self) {
        self.text = SUGGESTED_SCHEMA.to_string();
    }

    /// Empty the editor
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Schema sent with the first query of a conversation
    pub fn for_initial_query(&self) -> String {
        if self.text.is_empty() {
            NO_SCHEMA_HINT.to_string()
        } else {
            self.text.clone()
        }
    }
}

/// Split a follow-up message into query text and an optional inline schema
///
/// With a marker, the marker is removed and the rest is trimmed; without
/// one the message is returned unchanged.
pub fn extract_schema_marker(message: &str) -> (String, Option<String>) {
    match SCHEMA_MARKER.captures(message) {
        Some(captures) => {
            let schema = captures[1].to_string();
            let query = SCHEMA_MARKER.replace(message, "").trim().to_string();
            (query, Some(schema))
        }
        None => (message.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_query_schema() {
        let mut schema = SearchSchema::default();
        assert_eq!(schema.for_initial_query(), NO_SCHEMA_HINT);

        schema.apply_suggested();
        assert!(schema.for_initial_query().contains("### Company_name"));

        schema.clear();
        assert!(schema.text.is_empty());
    }

    #[test]
    fn test_extract_marker() {
        let (query, schema) =
            extract_schema_marker("Tell me about Acme [SCHEMA] {\"ceo\": \"string\"}");
        assert_eq!(query, "Tell me about Acme");
        assert_eq!(schema.as_deref(), Some("{\"ceo\": \"string\"}"));
    }

    #[test]
    fn test_extract_marker_multiline_greedy() {
        let message = "[SCHEMA] {\"a\": {\n\"b\": 1}} and more } text";
        let (query, schema) = extract_schema_marker(message);
        assert_eq!(schema.as_deref(), Some("{\"a\": {\n\"b\": 1}} and more }"));
        assert_eq!(query, "text");
    }

    #[test]
    fn test_no_marker() {
        let (query, schema) = extract_schema_marker("  plain question ");
        assert_eq!(query, "  plain question ");
        assert!(schema.is_none());
    }

    #[test]
    fn test_marker_without_braces_is_not_a_marker() {
        let (query, schema) = extract_schema_marker("[SCHEMA] none");
        assert_eq!(query, "[SCHEMA] none");
        assert!(schema.is_none());
    }
}
