use crate::error::PacklistError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Version of the fixed response schema requested from the collaborator.
/// Responses that deviate from this shape are parse failures, not
/// best-effort field guesses.
pub const STRUCTURED_SCHEMA_VERSION: &str = "1";

/// Fixed response schema of the structured extractor collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredPage {
    #[serde(default)]
    pub delivery_sheet_no: Option<String>,
    #[serde(default)]
    pub fabric_type: Option<String>,
    #[serde(default)]
    pub batch_no: Option<String>,
    /// Combined colour + finishing descriptor.
    #[serde(default)]
    pub colour: Option<String>,
    #[serde(default)]
    pub rows: Vec<StructuredRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredRow {
    pub roll_no: String,
    pub weight: String,
    pub length: String,
}

/// External black-box collaborator mapping raw page text to the fixed
/// schema. Used as one strategy of the Ocean Lanka fallback chain; the
/// caller treats any error as "no data" and degrades, never surfacing it.
pub trait StructuredExtractor: Send + Sync {
    fn extract_page(&self, page_text: &str) -> Result<StructuredPage, PacklistError>;

    /// Name of this collaborator backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct ApiCredential {
    pub model: String,
    pub api_key: String,
}

/// HTTP-backed structured extractor using the Gemini generateContent API.
///
/// Credentials are tried in order and the first schema-valid response
/// wins. Every failure along the way (transport, HTTP status, non-JSON
/// payload, schema mismatch) is absorbed and the next credential is
/// tried, so the total attempt count is bounded by the credential list.
pub struct GeminiExtractor {
    credentials: Vec<ApiCredential>,
    timeout: Duration,
}

impl GeminiExtractor {
    pub fn new(credentials: Vec<ApiCredential>) -> Self {
        GeminiExtractor {
            credentials,
            timeout: Duration::from_secs(60),
        }
    }

    fn request_page(
        &self,
        cred: &ApiCredential,
        page_text: &str,
    ) -> Result<StructuredPage, PacklistError> {
        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": build_prompt(page_text) }] }],
            "generationConfig": { "response_mime_type": "application/json" },
        });

        let client = ureq::builder().timeout(self.timeout).build();
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            cred.model, cred.api_key
        );

        let response = client
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(&payload)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => {
                    PacklistError::Structured(format!("HTTP {code} from generateContent"))
                }
                e => PacklistError::Structured(format!("transport error: {e}")),
            })?;

        let body: serde_json::Value = response
            .into_json()
            .map_err(|e| PacklistError::Structured(format!("non-JSON response body: {e}")))?;

        let text = body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| PacklistError::Structured("no text in response".into()))?;

        parse_structured_response(text)
    }
}

impl StructuredExtractor for GeminiExtractor {
    fn extract_page(&self, page_text: &str) -> Result<StructuredPage, PacklistError> {
        let mut last_error = PacklistError::Structured("no credentials configured".into());
        for cred in &self.credentials {
            match self.request_page(cred, page_text) {
                Ok(page) => return Ok(page),
                Err(e) => last_error = e,
            }
        }
        Err(last_error)
    }

    fn backend_name(&self) -> &str {
        "gemini"
    }
}

fn build_prompt(page_text: &str) -> String {
    format!(
        "Extract the packing list fields from the text below as JSON with exactly \
         these keys: delivery_sheet_no, fabric_type, batch_no, colour (batch number \
         and colour/heat-setting descriptor joined by a single space), rows (array \
         of objects with roll_no, weight, length, all values as strings). Use null \
         for fields not present. Respond with JSON only, schema version {}.\n\n{}",
        STRUCTURED_SCHEMA_VERSION, page_text
    )
}

/// Parse the collaborator's text output into the fixed schema, tolerating
/// markdown code fences around the JSON.
pub fn parse_structured_response(text: &str) -> Result<StructuredPage, PacklistError> {
    serde_json::from_str(strip_code_fences(text))
        .map_err(|e| PacklistError::Structured(format!("schema mismatch: {e}")))
}

fn strip_code_fences(text: &str) -> &str {
    let t = text.trim();
    let t = t
        .strip_prefix("```json")
        .or_else(|| t.strip_prefix("```"))
        .unwrap_or(t);
    let t = t.strip_suffix("```").unwrap_or(t);
    t.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let page = parse_structured_response(
            r#"{"delivery_sheet_no":"OL9921","batch_no":"B123","rows":[{"roll_no":"1","weight":"14.35","length":"52.00"}]}"#,
        )
        .unwrap();
        assert_eq!(page.delivery_sheet_no.as_deref(), Some("OL9921"));
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0].weight, "14.35");
        assert_eq!(page.fabric_type, None);
    }

    #[test]
    fn test_parse_fenced_json() {
        let text = "```json\n{\"batch_no\":\"B7\",\"rows\":[]}\n```";
        let page = parse_structured_response(text).unwrap();
        assert_eq!(page.batch_no.as_deref(), Some("B7"));
        assert!(page.rows.is_empty());
    }

    #[test]
    fn test_malformed_response_is_error() {
        assert!(parse_structured_response("Sure! Here are the rows you asked for").is_err());
    }

    #[test]
    fn test_schema_deviation_is_error() {
        // numeric weight instead of string: fixed schema, no coercion
        let text = r#"{"rows":[{"roll_no":"1","weight":14.35,"length":"52.00"}]}"#;
        assert!(parse_structured_response(text).is_err());
    }

    #[test]
    fn test_no_credentials_is_error() {
        let extractor = GeminiExtractor::new(Vec::new());
        assert!(extractor.extract_page("any page").is_err());
    }
}
