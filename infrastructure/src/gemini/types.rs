//! Wire types for the Gemini `generateContent` REST call
//!
//! Only the fields consilium sends or reads are modeled; everything else in
//! the response envelope is ignored.

use serde::{Deserialize, Serialize};

/// MIME type requested for the model output
pub const RESPONSE_MIME_TYPE: &str = "application/json";

// ─── Request ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<RequestContent<'a>>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct RequestContent<'a> {
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: &'static str,
    pub temperature: f64,
}

impl<'a> GenerateContentRequest<'a> {
    /// Single-turn request carrying one text part
    pub fn single_prompt(prompt: &'a str, temperature: f64) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: RESPONSE_MIME_TYPE,
                temperature,
            },
        }
    }
}

// ─── Response ────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if present and non-empty
    pub fn first_text(self) -> Option<String> {
        self.candidates?
            .into_iter()
            .next()?
            .content?
            .parts?
            .into_iter()
            .next()?
            .text
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let request = GenerateContentRequest::single_prompt("hello", 0.9);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{ "parts": [{ "text": "hello" }] }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "temperature": 0.9
                }
            })
        );
    }

    #[test]
    fn test_first_text_reads_first_part() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "first" }, { "text": "second" }], "role": "model" },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "totalTokenCount": 12 }
        }))
        .unwrap();
        assert_eq!(response.first_text().as_deref(), Some("first"));
    }

    #[test]
    fn test_first_text_missing_pieces() {
        let cases = [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{}] }),
            json!({ "candidates": [{ "content": {} }] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{}] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": "" }] } }] }),
        ];
        for case in cases {
            let response: GenerateContentResponse = serde_json::from_value(case.clone()).unwrap();
            assert!(response.first_text().is_none(), "expected none for {case}");
        }
    }
}
