use std::fs::OpenOptions;
use std::io::Write;

use regex::Regex;
use serde_json::{Map, Value};

use crate::domain::extraction::{CompanyFields, FieldValue};
use crate::services::OpenaiClient;

// Three attempts, first success wins: model JSON, brace-sliced JSON repair,
// per-label regex over the raw text. Exhaustion degrades to empty fields,
// never an error.
pub async fn extract_company_fields(
    openai_client: &OpenaiClient,
    site_content: &str,
    response_log_path: &str,
) -> CompanyFields {
    let raw_response = match openai_client.extract_company_details(site_content).await {
        Ok(raw_response) => raw_response,
        Err(e) => {
            log::error!("Openai call failed: {:?}", e);
            return CompanyFields::empty();
        }
    };

    append_raw_response(response_log_path, &raw_response);
    parse_model_response(&raw_response)
}

// Raw responses are kept for offline debugging of bad model output; a failed
// write never blocks extraction
fn append_raw_response(path: &str, raw_response: &str) {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(mut file) => {
            if let Err(e) = writeln!(file, "{}", raw_response) {
                log::error!("Failed to append to the response log: {:?}", e);
            }
        }
        Err(e) => log::error!("Failed to open the response log: {:?}", e),
    }
}

pub fn parse_model_response(raw_response: &str) -> CompanyFields {
    match clean_and_parse_json(raw_response) {
        Some(map) => CompanyFields::from_json_map(map),
        None => {
            log::info!("Error parsing JSON after cleaning.");
            fallback_extraction(raw_response)
        }
    }
}

// Slices between the first '{' and the last '}' to recover JSON embedded in
// conversational padding. An empty object counts as a failure, successful
// parsing alone is not enough.
fn clean_and_parse_json(raw_response: &str) -> Option<Map<String, Value>> {
    let start_index = raw_response.find('{')?;
    let end_index = raw_response.rfind('}')?;
    if end_index <= start_index {
        return None;
    }

    let json_slice = &raw_response[start_index..=end_index];
    let parsed: Value = serde_json::from_str(json_slice).ok()?;

    match parsed {
        Value::Object(map) if !map.is_empty() => Some(map),
        _ => None,
    }
}

// Each field's capture runs until the next label in canonical order, a
// newline, or end of text. A label the model skipped leaves the preceding
// capture running into the following field's text.
fn fallback_extraction(raw_response: &str) -> CompanyFields {
    CompanyFields {
        description: capture_field(
            raw_response,
            r"(?is)(?:Description\s*:\s*)(.*?)(?:\n|Products/Services|$)",
        ),
        products_services: FieldValue::Text(capture_field(
            raw_response,
            r"(?is)(?:Products/Services\s*:\s*)(.*?)(?:\n|Use Cases|$)",
        )),
        use_cases: FieldValue::Text(capture_field(
            raw_response,
            r"(?is)(?:Use Cases\s*:\s*)(.*?)(?:\n|Customers|$)",
        )),
        customers: FieldValue::Text(capture_field(
            raw_response,
            r"(?is)(?:Customers\s*:\s*)(.*?)(?:\n|Partners|$)",
        )),
        partners: FieldValue::Text(capture_field(
            raw_response,
            r"(?is)(?:Partners\s*:\s*)(.*?)(?:\n|$)",
        )),
    }
}

fn capture_field(text: &str, pattern: &str) -> String {
    let field_regex = Regex::new(pattern).unwrap();
    field_regex
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str().trim().to_string())
        .unwrap_or_default()
}
