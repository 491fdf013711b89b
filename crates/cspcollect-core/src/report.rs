use serde_json::{Map, Value};

/// Top-level key whose presence marks a request body as a violation report.
pub const MARKER_KEY: &str = "csp-report";

/// Field spellings used by older browser engines, mapped to the current form.
const LEGACY_KEY_RENAMES: &[(&str, &str)] = &[("document-url", "document-uri")];

/// A decoded violation report: the full top-level JSON object submitted by
/// the browser. Immutable once decoded; owned by a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    fields: Map<String, Value>,
}

/// Decode outcome. Malformed input is a value, not an error; nothing on the
/// decode path propagates a fault to the transport layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedReport {
    Decoded(Report),
    Malformed,
}

impl Report {
    /// Decode an untrusted request body. Malformed when the body is not
    /// valid JSON, the top level is not an object, or the marker key is
    /// absent. No schema validation happens beyond that structural check.
    #[must_use]
    pub fn decode(raw: &[u8]) -> ParsedReport {
        let Ok(value) = serde_json::from_slice::<Value>(raw) else {
            return ParsedReport::Malformed;
        };
        let Value::Object(mut fields) = value else {
            return ParsedReport::Malformed;
        };
        if !fields.contains_key(MARKER_KEY) {
            return ParsedReport::Malformed;
        }
        if let Some(Value::Object(inner)) = fields.get(MARKER_KEY) {
            let normalized = normalize_keys(inner);
            fields.insert(MARKER_KEY.to_string(), Value::Object(normalized));
        }
        ParsedReport::Decoded(Self { fields })
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Fold report field names to lowercase and rename legacy spellings so
/// records from different browser generations line up. Values are never
/// altered.
fn normalize_keys(inner: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in inner {
        let mut key = key.to_ascii_lowercase();
        if let Some((_, replacement)) = LEGACY_KEY_RENAMES
            .iter()
            .find(|(legacy, _)| *legacy == key.as_str())
        {
            key = (*replacement).to_string();
        }
        out.insert(key, value.clone());
    }
    out
}
