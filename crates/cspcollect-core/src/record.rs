use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::metadata::CollectionMetadata;
use crate::policy::PolicyVariant;
use crate::report::Report;

pub const POLICY_TYPE_FIELD: &str = "policy-type";
pub const TIMESTAMP_FIELD: &str = "timestamp-utc";
pub const REMOTE_ADDR_FIELD: &str = "remote-addr";
pub const USER_AGENT_FIELD: &str = "http-user-agent";

/// One accepted report merged with its collection context. Immutable; this
/// is the unit of persistence — exactly one record per accepted request.
#[derive(Debug, Clone)]
pub struct LogRecord {
    report: Report,
    variant: PolicyVariant,
    metadata: CollectionMetadata,
}

impl LogRecord {
    #[must_use]
    pub fn new(report: Report, variant: PolicyVariant, metadata: CollectionMetadata) -> Self {
        Self {
            report,
            variant,
            metadata,
        }
    }

    #[must_use]
    pub fn variant(&self) -> PolicyVariant {
        self.variant
    }

    #[must_use]
    pub fn metadata(&self) -> &CollectionMetadata {
        &self.metadata
    }

    /// Merge report fields and enrichment fields into one JSON object.
    /// When the submitted report already carries a field with an
    /// enrichment name, the collector's value wins; this is an explicit
    /// choice, and it keeps enrichment fields trustworthy for readers.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut fields: Map<String, Value> = self.report.fields().clone();
        fields.insert(
            POLICY_TYPE_FIELD.to_string(),
            Value::String(self.variant.as_str().to_string()),
        );
        fields.insert(
            TIMESTAMP_FIELD.to_string(),
            Value::String(self.metadata.record_stamp()),
        );
        fields.insert(
            REMOTE_ADDR_FIELD.to_string(),
            Value::String(self.metadata.remote_addr().to_string()),
        );
        fields.insert(
            USER_AGENT_FIELD.to_string(),
            Value::String(self.metadata.user_agent().to_string()),
        );
        Value::Object(fields)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_value())?)
    }

    #[must_use]
    pub fn file_stamp(&self) -> String {
        self.metadata.file_stamp()
    }
}

impl Serialize for LogRecord {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}
