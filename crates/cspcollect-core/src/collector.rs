use std::path::PathBuf;

use crate::error::{CollectError, Result};
use crate::metadata::CollectionMetadata;
use crate::policy::PolicyVariant;
use crate::record::LogRecord;
use crate::report::{ParsedReport, Report};
use crate::store::RecordStore;

/// Outcome of one submission. A persistence failure is a value, not an
/// error: the transport layer acknowledges the caller identically whether
/// the record was stored or not.
#[derive(Debug)]
pub enum Submission {
    /// The body was not a violation report; nothing was written.
    Discarded,
    Stored(PathBuf),
    StoreFailed(CollectError),
}

/// The ingestion pipeline: decode, classify, enrich, persist. Stateless
/// apart from the output location, so one instance serves any number of
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct Collector {
    store: RecordStore,
}

impl Collector {
    /// Validate the output location once, at startup. An unwritable
    /// location refuses to open instead of dropping every report later.
    pub fn open(output_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            store: RecordStore::open(output_dir)?,
        })
    }

    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Run one submission through the pipeline. Never returns an error;
    /// every internal failure is folded into the outcome.
    #[must_use]
    pub fn ingest(
        &self,
        raw: &[u8],
        hint: Option<&str>,
        metadata: CollectionMetadata,
    ) -> Submission {
        let report = match Report::decode(raw) {
            ParsedReport::Decoded(report) => report,
            ParsedReport::Malformed => return Submission::Discarded,
        };
        let variant = PolicyVariant::from_hint(hint);
        let record = LogRecord::new(report, variant, metadata);
        match self.store.persist(&record) {
            Ok(path) => Submission::Stored(path),
            Err(err) => Submission::StoreFailed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::tempdir;

    use super::*;
    use crate::store::load_record;

    fn metadata() -> CollectionMetadata {
        CollectionMetadata::capture("203.0.113.5", "TestAgent/1.0")
    }

    #[test]
    fn malformed_submission_is_discarded_without_a_file() {
        let temp = tempdir().expect("tempdir");
        let collector = Collector::open(temp.path()).expect("open");

        let outcome = collector.ingest(b"not json at all", None, metadata());
        assert!(matches!(outcome, Submission::Discarded));
        assert_eq!(fs::read_dir(temp.path()).expect("read dir").count(), 0);
    }

    #[test]
    fn valid_submission_is_stored_with_enrichment() {
        let temp = tempdir().expect("tempdir");
        let collector = Collector::open(temp.path()).expect("open");

        let outcome = collector.ingest(
            br#"{"csp-report": {"blocked-uri": "http://evil.example/x.js"}}"#,
            Some("type=eval"),
            metadata(),
        );
        let Submission::Stored(path) = outcome else {
            panic!("expected stored outcome");
        };

        let value = load_record(&path).expect("load");
        assert_eq!(value["csp-report"]["blocked-uri"], json!("http://evil.example/x.js"));
        assert_eq!(value["policy-type"], json!("eval"));
        assert_eq!(value["remote-addr"], json!("203.0.113.5"));
        assert_eq!(value["http-user-agent"], json!("TestAgent/1.0"));
    }

    #[test]
    fn store_failure_is_reported_as_an_outcome() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path().join("reports");
        let collector = Collector::open(&root).expect("open");
        fs::remove_dir_all(&root).expect("remove store dir");

        let outcome = collector.ingest(br#"{"csp-report": {}}"#, None, metadata());
        assert!(matches!(outcome, Submission::StoreFailed(_)));
    }
}
