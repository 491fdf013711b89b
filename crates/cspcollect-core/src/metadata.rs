use chrono::{DateTime, Utc};

/// Stamp stored inside the record, e.g. `2013-12-14 01:02:03.456789`.
const RECORD_STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Filesystem-safe stamp used for record file names, e.g.
/// `20131214T010203.456789Z`. Both formats sort lexicographically in
/// chronological order.
const FILE_STAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.6fZ";

/// Context captured when a submission arrives: the collection instant, the
/// peer address, and the client-agent string. Captured exactly once per
/// request, before the body is decoded; never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionMetadata {
    timestamp: DateTime<Utc>,
    remote_addr: String,
    user_agent: String,
}

impl CollectionMetadata {
    /// Capture collection-time context now. Fields the transport could not
    /// supply are passed as empty strings; that is a normal condition.
    #[must_use]
    pub fn capture(remote_addr: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self::at(Utc::now(), remote_addr, user_agent)
    }

    /// Build metadata for a known instant.
    #[must_use]
    pub fn at(
        timestamp: DateTime<Utc>,
        remote_addr: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            remote_addr: remote_addr.into(),
            user_agent: user_agent.into(),
        }
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub fn remote_addr(&self) -> &str {
        &self.remote_addr
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn record_stamp(&self) -> String {
        self.timestamp.format(RECORD_STAMP_FORMAT).to_string()
    }

    #[must_use]
    pub fn file_stamp(&self) -> String {
        self.timestamp.format(FILE_STAMP_FORMAT).to_string()
    }
}
