//! Audit log for processor exchanges
//!
//! When debug is enabled in the gateway configuration, every
//! request/response pair against the processor is recorded through the
//! injected [`AuditLog`] before interpretation. Credential headers are
//! redacted at entry construction, so no implementation can leak them.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;

/// Placeholder stored instead of credential header values.
pub const REDACTED: &str = "[redacted]";

/// Headers whose values never reach the log.
pub fn is_secret_header(name: &str) -> bool {
    name.eq_ignore_ascii_case("x-api-key") || name.eq_ignore_ascii_case("x-access-token")
}

/// One request/response exchange with the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// Endpoint path the request went to
    pub endpoint: String,
    /// Request headers, credentials already redacted
    pub headers: BTreeMap<String, String>,
    /// Form fields sent in the request body
    pub request_fields: Vec<(String, String)>,
    /// HTTP status, absent when the request never completed
    pub response_status: Option<u16>,
    /// Raw response body, absent when the request never completed
    pub response_body: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        endpoint: impl Into<String>,
        headers: impl IntoIterator<Item = (String, String)>,
        request_fields: impl IntoIterator<Item = (String, String)>,
        response_status: Option<u16>,
        response_body: Option<String>,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| {
                let value = if is_secret_header(&name) {
                    REDACTED.to_string()
                } else {
                    value
                };
                (name, value)
            })
            .collect();

        Self {
            endpoint: endpoint.into(),
            headers,
            request_fields: request_fields.into_iter().collect(),
            response_status,
            response_body,
            recorded_at: Utc::now(),
        }
    }
}

/// Collaborator interface the host injects to consume audit entries.
pub trait AuditLog: Send + Sync {
    fn record(&self, entry: &AuditEntry);
}

/// Default audit log backed by the `tracing` subscriber the host installed.
#[derive(Debug, Default)]
pub struct TracingAuditLog;

impl AuditLog for TracingAuditLog {
    fn record(&self, entry: &AuditEntry) {
        debug!(
            "Mobbex exchange: endpoint={} headers={:?} request={:?} status={:?} body={:?}",
            entry.endpoint,
            entry.headers,
            entry.request_fields,
            entry.response_status,
            entry.response_body
        );
    }
}

/// In-memory audit log for tests and diagnostics.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    entries: std::sync::Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().expect("audit log lock poisoned").clone()
    }
}

impl AuditLog for MemoryAuditLog {
    fn record(&self, entry: &AuditEntry) {
        self.entries
            .lock()
            .expect("audit log lock poisoned")
            .push(entry.clone());
    }
}
