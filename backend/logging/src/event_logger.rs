//! Scan Event Logger
//!
//! One structured record per pipeline milestone, emitted under the
//! `scan_events` target so it can be filtered or routed on its own.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ScanEvent {
    Started {
        image_bytes: usize,
        provider: String,
        model: String,
    },
    Completed {
        objects: usize,
        warnings: usize,
        latency_ms: u64,
    },
    Failed {
        kind: String,
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct ScanEventEntry {
    pub scan_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: ScanEvent,
}

pub struct ScanEventLogger;

impl ScanEventLogger {
    /// Build the entry for an event, redacting free-text fields.
    pub fn entry(scan_id: Uuid, mut event: ScanEvent) -> ScanEventEntry {
        if let ScanEvent::Failed { error_msg, .. } = &mut event {
            *error_msg = redact_sensitive_data(error_msg);
        }
        ScanEventEntry {
            scan_id,
            timestamp: Utc::now(),
            event,
        }
    }

    /// Log a scan event as a single JSON field.
    pub fn log_event(scan_id: Uuid, event: ScanEvent) {
        let failed = matches!(event, ScanEvent::Failed { .. });
        let entry = Self::entry(scan_id, event);
        let json = serde_json::to_string(&entry).unwrap_or_default();
        if failed {
            warn!(target: "scan_events", scan_id = %entry.scan_id, event = %json, "Scan event");
        } else {
            info!(target: "scan_events", scan_id = %entry.scan_id, event = %json, "Scan event");
        }
    }
}
