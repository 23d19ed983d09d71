//! Structured logging for objscan.
//!
//! Handles subscriber setup, secret redaction, and per-request scan events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{ScanEvent, ScanEventEntry, ScanEventLogger};
pub use logger::{init_logger, LogGuard};
pub use redact::redact_sensitive_data;
