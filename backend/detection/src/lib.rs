//! Object inventory pipeline.
//!
//! [`Detector::analyze`] is the single entry point used by the CLI and the
//! HTTP gateway; the stages are public for reuse and testing.

pub mod detector;
pub mod encoder;
pub mod formatter;
pub mod instruction;
pub mod invoker;
pub mod normalizer;

pub use detector::Detector;
pub use encoder::{jpeg_data_url, looks_like_jpeg, JPEG_MIME};
pub use formatter::format_report;
pub use instruction::{build_instruction, INSTRUCTION_VERSION};
pub use invoker::DetectionInvoker;
pub use normalizer::{normalize, normalize_reply, parse_reply};
