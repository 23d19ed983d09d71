//! The end-to-end pipeline: encode → invoke → normalize → format.

use std::sync::Arc;
use std::time::{Duration, Instant};

use objscan_core::{AnalysisResult, ScanError, VisionClient};
use objscan_logging::{ScanEvent, ScanEventLogger};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::encoder::looks_like_jpeg;
use crate::formatter::format_report;
use crate::invoker::DetectionInvoker;
use crate::normalizer::normalize_reply;

/// Object inventory for one image at a time.
///
/// Holds no per-request state, so a single instance can serve concurrent
/// requests behind an `Arc`.
#[derive(Clone)]
pub struct Detector {
    invoker: DetectionInvoker,
}

impl Detector {
    pub fn new(client: Arc<dyn VisionClient>) -> Self {
        Self {
            invoker: DetectionInvoker::new(client),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.invoker = self.invoker.with_timeout(timeout);
        self
    }

    pub fn provider(&self) -> &str {
        self.invoker.client().name()
    }

    /// Run the pipeline and return the normalized, unsorted result.
    #[instrument(skip_all, fields(scan_id = tracing::field::Empty))]
    pub async fn detect(&self, jpeg: &[u8]) -> Result<AnalysisResult, ScanError> {
        let scan_id = Uuid::new_v4();
        tracing::Span::current().record("scan_id", tracing::field::display(scan_id));
        let start = Instant::now();

        ScanEventLogger::log_event(
            scan_id,
            ScanEvent::Started {
                image_bytes: jpeg.len(),
                provider: self.invoker.client().name().to_string(),
                model: self.invoker.client().model().to_string(),
            },
        );
        if !looks_like_jpeg(jpeg) {
            // Forwarded anyway; the service decides whether it can read it.
            warn!(image_bytes = jpeg.len(), "Image does not start with a JPEG marker");
        }

        let outcome = match self.invoker.invoke(jpeg).await {
            Ok(reply) => normalize_reply(&reply.text),
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(result) => ScanEventLogger::log_event(
                scan_id,
                ScanEvent::Completed {
                    objects: result.objects.len(),
                    warnings: result.warnings.len(),
                    latency_ms: start.elapsed().as_millis() as u64,
                },
            ),
            Err(e) => ScanEventLogger::log_event(
                scan_id,
                ScanEvent::Failed {
                    kind: e.kind().to_string(),
                    error_msg: e.to_string(),
                },
            ),
        }
        outcome
    }

    /// Run the pipeline and render the text report.
    pub async fn analyze(&self, jpeg: &[u8]) -> Result<String, ScanError> {
        self.detect(jpeg).await.map(|result| format_report(&result))
    }
}
