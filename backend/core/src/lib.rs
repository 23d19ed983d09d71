pub mod error;
pub mod traits;
pub mod types;

pub use error::ScanError;
pub use traits::{VisionClient, VisionReply, VisionRequest};
pub use types::{AnalysisResult, BoundingBox, DetectedObject};
