use serde::{Deserialize, Serialize};

/// Label used when the service omits a string field.
pub const UNKNOWN: &str = "unknown";

/// Axis-aligned box in normalized image coordinates.
///
/// `x`/`y` are the top-left corner, `w`/`h` the width and height, all as
/// fractions of the image dimensions. Bounds are declared by the service,
/// never verified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// One inventoried item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub label: String,
    pub description: String,
    /// Expected in `[0, 1]`, not enforced.
    pub confidence: f64,
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
}

impl Default for DetectedObject {
    fn default() -> Self {
        Self {
            label: UNKNOWN.to_string(),
            description: UNKNOWN.to_string(),
            confidence: 0.0,
            bbox: BoundingBox::default(),
        }
    }
}

/// Normalized reply: objects in arrival order plus any warnings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub objects: Vec<DetectedObject>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl AnalysisResult {
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_object_uses_unknown_labels() {
        let obj = DetectedObject::default();
        assert_eq!(obj.label, "unknown");
        assert_eq!(obj.description, "unknown");
        assert_eq!(obj.confidence, 0.0);
        assert_eq!(obj.bbox, BoundingBox::default());
    }

    #[test]
    fn serializes_box_under_wire_name() {
        let obj = DetectedObject {
            label: "mug".into(),
            description: "ceramic mug".into(),
            confidence: 0.5,
            bbox: BoundingBox { x: 0.1, y: 0.2, w: 0.3, h: 0.4 },
        };
        let v = serde_json::to_value(&obj).unwrap();
        assert_eq!(v["box"]["w"], 0.3);
        assert!(v.get("bbox").is_none());
    }
}
