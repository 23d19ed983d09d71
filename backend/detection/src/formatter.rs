//! Report formatting: a pure, deterministic text rendering of an
//! [`AnalysisResult`].

use objscan_core::{AnalysisResult, DetectedObject};

pub const WARNINGS_HEADER: &str = "Warnings:";
pub const NO_OBJECTS: &str = "No objects returned.";

const LABEL_WIDTH: usize = 20;
const DESCRIPTION_WIDTH: usize = 50;

/// Render the report. Lines are joined with `\n`, no trailing newline.
pub fn format_report(result: &AnalysisResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !result.warnings.is_empty() {
        lines.push(WARNINGS_HEADER.to_string());
        lines.extend(result.warnings.iter().map(|w| format!("- {w}")));
        lines.push(String::new());
    }

    if result.objects.is_empty() {
        lines.push(NO_OBJECTS.to_string());
        return lines.join("\n");
    }

    let sorted = sorted_by_confidence(&result.objects);
    lines.push(format!("Detected {} objects:", sorted.len()));
    lines.extend(sorted.into_iter().map(format_object_line));

    lines.join("\n")
}

/// Objects by descending confidence; equal confidences keep input order.
pub fn sorted_by_confidence(objects: &[DetectedObject]) -> Vec<&DetectedObject> {
    let mut sorted: Vec<&DetectedObject> = objects.iter().collect();
    sorted.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    sorted
}

pub fn format_object_line(obj: &DetectedObject) -> String {
    format!(
        "- {:<lw$}  - {:<dw$}  conf={:.2}  box=[x={:.3}, y={:.3}, w={:.3}, h={:.3}]",
        obj.label,
        obj.description,
        obj.confidence,
        obj.bbox.x,
        obj.bbox.y,
        obj.bbox.w,
        obj.bbox.h,
        lw = LABEL_WIDTH,
        dw = DESCRIPTION_WIDTH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use objscan_core::BoundingBox;

    fn obj(label: &str, confidence: f64) -> DetectedObject {
        DetectedObject {
            label: label.to_string(),
            description: format!("{label} description"),
            confidence,
            bbox: BoundingBox::default(),
        }
    }

    fn result(objects: Vec<DetectedObject>, warnings: &[&str]) -> AnalysisResult {
        AnalysisResult {
            objects,
            warnings: warnings.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[test]
    fn empty_result_is_exactly_no_objects() {
        assert_eq!(format_report(&result(vec![], &[])), "No objects returned.");
    }

    #[test]
    fn warnings_come_first() {
        let text = format_report(&result(vec![], &["blurry"]));
        assert_eq!(text, "Warnings:\n- blurry\n\nNo objects returned.");
    }

    #[test]
    fn sorts_by_descending_confidence() {
        let text = format_report(&result(
            vec![obj("a", 0.2), obj("b", 0.9), obj("c", 0.5)],
            &[],
        ));
        let confs: Vec<&str> = text
            .lines()
            .skip(1)
            .map(|l| l.split("conf=").nth(1).unwrap().split_whitespace().next().unwrap())
            .collect();
        assert_eq!(confs, vec!["0.90", "0.50", "0.20"]);
        assert!(text.starts_with("Detected 3 objects:\n"));
    }

    #[test]
    fn ties_keep_input_order() {
        let objects = vec![obj("first", 0.5), obj("top", 0.8), obj("second", 0.5), obj("third", 0.5)];
        let labels: Vec<&str> = sorted_by_confidence(&objects)
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(labels, vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn nan_confidence_sorts_first_without_disturbing_the_rest() {
        let objects = vec![obj("low", 0.1), obj("odd", f64::NAN), obj("high", 0.9), obj("mid", 0.5)];
        let labels: Vec<&str> = sorted_by_confidence(&objects)
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(labels, vec!["odd", "high", "mid", "low"]);
    }

    #[test]
    fn line_layout_is_fixed_width() {
        let line = format_object_line(&DetectedObject {
            label: "mug".into(),
            description: "white ceramic mug".into(),
            confidence: 0.876,
            bbox: BoundingBox { x: 0.1, y: 0.25, w: 0.0626, h: 1.0 },
        });
        let expected = format!(
            "- mug{}  - white ceramic mug{}  conf=0.88  box=[x=0.100, y=0.250, w=0.063, h=1.000]",
            " ".repeat(17),
            " ".repeat(33),
        );
        assert_eq!(line, expected);
    }

    #[test]
    fn long_fields_are_not_truncated() {
        let long = "x".repeat(60);
        let line = format_object_line(&DetectedObject {
            label: long.clone(),
            description: long.clone(),
            ..DetectedObject::default()
        });
        assert!(line.starts_with(&format!("- {long}  - {long}  conf=0.00")));
    }

    #[test]
    fn output_is_deterministic() {
        let r = result(vec![obj("a", 0.3), obj("b", 0.3), obj("c", 0.7)], &["w1", "w2"]);
        assert_eq!(format_report(&r), format_report(&r));
    }

    #[test]
    fn full_report_with_warnings() {
        let r = result(vec![obj("lamp", 0.4)], &["partially occluded shelf"]);
        let text = format_report(&r);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Warnings:");
        assert_eq!(lines[1], "- partially occluded shelf");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Detected 1 objects:");
        assert!(lines[4].starts_with("- lamp "));
        assert!(!text.ends_with('\n'));
    }
}
