//! The response contract sent to the vision service with every image.
//!
//! The normalizer tolerates deviations from the inner field rules, but the
//! service must still honour "JSON object only".

/// Bumped whenever the normative rules below change.
pub const INSTRUCTION_VERSION: u32 = 1;

const INSTRUCTION: &str = r#"Return ONLY valid JSON (no markdown, no code fences, no prose) with this exact shape:

{
  "objects": [
    {
      "label": "string",
      "description": "string",
      "confidence": 0.0,
      "box": {"x": 0.0, "y": 0.0, "w": 0.0, "h": 0.0}
    }
  ],
  "warnings": ["string"]
}

Rules:
- box coordinates are normalized to [0,1] relative to image width/height.
- x,y are the top-left corner; w,h are width/height.
- confidence is a number in [0,1].
- Include 10-30 objects max.
- Be specific about each item, to build a detailed inventory of the visible items.
- Assess the material of each item and include it in the description.
- If unsure about an object, omit it and add a warning instead."#;

/// The instruction text for the current contract version.
pub fn build_instruction() -> &'static str {
    INSTRUCTION
}
