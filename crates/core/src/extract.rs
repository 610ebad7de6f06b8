//! Recovery of an [`AnalysisResult`] from free-form model output.
//!
//! The model is asked for strict JSON but routinely wraps it in prose or
//! markdown fences. Extraction is tried in three tiers: strict parse of the
//! largest brace-delimited span, then per-field regex salvage over the whole
//! text, then fixed defaults. It never fails.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value as JsonValue};

use crate::analysis::{AnalysisResult, DEFAULT_CONFIDENCE, DEFAULT_REASONING, DEFAULT_SPECIALIZATION};

/// First `{` through last `}`, across newlines.
static BRACE_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

static SPECIALIZATION: LazyLock<Regex> = LazyLock::new(|| field_pattern("specialization"));
static CONFIDENCE: LazyLock<Regex> = LazyLock::new(|| field_pattern("confidence"));
static REASONING: LazyLock<Regex> = LazyLock::new(|| field_pattern("reasoning"));

fn field_pattern(name: &str) -> Regex {
    Regex::new(&format!(r#""{name}"\s*:\s*"([^"]+)""#)).unwrap()
}

/// Turn raw model output into an [`AnalysisResult`].
///
/// The span selection is greedy: if the reply contains several brace
/// fragments they are swallowed into one span, which then usually fails to
/// parse and falls through to field salvage.
pub fn extract(response_text: &str) -> AnalysisResult {
    if let Some(result) = parse_structured(response_text) {
        return result;
    }
    parse_fields(response_text)
}

fn parse_structured(text: &str) -> Option<AnalysisResult> {
    let span = BRACE_SPAN.find(text)?.as_str();
    let cleaned = span.replace("```json", "").replace("```", "");

    match serde_json::from_str::<Map<String, JsonValue>>(cleaned.trim()) {
        Ok(object) => Some(from_object(&object)),
        Err(err) => {
            tracing::warn!(error = %err, "Could not parse JSON, attempting manual parsing");
            None
        }
    }
}

fn from_object(object: &Map<String, JsonValue>) -> AnalysisResult {
    let specialization = scalar(object, "specialization")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SPECIALIZATION.to_string());

    AnalysisResult {
        specialization,
        confidence: scalar(object, "confidence").unwrap_or_else(|| DEFAULT_CONFIDENCE.to_string()),
        reasoning: scalar(object, "reasoning").unwrap_or_else(|| DEFAULT_REASONING.to_string()),
    }
}

/// Strings verbatim, numbers and booleans as their JSON text.
fn scalar(object: &Map<String, JsonValue>, key: &str) -> Option<String> {
    match object.get(key)? {
        JsonValue::String(s) => Some(s.clone()),
        value @ (JsonValue::Number(_) | JsonValue::Bool(_)) => Some(value.to_string()),
        _ => None,
    }
}

fn parse_fields(text: &str) -> AnalysisResult {
    AnalysisResult {
        specialization: capture(&SPECIALIZATION, text)
            .unwrap_or_else(|| DEFAULT_SPECIALIZATION.to_string()),
        confidence: capture(&CONFIDENCE, text).unwrap_or_else(|| DEFAULT_CONFIDENCE.to_string()),
        reasoning: capture(&REASONING, text).unwrap_or_else(|| DEFAULT_REASONING.to_string()),
    }
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(specialization: &str, confidence: &str, reasoning: &str) -> AnalysisResult {
        AnalysisResult {
            specialization: specialization.to_string(),
            confidence: confidence.to_string(),
            reasoning: reasoning.to_string(),
        }
    }

    #[test]
    fn plain_json() {
        let text = r#"{"specialization": "Cardiology", "confidence": "high", "reasoning": "Chest pain on exertion"}"#;
        assert_eq!(
            extract(text),
            result("Cardiology", "high", "Chest pain on exertion")
        );
    }

    #[test]
    fn fenced_json_with_prose() {
        let text = "Sure, here is my assessment:\n```json\n{\n  \"specialization\": \"Pulmonology\",\n  \"confidence\": \"medium\",\n  \"reasoning\": \"Persistent cough and wheezing\"\n}\n```\nLet me know if you need more.";
        assert_eq!(
            extract(text),
            result("Pulmonology", "medium", "Persistent cough and wheezing")
        );
    }

    #[test]
    fn escaped_quotes_survive_structured_parse() {
        let text = r#"{"specialization": "Psychiatry", "confidence": "low", "reasoning": "Reports \"constant worry\" and poor sleep"}"#;
        assert_eq!(
            extract(text).reasoning,
            r#"Reports "constant worry" and poor sleep"#
        );
    }

    #[test]
    fn missing_fields_in_json_take_defaults() {
        let text = r#"{"specialization": "Dermatology"}"#;
        assert_eq!(
            extract(text),
            result("Dermatology", DEFAULT_CONFIDENCE, DEFAULT_REASONING)
        );
    }

    #[test]
    fn blank_specialization_in_json_takes_default() {
        let text = r#"{"specialization": "  ", "confidence": "high", "reasoning": "unclear"}"#;
        assert_eq!(extract(text).specialization, DEFAULT_SPECIALIZATION);
    }

    #[test]
    fn numeric_confidence_is_stringified() {
        let text = r#"{"specialization": "Urology", "confidence": 0.8, "reasoning": null}"#;
        assert_eq!(
            extract(text),
            result("Urology", "0.8", DEFAULT_REASONING)
        );
    }

    #[test]
    fn no_braces_falls_back_to_field_patterns() {
        let text = r#"My answer: "specialization": "Cardiology" and that is all."#;
        assert_eq!(
            extract(text),
            result("Cardiology", DEFAULT_CONFIDENCE, DEFAULT_REASONING)
        );
    }

    #[test]
    fn truncated_json_is_salvaged_field_by_field() {
        let text = r#"{"specialization": "Endocrinology", "confidence": "high", "reasoning": "Thirst and weight loss"#;
        assert_eq!(
            extract(text),
            result("Endocrinology", "high", DEFAULT_REASONING)
        );
    }

    #[test]
    fn greedy_span_swallows_separate_fragments() {
        // First `{` to last `}` covers both objects and the prose between
        // them, so strict parsing fails and the first field match wins.
        let text = r#"Example: {"specialization": "Neurology"} Actual: {"specialization": "Orthopedics", "confidence": "high"}"#;
        assert_eq!(
            extract(text),
            result("Neurology", "high", DEFAULT_REASONING)
        );
    }

    #[test]
    fn prose_yields_hard_default() {
        let text = "I'm sorry, I cannot provide medical advice.";
        assert_eq!(extract(text), AnalysisResult::default());
        assert_eq!(
            extract(text),
            result(
                "General Medicine",
                "medium",
                "Unable to extract specific specialization"
            )
        );
    }

    #[test]
    fn empty_input_yields_hard_default() {
        assert_eq!(extract(""), AnalysisResult::default());
    }

    #[test]
    fn empty_quoted_value_is_not_captured() {
        let text = r#"no json here, "specialization": "" and "confidence": "low""#;
        assert_eq!(
            extract(text),
            result(DEFAULT_SPECIALIZATION, "low", DEFAULT_REASONING)
        );
    }

    #[test]
    fn specialization_is_never_empty() {
        let samples = [
            "",
            "{}",
            "{ not json }",
            r#"{"specialization": ""}"#,
            r#"{"specialization": null}"#,
            r#""specialization": """#,
            "```json\n```",
        ];
        for sample in samples {
            assert!(
                !extract(sample).specialization.is_empty(),
                "empty specialization for {sample:?}"
            );
        }
    }
}
