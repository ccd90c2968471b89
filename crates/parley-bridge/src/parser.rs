//! Validate the remote response and map it into the domain model

use crate::error::BridgeError;
use parley_domain::{
    AnalysisLayer, BridgeResult, Confidence, ConflictDomain, FieldKind, FieldSpec, ReExpression,
    SchemaDescriptor,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResponse {
    literal: String,
    emotional_state: String,
    cultural_markers: Vec<String>,
    power_signaling: String,
    inferred_intent: String,
    confidence: f64,
    re_expression: RawReExpression,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReExpression {
    message: String,
    cultural_note: String,
    alternatives: Vec<String>,
}

/// Parse, validate and map a raw response body into a `BridgeResult`
///
/// # Errors
///
/// - `MalformedResponse` if the body is not JSON
/// - `SchemaViolation` naming the first missing, mistyped or empty field
pub fn parse_and_map(
    raw_response: &str,
    original_input: &str,
    domain: ConflictDomain,
) -> Result<BridgeResult, BridgeError> {
    let json_str = extract_json(raw_response)?;

    let json: Value = serde_json::from_str(json_str)
        .map_err(|e| BridgeError::MalformedResponse(format!("JSON parse error: {}", e)))?;

    validate_shape(&json, &SchemaDescriptor::bridge())?;

    let raw: RawResponse = serde_json::from_value(json)
        .map_err(|e| BridgeError::schema("$", format!("failed to map response: {}", e)))?;

    let confidence = Confidence::clamped(raw.confidence)
        .map_err(|_| BridgeError::schema("confidence", "must be a finite number"))?;
    if confidence.value() != raw.confidence {
        warn!(
            raw = raw.confidence,
            clamped = confidence.value(),
            "confidence out of range, clamped"
        );
    }

    Ok(BridgeResult {
        original: original_input.to_string(),
        domain,
        analysis: AnalysisLayer {
            literal: raw.literal,
            emotional_state: raw.emotional_state,
            cultural_markers: raw.cultural_markers,
            power_signaling: raw.power_signaling,
            inferred_intent: raw.inferred_intent,
            confidence,
        },
        re_expression: ReExpression {
            message: raw.re_expression.message,
            cultural_note: raw.re_expression.cultural_note,
            alternatives: raw.re_expression.alternatives,
        },
    })
}

/// Check a parsed body against a schema descriptor
///
/// Reports the first violation found, in declaration order.
pub fn validate_shape(json: &Value, schema: &SchemaDescriptor) -> Result<(), BridgeError> {
    let obj = json
        .as_object()
        .ok_or_else(|| BridgeError::schema("$", format!("expected object, got {}", kind_of(json))))?;
    validate_fields(obj, &schema.fields, "")
}

fn validate_fields(
    obj: &serde_json::Map<String, Value>,
    fields: &[FieldSpec],
    prefix: &str,
) -> Result<(), BridgeError> {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{}.{}", prefix, field.name)
        };

        let value = match obj.get(field.name) {
            None | Some(Value::Null) => {
                return Err(BridgeError::schema(path, "missing required field"));
            }
            Some(value) => value,
        };

        match &field.kind {
            FieldKind::String => {
                let text = value.as_str().ok_or_else(|| mistyped(&path, &field.kind, value))?;
                if text.trim().is_empty() {
                    return Err(BridgeError::schema(path, "must not be empty"));
                }
            }
            FieldKind::Number => {
                let number = value.as_f64().ok_or_else(|| mistyped(&path, &field.kind, value))?;
                if !number.is_finite() {
                    return Err(BridgeError::schema(path, "must be a finite number"));
                }
            }
            FieldKind::StringArray => {
                let items = value.as_array().ok_or_else(|| mistyped(&path, &field.kind, value))?;
                for (idx, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        return Err(BridgeError::schema(
                            format!("{}[{}]", path, idx),
                            format!("expected string, got {}", kind_of(item)),
                        ));
                    }
                }
            }
            FieldKind::Object(children) => {
                let nested = value
                    .as_object()
                    .ok_or_else(|| mistyped(&path, &field.kind, value))?;
                validate_fields(nested, children, &path)?;
            }
        }
    }
    Ok(())
}

fn mistyped(path: &str, expected: &FieldKind, got: &Value) -> BridgeError {
    BridgeError::schema(
        path,
        format!("expected {}, got {}", expected.name(), kind_of(got)),
    )
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<&str, BridgeError> {
    let trimmed = response.trim();

    if !trimmed.starts_with("```") {
        return Ok(trimmed);
    }

    // Skip the opening fence (``` or ```json) and the closing fence
    let inner = trimmed.trim_start_matches('`');
    let body = match inner.split_once('\n') {
        Some((_, rest)) => rest,
        None => inner.strip_prefix("json").unwrap_or(inner),
    };
    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body).trim();

    if body.is_empty() {
        return Err(BridgeError::MalformedResponse("Empty code block".to_string()));
    }
    Ok(body)
}
