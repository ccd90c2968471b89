//! Output schema descriptor
//!
//! Declares the exact field set the remote response must carry. Providers
//! render it into their own wire format; the response validator walks the
//! same descriptor over the parsed body, so the two can never drift.

/// Primitive kind of a declared field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Non-empty text
    String,
    /// Finite number
    Number,
    /// Ordered list of text entries, possibly empty
    StringArray,
    /// Nested object with its own required fields
    Object(Vec<FieldSpec>),
}

impl FieldKind {
    /// Human-readable kind name, used in violation messages
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::StringArray => "array of strings",
            FieldKind::Object(_) => "object",
        }
    }
}

/// One required field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Wire name of the field
    pub name: &'static str,
    /// Expected kind
    pub kind: FieldKind,
    /// Hint passed to the remote model
    pub description: &'static str,
}

impl FieldSpec {
    /// Declare a field
    pub fn new(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
        }
    }
}

/// Top-level object contract; every declared field is required
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDescriptor {
    /// Required fields, in declaration order
    pub fields: Vec<FieldSpec>,
}

impl SchemaDescriptor {
    /// Contract for the analysis-and-rewrite response
    pub fn bridge() -> Self {
        Self {
            fields: vec![
                FieldSpec::new("literal", FieldKind::String, "Literal translation of facts."),
                FieldSpec::new(
                    "emotionalState",
                    FieldKind::String,
                    "Primary emotions: fear, anger, pride, panic, etc.",
                ),
                FieldSpec::new(
                    "culturalMarkers",
                    FieldKind::StringArray,
                    "Cultural patterns observed (e.g., face-saving, direct aggression, honor-based rhetoric).",
                ),
                FieldSpec::new(
                    "powerSignaling",
                    FieldKind::String,
                    "How the speaker is trying to project power or vulnerability.",
                ),
                FieldSpec::new(
                    "inferredIntent",
                    FieldKind::String,
                    "The strategic outcome the speaker actually wants.",
                ),
                FieldSpec::new("confidence", FieldKind::Number, "Confidence score 0 to 1."),
                FieldSpec::new(
                    "reExpression",
                    FieldKind::Object(vec![
                        FieldSpec::new(
                            "message",
                            FieldKind::String,
                            "The re-expressed message for the target culture.",
                        ),
                        FieldSpec::new(
                            "culturalNote",
                            FieldKind::String,
                            "Why this re-expression works for the receiver.",
                        ),
                        FieldSpec::new(
                            "alternatives",
                            FieldKind::StringArray,
                            "Other possible interpretations.",
                        ),
                    ]),
                    "The re-expressed message and its rationale.",
                ),
            ],
        }
    }

    /// Look up a top-level field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Dotted paths of every declared leaf field
    pub fn paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_paths("", &self.fields, &mut out);
        out
    }
}

fn collect_paths(prefix: &str, fields: &[FieldSpec], out: &mut Vec<String>) {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{}.{}", prefix, field.name)
        };
        match &field.kind {
            FieldKind::Object(children) => collect_paths(&path, children, out),
            _ => out.push(path),
        }
    }
}
