//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use parley_domain::{BridgeResult, ConflictDomain, RequestPayload, SchemaDescriptor};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a bridge result.
    pub fn format_result(&self, result: &BridgeResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Table => Ok(self.format_result_table(result)),
            OutputFormat::Quiet => Ok(result.re_expression.message.clone()),
        }
    }

    fn format_result_table(&self, result: &BridgeResult) -> String {
        let analysis = &result.analysis;
        let confidence = format!("{}%", analysis.confidence.percent());
        let confidence = if analysis.confidence.is_high() {
            self.colorize(&confidence, "green")
        } else {
            self.colorize(&confidence, "yellow")
        };
        let markers = if analysis.cultural_markers.is_empty() {
            "-".to_string()
        } else {
            analysis.cultural_markers.join(", ")
        };

        let mut builder = Builder::default();
        builder.push_record(["Analysis", ""]);
        builder.push_record(["Domain", result.domain.label()]);
        builder.push_record(["Literal", analysis.literal.as_str()]);
        builder.push_record(["Emotional state", analysis.emotional_state.as_str()]);
        builder.push_record(["Cultural markers", markers.as_str()]);
        builder.push_record(["Power signaling", analysis.power_signaling.as_str()]);
        builder.push_record(["Inferred intent", analysis.inferred_intent.as_str()]);
        builder.push_record(["Confidence", confidence.as_str()]);
        let analysis_table = styled(builder);

        let re = &result.re_expression;
        let mut builder = Builder::default();
        builder.push_record(["Re-expression", ""]);
        builder.push_record(["Message", re.message.as_str()]);
        builder.push_record(["Cultural note", re.cultural_note.as_str()]);
        for (i, alt) in re.alternatives.iter().enumerate() {
            builder.push_record([format!("Alternative {}", i + 1), alt.clone()]);
        }
        let re_table = styled(builder);

        format!(
            "{}\n{}\n\n{}",
            self.colorize(&format!("Original: {}", result.original), "cyan"),
            analysis_table,
            re_table
        )
    }

    /// Format the domain catalogue.
    pub fn format_domains(&self) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let domains: Vec<serde_json::Value> = ConflictDomain::ALL
                    .iter()
                    .map(|d| {
                        serde_json::json!({
                            "key": d.key(),
                            "label": d.label(),
                            "description": d.description(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&domains)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Key", "Label", "Description"]);
                for domain in ConflictDomain::ALL {
                    builder.push_record([domain.key(), domain.label(), domain.description()]);
                }
                Ok(styled(builder))
            }
            OutputFormat::Quiet => Ok(ConflictDomain::ALL
                .iter()
                .map(|d| d.key())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the response schema as the provider renders it.
    pub fn format_schema(&self, schema: &SchemaDescriptor) -> Result<String> {
        match self.format {
            OutputFormat::Quiet => Ok(schema.paths().join("\n")),
            _ => Ok(serde_json::to_string_pretty(
                &parley_llm::gemini::render_schema(schema),
            )?),
        }
    }

    /// Format a compiled request.
    pub fn format_request(&self, request: &RequestPayload) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "systemInstruction": request.system_instruction,
                "userContent": request.user_content,
                "responseSchema": parley_llm::gemini::render_schema(&request.response_schema),
            }))?),
            OutputFormat::Table => Ok(format!(
                "{}\n{}\n\n{}\n{}",
                self.colorize("System instruction:", "cyan"),
                request.system_instruction,
                self.colorize("User content:", "cyan"),
                request.user_content
            )),
            OutputFormat::Quiet => Ok(request.system_instruction.clone()),
        }
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_domain::{AnalysisLayer, Confidence, ReExpression};

    fn create_test_result() -> BridgeResult {
        BridgeResult {
            original: "We will not stand idle.".to_string(),
            domain: ConflictDomain::International,
            analysis: AnalysisLayer {
                literal: "The speaker will respond.".to_string(),
                emotional_state: "resolve".to_string(),
                cultural_markers: vec!["collective voice".to_string()],
                power_signaling: "deterrence".to_string(),
                inferred_intent: "discourage escalation".to_string(),
                confidence: Confidence::new(0.85).unwrap(),
            },
            re_expression: ReExpression {
                message: "We are prepared to respond.".to_string(),
                cultural_note: "Removes the implied threat.".to_string(),
                alternatives: vec!["We cannot ignore this.".to_string()],
            },
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_result(&create_test_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["reExpression"]["message"], "We are prepared to respond.");
        assert_eq!(value["analysis"]["confidence"], 0.85);
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_result(&create_test_result()).unwrap();
        assert_eq!(output, "We are prepared to respond.");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_result(&create_test_result()).unwrap();
        assert!(output.contains("Original: We will not stand idle."));
        assert!(output.contains("International/Geopolitical"));
        assert!(output.contains("85%"));
        assert!(output.contains("Alternative 1"));
        assert!(output.contains("collective voice"));
    }

    #[test]
    fn test_table_empty_markers() {
        let mut result = create_test_result();
        result.analysis.cultural_markers.clear();
        result.re_expression.alternatives.clear();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_result(&result).unwrap();
        assert!(!output.contains("Alternative 1"));
    }

    #[test]
    fn test_domains_listing() {
        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .format_domains()
            .unwrap();
        assert_eq!(quiet.lines().count(), 4);
        assert!(quiet.contains("professional"));

        let table = Formatter::new(OutputFormat::Table, false)
            .format_domains()
            .unwrap();
        assert!(table.contains("Media/Propaganda"));
    }

    #[test]
    fn test_schema_quiet_lists_paths() {
        let output = Formatter::new(OutputFormat::Quiet, false)
            .format_schema(&SchemaDescriptor::bridge())
            .unwrap();
        assert!(output.lines().any(|l| l == "reExpression.message"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.info("Bridging context..."), "ℹ Bridging context...");
    }
}
