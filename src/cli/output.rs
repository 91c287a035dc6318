//! Rendering of sanitize reports as text, JSON or YAML

use anyhow::{Context, Result};

use crate::pipeline::SanitizeReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, report: &SanitizeReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .context("Failed to serialize sanitize report to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize sanitize report to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(report)),
        }
    }

    fn format_human(&self, report: &SanitizeReport) -> String {
        let mut output = String::new();

        output.push_str("\u{2713} Sanitized POM\n");
        output.push_str(&"\u{2501}".repeat(42));
        output.push_str("\n\n");

        output.push_str(&format!("Output:        {}\n", report.output.display()));
        output.push_str(&format!("Intermediate:  {}\n", report.intermediate.display()));
        output.push_str(&format!("Configuration: {}\n", report.config_source));
        output.push_str(&format!("Module:        {}\n", report.module_name));
        output.push_str(&format!("Coordinates:   {}\n\n", report.coordinates));

        output.push_str("Changes:\n");
        push_branch(&mut output, "Removed dependencies", &report.removed_dependencies);
        push_branch(&mut output, "Removed plugins", &report.removed_plugins);
        push_branch(&mut output, "Activated profiles", &report.activated_profiles);
        output.push_str(&format!(
            "\u{2514}\u{2500} Anonymized paths: {}\n",
            report.anonymized_paths
        ));

        output
    }
}

fn push_branch(output: &mut String, label: &str, values: &[String]) {
    if values.is_empty() {
        output.push_str(&format!("\u{251C}\u{2500} {}: (none)\n", label));
    } else {
        output.push_str(&format!("\u{251C}\u{2500} {}: {}\n", label, values.join(", ")));
    }
}
