//! Output formatting for CLI

use crate::models::{Diagnostic, Diagnostics, Severity};

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

fn location(diagnostic: &Diagnostic) -> String {
    diagnostic
        .path
        .as_ref()
        .map(|path| path.to_string())
        .unwrap_or_else(|| "<schema>".to_string())
}

/// Format diagnostics in compact mode: one line per diagnostic
pub fn format_compact_output(diags: &Diagnostics) -> String {
    let mut output = String::new();
    for diagnostic in diags {
        output.push_str(&format!(
            "{}: {}: {}\n",
            severity_label(diagnostic.severity),
            location(diagnostic),
            diagnostic.summary
        ));
    }
    output.push_str(&summary_line(diags));
    output
}

/// Format diagnostics in pretty mode, including full details
pub fn format_pretty_output(diags: &Diagnostics) -> String {
    let mut output = String::new();

    for (idx, diagnostic) in diags.iter().enumerate() {
        let marker = match diagnostic.severity {
            Severity::Error => "❌",
            Severity::Warning => "⚠️ ",
        };
        output.push_str(&format!(
            "\n{} Diagnostic {} ({}): {}\n",
            marker,
            idx + 1,
            severity_label(diagnostic.severity),
            diagnostic.summary
        ));
        output.push_str(&format!("  Path: {}\n", location(diagnostic)));
        for line in diagnostic.detail.lines() {
            output.push_str(&format!("  {}\n", line));
        }
    }

    if diags.is_empty() {
        output.push_str("\n✅ All checks passed!\n");
    } else {
        output.push('\n');
        output.push_str(&summary_line(diags));
    }
    output
}

/// Format diagnostics as a JSON array
pub fn format_json_output(diags: &Diagnostics) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(diags)
}

fn summary_line(diags: &Diagnostics) -> String {
    format!(
        "{} error(s), {} warning(s)\n",
        diags.errors().count(),
        diags.warnings().count()
    )
}
