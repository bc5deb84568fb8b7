//! Output formatting for topic-check.
//!
//! Provides terminal, JSON, and JUnit XML output formatters.
//!
//! All formatters produce valid output for any set of reports, including an
//! empty one.

use crate::cli::args::OutputFormat;
use crate::engine::result::{CheckReport, CheckSummary};
use serde::Serialize;

const RULE: &str = "--------------------------------------------------------------------------------";

/// The check report for one named topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicReport {
    pub topic: String,
    #[serde(flatten)]
    pub report: CheckReport,
}

impl TopicReport {
    pub fn new(topic: impl Into<String>, report: CheckReport) -> Self {
        TopicReport {
            topic: topic.into(),
            report,
        }
    }
}

/// Combined summary across every topic.
pub fn overall_summary(reports: &[TopicReport]) -> CheckSummary {
    reports
        .iter()
        .map(|r| r.report.summary())
        .fold(CheckSummary::default(), |acc, s| CheckSummary {
            passed: acc.passed + s.passed,
            failed: acc.failed + s.failed,
            total: acc.total + s.total,
        })
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format topic reports into a string
    fn format(&self, reports: &[TopicReport]) -> String;
}

/// Terminal (human-readable) formatter
pub struct TerminalFormatter {
    color: bool,
    quiet: bool,
}

impl TerminalFormatter {
    pub fn new(color: bool, quiet: bool) -> Self {
        TerminalFormatter { color, quiet }
    }

    fn colorize(&self, text: &str, color_code: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", color_code, text)
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        self.colorize(text, "32")
    }

    fn red(&self, text: &str) -> String {
        self.colorize(text, "31")
    }
}

impl OutputFormatter for TerminalFormatter {
    fn format(&self, reports: &[TopicReport]) -> String {
        let mut output = String::new();

        output.push_str(RULE);
        output.push('\n');
        output.push_str("topic-check report\n");
        output.push_str(RULE);
        output.push_str("\n\n");

        for topic in reports {
            if self.quiet && topic.report.all_passed() {
                continue;
            }

            output.push_str(&format!("TOPIC {}\n", topic.topic));

            for result in &topic.report {
                if self.quiet && result.passed {
                    continue;
                }

                if result.passed {
                    output.push_str(&format!(
                        "  {} {}: {}\n",
                        self.green("[PASS]"),
                        result.name.id(),
                        result.name.title()
                    ));
                } else {
                    output.push_str(&format!(
                        "  {} {}: {} ({})\n",
                        self.red("[FAIL]"),
                        result.name.id(),
                        result.name.title(),
                        result.message
                    ));
                }
            }

            output.push('\n');
        }

        let summary = overall_summary(reports);
        output.push_str(RULE);
        output.push('\n');
        output.push_str(&format!(
            "SUMMARY: {} topics, {} passed, {} failed\n",
            reports.len(),
            summary.passed,
            summary.failed
        ));

        let (exit_code, exit_desc) = if summary.failed > 0 {
            (1, "failures detected")
        } else {
            (0, "all checks passed")
        };
        output.push_str(&format!("Exit code: {} ({})\n", exit_code, exit_desc));
        output.push_str(RULE);

        output
    }
}

/// JSON formatter
pub struct JsonFormatter {
    pretty: bool,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    summary: CheckSummary,
    topics: Vec<JsonTopic<'a>>,
}

#[derive(Serialize)]
struct JsonTopic<'a> {
    passed: bool,
    summary: CheckSummary,
    #[serde(flatten)]
    report: &'a TopicReport,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        JsonFormatter { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, reports: &[TopicReport]) -> String {
        let document = JsonDocument {
            summary: overall_summary(reports),
            topics: reports
                .iter()
                .map(|report| JsonTopic {
                    passed: report.report.all_passed(),
                    summary: report.report.summary(),
                    report,
                })
                .collect(),
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };

        // Only string keys and plain values are serialized, which cannot fail.
        rendered.unwrap_or_else(|err| {
            tracing::error!(error = %err, "failed to serialize report");
            String::from("{}")
        })
    }
}

/// JUnit XML formatter
pub struct JunitFormatter;

impl JunitFormatter {
    pub fn new() -> Self {
        JunitFormatter
    }

    fn escape_xml(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => result.push_str("&amp;"),
                '<' => result.push_str("&lt;"),
                '>' => result.push_str("&gt;"),
                '"' => result.push_str("&quot;"),
                '\'' => result.push_str("&apos;"),
                c => result.push(c),
            }
        }
        result
    }
}

impl Default for JunitFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JunitFormatter {
    fn format(&self, reports: &[TopicReport]) -> String {
        let mut output = String::new();
        output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");

        let summary = overall_summary(reports);
        output.push_str(&format!(
            "<testsuites tests=\"{}\" failures=\"{}\" errors=\"0\">\n",
            summary.total, summary.failed
        ));

        // One test suite per topic
        for topic in reports {
            let suite = topic.report.summary();
            let suite_name = Self::escape_xml(&topic.topic);

            output.push_str(&format!(
                "  <testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"0\">\n",
                suite_name, suite.total, suite.failed
            ));

            for result in &topic.report {
                output.push_str(&format!(
                    "    <testcase name=\"{}\" classname=\"topic-check.{}\"",
                    result.name.id(),
                    suite_name
                ));

                if result.passed {
                    output.push_str(" />\n");
                } else {
                    output.push_str(">\n");
                    output.push_str(&format!(
                        "      <failure message=\"{}\">{}</failure>\n",
                        Self::escape_xml(&result.message),
                        Self::escape_xml(result.name.description())
                    ));
                    output.push_str("    </testcase>\n");
                }
            }

            output.push_str("  </testsuite>\n");
        }

        output.push_str("</testsuites>");
        output
    }
}

/// Get a formatter based on the output format
pub fn get_formatter(format: OutputFormat, color: bool, quiet: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TerminalFormatter::new(color, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Junit => Box::new(JunitFormatter::new()),
    }
}
