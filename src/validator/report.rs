use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

const TITLE: &str = "NDskl Validation Report";

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check passed, but something looks off
    Warning(String),
    /// Check failed
    Failed(String),
}

impl CheckStatus {
    fn symbol(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "✓",
            CheckStatus::Warning(_) => "⚠",
            CheckStatus::Failed(_) => "✗",
        }
    }

    fn tone(&self) -> Tone {
        match self {
            CheckStatus::Ok => Tone::Good,
            CheckStatus::Warning(_) => Tone::Warn,
            CheckStatus::Failed(_) => Tone::Bad,
        }
    }
}

/// Named check result
#[derive(Debug, Clone)]
pub struct ValidationCheck {
    /// Name of the check
    pub name: String,
    /// Result status of the check
    pub status: CheckStatus,
}

impl ValidationCheck {
    pub(crate) fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Ok,
        }
    }

    pub(crate) fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
        }
    }

    pub(crate) fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }

    /// `ok` when `condition` holds, `failed` with `message` otherwise
    pub(crate) fn require(
        name: impl Into<String>,
        condition: bool,
        message: impl FnOnce() -> String,
    ) -> Self {
        if condition {
            Self::ok(name)
        } else {
            Self::failed(name, message())
        }
    }
}

/// Validation report for one NDskl file
#[derive(Debug)]
pub struct ValidationReport {
    /// Individual check results, in the order they ran
    pub checks: Vec<ValidationCheck>,
    /// Path of the file that was validated
    pub file_path: String,
}

impl ValidationReport {
    /// Create an empty report for `file_path`
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            checks: Vec::new(),
            file_path: file_path.into(),
        }
    }

    /// Add a check result
    pub fn add_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// Look up a check by name
    pub fn check(&self, name: &str) -> Option<&ValidationCheck> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// True if any check failed
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// True if any check produced a warning
    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    /// Number of passed checks
    pub fn success_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Ok))
    }

    /// Number of warnings
    pub fn warning_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Warning(_)))
    }

    /// Number of failures
    pub fn failure_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&CheckStatus) -> bool) -> usize {
        self.checks.iter().filter(|c| pred(&c.status)).count()
    }

    /// Format the report with colors (plain text without `colorized_output`)
    pub fn format_colored(&self) -> String {
        self.render(true)
    }

    fn render(&self, colored: bool) -> String {
        let mut out = String::new();
        out.push_str(&paint(TITLE, Tone::Heading, colored));
        out.push('\n');
        out.push_str(&paint(&"=".repeat(TITLE.len()), Tone::Heading, colored));
        out.push('\n');
        out.push_str(&format!("File: {}\n\n", self.file_path));

        for check in &self.checks {
            let tone = check.status.tone();
            out.push_str(&format!(
                "[{}] {}",
                check.status.symbol(),
                paint(&check.name, tone, colored)
            ));
            let (label, msg) = match &check.status {
                CheckStatus::Ok => {
                    out.push('\n');
                    continue;
                }
                CheckStatus::Warning(msg) => ("WARNING", msg),
                CheckStatus::Failed(msg) => ("FAILED", msg),
            };
            out.push_str(&format!(" - {}: {}\n", paint(label, tone, colored), msg));
        }

        out.push_str(&format!(
            "\nSummary: {} passed, {} warnings, {} failed\n\n",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        ));

        let (verdict, tone) = if self.has_failures() {
            ("Validation FAILED", Tone::Bad)
        } else if self.has_warnings() {
            ("Validation PASSED with warnings", Tone::Warn)
        } else {
            ("Validation PASSED", Tone::Good)
        };
        out.push_str(&paint(verdict, tone, colored));
        out.push('\n');
        out
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Heading,
    Good,
    Warn,
    Bad,
}

#[cfg(feature = "colorized_output")]
fn paint(text: &str, tone: Tone, colored: bool) -> String {
    if !colored {
        return text.to_string();
    }
    let styled = style(text);
    match tone {
        Tone::Heading => styled.bold().cyan(),
        Tone::Good => styled.green(),
        Tone::Warn => styled.yellow(),
        Tone::Bad => styled.red().bold(),
    }
    .to_string()
}

#[cfg(not(feature = "colorized_output"))]
fn paint(text: &str, _tone: Tone, _colored: bool) -> String {
    text.to_string()
}
