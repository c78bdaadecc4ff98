//! Environment checklist for a local AutoCompare install.
//!
//! Every probe runs independently and reports pass, warn or fail. The
//! checklist passes only when every probe passes.

pub mod probes;

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Pass,
    Warn,
    Fail,
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProbeStatus::Pass => "OK",
            ProbeStatus::Warn => "WARN",
            ProbeStatus::Fail => "FAIL",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub status: ProbeStatus,
    pub details: Vec<String>,
}

impl ProbeOutcome {
    pub fn pass(detail: impl Into<String>) -> Self {
        Self::new(ProbeStatus::Pass, detail)
    }

    pub fn warn(detail: impl Into<String>) -> Self {
        Self::new(ProbeStatus::Warn, detail)
    }

    pub fn fail(detail: impl Into<String>) -> Self {
        Self::new(ProbeStatus::Fail, detail)
    }

    fn new(status: ProbeStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            details: vec![format!("[{}] {}", status, detail.into())],
        }
    }

    /// Adds an indented follow-up line, e.g. how to fix the problem.
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.details.push(format!("   {}", hint.into()));
        self
    }

    pub fn is_pass(&self) -> bool {
        self.status == ProbeStatus::Pass
    }
}

#[async_trait]
pub trait Probe: Send + Sync {
    fn name(&self) -> &str;
    /// Short progress line shown before the probe runs.
    fn describe(&self) -> String {
        format!("Checking {}...", self.name())
    }
    async fn check(&self) -> ProbeOutcome;
}

pub struct Checklist {
    probes: Vec<Box<dyn Probe>>,
}

impl Checklist {
    pub fn new(probes: Vec<Box<dyn Probe>>) -> Self {
        Self { probes }
    }

    /// Runs the probes in order, streaming each probe's details to stdout.
    pub async fn run(&self) -> ChecklistReport {
        let mut entries = Vec::with_capacity(self.probes.len());

        for probe in &self.probes {
            println!("\n{}", probe.describe());
            let outcome = probe.check().await;
            for line in &outcome.details {
                println!("{}", line);
            }
            tracing::debug!(probe = probe.name(), status = %outcome.status, "probe finished");
            entries.push((probe.name().to_string(), outcome));
        }

        ChecklistReport { entries }
    }
}

#[derive(Debug, Clone)]
pub struct ChecklistReport {
    pub entries: Vec<(String, ProbeOutcome)>,
}

impl ChecklistReport {
    pub fn passed(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_pass()).count()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn exit_code(&self) -> i32 {
        if self.passed() == self.total() {
            0
        } else {
            1
        }
    }

    pub fn summary(&self) -> String {
        let rule = "=".repeat(60);
        let mut out = format!("\n{}\nValidation Summary\n{}\n", rule, rule);

        for (name, outcome) in &self.entries {
            let label = match outcome.status {
                ProbeStatus::Pass => "[PASS]",
                ProbeStatus::Warn => "[WARN]",
                ProbeStatus::Fail => "[FAIL]",
            };
            out.push_str(&format!("{}: {}\n", label, name));
        }

        out.push_str(&format!("\nPassed: {}/{} checks\n", self.passed(), self.total()));
        if self.exit_code() == 0 {
            out.push_str("\n[SUCCESS] All checks passed! Your setup looks good.\n");
        } else {
            out.push_str("\n[INFO] Some checks failed or returned warnings.\n");
            out.push_str("   Review the messages above and fix any issues.\n");
        }
        out
    }
}

/// Result of running an external command to read its version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandProbe {
    Output(String),
    NotFound,
    TimedOut,
    Failed(String),
}

/// Runs `program args...` and captures stdout, bounded by `timeout`.
pub async fn run_command(program: &str, args: &[&str], timeout: Duration) -> CommandProbe {
    let mut command = tokio::process::Command::new(program);
    command.args(args).kill_on_drop(true);

    match tokio::time::timeout(timeout, command.output()).await {
        Err(_) => CommandProbe::TimedOut,
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => CommandProbe::NotFound,
        Ok(Err(e)) => CommandProbe::Failed(e.to_string()),
        Ok(Ok(output)) if output.status.success() => {
            CommandProbe::Output(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        Ok(Ok(output)) => CommandProbe::Failed(format!(
            "exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe {
        name: &'static str,
        status: ProbeStatus,
    }

    #[async_trait]
    impl Probe for FixedProbe {
        fn name(&self) -> &str {
            self.name
        }

        async fn check(&self) -> ProbeOutcome {
            match self.status {
                ProbeStatus::Pass => ProbeOutcome::pass("fine"),
                ProbeStatus::Warn => ProbeOutcome::warn("hmm").hint("do something"),
                ProbeStatus::Fail => ProbeOutcome::fail("broken"),
            }
        }
    }

    fn fixed(name: &'static str, status: ProbeStatus) -> Box<dyn Probe> {
        Box::new(FixedProbe { name, status })
    }

    #[tokio::test]
    async fn test_all_pass_exits_zero() {
        let checklist = Checklist::new(vec![
            fixed("One", ProbeStatus::Pass),
            fixed("Two", ProbeStatus::Pass),
        ]);
        let report = checklist.run().await;

        assert_eq!(report.passed(), 2);
        assert_eq!(report.exit_code(), 0);
        assert!(report.summary().contains("Passed: 2/2 checks"));
        assert!(report.summary().contains("[SUCCESS]"));
    }

    #[tokio::test]
    async fn test_warning_alone_fails_checklist() {
        let checklist = Checklist::new(vec![
            fixed("One", ProbeStatus::Pass),
            fixed("Two", ProbeStatus::Warn),
            fixed("Three", ProbeStatus::Fail),
        ]);
        let report = checklist.run().await;

        assert_eq!(report.passed(), 1);
        assert_eq!(report.exit_code(), 1);
        let summary = report.summary();
        assert!(summary.contains("[PASS]: One"));
        assert!(summary.contains("[WARN]: Two"));
        assert!(summary.contains("[FAIL]: Three"));
        assert!(summary.contains("Passed: 1/3 checks"));
    }

    #[test]
    fn test_outcome_detail_lines() {
        let outcome = ProbeOutcome::warn("Chromium browser may not be installed")
            .hint("Install Chromium or set CHROME_PATH");
        assert_eq!(outcome.details[0], "[WARN] Chromium browser may not be installed");
        assert_eq!(outcome.details[1], "   Install Chromium or set CHROME_PATH");
        assert!(!outcome.is_pass());
    }

    #[tokio::test]
    async fn test_run_command_missing_program() {
        let probe = run_command(
            "autocompare-no-such-binary",
            &["--version"],
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(probe, CommandProbe::NotFound);
    }
}
