use crate::error::{FixError, RuleError};
use crate::matcher::Matcher;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct PatchRule {
    pub matcher: Matcher,
    pub replacement: String,
}

impl PatchRule {
    pub fn literal(search: impl Into<String>, replacement: impl Into<String>) -> Result<Self, RuleError> {
        Ok(Self {
            matcher: Matcher::literal(search)?,
            replacement: replacement.into(),
        })
    }

    pub fn pattern(search: &str, replacement: impl Into<String>) -> Result<Self, RuleError> {
        Ok(Self {
            matcher: Matcher::pattern(search)?,
            replacement: replacement.into(),
        })
    }

    pub fn apply(&self, text: &str) -> (String, usize) {
        self.matcher.replace_all(text, &self.replacement)
    }
}

/// Ordered rules for one file. Later rules see the output of earlier ones.
#[derive(Debug, Clone)]
pub struct FilePatchSet {
    pub path: PathBuf,
    pub rules: Vec<PatchRule>,
}

impl FilePatchSet {
    pub fn new(path: impl Into<PathBuf>, rules: Vec<PatchRule>) -> Self {
        Self {
            path: path.into(),
            rules,
        }
    }
}

#[derive(Debug)]
pub enum PatchStatus {
    Changed,
    Unchanged,
    Errored(FixError),
}

#[derive(Debug)]
pub struct PatchOutcome {
    pub path: PathBuf,
    pub status: PatchStatus,
    pub replacements: usize,
    pub dry_run: bool,
}

impl PatchOutcome {
    pub fn changed(path: &Path, replacements: usize, dry_run: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            status: PatchStatus::Changed,
            replacements,
            dry_run,
        }
    }

    pub fn unchanged(path: &Path, dry_run: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            status: PatchStatus::Unchanged,
            replacements: 0,
            dry_run,
        }
    }

    pub fn errored(path: &Path, error: FixError, dry_run: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            status: PatchStatus::Errored(error),
            replacements: 0,
            dry_run,
        }
    }

    pub fn is_changed(&self) -> bool {
        matches!(self.status, PatchStatus::Changed)
    }

    pub fn error(&self) -> Option<&FixError> {
        match &self.status {
            PatchStatus::Errored(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.status {
            PatchStatus::Changed if self.dry_run => write!(f, "Would fix: {}", path),
            PatchStatus::Changed => write!(f, "Fixed: {}", path),
            PatchStatus::Unchanged => write!(f, "No changes: {}", path),
            PatchStatus::Errored(e) => write!(f, "ERROR fixing {}: {}", path, e),
        }
    }
}

#[derive(Debug, Default)]
pub struct Summary {
    pub total: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub errored: usize,
    pub outcomes: Vec<PatchOutcome>,
}

impl Summary {
    pub fn record(&mut self, outcome: PatchOutcome) {
        self.total += 1;
        match outcome.status {
            PatchStatus::Changed => self.changed += 1,
            PatchStatus::Unchanged => self.unchanged += 1,
            PatchStatus::Errored(_) => self.errored += 1,
        }
        self.outcomes.push(outcome);
    }

    pub fn has_errors(&self) -> bool {
        self.errored > 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Summary ---")?;
        writeln!(f, "Total:     {}", self.total)?;
        writeln!(f, "Changed:   {}", self.changed)?;
        writeln!(f, "Unchanged: {}", self.unchanged)?;
        write!(f, "Errored:   {}", self.errored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_chain_applies_in_order() {
        let rules = [
            PatchRule::literal("A", "B").unwrap(),
            PatchRule::literal("B", "C").unwrap(),
        ];
        let out = rules
            .iter()
            .fold("A".to_string(), |text, rule| rule.apply(&text).0);
        assert_eq!(out, "C");
    }

    #[test]
    fn test_outcome_status_lines() {
        let path = Path::new("docs/rules.md");
        assert_eq!(
            PatchOutcome::changed(path, 1, false).to_string(),
            "Fixed: docs/rules.md"
        );
        assert_eq!(
            PatchOutcome::changed(path, 1, true).to_string(),
            "Would fix: docs/rules.md"
        );
        assert_eq!(
            PatchOutcome::unchanged(path, false).to_string(),
            "No changes: docs/rules.md"
        );

        let err = FixError::FileNotFound {
            path: path.to_path_buf(),
        };
        assert_eq!(
            PatchOutcome::errored(path, err, false).to_string(),
            "ERROR fixing docs/rules.md: file not found: docs/rules.md"
        );
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = Summary::default();
        summary.record(PatchOutcome::changed(Path::new("a.md"), 2, false));
        summary.record(PatchOutcome::unchanged(Path::new("b.md"), false));
        summary.record(PatchOutcome::errored(
            Path::new("c.md"),
            FixError::Encoding {
                path: PathBuf::from("c.md"),
            },
            false,
        ));

        assert_eq!(summary.total, 3);
        assert_eq!(summary.changed, 1);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.errored, 1);
        assert!(summary.has_errors());
        assert!(summary.outcomes[2].error().is_some());

        let text = summary.to_string();
        assert!(text.starts_with("--- Summary ---"));
        assert!(text.contains("Errored:   1"));
    }
}
