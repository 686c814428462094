// src/schedule/constraint_set.rs
use std::{fmt, fs, path::Path};

use super::{Constraint, ConstraintError, ConstraintSetError, TimeWindow};

/// Where a rule came from; used to point at the offending input on error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleOrigin {
    File { path: String, line: usize },
    Extra,
}

impl fmt::Display for RuleOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleOrigin::File { path, line } => write!(f, "{path}:{line}"),
            RuleOrigin::Extra => f.write_str("extra rule"),
        }
    }
}

/// All schedule rules a section must satisfy at once.
/// Built once, read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    /// Rules file (one rule per non-blank line) followed by the optional extra rule.
    /// Any rule that fails to parse fails the whole set.
    pub fn load(rules_file: Option<&Path>, extra: Option<&str>) -> Result<Self, ConstraintSetError> {
        let mut constraints = Vec::new();

        if let Some(path) = rules_file {
            let text = fs::read_to_string(path).map_err(|source| ConstraintSetError::Read {
                path: path.display().to_string(),
                source,
            })?;
            constraints = parse_rules(&text, &path.display().to_string())?;
        }

        if let Some(extra) = extra.map(str::trim).filter(|s| !s.is_empty()) {
            let c = extra.parse().map_err(|source| ConstraintSetError::Rule {
                origin: RuleOrigin::Extra,
                source,
            })?;
            constraints.push(c);
        }

        Ok(Self { constraints })
    }

    pub fn from_constraints(constraints: Vec<Constraint>) -> Self {
        Self { constraints }
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn len(&self) -> usize { self.constraints.len() }
    pub fn is_empty(&self) -> bool { self.constraints.is_empty() }

    /// True iff no rule rejects a meeting on `days` during `window`.
    pub fn satisfies(&self, days: &str, window: &TimeWindow) -> bool {
        self.constraints
            .iter()
            .all(|c| is_not_violated(days, window, c))
    }
}

pub fn is_not_violated(days: &str, window: &TimeWindow, constraint: &Constraint) -> bool {
    constraint.is_not_violated(days, window)
}

/// Parse rules text; `source` names the input in error messages.
pub fn parse_rules(text: &str, source: &str) -> Result<Vec<Constraint>, ConstraintSetError> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_no, line)| {
            line.parse::<Constraint>().map_err(|source_err: ConstraintError| ConstraintSetError::Rule {
                origin: RuleOrigin::File { path: s!(source), line: line_no },
                source: source_err,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_and_padding_are_ignored() {
        let rules = parse_rules("\n  -Mo10:30-13:30  \n\n+Tu9:00-10:00\n   \n", "rules.txt").unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].to_string(), "-Mo10:30-13:30");
        assert_eq!(rules[1].to_string(), "+Tu9:00-10:00");
    }

    #[test]
    fn first_bad_line_is_reported_with_position() {
        let err = parse_rules("-Mo10:30-13:30\n\n*We9:00-10:00\n-Sa1:00-2:00", "rules.txt").unwrap_err();
        match err {
            ConstraintSetError::Rule { origin, source } => {
                assert_eq!(origin, RuleOrigin::File { path: s!("rules.txt"), line: 3 });
                assert!(matches!(source, ConstraintError::InvalidPolarity(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_set_accepts_everything() {
        let set = ConstraintSet::default();
        let w = TimeWindow::new(0, 1439).unwrap();
        assert!(set.satisfies("MoTuWeThFr", &w));
    }
}
