//! Local heuristic pre-check.
//!
//! An ordered chain of regex rules evaluated against a validated URL before
//! dispatch. Depending on [`PrecheckMode`] the findings are ignored, attached
//! to the verdict as advisory messages, or used to answer `Suspicious`
//! without contacting the classifier.

mod rules;

pub use rules::{builtin_rules, Rule, RuleTarget};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validate::ValidUrl;

/// How pre-check findings affect an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrecheckMode {
    /// Rules are not evaluated.
    Off,
    /// Findings are reported next to the classifier's verdict.
    #[default]
    Advisory,
    /// Any finding yields `Suspicious` and the classifier is not contacted.
    ShortCircuit,
}

impl fmt::Display for PrecheckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrecheckMode::Off => "off",
            PrecheckMode::Advisory => "advisory",
            PrecheckMode::ShortCircuit => "short-circuit",
        };
        f.write_str(s)
    }
}

impl FromStr for PrecheckMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(PrecheckMode::Off),
            "advisory" => Ok(PrecheckMode::Advisory),
            "short-circuit" | "short_circuit" => Ok(PrecheckMode::ShortCircuit),
            other => Err(format!(
                "unknown precheck mode {other:?} (expected off, advisory or short-circuit)"
            )),
        }
    }
}

/// One rule that matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule: String,
    pub message: String,
}

/// Ordered rule chain; evaluation order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct RuleChain {
    rules: Vec<Rule>,
}

impl RuleChain {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Chain of the built-in phishing heuristics.
    pub fn builtin() -> Result<Self, regex::Error> {
        Ok(Self::new(builtin_rules()?))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates every rule in order and returns the ones that matched.
    pub fn evaluate(&self, url: &ValidUrl) -> Vec<Finding> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(url))
            .map(|rule| Finding {
                rule: rule.name().to_string(),
                message: rule.message().to_string(),
            })
            .collect()
    }
}
