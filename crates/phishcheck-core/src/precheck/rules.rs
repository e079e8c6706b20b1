//! Built-in heuristic rules.

use regex::Regex;

use crate::validate::ValidUrl;

/// Which part of the URL a rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTarget {
    /// Normalized host (lowercase, punycode, trailing dot removed).
    Host,
    /// Trimmed text as the user typed it.
    FullText,
}

/// A named predicate plus the message reported when it matches.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    target: RuleTarget,
    pattern: Regex,
    message: String,
}

impl Rule {
    pub fn new(
        name: impl Into<String>,
        target: RuleTarget,
        pattern: &str,
        message: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            target,
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn target(&self) -> RuleTarget {
        self.target
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn matches(&self, url: &ValidUrl) -> bool {
        match self.target {
            RuleTarget::Host => {
                let host = url.host();
                self.pattern.is_match(host.strip_suffix('.').unwrap_or(host))
            }
            RuleTarget::FullText => self.pattern.is_match(url.as_str()),
        }
    }
}

/// The built-in chain, in evaluation order.
pub fn builtin_rules() -> Result<Vec<Rule>, regex::Error> {
    Ok(vec![
        Rule::new(
            "number-letter",
            RuleTarget::FullText,
            r"(?i)[0-9]+[a-z]",
            "Contains suspicious number-letter combinations",
        )?,
        Rule::new(
            "suspicious-tld",
            RuleTarget::Host,
            r"(?i)\.(tk|ml|ga|cf|gq)$",
            "Uses suspicious top-level domain",
        )?,
        Rule::new(
            "brand-impersonation",
            RuleTarget::Host,
            r"(?i)(?:paypal|amazon|google|microsoft|apple).*\.[a-z]{2,3}\.[a-z]{2}$",
            "Potential impersonation of known brand",
        )?,
        Rule::new(
            "long-token",
            RuleTarget::FullText,
            r"(?i)[a-z0-9]{25,}",
            "Contains unusually long string of characters",
        )?,
        Rule::new(
            "security-terms",
            RuleTarget::Host,
            r"(?i)(?:secure|login|signin|banking|account).*\.[a-z]{2,3}\.[a-z]{2}$",
            "Uses suspicious security-related terms",
        )?,
        Rule::new(
            "cyrillic",
            RuleTarget::FullText,
            r"\p{Cyrillic}",
            "Contains Cyrillic characters",
        )?,
    ])
}
