//! `phishcheck rules [url]` – list the pre-check rules or evaluate them.

use anyhow::{Context, Result};
use phishcheck_core::precheck::RuleChain;
use phishcheck_core::validate::validate;

use crate::cli::{EXIT_ERROR, EXIT_SAFE};

pub fn run_rules(url: Option<&str>) -> Result<i32> {
    let chain = RuleChain::builtin().context("compile built-in pre-check rules")?;
    let Some(url) = url else {
        println!("{:<20} {:<10} {}", "RULE", "TARGET", "MESSAGE");
        for rule in chain.rules() {
            println!(
                "{:<20} {:<10} {}",
                rule.name(),
                format!("{:?}", rule.target()).to_lowercase(),
                rule.message()
            );
        }
        return Ok(EXIT_SAFE);
    };

    let valid = match validate(url) {
        Ok(valid) => valid,
        Err(err) => {
            println!("{err}");
            return Ok(EXIT_ERROR);
        }
    };
    let findings = chain.evaluate(&valid);
    if findings.is_empty() {
        println!("No local findings for {valid}.");
    } else {
        for finding in findings {
            println!("{:<20} {}", finding.rule, finding.message);
        }
    }
    Ok(EXIT_SAFE)
}
