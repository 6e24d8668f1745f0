//! Single-rule matching and template substitution.

use attrmap_model::PatternType;
use attrmap_rules::Rule;
use regex::{Captures, Regex};
use tracing::warn;

/// Value and unit produced by one matching rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub value: String,
    pub unit: String,
}

/// Evaluates `rule` against a supplier value.
///
/// Returns `None` when the rule does not match or the input is empty.
pub fn match_value(rule: &Rule, input: &str) -> Option<MatchOutcome> {
    if input.is_empty() {
        return None;
    }
    match rule.pattern_type {
        PatternType::Exact => {
            let matched = rule.value_pattern.is_empty()
                || input.trim().to_lowercase() == rule.value_pattern.trim().to_lowercase();
            matched.then(|| literal_outcome(rule, input))
        }
        PatternType::Contains => input
            .to_lowercase()
            .contains(&rule.value_pattern.to_lowercase())
            .then(|| literal_outcome(rule, input)),
        PatternType::Regex => {
            let regex = rule.value_regex.as_ref()?;
            regex_outcome(rule, regex, input)
        }
    }
}

/// Evaluates the title regex of `rule` against a product title.
///
/// Only rules with a compiled title regex can match. An empty templated
/// value is returned as-is; the caller decides whether to keep it.
pub fn match_title(rule: &Rule, title: &str) -> Option<MatchOutcome> {
    let regex = rule.title_regex.as_ref()?;
    let captures = regex.captures(title)?;
    let value = substitute_captures(&rule.value_template, &captures);
    let unit = substitute_captures(&rule.unit_template, &captures);
    report_unresolved(rule, &value, &unit);
    Some(MatchOutcome { value, unit })
}

/// Replaces `$1`, `$2`, ... with the matching capture groups.
///
/// Groups that did not participate in the match, or captured an empty
/// string, leave their placeholder in place.
pub fn substitute_captures(template: &str, captures: &Captures<'_>) -> String {
    let mut out = template.to_string();
    if out.is_empty() {
        return out;
    }
    for index in 1..captures.len() {
        if let Some(group) = captures.get(index)
            && !group.as_str().is_empty()
        {
            out = out.replace(&format!("${index}"), group.as_str());
        }
    }
    out
}

/// True when `text` still carries a `$<digit>` placeholder.
pub fn has_placeholder(text: &str) -> bool {
    text.as_bytes()
        .windows(2)
        .any(|pair| pair[0] == b'$' && pair[1].is_ascii_digit())
}

fn literal_outcome(rule: &Rule, input: &str) -> MatchOutcome {
    let value = if rule.value_template.is_empty() {
        input.to_string()
    } else {
        rule.value_template.clone()
    };
    MatchOutcome {
        value,
        unit: rule.unit_template.clone(),
    }
}

fn regex_outcome(rule: &Rule, regex: &Regex, input: &str) -> Option<MatchOutcome> {
    let captures = regex.captures(input)?;
    let mut value = substitute_captures(&rule.value_template, &captures);
    let unit = substitute_captures(&rule.unit_template, &captures);
    report_unresolved(rule, &value, &unit);
    if value.is_empty() {
        value = input.to_string();
    }
    Some(MatchOutcome { value, unit })
}

fn report_unresolved(rule: &Rule, value: &str, unit: &str) {
    if has_placeholder(value) || has_placeholder(unit) {
        warn!(
            line = rule.line,
            target = %rule.target,
            value,
            unit,
            "template placeholder left unresolved"
        );
    }
}
