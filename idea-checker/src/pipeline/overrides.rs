//! Override rules for the generic-category classification
//!
//! Rules run in a fixed order over a running classification value. Each rule
//! is a pure `(idea, current) -> new` function. Rules can only clear a
//! generic classification, never set one.

use super::heuristics;
use tracing::info;

/// One named override rule
#[derive(Clone, Copy)]
pub struct OverrideRule {
    pub name: &'static str,
    pub apply: fn(&str, bool) -> bool,
}

fn gibberish_symbols(idea: &str, generic: bool) -> bool {
    generic && !heuristics::is_gibberish_symbols(idea)
}

fn gibberish_alpha_ratio(idea: &str, generic: bool) -> bool {
    generic && !heuristics::is_gibberish_alpha_ratio(idea)
}

fn absurd_or_composite(idea: &str, generic: bool) -> bool {
    generic && !heuristics::is_absurd_or_composite(idea)
}

/// Rules applied after the generic classification, in order
pub const GENERIC_OVERRIDES: &[OverrideRule] = &[
    OverrideRule {
        name: "gibberish_symbols",
        apply: gibberish_symbols,
    },
    OverrideRule {
        name: "gibberish_alpha_ratio",
        apply: gibberish_alpha_ratio,
    },
    OverrideRule {
        name: "absurd_or_composite",
        apply: absurd_or_composite,
    },
];

/// Result of running the override rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideOutcome {
    pub generic: bool,
    /// Names of the rules that changed the value
    pub fired: Vec<&'static str>,
}

/// Run `rules` over `classified` and log each rule that changes the value
pub fn apply_overrides(rules: &[OverrideRule], idea: &str, classified: bool) -> OverrideOutcome {
    let mut generic = classified;
    let mut fired = Vec::new();

    for rule in rules {
        let next = (rule.apply)(idea, generic);
        if next != generic {
            info!(rule = rule.name, from = generic, to = next, "Override rule fired");
            fired.push(rule.name);
        }
        generic = next;
    }

    OverrideOutcome { generic, fired }
}
