//! Ordered rule tables.
//!
//! A table is a list of `(predicate, outcome)` pairs evaluated top to bottom;
//! the first predicate that holds decides the outcome. Priority between
//! overlapping conditions is therefore the row order of the table.

pub struct Rule<I, O> {
    pub predicate: fn(&I) -> bool,
    pub outcome: O,
}

/// Outcome of the first matching rule, or `fallback` when none matches.
pub fn first_match<I, O: Copy>(rules: &[Rule<I, O>], input: &I, fallback: O) -> O {
    rules
        .iter()
        .find(|rule| (rule.predicate)(input))
        .map(|rule| rule.outcome)
        .unwrap_or(fallback)
}

/// Picks between two phrases on a single condition.
pub fn pick(condition: bool, when_true: &'static str, when_false: &'static str) -> &'static str {
    if condition {
        when_true
    } else {
        when_false
    }
}
