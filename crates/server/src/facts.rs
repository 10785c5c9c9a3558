//! Turning generator output into a playable round.

use rand::{seq::SliceRandom, Rng};
use shared::domain::Fact;

/// Parses `(sentence @ False) | (sentence @ True) | ...`. Items that do not
/// contain exactly one `@` or have an empty sentence are skipped.
pub fn parse_statements(raw: &str) -> Vec<Fact> {
    raw.trim()
        .split('|')
        .filter_map(|item| {
            let mut parts = item.split('@');
            let (sentence, verdict) = match (parts.next(), parts.next(), parts.next()) {
                (Some(sentence), Some(verdict), None) => (sentence, verdict),
                _ => return None,
            };

            let sentence = sentence.trim().trim_start_matches('(').trim();
            if sentence.is_empty() {
                return None;
            }
            let verdict = verdict.trim().trim_end_matches(')').trim();
            Some(Fact::new(sentence, verdict.eq_ignore_ascii_case("true")))
        })
        .collect()
}

pub fn shuffle_facts<R: Rng + ?Sized>(facts: &mut [Fact], rng: &mut R) {
    facts.shuffle(rng);
}

/// Index of the first false statement.
pub fn fake_index(facts: &[Fact]) -> Option<usize> {
    facts.iter().position(|fact| !fact.is_true)
}

#[cfg(test)]
#[path = "tests/facts_tests.rs"]
mod tests;
