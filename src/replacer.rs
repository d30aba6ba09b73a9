use crate::config::ReplacementRule;
use std::borrow::Cow;

/// Occurrence counts keyed by rule name, kept in rule order.
///
/// The same type serves for a single file and for the run-wide total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceCounts {
    entries: Vec<(String, usize)>,
}

impl OccurrenceCounts {
    /// Creates an empty set of counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates counts with every rule present at zero.
    pub fn zeroed(rules: &[ReplacementRule]) -> Self {
        let mut counts = Self::new();
        for rule in rules {
            counts.record(&rule.name, 0);
        }
        counts
    }

    /// Adds `count` to the entry for `name`, creating it if needed.
    pub fn record(&mut self, name: &str, count: usize) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, c)) => *c += count,
            None => self.entries.push((name.to_string(), count)),
        }
    }

    /// Folds another set of counts into this one.
    pub fn absorb(&mut self, other: &OccurrenceCounts) {
        for (name, count) in &other.entries {
            self.record(name, *count);
        }
    }

    /// The count recorded for `name`, if any.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, c)| *c)
    }

    /// Iterates over `(name, count)` in rule order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), *c))
    }

    /// Iterates over entries with a non-zero count.
    pub fn non_zero(&self) -> impl Iterator<Item = (&str, usize)> {
        self.iter().filter(|(_, c)| *c > 0)
    }

    /// Sum over all rules.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// `true` when no rule matched anything.
    pub fn is_all_zero(&self) -> bool {
        self.total() == 0
    }
}

/// Applies `rules` to `text` in order and counts what each one replaced.
///
/// Each rule runs once over the output of the previous rule, so a later rule
/// can match text an earlier one introduced. Matching is literal and
/// non-overlapping, scanning left to right. A rule with an empty `search`
/// matches nothing. Every rule gets an entry, even when its count is zero.
pub fn apply_rules(text: &str, rules: &[ReplacementRule]) -> (String, OccurrenceCounts) {
    let mut new_text = Cow::Borrowed(text);
    let mut counts = OccurrenceCounts::new();

    for rule in rules {
        let matches = count_occurrences(&new_text, &rule.search);
        if matches > 0 {
            new_text = Cow::Owned(new_text.replace(rule.search.as_str(), &rule.replace));
        }
        counts.record(&rule.name, matches);
    }

    (new_text.into_owned(), counts)
}

/// Counts non-overlapping occurrences of `needle` in `haystack`.
fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, search: &str, replace: &str) -> ReplacementRule {
        ReplacementRule::new(name, search, replace)
    }

    #[test]
    fn test_alias_to_comptime() {
        let rules = vec![rule("x", "alias ", "comptime ")];
        let (out, counts) = apply_rules("alias Foo = Int\nalias Bar = Int\n", &rules);

        assert_eq!(out, "comptime Foo = Int\ncomptime Bar = Int\n");
        assert_eq!(counts.get("x"), Some(2));
        assert_eq!(counts.iter().count(), 1);
    }

    #[test]
    fn test_zero_counts_are_recorded() {
        let rules = vec![rule("hit", "a", "b"), rule("miss", "zzz", "y")];
        let (out, counts) = apply_rules("banana", &rules);

        assert_eq!(out, "bbnbnb");
        assert_eq!(
            counts.iter().collect::<Vec<_>>(),
            vec![("hit", 3), ("miss", 0)]
        );
        assert_eq!(counts.non_zero().collect::<Vec<_>>(), vec![("hit", 3)]);
    }

    #[test]
    fn test_non_overlapping_left_to_right() {
        let rules = vec![rule("aa", "aa", "b")];
        let (out, counts) = apply_rules("aaaaa", &rules);

        assert_eq!(out, "bba");
        assert_eq!(counts.get("aa"), Some(2));
    }

    #[test]
    fn test_no_regex_semantics() {
        let rules = vec![rule("dot", "a.b", "X"), rule("star", ".*", "Y")];
        let (out, counts) = apply_rules("a.b axb .* ..", &rules);

        assert_eq!(out, "X axb Y ..");
        assert_eq!(counts.get("dot"), Some(1));
        assert_eq!(counts.get("star"), Some(1));
    }

    #[test]
    fn test_empty_search_is_noop() {
        let rules = vec![rule("empty", "", "junk")];
        let (out, counts) = apply_rules("unchanged", &rules);

        assert_eq!(out, "unchanged");
        assert_eq!(counts.get("empty"), Some(0));
    }

    #[test]
    fn test_later_rule_sees_earlier_output() {
        let a = rule("a", "alias", "let");
        let b = rule("b", "let", "var");

        let (ab, ab_counts) = apply_rules("alias x", &[a.clone(), b.clone()]);
        let (ba, ba_counts) = apply_rules("alias x", &[b, a]);

        assert_eq!(ab, "var x");
        assert_eq!(ab_counts.iter().collect::<Vec<_>>(), vec![("a", 1), ("b", 1)]);
        assert_eq!(ba, "let x");
        assert_eq!(ba_counts.iter().collect::<Vec<_>>(), vec![("b", 0), ("a", 1)]);
    }

    #[test]
    fn test_replacement_is_single_pass() {
        // The replacement contains the search text; no fixed-point iteration.
        let rules = vec![rule("grow", "a", "aa")];
        let (out, counts) = apply_rules("aba", &rules);

        assert_eq!(out, "aabaa");
        assert_eq!(counts.get("grow"), Some(2));
    }

    #[test]
    fn test_idempotent_once_clean() {
        let rules = vec![rule("x", "alias ", "comptime "), rule("y", "fn ", "def ")];
        let (once, _) = apply_rules("alias A = 1\nfn main():\n", &rules);
        let (twice, counts) = apply_rules(&once, &rules);

        assert_eq!(once, twice);
        assert!(counts.is_all_zero());
        assert_eq!(counts.iter().count(), 2);
    }

    #[test]
    fn test_duplicate_names_accumulate() {
        let rules = vec![rule("unnamed", "a", "b"), rule("unnamed", "c", "d")];
        let (out, counts) = apply_rules("ac", &rules);

        assert_eq!(out, "bd");
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![("unnamed", 2)]);
    }

    #[test]
    fn test_absorb_sums_per_rule() {
        let rules = vec![rule("x", "a", "b"), rule("y", "c", "d")];
        let mut totals = OccurrenceCounts::zeroed(&rules);

        let (_, first) = apply_rules("aa c", &rules);
        let (_, second) = apply_rules("a", &rules);
        totals.absorb(&first);
        totals.absorb(&second);

        assert_eq!(totals.get("x"), Some(3));
        assert_eq!(totals.get("y"), Some(1));
        assert_eq!(totals.total(), first.total() + second.total());
    }

    #[test]
    fn test_unicode_text() {
        let rules = vec![rule("fire", "🔥", "mojo")];
        let (out, counts) = apply_rules("a🔥b🔥", &rules);

        assert_eq!(out, "amojobmojo");
        assert_eq!(counts.get("fire"), Some(2));
    }
}
