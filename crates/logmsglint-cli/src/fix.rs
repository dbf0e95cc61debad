//! Applying suggested replacements to source text.

use logmsglint_core::Replacement;

/// Result of applying a set of replacements to one file.
#[derive(Debug, PartialEq, Eq)]
pub struct FixOutcome {
    /// The rewritten text.
    pub text: String,
    /// Indices (into the input slice) of the replacements that were applied.
    pub applied: Vec<usize>,
}

impl FixOutcome {
    /// Number of replacements that were left out.
    #[must_use]
    pub fn skipped(&self, total: usize) -> usize {
        total - self.applied.len()
    }
}

/// Applies `replacements` to `source`.
///
/// Replacements are considered by start offset, earlier input first on
/// ties; one that overlaps an already accepted replacement, or that does not
/// fall on character boundaries of `source`, is skipped. The accepted ones
/// are spliced in from the back so earlier offsets stay valid.
#[must_use]
pub fn apply(source: &str, replacements: &[&Replacement]) -> FixOutcome {
    let mut order: Vec<usize> = (0..replacements.len()).collect();
    order.sort_by_key(|&i| replacements[i].location.offset);

    let mut accepted: Vec<usize> = Vec::new();
    let mut covered_until = 0;
    for index in order {
        let range = replacements[index].location.byte_range();
        if source.get(range.clone()).is_none() {
            tracing::debug!("Skipping replacement outside the source: {range:?}");
            continue;
        }
        if !accepted.is_empty() && range.start < covered_until {
            continue;
        }
        covered_until = range.end;
        accepted.push(index);
    }

    let mut text = source.to_string();
    for &index in accepted.iter().rev() {
        let replacement = replacements[index];
        text.replace_range(replacement.location.byte_range(), &replacement.new_text);
    }

    accepted.sort_unstable();
    FixOutcome {
        text,
        applied: accepted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logmsglint_core::Location;
    use std::path::PathBuf;

    fn replacement(offset: usize, length: usize, text: &str) -> Replacement {
        let location = Location::new(PathBuf::from("main.go"), 1, offset + 1).with_span(offset, length);
        Replacement::new(location, text)
    }

    #[test]
    fn applies_disjoint_replacements() {
        let source = r#"a("Hello") b("World!")"#;
        let first = replacement(2, 7, r#""hello""#);
        let second = replacement(13, 8, r#""World""#);

        let outcome = apply(source, &[&second, &first]);
        assert_eq!(outcome.text, r#"a("hello") b("World")"#);
        assert_eq!(outcome.applied, vec![0, 1]);
    }

    #[test]
    fn overlapping_replacement_is_skipped() {
        let source = r#"slog.Info("Starting!")"#;
        let lowercase = replacement(10, 11, r#""starting!""#);
        let strip = replacement(10, 11, r#""Starting""#);

        let outcome = apply(source, &[&lowercase, &strip]);
        assert_eq!(outcome.text, r#"slog.Info("starting!")"#);
        assert_eq!(outcome.applied, vec![0]);
        assert_eq!(outcome.skipped(2), 1);
    }

    #[test]
    fn length_changes_do_not_shift_other_edits() {
        let source = r#"x("token") y("Hi")"#;
        let redact = replacement(2, 7, r#""[redacted]""#);
        let lower = replacement(13, 4, r#""hi""#);

        let outcome = apply(source, &[&redact, &lower]);
        assert_eq!(outcome.text, r#"x("[redacted]") y("hi")"#);
    }

    #[test]
    fn out_of_range_replacement_is_ignored() {
        let outcome = apply("short", &[&replacement(3, 10, "x")]);
        assert_eq!(outcome.text, "short");
        assert!(outcome.applied.is_empty());
    }

    #[test]
    fn no_replacements() {
        let outcome = apply("package main\n", &[]);
        assert_eq!(outcome.text, "package main\n");
        assert_eq!(outcome.skipped(0), 0);
    }
}
