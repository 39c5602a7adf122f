//! Property-based tests for output normalization and target resolution.

use biztone_converter::services::normalize_output;
use biztone_converter::Target;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_output_has_no_outer_whitespace(s in "\\PC*") {
        let out = normalize_output(&s);
        // Stripping a quote pair can expose inner whitespace, so only check
        // unquoted input here.
        let trimmed = s.trim();
        if !(trimmed.starts_with('"') || trimmed.starts_with('\'')) {
            prop_assert_eq!(out.trim(), out.as_str());
        }
    }

    #[test]
    fn prop_single_quote_pair_removed(inner in "[^\"']*", quote in prop::sample::select(vec!['"', '\''])) {
        let wrapped = format!("  {q}{inner}{q}\n", q = quote, inner = inner);
        prop_assert_eq!(normalize_output(&wrapped), inner);
    }

    #[test]
    fn prop_unquoted_text_only_trimmed(s in "[a-zA-Z0-9 ,.!?]*[a-zA-Z0-9.!?]") {
        let padded = format!("\t {} \n", s);
        prop_assert_eq!(normalize_output(&padded), s.trim());
    }

    #[test]
    fn prop_mismatched_quotes_untouched(inner in "[a-z ]*") {
        let s = format!("\"{}'", inner);
        prop_assert_eq!(normalize_output(&s), s.clone());
    }

    #[test]
    fn prop_strips_at_most_two_chars(s in "\\PC*") {
        let trimmed_len = s.trim().len();
        let out = normalize_output(&s);
        prop_assert!(out.len() == trimmed_len || out.len() + 2 == trimmed_len);
    }

    #[test]
    fn prop_unknown_targets_resolve_to_boss(raw in "\\PC*") {
        prop_assume!(raw != "boss" && raw != "colleague" && raw != "client");
        prop_assert_eq!(Target::resolve(Some(raw.as_str())), Target::Boss);
    }
}
