/// Vendor-family prefixes stripped from the front of a name. Order matters:
/// longest first, so "microsoft 365 defender" loses the whole brand and not
/// just "microsoft".
const VENDOR_PREFIXES: &[&str] = &[
    "microsoft 365",
    "office 365",
    "m365",
    "o365",
    "microsoft",
    "ms",
];

/// Trailing qualifiers that mark the base offering rather than a distinct
/// capability. "plan 1" is the base-plan marker; higher plan numbers name
/// genuinely different capability sets and stay in the key.
const TIER_SUFFIXES: &[&str] = &["for business", "for enterprise", "plan 1"];

/// Reduce a display name to its comparison key.
///
/// Lowercases, strips at most one vendor prefix and one trailing qualifier,
/// then drops every character outside `[a-z0-9]`. Total and deterministic:
/// any input maps to exactly one key, and empty input maps to the empty key.
///
/// ```
/// use tierlens_engine::fingerprint;
///
/// assert_eq!(fingerprint("Microsoft 365 Defender"), "defender");
/// assert_eq!(fingerprint("Defender for Business"), "defender");
/// assert_ne!(fingerprint("Entra ID Plan 1"), fingerprint("Entra ID Plan 2"));
/// ```
#[must_use]
pub fn fingerprint(label: &str) -> String {
    // Collapse whitespace runs so the token tables match regardless of
    // spacing in the source.
    let lowered = label.trim().to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

    let stripped = strip_tier_suffix(strip_vendor_prefix(&collapsed));

    stripped
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Strip one leading vendor token, if a whitespace boundary follows it.
/// A name that is nothing but the token ("Microsoft 365") keeps it.
#[must_use]
fn strip_vendor_prefix(label: &str) -> &str {
    for prefix in VENDOR_PREFIXES {
        if let Some(rest) = label.strip_prefix(prefix) {
            // The name is nothing but the token: keep it, before a shorter
            // prefix gets a chance to claim part of it.
            if rest.is_empty() {
                return label;
            }
            if rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }
    label
}

/// Strip one trailing qualifier, if a whitespace boundary precedes it.
#[must_use]
fn strip_tier_suffix(label: &str) -> &str {
    for suffix in TIER_SUFFIXES {
        if let Some(rest) = label.strip_suffix(suffix) {
            if rest.ends_with(char::is_whitespace) {
                return rest.trim_end();
            }
        }
    }
    label
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn vendor_prefixes_collapse_to_one_key() {
        assert_eq!(fingerprint("Microsoft 365 Defender"), "defender");
        assert_eq!(fingerprint("M365 Defender"), "defender");
        assert_eq!(fingerprint("MS Defender"), "defender");
        assert_eq!(fingerprint("Defender"), "defender");
    }

    #[test]
    fn base_plan_marker_is_cosmetic() {
        let base = fingerprint("Entra ID Plan 1");
        assert_eq!(base, "entraid");
        assert_eq!(fingerprint("entra id plan 1"), base);
        assert_eq!(fingerprint("EntraID Plan 1"), base);
        assert_eq!(fingerprint("Entra ID"), base);
    }

    #[test]
    fn higher_plan_numbers_stay_distinct() {
        assert_ne!(fingerprint("Entra ID Plan 1"), fingerprint("Entra ID Plan 2"));
        assert_eq!(fingerprint("Entra ID Plan 2"), "entraidplan2");
    }

    #[test]
    fn audience_qualifiers_are_stripped() {
        assert_eq!(fingerprint("Defender for Business"), "defender");
        assert_eq!(fingerprint("Microsoft Defender"), "defender");
        assert_eq!(fingerprint("Exchange Online for Enterprise"), "exchangeonline");
    }

    #[test]
    fn punctuation_and_spacing_never_matter() {
        assert_eq!(fingerprint("Power BI Pro"), fingerprint("PowerBI   Pro"));
        assert_eq!(fingerprint("Audit (Premium)"), fingerprint("Audit Premium"));
        assert_eq!(fingerprint("e-Discovery"), "ediscovery");
    }

    #[test]
    fn only_one_strip_per_rule() {
        // The second vendor token is part of the name, not brand noise.
        assert_eq!(fingerprint("MS Microsoft Teams"), "microsoftteams");
    }

    #[test]
    fn a_bare_token_is_its_own_name() {
        // No whitespace boundary, so nothing is stripped.
        assert_eq!(fingerprint("Microsoft 365"), "microsoft365");
        assert_eq!(fingerprint("Plan 1"), "plan1");
        // The shorter "microsoft" prefix must not claim part of the longer
        // token the name consists of; a brand-only label is not "365".
        assert_ne!(fingerprint("Microsoft 365"), fingerprint("365"));
    }

    #[test]
    fn degenerate_input_yields_the_empty_key() {
        assert_eq!(fingerprint(""), "");
        assert_eq!(fingerprint("   "), "");
        assert_eq!(fingerprint("®™"), "");
    }

    proptest! {
        #[test]
        fn proptest_key_alphabet_is_lower_alnum(label in ".*") {
            let key = fingerprint(&label);
            prop_assert!(key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }

        #[test]
        fn proptest_case_never_matters(label in "[ -~]{0,48}") {
            prop_assert_eq!(fingerprint(&label), fingerprint(&label.to_uppercase()));
        }

        #[test]
        fn proptest_fingerprint_is_idempotent(label in ".*") {
            let once = fingerprint(&label);
            let twice = fingerprint(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
