//! Case detection and application (spec §3.5).
//!
//! Four-valued casing tag over a token, used both by the validator's case
//! cascade (§4.4.1) and by the suggestion engine's case-variant generation
//! (§4.5.1 step 4) and case-aware ranking (§4.5.3).

use unicode_titlecase::StrTitleCase;

/// The casing shape of a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Casing {
    /// No alphabetic characters at all (including the empty string).
    Undefined,
    /// All alphabetic characters are lowercase.
    Lower,
    /// All alphabetic characters are uppercase.
    Upper,
    /// First alphabetic character uppercase, the rest lowercase.
    Capitalized,
    /// Anything else.
    Mixed,
}

impl Casing {
    /// Classify `word` into one of the four casing buckets.
    pub fn detect(word: &str) -> Casing {
        if word.is_empty() {
            return Casing::Undefined;
        }
        let mut chars = word.chars().filter(|c| c.is_alphabetic());
        let first = match chars.next() {
            Some(c) => c,
            None => return Casing::Undefined,
        };
        let first_upper = first.is_uppercase();
        let rest: Vec<char> = chars.collect();
        let all_rest_lower = rest.iter().all(|c| !c.is_uppercase());
        let all_rest_upper = rest.iter().all(|c| !c.is_lowercase());

        if !first_upper && all_rest_lower {
            Casing::Lower
        } else if first_upper && all_rest_upper {
            Casing::Upper
        } else if first_upper && all_rest_lower {
            Casing::Capitalized
        } else {
            Casing::Mixed
        }
    }

    /// True if every alphabetic character in `word` is uppercase.
    pub fn is_all_upper(word: &str) -> bool {
        let mut any = false;
        for c in word.chars() {
            if c.is_lowercase() {
                return false;
            }
            any |= c.is_uppercase();
        }
        any
    }
}

/// Lowercase the whole word.
pub fn to_lower(word: &str) -> String {
    word.to_lowercase()
}

/// Uppercase the whole word.
pub fn to_upper(word: &str) -> String {
    word.to_uppercase()
}

/// Uppercase only the first alphabetic character, lowercase the rest.
pub fn to_capitalized(word: &str) -> String {
    word.to_titlecase_lower_rest()
}

/// Flip the case of every character (used by the suggestion engine's
/// "case-switch on next segment" edit, §4.5.1 step 5).
pub fn switch_case(s: &str) -> String {
    s.chars()
        .flat_map(|c| {
            if c.is_uppercase() {
                c.to_lowercase().collect::<Vec<_>>()
            } else if c.is_lowercase() {
                c.to_uppercase().collect::<Vec<_>>()
            } else {
                vec![c]
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn detect_buckets() {
        assert_eq!(Casing::detect(""), Casing::Undefined);
        assert_eq!(Casing::detect("hello"), Casing::Lower);
        assert_eq!(Casing::detect("HELLO"), Casing::Upper);
        assert_eq!(Casing::detect("Hello"), Casing::Capitalized);
        assert_eq!(Casing::detect("HeLLo"), Casing::Mixed);
        assert_eq!(Casing::detect("123"), Casing::Undefined);
    }

    #[test]
    fn apply_variants() {
        assert_eq!(to_lower("HELLO"), "hello");
        assert_eq!(to_upper("hello"), "HELLO");
        assert_eq!(to_capitalized("hELLO"), "Hello");
    }

    #[test]
    fn switch_case_flips_everything() {
        assert_eq!(switch_case("Hello"), "hELLO");
        assert_eq!(switch_case("hello-world"), "HELLO-WORLD");
    }
}
