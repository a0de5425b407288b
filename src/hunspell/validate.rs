//! Case-cascade lookup and whole-word correctness checks (spec §4.4,
//! §4.4.1, §4.4.2).

use crate::casing::{self, Casing};
use crate::hunspell::affixdata::AffixData;
use crate::hunspell::compoundrule::CompoundRule;
use crate::hunspell::wordflags::WordFlags;
use crate::word_graph::WordGraph;

/// Walk the case cascade of §4.4.1: try the word exactly as given, then
/// (unless rejected by the ignore rule) its capitalized form if the input
/// was all-uppercase, then unconditionally its all-lowercase form.
///
/// `include_forbidden` controls whether a `FORBIDDENWORD` terminal is an
/// acceptable match: `spell`/`correct` pass `true` (a forbidden word is
/// still "found", just flagged forbidden by the caller) while the
/// suggestion engine's candidate validator passes `false` so a forbidden
/// word is never offered as a suggestion.
///
/// Resolves the Open Question on `KEEPCASE`: it never blocks the exact
/// match in step 1, only the derived fallbacks in steps 2–3.
pub fn find_form(word: &str, graph: &WordGraph<WordFlags>, include_forbidden: bool) -> Option<(String, WordFlags)> {
    if let Some(flags) = graph.get_flags(word) {
        if flags.contains(WordFlags::OnlyInCompound) {
            return None;
        }
        if !include_forbidden && flags.contains(WordFlags::Forbidden) {
            return None;
        }
        return Some((word.to_string(), flags));
    }

    let try_variant = |variant: String| -> Option<(String, WordFlags)> {
        if variant == word {
            return None;
        }
        let flags = graph.get_flags(&variant)?;
        if flags.contains(WordFlags::KeepCase) {
            return None;
        }
        if !include_forbidden && flags.contains(WordFlags::Forbidden) {
            return None;
        }
        if flags.contains(WordFlags::OnlyInCompound) {
            return None;
        }
        Some((variant, flags))
    };

    let capitalized_fallback = if Casing::detect(word) == Casing::Upper {
        try_variant(casing::to_capitalized(word))
    } else {
        None
    };
    capitalized_fallback.or_else(|| try_variant(casing::to_lower(word)))
}

/// Result of `spell`: whether the word is accepted, and if not, why.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpellResult {
    pub correct: bool,
    pub forbidden: bool,
    pub warn: bool,
}

/// Try every compiled `COMPOUNDRULE` pattern against `word`.
fn matches_any_compound(word: &str, model: &AffixData, compound_rules: &[CompoundRule]) -> bool {
    compound_rules
        .iter()
        .any(|rule| rule.matches(word, &model.compound_rule_codes, model.flags.compound_min as usize))
}

/// Full `{correct, forbidden, warn}` verdict for `word` (spec §4.4).
pub fn spell(word: &str, graph: &WordGraph<WordFlags>, model: &AffixData, compound_rules: &[CompoundRule]) -> SpellResult {
    let word = word.trim();
    if word.is_empty() {
        return SpellResult::default();
    }

    let mut result = SpellResult::default();
    if let Some((_, flags)) = find_form(word, graph, true) {
        result.correct = true;
        if flags.contains(WordFlags::Forbidden) {
            result.forbidden = true;
            result.correct = false;
        }
        if flags.contains(WordFlags::Warn) {
            result.warn = true;
            if model.flags.forbid_warn {
                result.correct = false;
            }
        }
    }

    if !result.correct && !result.forbidden {
        result.correct = matches_any_compound(word, model, compound_rules);
    }
    result
}

/// True iff `candidate` is a valid suggestion: found via the case cascade
/// without the forbidden path, and not marked `NOSUGGEST` (spec §4.5.2).
pub fn is_valid_suggestion(candidate: &str, graph: &WordGraph<WordFlags>) -> bool {
    match find_form(candidate, graph, false) {
        Some((_, flags)) => !flags.contains(WordFlags::NoSuggest),
        None => false,
    }
}
