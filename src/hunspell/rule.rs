//! Affix rules, entries, and the recursive expander (spec §3.3, §4.3).

use crate::hunspell::affixdata::{AffixData, AffixFlag};
use crate::hunspell::condition::AffixCondition;

/// Recursion cap for continuation flags (spec §9 design note: "an
/// implementation should cap recursion depth (e.g. 16) to survive
/// malformed data").
const MAX_EXPAND_DEPTH: u8 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AffixKind {
    Prefix,
    Suffix,
}

#[derive(Debug)]
pub struct AffixEntry {
    /// Characters appended (suffix) or prepended (prefix); empty when the
    /// source token was `0`.
    pub add: String,
    /// Characters stripped from the end (suffix) or start (prefix); empty
    /// when the source was `0`.
    pub remove: String,
    /// `None` means "unconditional".
    pub condition: Option<AffixCondition>,
    /// Further flag codes applied recursively to the derived form.
    pub continuation: Vec<AffixFlag>,
}

#[derive(Debug)]
pub struct AffixRule {
    pub kind: AffixKind,
    pub combineable: bool,
    pub entries: Vec<AffixEntry>,
}

impl AffixRule {
    pub fn new(kind: AffixKind, combineable: bool) -> Self {
        AffixRule {
            kind,
            combineable,
            entries: Vec::new(),
        }
    }
}

/// Apply one rule to `word`, producing every surface form it derives
/// (spec §4.3). Recurses through each entry's continuation flags.
pub fn expand(word: &str, rule: &AffixRule, model: &AffixData, depth: u8) -> Vec<String> {
    if depth >= MAX_EXPAND_DEPTH {
        return Vec::new();
    }
    let mut out = Vec::new();
    for entry in &rule.entries {
        if let Some(cond) = &entry.condition {
            let matches = match rule.kind {
                AffixKind::Suffix => cond.suffix_match(word),
                AffixKind::Prefix => cond.prefix_match(word),
            };
            if !matches {
                continue;
            }
        }

        let derived = if entry.remove.is_empty() {
            match rule.kind {
                AffixKind::Suffix => format!("{word}{}", entry.add),
                AffixKind::Prefix => format!("{}{word}", entry.add),
            }
        } else {
            match rule.kind {
                AffixKind::Suffix => {
                    let Some(stem) = word.strip_suffix(entry.remove.as_str()) else {
                        continue;
                    };
                    format!("{stem}{}", entry.add)
                }
                AffixKind::Prefix => {
                    let Some(stem) = word.strip_prefix(entry.remove.as_str()) else {
                        continue;
                    };
                    format!("{}{stem}", entry.add)
                }
            }
        };

        for cont in &entry.continuation {
            if let Some(cont_rule) = model.rules.get(cont) {
                out.extend(expand(&derived, cont_rule, model, depth + 1));
            }
        }
        out.push(derived);
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    fn suffix_rule() -> AffixRule {
        let mut rule = AffixRule::new(AffixKind::Suffix, false);
        rule.entries.push(AffixEntry {
            add: "s".to_string(),
            remove: String::new(),
            condition: None,
            continuation: Vec::new(),
        });
        rule
    }

    #[test]
    fn plain_suffix_append() {
        let model = AffixData::new();
        let rule = suffix_rule();
        assert_eq!(expand("hello", &rule, &model, 0), vec!["hellos"]);
    }

    #[test]
    fn suffix_with_removal() {
        let model = AffixData::new();
        let mut rule = AffixRule::new(AffixKind::Suffix, false);
        rule.entries.push(AffixEntry {
            add: "ied".to_string(),
            remove: "y".to_string(),
            condition: Some(AffixCondition::new("[^aeiou]y")),
            continuation: Vec::new(),
        });
        assert_eq!(expand("try", &rule, &model, 0), vec!["tried"]);
        assert_eq!(expand("play", &rule, &model, 0), Vec::<String>::new());
    }

    #[test]
    fn prefix_prepend() {
        let model = AffixData::new();
        let mut rule = AffixRule::new(AffixKind::Prefix, false);
        rule.entries.push(AffixEntry {
            add: "un".to_string(),
            remove: String::new(),
            condition: None,
            continuation: Vec::new(),
        });
        assert_eq!(expand("test", &rule, &model, 0), vec!["untest"]);
    }
}
