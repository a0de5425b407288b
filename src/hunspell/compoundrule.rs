//! Compiled `COMPOUNDRULE` patterns (spec §3.2, §4.4.2).
//!
//! A pattern is a sequence of flag codes, each optionally followed by `*`
//! (zero or more) or `?` (zero or one), with `(FLAG)` as an alternate
//! spelling of a bare flag for grouping purposes. Unlike the teacher's
//! original array-of-pre-segmented-words matcher, `matches` here walks
//! the whole candidate token directly: every flag in the pattern expands
//! to the literal root words that carry it (`compound_rule_codes`), and
//! those roots are tried as prefixes of what's left of the token.

use anyhow::{bail, Result};
use fnv::FnvHashMap;

use crate::hunspell::affixdata::{AffixData, AffixFlag};

#[derive(Clone, Debug)]
pub struct CompoundRule {
    v: Vec<CompoundElement>,
}

#[derive(Clone, Debug)]
pub enum CompoundElement {
    Multi(AffixFlag),
    Optional(AffixFlag),
    Once(AffixFlag),
}
use CompoundElement::*;

impl CompoundRule {
    pub fn compile(s: &str, ad: &AffixData) -> Result<Self> {
        let mut rule = CompoundRule { v: Vec::default() };
        let mut paren_start = None;
        for (i, c) in s.char_indices() {
            if let Some(ppos) = paren_start {
                if c == ')' {
                    let flag = ad.parse_flags(&s[ppos..i])?;
                    if flag.len() != 1 {
                        bail!("COMPOUNDRULE: expected 1 flag in parentheses");
                    }
                    rule.v.push(Once(flag[0]));
                    paren_start = None;
                }
            } else if c == '(' {
                paren_start = Some(i + 1);
            } else if c == '*' {
                let node = match rule.v.last() {
                    None | Some(Multi(_)) | Some(Optional(_)) => {
                        bail!("COMPOUNDRULE: * must follow a flag");
                    }
                    Some(Once(f)) => Multi(*f),
                };
                *rule.v.last_mut().unwrap() = node;
            } else if c == '?' {
                let node = match rule.v.last() {
                    None | Some(Multi(_)) | Some(Optional(_)) => {
                        bail!("COMPOUNDRULE: ? must follow a flag");
                    }
                    Some(Once(f)) => Optional(*f),
                };
                *rule.v.last_mut().unwrap() = node;
            } else {
                let flag = ad.parse_flags(&s[i..i + c.len_utf8()])?;
                rule.v.push(Once(flag[0]));
            }
        }
        Ok(rule)
    }

    /// Try every root word carrying `flag` as a prefix of `remaining`,
    /// continuing the match on what's left after each one.
    fn try_roots(
        remaining: &str,
        flag: AffixFlag,
        codes: &FnvHashMap<AffixFlag, Vec<String>>,
        cont: impl FnMut(&str) -> bool,
    ) -> bool {
        let Some(roots) = codes.get(&flag) else {
            return false;
        };
        roots.iter().filter_map(|root| remaining.strip_prefix(root.as_str())).any(cont)
    }

    fn matches_rec(&self, remaining: &str, pos: usize, codes: &FnvHashMap<AffixFlag, Vec<String>>) -> bool {
        match self.v.get(pos) {
            None => remaining.is_empty(),
            Some(Once(f)) => Self::try_roots(remaining, *f, codes, |rest| self.matches_rec(rest, pos + 1, codes)),
            Some(Optional(f)) => {
                Self::try_roots(remaining, *f, codes, |rest| self.matches_rec(rest, pos + 1, codes))
                    || self.matches_rec(remaining, pos + 1, codes)
            }
            Some(Multi(f)) => {
                Self::try_roots(remaining, *f, codes, |rest| self.matches_rec(rest, pos, codes))
                    || self.matches_rec(remaining, pos + 1, codes)
            }
        }
    }

    /// True iff `token` is at least `2 * min_len` chars long (`COMPOUNDMIN`
    /// gates the whole token, not individual root alternatives) and can be
    /// fully decomposed into a sequence of roots matching this pattern.
    pub fn matches(&self, token: &str, codes: &FnvHashMap<AffixFlag, Vec<String>>, min_len: usize) -> bool {
        if token.chars().count() < 2 * min_len {
            return false;
        }
        self.matches_rec(token, 0, codes)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn codes(pairs: &[(AffixFlag, &[&str])]) -> FnvHashMap<AffixFlag, Vec<String>> {
        pairs
            .iter()
            .map(|(f, roots)| (*f, roots.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn once_then_once() {
        let ad = AffixData::new();
        let rule = CompoundRule::compile("AB", &ad).unwrap();
        let codes = codes(&[('A' as AffixFlag, &["foo"]), ('B' as AffixFlag, &["bar"])]);
        assert!(rule.matches("foobar", &codes, 1));
        assert!(!rule.matches("foobaz", &codes, 1));
        assert!(!rule.matches("foo", &codes, 1));
    }

    #[test]
    fn star_allows_repeats_and_zero() {
        let ad = AffixData::new();
        let rule = CompoundRule::compile("A*B", &ad).unwrap();
        let codes = codes(&[('A' as AffixFlag, &["un"]), ('B' as AffixFlag, &["done"])]);
        assert!(rule.matches("done", &codes, 1));
        assert!(rule.matches("undone", &codes, 1));
        assert!(rule.matches("unundone", &codes, 1));
    }

    #[test]
    fn question_mark_is_optional() {
        let ad = AffixData::new();
        let rule = CompoundRule::compile("A?B", &ad).unwrap();
        let codes = codes(&[('A' as AffixFlag, &["un"]), ('B' as AffixFlag, &["done"])]);
        assert!(rule.matches("done", &codes, 1));
        assert!(rule.matches("undone", &codes, 1));
        assert!(!rule.matches("unundone", &codes, 1));
    }

    #[test]
    fn compound_min_gates_whole_token_not_each_root() {
        let ad = AffixData::new();
        let rule = CompoundRule::compile("AB", &ad).unwrap();
        let codes = codes(&[('A' as AffixFlag, &["ab"]), ('B' as AffixFlag, &["cdef"])]);
        assert!(rule.matches("abcdef", &codes, 3));
        assert!(!rule.matches("ab", &codes, 3));
    }
}
