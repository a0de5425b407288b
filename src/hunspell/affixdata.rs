//! The parsed `.aff` file: rule table, replacement/conversion tables,
//! compound-rule raw patterns, and scalar flags (spec §3.2, §3.4).

use anyhow::{anyhow, Result};
use fnv::FnvHashMap;

use crate::hunspell::compoundrule::CompoundRule;
use crate::hunspell::conversion::Conversion;
use crate::hunspell::replacements::Replacements;
use crate::hunspell::rule::AffixRule;

/// A single flag code. Represented uniformly across all four `FLAG`
/// encodings: a `short`/`UTF-8` flag is its codepoint, a `long` flag packs
/// its two characters into one value, and a `num` flag is its decimal
/// value directly.
pub type AffixFlag = u32;

/// Encoding of flag codes after words in the dictionary and affix files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FlagMode {
    /// Single-character flags (the default).
    #[default]
    CharFlags,
    /// Two-character flags.
    DoubleCharFlags,
    /// Flags are comma-separated ASCII integers.
    NumericFlags,
    /// Flags are Unicode codepoints in UTF-8 format.
    Utf8Flags,
}

/// The built-in frequency-sorted English alphabet, used to fill out `TRY`
/// when the affix file doesn't list every letter (spec §4.1).
pub const FREQUENCY_ALPHABET: &str = "etaoinshrdlcumwfgypbvkjxqz";

/// Built-in fallback keyboard layout, used when `KEY` is absent (spec
/// §4.1).
pub const DEFAULT_KEYBOARD: &str = "qwertyuiop|asdfghjkl|zxcvbnm";

/// Scalar affix-file settings (spec §3.4), with an overflow map for
/// unrecognized single-argument directives (spec §9 design note).
#[derive(Clone, Debug, Default)]
pub struct ScalarFlags {
    pub flag_mode: FlagMode,
    pub key: Option<String>,
    pub try_chars: Option<String>,
    pub word_chars: Option<String>,
    pub no_suggest: Option<AffixFlag>,
    pub warn: Option<AffixFlag>,
    pub forbidden_word: Option<AffixFlag>,
    pub keep_case: Option<AffixFlag>,
    pub only_in_compound: Option<AffixFlag>,
    pub need_affix: Option<AffixFlag>,
    pub circumfix: Option<AffixFlag>,
    pub compound_begin: Option<AffixFlag>,
    pub compound_middle: Option<AffixFlag>,
    pub compound_end: Option<AffixFlag>,
    pub compound_permit: Option<AffixFlag>,
    pub compound_min: u8,
    pub forbid_warn: bool,
    /// First argument of any other recognized-but-unmodeled directive.
    pub overflow: FnvHashMap<String, String>,
}

impl ScalarFlags {
    fn new() -> Self {
        ScalarFlags {
            compound_min: 3,
            ..Default::default()
        }
    }

    /// `TRY` chars in source order, followed by any missing letters from
    /// the frequency alphabet (spec §4.1), or the whole frequency alphabet
    /// when `TRY` was absent.
    pub fn try_alphabet(&self) -> String {
        let mut out = String::new();
        if let Some(chars) = &self.try_chars {
            for c in chars.chars() {
                if c.is_lowercase() && !out.contains(c) {
                    out.push(c);
                }
            }
        }
        for c in FREQUENCY_ALPHABET.chars() {
            if !out.contains(c) {
                out.push(c);
            }
        }
        out
    }

    /// `|`-separated keyboard adjacency groups, or the built-in default.
    pub fn keyboard_groups(&self) -> Vec<&str> {
        self.key
            .as_deref()
            .unwrap_or(DEFAULT_KEYBOARD)
            .split('|')
            .collect()
    }
}

/// The fully parsed affix model (spec §3.2). Named `AffixData` to match
/// the teacher crate's naming for the same artifact.
#[derive(Debug, Default)]
pub struct AffixData {
    pub rules: FnvHashMap<AffixFlag, AffixRule>,
    pub replacement_table: Replacements,
    pub conversion_in: Conversion,
    pub conversion_out: Conversion,
    /// Raw `COMPOUNDRULE` pattern strings, compiled lazily once the
    /// dictionary has populated `compound_rule_codes` (spec §4.4.2).
    pub compound_rule_patterns: Vec<String>,
    pub compound_rule_codes: FnvHashMap<AffixFlag, Vec<String>>,
    pub flags: ScalarFlags,
}

impl AffixData {
    pub fn new() -> Self {
        AffixData {
            flags: ScalarFlags::new(),
            ..Default::default()
        }
    }

    /// Parse a flag string according to the current `FLAG` encoding (spec
    /// §4.1 "Flag-string parsing").
    pub fn parse_flags(&self, s: &str) -> Result<Vec<AffixFlag>> {
        match self.flags.flag_mode {
            FlagMode::CharFlags | FlagMode::Utf8Flags => {
                Ok(s.chars().map(|c| c as AffixFlag).collect())
            }
            FlagMode::DoubleCharFlags => {
                let chars: Vec<char> = s.chars().collect();
                if !chars.len().is_multiple_of(2) {
                    return Err(anyhow!("odd-length long flag string: {}", s));
                }
                Ok(chars
                    .chunks(2)
                    .map(|pair| ((pair[0] as u32) << 16) | (pair[1] as u32))
                    .collect())
            }
            FlagMode::NumericFlags => s
                .split(',')
                .map(|n| {
                    n.trim()
                        .parse::<AffixFlag>()
                        .map_err(|_| anyhow!("bad numeric flag: {}", n))
                })
                .collect(),
        }
    }

    /// Compile every `COMPOUNDRULE` pattern against the current
    /// `compound_rule_codes`. Called once at construction and again
    /// whenever a mutator has changed the codes since the last call (spec
    /// §9 Open Question, resolved in DESIGN.md: lazy recompile, not eager
    /// on every mutation).
    pub fn compile_compound_rules(&self) -> Vec<CompoundRule> {
        self.compound_rule_patterns
            .iter()
            .filter_map(|p| CompoundRule::compile(p, self).ok())
            .collect()
    }
}
