//! A Hunspell-compatible spell checker: affix model, word graph, and
//! suggestion engine tied together behind one public `SpellChecker`.

pub mod affixdata;
pub mod collector;
pub mod compoundrule;
pub mod condition;
pub mod conversion;
pub mod dictionary;
pub mod generators;
pub mod parse_aff;
pub mod replacements;
pub mod rule;
pub mod validate;
pub mod wordflags;

use anyhow::Result;

use crate::casing::Casing;
use crate::hunspell::affixdata::AffixData;
use crate::hunspell::collector::{Collector, REPLACEMENT_TABLE_WEIGHT};
use crate::hunspell::compoundrule::CompoundRule;
use crate::hunspell::wordflags::WordFlags;
use crate::word_graph::WordGraph;

/// Size of the word graph and rule table, for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stats {
    pub word_count: usize,
    pub node_count: usize,
    pub rule_count: usize,
}

/// A loaded Hunspell-format dictionary: affix rules plus the word graph
/// they were expanded into.
#[derive(Debug)]
pub struct SpellChecker {
    model: AffixData,
    graph: WordGraph<WordFlags>,
    compiled_compound_rules: Vec<CompoundRule>,
    compound_dirty: bool,
}

impl SpellChecker {
    /// Parse `aff_text` and, if given, load `dic_text` as the initial word
    /// list. Affix text is the only mandatory input (spec §7): a missing
    /// or malformed `.aff` is the sole hard construction error.
    pub fn new(aff_text: &str, dic_text: Option<&str>) -> Result<Self> {
        let mut model = parse_aff::parse_affix_data(aff_text)?;
        let mut graph = WordGraph::new();
        if let Some(dic) = dic_text {
            dictionary::load_dic(dic, &mut graph, &mut model);
        }
        let mut checker = SpellChecker {
            model,
            graph,
            compiled_compound_rules: Vec::new(),
            compound_dirty: true,
        };
        checker.rebuild();
        Ok(checker)
    }

    /// Force recompilation of `COMPOUNDRULE` alternation patterns against
    /// the current roots. Called automatically, lazily, by `spell`/
    /// `correct`/`suggest` whenever a mutator has touched the compound-rule
    /// code buckets since the last compile (Open Question resolution,
    /// `DESIGN.md`); exposed here for callers who want to force it eagerly.
    pub fn rebuild(&mut self) {
        self.compiled_compound_rules = self.model.compile_compound_rules();
        self.compound_dirty = false;
    }

    fn ensure_compiled(&mut self) {
        if self.compound_dirty {
            self.rebuild();
        }
    }

    /// Full `{correct, forbidden, warn}` verdict (spec §4.4). Trims
    /// whitespace and applies `ICONV` before probing the graph.
    pub fn spell_full(&mut self, word: &str) -> validate::SpellResult {
        self.ensure_compiled();
        let normalized = self.model.conversion_in.apply(word.trim());
        validate::spell(&normalized, &self.graph, &self.model, &self.compiled_compound_rules)
    }

    /// True iff `word` is spelled correctly, including via a compiled
    /// compound pattern.
    pub fn spell(&mut self, word: &str) -> bool {
        self.spell_full(word).correct
    }

    /// Synonym for `spell`, matching common Hunspell binding naming.
    pub fn correct(&mut self, word: &str) -> bool {
        self.spell(word)
    }

    /// Suggest corrections for a misspelled word, ranked best-first and
    /// capped at `max` (and never more than 10, per §4.5.4). Returns an
    /// empty list if `word` is already correct (spec §4.5.1).
    pub fn suggest(&mut self, word: &str, max: usize) -> Vec<String> {
        self.ensure_compiled();
        let max = max.min(10);
        let value = self.model.conversion_in.apply(word.trim());
        if max == 0 || value.is_empty() || self.spell(&value) {
            return Vec::new();
        }
        let case = Casing::detect(&value);

        let internal_cap = max.saturating_mul(4).max(20);
        let mut collector = Collector::new(&value, &self.graph, internal_cap);

        // 1. Replacement table hits (weight 10).
        collector.new_source(REPLACEMENT_TABLE_WEIGHT);
        self.model.replacement_table.suggest(&value, |sugg| {
            collector.suggest(&sugg);
            !collector.limit()
        });

        // 2. Keyboard-adjacency groups.
        if !collector.satisfied() {
            let groups: Vec<String> = self.model.flags.keyboard_groups().iter().map(|s| s.to_string()).collect();
            generators::related_char_suggestions(&groups, &value, &mut collector);
        }

        // 3. Missing/doubled characters.
        if !collector.satisfied() {
            generators::delete_char_suggestions(&value, &mut collector);
            generators::delete_doubled_pair_suggestions(&value, &mut collector);
        }

        // 4. Case variants.
        if !collector.satisfied() {
            generators::capitalize_char_suggestions(&value, &mut collector);
        }

        // 5. Edit distance 1: transpositions, TRY-alphabet insert/replace,
        // wrong-key, dictionary-aware word splitting.
        if !collector.satisfied() {
            generators::swap_char_suggestions(&value, &mut collector);
            generators::move_char_suggestions(&value, &mut collector);
            let try_chars = self.model.flags.try_alphabet();
            generators::add_char_suggestions(&value, &try_chars, &mut collector);
            generators::replace_char_suggestions(&value, &try_chars, &mut collector);
            let keyboard: Vec<&str> = self.model.flags.keyboard_groups();
            let keyboard = keyboard.join("|");
            generators::wrong_key_suggestions(&value, &keyboard, &mut collector);
            generators::split_word_suggestions(&value, &self.graph, &mut collector);
        }

        // 6. Edit-distance-2 fallback over the whole word list, batched to
        // only fill out what's left of `max`.
        if !collector.satisfied() {
            collector.set_limit(max);
            generators::ngram_suggestions(&value, &self.graph, &mut collector);
            generators::delins_suggestions(&value, &self.graph, &mut collector);
        }

        // Rank: weight descending, then casing-match-first, then locale
        // alphabetical (spec §4.5.3).
        let mut suggs = collector.into_suggestions();
        suggs.sort_by(|a, b| {
            b.weight.cmp(&a.weight).then_with(|| {
                let a_matches = Casing::detect(&a.word) == case;
                let b_matches = Casing::detect(&b.word) == case;
                b_matches.cmp(&a_matches).then_with(|| a.word.cmp(&b.word))
            })
        });

        // Apply OCONV and dedupe case-insensitively, keeping first occurrence
        // (spec §4.5.4).
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::with_capacity(max);
        for s in suggs {
            let converted = self.model.conversion_out.apply(&s.word);
            let key = caseless::default_case_fold_str(&converted);
            if seen.insert(key) {
                out.push(converted);
                if out.len() >= max {
                    break;
                }
            }
        }
        out
    }

    /// Accept `word` into the dictionary. If `model` is supplied, `word`
    /// inherits that word's stored flags (spec §4.6); otherwise it carries
    /// none.
    pub fn add(&mut self, word: &str, model: Option<&str>) -> bool {
        if word.is_empty() {
            return false;
        }
        let flags = model.and_then(|m| self.graph.get_flags(m)).unwrap_or_else(WordFlags::empty);
        self.graph.insert(word, flags);
        self.compound_dirty = true;
        true
    }

    /// Remove `word` from the dictionary.
    pub fn remove(&mut self, word: &str) {
        self.graph.remove(word);
    }

    /// True iff some stored word has `prefix` as a prefix.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.graph.has_prefix(prefix)
    }

    /// Load additional `.dic`-format text into the running dictionary.
    pub fn dictionary(&mut self, dic_text: &str) {
        dictionary::load_dic(dic_text, &mut self.graph, &mut self.model);
        self.compound_dirty = true;
    }

    /// Load a personal dictionary (spec §4.6, §6.3).
    pub fn personal(&mut self, text: &str) {
        dictionary::load_personal(text, &mut self.graph, &mut self.model);
    }

    /// The characters that may appear within a word: the `TRY`/built-in
    /// frequency alphabet plus any `WORDCHARS` extras.
    pub fn word_characters(&self) -> String {
        let mut chars = self.model.flags.try_alphabet();
        if let Some(extra) = &self.model.flags.word_chars {
            for c in extra.chars() {
                if !chars.contains(c) {
                    chars.push(c);
                }
            }
        }
        chars
    }

    pub fn stats(&self) -> Stats {
        Stats {
            word_count: self.graph.len(),
            node_count: self.graph.node_count(),
            rule_count: self.model.rules.len(),
        }
    }
}
