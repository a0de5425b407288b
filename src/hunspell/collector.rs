//! Per-call suggestion accumulator (spec §4.5.2, §4.5.3).
//!
//! Grounded on `hunspell/suggcollector.rs`'s `SuggCollector`: a mutable
//! accumulator passed by `&mut` to each generator, deduplicating by exact
//! string and capping attempts per source. Extended with a `weight` field
//! so the ranking pass (§4.5.3) can tell a replacement-table hit (weight
//! 10) from every other strategy (weight 0), per the Open Question
//! resolution recorded in `DESIGN.md`.

use std::cmp::min;

use caseless::default_case_fold_str;
use fnv::FnvHashMap;

use crate::hunspell::validate;
use crate::hunspell::wordflags::WordFlags;
use crate::word_graph::WordGraph;

/// No more than this many suggestion attempts from any one source.
const MAX_SUGGESTS_PER_SOURCE: usize = 1000;

/// Weight given to a hit from the replacement table; every other strategy
/// scores 0 (Open Question resolution, §9).
pub const REPLACEMENT_TABLE_WEIGHT: u32 = 10;

#[derive(Clone, Debug)]
pub struct Suggestion {
    pub word: String,
    pub weight: u32,
}

/// Per-call suggestion accumulator. Validates every candidate against the
/// word graph before accepting it (spec §4.5.2: a candidate is only valid
/// if `FindForm(c, include_forbidden=false)` succeeds and the match isn't
/// `NOSUGGEST`), and memoizes that validation by exact string so repeated
/// candidates across strategies cost one lookup.
#[derive(Debug)]
pub struct Collector<'a> {
    word: &'a str,
    graph: &'a WordGraph<WordFlags>,
    max: usize,
    limit: usize,
    suggs: Vec<Suggestion>,
    validated: FnvHashMap<String, bool>,

    current_weight: u32,
    counter: usize,
    done: bool,
}

impl<'a> Collector<'a> {
    pub fn new(word: &'a str, graph: &'a WordGraph<WordFlags>, max: usize) -> Self {
        Collector {
            word,
            graph,
            max,
            limit: max,
            suggs: Vec::new(),
            validated: FnvHashMap::default(),
            current_weight: 0,
            counter: 0,
            done: false,
        }
    }

    fn is_valid(&mut self, candidate: &str) -> bool {
        if let Some(valid) = self.validated.get(candidate) {
            return *valid;
        }
        let valid = validate::is_valid_suggestion(candidate, self.graph);
        self.validated.insert(candidate.to_string(), valid);
        valid
    }

    pub fn set_limit(&mut self, reserve: usize) {
        self.limit = min(self.suggs.len() + reserve, self.max);
    }

    /// Start a new generator, at the given ranking weight.
    pub fn new_source(&mut self, weight: u32) {
        self.current_weight = weight;
        self.counter = MAX_SUGGESTS_PER_SOURCE;
    }

    /// True iff no more suggestions should be submitted from the current
    /// source (its own per-source budget may be exhausted even though the
    /// overall call is not).
    pub fn limit(&self) -> bool {
        self.done || self.suggs.len() >= self.limit || self.counter == 0
    }

    /// True iff the whole suggestion call is satisfied and no further
    /// source should even be tried. Unlike `limit`, this ignores the
    /// current source's per-source counter, which exists only to bound a
    /// single generator's combinatorial blowup (e.g. `related_char_suggestions`
    /// on a long word) and says nothing about whether suggestions overall
    /// are still wanted.
    pub fn satisfied(&self) -> bool {
        self.done || self.suggs.len() >= self.limit
    }

    /// A suggestion that overrides all others (used for the dictionary
    /// word-split strategies, which are effectively certain to be right).
    pub fn suggest_priority(&mut self, sugg: &str) {
        if sugg == self.word {
            return;
        }
        self.suggs.clear();
        self.suggs.push(Suggestion {
            word: sugg.to_string(),
            weight: u32::MAX,
        });
        self.done = true;
    }

    pub fn suggest(&mut self, sugg: &str) {
        if self.limit() || sugg == self.word {
            return;
        }
        self.counter -= 1;
        if !self.is_valid(sugg) {
            return;
        }
        let folded = default_case_fold_str(sugg);
        if self.suggs.iter().any(|s| default_case_fold_str(&s.word) == folded) {
            return;
        }
        self.suggs.push(Suggestion {
            word: sugg.to_string(),
            weight: self.current_weight,
        });
    }

    pub fn into_suggestions(self) -> Vec<Suggestion> {
        self.suggs
    }
}
