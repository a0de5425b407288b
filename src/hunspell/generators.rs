//! Suggestion-candidate generators (spec §4.5.1).
//!
//! Grounded on `hunspell/suggestions.rs`: same edit families (related-char
//! swaps, delete/double-delete, transpositions, TRY-alphabet
//! insert/replace, keyboard-adjacency, word splitting, case-switch, and
//! the n-gram/edit-distance fallback), rewired to push into `Collector`
//! instead of `SuggCollector` and to score directly against the word
//! graph's stored forms rather than re-deriving from roots.

use fnv::FnvHashSet;
use itertools::Itertools;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::mem::swap;

use crate::casing::switch_case;
use crate::delins::delins;
use crate::hunspell::collector::Collector;
use crate::hunspell::wordflags::WordFlags;
use crate::ngram::ngram;
use crate::word_graph::WordGraph;

const MAX_NGRAM_ROOTS: usize = 100;
const MAX_NGRAM_SUGG: usize = 20;
const MAX_DELINS_ROOTS: usize = 100;
/// This is a heuristic. Suggestions scoring worse than this are not offered.
const MAX_DELINS_SCORE: usize = 5;

fn unsuggestable(flags: WordFlags) -> bool {
    flags.intersects(WordFlags::Forbidden | WordFlags::NoSuggest | WordFlags::OnlyInCompound)
}

pub fn related_char_suggestions(related: &[String], word: &str, collector: &mut Collector) {
    collector.new_source(0);
    let wvec: Vec<char> = word.chars().collect();
    let mut candidates: Vec<Vec<char>> = vec![wvec.clone()];

    for rc in related.iter() {
        for i in 0..wvec.len() {
            if rc.contains(wvec[i]) {
                let mut new_candidates: Vec<Vec<char>> = Vec::new();
                for cnd in candidates.drain(..) {
                    for newc in rc.chars() {
                        if newc == wvec[i] {
                            continue;
                        }
                        let mut newcnd: Vec<char> = cnd.clone();
                        newcnd[i] = newc;
                        let newword = newcnd.iter().collect::<String>();
                        collector.suggest(&newword);
                        if collector.limit() {
                            return;
                        }
                        new_candidates.push(newcnd);
                    }
                    new_candidates.push(cnd);
                }
                swap(&mut candidates, &mut new_candidates);
            }
        }
    }
}

pub fn delete_char_suggestions(word: &str, collector: &mut Collector) {
    collector.new_source(0);
    let mut sugg = String::with_capacity(word.len());
    for (i, c) in word.char_indices() {
        sugg.clear();
        sugg.push_str(&word[..i]);
        sugg.push_str(&word[i + c.len_utf8()..]);
        collector.suggest(&sugg);
        if collector.limit() {
            return;
        }
    }
}

/// bananana -> banana
pub fn delete_doubled_pair_suggestions(word: &str, collector: &mut Collector) {
    collector.new_source(0);
    let mut sugg = String::with_capacity(word.len());
    for ((i1, c1), (_, c2), (i3, c3), (_, c4)) in word.char_indices().tuple_windows() {
        if c1 == c3 && c2 == c4 {
            sugg.clear();
            sugg.push_str(&word[..i1]);
            sugg.push_str(&word[i3..]);
            collector.suggest(&sugg);
            if collector.limit() {
                return;
            }
        }
    }
}

pub fn swap_char_suggestions(word: &str, collector: &mut Collector) {
    collector.new_source(0);
    let mut sugg = String::with_capacity(word.len());
    for ((i1, c1), (i2, c2)) in word.char_indices().tuple_windows() {
        sugg.clear();
        sugg.push_str(&word[..i1]);
        sugg.push(c2);
        sugg.push(c1);
        sugg.push_str(&word[i2 + c2.len_utf8()..]);
        collector.suggest(&sugg);
        if collector.limit() {
            return;
        }
    }

    for (i1, c1) in word.char_indices() {
        let after_i1 = i1 + c1.len_utf8();
        for (i2, c2) in word[after_i1..].char_indices() {
            if i2 == 0 {
                continue;
            }
            let real_i2 = after_i1 + i2;
            let after_i2 = real_i2 + c2.len_utf8();
            sugg.clear();
            sugg.push_str(&word[..i1]);
            sugg.push(c2);
            sugg.push_str(&word[after_i1..real_i2]);
            sugg.push(c1);
            sugg.push_str(&word[after_i2..]);
            collector.suggest(&sugg);
            if collector.limit() {
                return;
            }
        }
    }
}

pub fn move_char_suggestions(word: &str, collector: &mut Collector) {
    collector.new_source(0);
    let mut sugg = String::with_capacity(word.len());
    for (i1, c1) in word.char_indices() {
        let after_i1 = i1 + c1.len_utf8();
        for (i2, c2) in word[after_i1..].char_indices() {
            if i2 == 0 {
                continue;
            }
            let real_i2 = after_i1 + i2;
            let after_i2 = real_i2 + c2.len_utf8();
            sugg.clear();
            sugg.push_str(&word[..i1]);
            sugg.push_str(&word[after_i1..after_i2]);
            sugg.push(c1);
            sugg.push_str(&word[after_i2..]);
            collector.suggest(&sugg);
            sugg.truncate(i1);
            sugg.push(c2);
            sugg.push_str(&word[i1..real_i2]);
            sugg.push_str(&word[after_i2..]);
            collector.suggest(&sugg);
            if collector.limit() {
                return;
            }
        }
    }
}

pub fn add_char_suggestions(word: &str, try_chars: &str, collector: &mut Collector) {
    collector.new_source(0);
    for tc in try_chars.chars() {
        let mut sugg = String::with_capacity(word.len() + tc.len_utf8());
        for (i, _) in word.char_indices() {
            sugg.clear();
            sugg.push_str(&word[..i]);
            sugg.push(tc);
            sugg.push_str(&word[i..]);
            collector.suggest(&sugg);
            if collector.limit() {
                return;
            }
        }
        sugg.clear();
        sugg.push_str(word);
        sugg.push(tc);
        collector.suggest(&sugg);
        if collector.limit() {
            return;
        }
    }
}

pub fn replace_char_suggestions(word: &str, try_chars: &str, collector: &mut Collector) {
    collector.new_source(0);
    let mut sugg = String::with_capacity(word.len() + 3);

    for tc in try_chars.chars() {
        for (i, c) in word.char_indices() {
            sugg.clear();
            sugg.push_str(&word[..i]);
            sugg.push(tc);
            sugg.push_str(&word[i + c.len_utf8()..]);
            collector.suggest(&sugg);
            if collector.limit() {
                return;
            }
        }
    }
}

/// `keyboard` contains a |-separated list of horizontally adjacent keys.
pub fn wrong_key_suggestions(word: &str, keyboard: &str, collector: &mut Collector) {
    collector.new_source(0);
    let mut sugg = String::with_capacity(word.len());

    for (i, c) in word.char_indices() {
        for (kc1, kc2) in keyboard.chars().tuple_windows() {
            if kc1 == c && kc2 != '|' {
                sugg.clear();
                sugg.push_str(&word[..i]);
                sugg.push(kc2);
                sugg.push_str(&word[i + c.len_utf8()..]);
                collector.suggest(&sugg);
            }
            if kc2 == c && kc1 != '|' {
                sugg.clear();
                sugg.push_str(&word[..i]);
                sugg.push(kc1);
                sugg.push_str(&word[i + c.len_utf8()..]);
                collector.suggest(&sugg);
            }
            if collector.limit() {
                return;
            }
        }
    }
}

pub fn split_word_suggestions(word: &str, graph: &WordGraph<WordFlags>, collector: &mut Collector) {
    collector.new_source(0);
    for ((_, c1), (i2, c2)) in word.char_indices().tuple_windows() {
        if c1 == '-' || c2 == '-' {
            continue;
        }
        if graph.has(&word[..i2]) && graph.has(&word[i2..]) {
            let sugg = format!("{} {}", &word[..i2], &word[i2..]);
            collector.suggest_priority(&sugg);
            if collector.limit() {
                return;
            }
        }
    }
}

/// Did the user forget to hit shift on one letter? Also tries flipping
/// the case of everything from the first non-matching letter onward.
pub fn capitalize_char_suggestions(word: &str, collector: &mut Collector) {
    collector.new_source(0);
    let mut sugg = String::with_capacity(word.len());
    for (i, c) in word.char_indices() {
        if c.is_uppercase() {
            continue;
        }
        sugg.clear();
        sugg.push_str(&word[..i]);
        for c_up in c.to_uppercase() {
            sugg.push(c_up);
        }
        sugg.push_str(&word[i + c.len_utf8()..]);
        collector.suggest(&sugg);
        if collector.limit() {
            return;
        }
    }
    collector.suggest(&switch_case(word));
}

#[derive(Eq, PartialEq)]
struct HeapItem<T> {
    word: T,
    score: usize,
}

impl<T: Eq> PartialOrd for HeapItem<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Eq> Ord for HeapItem<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by score: `other` compares first.
        other.score.cmp(&self.score)
    }
}

/// Edit-distance-bounded fallback using n-gram similarity scoring,
/// implementing §4.5.1 step 6's "search the whole word list" procedure.
pub fn ngram_suggestions(word: &str, graph: &WordGraph<WordFlags>, collector: &mut Collector) {
    collector.new_source(0);
    if collector.limit() {
        return;
    }

    let wvec = word.chars().collect::<Vec<char>>();
    let all_words = graph.words();

    let mut rootscores: Vec<HeapItem<&str>> = all_words
        .par_iter()
        .filter_map(|(candidate, flags)| {
            if unsuggestable(*flags) {
                return None;
            }
            let cvec = candidate.chars().collect::<Vec<char>>();
            if cvec.len() > wvec.len() + 2 {
                return None;
            }
            let score = ngram(3, &wvec, &cvec);
            Some(HeapItem {
                word: candidate.as_str(),
                score,
            })
        })
        .collect();
    rootscores.sort_unstable_by_key(|item| std::cmp::Reverse(item.score));
    rootscores.truncate(MAX_NGRAM_ROOTS);

    let heuristic = ngram(1, &wvec, &wvec);
    let mut suggheap: BinaryHeap<HeapItem<String>> = BinaryHeap::with_capacity(MAX_NGRAM_SUGG);
    let mut uniq: FnvHashSet<&str> = FnvHashSet::default();
    for HeapItem { word: candidate, score } in rootscores {
        if score <= heuristic || uniq.contains(candidate) {
            continue;
        }
        uniq.insert(candidate);
        if suggheap.len() == MAX_NGRAM_SUGG && score > suggheap.peek().unwrap().score {
            suggheap.pop();
        }
        if suggheap.len() < MAX_NGRAM_SUGG {
            suggheap.push(HeapItem {
                word: candidate.to_string(),
                score,
            });
        }
    }
    for HeapItem { word: sugg, .. } in suggheap.into_sorted_vec() {
        collector.suggest(&sugg);
        if collector.limit() {
            return;
        }
    }
}

#[derive(Eq, PartialEq)]
struct DelinsHeapItem<T> {
    word: T,
    score: usize,
}

impl<T: Eq> PartialOrd for DelinsHeapItem<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Eq> Ord for DelinsHeapItem<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.cmp(&other.score)
    }
}

/// Same as `ngram_suggestions` but scored with edit distance (lower is
/// better), per the §4.5.1 step 6 batching formula's edit-distance leg.
pub fn delins_suggestions(word: &str, graph: &WordGraph<WordFlags>, collector: &mut Collector) {
    collector.new_source(0);
    if collector.limit() {
        return;
    }

    let wvec = word.chars().collect::<Vec<char>>();
    let all_words = graph.words();

    let mut rootscores: Vec<DelinsHeapItem<&str>> = all_words
        .par_iter()
        .filter_map(|(candidate, flags)| {
            if unsuggestable(*flags) {
                return None;
            }
            let cvec = candidate.chars().collect::<Vec<char>>();
            if cvec.len() > wvec.len() + 2 {
                return None;
            }
            let score = delins(&wvec, &cvec, MAX_DELINS_SCORE);
            if score > MAX_DELINS_SCORE {
                return None;
            }
            Some(DelinsHeapItem {
                word: candidate.as_str(),
                score,
            })
        })
        .collect();
    rootscores.sort_unstable_by_key(|a| a.score);
    rootscores.truncate(MAX_DELINS_ROOTS);

    for DelinsHeapItem { word: sugg, .. } in rootscores {
        collector.suggest(sugg);
        if collector.limit() {
            return;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn delete_char_finds_extra_letter() {
        let mut g = WordGraph::new();
        g.insert("word", WordFlags::empty());
        let mut c = Collector::new("wordd", &g, 10);
        delete_char_suggestions("wordd", &mut c);
        let suggs: Vec<String> = c.into_suggestions().into_iter().map(|s| s.word).collect();
        assert!(suggs.contains(&"word".to_string()));
    }

    #[test]
    fn swap_char_finds_transposition() {
        let mut g = WordGraph::new();
        g.insert("word", WordFlags::empty());
        let mut c = Collector::new("wrod", &g, 10);
        swap_char_suggestions("wrod", &mut c);
        let suggs: Vec<String> = c.into_suggestions().into_iter().map(|s| s.word).collect();
        assert!(suggs.contains(&"word".to_string()));
    }

    #[test]
    fn split_word_only_suggests_known_pairs() {
        let mut g = WordGraph::new();
        g.insert("ice", WordFlags::empty());
        g.insert("cream", WordFlags::empty());
        let mut c = Collector::new("icecream", &g, 10);
        split_word_suggestions("icecream", &g, &mut c);
        let suggs: Vec<String> = c.into_suggestions().into_iter().map(|s| s.word).collect();
        assert_eq!(suggs, vec!["ice cream".to_string()]);
    }

    #[test]
    fn ngram_suggestions_finds_close_words() {
        let mut g = WordGraph::new();
        g.insert("word", WordFlags::empty());
        g.insert("completely_unrelated_term", WordFlags::empty());
        let mut c = Collector::new("wordd", &g, 10);
        ngram_suggestions("wordd", &g, &mut c);
        let suggs: Vec<String> = c.into_suggestions().into_iter().map(|s| s.word).collect();
        assert!(suggs.contains(&"word".to_string()));
    }
}
