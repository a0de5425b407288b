//! `.dic` and personal-dictionary loading (spec §4.2, §4.6, §6.2, §6.3).

use crate::hunspell::affixdata::{AffixData, AffixFlag};
use crate::hunspell::rule::{expand, AffixKind};
use crate::hunspell::wordflags::WordFlags;
use crate::word_graph::WordGraph;

/// Split a `.dic`/personal-dictionary word field on its first unescaped
/// `/`, per §6.2. `\/` is a literal slash in the word itself.
fn split_flags(field: &str) -> (String, Option<&str>) {
    let bytes = field.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'/' && (i == 0 || bytes[i - 1] != b'\\') {
            let word = field[..i].replace("\\/", "/");
            return (word, Some(&field[i + 1..]));
        }
        i += 1;
    }
    (field.replace("\\/", "/"), None)
}

fn word_flags_from_codes(codes: &[AffixFlag], model: &AffixData) -> WordFlags {
    let mut wf = WordFlags::empty();
    let f = &model.flags;
    let has = |opt: Option<AffixFlag>| opt.is_some_and(|flag| codes.contains(&flag));
    if has(f.forbidden_word) {
        wf |= WordFlags::Forbidden;
    }
    if has(f.no_suggest) {
        wf |= WordFlags::NoSuggest;
    }
    if has(f.warn) {
        wf |= WordFlags::Warn;
    }
    if has(f.keep_case) {
        wf |= WordFlags::KeepCase;
    }
    if has(f.only_in_compound) {
        wf |= WordFlags::OnlyInCompound;
    }
    if has(f.need_affix) {
        wf |= WordFlags::NeedAffix;
    }
    if has(f.circumfix) {
        wf |= WordFlags::Circumfix;
    }
    if has(f.compound_begin) {
        wf |= WordFlags::CompoundBegin;
    }
    if has(f.compound_middle) {
        wf |= WordFlags::CompoundMiddle;
    }
    if has(f.compound_end) {
        wf |= WordFlags::CompoundEnd;
    }
    if has(f.compound_permit) {
        wf |= WordFlags::CompoundPermit;
    }
    wf
}

/// Add one root word and every surface form its affix flags derive, per
/// the `AddRoot` algorithm.
fn add_root(root: &str, codes: &[AffixFlag], model: &mut AffixData, graph: &mut WordGraph<WordFlags>) {
    let wf = word_flags_from_codes(codes, model);

    for &flag in codes {
        if let Some(roots) = model.compound_rule_codes.get_mut(&flag) {
            roots.push(root.to_string());
        }
    }

    if !wf.contains(WordFlags::NeedAffix) {
        graph.insert(root, wf);
    }

    let prefix_flags: Vec<AffixFlag> = codes
        .iter()
        .copied()
        .filter(|f| matches!(model.rules.get(f), Some(r) if r.kind == AffixKind::Prefix))
        .collect();
    let suffix_flags: Vec<AffixFlag> = codes
        .iter()
        .copied()
        .filter(|f| matches!(model.rules.get(f), Some(r) if r.kind == AffixKind::Suffix))
        .collect();

    let mut derived: Vec<String> = Vec::new();
    for &flag in &suffix_flags {
        if let Some(rule) = model.rules.get(&flag) {
            derived.extend(expand(root, rule, model, 0));
        }
    }
    for &flag in &prefix_flags {
        if let Some(rule) = model.rules.get(&flag) {
            derived.extend(expand(root, rule, model, 0));
        }
    }

    // Combineable cross product: a prefix rule and a suffix rule both
    // marked combineable apply together, each derived form of one feeding
    // the other.
    for &sflag in &suffix_flags {
        let Some(srule) = model.rules.get(&sflag) else {
            continue;
        };
        if !srule.combineable {
            continue;
        }
        let suffixed = expand(root, srule, model, 0);
        for &pflag in &prefix_flags {
            let Some(prule) = model.rules.get(&pflag) else {
                continue;
            };
            if !prule.combineable {
                continue;
            }
            for form in &suffixed {
                derived.extend(expand(form, prule, model, 0));
            }
        }
    }

    for form in derived {
        graph.insert(&form, wf);
    }
}

/// Load a `.dic` file's text into `graph`, updating `model`'s
/// compound-rule-code buckets as roots are added.
///
/// The first non-blank line is consumed and ignored only if it is a pure
/// decimal word count (spec §4.2, §6.2); otherwise every non-blank line is
/// a dictionary entry, so incremental payloads without a count line still
/// load their first word.
pub fn load_dic(text: &str, graph: &mut WordGraph<WordFlags>, model: &mut AffixData) {
    let mut lines = text.lines();
    let mut first = None;
    for line in lines.by_ref() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.parse::<u64>().is_err() {
            first = Some(line);
        }
        break;
    }

    for line in first.into_iter().chain(lines) {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let field = line.split('\t').next().unwrap_or(line);
        let (word, flag_str) = split_flags(field);
        if word.is_empty() {
            continue;
        }
        let codes = flag_str
            .and_then(|f| model.parse_flags(f).ok())
            .unwrap_or_default();
        add_root(&word, &codes, model, graph);
    }
}

/// Load a personal dictionary (spec §4.6, §6.3): `*word` forbids it,
/// `word/model` adds it inheriting another word's affix flags, plain
/// `word` adds it with no affixes.
pub fn load_personal(text: &str, graph: &mut WordGraph<WordFlags>, _model: &mut AffixData) {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(forbidden) = line.strip_prefix('*') {
            let wf = graph.get_flags(forbidden).unwrap_or_else(WordFlags::empty) | WordFlags::Forbidden;
            graph.insert(forbidden, wf);
            continue;
        }
        let (word, inherit) = split_flags(line);
        if word.is_empty() {
            continue;
        }
        let wf = match inherit {
            Some(model_word) => graph.get_flags(model_word).unwrap_or_else(WordFlags::empty),
            None => WordFlags::empty(),
        };
        graph.insert(&word, wf);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn splits_escaped_slash() {
        assert_eq!(split_flags("km/h").0, "km");
        assert_eq!(split_flags("km\\/h").0, "km/h");
        assert_eq!(split_flags("km\\/h").1, None);
    }

    #[test]
    fn loads_plain_roots() {
        let mut ad = AffixData::new();
        let mut graph = WordGraph::new();
        load_dic("2\nfoo\nbar\n", &mut graph, &mut ad);
        assert!(graph.has("foo"));
        assert!(graph.has("bar"));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn loads_without_a_leading_count_line() {
        let mut ad = AffixData::new();
        let mut graph = WordGraph::new();
        load_dic("foo\nbar\n", &mut graph, &mut ad);
        assert!(graph.has("foo"));
        assert!(graph.has("bar"));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn needaffix_root_is_not_inserted_alone() {
        let mut ad = AffixData::new();
        ad.flags.need_affix = Some('A' as AffixFlag);
        let mut graph = WordGraph::new();
        load_dic("1\nfoo/A\n", &mut graph, &mut ad);
        assert!(!graph.has("foo"));
    }

    #[test]
    fn personal_dictionary_forbids_and_inherits() {
        let mut ad = AffixData::new();
        let mut graph = WordGraph::new();
        graph.insert("model", WordFlags::CompoundBegin);
        load_personal("*badword\ngoodword\nnewword/model\n", &mut graph, &mut ad);
        assert!(graph.get_flags("badword").unwrap().contains(WordFlags::Forbidden));
        assert!(graph.has("goodword"));
        assert!(graph
            .get_flags("newword")
            .unwrap()
            .contains(WordFlags::CompoundBegin));
    }

    #[test]
    fn forbidding_a_word_preserves_its_existing_flags() {
        let mut ad = AffixData::new();
        let mut graph = WordGraph::new();
        graph.insert("rareword", WordFlags::Warn);
        load_personal("*rareword\n", &mut graph, &mut ad);
        let wf = graph.get_flags("rareword").unwrap();
        assert!(wf.contains(WordFlags::Forbidden));
        assert!(wf.contains(WordFlags::Warn));
    }
}
