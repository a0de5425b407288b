use criterion::{black_box, criterion_group, criterion_main, Criterion};

use caseless::default_case_fold_str;

use hunspell_engine::SpellChecker;

// Small embedded affix file exercising PFX/SFX expansion, a REP table and
// a TRY alphabet, in the shape of a real en_US .aff without pulling in an
// external dictionary.
const AFF: &str = "\
SET UTF-8
TRY esianrtolcdugmphbyfvkwzESIANRTOLCDUGMPHBYFVKWZ'
FLAG num

REP 3
REP f ph
REP teh the
REP recieve receive

PFX 1 Y 1
PFX 1 0 re .

SFX 2 Y 3
SFX 2 0 s .
SFX 2 0 ed .
SFX 2 0 ing .
";

// A few hundred common words, one per line, some carrying the PFX/SFX
// flags declared above so affix expansion has real work to do.
const DIC_WORDS: &[&str] = &[
    "word/2", "work/2", "world", "write/2", "wrong", "walk/2", "watch/2", "water", "wave/2",
    "way", "weak", "wealth", "wear/2", "weather", "week", "weight", "welcome/2", "west",
    "wheel", "when", "where", "while", "white", "whole", "why", "wide", "wife", "wild",
    "will", "win/2", "wind/2", "window", "wine", "wing", "winter", "wire", "wise", "wish/2",
    "with", "within", "without", "witness", "woman", "wonder/2", "wood", "wool", "word",
    "view/2", "village", "violence", "virtue", "visible", "vision", "visit/1", "voice/2",
    "vote/1", "volume", "think/2", "thing", "this", "thought", "thousand", "thread",
    "three", "throat", "through", "throw/2", "thumb", "thunder", "ticket", "tide", "tie/2",
    "tight", "time", "tin", "tired", "title", "toe", "together", "tomorrow", "tone",
    "tongue", "tonight", "tooth", "top", "total", "touch/2", "tough", "tour/2", "toward",
    "tower", "town", "trade/1", "train/2", "translate/1", "transport/1", "trap/2", "travel/1",
    "treat/2", "tree", "trial", "tribe", "trick/2", "trouble/1", "trousers", "truck",
    "true", "trust/2", "truth", "try/2", "tube", "turn/2", "twice", "twist/2", "unit",
    "unite/1", "use/1", "usual", "value/1", "valley",
];

fn build_dic() -> String {
    let mut out = format!("{}\n", DIC_WORDS.len());
    for w in DIC_WORDS {
        out.push_str(w);
        out.push('\n');
    }
    out
}

fn load_checker(c: &mut Criterion) {
    let dic = build_dic();
    c.bench_function("load_checker", |b| {
        b.iter(|| SpellChecker::new(black_box(AFF), Some(black_box(&dic))).unwrap())
    });
}

fn suggest_typo(c: &mut Criterion) {
    let dic = build_dic();
    let mut checker = SpellChecker::new(AFF, Some(&dic)).unwrap();

    dbg!(checker.suggest("wrold", 9));

    c.bench_function("suggest_wrold", |b| {
        b.iter(|| checker.suggest(black_box("wrold"), 9))
    });
}

fn suggest_replacement(c: &mut Criterion) {
    let dic = build_dic();
    let mut checker = SpellChecker::new(AFF, Some(&dic)).unwrap();

    dbg!(checker.suggest("teh", 9));

    c.bench_function("suggest_teh", |b| {
        b.iter(|| checker.suggest(black_box("teh"), 9))
    });
}

fn spellcheck_words(c: &mut Criterion) {
    let dic = build_dic();
    let mut checker = SpellChecker::new(AFF, Some(&dic)).unwrap();

    // Every dictionary word, its "rewords" expansions, and a handful of
    // deliberately misspelled forms mixed in.
    let mut sample: Vec<String> = DIC_WORDS
        .iter()
        .map(|w| w.split_once('/').map(|(root, _)| root).unwrap_or(w).to_string())
        .collect();
    sample.push("wrold".to_string());
    sample.push("recieve".to_string());
    sample.push("teh".to_string());

    c.bench_function("spellcheck_words", |b| {
        b.iter(|| {
            for word in &sample {
                black_box(checker.spell(black_box(word)));
            }
        })
    });
}

fn ngram_loop(c: &mut Criterion) {
    let words: Vec<Vec<char>> = DIC_WORDS
        .iter()
        .map(|w| w.split_once('/').map(|(root, _)| root).unwrap_or(w))
        .map(|w| w.chars().collect())
        .collect();

    c.bench_function("ngram_loop", |b| {
        b.iter(|| {
            for w1 in &words {
                for w2 in &words {
                    black_box(hunspell_engine::ngram::ngram(3, w1, w2));
                }
            }
        });
    });
}

fn casefold_loop(c: &mut Criterion) {
    c.bench_function("default_case_fold_str", |b| {
        b.iter(|| {
            black_box(default_case_fold_str(black_box("Daniel")));
            black_box(default_case_fold_str(black_box("LICHTENSTEIN")));
            black_box(default_case_fold_str(black_box("marmalade")));
            black_box(default_case_fold_str(black_box("PTOLEMEE")));
            black_box(default_case_fold_str(black_box("palissandre")));
        });
    });
    c.bench_function("tolower", |b| {
        b.iter(|| {
            black_box(black_box("Daniel").to_lowercase());
            black_box(black_box("LICHTENSTEIN").to_lowercase());
            black_box(black_box("marmalade").to_lowercase());
            black_box(black_box("PTOLEMEE").to_lowercase());
            black_box(black_box("palissandre").to_lowercase());
        });
    });
}

criterion_group!(load, load_checker);
criterion_group!(suggest, suggest_typo, suggest_replacement);
criterion_group!(spellcheck, spellcheck_words);
criterion_group!(ngram, ngram_loop);
criterion_group!(casefold, casefold_loop);
criterion_main!(load, suggest, spellcheck, ngram, casefold);
