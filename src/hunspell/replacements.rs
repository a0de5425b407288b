#[derive(Debug, Default)]
struct Rep {
    anchor_begin: bool,
    anchor_end: bool,
    from: String,
    to: String,
}

impl Rep {
    fn matches(&self, word: &str, at_start: bool) -> bool {
        if self.anchor_begin && !at_start {
            false
        } else if self.anchor_end {
            word == self.from
        } else {
            word.starts_with(&self.from)
        }
    }
}

#[derive(Debug, Default)]
pub struct Replacements {
    reps: Vec<Rep>,
}

impl Replacements {
    pub fn push(&mut self, from: &str, to: &str) {
        let mut rep = Rep::default();
        let mut from = from;
        if from.starts_with('^') {
            from = &from[1..];
            rep.anchor_begin = true;
        }
        if from.ends_with('$') {
            from = &from[..from.len() - 1];
            rep.anchor_end = true;
        }
        rep.from = from.to_string();
        rep.to = to.to_string();
        self.reps.push(rep);
    }

    pub fn suggest(&self, word: &str, mut suggest: impl FnMut(String) -> bool) {
        for (i, _) in word.char_indices() {
            // TODO: optimize by putting start-anchored reps in a separate list
            for rep in self.reps.iter() {
                if rep.matches(&word[i..], i == 0) {
                    let mut sugg = word[..i].to_string();
                    sugg += &rep.to;
                    sugg += &word[i + rep.from.len()..];
                    if !suggest(sugg) {
                        break;
                    }
                }
            }
        }
    }
}
