//! `ICONV`/`OCONV` transliteration tables (spec §3.2, §6.1).
//!
//! Shaped like `Replacements`, but every entry is tried in declaration
//! order and the *first* match wins rather than the longest one: ICONV
//! pairs are meant to fire once per occurrence while scanning left to
//! right, not to prefer the longest of several overlapping rewrites.

#[derive(Debug, Default)]
pub struct Conversion {
    pairs: Vec<(String, String)>,
}

impl Conversion {
    pub fn push(&mut self, from: &str, to: &str) {
        self.pairs.push((from.to_string(), to.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Apply every matching rule once, left to right.
    pub fn apply(&self, text: &str) -> String {
        if self.pairs.is_empty() {
            return text.to_string();
        }
        let mut output = String::with_capacity(text.len());
        let mut skip_to = 0;
        for (i, c) in text.char_indices() {
            if i < skip_to {
                continue;
            }
            if let Some((from, to)) = self.pairs.iter().find(|(from, _)| text[i..].starts_with(from.as_str()))
            {
                output.push_str(to);
                skip_to = i + from.len();
            } else {
                output.push(c);
            }
        }
        output
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn applies_left_to_right() {
        let mut conv = Conversion::default();
        conv.push("a", "b");
        assert_eq!(conv.apply("banana"), "bbnbnb");
    }

    #[test]
    fn empty_conversion_is_identity() {
        let conv = Conversion::default();
        assert_eq!(conv.apply("hello"), "hello");
    }
}
