/// Calculate a score for the similarity between `str1` and `str2`.
/// `nmax` is a bound on how large chunks should be considered for similarity.
pub fn ngram(nmax: usize, str1: &[char], str2: &[char]) -> usize {
    let mut score = 0;

    // handle n = 1 as a special case because it is so much simpler
    for c1 in str1 {
        for c2 in str2 {
            score += (c1 == c2) as usize
        }
    }
    if nmax == 1 || score <= 1 {
        return score;
    }

    for n in 2..=nmax {
        let mut nscore = 0;
        if n > str1.len() || n > str2.len() {
            break;
        }
        for w1 in str1.windows(n) {
            for w2 in str2.windows(n) {
                if w1 == w2 {
                    nscore += 1;
                }
            }
        }
        score += nscore * n;
        if nscore <= 1 {
            // If there's only 1 hit of this size, there are no longer hits
            break;
        }
    }

    score
}

#[cfg(test)]
mod test {
    use super::*;

    fn ngram_helper(nmax: usize, s1: &str, s2: &str) -> usize {
        let v1: Vec<char> = s1.chars().collect();
        let v2: Vec<char> = s2.chars().collect();
        ngram(nmax, &v1, &v2)
    }

    #[test]
    fn test_ngram_scores() {
        assert_eq!(0, ngram_helper(1, "foo", "bar"));
        assert_eq!(6, ngram_helper(1, "awooo", "foo"));
        assert_eq!(10, ngram_helper(2, "awooo", "foo"));
        assert_eq!(10, ngram_helper(3, "awooo", "foo"));
        assert_eq!(9, ngram_helper(1, "awooo", "awooga"));
        assert_eq!(17, ngram_helper(2, "awooo", "awooga"));
        assert_eq!(23, ngram_helper(3, "awooo", "awooga"));
        assert_eq!(27, ngram_helper(4, "awooo", "awooga"));
        assert_eq!(27, ngram_helper(5, "awooo", "awooga"));
    }
}
