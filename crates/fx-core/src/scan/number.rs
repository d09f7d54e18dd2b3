use crate::unicode::{digit_run, magnitude_exponent};

/// Candidate end offsets for a number literal at the start of `s`, most
/// preferred first.
///
/// Grammar: 1–3 digits followed by `,ddd` groups (or an ungrouped run of
/// more than three digits), an optional `.digits` fraction and an optional
/// k/m/b/t suffix. Callers pick the first candidate that satisfies their
/// trailing context, which mirrors regex backtracking over the same grammar.
///
/// The ungrouped form is wider than a strictly grouped grammar, which would
/// reject `$1234`; without it a 16-digit literal could never reach the
/// too-large check.
pub(crate) fn number_candidates(s: &str) -> Vec<usize> {
    let run = digit_run(s);
    if run == 0 {
        return Vec::new();
    }

    let mut int_ends = vec![run];
    if run <= 3 {
        let mut end = run;
        while s[end..].starts_with(',') && digit_run(&s[end + 1..]) >= 3 {
            end += 4;
            int_ends.push(end);
        }
        int_ends.reverse();
    }

    let mut out = Vec::new();
    for int_end in int_ends {
        let mut bases = Vec::with_capacity(2);
        if s[int_end..].starts_with('.') {
            let frac = digit_run(&s[int_end + 1..]);
            if frac > 0 {
                bases.push(int_end + 1 + frac);
            }
        }
        bases.push(int_end);

        for base in bases {
            let suffixed = s[base..]
                .chars()
                .next()
                .and_then(magnitude_exponent)
                .is_some();
            if suffixed {
                out.push(base + 1);
            }
            out.push(base);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literals(s: &str) -> Vec<&str> {
        number_candidates(s).into_iter().map(|e| &s[..e]).collect()
    }

    #[test]
    fn plain_and_grouped() {
        assert_eq!(literals("42 "), vec!["42"]);
        assert_eq!(literals("1,234,567."), vec!["1,234,567", "1,234", "1"]);
        assert_eq!(literals("12345"), vec!["12345"]);
    }

    #[test]
    fn partial_group_is_not_taken() {
        assert_eq!(literals("1,23"), vec!["1"]);
        assert_eq!(literals("12345,678"), vec!["12345"]);
    }

    #[test]
    fn fraction_and_suffix() {
        assert_eq!(literals("2.5k"), vec!["2.5k", "2.5", "2"]);
        assert_eq!(literals("1.5M USD"), vec!["1.5M", "1.5", "1"]);
        assert_eq!(literals("3. "), vec!["3"]);
        assert_eq!(literals("7b"), vec!["7b", "7"]);
    }

    #[test]
    fn no_digits() {
        assert!(number_candidates("abc").is_empty());
        assert!(number_candidates("").is_empty());
        assert!(number_candidates(",100").is_empty());
    }
}
