use crate::builtins::builtin_names;

const MAX_DISTANCE: usize = 3;

/// Closest registered function name within edit distance 3, compared
/// case-insensitively. Ties keep the earlier registry entry.
pub fn suggest_function(name: &str) -> Option<&'static str> {
    let needle = name.to_lowercase();
    let mut best: Option<(&'static str, usize)> = None;
    for candidate in builtin_names() {
        let d = levenshtein(&needle, candidate);
        if d <= MAX_DISTANCE && best.is_none_or(|(_, bd)| d < bd) {
            best = Some((candidate, d));
        }
    }
    best.map(|(n, _)| n)
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            cur[j + 1] = (prev[j + 1] + 1).min(cur[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("upper", "upper"), 0);
    }

    #[test]
    fn suggestions() {
        assert_eq!(suggest_function("uper"), Some("upper"));
        assert_eq!(suggest_function("UPPER"), Some("upper"));
        assert_eq!(suggest_function("lenght"), Some("len"));
        assert_eq!(suggest_function("random_integer"), None);
        assert_eq!(suggest_function("completely_unrelated"), None);
    }
}
