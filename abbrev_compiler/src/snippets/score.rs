//! Fuzzy matching of abbreviations against snippet keys
//!
//! Both strings must start with the same character. Characters of the
//! abbreviation found early in the candidate score higher, and a match
//! right after a `-` in the candidate scores as if it sat at the
//! abbreviation's own position (acronym bonus).

/// Similarity of `abbr` to `candidate` in `0.0..=1.0`
///
/// `partial_match` allows the abbreviation to be longer than the candidate
/// or to contain characters the candidate lacks; the unmatched tail then
/// just lowers the score.
pub fn score_match(abbr: &str, candidate: &str, partial_match: bool) -> f64 {
    let str1: Vec<char> = abbr.to_lowercase().chars().collect();
    let str2: Vec<char> = candidate.to_lowercase().chars().collect();

    if str1 == str2 {
        return 1.0;
    }
    if str1.is_empty() || str2.is_empty() || str1[0] != str2[0] {
        return 0.0;
    }

    let len1 = str1.len();
    let len2 = str2.len();
    if !partial_match && len1 > len2 {
        return 0.0;
    }

    let min_length = len1.min(len2);
    let max_length = len1.max(len2);
    let mut i = 1;
    let mut j = 1;
    let mut score = max_length;

    while i < len1 {
        let ch1 = str1[i];
        let mut found = false;
        let mut acronym = false;

        while j < len2 {
            let ch2 = str2[j];
            if ch1 == ch2 {
                found = true;
                score += max_length - if acronym { i } else { j };
                break;
            }
            acronym = ch2 == '-';
            j += 1;
        }

        if !found {
            if !partial_match {
                return 0.0;
            }
            break;
        }
        i += 1;
    }

    let match_ratio = i as f64 / max_length as f64;
    let delta = max_length - min_length;
    let max_score = sum(max_length) - sum(delta);
    (score as f64 * match_ratio) / max_score as f64
}

fn sum(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Best scoring item; equal scores keep the later item
///
/// An exact hit returns immediately. Items scoring zero never match, and the
/// winner must reach `min_score`.
pub fn find_best_match<'a, T, F>(
    abbr: &str,
    items: impl IntoIterator<Item = &'a T>,
    key: F,
    min_score: f64,
    partial_match: bool,
) -> Option<&'a T>
where
    T: ?Sized + 'a,
    F: Fn(&T) -> &str,
{
    let mut matched = None;
    let mut max_score = 0.0;

    for item in items {
        let score = score_match(abbr, key(item), partial_match);
        if score == 1.0 {
            return Some(item);
        }
        if score > 0.0 && score >= max_score {
            max_score = score;
            matched = Some(item);
        }
    }

    if max_score >= min_score {
        matched
    } else {
        None
    }
}

/// Tail of `abbr` whose characters could not be found, in order, in `key`
///
/// For `dib` matched against `d` the unmatched part is `ib`.
pub fn unmatched_part(abbr: &str, key: &str) -> String {
    let key: Vec<char> = key.chars().collect();
    let abbr: Vec<char> = abbr.chars().collect();
    let mut last_pos = 0;

    for (i, ch) in abbr.iter().enumerate() {
        match key.iter().skip(last_pos).position(|c| c == ch) {
            Some(found) => last_pos += found + 1,
            None => return abbr[i..].iter().collect(),
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_and_mismatched_first_char() {
        assert_eq!(score_match("bg", "BG", false), 1.0);
        assert_eq!(score_match("x", "background", false), 0.0);
        assert_eq!(score_match("", "a", false), 0.0);
    }

    #[test]
    fn test_earlier_matches_score_higher() {
        assert!(score_match("abd", "abcde", false) > score_match("abe", "abcde", false));
    }

    #[test]
    fn test_length_normalization_favors_short_candidates() {
        // 16 * (2 / 10) / 19 and 4 * (2 / 3) / 5
        let background = score_match("bg", "background", false);
        let big = score_match("bg", "big", false);
        assert!((background - 16.0 * 0.2 / 19.0).abs() < 1e-9);
        assert!((big - 4.0 * (2.0 / 3.0) / 5.0).abs() < 1e-9);
        assert!(big > background);
    }

    #[test]
    fn test_acronym_bonus() {
        let acronym = score_match("bgc", "background-color", false);
        let plain = score_match("bgc", "backgroundcolor", false);
        assert!(acronym > plain);
    }

    #[test]
    fn test_partial_match() {
        assert_eq!(score_match("dib", "d", false), 0.0);
        assert!(score_match("dib", "d", true) > 0.0);
        assert_eq!(score_match("pox", "pos", false), 0.0);
        assert!(score_match("pox", "pos", true) > 0.0);
    }

    #[test]
    fn test_find_best_match() {
        let keys = ["bd", "bg", "bgc"];
        let best = find_best_match("bg", keys.iter(), |k| *k, 0.0, false);
        assert_eq!(best, Some(&"bg"));

        let best = find_best_match("bgco", keys.iter(), |k| *k, 0.0, true);
        assert_eq!(best, Some(&"bgc"));

        assert_eq!(find_best_match("zz", keys.iter(), |k| *k, 0.0, false), None);
    }

    #[test]
    fn test_min_score_rejects_weak_matches() {
        let keys = ["background"];
        assert!(find_best_match("bn", keys.iter(), |k| *k, 0.0, false).is_some());
        assert!(find_best_match("bn", keys.iter(), |k| *k, 0.99, false).is_none());
    }

    #[test]
    fn test_unmatched_part() {
        assert_eq!(unmatched_part("dib", "d"), "ib");
        assert_eq!(unmatched_part("poas", "pos"), "as");
        assert_eq!(unmatched_part("m", "m"), "");
    }
}
