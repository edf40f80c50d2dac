use strsim::{jaro_winkler, normalized_levenshtein};

const JARO_WINKLER_WEIGHT: f64 = 0.7;
const LEVENSHTEIN_WEIGHT: f64 = 0.3;

/// Case-insensitive similarity in `0.0..=1.0`.
///
/// Jaro-Winkler rewards shared prefixes (typing the start of a title),
/// Levenshtein catches typos further along.
pub fn similarity(query: &str, target: &str) -> f64 {
    let query = query.trim().to_lowercase();
    let target = target.trim().to_lowercase();

    jaro_winkler(&query, &target) * JARO_WINKLER_WEIGHT
        + normalized_levenshtein(&query, &target) * LEVENSHTEIN_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_ignoring_case() {
        assert!((similarity("Hamlet", "hamlet") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prefix_beats_unrelated() {
        let prefix = similarity("ham", "Hamlet");
        let unrelated = similarity("ham", "De Meeuw");
        assert!(prefix > unrelated);
    }

    #[test]
    fn typo_still_scores_high() {
        assert!(similarity("hamlte", "hamlet") > 0.8);
    }
}
