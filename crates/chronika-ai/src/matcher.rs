//! Keyword containment search over leader fields.
//!
//! The fallback path when the embedding encoder is unavailable: a candidate
//! matches iff the lowercased query occurs verbatim in the lowercased
//! concatenation of its display names, position and achievements. No ranking
//! — input order is preserved.

use chronika_core::types::Leader;

/// The text a leader is matched and ranked against.
pub fn searchable_text(leader: &Leader) -> String {
    format!(
        "{} {} {} {}",
        leader.name_primary, leader.name_secondary, leader.position, leader.achievements
    )
}

/// Case-insensitive substring search over `candidates`.
pub fn keyword_search(query: &str, candidates: &[Leader]) -> Vec<Leader> {
    let needle = query.to_lowercase();
    candidates
        .iter()
        .filter(|l| searchable_text(l).to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leader(id: i64, name: &str, achievements: &str) -> Leader {
        Leader {
            id,
            name_primary: name.to_string(),
            name_secondary: name.to_string(),
            achievements: achievements.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_matches_are_case_insensitive() {
        let candidates = vec![
            leader(1, "Lenin", "led the October revolution"),
            leader(2, "Stalin", "industrialization"),
        ];
        let results = keyword_search("LENIN", &candidates);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn test_matches_on_achievements() {
        let candidates = vec![
            leader(1, "Lenin", "led the October revolution"),
            leader(2, "Stalin", "industrialization"),
        ];
        let results = keyword_search("revolution", &candidates);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn test_input_order_preserved() {
        let candidates = vec![
            leader(3, "Khrushchev", "corn and space"),
            leader(1, "Lenin", "revolution"),
            leader(2, "Stalin", "steel"),
        ];
        // all names contain "h"... use a shared token instead
        let results = keyword_search("s", &candidates);
        let ids: Vec<i64> = results.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_whole_phrase_is_literal() {
        // the fallback matches the query as one literal substring, not
        // word-by-word
        let candidates = vec![
            leader(1, "Lenin", "revolution leader"),
            leader(2, "Stalin", "industrialization"),
        ];
        let results = keyword_search("revolution leader industrialization", &candidates);
        assert!(results.is_empty());
    }
}
