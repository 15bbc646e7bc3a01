//! The one relevance heuristic, shared by every caller that needs to order
//! search results. Deterministic, additive, stable on ties.

use crate::search::record::{NutrientRecord, Source};

/// Scores every record against the query and sorts descending. The sort is
/// stable, so equal scores keep the provider's original order.
pub fn rank(mut results: Vec<NutrientRecord>, query: &str) -> Vec<NutrientRecord> {
    let term = query.trim().to_lowercase();
    let single_word = term.split_whitespace().nth(1).is_none();
    for record in &mut results {
        record.search_score = Some(score(&record.name, &term, single_word, record.source));
    }
    results.sort_by(|a, b| b.search_score.cmp(&a.search_score));
    results
}

fn score(name: &str, term: &str, single_word: bool, source: Source) -> i64 {
    let name = name.to_lowercase();
    let mut score = 0;

    if name == term {
        score += 1000;
    }
    if name.starts_with(term) {
        score += 500;
    }
    if single_word
        && name
            .split(|c: char| c.is_whitespace() || c == ',')
            .next()
            == Some(term)
    {
        score += 400;
    }
    if name.contains(term) {
        score += 300;
    }
    if single_word {
        // shorter names are more specific matches
        score += (50 - name.chars().count() as i64).max(0);
    }
    if source == Source::Primary {
        score += 50;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, source: Source) -> NutrientRecord {
        NutrientRecord {
            name: name.into(),
            barcode: "".into(),
            brand: "".into(),
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            sugar: 0.0,
            source,
            search_score: None,
        }
    }

    #[test]
    fn exact_match_beats_prefix_beats_substring() {
        let ranked = rank(
            vec![
                record("Apple Pie", Source::Secondary),
                record("apple", Source::Secondary),
                record("Green Apple", Source::Secondary),
            ],
            "apple",
        );
        let names: Vec<_> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["apple", "Apple Pie", "Green Apple"]);
        assert!(ranked[0].search_score.unwrap() >= 1000);
        assert!(ranked[1].search_score.unwrap() >= 500);
        assert!(ranked[1].search_score.unwrap() < 1000);
    }

    #[test]
    fn first_token_match_counts_for_single_word_queries() {
        let ranked = rank(
            vec![
                record("Dried banana chips", Source::Secondary),
                record("Banana, raw", Source::Secondary),
            ],
            "banana",
        );
        assert_eq!(ranked[0].name, "Banana, raw");
    }

    #[test]
    fn primary_source_wins_ties() {
        let ranked = rank(
            vec![
                record("Whole milk", Source::Secondary),
                record("Whole milk", Source::Primary),
            ],
            "whole milk",
        );
        assert_eq!(ranked[0].source, Source::Primary);
        assert_eq!(
            ranked[0].search_score.unwrap() - ranked[1].search_score.unwrap(),
            50
        );
    }

    #[test]
    fn ties_keep_original_order() {
        let ranked = rank(
            vec![
                record("Rye bread loaf one", Source::Secondary),
                record("Rye bread loaf two", Source::Secondary),
            ],
            "rye bread loaf",
        );
        assert_eq!(ranked[0].name, "Rye bread loaf one");
    }

    #[test]
    fn shorter_names_score_higher_on_single_word_queries() {
        let ranked = rank(
            vec![
                record("Oats with a very long descriptive label", Source::Secondary),
                record("Oats", Source::Secondary),
            ],
            "oats",
        );
        assert_eq!(ranked[0].name, "Oats");
    }

    #[test]
    fn scoring_is_case_insensitive() {
        let ranked = rank(vec![record("COCA-COLA", Source::Secondary)], "coca-cola");
        assert!(ranked[0].search_score.unwrap() >= 1000);
    }
}
