use serde::{Deserialize, Serialize};

/// Which upstream database a record came from. Primary (FoodData Central)
/// wins a ranking tie-break over secondary (Open Food Facts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Primary,
    Secondary,
}

/// The normalized product record every provider payload is mapped into.
///
/// Numeric fields are always present; a provider omitting a nutrient yields
/// 0, never null. Calories are kcal rounded to the nearest integer, the gram
/// fields are rounded to one decimal — both applied once, at normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientRecord {
    pub name: String,
    /// External product code; empty string when the provider has none.
    pub barcode: String,
    pub brand: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sugar: f64,
    pub source: Source,
    /// Set by the ranker, absent everywhere else.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub search_score: Option<i64>,
}

pub(crate) fn round_kcal(value: f64) -> f64 {
    value.round()
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_policy() {
        assert_eq!(round_kcal(123.4), 123.0);
        assert_eq!(round_kcal(123.5), 124.0);
        assert_eq!(round_tenth(3.14), 3.1);
        assert_eq!(round_tenth(3.15), 3.2);
        assert_eq!(round_tenth(0.0), 0.0);
    }

    #[test]
    fn search_score_is_omitted_until_ranked() {
        let record = NutrientRecord {
            name: "Oat flakes".into(),
            barcode: "".into(),
            brand: "".into(),
            calories: 370.0,
            protein: 13.0,
            carbs: 60.0,
            fat: 7.0,
            sugar: 1.0,
            source: Source::Secondary,
            search_score: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("searchScore").is_none());
        assert_eq!(json["source"], "secondary");
    }
}
