use crate::logs::dto::{LogItem, Totals, UpdateLogItem};
use crate::search::record::{round_kcal, round_tenth};

/// Merges a partial update onto a stored item, field by field.
pub fn apply_update(item: &mut LogItem, update: UpdateLogItem) {
    if let Some(barcode) = update.barcode {
        item.barcode = Some(barcode);
    }
    if let Some(name) = update.name {
        item.name = name;
    }
    if let Some(serving_size) = update.serving_size {
        item.serving_size = Some(serving_size);
    }
    if let Some(quantity) = update.quantity {
        item.quantity = quantity;
    }
    if let Some(calories) = update.calories {
        item.calories = calories;
    }
    if let Some(protein) = update.protein {
        item.protein = protein;
    }
    if let Some(carbs) = update.carbs {
        item.carbs = carbs;
    }
    if let Some(fat) = update.fat {
        item.fat = fat;
    }
    if let Some(sugar) = update.sugar {
        item.sugar = sugar;
    }
}

/// Sums nutrients across items, then rounds once to display precision —
/// calories to the integer, grams to one decimal.
pub fn summarize<'a, I>(items: I) -> Totals
where
    I: IntoIterator<Item = &'a LogItem>,
{
    let mut calories = 0.0;
    let mut protein = 0.0;
    let mut carbs = 0.0;
    let mut fat = 0.0;
    let mut sugar = 0.0;
    for item in items {
        calories += item.calories;
        protein += item.protein;
        carbs += item.carbs;
        fat += item.fat;
        sugar += item.sugar;
    }
    Totals {
        calories: round_kcal(calories),
        protein: round_tenth(protein),
        carbs: round_tenth(carbs),
        fat: round_tenth(fat),
        sugar: round_tenth(sugar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, calories: f64, protein: f64) -> LogItem {
        LogItem {
            barcode: None,
            name: name.into(),
            serving_size: None,
            quantity: 1.0,
            calories,
            protein,
            carbs: 0.0,
            fat: 0.0,
            sugar: 0.0,
        }
    }

    #[test]
    fn update_merges_only_present_fields() {
        let mut stored = item("Porridge", 150.0, 5.0);
        apply_update(
            &mut stored,
            UpdateLogItem {
                quantity: Some(2.0),
                calories: Some(300.0),
                ..Default::default()
            },
        );
        assert_eq!(stored.name, "Porridge");
        assert_eq!(stored.quantity, 2.0);
        assert_eq!(stored.calories, 300.0);
        assert_eq!(stored.protein, 5.0);
    }

    #[test]
    fn summary_sums_and_rounds() {
        let items = vec![item("A", 100.4, 10.06), item("B", 50.3, 0.06)];
        let totals = summarize(&items);
        assert_eq!(totals.calories, 151.0);
        assert_eq!(totals.protein, 10.1);
        assert_eq!(totals.carbs, 0.0);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        let totals = summarize(&[]);
        assert_eq!(totals.calories, 0.0);
        assert_eq!(totals.sugar, 0.0);
    }
}
