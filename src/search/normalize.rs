//! Provider payload shapes and the pure normalizers that map them into
//! [`NutrientRecord`]s. Nothing in here fails: absent or malformed numeric
//! fields coerce to 0.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::products::lookup::NewProduct;
use crate::search::record::{round_kcal, round_tenth, NutrientRecord, Source};

// FoodData Central nutrient ids:
// 1008 = Energy (kcal), 1003 = Protein, 1004 = Total fat,
// 1005 = Carbohydrates, 2000 = Sugars total, 1063 = Sugars total (NLEA)
const FDC_ENERGY_KCAL: i64 = 1008;
const FDC_PROTEIN: i64 = 1003;
const FDC_FAT: i64 = 1004;
const FDC_CARBS: i64 = 1005;
const FDC_SUGARS: i64 = 2000;
const FDC_SUGARS_NLEA: i64 = 1063;

// kJ per kcal, for Open Food Facts entries that only report energy_100g
const KJ_PER_KCAL: f64 = 4.184;

/// Accepts a JSON number, a numeric string, or garbage; garbage becomes 0.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

#[derive(Debug, Deserialize)]
pub struct FdcSearchResponse {
    #[serde(default)]
    pub foods: Vec<FdcFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdcFood {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fdc_id: i64,
    #[serde(default)]
    pub gtin_upc: Option<String>,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub brand_owner: Option<String>,
    #[serde(default)]
    pub food_nutrients: Vec<FdcNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdcNutrient {
    #[serde(default)]
    pub nutrient_id: i64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: f64,
}

/// FoodData Central search hit → record. Entries without a description are
/// dropped. Sugars fall back from id 2000 to the NLEA id 1063 when the
/// former is absent or zero.
pub fn normalize_fdc(food: FdcFood) -> Option<NutrientRecord> {
    if food.description.is_empty() {
        return None;
    }

    let by_id = |id: i64| {
        food.food_nutrients
            .iter()
            .find(|n| n.nutrient_id == id)
            .map(|n| n.value)
            .unwrap_or(0.0)
    };

    let sugar = match by_id(FDC_SUGARS) {
        v if v != 0.0 => v,
        _ => by_id(FDC_SUGARS_NLEA),
    };

    let barcode = food
        .gtin_upc
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| format!("usda-{}", food.fdc_id));
    let brand = food
        .brand_name
        .filter(|b| !b.is_empty())
        .or(food.brand_owner.filter(|b| !b.is_empty()))
        .unwrap_or_default();

    Some(NutrientRecord {
        name: food.description,
        barcode,
        brand,
        calories: round_kcal(by_id(FDC_ENERGY_KCAL)),
        protein: round_tenth(by_id(FDC_PROTEIN)),
        carbs: round_tenth(by_id(FDC_CARBS)),
        fat: round_tenth(by_id(FDC_FAT)),
        sugar: round_tenth(sugar),
        source: Source::Primary,
        search_score: None,
    })
}

#[derive(Debug, Deserialize)]
pub struct OffSearchResponse {
    #[serde(default)]
    pub products: Vec<OffProduct>,
}

#[derive(Debug, Deserialize)]
pub struct OffProductResponse {
    #[serde(default)]
    pub product: Option<OffProduct>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OffProduct {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub brands: Option<String>,
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default)]
    pub nutriments: OffNutriments,
}

/// Open Food Facts nutriments, per 100 g.
#[derive(Debug, Default, Deserialize)]
pub struct OffNutriments {
    #[serde(rename = "energy-kcal_100g", default, deserialize_with = "lenient_f64")]
    pub energy_kcal_100g: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub energy_100g: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub proteins_100g: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub carbohydrates_100g: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fat_100g: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sugars_100g: f64,
}

fn off_calories(n: &OffNutriments) -> f64 {
    // some entries only carry kJ
    if n.energy_kcal_100g != 0.0 {
        n.energy_kcal_100g
    } else {
        n.energy_100g / KJ_PER_KCAL
    }
}

/// Open Food Facts search hit → record. Entries without a product name are
/// dropped; the brand is folded into the display name when present.
pub fn normalize_off(product: OffProduct) -> Option<NutrientRecord> {
    let name = product.product_name.filter(|n| !n.is_empty())?;
    let brands = product.brands.unwrap_or_default();
    let display = if brands.is_empty() {
        name
    } else {
        format!("{} - {}", name, brands)
    };
    let n = &product.nutriments;

    Some(NutrientRecord {
        name: display,
        barcode: product.code.unwrap_or_default(),
        brand: brands,
        calories: round_kcal(off_calories(n)),
        protein: round_tenth(n.proteins_100g),
        carbs: round_tenth(n.carbohydrates_100g),
        fat: round_tenth(n.fat_100g),
        sugar: round_tenth(n.sugars_100g),
        source: Source::Secondary,
        search_score: None,
    })
}

/// Single-product barcode fetch → cacheable row. Unlike the search path,
/// missing names are kept under an "Unknown" placeholder so the barcode can
/// still be cached.
pub fn normalize_off_product(barcode: &str, product: OffProduct) -> NewProduct {
    let n = &product.nutriments;
    NewProduct {
        barcode: barcode.to_string(),
        name: product
            .product_name
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "Unknown".into()),
        brand: product
            .brands
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "Unknown".into()),
        calories: round_kcal(off_calories(n)),
        protein: round_tenth(n.proteins_100g),
        carbs: round_tenth(n.carbohydrates_100g),
        fat: round_tenth(n.fat_100g),
        sugar: round_tenth(n.sugars_100g),
        serving_size: product
            .serving_size
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "100g".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fdc_food(value: Value) -> FdcFood {
        serde_json::from_value(value).unwrap()
    }

    fn off_product(value: Value) -> OffProduct {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn fdc_missing_nutrients_become_zero() {
        let record = normalize_fdc(fdc_food(json!({
            "description": "Raw broccoli",
            "fdcId": 171705
        })))
        .unwrap();
        assert_eq!(record.calories, 0.0);
        assert_eq!(record.protein, 0.0);
        assert_eq!(record.carbs, 0.0);
        assert_eq!(record.fat, 0.0);
        assert_eq!(record.sugar, 0.0);
        assert_eq!(record.barcode, "usda-171705");
        assert_eq!(record.source, Source::Primary);
    }

    #[test]
    fn fdc_maps_nutrient_ids_and_rounds() {
        let record = normalize_fdc(fdc_food(json!({
            "description": "Cheddar cheese",
            "fdcId": 1,
            "gtinUpc": "036632001085",
            "brandName": "Best Dairy",
            "foodNutrients": [
                {"nutrientId": 1008, "value": 402.6},
                {"nutrientId": 1003, "value": 24.87},
                {"nutrientId": 1004, "value": 33.31},
                {"nutrientId": 1005, "value": 1.28},
                {"nutrientId": 2000, "value": 0.48}
            ]
        })))
        .unwrap();
        assert_eq!(record.calories, 403.0);
        assert_eq!(record.protein, 24.9);
        assert_eq!(record.fat, 33.3);
        assert_eq!(record.carbs, 1.3);
        assert_eq!(record.sugar, 0.5);
        assert_eq!(record.barcode, "036632001085");
        assert_eq!(record.brand, "Best Dairy");
    }

    #[test]
    fn fdc_sugar_falls_back_to_nlea_id() {
        let record = normalize_fdc(fdc_food(json!({
            "description": "Candy",
            "fdcId": 2,
            "foodNutrients": [
                {"nutrientId": 2000, "value": 0},
                {"nutrientId": 1063, "value": 55.2}
            ]
        })))
        .unwrap();
        assert_eq!(record.sugar, 55.2);
    }

    #[test]
    fn fdc_drops_records_without_description() {
        assert!(normalize_fdc(fdc_food(json!({"fdcId": 3}))).is_none());
    }

    #[test]
    fn fdc_brand_falls_back_to_owner() {
        let record = normalize_fdc(fdc_food(json!({
            "description": "Crackers",
            "fdcId": 4,
            "brandName": "",
            "brandOwner": "Snacks Inc"
        })))
        .unwrap();
        assert_eq!(record.brand, "Snacks Inc");
    }

    #[test]
    fn malformed_numeric_values_coerce_to_zero() {
        let record = normalize_fdc(fdc_food(json!({
            "description": "Odd payload",
            "fdcId": 5,
            "foodNutrients": [
                {"nutrientId": 1008, "value": "not a number"},
                {"nutrientId": 1003, "value": "12.5"},
                {"nutrientId": 1004, "value": null}
            ]
        })))
        .unwrap();
        assert_eq!(record.calories, 0.0);
        assert_eq!(record.protein, 12.5);
        assert_eq!(record.fat, 0.0);
    }

    #[test]
    fn off_embeds_brand_in_display_name() {
        let record = normalize_off(off_product(json!({
            "product_name": "Coca-Cola",
            "code": "5449000000996",
            "brands": "Coca-Cola",
            "nutriments": {"energy-kcal_100g": 42, "sugars_100g": 10.6, "carbohydrates_100g": 10.6}
        })))
        .unwrap();
        assert_eq!(record.name, "Coca-Cola - Coca-Cola");
        assert_eq!(record.brand, "Coca-Cola");
        assert_eq!(record.calories, 42.0);
        assert_eq!(record.sugar, 10.6);
        assert_eq!(record.source, Source::Secondary);
    }

    #[test]
    fn off_converts_kilojoules_when_kcal_missing() {
        let record = normalize_off(off_product(json!({
            "product_name": "Juice",
            "nutriments": {"energy_100g": 180}
        })))
        .unwrap();
        // 180 kJ / 4.184 = 43.02... kcal
        assert_eq!(record.calories, 43.0);
        assert_eq!(record.barcode, "");
    }

    #[test]
    fn off_drops_unnamed_products() {
        assert!(normalize_off(off_product(json!({"code": "123"}))).is_none());
    }

    #[test]
    fn off_barcode_fetch_uses_placeholders() {
        let product = normalize_off_product("4000417025005", off_product(json!({
            "nutriments": {"energy-kcal_100g": 539, "sugars_100g": 56.3}
        })));
        assert_eq!(product.name, "Unknown");
        assert_eq!(product.brand, "Unknown");
        assert_eq!(product.serving_size, "100g");
        assert_eq!(product.barcode, "4000417025005");
        assert_eq!(product.calories, 539.0);
        assert_eq!(product.sugar, 56.3);
    }
}
